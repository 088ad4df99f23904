use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use log::trace;

use crate::types::package_of;

/// Finds the source text for a set of classes compiled from one file
pub trait SourceLocator: Send + Sync {
    /// Short description used in logs (e.g. the root directory)
    fn name(&self) -> String;

    /// Return a reader over `file_name` for any of `classes`, if found
    fn locate(&self, classes: &[String], file_name: &str) -> Option<Box<dyn BufRead + Send>>;
}

/// Looks for `<root>/<package path>/<file name>` on disk
#[derive(Debug, Clone)]
pub struct DirectorySourceLocator {
    root: PathBuf,
}

impl DirectorySourceLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn candidate_path(&self, class_name: &str, file_name: &str) -> PathBuf {
        let package = package_of(class_name);
        let mut path = self.root.clone();
        for segment in package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(file_name);
        path
    }
}

impl SourceLocator for DirectorySourceLocator {
    fn name(&self) -> String {
        self.root.display().to_string()
    }

    fn locate(&self, classes: &[String], file_name: &str) -> Option<Box<dyn BufRead + Send>> {
        classes.iter().find_map(|class_name| {
            let path = self.candidate_path(class_name, file_name);
            trace!("Looking for source at {}", path.display());
            if !path.is_file() {
                return None;
            }
            File::open(&path)
                .ok()
                .map(|file| Box::new(BufReader::new(file)) as Box<dyn BufRead + Send>)
        })
    }
}

/// Ordered set of source locators; the first one that finds the file wins
pub struct LocatorRegistry {
    locators: Vec<Box<dyn SourceLocator>>,
}

impl LocatorRegistry {
    pub fn new() -> Self {
        Self {
            locators: Vec::new(),
        }
    }

    /// One directory locator per root, in the given order
    pub fn from_roots(roots: &[PathBuf]) -> Self {
        let mut registry = Self::new();
        for root in roots {
            registry.register(DirectorySourceLocator::new(root));
        }
        registry
    }

    /// Register a locator after all previously registered ones
    pub fn register<T: SourceLocator + 'static>(&mut self, locator: T) {
        self.locators.push(Box::new(locator));
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// Try each locator in registration order
    pub fn locate(&self, classes: &[String], file_name: &str) -> Option<Box<dyn BufRead + Send>> {
        self.locators.iter().find_map(|locator| {
            let found = locator.locate(classes, file_name);
            if found.is_some() {
                trace!("Found {} via {}", file_name, locator.name());
            }
            found
        })
    }
}

impl Default for LocatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;

    fn read_all(mut reader: Box<dyn BufRead + Send>) -> String {
        let mut text = String::new();
        reader.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn directory_locator_uses_package_path() {
        let dir = tempdir().unwrap();
        let pkg = dir.path().join("com").join("example");
        std::fs::create_dir_all(&pkg).unwrap();
        std::fs::write(pkg.join("Foo.java"), "class Foo {}\n").unwrap();

        let locator = DirectorySourceLocator::new(dir.path());
        let classes = vec!["com.example.Foo".to_string()];
        let reader = locator.locate(&classes, "Foo.java").expect("source found");
        assert_eq!(read_all(reader), "class Foo {}\n");

        assert!(locator.locate(&classes, "Bar.java").is_none());
        assert!(
            locator
                .locate(&["org.other.Foo".to_string()], "Foo.java")
                .is_none()
        );
    }

    #[test]
    fn default_package_resolves_to_root() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("Foo.java"), "x").unwrap();
        let locator = DirectorySourceLocator::new(dir.path());
        assert!(locator.locate(&["Foo".to_string()], "Foo.java").is_some());
    }

    #[test]
    fn registry_prefers_first_registered_root() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        std::fs::write(first.path().join("Foo.java"), "first").unwrap();
        std::fs::write(second.path().join("Foo.java"), "second").unwrap();

        let registry =
            LocatorRegistry::from_roots(&[first.path().to_path_buf(), second.path().to_path_buf()]);
        assert_eq!(registry.len(), 2);
        let reader = registry.locate(&["Foo".to_string()], "Foo.java").unwrap();
        assert_eq!(read_all(reader), "first");

        let reversed =
            LocatorRegistry::from_roots(&[second.path().to_path_buf(), first.path().to_path_buf()]);
        let reader = reversed.locate(&["Foo".to_string()], "Foo.java").unwrap();
        assert_eq!(read_all(reader), "second");
    }

    #[test]
    fn empty_registry_finds_nothing() {
        let registry = LocatorRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.locate(&["Foo".to_string()], "Foo.java").is_none());
    }
}
