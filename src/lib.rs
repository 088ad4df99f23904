pub mod core;

// Re-export key items for easy importing in this crate
pub use crate::core::types;

// Re-export key items for easy importing in other crates
pub use crate::core::aggregator::{ResultAggregator, classify_method};
pub use crate::core::listener::{ListenerSet, ResultListener};
pub use crate::core::locator::{DirectorySourceLocator, LocatorRegistry, SourceLocator};
pub use crate::core::main_shared::run_main;
pub use crate::core::report::{HtmlRenderer, ReportCompiler, ReportRenderer, ReportSettings};
