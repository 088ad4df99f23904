use log::info;

use crate::types::AppResult;
use crate::types::config::config;

pub async fn execute(format: String) -> AppResult<()> {
    let effective_config = config().to_effective();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&effective_config)?);
    } else {
        // Table format
        info!("Effective Configuration:");
        info!("");
        info!("Global:");
        match &effective_config.mutators {
            Some(mutators) => info!("  mutators: [{}]", mutators.join(", ")),
            None => info!("  mutators: (from results)"),
        }

        info!("");
        info!("Log:");
        if let Some(log) = &effective_config.log {
            info!("  level: {}", log.level.as_deref().unwrap_or("info"));
            match log.color {
                Some(true) => info!("  color: on"),
                Some(false) => info!("  color: off"),
                None => info!("  color: auto"),
            }
        }

        info!("");
        info!("Report:");
        if let Some(report) = &effective_config.report {
            info!("  dir: {}", report.dir.as_deref().unwrap_or("(not set)"));
            info!("  timestamped: {}", report.timestamped.unwrap_or(true));
        }

        info!("");
        info!("Source:");
        if let Some(source) = &effective_config.source {
            match &source.roots {
                Some(roots) if !roots.is_empty() => info!("  roots: [{}]", roots.join(", ")),
                _ => info!("  roots: []"),
            }
        }
    }

    Ok(())
}
