pub mod aggregator;
pub mod cli;
pub mod cmds;
pub mod ingest;
pub mod listener;
pub mod locator;
pub mod logging;
pub mod main_shared;
pub mod pipeline;
pub mod report;
pub mod types;
