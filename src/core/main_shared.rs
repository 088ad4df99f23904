use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use log::{debug, warn};

use crate::core::cli::{Args, Commands, PrintArgs};
use crate::core::cmds;
use crate::core::logging::init_logging;
use crate::types::AppResult;
use crate::types::config::{CliOverrides, init_with_overrides};

pub async fn run_main() -> AppResult<()> {
    let args = Args::parse();

    // Handle global arguments
    if let Some(cwd_arg) = args.cwd.as_ref() {
        let cwd = PathBuf::from(cwd_arg).canonicalize()?;
        let _ = env::set_current_dir(&cwd);
    }
    let cwd = env::current_dir()?;

    // Build CLI overrides for config precedence
    let mut cli_overrides = CliOverrides {
        log_level: args.log_level.clone(),
        log_color: args.log_color.clone(),
        ..Default::default()
    };
    if let Commands::Report(report_args) = &args.command {
        cli_overrides.report_dir = report_args.out.clone();
        cli_overrides.source_roots = Some(report_args.source_roots.clone());
        cli_overrides.mutators = report_args.mutators.clone();
    }

    // Initialize configuration (files, then CLI overrides)
    init_with_overrides(&cli_overrides);

    // Initialize logging after config so level/color are applied
    init_logging();
    debug!("Current working directory: {}", cwd.display());

    // Setup running flag to handle signals from ctrl-c
    let running = Arc::new(AtomicBool::new(true));
    let running_ctrlc = Arc::clone(&running);

    ctrlc::set_handler(move || {
        warn!("Received Ctrl-C, finishing the current run..");
        running_ctrlc.store(false, Ordering::SeqCst);
    })
    .expect("Error creating a Ctrl-C handler");

    // Dispatch to appropriate command
    match args.command {
        Commands::Init => cmds::execute_init().await?,
        Commands::Report(report_args) => {
            cmds::execute_report(report_args, Arc::clone(&running)).await?
        }
        Commands::Stats(stats_args) => {
            cmds::execute_stats(stats_args, Arc::clone(&running)).await?
        }
        Commands::Print {
            command: print_args,
        } => match print_args {
            PrintArgs::Config(args) => {
                cmds::execute_print(cmds::print::PrintCommand::Config(args.format)).await?
            }
        },
    }

    // Interrupted runs still write their index but exit non-zero
    if !running.load(Ordering::SeqCst) {
        std::process::exit(2);
    }

    Ok(())
}
