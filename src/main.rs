use anyhow::Result;
use clap::Parser;

use release_helper::cli::{dispatch, Args, Operation};
use release_helper::config::load_config;
use release_helper::guard::{self, GuardVerdict};
use release_helper::runner::SystemRunner;
use release_helper::ui;

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_helper")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logger(args.debug)?;

    let workdir = std::env::current_dir()?;
    let config = match load_config(args.config.as_deref(), &workdir) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let runner = SystemRunner::new();

    match guard::probe(&runner, &workdir, &config.guard) {
        Ok(GuardVerdict::Proceed) => {}
        Ok(GuardVerdict::Blocked(pending)) => {
            log::debug!("blocked by {}", pending);
            println!("Sorry mate, please ensure there are no pending git operations");
            return Ok(());
        }
        Err(e) => {
            ui::display_error(&format!("Could not check repository status: {}", e));
            std::process::exit(1);
        }
    }

    let operation = match args.operation.parse::<Operation>() {
        Ok(operation) => operation,
        Err(e) => {
            log::debug!("{}", e);
            ui::display_usage_hint();
            std::process::exit(1);
        }
    };

    if let Err(e) = dispatch(operation, &runner, &workdir, &config, args.dry_run) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
