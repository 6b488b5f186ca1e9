// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use depreciator::{cli, commands, config::Settings};

fn init_tracing(debug: bool) {
    let default = if debug { "depreciator=debug" } else { "depreciator=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_tracing(matches.get_flag("debug"));

    match matches.subcommand() {
        Some(("compute", sub)) => {
            let settings = Settings::load_effective()?;
            commands::compute::handle(&settings, sub)?
        }
        Some(("config", sub)) => commands::config::handle(sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
