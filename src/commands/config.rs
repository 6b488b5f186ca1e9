// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Settings, config_path};
use anyhow::Result;
use std::path::Path;

/// `path` and `init` never read the stored file, so both work over a corrupt config.
pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("path", _)) => println!("{}", config_path()?.display()),
        Some(("show", _)) => {
            let settings = Settings::load_effective()?;
            println!("{}", serde_json::to_string_pretty(&settings.redacted())?);
        }
        Some(("init", sub)) => {
            let path = config_path()?;
            if init(&path, sub.get_flag("force"))? {
                println!("Config written to {}", path.display());
            } else {
                println!("Config already exists at {} (use --force)", path.display());
            }
        }
        _ => {}
    }
    Ok(())
}

/// Writes default settings to `path`. Returns false when a file exists and
/// `force` is not set.
pub fn init(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    Settings::default().save_to(path)?;
    Ok(true)
}
