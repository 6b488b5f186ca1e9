// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Depreciator", "depreciator"));

pub const ENV_BASE_URL: &str = "SNIPEIT_BASE_URL";
pub const ENV_API_TOKEN: &str = "SNIPEIT_API_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: Option<String>,
    pub api_token: Option<String>,
    pub expense_account: Option<String>,
    pub contra_account: Option<String>,
    /// Label printed next to totals. No conversion happens.
    pub currency: String,
    pub timeout_secs: u64,
    pub page_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: None,
            api_token: None,
            expense_account: None,
            contra_account: None,
            currency: "EUR".to_string(),
            timeout_secs: 30,
            page_size: 100,
        }
    }
}

/// Everything needed to talk to the inventory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub base_url: String,
    pub api_token: String,
    pub timeout_secs: u64,
    pub page_size: u32,
}

pub fn config_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific config dir")?;
    Ok(proj.config_dir().join("config.json"))
}

impl Settings {
    /// Reads `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Settings> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Parse config {}", path.display()))
    }

    pub fn load() -> Result<Settings> {
        Settings::load_from(&config_path()?)
    }

    /// Stored settings with environment overrides applied.
    pub fn load_effective() -> Result<Settings> {
        let mut settings = Settings::load()?;
        settings.apply_env(|k| std::env::var(k).ok());
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Create config dir {}", dir.display()))?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Write config {}", path.display()))
    }

    /// Overrides connection fields from the environment. `lookup` is
    /// `std::env::var` in the binary.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = Some(v);
        }
        if let Some(v) = lookup(ENV_API_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.api_token = Some(v);
        }
    }

    pub fn connection(&self) -> Result<ConnectionSettings> {
        let base_url = self
            .base_url
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow!("No base URL: pass --base-url or set {}", ENV_BASE_URL))?;
        let api_token = self
            .api_token
            .clone()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow!("No API token: pass --api-token or set {}", ENV_API_TOKEN))?;
        Ok(ConnectionSettings {
            base_url,
            api_token,
            timeout_secs: self.timeout_secs,
            page_size: self.page_size,
        })
    }

    /// Copy safe to print.
    pub fn redacted(&self) -> Settings {
        let mut s = self.clone();
        if s.api_token.is_some() {
            s.api_token = Some("********".to_string());
        }
        s
    }
}
