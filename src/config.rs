// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ConfigError;
use crate::models::Logo;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_ENV: &str = "STRIPE_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.stripe.com";
const DEFAULT_OUTPUT: &str = "payout_reports";
const DEFAULT_LOG_DIR: &str = "logs";
const PDF_LOGO_FILE: &str = "logo.png";

static DIMENSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d+)\s*(?:px)?\s*$").unwrap());

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub stripe: StripeConfig,
    pub output: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub format: Option<String>,
    pub templates_dir: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub logo: Option<LogoConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StripeConfig {
    #[serde(alias = "auth")]
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogoConfig {
    pub url: String,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
}

/// Logo sizes are written either as numbers or as CSS-like strings ("150px").
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Dimension {
    Units(u32),
    Text(String),
}

impl Dimension {
    pub fn units(&self) -> Result<u32, ConfigError> {
        match self {
            Dimension::Units(n) => Ok(*n),
            Dimension::Text(s) => DIMENSION
                .captures(s)
                .and_then(|c| c[1].parse().ok())
                .ok_or_else(|| ConfigError::Dimension(s.clone())),
        }
    }
}

impl Config {
    /// `explicit` must exist; otherwise `./config.json`, then the per-user
    /// config file, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let candidate = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => [Some(PathBuf::from("config.json")), crate::paths::user_config_path()]
                .into_iter()
                .flatten()
                .find(|p| p.is_file()),
        };
        let mut cfg = match candidate {
            Some(path) => Self::from_file(&path)?,
            None => Config::default(),
        };
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                cfg.stripe.api_key = Some(key.trim().to_string());
            }
        }
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.stripe
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    pub fn base_url(&self) -> &str {
        self.stripe.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR))
    }

    pub fn default_format(&self) -> &str {
        self.format.as_deref().unwrap_or("html")
    }

    /// Configured logo with sizes resolved to units.
    pub fn logo(&self) -> Result<Option<Logo>, ConfigError> {
        let Some(l) = &self.logo else {
            return Ok(None);
        };
        Ok(Some(Logo {
            url: l.url.clone(),
            width: l.width.as_ref().map(Dimension::units).transpose()?,
            height: l.height.as_ref().map(Dimension::units).transpose()?,
        }))
    }

    /// The logo bundled with PDF reports lives in the assets dir.
    pub fn pdf_logo_path(&self) -> PathBuf {
        let dir = self
            .assets_dir
            .clone()
            .or_else(|| crate::paths::default_assets_dir().ok())
            .unwrap_or_else(|| PathBuf::from("assets"));
        dir.join(PDF_LOGO_FILE)
    }

    pub fn html_template_path(&self) -> Option<PathBuf> {
        self.templates_dir
            .as_ref()
            .map(|d| d.join("layout-html.hbs"))
            .filter(|p| p.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_accept_numbers_and_px_strings() {
        assert_eq!(Dimension::Units(120).units().unwrap(), 120);
        assert_eq!(Dimension::Text("150px".into()).units().unwrap(), 150);
        assert_eq!(Dimension::Text(" 80 ".into()).units().unwrap(), 80);
        assert!(Dimension::Text("wide".into()).units().is_err());
    }

    #[test]
    fn parses_original_config_layout() {
        let cfg: Config = serde_json::from_str(
            r#"{
                "stripe": { "auth": "sk_test_123" },
                "output": "./reports",
                "format": "pdf",
                "logo": { "url": "https://example.com/logo.png", "width": "150px", "height": 40 }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.api_key().unwrap(), "sk_test_123");
        assert_eq!(cfg.output_dir(), PathBuf::from("./reports"));
        assert_eq!(cfg.default_format(), "pdf");
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        let logo = cfg.logo().unwrap().unwrap();
        assert_eq!(logo.width, Some(150));
        assert_eq!(logo.height, Some(40));
    }

    #[test]
    fn defaults_without_file() {
        let cfg = Config::default();
        assert!(cfg.api_key().is_err());
        assert_eq!(cfg.output_dir(), PathBuf::from("payout_reports"));
        assert_eq!(cfg.log_dir(), PathBuf::from("logs"));
        assert_eq!(cfg.default_format(), "html");
        assert!(cfg.logo().unwrap().is_none());
    }
}
