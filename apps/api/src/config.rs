use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::layout::FontSource;
use crate::profile::SectionSet;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or inconsistent.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// TrueType files to embed; `None` uses the built-in standard fonts.
    pub font_paths: Option<(PathBuf, PathBuf)>,
    pub pdf_compress: bool,
    /// Ask for and render the optional APPLICATIONS AND GAMES section.
    pub applications_section: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let font_paths = match (optional_env("FONT_REGULAR_PATH"), optional_env("FONT_BOLD_PATH")) {
            (Some(regular), Some(bold)) => Some((PathBuf::from(regular), PathBuf::from(bold))),
            (None, None) => None,
            _ => bail!("FONT_REGULAR_PATH and FONT_BOLD_PATH must be set together"),
        };

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            font_paths,
            pdf_compress: match optional_env("PDF_COMPRESS") {
                Some(value) => parse_bool(&value).context("PDF_COMPRESS must be true or false")?,
                None => true,
            },
            applications_section: match optional_env("APPLICATIONS_SECTION") {
                Some(value) => parse_bool(&value).context("APPLICATIONS_SECTION must be true or false")?,
                None => false,
            },
        })
    }

    pub fn font_source(&self) -> FontSource {
        match &self.font_paths {
            Some((regular, bold)) => FontSource::TrueType {
                regular: regular.clone(),
                bold: bold.clone(),
            },
            None => FontSource::Standard,
        }
    }

    pub fn section_set(&self) -> SectionSet {
        if self.applications_section {
            SectionSet::with_applications_and_games()
        } else {
            SectionSet::default()
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads `key`, treating an empty value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean '{other}'"),
    }
}
