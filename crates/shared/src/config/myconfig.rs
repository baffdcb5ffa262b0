use crate::{config::GeneratorConfig, model::bin::InvalidBinPolicy};
use anyhow::{Context, Result, anyhow};
use std::{fmt::Display, str::FromStr};

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub is_dev: bool,
    pub invalid_bin_policy: InvalidBinPolicy,
    pub initial_bins: Vec<String>,
    pub generator: GeneratorConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let is_dev = match lookup("DEV_MODE").as_deref().map(str::trim) {
            None | Some("") | Some("false") | Some("0") => false,
            Some("true") | Some("1") => true,
            Some(other) => {
                return Err(anyhow!("DEV_MODE must be 'true' or 'false', got '{other}'"));
            }
        };

        let invalid_bin_policy = match lookup("INVALID_BIN_POLICY").as_deref().map(str::trim) {
            None | Some("") | Some("drop_invalid") => InvalidBinPolicy::DropInvalid,
            Some("reject_batch") => InvalidBinPolicy::RejectBatch,
            Some(other) => {
                return Err(anyhow!(
                    "INVALID_BIN_POLICY must be 'drop_invalid' or 'reject_batch', got '{other}'"
                ));
            }
        };

        let initial_bins = lookup("INITIAL_BINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let generator =
            GeneratorConfig::from_lookup(&lookup).context("Invalid generator configuration")?;

        Ok(Self {
            port,
            is_dev,
            invalid_bin_policy,
            initial_bins,
            generator,
        })
    }
}

/// Reads `key`, falling back to `default` when unset or blank.
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{key} is invalid ('{raw}'): {e}")),
        _ => Ok(default),
    }
}
