// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use std::env;

const DEFAULT_NAMESPACE: &str = "default";
const DEFAULT_KEEP_LAST: usize = 5;
const DEFAULT_KEEP_DAYS: u64 = 7;

/// Command-line flags. A flag given on the command line overrides the
/// corresponding environment variable.
#[derive(Parser, Debug, Default)]
#[command(
    name = "configmap-gc",
    about = "Garbage collector for versioned ConfigMaps left behind by Argo Rollouts",
    long_about = "configmap-gc removes stale versioned ConfigMaps that accumulate when Helm\n\
                  generates immutable ConfigMaps with the pattern {app}-config-{hash8}.\n\n\
                  Dry-run is enabled by default; pass --dry-run=false (or DRY_RUN=false)\n\
                  to perform actual deletions."
)]
pub struct Cli {
    /// Comma-separated target namespaces (env: NAMESPACE)
    #[arg(long)]
    pub namespace: Option<String>,

    /// Keep the N newest ConfigMaps regardless of age (env: KEEP_LAST)
    #[arg(long)]
    pub keep_last: Option<usize>,

    /// Keep ConfigMaps newer than N days (env: KEEP_DAYS)
    #[arg(long)]
    pub keep_days: Option<u64>,

    /// Log planned deletions without performing them (env: DRY_RUN)
    #[arg(long)]
    pub dry_run: Option<bool>,

    /// Log level: debug|info|warn|error (env: LOG_LEVEL)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format: text|json (env: LOG_FORMAT)
    #[arg(long)]
    pub log_format: Option<String>,
}

/// Garbage collector configuration, immutable after startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespaces to run one GC cycle in, each independent of the others
    pub namespaces: Vec<String>,
    pub keep_last: usize,
    pub keep_days: u64,
    pub dry_run: bool,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults. Malformed numeric or boolean values are an error rather
    /// than a silent default.
    pub fn from_env() -> Result<Self> {
        let raw_namespaces =
            env::var("NAMESPACE").unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string());
        let mut namespaces = parse_namespaces(&raw_namespaces);
        if namespaces.is_empty() {
            namespaces = vec![DEFAULT_NAMESPACE.to_string()];
        }

        Ok(Config {
            namespaces,
            keep_last: env_parse("KEEP_LAST", DEFAULT_KEEP_LAST)?,
            keep_days: env_parse("KEEP_DAYS", DEFAULT_KEEP_DAYS)?,
            dry_run: env_parse("DRY_RUN", true)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string()),
        })
    }

    /// Override values with any flags that were explicitly set, so that
    /// flags always win over environment variables and defaults
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(raw) = &cli.namespace {
            let namespaces = parse_namespaces(raw);
            if !namespaces.is_empty() {
                self.namespaces = namespaces;
            }
        }
        if let Some(keep_last) = cli.keep_last {
            self.keep_last = keep_last;
        }
        if let Some(keep_days) = cli.keep_days {
            self.keep_days = keep_days;
        }
        if let Some(dry_run) = cli.dry_run {
            self.dry_run = dry_run;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }
        if let Some(log_format) = &cli.log_format {
            self.log_format = log_format.clone();
        }
    }
}

/// Split a comma-separated namespace list, dropping empty entries
pub fn parse_namespaces(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("invalid {} value {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}
