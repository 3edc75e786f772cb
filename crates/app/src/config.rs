//! Command-line and environment configuration.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use storage::{GroupField, SourceConfig};

#[derive(Parser, Debug)]
#[command(name = "cards", version, about = "Learn who's who from directory photos")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Directory attribute used as the group
    #[arg(long, env = "CARDS_GROUP_BY", default_value = "department", global = true)]
    pub group_by: GroupField,

    /// Only quiz people in this group
    #[arg(long, env = "CARDS_FILTER", global = true)]
    pub filter: Option<String>,

    /// Seed for deterministic shuffles
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Do not warm upcoming photos
    #[arg(long, global = true)]
    pub no_prefetch: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the interactive quiz (default)
    Play,
    /// Print every group with its head count
    Groups,
}

#[derive(Args, Default, Clone)]
pub struct SourceArgs {
    /// Local directory JSON file
    #[arg(long, env = "CARDS_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// URL returning the directory JSON
    #[arg(long, env = "CARDS_URL", global = true)]
    pub url: Option<String>,

    /// BambooHR company subdomain
    #[arg(long, env = "CARDS_BAMBOO_DOMAIN", global = true)]
    pub bamboo_domain: Option<String>,

    /// BambooHR API key
    #[arg(long, env = "CARDS_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,
}

impl fmt::Debug for SourceArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceArgs")
            .field("file", &self.file)
            .field("url", &self.url)
            .field("bamboo_domain", &self.bamboo_domain)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

impl SourceArgs {
    /// Pick one source. BambooHR wins over a URL, which wins over a file.
    ///
    /// # Errors
    ///
    /// Fails when only half of the BambooHR pair is given or nothing is configured.
    pub fn resolve(&self) -> Result<SourceConfig> {
        match (&self.bamboo_domain, &self.api_key) {
            (Some(subdomain), Some(api_key)) => {
                return Ok(SourceConfig::Bamboo {
                    subdomain: subdomain.clone(),
                    api_key: api_key.clone(),
                });
            }
            (Some(_), None) => bail!("--bamboo-domain needs --api-key (or CARDS_API_KEY)"),
            (None, Some(_)) => bail!("--api-key needs --bamboo-domain (or CARDS_BAMBOO_DOMAIN)"),
            (None, None) => {}
        }
        if let Some(url) = &self.url {
            return Ok(SourceConfig::Url(url.clone()));
        }
        if let Some(path) = &self.file {
            return Ok(SourceConfig::File(path.clone()));
        }
        bail!(
            "no directory source configured; pass --file, --url or --bamboo-domain with --api-key"
        )
    }
}

/// Settings the play loop needs after parsing.
#[derive(Debug, Clone)]
pub struct PlaySettings {
    pub filter: Option<String>,
    pub seed: Option<u64>,
    pub prefetch: bool,
}

impl Cli {
    #[must_use]
    pub fn play_settings(&self) -> PlaySettings {
        PlaySettings {
            filter: self.filter.clone(),
            seed: self.seed,
            prefetch: !self.no_prefetch,
        }
    }
}
