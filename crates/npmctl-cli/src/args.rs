//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use npmctl_common::ForwardScheme;

use crate::settings::DEFAULT_API_URL;

#[derive(Parser, Debug)]
#[command(
    name = "npmctl",
    author,
    version,
    about = "A CLI tool for managing Nginx Proxy Manager",
    long_about = "A command line interface for interacting with the Nginx Proxy Manager API."
)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Nginx Proxy Manager API URL (or set NPM_API_URL)
    #[arg(short = 'a', long, global = true, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Username for authentication (or set NPM_USERNAME)
    #[arg(short, long, global = true)]
    pub username: Option<String>,

    /// Password for authentication (or set NPM_PASSWORD)
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Path to a TOML settings file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log requests and responses to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Default for GlobalArgs {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            username: None,
            password: None,
            config: None,
            verbose: false,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all proxy hosts
    List,
    /// Create a new proxy host
    Create(CreateArgs),
    /// Delete a proxy host by ID
    Delete(DeleteArgs),
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct CreateArgs {
    /// Domain name for the proxy host
    #[arg(long)]
    pub domain: Option<String>,

    /// Forward host
    #[arg(long)]
    pub forward_host: Option<String>,

    /// Forward port
    #[arg(long)]
    pub forward_port: Option<u16>,

    /// Forward scheme (http or https)
    #[arg(long, default_value_t = ForwardScheme::Http)]
    pub forward_scheme: ForwardScheme,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct DeleteArgs {
    /// ID of the proxy host to delete
    #[arg(long)]
    pub id: Option<u64>,
}
