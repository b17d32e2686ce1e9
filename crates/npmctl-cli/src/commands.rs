//! Command implementations for the CLI.
//!
//! Each command validates its own input, authenticates once, performs a
//! single resource call and returns the rendered output.

use log::debug;
use npmctl_client::NpmClient;
use npmctl_common::ProxyHost;

use crate::args::{Command, CreateArgs, DeleteArgs};
use crate::display;
use crate::error::{CliError, Stage};
use crate::settings::Settings;

/// Runs `command` and returns what it prints on success.
pub async fn run(command: &Command, settings: &Settings) -> Result<String, CliError> {
    match command {
        Command::List => list(settings).await,
        Command::Create(args) => create(settings, args).await,
        Command::Delete(args) => delete(settings, args).await,
    }
}

/// Lists all proxy hosts.
pub async fn list(settings: &Settings) -> Result<String, CliError> {
    let client = authenticated_client(settings).await?;

    let hosts = client
        .list_hosts()
        .await
        .map_err(|source| CliError::at(Stage::ListHosts, source))?;

    Ok(display::host_list(&hosts))
}

/// Creates a proxy host from the command flags.
pub async fn create(settings: &Settings, args: &CreateArgs) -> Result<String, CliError> {
    let host = host_from_args(args)?;
    let client = authenticated_client(settings).await?;

    let created = client
        .create_host(&host)
        .await
        .map_err(|source| CliError::at(Stage::CreateHost, source))?;

    Ok(display::created(&created))
}

/// Deletes the proxy host named by `--id`.
pub async fn delete(settings: &Settings, args: &DeleteArgs) -> Result<String, CliError> {
    let id = args
        .id
        .filter(|id| *id != 0)
        .ok_or_else(|| CliError::Validation("id is required".to_string()))?;
    let client = authenticated_client(settings).await?;

    client
        .delete_host(id)
        .await
        .map_err(|source| CliError::at(Stage::DeleteHost, source))?;

    Ok(display::deleted(id))
}

/// Builds the new host, with `enabled` and `block_exploits` always on.
fn host_from_args(args: &CreateArgs) -> Result<ProxyHost, CliError> {
    let domain = args.domain.clone().filter(|d| !d.trim().is_empty());
    let forward_host = args.forward_host.clone().filter(|h| !h.trim().is_empty());
    let forward_port = args.forward_port.filter(|p| *p != 0);

    let (Some(domain), Some(forward_host), Some(forward_port)) =
        (domain, forward_host, forward_port)
    else {
        return Err(CliError::Validation(
            "domain, forward-host, and forward-port are required".to_string(),
        ));
    };

    let host = ProxyHost::builder()
        .domain_names(vec![domain])
        .forward_scheme(args.forward_scheme)
        .forward_host(forward_host)
        .forward_port(forward_port)
        .enabled(true)
        .block_exploits(true)
        .build();

    host.validate_for_create()
        .map_err(|e| CliError::Validation(e.to_string()))?;

    Ok(host)
}

async fn authenticated_client(settings: &Settings) -> Result<NpmClient, CliError> {
    let mut client = NpmClient::new(settings.client_config())
        .map_err(|source| CliError::at(Stage::Connect, source))?;

    debug!(
        "Authenticating as '{}' against {}",
        settings.username, settings.api_url
    );
    client
        .authenticate(&settings.credentials())
        .await
        .map_err(|source| CliError::at(Stage::Authenticate, source))?;

    Ok(client)
}
