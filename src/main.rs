//! WorkOS provider entrypoint.
//!
//! Serves the provider to a host, or inspects the WorkOS account from the
//! command line using the same handlers.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use terraform_provider_workos::cli::{Cli, Commands, OutputFormatter};
use terraform_provider_workos::config::{
    ConfigParser, ConfigResolver, ProviderModel, ResolvedConfig, find_config_file,
};
use terraform_provider_workos::datasources::OrganizationsDataSource;
use terraform_provider_workos::error::{ProviderError, Result};
use terraform_provider_workos::framework::{
    DataSource, Diagnostics, Payload, ReadDataSourceRequest, ReadRequest, Resource,
};
use terraform_provider_workos::models::{OrganizationModel, OrganizationsDataSourceModel};
use terraform_provider_workos::provider::{WorkosClient, WorkosProvider};
use terraform_provider_workos::resources::OrganizationResource;
use terraform_provider_workos::server::ProviderServer;
use terraform_provider_workos::workos::WORKOS_API_URL;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system.
///
/// Logs go to stderr; stdout is reserved for command output and the serve
/// protocol. `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);

    match cli.command {
        Commands::Serve => cmd_serve().await,
        Commands::Schema => cmd_schema(),
        Commands::Validate => cmd_validate(cli.config.as_ref(), &formatter),
        Commands::Organizations => cmd_organizations(cli.config.as_ref(), &formatter).await,
        Commands::Show { id } => cmd_show(cli.config.as_ref(), id, &formatter).await,
    }
}

/// Serve the provider on stdin/stdout.
async fn cmd_serve() -> Result<()> {
    let mut server = ProviderServer::new(WorkosProvider::new(VERSION));
    let reader = tokio::io::BufReader::new(tokio::io::stdin());
    server.serve(reader, tokio::io::stdout()).await
}

/// Print all schemas.
fn cmd_schema() -> Result<()> {
    let server = ProviderServer::new(WorkosProvider::new(VERSION));
    let schemas = serde_json::to_string_pretty(&server.schemas())
        .map_err(|e| ProviderError::internal(format!("Failed to render schemas: {e}")))?;
    write_stdout(&schemas)
}

/// Validate the provider configuration.
fn cmd_validate(config_path: Option<&PathBuf>, formatter: &OutputFormatter) -> Result<()> {
    let (model, source) = load_provider_model(config_path)?;
    let resolved = resolve(&model, formatter)?;

    let endpoint = resolved.host.as_deref().unwrap_or(WORKOS_API_URL);
    info!("Configuration is valid");
    write_stdout(&formatter.format_validation(endpoint, source.as_deref()))
}

/// List organizations.
async fn cmd_organizations(config_path: Option<&PathBuf>, formatter: &OutputFormatter) -> Result<()> {
    let client = configured_client(config_path, formatter)?;
    let data_source = OrganizationsDataSource::with_client(client);

    let response = data_source.read(ReadDataSourceRequest::default()).await;
    check(&response.diagnostics, formatter)?;

    let state: OrganizationsDataSourceModel = response.state.get("data source state")?;
    write_stdout(&formatter.format_organizations(&state.organizations))
}

/// Show a single organization.
async fn cmd_show(config_path: Option<&PathBuf>, id: String, formatter: &OutputFormatter) -> Result<()> {
    let client = configured_client(config_path, formatter)?;
    let resource = OrganizationResource::with_client(client);

    let state = OrganizationModel {
        id: id.into(),
        ..OrganizationModel::default()
    };
    let response = resource
        .read(ReadRequest {
            state: Payload::from_model("state", &state)?,
        })
        .await;
    check(&response.diagnostics, formatter)?;

    let organization: OrganizationModel = response.state.get("state")?;
    write_stdout(&formatter.format_organization(&organization))
}

// ============================================================================
// Helper functions
// ============================================================================

/// Loads the provider block from the configuration file, if any.
///
/// Without a file the provider is configured from the environment alone.
fn load_provider_model(config_path: Option<&PathBuf>) -> Result<(ProviderModel, Option<PathBuf>)> {
    let config_file = match config_path {
        Some(path) => Some(path.clone()),
        None => find_config_file("."),
    };

    let base = config_file
        .as_deref()
        .and_then(Path::parent)
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    let parser = ConfigParser::new().with_base_path(base);
    parser.load_dotenv()?;

    let Some(config_file) = config_file else {
        debug!("No configuration file, using environment only");
        return Ok((ProviderModel::default(), None));
    };

    let file = parser.load_file(&config_file)?;
    Ok((ProviderModel::from(file), Some(config_file)))
}

/// Resolves the provider block, printing diagnostics on failure.
fn resolve(model: &ProviderModel, formatter: &OutputFormatter) -> Result<ResolvedConfig> {
    ConfigResolver::new().resolve(model).map_err(|diagnostics| {
        eprint!("{}", formatter.format_diagnostics(&diagnostics));
        ProviderError::internal("invalid provider configuration")
    })
}

/// Builds the shared client from the provider configuration.
fn configured_client(
    config_path: Option<&PathBuf>,
    formatter: &OutputFormatter,
) -> Result<Arc<WorkosClient>> {
    let (model, _) = load_provider_model(config_path)?;
    let resolved = resolve(&model, formatter)?;
    Ok(Arc::new(WorkosClient::from_config(&resolved)?))
}

/// Prints diagnostics and fails if any of them is an error.
fn check(diagnostics: &Diagnostics, formatter: &OutputFormatter) -> Result<()> {
    if diagnostics.is_empty() {
        return Ok(());
    }
    eprint!("{}", formatter.format_diagnostics(diagnostics));
    if diagnostics.has_error() {
        return Err(ProviderError::internal("the operation reported errors"));
    }
    Ok(())
}

fn write_stdout(output: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
