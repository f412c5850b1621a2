use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use sitasi_itk::cli::commands::{
    CheckCommand, OptionsCommand, ReasonCommand, ResolveCommand, SimulateCommand, TableCommand,
};
use sitasi_itk::cli::{Cli, Commands};
use sitasi_itk::{config, generate_correlation_id, init_telemetry, SitasiConfig};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Read .env before the global config so SITASI_ variables in it apply
    let env_file = SitasiConfig::load_env_file();
    let loaded = config();

    let mut observability = loaded
        .as_ref()
        .map(|settings| settings.observability.clone())
        .unwrap_or_default();
    if cli.plain_logs {
        observability.json_logs = false;
    }
    init_telemetry(&observability)?;

    match env_file {
        Ok(true) => tracing::info!("Loaded environment variables from .env file"),
        Ok(false) => {}
        Err(e) => tracing::warn!(error = %e, "Failed to read .env file"),
    }

    let settings = match loaded {
        Ok(settings) => settings.clone(),
        Err(e) => {
            tracing::warn!(error = %e, "Using default configuration");
            SitasiConfig::default()
        }
    };

    let correlation_id = generate_correlation_id();
    let span = tracing::info_span!("sitasi_cli", correlation.id = %correlation_id);
    let _guard = span.enter();

    match cli.command {
        Commands::Check {
            current,
            requested,
            role,
        } => {
            let allowed = CheckCommand::new(current, requested, role).execute()?;
            return Ok(if allowed { ExitCode::SUCCESS } else { ExitCode::FAILURE });
        }
        Commands::Options { current, role } => OptionsCommand::new(current, role).execute()?,
        Commands::Reason { current, requested } => ReasonCommand::new(current, requested).execute()?,
        Commands::Table { json } => TableCommand::new(json).execute()?,
        Commands::Resolve { roles } => {
            ResolveCommand::new(roles)
                .with_precedence(settings.workflow.to_options().precedence)
                .execute()?;
        }
        Commands::Simulate { with_revision } => {
            SimulateCommand::new(with_revision)
                .with_options(settings.workflow.to_options(), settings.workflow.history_limit)
                .execute()?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
