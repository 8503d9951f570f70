//! Synse CLI binary entrypoint.
//!
//! This is the main entry point for the `synse` command-line tool.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use synse_cli::cli::{Cli, Commands};
use synse_cli::commands::{
    InfoCommand, PluginCommand, ReadCommand, ScanCommand, ServerCommand, StreamCommand,
    TagsCommand, TransactionCommand, WriteCommand,
};
use synse_cli::output::FormatFlags;
use synse_cli::{CliError, SynseClient};

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

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

async fn run(cli: Cli) -> Result<(), CliError> {
    if cli.json && cli.yaml {
        return Err(CliError::InvalidArgument(
            "--json and --yaml are mutually exclusive".into(),
        ));
    }
    let flags = FormatFlags {
        json: cli.json,
        yaml: cli.yaml,
        no_header: cli.no_header,
    };
    let client = SynseClient::new(&cli.host)?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Status => {
            let cmd = ServerCommand::new(client);
            cmd.status(&mut stdout, flags).await?;
        }
        Commands::Version => {
            let cmd = ServerCommand::new(client);
            cmd.version(&mut stdout, flags).await?;
        }
        Commands::Config => {
            let cmd = ServerCommand::new(client);
            cmd.config(&mut stdout, flags).await?;
        }
        Commands::Plugin { command } => {
            let cmd = PluginCommand::new(client);
            cmd.execute(&mut stdout, flags, &command).await?;
        }
        Commands::Scan(args) => {
            let cmd = ScanCommand::new(client);
            cmd.execute(&mut stdout, flags, &args).await?;
        }
        Commands::Tags(args) => {
            let cmd = TagsCommand::new(client);
            cmd.execute(&mut stdout, flags, &args).await?;
        }
        Commands::Info { device } => {
            let cmd = InfoCommand::new(client);
            cmd.execute(&mut stdout, flags, &device).await?;
        }
        Commands::Read(args) => {
            let cmd = ReadCommand::new(client);
            cmd.execute(&mut stdout, flags, &args).await?;
        }
        Commands::Write(args) => {
            let cmd = WriteCommand::new(client);
            cmd.execute(&mut stdout, flags, &args).await?;
        }
        Commands::Transaction { id } => {
            let cmd = TransactionCommand::new(client);
            cmd.execute(&mut stdout, flags, id.as_deref()).await?;
        }
        Commands::Stream(args) => {
            let cmd = StreamCommand::new(client);
            cmd.execute(&mut stdout, &args).await?;
        }
    }

    Ok(())
}
