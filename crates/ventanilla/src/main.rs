//! `ventanilla` - CLI for the municipal service-window intake
//!
//! This binary runs the intake HTTP API and provides terminal commands for
//! submitting records and reviewing the filtered listing.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::sync::Arc;

use clap::Parser;

use ventanilla::cli::{Cli, Command, ConfigCommand, ListCommand, ServeCommand, SubmitCommand};
use ventanilla::{
    init_logging, query, refresh, server, ApiClient, Config, IntakeService, PrefsStore, Record,
    RecordKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Serve(cmd) => handle_serve(&config, &cmd).await,
        Command::Submit(cmd) => handle_submit(&config, &cmd).await,
        Command::List(cmd) => handle_list(&config, cmd).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn api_client(config: &Config, server_flag: Option<&str>) -> ApiClient {
    match server_flag {
        Some(url) => ApiClient::new(url),
        None => ApiClient::new(config.api_url()),
    }
}

async fn handle_serve(config: &Config, cmd: &ServeCommand) -> anyhow::Result<()> {
    let host = cmd
        .host
        .clone()
        .unwrap_or_else(|| config.server.host.clone());
    let port = cmd.port.unwrap_or(config.server.port);

    let service = Arc::new(IntakeService::open(config.data_dir())?);
    server::serve(service, &format!("{host}:{port}")).await?;
    Ok(())
}

async fn handle_submit(config: &Config, cmd: &SubmitCommand) -> anyhow::Result<()> {
    let kind = RecordKind::from(cmd.kind);
    let mut fields = cmd.to_fields();

    // Claims carry the employee taking them. The flag value is remembered
    // for the next submission; with no flag, the remembered value is used.
    if kind == RecordKind::Reclamo {
        let prefs = PrefsStore::open(config.prefs_path())?;
        match fields.get("empleado").cloned() {
            Some(name) => prefs.set("empleado", &name)?,
            None => match prefs.get("empleado")? {
                Some(name) => {
                    fields.insert("empleado".to_string(), name);
                }
                None => anyhow::bail!("a claim needs --empleado (no remembered value yet)"),
            },
        }
    }

    let client = api_client(config, cmd.server.as_deref());
    let record = client.create(kind, fields).await?;
    println!("Created {} #{}", record.tipo, record.id);
    Ok(())
}

async fn handle_list(config: &Config, cmd: ListCommand) -> anyhow::Result<()> {
    let client = api_client(config, cmd.server.as_deref());
    let criteria = cmd.criteria();

    if cmd.watch {
        let json = cmd.json;
        let (handle, task) = refresh::spawn(config.refresh_interval(), move || {
            let client = client.clone();
            let criteria = criteria.clone();
            async move {
                match client.list_merged().await {
                    Ok(records) => {
                        if let Err(err) = print_records(&criteria.apply(&records), json) {
                            eprintln!("render failed: {err}");
                        }
                    }
                    Err(err) => eprintln!("refresh failed: {err}"),
                }
            }
        });

        tokio::signal::ctrl_c().await?;
        handle.stop();
        let _ = task.await;
        Ok(())
    } else {
        let records = client.list_merged().await?;
        print_records(&criteria.apply(&records), cmd.json)
    }
}

fn print_records(records: &[Record], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No records match.");
        return Ok(());
    }

    println!(
        "{:<15} {:<10} {:<12} {:<14} {:<14} {:<24}",
        "ID", "TIPO", "FECHA", "EMPLEADO", "CUENTA", "EMAIL"
    );
    for record in records {
        let fecha = query::fecha_date(&record.fecha)
            .map_or_else(|| record.fecha.clone(), |date| date.to_string());
        println!(
            "{:<15} {:<10} {:<12} {:<14} {:<14} {:<24}",
            record.id,
            record.tipo.to_string(),
            fecha,
            record.field("empleado").unwrap_or("-"),
            record.field("numeroCuenta").unwrap_or("-"),
            record.field("email").unwrap_or("-"),
        );
    }
    println!();
    println!("{} record(s)", records.len());
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Bind address:       {}", config.bind_addr());
                println!();
                println!("[Storage]");
                println!("  Data directory:     {}", config.data_dir().display());
                println!(
                    "  Claims file:        {}",
                    config.collection_path(RecordKind::Reclamo).display()
                );
                println!(
                    "  Requests file:      {}",
                    config.collection_path(RecordKind::Solicitud).display()
                );
                println!();
                println!("[Listing]");
                println!("  API base URL:       {}", config.api_url());
                println!(
                    "  Refresh interval:   {}s",
                    config.listing.refresh_interval_secs
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
