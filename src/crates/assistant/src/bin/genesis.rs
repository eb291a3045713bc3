//! genesis - conversational CLI for the Genesis IoT monitoring backend

use assistant::route::OperationRouter;
use assistant::{Dispatcher, LlmRouter, Operation, Settings};
use assistant::extract::Extractor;
use clap::{Parser, Subcommand};
use genesis_api::HttpBackend;
use std::sync::Arc;
use tooling::config::ConfigBuilder;
use tracing::info;

/// Ask questions about your warehouses, units and sensors in plain English.
#[derive(Parser, Debug)]
#[command(name = "genesis")]
#[command(version = tooling::version())]
#[command(about = "Conversational assistant for the Genesis IoT backend", long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Genesis backend base URL
    #[arg(long, env = "GENESIS_BACKEND_URL")]
    backend_url: Option<String>,

    /// Backend bearer token
    #[arg(long, env = "GENESIS_AUTH_TOKEN", hide_env_values = true)]
    auth_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Route a free-text question to the right operation automatically
    Ask { query: Vec<String> },
    /// Current status of one sensor ("temperature in Verna ground floor B")
    Status { query: Vec<String> },
    /// Historical readings of one sensor over a time range
    Report { query: Vec<String> },
    /// List every known sensor
    Sensors,
    /// Current status of one storage unit
    Unit { query: Vec<String> },
    /// List every warehouse location
    Locations,
    /// High-level summary of one warehouse
    Summary { query: Vec<String> },
    /// Full sensor report for one warehouse
    WarehouseSensors { query: Vec<String> },
    /// Per-unit out-of-range summary for one warehouse
    WarehouseUnits { query: Vec<String> },
    /// Full sensor report for one storage unit
    UnitSensors { query: Vec<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load()?;
    if let Some(url) = args.backend_url {
        settings.backend_url = url;
    }
    if let Some(token) = args.auth_token {
        settings.auth_token = token;
    }
    settings.validate()?;

    tooling::logging::init(if args.verbose || settings.verbose {
        "debug"
    } else {
        "info"
    });
    info!(backend = %settings.backend_url, provider = ?settings.llm.provider, "starting");

    let backend = Arc::new(HttpBackend::new(settings.backend_config()));
    let model = settings.completion_model().await?;
    let dispatcher = Dispatcher::new(backend, Extractor::new(model.clone()));
    let now = chrono::Local::now().naive_local();

    let (operation, query) = match args.command {
        Command::Ask { query } => {
            let query = query.join(" ");
            let operation = LlmRouter::new(model).route(&query).await;
            (operation, query)
        }
        Command::Status { query } => (Operation::SensorStatus, query.join(" ")),
        Command::Report { query } => (Operation::SensorReport, query.join(" ")),
        Command::Sensors => (Operation::SensorList, String::new()),
        Command::Unit { query } => (Operation::UnitStatus, query.join(" ")),
        Command::Locations => (Operation::LocationList, String::new()),
        Command::Summary { query } => (Operation::LocationSummary, query.join(" ")),
        Command::WarehouseSensors { query } => (Operation::WarehouseSensors, query.join(" ")),
        Command::WarehouseUnits { query } => (Operation::WarehouseUnits, query.join(" ")),
        Command::UnitSensors { query } => (Operation::UnitSensors, query.join(" ")),
    };

    let answer = tooling::logging::timed("dispatch", dispatcher.run(operation, &query, now)).await;
    println!("{}", answer);
    Ok(())
}
