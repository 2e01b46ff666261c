use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use clap::{Parser, Subcommand};
use taco_rpc::config::{load_config, validate_config, TacoConfig};
use taco_rpc::discovery::resolve_remote_host;
use taco_rpc::lifecycle::Shutdown;
use taco_rpc::observability::logging;
use taco_rpc::rpc::{Client, Context};
use taco_rpc::taco::{EatTacoRequest, TacoServiceClient};

#[derive(Parser)]
#[command(name = "taco-client")]
#[command(about = "Client for the TacoService RPC endpoint", long_about = None)]
struct Cli {
    /// Base address, e.g. http://localhost:8080/oto/ (overrides discovery)
    #[arg(short, long, global = true)]
    url: Option<String>,

    /// TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print outgoing requests
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Eat some tacos and print the consumption status
    Eat {
        #[arg(short, long)]
        name: String,
        /// Repeat for each taco
        #[arg(short, long = "taco")]
        tacos: Vec<String>,
    },
    /// Serve GET / which eats two tacos for Sammy Sosa
    Serve {
        /// Bind address (defaults to client.listen_address, or $PORT)
        #[arg(short, long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => TacoConfig::default(),
    };
    if let Some(url) = cli.url {
        config.client.remote_host = Some(url);
    }
    if let Ok(port) = std::env::var("PORT") {
        if !port.is_empty() {
            config.client.listen_address = format!("0.0.0.0:{port}");
        }
    }
    config.client.debug |= cli.debug;
    validate_config(&config).map_err(|errors| {
        errors.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    })?;
    logging::init_tracing(&config.observability)?;

    let remote_host = resolve_remote_host(&config.client, &config.server.base_path, |k| std::env::var(k).ok());
    let mut client = Client::from_config(remote_host, &config.client)?;
    if config.client.debug {
        client = client.with_debug(|line| println!("{line}"));
    }
    let tacos = TacoServiceClient::new(client);

    match cli.command {
        Commands::Eat { name, tacos: eaten } => {
            let resp = tacos
                .eat_taco(&Context::background(), &EatTacoRequest { name, tacos: eaten })
                .await?;
            println!("{}", resp.taco_consumption_status);
        }
        Commands::Serve { listen } => {
            let addr = listen.unwrap_or(config.client.listen_address);
            let app = Router::new().route("/", get(eat_handler)).with_state(Arc::new(tacos));
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!(address = %listener.local_addr()?, "taco-client serving");

            let shutdown = Shutdown::new();
            shutdown.trigger_on_signal();
            let mut rx = shutdown.subscribe();
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.recv().await;
                })
                .await?;
        }
    }

    Ok(())
}

async fn eat_handler(State(tacos): State<Arc<TacoServiceClient>>) -> impl IntoResponse {
    let request = EatTacoRequest {
        name: "Sammy Sosa".into(),
        tacos: vec!["Chicken".into(), "Chorizo".into()],
    };
    match tacos.eat_taco(&Context::background(), &request).await {
        Ok(resp) => (StatusCode::OK, resp.taco_consumption_status).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
