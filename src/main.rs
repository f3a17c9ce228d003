//! Tezos block inspection CLI entry point.
//!
//! This binary resolves block references against a Tezos node and prints block summaries
//! or operation tables, either once or continuously for every new chain head.
//!
//! # Commands
//! - `block [REF..]`: Block summaries (`block header` is the same view)
//! - `block operations [REF..] [-k KINDS]`: One row per operation content element
//!
//! # Flow
//! 1. Loads environment variables from `.env` and sets up logging
//! 2. Builds the network configuration from `--config`, `--network` or `--url`/`--chain`
//! 3. Connects to the first answering RPC endpoint
//! 4. Runs the selected command; watch mode stops cleanly on Ctrl+C

use tezos_inspector::{
	bootstrap::{initialize_context, inspect_operations, run_block_command, Result},
	models::{
		ConfigError, ConfigLoader, Network, DEFAULT_CHAIN_ID, DEFAULT_NETWORKS_DIR,
		DEFAULT_RPC_URL,
	},
	services::render::OutputEncoding,
	utils::logging::setup_logging,
};

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use std::{collections::HashMap, path::PathBuf};
use tokio::sync::watch;
use tracing::{error, info, instrument};

#[derive(Debug, Parser)]
#[command(
	name = "tez",
	version,
	about = "An alternative CLI utility for Tezos",
	long_about = "Inspects blocks and operations of a running Tezos node"
)]
struct Cli {
	/// Tezos RPC end-point URL
	#[arg(long, env = "TEZOS_RPC_URL", default_value = DEFAULT_RPC_URL, global = true)]
	url: String,

	/// Chain ID
	#[arg(long, env = "TEZOS_CHAIN", default_value = DEFAULT_CHAIN_ID, global = true)]
	chain: String,

	/// Network definition file (JSON), overrides --url and --chain
	#[arg(long, value_name = "PATH", conflicts_with = "network", global = true)]
	config: Option<PathBuf>,

	/// Network slug looked up in config/networks, overrides --url and --chain
	#[arg(long, value_name = "NETWORK_SLUG", global = true)]
	network: Option<String>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, env = "LOG_LEVEL", value_name = "LEVEL", global = true)]
	log: Option<String>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
	/// Blocks inspection
	#[command(visible_alias = "bl")]
	Block(BlockArgs),
}

#[derive(Debug, Args)]
struct BlockArgs {
	/// Block references: a hash, a level or `head`, with optional offsets like `head~2`
	references: Vec<String>,

	/// Output encoding
	#[arg(short = 'o', long, value_enum, default_value_t = OutputEncoding::Text, global = true)]
	output_encoding: OutputEncoding,

	/// Follow the chain head and print every new block
	#[arg(short = 'w', long, global = true)]
	watch: bool,

	#[command(subcommand)]
	view: Option<BlockView>,
}

#[derive(Debug, Subcommand)]
enum BlockView {
	/// Block header summaries
	#[command(visible_alias = "hdr")]
	Header {
		references: Vec<String>,
	},
	/// Block operations
	#[command(visible_alias = "ops")]
	Operations {
		references: Vec<String>,

		/// Operation kinds: a comma separated list of names or aliases, or `all'
		#[arg(short = 'k', long = "kind", value_delimiter = ',')]
		kinds: Vec<String>,
	},
}

/// Resolves the network the command talks to
fn load_network(cli: &Cli) -> std::result::Result<Network, ConfigError> {
	if let Some(path) = &cli.config {
		return Network::load_from_path(path);
	}

	if let Some(slug) = &cli.network {
		let mut networks: HashMap<String, Network> =
			Network::load_all(Some(std::path::Path::new(DEFAULT_NETWORKS_DIR)))?;
		return networks
			.remove(slug)
			.ok_or_else(|| ConfigError::network_not_found(slug.clone()));
	}

	let network = Network::from_endpoint(cli.url.clone(), cli.chain.clone());
	network
		.validate()
		.map_err(ConfigError::validation_error)?;
	Ok(network)
}

#[instrument(skip_all, fields(network = %network.slug))]
async fn run(cli: Cli, network: Network, shutdown: watch::Receiver<bool>) -> Result<()> {
	let stdout = std::io::stdout();

	let Commands::Block(args) = cli.command;
	let references = match args.view {
		Some(BlockView::Operations { references, kinds }) => {
			return inspect_operations(
				network,
				&references,
				&kinds,
				args.output_encoding,
				args.watch,
				stdout,
				shutdown,
			)
			.await;
		}
		Some(BlockView::Header { references }) => references,
		None => args.references,
	};

	let ctx = initialize_context(network).await?;
	run_block_command(
		&ctx,
		&references,
		args.output_encoding,
		args.watch,
		stdout,
		shutdown,
	)
	.await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	// Load environment variables from .env file before clap reads its env fallbacks
	dotenv().ok();

	let cli = Cli::parse();

	setup_logging(cli.log.as_deref()).unwrap_or_else(|e| {
		eprintln!("Failed to setup logging: {}", e);
	});

	let network = load_network(&cli)
		.map_err(|e| anyhow::anyhow!("Failed to load network configuration: {}", e))?;

	let (shutdown_tx, shutdown_rx) = watch::channel(false);
	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			info!("Shutdown signal received, stopping...");
			let _ = shutdown_tx.send(true);
		}
	});

	run(cli, network, shutdown_rx).await.map_err(|e| {
		error!("Command failed: {}", e);
		anyhow::anyhow!("{}", e)
	})
}
