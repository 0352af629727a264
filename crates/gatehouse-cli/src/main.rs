// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Gatehouse command-line interface.
//!
//! Runs batches of user and visitor create-operations against a UniFi
//! Access controller. Credentials come from the environment; records come
//! from a JSON file; outcomes are printed to stdout as JSON, one per input
//! record.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gatehouse_unifi_access::{ControllerCredentials, UnifiClient};
use gatehouse_unifi_batch::{BatchExecutor, BatchItem};

#[derive(Parser)]
#[command(
	name = "gatehouse",
	version,
	about = "Batch user and visitor creation for UniFi Access controllers"
)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Run a batch of records against the controller
	Run {
		/// Path to a JSON file holding an array of records
		#[arg(long)]
		records: PathBuf,

		/// Record errors as outcomes and keep processing instead of
		/// aborting on the first failure
		#[arg(long)]
		continue_on_fail: bool,
	},
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
	init_tracing();

	let cli = Cli::parse();
	match cli.command {
		Command::Run {
			records,
			continue_on_fail,
		} => run(records, continue_on_fail).await,
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().compact().with_writer(std::io::stderr))
		.init();
}

async fn run(records_path: PathBuf, continue_on_fail: bool) -> Result<ExitCode> {
	let credentials = ControllerCredentials::from_env()
		.context("failed to load controller credentials from environment")?;

	let raw = fs::read_to_string(&records_path)
		.with_context(|| format!("failed to read records file {}", records_path.display()))?;
	let items: Vec<BatchItem> =
		serde_json::from_str(&raw).context("records file must be a JSON array of records")?;

	info!(
		records = items.len(),
		host = %credentials.host,
		continue_on_fail,
		"Running batch"
	);

	let client = UnifiClient::new(credentials)?;
	let executor = BatchExecutor::new(client).with_continue_on_fail(continue_on_fail);

	let outcomes = executor.run(&items).await?;
	println!("{}", serde_json::to_string_pretty(&outcomes)?);

	let failed = outcomes.iter().filter(|o| !o.is_success()).count();
	if failed > 0 {
		warn!(failed, "Batch completed with failures");
		return Ok(ExitCode::FAILURE);
	}

	Ok(ExitCode::SUCCESS)
}
