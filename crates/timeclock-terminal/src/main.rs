//! Timeclock - check-in terminal for zero-knowledge attendance proofs
//!
//! Produces the signed argument line consumed by the attendance circuit.
//! Logs go to stderr; stdout carries only command output.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timeclock_core::{ArgumentLayout, Nonce, Timestamp};
use timeclock_terminal::{commands, generate_key_file, KeySource, OutputSink, TerminalConfig};

#[derive(Parser)]
#[command(name = "timeclock")]
#[command(about = "Signed check-ins for zero-knowledge attendance proofs", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: $TIMECLOCK_CONFIG or the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Read the signing key from this file
    #[arg(long, global = true)]
    key_file: Option<PathBuf>,

    /// Read the signing key from this environment variable
    #[arg(long, global = true)]
    key_env: Option<String>,

    /// Sign with the well-known debug key (debug-key builds only)
    #[arg(long, global = true)]
    debug_key: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a check-in and emit the 520-token argument line
    CheckIn {
        /// Employee identifier
        #[arg(short, long)]
        id: String,

        /// Identifier is hexadecimal
        #[arg(long)]
        hex: bool,

        /// Nonce digits (random when omitted)
        #[arg(short, long)]
        nonce: Option<String>,

        /// Unix timestamp in seconds (default: now)
        #[arg(short, long)]
        timestamp: Option<u64>,

        /// Output file (default: configured path, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Sign a pseudo-identity digest and emit the 518-token terminal line
    SignIdentity {
        /// 32-byte digest (hex)
        #[arg(short, long)]
        digest: String,

        /// Unix timestamp in seconds (default: now)
        #[arg(short, long)]
        timestamp: Option<u64>,

        /// Output file (default: configured path, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Derive a pseudo-identity on the employee side and print it as JSON
    Identity {
        /// Employee identifier
        #[arg(short, long)]
        id: String,

        /// Identifier is hexadecimal
        #[arg(long)]
        hex: bool,

        /// Nonce digits (random when omitted)
        #[arg(short, long)]
        nonce: Option<String>,
    },

    /// Print the terminal public key coordinates
    Pubkey,

    /// Generate a new terminal signing key
    Keygen {
        /// Key file to create
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Check the signature carried by an argument line
    Verify {
        /// File holding the argument line
        #[arg(short, long)]
        line_file: PathBuf,

        /// Line uses the 518-token terminal layout
        #[arg(long)]
        terminal: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timeclock=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => TerminalConfig::default_path()?,
    };
    let config = TerminalConfig::load_or_default(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    match &cli.command {
        Commands::CheckIn {
            id,
            hex,
            nonce,
            timestamp,
            output,
        } => {
            let signer = key_source(&cli, &config)?.signer()?;
            let identifier = commands::parse_identifier(id, *hex)?;
            let nonce = nonce.as_deref().map(Nonce::new).transpose()?;
            let sink = sink(output, &config);

            commands::check_in(
                &signer,
                &config,
                &identifier,
                nonce,
                resolve_timestamp(*timestamp)?,
                &sink,
            )
            .context("check-in failed")?;
        }

        Commands::SignIdentity {
            digest,
            timestamp,
            output,
        } => {
            let signer = key_source(&cli, &config)?.signer()?;
            let sink = sink(output, &config);

            commands::sign_identity(&signer, digest, resolve_timestamp(*timestamp)?, &sink)
                .context("signing identity failed")?;
        }

        Commands::Identity { id, hex, nonce } => {
            let identifier = commands::parse_identifier(id, *hex)?;
            let nonce = nonce.as_deref().map(Nonce::new).transpose()?;

            let record = commands::identity(&config, &identifier, nonce)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Commands::Pubkey => {
            let signer = key_source(&cli, &config)?.signer()?;
            let info = commands::public_key(&signer);
            println!("{} {}", info.x, info.y);
        }

        Commands::Keygen { output } => {
            let key = generate_key_file(output)
                .with_context(|| format!("writing key file {}", output.display()))?;
            let public_key = key.public_key();
            let point = public_key.point();
            println!("{} {}", point.x(), point.y());
        }

        Commands::Verify {
            line_file,
            terminal,
        } => {
            let line = std::fs::read_to_string(line_file)
                .with_context(|| format!("reading {}", line_file.display()))?;
            let layout = if *terminal {
                ArgumentLayout::Terminal
            } else {
                ArgumentLayout::Attendance
            };

            let report = commands::verify_line(&line, layout)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.valid {
                anyhow::bail!("signature does not verify");
            }
            info!("signature valid");
        }
    }

    Ok(())
}

fn key_source(cli: &Cli, config: &TerminalConfig) -> Result<KeySource> {
    let source = KeySource::resolve(
        cli.key_file.clone(),
        cli.key_env.clone(),
        cli.debug_key,
        config,
    )?;
    Ok(source)
}

/// `--output` wins over the configured path
fn sink(output: &Option<PathBuf>, config: &TerminalConfig) -> OutputSink {
    OutputSink::from_path(output.clone().or_else(|| config.output_path.clone()))
}

/// Wall-clock time only when no timestamp was given
fn resolve_timestamp(timestamp: Option<u64>) -> Result<Timestamp> {
    match timestamp {
        Some(secs) => Ok(Timestamp::new(secs)),
        None => {
            let now = chrono::Utc::now().timestamp();
            let secs = u64::try_from(now).context("system clock is before the Unix epoch")?;
            Ok(Timestamp::new(secs))
        }
    }
}
