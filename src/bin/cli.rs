use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::prelude::*;
use tracing_appender::rolling::RollingFileAppender;
use tracing_log::LogTracer;
use tracing::subscriber as tracing_subscriber_global;
use tracing::info;
use anyhow::{Result, Context};
use pkce_code_generator as lib;
use lib::challenge::derive_challenge;
use lib::config::Config;
use lib::models::{ChallengeMethod, PkcePair};
use lib::verifier::generate_verifier;

#[derive(Parser)]
#[command(name = "pkce-code-generator", version)]
struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a code verifier and derive its code challenge
    Generate {
        /// Verifier length in characters (43-128); defaults to the configured length
        #[arg(long)]
        length: Option<usize>,

        /// Challenge method, "plain" or "S256"; defaults to the configured method
        #[arg(long)]
        method: Option<String>,

        /// Print the result as a JSON object instead of labelled lines
        #[arg(long)]
        json: bool,
    },
    /// Derive the code challenge for an existing verifier
    Challenge {
        /// Code verifier to derive the challenge from
        #[arg(long)]
        verifier: String,

        /// Challenge method, "plain" or "S256"; defaults to the configured method
        #[arg(long)]
        method: Option<String>,
    },
    /// Validate config file and exit
    ConfigValidate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // Resolve config path: explicit --config overrides; otherwise prefer
    // system-wide /etc/pkce-gen/config.toml and fall back to the
    // repository example config for local/dev usage.
    let resolved_config_path: PathBuf = match &cli.config {
        Some(p) => p.clone(),
        None => {
            let etc_path = Path::new("/etc/pkce-gen/config.toml");
            if etc_path.exists() {
                etc_path.to_path_buf()
            } else {
                PathBuf::from("config/example-config.toml")
            }
        }
    };

    // Generation must work without a config file; built-in defaults are
    // length 128 and method S256.
    let cfg = if resolved_config_path.exists() {
        Config::from_path(&resolved_config_path)
            .with_context(|| format!("loading config from {}", resolved_config_path.display()))?
    } else {
        Config::default()
    };

    // Initialize log->tracing bridge and structured logging.
    // Logs go to both stdout and a daily-rotated file in cfg.log_dir.
    let _ = LogTracer::init();
    let file_appender: RollingFileAppender = tracing_appender::rolling::daily(&cfg.log_dir, "pkce-gen.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Honor RUST_LOG if set, otherwise default to info.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer().with_writer(non_blocking);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer);

    // Install as global default tracing subscriber without triggering
    // tracing-subscriber's internal log bridge (we already call LogTracer).
    tracing_subscriber_global::set_global_default(subscriber)
        .expect("failed to set global tracing subscriber");

    match cli.command {
        Commands::Generate { length, method, json } => {
            let length = length.unwrap_or(cfg.verifier_length);
            let method: ChallengeMethod = method
                .as_deref()
                .unwrap_or(&cfg.challenge_method)
                .parse()?;

            // Out-of-range lengths surface the generator's error; the CLI
            // never clamps a request into range.
            let verifier = generate_verifier(length)
                .with_context(|| format!("generating a {}-character code verifier", length))?;
            let challenge = derive_challenge(&verifier, method)
                .with_context(|| format!("deriving {} code challenge", method))?;

            // Log sizes and method only; verifier and challenge are secrets.
            info!(
                "generated code verifier ({} chars) with {} code challenge ({} chars)",
                verifier.len(),
                method,
                challenge.len()
            );

            if json {
                let pair = PkcePair {
                    code_verifier: verifier,
                    code_challenge: challenge,
                    code_challenge_method: method,
                };
                println!("{}", serde_json::to_string_pretty(&pair)?);
            } else {
                println!("Code-Verifier ({} chars):", verifier.len());
                println!("{}", verifier);
                println!("Code-Challenge ({} chars):", challenge.len());
                println!("{}", challenge);
                println!("Code-Challenge-Method: {}", method);
            }
        }
        Commands::Challenge { verifier, method } => {
            let method: ChallengeMethod = method
                .as_deref()
                .unwrap_or(&cfg.challenge_method)
                .parse()?;
            let challenge = derive_challenge(&verifier, method)
                .with_context(|| format!("deriving {} code challenge", method))?;

            println!("Code-Challenge ({} chars):", challenge.len());
            println!("{}", challenge);
            println!("Code-Challenge-Method: {}", method);
        }
        Commands::ConfigValidate => {
            match Config::from_path(resolved_config_path.as_path()).and_then(|cfg| cfg.validate()) {
                Ok(()) => println!("OK"),
                Err(e) => {
                    eprintln!("Config validation failed: {}", e);
                    std::process::exit(2);
                }
            }
        }
    }

    Ok(())
}
