//! Runesweeper Dungeon Master - command line entry point.
//!
//! Usage: `runesweeper-dm [INPUT.json|-] [REQUEST_TYPE]`
//!
//! Reads a context input document (from a file, or stdin when the path is
//! missing or `-`), builds the bounded snapshot, runs the provider chain and
//! prints the generation result as JSON.

use std::io::Read;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use runesweeper_domain::RequestType;
use runesweeper_engine::use_cases::dungeon_master::{
    build_context, ContextInput, GenerationOptions,
};
use runesweeper_engine::{App, DungeonMasterConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runesweeper_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = DungeonMasterConfig::from_env();

    let mut args = std::env::args().skip(1);
    let path = args.next();
    let request_override = args
        .next()
        .map(|raw| raw.parse::<RequestType>())
        .transpose()
        .context("invalid request type")?;

    let raw_input = read_input(path.as_deref())?;
    let mut input: ContextInput = if raw_input.trim().is_empty() {
        ContextInput::new(RequestType::FloorStart)
    } else {
        serde_json::from_str(&raw_input).context("failed to parse context input")?
    };
    if let Some(request_type) = request_override {
        input.request_type = request_type;
    }

    let built = build_context(&input, config.token_budget);
    tracing::info!(
        request_type = %input.request_type,
        estimated_tokens = built.estimated_tokens,
        truncated = built.truncated,
        "Context snapshot built"
    );

    let app = App::new(config);
    let result = app
        .dungeon_master
        .generate(&built.context, GenerationOptions::default())
        .await;
    if result.source.is_fallback() {
        tracing::info!(
            cooldown_active = result.cooldown_active,
            failed_providers = result.provider_errors.len(),
            "Served fallback dialogue"
        );
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn read_input(path: Option<&str>) -> anyhow::Result<String> {
    match path {
        Some(path) if path != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read context input from {}", path)),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read context input from stdin")?;
            Ok(buffer)
        }
    }
}
