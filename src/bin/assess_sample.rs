//! Assess a single water sample from the command line
//!
//! Usage: cargo run --bin assess_sample -- potable pH=7.0 Turbidity=3 Chlorine=1 "Total Dissolved Solids=250"
//!
//! Honors WATER_CATALOG_PATH / WATER_TIER_POLICY and RUST_LOG.

use anyhow::Context;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use water_quality_engine::{generate_report, AssessmentError, EngineConfig};

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "water_quality_engine=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let category = args
        .next()
        .context("usage: assess_sample <category> <name=value>...")?;

    let config = EngineConfig::from_env()?;
    let catalog = config.build_catalog()?;
    let mut session = config.new_session(catalog);

    let water_category = session.select_category(&category)?.clone();

    for arg in args {
        let (name, value) = arg
            .split_once('=')
            .with_context(|| format!("expected name=value, got '{}'", arg))?;
        let field = session.set_reading(name.trim(), value)?;
        if let Some(err) = &field.error {
            tracing::warn!("{}: {}", field.parameter_name, err);
        }
    }

    match session.submit() {
        Ok(result) => {
            println!("{}", generate_report(&water_category, &result));
            Ok(ExitCode::SUCCESS)
        }
        Err(AssessmentError::ValidationErrors(errors)) => {
            eprintln!("Cannot assess {}: fix the following fields", water_category.id.display_text());
            for err in &errors {
                eprintln!("  - {}", err);
            }
            Ok(ExitCode::from(2))
        }
        Err(other) => Err(other.into()),
    }
}
