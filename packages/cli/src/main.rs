#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the crime dashboard.
//!
//! Loads the record store once, computes the requested chart and prints it
//! as JSON on stdout.

mod args;
mod config;

use std::time::Instant;

use clap::Parser;
use crime_dashboard_analytics::queries;
use crime_dashboard_cli_utils::{IndicatifProgress, init_logger};
use crime_dashboard_store::RecordStore;

use crate::args::{Cli, Commands};
use crate::config::DashboardConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = init_logger();
    let cli = Cli::parse();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    if let Some(path) = cli.incidents {
        config.incidents_path = path;
    }
    if let Some(path) = cli.boundaries {
        config.boundaries_path = path;
    }

    // Reject bad criteria before spending time on the load.
    let criteria = cli
        .command
        .filter()
        .map(args::FilterArgs::criteria)
        .unwrap_or_default();
    criteria.validate()?;

    let load_options = config.load_options()?;
    let progress = IndicatifProgress::load_bar(&multi, "Loading incidents");
    let start = Instant::now();
    let store = RecordStore::load(
        &config.incidents_path,
        &config.boundaries_path,
        load_options,
        progress.as_ref(),
    )?;
    log::info!("Store ready in {:.1}s", start.elapsed().as_secs_f64());

    let output = match cli.command {
        Commands::Options => serde_json::to_value(store.filter_options())?,
        Commands::Map { join, .. } => serde_json::to_value(queries::choropleth(
            &store,
            &criteria,
            join.unwrap_or(config.geo_join),
        )?)?,
        Commands::Trend { .. } => serde_json::to_value(queries::trend(&store, &criteria)?)?,
        Commands::Heatmap { .. } => serde_json::to_value(queries::heatmap(&store, &criteria)?)?,
        Commands::Top { limit, .. } => serde_json::to_value(queries::top_categories(
            &store,
            &criteria,
            limit.unwrap_or(config.top_n),
        )?)?,
        Commands::All { join, limit, .. } => {
            let mut options = config.query_options();
            if let Some(join) = join {
                options.geo_join = join;
            }
            if let Some(limit) = limit {
                options.top_n = limit;
            }
            serde_json::to_value(queries::dashboard(&store, &criteria, options)?)?
        }
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");

    Ok(())
}
