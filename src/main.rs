// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::{Context, Result};

use cashboard::api::ApiClient;
use cashboard::config::Config;
use cashboard::{cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::load_or_default(matches.get_one::<PathBuf>("config").map(|p| p.as_path()))?
        .with_base_url(matches.get_one::<String>("base-url").map(String::as_str));
    config.validate()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();
    log::debug!("using API at {}", config.api.base_url);

    let client = ApiClient::from_config(&config.api).context("Failed to set up HTTP client")?;

    match matches.subcommand() {
        Some(("dashboard", sub)) => commands::dashboard::handle(&client, &config, sub)?,
        Some(("category", sub)) => commands::categories::handle(&client, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&client, &config, sub)?,
        Some(("report", sub)) => commands::reports::handle(&client, &config, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&client, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&client)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
