// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{category_label, ChartView};
use crate::api::ApiClient;
use crate::snapshot::Snapshot;
use crate::utils::print_warnings;
use anyhow::{bail, Result};
use serde_json::json;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    let snap = Snapshot::load(client);
    print_warnings(&snap.warnings);
    export(&snap, m)
}

pub fn export(snap: &Snapshot, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(snap, sub),
        Some(("breakdown", sub)) => export_breakdown(snap, sub),
        _ => Ok(()),
    }
}

fn output_format(sub: &clap::ArgMatches) -> Result<String> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    Ok(fmt)
}

fn export_transactions(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = output_format(sub)?;
    let out = sub.get_one::<String>("out").unwrap();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "date",
                "type",
                "category",
                "amount",
                "description",
            ])?;
            for t in &snap.transactions {
                wtr.write_record([
                    t.id.clone(),
                    t.transaction_date.clone(),
                    t.r#type.to_string(),
                    category_label(t).0.to_string(),
                    t.amount.to_string(),
                    t.description.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = snap
                .transactions
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.transaction_date,
                        "type": t.r#type,
                        "category": category_label(t).0,
                        "amount": t.amount.to_string(),
                        "description": t.description,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    println!("Exported {} transactions to {}", snap.transactions.len(), out);
    Ok(())
}

fn export_breakdown(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = output_format(sub)?;
    let out = sub.get_one::<String>("out").unwrap();
    let view: ChartView = sub.get_one::<String>("view").unwrap().parse()?;
    let report = snap.breakdown(view);

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["label", "value", "color", "percentage"])?;
            for e in &report.details {
                wtr.write_record([
                    e.label.clone(),
                    e.value.to_string(),
                    e.color.clone(),
                    format!("{:.1}", e.percentage),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            std::fs::write(out, serde_json::to_string_pretty(&report)?)?;
        }
    }
    println!("Exported {} breakdown to {}", view, out);
    Ok(())
}
