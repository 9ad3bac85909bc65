// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{Breakdown, ChartView};
use crate::api::ApiClient;
use crate::config::Config;
use crate::models::Summary;
use crate::snapshot::Snapshot;
use crate::utils::{fmt_money, maybe_print_json, pretty_table, print_warnings};
use anyhow::Result;
use serde::Serialize;

pub fn handle(client: &ApiClient, config: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(client, config, sub)?,
        Some(("breakdown", sub)) => breakdown(client, config, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct SummaryReport {
    local: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    remote: Option<Summary>,
}

fn summary(client: &ApiClient, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let snap = Snapshot::load(client);
    print_warnings(&snap.warnings);
    let remote = if sub.get_flag("remote") {
        client.dashboard_summary()
    } else {
        None
    };
    let report = SummaryReport {
        local: snap.summary,
        remote,
    };
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    let ccy = &config.display.currency;
    let mut rows = vec![summary_row("Local", &snap.summary, ccy)];
    if sub.get_flag("remote") {
        match &remote {
            Some(r) => rows.push(summary_row("Server", r, ccy)),
            None => rows.push(vec![
                "Server".into(),
                "unavailable".into(),
                String::new(),
                String::new(),
            ]),
        }
    }
    println!(
        "{}",
        pretty_table(&["Source", "Income", "Expense", "Balance"], rows)
    );
    if let Some(r) = &remote {
        if r != &snap.summary {
            println!("Server totals differ from the transaction list; the local figures are authoritative.");
        }
    }
    Ok(())
}

fn summary_row(source: &str, s: &Summary, ccy: &str) -> Vec<String> {
    vec![
        source.to_string(),
        format!("+{}", fmt_money(&s.total_income, ccy)),
        format!("-{}", fmt_money(&s.total_expense, ccy)),
        fmt_money(&s.balance, ccy),
    ]
}

fn breakdown(client: &ApiClient, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let view: ChartView = sub.get_one::<String>("view").unwrap().parse()?;
    let snap = Snapshot::load(client);
    print_warnings(&snap.warnings);
    let report = snap.breakdown(view);
    if !maybe_print_json(json_flag, jsonl_flag, &report)? {
        print_breakdown(&report, &config.display.currency);
    }
    Ok(())
}

pub fn breakdown_rows(report: &Breakdown, ccy: &str) -> Vec<Vec<String>> {
    report
        .details
        .iter()
        .map(|e| {
            vec![
                e.label.clone(),
                e.percentage_label(),
                fmt_money(&e.value, ccy),
                e.color.clone(),
            ]
        })
        .collect()
}

pub fn print_breakdown(report: &Breakdown, ccy: &str) {
    println!("{}", report.title);
    if report.is_empty {
        println!("No transactions to chart yet.");
        return;
    }
    let mut rows = breakdown_rows(report, ccy);
    rows.push(vec![
        "Total".into(),
        "100%".into(),
        fmt_money(&report.total_sum, ccy),
        String::new(),
    ]);
    println!(
        "{}",
        pretty_table(&["Category", "Share", "Amount", "Color"], rows)
    );
}
