// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{category_label, ChartView};
use crate::api::ApiClient;
use crate::commands::reports::breakdown_rows;
use crate::config::Config;
use crate::snapshot::Snapshot;
use crate::utils::{fmt_money, pretty_table, print_warnings};
use anyhow::Result;

pub fn handle(client: &ApiClient, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let recent = sub
        .get_one::<usize>("recent")
        .copied()
        .unwrap_or(config.display.recent);
    let snap = Snapshot::load(client);
    print_warnings(&snap.warnings);
    render(&snap, &config.display.currency, recent);
    Ok(())
}

pub fn render(snap: &Snapshot, ccy: &str, recent: usize) {
    let s = &snap.summary;
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                format!("+{}", fmt_money(&s.total_income, ccy)),
                format!("-{}", fmt_money(&s.total_expense, ccy)),
                fmt_money(&s.balance, ccy),
            ]],
        )
    );

    // Top expense categories, same data as 'report breakdown --view expense'
    let expense = snap.breakdown(ChartView::Expense);
    if !expense.is_empty {
        let mut rows = breakdown_rows(&expense, ccy);
        rows.truncate(5);
        println!("{}", expense.title);
        println!(
            "{}",
            pretty_table(&["Category", "Share", "Amount", "Color"], rows)
        );
    }

    let items = snap.recent(recent);
    if items.is_empty() {
        println!("No transactions recorded yet.");
        return;
    }
    let rows: Vec<Vec<String>> = items
        .into_iter()
        .map(|t| {
            vec![
                t.date()
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| t.transaction_date.clone()),
                t.r#type.label().to_string(),
                category_label(t).0.to_string(),
                if t.description.trim().is_empty() {
                    "-".to_string()
                } else {
                    t.description.clone()
                },
                format!("{} {}", t.r#type.sign(), fmt_money(&t.amount, ccy)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Type", "Category", "Description", "Amount"], rows)
    );
}
