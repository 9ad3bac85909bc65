// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::category_label;
use crate::api::ApiClient;
use crate::config::Config;
use crate::forms::{find_category, TransactionForm};
use crate::models::{Transaction, TxnType};
use crate::snapshot::Snapshot;
use crate::utils::{fmt_money, maybe_print_json, parse_month, pretty_table, print_warnings};
use anyhow::{anyhow, Context, Result};
use serde::Serialize;

pub fn handle(client: &ApiClient, config: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(client, config, sub)?,
        Some(("list", sub)) => list(client, config, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            client
                .delete_transaction(id)
                .with_context(|| format!("Failed to delete transaction '{}'", id))?;
            println!("Removed transaction '{}'", id);
            print_totals(&Snapshot::load(client), config);
        }
        _ => {}
    }
    Ok(())
}

fn add(client: &ApiClient, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TxnType = sub.get_one::<String>("type").unwrap().parse()?;
    let key = sub.get_one::<String>("category").unwrap();

    let listing = client.list_categories();
    if let Some(e) = &listing.failure {
        print_warnings(&[format!("categories unavailable: {}", e)]);
    }
    let categories = listing.into_items();

    let mut form = TransactionForm::new(chrono::Local::now().date_naive());
    form.select_type(kind);
    let choices: Vec<_> = form.choices(&categories).into_iter().cloned().collect();
    if choices.is_empty() {
        return Err(anyhow!(
            "No {} categories yet; create one with 'cashboard category add --type {}'",
            kind,
            kind
        ));
    }
    let category = find_category(&choices, key).ok_or_else(|| {
        let names: Vec<&str> = choices.iter().map(|c| c.name.as_str()).collect();
        anyhow!(
            "No {} category '{}' (available: {})",
            kind,
            key,
            names.join(", ")
        )
    })?;
    form.category_id = category.id.clone();
    form.amount = sub.get_one::<String>("amount").cloned().unwrap_or_default();
    if let Some(d) = sub.get_one::<String>("description") {
        form.description = d.clone();
    }
    if let Some(d) = sub.get_one::<String>("date") {
        form.date = d.clone();
    }
    let date = form.date.clone();
    let amount = form.amount.clone();

    form.submit(client, &categories)
        .context("Failed to save transaction")?;
    println!(
        "Recorded {} {} in '{}' on {}",
        kind.label().to_lowercase(),
        amount.trim(),
        category.name,
        date
    );
    print_totals(&Snapshot::load(client), config);
    Ok(())
}

fn print_totals(snap: &Snapshot, config: &Config) {
    print_warnings(&snap.warnings);
    let ccy = &config.display.currency;
    println!(
        "Income {} | Expense {} | Balance {}",
        fmt_money(&snap.summary.total_income, ccy),
        fmt_money(&snap.summary.total_expense, ccy),
        fmt_money(&snap.summary.balance, ccy)
    );
}

fn list(client: &ApiClient, config: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let snap = Snapshot::load(client);
    print_warnings(&snap.warnings);
    let data = query_rows(&snap, sub, &config.display.currency)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions recorded yet.");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.description.clone(),
                    r.amount.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Type", "Category", "Description", "Amount", "ID"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

impl TransactionRow {
    fn from_transaction(t: &Transaction, ccy: &str) -> Self {
        let (category, _) = category_label(t);
        let description = if t.description.trim().is_empty() {
            "-".to_string()
        } else {
            t.description.clone()
        };
        Self {
            id: t.id.clone(),
            date: t
                .date()
                .map(|d| d.to_string())
                .unwrap_or_else(|| t.transaction_date.clone()),
            kind: t.r#type.label().to_string(),
            category: category.to_string(),
            description,
            amount: format!("{} {}", t.r#type.sign(), fmt_money(&t.amount, ccy)),
        }
    }
}

pub fn query_rows(
    snap: &Snapshot,
    sub: &clap::ArgMatches,
    ccy: &str,
) -> Result<Vec<TransactionRow>> {
    let kind = match sub.get_one::<String>("type") {
        Some(s) => Some(s.parse::<TxnType>()?),
        None => None,
    };
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month(m)?),
        None => None,
    };
    let category = sub.get_one::<String>("category").map(|s| s.trim().to_string());
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let data = snap
        .recent(usize::MAX)
        .into_iter()
        .filter(|t| kind.is_none_or(|k| t.r#type == k))
        .filter(|t| match &month {
            Some(m) => t.transaction_date.trim().starts_with(m.as_str()),
            None => true,
        })
        .filter(|t| match &category {
            Some(key) => {
                t.category_id.as_deref() == Some(key.as_str())
                    || category_label(t).0.eq_ignore_ascii_case(key)
            }
            None => true,
        })
        .take(limit)
        .map(|t| TransactionRow::from_transaction(t, ccy))
        .collect();
    Ok(data)
}
