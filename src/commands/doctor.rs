// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use crate::api::ApiClient;
use crate::models::{Category, Summary};
use crate::snapshot::Snapshot;
use crate::utils::{pretty_table, print_warnings};
use anyhow::Result;

pub fn handle(client: &ApiClient) -> Result<()> {
    println!("doctor: checking {}", client.base_url());
    let snap = Snapshot::load(client);
    print_warnings(&snap.warnings);
    let remote = client.dashboard_summary();
    let rows = find_issues(&snap, remote.as_ref());

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn find_issues(snap: &Snapshot, remote: Option<&Summary>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let by_id: HashMap<&str, &Category> = snap
        .categories
        .iter()
        .map(|c| (c.id.as_str(), c))
        .collect();

    for t in &snap.transactions {
        // 1) Category deleted or never assigned
        match t.category_id.as_deref() {
            Some(id) if !by_id.contains_key(id) && t.category.is_none() => {
                rows.push(vec!["missing_category".into(), format!("{} -> {}", t.id, id)]);
            }
            None if t.category.is_none() => {
                rows.push(vec!["no_category".into(), t.id.clone()]);
            }
            _ => {}
        }

        // 2) Category type must match the transaction type
        if let Some(c) = &t.category {
            if c.r#type != t.r#type {
                rows.push(vec![
                    "type_mismatch".into(),
                    format!("{} is {} but '{}' is {}", t.id, t.r#type, c.name, c.r#type),
                ]);
            }
        }

        // 3) Dates the dashboard cannot sort
        if t.date().is_none() {
            rows.push(vec![
                "bad_date".into(),
                format!("{} '{}'", t.id, t.transaction_date),
            ]);
        }

        if t.amount.is_sign_negative() && !t.amount.is_zero() {
            rows.push(vec!["negative_amount".into(), format!("{} {}", t.id, t.amount)]);
        }
    }

    // 4) Server summary disagreeing with the list
    if let Some(r) = remote {
        if r != &snap.summary {
            rows.push(vec![
                "summary_mismatch".into(),
                format!(
                    "server {}/{}/{} vs local {}/{}/{}",
                    r.total_income,
                    r.total_expense,
                    r.balance,
                    snap.summary.total_income,
                    snap.summary.total_expense,
                    snap.summary.balance
                ),
            ]);
        }
    }
    rows
}
