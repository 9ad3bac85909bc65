// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::FALLBACK_LABEL;
use crate::api::ApiClient;
use crate::forms::CategoryForm;
use crate::models::Category;
use crate::snapshot::Snapshot;
use crate::utils::{maybe_print_json, pretty_table, print_warnings};
use anyhow::{Context, Result};

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(client, sub)?,
        Some(("add", sub)) => add(client, sub)?,
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            client
                .delete_category(id)
                .with_context(|| format!("Failed to delete category '{}'", id))?;
            println!("Removed category '{}'", id);
            let snap = Snapshot::load(client);
            print_warnings(&snap.warnings);
            let orphaned = snap.referencing(id);
            if orphaned > 0 {
                println!(
                    "{} transaction(s) now show under '{}'",
                    orphaned, FALLBACK_LABEL
                );
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn category_rows(categories: &[Category]) -> Vec<Vec<String>> {
    categories
        .iter()
        .map(|c| {
            vec![
                c.id.clone(),
                c.name.clone(),
                c.r#type.label().to_string(),
                c.color.clone(),
            ]
        })
        .collect()
}

fn list(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let listing = client.list_categories();
    print_warnings(listing.warning("categories").as_slice());
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, &listing.items)? {
        return Ok(());
    }
    if listing.items.is_empty() {
        println!("No categories yet. Create one with 'cashboard category add'.");
    } else {
        println!(
            "{}",
            pretty_table(&["ID", "Name", "Type", "Color"], category_rows(&listing.items))
        );
    }
    Ok(())
}

fn add(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let mut form = CategoryForm::default();
    form.name = sub.get_one::<String>("name").cloned().unwrap_or_default();
    form.kind = sub.get_one::<String>("type").unwrap().parse()?;
    if let Some(color) = sub.get_one::<String>("color") {
        form.color = color.clone();
    }
    let name = form.name.trim().to_string();
    let kind = form.kind;
    form.submit(client)
        .with_context(|| format!("Failed to create category '{}'", name))?;
    println!("Added category '{}' ({})", name, kind);

    let listing = client.list_categories();
    print_warnings(listing.warning("categories").as_slice());
    println!(
        "{}",
        pretty_table(&["ID", "Name", "Type", "Color"], category_rows(&listing.items))
    );
    Ok(())
}
