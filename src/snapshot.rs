// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Reverse;

use crate::aggregate::{attach_categories, breakdown, summarize, Breakdown, ChartView};
use crate::api::ApiClient;
use crate::models::{Category, Summary, Transaction};

/// One fresh, independent view of the remote data. Nothing is cached
/// between commands; every mutation is followed by a new `load`.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
    pub warnings: Vec<String>,
}

impl Snapshot {
    pub fn load(client: &ApiClient) -> Self {
        let mut warnings = Vec::new();
        let categories = client.list_categories();
        warnings.extend(categories.warning("categories"));
        let transactions = client.list_transactions();
        warnings.extend(transactions.warning("transactions"));
        let mut snap = Self::from_parts(categories.into_items(), transactions.into_items());
        snap.warnings = warnings;
        snap
    }

    pub fn from_parts(categories: Vec<Category>, mut transactions: Vec<Transaction>) -> Self {
        attach_categories(&mut transactions, &categories);
        let summary = summarize(&transactions);
        Self {
            categories,
            transactions,
            summary,
            warnings: Vec::new(),
        }
    }

    pub fn breakdown(&self, view: ChartView) -> Breakdown {
        breakdown(&self.transactions, view)
    }

    /// Newest first. Transactions without a readable date sort last; ties
    /// keep API order.
    pub fn recent(&self, limit: usize) -> Vec<&Transaction> {
        let mut items: Vec<&Transaction> = self.transactions.iter().collect();
        items.sort_by_key(|t| Reverse(t.date()));
        items.truncate(limit);
        items
    }

    /// Transactions still pointing at `category_id`.
    pub fn referencing(&self, category_id: &str) -> usize {
        self.transactions
            .iter()
            .filter(|t| t.category_id.as_deref() == Some(category_id))
            .count()
    }
}
