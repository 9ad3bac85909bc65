// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Totals and category breakdowns over an already-fetched transaction list.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use log::warn;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

use crate::models::{Category, Summary, Transaction, TxnType};

/// Label for transactions whose category was deleted or never resolved.
pub const FALLBACK_LABEL: &str = "Other (deleted category)";
pub const FALLBACK_COLOR: &str = "#9CA3AF";
pub const INCOME_COLOR: &str = "#10B981";
pub const EXPENSE_COLOR: &str = "#F43F5E";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartView {
    Income,
    Expense,
    Balance,
}

impl ChartView {
    /// Transaction type the view filters on; `None` for the balance view.
    pub fn txn_type(&self) -> Option<TxnType> {
        match self {
            ChartView::Income => Some(TxnType::Income),
            ChartView::Expense => Some(TxnType::Expense),
            ChartView::Balance => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartView::Income => "Income sources",
            ChartView::Expense => "Expense details",
            ChartView::Balance => "Cash flow comparison",
        }
    }
}

impl fmt::Display for ChartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartView::Income => "income",
            ChartView::Expense => "expense",
            ChartView::Balance => "balance",
        })
    }
}

impl FromStr for ChartView {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(ChartView::Income),
            "expense" => Ok(ChartView::Expense),
            "balance" => Ok(ChartView::Balance),
            other => Err(anyhow!(
                "Invalid view '{}', expected income|expense|balance",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownEntry {
    pub label: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub value: Decimal,
    pub color: String,
    /// Share of the view total, already rounded to one decimal place.
    #[serde(serialize_with = "one_decimal")]
    pub percentage: Decimal,
}

impl BreakdownEntry {
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    pub view: ChartView,
    pub title: &'static str,
    pub details: Vec<BreakdownEntry>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_sum: Decimal,
    pub is_empty: bool,
}

impl Breakdown {
    fn empty(view: ChartView) -> Self {
        Self {
            view,
            title: view.title(),
            details: Vec::new(),
            total_sum: Decimal::ZERO,
            is_empty: true,
        }
    }
}

fn one_decimal<S: Serializer>(d: &Decimal, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{:.1}", d))
}

/// Add `amount` to a running total, saturating at the `Decimal` bounds.
fn accumulate(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        warn!("amount {} overflows running total {}; saturating", amount, total);
        total.saturating_add(amount)
    })
}

/// Share of `value` in `total`, in percent to one decimal. Zero when the
/// ratio does not fit a `Decimal`.
fn percentage(value: Decimal, total: Decimal) -> Decimal {
    value
        .checked_div(total)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|p| p.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or_else(|| {
            warn!("percentage of {} in {} is out of range", value, total);
            Decimal::ZERO
        })
}

/// Income and expense totals in one pass. Anything that is not income counts
/// as expense.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    let (income, expense) =
        transactions
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| match t.r#type {
                TxnType::Income => (accumulate(inc, t.amount), exp),
                TxnType::Expense => (inc, accumulate(exp, t.amount)),
            });
    Summary::new(income, expense)
}

/// Display label and color for a transaction's category, falling back when
/// the category is missing or has no name/color.
pub fn category_label(t: &Transaction) -> (&str, &str) {
    match &t.category {
        Some(c) => {
            let name = if c.name.trim().is_empty() {
                FALLBACK_LABEL
            } else {
                c.name.as_str()
            };
            let color = if c.color.trim().is_empty() {
                FALLBACK_COLOR
            } else {
                c.color.as_str()
            };
            (name, color)
        }
        None => (FALLBACK_LABEL, FALLBACK_COLOR),
    }
}

/// Fill in the embedded `category` from `categories` wherever the API only
/// sent a `categoryId`. Ids that match nothing are left unresolved.
pub fn attach_categories(transactions: &mut [Transaction], categories: &[Category]) {
    let by_id: HashMap<&str, &Category> = categories.iter().map(|c| (c.id.as_str(), c)).collect();
    for t in transactions.iter_mut().filter(|t| t.category.is_none()) {
        if let Some(c) = t.category_id.as_deref().and_then(|id| by_id.get(id)) {
            t.category = Some((*c).clone());
        }
    }
}

struct Group {
    label: String,
    value: Decimal,
    color: String,
}

/// Sum amounts per category label in first-seen order. The color of a group
/// is whatever the last transaction in it carried.
fn group_by_category<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for t in transactions {
        let (label, color) = category_label(t);
        match index.get(label) {
            Some(&i) => {
                let g = &mut groups[i];
                g.value = accumulate(g.value, t.amount);
                g.color = color.to_string();
            }
            None => {
                index.insert(label.to_string(), groups.len());
                groups.push(Group {
                    label: label.to_string(),
                    value: t.amount,
                    color: color.to_string(),
                });
            }
        }
    }
    groups
}

/// Category-grouped subtotals for a chart view, sorted by value descending.
///
/// The balance view compares total income with total expense instead of
/// grouping. A view whose total is zero is empty: no details, no division.
pub fn breakdown(transactions: &[Transaction], view: ChartView) -> Breakdown {
    let groups = match view.txn_type() {
        Some(kind) => group_by_category(transactions.iter().filter(|t| t.r#type == kind)),
        None => {
            let s = summarize(transactions);
            vec![
                Group {
                    label: TxnType::Income.label().to_string(),
                    value: s.total_income,
                    color: INCOME_COLOR.to_string(),
                },
                Group {
                    label: TxnType::Expense.label().to_string(),
                    value: s.total_expense,
                    color: EXPENSE_COLOR.to_string(),
                },
            ]
        }
    };

    let total_sum = groups
        .iter()
        .fold(Decimal::ZERO, |acc, g| accumulate(acc, g.value));
    if groups.is_empty() || total_sum.is_zero() {
        return Breakdown::empty(view);
    }

    let mut details: Vec<BreakdownEntry> = groups
        .into_iter()
        .map(|g| BreakdownEntry {
            percentage: percentage(g.value, total_sum),
            label: g.label,
            value: g.value,
            color: g.color,
        })
        .collect();
    // sort_by is stable: equal values keep grouping order
    details.sort_by(|a, b| b.value.cmp(&a.value));

    Breakdown {
        view,
        title: view.title(),
        details,
        total_sum,
        is_empty: false,
    }
}
