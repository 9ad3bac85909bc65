// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wire and domain types shared by the API client and the aggregation code.
//!
//! Everything the API sends is decoded leniently: ids may be strings or
//! numbers, amounts may be numbers, numeric strings or garbage (coerced to
//! zero), and unknown transaction types count as expenses.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Income,
    #[default]
    Expense,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Income => "income",
            TxnType::Expense => "expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TxnType::Income => "Income",
            TxnType::Expense => "Expense",
        }
    }

    /// `+` for income, `-` for expense.
    pub fn sign(&self) -> &'static str {
        match self {
            TxnType::Income => "+",
            TxnType::Expense => "-",
        }
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxnType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxnType::Income),
            "expense" => Ok(TxnType::Expense),
            other => Err(anyhow!("Invalid type '{}', expected income|expense", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_type")]
    pub r#type: TxnType,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_type")]
    pub r#type: TxnType,
    #[serde(default, deserialize_with = "optional_id")]
    pub category_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Category>,
    #[serde(
        default,
        deserialize_with = "coerce_amount",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub amount: Decimal,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub transaction_date: String,
}

impl Transaction {
    /// Calendar date of the transaction. Accepts plain dates and full ISO
    /// timestamps; anything else is `None`.
    pub fn date(&self) -> Option<NaiveDate> {
        let head = self.transaction_date.trim().get(..10)?;
        NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
    }
}

/// Aggregate totals. `balance` is always `total_income - total_expense`,
/// saturating at the `Decimal` bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(
        default,
        deserialize_with = "coerce_amount",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub total_income: Decimal,
    #[serde(
        default,
        deserialize_with = "coerce_amount",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub total_expense: Decimal,
    #[serde(
        default,
        deserialize_with = "coerce_amount",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub balance: Decimal,
}

impl Summary {
    pub fn new(total_income: Decimal, total_expense: Decimal) -> Self {
        Self {
            total_income,
            total_expense,
            balance: total_income.saturating_sub(total_expense),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub r#type: TxnType,
    pub category_id: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub description: String,
    pub transaction_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub r#type: TxnType,
    pub color: String,
}

/// Coerce an arbitrary JSON value into an amount. Numbers and numeric
/// strings convert; everything else is zero.
pub fn amount_from_value(v: &Value) -> Decimal {
    let text = match v {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Decimal::ZERO,
    };
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .unwrap_or(Decimal::ZERO)
}

fn coerce_amount<'de, D: Deserializer<'de>>(d: D) -> Result<Decimal, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(amount_from_value(&v))
}

fn id_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(optional_id(d)?.unwrap_or_default())
}

fn optional_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v = Value::deserialize(d)?;
    let id = match v {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return Ok(None),
    };
    Ok(if id.is_empty() { None } else { Some(id) })
}

fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_type<'de, D: Deserializer<'de>>(d: D) -> Result<TxnType, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(match v.as_str() {
        Some(s) if s.trim().eq_ignore_ascii_case("income") => TxnType::Income,
        _ => TxnType::Expense,
    })
}

fn lenient_category<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Category>, D::Error> {
    let v = Value::deserialize(d)?;
    if !v.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(v).ok())
}
