// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Form state for adding transactions and categories.
//!
//! Each form owns its field values and a busy flag. A submission is split
//! into `begin_submit` (validate, raise the flag) and `finish_submit` (lower
//! the flag, reset fields on success) so a caller can keep the control
//! disabled while the request is in flight. On failure the fields are left
//! as typed so the user can correct them.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

use crate::api::ApiClient;
use crate::error::{ApiResult, FormError};
use crate::models::{Category, NewCategory, NewTransaction, Transaction, TxnType};

pub const DEFAULT_CATEGORY_COLOR: &str = "#EF4444";

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("static color pattern"));

#[derive(Debug, Clone, Default)]
pub struct BusyFlag(bool);

impl BusyFlag {
    pub fn acquire(&mut self) -> Result<(), FormError> {
        if self.0 {
            return Err(FormError::Busy);
        }
        self.0 = true;
        Ok(())
    }

    pub fn release(&mut self) {
        self.0 = false;
    }

    pub fn is_set(&self) -> bool {
        self.0
    }
}

/// Look a category up by id, or by case-insensitive name.
pub fn find_category<'a>(categories: &'a [Category], key: &str) -> Option<&'a Category> {
    let key = key.trim();
    categories
        .iter()
        .find(|c| c.id == key)
        .or_else(|| categories.iter().find(|c| c.name.eq_ignore_ascii_case(key)))
}

#[derive(Debug, Clone)]
pub struct TransactionForm {
    kind: TxnType,
    pub category_id: String,
    pub amount: String,
    pub description: String,
    pub date: String,
    busy: BusyFlag,
}

impl TransactionForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            kind: TxnType::Expense,
            category_id: String::new(),
            amount: String::new(),
            description: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
            busy: BusyFlag::default(),
        }
    }

    pub fn kind(&self) -> TxnType {
        self.kind
    }

    /// Switching type always clears the category selection.
    pub fn select_type(&mut self, kind: TxnType) {
        self.kind = kind;
        self.category_id.clear();
    }

    /// Categories selectable for the current type.
    pub fn choices<'a>(&self, categories: &'a [Category]) -> Vec<&'a Category> {
        categories.iter().filter(|c| c.r#type == self.kind).collect()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_set()
    }

    pub fn can_submit(&self) -> bool {
        !self.is_busy() && !self.category_id.trim().is_empty()
    }

    pub fn validate(&self, categories: &[Category]) -> Result<NewTransaction, FormError> {
        let category_id = self.category_id.trim();
        if category_id.is_empty() {
            return Err(FormError::MissingCategory(self.kind));
        }
        let category = categories
            .iter()
            .find(|c| c.id == category_id)
            .ok_or_else(|| FormError::UnknownCategory(category_id.to_string()))?;
        if category.r#type != self.kind {
            return Err(FormError::CategoryTypeMismatch {
                category: category.name.clone(),
                kind: self.kind,
            });
        }

        let amount = self
            .amount
            .trim()
            .parse::<Decimal>()
            .map_err(|_| FormError::InvalidAmount(self.amount.clone()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(FormError::NegativeAmount);
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::InvalidDate(self.date.clone()))?;

        Ok(NewTransaction {
            r#type: self.kind,
            category_id: category.id.clone(),
            amount,
            description: self.description.trim().to_string(),
            transaction_date: date.format("%Y-%m-%d").to_string(),
        })
    }

    pub fn begin_submit(&mut self, categories: &[Category]) -> Result<NewTransaction, FormError> {
        if self.is_busy() {
            return Err(FormError::Busy);
        }
        let payload = self.validate(categories)?;
        self.busy.acquire()?;
        Ok(payload)
    }

    pub fn finish_submit<T>(&mut self, outcome: ApiResult<T>) -> Result<T, FormError> {
        self.busy.release();
        let value = outcome?;
        self.amount.clear();
        self.description.clear();
        Ok(value)
    }

    pub fn submit(
        &mut self,
        client: &ApiClient,
        categories: &[Category],
    ) -> Result<Option<Transaction>, FormError> {
        let payload = self.begin_submit(categories)?;
        let outcome = client.create_transaction(&payload);
        self.finish_submit(outcome)
    }
}

#[derive(Debug, Clone)]
pub struct CategoryForm {
    pub name: String,
    pub kind: TxnType,
    pub color: String,
    busy: BusyFlag,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: TxnType::Expense,
            color: DEFAULT_CATEGORY_COLOR.to_string(),
            busy: BusyFlag::default(),
        }
    }
}

impl CategoryForm {
    pub fn is_busy(&self) -> bool {
        self.busy.is_set()
    }

    pub fn validate(&self) -> Result<NewCategory, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let color = self.color.trim();
        if !HEX_COLOR.is_match(color) {
            return Err(FormError::InvalidColor(self.color.clone()));
        }
        Ok(NewCategory {
            name: name.to_string(),
            r#type: self.kind,
            color: color.to_uppercase(),
        })
    }

    pub fn begin_submit(&mut self) -> Result<NewCategory, FormError> {
        if self.is_busy() {
            return Err(FormError::Busy);
        }
        let payload = self.validate()?;
        self.busy.acquire()?;
        Ok(payload)
    }

    pub fn finish_submit<T>(&mut self, outcome: ApiResult<T>) -> Result<T, FormError> {
        self.busy.release();
        let value = outcome?;
        self.name.clear();
        Ok(value)
    }

    pub fn submit(&mut self, client: &ApiClient) -> Result<Option<Category>, FormError> {
        let payload = self.begin_submit()?;
        let outcome = client.create_category(&payload);
        self.finish_submit(outcome)
    }
}
