// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashboard::error::{ApiError, FormError};
use cashboard::forms::{find_category, CategoryForm, TransactionForm, DEFAULT_CATEGORY_COLOR};
use cashboard::models::{Category, TxnType};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

fn categories() -> Vec<Category> {
    serde_json::from_value(json!([
        {"id": "c1", "name": "Salary", "type": "income", "color": "#22C55E"},
        {"id": "c2", "name": "Food", "type": "expense", "color": "#EF4444"},
        {"id": "c3", "name": "Rent", "type": "expense", "color": "#3B82F6"}
    ]))
    .unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

#[test]
fn new_form_defaults_to_expense_and_today() {
    let form = TransactionForm::new(today());
    assert_eq!(form.kind(), TxnType::Expense);
    assert_eq!(form.date, "2025-06-15");
    assert!(!form.can_submit());
}

#[test]
fn choices_follow_selected_type() {
    let cats = categories();
    let mut form = TransactionForm::new(today());
    let names: Vec<&str> = form.choices(&cats).iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Food", "Rent"]);

    form.category_id = "c2".into();
    form.select_type(TxnType::Income);
    assert!(form.category_id.is_empty());
    let names: Vec<&str> = form.choices(&cats).iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Salary"]);
}

#[test]
fn validate_builds_payload() {
    let cats = categories();
    let mut form = TransactionForm::new(today());
    form.category_id = "c3".into();
    form.amount = " 1250000 ".into();
    form.description = "  June rent ".into();
    let payload = form.validate(&cats).unwrap();
    assert_eq!(payload.r#type, TxnType::Expense);
    assert_eq!(payload.category_id, "c3");
    assert_eq!(payload.amount, Decimal::from(1_250_000));
    assert_eq!(payload.description, "June rent");
    assert_eq!(payload.transaction_date, "2025-06-15");
}

#[test]
fn validate_rejects_missing_or_foreign_category() {
    let cats = categories();
    let mut form = TransactionForm::new(today());
    form.amount = "10".into();
    assert!(matches!(
        form.validate(&cats),
        Err(FormError::MissingCategory(TxnType::Expense))
    ));

    form.category_id = "nope".into();
    assert!(matches!(form.validate(&cats), Err(FormError::UnknownCategory(_))));

    form.category_id = "c1".into();
    assert!(matches!(
        form.validate(&cats),
        Err(FormError::CategoryTypeMismatch { .. })
    ));
}

#[test]
fn validate_rejects_bad_amount_and_date() {
    let cats = categories();
    let mut form = TransactionForm::new(today());
    form.category_id = "c2".into();

    form.amount = "".into();
    assert!(matches!(form.validate(&cats), Err(FormError::InvalidAmount(_))));
    form.amount = "12abc".into();
    assert!(matches!(form.validate(&cats), Err(FormError::InvalidAmount(_))));
    form.amount = "-5".into();
    assert!(matches!(form.validate(&cats), Err(FormError::NegativeAmount)));

    form.amount = "5".into();
    form.date = "15/06/2025".into();
    assert!(matches!(form.validate(&cats), Err(FormError::InvalidDate(_))));
}

#[test]
fn busy_form_rejects_second_submission() {
    let cats = categories();
    let mut form = TransactionForm::new(today());
    form.category_id = "c2".into();
    form.amount = "20".into();

    form.begin_submit(&cats).unwrap();
    assert!(form.is_busy());
    assert!(!form.can_submit());
    assert!(matches!(form.begin_submit(&cats), Err(FormError::Busy)));

    form.finish_submit::<()>(Ok(())).unwrap();
    assert!(!form.is_busy());
    assert!(form.amount.is_empty());
}

#[test]
fn failed_submission_keeps_fields() {
    let cats = categories();
    let mut form = TransactionForm::new(today());
    form.category_id = "c2".into();
    form.amount = "20".into();
    form.description = "Snacks".into();

    form.begin_submit(&cats).unwrap();
    let err = form
        .finish_submit::<()>(Err(ApiError::Status {
            status: 400,
            message: "amount must be positive".into(),
        }))
        .unwrap_err();
    assert_eq!(err.to_string(), "amount must be positive");
    assert!(!form.is_busy());
    assert_eq!(form.amount, "20");
    assert_eq!(form.description, "Snacks");
    assert_eq!(form.category_id, "c2");
}

#[test]
fn category_form_requires_name_and_hex_color() {
    let mut form = CategoryForm::default();
    assert_eq!(form.color, DEFAULT_CATEGORY_COLOR);
    assert!(matches!(form.validate(), Err(FormError::MissingName)));

    form.name = "Transport".into();
    form.color = "red".into();
    assert!(matches!(form.validate(), Err(FormError::InvalidColor(_))));

    form.color = "#a1b2c3".into();
    form.kind = TxnType::Income;
    let payload = form.validate().unwrap();
    assert_eq!(payload.name, "Transport");
    assert_eq!(payload.r#type, TxnType::Income);
    assert_eq!(payload.color, "#A1B2C3");

    form.begin_submit().unwrap();
    assert!(matches!(form.begin_submit(), Err(FormError::Busy)));
    form.finish_submit::<()>(Ok(())).unwrap();
    assert!(form.name.is_empty());
}

#[test]
fn find_category_by_id_or_name() {
    let cats = categories();
    assert_eq!(find_category(&cats, "c3").unwrap().name, "Rent");
    assert_eq!(find_category(&cats, "food").unwrap().id, "c2");
    assert!(find_category(&cats, "Travel").is_none());
}
