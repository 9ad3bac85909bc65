// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashboard::aggregate::{
    attach_categories, breakdown, summarize, ChartView, EXPENSE_COLOR, FALLBACK_COLOR,
    FALLBACK_LABEL, INCOME_COLOR,
};
use cashboard::models::{Category, Summary, Transaction};
use rust_decimal::Decimal;
use serde_json::json;

fn categories() -> Vec<Category> {
    serde_json::from_value(json!([
        {"id": "c-salary", "name": "Salary", "type": "income", "color": "#22C55E"},
        {"id": "c-food", "name": "Food", "type": "expense", "color": "#EF4444"},
        {"id": "c-rent", "name": "Rent", "type": "expense", "color": "#3B82F6"}
    ]))
    .unwrap()
}

fn txns(v: serde_json::Value) -> Vec<Transaction> {
    serde_json::from_value(v).unwrap()
}

fn sample() -> Vec<Transaction> {
    let mut t = txns(json!([
        {"id": "1", "type": "income", "categoryId": "c-salary", "amount": 1000, "description": "June", "transactionDate": "2025-06-01"},
        {"id": "2", "type": "expense", "categoryId": "c-food", "amount": 150, "description": "", "transactionDate": "2025-06-02"},
        {"id": "3", "type": "expense", "categoryId": "c-rent", "amount": 250, "description": "", "transactionDate": "2025-06-03"},
        {"id": "4", "type": "expense", "categoryId": "c-food", "amount": "50", "description": "", "transactionDate": "2025-06-04"}
    ]));
    attach_categories(&mut t, &categories());
    t
}

#[test]
fn summarize_income_and_expense() {
    let t = txns(json!([
        {"id": "a", "type": "income", "amount": 1000, "transactionDate": "2025-01-01"},
        {"id": "b", "type": "expense", "amount": 400, "transactionDate": "2025-01-02"}
    ]));
    let s = summarize(&t);
    assert_eq!(
        s,
        Summary {
            total_income: Decimal::from(1000),
            total_expense: Decimal::from(400),
            balance: Decimal::from(600),
        }
    );
}

#[test]
fn summarize_empty_is_zero() {
    assert_eq!(summarize(&[]), Summary::default());
}

#[test]
fn summarize_is_order_independent_and_balanced() {
    let t = sample();
    let forward = summarize(&t);
    let mut reversed = t.clone();
    reversed.reverse();
    let mut rotated = t.clone();
    rotated.rotate_left(2);

    assert_eq!(forward, summarize(&reversed));
    assert_eq!(forward, summarize(&rotated));
    assert_eq!(forward.balance, forward.total_income - forward.total_expense);
    assert_eq!(forward.total_expense, Decimal::from(450));
}

#[test]
fn summarize_coerces_bad_amounts_to_zero() {
    let t = txns(json!([
        {"id": "a", "type": "income", "amount": "abc"},
        {"id": "b", "type": "income", "amount": null},
        {"id": "c", "type": "expense"},
        {"id": "d", "type": "expense", "amount": " 12.5 "},
        {"id": "e", "type": "expense", "amount": {"value": 3}}
    ]));
    let s = summarize(&t);
    assert_eq!(s.total_income, Decimal::ZERO);
    assert_eq!(s.total_expense, Decimal::new(125, 1));
    assert_eq!(s.balance, Decimal::new(-125, 1));
}

#[test]
fn unknown_type_counts_as_expense() {
    let t = txns(json!([{"id": "a", "type": "transfer", "amount": 10}]));
    let s = summarize(&t);
    assert_eq!(s.total_expense, Decimal::from(10));
}

#[test]
fn expense_breakdown_groups_and_sorts() {
    let b = breakdown(&sample(), ChartView::Expense);
    assert!(!b.is_empty);
    assert_eq!(b.total_sum, Decimal::from(450));
    let labels: Vec<&str> = b.details.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["Rent", "Food"]);
    assert_eq!(b.details[0].value, Decimal::from(250));
    assert_eq!(b.details[0].percentage_label(), "55.6%");
    assert_eq!(b.details[1].value, Decimal::from(200));
    assert_eq!(b.details[1].percentage_label(), "44.4%");
    assert_eq!(b.details[1].color, "#EF4444");
}

#[test]
fn breakdown_percentages_sum_to_hundred() {
    let t = txns(json!([
        {"id": "1", "type": "expense", "amount": 1, "category": {"id": "x", "name": "A", "type": "expense", "color": "#000001"}},
        {"id": "2", "type": "expense", "amount": 1, "category": {"id": "y", "name": "B", "type": "expense", "color": "#000002"}},
        {"id": "3", "type": "expense", "amount": 1, "category": {"id": "z", "name": "C", "type": "expense", "color": "#000003"}}
    ]));
    let b = breakdown(&t, ChartView::Expense);
    let total: Decimal = b.details.iter().map(|e| e.percentage).sum();
    let diff = (total - Decimal::ONE_HUNDRED).abs();
    assert!(diff <= Decimal::new(3, 1), "sum was {}", total);
}

#[test]
fn breakdown_ties_keep_grouping_order() {
    let t = txns(json!([
        {"id": "1", "type": "expense", "amount": 5, "category": {"id": "x", "name": "First", "type": "expense", "color": "#111111"}},
        {"id": "2", "type": "expense", "amount": 5, "category": {"id": "y", "name": "Second", "type": "expense", "color": "#222222"}}
    ]));
    let b = breakdown(&t, ChartView::Expense);
    assert_eq!(b.details[0].label, "First");
    assert_eq!(b.details[1].label, "Second");
    assert_eq!(b.details[0].percentage_label(), "50.0%");
}

#[test]
fn breakdown_single_category_is_full_share() {
    let b = breakdown(&sample(), ChartView::Income);
    assert_eq!(b.details.len(), 1);
    assert_eq!(b.details[0].label, "Salary");
    assert_eq!(b.details[0].percentage_label(), "100.0%");
}

#[test]
fn breakdown_empty_and_zero_totals_are_empty() {
    let empty = breakdown(&[], ChartView::Expense);
    assert!(empty.is_empty);
    assert!(empty.details.is_empty());
    assert_eq!(empty.total_sum, Decimal::ZERO);

    let zeros = txns(json!([
        {"id": "1", "type": "expense", "amount": 0},
        {"id": "2", "type": "expense", "amount": "n/a"}
    ]));
    let b = breakdown(&zeros, ChartView::Expense);
    assert!(b.is_empty);
    assert!(b.details.is_empty());

    let balance = breakdown(&[], ChartView::Balance);
    assert!(balance.is_empty);

    // Only income present: the expense view has nothing to chart
    let only_income = txns(json!([{"id": "1", "type": "income", "amount": 10}]));
    assert!(breakdown(&only_income, ChartView::Expense).is_empty);
}

#[test]
fn balance_view_compares_income_and_expense() {
    let b = breakdown(&sample(), ChartView::Balance);
    assert_eq!(b.total_sum, Decimal::from(1450));
    assert_eq!(b.details[0].label, "Income");
    assert_eq!(b.details[0].color, INCOME_COLOR);
    assert_eq!(b.details[0].percentage_label(), "69.0%");
    assert_eq!(b.details[1].label, "Expense");
    assert_eq!(b.details[1].color, EXPENSE_COLOR);
    assert_eq!(b.details[1].percentage_label(), "31.0%");
}

#[test]
fn unknown_category_falls_back_and_is_counted() {
    let mut t = sample();
    t.extend(txns(json!([
        {"id": "5", "type": "expense", "categoryId": "deleted-id", "amount": 50, "transactionDate": "2025-06-05"},
        {"id": "6", "type": "expense", "categoryId": null, "amount": 50, "transactionDate": "2025-06-06"}
    ])));
    attach_categories(&mut t, &categories());

    let s = summarize(&t);
    assert_eq!(s.total_expense, Decimal::from(550));

    let b = breakdown(&t, ChartView::Expense);
    let other = b
        .details
        .iter()
        .find(|e| e.label == FALLBACK_LABEL)
        .expect("fallback group");
    assert_eq!(other.value, Decimal::from(100));
    assert_eq!(other.color, FALLBACK_COLOR);
    assert_eq!(b.total_sum, Decimal::from(550));
}

#[test]
fn group_color_comes_from_last_transaction() {
    let t = txns(json!([
        {"id": "1", "type": "expense", "amount": 1, "category": {"id": "x", "name": "Food", "type": "expense", "color": "#AAAAAA"}},
        {"id": "2", "type": "expense", "amount": 1, "category": {"id": "x", "name": "Food", "type": "expense", "color": "#BBBBBB"}}
    ]));
    let b = breakdown(&t, ChartView::Expense);
    assert_eq!(b.details.len(), 1);
    assert_eq!(b.details[0].color, "#BBBBBB");
}

#[test]
fn attach_keeps_embedded_category() {
    let mut t = txns(json!([
        {"id": "1", "type": "expense", "categoryId": "c-food", "amount": 1,
         "category": {"id": "c-food", "name": "Groceries", "type": "expense", "color": "#123456"}}
    ]));
    attach_categories(&mut t, &categories());
    assert_eq!(t[0].category.as_ref().unwrap().name, "Groceries");
}

#[test]
fn breakdown_json_shape() {
    let b = breakdown(&sample(), ChartView::Expense);
    let v = serde_json::to_value(&b).unwrap();
    assert_eq!(v["view"], "expense");
    assert_eq!(v["isEmpty"], false);
    assert_eq!(v["totalSum"], 450.0);
    assert_eq!(v["details"][0]["label"], "Rent");
    assert_eq!(v["details"][0]["percentage"], "55.6");
}

#[test]
fn huge_amounts_saturate_instead_of_panicking() {
    let big = "50000000000000000000000000000";
    let mut t = txns(json!([
        {"id": "1", "type": "expense", "categoryId": "c-food", "amount": big},
        {"id": "2", "type": "expense", "categoryId": "c-rent", "amount": big},
        {"id": "3", "type": "expense", "categoryId": "c-rent", "amount": big}
    ]));
    attach_categories(&mut t, &categories());

    let s = summarize(&t);
    assert_eq!(s.total_expense, Decimal::MAX);
    assert_eq!(s.balance, Decimal::MIN);

    let b = breakdown(&t, ChartView::Expense);
    assert!(!b.is_empty);
    assert_eq!(b.total_sum, Decimal::MAX);
    assert_eq!(b.details.len(), 2);
    assert_eq!(b.details[0].label, "Rent");
    assert_eq!(b.details[0].value, Decimal::MAX);

    let balance = breakdown(&t, ChartView::Balance);
    assert_eq!(balance.total_sum, Decimal::MAX);
}
