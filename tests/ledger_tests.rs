// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use pocketbook::error::ValidationError;
use pocketbook::ledger::{
    compute_balance, filter_by_period, group_by_month, validate_entry, MAX_AMOUNT,
};
use pocketbook::locale::Locale;
use pocketbook::models::{MonthKey, NewTransaction, PeriodSelector, Transaction, TxKind};
use rust_decimal::Decimal;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn at(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn tx(id: i64, date: &str, kind: TxKind, amount: &str) -> Transaction {
    Transaction {
        id,
        owner_id: 1,
        description: format!("tx {}", id),
        category: "General".into(),
        amount: d(amount),
        kind,
        date: at(date),
        created_at: None,
    }
}

fn ids(rows: &[&Transaction]) -> Vec<i64> {
    rows.iter().map(|t| t.id).collect()
}

#[test]
fn balance_is_sum_of_signed_amounts() {
    let txs = vec![
        tx(1, "2024-03-01T10:00:00Z", TxKind::Income, "1000"),
        tx(2, "2024-03-02T10:00:00Z", TxKind::Expense, "-12.50"),
        tx(3, "2024-02-02T10:00:00Z", TxKind::Expense, "-0.25"),
    ];
    assert_eq!(compute_balance(&txs), d("987.25"));
    assert_eq!(compute_balance(&[] as &[Transaction]), Decimal::ZERO);
}

#[test]
fn balance_ignores_display_filter() {
    let now = at("2024-03-15T10:00:00Z");
    let txs = vec![
        tx(1, "2024-03-15T09:00:00Z", TxKind::Expense, "-10"),
        tx(2, "2023-01-01T09:00:00Z", TxKind::Income, "100"),
    ];
    let shown = filter_by_period(&txs, PeriodSelector::Day, &now);
    assert_eq!(ids(&shown), vec![1]);
    assert_eq!(compute_balance(shown.iter().copied()), d("-10"));
    assert_eq!(compute_balance(&txs), d("90"));
}

#[test]
fn all_keeps_everything_in_order() {
    let txs = vec![
        tx(2, "2020-01-01T00:00:00Z", TxKind::Income, "1"),
        tx(1, "2030-01-01T00:00:00Z", TxKind::Income, "1"),
    ];
    let now = at("1999-06-01T00:00:00Z");
    assert_eq!(ids(&filter_by_period(&txs, PeriodSelector::All, &now)), vec![2, 1]);
}

#[test]
fn day_uses_calendar_day_of_now() {
    let now = at("2024-03-15T10:00:00Z");
    let txs = vec![
        tx(1, "2024-03-15T23:59:00Z", TxKind::Expense, "-1"),
        tx(2, "2024-03-14T23:59:00Z", TxKind::Expense, "-1"),
        tx(3, "2024-03-15T00:00:00Z", TxKind::Expense, "-1"),
    ];
    assert_eq!(ids(&filter_by_period(&txs, PeriodSelector::Day, &now)), vec![1, 3]);
}

#[test]
fn day_is_judged_in_local_time_zone() {
    // 22:00 on the 15th in UTC-3 is 01:00 on the 16th in UTC.
    let tz = FixedOffset::west_opt(3 * 3600).unwrap();
    let now = tz.with_ymd_and_hms(2024, 3, 15, 23, 0, 0).unwrap();
    let txs = vec![
        tx(1, "2024-03-16T01:00:00Z", TxKind::Expense, "-1"),
        tx(2, "2024-03-15T02:00:00Z", TxKind::Expense, "-1"),
    ];
    assert_eq!(ids(&filter_by_period(&txs, PeriodSelector::Day, &now)), vec![1]);
}

#[test]
fn week_is_a_rolling_seven_day_window() {
    let now = at("2024-03-15T00:00:00Z");
    let txs = vec![
        tx(1, "2024-03-09T00:00:00Z", TxKind::Expense, "-1"),
        tx(2, "2024-03-07T00:00:00Z", TxKind::Expense, "-1"),
        tx(3, "2024-03-08T00:00:00Z", TxKind::Expense, "-1"),
        tx(4, "2024-03-07T23:59:59Z", TxKind::Expense, "-1"),
    ];
    assert_eq!(ids(&filter_by_period(&txs, PeriodSelector::Week, &now)), vec![1, 3]);
}

#[test]
fn month_year_and_specific() {
    let now = at("2024-03-15T12:00:00Z");
    let txs = vec![
        tx(1, "2024-03-01T00:00:00Z", TxKind::Income, "1"),
        tx(2, "2024-02-29T12:00:00Z", TxKind::Income, "1"),
        tx(3, "2023-03-10T12:00:00Z", TxKind::Income, "1"),
        tx(4, "2024-12-31T12:00:00Z", TxKind::Income, "1"),
    ];
    assert_eq!(ids(&filter_by_period(&txs, PeriodSelector::Month, &now)), vec![1]);
    assert_eq!(
        ids(&filter_by_period(&txs, PeriodSelector::Year, &now)),
        vec![1, 2, 4]
    );
    let march_2023 = PeriodSelector::Specific {
        month: 3,
        year: 2023,
    };
    assert_eq!(ids(&filter_by_period(&txs, march_2023, &now)), vec![3]);
}

#[test]
fn group_by_month_accumulates_in_encounter_order() {
    let txs = vec![
        tx(1, "2024-01-20T12:00:00Z", TxKind::Income, "100"),
        tx(2, "2024-01-10T12:00:00Z", TxKind::Expense, "-40"),
        tx(3, "2024-02-05T12:00:00Z", TxKind::Income, "50"),
    ];
    let groups = group_by_month(&txs, &Utc);
    assert_eq!(groups.len(), 2);

    assert_eq!(groups[0].label(Locale::EnUs), "January 2024");
    assert_eq!(groups[0].key, MonthKey { year: 2024, month: 1 });
    assert_eq!(groups[0].total_income, d("100"));
    assert_eq!(groups[0].total_expenses, d("40"));
    assert_eq!(ids(&groups[0].transactions), vec![1, 2]);

    assert_eq!(groups[1].label(Locale::EnUs), "February 2024");
    assert_eq!(groups[1].total_income, d("50"));
    assert_eq!(groups[1].total_expenses, Decimal::ZERO);
    assert_eq!(ids(&groups[1].transactions), vec![3]);

    assert_eq!(groups[0].label(Locale::PtBr), "janeiro de 2024");
}

#[test]
fn group_by_month_merges_non_contiguous_months() {
    let txs = vec![
        tx(1, "2024-03-02T12:00:00Z", TxKind::Expense, "-5"),
        tx(2, "2024-02-02T12:00:00Z", TxKind::Expense, "-5"),
        tx(3, "2024-03-01T12:00:00Z", TxKind::Expense, "-7"),
    ];
    let groups = group_by_month(&txs, &Utc);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, MonthKey { year: 2024, month: 3 });
    assert_eq!(ids(&groups[0].transactions), vec![1, 3]);
    assert_eq!(groups[0].total_expenses, d("12"));
    assert_eq!(groups[0].net(), d("-12"));
}

#[test]
fn group_by_month_uses_local_month() {
    let tz = FixedOffset::west_opt(3 * 3600).unwrap();
    // 01:00 UTC on Feb 1st is still January 31st in UTC-3.
    let txs = vec![tx(1, "2024-02-01T01:00:00Z", TxKind::Income, "10")];
    let groups = group_by_month(&txs, &tz);
    assert_eq!(groups[0].key, MonthKey { year: 2024, month: 1 });
}

#[test]
fn filter_and_group_are_repeatable() {
    let now = at("2024-03-15T12:00:00Z");
    let txs = vec![
        tx(1, "2024-03-14T12:00:00Z", TxKind::Income, "10"),
        tx(2, "2024-02-14T12:00:00Z", TxKind::Expense, "-3"),
        tx(3, "2024-01-14T12:00:00Z", TxKind::Expense, "-4"),
    ];
    let snapshot = txs.clone();

    let a = filter_by_period(&txs, PeriodSelector::Year, &now);
    let b = filter_by_period(&txs, PeriodSelector::Year, &now);
    assert_eq!(a, b);

    let g1 = group_by_month(a.iter().copied(), &Utc);
    let g2 = group_by_month(b.iter().copied(), &Utc);
    assert_eq!(g1, g2);
    assert_eq!(txs, snapshot);
}

#[test]
fn validate_entry_rejections() {
    assert_eq!(
        validate_entry("", "Food", "10", TxKind::Expense),
        Err(ValidationError::EmptyDescription)
    );
    assert_eq!(
        validate_entry("Lunch", "   ", "10", TxKind::Expense),
        Err(ValidationError::EmptyCategory)
    );
    assert_eq!(
        validate_entry("Lunch", "Food", "abc", TxKind::Expense),
        Err(ValidationError::InvalidAmount("abc".into()))
    );
    assert_eq!(
        validate_entry("Lunch", "Food", "", TxKind::Expense),
        Err(ValidationError::InvalidAmount("".into()))
    );
    assert_eq!(
        validate_entry("Lunch", "Food", "-3", TxKind::Income),
        Err(ValidationError::NegativeAmount("-3".into()))
    );
    for raw in ["1__", "1_000", "1e3", "1.2.3", ".", "+", "--3", "0x10", "1 000"] {
        assert_eq!(
            validate_entry("Lunch", "Food", raw, TxKind::Expense),
            Err(ValidationError::InvalidAmount(raw.into())),
            "{raw}"
        );
    }
}

#[test]
fn validate_entry_caps_amounts() {
    assert_eq!(
        validate_entry("Big", "Misc", "79228162514264337593543950335", TxKind::Income),
        Err(ValidationError::AmountTooLarge(
            "79228162514264337593543950335".into()
        ))
    );
    assert_eq!(
        validate_entry("Big", "Misc", "1000000000000.01", TxKind::Income),
        Err(ValidationError::AmountTooLarge("1000000000000.01".into()))
    );
    assert_eq!(
        validate_entry("Big", "Misc", "1000000000000", TxKind::Expense),
        Ok(-MAX_AMOUNT)
    );
    let huge = NewTransaction::parse("Big", "Misc", "79228162514264337593543950335", TxKind::Income);
    assert!(huge.is_err());
}

#[test]
fn sums_saturate_instead_of_overflowing() {
    let mut a = tx(1, "2024-03-02T10:00:00Z", TxKind::Income, "1");
    a.amount = Decimal::MAX;
    let mut b = tx(2, "2024-03-01T10:00:00Z", TxKind::Income, "1");
    b.amount = Decimal::MAX;
    let mut c = tx(3, "2024-03-01T09:00:00Z", TxKind::Expense, "-1");
    c.amount = Decimal::MIN;
    let txs = vec![a, b, c];

    assert_eq!(compute_balance(&txs[..2]), Decimal::MAX);
    assert_eq!(compute_balance(&txs[2..]), Decimal::MIN);

    let groups = group_by_month(&txs, &Utc);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].total_income, Decimal::MAX);
    assert_eq!(groups[0].total_expenses, Decimal::MAX);
    assert_eq!(groups[0].net(), Decimal::ZERO);
}

#[test]
fn validate_entry_signs_by_type() {
    assert_eq!(
        validate_entry("Lunch", "Food", "12.50", TxKind::Expense),
        Ok(d("-12.50"))
    );
    assert_eq!(
        validate_entry("Salary", "Work", "1000", TxKind::Income),
        Ok(d("1000"))
    );
    assert_eq!(
        validate_entry("Gift", "Misc", " 0 ", TxKind::Expense),
        Ok(Decimal::ZERO)
    );
    assert_eq!(
        validate_entry("Bonus", "Work", "+5", TxKind::Income),
        Ok(d("5"))
    );
    assert_eq!(
        validate_entry("Coffee", "Food", "0.5", TxKind::Expense),
        Ok(d("-0.5"))
    );
}

#[test]
fn new_transaction_trims_text() {
    let entry = NewTransaction::parse("  Market ", " Food ", "30", TxKind::Expense).unwrap();
    assert_eq!(entry.description(), "Market");
    assert_eq!(entry.category(), "Food");
    assert_eq!(entry.amount(), d("-30"));
    assert_eq!(entry.kind(), TxKind::Expense);
}

#[test]
fn period_selector_from_cli_parts() {
    assert_eq!(
        PeriodSelector::from_parts("WEEK", None, None).unwrap(),
        PeriodSelector::Week
    );
    assert_eq!(
        PeriodSelector::from_parts("specific", Some(2), Some(2024)).unwrap(),
        PeriodSelector::Specific {
            month: 2,
            year: 2024
        }
    );
    assert!(PeriodSelector::from_parts("specific", None, Some(2024)).is_err());
    assert!(PeriodSelector::from_parts("specific", Some(13), Some(2024)).is_err());
    assert!(PeriodSelector::from_parts("fortnight", None, None).is_err());
}
