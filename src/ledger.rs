// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure derivations over a snapshot of transactions: period filtering,
//! balance, monthly grouping and entry validation.
//!
//! Nothing here reads the clock or touches the database. Callers inject
//! "now" (and with it the local time zone) explicitly.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ValidationError;
use crate::locale::Locale;
use crate::models::{MonthKey, PeriodSelector, Transaction, TxKind};

/// Keeps the transactions that fall inside `selector`, judged in the
/// calendar of `now`'s time zone. Input order is preserved.
///
/// `Week` is a rolling window: anything at or after `now - 7 days`.
pub fn filter_by_period<'a, Tz: TimeZone>(
    transactions: &'a [Transaction],
    selector: PeriodSelector,
    now: &DateTime<Tz>,
) -> Vec<&'a Transaction> {
    let tz = now.timezone();
    let today = now.date_naive();
    let week_start = (now.clone() - Duration::days(7)).with_timezone(&Utc);

    transactions
        .iter()
        .filter(|t| {
            let local = t.date.with_timezone(&tz);
            match selector {
                PeriodSelector::All => true,
                PeriodSelector::Day => local.date_naive() == today,
                PeriodSelector::Week => t.date >= week_start,
                PeriodSelector::Month => {
                    local.month() == today.month() && local.year() == today.year()
                }
                PeriodSelector::Year => local.year() == today.year(),
                PeriodSelector::Specific { month, year } => {
                    local.month() == month && local.year() == year
                }
            }
        })
        .collect()
}

/// Largest magnitude `validate_entry` accepts: one trillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Sum of signed amounts. Meant for the full history, not a filtered view.
///
/// Saturates at `Decimal::MAX`/`Decimal::MIN` instead of panicking when rows
/// that bypassed validation push the total out of range.
pub fn compute_balance<'a, I>(transactions: I) -> Decimal
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary<'a> {
    pub key: MonthKey,
    pub transactions: Vec<&'a Transaction>,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
}

impl<'a> MonthlySummary<'a> {
    fn new(key: MonthKey) -> Self {
        Self {
            key,
            transactions: Vec::new(),
            total_income: Decimal::ZERO,
            total_expenses: Decimal::ZERO,
        }
    }

    pub fn label(&self, locale: Locale) -> String {
        locale.month_label(self.key)
    }

    pub fn net(&self) -> Decimal {
        self.total_income.saturating_sub(self.total_expenses)
    }
}

pub fn month_key<Tz: TimeZone>(transaction: &Transaction, tz: &Tz) -> MonthKey {
    let local = transaction.date.with_timezone(tz);
    MonthKey {
        year: local.year(),
        month: local.month(),
    }
}

/// Groups transactions by their local calendar month.
///
/// Groups appear in the order their month is first encountered and keep
/// the encounter order of their members. The input is expected newest-first
/// but is not re-sorted here.
pub fn group_by_month<'a, I, Tz>(transactions: I, tz: &Tz) -> Vec<MonthlySummary<'a>>
where
    I: IntoIterator<Item = &'a Transaction>,
    Tz: TimeZone,
{
    let mut groups: Vec<MonthlySummary<'a>> = Vec::new();
    let mut index: HashMap<MonthKey, usize> = HashMap::new();

    for t in transactions {
        let key = month_key(t, tz);
        let pos = *index.entry(key).or_insert_with(|| {
            groups.push(MonthlySummary::new(key));
            groups.len() - 1
        });
        let group = &mut groups[pos];
        match t.kind {
            TxKind::Income => group.total_income = group.total_income.saturating_add(t.amount),
            TxKind::Expense => {
                group.total_expenses = group.total_expenses.saturating_add(t.amount.abs())
            }
        }
        group.transactions.push(t);
    }

    groups
}

/// The gate every create/edit passes through. Returns the signed amount:
/// negated for expenses, as entered for income.
pub fn validate_entry(
    description: &str,
    category: &str,
    raw_amount: &str,
    kind: TxKind,
) -> Result<Decimal, ValidationError> {
    let raw = raw_amount.trim();
    let magnitude = parse_magnitude(raw)?;
    if description.trim().is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if category.trim().is_empty() {
        return Err(ValidationError::EmptyCategory);
    }

    if magnitude.is_zero() {
        return Ok(Decimal::ZERO);
    }
    Ok(match kind {
        TxKind::Income => magnitude,
        TxKind::Expense => -magnitude,
    })
}

/// Plain decimal notation only: optional sign, digits, at most one `.`.
/// `Decimal::from_str` alone would also take `1_000` or `1e3`.
fn parse_magnitude(raw: &str) -> Result<Decimal, ValidationError> {
    let invalid = || ValidationError::InvalidAmount(raw.to_string());
    let (negative, body) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let digits = body.bytes().filter(u8::is_ascii_digit).count();
    let dots = body.bytes().filter(|&b| b == b'.').count();
    if digits == 0 || dots > 1 || digits + dots != body.len() {
        return Err(invalid());
    }

    let magnitude = Decimal::from_str(body).map_err(|_| invalid())?;
    if negative && !magnitude.is_zero() {
        return Err(ValidationError::NegativeAmount(raw.to_string()));
    }
    if magnitude > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge(raw.to_string()));
    }
    Ok(magnitude)
}
