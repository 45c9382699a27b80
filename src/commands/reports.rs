// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::require_user;
use crate::ledger::{compute_balance, filter_by_period, group_by_month};
use crate::locale::Locale;
use crate::models::{PeriodSelector, Transaction};
use crate::store;
use crate::utils::{fmt_money, locale_for, maybe_print_json, period_from_args, pretty_table};
use anyhow::Result;
use chrono::{DateTime, Local, TimeZone};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("balance", sub)) => balance(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BalanceRow {
    pub balance: Decimal,
    pub transactions: usize,
}

/// Balance over every transaction the user owns. Periods do not apply.
pub fn balance_row(all: &[Transaction]) -> BalanceRow {
    BalanceRow {
        balance: compute_balance(all),
        transactions: all.len(),
    }
}

fn balance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_user(conn)?;
    let all = store::list_transactions(conn, user.id)?;
    let row = balance_row(&all);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &row)? {
        println!(
            "{}",
            pretty_table(
                &["Balance", "Transactions"],
                vec![vec![fmt_money(row.balance), row.transactions.to_string()]],
            )
        );
    }
    Ok(())
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MonthlyRow {
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
    pub count: usize,
}

/// Monthly totals over the period-filtered view, newest month first as
/// supplied by the store.
pub fn monthly_rows<Tz: TimeZone>(
    all: &[Transaction],
    selector: PeriodSelector,
    now: &DateTime<Tz>,
    locale: Locale,
) -> Vec<MonthlyRow> {
    let filtered = filter_by_period(all, selector, now);
    group_by_month(filtered, &now.timezone())
        .into_iter()
        .map(|g| MonthlyRow {
            label: g.label(locale),
            year: g.key.year,
            month: g.key.month,
            income: g.total_income,
            expenses: g.total_expenses,
            net: g.net(),
            count: g.transactions.len(),
        })
        .collect()
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_user(conn)?;
    let selector = period_from_args(sub)?;
    let locale = locale_for(conn, sub)?;
    let all = store::list_transactions(conn, user.id)?;
    let data = monthly_rows(&all, selector, &Local::now(), locale);

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.label.clone(),
                    fmt_money(r.income),
                    fmt_money(r.expenses),
                    fmt_money(r.net),
                    r.count.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net", "Count"], rows)
        );
    }
    Ok(())
}
