// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::require_user;
use crate::ledger::{compute_balance, filter_by_period, group_by_month, MonthlySummary};
use crate::locale::Locale;
use crate::models::{NewTransaction, PeriodSelector, Transaction, TxKind};
use crate::store;
use crate::utils::{
    arg, fmt_money, locale_for, maybe_print_json, parse_id, period_from_args, pretty_table,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use tracing::debug;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn kind_arg(sub: &clap::ArgMatches) -> Result<Option<TxKind>> {
    Ok(sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TxKind>())
        .transpose()?)
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_user(conn)?;
    let kind = kind_arg(sub)?.unwrap_or(TxKind::Expense);
    let entry = NewTransaction::parse(
        arg(sub, "description")?,
        arg(sub, "category")?,
        arg(sub, "amount")?,
        kind,
    )?;
    let t = store::insert_transaction(conn, user.id, &entry, Utc::now())?;
    println!(
        "Recorded #{} {} '{}' ({}) {}",
        t.id,
        t.kind,
        t.description,
        t.category,
        fmt_money(t.amount)
    );
    Ok(())
}

/// Fields left out keep their current value; the merged entry is
/// validated like a fresh one.
pub fn merge_edit(current: &Transaction, sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.as_str())
        .unwrap_or(current.description.as_str());
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.as_str())
        .unwrap_or(current.category.as_str());
    let amount = match sub.get_one::<String>("amount") {
        Some(raw) => raw.clone(),
        None => current.amount.abs().to_string(),
    };
    let kind = kind_arg(sub)?.unwrap_or(current.kind);
    Ok(NewTransaction::parse(description, category, &amount, kind)?)
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_user(conn)?;
    let id = parse_id(arg(sub, "id")?)?;
    let current = store::get_transaction(conn, user.id, id)?;
    let entry = merge_edit(&current, sub)?;
    let t = store::update_transaction(conn, user.id, id, &entry)
        .with_context(|| format!("Failed to update transaction {}", id))?;
    println!(
        "Updated #{} {} '{}' ({}) {}",
        t.id,
        t.kind,
        t.description,
        t.category,
        fmt_money(t.amount)
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_user(conn)?;
    let id = parse_id(arg(sub, "id")?)?;
    store::delete_transaction(conn, user.id, id)
        .with_context(|| format!("Failed to delete transaction {}", id))?;
    println!("Removed transaction #{}", id);
    Ok(())
}

/// Period-filtered view of `all`, in input order.
pub fn query_rows<'a, Tz: TimeZone>(
    all: &'a [Transaction],
    selector: PeriodSelector,
    now: &DateTime<Tz>,
) -> Vec<&'a Transaction> {
    let rows = filter_by_period(all, selector, now);
    debug!(?selector, total = all.len(), kept = rows.len(), "filtered transactions");
    rows
}

/// What `tx list` shows: the balance over the whole history next to the
/// period-filtered rows.
#[derive(Debug)]
pub struct ListView<'a> {
    pub balance: Decimal,
    pub rows: Vec<&'a Transaction>,
}

pub fn list_view<'a, Tz: TimeZone>(
    all: &'a [Transaction],
    selector: PeriodSelector,
    now: &DateTime<Tz>,
) -> ListView<'a> {
    ListView {
        balance: compute_balance(all),
        rows: query_rows(all, selector, now),
    }
}

/// One display row: localized date, description, category, signed amount.
pub fn display_row<Tz: TimeZone>(t: &Transaction, locale: Locale, tz: &Tz) -> Vec<String> {
    let sign = match t.kind {
        TxKind::Income => "+",
        TxKind::Expense => "-",
    };
    vec![
        t.id.to_string(),
        locale.format_date(t.date.with_timezone(tz).date_naive()),
        t.description.clone(),
        t.category.clone(),
        format!("{}{}", sign, fmt_money(t.amount.abs())),
    ]
}

fn print_groups(groups: &[MonthlySummary<'_>], locale: Locale) {
    for g in groups {
        println!(
            "{}  +{}  -{}",
            g.label(locale),
            fmt_money(g.total_income),
            fmt_money(g.total_expenses)
        );
        let rows = g
            .transactions
            .iter()
            .map(|t| display_row(t, locale, &Local))
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Description", "Category", "Amount"], rows)
        );
    }
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let user = require_user(conn)?;
    let selector = period_from_args(sub)?;
    let locale = locale_for(conn, sub)?;
    let all = store::list_transactions(conn, user.id)?;
    let view = list_view(&all, selector, &Local::now());

    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view.rows)? {
        println!("Balance: {}", fmt_money(view.balance));
        if view.rows.is_empty() {
            println!("No transactions for this period");
        } else {
            print_groups(&group_by_month(view.rows, &Local), locale);
        }
    }
    Ok(())
}
