// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth::require_user;
use crate::ledger::filter_by_period;
use crate::locale::Locale;
use crate::models::Transaction;
use crate::store;
use crate::utils::{arg, locale_for, period_from_args};
use anyhow::{bail, Context, Result};
use chrono::{Local, TimeZone};
use rusqlite::Connection;
use std::io;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

/// Header row in `locale`, then date, description, category, signed
/// amount and type label per transaction.
pub fn write_csv<'a, W, I, Tz>(
    w: W,
    transactions: I,
    locale: Locale,
    tz: &Tz,
) -> crate::error::Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Transaction>,
    Tz: TimeZone,
{
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(locale.csv_headers())?;
    for t in transactions {
        wtr.write_record([
            locale.format_date(t.date.with_timezone(tz).date_naive()),
            t.description.clone(),
            t.category.clone(),
            t.amount.to_string(),
            locale.kind_label(t.kind).to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = arg(sub, "format")?.trim().to_lowercase();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    let out = arg(sub, "out")?;
    let user = require_user(conn)?;
    let locale = locale_for(conn, sub)?;

    let all = store::list_transactions(conn, user.id)?;
    // No --period means the full history.
    let selector = period_from_args(sub)?;
    let rows = filter_by_period(&all, selector, &Local::now());

    // Rendered in memory first so a failure never leaves a partial file.
    let buf = if fmt == "csv" {
        let mut buf = Vec::new();
        write_csv(&mut buf, rows.iter().copied(), locale, &Local)?;
        buf
    } else {
        serde_json::to_vec_pretty(&rows)?
    };
    std::fs::write(out, buf).with_context(|| format!("Write export file {}", out))?;
    info!(count = rows.len(), format = %fmt, "exported transactions");
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
