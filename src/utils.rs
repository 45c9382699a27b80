// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use clap::ArgMatches;
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

use crate::locale::Locale;
use crate::models::PeriodSelector;

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn fmt_money(d: Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

/// Required string argument. clap enforces presence; this keeps the
/// handlers free of unwraps.
pub fn arg<'a>(m: &'a ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.as_str())
        .with_context(|| format!("Missing argument --{}", name))
}

pub fn parse_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .with_context(|| format!("Invalid id '{}'", raw.trim()))
}

/// Reads `--period`, `--month` and `--year` from a subcommand.
pub fn period_from_args(m: &ArgMatches) -> Result<PeriodSelector> {
    let period = m
        .get_one::<String>("period")
        .map(|s| s.as_str())
        .unwrap_or("all");
    let month = m.get_one::<u32>("month").copied();
    let year = m.get_one::<i32>("year").copied();
    Ok(PeriodSelector::from_parts(period, month, year)?)
}

pub fn get_setting(conn: &Connection, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM settings WHERE key=?1",
        params![key],
        |r| r.get(0),
    )
    .optional()
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn clear_setting(conn: &Connection, key: &str) -> rusqlite::Result<()> {
    conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
    Ok(())
}

/// `--locale` for this run, else the persisted setting.
pub fn locale_for(conn: &Connection, m: &ArgMatches) -> Result<Locale> {
    match m.get_one::<String>("locale") {
        Some(tag) => Ok(tag.parse::<Locale>()?),
        None => get_locale(conn),
    }
}

// Display locale settings
pub fn get_locale(conn: &Connection) -> Result<Locale> {
    match get_setting(conn, "locale")? {
        Some(tag) => Ok(tag.parse::<Locale>()?),
        None => Ok(Locale::default()),
    }
}

pub fn set_locale(conn: &Connection, locale: Locale) -> Result<()> {
    set_setting(conn, "locale", locale.tag())?;
    Ok(())
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
