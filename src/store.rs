// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Owner-scoped CRUD for transaction records.
//!
//! Every mutation is one statement; on failure nothing is retried and the
//! caller's in-memory snapshot should be left as it was.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TxKind};

const COLUMNS: &str = "id, user_id, description, category, amount, type, date, created_at";

struct RawRow {
    id: i64,
    owner_id: i64,
    description: String,
    category: String,
    amount: String,
    kind: String,
    date: DateTime<Utc>,
    created_at: Option<DateTime<Utc>>,
}

impl RawRow {
    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: r.get(0)?,
            owner_id: r.get(1)?,
            description: r.get(2)?,
            category: r.get(3)?,
            amount: r.get(4)?,
            kind: r.get(5)?,
            date: r.get(6)?,
            created_at: r.get(7)?,
        })
    }
}

impl TryFrom<RawRow> for Transaction {
    type Error = Error;

    fn try_from(raw: RawRow) -> Result<Self> {
        let amount = raw.amount.parse::<Decimal>().map_err(|_| {
            Error::InvalidData(format!(
                "Invalid stored amount '{}' for transaction {}",
                raw.amount, raw.id
            ))
        })?;
        let kind = raw.kind.parse::<TxKind>()?;
        Ok(Transaction {
            id: raw.id,
            owner_id: raw.owner_id,
            description: raw.description,
            category: raw.category,
            amount,
            kind,
            date: raw.date,
            created_at: raw.created_at,
        })
    }
}

/// All of `owner`'s transactions, newest first.
pub fn list_transactions(conn: &Connection, owner: i64) -> Result<Vec<Transaction>> {
    let sql = format!(
        "SELECT {} FROM transactions WHERE user_id=?1 ORDER BY date DESC, id DESC",
        COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![owner], RawRow::from_row)?;
    let mut data = Vec::new();
    for row in rows {
        data.push(Transaction::try_from(row?)?);
    }
    debug!(owner, count = data.len(), "loaded transactions");
    Ok(data)
}

pub fn get_transaction(conn: &Connection, owner: i64, id: i64) -> Result<Transaction> {
    let sql = format!(
        "SELECT {} FROM transactions WHERE id=?1 AND user_id=?2",
        COLUMNS
    );
    let raw = conn
        .query_row(&sql, params![id, owner], RawRow::from_row)
        .optional()?
        .ok_or(Error::NotFound(id))?;
    Transaction::try_from(raw)
}

/// Inserts a validated entry dated `date` and returns the stored record.
pub fn insert_transaction(
    conn: &Connection,
    owner: i64,
    entry: &NewTransaction,
    date: DateTime<Utc>,
) -> Result<Transaction> {
    conn.execute(
        "INSERT INTO transactions(user_id, description, category, amount, type, date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            owner,
            entry.description(),
            entry.category(),
            entry.amount().to_string(),
            entry.kind().as_str(),
            date,
            Utc::now(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    info!(owner, id, amount = %entry.amount(), "transaction recorded");
    get_transaction(conn, owner, id)
}

/// Replaces description, category, amount and type. Id, owner and date stay.
pub fn update_transaction(
    conn: &Connection,
    owner: i64,
    id: i64,
    entry: &NewTransaction,
) -> Result<Transaction> {
    let changed = conn.execute(
        "UPDATE transactions SET description=?1, category=?2, amount=?3, type=?4
         WHERE id=?5 AND user_id=?6",
        params![
            entry.description(),
            entry.category(),
            entry.amount().to_string(),
            entry.kind().as_str(),
            id,
            owner,
        ],
    )?;
    if changed == 0 {
        return Err(Error::NotFound(id));
    }
    info!(owner, id, "transaction updated");
    get_transaction(conn, owner, id)
}

pub fn delete_transaction(conn: &Connection, owner: i64, id: i64) -> Result<()> {
    let changed = conn.execute(
        "DELETE FROM transactions WHERE id=?1 AND user_id=?2",
        params![id, owner],
    )?;
    if changed == 0 {
        return Err(Error::NotFound(id));
    }
    info!(owner, id, "transaction deleted");
    Ok(())
}
