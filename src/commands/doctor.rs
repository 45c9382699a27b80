// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Rows of `[issue, detail]` for stored transactions that break the
/// record invariants.
pub fn find_issues(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT id, description, category, amount, type FROM transactions ORDER BY id",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let id: i64 = r.get(0)?;
        let description: String = r.get(1)?;
        let category: String = r.get(2)?;
        let amount: String = r.get(3)?;
        let kind: String = r.get(4)?;

        if description.trim().is_empty() {
            rows.push(vec!["blank_description".into(), format!("#{}", id)]);
        }
        if category.trim().is_empty() {
            rows.push(vec!["blank_category".into(), format!("#{}", id)]);
        }
        // 1) Sign must agree with type
        match amount.parse::<Decimal>() {
            Ok(a) => {
                let wrong_sign = match kind.as_str() {
                    "income" => a < Decimal::ZERO,
                    _ => a > Decimal::ZERO,
                };
                if wrong_sign {
                    rows.push(vec![
                        "sign_mismatch".into(),
                        format!("#{} {} {}", id, kind, amount),
                    ]);
                }
            }
            Err(_) => rows.push(vec!["bad_amount".into(), format!("#{} '{}'", id, amount)]),
        }
    }

    // 2) Transactions whose owner is gone
    let mut stmt2 = conn.prepare(
        "SELECT t.id FROM transactions t LEFT JOIN users u ON t.user_id=u.id WHERE u.id IS NULL",
    )?;
    let orphans = stmt2.query_map([], |r| r.get::<_, i64>(0))?;
    for id in orphans {
        rows.push(vec!["orphan_transaction".into(), format!("#{}", id?)]);
    }

    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = find_issues(conn)?;
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
