// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, ValidationError};
use crate::ledger::validate_entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(Error::InvalidData(format!(
                "Unknown transaction type '{}' (use income|expense)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub owner_id: i64,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub date: DateTime<Utc>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A create/edit payload that has already passed [`validate_entry`].
///
/// The fields are private so the store can only ever receive checked input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    description: String,
    category: String,
    amount: Decimal,
    kind: TxKind,
}

impl NewTransaction {
    pub fn parse(
        description: &str,
        category: &str,
        raw_amount: &str,
        kind: TxKind,
    ) -> Result<Self, ValidationError> {
        let amount = validate_entry(description, category, raw_amount, kind)?;
        Ok(Self {
            description: description.trim().to_string(),
            category: category.trim().to_string(),
            amount,
            kind,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Signed amount: negative for expenses.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> TxKind {
        self.kind
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// Time range applied to the transaction list for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PeriodSelector {
    #[default]
    All,
    Day,
    Week,
    Month,
    Year,
    /// `month` is 1-based.
    Specific { month: u32, year: i32 },
}

impl PeriodSelector {
    /// Builds a selector from CLI-style arguments. `specific` needs both
    /// `month` (1..=12) and `year`; the other periods ignore them.
    pub fn from_parts(
        period: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Self, Error> {
        match period.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(PeriodSelector::All),
            "day" => Ok(PeriodSelector::Day),
            "week" => Ok(PeriodSelector::Week),
            "month" => Ok(PeriodSelector::Month),
            "year" => Ok(PeriodSelector::Year),
            "specific" => {
                let month = month.ok_or_else(|| {
                    Error::InvalidData("Period 'specific' requires --month".into())
                })?;
                let year = year.ok_or_else(|| {
                    Error::InvalidData("Period 'specific' requires --year".into())
                })?;
                if !(1..=12).contains(&month) {
                    return Err(Error::InvalidData(format!(
                        "Invalid month {}, expected 1-12",
                        month
                    )));
                }
                Ok(PeriodSelector::Specific { month, year })
            }
            other => Err(Error::InvalidData(format!(
                "Unknown period '{}' (use all|day|week|month|year|specific)",
                other
            ))),
        }
    }
}

/// Calendar month used as the grouping key for summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32, // 1-12
}
