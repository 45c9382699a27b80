// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::error::Error;
use crate::models::{MonthKey, TxKind};

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_PT: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Display locale for labels, dates and export headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    EnUs,
    PtBr,
}

impl Locale {
    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::PtBr => "pt-BR",
        }
    }

    /// `month` is 1-based; out-of-range values yield an empty name.
    pub fn month_name(self, month: u32) -> &'static str {
        let names = match self {
            Locale::EnUs => &MONTHS_EN,
            Locale::PtBr => &MONTHS_PT,
        };
        month
            .checked_sub(1)
            .and_then(|i| names.get(i as usize))
            .copied()
            .unwrap_or("")
    }

    pub fn month_label(self, key: MonthKey) -> String {
        match self {
            Locale::EnUs => format!("{} {}", self.month_name(key.month), key.year),
            Locale::PtBr => format!("{} de {}", self.month_name(key.month), key.year),
        }
    }

    pub fn format_date(self, date: NaiveDate) -> String {
        match self {
            Locale::EnUs => format!("{:02}/{:02}/{}", date.month(), date.day(), date.year()),
            Locale::PtBr => format!("{:02}/{:02}/{}", date.day(), date.month(), date.year()),
        }
    }

    pub fn kind_label(self, kind: TxKind) -> &'static str {
        match (self, kind) {
            (Locale::EnUs, TxKind::Income) => "Income",
            (Locale::EnUs, TxKind::Expense) => "Expense",
            (Locale::PtBr, TxKind::Income) => "Receita",
            (Locale::PtBr, TxKind::Expense) => "Despesa",
        }
    }

    pub fn csv_headers(self) -> [&'static str; 5] {
        match self {
            Locale::EnUs => ["Date", "Description", "Category", "Amount", "Type"],
            Locale::PtBr => ["Data", "Descrição", "Categoria", "Valor", "Tipo"],
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" => Ok(Locale::EnUs),
            "pt" | "pt-br" => Ok(Locale::PtBr),
            other => Err(Error::InvalidData(format!(
                "Unsupported locale '{}' (use en-US|pt-BR)",
                other
            ))),
        }
    }
}
