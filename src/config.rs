// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use crate::db;

/// Overrides the database location when `--db` is not given.
pub const DB_ENV: &str = "POCKETBOOK_DB";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub verbose: bool,
}

impl Config {
    /// Precedence: `--db`, then `$POCKETBOOK_DB`, then the platform data dir.
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let db_path = match m.get_one::<String>("db") {
            Some(p) => PathBuf::from(p),
            None => match std::env::var_os(DB_ENV) {
                Some(p) if !p.is_empty() => PathBuf::from(p),
                _ => db::default_db_path()?,
            },
        };
        Ok(Self {
            db_path,
            verbose: m.get_flag("verbose"),
        })
    }

    /// `RUST_LOG` wins; otherwise `warn`, or `debug` with `-v`.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "pocketbook=debug"
        } else {
            "warn"
        }
    }
}
