// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::locale::Locale;
use crate::utils::{get_locale, set_locale};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("locale", sub)) => match sub.get_one::<String>("value") {
            Some(v) => {
                let locale = v.parse::<Locale>()?;
                set_locale(conn, locale)?;
                println!("Locale set to {}", locale);
            }
            None => println!("{}", get_locale(conn)?),
        },
        _ => {}
    }
    Ok(())
}
