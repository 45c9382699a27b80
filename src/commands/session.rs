// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::auth;
use crate::utils::arg;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("signup", sub)) => {
            let user = auth::sign_up(conn, arg(sub, "email")?, arg(sub, "password")?)?;
            println!(
                "Account created for {}. Sign in with `pocketbook auth login`.",
                user.email
            );
        }
        Some(("login", sub)) => {
            let user = auth::sign_in(conn, arg(sub, "email")?, arg(sub, "password")?)?;
            println!("Signed in as {}", user.email);
        }
        Some(("logout", _)) => {
            auth::sign_out(conn)?;
            println!("Signed out");
        }
        Some(("whoami", _)) => match auth::current_user(conn)? {
            Some(user) => println!("{} (id {})", user.email, user.id),
            None => println!("Not signed in"),
        },
        _ => {}
    }
    Ok(())
}
