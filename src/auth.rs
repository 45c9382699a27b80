// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Local accounts and the persisted sign-in session.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::error::{AuthError, Result};
use crate::models::User;
use crate::utils::{clear_setting, get_setting, set_setting};

pub const MIN_PASSWORD_LEN: usize = 6;
const SESSION_KEY: &str = "session_user_id";

fn normalize_email(email: &str) -> std::result::Result<String, AuthError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AuthError::InvalidEmail(email)),
    }
}

/// Registers a new account. Does not sign in.
pub fn sign_up(conn: &Connection, email: &str, password: &str) -> Result<User> {
    let email = normalize_email(email)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::PasswordTooShort(MIN_PASSWORD_LEN).into());
    }
    let existing: Option<i64> = conn
        .query_row(
            "SELECT id FROM users WHERE email=?1",
            params![email],
            |r| r.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Err(AuthError::EmailTaken(email).into());
    }

    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(AuthError::Hash)?;
    conn.execute(
        "INSERT INTO users(email, password_hash) VALUES (?1, ?2)",
        params![email, hash],
    )?;
    let id = conn.last_insert_rowid();
    info!(user_id = id, "account created");
    Ok(User { id, email })
}

pub fn sign_in(conn: &Connection, email: &str, password: &str) -> Result<User> {
    let email = email.trim().to_lowercase();
    let row: Option<(i64, String)> = conn
        .query_row(
            "SELECT id, password_hash FROM users WHERE email=?1",
            params![email],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    let Some((id, hash)) = row else {
        warn!("sign-in for unknown email");
        return Err(AuthError::InvalidCredentials.into());
    };
    if !bcrypt::verify(password, &hash).map_err(AuthError::Hash)? {
        warn!(user_id = id, "sign-in with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    set_setting(conn, SESSION_KEY, &id.to_string())?;
    info!(user_id = id, "signed in");
    Ok(User { id, email })
}

pub fn sign_out(conn: &Connection) -> Result<()> {
    clear_setting(conn, SESSION_KEY)?;
    debug!("session cleared");
    Ok(())
}

/// The signed-in user, if the session still points at an existing account.
pub fn current_user(conn: &Connection) -> Result<Option<User>> {
    let Some(raw) = get_setting(conn, SESSION_KEY)? else {
        return Ok(None);
    };
    let Ok(id) = raw.parse::<i64>() else {
        warn!(value = %raw, "ignoring malformed session");
        return Ok(None);
    };
    let user = conn
        .query_row(
            "SELECT id, email FROM users WHERE id=?1",
            params![id],
            |r| {
                Ok(User {
                    id: r.get(0)?,
                    email: r.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(user)
}

pub fn require_user(conn: &Connection) -> Result<User> {
    current_user(conn)?.ok_or_else(|| AuthError::NotSignedIn.into())
}
