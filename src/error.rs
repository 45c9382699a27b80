// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Error types shared by the ledger, store and auth layers.

use thiserror::Error;

/// Why an entry was refused before it reached the database.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Description must not be empty")]
    EmptyDescription,

    #[error("Category must not be empty")]
    EmptyCategory,

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Amount must not be negative, got '{0}'")]
    NegativeAmount(String),

    #[error("Amount '{0}' exceeds the maximum of 1000000000000")]
    AmountTooLarge(String),
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email address '{0}'")]
    InvalidEmail(String),

    #[error("Password should be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("User already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("Not signed in (run `pocketbook auth login`)")]
    NotSignedIn,

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Transaction {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
