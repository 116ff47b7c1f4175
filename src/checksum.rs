//! Weighted mod-11 checksum and result classification.

use crate::entry::AccountNumber;
use std::fmt;

/// Outcome of validating an account number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Checksum is divisible by 11.
    Valid,
    /// Checksum is not divisible by 11.
    Error,
    /// At least one digit could not be read.
    Illegible,
}

impl Status {
    /// Suffix written after the account number. Empty for valid numbers.
    pub fn marker(self) -> &'static str {
        match self {
            Status::Valid => "",
            Status::Error => "ERR",
            Status::Illegible => "ILL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Valid => "VALID",
            Status::Error => "ERR",
            Status::Illegible => "ILL",
        };
        f.write_str(name)
    }
}

/// Computes `sum(digit * weight) mod 11`, where the rightmost digit has
/// weight 1. Returns `None` if any character is not a decimal digit.
pub fn checksum(account: &str) -> Option<u32> {
    account
        .trim()
        .chars()
        .rev()
        .enumerate()
        .try_fold(0u32, |sum, (idx, c)| {
            let digit = c.to_digit(10)?;
            // weights repeat mod 11, so the sum is reduced at every step
            Some((sum + digit * ((idx % 11) as u32 + 1)) % 11)
        })
}

/// Classifies an account number string.
///
/// Illegibility wins: a `?` (or any non-digit) short-circuits to
/// [`Status::Illegible`] before the checksum is computed.
pub fn classify(account: &str) -> Status {
    match checksum(account) {
        None => Status::Illegible,
        Some(0) => Status::Valid,
        Some(_) => Status::Error,
    }
}

/// One decoded entry together with its status.
///
/// The status is always derived from the account number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    account: AccountNumber,
    status: Status,
}

impl ParseResult {
    pub fn new(account: AccountNumber) -> Self {
        let status = account.status();
        ParseResult { account, status }
    }

    pub fn account(&self) -> &AccountNumber {
        &self.account
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

/// Renders `"<account> <status>"` with no trailing space for valid numbers.
impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Status::Valid => write!(f, "{}", self.account),
            status => write!(f, "{} {}", self.account, status.marker()),
        }
    }
}
