//! Chilean RUT (Rol Único Tributario) formatting and check-digit validation.
//!
//! A RUT is a number body followed by a modulo-11 verification character
//! (`0`-`9` or `k`). Users type it in any shape (`12345678-5`, `12.345.678-5`,
//! `123456785`), so every entry point first strips everything that is not a
//! digit or `k`/`K`.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const WEIGHTS: [u32; 6] = [2, 3, 4, 5, 6, 7];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RutError {
    #[error("RUT needs at least a number and a verification digit")]
    TooShort,

    #[error("RUT number contains a non-digit character '{0}'")]
    InvalidBody(char),

    #[error("RUT verification digit is '{found}', expected '{expected}'")]
    CheckDigitMismatch { expected: char, found: char },
}

/// Keeps only ASCII digits and `k`/`K`.
pub fn clean_rut(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'k' || *c == 'K')
        .collect()
}

/// Formats arbitrary input into `NN.NNN.NNN-D`.
///
/// Inputs with fewer than two qualifying characters come back stripped but
/// otherwise untouched, so the form field can be reformatted on every keystroke.
pub fn format_rut(input: &str) -> String {
    let clean = clean_rut(input);
    if clean.len() < 2 {
        return clean;
    }

    let (body, dv) = clean.split_at(clean.len() - 1);
    format!("{}-{}", group_thousands(body), dv)
}

/// Inserts a `.` before every position that is followed by a positive
/// multiple of three digits. Never before the first character.
fn group_thousands(body: &str) -> String {
    let chars: Vec<char> = body.chars().collect();
    let mut out = String::with_capacity(chars.len() + chars.len() / 3);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 {
            let run = chars[i..].iter().take_while(|c| c.is_ascii_digit()).count();
            if run > 0 && run % 3 == 0 {
                out.push('.');
            }
        }
        out.push(*c);
    }

    out
}

/// Computes the modulo-11 verification character for a number body, using
/// the storefront's rule: remainder `r` of the weighted sum maps to `r` when
/// `r < 2` and to `11 - r` otherwise.
///
/// Returns `None` when the body holds anything but ASCII digits.
pub fn check_digit(body: &str) -> Option<char> {
    let mut sum = 0u32;
    for (i, c) in body.chars().rev().enumerate() {
        let digit = c.to_digit(10)?;
        sum = (sum + digit * WEIGHTS[i % WEIGHTS.len()]) % 11;
    }

    // A remainder of 0 or 1 is used as-is, so `11 - r` stays within 1..=9
    // and this rule never produces `k`.
    let value = if sum < 2 { sum } else { 11 - sum };
    char::from_digit(value, 10)
}

/// Boolean check used by form validators. Malformed input and a wrong
/// verification digit both yield `false`; use [`parse_rut`] to tell them apart.
pub fn validate_rut(input: &str) -> bool {
    parse_rut(input).is_ok()
}

pub fn parse_rut(input: &str) -> Result<Rut, RutError> {
    let clean = clean_rut(input);
    if clean.len() < 2 {
        return Err(RutError::TooShort);
    }

    let (body, dv) = clean.split_at(clean.len() - 1);
    let found = dv.to_ascii_lowercase().chars().next().ok_or(RutError::TooShort)?;

    if let Some(bad) = body.chars().find(|c| !c.is_ascii_digit()) {
        return Err(RutError::InvalidBody(bad));
    }

    let expected = check_digit(body).ok_or(RutError::TooShort)?;
    if expected != found {
        return Err(RutError::CheckDigitMismatch { expected, found });
    }

    Ok(Rut {
        body: body.to_string(),
        dv: found,
    })
}

/// A RUT whose verification digit has been checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rut {
    body: String,
    dv: char,
}

impl Rut {
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn check_digit(&self) -> char {
        self.dv
    }

    /// Digits plus verification character with no separators, as the API expects it.
    pub fn compact(&self) -> String {
        format!("{}{}", self.body, self.dv)
    }

    pub fn formatted(&self) -> String {
        format_rut(&self.compact())
    }
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Rut {
    type Err = RutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rut(s)
    }
}
