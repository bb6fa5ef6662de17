use serde::{Deserialize, Serialize};

use contaflow_core::DomainError;

/// Strip everything except digits and the check letter, lower-casing `K`.
///
/// The caller may hand us any punctuation style (`12.345.678-5`, `12345678-5`,
/// `123456785`); validation and formatting must not depend on it.
fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, 'k' | 'K'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Compute the expected check character for a numeric body.
///
/// Weighted modulo-11 sum: walking the body from its last digit to its first,
/// the multiplier cycles 2, 3, 4, 5, 6, 7, 2, 3, ... Remainder 0 maps to `'0'`,
/// remainder 1 to `'k'`, anything else to the digit `11 - remainder`.
///
/// Returns `None` if the body contains a non-digit character.
fn expected_check_char(body: &str) -> Option<char> {
    let mut sum: u32 = 0;
    let mut factor: u32 = 2;
    for ch in body.chars().rev() {
        sum += ch.to_digit(10)? * factor;
        factor = if factor == 7 { 2 } else { factor + 1 };
    }
    Some(match sum % 11 {
        0 => '0',
        1 => 'k',
        r => (b'0' + (11 - r) as u8) as char,
    })
}

/// Whether `raw` is a structurally and arithmetically valid RUT.
///
/// Accepts any punctuation; only the digits and check character matter. Never
/// panics: malformed input simply returns `false`.
pub fn is_valid(raw: &str) -> bool {
    let cleaned = clean(raw);
    if cleaned.len() != 8 && cleaned.len() != 9 {
        return false;
    }
    let (body, check) = cleaned.split_at(cleaned.len() - 1);
    match (expected_check_char(body), check.chars().next()) {
        (Some(expected), Some(found)) => expected == found,
        _ => false,
    }
}

/// Canonical display form: dot-grouped body, hyphen, upper-cased check char.
///
/// Formatting is visual only and does not imply validity. Input whose cleaned
/// length is below 8 does not look like a RUT and is returned unchanged.
pub fn format(raw: &str) -> String {
    let cleaned = clean(raw);
    if cleaned.len() < 8 {
        return raw.to_string();
    }
    let (body, check) = cleaned.split_at(cleaned.len() - 1);

    let mut grouped = String::with_capacity(body.len() + body.len() / 3 + 2);
    for (i, ch) in body.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let body_grouped: String = grouped.chars().rev().collect();

    let mut out = body_grouped;
    out.push('-');
    out.push_str(&check.to_ascii_uppercase());
    out
}

/// A validated RUT, stored in cleaned form (digits + lower-case check char).
///
/// Construction goes through [`Rut::parse`], so holding a `Rut` is proof the
/// checksum passed. Compared by value; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rut {
    cleaned: String,
}

impl Rut {
    /// Parse and validate free-text input.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if !is_valid(raw) {
            return Err(DomainError::validation(std::format!(
                "invalid tax id '{}'",
                raw.trim()
            )));
        }
        Ok(Self { cleaned: clean(raw) })
    }

    /// Cleaned form: body digits immediately followed by the check char.
    ///
    /// This is the canonical key for equality and store lookups.
    pub fn as_cleaned(&self) -> &str {
        &self.cleaned
    }

    /// Numeric body (everything except the check character).
    pub fn body(&self) -> &str {
        &self.cleaned[..self.cleaned.len() - 1]
    }

    /// The check character, lower-cased.
    pub fn check_char(&self) -> char {
        // Invariant: parse guarantees a non-empty cleaned form.
        self.cleaned.chars().next_back().unwrap_or('0')
    }

    /// Display form, e.g. `12.345.678-5`.
    pub fn formatted(&self) -> String {
        format(&self.cleaned)
    }
}

impl core::fmt::Display for Rut {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl TryFrom<String> for Rut {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rut::parse(&value)
    }
}

impl From<Rut> for String {
    fn from(value: Rut) -> Self {
        value.cleaned
    }
}
