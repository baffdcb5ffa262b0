use crate::errors::GenerateError;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt};

pub const MIN_BIN_LENGTH: usize = 5;
pub const MAX_BIN_LENGTH: usize = 12;

/// A cleaned issuer prefix: ASCII digits only, 5 to 12 long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Bin(String);

impl Bin {
    /// Strips every non-digit character and checks the length bounds.
    pub fn parse(raw: &str) -> Result<Self, GenerateError> {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

        if digits.is_empty() {
            return Err(GenerateError::invalid_prefix(raw, "contains no digits"));
        }
        if !(MIN_BIN_LENGTH..=MAX_BIN_LENGTH).contains(&digits.len()) {
            return Err(GenerateError::invalid_prefix(
                raw,
                format!(
                    "must be {MIN_BIN_LENGTH}-{MAX_BIN_LENGTH} digits, got {}",
                    digits.len()
                ),
            ));
        }

        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Bin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What to do with entries that fail the length check during cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidBinPolicy {
    #[default]
    DropInvalid,
    RejectBatch,
}

/// Keeps order of first appearance and drops later duplicates.
pub fn dedup_bins(bins: impl IntoIterator<Item = Bin>) -> Vec<Bin> {
    let mut seen = HashSet::new();
    bins.into_iter()
        .filter(|bin| seen.insert(bin.clone()))
        .collect()
}

/// Cleans raw user input into a unique, order-preserving BIN list.
///
/// Entries with no digits at all (blank lines, separators) are skipped under
/// either policy. An empty result is an error.
pub fn clean_bins<I, S>(raw: I, policy: InvalidBinPolicy) -> Result<Vec<Bin>, GenerateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = Vec::new();

    for entry in raw {
        let entry = entry.as_ref();
        if !entry.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        match Bin::parse(entry) {
            Ok(bin) => parsed.push(bin),
            Err(err) => match policy {
                InvalidBinPolicy::DropInvalid => continue,
                InvalidBinPolicy::RejectBatch => return Err(err),
            },
        }
    }

    let cleaned = dedup_bins(parsed);
    if cleaned.is_empty() {
        return Err(GenerateError::invalid_prefix(
            "",
            format!("no valid BINs ({MIN_BIN_LENGTH}-{MAX_BIN_LENGTH} digits) supplied"),
        ));
    }

    Ok(cleaned)
}
