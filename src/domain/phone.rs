use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::validation::ValidationError;

/// Country code substituted for a national leading `0` (Uganda).
pub const DEFAULT_COUNTRY_CODE: &str = "256";

// Optional `+`, then a national `0` or a 3-digit country code, then 9 subscriber digits.
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?(0|[0-9]{3})[0-9]{9}$").expect("phone number pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Canonical recipient number: country code followed by 9 digits, no `+`, no separators.
///
/// The only way to obtain one is [`PhoneNumber::parse`] (or [`normalize_numbers`]),
/// so every value upholds the canonical form.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// JSON field name used in `msgdata` entries (`number`).
    pub const FIELD: &'static str = "number";

    /// Validate and canonicalize a single raw number.
    ///
    /// Whitespace and dashes are removed first. `0712345678` becomes
    /// `256712345678`, `+256712345678` becomes `256712345678`, and an already
    /// canonical number is returned unchanged.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, ValidationError> {
        let input = input.as_ref();
        if input.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let cleaned: String = input
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();

        if !NUMBER_PATTERN.is_match(&cleaned) {
            return Err(ValidationError::InvalidPhoneNumber { input: cleaned });
        }

        let digits = cleaned.strip_prefix('+').unwrap_or(&cleaned);
        // Only the 10-digit national form carries a trunk `0`.
        let canonical = match digits.strip_prefix('0') {
            Some(national) if national.len() == 9 => format!("{DEFAULT_COUNTRY_CODE}{national}"),
            _ => digits.to_owned(),
        };

        Ok(Self(canonical))
    }

    /// Borrow the canonical digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalize a batch of raw numbers, dropping invalid entries and duplicates.
///
/// Rejected entries are reported through `tracing` and skipped; they never fail the
/// batch. The result is sorted, and an empty result means there is nothing to send.
pub fn normalize_numbers<I, S>(raw: I) -> Vec<PhoneNumber>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut cleansed = BTreeSet::new();
    for entry in raw {
        match PhoneNumber::parse(entry.as_ref()) {
            Ok(number) => {
                cleansed.insert(number);
            }
            Err(ValidationError::InvalidPhoneNumber { input }) => {
                tracing::warn!(number = %input, "skipping invalid phone number");
            }
            Err(_) => {
                tracing::warn!("skipping empty phone number");
            }
        }
    }
    cleansed.into_iter().collect()
}
