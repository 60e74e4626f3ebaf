//! Locale collation for category and display-name ordering
//!
//! Ordering goes through an ICU collator at secondary strength, so accents
//! are significant and case is not. Group keys use plain case folding.

use std::cmp::Ordering;
use std::fmt;

use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::Locale;
use tracing::debug;

use crate::config::LocaleConfig;

/// Case-insensitive ordering for one locale
pub struct Collation {
    collator: Option<Collator>,
}

impl Collation {
    /// Build a collator for the configured language.
    ///
    /// An unparseable tag or missing collation data falls back to
    /// case-folded code point order.
    #[must_use]
    pub fn new(locale: &LocaleConfig) -> Self {
        let mut options = CollatorOptions::new();
        options.strength = Some(Strength::Secondary);

        let collator = match locale.language.parse::<Locale>() {
            Ok(tag) => match Collator::try_new(&(&tag).into(), options) {
                Ok(collator) => Some(collator),
                Err(err) => {
                    debug!(language = %locale.language, %err, "no collation data, using case folding");
                    None
                }
            },
            Err(err) => {
                debug!(language = %locale.language, %err, "invalid language tag, using case folding");
                None
            }
        };
        Self { collator }
    }

    /// Compare two strings ignoring case
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => compare_ignore_case(a, b),
        }
    }

    /// Whether a real collator is in use
    #[must_use]
    pub fn is_localized(&self) -> bool {
        self.collator.is_some()
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::new(&LocaleConfig::default())
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation")
            .field("localized", &self.is_localized())
            .finish()
    }
}

/// Compare two strings by case-folded code points.
///
/// Characters are folded to lowercase one by one so no intermediate strings
/// are allocated. Strings that differ only in case compare equal.
#[must_use]
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars().flat_map(char::to_lowercase).cmp(b.chars().flat_map(char::to_lowercase))
}

/// Check two strings for equality ignoring case
#[must_use]
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    compare_ignore_case(a, b) == Ordering::Equal
}
