//! Image version suffix comparison.
//!
//! Image references look like `registry/component:version-date-hour`, where
//! `version` is dot-separated integers with an optional leading `v`. The
//! comparator orders two suffixes by version, then date, then hour, and
//! degrades to [`VersionOrdering::Unknown`] on anything it cannot read.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which side of a comparison holds the newer version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersionOrdering {
    FileOneNewer,
    FileTwoNewer,
    /// Exact tie, or at least one side is malformed
    Unknown,
}

impl From<Ordering> for VersionOrdering {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Greater => VersionOrdering::FileOneNewer,
            Ordering::Less => VersionOrdering::FileTwoNewer,
            Ordering::Equal => VersionOrdering::Unknown,
        }
    }
}

/// A non-negative decimal integer of any width, kept as its digits.
///
/// Leading zeros are dropped on parse so that equal values hold equal
/// digits; zero is the empty digit string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Numeral<'a>(&'a str);

impl<'a> Numeral<'a> {
    /// `None` unless `raw` is one or more ASCII digits
    pub fn parse(raw: &'a str) -> Option<Self> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(raw.trim_start_matches('0')))
    }

    /// Canonical digits, `"0"` for zero
    pub fn digits(&self) -> &'a str {
        if self.0.is_empty() {
            "0"
        } else {
            self.0
        }
    }
}

impl Ord for Numeral<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(other.0))
    }
}

impl PartialOrd for Numeral<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A parsed `version-date-hour` suffix, borrowing from the image string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSuffix<'a> {
    pub components: Vec<Numeral<'a>>,
    pub date: Numeral<'a>,
    pub hour: Numeral<'a>,
}

impl<'a> VersionSuffix<'a> {
    /// Parse a suffix; `None` when it is not exactly three `-`-joined
    /// segments or any numeric part is not plain digits.
    pub fn parse(raw: &'a str) -> Option<Self> {
        let mut segments = raw.split('-');
        let (Some(version), Some(date), Some(hour), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return None;
        };

        let version = version.strip_prefix('v').unwrap_or(version);
        let components = version
            .split('.')
            .map(Numeral::parse)
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            components,
            date: Numeral::parse(date)?,
            hour: Numeral::parse(hour)?,
        })
    }

    /// Component-wise version comparison, shorter side padded with zeros,
    /// then date, then hour.
    pub fn cmp_release(&self, other: &Self) -> Ordering {
        fn component<'n>(parts: &[Numeral<'n>], i: usize) -> Numeral<'n> {
            parts.get(i).copied().unwrap_or_default()
        }

        let width = self.components.len().max(other.components.len());
        (0..width)
            .map(|i| component(&self.components, i).cmp(&component(&other.components, i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
            .then(self.date.cmp(&other.date))
            .then(self.hour.cmp(&other.hour))
    }
}

/// Compare the version suffixes of two images
///
/// Never fails: malformed input on either side, or a complete tie, is
/// reported as [`VersionOrdering::Unknown`].
pub fn compare_versions(file_1: &str, file_2: &str) -> VersionOrdering {
    match (VersionSuffix::parse(file_1), VersionSuffix::parse(file_2)) {
        (Some(a), Some(b)) => a.cmp_release(&b).into(),
        _ => VersionOrdering::Unknown,
    }
}

/// Split an image reference at its first `:`
///
/// Returns `(registry/component, suffix)`. A reference without `:` is all
/// prefix and has an empty suffix.
pub fn split_image(image: &str) -> (&str, &str) {
    image.split_once(':').unwrap_or((image, ""))
}
