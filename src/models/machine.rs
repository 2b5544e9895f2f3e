// src/models/machine.rs

//! Laundry machine data structures and status classification.
//!
//! The status page reports each machine with a free-text status label and a
//! countdown cell. Classification maps that pair into an availability flag
//! plus a remaining-minutes estimate, substituting a large sentinel whenever
//! the page emits something we cannot read.

use std::fmt;

/// Status labels meaning the machine is free to use right now.
pub const COMPLETE_STATUSES: [&str; 2] = ["End of cycle", "Available"];

/// Status labels meaning the machine is broken or unreachable.
pub const BROKEN_STATUSES: [&str; 2] = ["Out of order", "Not online"];

/// Sentinel minute count for machines that are broken or whose countdown
/// text cannot be parsed. Large enough to never win a "soonest machine"
/// comparison against a real cycle.
pub const UNAVAILABLE_MINUTES: u32 = 3000;

/// Kind of laundry machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineKind {
    Washer,
    Dryer,
}

impl MachineKind {
    /// Parse the scraped `type` cell. Anything else is not a machine row.
    pub fn from_cell(text: &str) -> Option<Self> {
        match text.trim() {
            "Washer" => Some(Self::Washer),
            "Dryer" => Some(Self::Dryer),
            _ => None,
        }
    }

    /// Capitalized form, as the status page prints it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Washer => "Washer",
            Self::Dryer => "Dryer",
        }
    }

    /// Lowercase form used in spoken status sentences.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Washer => "washer",
            Self::Dryer => "dryer",
        }
    }
}

impl fmt::Display for MachineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One washer or dryer at one point in time.
///
/// Constructed fresh from scraped data on every request and never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct Machine {
    /// Washer or dryer
    pub kind: MachineKind,

    /// Display name from the page (e.g. "Washer 04")
    pub title: String,

    /// Status label as scraped (e.g. "Available", "23 min", "Out of order")
    pub status: String,

    /// Display time. Mirrors the status label when the time cell carried
    /// no digits, so callers never see an empty countdown.
    pub time: String,
}

impl Machine {
    /// Build a machine from the four scraped cell values.
    pub fn new(
        kind: MachineKind,
        title: impl Into<String>,
        status: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        let status = status.into();
        let time = time.into();
        let time = if time.chars().any(|c| c.is_ascii_digit()) {
            time
        } else {
            status.clone()
        };

        Self {
            kind,
            title: title.into(),
            status,
            time,
        }
    }

    /// Whether the machine is free to use right now.
    pub fn is_available(&self) -> bool {
        COMPLETE_STATUSES.contains(&self.status.as_str())
    }

    /// Minutes until this machine frees up.
    ///
    /// `None` means available now. Broken machines and unparsable countdown
    /// text both report [`UNAVAILABLE_MINUTES`]; the page occasionally emits
    /// text we have not seen before, and a degraded answer beats a failed
    /// request.
    pub fn remaining_minutes(&self) -> Option<u32> {
        if BROKEN_STATUSES.contains(&self.status.as_str()) {
            Some(UNAVAILABLE_MINUTES)
        } else if self.is_available() {
            None
        } else {
            Some(parse_leading_minutes(&self.time).unwrap_or(UNAVAILABLE_MINUTES))
        }
    }
}

impl fmt::Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}", self.kind, self.time, self.title)
    }
}

/// Parse a leading run of decimal digits as a minute count.
///
/// Returns `None` when the text does not start with a digit or the run
/// overflows; the caller decides what to substitute.
pub fn parse_leading_minutes(text: &str) -> Option<u32> {
    let digits: &str = {
        let end = text
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(text.len(), |(i, _)| i);
        &text[..end]
    };

    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// All machines at one site, already partitioned by kind.
///
/// The tagged buckets replace the original ordered-pair contract: status
/// sentences still come out washers first, but the caller can no longer
/// swap the categories by accident.
#[derive(Debug, Clone, Default)]
pub struct SiteMachines {
    pub washers: Vec<Machine>,
    pub dryers: Vec<Machine>,
}

impl SiteMachines {
    /// Iterate every machine, washers before dryers.
    pub fn all(&self) -> impl Iterator<Item = &Machine> {
        self.washers.iter().chain(self.dryers.iter())
    }

    /// Total machine count across both categories.
    pub fn len(&self) -> usize {
        self.washers.len() + self.dryers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.washers.is_empty() && self.dryers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(status: &str, time: &str) -> Machine {
        Machine::new(MachineKind::Washer, "Washer 01", status, time)
    }

    #[test]
    fn complete_statuses_are_available_regardless_of_time() {
        for status in COMPLETE_STATUSES {
            let m = machine(status, "17 min");
            assert!(m.is_available());
            assert_eq!(m.remaining_minutes(), None);
        }
    }

    #[test]
    fn broken_statuses_report_the_sentinel() {
        for status in BROKEN_STATUSES {
            let m = machine(status, "17 min");
            assert!(!m.is_available());
            assert_eq!(m.remaining_minutes(), Some(UNAVAILABLE_MINUTES));
        }
    }

    #[test]
    fn countdown_parses_leading_minutes() {
        let m = machine("23 min remaining", "17 min left");
        assert!(!m.is_available());
        assert_eq!(m.remaining_minutes(), Some(17));
    }

    #[test]
    fn garbage_countdown_falls_back_to_sentinel() {
        let m = machine("In use", "garbage");
        assert_eq!(m.remaining_minutes(), Some(UNAVAILABLE_MINUTES));
    }

    #[test]
    fn classification_is_idempotent() {
        let m = machine("In use", "5 min");
        assert_eq!(m.remaining_minutes(), m.remaining_minutes());
    }

    #[test]
    fn digitless_time_cell_mirrors_the_status() {
        let m = machine("Out of order", "");
        assert_eq!(m.time, "Out of order");

        // A countdown with digits is kept as-is.
        let m = machine("In use", "12 min");
        assert_eq!(m.time, "12 min");
    }

    #[test]
    fn parse_leading_minutes_cases() {
        assert_eq!(parse_leading_minutes("17 min left"), Some(17));
        assert_eq!(parse_leading_minutes("5"), Some(5));
        assert_eq!(parse_leading_minutes("min 5"), None);
        assert_eq!(parse_leading_minutes(""), None);
        assert_eq!(parse_leading_minutes("garbage"), None);
        assert_eq!(parse_leading_minutes("99999999999999999999 min"), None);
    }

    #[test]
    fn kind_from_cell() {
        assert_eq!(MachineKind::from_cell("Washer"), Some(MachineKind::Washer));
        assert_eq!(MachineKind::from_cell(" Dryer "), Some(MachineKind::Dryer));
        assert_eq!(MachineKind::from_cell("Stacked"), None);
    }

    #[test]
    fn display_format() {
        let m = machine("In use", "8 min");
        assert_eq!(m.to_string(), "Washer (8 min) - Washer 01");
    }
}
