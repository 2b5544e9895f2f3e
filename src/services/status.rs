// src/services/status.rs

//! Per-category availability summaries.
//!
//! Turns the classified machines of one site into the one-sentence-per-
//! category summaries the voice assistant reads out. The wording matches
//! the messages users already hear, down to the unpluralized
//! "There is 1 washer available".

use crate::models::{Machine, SiteMachines};

/// One sentence per machine category, washers first.
///
/// A category with no machines at all contributes no sentence; the status
/// page always lists at least one of each, so this only happens on a
/// degenerate page and must not crash the request.
pub fn status_messages(machines: &SiteMachines) -> Vec<String> {
    [
        ("washer", machines.washers.as_slice()),
        ("dryer", machines.dryers.as_slice()),
    ]
    .into_iter()
    .filter_map(|(label, category)| category_message(label, category))
    .collect()
}

/// Join category sentences into one speech string.
pub fn speech(messages: &[String]) -> String {
    format!("{}.", messages.join(". "))
}

fn category_message(label: &str, machines: &[Machine]) -> Option<String> {
    if machines.is_empty() {
        return None;
    }

    let remaining: Vec<Option<u32>> = machines.iter().map(Machine::remaining_minutes).collect();
    let available = remaining.iter().filter(|r| r.is_none()).count();

    if available > 0 {
        let verb = if available == 1 { "is" } else { "are" };
        let plural = if available > 1 { "s" } else { "" };
        Some(format!(
            "There {verb} {available} {label}{plural} available"
        ))
    } else {
        // Nobody is free: report the soonest machine. Broken machines carry
        // the 3000-minute sentinel and can win this minimum, in which case
        // the sentence literally promises a washer in 3000 minutes. That
        // matches the long-standing behavior of the page.
        let shortest = remaining.iter().flatten().min().copied()?;
        let plural = if shortest == 1 { "" } else { "s" };
        Some(format!(
            "There is a {label} available in {shortest} minute{plural}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Machine, MachineKind, UNAVAILABLE_MINUTES};

    fn washer(status: &str, time: &str) -> Machine {
        Machine::new(MachineKind::Washer, "Washer 01", status, time)
    }

    fn dryer(status: &str, time: &str) -> Machine {
        Machine::new(MachineKind::Dryer, "Dryer 01", status, time)
    }

    #[test]
    fn counts_available_machines_per_category() {
        let machines = SiteMachines {
            washers: vec![washer("Available", "Available"), washer("End of cycle", "")],
            dryers: vec![dryer("In use", "5 min")],
        };

        let messages = status_messages(&machines);
        assert_eq!(
            messages,
            vec![
                "There are 2 washers available",
                "There is a dryer available in 5 minutes",
            ]
        );
    }

    #[test]
    fn single_available_machine_keeps_singular_noun() {
        let machines = SiteMachines {
            washers: vec![washer("Available", "Available")],
            dryers: vec![],
        };

        // Deliberately "1 washer", not "1 washers".
        assert_eq!(status_messages(&machines), vec!["There is 1 washer available"]);
    }

    #[test]
    fn one_minute_wait_uses_singular_minute() {
        let machines = SiteMachines {
            washers: vec![washer("In use", "1 min")],
            dryers: vec![],
        };

        assert_eq!(
            status_messages(&machines),
            vec!["There is a washer available in 1 minute"]
        );
    }

    #[test]
    fn busy_category_reports_the_soonest_machine() {
        let machines = SiteMachines {
            washers: vec![
                washer("In use", "23 min"),
                washer("In use", "7 min"),
                washer("Out of order", ""),
            ],
            dryers: vec![],
        };

        assert_eq!(
            status_messages(&machines),
            vec!["There is a washer available in 7 minutes"]
        );
    }

    #[test]
    fn all_broken_category_reports_the_sentinel_wait() {
        let machines = SiteMachines {
            washers: vec![washer("Out of order", ""), washer("Not online", "")],
            dryers: vec![],
        };

        assert_eq!(
            status_messages(&machines),
            vec![format!(
                "There is a washer available in {UNAVAILABLE_MINUTES} minutes"
            )]
        );
    }

    #[test]
    fn empty_category_emits_no_sentence() {
        let machines = SiteMachines {
            washers: vec![],
            dryers: vec![dryer("Available", "Available")],
        };

        assert_eq!(status_messages(&machines), vec!["There is 1 dryer available"]);
        assert!(status_messages(&SiteMachines::default()).is_empty());
    }

    #[test]
    fn speech_joins_with_periods() {
        let messages = vec![
            "There is 1 washer available".to_string(),
            "There are 2 dryers available".to_string(),
        ];
        assert_eq!(
            speech(&messages),
            "There is 1 washer available. There are 2 dryers available."
        );
    }
}
