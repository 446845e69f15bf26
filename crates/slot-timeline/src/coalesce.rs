//! Merge runs of adjacent intervals that carry the same value.

use crate::interval::Interval;

/// Collapse each run of consecutive intervals for which `same` holds into one
/// interval spanning the run. Sequences of length 0 or 1 come back unchanged.
///
/// Only neighbours are compared; the input is assumed to be ordered by start.
pub fn coalesce<V, F>(intervals: Vec<Interval<V>>, same: F) -> Vec<Interval<V>>
where
    F: Fn(&V, &V) -> bool,
{
    if intervals.len() < 2 {
        return intervals;
    }

    let mut merged: Vec<Interval<V>> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        if let Some(last) = merged.last_mut() {
            if same(&last.value, &interval.value) {
                last.end = interval.end;
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn merges_runs_of_equal_values() {
        let raw = vec![
            Interval::new(at(0), at(2), 1),
            Interval::new(at(2), at(4), 1),
            Interval::new(at(4), at(6), 2),
            Interval::new(at(6), at(8), 1),
            Interval::new(at(8), at(9), 1),
        ];
        let merged = coalesce(raw, |a, b| a == b);
        assert_eq!(
            merged,
            vec![
                Interval::new(at(0), at(4), 1),
                Interval::new(at(4), at(6), 2),
                Interval::new(at(6), at(9), 1),
            ]
        );
    }

    #[test]
    fn short_inputs_pass_through() {
        let empty: Vec<Interval<u8>> = Vec::new();
        assert!(coalesce(empty, |a, b| a == b).is_empty());

        let single = vec![Interval::new(at(1), at(2), 'x')];
        assert_eq!(coalesce(single.clone(), |a, b| a == b), single);
    }

    #[test]
    fn uses_supplied_equality() {
        // Treat every value as the same: the whole run collapses.
        let raw = vec![
            Interval::new(at(0), at(1), 10),
            Interval::new(at(1), at(2), 20),
            Interval::new(at(2), at(3), 30),
        ];
        let merged = coalesce(raw, |_, _| true);
        assert_eq!(merged, vec![Interval::new(at(0), at(3), 10)]);
    }
}
