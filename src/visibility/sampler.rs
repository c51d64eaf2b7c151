use chrono::{DateTime, Duration, Local, Timelike};

/// Sample instants for the start of each minute over the next
/// `duration_hours`, anchored at the current wall clock.
pub fn minute_instants(duration_hours: f64) -> Vec<DateTime<Local>> {
    minute_instants_from(Local::now(), duration_hours)
}

/// Explicit-anchor variant of [`minute_instants`].
///
/// The first sample is `anchor` truncated down to the start of its minute;
/// each following sample adds exactly one minute, for a total of
/// `floor(duration_hours * 60)` samples. A non-positive or non-finite
/// duration yields an empty sequence rather than an error.
pub fn minute_instants_from(anchor: DateTime<Local>, duration_hours: f64) -> Vec<DateTime<Local>> {
    let total_minutes = (duration_hours * 60.0).floor() as i64;
    if total_minutes <= 0 {
        return Vec::new();
    }

    let start = anchor
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(anchor);

    let mut instants = Vec::with_capacity(total_minutes as usize);
    let mut current = start;
    for _ in 0..total_minutes {
        instants.push(current);
        current += Duration::minutes(1);
    }
    instants
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn anchor_with_seconds() -> DateTime<Local> {
        // 2023-11-14 22:13:20.5 UTC, expressed in the local clock
        Utc.timestamp_opt(1_700_000_000, 500_000_000)
            .unwrap()
            .with_timezone(&Local)
    }

    #[test]
    fn first_sample_is_truncated_to_minute_start() {
        let anchor = anchor_with_seconds();
        let instants = minute_instants_from(anchor, 1.0);

        let first = instants[0];
        assert_eq!(first.second(), 0);
        assert_eq!(first.nanosecond(), 0);
        assert!(first <= anchor);
        assert!(anchor - first < Duration::minutes(1));
    }

    #[test]
    fn anchor_already_on_minute_boundary_is_kept() {
        let anchor = Utc
            .timestamp_opt(1_700_000_040, 0)
            .unwrap()
            .with_timezone(&Local);
        let instants = minute_instants_from(anchor, 0.5);
        assert_eq!(instants[0], anchor);
    }

    #[test]
    fn count_is_floor_of_duration_in_minutes() {
        let anchor = anchor_with_seconds();
        assert_eq!(minute_instants_from(anchor, 1.0).len(), 60);
        assert_eq!(minute_instants_from(anchor, 0.5).len(), 30);
        assert_eq!(minute_instants_from(anchor, 24.0).len(), 1440);
        // 90.5 minutes floors to 90 samples
        assert_eq!(minute_instants_from(anchor, 90.5 / 60.0).len(), 90);
    }

    #[test]
    fn spacing_is_exactly_one_minute() {
        let instants = minute_instants_from(anchor_with_seconds(), 2.0);
        for pair in instants.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::minutes(1));
        }
    }

    #[test]
    fn non_positive_duration_yields_empty_sequence() {
        let anchor = anchor_with_seconds();
        assert!(minute_instants_from(anchor, 0.0).is_empty());
        assert!(minute_instants_from(anchor, -3.0).is_empty());
        assert!(minute_instants_from(anchor, f64::NAN).is_empty());
    }
}
