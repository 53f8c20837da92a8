//! Rolling-window feature extraction.

use chrono::Duration;
use statrs::statistics::Statistics;

use super::RiskError;
use crate::config::defaults::EMPTY_WINDOW_DAYS_SINCE_LAST;
use crate::types::{FeatureVector, MaintenanceEvent};

/// Build the feature vector for `machine` from the full event history.
///
/// The reference point is the machine's most recent event. The window holds
/// the machine's events with `latest - window_days <= ts < latest`; the
/// reference event itself never enters it. An empty window yields zero
/// averages and `days_since_last = EMPTY_WINDOW_DAYS_SINCE_LAST`, whatever
/// the window length.
pub fn build_features(
    events: &[MaintenanceEvent],
    machine: &str,
    window_days: u32,
) -> Result<FeatureVector, RiskError> {
    let history: Vec<&MaintenanceEvent> = events.iter().filter(|e| e.machine == machine).collect();

    let latest = history
        .iter()
        .map(|e| e.failure_date)
        .max()
        .ok_or_else(|| RiskError::InsufficientHistory {
            machine: machine.to_string(),
        })?;
    let window_start = latest - Duration::days(i64::from(window_days));

    let window: Vec<&MaintenanceEvent> = history
        .into_iter()
        .filter(|e| e.failure_date >= window_start && e.failure_date < latest)
        .collect();

    let Some(newest_in_window) = window.iter().map(|e| e.failure_date).max() else {
        return Ok(FeatureVector {
            avg_downtime_7d: 0.0,
            avg_cost_7d: 0.0,
            avg_scrap_7d: 0.0,
            days_since_last: EMPTY_WINDOW_DAYS_SINCE_LAST,
        });
    };

    // Non-negative and at most window_days by construction
    let days_since_last = u32::try_from((latest - newest_in_window).num_days()).unwrap_or(0);

    Ok(FeatureVector {
        avg_downtime_7d: window.iter().map(|e| e.downtime_h).mean(),
        avg_cost_7d: window.iter().map(|e| e.cost_eur).mean(),
        avg_scrap_7d: window.iter().map(|e| e.scrap_units).mean(),
        days_since_last,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::ROLLING_WINDOW_DAYS;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap() + Duration::days(n)
    }

    fn event(machine: &str, at: DateTime<Utc>, downtime: f64, cost: f64, scrap: f64) -> MaintenanceEvent {
        MaintenanceEvent {
            machine: machine.to_string(),
            failure_date: at,
            downtime_h: downtime,
            cost_eur: cost,
            scrap_units: scrap,
        }
    }

    #[test]
    fn test_window_excludes_old_and_latest_events() {
        let events = vec![
            event("M1", day(0), 2.0, 100.0, 1.0),
            event("M1", day(3), 4.0, 200.0, 2.0),
            event("M1", day(10), 6.0, 300.0, 3.0),
        ];
        let f = build_features(&events, "M1", ROLLING_WINDOW_DAYS).unwrap();
        assert!((f.avg_downtime_7d - 4.0).abs() < 1e-9);
        assert!((f.avg_cost_7d - 200.0).abs() < 1e-9);
        assert!((f.avg_scrap_7d - 2.0).abs() < 1e-9);
        assert_eq!(f.days_since_last, 7);
    }

    #[test]
    fn test_single_event_uses_fallback() {
        let events = vec![event("M2", day(4), 9.0, 900.0, 9.0)];
        let f = build_features(&events, "M2", ROLLING_WINDOW_DAYS).unwrap();
        assert_eq!(f.avg_downtime_7d, 0.0);
        assert_eq!(f.avg_cost_7d, 0.0);
        assert_eq!(f.avg_scrap_7d, 0.0);
        assert_eq!(f.days_since_last, 7);
    }

    #[test]
    fn test_fallback_does_not_follow_window_length() {
        let single = vec![event("M2", day(4), 9.0, 900.0, 9.0)];
        assert_eq!(build_features(&single, "M2", 14).unwrap().days_since_last, 7);
        assert_eq!(build_features(&single, "M2", 3).unwrap().days_since_last, 7);

        // Previous event outside a 3-day window
        let sparse = vec![
            event("M1", day(0), 2.0, 100.0, 1.0),
            event("M1", day(5), 6.0, 300.0, 3.0),
        ];
        let f = build_features(&sparse, "M1", 3).unwrap();
        assert_eq!(f.avg_cost_7d, 0.0);
        assert_eq!(f.days_since_last, EMPTY_WINDOW_DAYS_SINCE_LAST);
    }

    #[test]
    fn test_unknown_machine_is_insufficient_history() {
        let events = vec![event("M1", day(0), 1.0, 1.0, 1.0)];
        assert_eq!(
            build_features(&events, "M9", ROLLING_WINDOW_DAYS),
            Err(RiskError::InsufficientHistory {
                machine: "M9".to_string()
            })
        );
        assert!(build_features(&[], "M1", ROLLING_WINDOW_DAYS).is_err());
    }

    #[test]
    fn test_other_machines_are_ignored() {
        let events = vec![
            event("M1", day(8), 2.0, 100.0, 1.0),
            event("M2", day(9), 50.0, 5000.0, 50.0),
            event("M1", day(10), 6.0, 300.0, 3.0),
        ];
        let f = build_features(&events, "M1", ROLLING_WINDOW_DAYS).unwrap();
        assert!((f.avg_downtime_7d - 2.0).abs() < 1e-9);
        assert_eq!(f.days_since_last, 2);
    }

    #[test]
    fn test_window_lower_bound_is_inclusive() {
        let events = vec![
            event("M1", day(3), 4.0, 40.0, 4.0),
            event("M1", day(10), 6.0, 300.0, 3.0),
        ];
        let f = build_features(&events, "M1", ROLLING_WINDOW_DAYS).unwrap();
        assert!((f.avg_downtime_7d - 4.0).abs() < 1e-9);
        assert_eq!(f.days_since_last, 7);
    }

    #[test]
    fn test_events_sharing_latest_timestamp_are_excluded() {
        let events = vec![
            event("M1", day(10), 100.0, 100.0, 100.0),
            event("M1", day(10), 6.0, 300.0, 3.0),
        ];
        let f = build_features(&events, "M1", ROLLING_WINDOW_DAYS).unwrap();
        assert_eq!(f.avg_downtime_7d, 0.0);
        assert_eq!(f.days_since_last, 7);
    }

    #[test]
    fn test_days_since_last_counts_whole_days() {
        let latest = day(10);
        let events = vec![
            event("M1", latest - Duration::hours(30), 1.0, 10.0, 0.0),
            event("M1", latest - Duration::hours(80), 3.0, 30.0, 2.0),
            event("M1", latest, 6.0, 300.0, 3.0),
        ];
        let f = build_features(&events, "M1", ROLLING_WINDOW_DAYS).unwrap();
        assert_eq!(f.days_since_last, 1);
        assert!((f.avg_downtime_7d - 2.0).abs() < 1e-9);
        assert!((f.avg_cost_7d - 20.0).abs() < 1e-9);
        assert!((f.avg_scrap_7d - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unsorted_history_is_handled() {
        let events = vec![
            event("M1", day(10), 6.0, 300.0, 3.0),
            event("M1", day(0), 2.0, 100.0, 1.0),
            event("M1", day(3), 4.0, 200.0, 2.0),
        ];
        let f = build_features(&events, "M1", ROLLING_WINDOW_DAYS).unwrap();
        assert!((f.avg_cost_7d - 200.0).abs() < 1e-9);
        assert_eq!(f.days_since_last, 7);
    }
}
