use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::RecurrenceUnit;

/// A derived, half-open `[start, now)` budget window.
///
/// `end` is always the reference instant the period was resolved against,
/// never the natural end of the calendar unit. Periods are recomputed on
/// every query and never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Period {
    /// Resolves the current period for `unit` relative to `reference`.
    ///
    /// Daily, weekly, and monthly align to the enclosing calendar
    /// boundary (weeks are Sunday-anchored). An unspecified unit falls
    /// back to a rolling 7-day lookback with no calendar alignment.
    pub fn resolve(unit: RecurrenceUnit, reference: DateTime<Utc>) -> Period {
        let start = match unit {
            RecurrenceUnit::Daily => midnight_of(reference),
            RecurrenceUnit::Weekly => {
                let into_week = reference.weekday().num_days_from_sunday() as i64;
                midnight_of(reference) - Duration::days(into_week)
            }
            RecurrenceUnit::Monthly => {
                let first = reference.date_naive().with_day(1).unwrap();
                first.and_hms_opt(0, 0, 0).unwrap().and_utc()
            }
            RecurrenceUnit::Unspecified => reference - Duration::days(7),
        };
        Period {
            start,
            end: reference,
        }
    }

    /// Resolves the trailing window of `days` ending at `reference`,
    /// independent of any recurrence unit.
    pub fn trailing_days(days: i64, reference: DateTime<Utc>) -> Period {
        Period {
            start: reference - Duration::days(days),
            end: reference,
        }
    }

    /// Period membership: `start <= instant < end`, with `start`
    /// inclusive so a transaction stamped exactly on the boundary counts.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

fn midnight_of(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}
