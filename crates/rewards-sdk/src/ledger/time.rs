//! Calendar-month windows in the caller's time zone, expressed as UTC
//! instants so they compare directly against transaction timestamps.

use chrono::{DateTime, Datelike, Duration, LocalResult, Months, NaiveDate, TimeZone, Utc};

/// Inclusive `[from, to]` range of instants
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// From the distant past up to `to`
    pub fn until(to: DateTime<Utc>) -> Self {
        Self::new(DateTime::<Utc>::MIN_UTC, to)
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.from <= *instant && *instant <= self.to
    }
}

pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let first = first_day_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .map(|next| next.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}

/// Start of `date` in `tz`. When midnight does not exist (DST gap) the
/// earliest instant of that day is used.
pub fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Walk forward until the gap ends
            (1..=24 * 4)
                .filter_map(|quarter| {
                    let shifted = naive + Duration::minutes(15 * quarter);
                    tz.from_local_datetime(&shifted).earliest()
                })
                .next()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
        }
    }
}

/// The calendar month containing `date`, as seen in `tz`
pub fn month_containing<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateRange {
    let first = first_day_of_month(date);
    let from = local_midnight(tz, first);
    let to = match first.checked_add_months(Months::new(1)) {
        Some(next) => local_midnight(tz, next) - Duration::nanoseconds(1),
        None => DateTime::<Utc>::MAX_UTC,
    };
    DateRange::new(from, to)
}

pub fn this_month<Tz: TimeZone>(now: &DateTime<Tz>) -> DateRange {
    month_containing(&now.timezone(), now.date_naive())
}

pub fn previous_month<Tz: TimeZone>(now: &DateTime<Tz>) -> DateRange {
    let first = first_day_of_month(now.date_naive());
    let previous = first.checked_sub_months(Months::new(1)).unwrap_or(first);
    month_containing(&now.timezone(), previous)
}
