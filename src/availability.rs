//! Match schedule rows checked against a weekly availability
//!
//! Pairing tables carry one `tr[data-date]` per match. Each row's timestamp is
//! placed in a time zone, reduced to a weekday and a minute of the day, and
//! compared with that weekday's intervals. Both interval ends are inclusive.
//!
//! Availability is a JSON object keyed by lowercase weekday:
//!
//! ```json
//! { "monday": [{ "start": "08:00", "end": "20:00" }], "sunday": [] }
//! ```

use chrono::{DateTime, Datelike, NaiveDateTime, NaiveTime, TimeZone, Timelike, Weekday};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

lazy_static! {
    static ref DATED_ROW: Selector = Selector::parse("table tr[data-date]").unwrap();
    static ref DATE_CELL: Selector = Selector::parse("td.date").unwrap();
}

pub const DEFAULT_START: &str = "08:00";
pub const DEFAULT_END: &str = "20:00";

const DAYS: [(Weekday, &str, &str); 7] = [
    (Weekday::Mon, "monday", "Monday"),
    (Weekday::Tue, "tuesday", "Tuesday"),
    (Weekday::Wed, "wednesday", "Wednesday"),
    (Weekday::Thu, "thursday", "Thursday"),
    (Weekday::Fri, "friday", "Friday"),
    (Weekday::Sat, "saturday", "Saturday"),
    (Weekday::Sun, "sunday", "Sunday"),
];

/// Lowercase key used in the availability object
pub fn day_key(day: Weekday) -> &'static str {
    DAYS[day.num_days_from_monday() as usize].1
}

pub fn day_name(day: Weekday) -> &'static str {
    DAYS[day.num_days_from_monday() as usize].2
}

/// "HH:MM" -> minutes since midnight
fn minutes(time: &str) -> Option<u32> {
    NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .ok()
        .map(|t| t.hour() * 60 + t.minute())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: String,
    pub end: String,
}

impl Interval {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Whether `minute` falls between start and end, both included.
    /// An interval with an unreadable time never matches.
    pub fn contains(&self, minute: u32) -> bool {
        match (minutes(&self.start), minutes(&self.end)) {
            (Some(start), Some(end)) => minute >= start && minute <= end,
            _ => {
                log::warn!("Ignoring malformed interval {}-{}", self.start, self.end);
                false
            }
        }
    }
}

/// Availability intervals per weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyAvailability {
    days: BTreeMap<String, Vec<Interval>>,
}

impl Default for WeeklyAvailability {
    /// 08:00 to 20:00 every day
    fn default() -> Self {
        let days = DAYS
            .iter()
            .map(|(_, key, _)| (key.to_string(), vec![Interval::new(DEFAULT_START, DEFAULT_END)]))
            .collect();
        Self { days }
    }
}

impl WeeklyAvailability {
    /// No availability on any day
    pub fn empty() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }

    pub fn set_day(&mut self, day: Weekday, intervals: Vec<Interval>) {
        self.days.insert(day_key(day).to_string(), intervals);
    }

    pub fn intervals(&self, day: Weekday) -> &[Interval] {
        self.days.get(day_key(day)).map(Vec::as_slice).unwrap_or(&[])
    }

    /// A day without intervals is never available
    pub fn is_available(&self, day: Weekday, minute_of_day: u32) -> bool {
        self.intervals(day).iter().any(|i| i.contains(minute_of_day))
    }
}

/// One dated row of a schedule table
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityRow {
    /// Raw `data-date` attribute
    pub date: String,
    pub weekday: Weekday,
    pub minute_of_day: u32,
    /// Text of the row's `td.date` cell, if any
    pub date_cell: Option<String>,
    pub in_range: bool,
}

impl AvailabilityRow {
    /// Date cell prefixed with the weekday name, e.g. "Wednesday 01/05 18:00"
    pub fn labelled_date(&self) -> String {
        match &self.date_cell {
            Some(text) => format!("{} {}", day_name(self.weekday), text),
            None => day_name(self.weekday).to_string(),
        }
    }
}

/// Read a `data-date` value in `tz`.
///
/// RFC 3339 timestamps are converted; timestamps without an offset are taken
/// as local to `tz`.
pub fn parse_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(tz));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| tz.from_local_datetime(&naive).earliest())
}

/// Check every dated row of every table on the page against `availability`.
/// Rows whose date cannot be read are skipped.
pub fn highlight_rows<Tz: TimeZone>(
    markup: &str,
    availability: &WeeklyAvailability,
    tz: &Tz,
) -> Vec<AvailabilityRow> {
    let document = Html::parse_document(markup);
    let mut rows = Vec::new();

    for row in document.select(&DATED_ROW) {
        let Some(date) = row.value().attr("data-date") else {
            continue;
        };
        let Some(when) = parse_date(date, tz) else {
            log::debug!("Skipping row with unreadable date: {}", date);
            continue;
        };

        let weekday = when.weekday();
        let minute_of_day = when.hour() * 60 + when.minute();
        let date_cell = row
            .select(&DATE_CELL)
            .next()
            .map(|cell| cell.text().collect::<String>().trim().to_string());

        rows.push(AvailabilityRow {
            date: date.to_string(),
            weekday,
            minute_of_day,
            date_cell,
            in_range: availability.is_available(weekday, minute_of_day),
        });
    }

    log::info!(
        "Checked {} dated rows, {} in range",
        rows.len(),
        rows.iter().filter(|r| r.in_range).count()
    );
    rows
}
