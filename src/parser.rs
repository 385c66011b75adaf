use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike, Weekday};

use crate::error::ParseError;

/// One requested reservation: a weekday plus a wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotTarget {
    pub day: Weekday,
    pub time: NaiveTime,
}

impl SlotTarget {
    pub fn new(day: Weekday, time: NaiveTime) -> Self {
        SlotTarget { day, time }
    }
}

impl fmt::Display for SlotTarget {
    /// Formats as the spec/ledger token, e.g. `Sun_8am` or `Tue_5:30pm`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.day, format_time_token(self.time))
    }
}

impl FromStr for SlotTarget {
    type Err = ParseError;

    /// Parses a single `<day>_<time>` token as used in ledger lines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split from the right so times like "5:30pm" keep their colon intact
        let (day_str, time_str) = s
            .trim()
            .rsplit_once('_')
            .ok_or_else(|| ParseError::MissingTimes(s.trim().to_string()))?;
        let day = parse_day_token(day_str)?;
        let time = parse_time_token(time_str)
            .ok_or_else(|| ParseError::InvalidTime(time_str.to_string()))?;
        Ok(SlotTarget { day, time })
    }
}

/// Parses the BOOKING_SLOTS spec string into targets.
///
/// Format: comma-separated groups, each `Day_time1_time2_...`.
/// Example: `"Sun_8am_8:30am_9am,Tue_5pm_5:30pm"`.
///
/// Each group expands to one target per time token, all on that group's day.
/// The same day may appear in multiple groups; the resulting targets are kept
/// independent (ledger-based dedup happens at booking time, not here).
/// An empty or blank spec yields an empty vec.
pub fn parse_booking_slots(spec: &str) -> Result<Vec<SlotTarget>, ParseError> {
    let mut targets = Vec::new();
    for group in spec.split(',') {
        let group = group.trim();
        if group.is_empty() {
            continue;
        }
        let mut parts = group.split('_');
        // split always yields at least one part for a non-empty string
        let day_str = parts.next().unwrap_or_default();
        let day = parse_day_token(day_str)?;
        let mut group_times = 0;
        for time_str in parts {
            let time = parse_time_token(time_str)
                .ok_or_else(|| ParseError::InvalidTime(time_str.to_string()))?;
            targets.push(SlotTarget { day, time });
            group_times += 1;
        }
        if group_times == 0 {
            return Err(ParseError::MissingTimes(group.to_string()));
        }
    }
    Ok(targets)
}

/// Parses a weekday abbreviation like "Sun" or "Tue".
fn parse_day_token(token: &str) -> Result<Weekday, ParseError> {
    token
        .trim()
        .parse::<Weekday>()
        .map_err(|_| ParseError::UnknownDay(token.trim().to_string()))
}

/// Parses a 12-hour time token ("8am", "5:30pm") to a wall-clock time.
/// Hour must be 1-12 with a required am/pm suffix; minutes are optional
/// and must be two digits when present. Returns None on anything else.
fn parse_time_token(token: &str) -> Option<NaiveTime> {
    let lower = token.trim().to_ascii_lowercase();
    let (body, is_pm) = if let Some(rest) = lower.strip_suffix("am") {
        (rest, false)
    } else if let Some(rest) = lower.strip_suffix("pm") {
        (rest, true)
    } else {
        return None;
    };

    let (hour_str, minute) = match body.split_once(':') {
        Some((h, m)) => {
            if m.len() != 2 {
                return None;
            }
            (h, m.parse::<u32>().ok()?)
        }
        None => (body, 0),
    };

    let hour12: u32 = hour_str.parse().ok()?;
    if !(1..=12).contains(&hour12) || minute >= 60 {
        return None;
    }

    // 12am is midnight, 12pm is noon
    let hour = match (hour12, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Formats a wall-clock time back to the 12-hour spec token.
/// The minute part is omitted when zero, matching the input vocabulary.
pub fn format_time_token(time: NaiveTime) -> String {
    let (is_pm, hour12) = time.hour12();
    let suffix = if is_pm { "pm" } else { "am" };
    if time.minute() == 0 {
        format!("{}{}", hour12, suffix)
    } else {
        format!("{}:{:02}{}", hour12, time.minute(), suffix)
    }
}
