use std::fmt;

use serde::{Deserialize, Serialize};

/// Rendered value for listings reported as open around the clock.
pub const ALWAYS_OPEN: &str = "24/7";

const DAY_NAMES: &[(&str, &str)] = &[
    ("Mo", "Mon"),
    ("Tu", "Tue"),
    ("We", "Wed"),
    ("Th", "Thu"),
    ("Fr", "Fri"),
    ("Sa", "Sat"),
    ("Su", "Sun"),
];

/// Locale-dependent inputs of the hours normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoursLocale {
    /// Substring of the status label that means "open 24 hours".
    /// Matched case-insensitively.
    pub round_the_clock_marker: String,
}

impl Default for HoursLocale {
    fn default() -> Self {
        Self {
            round_the_clock_marker: "круглосуточ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayHours {
    pub day: String,
    pub hours: String,
}

/// Canonical opening-hours schedule of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    AlwaysOpen,
    /// Every entry shares the same hours. `first_day`/`last_day` are the first
    /// and last entries in source order, not a calendar range.
    Uniform {
        first_day: String,
        last_day: String,
        hours: String,
    },
    PerDay(Vec<DayHours>),
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::AlwaysOpen => f.write_str(ALWAYS_OPEN),
            Schedule::Uniform {
                first_day,
                last_day,
                hours,
            } => write!(f, "{first_day}–{last_day} {hours}"),
            Schedule::PerDay(days) => {
                for (idx, entry) in days.iter().enumerate() {
                    if idx > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{} {}", entry.day, entry.hours)?;
                }
                Ok(())
            }
        }
    }
}

/// Normalizes raw opening-hours data into a [`Schedule`].
///
/// A status label containing the round-the-clock marker wins over any
/// structured entries. Otherwise each entry must split into exactly two
/// whitespace-separated tokens `(day, hours)`; anything else is dropped.
/// Returns `None` when no usable entry remains.
pub fn normalize_hours<S: AsRef<str>>(
    status_text: Option<&str>,
    entries: &[S],
    locale: &HoursLocale,
) -> Option<Schedule> {
    if let Some(status) = status_text {
        let marker = locale.round_the_clock_marker.to_lowercase();
        if !marker.is_empty() && status.to_lowercase().contains(&marker) {
            return Some(Schedule::AlwaysOpen);
        }
    }

    let parsed: Vec<DayHours> = entries.iter().filter_map(|e| parse_entry(e.as_ref())).collect();
    let (first, last) = match (parsed.first(), parsed.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return None,
    };

    if parsed.iter().all(|entry| entry.hours == first.hours) {
        return Some(Schedule::Uniform {
            first_day: first.day.clone(),
            last_day: last.day.clone(),
            hours: first.hours.clone(),
        });
    }

    Some(Schedule::PerDay(parsed))
}

fn parse_entry(raw: &str) -> Option<DayHours> {
    let mut tokens = raw.split_whitespace();
    let day = tokens.next()?;
    let hours = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    Some(DayHours {
        day: day_name(day).to_string(),
        hours: hours.to_string(),
    })
}

fn day_name(token: &str) -> &str {
    DAY_NAMES
        .iter()
        .find(|(short, _)| *short == token)
        .map(|(_, name)| *name)
        .unwrap_or(token)
}
