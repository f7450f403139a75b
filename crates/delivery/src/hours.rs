//! # Working Hours
//!
//! Live open/closed status of a shop, derived from its weekly schedule and an explicit `now`.
//!
//! The weekday comes from the calendar date (`num_days_from_monday`) and is mapped to a
//! schedule key through [`WEEKDAY_KEYS`]. No locale-formatted day names are involved.
//!
//! Reads fail soft. A missing weekday or an unparsable `HH:MM` counts as closed for that day;
//! a malformed schedule never makes evaluation fail. Writes are strict: see
//! [`WeeklyHours::validate`].
//!
//! A window whose close time is earlier than its open time spans midnight: `18:00`–`02:00` on
//! Friday covers Friday evening and the first two hours of Saturday.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Schedule keys, indexed by `Weekday::num_days_from_monday`.
pub const WEEKDAY_KEYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Monday first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn weekday_key(day: Weekday) -> &'static str {
    WEEKDAY_KEYS[day.num_days_from_monday() as usize]
}

fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_monday() as usize]
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HoursError {
    #[error("Invalid time {value:?}: expected HH:MM")]
    InvalidTime { value: String },

    #[error("No schedule for {day}")]
    MissingDay { day: &'static str },

    #[error("Invalid {day} schedule: {source}")]
    InvalidDay {
        day: &'static str,
        source: Box<HoursError>,
    },
}

/// A wall-clock time with minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { minutes: 0 };

    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self {
                minutes: hour as u16 * 60 + minute as u16,
            })
        } else {
            None
        }
    }

    /// `now` truncated to the minute.
    pub fn from_datetime(now: NaiveDateTime) -> Self {
        Self {
            minutes: (now.hour() * 60 + now.minute()) as u16,
        }
    }

    pub const fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub const fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }
}

impl FromStr for ClockTime {
    type Err = HoursError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || HoursError::InvalidTime {
            value: s.to_string(),
        };
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if minute.len() != 2 || !digits(hour) || !digits(minute) {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// One day of a shop's schedule, as stored on the shop document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub open_time: String,
    pub close_time: String,
    #[serde(default)]
    pub is_closed: bool,
}

impl DaySchedule {
    pub fn open(open_time: impl Into<String>, close_time: impl Into<String>) -> Self {
        Self {
            open_time: open_time.into(),
            close_time: close_time.into(),
            is_closed: false,
        }
    }

    pub fn closed() -> Self {
        Self {
            open_time: "00:00".to_string(),
            close_time: "00:00".to_string(),
            is_closed: true,
        }
    }

    fn parse_window(&self) -> Result<OpenWindow, HoursError> {
        Ok(OpenWindow {
            open: self.open_time.parse()?,
            close: self.close_time.parse()?,
        })
    }

    /// The open window, or `None` if the day is closed or its times do not parse.
    pub fn window(&self) -> Option<OpenWindow> {
        if self.is_closed {
            return None;
        }
        match self.parse_window() {
            Ok(window) => Some(window),
            Err(e) => {
                warn!(error = %e, "Unreadable day schedule, treating as closed");
                None
            }
        }
    }
}

/// Parsed open/close pair of a day that is not closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenWindow {
    pub open: ClockTime,
    pub close: ClockTime,
}

impl OpenWindow {
    pub fn spans_midnight(&self) -> bool {
        self.close < self.open
    }

    /// Whether `time` falls in the part of the window that belongs to the opening day.
    /// Both bounds are inclusive.
    fn covers_same_day(&self, time: ClockTime) -> bool {
        if self.spans_midnight() {
            time >= self.open
        } else {
            self.open <= time && time <= self.close
        }
    }
}

/// Seven-day schedule keyed by lowercase weekday name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyHours {
    days: BTreeMap<String, DaySchedule>,
}

impl WeeklyHours {
    /// A schedule with no days; every day evaluates as closed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule given to newly registered shops: open 09:00–22:00 every day.
    pub fn standard() -> Self {
        Self::uniform(DaySchedule::open("09:00", "22:00"))
    }

    pub fn uniform(schedule: DaySchedule) -> Self {
        let mut hours = Self::new();
        for day in WEEK {
            hours.set(day, schedule.clone());
        }
        hours
    }

    pub fn with(mut self, day: Weekday, schedule: DaySchedule) -> Self {
        self.set(day, schedule);
        self
    }

    pub fn set(&mut self, day: Weekday, schedule: DaySchedule) {
        self.days.insert(weekday_key(day).to_string(), schedule);
    }

    pub fn day(&self, day: Weekday) -> Option<&DaySchedule> {
        self.days.get(weekday_key(day))
    }

    fn window(&self, day: Weekday) -> Option<OpenWindow> {
        self.day(day).and_then(DaySchedule::window)
    }

    /// Strict check for schedules being written: all seven days present, every time `HH:MM`.
    /// Closed days are not checked for times.
    pub fn validate(&self) -> Result<(), HoursError> {
        for day in WEEK {
            let key = weekday_key(day);
            let schedule = self.day(day).ok_or(HoursError::MissingDay { day: key })?;
            if schedule.is_closed {
                continue;
            }
            schedule
                .parse_window()
                .map_err(|e| HoursError::InvalidDay {
                    day: key,
                    source: Box::new(e),
                })?;
        }
        Ok(())
    }
}

/// Why a shop is open or closed right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    OpenUntil(ClockTime),
    ClosedToday,
    OpensLaterToday(ClockTime),
    OpensOn { day: Weekday, at: ClockTime },
    /// Today's window is over and no day in the following week opens.
    Closed,
}

impl fmt::Display for OpenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenStatus::OpenUntil(close) => write!(f, "open until {close}"),
            OpenStatus::ClosedToday => f.write_str("closed today"),
            OpenStatus::OpensLaterToday(open) => write!(f, "closed, opens today at {open}"),
            OpenStatus::OpensOn { day, at } => {
                write!(f, "closed, opens {} at {at}", weekday_name(*day))
            }
            OpenStatus::Closed => f.write_str("closed"),
        }
    }
}

/// Result of [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShopAvailability {
    pub is_open_now: bool,
    pub status: OpenStatus,
}

impl ShopAvailability {
    fn open_until(close: ClockTime) -> Self {
        Self {
            is_open_now: true,
            status: OpenStatus::OpenUntil(close),
        }
    }

    fn closed(status: OpenStatus) -> Self {
        Self {
            is_open_now: false,
            status,
        }
    }

    pub fn status_label(&self) -> String {
        self.status.to_string()
    }
}

/// Live status of a shop with schedule `hours` at local time `now`.
pub fn evaluate(hours: &WeeklyHours, now: NaiveDateTime) -> ShopAvailability {
    let today = now.weekday();
    let current = ClockTime::from_datetime(now);

    if let Some(yesterday) = hours.window(today.pred()) {
        if yesterday.spans_midnight() && current <= yesterday.close {
            return ShopAvailability::open_until(yesterday.close);
        }
    }

    let Some(window) = hours.window(today) else {
        return ShopAvailability::closed(OpenStatus::ClosedToday);
    };

    if window.covers_same_day(current) {
        return ShopAvailability::open_until(window.close);
    }
    if current < window.open {
        return ShopAvailability::closed(OpenStatus::OpensLaterToday(window.open));
    }
    ShopAvailability::closed(next_opening(hours, today))
}

/// First open day after `today`, looking at most one week ahead.
fn next_opening(hours: &WeeklyHours, today: Weekday) -> OpenStatus {
    let mut day = today;
    for _ in 0..WEEK.len() {
        day = day.succ();
        if let Some(window) = hours.window(day) {
            return OpenStatus::OpensOn {
                day,
                at: window.open,
            };
        }
    }
    OpenStatus::Closed
}

/// Whether any day of the week has usable open hours. Shops without any are hidden from
/// listings.
pub fn has_any_open_hours(hours: &WeeklyHours) -> bool {
    WEEK.into_iter().any(|day| hours.window(day).is_some())
}
