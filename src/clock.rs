//! Adding a duration to a 12-hour clock time, with day rollover and an
//! optional day of the week.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// Start time is not `"H:MM AM"` / `"H:MM PM"` with hour 1-12.
    InvalidStart(String),
    /// Duration is not `"H:MM"` with minutes 0-59.
    InvalidDuration(String),
    /// Not the name of a day of the week.
    UnknownDay(String),
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::InvalidStart(s) => write!(f, "invalid start time '{s}', expected H:MM AM|PM"),
            ClockError::InvalidDuration(s) => write!(f, "invalid duration '{s}', expected H:MM"),
            ClockError::UnknownDay(s) => write!(f, "unknown day of the week '{s}'"),
        }
    }
}

impl std::error::Error for ClockError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// The weekday `days` days after this one.
    pub fn plus(self, days: u64) -> Weekday {
        let index = (self as u64 + days % 7) % 7;
        Self::ALL[index as usize]
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = ClockError;

    /// Case-insensitive full day name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ClockError::UnknownDay(s.to_string()))
    }
}

/// Splits `"H:MM"` into hours and minutes, requiring minutes below 60.
fn parse_hours_minutes(s: &str) -> Option<(u64, u64)> {
    let (hours, minutes) = s.split_once(':')?;
    let is_number = |t: &str| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit());
    if !is_number(hours) || !is_number(minutes) {
        return None;
    }
    let hours: u64 = hours.parse().ok()?;
    let minutes: u64 = minutes.parse().ok()?;
    (minutes < MINUTES_PER_HOUR).then_some((hours, minutes))
}

/// Minutes since midnight for a `"H:MM AM|PM"` time.
fn parse_start(start: &str) -> Result<u64, ClockError> {
    let invalid = || ClockError::InvalidStart(start.to_string());

    let (time, meridian) = start.trim().split_once(' ').ok_or_else(invalid)?;
    let (hour, minute) = parse_hours_minutes(time).ok_or_else(invalid)?;
    if !(1..=12).contains(&hour) {
        return Err(invalid());
    }

    let hour24 = match meridian.trim().to_ascii_uppercase().as_str() {
        "AM" => hour % 12,
        "PM" => hour % 12 + 12,
        _ => return Err(invalid()),
    };
    Ok(hour24 * MINUTES_PER_HOUR + minute)
}

/// Adds `duration` to `start` on a 12-hour clock.
///
/// The result is `"H:MM AM|PM"`, followed by `", <Weekday>"` when `day`
/// names a day of the week, then `" (next day)"` or `" (N days later)"`
/// when the time passes one or more midnights. A `day` that isn't a
/// weekday name is ignored.
///
/// # Errors
/// [`ClockError::InvalidStart`] or [`ClockError::InvalidDuration`] on
/// malformed input. A duration too long to count in minutes is an
/// [`ClockError::InvalidDuration`] too.
///
/// # Examples
/// ```
/// use u_drills::clock::add_time;
/// assert_eq!(add_time("3:00 PM", "3:10", None).unwrap(), "6:10 PM");
/// assert_eq!(
///     add_time("11:43 PM", "24:20", Some("tueSday")).unwrap(),
///     "12:03 AM, Thursday (2 days later)"
/// );
/// ```
pub fn add_time(start: &str, duration: &str, day: Option<&str>) -> Result<String, ClockError> {
    let start_minutes = parse_start(start)?;
    let invalid_duration = || ClockError::InvalidDuration(duration.to_string());
    let (hours, minutes) = parse_hours_minutes(duration.trim()).ok_or_else(invalid_duration)?;

    let end = hours
        .checked_mul(MINUTES_PER_HOUR)
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_add(start_minutes))
        .ok_or_else(invalid_duration)?;
    let days_later = end / MINUTES_PER_DAY;
    let of_day = end % MINUTES_PER_DAY;

    let hour24 = of_day / MINUTES_PER_HOUR;
    let minute = of_day % MINUTES_PER_HOUR;
    let meridian = if hour24 < 12 { "AM" } else { "PM" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };

    let mut out = format!("{hour12}:{minute:02} {meridian}");

    if let Some(name) = day {
        match name.parse::<Weekday>() {
            Ok(weekday) => {
                out.push_str(", ");
                out.push_str(weekday.plus(days_later).name());
            }
            Err(_) => debug!(day = name, "ignoring unrecognised weekday"),
        }
    }

    match days_later {
        0 => {}
        1 => out.push_str(" (next day)"),
        n => out.push_str(&format!(" ({n} days later)")),
    }

    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================
