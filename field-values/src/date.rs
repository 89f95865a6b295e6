// Copyright (C) 2023 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! HTTP dates, as used by `Date`, `Last-Modified`, `Expires`,
//! `If-Modified-Since`, `If-Unmodified-Since` and `If-Range`.
//!
//! # Definition
//! ```text
//! HTTP-date    = IMF-fixdate / obs-date
//! IMF-fixdate  = day-name "," SP date1 SP time-of-day SP GMT
//! obs-date     = rfc850-date / asctime-date
//! rfc850-date  = day-name-l "," SP date2 SP time-of-day SP GMT
//! asctime-date = day-name SP date3 SP time-of-day SP year
//!
//! date1        = day SP month SP year
//! date2        = day "-" month "-" 2DIGIT
//! date3        = month SP ( 2DIGIT / ( SP DIGIT ))
//! ```
//!
//! # References
//! * [RFC 9110 Section 5.6.7](https://www.rfc-editor.org/rfc/rfc9110.html#name-date-time-formats)

use std::{
    fmt,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crate::FieldValueError;

const SECONDS_PER_DAY: i64 = 86_400;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const LONG_DAY_NAMES: [&str; 7] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];
const MONTH_NAMES: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// The first and last instants that have a four-digit year.
const MIN_TIMESTAMP: i64 = days_from_civil(0, 1, 1) * SECONDS_PER_DAY;
const MAX_TIMESTAMP: i64 = days_from_civil(9999, 12, 31) * SECONDS_PER_DAY + SECONDS_PER_DAY - 1;

/// An instant with a resolution of whole seconds, and whether or not it is
/// a weak validator.
///
/// Dates are weak by default, since a modification time usually can't
/// distinguish two changes within the same second. The weakness plays no part
/// in comparing instants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HttpDate {
    timestamp: i64,
    weak: bool,
}

impl HttpDate {
    /// Creates a date from the number of seconds since the Unix epoch.
    pub fn from_unix_timestamp(timestamp: i64) -> Result<Self, FieldValueError> {
        if !(MIN_TIMESTAMP..=MAX_TIMESTAMP).contains(&timestamp) {
            return Err(FieldValueError::InvalidDate);
        }

        Ok(Self { timestamp, weak: true })
    }

    /// Creates a date from the given time, discarding the sub-second part.
    pub fn from_system_time(time: SystemTime) -> Result<Self, FieldValueError> {
        Self::from_unix_timestamp(unix_timestamp(time))
    }

    /// Parses any of the three HTTP-date formats. The `now` instant is used to
    /// find the century of the two-digit years of the `rfc850-date` format.
    pub fn parse(input: &str, now: SystemTime) -> Result<Self, FieldValueError> {
        let result = parse_date_time(input, now)
            .ok_or(FieldValueError::InvalidDate)
            .and_then(|date_time| Self::from_unix_timestamp(date_time.to_timestamp()));

        if let Err(error) = &result {
            tracing::trace!(input, ?error, "rejected HTTP-date");
        }

        result
    }

    pub fn unix_timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Returns `None` if the platform can't represent the instant.
    pub fn to_system_time(&self) -> Option<SystemTime> {
        if self.timestamp >= 0 {
            UNIX_EPOCH.checked_add(Duration::from_secs(self.timestamp.unsigned_abs()))
        } else {
            UNIX_EPOCH.checked_sub(Duration::from_secs(self.timestamp.unsigned_abs()))
        }
    }

    pub fn is_weak(&self) -> bool {
        self.weak
    }

    pub fn set_weak(&mut self, weak: bool) {
        self.weak = weak;
    }

    pub fn is_lt(&self, other: &HttpDate) -> bool {
        self.timestamp < other.timestamp
    }

    pub fn is_lte(&self, other: &HttpDate) -> bool {
        self.timestamp <= other.timestamp
    }

    pub fn is_eq(&self, other: &HttpDate) -> bool {
        self.timestamp == other.timestamp
    }

    pub fn is_gte(&self, other: &HttpDate) -> bool {
        self.timestamp >= other.timestamp
    }

    pub fn is_gt(&self, other: &HttpDate) -> bool {
        self.timestamp > other.timestamp
    }
}

impl fmt::Display for HttpDate {
    /// Always formats as an `IMF-fixdate`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date_time = DateTime::from_timestamp(self.timestamp);
        let days = self.timestamp.div_euclid(SECONDS_PER_DAY);
        // 1970-01-01 was a Thursday.
        let day_name = DAY_NAMES[(days + 4).rem_euclid(7) as usize];

        write!(f, "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            day_name, date_time.day, MONTH_NAMES[date_time.month as usize - 1], date_time.year,
            date_time.hour, date_time.minute, date_time.second)
    }
}

impl From<HttpDate> for i64 {
    fn from(date: HttpDate) -> Self {
        date.timestamp
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct DateTime {
    year: i64,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl DateTime {
    fn from_timestamp(timestamp: i64) -> Self {
        let (year, month, day) = civil_from_days(timestamp.div_euclid(SECONDS_PER_DAY));
        let seconds_of_day = timestamp.rem_euclid(SECONDS_PER_DAY) as u32;

        Self {
            year,
            month,
            day,
            hour: seconds_of_day / 3600,
            minute: seconds_of_day / 60 % 60,
            second: seconds_of_day % 60,
        }
    }

    fn to_timestamp(&self) -> i64 {
        days_from_civil(self.year, self.month, self.day) * SECONDS_PER_DAY
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60
            + i64::from(self.second)
    }

    fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
            && self.hour < 24
            && self.minute < 60
            // Leap seconds are normalized into the next minute.
            && self.second <= 60
    }
}

fn parse_date_time(input: &str, now: SystemTime) -> Option<DateTime> {
    if !input.is_ascii() {
        return None;
    }

    let date_time = if input.len() == 29 && input.as_bytes()[3] == b',' {
        parse_imf_fixdate(input)?
    } else if input.len() == 24 {
        parse_asctime_date(input)?
    } else {
        parse_rfc850_date(input, DateTime::from_timestamp(unix_timestamp(now)))?
    };

    date_time.is_valid().then_some(date_time)
}

/// ```text
/// Sun, 06 Nov 1994 08:49:37 GMT
/// ```
fn parse_imf_fixdate(input: &str) -> Option<DateTime> {
    parse_day_name(&input[0..3], &DAY_NAMES)?;
    expect(&input[3..5], ", ")?;
    let day = parse_fixed_digits(&input[5..7])?;
    expect(&input[7..8], " ")?;
    let month = parse_month(&input[8..11])?;
    expect(&input[11..12], " ")?;
    let year = parse_fixed_digits(&input[12..16])?;
    expect(&input[16..17], " ")?;
    let (hour, minute, second) = parse_time_of_day(&input[17..25])?;
    expect(&input[25..29], " GMT")?;

    Some(DateTime { year: i64::from(year), month, day, hour, minute, second })
}

/// ```text
/// Sunday, 06-Nov-94 08:49:37 GMT
/// ```
fn parse_rfc850_date(input: &str, now: DateTime) -> Option<DateTime> {
    let (day_name, rest) = input.split_once(", ")?;
    parse_day_name(day_name, &LONG_DAY_NAMES)?;

    if rest.len() != 22 {
        return None;
    }

    let day = parse_fixed_digits(&rest[0..2])?;
    expect(&rest[2..3], "-")?;
    let month = parse_month(&rest[3..6])?;
    expect(&rest[6..7], "-")?;
    let two_digit_year = parse_fixed_digits(&rest[7..9])?;
    expect(&rest[9..10], " ")?;
    let (hour, minute, second) = parse_time_of_day(&rest[10..18])?;
    expect(&rest[18..22], " GMT")?;

    let mut date_time = DateTime { year: 0, month, day, hour, minute, second };
    date_time.year = resolve_two_digit_year(i64::from(two_digit_year), &date_time, &now);
    Some(date_time)
}

/// ```text
/// Sun Nov  6 08:49:37 1994
/// ```
fn parse_asctime_date(input: &str) -> Option<DateTime> {
    parse_day_name(&input[0..3], &DAY_NAMES)?;
    expect(&input[3..4], " ")?;
    let month = parse_month(&input[4..7])?;
    expect(&input[7..8], " ")?;
    let day = match input[8..10].strip_prefix(' ') {
        Some(digit) => parse_fixed_digits(digit)?,
        None => parse_fixed_digits(&input[8..10])?,
    };
    expect(&input[10..11], " ")?;
    let (hour, minute, second) = parse_time_of_day(&input[11..19])?;
    expect(&input[19..20], " ")?;
    let year = parse_fixed_digits(&input[20..24])?;

    Some(DateTime { year: i64::from(year), month, day, hour, minute, second })
}

/// Picks the century closest to `now`, but never one that puts the date more
/// than 50 years in the future.
///
/// # References
/// * [RFC 9110 Section 5.6.7](https://www.rfc-editor.org/rfc/rfc9110.html#section-5.6.7-11)
fn resolve_two_digit_year(two_digit_year: i64, date_time: &DateTime, now: &DateTime) -> i64 {
    let mut year = now.year.div_euclid(100) * 100 + two_digit_year;
    if year - now.year > 50 {
        year -= 100;
    } else if now.year - year >= 50 {
        year += 100;
    }

    let fifty_years_earlier = DateTime { year: year - 50, ..*date_time };
    if fifty_years_earlier > *now {
        year -= 100;
    }

    year
}

fn parse_day_name(input: &str, names: &[&str; 7]) -> Option<()> {
    names.contains(&input).then_some(())
}

fn parse_month(input: &str) -> Option<u32> {
    MONTH_NAMES.iter()
        .position(|name| *name == input)
        .map(|index| index as u32 + 1)
}

/// ```text
/// time-of-day  = hour ":" minute ":" second
/// ```
fn parse_time_of_day(input: &str) -> Option<(u32, u32, u32)> {
    expect(&input[2..3], ":")?;
    expect(&input[5..6], ":")?;
    Some((
        parse_fixed_digits(&input[0..2])?,
        parse_fixed_digits(&input[3..5])?,
        parse_fixed_digits(&input[6..8])?,
    ))
}

fn parse_fixed_digits(input: &str) -> Option<u32> {
    if input.is_empty() || !input.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    input.parse().ok()
}

fn expect(input: &str, expected: &str) -> Option<()> {
    (input == expected).then_some(())
}

fn unix_timestamp(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(duration) => i64::try_from(duration.as_secs()).unwrap_or(i64::MAX),
        Err(error) => {
            let duration = error.duration();
            let seconds = i64::try_from(duration.as_secs()).unwrap_or(i64::MAX);
            if duration.subsec_nanos() == 0 {
                -seconds
            } else {
                -seconds - 1
            }
        }
    }
}

fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_month(year: i64, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since 1970-01-01 in the proleptic Gregorian calendar.
const fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let month = month as i64;
    let day_of_year = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let days = days + 719_468;
    let era = days.div_euclid(146_097);
    let day_of_era = days - era * 146_097;
    let year_of_era = (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = (day_of_year - (153 * shifted_month + 2) / 5 + 1) as u32;
    let month = if shifted_month < 10 { shifted_month + 3 } else { shifted_month - 9 } as u32;
    let year = year_of_era + era * 400;

    (if month <= 2 { year + 1 } else { year }, month, day)
}
