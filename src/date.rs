//! Date formatting with single-letter tokens and timestamp helpers.
//!
//! | Token | Output                         |
//! |-------|--------------------------------|
//! | `Y`   | four-digit year                |
//! | `y`   | two-digit year                 |
//! | `n`   | month, no padding              |
//! | `m`   | month, two digits              |
//! | `F`   | month name (`January`)         |
//! | `M`   | short month name (`Jan`)       |
//! | `j`   | day of month, no padding       |
//! | `d`   | day of month, two digits       |
//! | `l`   | weekday name (`Sunday`)        |
//! | `D`   | short weekday name (`Sun`)     |
//! | `G`   | hour 0-23, no padding          |
//! | `H`   | hour 00-23                     |
//! | `g`   | hour 1-12, no padding          |
//! | `h`   | hour 01-12                     |
//! | `a`/`A` | `am`/`pm`, `AM`/`PM`         |
//! | `i`   | minutes, two digits            |
//! | `s`   | seconds, two digits            |
//!
//! A run of the same character is read as one token, so `YY` is not a year
//! token; runs that are not tokens are copied as-is.

use chrono::{Datelike, Timelike, Utc};

/// Format used when none is given.
pub const DEFAULT_DATE_FORMAT: &str = "m/d/Y";

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const DAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

fn token_value<T: Datelike + Timelike>(dt: &T, token: &str) -> Option<String> {
    let month = dt.month0() as usize;
    let weekday = dt.weekday().num_days_from_sunday() as usize;
    let hour = dt.hour();
    let hour12 = match hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };

    let value = match token {
        "Y" => dt.year().to_string(),
        "y" => format!("{:02}", dt.year().rem_euclid(100)),
        "n" => dt.month().to_string(),
        "m" => format!("{:02}", dt.month()),
        "F" => MONTH_NAMES[month].to_string(),
        "M" => MONTH_NAMES[month][..3].to_string(),
        "j" => dt.day().to_string(),
        "d" => format!("{:02}", dt.day()),
        "l" => DAY_NAMES[weekday].to_string(),
        "D" => DAY_NAMES[weekday][..3].to_string(),
        "G" => hour.to_string(),
        "H" => format!("{:02}", hour),
        "g" => hour12.to_string(),
        "h" => format!("{:02}", hour12),
        "a" => (if hour > 11 { "pm" } else { "am" }).to_string(),
        "A" => (if hour > 11 { "PM" } else { "AM" }).to_string(),
        "i" => format!("{:02}", dt.minute()),
        "s" => format!("{:02}", dt.second()),
        _ => return None,
    };
    Some(value)
}

/// Render `dt` using the token format described in the module docs.
pub fn date_format<T: Datelike + Timelike>(dt: &T, format: Option<&str>) -> String {
    let format = format.filter(|f| !f.is_empty()).unwrap_or(DEFAULT_DATE_FORMAT);
    let mut result = String::with_capacity(format.len() * 2);
    let mut chars = format.chars().peekable();

    while let Some(c) = chars.next() {
        let mut token = String::from(c);
        while chars.peek() == Some(&c) {
            token.push(c);
            chars.next();
        }
        match token_value(dt, &token) {
            Some(value) => result.push_str(&value),
            None => result.push_str(&token),
        }
    }
    result
}

/// Current Unix time in milliseconds.
pub fn tick_count() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeZone};

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 9)
            .unwrap()
    }

    #[test]
    fn test_default_format() {
        assert_eq!(date_format(&sample(), None), "03/05/2024");
        assert_eq!(date_format(&sample(), Some("")), "03/05/2024");
    }

    #[test]
    fn test_all_tokens() {
        let dt = sample();
        assert_eq!(date_format(&dt, Some("Y-m-d H:i:s")), "2024-03-05 14:07:09");
        assert_eq!(date_format(&dt, Some("y n j G")), "24 3 5 14");
        assert_eq!(date_format(&dt, Some("l, F j")), "Tuesday, March 5");
        assert_eq!(date_format(&dt, Some("D M")), "Tue Mar");
        assert_eq!(date_format(&dt, Some("g:i a / h A")), "2:07 pm / 02 PM");
    }

    #[test]
    fn test_midnight_is_twelve_am() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 30, 0)
            .unwrap();
        assert_eq!(date_format(&dt, Some("g:i A")), "12:30 AM");
    }

    #[test]
    fn test_repeated_and_unknown_tokens_are_literal() {
        assert_eq!(date_format(&sample(), Some("YY")), "YY");
        assert_eq!(date_format(&sample(), Some("[Y] T")), "[2024] T");
    }

    #[test]
    fn test_works_with_zoned_datetimes() {
        let dt = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(date_format(&dt, Some("d.m.Y H:i")), "31.12.2023 23:59");
    }

    #[test]
    fn test_tick_count_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(tick_count() > 1_577_836_800_000);
    }
}
