//! Pattern-driven date/time parsing and formatting.
//!
//! Values are naive timestamps: signed microseconds since the Unix epoch
//! (1970-01-01 00:00:00), with no timezone attached and no host-locale
//! state consulted. Text forms are governed by explicit pattern strings
//! built from the field tokens `dd`, `MM`, `yyyy`, `HH`, `mm`, `ss` plus
//! literal separator characters; any other letter is rejected.
//!
//! The default patterns are [`DATE_PATTERN`] (`dd/MM/yyyy`) and
//! [`DATETIME_PATTERN`] (`dd/MM/yyyy HH:mm`). Consumers parsing the
//! rendered strings must match them exactly.

use crate::error::FormatError;
use crate::text::is_blank;

const MICROSECONDS_PER_SECOND: i64 = 1_000_000;
const MICROSECONDS_PER_MINUTE: i64 = 60 * MICROSECONDS_PER_SECOND;
const MICROSECONDS_PER_HOUR: i64 = 60 * MICROSECONDS_PER_MINUTE;
const MICROSECONDS_PER_DAY: i64 = 24 * MICROSECONDS_PER_HOUR;

/// Default pattern for dates.
pub const DATE_PATTERN: &str = "dd/MM/yyyy";

/// Default pattern for date-times.
pub const DATETIME_PATTERN: &str = "dd/MM/yyyy HH:mm";

/// Date/time field tokens supported in patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Day,
    Month,
    Year,
    Hour,
    Minute,
    Second,
}

impl Field {
    /// Digit width of the token, which is also its zero-padded render width.
    fn width(self) -> usize {
        match self {
            Field::Year => 4,
            _ => 2,
        }
    }
}

/// One element of a compiled pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Item {
    Field(Field),
    Literal(char),
}

/// Compiled form of [`DATE_PATTERN`].
const DATE_ITEMS: &[Item] = &[
    Item::Field(Field::Day),
    Item::Literal('/'),
    Item::Field(Field::Month),
    Item::Literal('/'),
    Item::Field(Field::Year),
];

/// Compiled form of [`DATETIME_PATTERN`].
const DATETIME_ITEMS: &[Item] = &[
    Item::Field(Field::Day),
    Item::Literal('/'),
    Item::Field(Field::Month),
    Item::Literal('/'),
    Item::Field(Field::Year),
    Item::Literal(' '),
    Item::Field(Field::Hour),
    Item::Literal(':'),
    Item::Field(Field::Minute),
];

/// Compiles a pattern string into items.
///
/// A run of a supported letter must have exactly the token's width
/// (`dd`, `MM`, `yyyy`, `HH`, `mm`, `ss`); every other letter run fails.
/// Non-letter characters are literals.
fn compile_pattern(pattern: &str) -> Result<Vec<Item>, FormatError> {
    let mut items = Vec::new();
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_ascii_alphabetic() {
            items.push(Item::Literal(c));
            continue;
        }

        let mut run = 1;
        while chars.peek() == Some(&c) {
            chars.next();
            run += 1;
        }

        let field = match c {
            'd' => Field::Day,
            'M' => Field::Month,
            'y' => Field::Year,
            'H' => Field::Hour,
            'm' => Field::Minute,
            's' => Field::Second,
            _ => return Err(FormatError::UnsupportedPatternToken { token: c }),
        };
        if run != field.width() {
            return Err(FormatError::UnsupportedPatternToken { token: c });
        }
        items.push(Item::Field(field));
    }

    Ok(items)
}

/// Returns true if the given year is a leap year.
fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Returns the number of days in a given month (1-indexed).
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Calculates days since Unix epoch for a given date.
fn date_to_days(year: i32, month: u32, day: u32) -> i32 {
    // Howard Hinnant's civil-date algorithm
    let y = if month <= 2 { year - 1 } else { year } as i64;

    let m = if month <= 2 {
        month as i64 + 9
    } else {
        month as i64 - 3
    };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u32; // year of era
    let doy = (153 * m as u32 + 2) / 5 + day - 1; // day of year
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // day of era

    (era * 146097 + doe as i64 - 719468) as i32
}

/// Converts days since Unix epoch to (year, month, day).
fn days_to_date(days: i32) -> (i32, u32, u32) {
    // Howard Hinnant's algorithm in reverse
    let z = days as i64 + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32; // day of era
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // year of era
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // day of year
    let mp = (5 * doy + 2) / 153; // month index
    let d = doy - (153 * mp + 2) / 5 + 1; // day
    let m = if mp < 10 { mp + 3 } else { mp - 9 }; // month

    let year = if m <= 2 { y + 1 } else { y } as i32;
    (year, m, d)
}

/// Parsed field values with epoch defaults for fields the pattern omits.
struct FieldValues {
    year: i32,
    month: u32,
    day: u32,
    hour: i64,
    minute: i64,
    second: i64,
}

impl Default for FieldValues {
    fn default() -> Self {
        Self {
            year: 1970,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }
}

impl FieldValues {
    fn set(&mut self, field: Field, n: i64) {
        match field {
            Field::Day => self.day = n as u32,
            Field::Month => self.month = n as u32,
            Field::Year => self.year = n as i32,
            Field::Hour => self.hour = n,
            Field::Minute => self.minute = n,
            Field::Second => self.second = n,
        }
    }
}

/// Matches `value` against compiled items and returns epoch microseconds.
fn parse_items(value: &str, pattern: &str, items: &[Item]) -> Result<i64, FormatError> {
    let mismatch = || FormatError::DateMismatch {
        value: value.to_string(),
        pattern: pattern.to_string(),
    };
    let out_of_range = |field: &'static str| FormatError::DateFieldOutOfRange {
        field,
        value: value.to_string(),
    };

    let bytes = value.as_bytes();
    let mut pos = 0;
    let mut fields = FieldValues::default();

    for item in items {
        match item {
            Item::Literal(expected) => match value[pos..].chars().next() {
                Some(found) if found == *expected => pos += found.len_utf8(),
                _ => return Err(mismatch()),
            },
            Item::Field(field) => {
                let width = field.width();
                if pos + width > bytes.len() {
                    return Err(mismatch());
                }
                let mut n: i64 = 0;
                for &b in &bytes[pos..pos + width] {
                    if !b.is_ascii_digit() {
                        return Err(mismatch());
                    }
                    n = n * 10 + (b - b'0') as i64;
                }
                pos += width;
                fields.set(*field, n);
            }
        }
    }

    // The whole input must be consumed; trailing text is a mismatch.
    if pos != bytes.len() {
        return Err(mismatch());
    }

    if fields.month < 1 || fields.month > 12 {
        return Err(out_of_range("month"));
    }
    if fields.day < 1 || fields.day > days_in_month(fields.year, fields.month) {
        return Err(out_of_range("day"));
    }
    if fields.hour > 23 {
        return Err(out_of_range("hour"));
    }
    if fields.minute > 59 {
        return Err(out_of_range("minute"));
    }
    if fields.second > 59 {
        return Err(out_of_range("second"));
    }

    let days = date_to_days(fields.year, fields.month, fields.day) as i64;
    Ok(days * MICROSECONDS_PER_DAY
        + fields.hour * MICROSECONDS_PER_HOUR
        + fields.minute * MICROSECONDS_PER_MINUTE
        + fields.second * MICROSECONDS_PER_SECOND)
}

/// Renders epoch microseconds through compiled items.
fn format_items(epoch_micros: i64, items: &[Item]) -> String {
    // Floor-divide into days and time-of-day, handling pre-epoch values.
    let (days, time_micros) = if epoch_micros >= 0 {
        ((epoch_micros / MICROSECONDS_PER_DAY) as i32, epoch_micros % MICROSECONDS_PER_DAY)
    } else {
        let days = ((epoch_micros + 1) / MICROSECONDS_PER_DAY - 1) as i32;
        let time_micros =
            ((epoch_micros % MICROSECONDS_PER_DAY) + MICROSECONDS_PER_DAY) % MICROSECONDS_PER_DAY;
        (days, time_micros)
    };

    let (year, month, day) = days_to_date(days);
    let hour = time_micros / MICROSECONDS_PER_HOUR;
    let minute = time_micros % MICROSECONDS_PER_HOUR / MICROSECONDS_PER_MINUTE;
    let second = time_micros % MICROSECONDS_PER_MINUTE / MICROSECONDS_PER_SECOND;

    let mut out = String::with_capacity(items.len() * 2);
    for item in items {
        match item {
            Item::Literal(c) => out.push(*c),
            Item::Field(Field::Day) => out.push_str(&format!("{:02}", day)),
            Item::Field(Field::Month) => out.push_str(&format!("{:02}", month)),
            Item::Field(Field::Year) => out.push_str(&format!("{:04}", year)),
            Item::Field(Field::Hour) => out.push_str(&format!("{:02}", hour)),
            Item::Field(Field::Minute) => out.push_str(&format!("{:02}", minute)),
            Item::Field(Field::Second) => out.push_str(&format!("{:02}", second)),
        }
    }
    out
}

fn parse_with_items(
    value: &str,
    pattern: &str,
    items: &[Item],
) -> Result<Option<i64>, FormatError> {
    if is_blank(value) {
        return Ok(None);
    }
    match parse_items(value.trim(), pattern, items) {
        Ok(epoch_micros) => Ok(Some(epoch_micros)),
        Err(err) => {
            tracing::warn!(value, pattern, error = %err, "failed to parse date");
            Err(err)
        }
    }
}

/// Parses `value` against `pattern` and returns epoch microseconds.
///
/// Blank input maps to `Ok(None)`. Leading/trailing whitespace around a
/// non-blank value is ignored; everything else must match the pattern
/// exactly, including calendar validity of the day (leap years included).
pub fn parse_datetime_with(value: &str, pattern: &str) -> Result<Option<i64>, FormatError> {
    let items = compile_pattern(pattern)?;
    parse_with_items(value, pattern, &items)
}

/// Parses a date with the default `dd/MM/yyyy` pattern.
pub fn parse_date(value: &str) -> Result<Option<i64>, FormatError> {
    parse_with_items(value, DATE_PATTERN, DATE_ITEMS)
}

/// Parses a date-time with the default `dd/MM/yyyy HH:mm` pattern.
pub fn parse_datetime(value: &str) -> Result<Option<i64>, FormatError> {
    parse_with_items(value, DATETIME_PATTERN, DATETIME_ITEMS)
}

/// Formats epoch microseconds with `pattern`; absent maps to `""`.
///
/// Fails only when the pattern itself contains an unsupported token.
pub fn format_datetime_with(value: Option<i64>, pattern: &str) -> Result<String, FormatError> {
    let items = compile_pattern(pattern)?;
    Ok(match value {
        None => String::new(),
        Some(epoch_micros) => format_items(epoch_micros, &items),
    })
}

/// Formats a date with the default `dd/MM/yyyy` pattern; absent maps to `""`.
pub fn format_date(value: Option<i64>) -> String {
    match value {
        None => String::new(),
        Some(epoch_micros) => format_items(epoch_micros, DATE_ITEMS),
    }
}

/// Formats a date-time with the default `dd/MM/yyyy HH:mm` pattern; absent
/// maps to `""`.
pub fn format_datetime(value: Option<i64>) -> String {
    match value {
        None => String::new(),
        Some(epoch_micros) => format_items(epoch_micros, DATETIME_ITEMS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_date_basic() {
        assert_eq!(parse_date("01/01/1970").unwrap(), Some(0));
        // 2024-03-15 is 19797 days after the epoch
        assert_eq!(
            parse_date("15/03/2024").unwrap(),
            Some(19797 * MICROSECONDS_PER_DAY)
        );
        assert_eq!(parse_date("  15/03/2024  ").unwrap(), Some(19797 * MICROSECONDS_PER_DAY));
    }

    #[test]
    fn test_parse_datetime_basic() {
        assert_eq!(parse_datetime("01/01/1970 00:00").unwrap(), Some(0));
        assert_eq!(
            parse_datetime("15/03/2024 14:30").unwrap(),
            Some(1_710_513_000_000_000)
        );
    }

    #[test]
    fn test_blank_is_absent() {
        assert_eq!(parse_date("").unwrap(), None);
        assert_eq!(parse_date("   ").unwrap(), None);
        assert_eq!(parse_datetime("\t").unwrap(), None);
        assert_eq!(parse_datetime_with("", "yyyy-MM-dd").unwrap(), None);
    }

    #[test]
    fn test_format_basic() {
        assert_eq!(format_date(Some(0)), "01/01/1970");
        assert_eq!(format_date(Some(19797 * MICROSECONDS_PER_DAY)), "15/03/2024");
        assert_eq!(format_datetime(Some(1_710_513_000_000_000)), "15/03/2024 14:30");
        assert_eq!(format_date(None), "");
        assert_eq!(format_datetime(None), "");
    }

    #[test]
    fn test_format_truncates_finer_fields() {
        // 14:30:45.5 renders as 14:30 under the default pattern
        let us = 1_710_513_000_000_000 + 45 * MICROSECONDS_PER_SECOND + 500_000;
        assert_eq!(format_datetime(Some(us)), "15/03/2024 14:30");
        assert_eq!(format_date(Some(us)), "15/03/2024");
    }

    #[test]
    fn test_date_roundtrip() {
        let dates = ["01/01/1970", "15/03/2024", "29/02/2000", "31/12/1969", "01/01/0001"];
        for date in dates {
            let parsed = parse_date(date).unwrap();
            assert_eq!(format_date(parsed), date, "roundtrip failed for {}", date);
        }
    }

    #[test]
    fn test_datetime_roundtrip() {
        let datetimes = [
            "01/01/1970 00:00",
            "15/03/2024 14:30",
            "31/12/2024 23:59",
            "29/02/2024 12:00",
        ];
        for datetime in datetimes {
            let parsed = parse_datetime(datetime).unwrap();
            assert_eq!(
                format_datetime(parsed),
                datetime,
                "roundtrip failed for {}",
                datetime
            );
        }
    }

    #[test]
    fn test_pre_epoch() {
        assert_eq!(parse_date("31/12/1969").unwrap(), Some(-MICROSECONDS_PER_DAY));
        assert_eq!(format_date(Some(-MICROSECONDS_PER_DAY)), "31/12/1969");
        assert_eq!(
            parse_datetime("31/12/1969 23:59").unwrap(),
            Some(-MICROSECONDS_PER_MINUTE)
        );
        assert_eq!(format_datetime(Some(-MICROSECONDS_PER_MINUTE)), "31/12/1969 23:59");
    }

    #[test]
    fn test_invalid_dates() {
        assert!(matches!(
            parse_date("31/13/2020"),
            Err(FormatError::DateFieldOutOfRange { field: "month", .. })
        ));
        assert!(matches!(
            parse_date("00/01/2020"),
            Err(FormatError::DateFieldOutOfRange { field: "day", .. })
        ));
        assert!(matches!(
            parse_date("30/02/2024"),
            Err(FormatError::DateFieldOutOfRange { field: "day", .. })
        ));
        // 2023 is not a leap year
        assert!(matches!(
            parse_date("29/02/2023"),
            Err(FormatError::DateFieldOutOfRange { field: "day", .. })
        ));
        // leap year, valid
        assert!(parse_date("29/02/2024").is_ok());
    }

    #[test]
    fn test_mismatches() {
        assert!(matches!(parse_date("2024-03-15"), Err(FormatError::DateMismatch { .. })));
        assert!(matches!(parse_date("15/03/24"), Err(FormatError::DateMismatch { .. })));
        assert!(matches!(parse_date("15/03/2024x"), Err(FormatError::DateMismatch { .. })));
        assert!(matches!(parse_date("1a/03/2024"), Err(FormatError::DateMismatch { .. })));
        assert!(matches!(
            parse_datetime("15/03/2024"),
            Err(FormatError::DateMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_times() {
        assert!(matches!(
            parse_datetime("15/03/2024 24:00"),
            Err(FormatError::DateFieldOutOfRange { field: "hour", .. })
        ));
        assert!(matches!(
            parse_datetime("15/03/2024 14:60"),
            Err(FormatError::DateFieldOutOfRange { field: "minute", .. })
        ));
    }

    #[test]
    fn test_custom_patterns() {
        assert_eq!(
            parse_datetime_with("2024-03-15", "yyyy-MM-dd").unwrap(),
            parse_date("15/03/2024").unwrap()
        );
        assert_eq!(
            parse_datetime_with("15/03/2024 14:30:45", "dd/MM/yyyy HH:mm:ss").unwrap(),
            Some(1_710_513_045_000_000)
        );
        assert_eq!(
            format_datetime_with(Some(1_710_513_045_000_000), "yyyy-MM-dd HH:mm:ss").unwrap(),
            "2024-03-15 14:30:45"
        );
        assert_eq!(format_datetime_with(None, "yyyy-MM-dd").unwrap(), "");
    }

    #[test]
    fn test_unsupported_pattern_tokens() {
        assert_eq!(
            parse_datetime_with("x", "QQ"),
            Err(FormatError::UnsupportedPatternToken { token: 'Q' })
        );
        // wrong token width
        assert_eq!(
            parse_datetime_with("1/1/2024", "d/M/yyyy"),
            Err(FormatError::UnsupportedPatternToken { token: 'd' })
        );
        assert_eq!(
            format_datetime_with(Some(0), "yy"),
            Err(FormatError::UnsupportedPatternToken { token: 'y' })
        );
    }

    proptest! {
        #[test]
        fn prop_date_roundtrip(days in -719_162i64..2_932_000) {
            let us = days * MICROSECONDS_PER_DAY;
            let rendered = format_date(Some(us));
            prop_assert_eq!(parse_date(&rendered).unwrap(), Some(us));
        }

        #[test]
        fn prop_datetime_roundtrip(days in -719_162i64..2_932_000, minute_of_day in 0i64..1440) {
            let us = days * MICROSECONDS_PER_DAY + minute_of_day * MICROSECONDS_PER_MINUTE;
            let rendered = format_datetime(Some(us));
            prop_assert_eq!(parse_datetime(&rendered).unwrap(), Some(us));
        }
    }
}
