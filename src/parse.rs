use std::str::FromStr;

use chrono::{DateTime, TimeZone, Timelike};
use chrono_tz::Tz;

use crate::ParseError;
use crate::consts::{
    CENTURY_1900, CENTURY_2000, CENTURY_PIVOT, MONTHS_ABBREV, MONTHS_FULL, NANOS_PER_MICRO,
    WEEKDAYS_ABBREV, WEEKDAYS_FULL,
};
use crate::pattern::CompiledPattern;

/// Parses `value` against a strftime-style format string and reconstructs
/// the timestamp it describes.
///
/// The format is compiled into a single anchored pattern; each captured
/// field is decoded into a call-scoped accumulator, then the accumulator is
/// consumed to build the result. Fields absent from the format default to
/// 1900-01-01 00:00:00.0. The zone is UTC unless `%Z` captured one; a `%z`
/// offset is matched syntactically but not applied.
///
/// # Errors
/// `ParseError::Format` for an unknown directive, `NoMatch` when the value
/// does not conform to the pattern, `FieldConversion`/`TimezoneLookup` when
/// a capture cannot be decoded, and `InvalidTimestamp` when the decoded
/// fields name no real instant.
pub fn strptime(value: &str, format: &str) -> Result<DateTime<Tz>, ParseError> {
    let compiled = CompiledPattern::compile(format)?;
    let captures = compiled.regex.captures(value).ok_or(ParseError::NoMatch)?;

    let mut acc = FieldAccumulator::default();
    for (slot, field) in compiled.fields.iter().enumerate() {
        if let Some(capture) = captures.name(&format!("g{slot}")) {
            acc.apply(*field, capture.as_str())?;
        }
    }
    acc.into_datetime()
}

/// Calendar fields collected while decoding captures, consumed once to
/// build the final timestamp. Defaults are Python's strptime defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldAccumulator {
    year:   i32,
    month:  u32,
    day:    u32,
    hour:   u32,
    minute: u32,
    second: u32,
    nanos:  u32,
    pm:     bool,
    zone:   Option<Tz>,
}

impl Default for FieldAccumulator {
    fn default() -> Self {
        Self {
            year:   1900,
            month:  1,
            day:    1,
            hour:   0,
            minute: 0,
            second: 0,
            nanos:  0,
            pm:     false,
            zone:   None,
        }
    }
}

impl FieldAccumulator {
    /// Decodes one captured value into its field. Captures arrive in the
    /// order they appear in the compiled pattern.
    fn apply(&mut self, field: char, value: &str) -> Result<(), ParseError> {
        match field {
            // Weekday names are validated but never stored: the weekday is
            // derived from the date, not an independent field
            'a' => lookup(field, value, &WEEKDAYS_ABBREV).map(|_| ()),
            'A' => lookup(field, value, &WEEKDAYS_FULL).map(|_| ()),
            'd' => {
                self.day = number(field, value)?;
                Ok(())
            }
            'b' => {
                self.month = lookup(field, value, &MONTHS_ABBREV)? + 1;
                Ok(())
            }
            'B' => {
                self.month = lookup(field, value, &MONTHS_FULL)? + 1;
                Ok(())
            }
            'm' => {
                self.month = number(field, value)?;
                Ok(())
            }
            'y' => {
                let short: i32 = number(field, value)?;
                self.year = if short < CENTURY_PIVOT {
                    CENTURY_2000 + short
                } else {
                    CENTURY_1900 + short
                };
                Ok(())
            }
            'Y' => {
                self.year = number(field, value)?;
                Ok(())
            }
            'H' | 'I' => {
                self.hour = number(field, value)?;
                Ok(())
            }
            'p' => {
                self.pm = value == "PM";
                Ok(())
            }
            'M' => {
                self.minute = number(field, value)?;
                Ok(())
            }
            'S' => {
                self.second = number(field, value)?;
                Ok(())
            }
            'f' => {
                let micros: u32 = number(field, value)?;
                self.nanos = micros * NANOS_PER_MICRO;
                Ok(())
            }
            // Matched for shape only; the offset is not applied
            'z' => Ok(()),
            'Z' => {
                let zone = Tz::from_str(value)
                    .map_err(|_| ParseError::TimezoneLookup(value.to_string()))?;
                self.zone = Some(zone);
                Ok(())
            }
            _ => Err(ParseError::FieldConversion {
                field,
                value: value.to_string(),
                reason: "no decoder for this field".to_string(),
            }),
        }
    }

    fn into_datetime(mut self) -> Result<DateTime<Tz>, ParseError> {
        // A 12-hour value with the PM flag becomes 24-hour; hour 12 is
        // already past noon and stays untouched (so is 12 AM, see README)
        if self.pm && self.hour < 12 {
            self.hour += 12;
        }
        let zone = self.zone.unwrap_or(Tz::UTC);
        zone.with_ymd_and_hms(
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
        )
        .single()
        .and_then(|dt| dt.with_nanosecond(self.nanos))
        .ok_or(ParseError::InvalidTimestamp)
    }
}

fn number<T: FromStr>(field: char, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::FieldConversion {
        field,
        value: value.to_string(),
        reason: "not a valid number".to_string(),
    })
}

fn lookup(field: char, value: &str, names: &[&str]) -> Result<u32, ParseError> {
    names
        .iter()
        .position(|name| *name == value)
        .map(|idx| idx as u32)
        .ok_or_else(|| ParseError::FieldConversion {
            field,
            value: value.to_string(),
            reason: "not a recognized name".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike, Utc};

    use super::*;
    use crate::FormatError;
    use crate::render::strftime;

    #[test]
    fn test_iso_date_time() {
        let dt = strptime("2016-09-22T14:04:26", "%Y-%m-%dT%H:%M:%S").unwrap();
        assert_eq!(
            (dt.year(), dt.month(), dt.day()),
            (2016, 9, 22)
        );
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (14, 4, 26));
        assert_eq!(dt.timezone(), Tz::UTC);
    }

    #[test]
    fn test_defaults_for_absent_fields() {
        let dt = strptime("14:04", "%H:%M").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (1900, 1, 1));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (14, 4, 0));
    }

    #[test]
    fn test_century_pivot() {
        let dt = strptime("65-01-01", "%y-%m-%d").unwrap();
        assert_eq!(dt.year(), 2065);
        let dt = strptime("75-01-01", "%y-%m-%d").unwrap();
        assert_eq!(dt.year(), 1975);
        // Boundary values either side of the pivot
        let dt = strptime("69-01-01", "%y-%m-%d").unwrap();
        assert_eq!(dt.year(), 2069);
        let dt = strptime("70-01-01", "%y-%m-%d").unwrap();
        assert_eq!(dt.year(), 1970);
    }

    #[test]
    fn test_month_names() {
        let dt = strptime("2016-Sep-22", "%Y-%b-%d").unwrap();
        assert_eq!(dt.month(), 9);
        let dt = strptime("2016-September-22", "%Y-%B-%d").unwrap();
        assert_eq!(dt.month(), 9);
        let dt = strptime("2016-Jan-01", "%Y-%b-%d").unwrap();
        assert_eq!(dt.month(), 1);
    }

    #[test]
    fn test_weekday_names_are_consumed_not_stored() {
        let dt = strptime("Thu 2016-09-22", "%a %Y-%m-%d").unwrap();
        assert_eq!(dt.day(), 22);
        // A wrong weekday name still parses: the name is shape, not data
        let dt = strptime("Mon 2016-09-22", "%a %Y-%m-%d").unwrap();
        assert_eq!(dt.day(), 22);
    }

    #[test]
    fn test_pm_correction() {
        let dt = strptime("02:PM", "%I:%p").unwrap();
        assert_eq!(dt.hour(), 14);
        let dt = strptime("02:AM", "%I:%p").unwrap();
        assert_eq!(dt.hour(), 2);
        // Hour 12 is left alone in both directions
        let dt = strptime("12:PM", "%I:%p").unwrap();
        assert_eq!(dt.hour(), 12);
        let dt = strptime("12:AM", "%I:%p").unwrap();
        assert_eq!(dt.hour(), 12);
    }

    #[test]
    fn test_microseconds() {
        let dt = strptime("14:04:26.123456", "%H:%M:%S.%f").unwrap();
        assert_eq!(dt.nanosecond(), 123_456_000);
    }

    #[test]
    fn test_zone_lookup() {
        let dt = strptime("2016-09-22 America/New_York", "%Y-%m-%d %Z").unwrap();
        assert_eq!(dt.timezone().name(), "America/New_York");
    }

    #[test]
    fn test_zone_lookup_failure() {
        let err = strptime("2016-09-22 Atlantis/Foo", "%Y-%m-%d %Z").unwrap_err();
        assert_eq!(err, ParseError::TimezoneLookup("Atlantis/Foo".to_string()));
    }

    #[test]
    fn test_offset_is_matched_but_not_applied() {
        let dt = strptime("2016-09-22T14:04:26+0530", "%Y-%m-%dT%H:%M:%S%z").unwrap();
        assert_eq!(dt.hour(), 14);
        assert_eq!(dt.timezone(), Tz::UTC);
    }

    #[test]
    fn test_composite_datetime() {
        let dt = strptime("Thu Sep 22 14:04:26 2016", "%c").unwrap();
        assert_eq!(
            (dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute(), dt.second()),
            (2016, 9, 22, 14, 4, 26)
        );
    }

    #[test]
    fn test_composite_date_and_time() {
        let dt = strptime("09/30/13", "%x").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2013, 9, 30));
        let dt = strptime("07:06:05", "%X").unwrap();
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (7, 6, 5));
    }

    #[test]
    fn test_literal_percent() {
        let dt = strptime("100% on 2016-09-22", "100%% on %Y-%m-%d").unwrap();
        assert_eq!(dt.day(), 22);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(
            strptime("not a date", "%Y-%m-%d").unwrap_err(),
            ParseError::NoMatch
        );
        // Partial matches are rejected: the pattern is anchored
        assert_eq!(
            strptime("2016-09-22 trailing", "%Y-%m-%d").unwrap_err(),
            ParseError::NoMatch
        );
    }

    #[test]
    fn test_unknown_directive() {
        assert_eq!(
            strptime("x", "%q").unwrap_err(),
            ParseError::Format(FormatError::UnknownDirective('q'))
        );
    }

    #[test]
    fn test_invalid_timestamp() {
        assert_eq!(
            strptime("2016-13-01", "%Y-%m-%d").unwrap_err(),
            ParseError::InvalidTimestamp
        );
        assert_eq!(
            strptime("2015-02-29", "%Y-%m-%d").unwrap_err(),
            ParseError::InvalidTimestamp
        );
    }

    #[test]
    fn test_round_trip() {
        let original = Utc.with_ymd_and_hms(2016, 9, 22, 14, 4, 26).unwrap();
        let format = "%Y-%m-%d %H:%M:%S";
        let rendered = strftime(&original, format).unwrap();
        let parsed = strptime(&rendered, format).unwrap();
        assert_eq!(
            (
                parsed.year(),
                parsed.month(),
                parsed.day(),
                parsed.hour(),
                parsed.minute(),
                parsed.second()
            ),
            (2016, 9, 22, 14, 4, 26)
        );
    }

    #[test]
    fn test_round_trip_twelve_hour() {
        let afternoon = Utc.with_ymd_and_hms(2016, 9, 22, 14, 0, 0).unwrap();
        let rendered = strftime(&afternoon, "%I:%p").unwrap();
        assert_eq!(rendered, "02:PM");
        assert_eq!(strptime(&rendered, "%I:%p").unwrap().hour(), 14);
    }
}
