use std::fmt;

use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike};

use crate::FormatError;
use crate::consts::{MONTHS_ABBREV, MONTHS_FULL, NANOS_PER_MICRO, WEEKDAYS_ABBREV, WEEKDAYS_FULL};
use crate::scan::{FormatScanner, Token};

/// Renders `t` through a strftime-style format string.
///
/// Literal text passes through unchanged; each `%`-directive is replaced by
/// the corresponding calendar field (see the README for the full table).
/// `%-` before a numeric directive suppresses zero-padding. The result is
/// all-or-nothing: an unknown directive fails the whole call.
///
/// # Errors
/// Returns `FormatError::UnknownDirective` if the format references a code
/// outside the directive alphabet.
pub fn strftime<Tz: TimeZone>(t: &DateTime<Tz>, format: &str) -> Result<String, FormatError>
where
    Tz::Offset: fmt::Display,
{
    let mut out = String::with_capacity(format.len());
    for token in FormatScanner::new(format) {
        match token {
            Token::Literal(literal) => out.push_str(literal),
            Token::Directive(directive) => {
                out.push_str(&render_one(t, directive.code, directive.no_pad)?);
            }
        }
    }
    Ok(out)
}

/// Formats a single directive. Composite directives (`c`, `x`, `X`) re-enter
/// here for each of their atomic parts, passing the flag through.
fn render_one<Tz: TimeZone>(t: &DateTime<Tz>, code: char, no_pad: bool) -> Result<String, FormatError>
where
    Tz::Offset: fmt::Display,
{
    let rendered = match code {
        'a' => WEEKDAYS_ABBREV[t.weekday().num_days_from_sunday() as usize].to_string(),
        'A' => WEEKDAYS_FULL[t.weekday().num_days_from_sunday() as usize].to_string(),
        'w' => t.weekday().num_days_from_sunday().to_string(),
        'd' => pad2(t.day(), no_pad),
        'b' => MONTHS_ABBREV[t.month0() as usize].to_string(),
        'B' => MONTHS_FULL[t.month0() as usize].to_string(),
        'm' => pad2(t.month(), no_pad),
        'y' => format!("{:02}", t.year().rem_euclid(100)),
        'Y' => t.year().to_string(),
        'H' => pad2(t.hour(), no_pad),
        // Hour mod 12, so both noon and midnight render as 0
        'I' => pad2(t.hour() % 12, no_pad),
        'p' => if t.hour() > 12 { "PM" } else { "AM" }.to_string(),
        'M' => pad2(t.minute(), no_pad),
        'S' => pad2(t.second(), no_pad),
        'f' => format!("{:06}", t.nanosecond() / NANOS_PER_MICRO),
        'z' => utc_offset(t),
        'Z' => t.offset().to_string(),
        'j' => {
            if no_pad {
                t.ordinal().to_string()
            } else {
                format!("{:03}", t.ordinal())
            }
        }
        'U' => format!(
            "{:02}",
            (t.ordinal0() + 7 - t.weekday().num_days_from_sunday()) / 7
        ),
        'W' => format!(
            "{:02}",
            (t.ordinal0() + 7 - t.weekday().num_days_from_monday()) / 7
        ),
        'c' => format!(
            "{} {} {} {}:{}:{} {}",
            render_one(t, 'a', no_pad)?,
            render_one(t, 'b', no_pad)?,
            render_one(t, 'd', no_pad)?,
            render_one(t, 'H', no_pad)?,
            render_one(t, 'M', no_pad)?,
            render_one(t, 'S', no_pad)?,
            render_one(t, 'Y', no_pad)?,
        ),
        'x' => format!(
            "{}/{}/{}",
            render_one(t, 'm', no_pad)?,
            render_one(t, 'd', no_pad)?,
            render_one(t, 'y', no_pad)?,
        ),
        'X' => format!(
            "{}:{}:{}",
            render_one(t, 'H', no_pad)?,
            render_one(t, 'M', no_pad)?,
            render_one(t, 'S', no_pad)?,
        ),
        '%' => "%".to_string(),
        _ => return Err(FormatError::UnknownDirective(code)),
    };
    Ok(rendered)
}

fn pad2(value: u32, no_pad: bool) -> String {
    if no_pad {
        value.to_string()
    } else {
        format!("{value:02}")
    }
}

/// UTC offset of `t` as `+HHMM` / `-HHMM`
fn utc_offset<Tz: TimeZone>(t: &DateTime<Tz>) -> String {
    let mut seconds = t.offset().fix().local_minus_utc();
    let sign = if seconds < 0 {
        seconds = -seconds;
        '-'
    } else {
        '+'
    };
    format!("{sign}{:02}{:02}", seconds / 3600, (seconds % 3600) / 60)
}
