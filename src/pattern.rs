use regex::Regex;

use crate::scan::{FormatScanner, Token};
use crate::{FormatError, ParseError};

const WEEKDAY_ABBREV: &str = "Sun|Mon|Tue|Wed|Thu|Fri|Sat";
const WEEKDAY_FULL: &str = "Sunday|Monday|Tuesday|Wednesday|Thursday|Friday|Saturday";
const MONTH_ABBREV: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";
const MONTH_FULL: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";
const NUM_1_2: &str = "[0-9]{1,2}";
const NUM_2: &str = "[0-9]{2}";
const NUM_4: &str = "[0-9]{4}";
const NUM_6: &str = "[0-9]{6}";
const AM_PM: &str = "AM|PM";
const UTC_OFFSET: &str = "[+-][0-9]{4}";
const ZONE_NAME: &str = "[a-zA-Z/_]{3,}";

/// One piece of a directive's textual shape: literal glue, or a capture that
/// feeds the decoder for `field`. Atomic directives are a single capture;
/// composites (`c`, `x`, `X`) are a fixed sequence of captures and glue.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Segment {
    Lit(&'static str),
    Capture {
        field:    char,
        fragment: &'static str,
    },
}

const fn cap(field: char, fragment: &'static str) -> Segment {
    Segment::Capture { field, fragment }
}

const SEG_A: &[Segment] = &[cap('a', WEEKDAY_ABBREV)];
const SEG_A_FULL: &[Segment] = &[cap('A', WEEKDAY_FULL)];
const SEG_D: &[Segment] = &[cap('d', NUM_1_2)];
const SEG_B: &[Segment] = &[cap('b', MONTH_ABBREV)];
const SEG_B_FULL: &[Segment] = &[cap('B', MONTH_FULL)];
const SEG_M: &[Segment] = &[cap('m', NUM_1_2)];
const SEG_Y2: &[Segment] = &[cap('y', NUM_2)];
const SEG_Y4: &[Segment] = &[cap('Y', NUM_4)];
const SEG_H: &[Segment] = &[cap('H', NUM_1_2)];
const SEG_I: &[Segment] = &[cap('I', NUM_1_2)];
const SEG_P: &[Segment] = &[cap('p', AM_PM)];
const SEG_MIN: &[Segment] = &[cap('M', NUM_1_2)];
const SEG_SEC: &[Segment] = &[cap('S', NUM_1_2)];
const SEG_F: &[Segment] = &[cap('f', NUM_6)];
const SEG_Z_OFFSET: &[Segment] = &[cap('z', UTC_OFFSET)];
const SEG_Z_NAME: &[Segment] = &[cap('Z', ZONE_NAME)];
const SEG_PERCENT: &[Segment] = &[Segment::Lit("%")];

const SEG_DATETIME: &[Segment] = &[
    cap('a', WEEKDAY_ABBREV),
    Segment::Lit(" "),
    cap('b', MONTH_ABBREV),
    Segment::Lit(" "),
    cap('d', NUM_2),
    Segment::Lit(" "),
    cap('H', NUM_2),
    Segment::Lit(":"),
    cap('M', NUM_2),
    Segment::Lit(":"),
    cap('S', NUM_2),
    Segment::Lit(" "),
    cap('Y', NUM_4),
];

const SEG_DATE: &[Segment] = &[
    cap('m', NUM_2),
    Segment::Lit("/"),
    cap('d', NUM_2),
    Segment::Lit("/"),
    cap('y', NUM_2),
];

const SEG_TIME: &[Segment] = &[
    cap('H', NUM_2),
    Segment::Lit(":"),
    cap('M', NUM_2),
    Segment::Lit(":"),
    cap('S', NUM_2),
];

/// Textual shape of each parseable directive. Weekday-number and
/// week-number directives (`w`, `j`, `U`, `W`) have no input form.
fn segments(code: char) -> Option<&'static [Segment]> {
    match code {
        'a' => Some(SEG_A),
        'A' => Some(SEG_A_FULL),
        'd' => Some(SEG_D),
        'b' => Some(SEG_B),
        'B' => Some(SEG_B_FULL),
        'm' => Some(SEG_M),
        'y' => Some(SEG_Y2),
        'Y' => Some(SEG_Y4),
        'H' => Some(SEG_H),
        'I' => Some(SEG_I),
        'p' => Some(SEG_P),
        'M' => Some(SEG_MIN),
        'S' => Some(SEG_SEC),
        'f' => Some(SEG_F),
        'z' => Some(SEG_Z_OFFSET),
        'Z' => Some(SEG_Z_NAME),
        'c' => Some(SEG_DATETIME),
        'x' => Some(SEG_DATE),
        'X' => Some(SEG_TIME),
        '%' => Some(SEG_PERCENT),
        _ => None,
    }
}

/// A format string compiled into one anchored regular expression.
///
/// Capture groups get positional names (`g0`, `g1`, ...) because composite
/// directives repeat field codes and the regex engine requires unique group
/// names; `fields[n]` maps group `gn` back to its semantic field code.
#[derive(Debug)]
pub(crate) struct CompiledPattern {
    pub regex:  Regex,
    pub fields: Vec<char>,
}

impl CompiledPattern {
    /// Compiles `format` into a pattern matching the whole input. Built per
    /// call; nothing is cached.
    pub(crate) fn compile(format: &str) -> Result<Self, ParseError> {
        let mut pattern = String::from(r"\A");
        let mut fields = Vec::new();

        for token in FormatScanner::new(format) {
            match token {
                Token::Literal(literal) => pattern.push_str(&regex::escape(literal)),
                Token::Directive(directive) => {
                    let segs = segments(directive.code)
                        .ok_or(FormatError::UnknownDirective(directive.code))?;
                    for seg in segs {
                        match seg {
                            Segment::Lit(literal) => pattern.push_str(&regex::escape(literal)),
                            Segment::Capture { field, fragment } => {
                                pattern.push_str(&format!("(?P<g{}>{})", fields.len(), fragment));
                                fields.push(*field);
                            }
                        }
                    }
                }
            }
        }

        pattern.push_str(r"\z");
        let regex =
            Regex::new(&pattern).map_err(|e| ParseError::PatternCompile(e.to_string()))?;
        Ok(Self { regex, fields })
    }
}
