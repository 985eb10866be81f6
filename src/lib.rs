mod consts;
mod parse;
mod pattern;
mod prelude;
mod render;
mod scan;

pub use consts::{DIRECTIVE_ALPHABET, MONTHS_ABBREV, MONTHS_FULL, WEEKDAYS_ABBREV, WEEKDAYS_FULL};
pub use parse::strptime;
pub use render::strftime;

use crate::prelude::*;
use crate::scan::{FormatScanner, Token};

/// Error for format strings that step outside the directive alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FormatError {
    #[display(fmt = "Unknown directive: %{_0}")]
    UnknownDirective(char),
}

impl std::error::Error for FormatError {}

/// Error type for `strptime`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The format string itself is bad.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// The assembled matching pattern failed to compile.
    #[error("Could not compile matching pattern: {0}")]
    PatternCompile(String),

    /// The input value does not conform to the format.
    #[error("Input does not match the format")]
    NoMatch,

    /// A captured value could not be decoded into its field.
    #[error("Invalid value {value:?} for field %{field}: {reason}")]
    FieldConversion {
        field:  char,
        value:  String,
        reason: String,
    },

    /// A `%Z` capture named no known time zone.
    #[error("Unknown time zone: {0}")]
    TimezoneLookup(String),

    /// The decoded fields name no real instant (e.g. month 13).
    #[error("Decoded fields do not form a valid timestamp")]
    InvalidTimestamp,
}

/// Validates that every directive in `format` is known, without touching a
/// timestamp or compiling a pattern. Cheap pre-flight for user-supplied
/// formats.
///
/// # Errors
/// Returns `FormatError::UnknownDirective` for the first code outside the
/// directive alphabet.
pub fn check(format: &str) -> Result<(), FormatError> {
    for token in FormatScanner::new(format) {
        if let Token::Directive(directive) = token {
            if !consts::is_directive(directive.code) {
                return Err(FormatError::UnknownDirective(directive.code));
            }
        }
    }
    Ok(())
}
