/// Character that introduces a directive in a format string
pub const DIRECTIVE_MARKER: char = '%';
/// Optional flag after the marker that suppresses zero-padding
pub const NO_PAD_FLAG: char = '-';

/// Two-digit years below this resolve to the 2000s, the rest to the 1900s
pub const CENTURY_PIVOT: i32 = 70;
/// Century added to two-digit years below the pivot
pub const CENTURY_2000: i32 = 2000;
/// Century added to two-digit years at or above the pivot
pub const CENTURY_1900: i32 = 1900;

/// Nanoseconds per microsecond, for scaling the `%f` field
pub const NANOS_PER_MICRO: u32 = 1_000;

/// Abbreviated weekday names, indexed by days-from-Sunday (0 = Sunday)
pub const WEEKDAYS_ABBREV: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Full weekday names, indexed by days-from-Sunday (0 = Sunday)
pub const WEEKDAYS_FULL: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Abbreviated month names, indexed by month - 1
pub const MONTHS_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Full month names, indexed by month - 1
pub const MONTHS_FULL: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Every directive code the format grammar accepts, for both output and
/// validation. The input side supports a subset (see `pattern`).
pub const DIRECTIVE_ALPHABET: [char; 24] = [
    'a', 'A', 'w', 'd', 'b', 'B', 'm', 'y', 'Y', 'H', 'I', 'p', 'M', 'S', 'f', 'z', 'Z', 'j',
    'U', 'W', 'c', 'x', 'X', '%',
];

/// Returns true if `code` is a member of the directive alphabet
pub(crate) fn is_directive(code: char) -> bool {
    DIRECTIVE_ALPHABET.contains(&code)
}
