//! Log levels and the context debug level.

use std::fmt;

/// Severity of a log message, from least to most verbose.
///
/// The numeric values are ABI-stable and shared with the C API.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogLevel {
    /// Nothing is logged.
    None = 0,
    /// Errors only.
    Error = 1,
    /// Errors and debug messages.
    Debug = 2,
    /// Everything, including per-call tracing.
    Trace = 3,
    /// Messages the user explicitly asked to see.
    Tell = 4,
}

impl LogLevel {
    /// Convert a raw level, returning `None` for values outside `0..=4`.
    pub fn from_i32(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::None),
            1 => Some(Self::Error),
            2 => Some(Self::Debug),
            3 => Some(Self::Trace),
            4 => Some(Self::Tell),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Error => "error",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::Tell => "tell",
        };
        f.write_str(s)
    }
}

/// Verbosity threshold held by a context.
///
/// A non-negative value `n` emits every message whose level is `<= n`.
/// A negative value `-n` uses the same threshold `n` but only while an
/// error is pending on the context ("quiet unless something failed").
///
/// The representable range is `-TRACE..=TELL`. Out-of-range input is
/// normalized by [`DebugLevel::clamped`], never rejected: anything more
/// negative than `-TRACE` becomes `TRACE` (the most verbose tracing
/// level) and anything above `TELL` becomes `TELL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DebugLevel(i32);

impl DebugLevel {
    /// Smallest accepted raw value.
    pub const MIN: i32 = -(LogLevel::Trace as i32);

    /// Largest accepted raw value.
    pub const MAX: i32 = LogLevel::Tell as i32;

    /// The level a freshly created context starts with.
    pub const DEFAULT: Self = Self(LogLevel::Error as i32);

    /// Normalize a raw level into the supported range.
    pub fn clamped(raw: i64) -> Self {
        if raw < Self::MIN as i64 {
            Self(LogLevel::Trace as i32)
        } else if raw > Self::MAX as i64 {
            Self(Self::MAX)
        } else {
            Self(raw as i32)
        }
    }

    /// The raw (possibly negative) value.
    pub fn get(self) -> i32 {
        self.0
    }

    /// Absolute verbosity threshold.
    pub fn threshold(self) -> i32 {
        self.0.abs()
    }

    /// Whether messages are suppressed unless an error is pending.
    pub fn quiet_unless_error(self) -> bool {
        self.0 < 0
    }

    /// Decide whether a message at `level` passes this threshold.
    pub fn allows(self, level: LogLevel, error_pending: bool) -> bool {
        if level as i32 > self.threshold() {
            return false;
        }
        !self.quiet_unless_error() || error_pending
    }
}

impl Default for DebugLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for DebugLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a debug level from configuration text (e.g. an environment variable).
///
/// Surrounding whitespace is ignored. Returns `None` when the text is not
/// an integer; an integer outside the supported range is clamped.
pub fn parse_debug_level(text: &str) -> Option<DebugLevel> {
    let trimmed = text.trim();
    if let Ok(raw) = trimmed.parse::<i64>() {
        return Some(DebugLevel::clamped(raw));
    }
    // Integers too large for i64 still carry a sign worth honouring.
    let digits = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        let raw = if trimmed.starts_with('-') { i64::MIN } else { i64::MAX };
        return Some(DebugLevel::clamped(raw));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_error() {
        assert_eq!(DebugLevel::default().get(), LogLevel::Error as i32);
    }

    #[test]
    fn below_minimum_clamps_to_trace() {
        assert_eq!(DebugLevel::clamped(-4).get(), LogLevel::Trace as i32);
        assert_eq!(DebugLevel::clamped(-1000).get(), 3);
    }

    #[test]
    fn minimum_is_accepted_verbatim() {
        assert_eq!(DebugLevel::clamped(-3).get(), -3);
    }

    #[test]
    fn above_maximum_clamps_to_tell() {
        assert_eq!(DebugLevel::clamped(99).get(), LogLevel::Tell as i32);
    }

    #[test]
    fn threshold_filters_by_level() {
        let level = DebugLevel::clamped(2);
        assert!(level.allows(LogLevel::Error, false));
        assert!(level.allows(LogLevel::Debug, false));
        assert!(!level.allows(LogLevel::Trace, false));
    }

    #[test]
    fn negative_level_is_quiet_unless_error_pending() {
        let level = DebugLevel::clamped(-2);
        assert!(level.quiet_unless_error());
        assert!(!level.allows(LogLevel::Error, false));
        assert!(level.allows(LogLevel::Debug, true));
        assert!(!level.allows(LogLevel::Trace, true));
    }

    #[test]
    fn parse_accepts_whitespace_and_sign() {
        assert_eq!(parse_debug_level(" 3 ").map(DebugLevel::get), Some(3));
        assert_eq!(parse_debug_level("-2").map(DebugLevel::get), Some(-2));
        assert_eq!(parse_debug_level("+1").map(DebugLevel::get), Some(1));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_debug_level(""), None);
        assert_eq!(parse_debug_level("verbose"), None);
        assert_eq!(parse_debug_level("3x"), None);
    }

    #[test]
    fn parse_clamps_huge_values() {
        let huge_negative = "-99999999999999999999999";
        assert_eq!(parse_debug_level(huge_negative).map(DebugLevel::get), Some(3));
        let huge_positive = "99999999999999999999999";
        assert_eq!(parse_debug_level(huge_positive).map(DebugLevel::get), Some(4));
    }

    #[test]
    fn level_round_trips_through_i32() {
        for level in [
            LogLevel::None,
            LogLevel::Error,
            LogLevel::Debug,
            LogLevel::Trace,
            LogLevel::Tell,
        ] {
            assert_eq!(LogLevel::from_i32(level as i32), Some(level));
        }
        assert_eq!(LogLevel::from_i32(5), None);
    }

    proptest! {
        #[test]
        fn clamped_is_always_in_range(raw in any::<i64>()) {
            let level = DebugLevel::clamped(raw);
            prop_assert!(level.get() >= DebugLevel::MIN);
            prop_assert!(level.get() <= DebugLevel::MAX);
        }

        #[test]
        fn in_range_values_are_preserved(raw in DebugLevel::MIN..=DebugLevel::MAX) {
            prop_assert_eq!(DebugLevel::clamped(raw as i64).get(), raw);
        }
    }
}
