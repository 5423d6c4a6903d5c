//! Size hints and their numeric sentinel encoding.
//!
//! Width and height hints travel through component properties as decimal
//! strings. The integer space is shared between explicit pixel counts and
//! three sentinels:
//!
//! ```text
//!   value >= 0       explicit pixels
//!   value == -1      automatic (size to content)
//!   value == -2      fill parent
//!   value <= -1000   percent tag, percent = -(value + 1000)
//! ```
//!
//! Property editors outside this crate rely on the exact numbers.
//!
//! Explicit and percent lengths are capped at [`LENGTH_MAX`] on decode.

use std::fmt;

use crate::component::props;
use crate::config::ScreenMetrics;

pub const LENGTH_AUTOMATIC: i32 = -1;
pub const LENGTH_FILL_PARENT: i32 = -2;
pub const LENGTH_PERCENT_TAG: i32 = -1000;

/// Largest length a hint or a measured leaf can resolve to.
pub const LENGTH_MAX: i32 = 1 << 24;

/// Layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Name of the size-hint property for this axis.
    pub fn hint_property(self) -> &'static str {
        match self {
            Axis::Horizontal => props::WIDTH,
            Axis::Vertical => props::HEIGHT,
        }
    }

    /// Screen dimension percent tags on this axis are relative to.
    pub fn reference(self, screen: &ScreenMetrics) -> i32 {
        match self {
            Axis::Horizontal => screen.usable_width(),
            Axis::Vertical => screen.usable_height(),
        }
    }
}

/// A decoded sizing request for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SizeHint {
    /// Size to content.
    #[default]
    Automatic,
    /// Share the container's leftover space with other fill-parent siblings.
    FillParent,
    /// Explicit pixel length.
    Pixels(i32),
    /// Percent of the screen's usable dimension on the same axis.
    Percent(i32),
}

impl SizeHint {
    /// Decode a raw property integer. Values between the sentinels
    /// (-999..=-3) have no meaning and decode to `None`.
    pub fn from_encoded(value: i32) -> Option<Self> {
        match value {
            v if v >= 0 => Some(SizeHint::Pixels(v.min(LENGTH_MAX))),
            LENGTH_AUTOMATIC => Some(SizeHint::Automatic),
            LENGTH_FILL_PARENT => Some(SizeHint::FillParent),
            v if v <= LENGTH_PERCENT_TAG => Some(SizeHint::Percent(-(v - LENGTH_PERCENT_TAG))),
            _ => None,
        }
    }

    /// Encode back into the property integer space.
    pub fn encode(self) -> i32 {
        match self {
            SizeHint::Automatic => LENGTH_AUTOMATIC,
            SizeHint::FillParent => LENGTH_FILL_PARENT,
            SizeHint::Pixels(px) => px,
            SizeHint::Percent(p) => LENGTH_PERCENT_TAG.saturating_sub(p),
        }
    }

    /// Parse a property string. Returns `None` for anything that is not a
    /// well-formed encoded integer; callers keep their previous hint.
    pub fn parse(text: &str) -> Option<Self> {
        text.trim().parse::<i32>().ok().and_then(Self::from_encoded)
    }

    /// Resolve against a reference dimension. Percent tags become pixels;
    /// automatic and fill-parent stay symbolic.
    pub fn resolve(self, reference: i32) -> Resolved {
        match self {
            SizeHint::Pixels(px) => Resolved::Pixels(px),
            SizeHint::Percent(p) => Resolved::Pixels(percent_length(p, reference)),
            SizeHint::Automatic => Resolved::Automatic,
            SizeHint::FillParent => Resolved::FillParent,
        }
    }

    #[inline]
    pub fn is_fill_parent(self) -> bool {
        matches!(self, SizeHint::FillParent)
    }
}

impl fmt::Display for SizeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// Result of resolving a hint against its reference dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Pixels(i32),
    Automatic,
    FillParent,
}

/// `percent * reference / 100`, truncating, at most [`LENGTH_MAX`].
///
/// Both operands are clamped non-negative and widened first, so truncation
/// and floor agree and large references cannot overflow.
pub fn percent_length(percent: i32, reference: i32) -> i32 {
    let value = i64::from(percent.max(0)) * i64::from(reference.max(0)) / 100;
    value.min(i64::from(LENGTH_MAX)) as i32
}

/// Clamp a length into `0..=LENGTH_MAX`.
#[inline]
pub fn clamp_length(value: i32) -> i32 {
    value.clamp(0, LENGTH_MAX)
}

/// A dimension inside a layout pass: either known pixels or a pending
/// fill-parent request the parent strategy has not distributed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Px(i32),
    FillParent,
}

impl Dimension {
    #[inline]
    pub fn px(self) -> Option<i32> {
        match self {
            Dimension::Px(v) => Some(v),
            Dimension::FillParent => None,
        }
    }

    #[inline]
    pub fn is_fill_parent(self) -> bool {
        matches!(self, Dimension::FillParent)
    }

    /// Known pixels, or `fallback` while still unresolved.
    #[inline]
    pub fn or(self, fallback: i32) -> i32 {
        self.px().unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sentinels() {
        assert_eq!(SizeHint::parse("120"), Some(SizeHint::Pixels(120)));
        assert_eq!(SizeHint::parse("0"), Some(SizeHint::Pixels(0)));
        assert_eq!(SizeHint::parse("-1"), Some(SizeHint::Automatic));
        assert_eq!(SizeHint::parse("-2"), Some(SizeHint::FillParent));
        assert_eq!(SizeHint::parse("-1050"), Some(SizeHint::Percent(50)));
        assert_eq!(SizeHint::parse("-1000"), Some(SizeHint::Percent(0)));
        assert_eq!(SizeHint::parse(" 42 "), Some(SizeHint::Pixels(42)));
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(SizeHint::parse("wide"), None);
        assert_eq!(SizeHint::parse(""), None);
        assert_eq!(SizeHint::parse("12.5"), None);
        assert_eq!(SizeHint::parse("-3"), None);
        assert_eq!(SizeHint::parse("-999"), None);
    }

    #[test]
    fn test_percent_tag_round_trip() {
        for p in 0..=100 {
            let encoded = -(p + 1000);
            assert_eq!(SizeHint::from_encoded(encoded), Some(SizeHint::Percent(p)));
            assert_eq!(SizeHint::Percent(p).encode(), encoded);
        }
    }

    #[test]
    fn test_percent_truncates() {
        // 33% of 320 = 105.6
        assert_eq!(percent_length(33, 320), 105);
        // 50% of 7 = 3.5
        assert_eq!(percent_length(50, 7), 3);
        assert_eq!(percent_length(100, 480), 480);
        assert_eq!(percent_length(0, 480), 0);
        assert_eq!(percent_length(10, -50), 0);
        assert_eq!(percent_length(10_000, i32::MAX), LENGTH_MAX);
    }

    #[test]
    fn test_pixels_capped() {
        assert_eq!(SizeHint::parse("2147483647"), Some(SizeHint::Pixels(LENGTH_MAX)));
        assert_eq!(SizeHint::parse("16777216"), Some(SizeHint::Pixels(LENGTH_MAX)));
        assert_eq!(SizeHint::parse("16777215"), Some(SizeHint::Pixels(LENGTH_MAX - 1)));

        let lowest = SizeHint::from_encoded(i32::MIN).unwrap();
        assert_eq!(lowest.encode(), i32::MIN);
        assert_eq!(lowest.resolve(400), Resolved::Pixels(LENGTH_MAX));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(SizeHint::Percent(25).resolve(400), Resolved::Pixels(100));
        assert_eq!(SizeHint::Pixels(7).resolve(400), Resolved::Pixels(7));
        assert_eq!(SizeHint::Automatic.resolve(400), Resolved::Automatic);
        assert_eq!(SizeHint::FillParent.resolve(400), Resolved::FillParent);
    }

    #[test]
    fn test_display_is_encoded_form() {
        assert_eq!(SizeHint::FillParent.to_string(), "-2");
        assert_eq!(SizeHint::Percent(30).to_string(), "-1030");
    }

    #[test]
    fn test_axis_cross_and_reference() {
        let screen = ScreenMetrics::new(300, 400);
        assert_eq!(Axis::Horizontal.cross(), Axis::Vertical);
        assert_eq!(Axis::Horizontal.reference(&screen), 300);
        assert_eq!(Axis::Vertical.reference(&screen), 400);
    }
}
