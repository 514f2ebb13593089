//! Closed tag color set.
//!
//! # Invariants
//! - Persisted codes are `0..=5`; anything else decodes to `TagColor::None`.
//! - Text names match the export format (`"Red"`, `"None"`, ...).

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Color label attached to a note tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagColor {
    #[default]
    None,
    Red,
    Green,
    Blue,
    Yellow,
    Black,
}

impl TagColor {
    /// Every member of the closed set, in code order.
    pub const ALL: [TagColor; 6] = [
        TagColor::None,
        TagColor::Red,
        TagColor::Green,
        TagColor::Blue,
        TagColor::Yellow,
        TagColor::Black,
    ];

    /// Decodes a raw code, coercing out-of-range values to `None`.
    pub fn from_code(code: i64) -> Self {
        Self::try_from_code(code).unwrap_or(TagColor::None)
    }

    /// Decodes a raw code without coercion.
    pub fn try_from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TagColor::None),
            1 => Some(TagColor::Red),
            2 => Some(TagColor::Green),
            3 => Some(TagColor::Blue),
            4 => Some(TagColor::Yellow),
            5 => Some(TagColor::Black),
            _ => None,
        }
    }

    /// Stable storage code.
    pub fn code(self) -> i64 {
        match self {
            TagColor::None => 0,
            TagColor::Red => 1,
            TagColor::Green => 2,
            TagColor::Blue => 3,
            TagColor::Yellow => 4,
            TagColor::Black => 5,
        }
    }

    /// Text name used by import/export documents.
    pub fn as_str(self) -> &'static str {
        match self {
            TagColor::None => "None",
            TagColor::Red => "Red",
            TagColor::Green => "Green",
            TagColor::Blue => "Blue",
            TagColor::Yellow => "Yellow",
            TagColor::Black => "Black",
        }
    }

    /// Parses an exact text name. Returns `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.as_str() == name)
    }
}

impl Display for TagColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<i64> for TagColor {
    fn from(value: i64) -> Self {
        Self::from_code(value)
    }
}

impl From<i32> for TagColor {
    fn from(value: i32) -> Self {
        Self::from_code(i64::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::TagColor;

    #[test]
    fn codes_inside_the_set_are_preserved() {
        for color in TagColor::ALL {
            assert_eq!(TagColor::from_code(color.code()), color);
        }
    }

    #[test]
    fn codes_outside_the_set_become_none() {
        for code in [i64::MIN, -1, 6, i64::from(i32::MAX), i64::MAX] {
            assert_eq!(TagColor::from_code(code), TagColor::None);
            assert_eq!(TagColor::try_from_code(code), None);
        }
    }

    #[test]
    fn names_are_case_sensitive() {
        assert_eq!(TagColor::from_name("Blue"), Some(TagColor::Blue));
        assert_eq!(TagColor::from_name("blue"), None);
        assert_eq!(TagColor::from_name(""), None);
    }
}
