use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Orientation label attached to a single product image.
///
/// Serialized in upper case (`"FRONT"`, `"PACKAGE"`), which is also the
/// backend's `viewType` wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewTag {
    Front,
    Back,
    Left,
    Right,
    Top,
    Bottom,
    Detail,
    Package,
}

impl ViewTag {
    /// Every tag, in declaration order.
    pub const ALL: [ViewTag; 8] = [
        ViewTag::Front,
        ViewTag::Back,
        ViewTag::Left,
        ViewTag::Right,
        ViewTag::Top,
        ViewTag::Bottom,
        ViewTag::Detail,
        ViewTag::Package,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ViewTag::Front => "FRONT",
            ViewTag::Back => "BACK",
            ViewTag::Left => "LEFT",
            ViewTag::Right => "RIGHT",
            ViewTag::Top => "TOP",
            ViewTag::Bottom => "BOTTOM",
            ViewTag::Detail => "DETAIL",
            ViewTag::Package => "PACKAGE",
        }
    }
}

impl std::fmt::Display for ViewTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewTag {
    type Err = String;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ViewTag::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown view tag '{wanted}'"))
    }
}
