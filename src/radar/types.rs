use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// How an entry moved since the previous edition of the radar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Moved {
    Regressed,
    #[default]
    Unchanged,
    Advanced,
    New,
}

impl TryFrom<i8> for Moved {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Moved::Regressed),
            0 => Ok(Moved::Unchanged),
            1 => Ok(Moved::Advanced),
            2 => Ok(Moved::New),
            other => Err(format!("invalid `moved` value {other}, expected -1, 0, 1 or 2")),
        }
    }
}

impl From<Moved> for i8 {
    fn from(moved: Moved) -> Self {
        match moved {
            Moved::Regressed => -1,
            Moved::Unchanged => 0,
            Moved::Advanced => 1,
            Moved::New => 2,
        }
    }
}

/// Marker shape drawn for a blip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlipShape {
    Circle,
    TriangleUp,
    TriangleDown,
    Star,
}

impl From<Moved> for BlipShape {
    fn from(moved: Moved) -> Self {
        match moved {
            Moved::Advanced => BlipShape::TriangleUp,
            Moved::Regressed => BlipShape::TriangleDown,
            Moved::New => BlipShape::Star,
            Moved::Unchanged => BlipShape::Circle,
        }
    }
}

/// One item to place on the radar, as supplied by the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub label: String,
    pub quadrant: usize,
    pub ring: usize,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub moved: Moved,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

fn default_active() -> bool {
    true
}

impl Entry {
    pub fn new(label: impl Into<String>, quadrant: usize, ring: usize) -> Self {
        Self {
            label: label.into(),
            quadrant,
            ring,
            active: true,
            moved: Moved::Unchanged,
            link: None,
        }
    }
}

/// Layout output for one entry, at the same index as its input `Entry`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedEntry {
    pub index: usize,
    pub id: usize,
    pub quadrant: usize,
    pub ring: usize,
    pub position: Point,
    pub color: String,
    pub shape: BlipShape,
}
