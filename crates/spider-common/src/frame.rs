//! Boundary shape drawn around a radar chart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SpiderError;

/// Frame drawn around the plotting area of a radar chart.
///
/// Both shapes share the same center and circumscribed radius, so spoke
/// angles do not depend on the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FrameShape {
    #[default]
    Circle,
    /// Regular polygon with one vertex on every spoke.
    Polygon,
}

impl FrameShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameShape::Circle => "circle",
            FrameShape::Polygon => "polygon",
        }
    }
}

impl FromStr for FrameShape {
    type Err = SpiderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "circle" => Ok(FrameShape::Circle),
            "polygon" => Ok(FrameShape::Polygon),
            other => Err(SpiderError::InvalidFrameShape(other.to_string())),
        }
    }
}

impl TryFrom<String> for FrameShape {
    type Error = SpiderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FrameShape> for String {
    fn from(shape: FrameShape) -> Self {
        shape.as_str().to_string()
    }
}

impl fmt::Display for FrameShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
