use std::fmt;
use std::str::FromStr;

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Orientation correction as XYZ Euler angles in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerDegrees {
    #[allow(missing_docs)]
    pub x: f32,
    #[allow(missing_docs)]
    pub y: f32,
    #[allow(missing_docs)]
    pub z: f32,
}

impl EulerDegrees {
    /// Angles in degrees.
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Rotation applying X, then Y, then Z.
    #[must_use]
    pub fn to_quat(self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.x.to_radians(),
            self.y.to_radians(),
            self.z.to_radians(),
        )
    }

    /// Whether every angle is finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<Vec3> for EulerDegrees {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Scene asset an orientation correction applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrientationTarget {
    /// The main splat asset (`"main"`).
    Main,
    /// Hotspot `n`'s asset (`"hotspotN"`).
    Hotspot(usize),
}

impl fmt::Display for OrientationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => f.write_str("main"),
            Self::Hotspot(n) => write!(f, "hotspot{n}"),
        }
    }
}

/// Unrecognized orientation target name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTarget(pub String);

impl fmt::Display for UnknownTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown orientation target '{}'", self.0)
    }
}

impl std::error::Error for UnknownTarget {}

impl FromStr for OrientationTarget {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "main" {
            return Ok(Self::Main);
        }
        s.strip_prefix("hotspot")
            .and_then(|n| n.parse().ok())
            .map(Self::Hotspot)
            .ok_or_else(|| UnknownTarget(s.to_owned()))
    }
}
