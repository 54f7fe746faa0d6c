//! # Floor Model
//!
//! Floors are identified by signed integers: `0` is the ground floor,
//! negative values are basements, positive values are above-ground storeys.
//!
//! ## Label Normalization
//!
//! Submission documents name floors inconsistently ("basement 2", "B2",
//! "ground floor", "3rd floor", plain numbers). [`FloorId::parse_label`]
//! normalizes the recognized vocabulary to a floor number; anything else is
//! a typed [`FloorParseError`], never a silent default. Half-floors
//! (mezzanines, entresols) are deliberately not modeled.
//!
//! ## Serialization
//!
//! A [`FloorId`] serializes as its integer value and deserializes from both
//! integers and labels, so assignment payloads may write `"floors": [-1, -2]`
//! or `"floors": ["basement 1", "basement 2"]` interchangeably. As a map key
//! it keeps numeric ordering, which keeps floor tables deterministic from
//! basement to roof.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FloorParseError, ValidationError};

/// A single floor of a building, identified by its signed storey number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FloorId(i32);

impl FloorId {
    /// Create a floor identifier from a storey number.
    pub const fn new(level: i32) -> Self {
        Self(level)
    }

    /// The signed storey number (`0` = ground).
    pub const fn level(&self) -> i32 {
        self.0
    }

    /// Whether this floor is below ground.
    pub const fn is_basement(&self) -> bool {
        self.0 < 0
    }

    /// Whether this floor is the ground floor.
    pub const fn is_ground(&self) -> bool {
        self.0 == 0
    }

    /// Normalize a textual floor label to a floor identifier.
    ///
    /// Recognized forms (case-insensitive, surrounding whitespace ignored):
    ///
    /// - plain signed integers: `"3"`, `"-2"`, `"0"`
    /// - ground aliases: `"ground"`, `"ground floor"`, `"gf"`
    /// - basements: `"basement"` (= −1), `"basement 2"`, `"b2"`
    /// - prefixed numbers: `"floor 3"`, `"level -1"`
    /// - ordinals: `"3rd"`, `"12th floor"`
    ///
    /// # Errors
    ///
    /// Returns [`FloorParseError`] for anything outside this vocabulary,
    /// including mezzanine/entresol labels.
    pub fn parse_label(label: &str) -> Result<Self, FloorParseError> {
        let norm = label.trim().to_ascii_lowercase();
        let unrecognized = || FloorParseError {
            label: label.to_string(),
        };

        if norm.is_empty() {
            return Err(unrecognized());
        }
        if let Ok(n) = norm.parse::<i32>() {
            return Ok(Self(n));
        }
        match norm.as_str() {
            "ground" | "ground floor" | "gf" => return Ok(Self(0)),
            "basement" => return Ok(Self(-1)),
            _ => {}
        }
        if let Some(rest) = norm.strip_prefix("basement ") {
            if let Ok(n) = rest.trim().parse::<u16>() {
                return Ok(Self(-i32::from(n)));
            }
            return Err(unrecognized());
        }
        if let Some(rest) = norm.strip_prefix('b') {
            if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(n) = rest.parse::<u16>() {
                    return Ok(Self(-i32::from(n)));
                }
            }
            return Err(unrecognized());
        }
        for prefix in ["floor ", "level "] {
            if let Some(rest) = norm.strip_prefix(prefix) {
                if let Ok(n) = rest.trim().parse::<i32>() {
                    return Ok(Self(n));
                }
                return Err(unrecognized());
            }
        }
        let ordinal = norm.strip_suffix(" floor").unwrap_or(&norm);
        if let Some(n) = parse_ordinal(ordinal) {
            return Ok(Self(n));
        }
        Err(unrecognized())
    }
}

/// Parse `"1st"`, `"2nd"`, `"3rd"`, `"11th"` into a storey number.
fn parse_ordinal(s: &str) -> Option<i32> {
    let digits = s
        .strip_suffix("st")
        .or_else(|| s.strip_suffix("nd"))
        .or_else(|| s.strip_suffix("rd"))
        .or_else(|| s.strip_suffix("th"))?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i32>().ok()
}

impl std::fmt::Display for FloorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FloorId {
    type Err = FloorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_label(s)
    }
}

impl From<i32> for FloorId {
    fn from(level: i32) -> Self {
        Self(level)
    }
}

impl Serialize for FloorId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for FloorId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FloorIdVisitor;

        impl<'de> Visitor<'de> for FloorIdVisitor {
            type Value = FloorId;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a floor number or a floor label string")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                i32::try_from(v)
                    .map(FloorId::new)
                    .map_err(|_| E::custom(format!("floor number {v} out of range")))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                i32::try_from(v)
                    .map(FloorId::new)
                    .map_err(|_| E::custom(format!("floor number {v} out of range")))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                FloorId::parse_label(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(FloorIdVisitor)
    }
}

/// An inclusive range of floors forming the resolver's floor universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRange {
    lowest: FloorId,
    highest: FloorId,
}

impl FloorRange {
    /// Create a floor range from inclusive bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFloorRange`] if `lowest > highest`.
    pub fn new(lowest: i32, highest: i32) -> Result<Self, ValidationError> {
        if lowest > highest {
            return Err(ValidationError::InvalidFloorRange {
                low: lowest,
                high: highest,
            });
        }
        Ok(Self {
            lowest: FloorId::new(lowest),
            highest: FloorId::new(highest),
        })
    }

    /// The lowest floor of the range.
    pub const fn lowest(&self) -> FloorId {
        self.lowest
    }

    /// The highest floor of the range.
    pub const fn highest(&self) -> FloorId {
        self.highest
    }

    /// Whether a floor falls inside the range.
    pub fn contains(&self, floor: FloorId) -> bool {
        self.lowest <= floor && floor <= self.highest
    }

    /// Iterate all floors of the range in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = FloorId> {
        (self.lowest.level()..=self.highest.level()).map(FloorId::new)
    }
}

impl Default for FloorRange {
    /// Five basement levels through twenty storeys above ground, the widest
    /// envelope seen in municipal submissions.
    fn default() -> Self {
        Self {
            lowest: FloorId::new(-5),
            highest: FloorId::new(20),
        }
    }
}
