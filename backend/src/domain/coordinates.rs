//! Integer grid coordinates and their canonical `x=<x>,y=<y>` text form.
//!
//! The text form doubles as the search cache key, so two equal points always
//! format to the same string. Parsing is strict: no signs, no decimals, no
//! whitespace.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Text emitted for a restaurant without coordinates.
pub const ABSENT_COORDINATES: &str = "x=0,y=0";

static COORDINATES_RE: OnceLock<Regex> = OnceLock::new();

fn coordinates_regex() -> &'static Regex {
    COORDINATES_RE.get_or_init(|| {
        Regex::new(r"^x=([0-9]+),y=([0-9]+)$")
            .unwrap_or_else(|error| panic!("coordinates regex failed to compile: {error}"))
    })
}

/// Failure to parse coordinate text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinatesParseError {
    /// Input does not match `x=<int>,y=<int>`.
    #[error("coordinates must look like x=<int>,y=<int>, got {input:?}")]
    Malformed { input: String },
    /// An axis value does not fit into 32 bits.
    #[error("coordinate {axis} is out of range in {input:?}")]
    OutOfRange { axis: char, input: String },
}

impl CoordinatesParseError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            Self::Malformed { input } | Self::OutOfRange { input, .. } => input,
        }
    }
}

/// A point on the non-negative integer grid.
///
/// # Examples
/// ```
/// use restaurant_search::domain::Coordinates;
///
/// let point = Coordinates::parse("x=3,y=2").expect("canonical text");
/// assert_eq!(point, Coordinates::new(3, 2));
/// assert_eq!(point.to_string(), "x=3,y=2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinates {
    x: u32,
    y: u32,
}

impl Coordinates {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> u32 {
        self.x
    }

    pub fn y(&self) -> u32 {
        self.y
    }

    /// Parse the canonical text form.
    ///
    /// Leading zeros are accepted and dropped when formatting again.
    pub fn parse(text: &str) -> Result<Self, CoordinatesParseError> {
        let captures = coordinates_regex().captures(text).ok_or_else(|| {
            CoordinatesParseError::Malformed {
                input: text.to_owned(),
            }
        })?;
        let axis = |index: usize, name: char| {
            captures[index]
                .parse::<u32>()
                .map_err(|_| CoordinatesParseError::OutOfRange {
                    axis: name,
                    input: text.to_owned(),
                })
        };
        Ok(Self::new(axis(1, 'x')?, axis(2, 'y')?))
    }

    /// Format optional coordinates, falling back to [`ABSENT_COORDINATES`].
    ///
    /// The fallback is a placeholder and does not describe a real location.
    pub fn format(coordinates: Option<&Coordinates>) -> String {
        coordinates.map_or_else(|| ABSENT_COORDINATES.to_owned(), ToString::to_string)
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        (dx as f64).hypot(dy as f64)
    }

    /// Distance from optional `coordinates` to `origin`.
    ///
    /// Missing coordinates are infinitely far away and yield [`f64::MAX`].
    pub fn distance_between(coordinates: Option<&Coordinates>, origin: &Coordinates) -> f64 {
        coordinates.map_or(f64::MAX, |point| point.distance_to(origin))
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x={},y={}", self.x, self.y)
    }
}

impl FromStr for Coordinates {
    type Err = CoordinatesParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Coordinates {
    type Error = CoordinatesParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Coordinates> for String {
    fn from(value: Coordinates) -> Self {
        value.to_string()
    }
}
