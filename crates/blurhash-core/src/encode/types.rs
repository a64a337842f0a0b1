//! Core types for hash encoding.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodeError;
use crate::source::SourceError;

/// Smallest component count per axis.
pub const MIN_COMPONENTS: u32 = 1;

/// Largest component count per axis (the size flag is a single base-83 digit).
pub const MAX_COMPONENTS: u32 = 9;

/// Error types for hash encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A component count outside 1..=9.
    #[error(
        "{axis} must be in range {min}..={max}, got {value}",
        min = MIN_COMPONENTS,
        max = MAX_COMPONENTS
    )]
    InvalidComponentCount { axis: Axis, value: u32 },

    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The pixel source could not be normalized.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Downscaling before encoding failed.
    #[error("Failed to downscale image before encoding: {0}")]
    Resize(#[from] DecodeError),
}

/// Which component count a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Horizontal frequencies.
    X,
    /// Vertical frequencies.
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("xComponents"),
            Axis::Y => f.write_str("yComponents"),
        }
    }
}

/// Number of frequency components along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Components {
    x: u32,
    y: u32,
}

impl Components {
    /// Validate a pair of component counts.
    pub fn new(x: u32, y: u32) -> Result<Self, EncodeError> {
        check_axis(Axis::X, x)?;
        check_axis(Axis::Y, y)?;
        Ok(Self { x, y })
    }

    /// Horizontal component count.
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Vertical component count.
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Total number of factors, DC included.
    pub fn count(&self) -> usize {
        (self.x * self.y) as usize
    }

    /// The single-digit size flag written at the start of a hash.
    pub fn size_flag(&self) -> u64 {
        u64::from(self.x - 1) + u64::from(self.y - 1) * 9
    }

    /// Length of the hash these counts produce: size flag, scale byte,
    /// four DC digits, then two digits per AC term.
    pub fn hash_len(&self) -> usize {
        6 + 2 * (self.count() - 1)
    }

    /// Frequency pairs `(i, j)` in wire order: `j` outer, `i` inner.
    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> {
        let x = self.x;
        (0..self.y).flat_map(move |j| (0..x).map(move |i| (i, j)))
    }
}

fn check_axis(axis: Axis, value: u32) -> Result<(), EncodeError> {
    if (MIN_COMPONENTS..=MAX_COMPONENTS).contains(&value) {
        Ok(())
    } else {
        Err(EncodeError::InvalidComponentCount { axis, value })
    }
}

/// One basis projection, in linear light.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Factor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Factor {
    /// Largest of the three channels (signed).
    pub fn max_channel(&self) -> f64 {
        self.r.max(self.g).max(self.b)
    }
}

/// All factors of one image, in wire order. Index 0 is the DC term.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentGrid {
    components: Components,
    factors: Vec<Factor>,
}

impl ComponentGrid {
    pub(crate) fn new(components: Components, factors: Vec<Factor>) -> Self {
        debug_assert_eq!(factors.len(), components.count());
        Self {
            components,
            factors,
        }
    }

    /// Component counts the grid was computed for.
    pub fn components(&self) -> Components {
        self.components
    }

    /// The average color term.
    pub fn dc(&self) -> Factor {
        self.factors[0]
    }

    /// Every non-DC term, in wire order.
    pub fn ac(&self) -> &[Factor] {
        &self.factors[1..]
    }

    /// Every term, DC first.
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// Factor for frequency pair (`i`, `j`).
    pub fn get(&self, i: u32, j: u32) -> Option<&Factor> {
        if i >= self.components.x || j >= self.components.y {
            return None;
        }
        self.factors.get((j * self.components.x + i) as usize)
    }
}

/// How the basis projections are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Parallelism {
    /// One projection after another on the calling thread.
    Sequential,
    /// Projections spread over the rayon pool. Runs sequentially when the
    /// `parallel` feature is disabled. Output is identical either way.
    #[default]
    Parallel,
}

/// Options for [`encode_with_options`](super::encode_with_options).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EncodeOptions {
    /// Scheduling of the basis projections.
    pub parallelism: Parallelism,
    /// Downscale (bilinear, aspect preserved) so neither edge exceeds this
    /// before encoding. `None` encodes at full resolution.
    pub max_dimension: Option<u32>,
}

impl EncodeOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }
}

/// An encoded hash together with the values it was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Blurhash {
    /// The hash string.
    pub hash: String,
    /// Component counts encoded in the size flag.
    pub components: Components,
    /// DC term as 8-bit sRGB, usable as a flat placeholder color.
    pub average_color: [u8; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_components_valid_range() {
        for x in 1..=9 {
            for y in 1..=9 {
                let c = Components::new(x, y).unwrap();
                assert_eq!(c.count(), (x * y) as usize);
            }
        }
    }

    #[test]
    fn test_components_out_of_range() {
        let cases = [
            (0, 5, Axis::X, 0),
            (10, 5, Axis::X, 10),
            (5, 0, Axis::Y, 0),
            (5, 10, Axis::Y, 10),
        ];
        for (x, y, axis, value) in cases {
            match Components::new(x, y) {
                Err(EncodeError::InvalidComponentCount { axis: a, value: v }) => {
                    assert_eq!(a, axis);
                    assert_eq!(v, value);
                }
                other => panic!(
                    "Expected InvalidComponentCount for ({}, {}), got {:?}",
                    x, y, other
                ),
            }
        }
    }

    #[test]
    fn test_error_names_parameter_and_range() {
        let err = Components::new(0, 3).unwrap_err();
        assert_eq!(err.to_string(), "xComponents must be in range 1..=9, got 0");

        let err = Components::new(3, 12).unwrap_err();
        assert_eq!(err.to_string(), "yComponents must be in range 1..=9, got 12");
    }

    #[test]
    fn test_size_flag() {
        assert_eq!(Components::new(1, 1).unwrap().size_flag(), 0);
        assert_eq!(Components::new(4, 3).unwrap().size_flag(), 21);
        assert_eq!(Components::new(9, 9).unwrap().size_flag(), 80);
    }

    #[test]
    fn test_hash_len() {
        assert_eq!(Components::new(1, 1).unwrap().hash_len(), 6);
        assert_eq!(Components::new(4, 3).unwrap().hash_len(), 28);
        assert_eq!(Components::new(9, 9).unwrap().hash_len(), 166);
    }

    #[test]
    fn test_pairs_are_row_major() {
        let pairs: Vec<_> = Components::new(3, 2).unwrap().pairs().collect();
        assert_eq!(pairs, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_grid_accessors() {
        let components = Components::new(2, 2).unwrap();
        let factors: Vec<Factor> = (0..4)
            .map(|n| Factor {
                r: n as f64,
                g: 0.0,
                b: 0.0,
            })
            .collect();
        let grid = ComponentGrid::new(components, factors);

        assert_eq!(grid.dc().r, 0.0);
        assert_eq!(grid.ac().len(), 3);
        assert_eq!(grid.get(1, 1).unwrap().r, 3.0);
        assert_eq!(grid.get(0, 1).unwrap().r, 2.0);
        assert!(grid.get(2, 0).is_none());
    }

    #[test]
    fn test_factor_max_channel_is_signed() {
        let f = Factor {
            r: -0.9,
            g: -0.1,
            b: -0.5,
        };
        assert_eq!(f.max_channel(), -0.1);
    }

    #[test]
    fn test_options_default() {
        let options = EncodeOptions::new();
        assert_eq!(options.parallelism, Parallelism::Parallel);
        assert_eq!(options.max_dimension, None);
    }
}
