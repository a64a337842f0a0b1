//! Projection of an image onto the 2D cosine basis.
//!
//! Each frequency pair `(i, j)` is one self-contained reduction over the whole
//! image:
//!
//! ```text
//! factor = norm / (w * h) * Σy Σx cos(π i x / w) cos(π j y / h) linear(p[y][x])
//! ```
//!
//! with `norm = 1` for the DC term and `2` otherwise. Pairs never share
//! partial sums, so any schedule produces bit-identical factors.

use std::f64::consts::PI;

use super::types::{ComponentGrid, Components, Factor, Parallelism};
use crate::color::srgb_to_linear;
use crate::source::PixelBuffer;

/// A pixel buffer converted to linear light once, shared by every projection.
pub(crate) struct LinearImage {
    width: u32,
    height: u32,
    pixels: Vec<[f64; 3]>,
}

impl LinearImage {
    /// Convert every channel through the sRGB lookup table.
    pub(crate) fn from_buffer(buffer: &PixelBuffer) -> Self {
        let pixels = buffer
            .pixels
            .chunks_exact(3)
            .map(|p| [srgb_to_linear(p[0]), srgb_to_linear(p[1]), srgb_to_linear(p[2])])
            .collect();

        Self {
            width: buffer.width,
            height: buffer.height,
            pixels,
        }
    }

    /// Project onto the basis function for frequency pair (`i`, `j`).
    pub(crate) fn project(&self, i: u32, j: u32) -> Factor {
        let width = self.width as usize;
        let normalization = if i == 0 && j == 0 { 1.0 } else { 2.0 };

        // Both series are built before the O(w * h) loop
        let cos_x = cosine_series(i, self.width);
        let cos_y = cosine_series(j, self.height);

        let (mut r, mut g, mut b) = (0.0, 0.0, 0.0);
        for (row, &cy) in self.pixels.chunks_exact(width).zip(&cos_y) {
            for (pixel, &cx) in row.iter().zip(&cos_x) {
                let basis = cx * cy;
                r += basis * pixel[0];
                g += basis * pixel[1];
                b += basis * pixel[2];
            }
        }

        let scale = normalization / (self.pixels.len() as f64);
        Factor {
            r: r * scale,
            g: g * scale,
            b: b * scale,
        }
    }
}

/// `cos(π * frequency * n / length)` for `n` in `0..length`.
fn cosine_series(frequency: u32, length: u32) -> Vec<f64> {
    (0..length)
        .map(|n| (PI * f64::from(frequency) * f64::from(n) / f64::from(length)).cos())
        .collect()
}

/// Compute every factor for `components`, in wire order.
///
/// The returned grid is only built after every projection has finished.
pub(crate) fn compute_grid(
    image: &LinearImage,
    components: Components,
    parallelism: Parallelism,
) -> ComponentGrid {
    let factors = match parallelism {
        #[cfg(feature = "parallel")]
        Parallelism::Parallel => {
            use rayon::prelude::*;

            let pairs: Vec<(u32, u32)> = components.pairs().collect();
            pairs.par_iter().map(|&(i, j)| image.project(i, j)).collect()
        }
        _ => components
            .pairs()
            .map(|(i, j)| image.project(i, j))
            .collect(),
    };

    ComponentGrid::new(components, factors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn linear(buffer: &PixelBuffer) -> LinearImage {
        LinearImage::from_buffer(buffer)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-12,
            "Expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_cosine_series() {
        let series = cosine_series(1, 4);
        assert_eq!(series.len(), 4);
        assert_close(series[0], 1.0);
        assert_close(series[2], 0.0);
        assert_close(series[3], -(2f64.sqrt() / 2.0));

        assert!(cosine_series(0, 5).iter().all(|&c| c == 1.0));
    }

    #[test]
    fn test_dc_is_average_linear_color() {
        let buffer = PixelBuffer::new(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();
        let dc = linear(&buffer).project(0, 0);
        assert_close(dc.r, 0.5);
        assert_close(dc.g, 0.0);
        assert_close(dc.b, 0.5);
    }

    #[test]
    fn test_solid_color_has_zero_ac() {
        let buffer = PixelBuffer::solid(7, 5, Rgb([200, 50, 120]));
        let image = linear(&buffer);
        let components = Components::new(4, 4).unwrap();
        let grid = compute_grid(&image, components, Parallelism::Sequential);

        for factor in grid.ac() {
            assert!(factor.r.abs() < 1e-12);
            assert!(factor.g.abs() < 1e-12);
            assert!(factor.b.abs() < 1e-12);
        }
        assert_close(grid.dc().r, srgb_to_linear(200));
    }

    #[test]
    fn test_horizontal_split_excites_first_x_frequency() {
        // Left half black, right half white
        let mut pixels = Vec::new();
        for _y in 0..4 {
            for x in 0..8 {
                let v = if x < 4 { 0 } else { 255 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        let buffer = PixelBuffer::new(8, 4, pixels).unwrap();
        let image = linear(&buffer);

        let horizontal = image.project(1, 0);
        let vertical = image.project(0, 1);

        // Bright side is where cos(π x / w) is negative
        assert!(horizontal.r < -0.5);
        assert!(vertical.r.abs() < 1e-12);
    }

    #[test]
    fn test_grid_order_matches_pairs() {
        let pixels: Vec<u8> = (0..6 * 4 * 3).map(|v| (v * 37 % 256) as u8).collect();
        let buffer = PixelBuffer::new(6, 4, pixels).unwrap();
        let image = linear(&buffer);
        let components = Components::new(3, 2).unwrap();
        let grid = compute_grid(&image, components, Parallelism::Sequential);

        for (i, j) in components.pairs() {
            assert_eq!(grid.get(i, j).copied(), Some(image.project(i, j)));
        }
    }

    #[test]
    fn test_parallel_matches_sequential_bit_for_bit() {
        let pixels: Vec<u8> = (0..31 * 17 * 3).map(|v| (v * 91 % 251) as u8).collect();
        let buffer = PixelBuffer::new(31, 17, pixels).unwrap();
        let image = linear(&buffer);
        let components = Components::new(9, 9).unwrap();

        let sequential = compute_grid(&image, components, Parallelism::Sequential);
        let parallel = compute_grid(&image, components, Parallelism::Parallel);
        assert_eq!(sequential, parallel);
    }
}
