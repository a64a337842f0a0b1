//! Quantization of basis factors into the integers written to a hash.

use super::types::Factor;
use crate::color::{linear_to_srgb, sign_pow};

/// Resolution of the AC scale byte.
const AC_SCALE_STEPS: f64 = 166.0;

/// Largest value of the single-digit scale byte.
const MAX_SCALE_BYTE: f64 = 82.0;

/// Levels per AC channel (base 19).
const AC_LEVELS: u64 = 19;

/// Pack the DC term as 24-bit sRGB: `(R << 16) | (G << 8) | B`.
pub fn encode_dc(dc: &Factor) -> u64 {
    let [r, g, b] = dc_to_srgb(dc);
    (u64::from(r) << 16) | (u64::from(g) << 8) | u64::from(b)
}

/// The DC term as 8-bit sRGB.
pub fn dc_to_srgb(dc: &Factor) -> [u8; 3] {
    [linear_to_srgb(dc.r), linear_to_srgb(dc.g), linear_to_srgb(dc.b)]
}

/// Largest signed channel value across all AC factors, never below zero.
pub fn ac_maximum(ac: &[Factor]) -> f64 {
    ac.iter().map(Factor::max_channel).fold(0.0, f64::max)
}

/// Quantize the AC maximum into the scale byte (0..=82).
pub fn quantize_maximum(maximum: f64) -> u64 {
    (maximum * AC_SCALE_STEPS - 0.5)
        .floor()
        .clamp(0.0, MAX_SCALE_BYTE) as u64
}

/// The maximum a decoder reconstructs from the scale byte.
pub fn dequantize_maximum(scale_byte: u64) -> f64 {
    (scale_byte as f64 + 1.0) / AC_SCALE_STEPS
}

/// Pack one AC factor as three base-19 digits, red most significant.
///
/// Result is in 0..=6858 (`19^3 - 1`).
pub fn encode_ac(factor: &Factor, maximum: f64) -> u64 {
    let r = quantize_ac_channel(factor.r, maximum);
    let g = quantize_ac_channel(factor.g, maximum);
    let b = quantize_ac_channel(factor.b, maximum);
    r * AC_LEVELS * AC_LEVELS + g * AC_LEVELS + b
}

/// Map one channel onto 0..=18, with 9 meaning zero.
#[inline]
fn quantize_ac_channel(value: f64, maximum: f64) -> u64 {
    (sign_pow(value / maximum, 0.5) * 9.0 + 9.5)
        .floor()
        .clamp(0.0, (AC_LEVELS - 1) as f64) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factor(r: f64, g: f64, b: f64) -> Factor {
        Factor { r, g, b }
    }

    #[test]
    fn test_encode_dc_packs_channels() {
        assert_eq!(encode_dc(&factor(0.0, 0.0, 0.0)), 0);
        assert_eq!(encode_dc(&factor(1.0, 1.0, 1.0)), 0xFFFFFF);
        assert_eq!(encode_dc(&factor(1.0, 0.0, 0.0)), 0xFF0000);
        assert_eq!(encode_dc(&factor(0.0, 0.0, 1.0)), 0x0000FF);
    }

    #[test]
    fn test_encode_dc_clamps_out_of_gamut() {
        assert_eq!(encode_dc(&factor(1.7, -0.2, 0.0)), 0xFF0000);
    }

    #[test]
    fn test_ac_maximum() {
        assert_eq!(ac_maximum(&[]), 0.0);
        assert_eq!(
            ac_maximum(&[factor(0.1, -0.4, 0.05), factor(0.0, 0.3, -0.9)]),
            0.3
        );
        // All-negative terms leave the maximum at zero
        assert_eq!(ac_maximum(&[factor(-0.1, -0.2, -0.3)]), 0.0);
    }

    #[test]
    fn test_quantize_maximum_bounds() {
        assert_eq!(quantize_maximum(0.0), 0);
        assert_eq!(quantize_maximum(0.003), 0);
        assert_eq!(quantize_maximum(1.0), 82);
        assert_eq!(quantize_maximum(50.0), 82);
    }

    #[test]
    fn test_quantize_maximum_floors() {
        // 0.1 * 166 - 0.5 = 16.1
        assert_eq!(quantize_maximum(0.1), 16);
        assert!((dequantize_maximum(16) - 17.0 / 166.0).abs() < 1e-15);
    }

    #[test]
    fn test_dequantize_covers_quantized_value() {
        for q in 0..=82 {
            let max = dequantize_maximum(q);
            assert!(max > 0.0);
            assert!(max <= 83.0 / 166.0);
        }
    }

    #[test]
    fn test_zero_factor_is_midpoint() {
        assert_eq!(encode_ac(&factor(0.0, 0.0, 0.0), 1.0), 3420);
        assert_eq!(encode_ac(&factor(0.0, 0.0, 0.0), 1.0 / 166.0), 3420);
    }

    #[test]
    fn test_ac_extremes() {
        assert_eq!(encode_ac(&factor(1.0, 1.0, 1.0), 1.0), 6858);
        assert_eq!(encode_ac(&factor(-1.0, -1.0, -1.0), 1.0), 0);
        // Beyond the maximum saturates instead of overflowing base 19
        assert_eq!(encode_ac(&factor(4.0, -4.0, 0.0), 1.0), 18 * 361 + 9);
    }

    #[test]
    fn test_ac_channel_is_square_root_scaled() {
        // sqrt(0.25) * 9 + 9.5 = 14
        assert_eq!(quantize_ac_channel(0.25, 1.0), 14);
        // -sqrt(0.25) * 9 + 9.5 = 5
        assert_eq!(quantize_ac_channel(-0.25, 1.0), 5);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
