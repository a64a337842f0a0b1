//! sRGB transfer function helpers.
//!
//! The basis projection runs in linear light, so every 8-bit channel is
//! converted through a 256-entry lookup table built once on first use. The
//! inverse direction only runs three times per hash (for the DC term) and is
//! computed directly.

use std::sync::LazyLock;

/// Threshold below which sRGB-encoded values use the linear segment.
const SRGB_LINEAR_THRESHOLD: f64 = 0.04045;

/// Threshold below which linear values use the linear segment.
const LINEAR_SRGB_THRESHOLD: f64 = 0.0031308;

/// Slope of the linear segment of the sRGB curve.
const LINEAR_SLOPE: f64 = 12.92;

/// Lookup table: `SRGB_TO_LINEAR[v]` is the linear-light value of channel `v`.
static SRGB_TO_LINEAR: LazyLock<[f64; 256]> = LazyLock::new(|| {
    let mut table = [0.0; 256];
    for (v, entry) in table.iter_mut().enumerate() {
        *entry = srgb_to_linear_exact(v as f64 / 255.0);
    }
    table
});

fn srgb_to_linear_exact(v: f64) -> f64 {
    if v <= SRGB_LINEAR_THRESHOLD {
        v / LINEAR_SLOPE
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an 8-bit sRGB channel value to linear light (0.0 to 1.0).
#[inline]
pub fn srgb_to_linear(value: u8) -> f64 {
    SRGB_TO_LINEAR[value as usize]
}

/// Convert a linear-light value back to an 8-bit sRGB channel value.
///
/// Input is clamped to 0.0..=1.0 first, so out-of-gamut DC terms saturate
/// instead of wrapping.
#[inline]
pub fn linear_to_srgb(value: f64) -> u8 {
    let v = value.clamp(0.0, 1.0);
    let encoded = if v <= LINEAR_SRGB_THRESHOLD {
        v * LINEAR_SLOPE * 255.0
    } else {
        (1.055 * v.powf(1.0 / 2.4) - 0.055) * 255.0
    };
    encoded.round().clamp(0.0, 255.0) as u8
}

/// Raise `|value|` to `exp`, keeping the sign of `value`.
#[inline]
pub fn sign_pow(value: f64, exp: f64) -> f64 {
    value.abs().powf(exp).copysign(value)
}
