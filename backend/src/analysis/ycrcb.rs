//! 8-bit RGB to YCrCb conversion (BT.601) using the fixed-point arithmetic
//! common image-processing libraries apply to `u8` rasters. The classifier
//! thresholds were tuned against these exact integer results, so the
//! rounding here must not be replaced by a floating-point formula.

use image::{Rgb, RgbImage};

const SHIFT: u32 = 14;
const R2Y: i32 = 4899;
const G2Y: i32 = 9617;
const B2Y: i32 = 1868;
const CR_SCALE: i32 = 11682;
const CB_SCALE: i32 = 9241;
const DELTA: i32 = 128 << SHIFT;

#[inline]
fn descale(value: i32) -> i32 {
    (value + (1 << (SHIFT - 1))) >> SHIFT
}

#[inline]
fn saturate(value: i32) -> u8 {
    value.clamp(0, u8::MAX as i32) as u8
}

/// Returns `[Y, Cr, Cb]` for one pixel.
pub fn rgb_to_ycrcb(pixel: Rgb<u8>) -> [u8; 3] {
    let [r, g, b] = pixel.0.map(i32::from);
    let y = descale(r * R2Y + g * G2Y + b * B2Y);
    let cr = descale((r - y) * CR_SCALE + DELTA);
    let cb = descale((b - y) * CB_SCALE + DELTA);
    [saturate(y), saturate(cr), saturate(cb)]
}

/// Y, Cr, Cb triples in row-major pixel order.
#[derive(Debug, Clone)]
pub struct YCrCbImage {
    pixels: Vec<[u8; 3]>,
}

impl YCrCbImage {
    pub fn pixels(&self) -> &[[u8; 3]] {
        &self.pixels
    }
}

pub fn to_ycrcb(image: &RgbImage) -> YCrCbImage {
    YCrCbImage {
        pixels: image.pixels().map(|p| rgb_to_ycrcb(*p)).collect(),
    }
}

/// Arithmetic mean of each channel over all pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelMeans {
    pub y: f64,
    pub cr: f64,
    pub cb: f64,
}

impl ChannelMeans {
    pub fn of(image: &YCrCbImage) -> Self {
        let count = image.pixels.len();
        if count == 0 {
            return Self { y: 0.0, cr: 0.0, cb: 0.0 };
        }

        let mut sums = [0u64; 3];
        for pixel in &image.pixels {
            for (sum, &channel) in sums.iter_mut().zip(pixel) {
                *sum += u64::from(channel);
            }
        }

        let count = count as f64;
        Self {
            y: sums[0] as f64 / count,
            cr: sums[1] as f64 / count,
            cb: sums[2] as f64 / count,
        }
    }
}
