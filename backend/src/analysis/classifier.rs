use image::RgbImage;
use shared::{AnalyzeResponse, MeanYCrCb, Quality, Ripeness};

use super::ycrcb::{ChannelMeans, to_ycrcb};

pub const RIPE_MIN_CR: f64 = 140.0;
pub const HALF_RIPE_MIN_CR: f64 = 130.0;
pub const VERY_GOOD_MIN_Y: f64 = 120.0;
pub const GOOD_MIN_Y: f64 = 100.0;
pub const FAIR_MIN_Y: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub quality: Quality,
    pub ripeness: Ripeness,
    pub means: ChannelMeans,
}

impl From<Classification> for AnalyzeResponse {
    fn from(classification: Classification) -> Self {
        let ChannelMeans { y, cr, cb } = classification.means;
        AnalyzeResponse {
            kualitas_cabai: classification.quality,
            tingkat_kematangan: classification.ripeness,
            mean_ycbcr: MeanYCrCb::rounded(y, cr, cb),
        }
    }
}

pub fn classify_ripeness(mean_cr: f64) -> Ripeness {
    if mean_cr > RIPE_MIN_CR {
        Ripeness::Ripe
    } else if mean_cr > HALF_RIPE_MIN_CR {
        Ripeness::HalfRipe
    } else {
        Ripeness::Unripe
    }
}

/// Brightness band, downgraded to `ModerateNotOptimal` when a bright sample
/// is not actually ripe.
pub fn classify_quality(mean_y: f64, ripeness: Ripeness) -> Quality {
    // Bright but unripe falls through to the `Good` band; the override
    // below catches it.
    let quality = if mean_y > VERY_GOOD_MIN_Y && ripeness.is_ripe() {
        Quality::VeryGood
    } else if mean_y > GOOD_MIN_Y {
        Quality::Good
    } else if mean_y > FAIR_MIN_Y {
        Quality::Fair
    } else {
        Quality::Poor
    };

    match quality {
        Quality::VeryGood | Quality::Good if !ripeness.is_ripe() => Quality::ModerateNotOptimal,
        other => other,
    }
}

pub fn classify_means(means: ChannelMeans) -> Classification {
    let ripeness = classify_ripeness(means.cr);
    let quality = classify_quality(means.y, ripeness);
    Classification {
        quality,
        ripeness,
        means,
    }
}

pub fn classify(image: &RgbImage) -> Classification {
    classify_means(ChannelMeans::of(&to_ycrcb(image)))
}
