use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Body of `POST /analyze`. The field is optional so a missing key can be
/// reported explicitly instead of failing deserialization.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AnalyzeRequest {
    pub image: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnalyzeResponse {
    pub kualitas_cabai: Quality,
    pub tingkat_kematangan: Ripeness,
    pub mean_ycbcr: MeanYCrCb,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Channel averages as reported to clients, rounded to two decimals.
#[allow(non_snake_case)]
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct MeanYCrCb {
    pub Y: f64,
    pub Cr: f64,
    pub Cb: f64,
}

impl MeanYCrCb {
    pub fn rounded(y: f64, cr: f64, cb: f64) -> Self {
        Self {
            Y: round2(y),
            Cr: round2(cr),
            Cb: round2(cb),
        }
    }
}

/// Correctly rounded to two decimals of the stored double, ties to even.
fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    if (scaled - scaled.trunc()).abs() != 0.5 {
        return scaled.round() / 100.0;
    }
    // `scaled` landed on a half; the fused residual tells whether the exact
    // product is above, below or on it.
    let residual = value.mul_add(100.0, -scaled);
    let rounded = if residual > 0.0 {
        scaled.ceil()
    } else if residual < 0.0 {
        scaled.floor()
    } else {
        scaled.round_ties_even()
    };
    rounded / 100.0
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
pub enum Ripeness {
    #[serde(rename = "Matang")]
    #[strum(to_string = "Matang")]
    Ripe,
    #[serde(rename = "Setengah Matang")]
    #[strum(to_string = "Setengah Matang")]
    HalfRipe,
    #[serde(rename = "Mentah / Belum Matang")]
    #[strum(to_string = "Mentah / Belum Matang")]
    Unripe,
}

impl Ripeness {
    pub fn is_ripe(&self) -> bool {
        matches!(self, Ripeness::Ripe)
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter,
)]
pub enum Quality {
    #[serde(rename = "Sangat Baik")]
    #[strum(to_string = "Sangat Baik")]
    VeryGood,
    #[serde(rename = "Baik")]
    #[strum(to_string = "Baik")]
    Good,
    #[serde(rename = "Cukup")]
    #[strum(to_string = "Cukup")]
    Fair,
    #[serde(rename = "Kurang Baik")]
    #[strum(to_string = "Kurang Baik")]
    Poor,
    #[serde(rename = "Sedang (Belum Optimal)")]
    #[strum(to_string = "Sedang (Belum Optimal)")]
    ModerateNotOptimal,
}
