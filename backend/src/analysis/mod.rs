pub mod classifier;
pub mod decoder;
pub mod ycrcb;

use image::RgbImage;

use self::classifier::Classification;
use self::decoder::DecodeError;

/// Full pipeline for one request: data URI to classification.
pub fn analyze_data_uri(data_uri: &str) -> Result<Classification, DecodeError> {
    let raster: RgbImage = decoder::decode(data_uri)?;
    Ok(classifier::classify(&raster))
}
