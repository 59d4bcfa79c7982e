use base64::Engine as _;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use image::RgbImage;
use log::{debug, error};

const LOG_PREVIEW_CHARS: usize = 100;

/// Standard alphabet with required padding. Non-zero trailing bits in the
/// last symbol are ignored, as lenient encoders emit them.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{0}")]
    InvalidFormat(String),
    #[error("Cannot identify image file: {0}")]
    UnrecognizedImage(String),
}

/// A `data:<mime>;base64,<payload>` string split at its first comma.
#[derive(Debug, Clone, Copy)]
pub struct DataUri<'a> {
    header: &'a str,
    payload: &'a str,
}

impl<'a> DataUri<'a> {
    pub fn parse(input: &'a str) -> Result<Self, DecodeError> {
        let (header, payload) = input.split_once(',').ok_or_else(|| {
            DecodeError::InvalidFormat(
                "expected a data URI with a ',' separating header and payload".to_string(),
            )
        })?;
        Ok(Self { header, payload })
    }

    /// MIME type announced in the header. Informational only, the payload
    /// bytes decide the actual format.
    pub fn mime_type(&self) -> Option<&'a str> {
        let rest = self.header.strip_prefix("data:")?;
        let mime = rest.split_once(';').map_or(rest, |(mime, _)| mime);
        (!mime.is_empty()).then_some(mime)
    }

    pub fn decode_payload(&self) -> Result<Vec<u8>, DecodeError> {
        // Some encoders wrap base64 output at fixed line widths.
        let compact: String = self
            .payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        PAYLOAD_ENGINE
            .decode(compact.as_bytes())
            .map_err(|e| DecodeError::InvalidFormat(e.to_string()))
    }
}

/// Decodes a base64 data URI into an 8-bit RGB raster, whatever the source
/// color model was.
pub fn decode(data_uri: &str) -> Result<RgbImage, DecodeError> {
    let bytes = DataUri::parse(data_uri)
        .and_then(|uri| {
            debug!("Decoding payload declared as {}", uri.mime_type().unwrap_or("unknown"));
            uri.decode_payload()
        })
        .inspect_err(|e| {
            let preview: String = data_uri.chars().take(LOG_PREVIEW_CHARS).collect();
            error!("Base64 decoding error: {} - Input: {}...", e, preview);
        })?;

    let image = image::load_from_memory(&bytes).map_err(|e| {
        error!("Cannot identify image file ({} bytes): {}", bytes.len(), e);
        DecodeError::UnrecognizedImage(e.to_string())
    })?;

    let rgb = image.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        error!("Decoded image has no pixels");
        return Err(DecodeError::UnrecognizedImage("image has no pixels".to_string()));
    }
    Ok(rgb)
}
