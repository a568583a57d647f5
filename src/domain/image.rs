// Generated image domain model
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use super::error::ChartError;

/// Parameters forwarded to the text-to-image service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub size: String,
    pub quality: String,
    pub response_format: String,
    pub count: u32,
}

/// Decoded image bytes as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    pub fn from_base64(payload: &str) -> Result<Self, ChartError> {
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| ChartError::ExternalService(format!("invalid base64 image data: {}", e)))?;
        if bytes.is_empty() {
            return Err(ChartError::ExternalService("empty image payload".to_string()));
        }
        Ok(Self { bytes })
    }

    /// File extension guessed from the magic bytes.
    pub fn extension(&self) -> &'static str {
        match self.bytes.as_slice() {
            [0x89, b'P', b'N', b'G', ..] => "png",
            [0xff, 0xd8, 0xff, ..] => "jpg",
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "webp",
            _ => "bin",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png_payload() {
        let raw = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        let encoded = STANDARD.encode(raw);
        let image = GeneratedImage::from_base64(&encoded).unwrap();
        assert_eq!(image.bytes, raw);
        assert_eq!(image.extension(), "png");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            GeneratedImage::from_base64("not base64!!"),
            Err(ChartError::ExternalService(_))
        ));
        assert!(GeneratedImage::from_base64("").is_err());
    }

    #[test]
    fn test_unknown_format_extension() {
        let image = GeneratedImage { bytes: vec![1, 2, 3] };
        assert_eq!(image.extension(), "bin");
    }
}
