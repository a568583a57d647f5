// Image sink writing decoded images to the output directory
use crate::application::image_service::ImageSink;
use crate::domain::image::GeneratedImage;
use anyhow::Context;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileImageSink {
    output_dir: PathBuf,
}

impl FileImageSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn file_name(image: &GeneratedImage) -> String {
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        format!("image-{}.{}", stamp, image.extension())
    }
}

impl ImageSink for FileImageSink {
    fn save(&self, image: &GeneratedImage) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!("Failed to create output directory {}", self.output_dir.display())
        })?;

        let path = self.output_dir.join(Self::file_name(image));
        std::fs::write(&path, &image.bytes)
            .with_context(|| format!("Failed to write image to {}", path.display()))?;

        tracing::debug!("Wrote {} bytes to {}", image.bytes.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_writes_bytes() {
        let dir = std::env::temp_dir().join(format!("reading-charts-sink-{}", std::process::id()));
        let sink = FileImageSink::new(&dir);
        let image = GeneratedImage {
            bytes: vec![0x89, b'P', b'N', b'G', 1, 2, 3],
        };

        let path = sink.save(&image).unwrap();
        assert!(path.starts_with(&dir));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
        assert_eq!(std::fs::read(&path).unwrap(), image.bytes);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
