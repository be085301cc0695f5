use std::path::Path;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use image::codecs::jpeg::JpegEncoder;

use super::ExportError;

pub const CAPTURE_SCALE: f32 = 3.0;

pub const JPEG_QUALITY: u8 = 100;

#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
}

impl Bitmap {
    pub fn data_uri(&self) -> String {
        format!("data:image/jpeg;base64,{}", BASE64_STD.encode(&self.jpeg))
    }
}

/// Turns a certificate visual tree into a bitmap.
pub trait Rasterizer: Send + Sync {
    fn capture(&self, svg: &str) -> Result<Bitmap, ExportError>;
}

pub struct ResvgRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl ResvgRasterizer {
    pub fn new(font_dir: Option<&Path>) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        if let Some(dir) = font_dir {
            fontdb.load_fonts_dir(dir);
        }

        if fontdb.is_empty() {
            tracing::warn!("No fonts found, certificate text will not be rasterized");
        } else {
            tracing::info!("Rasterizer loaded {} font faces", fontdb.len());
        }

        Self {
            fontdb: Arc::new(fontdb),
        }
    }
}

impl Rasterizer for ResvgRasterizer {
    fn capture(&self, svg: &str) -> Result<Bitmap, ExportError> {
        let tree = {
            let mut opts = usvg::Options::default();
            opts.fontdb = self.fontdb.clone();
            usvg::Tree::from_str(svg, &opts).map_err(|e| ExportError::Parse(e.to_string()))?
        };

        let size = tree.size();
        let width = (size.width() * CAPTURE_SCALE).ceil() as u32;
        let height = (size.height() * CAPTURE_SCALE).ceil() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(width, height)
            .ok_or(ExportError::Pixmap { width, height })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        let transform = tiny_skia::Transform::from_scale(CAPTURE_SCALE, CAPTURE_SCALE);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        // Opaque background, so premultiplied RGBA is plain RGB plus alpha.
        let rgb: Vec<u8> = pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        let img = image::RgbImage::from_raw(width, height, rgb)
            .ok_or(ExportError::Pixmap { width, height })?;

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY).encode_image(&img)?;

        tracing::debug!("Captured certificate at {}x{} ({} bytes)", width, height, jpeg.len());
        Ok(Bitmap {
            width,
            height,
            jpeg,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::CertificateData;
    use crate::render::{render, Assets};

    #[test]
    fn capture_is_three_times_the_page_pixels() {
        let svg = render(&CertificateData::default()).to_svg(&Assets::default());
        let bitmap = ResvgRasterizer::new(None).capture(&svg).unwrap();

        // 210mm x 297mm at 96 dpi, oversampled 3x.
        let expected_w = (210.0_f32 / 25.4 * 96.0 * CAPTURE_SCALE).ceil() as u32;
        let expected_h = (297.0_f32 / 25.4 * 96.0 * CAPTURE_SCALE).ceil() as u32;
        assert!(bitmap.width.abs_diff(expected_w) <= 1);
        assert!(bitmap.height.abs_diff(expected_h) <= 1);
        assert_eq!(&bitmap.jpeg[..2], &[0xFF, 0xD8]);
        assert!(bitmap.data_uri().starts_with("data:image/jpeg;base64,/9j/"));
    }

    #[test]
    fn unparseable_markup_is_an_error() {
        let err = ResvgRasterizer::new(None)
            .capture("this is not svg")
            .unwrap_err();
        assert!(matches!(err, ExportError::Parse(_)));
    }
}
