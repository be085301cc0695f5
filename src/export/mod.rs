mod pdf;
mod print;
mod raster;

pub use pdf::{A4Writer, DocumentWriter};
pub use print::print_page;
pub use raster::{Bitmap, Rasterizer, ResvgRasterizer, CAPTURE_SCALE, JPEG_QUALITY};

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use thiserror::Error;

use crate::certificate::CertificateData;
use crate::render::{render, Assets};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("certificate markup could not be parsed: {0}")]
    Parse(String),

    #[error("failed to allocate a {width}x{height} bitmap")]
    Pixmap { width: u32, height: u32 },

    #[error("bitmap encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("captured bitmap is empty")]
    EmptyBitmap,

    #[error("export task failed: {0}")]
    Task(String),

    #[error("print page rendering failed: {0}")]
    Template(#[from] tera::Error),
}

#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ExportedPdf {
    pub fn data_uri(&self) -> String {
        format!("data:application/pdf;base64,{}", BASE64_STD.encode(&self.bytes))
    }
}

#[derive(Clone)]
pub struct Exporter {
    rasterizer: Arc<dyn Rasterizer>,
    writer: Arc<dyn DocumentWriter>,
    assets: Arc<Assets>,
}

impl Exporter {
    pub fn new(
        rasterizer: Arc<dyn Rasterizer>,
        writer: Arc<dyn DocumentWriter>,
        assets: Arc<Assets>,
    ) -> Self {
        Self {
            rasterizer,
            writer,
            assets,
        }
    }

    pub fn svg(&self, data: &CertificateData) -> String {
        render(data).to_svg(&self.assets)
    }

    pub async fn export_pdf(&self, data: &CertificateData) -> Result<ExportedPdf, ExportError> {
        let cert = render(data);
        let filename = cert.filename();
        let svg = cert.to_svg(&self.assets);

        let rasterizer = self.rasterizer.clone();
        let writer = self.writer.clone();
        let bytes = tokio::task::spawn_blocking(move || {
            let bitmap = rasterizer.capture(&svg)?;
            writer.embed_full_page(&bitmap)
        })
        .await
        .map_err(|e| ExportError::Task(e.to_string()))??;

        tracing::info!("Exported {} ({} bytes)", filename, bytes.len());
        Ok(ExportedPdf { filename, bytes })
    }

    pub fn print_page(&self, data: &CertificateData) -> Result<String, ExportError> {
        let cert = render(data);
        print_page(&cert.to_svg(&self.assets), &cert.filename())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRasterizer;

    impl Rasterizer for FixedRasterizer {
        fn capture(&self, _svg: &str) -> Result<Bitmap, ExportError> {
            Ok(Bitmap {
                width: 2,
                height: 3,
                jpeg: vec![0xFF, 0xD8, 0xFF, 0xD9],
            })
        }
    }

    struct BrokenRasterizer;

    impl Rasterizer for BrokenRasterizer {
        fn capture(&self, _svg: &str) -> Result<Bitmap, ExportError> {
            Err(ExportError::Parse("blocked asset".to_string()))
        }
    }

    fn exporter(rasterizer: Arc<dyn Rasterizer>) -> Exporter {
        Exporter::new(rasterizer, Arc::new(A4Writer), Arc::new(Assets::default()))
    }

    #[tokio::test]
    async fn export_names_file_after_student() {
        let data = CertificateData {
            student_name: "Jane Doe".to_string(),
            ..CertificateData::default()
        };
        let pdf = exporter(Arc::new(FixedRasterizer)).export_pdf(&data).await.unwrap();
        assert_eq!(pdf.filename, "Jane_Doe_CERTIFICATE.pdf");
        assert!(pdf.bytes.starts_with(b"%PDF-"));
        assert!(pdf.data_uri().starts_with("data:application/pdf;base64,JVBERi"));
    }

    #[tokio::test]
    async fn capture_failure_produces_no_file() {
        let result = exporter(Arc::new(BrokenRasterizer))
            .export_pdf(&CertificateData::default())
            .await;
        assert!(matches!(result, Err(ExportError::Parse(_))));
    }
}
