mod layout;
mod svg;
mod text;

pub use layout::render;
pub use text::{measure, wrap};

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use thiserror::Error;

use crate::certificate::{certificate_filename, CertificateData};

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const PT_TO_MM: f32 = 25.4 / 72.0;

pub const THEME_BLUE: &str = "#0070C0";
pub const TEXT_BLACK: &str = "#000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Sans,
    Serif,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub family: Family,
    pub bold: bool,
}

impl Run {
    pub fn sans(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            family: Family::Sans,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn serif_bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            family: Family::Serif,
            bold: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: f32,
    pub y: f32,
    pub size_pt: f32,
    pub color: &'static str,
    pub anchor: Anchor,
    pub runs: Vec<Run>,
    pub justify: Option<f32>,
}

impl TextLine {
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub stroke_mm: f32,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Text(TextLine),
    Rule(Rule),
    Logo(ImageBox),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Certificate {
    pub student_name: String,
    pub regions: Vec<Region>,
}

impl Certificate {
    pub fn filename(&self) -> String {
        certificate_filename(&self.student_name)
    }

    pub fn text_lines(&self) -> Vec<String> {
        self.regions
            .iter()
            .filter_map(|r| match r {
                Region::Text(line) => Some(line.plain_text()),
                _ => None,
            })
            .collect()
    }

    pub fn to_svg(&self, assets: &Assets) -> String {
        svg::write(self, assets)
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read asset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("asset {path} is not a decodable image: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("asset {path} must be a PNG or JPEG image")]
    Unsupported { path: PathBuf },
}

#[derive(Debug, Clone)]
pub struct Logo {
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Logo {
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.media_type, BASE64_STD.encode(&self.bytes))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Assets {
    pub logo: Option<Logo>,
}

impl Assets {
    pub fn load(logo_path: Option<&Path>) -> Result<Self, AssetError> {
        let Some(path) = logo_path else {
            return Ok(Self::default());
        };

        let bytes = std::fs::read(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let media_type = match image::guess_format(&bytes) {
            Ok(image::ImageFormat::Png) => "image/png",
            Ok(image::ImageFormat::Jpeg) => "image/jpeg",
            _ => {
                return Err(AssetError::Unsupported {
                    path: path.to_path_buf(),
                })
            }
        };

        image::load_from_memory(&bytes).map_err(|source| AssetError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!("Loaded logo asset from {}", path.display());
        Ok(Self {
            logo: Some(Logo { media_type, bytes }),
        })
    }
}
