//! QR artifacts for public wine label pages.
//!
//! Encodes a label's public URL at error-correction level H and renders the
//! module matrix as a PNG raster, an SVG made of one rectangle per dark
//! module, or a single-page PDF. Every call is independent and keeps no state.

pub mod artifact;
pub mod pdf;
pub mod png;
pub mod qr;
pub mod svg;

// Re-exports for convenience
pub use artifact::{
    QrArtifact, QrArtifactRequest, QrFormat, QrGenerator, data_uri, slugify, suggested_file_name,
};
pub use qr::{ModuleMatrix, encode_matrix};

/// Edge length in pixels of the PNG raster and of the SVG document.
pub const CANVAS_SIZE: u32 = 1000;

/// Errors that can occur while producing a QR artifact.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    /// The URL does not fit in a QR symbol at level H.
    #[error("QR encode error: {0}")]
    Encoding(#[from] qrcode::types::QrError),

    #[error("PNG encode error: {0}")]
    Raster(#[from] image::ImageError),

    #[error("PDF build error: {0}")]
    Document(String),

    #[error("Unsupported QR format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for QR operations.
pub type Result<T> = std::result::Result<T, QrError>;
