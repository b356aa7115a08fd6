//! Downloadable QR artifacts for a label's public page.

use std::fmt;
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::qr::encode_matrix;
use crate::{QrError, Result, pdf, png, svg};

/// Path from the base URL to a label's public page.
const PUBLIC_LABEL_PATH: &str = "/public/wines/";

/// Characters left unescaped by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Output encoding of a QR artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrFormat {
    Png,
    Svg,
    Pdf,
}

impl QrFormat {
    pub const ALL: [QrFormat; 3] = [QrFormat::Png, QrFormat::Svg, QrFormat::Pdf];

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
            Self::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for QrFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for QrFormat {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QrError::UnsupportedFormat(s.to_string()))
    }
}

/// What to generate: which label, under what display name, in which format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrArtifactRequest {
    /// URL-safe label identifier, e.g. a UUID.
    pub label_id: String,
    /// Display name, used for the suggested file name only.
    pub label_name: String,
    pub format: QrFormat,
}

impl QrArtifactRequest {
    pub fn new(label_id: impl Into<String>, label_name: impl Into<String>, format: QrFormat) -> Self {
        Self {
            label_id: label_id.into(),
            label_name: label_name.into(),
            format,
        }
    }
}

/// A generated artifact, ready for the browser to download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrArtifact {
    /// `data:` URI carrying the encoded document.
    pub mime_encoded_payload: String,
    pub suggested_file_name: String,
}

/// Builds QR artifacts pointing at public label pages under one base URL.
#[derive(Debug, Clone)]
pub struct QrGenerator {
    base_url: String,
}

impl QrGenerator {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Public page URL encoded into the symbol.
    pub fn target_url(&self, label_id: &str) -> String {
        format!("{}{PUBLIC_LABEL_PATH}{label_id}", self.base_url)
    }

    /// Render the raw document bytes for a label (SVG as UTF-8 text).
    pub fn render(&self, label_id: &str, format: QrFormat) -> Result<Vec<u8>> {
        let target_url = self.target_url(label_id);
        let matrix = encode_matrix(&target_url)?;
        let bytes = match format {
            QrFormat::Png => png::render_png(&matrix)?,
            QrFormat::Svg => svg::render_svg(&matrix).into_bytes(),
            QrFormat::Pdf => pdf::render_pdf(&matrix)?,
        };
        debug!(%target_url, %format, bytes = bytes.len(), "Rendered QR artifact");
        Ok(bytes)
    }

    /// Generate the artifact as a data URI plus a suggested file name.
    pub fn generate(&self, request: &QrArtifactRequest) -> Result<QrArtifact> {
        let bytes = self.render(&request.label_id, request.format)?;
        Ok(QrArtifact {
            mime_encoded_payload: data_uri(request.format, &bytes),
            suggested_file_name: suggested_file_name(&request.label_name, request.format),
        })
    }
}

/// Wrap document bytes in a self-describing `data:` URI.
///
/// PNG and PDF are base64-encoded; SVG text is percent-encoded.
pub fn data_uri(format: QrFormat, bytes: &[u8]) -> String {
    match format {
        QrFormat::Svg => {
            let text = String::from_utf8_lossy(bytes);
            format!(
                "data:{};charset=utf-8,{}",
                format.mime_type(),
                utf8_percent_encode(&text, URI_COMPONENT)
            )
        }
        QrFormat::Png | QrFormat::Pdf => {
            format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(bytes))
        }
    }
}

/// Lowercase the name and collapse whitespace runs into single hyphens.
pub fn slugify(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// `qr-<slug>.<ext>`, falling back to `label` for a blank name.
pub fn suggested_file_name(label_name: &str, format: QrFormat) -> String {
    let slug = slugify(label_name);
    let slug = if slug.is_empty() { "label".to_string() } else { slug };
    format!("qr-{slug}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::ModuleMatrix;
    use percent_encoding::percent_decode_str;

    const BASE: &str = "https://app.vinoveo.com";

    fn payload_bytes(artifact: &QrArtifact) -> Vec<u8> {
        let (header, body) = artifact.mime_encoded_payload.split_once(',').unwrap();
        if header.ends_with(";base64") {
            STANDARD.decode(body).unwrap()
        } else {
            percent_decode_str(body).collect()
        }
    }

    fn decode_raster(img: &image::GrayImage) -> String {
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            img.width() as usize,
            img.height() as usize,
            |x, y| img.get_pixel(x as u32, y as u32).0[0],
        );
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1);
        grids[0].decode().unwrap().1
    }

    /// Read the module matrix back out of the SVG rectangle positions.
    fn svg_matrix(svg: &str, module_count: usize) -> ModuleMatrix {
        let group = svg.split(r##"<g fill="#000000">"##).nth(1).unwrap();
        let coords: Vec<(u32, u32, u32)> = group
            .split("<rect x=\"")
            .skip(1)
            .map(|tag| {
                let nums: Vec<u32> = tag
                    .split('"')
                    .filter_map(|part| part.parse().ok())
                    .collect();
                (nums[0], nums[1], nums[2])
            })
            .collect();
        let (margin, _, cell) = coords[0];
        let mut modules = vec![false; module_count * module_count];
        for (x, y, _) in coords {
            let col = ((x - margin) / cell) as usize;
            let row = ((y - margin) / cell) as usize;
            modules[row * module_count + col] = true;
        }
        ModuleMatrix::from_modules(module_count, modules).unwrap()
    }

    #[test]
    fn target_url_joins_base_and_label() {
        let generator = QrGenerator::new(BASE);
        assert_eq!(
            generator.target_url("abc-123"),
            "https://app.vinoveo.com/public/wines/abc-123"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_dropped() {
        let generator = QrGenerator::new("https://app.vinoveo.com/");
        assert_eq!(
            generator.target_url("abc-123"),
            "https://app.vinoveo.com/public/wines/abc-123"
        );
    }

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("PNG".parse::<QrFormat>().unwrap(), QrFormat::Png);
        assert_eq!("svg".parse::<QrFormat>().unwrap(), QrFormat::Svg);
        assert!(matches!(
            "gif".parse::<QrFormat>(),
            Err(QrError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn slugify_collapses_whitespace() {
        assert_eq!(slugify("Grüner  Veltliner\tReserve 2022"), "grüner-veltliner-reserve-2022");
        assert_eq!(slugify("  Riesling "), "riesling");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn file_name_uses_slug_and_extension() {
        assert_eq!(
            suggested_file_name("Château Test Rouge", QrFormat::Pdf),
            "qr-château-test-rouge.pdf"
        );
        assert_eq!(suggested_file_name("   ", QrFormat::Png), "qr-label.png");
    }

    #[test]
    fn payload_headers_match_format() {
        let generator = QrGenerator::new(BASE);
        let prefixes = [
            (QrFormat::Png, "data:image/png;base64,"),
            (QrFormat::Svg, "data:image/svg+xml;charset=utf-8,%3Csvg"),
            (QrFormat::Pdf, "data:application/pdf;base64,"),
        ];
        for (format, prefix) in prefixes {
            let artifact = generator
                .generate(&QrArtifactRequest::new("abc-123", "Blanc", format))
                .unwrap();
            assert!(
                artifact.mime_encoded_payload.starts_with(prefix),
                "{format}: {}",
                &artifact.mime_encoded_payload[..40]
            );
            assert_eq!(artifact.suggested_file_name, format!("qr-blanc.{format}"));
        }
    }

    #[test]
    fn svg_payload_decodes_to_target_url() {
        let generator = QrGenerator::new(BASE);
        let artifact = generator
            .generate(&QrArtifactRequest::new("abc-123", "Rosé", QrFormat::Svg))
            .unwrap();
        let svg = String::from_utf8(payload_bytes(&artifact)).unwrap();

        let expected = encode_matrix("https://app.vinoveo.com/public/wines/abc-123").unwrap();
        let matrix = svg_matrix(&svg, expected.module_count());
        assert_eq!(matrix, expected);

        // Rasterize the recovered matrix and read it with a QR decoder.
        let url = decode_raster(&png::rasterize(&matrix));
        assert_eq!(url, "https://app.vinoveo.com/public/wines/abc-123");
    }

    #[test]
    fn png_payload_decodes_to_target_url() {
        let generator = QrGenerator::new(BASE);
        let artifact = generator
            .generate(&QrArtifactRequest::new("abc-123", "Rosé", QrFormat::Png))
            .unwrap();
        let img = image::load_from_memory(&payload_bytes(&artifact))
            .unwrap()
            .to_luma8();
        assert_eq!(decode_raster(&img), generator.target_url("abc-123"));
    }

    #[test]
    fn formats_encode_the_same_url() {
        let generator = QrGenerator::new(BASE);
        let raster = image::load_from_memory(&generator.render("lbl_42", QrFormat::Png).unwrap())
            .unwrap()
            .to_luma8();
        let pdf_pixels = pdf::embedded_pixels(&generator.render("lbl_42", QrFormat::Pdf).unwrap());
        assert_eq!(&pdf_pixels, raster.as_raw());
        assert_eq!(decode_raster(&raster), generator.target_url("lbl_42"));
    }

    #[test]
    fn repeated_generation_encodes_identically() {
        let generator = QrGenerator::new(BASE);
        let a = generator.render("abc-123", QrFormat::Svg).unwrap();
        let b = generator.render("abc-123", QrFormat::Svg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn overlong_label_id_fails_with_encoding_error() {
        let generator = QrGenerator::new(BASE);
        let id = "x".repeat(2000);
        let err = generator
            .generate(&QrArtifactRequest::new(id, "Too long", QrFormat::Png))
            .unwrap_err();
        assert!(matches!(err, QrError::Encoding(_)));
    }
}
