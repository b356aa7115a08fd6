//! Print document: the raster symbol on a single 100 mm square page.

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use image::GrayImage;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use tracing::debug;

use crate::qr::ModuleMatrix;
use crate::{QrError, Result, png};

/// Page edge length in millimetres.
pub const PAGE_SIZE_MM: f32 = 100.0;
/// Margin around the image as a share of the page edge.
const MARGIN_RATIO: f32 = 0.05;
const POINTS_PER_MM: f32 = 72.0 / 25.4;
const IMAGE_NAME: &str = "Im0";

/// Page geometry in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page: f32,
    pub margin: f32,
    pub image: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        let page = PAGE_SIZE_MM * POINTS_PER_MM;
        let margin = page * MARGIN_RATIO;
        Self {
            page,
            margin,
            image: page - 2.0 * margin,
        }
    }
}

/// Rasterize the matrix and place it centered on a one-page PDF.
pub fn render_pdf(matrix: &ModuleMatrix) -> Result<Vec<u8>> {
    build_document(&png::rasterize(matrix), PageLayout::default())
}

fn build_document(raster: &GrayImage, layout: PageLayout) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(raster.width()),
            "Height" => i64::from(raster.height()),
            "ColorSpace" => "DeviceGray",
            "BitsPerComponent" => 8,
            "Filter" => "FlateDecode",
        },
        deflate(raster.as_raw())?,
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    layout.image.into(),
                    0.into(),
                    0.into(),
                    layout.image.into(),
                    layout.margin.into(),
                    layout.margin.into(),
                ],
            ),
            Operation::new("Do", vec![IMAGE_NAME.into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content.encode().map_err(document_error)?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), layout.page.into(), layout.page.into()],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                IMAGE_NAME => image_id,
            },
        },
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let created = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
    let info_id = doc.add_object(dictionary! {
        "Producer" => Object::string_literal("VinoVeo"),
        "CreationDate" => Object::string_literal(created),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).map_err(document_error)?;

    debug!(bytes = out.len(), page_pt = layout.page, "Built QR PDF");
    Ok(out)
}

fn deflate(raw: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw).map_err(document_error)?;
    encoder.finish().map_err(document_error)
}

fn document_error(e: impl std::fmt::Display) -> QrError {
    QrError::Document(e.to_string())
}

/// Inflate the pixels of the image XObject in a rendered document.
///
/// lopdf refuses to decompress image streams, so the zlib data is read directly.
#[cfg(test)]
pub(crate) fn embedded_pixels(bytes: &[u8]) -> Vec<u8> {
    use std::io::Read;

    let doc = Document::load_mem(bytes).unwrap();
    let stream = doc
        .objects
        .values()
        .find_map(|obj| match obj {
            Object::Stream(stream) => match stream.dict.get(b"Subtype") {
                Ok(Object::Name(name)) if name.as_slice() == b"Image" => Some(stream),
                _ => None,
            },
            _ => None,
        })
        .expect("image XObject");

    let mut pixels = Vec::new();
    flate2::read::ZlibDecoder::new(stream.content.as_slice())
        .read_to_end(&mut pixels)
        .unwrap();
    pixels
}
