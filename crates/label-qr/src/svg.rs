//! Vector rendering: one `<rect>` per dark module.
//!
//! The output stays an editable vector document (no embedded raster) so
//! print shops can scale it freely.

use tracing::debug;

use crate::CANVAS_SIZE;
use crate::qr::ModuleMatrix;

/// Margin around the symbol as a share of the symbol's pixel size.
const MARGIN_RATIO: f64 = 0.05;

/// Geometry of the SVG symbol in user units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorLayout {
    pub cell_size: u32,
    pub margin: u32,
    /// Edge length of the padded symbol, used for the `viewBox`.
    pub view_size: u32,
}

impl VectorLayout {
    pub fn for_matrix(matrix: &ModuleMatrix) -> Self {
        let count = matrix.module_count() as u32;
        let cell_size = (CANVAS_SIZE / count).max(1);
        let symbol = cell_size * count;
        let margin = (f64::from(symbol) * MARGIN_RATIO).round() as u32;
        Self {
            cell_size,
            margin,
            view_size: symbol + 2 * margin,
        }
    }
}

/// Render the matrix as an SVG document sized 1000x1000.
pub fn render_svg(matrix: &ModuleMatrix) -> String {
    let layout = VectorLayout::for_matrix(matrix);
    let VectorLayout {
        cell_size,
        margin,
        view_size,
    } = layout;

    let mut svg = String::with_capacity(64 * matrix.module_count() * matrix.module_count() / 2);
    svg.push_str(&format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{CANVAS_SIZE}" height="{CANVAS_SIZE}" viewBox="0 0 {view_size} {view_size}" shape-rendering="crispEdges">"##
    ));
    svg.push_str(&format!(
        r##"<rect x="0" y="0" width="{view_size}" height="{view_size}" fill="#ffffff"/>"##
    ));
    svg.push_str(r##"<g fill="#000000">"##);
    for (row, col) in matrix.dark_modules() {
        let x = col as u32 * cell_size + margin;
        let y = row as u32 * cell_size + margin;
        svg.push_str(&format!(
            r#"<rect x="{x}" y="{y}" width="{cell_size}" height="{cell_size}"/>"#
        ));
    }
    svg.push_str("</g></svg>");

    debug!(
        module_count = matrix.module_count(),
        cell_size, margin, "Rendered QR symbol as SVG"
    );

    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::encode_matrix;

    const URL: &str = "https://app.vinoveo.com/public/wines/abc-123";

    fn attr(tag: &str, name: &str) -> u32 {
        let key = format!(r#" {name}=""#);
        let start = tag.find(&key).unwrap() + key.len();
        let end = start + tag[start..].find('"').unwrap();
        tag[start..end].parse().unwrap()
    }

    /// Rebuild the module matrix from the rectangles inside the `<g>` group.
    fn matrix_from_svg(svg: &str, module_count: usize) -> ModuleMatrix {
        let group = svg.split(r##"<g fill="#000000">"##).nth(1).unwrap();
        let mut modules = vec![false; module_count * module_count];
        let mut cell = None;
        let mut margin = None;
        for tag in group.split("<rect").skip(1) {
            let size = attr(tag, "width");
            let x = attr(tag, "x");
            let y = attr(tag, "y");
            let cell_size = *cell.get_or_insert(size);
            assert_eq!(size, cell_size);
            // The top-left finder corner is always the first dark module.
            let m = *margin.get_or_insert(x);
            let col = ((x - m) / cell_size) as usize;
            let row = ((y - m) / cell_size) as usize;
            modules[row * module_count + col] = true;
        }
        ModuleMatrix::from_modules(module_count, modules).unwrap()
    }

    #[test]
    fn document_is_canvas_sized_with_padded_view_box() {
        let matrix = encode_matrix(URL).unwrap();
        let layout = VectorLayout::for_matrix(&matrix);
        let svg = render_svg(&matrix);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="1000" height="1000""#));
        assert!(svg.contains(&format!(
            r#"viewBox="0 0 {0} {0}""#,
            layout.view_size
        )));
        assert!(svg.ends_with("</g></svg>"));
    }

    #[test]
    fn layout_uses_floor_cell_and_five_percent_margin() {
        let matrix = encode_matrix(URL).unwrap();
        let n = matrix.module_count() as u32;
        let layout = VectorLayout::for_matrix(&matrix);
        assert_eq!(layout.cell_size, 1000 / n);
        let symbol = layout.cell_size * n;
        assert_eq!(layout.margin, (f64::from(symbol) * 0.05).round() as u32);
        assert_eq!(layout.view_size, symbol + 2 * layout.margin);
    }

    #[test]
    fn one_rect_per_dark_module() {
        let matrix = encode_matrix(URL).unwrap();
        let svg = render_svg(&matrix);
        // Background rect plus one per dark module.
        assert_eq!(svg.matches("<rect").count(), matrix.dark_modules().count() + 1);
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn rectangles_reproduce_the_encoded_matrix() {
        let matrix = encode_matrix(URL).unwrap();
        let svg = render_svg(&matrix);
        assert_eq!(matrix_from_svg(&svg, matrix.module_count()), matrix);
    }
}
