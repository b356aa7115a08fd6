//! QR symbol encoding into a plain module matrix.

use qrcode::{Color, EcLevel, QrCode};
use tracing::debug;

use crate::Result;

/// Square grid of QR modules, `true` for dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    module_count: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Build a matrix from row-major modules. Returns `None` unless
    /// `modules.len() == module_count * module_count`.
    pub fn from_modules(module_count: usize, modules: Vec<bool>) -> Option<Self> {
        (module_count > 0 && modules.len() == module_count * module_count).then_some(Self {
            module_count,
            modules,
        })
    }

    /// Modules per side.
    pub fn module_count(&self) -> usize {
        self.module_count
    }

    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        row < self.module_count && col < self.module_count && self.modules[row * self.module_count + col]
    }

    /// `(row, col)` of every dark module, row-major.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.module_count;
        self.modules
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(move |(i, _)| (i / n, i % n))
    }
}

/// Encode text at error-correction level H with the smallest fitting version.
pub fn encode_matrix(text: &str) -> Result<ModuleMatrix> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::H)?;
    let module_count = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|color| color == Color::Dark)
        .collect();

    debug!(module_count, version = ?code.version(), "Encoded QR symbol");

    Ok(ModuleMatrix {
        module_count,
        modules,
    })
}
