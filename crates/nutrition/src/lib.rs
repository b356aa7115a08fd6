//! Nutrition declaration calculator for wine labels.
//!
//! Converts lab-measured composition (alcohol, residual sugar, glycerol)
//! into the per-100ml energy and carbohydrate figures printed on an EU label.
//! The calculator is total: it never fails and performs no bounds checking.
//! Validation of loosely-typed form input happens in [`input`].

pub mod calculator;
pub mod declaration;
pub mod input;

// Re-exports for convenience
pub use calculator::{Formula, compute_declaration, compute_declaration_with, round_one_decimal};
pub use declaration::{DeclarationRow, LabNutritionInput, NutritionDeclaration};
pub use input::{InputError, RawLabInput};

/// Kilojoules per kilocalorie.
pub const KJ_PER_KCAL: f64 = 4.184;
