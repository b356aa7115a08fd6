//! Energy and carbohydrate formulas.
//!
//! Two formula sets exist for the same figures. [`Formula::LiterBasis`] is
//! canonical: it converts ethanol %Vol. to grams per liter, applies the
//! physiological energy factors and scales the per-liter totals to 100 ml.
//! [`Formula::Direct`] reproduces the older dialog calculation, which applies
//! per-%Vol. factors directly and does not scale by volume.

use serde::{Deserialize, Serialize};

use crate::KJ_PER_KCAL;
use crate::declaration::{LabNutritionInput, NutritionDeclaration};

/// Ethanol density in g/ml.
const ALCOHOL_DENSITY: f64 = 0.789;
/// kcal per gram of ethanol.
const KCAL_PER_G_ALCOHOL: f64 = 7.0;
/// kcal per gram of sugar.
const KCAL_PER_G_SUGAR: f64 = 4.0;
/// kcal per gram of glycerol (liter basis).
const KCAL_PER_G_GLYCEROL: f64 = 4.0;
/// Share of glycerol counted as carbohydrate.
const GLYCEROL_CARB_SHARE: f64 = 0.7;
/// 1000 ml / 100 ml.
const LITER_TO_100ML: f64 = 10.0;

/// kcal per %Vol. in the direct formula.
const DIRECT_KCAL_PER_ABV: f64 = 5.65;
/// kcal per gram of glycerol in the direct formula.
const DIRECT_KCAL_PER_G_GLYCEROL: f64 = 4.32;

/// Which formula set to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Formula {
    #[default]
    LiterBasis,
    Direct,
}

/// Compute the declaration with the canonical liter-basis formula.
pub fn compute_declaration(input: &LabNutritionInput) -> NutritionDeclaration {
    compute_declaration_with(input, Formula::LiterBasis)
}

/// Compute the declaration with an explicit formula set.
pub fn compute_declaration_with(input: &LabNutritionInput, formula: Formula) -> NutritionDeclaration {
    match formula {
        Formula::LiterBasis => liter_basis(input),
        Formula::Direct => direct(input),
    }
}

fn liter_basis(input: &LabNutritionInput) -> NutritionDeclaration {
    let alcohol_g_per_liter = input.alcohol_by_volume * ALCOHOL_DENSITY / 100.0 * 1000.0;

    let kcal_per_liter = alcohol_g_per_liter * KCAL_PER_G_ALCOHOL
        + input.residual_sugar * KCAL_PER_G_SUGAR
        + input.glycerol_content * KCAL_PER_G_GLYCEROL;
    let carbs_per_liter = input.residual_sugar + input.glycerol_content * GLYCEROL_CARB_SHARE;

    NutritionDeclaration {
        energy_kilojoules: round_one_decimal(kcal_per_liter * KJ_PER_KCAL / LITER_TO_100ML),
        energy_kilocalories: round_one_decimal(kcal_per_liter / LITER_TO_100ML),
        carbohydrate_grams: round_one_decimal(carbs_per_liter / LITER_TO_100ML),
        sugar_grams: round_one_decimal(input.residual_sugar / LITER_TO_100ML),
    }
}

fn direct(input: &LabNutritionInput) -> NutritionDeclaration {
    let kcal = input.alcohol_by_volume * DIRECT_KCAL_PER_ABV
        + input.residual_sugar * KCAL_PER_G_SUGAR
        + input.glycerol_content * DIRECT_KCAL_PER_G_GLYCEROL;

    NutritionDeclaration {
        energy_kilojoules: round_one_decimal(kcal * KJ_PER_KCAL),
        energy_kilocalories: round_one_decimal(kcal),
        carbohydrate_grams: round_one_decimal(input.residual_sugar),
        sugar_grams: round_one_decimal(input.residual_sugar),
    }
}

/// Round to one decimal place, half away from zero.
///
/// Never returns negative zero.
pub fn round_one_decimal(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}
