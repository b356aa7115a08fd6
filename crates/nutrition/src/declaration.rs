//! Value objects exchanged with the label editor.

use serde::{Deserialize, Serialize};

/// Lab analysis of a wine, as entered by the producer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabNutritionInput {
    /// Percent volume (%Vol.).
    pub alcohol_by_volume: f64,
    /// Grams per liter.
    pub residual_sugar: f64,
    /// Grams per liter. Informational only, not used by any formula.
    pub total_acidity: f64,
    /// Grams per liter.
    pub glycerol_content: f64,
}

impl LabNutritionInput {
    pub fn new(
        alcohol_by_volume: f64,
        residual_sugar: f64,
        total_acidity: f64,
        glycerol_content: f64,
    ) -> Self {
        Self {
            alcohol_by_volume,
            residual_sugar,
            total_acidity,
            glycerol_content,
        }
    }
}

/// Per-100ml nutrition figures, each rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionDeclaration {
    pub energy_kilojoules: f64,
    pub energy_kilocalories: f64,
    pub carbohydrate_grams: f64,
    pub sugar_grams: f64,
}

/// One printed line of the nutrition table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationRow {
    pub label: &'static str,
    pub value: String,
    /// Sub-rows ("of which ...") are printed indented under their parent.
    pub indented: bool,
}

impl DeclarationRow {
    fn new(label: &'static str, value: String, indented: bool) -> Self {
        Self {
            label,
            value,
            indented,
        }
    }
}

const NEGLIGIBLE: &str = "0 g";

impl NutritionDeclaration {
    /// Table rows in the order required on the label.
    ///
    /// Wine contains negligible fat, protein and salt, so those rows are fixed.
    pub fn rows(&self) -> Vec<DeclarationRow> {
        vec![
            DeclarationRow::new(
                "Energy",
                format!(
                    "{:.1} kJ / {:.1} kcal",
                    self.energy_kilojoules, self.energy_kilocalories
                ),
                false,
            ),
            DeclarationRow::new("Fat", NEGLIGIBLE.into(), false),
            DeclarationRow::new("of which saturates", NEGLIGIBLE.into(), true),
            DeclarationRow::new(
                "Carbohydrate",
                format!("{:.1} g", self.carbohydrate_grams),
                false,
            ),
            DeclarationRow::new("of which sugars", format!("{:.1} g", self.sugar_grams), true),
            DeclarationRow::new("Protein", NEGLIGIBLE.into(), false),
            DeclarationRow::new("Salt", NEGLIGIBLE.into(), false),
        ]
    }
}
