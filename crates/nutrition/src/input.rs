//! Boundary parsing of lab values submitted by the label form.
//!
//! Form fields arrive as numbers, numeric strings, empty strings or not at
//! all. Missing and non-numeric values count as zero, matching how the form
//! pre-fills its inputs. Negative and non-finite values are rejected here so
//! that only well-formed [`LabNutritionInput`] values reach the calculator.

use serde::Deserialize;

use crate::declaration::LabNutritionInput;

/// Errors produced while turning form input into a [`LabNutritionInput`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

/// A JSON value that should hold a number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Number(f64),
    Text(String),
}

impl LooseNumber {
    fn coerce(&self) -> f64 {
        match self {
            Self::Number(n) => *n,
            // Accept a decimal comma as typed in most EU locales.
            Self::Text(s) => s.trim().replace(',', ".").parse().unwrap_or(0.0),
        }
    }
}

/// Lab values as submitted, before validation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawLabInput {
    pub alcohol_by_volume: Option<LooseNumber>,
    pub residual_sugar: Option<LooseNumber>,
    pub total_acidity: Option<LooseNumber>,
    pub glycerol_content: Option<LooseNumber>,
}

impl RawLabInput {
    /// Validate and convert into an immutable [`LabNutritionInput`].
    pub fn parse(&self) -> Result<LabNutritionInput, InputError> {
        Ok(LabNutritionInput {
            alcohol_by_volume: field("alcoholByVolume", &self.alcohol_by_volume)?,
            residual_sugar: field("residualSugar", &self.residual_sugar)?,
            total_acidity: field("totalAcidity", &self.total_acidity)?,
            glycerol_content: field("glycerolContent", &self.glycerol_content)?,
        })
    }
}

fn field(name: &'static str, raw: &Option<LooseNumber>) -> Result<f64, InputError> {
    let value = raw.as_ref().map_or(0.0, LooseNumber::coerce);
    if !value.is_finite() {
        return Err(InputError::NotFinite { field: name });
    }
    if value < 0.0 {
        return Err(InputError::Negative { field: name, value });
    }
    Ok(value)
}
