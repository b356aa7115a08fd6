//! Nutrition declaration API.

use axum::Json;
use axum::extract::Query;
use nutrition::{Formula, RawLabInput};
use serde::Deserialize;
use serde_json::json;

use super::{ApiResult, err_json, ok_json};

#[derive(Debug, Default, Deserialize)]
pub struct FormulaQuery {
    #[serde(default)]
    pub formula: Formula,
}

/// POST /api/nutrition/declaration – Compute per-100ml figures from lab values
pub async fn compute_declaration(
    Query(query): Query<FormulaQuery>,
    Json(raw): Json<RawLabInput>,
) -> ApiResult {
    let input = raw.parse().map_err(|e| {
        tracing::warn!("Rejected lab input: {e}");
        err_json(400, &e.to_string())
    })?;

    let declaration = nutrition::compute_declaration_with(&input, query.formula);
    tracing::debug!(?input, ?declaration, formula = ?query.formula, "Computed declaration");

    Ok(ok_json(json!({
        "input": input,
        "declaration": declaration,
        "rows": declaration.rows(),
    })))
}
