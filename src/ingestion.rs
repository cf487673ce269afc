use crate::error::{FlowGraphError, Result};
use crate::schema::{FiscalRecord, FlowDirection, FlowGraphConfig};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// One row of the raw document: `{ "name": ..., "type": ..., "2023": ... }`.
/// Every field that is not `name` or `type` is a year-keyed amount.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RawRecord {
    pub name: String,

    #[serde(rename = "type")]
    pub category: String,

    #[serde(flatten)]
    pub amounts: BTreeMap<String, f64>,
}

/// The raw document shape: named array fields, each holding the records of
/// one dataset (e.g. `"jmu-revenues"`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FlowDocument {
    #[serde(flatten)]
    pub datasets: BTreeMap<String, Vec<RawRecord>>,
}

pub fn load_document<P: AsRef<Path>>(path: P) -> Result<FlowDocument> {
    let contents = fs::read_to_string(path)?;
    parse_document(&contents)
}

pub fn parse_document(contents: &str) -> Result<FlowDocument> {
    Ok(serde_json::from_str(contents)?)
}

/// Pulls one fiscal year of one dataset out of the document, resolving each
/// record's flow direction exactly once from its sign and name.
pub fn extract_records(
    document: &FlowDocument,
    dataset: &str,
    year: &str,
    config: &FlowGraphConfig,
) -> Result<Vec<FiscalRecord>> {
    let rows = document
        .datasets
        .get(dataset)
        .ok_or_else(|| FlowGraphError::MissingDataset(dataset.to_string()))?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let amount = *row
            .amounts
            .get(year)
            .ok_or_else(|| FlowGraphError::MissingAmount {
                record: row.name.clone(),
                year: year.to_string(),
            })?;

        records.push(FiscalRecord {
            name: row.name.clone(),
            category: row.category.clone(),
            amount,
            direction: FlowDirection::from_signals(amount, &row.name, &config.expense_keyword),
        });
    }

    Ok(records)
}
