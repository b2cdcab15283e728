use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("JSON does not match the target schema: {0}")]
    Shape(#[from] serde_json::Error),
    #[error("medicine entry has an empty name")]
    EmptyMedicineName,
}

/// One prescribed medicine. Unknown details stay null; they are never
/// guessed or backfilled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineItem {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Structured distillation of a prescription, built once per request from
/// validated refiner output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionSummary {
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub diagnosis_or_complaints: Option<String>,
    #[serde(default)]
    pub medicines: Vec<MedicineItem>,
    #[serde(default)]
    pub tests_or_followup: Option<String>,
    #[serde(default)]
    pub red_flags: Option<String>,
    #[serde(default)]
    pub generic_advice: Option<String>,
    pub disclaimer: String,
}

impl PrescriptionSummary {
    /// Validate normalized refiner JSON into the typed record.
    ///
    /// Medicine names are trimmed and must be non-empty.
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        let mut summary: Self = serde_json::from_value(value)?;
        for medicine in &mut summary.medicines {
            let trimmed = medicine.name.trim();
            if trimmed.is_empty() {
                return Err(SchemaError::EmptyMedicineName);
            }
            if trimmed.len() != medicine.name.len() {
                medicine.name = trimmed.to_string();
            }
        }
        Ok(summary)
    }
}

/// The fixed disclaimer / emergency-contact / schema-version triple attached
/// to every question-answering response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyBlock {
    pub disclaimer: String,
    pub emergency: String,
    pub version: String,
}

/// Final Q&A result returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerQueryResponse {
    pub answer: String,
    pub safety: SafetyBlock,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl AnswerQueryResponse {
    pub fn from_value(value: Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(value)?)
    }
}
