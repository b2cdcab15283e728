use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("prescription summary is not a JSON object")]
    NotAnObject,
    #[error("medicine entry {0} is not a JSON object")]
    MalformedMedicine(usize),
    #[error("medicine entry {0} has no name")]
    UnnamedMedicine(usize),
}

/// Flatten a prescription-summary record into prompt context.
///
/// Accepts either the record itself or the record wrapped one level under a
/// `summary` key; the wrapper is checked first. Returns the multi-line
/// context block and one short source string per medicine, in record order.
/// Fields that are null, missing, or empty produce no line. An empty record
/// yields an empty string and no sources.
pub fn flatten_prescription(prescription: &Value) -> Result<(String, Vec<String>), FlattenError> {
    let data = prescription.get("summary").unwrap_or(prescription);
    let data = data.as_object().ok_or(FlattenError::NotAnObject)?;

    let mut lines: Vec<String> = Vec::new();
    let mut sources: Vec<String> = Vec::new();

    if let Some(patient) = text_field(data, "patient_name") {
        lines.push(format!("Patient: {patient}"));
    }
    if let Some(diagnosis) = text_field(data, "diagnosis_or_complaints") {
        lines.push(format!("Diagnosis/Complaints: {diagnosis}"));
    }

    let medicines = data
        .get("medicines")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    if !medicines.is_empty() {
        lines.push("Medicines:".to_string());
        for (i, medicine) in medicines.iter().enumerate() {
            let medicine = medicine
                .as_object()
                .ok_or(FlattenError::MalformedMedicine(i))?;
            let name = text_field(medicine, "name").ok_or(FlattenError::UnnamedMedicine(i))?;

            let mut snippet = name.to_string();
            let detail: Vec<&str> = ["dosage", "frequency", "duration"]
                .iter()
                .filter_map(|key| text_field(medicine, key))
                .collect();
            if !detail.is_empty() {
                snippet.push_str(&format!(" ({})", detail.join(", ")));
            }
            if let Some(instructions) = text_field(medicine, "instructions") {
                snippet.push_str(&format!(" — {instructions}"));
            }

            lines.push(format!("- {snippet}"));
            sources.push(snippet);
        }
    }

    if let Some(tests) = text_field(data, "tests_or_followup") {
        lines.push(format!("Tests/Follow-up: {tests}"));
    }
    if let Some(red) = text_field(data, "red_flags") {
        lines.push(format!("Red flags: {red}"));
    }
    if let Some(advice) = text_field(data, "generic_advice") {
        lines.push(format!("Advice: {advice}"));
    }

    Ok((lines.join("\n"), sources))
}

fn text_field<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flattens_full_record() {
        let record = json!({
            "patient_name": "R. Sharma",
            "diagnosis_or_complaints": "Fever with body ache",
            "medicines": [
                {"name": "Dolo 650", "dosage": "650 mg", "frequency": "morning and night",
                 "duration": "3 days", "instructions": "after food"},
                {"name": "ORS Powder", "dosage": null, "frequency": null,
                 "duration": null, "instructions": null}
            ],
            "tests_or_followup": "Review after 3 days",
            "red_flags": "Fever above 39C",
            "generic_advice": "Hydrate well",
            "disclaimer": "Informational only."
        });

        let (text, sources) = flatten_prescription(&record).unwrap();
        assert_eq!(
            text,
            "Patient: R. Sharma\n\
             Diagnosis/Complaints: Fever with body ache\n\
             Medicines:\n\
             - Dolo 650 (650 mg, morning and night, 3 days) — after food\n\
             - ORS Powder\n\
             Tests/Follow-up: Review after 3 days\n\
             Red flags: Fever above 39C\n\
             Advice: Hydrate well"
        );
        assert_eq!(
            sources,
            vec![
                "Dolo 650 (650 mg, morning and night, 3 days) — after food",
                "ORS Powder",
            ]
        );
    }

    #[test]
    fn unwraps_summary_key() {
        let wrapped = json!({
            "summary": {
                "medicines": [
                    {"name": "Omez 20", "dosage": "20 mg", "frequency": null,
                     "duration": null, "instructions": "before food"}
                ]
            }
        });

        let (text, sources) = flatten_prescription(&wrapped).unwrap();
        assert!(text.contains("- Omez 20 (20 mg) — before food"));
        assert_eq!(sources, vec!["Omez 20 (20 mg) — before food"]);
    }

    #[test]
    fn empty_record_yields_empty_context() {
        let (text, sources) = flatten_prescription(&json!({})).unwrap();
        assert_eq!(text, "");
        assert!(sources.is_empty());
    }

    #[test]
    fn flattening_is_idempotent() {
        let record = json!({
            "diagnosis_or_complaints": "GERD",
            "medicines": [{"name": "Omez 20", "dosage": "20 mg"}]
        });
        let first = flatten_prescription(&record).unwrap();
        let second = flatten_prescription(&record).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rejects_non_object_input() {
        let err = flatten_prescription(&json!(["not", "a", "record"])).unwrap_err();
        assert!(matches!(err, FlattenError::NotAnObject));
    }

    #[test]
    fn rejects_medicine_without_name() {
        let record = json!({"medicines": [{"dosage": "10 mg"}]});
        let err = flatten_prescription(&record).unwrap_err();
        assert!(matches!(err, FlattenError::UnnamedMedicine(0)));
    }
}
