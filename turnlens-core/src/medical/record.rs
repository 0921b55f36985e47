//! Medical record extraction from dataset payloads

use super::synonyms::{
    FieldSynonyms, DATE, DIAGNOSIS, MEDICATIONS, NOTES, PATIENT, PROCEDURES, RECORD_SOURCES,
    VITAL_SIGNS,
};
use crate::normalize::value::{coerce_to_text, first_truthy, to_json_text, truthy_field};
use crate::view::humanize_key;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

/// Shown when a record carries no date under any synonym
pub const UNKNOWN_DATE: &str = "N/A";

/// A labelled key/value pair (patient info, vital signs)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordField {
    pub key: String,
    pub label: String,
    pub value: String,
}

/// A diagnosis or procedure, optionally coded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodedEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub description: String,
}

/// A prescribed medication
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Medication {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Clinical notes, free text or structured
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Notes {
    Text(String),
    Structured(Value),
}

impl Notes {
    /// Free text verbatim, structured notes pretty-printed
    pub fn display_text(&self) -> String {
        match self {
            Notes::Text(text) => text.clone(),
            Notes::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

/// A normalized medical record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub date: String,
    pub patient: Vec<RecordField>,
    pub vital_signs: Vec<RecordField>,
    pub diagnosis: Vec<CodedEntry>,
    pub medications: Vec<Medication>,
    pub procedures: Vec<CodedEntry>,
    pub notes: Option<Notes>,
    /// The resolved record before field extraction
    pub raw: Value,
}

impl MedicalRecord {
    /// Locate and normalize the record in a payload.
    ///
    /// Returns `None` when no candidate location under `data` holds a value.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let data = payload.get("data")?;
        let source = RECORD_SOURCES
            .iter()
            .find_map(|path| lookup_path(data, path))?;

        Some(Self::from_record(resolve_record(source)))
    }

    /// Normalize an already-resolved record object
    pub fn from_record(record: Value) -> Self {
        Self {
            date: DATE
                .lookup(&record)
                .map(coerce_to_text)
                .unwrap_or_else(|| UNKNOWN_DATE.to_string()),
            patient: labelled_fields(&record, PATIENT),
            vital_signs: labelled_fields(&record, VITAL_SIGNS),
            diagnosis: coded_entries(&record, DIAGNOSIS),
            medications: medications(&record),
            procedures: coded_entries(&record, PROCEDURES),
            notes: NOTES.lookup(&record).map(|notes| match notes {
                Value::String(text) => Notes::Text(text.clone()),
                other => Notes::Structured(other.clone()),
            }),
            raw: record,
        }
    }

    /// No structured section has content
    pub fn is_empty(&self) -> bool {
        self.patient.is_empty()
            && self.vital_signs.is_empty()
            && self.diagnosis.is_empty()
            && self.medications.is_empty()
            && self.procedures.is_empty()
            && self.notes.is_none()
    }
}

/// Follow a key path, requiring the final value to be truthy
fn lookup_path<'a>(data: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let (last, parents) = path.split_last()?;
    let parent = parents
        .iter()
        .try_fold(data, |value, key| value.get(*key))?;
    truthy_field(parent, last)
}

/// Unwrap a record source into the record object.
///
/// Strings are parsed as JSON; text that is not a JSON object is kept as
/// free-text notes.
fn resolve_record(source: &Value) -> Value {
    match source {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(parsed @ Value::Object(_)) => unwrap_nested(&parsed).clone(),
            Ok(_) => json!({ "notes": text }),
            Err(err) => {
                debug!(error = %err, "Medical record is not JSON, treating as notes");
                json!({ "notes": text })
            }
        },
        other => unwrap_nested(other).clone(),
    }
}

fn unwrap_nested(value: &Value) -> &Value {
    truthy_field(value, "medical_record").unwrap_or(value)
}

/// Field value as display text
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(_) | Value::Object(_) => to_json_text(value),
        other => coerce_to_text(other),
    }
}

fn labelled_fields(record: &Value, synonyms: FieldSynonyms) -> Vec<RecordField> {
    let Some(Value::Object(map)) = synonyms.lookup(record) else {
        return Vec::new();
    };

    map.iter()
        .map(|(key, value)| RecordField {
            key: key.clone(),
            label: humanize_key(key),
            value: field_text(value),
        })
        .collect()
}

/// Entries of a list-like field; a lone string or object counts as one entry
fn entries(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
        None => Vec::new(),
    }
}

fn coded_entries(record: &Value, synonyms: FieldSynonyms) -> Vec<CodedEntry> {
    entries(synonyms.lookup(record))
        .into_iter()
        .map(|entry| match entry {
            Value::Object(_) => CodedEntry {
                code: truthy_field(entry, "code").map(coerce_to_text),
                description: first_truthy(entry, &["description", "name"])
                    .map(coerce_to_text)
                    .unwrap_or_else(|| to_json_text(entry)),
            },
            other => CodedEntry {
                code: None,
                description: coerce_to_text(other),
            },
        })
        .collect()
}

fn medications(record: &Value) -> Vec<Medication> {
    let optional = |entry: &Value, key: &str| truthy_field(entry, key).map(coerce_to_text);

    entries(MEDICATIONS.lookup(record))
        .into_iter()
        .map(|entry| Medication {
            name: match entry {
                Value::Object(_) => first_truthy(entry, &["name", "medication"])
                    .map(coerce_to_text)
                    .unwrap_or_else(|| to_json_text(entry)),
                other => coerce_to_text(other),
            },
            dosage: optional(entry, "dosage"),
            frequency: optional(entry, "frequency"),
            duration: optional(entry, "duration"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_record() {
        let record = MedicalRecord::from_payload(&json!({
            "type": "output",
            "data": {"medical_record": {
                "patient_info": {"full_name": "J. Doe", "age": 54},
                "vitals": {"blood_pressure": {"systolic": 120, "diastolic": 80}},
                "diagnoses": [{"code": "I10", "description": "Hypertension"}, "Fatigue"],
                "meds": [{"medication": "Lisinopril", "dosage": "10mg", "frequency": "daily"}],
                "visit_date": "2024-05-02"
            }}
        }))
        .unwrap();

        assert_eq!(record.date, "2024-05-02");
        assert_eq!(record.patient[0].label, "Full Name");
        assert_eq!(record.patient[1].value, "54");
        assert_eq!(
            record.vital_signs[0].value,
            "{\"systolic\":120,\"diastolic\":80}"
        );
        assert_eq!(record.diagnosis[0].code.as_deref(), Some("I10"));
        assert_eq!(record.diagnosis[1].description, "Fatigue");
        assert_eq!(record.medications[0].name, "Lisinopril");
        assert_eq!(record.medications[0].frequency.as_deref(), Some("daily"));
        assert_eq!(record.medications[0].duration, None);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_json_string_output() {
        let output = json!({"medical_record": {"notes": "Stable.", "procedures": ["ECG"]}});
        let record = MedicalRecord::from_payload(&json!({
            "data": {"output": output.to_string()}
        }))
        .unwrap();

        assert_eq!(record.notes, Some(Notes::Text("Stable.".to_string())));
        assert_eq!(record.procedures[0].description, "ECG");
        assert_eq!(record.date, UNKNOWN_DATE);
    }

    #[test]
    fn test_unparseable_string_becomes_notes() {
        let record = MedicalRecord::from_payload(&json!({
            "data": {"output_answer": "Patient reports mild headache."}
        }))
        .unwrap();

        assert_eq!(
            record.notes.as_ref().map(Notes::display_text).as_deref(),
            Some("Patient reports mild headache.")
        );
        assert!(record.patient.is_empty());
    }

    #[test]
    fn test_missing_record() {
        assert!(MedicalRecord::from_payload(&json!({"data": {}})).is_none());
        assert!(MedicalRecord::from_payload(&json!({})).is_none());
    }

    #[test]
    fn test_unstructured_record_is_empty() {
        let record = MedicalRecord::from_record(json!({"summary": "n/a"}));
        assert!(record.is_empty());
        assert_eq!(record.raw, json!({"summary": "n/a"}));
    }
}
