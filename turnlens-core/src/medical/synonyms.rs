//! Synonym-keyed field lookups
//!
//! Upstream records spell the same logical field several ways. Each field is
//! an ordered key list; the first truthy key wins.

use crate::normalize::value::first_truthy;
use serde_json::Value;

/// Ordered synonyms for one logical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSynonyms {
    pub field: &'static str,
    pub keys: &'static [&'static str],
}

impl FieldSynonyms {
    /// First truthy value among the synonyms
    pub fn lookup<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        first_truthy(record, self.keys)
    }
}

pub const PATIENT: FieldSynonyms = FieldSynonyms {
    field: "patient",
    keys: &["patient", "patient_info"],
};

pub const DIAGNOSIS: FieldSynonyms = FieldSynonyms {
    field: "diagnosis",
    keys: &["diagnosis", "diagnoses"],
};

pub const MEDICATIONS: FieldSynonyms = FieldSynonyms {
    field: "medications",
    keys: &["medications", "meds"],
};

pub const PROCEDURES: FieldSynonyms = FieldSynonyms {
    field: "procedures",
    keys: &["procedures"],
};

pub const VITAL_SIGNS: FieldSynonyms = FieldSynonyms {
    field: "vital_signs",
    keys: &["vital_signs", "vitals"],
};

pub const NOTES: FieldSynonyms = FieldSynonyms {
    field: "notes",
    keys: &["notes", "clinical_notes"],
};

pub const DATE: FieldSynonyms = FieldSynonyms {
    field: "date",
    keys: &["date", "visit_date", "timestamp"],
};

/// Where the record itself may live in a payload's `data`, in priority order
pub const RECORD_SOURCES: &[&[&str]] = &[
    &["medical_record"],
    &["output", "medical_record"],
    &["output"],
    &["output_answer"],
];

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_synonym_wins() {
        let record = json!({"vitals": {"hr": 60}, "vital_signs": {"hr": 72}});
        assert_eq!(VITAL_SIGNS.lookup(&record), Some(&json!({"hr": 72})));
    }

    #[test]
    fn test_empty_value_falls_through() {
        let record = json!({"date": "", "visit_date": "2024-03-01"});
        assert_eq!(DATE.lookup(&record), Some(&json!("2024-03-01")));
        assert_eq!(NOTES.lookup(&record), None);
    }
}
