//! Medical record extraction
//!
//! Medical dataset payloads carry a record object (or its JSON text) in one
//! of several places under `data`, with field names that vary by producer.

mod record;
pub mod synonyms;

pub use record::{CodedEntry, MedicalRecord, Medication, Notes, RecordField, UNKNOWN_DATE};
pub use synonyms::FieldSynonyms;
