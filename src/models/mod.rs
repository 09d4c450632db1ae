pub mod record;

pub use record::{PatientRecord, RecordOrigin, Severity, TriageOutcome, Vitals};
