//! Totem intake kiosk core library
//!
//! Behavioral core of the patient self-service kiosk: boundary-validated
//! intake, a configurable rule-chain triage classifier, a cached synthetic
//! history generator, and the JSON/SQL export collaborators downstream
//! importers consume.

pub mod core;
pub mod export;
pub mod models;

pub use self::core::generator::{generate_batch, historical_batch, GeneratorConfig};
pub use self::core::intake::{process, IntakeSubmission, ValidationError};
pub use self::core::triage::TriagePolicy;
pub use self::models::{PatientRecord, RecordOrigin, Severity, TriageOutcome, Vitals};
