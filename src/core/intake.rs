//! Kiosk submission boundary.
//!
//! Validation happens here, before the classifier ever runs: the classifier
//! assumes validated input and has no error path of its own. Vitals are
//! accepted as given, including implausible values; only the required text
//! fields and the age domain are checked.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::triage::TriagePolicy;
use crate::models::{PatientRecord, RecordOrigin, TriageOutcome, Vitals};

pub const MAX_AGE: u8 = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeSubmission {
    pub name: String,
    pub age: u8,
    pub complaint: String,
    pub temperature_celsius: f64,
    pub oxygen_saturation: i32,
    pub heart_rate: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("nome do paciente é obrigatório")]
    EmptyName,
    #[error("descrição da queixa é obrigatória")]
    EmptyComplaint,
    #[error("idade {0} fora do intervalo aceito (0 a {MAX_AGE})")]
    AgeOutOfRange(u8),
}

impl IntakeSubmission {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.complaint.trim().is_empty() {
            return Err(ValidationError::EmptyComplaint);
        }
        if self.age > MAX_AGE {
            return Err(ValidationError::AgeOutOfRange(self.age));
        }
        Ok(())
    }
}

/// Validate a submission, mint a kiosk record, and classify it once. The
/// protocol id is drawn from the kiosk's five-digit range; uniqueness is
/// only per batch, never across runs.
pub fn process<R: Rng + ?Sized>(
    submission: IntakeSubmission,
    policy: &TriagePolicy,
    rng: &mut R,
) -> Result<(PatientRecord, TriageOutcome), ValidationError> {
    submission.validate()?;

    let vitals = Vitals {
        temperature_celsius: submission.temperature_celsius,
        oxygen_saturation: submission.oxygen_saturation,
        heart_rate: submission.heart_rate,
        blood_pressure: None,
    };
    let outcome = policy.classify(&submission.complaint, &vitals);

    let record = PatientRecord {
        id: rng.gen_range(10_000..=99_999),
        captured_at: Utc::now(),
        name: submission.name,
        age: submission.age,
        complaint: submission.complaint,
        vitals,
        origin: RecordOrigin::Kiosk,
    };
    info!(protocol = record.id, severity = %outcome.severity, "submission triaged");

    Ok((record, outcome))
}
