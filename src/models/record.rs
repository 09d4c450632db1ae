use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single patient visit, captured at the kiosk or synthesized for the
/// historical batch. Immutable once produced; there is no update path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: i64,
    pub captured_at: DateTime<Utc>,
    pub name: String,
    pub age: u8,
    pub complaint: String,
    pub vitals: Vitals,
    pub origin: RecordOrigin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vitals {
    pub temperature_celsius: f64,
    pub oxygen_saturation: i32,
    pub heart_rate: i32,
    pub blood_pressure: Option<String>, // "systolic/diastolic"
}

/// Where a record came from. Batch and live records share one shape so a
/// downstream consumer can treat them interchangeably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordOrigin {
    Kiosk,
    Synthetic,
}

impl fmt::Display for RecordOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordOrigin::Kiosk => write!(f, "Totem_01"),
            RecordOrigin::Synthetic => write!(f, "Carga_Historica"),
        }
    }
}

/// Urgency tiers, ordered from least to most urgent. Which subset a
/// deployment uses is decided by its triage policy, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Green,
    Yellow,
    Orange,
    Red,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Green => write!(f, "VERDE"),
            Severity::Yellow => write!(f, "AMARELO"),
            Severity::Orange => write!(f, "LARANJA"),
            Severity::Red => write!(f, "VERMELHO"),
        }
    }
}

/// Result of classifying one submission. Assigned exactly once, at
/// classification time, and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageOutcome {
    pub severity: Severity,
    pub disposition: String,
    /// True only when the policy flags sensor faults and the temperature
    /// reading was the fault placeholder (0.0).
    pub sensor_fault: bool,
}
