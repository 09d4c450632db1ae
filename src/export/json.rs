//! JSON payload export.
//!
//! The downstream importer students build consumes these payloads, so the
//! key names follow the deployed kiosk contract (Portuguese) rather than the
//! internal model names. Live submissions carry a `triagem` block; the
//! historical batch does not, because batch export never runs the
//! classifier.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{PatientRecord, TriageOutcome};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPayload {
    pub protocolo_id: i64,
    pub timestamp_coleta: DateTime<Utc>,
    pub paciente: PatientSection,
    pub dados_clinicos: ClinicalSection,
    pub origem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triagem: Option<TriageSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientSection {
    pub nome_completo: String,
    pub idade: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalSection {
    pub queixa_principal: String,
    pub sinais_vitais: VitalsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsSection {
    pub temperatura: f64,
    pub saturacao_o2: i32,
    pub frequencia_cardiaca: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressao: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageSection {
    pub severidade: String,
    pub mensagem: String,
}

pub fn record_payload(record: &PatientRecord) -> RecordPayload {
    RecordPayload {
        protocolo_id: record.id,
        timestamp_coleta: record.captured_at,
        paciente: PatientSection {
            nome_completo: record.name.clone(),
            idade: record.age,
        },
        dados_clinicos: ClinicalSection {
            queixa_principal: record.complaint.clone(),
            sinais_vitais: VitalsSection {
                temperatura: record.vitals.temperature_celsius,
                saturacao_o2: record.vitals.oxygen_saturation,
                frequencia_cardiaca: record.vitals.heart_rate,
                pressao: record.vitals.blood_pressure.clone(),
            },
        },
        origem: record.origin.to_string(),
        triagem: None,
    }
}

/// Payload for a live kiosk submission, with the triage outcome attached.
pub fn submission_payload(record: &PatientRecord, outcome: &TriageOutcome) -> RecordPayload {
    let mut payload = record_payload(record);
    payload.triagem = Some(TriageSection {
        severidade: outcome.severity.to_string(),
        mensagem: outcome.disposition.clone(),
    });
    payload
}

pub fn batch_payload(records: &[PatientRecord]) -> Vec<RecordPayload> {
    records.iter().map(record_payload).collect()
}

pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::triage::TriagePolicy;
    use crate::models::{RecordOrigin, Vitals};

    fn sample_record() -> PatientRecord {
        PatientRecord {
            id: 12345,
            captured_at: Utc::now(),
            name: "Ana Silva".into(),
            age: 34,
            complaint: "dor no peito".into(),
            vitals: Vitals {
                temperature_celsius: 36.5,
                oxygen_saturation: 98,
                heart_rate: 80,
                blood_pressure: None,
            },
            origin: RecordOrigin::Kiosk,
        }
    }

    #[test]
    fn submission_payload_uses_contract_keys_and_triage_block() {
        let record = sample_record();
        let outcome = TriagePolicy::full().classify(&record.complaint, &record.vitals);
        let raw = to_pretty_json(&submission_payload(&record, &outcome)).unwrap();

        assert!(raw.contains("\"protocolo_id\": 12345"));
        assert!(raw.contains("\"nome_completo\": \"Ana Silva\""));
        assert!(raw.contains("\"queixa_principal\": \"dor no peito\""));
        assert!(raw.contains("\"saturacao_o2\": 98"));
        assert!(raw.contains("\"origem\": \"Totem_01\""));
        assert!(raw.contains("\"severidade\": \"VERMELHO\""));
    }

    #[test]
    fn batch_payload_carries_no_triage_block() {
        let records = vec![sample_record()];
        let raw = to_pretty_json(&batch_payload(&records)).unwrap();
        assert!(!raw.contains("triagem"));
        assert!(raw.contains("protocolo_id"));
    }
}
