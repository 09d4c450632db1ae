//! Synthetic historical batch generator.
//!
//! Produces the "carga histórica" the kiosk's admin screen exports: a fixed
//! number of plausible past visits with randomly sampled identities, vitals
//! and timestamps, plus a small rate of injected temperature sensor faults.
//! Output is intentionally not reproducible across runs (unseeded thread
//! RNG), but it is computed once per process and cached, so repeated reads
//! return the same collection.

use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use rand::distributions::Distribution;
use rand::seq::SliceRandom;
use rand::Rng;
use statrs::distribution::Normal;
use tracing::info;

use crate::core::triage::SENSOR_FAULT_TEMP;
use crate::models::{PatientRecord, RecordOrigin, Vitals};

const GIVEN_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carlos", "Diana", "Eduardo", "Fernanda", "Gustavo", "Helena", "Igor",
    "Juliana", "Lucas", "Mariana",
];

const SURNAMES: &[&str] = &[
    "Silva", "Santos", "Oliveira", "Souza", "Pereira", "Costa", "Almeida", "Ferreira",
];

// Spans the severity spectrum, from trivial to critical presentations.
const COMPLAINTS: &[&str] = &[
    "pequeno corte no dedo",
    "dor de cabeça leve",
    "dor nas costas",
    "tosse persistente",
    "febre",
    "tontura e desmaio",
    "dor no peito",
    "falta de ar",
    "fratura exposta",
    "acidente de moto",
];

const BLOOD_PRESSURES: &[&str] = &["110/70", "120/80", "130/85", "140/90", "150/95"];

const TEMP_MEAN: f64 = 37.0;
const TEMP_STD_DEV: f64 = 1.5;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub count: usize,
    pub base_id: i64,
    /// Timestamps are sampled uniformly within this many minutes before now.
    pub history_window_minutes: i64,
    /// Per-record probability of overriding the temperature with the
    /// sensor-fault placeholder (0.0), independent of every other field.
    pub fault_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 500,
            base_id: 1000,
            history_window_minutes: 10_000,
            fault_probability: 0.03,
        }
    }
}

/// Generate a batch of synthetic visit records. Ids are sequential from
/// `base_id`; timestamps are sampled independently, so the batch is not
/// time-ordered.
pub fn generate_batch<R: Rng + ?Sized>(rng: &mut R, config: &GeneratorConfig) -> Vec<PatientRecord> {
    let temp_dist = Normal::new(TEMP_MEAN, TEMP_STD_DEV).unwrap();
    let now = Utc::now();

    (0..config.count)
        .map(|i| {
            let given = GIVEN_NAMES.choose(rng).copied().unwrap_or("Ana");
            let surname = SURNAMES.choose(rng).copied().unwrap_or("Silva");
            let minutes_ago = rng.gen_range(0..=config.history_window_minutes);

            let temperature = if rng.gen_bool(config.fault_probability) {
                SENSOR_FAULT_TEMP
            } else {
                (temp_dist.sample(rng) * 10.0).round() / 10.0
            };

            PatientRecord {
                id: config.base_id + i as i64,
                captured_at: now - Duration::minutes(minutes_ago),
                name: format!("{} {}", given, surname),
                age: rng.gen_range(18..=90),
                complaint: (*COMPLAINTS.choose(rng).unwrap_or(&"febre")).to_string(),
                vitals: Vitals {
                    temperature_celsius: temperature,
                    oxygen_saturation: rng.gen_range(85..=100),
                    heart_rate: rng.gen_range(50..=140),
                    blood_pressure: BLOOD_PRESSURES.choose(rng).map(|bp| (*bp).to_string()),
                },
                origin: RecordOrigin::Synthetic,
            }
        })
        .collect()
}

static HISTORICAL: Lazy<Vec<PatientRecord>> = Lazy::new(|| {
    let batch = generate_batch(&mut rand::thread_rng(), &GeneratorConfig::default());
    info!(count = batch.len(), "historical batch generated");
    batch
});

/// The process-wide historical batch. Computed on first access with an
/// unseeded RNG, then immutable; safe to share read-only across callers.
pub fn historical_batch() -> &'static [PatientRecord] {
    &HISTORICAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn batch_has_configured_count_and_unique_sequential_ids() {
        let mut rng = StdRng::seed_from_u64(42);
        let config = GeneratorConfig::default();
        let batch = generate_batch(&mut rng, &config);

        assert_eq!(batch.len(), 500);
        let ids: HashSet<i64> = batch.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), batch.len());
        assert_eq!(batch[0].id, 1000);
        assert_eq!(batch[499].id, 1499);
    }

    #[test]
    fn fields_stay_within_generation_domains() {
        let mut rng = StdRng::seed_from_u64(7);
        let batch = generate_batch(&mut rng, &GeneratorConfig::default());

        for record in &batch {
            assert!((18..=90).contains(&record.age));
            assert!((85..=100).contains(&record.vitals.oxygen_saturation));
            assert!((50..=140).contains(&record.vitals.heart_rate));
            assert!(record.name.contains(' '));
            assert!(!record.complaint.is_empty());
            assert!(record.vitals.blood_pressure.is_some());
            assert_eq!(record.origin, RecordOrigin::Synthetic);
        }
    }

    #[test]
    fn temperatures_are_rounded_to_one_decimal() {
        let mut rng = StdRng::seed_from_u64(9);
        let batch = generate_batch(&mut rng, &GeneratorConfig::default());

        for record in &batch {
            let t = record.vitals.temperature_celsius;
            assert!(((t * 10.0).round() / 10.0 - t).abs() < 1e-9);
        }
    }

    #[test]
    fn fault_injection_rate_is_about_three_percent() {
        let mut rng = StdRng::seed_from_u64(123);
        let config = GeneratorConfig {
            count: 20_000,
            ..GeneratorConfig::default()
        };
        let batch = generate_batch(&mut rng, &config);

        let faults = batch
            .iter()
            .filter(|r| r.vitals.temperature_celsius == SENSOR_FAULT_TEMP)
            .count();
        let rate = faults as f64 / batch.len() as f64;
        assert!((0.02..=0.04).contains(&rate), "fault rate {} outside tolerance", rate);
    }

    #[test]
    fn timestamps_fall_inside_the_history_window() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = GeneratorConfig::default();
        let before = Utc::now();
        let batch = generate_batch(&mut rng, &config);

        let window = Duration::minutes(config.history_window_minutes);
        for record in &batch {
            assert!(record.captured_at <= Utc::now());
            assert!(record.captured_at >= before - window - Duration::seconds(5));
        }
    }

    #[test]
    fn historical_batch_is_cached_across_reads() {
        let first = historical_batch();
        let second = historical_batch();
        assert_eq!(first.len(), 500);
        assert!(std::ptr::eq(first.as_ptr(), second.as_ptr()));
        assert_eq!(first[0].id, second[0].id);
        assert_eq!(first[0].captured_at, second[0].captured_at);
    }
}
