//! End-to-end flows through the public API: submission intake, batch
//! export, and the SQL load path.

use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::sqlite::SqlitePoolOptions;
use totem::export::{json, sql};
use totem::{
    generate_batch, process, GeneratorConfig, IntakeSubmission, RecordOrigin, Severity,
    TriagePolicy, ValidationError,
};

fn submission(name: &str, complaint: &str, temp: f64, sat: i32, bpm: i32) -> IntakeSubmission {
    IntakeSubmission {
        name: name.to_string(),
        age: 30,
        complaint: complaint.to_string(),
        temperature_celsius: temp,
        oxygen_saturation: sat,
        heart_rate: bpm,
    }
}

#[test]
fn reference_scenarios_classify_as_deployed() {
    let policy = TriagePolicy::full();
    let mut rng = StdRng::seed_from_u64(1);

    let cases = [
        ("dor no peito", 36.5, 98, 80, Severity::Red),
        ("corte no dedo", 39.5, 99, 80, Severity::Orange),
        ("febre", 38.0, 97, 80, Severity::Yellow),
        ("check-up", 36.5, 98, 75, Severity::Green),
    ];
    for (complaint, temp, sat, bpm, expected) in cases {
        let (record, outcome) =
            process(submission("Ana Silva", complaint, temp, sat, bpm), &policy, &mut rng)
                .unwrap();
        assert_eq!(outcome.severity, expected, "complaint {:?}", complaint);
        assert_eq!(record.origin, RecordOrigin::Kiosk);
    }
}

#[test]
fn empty_complaint_never_reaches_the_classifier() {
    let mut rng = StdRng::seed_from_u64(2);
    let err = process(
        submission("Test", "", 36.5, 98, 80),
        &TriagePolicy::full(),
        &mut rng,
    )
    .unwrap_err();
    assert_eq!(err, ValidationError::EmptyComplaint);
}

#[test]
fn sensor_fault_misclassification_reproduces() {
    // temp = 0.0 passes validation and lands on GREEN, as deployed.
    let mut rng = StdRng::seed_from_u64(3);
    let (_, outcome) = process(
        submission("Test", "sem queixa específica", 0.0, 98, 80),
        &TriagePolicy::full(),
        &mut rng,
    )
    .unwrap();
    assert_eq!(outcome.severity, Severity::Green);
}

#[test]
fn batch_payload_is_importable_and_untriaged() {
    let mut rng = StdRng::seed_from_u64(4);
    let config = GeneratorConfig {
        count: 25,
        ..GeneratorConfig::default()
    };
    let batch = generate_batch(&mut rng, &config);

    let raw = json::to_pretty_json(&json::batch_payload(&batch)).unwrap();
    let reparsed: Vec<json::RecordPayload> = serde_json::from_str(&raw).unwrap();
    assert_eq!(reparsed.len(), 25);
    assert!(reparsed.iter().all(|p| p.triagem.is_none()));
    assert!(reparsed.iter().all(|p| p.origem == "Carga_Historica"));
}

#[tokio::test]
async fn generated_batch_loads_through_bound_parameters() {
    let mut rng = StdRng::seed_from_u64(5);
    let config = GeneratorConfig {
        count: 50,
        ..GeneratorConfig::default()
    };
    let batch = generate_batch(&mut rng, &config);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let rows = sql::load_into_sqlite(&pool, &batch).await.unwrap();
    assert_eq!(rows, 50);

    let distinct_ids: i64 =
        sqlx::query_scalar("SELECT COUNT(DISTINCT id_atendimento) FROM atendimentos")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(distinct_ids, 50);
}
