//! SQL export.
//!
//! Two paths share one fixed column list. `batch_script` renders a portable
//! DDL+DML text file for the student download flow; free-text fields have
//! their single quotes doubled before interpolation (the original kiosk did
//! not escape at all, which left an injection hazard). `load_into_sqlite`
//! is the preferred path and never interpolates: every value goes through a
//! bound parameter.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::models::PatientRecord;

pub const TABLE_NAME: &str = "atendimentos";

pub const CREATE_TABLE_DDL: &str = "CREATE TABLE IF NOT EXISTS atendimentos (
    id_atendimento INTEGER PRIMARY KEY,
    data_hora TEXT NOT NULL,
    nome_paciente TEXT NOT NULL,
    idade INTEGER NOT NULL,
    queixa TEXT NOT NULL,
    temp REAL NOT NULL,
    saturacao INTEGER NOT NULL,
    bpm INTEGER NOT NULL,
    pressao TEXT
);";

fn escape(text: &str) -> String {
    text.replace('\'', "''")
}

/// Render one INSERT statement for the script export.
pub fn insert_statement(record: &PatientRecord) -> String {
    let pressao = match &record.vitals.blood_pressure {
        Some(bp) => format!("'{}'", escape(bp)),
        None => "NULL".to_string(),
    };
    format!(
        "INSERT INTO {} (id_atendimento, data_hora, nome_paciente, idade, queixa, temp, saturacao, bpm, pressao) \
         VALUES ({}, '{}', '{}', {}, '{}', {}, {}, {}, {});",
        TABLE_NAME,
        record.id,
        record.captured_at.to_rfc3339(),
        escape(&record.name),
        record.age,
        escape(&record.complaint),
        record.vitals.temperature_celsius,
        record.vitals.oxygen_saturation,
        record.vitals.heart_rate,
        pressao,
    )
}

/// Full DDL+DML script for a batch.
pub fn batch_script(records: &[PatientRecord]) -> String {
    let mut script = String::from(CREATE_TABLE_DDL);
    script.push_str("\n\n");
    for record in records {
        script.push_str(&insert_statement(record));
        script.push('\n');
    }
    script
}

/// Load a batch into SQLite using bound parameters. Returns the number of
/// rows inserted.
pub async fn load_into_sqlite(pool: &SqlitePool, records: &[PatientRecord]) -> Result<u64> {
    sqlx::query(CREATE_TABLE_DDL)
        .execute(pool)
        .await
        .context("failed to create atendimentos table")?;

    let mut inserted = 0u64;
    for record in records {
        let result = sqlx::query(
            "INSERT INTO atendimentos (id_atendimento, data_hora, nome_paciente, idade, queixa, temp, saturacao, bpm, pressao) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id)
        .bind(record.captured_at.to_rfc3339())
        .bind(&record.name)
        .bind(i64::from(record.age))
        .bind(&record.complaint)
        .bind(record.vitals.temperature_celsius)
        .bind(record.vitals.oxygen_saturation)
        .bind(record.vitals.heart_rate)
        .bind(record.vitals.blood_pressure.as_deref())
        .execute(pool)
        .await
        .with_context(|| format!("failed to insert record {}", record.id))?;
        inserted += result.rows_affected();
    }
    info!(rows = inserted, "batch loaded into sqlite");
    Ok(inserted)
}
