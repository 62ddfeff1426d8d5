//! Seed providers for the initial patient collection.
//!
//! Seed records represent data that already exists, so they are not run
//! through the intake admission-window check. Every other record rule still
//! holds: a 16-digit national ID, a non-blank name and diagnosis, and a
//! well-formed `YYYY-MM-DD` admission date.

use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::intake::is_valid_national_id;
use crate::models::{parse_admission_date, Patient};

/// Seed errors.
#[derive(Error, Debug)]
pub enum SeedError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Duplicate patient ID in seed: {0}")]
    DuplicateId(String),

    #[error("Invalid seed record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("Seed source unavailable: {0}")]
    Unavailable(String),
}

pub type SeedResult<T> = Result<T, SeedError>;

/// Asynchronous source of the initial patient list.
pub trait SeedProvider: Send + Sync {
    fn fetch(&self) -> impl Future<Output = SeedResult<Vec<Patient>>> + Send;
}

/// Reject seeds that reuse a patient ID.
pub fn check_unique_ids(patients: &[Patient]) -> SeedResult<()> {
    let mut seen = HashSet::with_capacity(patients.len());
    for patient in patients {
        if !seen.insert(patient.id.as_str()) {
            return Err(SeedError::DuplicateId(patient.id.clone()));
        }
    }
    Ok(())
}

/// Check one seed record against the record rules, minus the admission window.
pub fn check_record(patient: &Patient) -> SeedResult<()> {
    let reason = if patient.name.trim().is_empty() {
        "name is blank".to_string()
    } else if !is_valid_national_id(&patient.national_id) {
        format!("national ID {:?} is not 16 digits", patient.national_id)
    } else if patient.diagnosis.trim().is_empty() {
        "diagnosis is blank".to_string()
    } else if parse_admission_date(&patient.admission_date).is_none() {
        format!("admission date {:?} is not YYYY-MM-DD", patient.admission_date)
    } else {
        return Ok(());
    };

    Err(SeedError::InvalidRecord {
        id: patient.id.clone(),
        reason,
    })
}

/// Built-in demo ward of eight patients, served after a fixed delay.
#[derive(Debug, Clone)]
pub struct DemoSeed {
    delay: Duration,
}

impl DemoSeed {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The demo records, in arrival order.
    #[rustfmt::skip]
    pub fn records() -> Vec<Patient> {
        vec![
            demo_patient("1", "Andi Saputra", "1234567890123456", "Demam Berdarah Dengue (DBD)", "2025-06-30", "dr. Lisa Andini, Sp.PD", "Anggrek 1"),
            demo_patient("2", "Budi Santoso", "6543210987654321", "Pneumonia", "2025-06-28", "dr. Ahmad Rahman, Sp.P", "Melati 2"),
            demo_patient("3", "Citra Dewi", "1122334455667788", "Gastritis Akut", "2025-07-01", "dr. Sarah Pratiwi, Sp.PD", "Mawar 3"),
            demo_patient("4", "Dedi Kurniawan", "9988776655443322", "Hipertensi Grade 2", "2025-06-25", "dr. Michael Tan, Sp.JP", "Dahlia 1"),
            demo_patient("5", "Eka Putri Maharani", "5566778899001122", "Diabetes Mellitus Tipe 2", "2025-07-02", "dr. Indira Sari, Sp.PD", "Anggrek 2"),
            demo_patient("6", "Fajar Hidayat", "3344556677889900", "Appendisitis Akut", "2025-06-29", "dr. Roberto Silva, Sp.B", "Melati 1"),
            demo_patient("7", "Gita Permatasari", "7788990011223344", "Bronkitis Akut", "2025-06-27", "dr. Ahmad Rahman, Sp.P", "Mawar 1"),
            demo_patient("8", "Hendra Wijaya", "2233445566778899", "Infeksi Saluran Kemih", "2025-06-26", "dr. Lisa Andini, Sp.PD", "Dahlia 2"),
        ]
    }
}

fn demo_patient(
    id: &str,
    name: &str,
    national_id: &str,
    diagnosis: &str,
    admission_date: &str,
    doctor: &str,
    room: &str,
) -> Patient {
    Patient {
        id: id.into(),
        name: name.into(),
        national_id: national_id.into(),
        diagnosis: diagnosis.into(),
        admission_date: admission_date.into(),
        doctor: doctor.into(),
        room: room.into(),
    }
}

impl SeedProvider for DemoSeed {
    async fn fetch(&self) -> SeedResult<Vec<Patient>> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::records())
    }
}

/// Seed read from a JSON array of patient records on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSeed {
    path: PathBuf,
}

impl JsonFileSeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a JSON array of records.
    pub fn parse(json: &str) -> SeedResult<Vec<Patient>> {
        let patients: Vec<Patient> = serde_json::from_str(json)?;
        for patient in &patients {
            check_record(patient)?;
        }
        check_unique_ids(&patients)?;
        Ok(patients)
    }
}

impl SeedProvider for JsonFileSeed {
    async fn fetch(&self) -> SeedResult<Vec<Patient>> {
        let json = tokio::fs::read_to_string(&self.path).await?;
        Self::parse(&json)
    }
}
