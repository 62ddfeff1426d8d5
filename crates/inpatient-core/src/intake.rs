//! Intake: validation and construction of new patient records.
//!
//! The query engine never re-validates. Everything it receives through
//! [`QueryEngine::add`](crate::query::QueryEngine::add) is expected to have
//! passed through [`Intake::submit`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::RegistryConfig;
use crate::models::{is_known_doctor, is_known_room, parse_admission_date, Patient};

/// Digits in a national ID number.
pub const NATIONAL_ID_LEN: usize = 16;

/// Minimum name length after trimming.
const MIN_NAME_LEN: usize = 2;

/// Minimum diagnosis length after trimming.
const MIN_DIAGNOSIS_LEN: usize = 5;

/// Length of the random part of generated IDs.
const ID_SUFFIX_LEN: usize = 9;

/// Form field a validation message belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    NationalId,
    Diagnosis,
    AdmissionDate,
    Doctor,
    Room,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormField::Name => "name",
            FormField::NationalId => "national ID",
            FormField::Diagnosis => "diagnosis",
            FormField::AdmissionDate => "admission date",
            FormField::Doctor => "doctor",
            FormField::Room => "room",
        };
        f.write_str(label)
    }
}

/// Field-scoped validation failures, one message per field.
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{} field(s) failed validation", .0.len())]
pub struct FormErrors(pub BTreeMap<FormField, String>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

/// Raw intake form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatientForm {
    pub name: String,
    pub national_id: String,
    pub diagnosis: String,
    pub admission_date: String,
    pub doctor: String,
    pub room: String,
}

impl PatientForm {
    /// Check every field, collecting all failures.
    ///
    /// `today` is the current local date; admissions must fall in
    /// `[today, today + window_days]`.
    pub fn validate(&self, today: NaiveDate, window_days: i64) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.insert(FormField::Name, "name is required");
        } else if name.chars().count() < MIN_NAME_LEN {
            errors.insert(
                FormField::Name,
                format!("name must be at least {MIN_NAME_LEN} characters"),
            );
        }

        if self.national_id.trim().is_empty() {
            errors.insert(FormField::NationalId, "national ID is required");
        } else if !is_valid_national_id(&self.national_id) {
            errors.insert(
                FormField::NationalId,
                format!("national ID must be exactly {NATIONAL_ID_LEN} digits"),
            );
        }

        let diagnosis = self.diagnosis.trim();
        if diagnosis.is_empty() {
            errors.insert(FormField::Diagnosis, "diagnosis is required");
        } else if diagnosis.chars().count() < MIN_DIAGNOSIS_LEN {
            errors.insert(
                FormField::Diagnosis,
                format!("diagnosis must be at least {MIN_DIAGNOSIS_LEN} characters"),
            );
        }

        // A window reaching past the end of the calendar has no upper bound.
        let latest = today
            .checked_add_days(Days::new(window_days.max(0).unsigned_abs()))
            .unwrap_or(NaiveDate::MAX);

        if self.admission_date.is_empty() {
            errors.insert(FormField::AdmissionDate, "admission date is required");
        } else {
            match parse_admission_date(&self.admission_date) {
                None => errors.insert(FormField::AdmissionDate, "admission date is not a valid date"),
                Some(date) if date < today => {
                    errors.insert(FormField::AdmissionDate, "admission date cannot be in the past")
                }
                Some(date) if date > latest => errors.insert(
                    FormField::AdmissionDate,
                    format!("admission date must be at most {window_days} days ahead"),
                ),
                Some(_) => {}
            }
        }

        if self.doctor.is_empty() {
            errors.insert(FormField::Doctor, "attending doctor is required");
        } else if !is_known_doctor(&self.doctor) {
            errors.insert(FormField::Doctor, "unknown doctor");
        }

        if self.room.is_empty() {
            errors.insert(FormField::Room, "room is required");
        } else if !is_known_room(&self.room) {
            errors.insert(FormField::Room, "unknown room");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Check a national ID: exactly 16 ASCII digits, nothing else.
pub fn is_valid_national_id(national_id: &str) -> bool {
    national_id.len() == NATIONAL_ID_LEN && national_id.bytes().all(|b| b.is_ascii_digit())
}

/// Trim and collapse every whitespace run to a single space.
pub fn sanitize_input(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Current local calendar date.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Generates process-unique patient IDs.
///
/// IDs are a millisecond timestamp followed by a short random suffix. The
/// timestamp part is strictly increasing per generator.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_millis: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let millis = if now > self.last_millis {
            now
        } else {
            self.last_millis + 1
        };
        self.last_millis = millis;

        let suffix: String = uuid::Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(ID_SUFFIX_LEN)
            .collect();
        format!("{millis}{suffix}")
    }
}

/// Intake path: validates forms and builds records ready for the engine.
#[derive(Debug)]
pub struct Intake {
    window_days: i64,
    ids: IdGenerator,
}

impl Intake {
    pub fn new(config: &RegistryConfig) -> Self {
        Self {
            window_days: config.intake_window_days(),
            ids: IdGenerator::new(),
        }
    }

    /// Validate `form` against `today` and build the record.
    pub fn submit(&mut self, form: &PatientForm, today: NaiveDate) -> Result<Patient, FormErrors> {
        if let Err(errors) = form.validate(today, self.window_days) {
            tracing::debug!(fields = errors.len(), "intake form rejected");
            return Err(errors);
        }

        Ok(Patient {
            id: self.ids.next_id(),
            name: sanitize_input(&form.name),
            national_id: form.national_id.clone(),
            diagnosis: sanitize_input(&form.diagnosis),
            admission_date: form.admission_date.clone(),
            doctor: form.doctor.clone(),
            room: form.room.clone(),
        })
    }
}
