//! Sort directive for the patient view.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::patient::Patient;

/// Patient field the view can be sorted by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    Name,
    NationalId,
    Diagnosis,
    AdmissionDate,
    Doctor,
    Room,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::Name,
        SortKey::NationalId,
        SortKey::Diagnosis,
        SortKey::AdmissionDate,
        SortKey::Doctor,
        SortKey::Room,
    ];

    /// Token used in serialized form and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::NationalId => "nationalId",
            SortKey::Diagnosis => "diagnosis",
            SortKey::AdmissionDate => "admissionDate",
            SortKey::Doctor => "doctor",
            SortKey::Room => "room",
        }
    }

    /// Compare two records on this key, ascending.
    ///
    /// Admission dates compare by calendar value. Text fields compare by
    /// their characters, case-sensitive. A date that fails to parse orders
    /// before every valid date.
    pub fn compare(&self, a: &Patient, b: &Patient) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::NationalId => a.national_id.cmp(&b.national_id),
            SortKey::Diagnosis => a.diagnosis.cmp(&b.diagnosis),
            SortKey::AdmissionDate => a.admission_date().cmp(&b.admission_date()),
            SortKey::Doctor => a.doctor.cmp(&b.doctor),
            SortKey::Room => a.room.cmp(&b.room),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized sort key token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// The single active (key, direction) pair governing view order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SortDirective {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortDirective {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    /// Directive that results from clicking `key` while `current` is active.
    ///
    /// The same key flips from ascending to descending; anything else starts
    /// ascending on `key`.
    pub fn toggle(current: Option<SortDirective>, key: SortKey) -> Self {
        match current {
            Some(active) if active.key == key && active.direction == SortDirection::Ascending => {
                Self::descending(key)
            }
            _ => Self::ascending(key),
        }
    }

    /// Comparator for this directive.
    ///
    /// Descending reverses each comparison rather than the sorted output, so
    /// equal keys keep their incoming order under a stable sort.
    pub fn compare(&self, a: &Patient, b: &Patient) -> Ordering {
        let ordering = self.key.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(name: &str, date: &str) -> Patient {
        Patient {
            id: name.into(),
            name: name.into(),
            national_id: "1234567890123456".into(),
            diagnosis: "Gastritis Akut".into(),
            admission_date: date.into(),
            doctor: "dr. Lisa Andini, Sp.PD".into(),
            room: "Anggrek 1".into(),
        }
    }

    #[test]
    fn test_toggle_same_key_flips() {
        let first = SortDirective::toggle(None, SortKey::Name);
        assert_eq!(first, SortDirective::ascending(SortKey::Name));

        let second = SortDirective::toggle(Some(first), SortKey::Name);
        assert_eq!(second, SortDirective::descending(SortKey::Name));

        let third = SortDirective::toggle(Some(second), SortKey::Name);
        assert_eq!(third, SortDirective::ascending(SortKey::Name));
    }

    #[test]
    fn test_toggle_other_key_resets() {
        let current = SortDirective::descending(SortKey::Name);
        let next = SortDirective::toggle(Some(current), SortKey::Room);
        assert_eq!(next, SortDirective::ascending(SortKey::Room));
    }

    #[test]
    fn test_date_compare_is_calendar() {
        let early = patient("A", "2025-06-09");
        let late = patient("B", "2025-06-10");
        assert_eq!(SortKey::AdmissionDate.compare(&early, &late), Ordering::Less);

        let desc = SortDirective::descending(SortKey::AdmissionDate);
        assert_eq!(desc.compare(&early, &late), Ordering::Greater);
    }

    #[test]
    fn test_text_compare_is_case_sensitive() {
        let upper = patient("Zaki", "2025-06-09");
        let lower = patient("andi", "2025-06-09");
        // 'Z' (0x5A) sorts before 'a' (0x61)
        assert_eq!(SortKey::Name.compare(&upper, &lower), Ordering::Less);
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!("admissionDate".parse::<SortKey>().unwrap(), SortKey::AdmissionDate);
        assert_eq!("ROOM".parse::<SortKey>().unwrap(), SortKey::Room);
        assert!("id".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_directive_serde_tokens() {
        let directive = SortDirective::descending(SortKey::AdmissionDate);
        let json = serde_json::to_string(&directive).unwrap();
        assert_eq!(json, r#"{"key":"admissionDate","direction":"desc"}"#);
    }
}
