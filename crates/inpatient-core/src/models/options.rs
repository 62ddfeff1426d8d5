//! Fixed option catalogues offered by the intake form.

/// Attending doctors a patient can be assigned to.
pub const DOCTOR_OPTIONS: [&str; 8] = [
    "dr. Lisa Andini, Sp.PD",
    "dr. Ahmad Rahman, Sp.P",
    "dr. Sarah Pratiwi, Sp.PD",
    "dr. Michael Tan, Sp.JP",
    "dr. Indira Sari, Sp.PD",
    "dr. Roberto Silva, Sp.B",
    "dr. Maya Sari, Sp.A",
    "dr. David Chen, Sp.OG",
];

/// Wards and beds a patient can be admitted to.
pub const ROOM_OPTIONS: [&str; 12] = [
    "Anggrek 1",
    "Anggrek 2",
    "Anggrek 3",
    "Melati 1",
    "Melati 2",
    "Melati 3",
    "Mawar 1",
    "Mawar 2",
    "Mawar 3",
    "Dahlia 1",
    "Dahlia 2",
    "Dahlia 3",
];

/// Check if a label is one of the known doctors.
pub fn is_known_doctor(label: &str) -> bool {
    DOCTOR_OPTIONS.contains(&label)
}

/// Check if a label is one of the known rooms.
pub fn is_known_room(label: &str) -> bool {
    ROOM_OPTIONS.contains(&label)
}
