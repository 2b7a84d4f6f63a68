//! Fixed vocabularies the generators draw from.
//!
//! All names are fictional. Order matters: a draw selects by index, so
//! reordering or inserting entries changes every derived value.

pub const FIRST_NAMES: &[&str] = &[
    "Ajay", "Anita", "Kishore", "Rajiv", "Neha", "Noah", "Mia", "Ethan", "Ava", "Omar", "Sofia",
    "Liam", "Henry", "Priya", "Amir", "Sara",
];

pub const LAST_NAMES: &[&str] = &[
    "Sharma", "Patel", "Verma", "Nair", "Kapoor", "Walker", "Chen", "Lopez", "Wright", "Kim",
    "Brown", "Johnson", "Garcia", "Desai", "Scott", "Thompson",
];

/// `(specialization, department)` pairs, drawn together so a doctor's title
/// always matches the department they sit in.
pub const SPECIALTIES: &[(&str, &str)] = &[
    ("Cardiologist", "Cardiology"),
    ("Neurologist", "Neurology"),
    ("Orthopedic Surgeon", "Orthopedics"),
    ("Dermatologist", "Dermatology"),
    ("General Physician", "General Medicine"),
    ("Emergency Physician", "Emergency"),
    ("Endocrinologist", "Endocrinology"),
    ("Ophthalmologist", "Ophthalmology"),
];

pub const APPOINTMENT_REASONS: &[&str] = &[
    "Routine check-up",
    "Follow-up visit",
    "Chest pain",
    "Shortness of breath",
    "Persistent headache",
    "Joint pain",
    "Fever and cough",
    "Medication review",
    "Post-operative review",
    "Abdominal pain",
];

pub const CLINICAL_SUGGESTIONS: &[&str] = &[
    "Continue current medication",
    "Order blood panel",
    "Schedule imaging",
    "Refer to specialist",
    "Lifestyle modification advised",
    "Review in two weeks",
    "Adjust dosage",
    "Physiotherapy recommended",
];

/// Hospital staffing baseline by group. Illustrative, not measured.
pub const STAFF_BASELINE: &[(&str, u32)] = &[
    ("Nursing", 92),
    ("Physicians", 31),
    ("Pharmacy Staff", 21),
    ("OT Staff", 18),
    ("ER Staff", 24),
    ("Lab/Diagnostics", 24),
    ("Housekeeping", 31),
    ("Front Desk", 15),
    ("IT", 12),
    ("Security", 15),
    ("Admin", 21),
];

/// Licensed bed count. Illustrative, not measured.
pub const BED_CAPACITY: u32 = 240;

/// Display label for a patient reference that resolves to nobody.
pub const UNKNOWN_PATIENT: &str = "Unknown Patient";

/// Display label for an appointment whose patient has no assigned doctor.
pub const UNASSIGNED_DOCTOR: &str = "Unassigned";
