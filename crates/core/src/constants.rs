//! Constants used throughout the Pharmalert core crate.
//!
//! The catalogues below feed the synthetic request generator. They stand in for the data a
//! real backend would send and are kept here so tests can check generated values against them.

/// Medications a patient may ask for.
pub const MEDICATIONS: [&str; 10] = [
    "Paracétamol",
    "Amoxicilline",
    "Ibuprofène",
    "Oméprazole",
    "Aspirine",
    "Glucophage",
    "Ranitidine",
    "Loratadine",
    "Doliprane",
    "Azithromycine",
];

/// Medications that can only be dispensed against a prescription.
pub const PRESCRIPTION_REQUIRED: [&str; 4] =
    ["Amoxicilline", "Oméprazole", "Azithromycine", "Glucophage"];

/// Patients sending requests.
pub const PATIENT_NAMES: [&str; 10] = [
    "Amadou Diop",
    "Fatou Ndiaye",
    "Ousmane Sow",
    "Aïcha Sarr",
    "Moussa Fall",
    "Mariama Diallo",
    "Ibrahim Gueye",
    "Sophie Mbaye",
    "Omar Cisse",
    "Ndeye Faye",
];

/// Neighbourhoods the requests come from.
pub const PATIENT_LOCATIONS: [&str; 10] = [
    "Médina, Dakar",
    "Mermoz, Dakar",
    "Ouakam, Dakar",
    "Almadies, Dakar",
    "Plateau, Dakar",
    "Grand Yoff, Dakar",
    "Ngor, Dakar",
    "Point E, Dakar",
    "Sacré Cœur, Dakar",
    "Liberté 6, Dakar",
];

/// Prescribing doctors.
pub const DOCTORS: [&str; 5] = ["Dr. Sall", "Dr. Diagne", "Dr. Ba", "Dr. Ndiaye", "Dr. Faye"];

/// Dosage written on every generated prescription line.
pub const PRESCRIPTION_DOSAGE: &str = "500mg";

/// Instructions written on every generated prescription line.
pub const PRESCRIPTION_INSTRUCTIONS: &str = "Prendre 1 comprimé 3 fois par jour";

/// Placeholder scan attached to generated prescriptions.
pub const PRESCRIPTION_IMAGE_URL: &str =
    "https://images.pexels.com/photos/4021775/pexels-photo-4021775.jpeg";

/// Days a generated prescription stays valid.
pub const PRESCRIPTION_VALIDITY_DAYS: i64 = 30;

/// Generated prescription quantities are drawn from this inclusive range.
pub const MIN_PRESCRIPTION_QUANTITY: u32 = 10;
pub const MAX_PRESCRIPTION_QUANTITY: u32 = 29;

/// Generated distances (km) are drawn from `[MIN_DISTANCE_KM, MAX_DISTANCE_KM)`.
pub const MIN_DISTANCE_KM: f64 = 0.5;
pub const MAX_DISTANCE_KM: f64 = 5.5;

/// Generated requests are back-dated by up to this many milliseconds (about 2.8 hours).
pub const MAX_BACKDATE_MS: i64 = 10_000_000;

/// Number of requests seeded by `RequestStore::initialise` unless configured otherwise.
pub const DEFAULT_INITIAL_BATCH_SIZE: usize = 3;

/// Simulated fetch latency before the initial batch appears.
pub const DEFAULT_SEED_DELAY_MS: u64 = 1_500;

/// Upper bound on a single generated batch.
pub const MAX_BATCH_SIZE: usize = 1_000;
