//! Synthetic request generator.
//!
//! Stands in for a backend feed: it produces plausible requests drawn from the fixed
//! catalogues in [`crate::constants`]. All randomness flows through one [`StdRng`], and "now"
//! comes from an injected [`Clock`], so a seeded generator with a [`FixedClock`] produces the
//! same batch every time.
//!
//! [`FixedClock`]: crate::clock::FixedClock

use crate::clock::Clock;
use crate::constants::{
    DOCTORS, MAX_BACKDATE_MS, MAX_BATCH_SIZE, MAX_DISTANCE_KM, MAX_PRESCRIPTION_QUANTITY,
    MEDICATIONS, MIN_DISTANCE_KM, MIN_PRESCRIPTION_QUANTITY, PATIENT_LOCATIONS, PATIENT_NAMES,
    PRESCRIPTION_DOSAGE, PRESCRIPTION_IMAGE_URL, PRESCRIPTION_INSTRUCTIONS,
    PRESCRIPTION_REQUIRED, PRESCRIPTION_VALIDITY_DAYS,
};
use crate::model::{Medication, Prescription, Request};
use crate::{RequestError, RequestResult};
use chrono::{DateTime, Duration, Utc};
use pharmalert_uuid::RequestId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Returns true if `medication` can only be dispensed against a prescription.
pub fn requires_prescription(medication: &str) -> bool {
    PRESCRIPTION_REQUIRED.contains(&medication)
}

/// Produces batches of freshly created, active requests.
pub struct RequestGenerator {
    rng: StdRng,
    clock: Arc<dyn Clock>,
}

impl RequestGenerator {
    /// Creates a generator; `seed` makes the output reproducible, `None` uses OS entropy.
    pub fn new(seed: Option<u64>, clock: Arc<dyn Clock>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, clock }
    }

    /// Generates `count` new requests, each with a fresh id.
    pub fn generate_batch(&mut self, count: usize) -> Vec<Request> {
        let now = self.clock.now();
        (0..count).map(|_| self.generate_at(now)).collect()
    }

    /// Like [`generate_batch`](Self::generate_batch), but rejects batches larger than
    /// [`MAX_BATCH_SIZE`].
    pub fn try_generate_batch(&mut self, count: usize) -> RequestResult<Vec<Request>> {
        if count > MAX_BATCH_SIZE {
            return Err(RequestError::InvalidInput(format!(
                "batch size {} exceeds maximum of {}",
                count, MAX_BATCH_SIZE
            )));
        }
        Ok(self.generate_batch(count))
    }

    /// Generates a single request.
    pub fn generate_one(&mut self) -> Request {
        let now = self.clock.now();
        self.generate_at(now)
    }

    fn generate_at(&mut self, now: DateTime<Utc>) -> Request {
        let medication_name = self.pick(&MEDICATIONS);
        let patient_name = self.pick(&PATIENT_NAMES);
        let patient_location = self.pick(&PATIENT_LOCATIONS);
        let distance = round_to_tenth(self.rng.gen_range(MIN_DISTANCE_KM..MAX_DISTANCE_KM));
        let backdate = Duration::milliseconds(self.rng.gen_range(0..MAX_BACKDATE_MS));
        let is_prescription_required = requires_prescription(medication_name);
        let id = RequestId::generate(&mut self.rng);

        let prescription = if is_prescription_required {
            Some(self.prescription_for(medication_name, now))
        } else {
            None
        };

        Request {
            id,
            medication_name: medication_name.to_owned(),
            patient_name: patient_name.to_owned(),
            patient_location: patient_location.to_owned(),
            distance,
            timestamp: now - backdate,
            is_prescription_required,
            prescription,
            response: None,
        }
    }

    fn prescription_for(&mut self, medication_name: &str, now: DateTime<Utc>) -> Prescription {
        let quantity = self
            .rng
            .gen_range(MIN_PRESCRIPTION_QUANTITY..=MAX_PRESCRIPTION_QUANTITY);
        let doctor_name = self.pick(&DOCTORS);

        Prescription {
            id: RequestId::generate(&mut self.rng),
            medications: vec![Medication {
                name: medication_name.to_owned(),
                dosage: PRESCRIPTION_DOSAGE.to_owned(),
                quantity,
                instructions: Some(PRESCRIPTION_INSTRUCTIONS.to_owned()),
            }],
            doctor_name: doctor_name.to_owned(),
            prescription_date: now,
            expiry_date: now + Duration::days(PRESCRIPTION_VALIDITY_DAYS),
            image: Some(PRESCRIPTION_IMAGE_URL.to_owned()),
        }
    }

    fn pick(&mut self, catalogue: &[&'static str]) -> &'static str {
        catalogue[self.rng.gen_range(0..catalogue.len())]
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
