//! Request and prescription data model.
//!
//! These are plain records. Validity (unique ids, prescription present exactly when required,
//! response set at most once) is enforced by the generator and the store that create and move
//! them, not by the types themselves.
//!
//! The serialised shape uses camelCase field names and omits absent optionals, so a request
//! renders as the feed consumers expect:
//!
//! ```json
//! { "id": "…", "medicationName": "Amoxicilline", "isPrescriptionRequired": true, … }
//! ```

use chrono::{DateTime, Utc};
use pharmalert_types::Response;
use pharmalert_uuid::RequestId;
use serde::{Deserialize, Serialize};

/// One line of a prescription.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    /// Number of units prescribed; always greater than zero.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// A doctor's prescription attached to a request for a controlled medication.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: RequestId,
    /// Never empty.
    pub medications: Vec<Medication>,
    pub doctor_name: String,
    pub prescription_date: DateTime<Utc>,
    /// Strictly after `prescription_date`.
    pub expiry_date: DateTime<Utc>,
    /// Reference to a scan of the paper prescription.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Prescription {
    /// Returns true once `now` has reached the expiry date.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiry_date
    }
}

/// A medication-availability request sent to the pharmacy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub id: RequestId,
    pub medication_name: String,
    pub patient_name: String,
    pub patient_location: String,
    /// Distance from the pharmacy in kilometres.
    pub distance: f64,
    /// When the request was created.
    pub timestamp: DateTime<Utc>,
    pub is_prescription_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescription: Option<Prescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Response>,
}

impl Request {
    /// A request is processed once the pharmacy has answered it.
    pub fn is_processed(&self) -> bool {
        self.response.is_some()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use chrono::Duration;

    #[test]
    fn is_processed_follows_response() {
        let now = utc(2026, 10, 16, 9, 0, 0);
        assert!(!request_at(now).is_processed());
        assert!(answered_at(now, Response::Available).is_processed());
    }

    #[test]
    fn prescription_expiry() {
        let issued = utc(2026, 10, 1, 12, 0, 0);
        let prescription = Prescription {
            id: RequestId::new(),
            medications: vec![Medication {
                name: "Amoxicilline".into(),
                dosage: "500mg".into(),
                quantity: 12,
                instructions: None,
            }],
            doctor_name: "Dr. Ba".into(),
            prescription_date: issued,
            expiry_date: issued + Duration::days(30),
            image: None,
        };

        assert!(!prescription.is_expired_at(issued + Duration::days(29)));
        assert!(prescription.is_expired_at(issued + Duration::days(30)));
    }

    #[test]
    fn serialises_with_camel_case_and_omits_absent_fields() {
        let request = request_at(utc(2026, 10, 16, 9, 0, 0));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["medicationName"], "Doliprane");
        assert_eq!(value["isPrescriptionRequired"], false);
        assert!(value.get("prescription").is_none());
        assert!(value.get("response").is_none());
    }

    #[test]
    fn deserialises_answered_request() {
        let json = r#"{
            "id": "550e8400e29b41d4a716446655440000",
            "medicationName": "Aspirine",
            "patientName": "Fatou Ndiaye",
            "patientLocation": "Mermoz, Dakar",
            "distance": 3.4,
            "timestamp": "2026-10-16T08:30:00Z",
            "isPrescriptionRequired": false,
            "response": "unavailable"
        }"#;

        let request: Request = serde_json::from_str(json).unwrap();
        assert_eq!(request.response, Some(Response::Unavailable));
        assert!(request.prescription.is_none());
        assert_eq!(request.id.to_string(), "550e8400e29b41d4a716446655440000");
    }
}
