//! crates/careconnect_core/src/domain.rs
//!
//! Defines the core data structures for the booking demo.
//! These structs carry the camelCase wire shape used by the client so they can be
//! handed to any presentation layer as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Avatar used for every mock login and for profile edits.
pub const DEFAULT_AVATAR: &str = "https://cdn-icons-png.flaticon.com/512/3135/3135715.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Patient,
    Doctor,
}

/// The single authenticated actor of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar: String,
}

impl User {
    /// Builds the canned account for a role. There is no credential check.
    pub fn mock_login(role: UserRole) -> Self {
        match role {
            UserRole::Patient => Self {
                id: "p1".to_string(),
                name: "ayush sinha".to_string(),
                email: "patient@demo.com".to_string(),
                role,
                avatar: DEFAULT_AVATAR.to_string(),
            },
            UserRole::Doctor => Self {
                id: "doc1".to_string(),
                name: "Dr. Sarah Wilson".to_string(),
                email: "sarah@careconnect.com".to_string(),
                role,
                avatar: DEFAULT_AVATAR.to_string(),
            },
        }
    }

    pub fn is_doctor(&self) -> bool {
        self.role == UserRole::Doctor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Upcoming,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentType {
    Teleconsultation,
    InClinic,
}

/// A booked consultation. Names are denormalized so listings need no lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub doctor_id: String,
    pub patient_id: String,
    pub doctor_name: String,
    pub patient_name: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    #[serde(rename = "type")]
    pub kind: AppointmentType,
}

/// A message delivered to the patient-facing inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub from_name: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthRecordType {
    Weight,
    Diabetes,
    Bp,
    Temp,
}

/// A single vital reading for a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub id: String,
    pub patient_id: String,
    #[serde(rename = "type")]
    pub kind: HealthRecordType,
    pub value: f64,
    pub unit: String,
    pub date: String,
}

// Declared for the client contract; nothing issues prescriptions yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub id: String,
    pub appointment_id: String,
    pub patient_id: String,
    pub doctor_id: String,
    pub doctor_name: String,
    pub medicines: Vec<String>,
    pub instructions: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a stored preference value. Anything unrecognised yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_login_uses_role_specific_accounts() {
        let patient = User::mock_login(UserRole::Patient);
        assert_eq!(patient.id, "p1");
        assert_eq!(patient.email, "patient@demo.com");
        assert!(!patient.is_doctor());

        let doctor = User::mock_login(UserRole::Doctor);
        assert_eq!(doctor.id, "doc1");
        assert_eq!(doctor.name, "Dr. Sarah Wilson");
        assert!(doctor.is_doctor());
    }

    #[test]
    fn appointment_serializes_with_client_casing() {
        let appointment = Appointment {
            id: "app_1".to_string(),
            doctor_id: "doc1".to_string(),
            patient_id: "p1".to_string(),
            doctor_name: "Dr. Sarah Wilson".to_string(),
            patient_name: "ayush sinha".to_string(),
            date: "12/25/2024".to_string(),
            time: "10:00 AM".to_string(),
            status: AppointmentStatus::Upcoming,
            kind: AppointmentType::Teleconsultation,
        };

        let json = serde_json::to_value(&appointment).unwrap();
        assert_eq!(json["doctorId"], "doc1");
        assert_eq!(json["status"], "UPCOMING");
        assert_eq!(json["type"], "TELECONSULTATION");
    }

    #[test]
    fn theme_toggles_and_parses() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse(Theme::Light.as_str()), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
    }
}
