//! crates/careconnect_core/src/directory.rs
//!
//! The read-only doctor directory and speciality catalogue shown to patients.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DoctorStatus {
    Available,
    Busy,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

/// A bookable doctor as listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub speciality: String,
    /// Years in practice.
    pub experience: u32,
    pub rating: f32,
    pub fee: u32,
    pub avatar: String,
    /// Coarse day periods ("Morning", "Afternoon", ...), not bookable slots.
    pub availability: Vec<String>,
    pub gender: Gender,
    pub status: DoctorStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Speciality {
    pub id: &'static str,
    /// Translation key for the display label.
    pub key: &'static str,
}

pub const SPECIALITIES: [Speciality; 12] = [
    Speciality { id: "1", key: "gen" },
    Speciality { id: "2", key: "psych" },
    Speciality { id: "3", key: "gyn" },
    Speciality { id: "4", key: "gastro" },
    Speciality { id: "5", key: "pedia" },
    Speciality { id: "6", key: "endo" },
    Speciality { id: "7", key: "derm" },
    Speciality { id: "8", key: "uro" },
    Speciality { id: "9", key: "neuro" },
    Speciality { id: "10", key: "ortho" },
    Speciality { id: "11", key: "oph" },
    Speciality { id: "12", key: "dentist" },
];

#[derive(Debug, Clone)]
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    /// The four demo doctors.
    pub fn demo() -> Self {
        let doctor = |id: &str,
                      name: &str,
                      speciality: &str,
                      experience: u32,
                      rating: f32,
                      fee: u32,
                      avatar: &str,
                      availability: &[&str],
                      gender: Gender,
                      status: DoctorStatus| Doctor {
            id: id.to_string(),
            name: name.to_string(),
            speciality: speciality.to_string(),
            experience,
            rating,
            fee,
            avatar: avatar.to_string(),
            availability: availability.iter().map(|p| p.to_string()).collect(),
            gender,
            status,
        };

        Self::new(vec![
            doctor(
                "doc1",
                "Dr. Sarah Wilson",
                "General Physician",
                8,
                4.8,
                500,
                "https://images.unsplash.com/photo-1594824476967-48c8b964273f?auto=format&fit=crop&q=80&w=200&h=200",
                &["Morning", "Afternoon"],
                Gender::Female,
                DoctorStatus::Available,
            ),
            doctor(
                "doc2",
                "Dr. James Miller",
                "Cardiologist",
                12,
                4.9,
                800,
                "https://images.unsplash.com/photo-1612349317150-e413f6a5b16d?auto=format&fit=crop&q=80&w=200&h=200",
                &["Afternoon"],
                Gender::Male,
                DoctorStatus::Busy,
            ),
            doctor(
                "doc3",
                "Dr. Emily Chen",
                "Psychologist",
                6,
                4.7,
                600,
                "https://images.unsplash.com/photo-1559839734-2b71ea197ec2?auto=format&fit=crop&q=80&w=200&h=200",
                &["Morning", "Evening"],
                Gender::Female,
                DoctorStatus::Available,
            ),
            doctor(
                "doc4",
                "Dr. Michael Roberts",
                "Pediatrician",
                15,
                5.0,
                900,
                "https://images.unsplash.com/photo-1537368910025-700350fe46c7?auto=format&fit=crop&q=80&w=200&h=200",
                &["Morning"],
                Gender::Male,
                DoctorStatus::Offline,
            ),
        ])
    }

    pub fn all(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn find(&self, doctor_id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == doctor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_directory_lists_four_doctors() {
        let directory = DoctorDirectory::demo();
        assert_eq!(directory.all().len(), 4);

        let doc2 = directory.find("doc2").unwrap();
        assert_eq!(doc2.name, "Dr. James Miller");
        assert_eq!(doc2.status, DoctorStatus::Busy);
        assert!(directory.find("doc9").is_none());
    }

    #[test]
    fn speciality_ids_are_unique() {
        let mut ids: Vec<&str> = SPECIALITIES.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SPECIALITIES.len());
    }
}
