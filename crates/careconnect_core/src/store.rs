//! crates/careconnect_core/src/store.rs
//!
//! The in-memory domain store: session user, appointments, doctor availability,
//! notifications and health records.
//!
//! The store is an ordinary owned value. Whoever constructs it owns its lifecycle,
//! and mutation requires `&mut self`, so sharing it between threads means wrapping
//! the owner in a lock. Nothing here is persisted.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Appointment, HealthRecord, Notification, User};

/// Slots handed out for a doctor that has never saved an availability list.
pub const DEFAULT_SLOTS: [&str; 3] = ["09:00 AM", "10:00 AM", "11:00 AM"];

const NOTIFICATION_ID_LEN: usize = 9;

#[derive(Debug, Clone)]
pub struct DomainStore {
    user: Option<User>,
    appointments: Vec<Appointment>,
    doctor_availability: HashMap<String, Vec<String>>,
    notifications: Vec<Notification>,
    health_records: Vec<HealthRecord>,
}

impl Default for DomainStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainStore {
    /// Creates a store seeded with the demo directory's availability.
    pub fn new() -> Self {
        let seed: [(&str, &[&str]); 4] = [
            ("doc1", &["09:00 AM", "10:00 AM", "11:00 AM", "02:00 PM", "03:00 PM"]),
            ("doc2", &["10:00 AM", "11:00 AM", "12:00 PM", "04:00 PM"]),
            ("doc3", &["09:00 AM", "02:00 PM", "05:00 PM", "06:00 PM"]),
            ("doc4", &["11:00 AM", "12:00 PM", "03:00 PM"]),
        ];

        let doctor_availability = seed
            .iter()
            .map(|(doctor_id, slots)| {
                (
                    doctor_id.to_string(),
                    slots.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();

        Self {
            doctor_availability,
            ..Self::empty()
        }
    }

    /// Creates a store with no seeded availability.
    pub fn empty() -> Self {
        Self {
            user: None,
            appointments: Vec::new(),
            doctor_availability: HashMap::new(),
            notifications: Vec::new(),
            health_records: Vec::new(),
        }
    }

    // --- Session User ---

    /// Replaces the session user. Last write wins.
    pub fn set_user(&mut self, user: Option<User>) {
        debug!(user_id = ?user.as_ref().map(|u| u.id.as_str()), "Session user replaced");
        self.user = user;
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    // --- Appointments ---

    /// Appends an appointment. No conflict check against existing bookings.
    pub fn add_appointment(&mut self, appointment: Appointment) {
        debug!(
            appointment_id = %appointment.id,
            doctor_id = %appointment.doctor_id,
            "Appointment added"
        );
        self.appointments.push(appointment);
    }

    /// All appointments in insertion order. Filtering is left to the caller.
    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    // --- Doctor Availability ---

    /// Replaces a doctor's slot list wholesale.
    pub fn update_doctor_availability(&mut self, doctor_id: &str, slots: Vec<String>) {
        debug!(doctor_id, slot_count = slots.len(), "Doctor availability replaced");
        self.doctor_availability.insert(doctor_id.to_string(), slots);
    }

    /// Stored slots for the doctor, or [`DEFAULT_SLOTS`] if none were ever saved.
    pub fn doctor_availability(&self, doctor_id: &str) -> Vec<String> {
        match self.doctor_availability.get(doctor_id) {
            Some(slots) => slots.clone(),
            None => DEFAULT_SLOTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    // --- Notifications ---

    /// Creates an unread notification and puts it at the front of the list.
    pub fn add_notification(&mut self, from_name: &str, message: &str) -> &Notification {
        let notification = Notification {
            id: random_base36(NOTIFICATION_ID_LEN),
            from_name: from_name.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
            is_read: false,
        };
        debug!(notification_id = %notification.id, from_name, "Notification added");
        self.notifications.insert(0, notification);
        &self.notifications[0]
    }

    /// Notifications, newest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    pub fn mark_all_as_read(&mut self) {
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
    }

    pub fn clear_notifications(&mut self) {
        debug!(cleared = self.notifications.len(), "Notifications cleared");
        self.notifications.clear();
    }

    // --- Health Records ---

    pub fn add_health_record(&mut self, record: HealthRecord) {
        self.health_records.push(record);
    }

    pub fn health_records(&self) -> &[HealthRecord] {
        &self.health_records
    }
}

/// Random lowercase base-36 string drawn from a v4 UUID's bits.
fn random_base36(len: usize) -> String {
    const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut bits = Uuid::new_v4().as_u128();
    (0..len)
        .map(|_| {
            let digit = (bits % 36) as usize;
            bits /= 36;
            ALPHABET[digit] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AppointmentStatus, AppointmentType, HealthRecordType, UserRole};

    fn appointment(id: &str, doctor_id: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            doctor_id: doctor_id.to_string(),
            patient_id: "p1".to_string(),
            doctor_name: "Dr. Sarah Wilson".to_string(),
            patient_name: "ayush sinha".to_string(),
            date: "12/25/2024".to_string(),
            time: "10:00 AM".to_string(),
            status: AppointmentStatus::Upcoming,
            kind: AppointmentType::Teleconsultation,
        }
    }

    #[test]
    fn user_reflects_the_last_write() {
        let mut store = DomainStore::new();
        assert!(store.user().is_none());

        store.set_user(Some(User::mock_login(UserRole::Patient)));
        store.set_user(Some(User::mock_login(UserRole::Doctor)));
        assert_eq!(store.user().map(|u| u.id.as_str()), Some("doc1"));

        store.set_user(None);
        assert!(store.user().is_none());
    }

    #[test]
    fn appointments_keep_insertion_order() {
        let mut store = DomainStore::new();
        store.add_appointment(appointment("a", "doc1"));
        store.add_appointment(appointment("b", "doc2"));
        store.add_appointment(appointment("c", "doc1"));

        let ids: Vec<&str> = store.appointments().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(store.appointments().iter().filter(|a| a.id == "c").count(), 1);
    }

    #[test]
    fn availability_is_replaced_not_merged() {
        let mut store = DomainStore::new();
        assert_eq!(store.doctor_availability("doc1").len(), 5);

        let slots = vec!["01:00 PM".to_string(), "06:00 PM".to_string()];
        store.update_doctor_availability("doc1", slots.clone());
        assert_eq!(store.doctor_availability("doc1"), slots);

        store.update_doctor_availability("doc1", Vec::new());
        assert!(store.doctor_availability("doc1").is_empty());
    }

    #[test]
    fn unknown_doctor_gets_default_slots() {
        let store = DomainStore::new();
        assert_eq!(
            store.doctor_availability("doc99"),
            vec!["09:00 AM", "10:00 AM", "11:00 AM"]
        );
        assert_eq!(DomainStore::empty().doctor_availability("doc1").len(), 3);
    }

    #[test]
    fn notification_lifecycle() {
        let mut store = DomainStore::new();
        store.add_notification("Dr. X", "first");
        let before = store.unread_count();

        let created = store.add_notification("Dr. X", "hello").clone();
        assert_eq!(store.unread_count(), before + 1);
        assert_eq!(created.id.len(), 9);
        assert!(created.id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(store.notifications()[0].message, "hello");

        store.mark_all_as_read();
        assert_eq!(store.unread_count(), 0);
        assert_eq!(store.notifications().len(), 2);

        store.clear_notifications();
        assert!(store.notifications().is_empty());
    }

    #[test]
    fn health_records_are_appended() {
        let mut store = DomainStore::new();
        store.add_health_record(HealthRecord {
            id: "hr1".to_string(),
            patient_id: "p1".to_string(),
            kind: HealthRecordType::Weight,
            value: 72.5,
            unit: "kg".to_string(),
            date: "12/25/2024".to_string(),
        });
        assert_eq!(store.health_records().len(), 1);
        assert_eq!(store.health_records()[0].kind, HealthRecordType::Weight);
    }
}
