//! crates/careconnect_core/src/booking.rs
//!
//! Helpers for turning a booking selection into an appointment.

use chrono::{Datelike, Days, NaiveDate};
use uuid::Uuid;

use crate::directory::Doctor;
use crate::domain::{Appointment, AppointmentStatus, AppointmentType, User};

/// How many days ahead, today included, a patient can book.
pub const BOOKING_WINDOW_DAYS: u64 = 7;

/// Random v4 ids, so two bookings in the same instant never collide.
pub fn new_appointment_id() -> String {
    format!("app_{}", Uuid::new_v4().simple())
}

/// Formats a date as `M/D/YYYY`, the label stored on appointments.
pub fn format_booking_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// The bookable dates starting at `today`.
pub fn upcoming_dates(today: NaiveDate) -> Vec<String> {
    (0..BOOKING_WINDOW_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .map(format_booking_date)
        .collect()
}

/// Builds the upcoming teleconsultation produced by confirming a booking.
pub fn teleconsultation(doctor: &Doctor, patient: &User, date: &str, time: &str) -> Appointment {
    Appointment {
        id: new_appointment_id(),
        doctor_id: doctor.id.clone(),
        patient_id: patient.id.clone(),
        doctor_name: doctor.name.clone(),
        patient_name: patient.name.clone(),
        date: date.to_string(),
        time: time.to_string(),
        status: AppointmentStatus::Upcoming,
        kind: AppointmentType::Teleconsultation,
    }
}
