//! services/app/src/bin/careconnect.rs
//!
//! Runs a scripted walk-through of the booking demo: a patient books a doctor, the
//! doctor messages the patient and edits availability, and the patient runs an AI
//! symptom check.

use app_lib::{
    config::Config,
    error::AppError,
    session::{AppSession, AppState},
};
use careconnect_core::{
    domain::{Language, UserRole},
    navigation::Page,
    store::DomainStore,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting session...");

    // --- 2. Build the Shared AppState and a Fresh Session ---
    let state = AppState::from_config(&config);
    let mut session = AppSession::new(state, DomainStore::new()).await;

    // --- 3. Patient Books an Appointment ---
    session.continue_from_welcome()?;
    session.choose_language(Language::En)?;
    session.login(UserRole::Patient)?;
    session.open(Page::DoctorList)?;
    session.select_doctor("doc1")?;

    let dates = session.booking_dates();
    let slots = session.booking_slots();
    let date = dates.first().cloned().unwrap_or_default();
    match session.complete_booking(&date, slots.first().map(String::as_str))? {
        Some(appointment) => info!(
            "Booked {} with {} on {} at {}",
            appointment.id, appointment.doctor_name, appointment.date, appointment.time
        ),
        None => warn!("No slot available; booking skipped"),
    }
    session.logout()?;

    // --- 4. Doctor Messages the Patient and Edits Availability ---
    session.continue_from_welcome()?;
    session.choose_language(Language::En)?;
    session.login(UserRole::Doctor)?;
    info!(
        "Dashboard shows {} appointment(s)",
        session.doctor_appointments().len()
    );
    session.send_message("Please bring your previous reports to the consultation.");
    session.open(Page::ManageAvailability)?;
    let mut slots = session.my_availability();
    slots.push("06:00 PM".to_string());
    session.save_availability(slots)?;
    info!("Availability now {:?}", session.my_availability());
    session.logout()?;

    // --- 5. Patient Reads Notifications and Runs an AI Check ---
    session.continue_from_welcome()?;
    session.choose_language(Language::En)?;
    session.login(UserRole::Patient)?;
    info!("{} unread notification(s)", session.unread_count());
    for notification in session.open_notifications() {
        info!("From {}: {}", notification.from_name, notification.message);
    }
    session.close_notifications();

    session.open(Page::AiCheck)?;
    match session.check_symptoms("fever and headache").await {
        Ok(analysis) => {
            info!("Possible causes: {}", analysis.possible_causes.join(", "));
            info!("Urgency: {} ({:?})", analysis.urgency, analysis.urgency_level());
            info!("Recommendation: {}", analysis.recommendation);
            info!("{}", analysis.disclaimer);
        }
        Err(e) => warn!("Symptom check unavailable: {}", e),
    }

    let theme = session.toggle_theme().await;
    info!("Theme switched to {}", theme.as_str());

    Ok(())
}
