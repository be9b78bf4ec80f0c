//! services/app/src/session/controller.rs
//!
//! The session controller: performs every user action by reading and writing the
//! domain store and driving the navigator.
//!
//! Actions whose selection is incomplete (no time slot, no signed-in user, blank
//! message) are silent no-ops, mirroring an inert UI rather than an error dialog.

use crate::session::state::AppState;
use careconnect_core::{
    analysis::{HealthAnalysis, MoodAnalysis},
    booking,
    directory::Doctor,
    domain::{Appointment, Language, Notification, Theme, User, UserRole},
    navigation::{NavAction, NavigationResult, Navigator, Page},
    ports::{AnalysisError, AnalysisResult},
    store::DomainStore,
};
use chrono::Local;
use tracing::{debug, info, warn};

/// Preference key for the light/dark flag.
pub const THEME_KEY: &str = "theme";

//=========================================================================================
// AppSession (One Per Running Client)
//=========================================================================================

/// Owns the domain store and navigator for one application session.
pub struct AppSession {
    state: AppState,
    store: DomainStore,
    nav: Navigator,
    selected_doctor: Option<Doctor>,
    language: Language,
    theme: Theme,
    drawer_open: bool,
    notifications_open: bool,
    last_health_analysis: Option<HealthAnalysis>,
    last_mood_analysis: Option<MoodAnalysis>,
}

impl AppSession {
    /// Starts a session over an existing store.
    ///
    /// The theme comes from the preference store; a missing or unreadable value falls
    /// back to light. The first page is the role's home when the store already holds
    /// a user, otherwise Welcome.
    pub async fn new(state: AppState, store: DomainStore) -> Self {
        let theme = match state.preferences.get(THEME_KEY).await {
            Ok(Some(value)) => Theme::parse(&value).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(e) => {
                warn!("Failed to load theme preference: {}", e);
                Theme::default()
            }
        };
        let nav = Navigator::resume(store.user());
        info!(page = ?nav.current(), ?theme, "Session started");

        Self {
            state,
            store,
            nav,
            selected_doctor: None,
            language: Language::default(),
            theme,
            drawer_open: false,
            notifications_open: false,
            last_health_analysis: None,
            last_mood_analysis: None,
        }
    }

    // --- Read Accessors ---

    pub fn page(&self) -> Page {
        self.nav.current()
    }

    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    pub fn user(&self) -> Option<&User> {
        self.store.user()
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn selected_doctor(&self) -> Option<&Doctor> {
        self.selected_doctor.as_ref()
    }

    pub fn is_drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn is_notifications_open(&self) -> bool {
        self.notifications_open
    }

    pub fn doctors(&self) -> &[Doctor] {
        self.state.directory.all()
    }

    pub fn last_health_analysis(&self) -> Option<&HealthAnalysis> {
        self.last_health_analysis.as_ref()
    }

    pub fn last_mood_analysis(&self) -> Option<&MoodAnalysis> {
        self.last_mood_analysis.as_ref()
    }

    fn role(&self) -> Option<UserRole> {
        self.store.user().map(|u| u.role)
    }

    fn navigate(&mut self, action: NavAction) -> NavigationResult<Page> {
        let role = self.role();
        let page = self.nav.apply(action, role)?;
        debug!(?action, ?page, "Navigated");
        Ok(page)
    }

    // --- Onboarding and Session ---

    pub fn continue_from_welcome(&mut self) -> NavigationResult<Page> {
        self.navigate(NavAction::Next)
    }

    /// Sets the language, then moves on to the login page.
    pub fn choose_language(&mut self, language: Language) -> NavigationResult<Page> {
        self.set_language(language);
        self.navigate(NavAction::Next)
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Mock login: installs the canned account for the role and opens its home.
    pub fn login(&mut self, role: UserRole) -> NavigationResult<Page> {
        let page = self.navigate(NavAction::LoggedIn(role))?;
        let user = User::mock_login(role);
        info!(user_id = %user.id, ?role, "User logged in");
        self.store.set_user(Some(user));
        Ok(page)
    }

    pub fn logout(&mut self) -> NavigationResult<Page> {
        let page = self.navigate(NavAction::LoggedOut)?;
        self.store.set_user(None);
        self.selected_doctor = None;
        self.drawer_open = false;
        info!("User logged out");
        Ok(page)
    }

    // --- Navigation ---

    pub fn open(&mut self, page: Page) -> NavigationResult<Page> {
        self.drawer_open = false;
        self.navigate(NavAction::Open(page))
    }

    pub fn go_back(&mut self) -> NavigationResult<Page> {
        self.navigate(NavAction::Back)
    }

    pub fn open_drawer(&mut self) {
        self.drawer_open = true;
    }

    pub fn close_drawer(&mut self) {
        self.drawer_open = false;
    }

    // --- Booking ---

    /// Picks a doctor from the directory and opens the booking page.
    /// An unknown id leaves everything unchanged.
    pub fn select_doctor(&mut self, doctor_id: &str) -> NavigationResult<Option<&Doctor>> {
        let Some(doctor) = self.state.directory.find(doctor_id).cloned() else {
            debug!(doctor_id, "Ignoring selection of unknown doctor");
            return Ok(None);
        };
        self.navigate(NavAction::DoctorSelected)?;
        self.selected_doctor = Some(doctor);
        Ok(self.selected_doctor.as_ref())
    }

    /// Bookable slots of the selected doctor. Empty when none is selected.
    pub fn booking_slots(&self) -> Vec<String> {
        self.selected_doctor
            .as_ref()
            .map(|doctor| self.store.doctor_availability(&doctor.id))
            .unwrap_or_default()
    }

    /// The bookable dates starting today, in local time.
    pub fn booking_dates(&self) -> Vec<String> {
        booking::upcoming_dates(Local::now().date_naive())
    }

    /// Confirms the booking. Without a time slot, a selected doctor or a signed-in
    /// user this does nothing and returns `None`.
    pub fn complete_booking(
        &mut self,
        date: &str,
        time: Option<&str>,
    ) -> NavigationResult<Option<Appointment>> {
        let (Some(time), Some(doctor), Some(user)) =
            (time, self.selected_doctor.as_ref(), self.store.user())
        else {
            debug!("Booking confirmation ignored: incomplete selection");
            return Ok(None);
        };

        let appointment = booking::teleconsultation(doctor, user, date, time);
        self.navigate(NavAction::BookingConfirmed)?;
        info!(
            appointment_id = %appointment.id,
            doctor_id = %appointment.doctor_id,
            date,
            time,
            "Appointment booked"
        );
        self.store.add_appointment(appointment.clone());
        Ok(Some(appointment))
    }

    pub fn appointments(&self) -> &[Appointment] {
        self.store.appointments()
    }

    /// Appointments booked with the signed-in doctor.
    pub fn doctor_appointments(&self) -> Vec<&Appointment> {
        let Some(user) = self.store.user() else {
            return Vec::new();
        };
        self.store
            .appointments()
            .iter()
            .filter(|a| a.doctor_id == user.id)
            .collect()
    }

    // --- Profile ---

    /// Saves the edited name and email, then returns to the role's home.
    pub fn update_profile(&mut self, name: &str, email: &str) -> NavigationResult<Option<&User>> {
        let Some(mut user) = self.store.user().cloned() else {
            return Ok(None);
        };
        self.navigate(NavAction::ProfileSaved)?;
        user.name = name.to_string();
        user.email = email.to_string();
        info!(user_id = %user.id, "Profile updated");
        self.store.set_user(Some(user));
        Ok(self.store.user())
    }

    // --- Doctor Tools ---

    /// Sends a message from the signed-in doctor to the patient inbox.
    pub fn send_message(&mut self, text: &str) -> Option<&Notification> {
        if text.trim().is_empty() {
            return None;
        }
        let from_name = self.store.user()?.name.clone();
        Some(self.store.add_notification(&from_name, text))
    }

    /// Replaces the signed-in doctor's slots and returns to the dashboard.
    pub fn save_availability(&mut self, slots: Vec<String>) -> NavigationResult<bool> {
        let Some(doctor_id) = self.store.user().map(|u| u.id.clone()) else {
            return Ok(false);
        };
        self.navigate(NavAction::AvailabilitySaved)?;
        self.store.update_doctor_availability(&doctor_id, slots);
        Ok(true)
    }

    /// Slots of the signed-in user, used to seed the availability editor.
    pub fn my_availability(&self) -> Vec<String> {
        self.store
            .user()
            .map(|u| self.store.doctor_availability(&u.id))
            .unwrap_or_default()
    }

    // --- Notifications ---

    /// Opens the notification panel; everything shown counts as read.
    pub fn open_notifications(&mut self) -> &[Notification] {
        self.notifications_open = true;
        self.store.mark_all_as_read();
        self.store.notifications()
    }

    pub fn close_notifications(&mut self) {
        self.notifications_open = false;
    }

    pub fn clear_notifications(&mut self) {
        self.store.clear_notifications();
    }

    pub fn unread_count(&self) -> usize {
        self.store.unread_count()
    }

    // --- Preferences ---

    /// Flips the theme and persists it. A failed write is logged and the new theme
    /// still applies for this session.
    pub async fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        if let Err(e) = self.state.preferences.set(THEME_KEY, self.theme.as_str()).await {
            warn!("Failed to persist theme preference: {}", e);
        }
        self.theme
    }

    // --- AI Checks ---

    /// Runs a symptom check. Blank input short-circuits without a request. The last
    /// successful result is kept; any failure clears it.
    pub async fn check_symptoms(&mut self, symptoms: &str) -> AnalysisResult<HealthAnalysis> {
        let result = if symptoms.trim().is_empty() {
            Err(AnalysisError::EmptyInput)
        } else {
            self.state.analysis.analyze_symptoms(symptoms).await
        };
        log_check_failure("symptoms", &result);
        self.last_health_analysis = result.as_ref().ok().cloned();
        result
    }

    /// Runs a mood check, with the same result handling as [`Self::check_symptoms`].
    pub async fn check_mood(&mut self, transcript: &str) -> AnalysisResult<MoodAnalysis> {
        let result = if transcript.trim().is_empty() {
            Err(AnalysisError::EmptyInput)
        } else {
            self.state.analysis.analyze_mood(transcript).await
        };
        log_check_failure("mood", &result);
        self.last_mood_analysis = result.as_ref().ok().cloned();
        result
    }
}

fn log_check_failure<T>(check: &str, result: &AnalysisResult<T>) {
    if let Err(e) = result {
        warn!(check, retryable = e.is_retryable(), "AI check returned no result: {}", e);
    }
}
