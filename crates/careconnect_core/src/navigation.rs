//! crates/careconnect_core/src/navigation.rs
//!
//! Page routing as a finite state machine.
//!
//! Every transition goes through [`Page::transition`], a single table keyed by
//! `(current page, action)`. The session role only decides which home page a
//! "go home" style transition resolves to. Pairs missing from the table are
//! rejected and leave the navigator where it was.

use serde::{Deserialize, Serialize};

use crate::domain::{User, UserRole};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Page {
    Welcome,
    Language,
    Login,
    PatientHome,
    DoctorHome,
    DoctorList,
    Booking,
    MyHealth,
    Appointments,
    AiCheck,
    Profile,
    EditProfile,
    VideoCall,
    ManageAvailability,
    ReferAndEarn,
}

/// Caller-driven events that move the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Advance through the onboarding pages.
    Next,
    LoggedIn(UserRole),
    LoggedOut,
    /// Direct jump from a menu, tab bar or home tile.
    Open(Page),
    DoctorSelected,
    BookingConfirmed,
    ProfileSaved,
    AvailabilitySaved,
    Back,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No transition from {from:?} on {action:?}")]
    InvalidTransition { from: Page, action: NavAction },
}

pub type NavigationResult<T> = Result<T, NavigationError>;

/// The landing page for a role. Without a session user the patient home is used.
pub fn home_for(role: Option<UserRole>) -> Page {
    match role {
        Some(UserRole::Doctor) => Page::DoctorHome,
        _ => Page::PatientHome,
    }
}

impl Page {
    /// Pages reachable only after login.
    pub fn is_authenticated(self) -> bool {
        !matches!(self, Page::Welcome | Page::Language | Page::Login)
    }

    pub fn is_home(self) -> bool {
        matches!(self, Page::PatientHome | Page::DoctorHome)
    }

    pub fn shows_navbar(self) -> bool {
        self.is_authenticated()
    }

    /// Focused flows hide the tab bar.
    pub fn shows_bottom_nav(self) -> bool {
        self.shows_navbar()
            && !matches!(
                self,
                Page::Booking | Page::EditProfile | Page::ManageAvailability | Page::ReferAndEarn
            )
    }

    pub fn shows_back(self) -> bool {
        self.shows_navbar() && !self.is_home()
    }

    /// Transition table: T(page, action, role) -> page.
    ///
    /// | From                 | Action            | To                 |
    /// |----------------------|-------------------|--------------------|
    /// | Welcome              | Next              | Language           |
    /// | Language             | Next              | Login              |
    /// | Login                | LoggedIn(role)    | home(role)         |
    /// | authenticated        | LoggedOut         | Welcome            |
    /// | authenticated        | Open(target)      | target             |
    /// | DoctorList           | DoctorSelected    | Booking            |
    /// | Booking              | BookingConfirmed  | Appointments       |
    /// | EditProfile          | ProfileSaved      | home(role)         |
    /// | ManageAvailability   | AvailabilitySaved | DoctorHome         |
    /// | Booking              | Back              | DoctorList         |
    /// | ManageAvailability   | Back              | DoctorHome         |
    /// | other non-home       | Back              | home(role)         |
    ///
    /// `Open` only targets authenticated pages other than Booking, which needs a
    /// selected doctor and is entered through `DoctorSelected`.
    pub fn transition(self, action: NavAction, role: Option<UserRole>) -> NavigationResult<Page> {
        use NavAction::*;
        use Page::*;

        let next = match (self, action) {
            (Welcome, Next) => Language,
            (Language, Next) => Login,
            (Login, LoggedIn(role)) => home_for(Some(role)),

            (from, LoggedOut) if from.is_authenticated() => Welcome,
            (from, Open(target))
                if from.is_authenticated() && target.is_authenticated() && target != Booking =>
            {
                target
            }

            (DoctorList, DoctorSelected) => Booking,
            (Booking, BookingConfirmed) => Appointments,
            (EditProfile, ProfileSaved) => home_for(role),
            (ManageAvailability, AvailabilitySaved) => DoctorHome,

            (Booking, Back) => DoctorList,
            (ManageAvailability, Back) => DoctorHome,
            (from, Back) if from.shows_back() => home_for(role),

            (from, action) => return Err(NavigationError::InvalidTransition { from, action }),
        };

        Ok(next)
    }
}

/// Holds the current page. No history is kept; each page knows its way back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: Page,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current: Page::Welcome,
        }
    }
}

impl Navigator {
    /// Starts at Welcome, or directly at the role's home when a user is already
    /// signed in.
    pub fn resume(user: Option<&User>) -> Self {
        let current = match user {
            Some(user) => home_for(Some(user.role)),
            None => Page::Welcome,
        };
        Self { current }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    /// Applies an action. On rejection the current page is unchanged.
    pub fn apply(&mut self, action: NavAction, role: Option<UserRole>) -> NavigationResult<Page> {
        let next = self.current.transition(action, role)?;
        self.current = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PAGES: [Page; 15] = [
        Page::Welcome,
        Page::Language,
        Page::Login,
        Page::PatientHome,
        Page::DoctorHome,
        Page::DoctorList,
        Page::Booking,
        Page::MyHealth,
        Page::Appointments,
        Page::AiCheck,
        Page::Profile,
        Page::EditProfile,
        Page::VideoCall,
        Page::ManageAvailability,
        Page::ReferAndEarn,
    ];

    #[test]
    fn onboarding_flow() {
        let mut nav = Navigator::default();
        assert_eq!(nav.apply(NavAction::Next, None).unwrap(), Page::Language);
        assert_eq!(nav.apply(NavAction::Next, None).unwrap(), Page::Login);
        assert_eq!(
            nav.apply(NavAction::LoggedIn(UserRole::Doctor), None).unwrap(),
            Page::DoctorHome
        );
    }

    #[test]
    fn resume_picks_home_for_signed_in_user() {
        assert_eq!(Navigator::resume(None).current(), Page::Welcome);
        let doctor = User::mock_login(UserRole::Doctor);
        assert_eq!(Navigator::resume(Some(&doctor)).current(), Page::DoctorHome);
        let patient = User::mock_login(UserRole::Patient);
        assert_eq!(Navigator::resume(Some(&patient)).current(), Page::PatientHome);
    }

    #[test]
    fn back_rules() {
        let patient = Some(UserRole::Patient);
        let doctor = Some(UserRole::Doctor);

        assert_eq!(Page::Booking.transition(NavAction::Back, doctor).unwrap(), Page::DoctorList);
        assert_eq!(Page::EditProfile.transition(NavAction::Back, doctor).unwrap(), Page::DoctorHome);
        assert_eq!(Page::EditProfile.transition(NavAction::Back, patient).unwrap(), Page::PatientHome);
        assert_eq!(
            Page::ManageAvailability.transition(NavAction::Back, patient).unwrap(),
            Page::DoctorHome
        );
        assert_eq!(Page::ReferAndEarn.transition(NavAction::Back, doctor).unwrap(), Page::DoctorHome);
        assert_eq!(Page::AiCheck.transition(NavAction::Back, patient).unwrap(), Page::PatientHome);
        assert!(Page::PatientHome.transition(NavAction::Back, patient).is_err());
        assert!(Page::Login.transition(NavAction::Back, None).is_err());
    }

    #[test]
    fn booking_flow() {
        let role = Some(UserRole::Patient);
        let mut nav = Navigator::resume(Some(&User::mock_login(UserRole::Patient)));
        nav.apply(NavAction::Open(Page::DoctorList), role).unwrap();
        nav.apply(NavAction::DoctorSelected, role).unwrap();
        assert_eq!(nav.current(), Page::Booking);
        assert_eq!(nav.apply(NavAction::BookingConfirmed, role).unwrap(), Page::Appointments);
    }

    #[test]
    fn open_cannot_skip_login_or_doctor_selection() {
        assert!(Page::Welcome.transition(NavAction::Open(Page::PatientHome), None).is_err());
        assert!(Page::PatientHome.transition(NavAction::Open(Page::Booking), None).is_err());
        assert!(Page::PatientHome.transition(NavAction::Open(Page::Login), None).is_err());
        assert_eq!(
            Page::Profile.transition(NavAction::Open(Page::EditProfile), None).unwrap(),
            Page::EditProfile
        );
    }

    #[test]
    fn logout_from_every_authenticated_page() {
        for page in ALL_PAGES {
            let result = page.transition(NavAction::LoggedOut, Some(UserRole::Patient));
            if page.is_authenticated() {
                assert_eq!(result.unwrap(), Page::Welcome);
            } else {
                assert!(result.is_err());
            }
        }
    }

    #[test]
    fn rejected_action_keeps_current_page() {
        let mut nav = Navigator::default();
        let err = nav.apply(NavAction::BookingConfirmed, None).unwrap_err();
        assert_eq!(
            err,
            NavigationError::InvalidTransition {
                from: Page::Welcome,
                action: NavAction::BookingConfirmed
            }
        );
        assert_eq!(nav.current(), Page::Welcome);
    }

    #[test]
    fn chrome_visibility() {
        assert!(!Page::Login.shows_navbar());
        assert!(Page::Appointments.shows_bottom_nav());
        assert!(!Page::Booking.shows_bottom_nav());
        assert!(!Page::DoctorHome.shows_back());
        assert!(Page::VideoCall.shows_back());
    }
}
