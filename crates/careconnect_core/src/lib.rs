pub mod analysis;
pub mod booking;
pub mod directory;
pub mod domain;
pub mod navigation;
pub mod ports;
pub mod store;

pub use analysis::{AnalysisKind, HealthAnalysis, MoodAnalysis, MoodCheck, SymptomCheck, Urgency};
pub use directory::{Doctor, DoctorDirectory, DoctorStatus};
pub use domain::{
    Appointment, AppointmentStatus, AppointmentType, HealthRecord, Language, Notification,
    Prescription, Theme, User, UserRole,
};
pub use navigation::{NavAction, NavigationError, Navigator, Page};
pub use ports::{
    AnalysisError, AnalysisResult, HealthAnalysisService, PortError, PortResult, PreferenceStore,
};
pub use store::DomainStore;
