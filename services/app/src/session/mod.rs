pub mod controller;
pub mod state;

// Re-export the session types so the binary and tests can reach them directly.
pub use controller::{AppSession, THEME_KEY};
pub use state::AppState;
