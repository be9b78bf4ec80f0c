pub mod health_llm;
pub mod preferences;

pub use health_llm::OpenAiHealthAdapter;
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore};
