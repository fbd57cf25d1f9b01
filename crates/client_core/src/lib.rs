//! Photo gallery client core: the remote photo source, the search and
//! pagination state machine, and persisted UI preferences.

pub mod http_source;
pub mod orchestrator;
pub mod preferences;
pub mod source;

pub use http_source::{HttpPhotoSource, HttpPhotoSourceConfig};
pub use orchestrator::{
    OrchestratorPhase, SearchEvent, SearchOrchestrator, SearchState, DEFAULT_PAGE_SIZE,
};
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use source::{MissingPhotoSource, PhotoSource};
