pub mod file_watcher;
pub mod scheduler;
pub mod session;

pub use file_watcher::FileWatcher;
pub use scheduler::{debounced, PendingRequest, RegenerationQueue, DEFAULT_DEBOUNCE};
pub use session::{HalftoneSession, JobChange};
