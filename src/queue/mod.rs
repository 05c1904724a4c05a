mod loader;
mod record;

pub use loader::{QueueLoader, ReloadOutcome};
pub use record::QueueRecord;
