mod entry;
mod mode;
mod pack;
mod preferences;
mod session;

pub use entry::{Entry, EntryError};
pub use mode::{ModeError, QuizMode};
pub use pack::{CatalogError, Pack, PackCatalog, PackError};
pub use preferences::{Preferences, PreferencesDraft};
pub use session::{SessionSummary, SessionSummaryError};
