pub mod entry;
pub mod image;
pub mod list_update;
pub mod tag;

pub use entry::{JournalEntry, NewJournalEntry};
pub use image::{JournalImage, NewJournalImage};
pub use list_update::ListUpdate;
pub use tag::{EntryTag, Tag};
