//! Calendar core: the event model, busy-interval merging and free-slot
//! search, plus the query and create entry points over an injected
//! calendar backend. All user-facing text is rendered in [`format`];
//! everything else traffics in typed values.

pub mod format;
pub mod models;
pub mod slots;

mod create;
mod query;
mod time;

pub use create::EventCreator;
pub use models::{CreationReceipt, Event, EventDraft, EventTime};
pub use query::CalendarQuery;
pub use slots::{BusyInterval, FreeSlot, Window};
