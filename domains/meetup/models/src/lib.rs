pub mod events;
pub mod groups;
pub mod lenient;
pub mod page;
pub mod venues;

pub use events::{Event, EventStatus};
pub use groups::{Group, JoinMode};
pub use page::{Page, PageMeta};
pub use venues::Venue;
