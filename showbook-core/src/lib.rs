//! Core types for showbook.
//!
//! This crate provides everything the CLI needs to run the demo booking site:
//! - `Event`, `Booking`, `Comment` and `User` records
//! - the status engine (`Event::status_at`)
//! - the `Store` abstraction with file and in-memory backends
//! - the `Showbook` service implementing booking, commenting and event creation

pub mod booking;
pub mod comment;
pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod notice;
pub mod seed;
pub mod showbook;
pub mod store;
pub mod user;

pub use booking::Booking;
pub use comment::Comment;
pub use error::{ShowbookError, ShowbookResult};
pub use event::{Category, Event, EventDraft, EventStatus, ListingState};
pub use notice::{Notice, Severity};
pub use showbook::{EventFilter, HistoryEntry, Showbook};
pub use store::{FileStore, MemoryStore, Store};
pub use user::User;
