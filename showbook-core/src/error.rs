//! Error types for showbook.

use thiserror::Error;

use crate::event::EventStatus;
use crate::notice::{Notice, Severity};

/// Errors that can occur in showbook operations.
///
/// Most variants are user-input validation failures; their `Display` text is
/// the message shown to the user.
#[derive(Error, Debug)]
pub enum ShowbookError {
    #[error("Event not found.")]
    EventNotFound(String),

    #[error("Please enter a valid quantity")]
    InvalidQuantity(String),

    #[error("Exceeds tickets available")]
    InsufficientTickets { requested: i64, available: i64 },

    #[error("{}", .0.unavailable_reason().unwrap_or("Booking is unavailable."))]
    BookingUnavailable(EventStatus),

    #[error("Comment cannot be empty")]
    EmptyComment,

    #[error("Comment is too long (max {0} characters)")]
    CommentTooLong(usize),

    #[error("Please fill in all required fields (*)")]
    MissingFields(Vec<&'static str>),

    #[error("Tickets available cannot exceed capacity")]
    TicketsExceedCapacity { capacity: u32, available: i64 },

    #[error("Description is too long (max {0} characters)")]
    DescriptionTooLong(usize),

    #[error("Invalid {field}: '{value}'")]
    InvalidField { field: &'static str, value: String },

    #[error("You are not authorized to edit this event.")]
    NotOwner(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ShowbookError {
    /// Severity used when this error is shown to the user.
    pub fn severity(&self) -> Severity {
        match self {
            ShowbookError::InvalidQuantity(_)
            | ShowbookError::EmptyComment
            | ShowbookError::MissingFields(_)
            | ShowbookError::InvalidField { .. } => Severity::Warning,
            ShowbookError::BookingUnavailable(_) | ShowbookError::EventNotFound(_) => {
                Severity::Info
            }
            _ => Severity::Danger,
        }
    }

    pub fn to_notice(&self) -> Notice {
        Notice::new(self.severity(), self.to_string())
    }
}

/// Result type alias for showbook operations.
pub type ShowbookResult<T> = Result<T, ShowbookError>;
