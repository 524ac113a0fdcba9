//! Ticket bookings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ShowbookError, ShowbookResult};
use crate::notice::Notice;

/// A ticket reservation. Created once, never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub event_id: String,
    pub tickets: u32,
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    pub fn confirmation(&self) -> Notice {
        Notice::success(format!("Booking successful! Order ID {}", self.id))
    }
}

/// Parse a ticket quantity as typed by the user.
///
/// Empty input means one ticket. Anything else must be a positive integer.
pub fn parse_quantity(input: &str) -> ShowbookResult<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(1);
    }
    match trimmed.parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ShowbookError::InvalidQuantity(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("").unwrap(), 1);
        assert_eq!(parse_quantity(" 5 ").unwrap(), 5);
        for bad in ["0", "-2", "2.5", "many", "NaN"] {
            assert!(matches!(
                parse_quantity(bad),
                Err(ShowbookError::InvalidQuantity(_))
            ));
        }
    }

    #[test]
    fn test_reads_browser_timestamps() {
        let json = r#"{"id":"ord_x","userId":"u_demo","eventId":"e1","tickets":2,"bookedAt":"2025-09-01T10:15:00.000Z"}"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.tickets, 2);
        assert_eq!(booking.user_id.as_deref(), Some("u_demo"));
    }
}
