//! Event records and the status engine.
//!
//! An `Event` stores only a coarse `ListingState` (open or cancelled). What a
//! visitor sees is the derived `EventStatus`, which also depends on ticket
//! availability and on the current time, so it is recomputed on every render.

use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{ShowbookError, ShowbookResult};

/// Maximum length of an event description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// Age restriction labels offered when creating an event.
pub const AGE_RESTRICTIONS: [&str; 2] = ["All-ages", "18+"];

/// A bookable event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub artist_names: String,
    #[serde(default)]
    pub venue: String,
    pub date: NaiveDate,
    #[serde(default, with = "hhmm")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "hhmm")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub capacity: u32,
    /// Can reach zero through bookings. Only creation and editing check it
    /// against `capacity`. A record without it reads as sold out.
    #[serde(default)]
    pub tickets_available: i64,
    #[serde(default)]
    pub status: ListingState,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub age_restriction: String,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Stored status flag. Everything else a visitor sees is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingState {
    #[default]
    Open,
    Cancelled,
}

/// Derived display status of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    Open,
    SoldOut,
    Cancelled,
    Inactive,
}

impl EventStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Open => "Open",
            EventStatus::SoldOut => "Sold Out",
            EventStatus::Cancelled => "Cancelled",
            EventStatus::Inactive => "Inactive",
        }
    }

    pub fn is_bookable(&self) -> bool {
        *self == EventStatus::Open
    }

    /// Why booking is disabled, or `None` for open events.
    pub fn unavailable_reason(&self) -> Option<&'static str> {
        match self {
            EventStatus::Open => None,
            EventStatus::Cancelled => Some("This event has been cancelled. Booking is unavailable."),
            EventStatus::SoldOut => Some("Sold out."),
            EventStatus::Inactive => Some("This event has ended or is inactive."),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Event category. Unknown categories found in the store are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Classical,
    Indie,
    Jazz,
    Electronic,
    Pop,
    Rock,
    #[serde(untagged)]
    Other(String),
}

impl Category {
    /// Categories offered when creating an event.
    pub const KNOWN: [Category; 6] = [
        Category::Classical,
        Category::Indie,
        Category::Jazz,
        Category::Electronic,
        Category::Pop,
        Category::Rock,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Classical => "Classical",
            Category::Indie => "Indie",
            Category::Jazz => "Jazz",
            Category::Electronic => "Electronic",
            Category::Pop => "Pop",
            Category::Rock => "Rock",
            Category::Other(name) => name,
        }
    }

    /// Parse a category name, case-insensitively for the known ones.
    pub fn parse(name: &str) -> Category {
        let name = name.trim();
        Self::KNOWN
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
            .unwrap_or_else(|| Category::Other(name.to_string()))
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other(String::new())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Event {
    /// Derive the display status at the given local wall-clock time.
    ///
    /// Cancellation wins over everything, then availability, then the end
    /// of the event.
    pub fn status_at(&self, now: NaiveDateTime) -> EventStatus {
        if self.status == ListingState::Cancelled {
            return EventStatus::Cancelled;
        }
        if self.tickets_available <= 0 {
            return EventStatus::SoldOut;
        }
        if self.ends_at() < now {
            return EventStatus::Inactive;
        }
        EventStatus::Open
    }

    pub fn status(&self) -> EventStatus {
        self.status_at(Local::now().naive_local())
    }

    /// End instant: date plus end time, falling back to start time, then midnight.
    pub fn ends_at(&self) -> NaiveDateTime {
        let time = self
            .end_time
            .or(self.start_time)
            .unwrap_or(NaiveTime::MIN);
        self.date.and_time(time)
    }

    /// Schedule line, e.g. `2025-09-20 19:30 – 21:30`.
    pub fn render_schedule(&self) -> String {
        let mut out = self.date.format("%Y-%m-%d").to_string();
        if let Some(start) = self.start_time {
            out.push(' ');
            out.push_str(&start.format("%H:%M").to_string());
        }
        if let Some(end) = self.end_time {
            out.push_str(" – ");
            out.push_str(&end.format("%H:%M").to_string());
        }
        out
    }

    pub fn render_capacity(&self) -> String {
        format!(
            "Capacity {} · Available {}",
            self.capacity, self.tickets_available
        )
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.created_by.as_deref() == Some(user_id)
    }

    /// Whether the search query matches title, artists or venue (case-insensitive).
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        format!("{} {} {}", self.title, self.artist_names, self.venue)
            .to_lowercase()
            .contains(&query)
    }

    pub(crate) fn new(id: String, draft: ValidDraft, created_by: Option<String>) -> Self {
        Event {
            id,
            title: draft.title,
            category: draft.category,
            artist_names: draft.artist_names,
            venue: draft.venue,
            date: draft.date,
            start_time: Some(draft.start_time),
            end_time: Some(draft.end_time),
            capacity: draft.capacity,
            tickets_available: draft.tickets_available,
            status: ListingState::Open,
            image_url: draft.image_url,
            description: draft.description,
            age_restriction: draft.age_restriction,
            created_by,
        }
    }

    /// Overwrite the editable fields with a validated draft.
    pub(crate) fn apply(&mut self, draft: ValidDraft) {
        self.title = draft.title;
        self.category = draft.category;
        self.artist_names = draft.artist_names;
        self.venue = draft.venue;
        self.date = draft.date;
        self.start_time = Some(draft.start_time);
        self.end_time = Some(draft.end_time);
        self.capacity = draft.capacity;
        self.tickets_available = draft.tickets_available;
        self.image_url = draft.image_url;
        self.description = draft.description;
        self.age_restriction = draft.age_restriction;
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Unvalidated input for creating or editing an event.
///
/// Values arrive as entered; `validate` trims and checks them in one place.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub category: String,
    pub artist_names: String,
    pub venue: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub capacity: Option<i64>,
    pub tickets_available: Option<i64>,
    pub image_url: String,
    pub description: String,
    pub age_restriction: String,
}

/// A draft that passed validation.
#[derive(Debug, Clone)]
pub(crate) struct ValidDraft {
    pub title: String,
    pub category: Category,
    pub artist_names: String,
    pub venue: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub capacity: u32,
    pub tickets_available: i64,
    pub image_url: String,
    pub description: String,
    pub age_restriction: String,
}

impl EventDraft {
    /// Prefill a draft from an existing event (used by edit).
    pub fn from_event(event: &Event) -> Self {
        EventDraft {
            title: event.title.clone(),
            category: event.category.to_string(),
            artist_names: event.artist_names.clone(),
            venue: event.venue.clone(),
            date: event.date.format("%Y-%m-%d").to_string(),
            start_time: hhmm::format(event.start_time),
            end_time: hhmm::format(event.end_time),
            capacity: Some(event.capacity.into()),
            tickets_available: Some(event.tickets_available),
            image_url: event.image_url.clone(),
            description: event.description.clone(),
            age_restriction: event.age_restriction.clone(),
        }
    }

    pub(crate) fn validate(&self) -> ShowbookResult<ValidDraft> {
        let title = self.title.trim();
        let artist_names = self.artist_names.trim();
        let venue = self.venue.trim();
        let date = self.date.trim();
        let start_time = self.start_time.trim();
        let end_time = self.end_time.trim();

        let mut missing = Vec::new();
        for (field, value) in [
            ("title", title),
            ("artist", artist_names),
            ("venue", venue),
            ("date", date),
            ("start", start_time),
            ("end", end_time),
        ] {
            if value.is_empty() {
                missing.push(field);
            }
        }
        let capacity = self.capacity.unwrap_or(0);
        if capacity < 1 {
            missing.push("capacity");
        }
        let tickets_available = self.tickets_available.unwrap_or(0);
        if tickets_available < 0 {
            missing.push("available");
        }
        if !missing.is_empty() {
            return Err(ShowbookError::MissingFields(missing));
        }

        let capacity = u32::try_from(capacity).map_err(|_| ShowbookError::InvalidField {
            field: "capacity",
            value: capacity.to_string(),
        })?;
        if tickets_available > i64::from(capacity) {
            return Err(ShowbookError::TicketsExceedCapacity {
                capacity,
                available: tickets_available,
            });
        }

        let description = self.description.trim();
        if description.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ShowbookError::DescriptionTooLong(MAX_DESCRIPTION_LEN));
        }

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            ShowbookError::InvalidField {
                field: "date",
                value: date.to_string(),
            }
        })?;

        Ok(ValidDraft {
            title: title.to_string(),
            category: Category::parse(&self.category),
            artist_names: artist_names.to_string(),
            venue: venue.to_string(),
            date,
            start_time: parse_time("start", start_time)?,
            end_time: parse_time("end", end_time)?,
            capacity,
            tickets_available,
            image_url: self.image_url.trim().to_string(),
            description: description.to_string(),
            age_restriction: self.age_restriction.trim().to_string(),
        })
    }
}

fn parse_time(field: &'static str, value: &str) -> ShowbookResult<NaiveTime> {
    hhmm::parse(value).ok_or_else(|| ShowbookError::InvalidField {
        field,
        value: value.to_string(),
    })
}

/// `HH:MM` serialization for optional times. Empty strings read as `None`.
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(value: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(value, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
            .ok()
    }

    pub fn format(time: Option<NaiveTime>) -> String {
        time.map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default()
    }

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(d)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid time '{value}'"))),
        }
    }
}
