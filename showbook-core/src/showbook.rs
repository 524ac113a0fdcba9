//! The showbook service: every read and action the pages need, over one store.
//!
//! Actions that modify data take the store lock for their whole
//! read-modify-write, so two processes booking the same event cannot both
//! spend the same tickets.

use chrono::{DateTime, Local, NaiveDate, Utc};

use crate::booking::Booking;
use crate::comment::{ANONYMOUS, Comment, MAX_COMMENT_LEN};
use crate::error::{ShowbookError, ShowbookResult};
use crate::event::{Event, EventDraft, ListingState};
use crate::ids;
use crate::seed;
use crate::store::{BOOKINGS_KEY, COMMENTS_KEY, EVENTS_KEY, Store, USER_KEY};
use crate::user::User;

/// Category value that matches every event.
pub const ALL_CATEGORIES: &str = "All";

/// Title shown for bookings whose event no longer exists.
pub const DELETED_EVENT_TITLE: &str = "(Deleted event)";

/// Listing filters
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// `None` or `"All"` matches every category
    pub category: Option<String>,
    /// Case-insensitive match against title, artists and venue
    pub query: Option<String>,
    /// Keep only events dated today or later, soonest first
    pub upcoming_only: bool,
}

impl EventFilter {
    fn matches(&self, event: &Event, today: NaiveDate) -> bool {
        let category_ok = match self.category.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => true,
            Some(c) => event.category.as_str().eq_ignore_ascii_case(c),
        };
        let query_ok = self
            .query
            .as_deref()
            .is_none_or(|q| event.matches_query(q));
        let date_ok = !self.upcoming_only || event.date >= today;

        category_ok && query_ok && date_ok
    }
}

/// A booking joined with its event, if the event still exists.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub booking: Booking,
    pub event: Option<Event>,
}

impl HistoryEntry {
    pub fn title(&self) -> &str {
        self.event
            .as_ref()
            .map(|e| e.title.as_str())
            .unwrap_or(DELETED_EVENT_TITLE)
    }
}

pub struct Showbook<S: Store> {
    store: S,
}

impl<S: Store> Showbook<S> {
    pub fn new(store: S) -> Self {
        Showbook { store }
    }

    /// Wrap a store and make sure the demo user and demo events exist.
    pub fn open(store: S) -> ShowbookResult<Self> {
        let showbook = Self::new(store);
        showbook.init_demo_user()?;
        showbook.seed_if_empty(Local::now().date_naive())?;
        Ok(showbook)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // USER:

    /// Persist the demo user unless a user is already stored.
    pub fn init_demo_user(&self) -> ShowbookResult<User> {
        if let Some(user) = self.current_user() {
            return Ok(user);
        }

        let _lock = self.store.lock()?;
        if let Some(user) = self.current_user() {
            return Ok(user);
        }

        let user = User::demo();
        self.store.set(USER_KEY, &user)?;
        Ok(user)
    }

    pub fn current_user(&self) -> Option<User> {
        self.store.get(USER_KEY, None)
    }

    fn current_user_id(&self) -> Option<String> {
        self.current_user().map(|u| u.id)
    }

    // SEEDING:

    /// Populate demo events when the event collection is absent, empty or
    /// not a JSON array. Returns true if anything was written.
    pub fn seed_if_empty(&self, today: NaiveDate) -> ShowbookResult<bool> {
        let _lock = self.store.lock()?;

        if self.store.has_records(EVENTS_KEY) {
            return Ok(false);
        }

        let owner = self
            .current_user_id()
            .unwrap_or_else(|| User::demo().id);
        let events = seed::demo_events(today, &owner);

        self.store.set(EVENTS_KEY, &events)?;
        self.store.set(BOOKINGS_KEY, &Vec::<Booking>::new())?;
        self.store.set(COMMENTS_KEY, &Vec::<Comment>::new())?;

        tracing::info!(count = events.len(), "seeded demo events");
        Ok(true)
    }

    // READS:

    pub fn events(&self) -> Vec<Event> {
        self.store.get_each(EVENTS_KEY)
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.store.get_each(BOOKINGS_KEY)
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.store.get_each(COMMENTS_KEY)
    }

    pub fn event(&self, id: &str) -> ShowbookResult<Event> {
        self.events()
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| ShowbookError::EventNotFound(id.to_string()))
    }

    /// Events matching the filter. Store order is kept unless
    /// `upcoming_only` is set, which sorts soonest first.
    pub fn list_events(&self, filter: &EventFilter, today: NaiveDate) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .events()
            .into_iter()
            .filter(|e| filter.matches(e, today))
            .collect();

        if filter.upcoming_only {
            events.sort_by_key(|e| (e.date, e.start_time));
        }
        events
    }

    /// `All` followed by each category present in the data, in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for event in self.events() {
            let name = event.category.to_string();
            if !name.is_empty() && !categories.contains(&name) {
                categories.push(name);
            }
        }
        categories
    }

    /// Comments on an event, newest first.
    pub fn comments_for(&self, event_id: &str) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments()
            .into_iter()
            .filter(|c| c.event_id == event_id)
            .collect();
        comments.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        comments
    }

    /// The current user's bookings, newest first, joined with their events.
    pub fn history(&self) -> Vec<HistoryEntry> {
        let user_id = self.current_user_id();
        let events = self.events();

        let mut bookings: Vec<Booking> = self
            .bookings()
            .into_iter()
            .filter(|b| b.user_id == user_id)
            .collect();
        bookings.sort_by(|a, b| b.booked_at.cmp(&a.booked_at));

        bookings
            .into_iter()
            .map(|booking| {
                let event = events.iter().find(|e| e.id == booking.event_id).cloned();
                HistoryEntry { booking, event }
            })
            .collect()
    }

    /// Events created by the current user, latest date first.
    pub fn my_events(&self) -> Vec<Event> {
        let Some(user_id) = self.current_user_id() else {
            return Vec::new();
        };
        let mut events: Vec<Event> = self
            .events()
            .into_iter()
            .filter(|e| e.is_owned_by(&user_id))
            .collect();
        events.sort_by(|a, b| b.date.cmp(&a.date));
        events
    }

    // ACTIONS:

    /// Book `quantity` tickets for the current user.
    pub fn book(&self, event_id: &str, quantity: i64) -> ShowbookResult<Booking> {
        self.book_at(event_id, quantity, Local::now())
    }

    fn book_at(
        &self,
        event_id: &str,
        quantity: i64,
        now: DateTime<Local>,
    ) -> ShowbookResult<Booking> {
        let _lock = self.store.lock()?;

        let mut events = self.events();
        let event = events
            .iter_mut()
            .find(|e| e.id == event_id)
            .ok_or_else(|| ShowbookError::EventNotFound(event_id.to_string()))?;

        if quantity <= 0 {
            return Err(ShowbookError::InvalidQuantity(quantity.to_string()));
        }

        let status = event.status_at(now.naive_local());
        if !status.is_bookable() {
            return Err(ShowbookError::BookingUnavailable(status));
        }

        if quantity > event.tickets_available {
            return Err(ShowbookError::InsufficientTickets {
                requested: quantity,
                available: event.tickets_available,
            });
        }
        let tickets = u32::try_from(quantity)
            .map_err(|_| ShowbookError::InvalidQuantity(quantity.to_string()))?;

        let booking = Booking {
            id: ids::generate(ids::ORDER_PREFIX),
            user_id: self.current_user_id(),
            event_id: event.id.clone(),
            tickets,
            booked_at: now.with_timezone(&Utc),
        };

        // The decrement is saved first; a failed booking write must not oversell.
        event.tickets_available -= quantity;
        let remaining = event.tickets_available;
        self.store.set(EVENTS_KEY, &events)?;

        let mut bookings = self.bookings();
        bookings.push(booking.clone());
        if let Err(e) = self.store.set(BOOKINGS_KEY, &bookings) {
            tracing::error!(
                event = %event_id,
                order = %booking.id,
                tickets,
                error = %e,
                "tickets were taken but the booking could not be saved"
            );
            return Err(e);
        }

        tracing::info!(
            event = %event_id,
            order = %booking.id,
            tickets,
            remaining,
            "booked tickets"
        );
        Ok(booking)
    }

    /// Post a comment on an event. A blank author is shown as `Anonymous`.
    pub fn comment(
        &self,
        event_id: &str,
        author: Option<&str>,
        text: &str,
    ) -> ShowbookResult<Comment> {
        let content = text.trim();
        if content.is_empty() {
            return Err(ShowbookError::EmptyComment);
        }
        if content.chars().count() > MAX_COMMENT_LEN {
            return Err(ShowbookError::CommentTooLong(MAX_COMMENT_LEN));
        }

        let _lock = self.store.lock()?;
        let event = self.event(event_id)?;

        let author_name = author
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(ANONYMOUS);

        let comment = Comment {
            id: ids::generate(ids::COMMENT_PREFIX),
            event_id: event.id,
            user_id: self.current_user_id(),
            author_name: author_name.to_string(),
            content: content.to_string(),
            posted_at: Utc::now(),
        };

        let mut comments = self.comments();
        comments.push(comment.clone());
        self.store.set(COMMENTS_KEY, &comments)?;

        tracing::info!(event = %comment.event_id, comment = %comment.id, "posted comment");
        Ok(comment)
    }

    /// Publish a new open event owned by the current user.
    pub fn create_event(&self, draft: &EventDraft) -> ShowbookResult<Event> {
        let valid = draft.validate()?;

        let _lock = self.store.lock()?;

        let event = Event::new(
            ids::generate(ids::EVENT_PREFIX),
            valid,
            self.current_user_id(),
        );

        let mut events = self.events();
        events.push(event.clone());
        self.store.set(EVENTS_KEY, &events)?;

        tracing::info!(event = %event.id, title = %event.title, "created event");
        Ok(event)
    }

    /// Replace an owned event's details. The stored status flag is kept.
    pub fn update_event(&self, event_id: &str, draft: &EventDraft) -> ShowbookResult<Event> {
        let _lock = self.store.lock()?;
        let user_id = self.current_user_id();

        let mut events = self.events();
        let event = find_owned(&mut events, event_id, user_id.as_deref())?;
        event.apply(draft.validate()?);
        let updated = event.clone();

        self.store.set(EVENTS_KEY, &events)?;
        tracing::info!(event = %updated.id, "updated event");
        Ok(updated)
    }

    /// Flag an owned event as cancelled. Existing bookings are left alone.
    pub fn cancel_event(&self, event_id: &str) -> ShowbookResult<Event> {
        self.set_listing_state(event_id, ListingState::Cancelled)
    }

    pub fn reactivate_event(&self, event_id: &str) -> ShowbookResult<Event> {
        self.set_listing_state(event_id, ListingState::Open)
    }

    fn set_listing_state(&self, event_id: &str, state: ListingState) -> ShowbookResult<Event> {
        let _lock = self.store.lock()?;
        let user_id = self.current_user_id();

        let mut events = self.events();
        let event = find_owned(&mut events, event_id, user_id.as_deref())?;
        event.status = state;
        let updated = event.clone();

        self.store.set(EVENTS_KEY, &events)?;
        tracing::info!(event = %updated.id, state = ?state, "changed listing state");
        Ok(updated)
    }
}

fn find_owned<'a>(
    events: &'a mut [Event],
    event_id: &str,
    user_id: Option<&str>,
) -> ShowbookResult<&'a mut Event> {
    let event = events
        .iter_mut()
        .find(|e| e.id == event_id)
        .ok_or_else(|| ShowbookError::EventNotFound(event_id.to_string()))?;

    match user_id {
        Some(user_id) if event.is_owned_by(user_id) => Ok(event),
        _ => Err(ShowbookError::NotOwner(event_id.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::event;
    use crate::event::{EventStatus, MAX_DESCRIPTION_LEN};
    use crate::store::{FileStore, MemoryStore};
    use chrono::TimeZone;

    fn showbook_with(events: Vec<Event>) -> Showbook<MemoryStore> {
        let showbook = Showbook::new(MemoryStore::new());
        showbook.init_demo_user().unwrap();
        showbook.store().set(EVENTS_KEY, &events).unwrap();
        showbook
    }

    fn future_event(id: &str, available: i64) -> Event {
        let mut ev = event("2099-06-01", Some("22:00"), available);
        ev.id = id.to_string();
        ev.capacity = 120;
        ev
    }

    fn draft() -> EventDraft {
        EventDraft {
            title: "Folk Evening".to_string(),
            category: "Indie".to_string(),
            artist_names: "Sam".to_string(),
            venue: "Room 7".to_string(),
            date: "2099-12-01".to_string(),
            start_time: "19:00".to_string(),
            end_time: "21:00".to_string(),
            capacity: Some(50),
            tickets_available: Some(40),
            ..Default::default()
        }
    }

    #[test]
    fn test_booking_decrements_availability() {
        let showbook = showbook_with(vec![future_event("e1", 45)]);

        let booking = showbook.book("e1", 5).unwrap();

        assert_eq!(booking.tickets, 5);
        assert_eq!(booking.event_id, "e1");
        assert_eq!(booking.user_id.as_deref(), Some("u_demo"));
        assert_eq!(showbook.event("e1").unwrap().tickets_available, 40);
        assert_eq!(showbook.bookings(), vec![booking.clone()]);
        assert!(booking.confirmation().message.ends_with(&booking.id));
    }

    #[test]
    fn test_booking_more_than_available_is_rejected() {
        let showbook = showbook_with(vec![future_event("e1", 3)]);

        let err = showbook.book("e1", 4).unwrap_err();

        assert!(matches!(
            err,
            ShowbookError::InsufficientTickets { requested: 4, available: 3 }
        ));
        assert_eq!(err.to_string(), "Exceeds tickets available");
        assert_eq!(showbook.event("e1").unwrap().tickets_available, 3);
        assert!(showbook.bookings().is_empty());
    }

    #[test]
    fn test_booking_invalid_quantity_is_rejected() {
        let showbook = showbook_with(vec![future_event("e1", 3)]);

        for quantity in [0, -1] {
            let err = showbook.book("e1", quantity).unwrap_err();
            assert_eq!(err.to_string(), "Please enter a valid quantity");
        }
        assert_eq!(showbook.event("e1").unwrap().tickets_available, 3);
        assert!(showbook.bookings().is_empty());
    }

    #[test]
    fn test_booking_all_tickets_sells_out() {
        let showbook = showbook_with(vec![future_event("e1", 2)]);

        showbook.book("e1", 2).unwrap();
        assert_eq!(showbook.event("e1").unwrap().status(), EventStatus::SoldOut);

        let err = showbook.book("e1", 1).unwrap_err();
        assert!(matches!(err, ShowbookError::BookingUnavailable(EventStatus::SoldOut)));
        assert_eq!(showbook.bookings().len(), 1);
    }

    #[test]
    fn test_booking_closed_events_is_rejected() {
        let mut cancelled = future_event("e1", 10);
        cancelled.status = ListingState::Cancelled;
        let mut past = future_event("e2", 10);
        past.date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let showbook = showbook_with(vec![cancelled, past]);

        let err = showbook.book("e1", 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "This event has been cancelled. Booking is unavailable."
        );
        let err = showbook.book("e2", 1).unwrap_err();
        assert!(matches!(err, ShowbookError::BookingUnavailable(EventStatus::Inactive)));
        assert!(showbook.bookings().is_empty());
    }

    #[test]
    fn test_booking_unknown_event() {
        let showbook = showbook_with(vec![]);
        assert!(matches!(
            showbook.book("nope", 1),
            Err(ShowbookError::EventNotFound(_))
        ));
    }

    #[test]
    fn test_booking_timestamp_uses_clock() {
        let showbook = showbook_with(vec![future_event("e1", 10)]);
        let now = Local.with_ymd_and_hms(2030, 5, 1, 18, 0, 0).unwrap();

        let booking = showbook.book_at("e1", 1, now).unwrap();
        assert_eq!(booking.booked_at, now.with_timezone(&Utc));
    }

    #[test]
    fn test_empty_comment_is_rejected() {
        let showbook = showbook_with(vec![future_event("e1", 10)]);

        let err = showbook.comment("e1", Some("Ann"), "   \n").unwrap_err();
        assert!(matches!(err, ShowbookError::EmptyComment));
        assert_eq!(err.to_notice().severity, crate::notice::Severity::Warning);
        assert!(showbook.comments().is_empty());
    }

    #[test]
    fn test_comments_are_newest_first_and_anonymous_by_default() {
        let showbook = showbook_with(vec![future_event("e1", 10), future_event("e2", 10)]);

        let first = showbook.comment("e1", None, "first").unwrap();
        let second = showbook.comment("e1", Some("  "), " second ").unwrap();
        showbook.comment("e2", Some("Bob"), "elsewhere").unwrap();

        // Force distinct timestamps regardless of clock resolution
        let mut comments = showbook.comments();
        comments[0].posted_at = first.posted_at - chrono::Duration::minutes(1);
        showbook.store().set(COMMENTS_KEY, &comments).unwrap();

        let listed = showbook.comments_for("e1");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[0].content, "second");
        assert_eq!(listed[0].author(), "Anonymous");
        assert_eq!(listed[1].id, first.id);
    }

    #[test]
    fn test_comment_length_limit() {
        let showbook = showbook_with(vec![future_event("e1", 10)]);

        let longest = "a".repeat(MAX_COMMENT_LEN);
        showbook.comment("e1", None, &longest).unwrap();

        let too_long = "a".repeat(MAX_COMMENT_LEN + 1);
        assert!(matches!(
            showbook.comment("e1", None, &too_long),
            Err(ShowbookError::CommentTooLong(MAX_COMMENT_LEN))
        ));
        assert_eq!(showbook.comments().len(), 1);
    }

    #[test]
    fn test_comment_on_unknown_event() {
        let showbook = showbook_with(vec![]);
        assert!(matches!(
            showbook.comment("missing", None, "hello"),
            Err(ShowbookError::EventNotFound(_))
        ));
    }

    #[test]
    fn test_seeding_is_idempotent() {
        let showbook = Showbook::new(MemoryStore::new());
        let today = Local::now().date_naive();

        showbook.init_demo_user().unwrap();
        assert!(showbook.seed_if_empty(today).unwrap());
        let seeded = showbook.events().len();
        assert!(seeded > 0);

        showbook.book("e1", 1).unwrap();
        assert!(!showbook.seed_if_empty(today).unwrap());
        assert_eq!(showbook.events().len(), seeded);
        assert_eq!(showbook.bookings().len(), 1);
    }

    #[test]
    fn test_seeding_replaces_corrupt_events() {
        let showbook = Showbook::new(MemoryStore::new());
        showbook.store().write(EVENTS_KEY, "oops").unwrap();
        showbook.store().write(BOOKINGS_KEY, "[]").unwrap();

        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(showbook.seed_if_empty(today).unwrap());
        assert!(!showbook.events().is_empty());
    }

    #[test]
    fn test_loose_event_record_does_not_trigger_reseed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store
            .write(
                EVENTS_KEY,
                r#"[
                    {"id": "e1", "title": "Indie Night Live", "category": "Indie",
                     "date": "2099-06-01", "startTime": "19:30", "capacity": 120,
                     "ticketsAvailable": 45, "createdBy": "u_demo"},
                    {"id": "e9", "title": "Loose Record", "category": "Folk",
                     "date": "2099-07-01", "capacity": 10}
                ]"#,
            )
            .unwrap();
        let booking = Booking {
            id: "ord_1".to_string(),
            user_id: Some("u_demo".to_string()),
            event_id: "e1".to_string(),
            tickets: 2,
            booked_at: Utc::now(),
        };
        store.set(BOOKINGS_KEY, &vec![booking]).unwrap();

        let showbook = Showbook::open(FileStore::new(dir.path())).unwrap();

        let ids: Vec<String> = showbook.events().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e1", "e9"]);
        assert_eq!(showbook.bookings().len(), 1);
        assert_eq!(showbook.history()[0].booking.id, "ord_1");
        assert_eq!(showbook.event("e9").unwrap().status(), EventStatus::SoldOut);
    }

    #[test]
    fn test_unreadable_event_record_is_skipped_not_reseeded() {
        let showbook = Showbook::new(MemoryStore::new());
        showbook
            .store()
            .write(
                EVENTS_KEY,
                r#"[{"id": "e1", "date": "2099-06-01", "ticketsAvailable": 3},
                    {"id": "e2", "date": "", "capacity": "many"}]"#,
            )
            .unwrap();

        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert!(!showbook.seed_if_empty(today).unwrap());
        let ids: Vec<String> = showbook.events().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e1"]);
    }

    #[test]
    fn test_concurrent_bookings_never_oversell() {
        const BUYERS: usize = 8;

        let dir = tempfile::tempdir().unwrap();
        let showbook = Showbook::new(FileStore::new(dir.path()));
        showbook.init_demo_user().unwrap();
        showbook
            .store()
            .set(EVENTS_KEY, &vec![future_event("e1", (BUYERS - 1) as i64)])
            .unwrap();

        let handles: Vec<_> = (0..BUYERS)
            .map(|_| {
                let path = dir.path().to_path_buf();
                std::thread::spawn(move || {
                    let showbook = Showbook::open(FileStore::new(path)).unwrap();
                    showbook.book("e1", 1)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(succeeded, BUYERS - 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(ShowbookError::BookingUnavailable(EventStatus::SoldOut))
        )));

        assert_eq!(showbook.event("e1").unwrap().tickets_available, 0);
        assert_eq!(showbook.bookings().len(), BUYERS - 1);
    }

    #[test]
    fn test_demo_user_is_created_once() {
        let showbook = Showbook::new(MemoryStore::new());
        showbook
            .store()
            .set(USER_KEY, &User { id: "u_other".into(), name: "Other".into() })
            .unwrap();

        let user = showbook.init_demo_user().unwrap();
        assert_eq!(user.id, "u_other");
    }

    #[test]
    fn test_create_event_sets_owner_and_open() {
        let showbook = showbook_with(vec![]);

        let event = showbook.create_event(&draft()).unwrap();

        assert!(event.id.starts_with("e_"));
        assert_eq!(event.status, ListingState::Open);
        assert_eq!(event.created_by.as_deref(), Some("u_demo"));
        assert_eq!(event.tickets_available, 40);
        assert_eq!(showbook.event(&event.id).unwrap(), event);
    }

    #[test]
    fn test_create_event_rejects_invalid_draft() {
        let showbook = showbook_with(vec![]);

        let mut over = draft();
        over.tickets_available = Some(51);
        assert!(matches!(
            showbook.create_event(&over),
            Err(ShowbookError::TicketsExceedCapacity { .. })
        ));

        let mut missing = draft();
        missing.title.clear();
        let err = showbook.create_event(&missing).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields (*)");

        assert!(showbook.events().is_empty());
    }

    #[test]
    fn test_description_length_limit() {
        let showbook = showbook_with(vec![]);

        let mut longest = draft();
        longest.description = "d".repeat(MAX_DESCRIPTION_LEN);
        showbook.create_event(&longest).unwrap();

        let mut too_long = draft();
        too_long.description = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(matches!(
            showbook.create_event(&too_long),
            Err(ShowbookError::DescriptionTooLong(MAX_DESCRIPTION_LEN))
        ));
        assert_eq!(showbook.events().len(), 1);
    }

    #[test]
    fn test_listing_filters_combine() {
        let mut jazz = future_event("e1", 10);
        jazz.title = "Jazz Trio".into();
        let mut rock = future_event("e2", 10);
        rock.category = crate::event::Category::Rock;
        rock.title = "Rock Fest".into();
        rock.venue = "Hall".into();
        let mut old_rock = future_event("e3", 10);
        old_rock.category = crate::event::Category::Rock;
        old_rock.date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let showbook = showbook_with(vec![jazz, rock, old_rock]);
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        let ids = |filter: EventFilter| -> Vec<String> {
            showbook
                .list_events(&filter, today)
                .into_iter()
                .map(|e| e.id)
                .collect()
        };

        assert_eq!(ids(EventFilter::default()), vec!["e1", "e2", "e3"]);
        assert_eq!(
            ids(EventFilter { category: Some("All".into()), ..Default::default() }),
            vec!["e1", "e2", "e3"]
        );
        assert_eq!(
            ids(EventFilter { category: Some("rock".into()), ..Default::default() }),
            vec!["e2", "e3"]
        );
        assert_eq!(
            ids(EventFilter {
                category: Some("Rock".into()),
                query: Some("hall".into()),
                ..Default::default()
            }),
            vec!["e2"]
        );
        assert_eq!(
            ids(EventFilter {
                category: Some("Rock".into()),
                upcoming_only: true,
                ..Default::default()
            }),
            vec!["e2"]
        );
        assert!(ids(EventFilter { query: Some("polka".into()), ..Default::default() }).is_empty());
    }

    #[test]
    fn test_categories_keep_first_seen_order() {
        let mut a = future_event("e1", 1);
        a.category = crate::event::Category::Rock;
        let b = future_event("e2", 1);
        let mut c = future_event("e3", 1);
        c.category = crate::event::Category::Rock;
        let showbook = showbook_with(vec![a, b, c]);

        assert_eq!(showbook.categories(), vec!["All", "Rock", "Jazz"]);
    }

    #[test]
    fn test_history_is_user_scoped_newest_first_with_placeholders() {
        let showbook = showbook_with(vec![future_event("e1", 10), future_event("e2", 10)]);
        let early = Local.with_ymd_and_hms(2030, 1, 1, 10, 0, 0).unwrap();
        let late = Local.with_ymd_and_hms(2030, 1, 2, 10, 0, 0).unwrap();

        let first = showbook.book_at("e1", 1, early).unwrap();
        let second = showbook.book_at("e2", 2, late).unwrap();

        let mut bookings = showbook.bookings();
        bookings.push(Booking {
            id: "ord_other".into(),
            user_id: Some("u_other".into()),
            event_id: "e1".into(),
            tickets: 1,
            booked_at: late.with_timezone(&Utc),
        });
        showbook.store().set(BOOKINGS_KEY, &bookings).unwrap();

        // Remove e2 so its booking dangles
        let events: Vec<Event> = showbook.events().into_iter().filter(|e| e.id != "e2").collect();
        showbook.store().set(EVENTS_KEY, &events).unwrap();

        let history = showbook.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].booking.id, second.id);
        assert!(history[0].event.is_none());
        assert_eq!(history[0].title(), DELETED_EVENT_TITLE);
        assert_eq!(history[1].booking.id, first.id);
        assert_eq!(history[1].title(), "Test Night");
    }

    #[test]
    fn test_cancel_keeps_bookings_and_reactivate_reopens() {
        let showbook = showbook_with(vec![future_event("e1", 10)]);
        showbook.book("e1", 2).unwrap();

        let cancelled = showbook.cancel_event("e1").unwrap();
        assert_eq!(cancelled.status(), EventStatus::Cancelled);
        assert_eq!(showbook.bookings().len(), 1);
        assert_eq!(showbook.history().len(), 1);

        let reopened = showbook.reactivate_event("e1").unwrap();
        assert_eq!(reopened.status(), EventStatus::Open);
        assert_eq!(reopened.tickets_available, 8);
    }

    #[test]
    fn test_owner_actions_require_ownership() {
        let mut foreign = future_event("e1", 10);
        foreign.created_by = Some("u_other".into());
        let showbook = showbook_with(vec![foreign]);

        assert!(matches!(showbook.cancel_event("e1"), Err(ShowbookError::NotOwner(_))));
        assert!(matches!(
            showbook.update_event("e1", &draft()),
            Err(ShowbookError::NotOwner(_))
        ));
        assert_eq!(showbook.event("e1").unwrap().status, ListingState::Open);
        assert!(showbook.my_events().is_empty());
    }

    #[test]
    fn test_update_event_validates_and_keeps_state() {
        let mut ev = future_event("e1", 10);
        ev.status = ListingState::Cancelled;
        let showbook = showbook_with(vec![ev]);

        let mut bad = draft();
        bad.capacity = Some(5);
        bad.tickets_available = Some(6);
        assert!(showbook.update_event("e1", &bad).is_err());
        assert_eq!(showbook.event("e1").unwrap().title, "Test Night");

        let updated = showbook.update_event("e1", &draft()).unwrap();
        assert_eq!(updated.title, "Folk Evening");
        assert_eq!(updated.status, ListingState::Cancelled);
        assert_eq!(showbook.my_events(), vec![updated]);
    }
}
