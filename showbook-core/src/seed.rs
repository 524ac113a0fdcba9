//! Demo data written on first use.

use chrono::{Duration, NaiveDate, NaiveTime};

use crate::event::{Category, Event, ListingState};

struct Demo {
    id: &'static str,
    title: &'static str,
    category: Category,
    artist: &'static str,
    venue: &'static str,
    day_offset: i64,
    start: (u32, u32),
    end: (u32, u32),
    capacity: u32,
    available: i64,
    image: &'static str,
    description: &'static str,
    age: &'static str,
    state: ListingState,
}

/// The demo lineup, dated relative to `today`.
///
/// Covers every derived status: Jazz Trio Evening has no tickets left, Pop
/// Night Live already happened and Cancelled Concert is flagged cancelled.
pub fn demo_events(today: NaiveDate, created_by: &str) -> Vec<Event> {
    let lineup = [
        Demo {
            id: "e1",
            title: "Indie Night Live",
            category: Category::Indie,
            artist: "Mike",
            venue: "Room 1",
            day_offset: 5,
            start: (19, 30),
            end: (21, 30),
            capacity: 120,
            available: 45,
            image: "assets/img/indie.jpg",
            description: "Enjoy music.",
            age: "All-ages",
            state: ListingState::Open,
        },
        Demo {
            id: "e2",
            title: "Jazz Trio Evening",
            category: Category::Jazz,
            artist: "Jenny",
            venue: "Room 2",
            day_offset: 7,
            start: (20, 0),
            end: (22, 0),
            capacity: 80,
            available: 0,
            image: "assets/img/jazz.jpg",
            description: "Appreciate music.",
            age: "18+",
            state: ListingState::Open,
        },
        Demo {
            id: "e3",
            title: "Electronic Campus Party",
            category: Category::Electronic,
            artist: "Tom",
            venue: "Room 3",
            day_offset: 9,
            start: (18, 0),
            end: (23, 0),
            capacity: 300,
            available: 300,
            image: "assets/img/electronic.jpg",
            description: "Enjoy music.",
            age: "All-ages",
            state: ListingState::Open,
        },
        Demo {
            id: "e4",
            title: "Pop Night Live",
            category: Category::Pop,
            artist: "Lucy",
            venue: "Room 4",
            day_offset: -7,
            start: (17, 30),
            end: (19, 0),
            capacity: 100,
            available: 12,
            image: "assets/img/pop.jpg",
            description: "Enjoy music.",
            age: "All-ages",
            state: ListingState::Open,
        },
        Demo {
            id: "e5",
            title: "Classical String Quartet",
            category: Category::Classical,
            artist: "Alex",
            venue: "Room 5",
            day_offset: 11,
            start: (19, 0),
            end: (21, 0),
            capacity: 200,
            available: 10,
            image: "assets/img/classical.jpg",
            description: "Appreciate music.",
            age: "All-ages",
            state: ListingState::Open,
        },
        Demo {
            id: "e6",
            title: "Rock Garage Fest",
            category: Category::Rock,
            artist: "Nina",
            venue: "Room 6",
            day_offset: 13,
            start: (19, 0),
            end: (22, 0),
            capacity: 150,
            available: 75,
            image: "assets/img/rock.jpg",
            description: "Enjoy music.",
            age: "18+",
            state: ListingState::Open,
        },
        Demo {
            id: "e7",
            title: "Cancelled Concert",
            category: Category::Rock,
            artist: "No Show",
            venue: "Venue X",
            day_offset: 15,
            start: (19, 0),
            end: (21, 0),
            capacity: 100,
            available: 100,
            image: "assets/img/rock.jpg",
            description: "Enjoy the great music and have a wonderful night!",
            age: "All-ages",
            state: ListingState::Cancelled,
        },
    ];

    lineup
        .into_iter()
        .map(|demo| Event {
            id: demo.id.to_string(),
            title: demo.title.to_string(),
            category: demo.category,
            artist_names: demo.artist.to_string(),
            venue: demo.venue.to_string(),
            date: today + Duration::days(demo.day_offset),
            start_time: NaiveTime::from_hms_opt(demo.start.0, demo.start.1, 0),
            end_time: NaiveTime::from_hms_opt(demo.end.0, demo.end.1, 0),
            capacity: demo.capacity,
            tickets_available: demo.available,
            status: demo.state,
            image_url: demo.image.to_string(),
            description: demo.description.to_string(),
            age_restriction: demo.age.to_string(),
            created_by: Some(created_by.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventStatus;

    #[test]
    fn test_demo_lineup_shows_every_status() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let now = today.and_hms_opt(12, 0, 0).unwrap();
        let events = demo_events(today, "u_demo");

        let status_of = |id: &str| {
            events
                .iter()
                .find(|e| e.id == id)
                .map(|e| e.status_at(now))
                .unwrap()
        };

        assert_eq!(status_of("e1"), EventStatus::Open);
        assert_eq!(status_of("e2"), EventStatus::SoldOut);
        assert_eq!(status_of("e4"), EventStatus::Inactive);
        assert_eq!(status_of("e7"), EventStatus::Cancelled);
    }

    #[test]
    fn test_demo_events_respect_capacity() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        for event in demo_events(today, "u_demo") {
            assert!(event.tickets_available <= i64::from(event.capacity), "{}", event.title);
            assert_eq!(event.created_by.as_deref(), Some("u_demo"));
        }
    }
}
