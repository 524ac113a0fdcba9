//! Terminal rendering for showbook types.
//!
//! Extension traits that add colored output to showbook-core types using
//! owo_colors.

use owo_colors::OwoColorize;
use showbook_core::{Comment, Event, EventStatus, HistoryEntry, Notice, Severity};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventStatus {
    fn render(&self) -> String {
        let badge = format!(" {} ", self.label());
        match self {
            EventStatus::Open => badge.black().on_green().to_string(),
            EventStatus::SoldOut => badge.white().on_red().to_string(),
            EventStatus::Cancelled => badge.white().on_bright_black().to_string(),
            EventStatus::Inactive => badge.black().on_yellow().to_string(),
        }
    }
}

impl Render for Notice {
    fn render(&self) -> String {
        match self.severity {
            Severity::Info => self.message.blue().to_string(),
            Severity::Warning => self.message.yellow().to_string(),
            Severity::Danger => self.message.red().bold().to_string(),
            Severity::Success => self.message.green().to_string(),
        }
    }
}

/// One listing card.
impl Render for Event {
    fn render(&self) -> String {
        let mut lines = vec![format!(
            "{} {} {}",
            self.status().render(),
            format!("[{}]", self.category).dimmed(),
            self.title.bold()
        )];
        lines.push(format!("   {}", self.artist_names.dimmed()));
        lines.push(format!("   {} · {}", self.render_schedule(), self.venue));
        lines.push(format!("   {}", format!("showbook show {}", self.id).dimmed()));
        lines.join("\n")
    }
}

impl Render for Comment {
    fn render(&self) -> String {
        let posted = self.posted_at.with_timezone(&chrono::Local);
        format!(
            "{}  {}\n   {}",
            self.author().bold(),
            posted.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            self.content
        )
    }
}

impl Render for HistoryEntry {
    fn render(&self) -> String {
        let booked_at = self.booking.booked_at.with_timezone(&chrono::Local);

        let mut lines = Vec::new();
        match &self.event {
            Some(event) => {
                lines.push(format!("{} {}", event.status().render(), event.title.bold()));
                lines.push(format!("   {} · {}", event.render_schedule(), event.venue).dimmed().to_string());
            }
            None => lines.push(self.title().dimmed().to_string()),
        }
        lines.push(format!(
            "   Order ID {} · Tickets {}",
            self.booking.id.cyan(),
            self.booking.tickets
        ));
        lines.push(format!("   Booked at: {}", booked_at.format("%Y-%m-%d %H:%M")).dimmed().to_string());
        lines.join("\n")
    }
}
