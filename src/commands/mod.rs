pub mod book;
pub mod comment;
pub mod events;
pub mod history;
pub mod new;
pub mod owner;
pub mod seed;
pub mod show;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use showbook_core::config::ShowbookConfig;
use showbook_core::{EventDraft, FileStore, Showbook};

/// Config plus an opened showbook, loaded once per command.
pub struct AppContext {
    pub config: ShowbookConfig,
    pub showbook: Showbook<FileStore>,
}

impl AppContext {
    /// Load config, open the store and make sure demo data exists.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = ShowbookConfig::load()?;
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }

        let store = config.store();
        tracing::debug!(dir = %store.dir().display(), "opening store");
        let showbook = Showbook::open(store)?;

        Ok(AppContext { config, showbook })
    }
}

/// Event fields accepted by `new` and `edit`.
///
/// Everything is optional here; required fields are checked by the core
/// validation so both commands report the same messages.
#[derive(Args, Debug, Default)]
pub struct EventArgs {
    #[arg(long)]
    pub title: Option<String>,

    /// Classical, Indie, Jazz, Electronic, Pop or Rock
    #[arg(long)]
    pub category: Option<String>,

    /// Artist name(s)
    #[arg(long)]
    pub artist: Option<String>,

    #[arg(long)]
    pub venue: Option<String>,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Start time (HH:MM)
    #[arg(long)]
    pub start: Option<String>,

    /// End time (HH:MM)
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long, allow_negative_numbers = true)]
    pub capacity: Option<i64>,

    /// Tickets for sale
    #[arg(long, allow_negative_numbers = true)]
    pub available: Option<i64>,

    /// Cover image URL or path
    #[arg(long)]
    pub image: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// All-ages or 18+
    #[arg(long)]
    pub age: Option<String>,
}

impl EventArgs {
    /// Overwrite the draft with every field given on the command line.
    pub fn apply_to(self, draft: &mut EventDraft) {
        let text_fields = [
            (self.title, &mut draft.title),
            (self.category, &mut draft.category),
            (self.artist, &mut draft.artist_names),
            (self.venue, &mut draft.venue),
            (self.date, &mut draft.date),
            (self.start, &mut draft.start_time),
            (self.end, &mut draft.end_time),
            (self.image, &mut draft.image_url),
            (self.description, &mut draft.description),
            (self.age, &mut draft.age_restriction),
        ];
        for (value, field) in text_fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        if self.capacity.is_some() {
            draft.capacity = self.capacity;
        }
        if self.available.is_some() {
            draft.tickets_available = self.available;
        }
    }
}
