mod commands;
mod logging;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use showbook_core::ShowbookError;

use commands::{AppContext, EventArgs};
use render::Render;

#[derive(Parser)]
#[command(name = "showbook")]
#[command(about = "Browse events, book tickets and leave comments in your local showbook")]
struct Cli {
    /// Directory holding the showbook data (overrides data_dir from config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events
    Events {
        /// Only show this category ("All" for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Match against title, artists and venue
        #[arg(short, long)]
        search: Option<String>,

        /// Only show events from today on, soonest first
        #[arg(long, conflicts_with = "all")]
        upcoming: bool,

        /// Show past events too, even if upcoming_only is configured
        #[arg(long)]
        all: bool,
    },
    /// List the categories present in the data
    Categories,
    /// Show an event with its availability and comments
    Show { id: String },
    /// Book tickets for an event
    Book {
        id: String,

        /// Number of tickets (defaults to 1)
        #[arg(short, long, allow_hyphen_values = true)]
        tickets: Option<String>,
    },
    /// Comment on an event
    Comment {
        id: String,

        text: String,

        /// Display name (defaults to Anonymous)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Publish a new event
    New {
        #[command(flatten)]
        event: EventArgs,
    },
    /// Edit one of your events
    Edit {
        id: String,

        #[command(flatten)]
        event: EventArgs,
    },
    /// Show your bookings
    History,
    /// List the events you created
    Mine,
    /// Cancel one of your events
    Cancel { id: String },
    /// Reopen one of your cancelled events
    Reactivate { id: String },
    /// Write the demo data if the store is empty
    Seed,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ShowbookError>() {
                Some(e) if !is_internal(e) => {
                    eprintln!("{}", e.to_notice().render());
                }
                _ => eprintln!("{} {:#}", "Error:".red().bold(), err),
            }
            ExitCode::FAILURE
        }
    }
}

/// Failures that are not about the user's input.
fn is_internal(err: &ShowbookError) -> bool {
    matches!(
        err,
        ShowbookError::Io(_) | ShowbookError::Serialization(_) | ShowbookError::Config(_)
    )
}

fn run(cli: Cli) -> Result<()> {
    let ctx = AppContext::load(cli.data_dir)?;

    match cli.command {
        Commands::Events {
            category,
            search,
            upcoming,
            all,
        } => {
            let upcoming_only = if all {
                false
            } else {
                upcoming || ctx.config.upcoming_only
            };
            commands::events::run(&ctx, category, search, upcoming_only)
        }
        Commands::Categories => commands::events::categories(&ctx),
        Commands::Show { id } => commands::show::run(&ctx, &id),
        Commands::Book { id, tickets } => commands::book::run(&ctx, &id, tickets.as_deref().unwrap_or("")),
        Commands::Comment { id, text, name } => {
            commands::comment::run(&ctx, &id, name.as_deref(), &text)
        }
        Commands::New { event } => commands::new::run(&ctx, event),
        Commands::Edit { id, event } => commands::owner::edit(&ctx, &id, event),
        Commands::History => commands::history::run(&ctx),
        Commands::Mine => commands::owner::mine(&ctx),
        Commands::Cancel { id } => commands::owner::cancel(&ctx, &id),
        Commands::Reactivate { id } => commands::owner::reactivate(&ctx, &id),
        Commands::Seed => commands::seed::run(&ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_ticket_count_reaches_validation() {
        let cli = Cli::try_parse_from(["showbook", "book", "e1", "--tickets", "-5"]).unwrap();
        let Commands::Book { id, tickets } = cli.command else {
            panic!("expected book command");
        };
        assert_eq!(id, "e1");
        assert_eq!(tickets.as_deref(), Some("-5"));

        let err = showbook_core::booking::parse_quantity("-5").unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid quantity");
    }
}
