use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use showbook_core::{EventFilter, Notice};

use super::AppContext;
use crate::render::Render;

pub fn run(
    ctx: &AppContext,
    category: Option<String>,
    search: Option<String>,
    upcoming_only: bool,
) -> Result<()> {
    let filter = EventFilter {
        category,
        query: search,
        upcoming_only,
    };
    let events = ctx
        .showbook
        .list_events(&filter, Local::now().date_naive());

    if events.is_empty() {
        let notice = Notice::info("No matching events. Try different keywords or a category.");
        println!("{}", notice.render());
        return Ok(());
    }

    let cards: Vec<String> = events.iter().map(|e| e.render()).collect();
    println!("{}", cards.join("\n\n"));

    Ok(())
}

pub fn categories(ctx: &AppContext) -> Result<()> {
    for (idx, category) in ctx.showbook.categories().iter().enumerate() {
        if idx == 0 {
            println!("{}", category.bold());
        } else {
            println!("{}", category);
        }
    }
    Ok(())
}
