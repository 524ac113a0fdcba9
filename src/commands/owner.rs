//! Actions only the creator of an event may take.

use anyhow::Result;
use owo_colors::OwoColorize;
use showbook_core::{EventDraft, Notice};

use super::{AppContext, EventArgs};
use crate::render::Render;

pub fn mine(ctx: &AppContext) -> Result<()> {
    let events = ctx.showbook.my_events();

    if events.is_empty() {
        println!("{}", "You have not created any events.".dimmed());
        return Ok(());
    }

    let cards: Vec<String> = events.iter().map(|e| e.render()).collect();
    println!("{}", cards.join("\n\n"));
    Ok(())
}

pub fn edit(ctx: &AppContext, id: &str, args: EventArgs) -> Result<()> {
    let current = ctx.showbook.event(id)?;
    let mut draft = EventDraft::from_event(&current);
    args.apply_to(&mut draft);

    let event = ctx.showbook.update_event(id, &draft)?;
    println!("{}", Notice::success("Event updated successfully!").render());
    println!();
    println!("{}", event.render());
    Ok(())
}

pub fn cancel(ctx: &AppContext, id: &str) -> Result<()> {
    let event = ctx.showbook.cancel_event(id)?;
    let notice = Notice::success(format!("Event '{}' has been cancelled.", event.title));
    println!("{}", notice.render());
    Ok(())
}

pub fn reactivate(ctx: &AppContext, id: &str) -> Result<()> {
    let event = ctx.showbook.reactivate_event(id)?;
    let notice = Notice::success(format!("Event '{}' has been reactivated.", event.title));
    println!("{}", notice.render());
    Ok(())
}
