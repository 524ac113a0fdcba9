use anyhow::Result;
use showbook_core::Notice;

use super::AppContext;
use crate::render::Render;

pub fn run(ctx: &AppContext) -> Result<()> {
    let history = ctx.showbook.history();

    if history.is_empty() {
        println!("{}", Notice::info("No bookings yet.").render());
        return Ok(());
    }

    let entries: Vec<String> = history.iter().map(|h| h.render()).collect();
    println!("{}", entries.join("\n\n"));

    Ok(())
}
