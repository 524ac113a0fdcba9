use anyhow::Result;
use showbook_core::booking::parse_quantity;

use super::AppContext;
use crate::render::Render;

pub fn run(ctx: &AppContext, id: &str, tickets: &str) -> Result<()> {
    let quantity = parse_quantity(tickets)?;
    let booking = ctx.showbook.book(id, quantity)?;

    println!("{}", booking.confirmation().render());

    let event = ctx.showbook.event(id)?;
    println!("{} {}", event.status().render(), event.render_capacity());

    Ok(())
}
