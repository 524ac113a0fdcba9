use anyhow::Result;
use showbook_core::{Category, EventDraft, Notice};

use super::{AppContext, EventArgs};
use crate::render::Render;

pub fn run(ctx: &AppContext, args: EventArgs) -> Result<()> {
    let mut draft = EventDraft {
        category: Category::KNOWN[0].to_string(),
        ..Default::default()
    };
    args.apply_to(&mut draft);

    let event = ctx.showbook.create_event(&draft)?;
    println!("{}", Notice::success("Published!").render());
    println!();

    super::show::run(ctx, &event.id)
}
