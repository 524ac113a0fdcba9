use anyhow::Result;
use showbook_core::Notice;

use super::AppContext;
use crate::render::Render;

pub fn run(ctx: &AppContext, id: &str, name: Option<&str>, text: &str) -> Result<()> {
    ctx.showbook.comment(id, name, text)?;
    println!("{}", Notice::success("Posted").render());
    Ok(())
}
