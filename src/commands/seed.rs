use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;

use super::AppContext;

pub fn run(ctx: &AppContext) -> Result<()> {
    let showbook = &ctx.showbook;

    if showbook.seed_if_empty(Local::now().date_naive())? {
        println!("Seeded {} demo events", showbook.events().len());
    } else {
        println!(
            "{}",
            format!("Store already has {} events, nothing to seed.", showbook.events().len()).dimmed()
        );
    }
    println!("{}", format!("Data directory: {}", showbook.store().dir().display()).dimmed());

    Ok(())
}
