use anyhow::Result;
use owo_colors::OwoColorize;
use showbook_core::Notice;

use super::AppContext;
use crate::render::Render;

pub fn run(ctx: &AppContext, id: &str) -> Result<()> {
    let showbook = &ctx.showbook;
    let event = showbook.event(id)?;
    let status = event.status();

    let mut badges = vec![status.render(), format!("[{}]", event.category).dimmed().to_string()];
    if !event.age_restriction.is_empty() {
        badges.push(format!("[{}]", event.age_restriction).dimmed().to_string());
    }

    println!("{}", event.title.bold());
    println!("{}", badges.join(" "));
    println!();
    println!("{:<10}{}", "Artists".dimmed(), event.artist_names);
    println!("{:<10}{}", "When".dimmed(), event.render_schedule());
    println!("{:<10}{}", "Venue".dimmed(), event.venue);
    println!("{:<10}{}", "Tickets".dimmed(), event.render_capacity());
    if !event.image_url.is_empty() {
        println!("{:<10}{}", "Image".dimmed(), event.image_url);
    }
    if !event.description.is_empty() {
        println!();
        println!("{}", event.description);
    }

    println!();
    match status.unavailable_reason() {
        Some(reason) => println!("{}", Notice::info(reason).render()),
        None => println!("{}", format!("Book with: showbook book {} --tickets <N>", event.id).dimmed()),
    }

    let is_owner = showbook
        .current_user()
        .is_some_and(|u| event.is_owned_by(&u.id));
    if is_owner {
        println!(
            "{}",
            format!("You created this event: showbook edit|cancel|reactivate {}", event.id).dimmed()
        );
    }

    println!();
    println!("{}", "Comments".bold());
    let comments = showbook.comments_for(&event.id);
    if comments.is_empty() {
        println!("{}", "   No comments yet.".dimmed());
    }
    for comment in &comments {
        println!("{}", comment.render());
    }

    Ok(())
}
