use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::deck::{self, Deck};

pub fn run(file: &Path) -> Result<()> {
    let deck = deck::load(file)?;
    print!("{}", render(&deck));
    Ok(())
}

/// One block per slide: number and title, then indented notes.
fn render(deck: &Deck) -> String {
    let total = deck.slides.len();
    let mut out = String::new();
    for (i, slide) in deck.slides.iter().enumerate() {
        let title = slide.title.as_deref().unwrap_or("(untitled)");
        out.push_str(&format!(
            "{} {}\n",
            format!("{:>3}/{total}", i + 1).dimmed(),
            title.bold()
        ));
        match slide.notes.as_deref() {
            Some(notes) => {
                for line in notes.lines() {
                    out.push_str(&format!("      {}\n", line.italic()));
                }
            }
            None => out.push_str(&format!("      {}\n", "no notes".dimmed())),
        }
    }
    out
}
