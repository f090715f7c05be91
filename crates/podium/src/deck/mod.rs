pub mod splitter;

use std::path::Path;
use std::rc::Rc;

use anyhow::Context;

/// A loaded slide deck: ordered, immutable once built.
#[derive(Debug, Clone)]
pub struct Deck {
    pub title: Option<String>,
    pub slides: Rc<[Slide]>,
}

/// One content unit of the deck. Identity is its position in [`Deck::slides`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Slide {
    pub title: Option<String>,
    pub body: String,
    /// Speaker notes; `None` when the slide has no `Notes:` section.
    pub notes: Option<String>,
}

impl Slide {
    #[cfg(test)]
    pub fn new(title: &str, body: &str, notes: Option<&str>) -> Self {
        Self {
            title: Some(title.to_string()),
            body: body.to_string(),
            notes: notes.map(str::to_string),
        }
    }

    /// Notes content, with a missing block reading as empty.
    pub fn notes_text(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }

    fn parse(raw: &str) -> Self {
        let mut title = None;
        let mut body = Vec::new();
        let mut notes: Option<Vec<&str>> = None;
        let mut in_fence = false;

        for line in raw.lines() {
            let trimmed = line.trim();
            if let Some(notes) = notes.as_mut() {
                notes.push(line);
                continue;
            }
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_fence = !in_fence;
            }
            if !in_fence && is_notes_marker(trimmed) {
                notes = Some(Vec::new());
                continue;
            }
            if title.is_none() && !in_fence {
                if let Some(heading) = line.strip_prefix("# ") {
                    title = Some(heading.trim().to_string());
                    continue;
                }
            }
            body.push(line);
        }

        let notes = notes
            .map(|lines| lines.join("\n").trim().to_string())
            .filter(|n| !n.is_empty());
        Self {
            title,
            body: body.join("\n").trim().to_string(),
            notes,
        }
    }
}

pub(crate) fn is_notes_marker(line: &str) -> bool {
    line.eq_ignore_ascii_case("notes:") || line.eq_ignore_ascii_case("note:")
}

pub fn parse(content: &str) -> Deck {
    let slides: Vec<Slide> = splitter::split(content)
        .iter()
        .map(|raw| Slide::parse(raw))
        .collect();
    let title = slides.first().and_then(|s| s.title.clone());
    Deck {
        title,
        slides: slides.into(),
    }
}

pub fn load(path: &Path) -> anyhow::Result<Deck> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let deck = parse(&content);
    if deck.slides.is_empty() {
        anyhow::bail!("No slides found in {}", path.display());
    }
    Ok(deck)
}
