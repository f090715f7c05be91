/// Split a deck body into raw slide strings.
///
/// Three mechanisms create slide breaks:
/// 1. `---` with blank lines on both sides
/// 2. Three or more consecutive blank lines
/// 3. A `# ` heading when the current slide already has content
pub fn split(body: &str) -> Vec<String> {
    let body = body.replace("\r\n", "\n");
    let lines: Vec<&str> = body.split('\n').collect();

    let mut chunks: Vec<Vec<&str>> = vec![Vec::new()];
    let mut blank_run = 0;
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();

        if is_dash_separator(trimmed) {
            let prev_blank = chunks
                .last()
                .is_none_or(|c| c.last().is_none_or(|l| l.trim().is_empty()));
            let next_blank = lines.get(i + 1).is_none_or(|l| l.trim().is_empty());
            if prev_blank && next_blank {
                start_chunk(&mut chunks);
                blank_run = 0;
                i += 1;
                continue;
            }
        }

        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run == 3 {
                start_chunk(&mut chunks);
            }
        } else {
            blank_run = 0;
        }

        if let Some(chunk) = chunks.last_mut() {
            chunk.push(line);
        }
        i += 1;
    }

    let mut slides = Vec::new();
    for chunk in chunks {
        let text = chunk.join("\n");
        let text = text.trim();
        if !text.is_empty() {
            split_by_heading_inference(text, &mut slides);
        }
    }
    slides
}

fn start_chunk<'a>(chunks: &mut Vec<Vec<&'a str>>) {
    if chunks.last().is_some_and(|c| c.iter().any(|l| !l.trim().is_empty())) {
        chunks.push(Vec::new());
    }
}

/// Split a chunk when `# ` opens a line and the current slide already has content.
/// Lines inside fenced code blocks are never treated as headings, and neither is
/// anything inside the speaker notes of a slide.
fn split_by_heading_inference(chunk: &str, slides: &mut Vec<String>) {
    let mut current = String::new();
    let mut has_content = false;
    let mut in_notes = false;
    let mut fence: Option<(char, usize)> = None;

    for line in chunk.lines() {
        let trimmed = line.trim();

        match fence {
            Some((ch, len)) => {
                let closing = trimmed.chars().take_while(|&c| c == ch).count();
                if closing >= len && trimmed.chars().skip(closing).all(char::is_whitespace) {
                    fence = None;
                }
            }
            None => {
                if let Some(ch) = trimmed.chars().next().filter(|c| *c == '`' || *c == '~') {
                    let len = trimmed.chars().take_while(|&c| c == ch).count();
                    if len >= 3 {
                        fence = Some((ch, len));
                    }
                }
            }
        }

        if fence.is_none() && !in_notes && line.starts_with("# ") && has_content {
            slides.push(current.trim().to_string());
            current.clear();
            has_content = false;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);

        if fence.is_none() && super::is_notes_marker(trimmed) {
            in_notes = true;
        }
        if !trimmed.is_empty() {
            has_content = true;
        }
    }

    let text = current.trim();
    if !text.is_empty() {
        slides.push(text.to_string());
    }
}

fn is_dash_separator(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_split() {
        let slides = split("Slide one\n\n\n\nSlide two");
        assert_eq!(slides, vec!["Slide one", "Slide two"]);
    }

    #[test]
    fn test_dash_separator() {
        let slides = split("Slide one\n\n---\n\nSlide two");
        assert_eq!(slides, vec!["Slide one", "Slide two"]);
    }

    #[test]
    fn test_dash_without_blank_lines_is_content() {
        let slides = split("Slide one\n---\nstill one");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_combined_separators() {
        let slides = split("Slide one\n\n\n\n---\n\n\n\nSlide two");
        assert_eq!(slides.len(), 2);
    }

    #[test]
    fn test_heading_inference() {
        let slides = split("# First\n\nContent\n\n# Second\n\nMore content");
        assert_eq!(slides.len(), 2);
        assert!(slides[0].starts_with("# First"));
        assert!(slides[1].starts_with("# Second"));
    }

    #[test]
    fn test_h2_no_split() {
        assert_eq!(split("# Title\n\n## Subtitle\n\nContent").len(), 1);
    }

    #[test]
    fn test_heading_in_code_block_no_split() {
        let body = "# Title\n\n```python\n# this is a comment\nprint('hi')\n```";
        assert_eq!(split(body).len(), 1);
    }

    #[test]
    fn test_heading_in_notes_no_split() {
        let body = "# Title\n\nBody\n\nNotes:\n# remember the demo";
        assert_eq!(split(body).len(), 1);
    }
}
