//! Markdown Preview
//!
//! Renders note bodies with pulldown-cmark. Note content is user input
//! stored in local storage, so raw HTML is shown as text and images are
//! reduced to their alt text.

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Render markdown to HTML safe for `inner_html`
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

enum State {
    Normal,
    InImage { depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Html(html) | Event::InlineHtml(html) => {
                    events.push(Event::Text(html));
                }
                Event::Start(Tag::Image { .. }) => {
                    state = State::InImage { depth: 0 };
                }
                other => events.push(other),
            },

            // keep the alt text, drop the image itself
            State::InImage { ref mut depth } => match event {
                Event::Start(_) => *depth += 1,
                Event::End(TagEnd::Image) if *depth == 0 => state = State::Normal,
                Event::End(_) => *depth = depth.saturating_sub(1),
                Event::Text(alt) => events.push(Event::Text(alt)),
                Event::Code(code) => events.push(Event::Text(CowStr::from(code.to_string()))),
                _ => {}
            },
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_basic_markdown() {
        let html = parse_markdown("# Plan\n\n- **one**\n- ~~two~~");
        assert!(html.contains("<h1>Plan</h1>"));
        assert!(html.contains("<strong>one</strong>"));
        assert!(html.contains("<del>two</del>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_images_become_alt_text() {
        let html = parse_markdown("![a cat](http://example.com/cat.png)");
        assert!(!html.contains("<img"));
        assert!(html.contains("a cat"));
    }
}
