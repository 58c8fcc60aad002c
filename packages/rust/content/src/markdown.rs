//! Markdown body → plain text and headings.
//!
//! Scoring only looks at words, so the body is flattened to text with block
//! boundaries turned into newlines. Raw HTML is dropped.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use docrank_shared::Heading;

use crate::slug::clean_slug;

/// Plain text and heading outline of a markdown body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedBody {
    pub text: String,
    pub headings: Vec<Heading>,
}

/// Flatten a markdown body into plain text and collect its headings.
pub fn render_body(markdown: &str) -> RenderedBody {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let mut rendered = RenderedBody::default();
    let mut current_heading: Option<(u8, String)> = None;

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current_heading = Some((level as u8, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((depth, text)) = current_heading.take() {
                    let text = text.trim().to_string();
                    rendered.headings.push(Heading {
                        depth,
                        slug: clean_slug(&text),
                        text,
                    });
                }
                rendered.text.push('\n');
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, heading)) = current_heading.as_mut() {
                    heading.push_str(&text);
                }
                rendered.text.push_str(&text);
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, heading)) = current_heading.as_mut() {
                    heading.push(' ');
                }
                rendered.text.push(' ');
            }
            Event::End(
                TagEnd::Paragraph
                | TagEnd::Item
                | TagEnd::CodeBlock
                | TagEnd::TableCell
                | TagEnd::TableRow,
            ) => rendered.text.push('\n'),
            _ => {}
        }
    }

    rendered.text = rendered.text.trim().to_string();
    rendered
}
