//! Markdown normalization
//!
//! Renders markdown (or plain text, which is read as markdown) into a flat
//! sequence of tagged spans. Raw HTML is dropped, never rendered.
//!
//! Uses pulldown-cmark for parsing.

use pulldown_cmark::{Event, Options, Parser as MdParser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

/// Kind of a normalized span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SpanKind {
    Heading { level: u8 },
    Paragraph,
    ListItem,
}

/// A distinguishable block of document text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub kind: SpanKind,

    pub text: String,

    /// Candidate index for non-empty list items, assigned in document order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<usize>,
}

/// Title and description declared in YAML frontmatter
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// A document rendered to tagged spans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedBody {
    pub spans: Vec<Span>,

    #[serde(skip)]
    pub frontmatter: Frontmatter,
}

impl NormalizedBody {
    /// Renders markdown source into spans
    pub fn from_markdown(source: &str) -> Self {
        let (frontmatter, body) = split_frontmatter(source);
        let mut spans = render_spans(body);

        let mut next = 0;
        for span in spans.iter_mut() {
            if span.kind == SpanKind::ListItem && !span.text.is_empty() {
                span.candidate = Some(next);
                next += 1;
            }
        }

        Self { spans, frontmatter }
    }

    /// Non-empty list items in document order
    pub fn list_items(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(|s| s.candidate.is_some())
    }

    /// First heading, else the frontmatter title
    pub fn title(&self) -> Option<&str> {
        self.spans
            .iter()
            .find(|s| matches!(s.kind, SpanKind::Heading { .. }) && !s.text.is_empty())
            .map(|s| s.text.as_str())
            .or(self.frontmatter.title.as_deref())
    }

    /// First paragraph after the first heading (or the first paragraph when
    /// there is no heading), else the frontmatter description
    pub fn description(&self) -> Option<&str> {
        let start = self
            .spans
            .iter()
            .position(|s| matches!(s.kind, SpanKind::Heading { .. }))
            .map(|i| i + 1)
            .unwrap_or(0);

        self.spans[start..]
            .iter()
            .find(|s| s.kind == SpanKind::Paragraph && !s.text.is_empty())
            .map(|s| s.text.as_str())
            .or(self.frontmatter.description.as_deref())
    }

    /// The body as plain text, one span per line
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Splits leading `---` YAML frontmatter from the body
///
/// Frontmatter that fails to parse is kept as part of the body.
fn split_frontmatter(source: &str) -> (Frontmatter, &str) {
    let trimmed = source.trim_start_matches('\u{feff}');
    let Some(rest) = trimmed.strip_prefix("---") else {
        return (Frontmatter::default(), source);
    };
    if !rest.starts_with('\n') && !rest.starts_with("\r\n") {
        return (Frontmatter::default(), source);
    }

    let Some(end) = rest.find("\n---") else {
        return (Frontmatter::default(), source);
    };

    let yaml = &rest[..end];
    let after = &rest[end + 4..];
    let body = after.split_once('\n').map(|(_, b)| b).unwrap_or("");

    match serde_yaml::from_str::<Frontmatter>(yaml) {
        Ok(fm) => (fm, body),
        Err(e) => {
            tracing::debug!("Ignoring unparsable frontmatter: {}", e);
            (Frontmatter::default(), source)
        }
    }
}

/// Text collector for an open block
struct OpenBlock {
    /// Slot in the output reserved when the block started
    slot: usize,
    text: String,
}

fn render_spans(source: &str) -> Vec<Span> {
    let options = Options::ENABLE_TASKLISTS | Options::ENABLE_STRIKETHROUGH;
    let parser = MdParser::new_ext(source, options);

    let mut spans: Vec<Span> = Vec::new();
    // Items nest, so each open item keeps its own buffer. Slots are reserved
    // at Start so nested items do not reorder their parent.
    let mut items: Vec<OpenBlock> = Vec::new();
    let mut block: Option<OpenBlock> = None;
    let mut in_code_block = false;

    let reserve = |spans: &mut Vec<Span>, kind: SpanKind| -> usize {
        spans.push(Span {
            kind,
            text: String::new(),
            candidate: None,
        });
        spans.len() - 1
    };

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) if items.is_empty() => {
                let slot = reserve(&mut spans, SpanKind::Heading { level: level as u8 });
                block = Some(OpenBlock { slot, text: String::new() });
            }
            Event::Start(Tag::Paragraph) if items.is_empty() => {
                let slot = reserve(&mut spans, SpanKind::Paragraph);
                block = Some(OpenBlock { slot, text: String::new() });
            }
            Event::Start(Tag::Item) => {
                let slot = reserve(&mut spans, SpanKind::ListItem);
                items.push(OpenBlock { slot, text: String::new() });
            }
            Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::Paragraph) if items.is_empty() => {
                if let Some(b) = block.take() {
                    spans[b.slot].text = collapse_whitespace(&b.text);
                }
            }
            Event::End(TagEnd::Paragraph) => {
                // Loose list items wrap their text in paragraphs
                if let Some(item) = items.last_mut() {
                    item.text.push(' ');
                }
            }
            Event::End(TagEnd::Item) => {
                if let Some(item) = items.pop() {
                    spans[item.slot].text = collapse_whitespace(&item.text);
                }
            }
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) | Event::Code(text) if !in_code_block => {
                let target = match items.last_mut() {
                    Some(item) => Some(&mut item.text),
                    None => block.as_mut().map(|b| &mut b.text),
                };
                if let Some(buf) = target {
                    buf.push_str(&text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                let target = match items.last_mut() {
                    Some(item) => Some(&mut item.text),
                    None => block.as_mut().map(|b| &mut b.text),
                };
                if let Some(buf) = target {
                    buf.push(' ');
                }
            }
            // Raw HTML is never carried into the body
            Event::Html(_) | Event::InlineHtml(_) => {}
            _ => {}
        }
    }

    spans
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_paragraphs_and_items() {
        let body = NormalizedBody::from_markdown(
            "# Launch Plan\n\nShip the beta.\n\n- Write docs\n- Fix login\n",
        );

        assert_eq!(body.title(), Some("Launch Plan"));
        assert_eq!(body.description(), Some("Ship the beta."));

        let items: Vec<_> = body.list_items().map(|s| s.text.as_str()).collect();
        assert_eq!(items, ["Write docs", "Fix login"]);
        assert_eq!(body.list_items().filter_map(|s| s.candidate).collect::<Vec<_>>(), [0, 1]);
    }

    #[test]
    fn nested_items_keep_document_order() {
        let body = NormalizedBody::from_markdown("- Parent\n  - Child one\n  - Child two\n- Sibling\n");
        let items: Vec<_> = body.list_items().map(|s| s.text.as_str()).collect();
        assert_eq!(items, ["Parent", "Child one", "Child two", "Sibling"]);
    }

    #[test]
    fn empty_items_get_no_candidate() {
        let body = NormalizedBody::from_markdown("- First\n-\n- Second\n");
        let spans: Vec<_> = body
            .spans
            .iter()
            .filter(|s| s.kind == SpanKind::ListItem)
            .map(|s| (s.text.as_str(), s.candidate))
            .collect();
        assert_eq!(spans, [("First", Some(0)), ("", None), ("Second", Some(1))]);
    }

    #[test]
    fn html_is_stripped() {
        let body = NormalizedBody::from_markdown(
            "<script>alert(1)</script>\n\n- Review <b>access</b> rules\n",
        );
        assert!(!body.text().contains("script"));
        let items: Vec<_> = body.list_items().map(|s| s.text.as_str()).collect();
        assert_eq!(items, ["Review access rules"]);
    }

    #[test]
    fn task_list_markers_and_inline_code() {
        let body = NormalizedBody::from_markdown("- [ ] Bump `serde` version\n- [x] Tag release\n");
        let items: Vec<_> = body.list_items().map(|s| s.text.as_str()).collect();
        assert_eq!(items, ["Bump serde version", "Tag release"]);
    }

    #[test]
    fn loose_list_items() {
        let body = NormalizedBody::from_markdown("- First item\n\n  continued\n\n- Second\n");
        let items: Vec<_> = body.list_items().map(|s| s.text.as_str()).collect();
        assert_eq!(items, ["First item continued", "Second"]);
    }

    #[test]
    fn plain_text_is_paragraphs() {
        let body = NormalizedBody::from_markdown("Just some notes.\nOn two lines.");
        assert_eq!(body.title(), None);
        assert_eq!(body.description(), Some("Just some notes. On two lines."));
        assert_eq!(body.list_items().count(), 0);
    }

    #[test]
    fn code_blocks_are_skipped() {
        let body = NormalizedBody::from_markdown("```\n- not an item\n```\n\n- real item\n");
        let items: Vec<_> = body.list_items().map(|s| s.text.as_str()).collect();
        assert_eq!(items, ["real item"]);
    }

    #[test]
    fn frontmatter_fills_missing_title() {
        let body = NormalizedBody::from_markdown(
            "---\ntitle: Q3 Roadmap\ndescription: Planning notes\n---\n- Hire designer\n",
        );
        assert_eq!(body.title(), Some("Q3 Roadmap"));
        assert_eq!(body.description(), Some("Planning notes"));
        assert_eq!(body.list_items().count(), 1);
    }

    #[test]
    fn heading_wins_over_frontmatter() {
        let body = NormalizedBody::from_markdown("---\ntitle: Meta\n---\n# Real Title\n\nBody.\n");
        assert_eq!(body.title(), Some("Real Title"));
        assert_eq!(body.description(), Some("Body."));
    }

    #[test]
    fn text_joins_spans_by_line() {
        let body = NormalizedBody::from_markdown("# A\n\n- b\n- c\n");
        assert_eq!(body.text(), "A\nb\nc");
    }
}
