//! Markdown → ratatui `Text` renderer for Bot replies.
//!
//! Thin wrapper around `pulldown_cmark` that converts markdown events into
//! styled `Line`/`Span` values. Headings, bold, italic, strikethrough,
//! inline code, fenced code blocks (plain dim text), lists, blockquotes,
//! and links.
//!
//! Raw HTML events are dropped, which is exactly why transcript content is
//! markup-escaped at message creation: escaped angle brackets come back out
//! of the parser as literal text instead of vanishing as unrendered markup.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Parse markdown content into styled `Text`.
///
/// Returns owned text (`'static`) so callers aren't constrained by input
/// lifetime.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut w = Writer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        w.handle(event);
    }
    w.finish()
}

/// Flattens rendered text back to a plain string (used by height
/// prediction and tests).
pub fn plain_lines(text: &Text<'_>) -> Vec<String> {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect()
}

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack; styles compose via `patch` so nested bold+italic
    /// works.
    styles: Vec<Style>,
    /// Spans accumulated for the line being built.
    current: Vec<Span<'static>>,
    /// Per-line prefix (blockquote bar, list bullet indent).
    prefix: String,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    in_code_block: bool,
    /// Stored link URL, appended after the link text closes.
    link_url: Option<String>,
    /// Whether the next block element should be preceded by a blank line.
    needs_blank: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            current: vec![],
            prefix: String::new(),
            list_indices: vec![],
            in_code_block: false,
            link_url: None,
            needs_blank: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, patch: Style) {
        let patched = self.style().patch(patch);
        self.styles.push(patched);
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    /// Finish the line under construction and append it to the output.
    fn flush_line(&mut self) {
        let mut spans = Vec::new();
        if !self.prefix.is_empty() {
            spans.push(Span::styled(
                self.prefix.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.append(&mut self.current);
        self.text.lines.push(Line::from(spans));
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_blank && !self.text.lines.is_empty() {
            self.text.lines.push(Line::default());
        }
        self.needs_blank = false;
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(t) => {
                if self.in_code_block {
                    // Code block text arrives with embedded newlines.
                    let style = Style::default().fg(Color::DarkGray);
                    for line in t.lines() {
                        self.current.push(Span::styled(line.to_string(), style));
                        self.flush_line();
                    }
                } else {
                    self.current.push(Span::styled(t.to_string(), self.style()));
                }
            }
            Event::Code(t) => {
                let style = self
                    .style()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD);
                self.current.push(Span::styled(format!("`{t}`"), style));
            }
            Event::SoftBreak => {
                self.current.push(Span::styled(" ".to_string(), self.style()));
            }
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.blank_line_if_needed();
                self.text.lines.push(Line::from(Span::styled(
                    "───".to_string(),
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_blank = true;
            }
            // Raw HTML is never rendered; escaped text never gets here.
            Event::Html(_) | Event::InlineHtml(_) => {}
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.blank_line_if_needed(),
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                let patch = match level {
                    HeadingLevel::H1 | HeadingLevel::H2 => Style::default()
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    _ => Style::default().add_modifier(Modifier::BOLD),
                };
                self.push_style(patch);
            }
            Tag::BlockQuote(_) => {
                self.blank_line_if_needed();
                self.prefix.push_str("│ ");
            }
            Tag::CodeBlock(_) => {
                self.blank_line_if_needed();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.blank_line_if_needed();
                self.list_indices.push(start);
            }
            Tag::Item => {
                let bullet = match self.list_indices.last_mut() {
                    Some(Some(n)) => {
                        let b = format!("{n}. ");
                        *n += 1;
                        b
                    }
                    _ => "• ".to_string(),
                };
                let indent = "  ".repeat(self.list_indices.len().saturating_sub(1));
                self.current
                    .push(Span::styled(format!("{indent}{bullet}"), self.style()));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.push_style(Style::default().add_modifier(Modifier::UNDERLINED));
                self.link_url = Some(dest_url.to_string());
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_line();
                self.needs_blank = true;
            }
            TagEnd::Heading(_) => {
                self.pop_style();
                self.flush_line();
                self.needs_blank = true;
            }
            TagEnd::BlockQuote(_) => {
                // "│ "
                self.prefix.truncate(self.prefix.len().saturating_sub(4));
                self.needs_blank = true;
            }
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.needs_blank = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_blank = true;
            }
            TagEnd::Item => self.flush_line(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                self.pop_style();
                if let Some(url) = self.link_url.take() {
                    self.current.push(Span::styled(
                        format!(" ({url})"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Text<'static> {
        if !self.current.is_empty() {
            self.flush_line();
        }
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flatten(content: &str) -> String {
        plain_lines(&render(content, Color::Blue)).join("\n")
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(flatten("hello, world"), "hello, world");
    }

    #[test]
    fn test_bold_span_is_styled() {
        let text = render("**important**", Color::Blue);
        let span = &text.lines[0].spans[0];
        assert_eq!(span.content.as_ref(), "important");
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    /// The escaping contract end to end: `&lt;script&gt;` entities decode
    /// back to literal angle brackets in the rendered text, so the viewer
    /// sees `<script>` as text.
    #[test]
    fn test_escaped_markup_renders_literally() {
        let rendered = flatten("&lt;script&gt;alert(1)&lt;/script&gt;");
        assert_eq!(rendered, "<script>alert(1)</script>");
    }

    /// Without escaping, raw HTML would be parsed as markup and dropped —
    /// this is the injection the escape step prevents.
    #[test]
    fn test_raw_html_is_not_rendered() {
        let rendered = flatten("<script>alert(1)</script>");
        assert!(!rendered.contains("script"));
    }

    #[test]
    fn test_unordered_list_bullets() {
        let rendered = flatten("- one\n- two");
        assert!(rendered.contains("• one"));
        assert!(rendered.contains("• two"));
    }

    #[test]
    fn test_ordered_list_numbering() {
        let rendered = flatten("1. first\n2. second");
        assert!(rendered.contains("1. first"));
        assert!(rendered.contains("2. second"));
    }

    #[test]
    fn test_code_block_kept_as_lines() {
        let rendered = flatten("```\nlet x = 1;\nlet y = 2;\n```");
        assert!(rendered.contains("let x = 1;"));
        assert!(rendered.contains("let y = 2;"));
    }

    #[test]
    fn test_link_url_appended_after_text() {
        let rendered = flatten("[docs](https://example.com)");
        assert!(rendered.contains("docs"));
        assert!(rendered.contains("(https://example.com)"));
    }

    #[test]
    fn test_blockquote_prefix() {
        let rendered = flatten("> quoted");
        assert!(rendered.contains("│ quoted"));
    }
}
