//! Markdown rendering via pulldown-cmark.
//!
//! The renderer option set mirrors `[build.markdown]`: raw-HTML passthrough,
//! newline-to-`<br>` promotion, bare-URL autolinking, and pipe tables.
//! Options that pulldown-cmark does not expose directly (`breaks`,
//! `linkify`, `html = false`) are applied as transformations over the event
//! stream before HTML serialization.

use crate::config::MarkdownConfig;
use pulldown_cmark::{CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, html::push_html};
use regex::Regex;
use std::sync::LazyLock;

/// Bare URL matcher for `linkify`. Trailing punctuation is trimmed after
/// matching so sentence-final URLs stay clean.
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"]+"#).expect("static regex"));

/// Render a Markdown body to HTML.
pub fn render(markdown: &str, options: &MarkdownConfig) -> String {
    let mut parser_options = Options::empty();
    if options.tables {
        parser_options |= Options::ENABLE_TABLES;
    }

    let parser = Parser::new_ext(markdown, parser_options);
    let events = transform(parser, options);

    let mut html = String::with_capacity(markdown.len() * 2);
    push_html(&mut html, events.into_iter());
    html
}

/// Walk the event stream and apply the configured option transforms.
///
/// Autolinking is suppressed inside code blocks and existing links; inline
/// code is a single `Code` event and never reaches the text arm.
fn transform<'a>(parser: Parser<'a>, options: &MarkdownConfig) -> Vec<Event<'a>> {
    let mut events: Vec<Event<'a>> = Vec::new();
    let mut code_depth = 0usize;
    let mut link_depth = 0usize;

    for event in parser {
        match event {
            Event::SoftBreak if options.breaks => events.push(Event::HardBreak),
            Event::Html(html) if !options.html => events.push(Event::Text(html)),
            Event::InlineHtml(html) if !options.html => events.push(Event::Text(html)),
            Event::Start(tag) => {
                match &tag {
                    Tag::CodeBlock(_) => code_depth += 1,
                    Tag::Link { .. } => link_depth += 1,
                    _ => {}
                }
                events.push(Event::Start(tag));
            }
            Event::End(tag) => {
                match &tag {
                    TagEnd::CodeBlock => code_depth = code_depth.saturating_sub(1),
                    TagEnd::Link => link_depth = link_depth.saturating_sub(1),
                    _ => {}
                }
                events.push(Event::End(tag));
            }
            Event::Text(text)
                if options.linkify
                    && code_depth == 0
                    && link_depth == 0
                    && URL_RE.is_match(&text) =>
            {
                linkify_text(&text, &mut events);
            }
            other => events.push(other),
        }
    }

    events
}

/// Split a text run around bare URLs, emitting autolink events for each.
fn linkify_text<'a>(text: &str, events: &mut Vec<Event<'a>>) {
    let mut last = 0;

    for found in URL_RE.find_iter(text) {
        let url = trim_trailing_punctuation(found.as_str());
        let end = found.start() + url.len();

        if found.start() > last {
            events.push(Event::Text(text[last..found.start()].to_owned().into()));
        }

        let url: CowStr<'a> = url.to_owned().into();
        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: url.clone(),
            title: "".into(),
            id: "".into(),
        }));
        events.push(Event::Text(url));
        events.push(Event::End(TagEnd::Link));

        last = end;
    }

    if last < text.len() {
        events.push(Event::Text(text[last..].to_owned().into()));
    }
}

/// Trim sentence punctuation from the end of a matched URL.
fn trim_trailing_punctuation(url: &str) -> &str {
    url.trim_end_matches(['.', ',', ';', ':', '!', '?', ')'])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> MarkdownConfig {
        MarkdownConfig {
            html: true,
            breaks: true,
            linkify: true,
            tables: true,
        }
    }

    #[test]
    fn test_basic_paragraph() {
        let html = render("Hello **world**", &options());
        assert!(html.contains("<p>Hello <strong>world</strong></p>"));
    }

    #[test]
    fn test_breaks_enabled() {
        let html = render("line one\nline two", &options());
        assert!(html.contains("<br"));
    }

    #[test]
    fn test_breaks_disabled() {
        let mut opts = options();
        opts.breaks = false;
        let html = render("line one\nline two", &opts);
        assert!(!html.contains("<br"));
    }

    #[test]
    fn test_raw_html_passthrough() {
        let html = render("before\n\n<div class=\"x\">raw</div>\n\nafter", &options());
        assert!(html.contains("<div class=\"x\">raw</div>"));
    }

    #[test]
    fn test_raw_html_escaped_when_disabled() {
        let mut opts = options();
        opts.html = false;
        let html = render("before\n\n<div>raw</div>\n\nafter", &opts);
        assert!(!html.contains("<div>raw</div>"));
        assert!(html.contains("&lt;div&gt;"));
    }

    #[test]
    fn test_inline_html_escaped_when_disabled() {
        let mut opts = options();
        opts.html = false;
        let html = render("a <em>b</em> c", &opts);
        assert!(html.contains("&lt;em&gt;"));
    }

    #[test]
    fn test_linkify_bare_url() {
        let html = render("visit https://example.com today", &options());
        assert!(html.contains(r#"<a href="https://example.com">https://example.com</a>"#));
    }

    #[test]
    fn test_linkify_disabled() {
        let mut opts = options();
        opts.linkify = false;
        let html = render("visit https://example.com today", &opts);
        assert!(!html.contains("<a href"));
    }

    #[test]
    fn test_linkify_trims_sentence_punctuation() {
        let html = render("see https://example.com/docs.", &options());
        assert!(html.contains(r#"<a href="https://example.com/docs">"#));
        assert!(html.contains("</a>."));
    }

    #[test]
    fn test_linkify_skips_inline_code() {
        let html = render("run `curl https://example.com` locally", &options());
        assert!(!html.contains("<a href"));
        assert!(html.contains("<code>"));
    }

    #[test]
    fn test_linkify_skips_code_blocks() {
        let html = render("```\nhttps://example.com\n```", &options());
        assert!(!html.contains("<a href"));
    }

    #[test]
    fn test_linkify_skips_existing_links() {
        let html = render("[docs](https://example.com)", &options());
        assert_eq!(html.matches("<a href").count(), 1);
    }

    #[test]
    fn test_linkify_multiple_urls() {
        let html = render("both https://a.example and https://b.example here", &options());
        assert!(html.contains(r#"<a href="https://a.example">"#));
        assert!(html.contains(r#"<a href="https://b.example">"#));
    }

    #[test]
    fn test_tables_enabled() {
        let html = render("| a | b |\n| - | - |\n| 1 | 2 |", &options());
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_tables_disabled() {
        let mut opts = options();
        opts.tables = false;
        let html = render("| a | b |\n| - | - |\n| 1 | 2 |", &opts);
        assert!(!html.contains("<table>"));
    }
}
