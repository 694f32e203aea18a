//! Built-in HTML layout.
//!
//! Renders a page body plus the site chrome: header with the primary nav,
//! footer with the secondary nav, and (for the `posts` layout) the
//! chronological post listing. This is where nav entries and the post list
//! are consumed; there is no user-facing template language.

use crate::config::SiteConfig;
use crate::content::frontmatter::Layout;
use crate::content::meta::PageMeta;
use crate::site::nav::{NavEntry, SiteNav};
use crate::site::url::is_current_url;
use std::borrow::Cow;
use std::fmt::Write;

// ============================================================================
// Page Shell
// ============================================================================

/// Render a full HTML document for one page.
pub fn render_page(
    page: &PageMeta,
    posts: &[&PageMeta],
    nav: &SiteNav,
    config: &SiteConfig,
) -> String {
    let site_title = &config.base.title;
    let page_title = page
        .front
        .as_ref()
        .and_then(|front| front.title.as_deref())
        .unwrap_or(site_title);
    let layout = page
        .front
        .as_ref()
        .map(|front| front.layout)
        .unwrap_or_default();

    let mut html = String::with_capacity(page.html_body.len() + 2048);

    html.push_str("<!doctype html>\n");
    let _ = writeln!(html, "<html lang=\"{}\">", html_escape(&config.base.language));
    html.push_str("<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    if page_title == site_title {
        let _ = writeln!(html, "<title>{}</title>", html_escape(site_title));
    } else {
        let _ = writeln!(
            html,
            "<title>{} | {}</title>",
            html_escape(page_title),
            html_escape(site_title)
        );
    }
    if !config.base.description.is_empty() {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            html_escape(&config.base.description)
        );
    }
    render_head_links(&mut html, config);
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    render_nav(&mut html, &nav.primary, "nav-primary", &page.url);
    html.push_str("</header>\n");

    html.push_str("<main>\n");
    html.push_str(&page.html_body);
    if layout == Layout::Posts {
        render_post_list(&mut html, posts);
    }
    html.push_str("</main>\n");

    html.push_str("<footer>\n");
    render_nav(&mut html, &nav.secondary, "nav-secondary", &page.url);
    if !config.base.copyright.is_empty() {
        let _ = writeln!(
            html,
            "<p class=\"copyright\">{}</p>",
            html_escape(&config.base.copyright)
        );
    }
    html.push_str("</footer>\n</body>\n</html>\n");

    html
}

/// Emit favicon, stylesheet and script tags from `[build.head]`.
fn render_head_links(html: &mut String, config: &SiteConfig) {
    let head = &config.build.head;

    if let Some(icon) = &head.icon {
        let _ = writeln!(html, "<link rel=\"icon\" href=\"{}\">", html_escape(icon));
    }
    for style in &head.styles {
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" href=\"{}\">",
            html_escape(style)
        );
    }
    for script in &head.scripts {
        let mut attrs = String::new();
        if script.is_defer() {
            attrs.push_str(" defer");
        }
        if script.is_async() {
            attrs.push_str(" async");
        }
        let _ = writeln!(
            html,
            "<script src=\"{}\"{attrs}></script>",
            html_escape(script.path())
        );
    }
}

// ============================================================================
// Navigation Markup
// ============================================================================

/// Emit one `<nav>` list; the entry pointing at the current page gets the
/// `active` class and `aria-current`.
fn render_nav(html: &mut String, entries: &[NavEntry], class: &str, page_url: &str) {
    if entries.is_empty() {
        return;
    }

    let _ = writeln!(html, "<nav class=\"{class}\">\n<ul>");
    for entry in entries {
        let _ = write!(html, "<li><a href=\"{}\"", html_escape(&entry.url));
        if is_current_url(&entry.url, page_url) {
            html.push_str(" class=\"active\" aria-current=\"page\"");
        }
        if entry.external {
            html.push_str(" rel=\"noopener\" target=\"_blank\"");
        }
        let _ = writeln!(html, ">{}</a></li>", html_escape(&entry.title));
    }
    html.push_str("</ul>\n</nav>\n");
}

// ============================================================================
// Post Listing Markup
// ============================================================================

/// Emit the chronological post listing for the `posts` layout.
fn render_post_list(html: &mut String, posts: &[&PageMeta]) {
    html.push_str("<section class=\"post-list\">\n<ul>\n");
    for post in posts {
        let front = post.front.as_ref();
        let title = front
            .and_then(|front| front.title.as_deref())
            .unwrap_or_else(|| post.file_slug());

        html.push_str("<li>");
        if let Some(date) = front.and_then(|front| front.date) {
            let _ = write!(
                html,
                "<time datetime=\"{}\">{}</time> ",
                date.to_ymd(),
                date.to_readable()
            );
        }
        let _ = writeln!(
            html,
            "<a href=\"{}\">{}</a></li>",
            html_escape(&post.url),
            html_escape(title)
        );
    }
    html.push_str("</ul>\n</section>\n");
}

// ============================================================================
// Escaping
// ============================================================================

/// Escape HTML special characters.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
#[inline]
fn html_escape(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['<', '>', '&', '"']) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::frontmatter::FrontMatter;
    use crate::utils::date::DateTimeUtc;
    use std::path::PathBuf;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.base.title = "Acme Inc".into();
        config.base.description = "Product news".into();
        config.build.content = PathBuf::from("content");
        config.build.output = PathBuf::from("public");
        config
    }

    fn page(source: &str, front: FrontMatter, body: &str) -> PageMeta {
        PageMeta::from_source(
            PathBuf::from(source),
            &test_config(),
            Some(front),
            body.to_owned(),
        )
        .unwrap()
    }

    fn titled(title: &str) -> FrontMatter {
        FrontMatter {
            title: Some(title.to_owned()),
            ..FrontMatter::default()
        }
    }

    fn entry(title: &str, url: &str) -> NavEntry {
        NavEntry {
            title: title.to_owned(),
            url: url.to_owned(),
            order: None,
            external: false,
        }
    }

    #[test]
    fn test_render_page_shell() {
        let config = test_config();
        let page = page("content/about.md", titled("About"), "<p>Body here</p>");
        let nav = SiteNav {
            primary: vec![entry("About", "/about/")],
            secondary: vec![],
        };

        let html = render_page(&page, &[], &nav, &config);

        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<title>About | Acme Inc</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"Product news\">"));
        assert!(html.contains("<p>Body here</p>"));
        assert!(html.contains("</html>"));
    }

    #[test]
    fn test_active_entry_marked() {
        let config = test_config();
        let page = page("content/about.md", titled("About"), "");
        let nav = SiteNav {
            primary: vec![entry("About", "/about/"), entry("Contact", "/contact/")],
            secondary: vec![],
        };

        let html = render_page(&page, &[], &nav, &config);

        assert!(html.contains(
            "<a href=\"/about/\" class=\"active\" aria-current=\"page\">About</a>"
        ));
        assert!(html.contains("<a href=\"/contact/\">Contact</a>"));
    }

    #[test]
    fn test_external_entry_attributes() {
        let config = test_config();
        let page = page("content/index.md", titled("Home"), "");
        let nav = SiteNav {
            primary: vec![NavEntry {
                title: "Docs".into(),
                url: "https://docs.example.com".into(),
                order: None,
                external: true,
            }],
            secondary: vec![],
        };

        let html = render_page(&page, &[], &nav, &config);
        assert!(html.contains("rel=\"noopener\" target=\"_blank\""));
    }

    #[test]
    fn test_empty_nav_omitted() {
        let config = test_config();
        let page = page("content/index.md", titled("Home"), "");
        let nav = SiteNav::default();

        let html = render_page(&page, &[], &nav, &config);
        assert!(!html.contains("<nav"));
    }

    #[test]
    fn test_posts_layout_lists_posts() {
        let config = test_config();
        let mut front = titled("Blog");
        front.layout = Layout::Posts;
        let index = page("content/blog.md", front, "<p>intro</p>");

        let mut post_front = titled("Launch Day");
        post_front.tags = vec!["post".into()];
        post_front.date = DateTimeUtc::parse("2025-01-15");
        let post = page("content/posts/launch.md", post_front, "");

        let html = render_page(&index, &[&post], &SiteNav::default(), &config);

        assert!(html.contains("<section class=\"post-list\">"));
        assert!(html.contains("<time datetime=\"2025-01-15\">15 Jan 2025</time>"));
        assert!(html.contains("<a href=\"/posts/launch/\">Launch Day</a>"));
    }

    #[test]
    fn test_default_layout_has_no_post_list() {
        let config = test_config();
        let index = page("content/index.md", titled("Home"), "");
        let post = page("content/posts/a.md", titled("A"), "");

        let html = render_page(&index, &[&post], &SiteNav::default(), &config);
        assert!(!html.contains("post-list"));
    }

    #[test]
    fn test_undated_post_has_no_time_tag() {
        let config = test_config();
        let mut front = titled("Blog");
        front.layout = Layout::Posts;
        let index = page("content/blog.md", front, "");

        let mut post_front = titled("Undated");
        post_front.tags = vec!["post".into()];
        let post = page("content/posts/undated.md", post_front, "");

        let html = render_page(&index, &[&post], &SiteNav::default(), &config);
        assert!(!html.contains("<time"));
        assert!(html.contains("Undated"));
    }

    #[test]
    fn test_titles_escaped() {
        let config = test_config();
        let page = page("content/index.md", titled("Home"), "");
        let nav = SiteNav {
            primary: vec![entry("R&D <Lab>", "/rd/")],
            secondary: vec![],
        };

        let html = render_page(&page, &[], &nav, &config);
        assert!(html.contains("R&amp;D &lt;Lab&gt;"));
    }

    #[test]
    fn test_head_links_rendered() {
        let mut config = test_config();
        config.build.head.icon = Some("/favicon.ico".into());
        config.build.head.styles = vec!["/static/css/main.css".into()];
        config.build.head.scripts = vec![crate::config::ScriptEntry::WithOptions {
            path: "/static/js/alpine.js".into(),
            defer: true,
            r#async: false,
        }];

        let page = page("content/index.md", titled("Home"), "");
        let html = render_page(&page, &[], &SiteNav::default(), &config);

        assert!(html.contains("<link rel=\"icon\" href=\"/favicon.ico\">"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"/static/css/main.css\">"));
        assert!(html.contains("<script src=\"/static/js/alpine.js\" defer></script>"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("hello world"), "hello world");
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(html_escape(""), "");
    }
}
