//! Markdown rendering with blog-specific heading and code overrides

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use super::toc::heading_id;

/// Markdown renderer producing the HTML injected into the post view.
///
/// Three rules are overridden on top of the stock conversion: headings get a
/// stable slug id, fenced code blocks get a container for the copy-button
/// affordance, and inline code gets its own class. The output is NOT
/// sanitized; documents are authored by the site owner, and that trust
/// assumption must be revisited before rendering anything user-submitted.
pub struct MarkdownRenderer {
    /// Render soft line breaks as `<br>` (the original site's behavior)
    break_on_newline: bool,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            break_on_newline: true,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut in_code_block = false;
        let mut code_lang: Option<String> = None;
        let mut code_text = String::new();
        let mut heading: Option<(HeadingLevel, String)> = None;

        for event in parser {
            if in_code_block {
                match event {
                    Event::End(TagEnd::CodeBlock) => {
                        in_code_block = false;
                        events.push(Event::Html(CowStr::from(code_block_html(
                            &code_text,
                            code_lang.as_deref(),
                        ))));
                        code_lang = None;
                    }
                    Event::Text(text) => code_text.push_str(&text),
                    _ => {}
                }
                continue;
            }

            if heading.is_some() {
                // Buffer the heading's visible text; inline markup events
                // are dropped so the emitted tag carries plain text only.
                match event {
                    Event::End(TagEnd::Heading(_)) => {
                        if let Some((level, text)) = heading.take() {
                            events.push(Event::Html(CowStr::from(heading_html(level, &text))));
                        }
                    }
                    Event::Text(t) => {
                        if let Some((_, text)) = heading.as_mut() {
                            text.push_str(&t);
                        }
                    }
                    Event::Code(c) => {
                        if let Some((_, text)) = heading.as_mut() {
                            text.push_str(&c);
                        }
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    in_code_block = true;
                    code_text.clear();
                    code_lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    heading = Some((level, String::new()));
                }
                Event::Code(code) => {
                    events.push(Event::Html(CowStr::from(format!(
                        r#"<code class="inline-code">{}</code>"#,
                        html_escape(&code)
                    ))));
                }
                Event::SoftBreak if self.break_on_newline => events.push(Event::HardBreak),
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn heading_html(level: HeadingLevel, text: &str) -> String {
    let depth = heading_depth(level);
    let id = heading_id(text);
    format!(
        r#"<h{depth} id="{id}" class="heading-anchor">{}</h{depth}>"#,
        html_escape(text)
    )
}

/// Scaffold a later DOM pass hangs the copy-to-clipboard button on
fn code_block_html(code: &str, lang: Option<&str>) -> String {
    let lang = lang.unwrap_or("plaintext");
    format!(
        r#"<div class="code-block-container group relative"><pre class="language-{lang}"><code class="language-{lang}">{}</code></pre></div>"#,
        html_escape(code)
    )
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains(r#"<h1 id="hello-world" class="heading-anchor">Hello World</h1>"#));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_heading_with_inline_markup() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("## Using `serde` in *anger*");
        assert!(html.contains(
            r#"<h2 id="using-serde-in-anger" class="heading-anchor">Using serde in anger</h2>"#
        ));
    }

    #[test]
    fn test_duplicate_heading_ids_collide() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Setup\n\ntext\n\n# Setup\n");
        assert_eq!(html.matches(r#"id="setup""#).count(), 2);
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() { println!(\"<hi>\"); }\n```");
        assert!(html.contains(r#"<div class="code-block-container group relative">"#));
        assert!(html.contains(r#"<pre class="language-rust">"#));
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains("&lt;hi&gt;"));
        assert!(!html.contains("<hi>"));
    }

    #[test]
    fn test_unlabeled_code_block_is_plaintext() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\nsome text\n```");
        assert!(html.contains(r#"<code class="language-plaintext">"#));
    }

    #[test]
    fn test_inline_code() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("Use `cargo build` here.");
        assert!(html.contains(r#"<code class="inline-code">cargo build</code>"#));
    }

    #[test]
    fn test_soft_breaks_become_hard_breaks() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("line one\nline two");
        assert!(html.contains("<br"));
    }

    #[test]
    fn test_gfm_table() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_strikethrough() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("~~gone~~");
        assert!(html.contains("<del>"));
    }
}
