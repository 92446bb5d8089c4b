//! Markdown rendering for assistant turns.
//!
//! Model output is untrusted: raw inline/block HTML is dropped before
//! rendering, and link/image targets outside `http`, `https`, `mailto` and
//! relative URLs are blanked. Tables are wrapped in a horizontally scrollable container and
//! fenced code blocks with a known language are syntax highlighted.

#[cfg(test)]
#[path = "markdown_test.rs"]
mod markdown_test;

use std::sync::OnceLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;

const CODE_THEME: &str = "base16-ocean.dark";
const TABLE_OPEN: &str = "<div class=\"gw-md-table\">";
const TABLE_CLOSE: &str = "</div>";
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Render markdown to sanitized HTML.
pub fn render_markdown_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, decorate(parser).into_iter());
    out
}

/// Rewrite the event stream: wrap tables, highlight fenced code, blank unsafe URLs.
fn decorate<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut code: Option<CodeCapture<'a>> = None;

    for event in events {
        if code.is_some() {
            match event {
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(capture) = code.take() {
                        capture.finish(&mut out);
                    }
                }
                Event::Text(text) => {
                    if let Some(capture) = code.as_mut() {
                        capture.text.push_str(&text);
                    }
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) => {
                code = Some(CodeCapture { info, text: String::new() });
            }
            Event::Start(Tag::Table(alignments)) => {
                out.push(Event::Html(CowStr::Borrowed(TABLE_OPEN)));
                out.push(Event::Start(Tag::Table(alignments)));
            }
            Event::End(TagEnd::Table) => {
                out.push(Event::End(TagEnd::Table));
                out.push(Event::Html(CowStr::Borrowed(TABLE_CLOSE)));
            }
            Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                let dest_url = safe_url(dest_url);
                out.push(Event::Start(Tag::Link { link_type, dest_url, title, id }));
            }
            Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
                let dest_url = safe_url(dest_url);
                out.push(Event::Start(Tag::Image { link_type, dest_url, title, id }));
            }
            other => out.push(other),
        }
    }

    if let Some(capture) = code.take() {
        capture.finish(&mut out);
    }
    out
}

/// Keep relative URLs and allowed schemes; anything else becomes empty.
fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let allowed = match url_scheme(&url) {
        None => true,
        Some(scheme) => ALLOWED_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)),
    };
    if allowed {
        return url;
    }
    log::debug!("blanked link target with disallowed scheme");
    CowStr::Borrowed("")
}

/// Text before the first `:` when no path, query or fragment starts earlier.
fn url_scheme(url: &str) -> Option<&str> {
    let colon = url.find(':')?;
    let prefix = &url[..colon];
    if prefix.contains(['/', '?', '#']) {
        return None;
    }
    Some(prefix.trim())
}

struct CodeCapture<'a> {
    info: CowStr<'a>,
    text: String,
}

impl<'a> CodeCapture<'a> {
    /// Emit highlighted HTML, or the plain fenced block when the language
    /// is missing or unknown.
    fn finish(self, out: &mut Vec<Event<'a>>) {
        if let Some(highlighted) = highlight_code(&self.text, code_language(&self.info)) {
            out.push(Event::Html(CowStr::from(highlighted)));
            return;
        }
        out.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(self.info))));
        out.push(Event::Text(CowStr::from(self.text)));
        out.push(Event::End(TagEnd::CodeBlock));
    }
}

/// First word of a fence info string (`rust,ignore` and `rust ignore` → `rust`).
fn code_language(info: &str) -> &str {
    info.split(|c: char| c.is_whitespace() || c == ',')
        .next()
        .unwrap_or_default()
}

/// Highlight `code` as `language`, or `None` when the language is unknown.
fn highlight_code(code: &str, language: &str) -> Option<String> {
    if language.is_empty() {
        return None;
    }
    let syntaxes = syntax_set();
    let syntax = syntaxes.find_syntax_by_token(language)?;
    let theme = code_theme()?;
    let body = code.strip_suffix('\n').unwrap_or(code);
    match syntect::html::highlighted_html_for_string(body, syntaxes, syntax, theme) {
        Ok(rendered) => Some(format!("<div class=\"gw-code\" data-lang=\"{}\">{rendered}</div>", syntax.name)),
        Err(e) => {
            log::debug!("highlight failed for {language}: {e}");
            None
        }
    }
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAXES: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAXES.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn code_theme() -> Option<&'static Theme> {
    static THEMES: OnceLock<ThemeSet> = OnceLock::new();
    THEMES.get_or_init(ThemeSet::load_defaults).themes.get(CODE_THEME)
}
