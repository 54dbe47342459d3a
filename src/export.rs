//! Markdown-to-HTML export.
//!
//! Rendering is delegated entirely to `pulldown-cmark`, with the GFM
//! extensions the editor's live preview uses (tables, strikethrough, task
//! lists, footnotes).

use pulldown_cmark::{Options, Parser, html};

/// Renders Markdown to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Wraps a rendered fragment into a minimal standalone HTML document.
pub fn to_document(markdown: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        to_html(markdown)
    )
}
