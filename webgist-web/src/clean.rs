//! Boilerplate-stripping extraction of readable page text.

use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{Html, Node, Selector};

use webgist_common::ParseError;

use crate::fetch::SourceDocument;

/// Tags whose subtrees contribute nothing to the rendered text.
const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "head", "nav", "header", "footer", "aside",
];

/// Plain text extracted from a page, bounded by the configured budget.
///
/// An empty `text` is valid: it means the page parsed fine but carried no
/// readable content, which downstream stages report distinctly from fetch or
/// parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanContent {
    pub url: String,
    pub text: String,
    pub title: Option<String>,
}

/// Convert raw markup into bounded plain text.
///
/// Scripts, styles, navigation landmarks, and hidden elements are dropped;
/// remaining text nodes are concatenated in document order with whitespace
/// runs collapsed to single spaces. The result is silently truncated to
/// `max_chars` characters, preferring a word boundary.
pub fn clean(doc: &SourceDocument, max_chars: usize) -> Result<CleanContent, ParseError> {
    if doc.raw_html.trim().is_empty() {
        return Err(ParseError::Unparsable("empty document".into()));
    }

    let html = Html::parse_document(&doc.raw_html);

    let title = extract_title(&html);
    let mut raw_text = String::new();
    if let Ok(body_selector) = Selector::parse("body") {
        if let Some(body) = html.select(&body_selector).next() {
            collect_visible_text(*body, &mut raw_text);
        } else {
            collect_visible_text(html.tree.root(), &mut raw_text);
        }
    }

    let collapsed = raw_text.split_whitespace().collect::<Vec<_>>().join(" ");
    let text = truncate_chars(&collapsed, max_chars);

    tracing::debug!(
        url = %doc.url,
        chars = text.chars().count(),
        truncated = collapsed.chars().count() > max_chars,
        "clean.done"
    );

    Ok(CleanContent {
        url: doc.url.clone(),
        text,
        title,
    })
}

fn extract_title(html: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    html.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Depth-first walk over the subtree, skipping boilerplate and hidden
/// elements, appending text nodes in document order.
fn collect_visible_text(root: NodeRef<'_, Node>, out: &mut String) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(text) => {
                out.push_str(&text);
                out.push(' ');
                continue;
            }
            Node::Element(el) if is_invisible(&el) => continue,
            _ => {}
        }
        // Reverse so document order survives the LIFO stack.
        let children: Vec<_> = node.children().collect();
        for child in children.into_iter().rev() {
            stack.push(child);
        }
    }
}

fn is_invisible(el: &Element) -> bool {
    if BOILERPLATE_TAGS.contains(&el.name()) {
        return true;
    }
    if el.attr("hidden").is_some() {
        return true;
    }
    if el.attr("aria-hidden") == Some("true") {
        return true;
    }
    if let Some(style) = el.attr("style") {
        let compact: String = style.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.to_ascii_lowercase().contains("display:none") {
            return true;
        }
    }
    false
}

/// Truncate to at most `max_chars` characters, backing up to the previous
/// word boundary when one exists. Deterministic and silent: truncation is
/// policy, not an error.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    match cut.rfind(' ') {
        Some(idx) if idx > 0 => cut[..idx].trim_end().to_string(),
        _ => cut,
    }
}
