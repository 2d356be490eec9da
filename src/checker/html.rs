// src/checker/html.rs
// =============================================================================
// This module extracts link targets from an HTML page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to resolve relative links against the page URL.
//
// The parsed document (scraper::Html) never leaves this module. Callers get
// back plain owned data (Page / Target), so nothing borrowed from the DOM
// is held while we wait on the network.
// =============================================================================

use super::CheckError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

// A link found on the page, ready to be checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub url: String,
    pub caption: String,
}

// Everything we need from the page once it has been parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Text of the first <title> element, empty if there is none
    pub title: String,
    /// Links of the selected elements, in document order
    pub targets: Vec<Target>,
}

// Parses the user's CSS selector
//
// scraper's error type borrows the selector text, so we turn it into an
// owned CheckError right away.
pub fn parse_selector(selector: &str) -> Result<Selector, CheckError> {
    Selector::parse(selector).map_err(|e| CheckError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

// Returns the link of an element: its href, or failing that its src
//
// Examples:
//   <a href="/docs">        -> Some("/docs")
//   <img src="logo.png">    -> Some("logo.png")
//   <a name="top">          -> None
pub fn find_link<'a>(element: &ElementRef<'a>) -> Option<&'a str> {
    let element = element.value();
    element.attr("href").or_else(|| element.attr("src"))
}

// Extracts the title and the link targets of the selected elements
//
// Parameters:
//   html: the HTML content to parse
//   base_url: the URL of the page (for resolving relative links)
//   selector: which elements to take links from
//
// Elements without href/src are skipped silently.
pub fn extract_page(html: &str, base_url: &str, selector: &Selector) -> Page {
    let document = Html::parse_document(html);
    let base = Url::parse(base_url).ok();

    let targets = document
        .select(selector)
        .filter_map(|element| {
            let link = find_link(&element)?;
            Some(Target {
                url: resolve_url(base.as_ref(), link),
                caption: caption_of(&element),
            })
        })
        .collect();

    Page {
        title: title_of(&document),
        targets,
    }
}

// Resolves a possibly-relative link against the page URL
//
// If it can't be resolved we keep the raw value; the request made with it
// will fail and that failure ends up in the report.
fn resolve_url(base: Option<&Url>, link: &str) -> String {
    match base.map(|base| base.join(link)) {
        Some(Ok(url)) => url.to_string(),
        _ => link.to_string(),
    }
}

// All text under the element, whitespace collapsed
fn caption_of(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_of(document: &Html) -> String {
    // "title" always parses, but we'd rather not unwrap
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|title| caption_of(&title))
        .unwrap_or_default()
}
