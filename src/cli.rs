// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// URL and selector are not marked `required` on purpose: an empty value
// must behave like a missing one, which clap can't express. main.rs checks
// both through `Cli::target()` and prints the usage text if either is blank.
// =============================================================================

use clap::{ArgAction, Parser};

/// Heading used when --title is not given
pub const DEFAULT_TITLE: &str = "Link check report";

#[derive(Parser, Debug)]
#[command(
    name = "link-test",
    version,
    about = "Checks that the links selected on a web page are alive",
    long_about = "link-test fetches one page, selects elements with a CSS selector, \
                  requests the href (or src) of each one and prints a report with \
                  the status and timing of every link."
)]
pub struct Cli {
    /// Report heading (pass an empty string to use the page's <title>)
    #[arg(short, long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// URL of the page holding the links
    #[arg(short, long)]
    pub url: Option<String>,

    /// CSS selector matching the link elements (e.g. "ul.partners a")
    #[arg(short, long)]
    pub selector: Option<String>,

    /// Print more logs on stderr (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Returns (url, selector) when both were given and are non-empty
    pub fn target(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().filter(|s| !s.is_empty())?;
        let selector = self.selector.as_deref().filter(|s| !s.is_empty())?;
        Some((url, selector))
    }
}
