// src/checker/http.rs
// =============================================================================
// This module fetches the page and checks every link found on it.
//
// Key functionality:
// - Fetches the root page with an HTTP GET
// - Hands the HTML to the extractor (html.rs) to get the link targets
// - Requests each target with GET, one after the other
// - Records status code or error plus timing for every link
//
// Failure tiers:
// - Page-level: bad selector, or the page can't be fetched. The whole run
//   gets a single error and no link is checked.
// - Link-level: a request fails. Only that link gets the error; the run
//   continues with the next link.
//
// Rust concepts:
// - async/await: reqwest is async, but we await every request before
//   starting the next, so the run stays strictly sequential
// - Result<T, E> and the ? operator for the page-level steps
// =============================================================================

use super::html::{extract_page, parse_selector, Page, Target};
use super::result::{LinkResult, ResultSet, Timer};
use super::CheckError;
use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, info, warn};

// Builds the HTTP client shared by every request of a run
//
// No timeout is configured; reqwest follows up to 10 redirects by default.
pub fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("link-test/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("failed to create HTTP client")
}

// Checks every link matched by `selector` on the page at `url`
//
// Parameters:
//   client: reqwest HTTP client
//   title: report heading; when empty, the page's <title> is used
//   url: the page holding the links
//   selector: CSS selector picking the link elements
//
// Never fails: problems are recorded in the returned ResultSet.
pub async fn check_page(client: &Client, title: &str, url: &str, selector: &str) -> ResultSet {
    let timer = Timer::start();
    let mut set = ResultSet {
        title: title.to_string(),
        url: url.to_string(),
        selector: selector.to_string(),
        results: Vec::new(),
        error: None,
        started_at: timer.started_at(),
        ended_at: timer.started_at(),
    };

    match load_page(client, url, selector).await {
        Ok(page) => {
            if set.title.is_empty() {
                set.title = if page.title.is_empty() {
                    url.to_string()
                } else {
                    page.title
                };
            }

            info!(count = page.targets.len(), "checking links");
            for target in page.targets {
                let result = check_link(client, target).await;
                set.results.push(result);
            }
        }
        Err(err) => {
            warn!(%url, error = %err, "page could not be checked");
            set.error = Some(err);
        }
    }

    set.ended_at = timer.stop();
    set
}

// Validates the selector, then fetches and parses the page
//
// The selector is checked first so a typo doesn't cost a network round trip.
async fn load_page(client: &Client, url: &str, selector: &str) -> Result<Page, CheckError> {
    let selector = parse_selector(selector)?;
    let html = fetch_document(client, url).await?;
    let page = extract_page(&html, url, &selector);
    debug!(%url, title = %page.title, targets = page.targets.len(), "page parsed");
    Ok(page)
}

// Fetches the HTML of the root page
//
// Only transport and body-read failures are errors. An error status still
// comes with a page, and the links on it get checked like any other.
pub async fn fetch_document(client: &Client, url: &str) -> Result<String, CheckError> {
    debug!(%url, "fetching page");
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        warn!(%url, %status, "page answered with an error status");
    }

    Ok(response.text().await?)
}

// Requests a single link and records what happened
//
// Any HTTP status is recorded as-is (a 404 is a status, not an error).
// The response body is never read.
pub async fn check_link(client: &Client, target: Target) -> LinkResult {
    let timer = Timer::start();
    debug!(url = %target.url, "checking link");

    let (status, error) = match client.get(&target.url).send().await {
        Ok(response) => (Some(response.status().as_u16()), None),
        Err(source) => {
            let error = CheckError::from(source);
            debug!(url = %target.url, %error, "link request failed");
            (None, Some(error))
        }
    };

    LinkResult {
        url: target.url,
        caption: target.caption,
        status,
        error,
        started_at: timer.started_at(),
        ended_at: timer.stop(),
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why async if nothing runs concurrently?
//    - reqwest's main client is async; tokio drives it
//    - main.rs uses the current-thread runtime, and we await each request
//      in a plain for loop, so one request is in flight at a time
//
// 2. Why does check_page return ResultSet instead of Result<ResultSet>?
//    - A failed page is still something to report, not a crash
//    - The error is stored in ResultSet::error and printed like any result
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const PAGE: &str = r#"<html>
        <head><title>Fixture page</title></head>
        <body>
          <ul class="links">
            <li><a href="/ok">Good link</a></li>
            <li><a href="/missing">Gone link</a></li>
            <li><img src="/ok"></li>
            <li><a name="anchor">Not a link</a></li>
          </ul>
        </body>
    </html>"#;

    const ERROR_PAGE: &str = r#"<title>Not found</title><a href="/ok">home</a>"#;

    const UNTITLED_PAGE: &str = r#"<p><a href="/ok">Only link</a></p>"#;

    // Serves PAGE at "/", "fine" at "/ok", UNTITLED_PAGE at "/untitled",
    // ERROR_PAGE with a 404 at "/gone" and a bare 404 everywhere else
    async fn spawn_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let n = socket.read(&mut buf).await.unwrap_or(0);
                    let request = String::from_utf8_lossy(&buf[..n]);
                    let path = request.split_whitespace().nth(1).unwrap_or("/");

                    let (status, body) = match path {
                        "/" => ("200 OK", PAGE),
                        "/ok" => ("200 OK", "fine"),
                        "/untitled" => ("200 OK", UNTITLED_PAGE),
                        "/gone" => ("404 Not Found", ERROR_PAGE),
                        _ => ("404 Not Found", "missing"),
                    };
                    let response = format!(
                        "HTTP/1.1 {}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{}", addr)
    }

    // Nothing listens on port 1, so connecting fails immediately
    const UNREACHABLE: &str = "http://127.0.0.1:1/";

    #[tokio::test]
    async fn test_check_page_against_fixture() {
        let base = spawn_server().await;
        let client = build_client().unwrap();

        let set = check_page(&client, "", &format!("{}/", base), "ul.links a, ul.links img").await;

        assert!(set.error.is_none());
        assert_eq!(set.title, "Fixture page");
        assert_eq!(set.results.len(), 3);

        assert_eq!(set.results[0].url, format!("{}/ok", base));
        assert_eq!(set.results[0].caption, "Good link");
        assert_eq!(set.results[0].status, Some(200));
        assert!(set.results[0].is_ok());

        assert_eq!(set.results[1].caption, "Gone link");
        assert_eq!(set.results[1].status, Some(404));
        assert!(set.results[1].error.is_none());
        assert!(!set.results[1].is_ok());

        assert_eq!(set.results[2].caption, "");
        assert_eq!(set.results[2].status, Some(200));

        assert_eq!(set.ok_count(), 2);
        for result in &set.results {
            assert!(result.ended_at >= result.started_at);
            assert!(result.started_at >= set.started_at);
        }
        assert!(set.ended_at >= set.started_at);
    }

    #[tokio::test]
    async fn test_given_title_is_kept() {
        let base = spawn_server().await;
        let client = build_client().unwrap();

        let set = check_page(&client, "Weekly check", &format!("{}/", base), "a").await;
        assert_eq!(set.title, "Weekly check");
    }

    #[tokio::test]
    async fn test_no_matching_elements() {
        let base = spawn_server().await;
        let client = build_client().unwrap();

        let set = check_page(&client, "", &format!("{}/", base), "table a").await;
        assert!(set.error.is_none());
        assert!(set.results.is_empty());
    }

    #[tokio::test]
    async fn test_root_fetch_failure_short_circuits() {
        let client = build_client().unwrap();

        let set = check_page(&client, "", UNREACHABLE, "a").await;

        assert!(matches!(set.error, Some(CheckError::Request(_))));
        assert!(set.results.is_empty());
        // No document, no <title>: the heading stays as given
        assert_eq!(set.title, "");
        assert!(set.ended_at >= set.started_at);
    }

    #[tokio::test]
    async fn test_error_page_links_are_checked() {
        let base = spawn_server().await;
        let client = build_client().unwrap();

        let set = check_page(&client, "", &format!("{}/gone", base), "a").await;

        assert!(set.error.is_none());
        assert_eq!(set.title, "Not found");
        assert_eq!(set.results.len(), 1);
        assert_eq!(set.results[0].url, format!("{}/ok", base));
        assert_eq!(set.results[0].caption, "home");
        assert_eq!(set.results[0].status, Some(200));
    }

    #[tokio::test]
    async fn test_untitled_page_falls_back_to_url() {
        let base = spawn_server().await;
        let client = build_client().unwrap();
        let url = format!("{}/untitled", base);

        let set = check_page(&client, "", &url, "a").await;

        assert!(set.error.is_none());
        assert_eq!(set.title, url);
        assert_eq!(set.results.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_selector_short_circuits() {
        let client = build_client().unwrap();

        // The URL is unreachable too: the selector error must win
        let set = check_page(&client, "t", UNREACHABLE, "a[").await;
        assert!(matches!(set.error, Some(CheckError::InvalidSelector { .. })));
        assert!(set.results.is_empty());
    }

    #[tokio::test]
    async fn test_link_failure_is_recorded() {
        let client = build_client().unwrap();
        let target = Target {
            url: UNREACHABLE.to_string(),
            caption: "Down".to_string(),
        };

        let result = check_link(&client, target).await;

        assert_eq!(result.status, None);
        assert!(matches!(result.error, Some(CheckError::Request(_))));
        assert!(result.ended_at >= result.started_at);
        assert!(!result.is_ok());
    }
}
