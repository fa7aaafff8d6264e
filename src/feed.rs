//! Feed download and XML deserialization.

use std::time::Duration;

use crate::data::{Item, Rss};
use crate::error::FeedError;

/// User-Agent sent with every feed request.
pub const USER_AGENT: &str = "ipsw-timeline-cli/1.0 (+https://ipsw.me)";

/// Download the feed body as text. Non-2xx statuses are errors; the body is
/// returned untouched for [`parse_feed`].
pub async fn fetch_feed(url: &str, timeout: Duration) -> Result<String, FeedError> {
    let client = reqwest::Client::builder()
        .brotli(true)
        .gzip(true)
        .use_rustls_tls()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status(status));
    }

    Ok(response.text().await?)
}

/// Deserialize an RSS document into its items. Missing channels or items
/// come back as an empty list; only malformed XML is an error.
pub fn parse_feed(xml: &str) -> Result<Vec<Item>, FeedError> {
    let rss: Rss = quick_xml::de::from_str(xml)?;
    Ok(rss.channel.items)
}
