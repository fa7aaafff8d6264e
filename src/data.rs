use serde::Deserialize;
use serde::Serialize;

/// Raw RSS 2.0 document, as served by the timeline feed.
///
/// Every field defaults to empty when the element is missing, so a sparse or
/// oddly shaped (but well-formed) document deserializes to empty data rather
/// than an error. Only malformed XML fails.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rss {
    #[serde(default)]
    pub channel: Channel,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(default, rename = "item")]
    pub items: Vec<Item>,
}

/// One unprocessed feed item. Consumed once by the normalizer, then dropped.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, rename = "pubDate")]
    pub pub_date: String,
    #[serde(default)]
    pub guid: String,
    #[serde(default)]
    pub description: String,
}
