use chrono::{NaiveDateTime, Utc};

use crate::server::{error::Error, util::time::parse_rfc2822};

/// An RSS item reduced to what player news stores.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedItem {
    pub title: String,
    pub description: Option<String>,
    pub link: Option<String>,
    /// Title of the channel the item came from
    pub source: String,
    pub published_at: NaiveDateTime,
}

impl FeedItem {
    /// Text searched for player names.
    pub fn match_text(&self) -> String {
        match &self.description {
            Some(description) => format!("{} {}", self.title, description),
            None => self.title.clone(),
        }
    }
}

/// Downloads and parses an RSS feed.
pub async fn fetch_feed(http: &reqwest::Client, url: &str) -> Result<Vec<FeedItem>, Error> {
    let body = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    let channel = rss::Channel::read_from(&body[..])?;

    Ok(feed_items(&channel))
}

/// Items of a channel that have a title. Items without a parsable date are dated now.
pub fn feed_items(channel: &rss::Channel) -> Vec<FeedItem> {
    let source = channel.title().to_string();

    channel
        .items()
        .iter()
        .filter_map(|item| {
            let title = item.title()?.trim();
            if title.is_empty() {
                return None;
            }

            Some(FeedItem {
                title: title.to_string(),
                description: item.description().map(str::to_string),
                link: item.link().map(str::to_string),
                source: source.clone(),
                published_at: item
                    .pub_date()
                    .and_then(parse_rfc2822)
                    .unwrap_or_else(|| Utc::now().naive_utc()),
            })
        })
        .collect()
}
