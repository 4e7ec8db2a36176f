//! Player news ingestion from RSS feeds.
//!
//! Each run collects the players worth following, scans every configured feed for their names
//! and stores one news row per (player, headline). Feeds and individual writes fail
//! independently: a broken feed is skipped, a failed write is counted, the run carries on.

pub mod feed;
pub mod matcher;

use std::collections::HashSet;

use futures::stream::{FuturesUnordered, StreamExt};
use sea_orm::DatabaseConnection;

use crate::{
    model::news::IngestionSummary,
    server::{
        data::{
            news::{CreatePlayerNewsParams, PlayerNewsRepository},
            player::PlayerRepository,
        },
        error::Error,
        service::news::{
            feed::{fetch_feed, FeedItem},
            matcher::PlayerMatcher,
        },
    },
};

/// News rows written at once
pub const NEWS_WRITE_CONCURRENCY: usize = 5;

enum WriteOutcome {
    Inserted,
    Skipped,
    Failed,
}

pub struct NewsService<'a> {
    db: &'a DatabaseConnection,
    http: &'a reqwest::Client,
    feed_urls: &'a [String],
}

impl<'a> NewsService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: &'a reqwest::Client, feed_urls: &'a [String]) -> Self {
        Self {
            db,
            http,
            feed_urls,
        }
    }

    /// Runs one ingestion pass.
    ///
    /// With `user_id` only that user's rostered and followed players are searched for,
    /// otherwise every rostered or followed player.
    pub async fn ingest(&self, user_id: Option<i32>) -> Result<IngestionSummary, Error> {
        let mut summary = IngestionSummary::default();

        let players = PlayerRepository::new(self.db)
            .get_priority_players(user_id)
            .await?;
        let matcher = PlayerMatcher::new(&players)?;
        if matcher.is_empty() {
            tracing::info!(user_id = ?user_id, "No players to ingest news for");

            return Ok(summary);
        }

        let mut items: Vec<FeedItem> = Vec::new();
        for url in self.feed_urls {
            match fetch_feed(self.http, url).await {
                Ok(feed) => {
                    summary.feeds += 1;
                    items.extend(feed);
                }
                Err(e) => tracing::warn!(feed = %url, "Skipping news feed: {}", e),
            }
        }
        summary.items = items.len();

        let mut seen: HashSet<(i32, String)> = HashSet::new();
        let mut pending: Vec<CreatePlayerNewsParams> = Vec::new();
        for item in &items {
            for player_id in matcher.find(&item.match_text()) {
                summary.matches += 1;

                if !seen.insert((player_id, item.title.clone())) {
                    summary.skipped += 1;
                    continue;
                }

                pending.push(CreatePlayerNewsParams {
                    player_id,
                    headline: item.title.clone(),
                    summary: item.description.clone(),
                    source: item.source.clone(),
                    url: item.link.clone(),
                    published_at: item.published_at,
                });
            }
        }

        let repo = PlayerNewsRepository::new(self.db);
        for chunk in pending.chunks(NEWS_WRITE_CONCURRENCY) {
            let mut futures = FuturesUnordered::new();

            for params in chunk {
                futures.push(self.write(&repo, params.clone()));
            }

            while let Some(outcome) = futures.next().await {
                match outcome {
                    WriteOutcome::Inserted => summary.inserted += 1,
                    WriteOutcome::Skipped => summary.skipped += 1,
                    WriteOutcome::Failed => summary.failed += 1,
                }
            }
        }

        tracing::info!(
            user_id = ?user_id,
            feeds = summary.feeds,
            items = summary.items,
            matches = summary.matches,
            inserted = summary.inserted,
            skipped = summary.skipped,
            failed = summary.failed,
            "Ingested player news"
        );

        Ok(summary)
    }

    async fn write(&self, repo: &PlayerNewsRepository<'_>, params: CreatePlayerNewsParams) -> WriteOutcome {
        let player_id = params.player_id;

        match repo.exists(player_id, &params.headline).await {
            Ok(true) => return WriteOutcome::Skipped,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(player_id, "Failed to check existing player news: {}", e);
                return WriteOutcome::Failed;
            }
        }

        match repo.create(params).await {
            Ok(_) => WriteOutcome::Inserted,
            Err(e) => {
                tracing::warn!(player_id, "Failed to store player news: {}", e);
                WriteOutcome::Failed
            }
        }
    }
}
