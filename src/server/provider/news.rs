use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::Value;

use crate::server::provider::ProviderClient;

/// Player news requests in flight at once
pub const NEWS_FETCH_CONCURRENCY: usize = 5;

impl ProviderClient {
    /// Fetches news for many players, [`NEWS_FETCH_CONCURRENCY`] requests at a time.
    ///
    /// A key whose request fails is logged and left out of the result.
    pub async fn players_news(&self, access_token: &str, player_keys: &[String]) -> Vec<(String, Value)> {
        let mut news = Vec::with_capacity(player_keys.len());

        for chunk in player_keys.chunks(NEWS_FETCH_CONCURRENCY) {
            let mut futures = FuturesUnordered::new();

            for player_key in chunk {
                futures.push(async move {
                    let result = self.player_news(access_token, player_key).await;
                    (player_key, result)
                });
            }

            while let Some((player_key, result)) = futures.next().await {
                match result {
                    Ok(payload) => news.push((player_key.clone(), payload)),
                    Err(e) => tracing::warn!(
                        player_key = %player_key,
                        "Skipping player news after failed request: {}",
                        e
                    ),
                }
            }
        }

        news
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use crate::server::provider::ProviderClient;

    #[tokio::test]
    async fn skips_failed_players() {
        let mut server = Server::new_async().await;
        let ok = server
            .mock("GET", Matcher::Regex(r"^/player/466\.p\.(1|2|3|4|5|6)/news$".to_string()))
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"fantasy_content":{}}"#)
            .expect(6)
            .create_async()
            .await;
        let failing = server
            .mock("GET", "/player/466.p.7/news")
            .match_query(Matcher::Any)
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let client = ProviderClient::new(reqwest::Client::new(), server.url());
        let keys: Vec<String> = (1..=7).map(|i| format!("466.p.{}", i)).collect();

        let news = client.players_news("token", &keys).await;

        ok.assert_async().await;
        failing.assert_async().await;
        assert_eq!(news.len(), 6);
        assert!(news.iter().all(|(key, _)| key != "466.p.7"));
    }
}
