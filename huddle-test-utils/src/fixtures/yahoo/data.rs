//! Payload builders for the Yahoo Fantasy API, token endpoint and RSS feeds.
//!
//! Yahoo wraps collections in objects keyed `"0"`, `"1"`, ... plus a `"count"` and spreads a
//! resource's fields across an array of single-key objects. The builders reproduce that so
//! parsers are tested against realistic input.

use serde_json::{json, Map, Value};

/// A player on a mock roster.
#[derive(Clone, Debug)]
pub struct MockPlayer {
    pub player_key: String,
    pub full_name: String,
    pub position: Option<String>,
    pub status: Option<String>,
}

impl MockPlayer {
    pub fn new(player_key: &str, full_name: &str) -> Self {
        Self {
            player_key: player_key.to_string(),
            full_name: full_name.to_string(),
            position: None,
            status: None,
        }
    }

    pub fn with_position(mut self, position: &str) -> Self {
        self.position = Some(position.to_string());
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }
}

/// A trade transaction as listed by the transactions collection.
#[derive(Clone, Debug)]
pub struct MockTransaction {
    pub transaction_key: String,
    /// `trade` or `pending_trade`
    pub transaction_type: String,
    pub status: String,
    pub trader_team_key: String,
    pub tradee_team_key: String,
    pub timestamp: i64,
    /// `(player_key, source_team_key, destination_team_key)`
    pub moves: Vec<(String, String, String)>,
}

impl MockTransaction {
    /// A completed trade with status `successful`.
    pub fn trade(transaction_key: &str, trader_team_key: &str, tradee_team_key: &str) -> Self {
        Self {
            transaction_key: transaction_key.to_string(),
            transaction_type: "trade".to_string(),
            status: "successful".to_string(),
            trader_team_key: trader_team_key.to_string(),
            tradee_team_key: tradee_team_key.to_string(),
            timestamp: 1_735_689_600,
            moves: Vec::new(),
        }
    }

    /// A pending trade with status `proposed`.
    pub fn pending(transaction_key: &str, trader_team_key: &str, tradee_team_key: &str) -> Self {
        Self {
            transaction_type: "pending_trade".to_string(),
            status: "proposed".to_string(),
            ..Self::trade(transaction_key, trader_team_key, tradee_team_key)
        }
    }

    /// Sets the proposal or completion time as a Unix timestamp.
    pub fn at(mut self, timestamp: i64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    /// Adds a player moving from `source_team_key` to `destination_team_key`.
    pub fn moving(mut self, player_key: &str, source_team_key: &str, destination_team_key: &str) -> Self {
        self.moves.push((
            player_key.to_string(),
            source_team_key.to_string(),
            destination_team_key.to_string(),
        ));
        self
    }
}

/// Wraps values in a Yahoo collection object (`{"0": .., "1": .., "count": n}`).
fn collection(key: &str, values: Vec<Value>) -> Value {
    let mut map = Map::new();
    let count = values.len();

    for (index, value) in values.into_iter().enumerate() {
        map.insert(index.to_string(), json!({ key: value }));
    }
    map.insert("count".to_string(), json!(count));

    Value::Object(map)
}

fn transaction(tx: &MockTransaction) -> Value {
    let pending = tx.transaction_type == "pending_trade";

    let mut meta = json!({
        "transaction_key": tx.transaction_key,
        "transaction_id": tx.transaction_key.rsplit('.').next().unwrap_or_default(),
        "type": tx.transaction_type,
        "status": tx.status,
        "trader_team_key": tx.trader_team_key,
        "tradee_team_key": tx.tradee_team_key,
    });
    let time_field = if pending { "trade_proposed_time" } else { "timestamp" };
    meta[time_field] = json!(tx.timestamp.to_string());

    let players = tx
        .moves
        .iter()
        .map(|(player_key, source, destination)| {
            let data = json!({
                "type": "trade",
                "source_type": "team",
                "source_team_key": source,
                "destination_type": "team",
                "destination_team_key": destination,
            });
            // Yahoo sends transaction_data as an array for completed trades and as a bare
            // object for pending ones
            let data = if pending { data } else { json!([data]) };

            json!([
                [
                    { "player_key": player_key },
                    { "player_id": player_key.rsplit('.').next().unwrap_or_default() },
                    { "name": { "full": format!("Player {}", player_key) } }
                ],
                { "transaction_data": data }
            ])
        })
        .collect();

    json!([meta, { "players": collection("player", players) }])
}

/// Body of `league/{league_key}/transactions` for the given transactions.
pub fn transactions_payload(league_key: &str, transactions: &[MockTransaction]) -> Value {
    let transactions = transactions.iter().map(transaction).collect();

    json!({
        "fantasy_content": {
            "league": [
                { "league_key": league_key },
                { "transactions": collection("transaction", transactions) }
            ]
        }
    })
}

/// Body of `team/{team_key}/roster` for the given players.
pub fn roster_payload(team_key: &str, players: &[MockPlayer]) -> Value {
    let players = players
        .iter()
        .map(|player| {
            let mut fields = vec![
                json!({ "player_key": player.player_key }),
                json!({ "name": { "full": player.full_name } }),
            ];
            if let Some(position) = &player.position {
                fields.push(json!({ "display_position": position }));
            }
            if let Some(status) = &player.status {
                fields.push(json!({ "status": status }));
            }

            json!([fields, { "selected_position": [{ "coverage_type": "date" }] }])
        })
        .collect();

    json!({
        "fantasy_content": {
            "team": [
                [{ "team_key": team_key }, { "name": "Mock Team" }],
                { "roster": { "coverage_type": "date", "0": { "players": collection("player", players) } } }
            ]
        }
    })
}

/// Body of a successful token refresh.
pub fn token_response(access_token: &str, refresh_token: Option<&str>, expires_in: i64) -> Value {
    let mut body = json!({
        "access_token": access_token,
        "token_type": "bearer",
        "expires_in": expires_in,
    });
    if let Some(refresh_token) = refresh_token {
        body["refresh_token"] = json!(refresh_token);
    }

    body
}

/// RSS 2.0 document with one item per `(title, description)`.
pub fn rss_feed(channel_title: &str, items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .enumerate()
        .map(|(index, (title, description))| {
            format!(
                "<item><title>{}</title><description>{}</description>\
                 <link>https://news.example/{}</link>\
                 <pubDate>Wed, 01 Jan 2025 12:00:00 +0000</pubDate></item>",
                title, description, index
            )
        })
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <rss version=\"2.0\"><channel><title>{}</title>\
         <link>https://news.example</link><description>Mock feed</description>{}</channel></rss>",
        channel_title, items
    )
}
