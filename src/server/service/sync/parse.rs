//! Navigation of Yahoo Fantasy API payloads.
//!
//! Yahoo's JSON is a direct translation of its XML: collections are objects keyed `"0"`,
//! `"1"`, ... next to a `"count"`, and a resource's fields are spread over an array of
//! single-key objects, sometimes nested one array deeper. The helpers here flatten that into
//! field maps and pick out what Huddle stores. Entries missing a required field are skipped.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::server::{
    model::yahoo::{
        ObservedPlayer, ObservedTrade, ObservedTradeItem, TRANSACTION_TYPE_PENDING_TRADE,
        TRANSACTION_TYPE_TRADE,
    },
    util::time::epoch_to_naive,
};

/// Depth-first search for the first value stored under `key`.
fn find_key<'v>(value: &'v Value, key: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => {
            if let Some(found) = map.get(key) {
                return Some(found);
            }
            map.values().find_map(|v| find_key(v, key))
        }
        Value::Array(items) => items.iter().find_map(|v| find_key(v, key)),
        _ => None,
    }
}

/// Entries of a collection, each unwrapped from its `{ item_key: .. }` wrapper.
fn collection_items<'v>(collection: &'v Value, item_key: &str) -> Vec<&'v Value> {
    match collection {
        Value::Object(map) => {
            let indexed: BTreeMap<usize, &Value> = map
                .iter()
                .filter_map(|(k, v)| k.parse::<usize>().ok().map(|index| (index, v)))
                .collect();

            indexed
                .into_values()
                .filter_map(|entry| entry.get(item_key))
                .collect()
        }
        Value::Array(entries) => entries
            .iter()
            .map(|entry| entry.get(item_key).unwrap_or(entry))
            .collect(),
        _ => Vec::new(),
    }
}

/// Merges the fields of an object or of arbitrarily nested arrays of objects.
fn flatten_fields(value: &Value) -> Map<String, Value> {
    fn collect(value: &Value, fields: &mut Map<String, Value>) {
        match value {
            Value::Object(map) => {
                for (k, v) in map {
                    fields.entry(k.clone()).or_insert_with(|| v.clone());
                }
            }
            Value::Array(items) => items.iter().for_each(|item| collect(item, fields)),
            _ => {}
        }
    }

    let mut fields = Map::new();
    collect(value, &mut fields);
    fields
}

/// String or numeric field as a string. Yahoo sends ids and timestamps either way.
fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Trade and pending trade transactions found in a transactions payload.
pub fn parse_transactions(payload: &Value) -> Vec<ObservedTrade> {
    let Some(transactions) = find_key(payload, "transactions") else {
        return Vec::new();
    };

    collection_items(transactions, "transaction")
        .into_iter()
        .filter_map(parse_transaction)
        .collect()
}

fn parse_transaction(value: &Value) -> Option<ObservedTrade> {
    let fields = flatten_fields(value);

    let transaction_type = string_field(&fields, "type")?;
    if transaction_type != TRANSACTION_TYPE_TRADE && transaction_type != TRANSACTION_TYPE_PENDING_TRADE {
        return None;
    }

    let proposed_at = string_field(&fields, "trade_proposed_time")
        .or_else(|| string_field(&fields, "timestamp"))
        .and_then(|epoch| epoch.parse::<i64>().ok())
        .and_then(epoch_to_naive);

    let items = fields
        .get("players")
        .map(|players| {
            collection_items(players, "player")
                .into_iter()
                .filter_map(parse_trade_item)
                .collect()
        })
        .unwrap_or_default();

    Some(ObservedTrade {
        transaction_key: string_field(&fields, "transaction_key")?,
        transaction_type,
        status: string_field(&fields, "status").unwrap_or_default(),
        trader_team_key: string_field(&fields, "trader_team_key")?,
        tradee_team_key: string_field(&fields, "tradee_team_key")?,
        proposed_at,
        items,
    })
}

fn parse_trade_item(value: &Value) -> Option<ObservedTradeItem> {
    let fields = flatten_fields(value);
    // transaction_data is an array for completed trades and a bare object for pending ones
    let data = flatten_fields(fields.get("transaction_data")?);

    Some(ObservedTradeItem {
        player_key: string_field(&fields, "player_key")?,
        sender_team_key: string_field(&data, "source_team_key")?,
        receiver_team_key: string_field(&data, "destination_team_key")?,
    })
}

/// Players listed in a team roster payload.
pub fn parse_roster(payload: &Value) -> Vec<ObservedPlayer> {
    let Some(players) = find_key(payload, "players") else {
        return Vec::new();
    };

    collection_items(players, "player")
        .into_iter()
        .filter_map(|value| {
            let fields = flatten_fields(value);

            let full_name = match fields.get("name")? {
                Value::Object(name) => name.get("full")?.as_str()?.to_string(),
                Value::String(name) => name.clone(),
                _ => return None,
            };

            Some(ObservedPlayer {
                player_key: string_field(&fields, "player_key")?,
                full_name,
                position: string_field(&fields, "display_position"),
                status: string_field(&fields, "status"),
            })
        })
        .collect()
}
