use std::collections::{BTreeSet, HashMap};

use regex::{Regex, RegexBuilder};

use crate::server::model::db::PlayerModel;

/// Names shorter than this match too much unrelated text and are never searched for
pub const MIN_NAME_LENGTH: usize = 4;

/// Finds player names in free text with a single case-insensitive alternation.
pub struct PlayerMatcher {
    regex: Option<Regex>,
    /// Lowercased full name to every player carrying it
    players_by_name: HashMap<String, Vec<i32>>,
}

impl PlayerMatcher {
    pub fn new(players: &[PlayerModel]) -> Result<Self, regex::Error> {
        let mut players_by_name: HashMap<String, Vec<i32>> = HashMap::new();
        for player in players {
            let name = player.full_name.trim();
            if name.chars().count() < MIN_NAME_LENGTH {
                continue;
            }

            players_by_name
                .entry(name.to_lowercase())
                .or_default()
                .push(player.id);
        }

        if players_by_name.is_empty() {
            return Ok(Self {
                regex: None,
                players_by_name,
            });
        }

        // Longest first so "Luka Doncic" wins over a shorter name sharing its prefix
        let mut names: Vec<&String> = players_by_name.keys().collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let pattern = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;

        Ok(Self {
            regex: Some(regex),
            players_by_name,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }

    /// Ids of players whose name appears in `text`, each distinct name counted once.
    pub fn find(&self, text: &str) -> Vec<i32> {
        let Some(regex) = &self.regex else {
            return Vec::new();
        };

        let names: BTreeSet<String> = regex
            .find_iter(text)
            .map(|m| m.as_str().to_lowercase())
            .collect();

        names
            .iter()
            .filter_map(|name| self.players_by_name.get(name))
            .flatten()
            .copied()
            .collect()
    }
}
