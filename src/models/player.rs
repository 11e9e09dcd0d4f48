//! Player and Club (roster) data structures.

use crate::models::tournament::TournamentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Read;
use uuid::Uuid;

/// Unique identifier for a player (used in teams and lookups).
pub type PlayerId = Uuid;

/// Unique identifier for a club.
pub type ClubId = Uuid;

/// A registered club player. Tournaments treat the id as opaque.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// Create a new player with the given name and a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A club and its player roster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
    pub players: Vec<Player>,
}

#[derive(Deserialize)]
struct RosterRow {
    name: String,
}

impl Club {
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            location: location.into(),
            created_at: Utc::now(),
            players: Vec::new(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Add a player to the roster. Names must be unique (case-insensitive).
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyName);
        }
        if self.players.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
            return Err(TournamentError::DuplicatePlayerName);
        }
        let player = Player::new(name);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        Ok(())
    }

    /// Import players from CSV with a `name` header column. Stops at the first bad row;
    /// rows before it stay imported. Returns how many players were added.
    pub fn import_players_csv<R: Read>(&mut self, reader: R) -> Result<usize, TournamentError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut added = 0;
        for row in rdr.deserialize::<RosterRow>() {
            let row = row.map_err(|e| TournamentError::Csv(e.to_string()))?;
            self.add_player(&row.name)?;
            added += 1;
        }
        Ok(added)
    }

    /// Resolve the given ids against the roster, keeping the caller's order.
    pub fn select_players(&self, ids: &[PlayerId]) -> Result<Vec<Player>, TournamentError> {
        ids.iter()
            .map(|&id| self.player(id).cloned().ok_or(TournamentError::PlayerNotFound(id)))
            .collect()
    }
}
