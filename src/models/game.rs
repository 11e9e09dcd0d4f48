//! Match (game), Team, and StageTag for doubles games.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// A doubles pair. Players are stored sorted, so `Team::new(a, b) == Team::new(b, a)`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "[PlayerId; 2]", into = "[PlayerId; 2]")]
pub struct Team {
    players: [PlayerId; 2],
}

/// Rejected team: both slots hold the same player.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SamePlayerTwice(pub PlayerId);

impl fmt::Display for SamePlayerTwice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a team needs two different players ({} given twice)", self.0)
    }
}

impl std::error::Error for SamePlayerTwice {}

impl Team {
    pub fn new(a: PlayerId, b: PlayerId) -> Result<Self, SamePlayerTwice> {
        if a == b {
            return Err(SamePlayerTwice(a));
        }
        let players = if a < b { [a, b] } else { [b, a] };
        Ok(Self { players })
    }

    pub fn players(&self) -> [PlayerId; 2] {
        self.players
    }

    pub fn contains(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }

    /// Stable identity string: sorted player ids joined with `-`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.players[0], self.players[1])
    }
}

impl TryFrom<[PlayerId; 2]> for Team {
    type Error = SamePlayerTwice;

    fn try_from(value: [PlayerId; 2]) -> Result<Self, Self::Error> {
        Team::new(value[0], value[1])
    }
}

impl From<Team> for [PlayerId; 2] {
    fn from(team: Team) -> Self {
        team.players
    }
}

/// Which part of the tournament a match belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageTag {
    RoundRobin,
    #[serde(rename = "QUALIFIER_1")]
    Qualifier1,
    Eliminator,
    #[serde(rename = "QUALIFIER_2")]
    Qualifier2,
    Final,
}

impl StageTag {
    /// Ordering hint for display. Round robin legs carry their own round number.
    pub fn round(self) -> u32 {
        match self {
            StageTag::RoundRobin => 1,
            StageTag::Qualifier1 | StageTag::Eliminator => 90,
            StageTag::Qualifier2 => 95,
            StageTag::Final => 99,
        }
    }

    pub fn is_playoff(self) -> bool {
        self != StageTag::RoundRobin
    }
}

/// A single match between two teams. Scores stay 0 until submitted.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub team_1: Team,
    pub team_2: Team,
    pub score_1: u32,
    pub score_2: u32,
    pub completed: bool,
    pub round: u32,
    pub stage: StageTag,
}

impl GameMatch {
    pub fn new(team_1: Team, team_2: Team, stage: StageTag) -> Self {
        Self::with_round(team_1, team_2, stage, stage.round())
    }

    pub fn with_round(team_1: Team, team_2: Team, stage: StageTag, round: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            team_1,
            team_2,
            score_1: 0,
            score_2: 0,
            completed: false,
            round,
            stage,
        }
    }

    /// Higher-scoring team, once the match is completed.
    pub fn winner(&self) -> Option<Team> {
        if !self.completed {
            return None;
        }
        Some(if self.score_1 > self.score_2 { self.team_1 } else { self.team_2 })
    }

    /// Lower-scoring team, once the match is completed.
    pub fn loser(&self) -> Option<Team> {
        if !self.completed {
            return None;
        }
        Some(if self.score_1 > self.score_2 { self.team_2 } else { self.team_1 })
    }

    pub fn involves(&self, team: &Team) -> bool {
        self.team_1 == *team || self.team_2 == *team
    }

    /// Same fixture: same stage and the same two teams in either order.
    pub fn same_fixture(&self, other: &GameMatch) -> bool {
        self.stage == other.stage && self.involves(&other.team_1) && self.involves(&other.team_2)
    }
}
