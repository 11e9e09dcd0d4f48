//! Tournament, TournamentStage and TournamentStatus.

use crate::models::game::{GameMatch, MatchId, StageTag, Team};
use crate::models::player::{ClubId, Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during tournament and roster operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    #[error("Invalid badminton score {score_1}-{score_2}: a game is won at 21 with a 2-point lead, or 30-29 at the cap")]
    InvalidScore { score_1: i64, score_2: i64 },
    #[error("Match not found")]
    MatchNotFound(MatchId),
    #[error("Match already has a score; edit it first")]
    MatchAlreadyCompleted(MatchId),
    #[error("Match has no score to edit")]
    MatchNotCompleted(MatchId),
    #[error("Need at least {required} players to form teams (found {found})")]
    NotEnoughPlayers { required: usize, found: usize },
    #[error("The number of players must be even to form teams of two (found {0})")]
    OddPlayerCount(usize),
    #[error("Player selected more than once")]
    DuplicatePlayer(PlayerId),
    #[error("A player with this name already exists")]
    DuplicatePlayerName,
    #[error("Name must not be empty")]
    EmptyName,
    #[error("Player not found")]
    PlayerNotFound(PlayerId),
    #[error("Invalid pairing: {0}")]
    InvalidPairing(String),
    #[error("Invalid state for this action")]
    InvalidState,
    #[error("Tournament not found")]
    TournamentNotFound(TournamentId),
    #[error("Club not found")]
    ClubNotFound(ClubId),
    #[error("Tournament was modified concurrently (expected version {expected}, found {found}); retry")]
    ConcurrentModification { expected: u64, found: u64 },
    #[error("CSV error: {0}")]
    Csv(String),
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the knockout state machine.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStage {
    /// Every pair of teams plays (twice with 3 teams).
    #[default]
    RoundRobin,
    /// 4 teams: qualifier 1 and eliminator in progress.
    Playoffs,
    /// 4 teams: qualifier 2 in progress.
    Qualifier2,
    /// The final has been scheduled.
    Finals,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Created, matches not generated yet.
    #[default]
    Pending,
    Ongoing,
    /// Final played, or the playoffs could not be seeded (no winner).
    Complete,
    /// Fewer than 2 teams: no schedule could be generated.
    Cancelled,
}

/// Full tournament record: roster snapshot, teams, matches, and progression.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub club_id: ClubId,
    pub created_at: DateTime<Utc>,
    pub status: TournamentStatus,
    pub stage: TournamentStage,
    /// Players taking part (for name lookup).
    pub players: Vec<Player>,
    pub teams: Vec<Team>,
    pub matches: Vec<GameMatch>,
    pub winner: Option<Team>,
    pub runner_up: Option<Team>,
    /// Optimistic concurrency counter, bumped by the store on every save.
    pub version: u64,
}

impl Tournament {
    /// Create a pending tournament with the given teams and no matches.
    pub fn new(
        name: impl Into<String>,
        club_id: ClubId,
        players: Vec<Player>,
        teams: Vec<Team>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            club_id,
            created_at: Utc::now(),
            status: TournamentStatus::Pending,
            stage: TournamentStage::RoundRobin,
            players,
            teams,
            matches: Vec::new(),
            winner: None,
            runner_up: None,
            version: 0,
        }
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// First match with the given stage tag (playoff stages hold at most one).
    pub fn find_stage(&self, stage: StageTag) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.stage == stage)
    }

    pub fn matches_in(&self, stage: StageTag) -> impl Iterator<Item = &GameMatch> {
        self.matches.iter().filter(move |m| m.stage == stage)
    }

    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.players.iter().find(|p| p.id == id).map(|p| p.name.as_str())
    }

    /// Display label such as "Alice / Bob". Unknown players render as "TBD".
    pub fn team_label(&self, team: &Team) -> String {
        team.players()
            .iter()
            .map(|&id| self.player_name(id).unwrap_or("TBD"))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.status, TournamentStatus::Complete | TournamentStatus::Cancelled)
    }
}
