//! Data structures for the badminton tournament: clubs, players, teams, matches, tournament state.

mod game;
mod player;
mod tournament;

pub use game::{GameMatch, MatchId, SamePlayerTwice, StageTag, Team};
pub use player::{Club, ClubId, Player, PlayerId};
pub use tournament::{
    Tournament, TournamentError, TournamentId, TournamentStage, TournamentStatus,
};
