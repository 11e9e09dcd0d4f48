//! Badminton club tournament app: library with models, business logic, and storage.

pub mod config;
pub mod logic;
pub mod models;
pub mod store;

pub use config::ServerConfig;
pub use logic::{
    advance_stage, compute_standings, create_tournament, edit_score, form_teams,
    generate_round_robin, is_valid_score, reset_tournament, schedule_round_robin, submit_score,
    tournament_standings, write_standings_csv, Pairing, Progress, Standing,
};
pub use models::{
    Club, ClubId, GameMatch, MatchId, Player, PlayerId, StageTag, Team, Tournament,
    TournamentError, TournamentId, TournamentStage, TournamentStatus,
};
pub use store::{MemoryStore, Subscription, TournamentStore};
