//! Tournament business logic: scoring, standings, round robin, playoffs, setup.

mod group_play;
mod playoffs;
mod results;
mod score;
mod setup;
mod standings;

pub use group_play::{generate_round_robin, schedule_round_robin};
pub use playoffs::{advance_stage, Progress};
pub use results::{edit_score, submit_score};
pub use score::{is_valid_score, GAME_POINT, SCORE_CAP};
pub use setup::{create_tournament, form_teams, reset_tournament, Pairing, MIN_PLAYERS};
pub use standings::{
    compute_standings, tournament_standings, write_standings_csv, Standing, POINTS_PER_WIN,
};
