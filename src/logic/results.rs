//! Score submission and editing.

use crate::logic::playoffs::{advance_stage, Progress};
use crate::logic::score::is_valid_score;
use crate::models::{MatchId, Tournament, TournamentError, TournamentStatus};

/// Record a final score for a pending match, then advance the tournament.
///
/// Invalid scores are rejected before anything changes.
pub fn submit_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    score_1: i64,
    score_2: i64,
) -> Result<Progress, TournamentError> {
    if tournament.status == TournamentStatus::Cancelled {
        return Err(TournamentError::InvalidState);
    }
    if !is_valid_score(score_1, score_2) {
        return Err(TournamentError::InvalidScore { score_1, score_2 });
    }
    let (s1, s2) = match (u32::try_from(score_1), u32::try_from(score_2)) {
        (Ok(s1), Ok(s2)) => (s1, s2),
        _ => return Err(TournamentError::InvalidScore { score_1, score_2 }),
    };
    let m = tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.completed {
        return Err(TournamentError::MatchAlreadyCompleted(match_id));
    }
    m.score_1 = s1;
    m.score_2 = s2;
    m.completed = true;
    log::debug!("Tournament {}: match {} scored {}-{}", tournament.id, match_id, s1, s2);

    Ok(advance_stage(tournament))
}

/// Reopen a completed match: scores back to 0, pending again.
///
/// A complete tournament goes back to ongoing with winner and runner-up cleared.
/// Playoff matches already generated from the old result are kept.
pub fn edit_score(tournament: &mut Tournament, match_id: MatchId) -> Result<(), TournamentError> {
    if tournament.status == TournamentStatus::Cancelled {
        return Err(TournamentError::InvalidState);
    }
    let m = tournament
        .get_match_mut(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if !m.completed {
        return Err(TournamentError::MatchNotCompleted(match_id));
    }
    m.completed = false;
    m.score_1 = 0;
    m.score_2 = 0;

    if tournament.status == TournamentStatus::Complete {
        tournament.status = TournamentStatus::Ongoing;
        tournament.winner = None;
        tournament.runner_up = None;
        log::info!("Tournament {} reopened by score edit", tournament.id);
    }
    Ok(())
}
