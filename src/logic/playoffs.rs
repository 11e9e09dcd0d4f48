//! Stage progression: from round robin standings to the final.
//!
//! 3 or 5 teams (and any other count) go straight to a final between the top two.
//! 4 teams play a page playoff: qualifier 1 (1st v 2nd) and eliminator (3rd v 4th),
//! then qualifier 2 (loser of Q1 v winner of the eliminator), then the final
//! (winner of Q1 v winner of Q2).

use crate::logic::standings::tournament_standings;
use crate::models::{
    GameMatch, StageTag, Team, Tournament, TournamentStage, TournamentStatus,
};

/// Outcome of one progression step.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Progress {
    /// Nothing to do until more matches complete.
    Waiting,
    /// 4 teams: qualifier 1 and eliminator scheduled.
    PlayoffsSeeded,
    Qualifier2Scheduled,
    FinalScheduled,
    /// Final played.
    Completed { winner: Team, runner_up: Team },
    /// Not enough ranked teams to seed the next stage; complete with no winner.
    EndedWithoutWinner,
}

/// Advance the tournament after a match completion.
///
/// Re-running with no new completions changes nothing: every playoff match is
/// only added when no match with its stage exists yet.
pub fn advance_stage(tournament: &mut Tournament) -> Progress {
    if tournament.status == TournamentStatus::Cancelled {
        return Progress::Waiting;
    }

    if let Some(progress) = complete_if_final_played(tournament) {
        return progress;
    }

    match tournament.stage {
        TournamentStage::RoundRobin => seed_from_standings(tournament),
        TournamentStage::Playoffs if tournament.teams.len() == 4 => schedule_qualifier_2(tournament),
        TournamentStage::Qualifier2 if tournament.teams.len() == 4 => schedule_final(tournament),
        _ => Progress::Waiting,
    }
}

fn complete_if_final_played(tournament: &mut Tournament) -> Option<Progress> {
    let final_match = tournament.find_stage(StageTag::Final)?;
    let (winner, runner_up) = (final_match.winner()?, final_match.loser()?);
    if tournament.status != TournamentStatus::Complete || tournament.winner != Some(winner) {
        log::info!(
            "Tournament {} complete: winner {}, runner-up {}",
            tournament.id,
            tournament.team_label(&winner),
            tournament.team_label(&runner_up)
        );
    }
    tournament.status = TournamentStatus::Complete;
    tournament.winner = Some(winner);
    tournament.runner_up = Some(runner_up);
    Some(Progress::Completed { winner, runner_up })
}

fn seed_from_standings(tournament: &mut Tournament) -> Progress {
    if !tournament
        .matches_in(StageTag::RoundRobin)
        .all(|m| m.completed)
    {
        return Progress::Waiting;
    }

    let standings = tournament_standings(tournament);
    let top: Vec<Team> = standings.iter().map(|s| s.team).collect();
    if top.len() < 2 {
        return end_without_winner(tournament);
    }

    let (desired, next) = if tournament.teams.len() == 4 {
        if top.len() < 4 {
            return end_without_winner(tournament);
        }
        (
            vec![
                GameMatch::new(top[0], top[1], StageTag::Qualifier1),
                GameMatch::new(top[2], top[3], StageTag::Eliminator),
            ],
            (TournamentStage::Playoffs, Progress::PlayoffsSeeded),
        )
    } else {
        (
            vec![GameMatch::new(top[0], top[1], StageTag::Final)],
            (TournamentStage::Finals, Progress::FinalScheduled),
        )
    };

    reconcile_playoffs(tournament, desired);
    tournament.stage = next.0;
    log::info!("Tournament {} round robin finished, stage {:?}", tournament.id, next.0);
    next.1
}

/// Keep the round robin and any playoff match that is already one of `desired`;
/// drop other playoff matches; append the desired matches still missing.
fn reconcile_playoffs(tournament: &mut Tournament, desired: Vec<GameMatch>) {
    tournament
        .matches
        .retain(|m| !m.stage.is_playoff() || desired.iter().any(|d| d.same_fixture(m)));
    for m in desired {
        if !tournament.matches.iter().any(|existing| existing.same_fixture(&m)) {
            push_once(tournament, m);
        }
    }
}

fn schedule_qualifier_2(tournament: &mut Tournament) -> Progress {
    if tournament.find_stage(StageTag::Qualifier2).is_some() {
        return Progress::Waiting;
    }
    let q1_loser = tournament.find_stage(StageTag::Qualifier1).and_then(GameMatch::loser);
    let eliminator_winner = tournament.find_stage(StageTag::Eliminator).and_then(GameMatch::winner);
    let (Some(q1_loser), Some(eliminator_winner)) = (q1_loser, eliminator_winner) else {
        return Progress::Waiting;
    };

    push_once(
        tournament,
        GameMatch::new(q1_loser, eliminator_winner, StageTag::Qualifier2),
    );
    tournament.stage = TournamentStage::Qualifier2;
    log::info!(
        "Tournament {} qualifier 2: {} v {}",
        tournament.id,
        tournament.team_label(&q1_loser),
        tournament.team_label(&eliminator_winner)
    );
    Progress::Qualifier2Scheduled
}

fn schedule_final(tournament: &mut Tournament) -> Progress {
    if tournament.find_stage(StageTag::Final).is_some() {
        return Progress::Waiting;
    }
    let q1_winner = tournament.find_stage(StageTag::Qualifier1).and_then(GameMatch::winner);
    let q2_winner = tournament.find_stage(StageTag::Qualifier2).and_then(GameMatch::winner);
    let (Some(q1_winner), Some(q2_winner)) = (q1_winner, q2_winner) else {
        return Progress::Waiting;
    };

    push_once(tournament, GameMatch::new(q1_winner, q2_winner, StageTag::Final));
    tournament.stage = TournamentStage::Finals;
    log::info!(
        "Tournament {} final: {} v {}",
        tournament.id,
        tournament.team_label(&q1_winner),
        tournament.team_label(&q2_winner)
    );
    Progress::FinalScheduled
}

fn end_without_winner(tournament: &mut Tournament) -> Progress {
    log::warn!(
        "Tournament {}: not enough ranked teams to continue, completing with no winner",
        tournament.id
    );
    tournament.status = TournamentStatus::Complete;
    tournament.winner = None;
    tournament.runner_up = None;
    Progress::EndedWithoutWinner
}

/// Playoff stages hold one match each.
fn push_once(tournament: &mut Tournament, m: GameMatch) {
    debug_assert!(
        tournament.find_stage(m.stage).is_none(),
        "duplicate {:?} match in tournament {}",
        m.stage,
        tournament.id
    );
    tournament.matches.push(m);
}
