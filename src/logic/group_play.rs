//! Group stage: round robin schedule generation.

use crate::models::{GameMatch, StageTag, Team, Tournament, TournamentStage, TournamentStatus};

/// Generate the round robin: every unordered pair of teams plays once.
///
/// With exactly 3 teams each pair plays twice, the second leg (round 2) with the
/// teams swapped. Fewer than 2 teams yields no matches.
pub fn generate_round_robin(teams: &[Team]) -> Vec<GameMatch> {
    let legs = if teams.len() == 3 { 2 } else { 1 };
    let mut matches = Vec::new();
    for leg in 1..=legs {
        for (i, &home) in teams.iter().enumerate() {
            for &away in &teams[i + 1..] {
                let (team_1, team_2) = if leg % 2 == 1 { (home, away) } else { (away, home) };
                matches.push(GameMatch::with_round(team_1, team_2, StageTag::RoundRobin, leg));
            }
        }
    }
    matches
}

/// Replace the tournament's matches with a fresh round robin and restart progression.
///
/// Clears any winner. With fewer than 2 teams the tournament is cancelled instead.
pub fn schedule_round_robin(tournament: &mut Tournament) {
    tournament.matches = generate_round_robin(&tournament.teams);
    tournament.stage = TournamentStage::RoundRobin;
    tournament.winner = None;
    tournament.runner_up = None;
    if tournament.matches.is_empty() {
        log::warn!(
            "Tournament {} has {} team(s); cancelled with no schedule",
            tournament.id,
            tournament.teams.len()
        );
        tournament.status = TournamentStatus::Cancelled;
    } else {
        tournament.status = TournamentStatus::Ongoing;
    }
}
