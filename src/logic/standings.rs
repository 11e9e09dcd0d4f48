//! Round robin standings: aggregation, ranking, and CSV export.

use crate::models::{GameMatch, StageTag, Team, Tournament, TournamentError};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::io::Write;

/// Points awarded for a round robin win.
pub const POINTS_PER_WIN: u32 = 2;

/// Ranked performance record of a team in the round robin. Derived, never stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Standing {
    pub team: Team,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
    pub sets_for: u32,
    pub sets_against: u32,
    pub set_difference: i64,
}

impl Standing {
    fn new(team: Team) -> Self {
        Self {
            team,
            played: 0,
            wins: 0,
            losses: 0,
            points: 0,
            sets_for: 0,
            sets_against: 0,
            set_difference: 0,
        }
    }

    fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.sets_for += scored;
        self.sets_against += conceded;
        if scored > conceded {
            self.wins += 1;
            self.points += POINTS_PER_WIN;
        } else {
            self.losses += 1;
        }
    }
}

/// Descending by points, then set difference, then sets for.
fn rank(a: &Standing, b: &Standing) -> Ordering {
    b.points
        .cmp(&a.points)
        .then(b.set_difference.cmp(&a.set_difference))
        .then(b.sets_for.cmp(&a.sets_for))
}

/// Compute ranked standings from completed round robin matches.
///
/// One entry per team, in `teams` order before ranking. Ties that survive every
/// tie-breaker keep that order. Matches referencing a team outside `teams` are ignored.
pub fn compute_standings(teams: &[Team], matches: &[GameMatch]) -> Vec<Standing> {
    let mut standings: Vec<Standing> = teams.iter().copied().map(Standing::new).collect();
    let index: HashMap<Team, usize> = teams.iter().enumerate().map(|(i, t)| (*t, i)).collect();

    for m in matches
        .iter()
        .filter(|m| m.completed && m.stage == StageTag::RoundRobin)
    {
        let (Some(&i1), Some(&i2)) = (index.get(&m.team_1), index.get(&m.team_2)) else {
            continue;
        };
        standings[i1].record(m.score_1, m.score_2);
        standings[i2].record(m.score_2, m.score_1);
    }

    for s in &mut standings {
        s.set_difference = i64::from(s.sets_for) - i64::from(s.sets_against);
    }
    standings.sort_by(rank);
    standings
}

/// Standings of a tournament's current match list.
pub fn tournament_standings(tournament: &Tournament) -> Vec<Standing> {
    compute_standings(&tournament.teams, &tournament.matches)
}

#[derive(Serialize)]
struct StandingRow<'a> {
    rank: usize,
    team: &'a str,
    played: u32,
    wins: u32,
    losses: u32,
    points: u32,
    sets_for: u32,
    sets_against: u32,
    set_difference: i64,
}

/// Write ranked standings as CSV (header row included).
pub fn write_standings_csv<W: Write>(
    tournament: &Tournament,
    writer: W,
) -> Result<(), TournamentError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for (i, s) in tournament_standings(tournament).iter().enumerate() {
        let label = tournament.team_label(&s.team);
        wtr.serialize(StandingRow {
            rank: i + 1,
            team: &label,
            played: s.played,
            wins: s.wins,
            losses: s.losses,
            points: s.points,
            sets_for: s.sets_for,
            sets_against: s.sets_against,
            set_difference: s.set_difference,
        })
        .map_err(|e| TournamentError::Csv(e.to_string()))?;
    }
    wtr.flush().map_err(|e| TournamentError::Csv(e.to_string()))
}
