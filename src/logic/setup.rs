//! Setup phase: team formation, tournament creation and reset.

use crate::logic::group_play::schedule_round_robin;
use crate::models::{ClubId, Player, PlayerId, Team, Tournament, TournamentError, TournamentStatus};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Minimum number of players for a tournament (two teams).
pub const MIN_PLAYERS: usize = 4;

/// How selected players are split into doubles teams.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Pairing {
    /// Shuffle, then pair neighbours.
    #[default]
    Random,
    /// Caller-chosen pairs; must cover every selected player exactly once.
    Manual { teams: Vec<[PlayerId; 2]> },
}

/// Split players into teams of two according to `pairing`.
pub fn form_teams<R: Rng + ?Sized>(
    players: &[Player],
    pairing: &Pairing,
    rng: &mut R,
) -> Result<Vec<Team>, TournamentError> {
    if players.len() < MIN_PLAYERS {
        return Err(TournamentError::NotEnoughPlayers {
            required: MIN_PLAYERS,
            found: players.len(),
        });
    }
    if players.len() % 2 != 0 {
        return Err(TournamentError::OddPlayerCount(players.len()));
    }
    let mut seen = HashSet::new();
    for p in players {
        if !seen.insert(p.id) {
            return Err(TournamentError::DuplicatePlayer(p.id));
        }
    }

    match pairing {
        Pairing::Random => {
            let mut ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
            ids.shuffle(rng);
            ids.chunks_exact(2)
                .map(|pair| {
                    Team::new(pair[0], pair[1])
                        .map_err(|e| TournamentError::InvalidPairing(e.to_string()))
                })
                .collect()
        }
        Pairing::Manual { teams } => {
            let mut unpaired = seen;
            let mut formed = Vec::with_capacity(teams.len());
            for &[a, b] in teams {
                let team =
                    Team::new(a, b).map_err(|e| TournamentError::InvalidPairing(e.to_string()))?;
                for id in [a, b] {
                    if !unpaired.remove(&id) {
                        return Err(TournamentError::InvalidPairing(format!(
                            "player {id} is not selected or already paired"
                        )));
                    }
                }
                formed.push(team);
            }
            if !unpaired.is_empty() {
                return Err(TournamentError::InvalidPairing(format!(
                    "{} selected player(s) left without a partner",
                    unpaired.len()
                )));
            }
            Ok(formed)
        }
    }
}

/// Create a tournament: form teams, generate the round robin, status ongoing.
pub fn create_tournament(
    name: &str,
    club_id: ClubId,
    players: Vec<Player>,
    pairing: &Pairing,
) -> Result<Tournament, TournamentError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TournamentError::EmptyName);
    }
    let teams = form_teams(&players, pairing, &mut rand::thread_rng())?;
    let mut tournament = Tournament::new(name, club_id, players, teams);
    schedule_round_robin(&mut tournament);
    log::info!(
        "Created tournament {} ({:?}): {} teams, {} round robin matches",
        tournament.id,
        tournament.name,
        tournament.teams.len(),
        tournament.matches.len()
    );
    Ok(tournament)
}

/// Reset: discard every match, regenerate the round robin from the existing teams,
/// clear winner and runner-up.
pub fn reset_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.status == TournamentStatus::Cancelled {
        return Err(TournamentError::InvalidState);
    }
    schedule_round_robin(tournament);
    log::info!("Tournament {} reset", tournament.id);
    Ok(())
}
