//! Tournament persistence: versioned records with live-update subscriptions.

use crate::models::{ClubId, Tournament, TournamentError, TournamentId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tokio::sync::watch;

/// Storage for tournament records, keyed by tournament id.
///
/// `save` is a compare-and-swap on `Tournament::version`; `update` is a
/// single-flight read-modify-write. Both bump the version on success and push the
/// new snapshot to subscribers.
pub trait TournamentStore {
    fn insert(&self, tournament: Tournament) -> Result<Tournament, TournamentError>;

    fn load(&self, id: TournamentId) -> Result<Tournament, TournamentError>;

    fn save(&self, tournament: Tournament) -> Result<Tournament, TournamentError>;

    /// Apply `f` to the stored record while holding it exclusively. If `f` fails
    /// nothing is written.
    fn update<T, F>(&self, id: TournamentId, f: F) -> Result<(Tournament, T), TournamentError>
    where
        F: FnOnce(&mut Tournament) -> Result<T, TournamentError>;

    fn delete(&self, id: TournamentId) -> Result<(), TournamentError>;

    /// Tournaments of one club, newest first.
    fn list_for_club(&self, club_id: ClubId) -> Vec<Tournament>;

    fn subscribe(&self, id: TournamentId) -> Result<Subscription, TournamentError>;
}

/// A live view of one tournament, owned by the caller. Dropping it unsubscribes.
///
/// Every update is a full snapshot.
pub struct Subscription {
    rx: watch::Receiver<Tournament>,
}

impl Subscription {
    /// Most recent snapshot.
    pub fn latest(&self) -> Tournament {
        self.rx.borrow().clone()
    }

    /// Wait for the next snapshot. `None` once the tournament has been deleted.
    pub async fn changed(&mut self) -> Option<Tournament> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

struct Entry {
    tournament: Tournament,
    updates: watch::Sender<Tournament>,
}

impl Entry {
    fn commit(&mut self, mut tournament: Tournament) -> Tournament {
        tournament.version = self.tournament.version + 1;
        self.tournament = tournament.clone();
        self.updates.send_replace(tournament.clone());
        tournament
    }
}

/// In-process store. State lives for the lifetime of the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<TournamentId, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TournamentStore for MemoryStore {
    fn insert(&self, mut tournament: Tournament) -> Result<Tournament, TournamentError> {
        let mut g = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if g.contains_key(&tournament.id) {
            return Err(TournamentError::InvalidState);
        }
        tournament.version = 1;
        let (updates, _) = watch::channel(tournament.clone());
        g.insert(
            tournament.id,
            Entry {
                tournament: tournament.clone(),
                updates,
            },
        );
        Ok(tournament)
    }

    fn load(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        let g = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        g.get(&id)
            .map(|e| e.tournament.clone())
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    fn save(&self, tournament: Tournament) -> Result<Tournament, TournamentError> {
        let mut g = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = g
            .get_mut(&tournament.id)
            .ok_or(TournamentError::TournamentNotFound(tournament.id))?;
        if entry.tournament.version != tournament.version {
            return Err(TournamentError::ConcurrentModification {
                expected: tournament.version,
                found: entry.tournament.version,
            });
        }
        Ok(entry.commit(tournament))
    }

    fn update<T, F>(&self, id: TournamentId, f: F) -> Result<(Tournament, T), TournamentError>
    where
        F: FnOnce(&mut Tournament) -> Result<T, TournamentError>,
    {
        let mut g = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = g.get_mut(&id).ok_or(TournamentError::TournamentNotFound(id))?;
        let mut working = entry.tournament.clone();
        let out = f(&mut working)?;
        Ok((entry.commit(working), out))
    }

    fn delete(&self, id: TournamentId) -> Result<(), TournamentError> {
        let mut g = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        g.remove(&id)
            .map(|_| ())
            .ok_or(TournamentError::TournamentNotFound(id))
    }

    fn list_for_club(&self, club_id: ClubId) -> Vec<Tournament> {
        let g = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut list: Vec<Tournament> = g
            .values()
            .filter(|e| e.tournament.club_id == club_id)
            .map(|e| e.tournament.clone())
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    fn subscribe(&self, id: TournamentId) -> Result<Subscription, TournamentError> {
        let g = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = g.get(&id).ok_or(TournamentError::TournamentNotFound(id))?;
        Ok(Subscription {
            rx: entry.updates.subscribe(),
        })
    }
}
