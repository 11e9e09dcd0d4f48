//! Single binary web server: REST API for clubs, rosters and tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, WATCH_TIMEOUT_SECS.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use badminton_tournament_web::{
    create_tournament, edit_score, reset_tournament, submit_score, tournament_standings,
    write_standings_csv, Club, ClubId, MatchId, MemoryStore, Pairing, PlayerId, ServerConfig,
    Standing, Tournament, TournamentError, TournamentId, TournamentStore,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

/// In-memory state: clubs with rosters, and the tournament store.
struct AppState {
    clubs: RwLock<HashMap<ClubId, Club>>,
    tournaments: MemoryStore,
    watch_timeout: Duration,
}

type State = Data<AppState>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Tournament plus its current standings.
#[derive(Serialize)]
struct TournamentView<'a> {
    #[serde(flatten)]
    tournament: &'a Tournament,
    standings: Vec<Standing>,
}

impl<'a> TournamentView<'a> {
    fn of(tournament: &'a Tournament) -> Self {
        Self {
            tournament,
            standings: tournament_standings(tournament),
        }
    }
}

#[derive(Deserialize)]
struct CreateClubBody {
    name: String,
    #[serde(default)]
    location: String,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    player_ids: Vec<PlayerId>,
    #[serde(default)]
    pairing: Pairing,
}

#[derive(Deserialize)]
struct ScoreBody {
    score_1: i64,
    score_2: i64,
}

#[derive(Deserialize)]
struct WatchQuery {
    #[serde(default)]
    since: u64,
}

/// Path segment: club id (e.g. /api/clubs/{id})
#[derive(Deserialize)]
struct ClubPath {
    id: ClubId,
}

/// Path segments: club id and player id (e.g. /api/clubs/{id}/players/{player_id})
#[derive(Deserialize)]
struct ClubPlayerPath {
    id: ClubId,
    player_id: PlayerId,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::TournamentNotFound(_)
        | TournamentError::ClubNotFound(_)
        | TournamentError::MatchNotFound(_)
        | TournamentError::PlayerNotFound(_) => HttpResponse::NotFound().json(body),
        TournamentError::ConcurrentModification { .. } => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-tournament-web",
    })
}

/// Register a club (returns it with id).
#[post("/api/clubs")]
async fn api_create_club(state: State, body: Json<CreateClubBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return error_response(&TournamentError::EmptyName);
    }
    let club = Club::new(name, body.location.trim());
    let mut g = match state.clubs.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Registered club {} ({})", club.id, club.name);
    let resp = HttpResponse::Ok().json(&club);
    g.insert(club.id, club);
    resp
}

#[get("/api/clubs/{id}")]
async fn api_get_club(state: State, path: Path<ClubPath>) -> HttpResponse {
    let g = match state.clubs.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(club) => HttpResponse::Ok().json(club),
        None => error_response(&TournamentError::ClubNotFound(path.id)),
    }
}

/// Add a player to a club roster.
#[post("/api/clubs/{id}/players")]
async fn api_add_player(state: State, path: Path<ClubPath>, body: Json<AddPlayerBody>) -> HttpResponse {
    let mut g = match state.clubs.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let club = match g.get_mut(&path.id) {
        Some(c) => c,
        None => return error_response(&TournamentError::ClubNotFound(path.id)),
    };
    match club.add_player(&body.name) {
        Ok(_) => HttpResponse::Ok().json(&*club),
        Err(e) => error_response(&e),
    }
}

/// Remove a player from a club roster. Existing tournaments keep their snapshot.
#[delete("/api/clubs/{id}/players/{player_id}")]
async fn api_remove_player(state: State, path: Path<ClubPlayerPath>) -> HttpResponse {
    let mut g = match state.clubs.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let club = match g.get_mut(&path.id) {
        Some(c) => c,
        None => return error_response(&TournamentError::ClubNotFound(path.id)),
    };
    match club.remove_player(path.player_id) {
        Ok(()) => HttpResponse::Ok().json(&*club),
        Err(e) => error_response(&e),
    }
}

/// Import roster players from a CSV body with a `name` column.
#[post("/api/clubs/{id}/players/import")]
async fn api_import_players(state: State, path: Path<ClubPath>, body: String) -> HttpResponse {
    let mut g = match state.clubs.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let club = match g.get_mut(&path.id) {
        Some(c) => c,
        None => return error_response(&TournamentError::ClubNotFound(path.id)),
    };
    match club.import_players_csv(body.as_bytes()) {
        Ok(added) => {
            log::info!("Imported {} player(s) into club {}", added, club.id);
            HttpResponse::Ok().json(&*club)
        }
        Err(e) => error_response(&e),
    }
}

/// Club tournaments, newest first.
#[get("/api/clubs/{id}/tournaments")]
async fn api_list_tournaments(state: State, path: Path<ClubPath>) -> HttpResponse {
    HttpResponse::Ok().json(state.tournaments.list_for_club(path.id))
}

/// Create a tournament from roster players; the round robin is generated immediately.
#[post("/api/clubs/{id}/tournaments")]
async fn api_create_tournament(
    state: State,
    path: Path<ClubPath>,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let players = {
        let g = match state.clubs.read() {
            Ok(guard) => guard,
            Err(_) => return HttpResponse::InternalServerError().body("lock error"),
        };
        let club = match g.get(&path.id) {
            Some(c) => c,
            None => return error_response(&TournamentError::ClubNotFound(path.id)),
        };
        match club.select_players(&body.player_ids) {
            Ok(p) => p,
            Err(e) => return error_response(&e),
        }
    };
    let created = create_tournament(&body.name, path.id, players, &body.pairing)
        .and_then(|t| state.tournaments.insert(t));
    match created {
        Ok(t) => HttpResponse::Ok().json(TournamentView::of(&t)),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: State, path: Path<TournamentPath>) -> HttpResponse {
    match state.tournaments.load(path.id) {
        Ok(t) => HttpResponse::Ok().json(TournamentView::of(&t)),
        Err(e) => error_response(&e),
    }
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: State, path: Path<TournamentPath>) -> HttpResponse {
    match state.tournaments.delete(path.id) {
        Ok(()) => {
            log::info!("Deleted tournament {}", path.id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => error_response(&e),
    }
}

/// Submit a final score for a pending match; advances the tournament.
#[put("/api/tournaments/{id}/matches/{match_id}/score")]
async fn api_submit_score(
    state: State,
    path: Path<TournamentMatchPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    let result = state
        .tournaments
        .update(path.id, |t| submit_score(t, path.match_id, body.score_1, body.score_2));
    match result {
        Ok((t, progress)) => {
            log::debug!("Tournament {} progress: {:?}", t.id, progress);
            HttpResponse::Ok().json(TournamentView::of(&t))
        }
        Err(e) => error_response(&e),
    }
}

/// Reopen a completed match for editing.
#[post("/api/tournaments/{id}/matches/{match_id}/edit")]
async fn api_edit_score(state: State, path: Path<TournamentMatchPath>) -> HttpResponse {
    match state.tournaments.update(path.id, |t| edit_score(t, path.match_id)) {
        Ok((t, ())) => HttpResponse::Ok().json(TournamentView::of(&t)),
        Err(e) => error_response(&e),
    }
}

/// Reset: discard all matches and regenerate the round robin.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset_tournament(state: State, path: Path<TournamentPath>) -> HttpResponse {
    match state.tournaments.update(path.id, reset_tournament) {
        Ok((t, ())) => HttpResponse::Ok().json(TournamentView::of(&t)),
        Err(e) => error_response(&e),
    }
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: State, path: Path<TournamentPath>) -> HttpResponse {
    let t = match state.tournaments.load(path.id) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    let mut buf = Vec::new();
    match write_standings_csv(&t, &mut buf) {
        Ok(()) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(buf),
        Err(e) => error_response(&e),
    }
}

/// Long poll: returns once the tournament version exceeds `since`, or the current
/// snapshot after the watch timeout.
#[get("/api/tournaments/{id}/watch")]
async fn api_watch_tournament(
    state: State,
    path: Path<TournamentPath>,
    query: Query<WatchQuery>,
) -> HttpResponse {
    let mut subscription = match state.tournaments.subscribe(path.id) {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };
    let current = subscription.latest();
    if current.version > query.since {
        return HttpResponse::Ok().json(TournamentView::of(&current));
    }
    match tokio::time::timeout(state.watch_timeout, subscription.changed()).await {
        Ok(Some(t)) => HttpResponse::Ok().json(TournamentView::of(&t)),
        Ok(None) => error_response(&TournamentError::TournamentNotFound(path.id)),
        Err(_) => HttpResponse::Ok().json(TournamentView::of(&current)),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(AppState {
        clubs: RwLock::new(HashMap::new()),
        tournaments: MemoryStore::new(),
        watch_timeout: config.watch_timeout,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_club)
            .service(api_get_club)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_import_players)
            .service(api_list_tournaments)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_submit_score)
            .service(api_edit_score)
            .service(api_reset_tournament)
            .service(api_standings_csv)
            .service(api_watch_tournament)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
