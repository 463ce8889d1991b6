//! Single binary web server: JSON REST API over the tournament engine.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set TOURNAMENT_SEED to a u64 for reproducible pairings and tie-breaks.

use actix_web::{
    delete, get, post,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chess_brawl::{
    Engine, EventType, MemoryStore, PlayerId, Rules, SeededRandom, TournamentError,
    TournamentStatus,
};
use serde::Deserialize;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory state: one engine behind a lock. A write guard is held for the
/// whole operation, including the cascade after a match finish.
type AppState = Data<RwLock<Engine<MemoryStore, SeededRandom>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreatePlayerBody {
    name: String,
    nickname: String,
    rating: i32,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    player_ids: Vec<PlayerId>,
}

#[derive(Deserialize)]
struct RegisterEventBody {
    player_id: PlayerId,
    event_type: EventType,
}

#[derive(Deserialize)]
struct TournamentFilter {
    status: Option<TournamentStatus>,
}

#[derive(Deserialize)]
struct NicknameQuery {
    nickname: String,
}

/// Path segment: entity id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct IdPath {
    id: Uuid,
}

/// Path segments: tournament id and player id (e.g. /api/tournaments/{id}/players/{player_id})
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: Uuid,
    player_id: Uuid,
}

#[derive(Deserialize)]
struct TournamentRoundPath {
    id: Uuid,
    round_id: Uuid,
}

/// Map an engine error to a JSON error response.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::NotFound { .. } | TournamentError::UnknownNickname(_) => {
            HttpResponse::NotFound().json(body)
        }
        TournamentError::BracketIntegrity { .. } => {
            log::error!("{e}");
            HttpResponse::InternalServerError().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn read(state: &AppState) -> Option<RwLockReadGuard<'_, Engine<MemoryStore, SeededRandom>>> {
    state.read().ok()
}

fn write(state: &AppState) -> Option<RwLockWriteGuard<'_, Engine<MemoryStore, SeededRandom>>> {
    state.write().ok()
}

/// Serialize `Ok` as 200 JSON, `Err` through `error_response`.
fn respond<T: serde::Serialize>(result: Result<T, TournamentError>) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(e) => error_response(&e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "chess-brawl",
    })
}

#[get("/api/event-types")]
async fn api_event_types() -> HttpResponse {
    let names: Vec<&str> = EventType::ALL.iter().map(|t| t.as_str()).collect();
    HttpResponse::Ok().json(names)
}

/// Register a player (unique nickname, rating 1..=15000).
#[post("/api/players")]
async fn api_create_player(state: AppState, body: Json<CreatePlayerBody>) -> HttpResponse {
    let Some(mut engine) = write(&state) else {
        return lock_error();
    };
    match engine.register_player(&body.name, &body.nickname, body.rating) {
        Ok(player) => HttpResponse::Created().json(player),
        Err(e) => error_response(&e),
    }
}

#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let Some(engine) = read(&state) else {
        return lock_error();
    };
    HttpResponse::Ok().json(engine.players())
}

/// Case-insensitive lookup: /api/players/search?nickname=...
#[get("/api/players/search")]
async fn api_search_player(state: AppState, query: Query<NicknameQuery>) -> HttpResponse {
    let Some(engine) = read(&state) else {
        return lock_error();
    };
    respond(engine.player_by_nickname(&query.nickname))
}

#[get("/api/players/{id}")]
async fn api_get_player(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let Some(engine) = read(&state) else {
        return lock_error();
    };
    respond(engine.player(path.id))
}

/// Create a tournament with its initial players (4 or 8).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let Some(mut engine) = write(&state) else {
        return lock_error();
    };
    match engine.create_tournament(&body.name, &body.player_ids) {
        Ok(t) => HttpResponse::Created().json(t),
        Err(e) => error_response(&e),
    }
}

/// List tournaments, optionally filtered with ?status=IN_PROGRESS.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState, filter: Query<TournamentFilter>) -> HttpResponse {
    let Some(engine) = read(&state) else {
        return lock_error();
    };
    HttpResponse::Ok().json(engine.tournaments(filter.status))
}

#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let Some(engine) = read(&state) else {
        return lock_error();
    };
    respond(engine.tournament(path.id))
}

/// Enroll a player (tournament must be CREATED).
#[post("/api/tournaments/{id}/players/{player_id}")]
async fn api_enroll_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    let Some(mut engine) = write(&state) else {
        return lock_error();
    };
    respond(engine.enroll_player(path.id, path.player_id))
}

/// Withdraw a player (tournament must be CREATED).
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_withdraw_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    let Some(mut engine) = write(&state) else {
        return lock_error();
    };
    respond(engine.withdraw_player(path.id, path.player_id))
}

/// Start the tournament (CREATED -> IN_PROGRESS) and pair round 1.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let Some(mut engine) = write(&state) else {
        return lock_error();
    };
    respond(engine.start_tournament(path.id))
}

/// Advance the bracket if it has not advanced yet (no-op otherwise).
#[post("/api/tournaments/{id}/rounds/next")]
async fn api_next_round(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let Some(mut engine) = write(&state) else {
        return lock_error();
    };
    respond(engine.create_next_round(path.id))
}

#[get("/api/tournaments/{id}/rounds")]
async fn api_list_rounds(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let Some(engine) = read(&state) else {
        return lock_error();
    };
    respond(engine.rounds(path.id))
}

#[get("/api/tournaments/{id}/rounds/{round_id}")]
async fn api_get_round(state: AppState, path: Path<TournamentRoundPath>) -> HttpResponse {
    let Some(engine) = read(&state) else {
        return lock_error();
    };
    respond(engine.tournament_round(path.id, path.round_id))
}

#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let Some(engine) = read(&state) else {
        return lock_error();
    };
    respond(engine.standings(path.id))
}

#[get("/api/tournaments/{id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let Some(engine) = read(&state) else {
        return lock_error();
    };
    let players = match engine.standings(path.id) {
        Ok(players) => players,
        Err(e) => return error_response(&e),
    };
    match chess_brawl::logic::standings_csv(&players) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => {
            log::error!("standings export failed: {e}");
            HttpResponse::InternalServerError().body("export error")
        }
    }
}

#[get("/api/rounds/{id}/matches")]
async fn api_round_matches(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let Some(engine) = read(&state) else {
        return lock_error();
    };
    respond(engine.matches_in_round(path.id))
}

#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let Some(engine) = read(&state) else {
        return lock_error();
    };
    respond(engine.game_match(path.id))
}

/// PENDING -> IN_PROGRESS.
#[post("/api/matches/{id}/start")]
async fn api_start_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let Some(mut engine) = write(&state) else {
        return lock_error();
    };
    respond(engine.start_match(path.id))
}

/// Register one scored event for a player in an in-progress match.
#[post("/api/matches/{id}/events")]
async fn api_register_event(
    state: AppState,
    path: Path<IdPath>,
    body: Json<RegisterEventBody>,
) -> HttpResponse {
    let Some(mut engine) = write(&state) else {
        return lock_error();
    };
    respond(engine.register_event(path.id, body.player_id, body.event_type))
}

#[get("/api/matches/{id}/events")]
async fn api_match_events(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let Some(engine) = read(&state) else {
        return lock_error();
    };
    respond(engine.events_for_match(path.id))
}

/// Finish a match; the response lists every signal the cascade emitted.
#[post("/api/matches/{id}/finish")]
async fn api_finish_match(state: AppState, path: Path<IdPath>) -> HttpResponse {
    let Some(mut engine) = write(&state) else {
        return lock_error();
    };
    respond(engine.finish_match(path.id))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let rng = match std::env::var("TOURNAMENT_SEED").ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => {
            log::info!("Using fixed random seed {}", seed);
            SeededRandom::from_seed_u64(seed)
        }
        None => SeededRandom::from_entropy(),
    };
    let rules = Rules::from_env();
    log::info!(
        "Rules: win +{}, blitz +{}",
        rules.win_bonus,
        rules.blitz_bonus
    );

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(Engine::new(MemoryStore::new(), rng, rules)));

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_event_types)
            .service(api_create_player)
            .service(api_list_players)
            .service(api_search_player)
            .service(api_get_player)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_enroll_player)
            .service(api_withdraw_player)
            .service(api_start_tournament)
            .service(api_next_round)
            .service(api_list_rounds)
            .service(api_get_round)
            .service(api_standings)
            .service(api_standings_csv)
            .service(api_round_matches)
            .service(api_get_match)
            .service(api_start_match)
            .service(api_register_event)
            .service(api_match_events)
            .service(api_finish_match)
    })
    .bind(bind)?
    .run()
    .await
}
