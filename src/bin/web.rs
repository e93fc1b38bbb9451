//! Single binary web server: JSON API for shared Americano tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Env: HOST, PORT, SHARE_TTL_HOURS (default 24), STATIC_DIR (served at /static if it exists).

use actix_files::Files;
use actix_web::{
    delete, get, patch, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpRequest, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use padel_americano::import::read_roster;
use padel_americano::share::{PlayerPatch, ShareError, ShareStore, DEFAULT_TTL_HOURS};
use padel_americano::{generate_schedule, Player, Round, Strategy, Tournament, TournamentError};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use std::time::Duration;

/// In-memory share store. Every request touching a tournament goes through this lock.
type AppState = Data<RwLock<ShareStore>>;

const PIN_HEADER: &str = "X-Tournament-Pin";

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct TournamentBody {
    tournament: Tournament,
}

#[derive(Deserialize)]
struct ScheduleBody {
    players: Vec<Player>,
}

#[derive(Serialize)]
struct ScheduleResponse {
    rounds: Vec<Round>,
    perfectly_balanced: bool,
}

#[derive(Deserialize)]
struct SetScoresBody {
    round_index: usize,
    match_id: String,
    score_a: Option<u32>,
    score_b: Option<u32>,
}

#[derive(Deserialize)]
struct StandingsQuery {
    #[serde(default)]
    prize: bool,
}

/// Path segment: share id (e.g. /api/game/{id})
#[derive(Deserialize)]
struct GamePath {
    id: String,
}

fn pin(req: &HttpRequest) -> Option<&str> {
    req.headers().get(PIN_HEADER).and_then(|v| v.to_str().ok())
}

fn error_response(e: ShareError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ShareError::NotFound => HttpResponse::NotFound().json(body),
        ShareError::PinRequired => HttpResponse::Unauthorized().json(body),
        ShareError::InvalidPin => HttpResponse::Forbidden().json(body),
        ShareError::Tournament(TournamentError::DuplicatePlayerName) => {
            HttpResponse::Conflict().json(body)
        }
        ShareError::Tournament(TournamentError::PlayerNotFound(_))
        | ShareError::Tournament(TournamentError::RoundNotFound(_))
        | ShareError::Tournament(TournamentError::MatchNotFound(_)) => {
            HttpResponse::NotFound().json(body)
        }
        ShareError::Tournament(_) => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(serde_json::json!({ "error": "lock error" }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-americano",
    })
}

/// Stateless: full schedule for a posted roster.
#[post("/api/schedule")]
async fn api_schedule(body: Json<ScheduleBody>) -> HttpResponse {
    let players = body.into_inner().players;
    HttpResponse::Ok().json(ScheduleResponse {
        rounds: generate_schedule(&players),
        perfectly_balanced: Strategy::for_roster(players.len()).is_perfectly_balanced(),
    })
}

/// CSV body (header row with at least `name`) to players.
#[post("/api/roster/import")]
async fn api_import_roster(body: web::Bytes) -> HttpResponse {
    match read_roster(body.as_ref()) {
        Ok(players) => HttpResponse::Ok().json(players),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Share a tournament; the response carries the PIN, which is not shown again.
#[post("/api/game")]
async fn api_create_game(state: AppState, body: Json<TournamentBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let created = g.create(body.into_inner().tournament, &mut rand::thread_rng(), Utc::now());
    log::info!("Shared tournament {} created", created.id);
    HttpResponse::Created().json(created)
}

/// Public read, without the PIN hash.
#[get("/api/game/{id}")]
async fn api_get_game(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(&path.id, Utc::now()) {
        Ok(entry) => HttpResponse::Ok().json(entry.view()),
        Err(e) => error_response(e),
    }
}

/// Replace the tournament (PIN).
#[put("/api/game/{id}")]
async fn api_update_game(
    state: AppState,
    path: Path<GamePath>,
    req: HttpRequest,
    body: Json<TournamentBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.update(&path.id, pin(&req), body.into_inner().tournament, Utc::now()) {
        Ok(entry) => HttpResponse::Ok().json(entry.view()),
        Err(e) => error_response(e),
    }
}

/// Delete the tournament (PIN).
#[delete("/api/game/{id}")]
async fn api_delete_game(state: AppState, path: Path<GamePath>, req: HttpRequest) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.delete(&path.id, pin(&req), Utc::now()) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(e) => error_response(e),
    }
}

/// Kiosk: toggle a player's active flag or add a player (no PIN).
#[patch("/api/game/{id}/players")]
async fn api_patch_players(
    state: AppState,
    path: Path<GamePath>,
    body: Json<PlayerPatch>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.patch_players(&path.id, body.into_inner(), Utc::now()) {
        Ok(t) => HttpResponse::Ok().json(serde_json::json!({ "id": path.id, "tournament": t })),
        Err(e) => error_response(e),
    }
}

/// Enter or clear both scores of one match (PIN).
#[put("/api/game/{id}/scores")]
async fn api_set_scores(
    state: AppState,
    path: Path<GamePath>,
    req: HttpRequest,
    body: Json<SetScoresBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g.with_tournament_mut(&path.id, pin(&req), Utc::now(), |t| {
        t.set_scores(body.round_index, &body.match_id, body.score_a, body.score_b)?;
        Ok(t.clone())
    });
    match result {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Append the next round (PIN). Starts the tournament first if needed.
#[post("/api/game/{id}/rounds")]
async fn api_add_round(state: AppState, path: Path<GamePath>, req: HttpRequest) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g.with_tournament_mut(&path.id, pin(&req), Utc::now(), |t| {
        if !t.is_started {
            t.start()?;
            if !t.rounds.is_empty() {
                return Ok(t.clone());
            }
        }
        t.add_round()?;
        Ok(t.clone())
    });
    match result {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Append the finals round for the current top four (PIN).
#[post("/api/game/{id}/championship")]
async fn api_add_championship(
    state: AppState,
    path: Path<GamePath>,
    req: HttpRequest,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let result = g.with_tournament_mut(&path.id, pin(&req), Utc::now(), |t| {
        t.add_championship_round()?;
        Ok(t.clone())
    });
    match result {
        Ok(t) => HttpResponse::Ok().json(t),
        Err(e) => error_response(e),
    }
}

/// Leaderboard; `?prize=true` leaves out prize-exempt players.
#[get("/api/game/{id}/standings")]
async fn api_standings(
    state: AppState,
    path: Path<GamePath>,
    query: Query<StandingsQuery>,
) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(&path.id, Utc::now()) {
        Ok(entry) if query.prize => HttpResponse::Ok().json(entry.tournament.prize_standings()),
        Ok(entry) => HttpResponse::Ok().json(entry.tournament.standings()),
        Err(e) => error_response(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ttl_hours() -> i64 {
    DEFAULT_TTL_HOURS
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let ttl_hours: i64 = std::env::var("SHARE_TTL_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .filter(|h| *h > 0)
        .unwrap_or_else(default_ttl_hours);
    let static_dir = std::env::var("STATIC_DIR")
        .ok()
        .filter(|d| std::path::Path::new(d).is_dir());
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{} (shares live {}h)", bind.0, bind.1, ttl_hours);

    let state = Data::new(RwLock::new(ShareStore::new(chrono::Duration::hours(ttl_hours))));

    // Background task: every 30 minutes, drop expired shares
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let removed = g.purge_expired(Utc::now());
            if removed > 0 {
                log::info!("Cleaned up {} expired tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_schedule)
            .service(api_import_roster)
            .service(api_create_game)
            .service(api_get_game)
            .service(api_update_game)
            .service(api_delete_game)
            .service(api_patch_players)
            .service(api_set_scores)
            .service(api_add_round)
            .service(api_add_championship)
            .service(api_standings);
        match &static_dir {
            Some(dir) => app.service(Files::new("/static", dir.as_str())),
            None => app,
        }
    })
    .bind(bind)?
    .run()
    .await
}
