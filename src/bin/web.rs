//! Single binary web server exposing the draw engine as a REST API.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use padel_draw_web::{
    pool_standings, propagate_winners, read_pairs_csv, setup_and_populate_tournament,
    update_score, validate, DrawError, Entrant, GameId, PlayerPair, Score, Tournament, TournamentConfig,
    TournamentId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: tournaments by id. Entries are removed after inactivity.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Inactivity threshold: tournaments not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Serialize)]
struct ValidationResponse {
    valid: bool,
    errors: Vec<String>,
}

#[derive(Deserialize)]
struct NewPair {
    player1: String,
    player2: String,
    #[serde(default)]
    seed: u32,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    config: TournamentConfig,
    pairs: Vec<NewPair>,
}

#[derive(Deserialize)]
struct SetScoreBody {
    score: Score,
}

#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct GamePath {
    id: TournamentId,
    game_id: GameId,
}

fn error_response(e: &DrawError) -> HttpResponse {
    match e {
        DrawError::GameNotFound(_) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
        DrawError::InvalidConfig(errors) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string(), "errors": errors }))
        }
        _ => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-draw-web",
    })
}

/// Check a configuration without building anything.
#[post("/api/config/validate")]
async fn api_validate_config(body: Json<TournamentConfig>) -> HttpResponse {
    let errors = validate(&body);
    HttpResponse::Ok().json(ValidationResponse {
        valid: errors.is_empty(),
        errors,
    })
}

/// Parse a CSV body (`player1,player2,seed`) into pairs.
#[post("/api/pairs/import")]
async fn api_import_pairs(body: String) -> HttpResponse {
    match read_pairs_csv(body.as_bytes()) {
        Ok(pairs) => HttpResponse::Ok().json(pairs),
        Err(e) => error_response(&e),
    }
}

/// Build and populate a tournament, then advance byes.
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let pairs: Vec<PlayerPair> = body
        .pairs
        .into_iter()
        .map(|p| PlayerPair::new(p.player1.trim(), p.player2.trim()).with_seed(p.seed))
        .collect();
    let mut tournament = match setup_and_populate_tournament(body.config, pairs, &mut rand::thread_rng()) {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    propagate_winners(&mut tournament);

    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g.entry(id).or_insert(TournamentEntry {
        tournament,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(&entry.tournament)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => not_found(),
    }
}

/// Pool tables ranked by wins.
#[get("/api/tournaments/{id}/standings")]
async fn api_get_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => {
            let standings: Vec<_> = pool_standings(&entry.tournament)
                .into_iter()
                .map(|(pool, rows)| {
                    let names: Vec<String> = rows
                        .iter()
                        .map(|row| entry.tournament.entrant_name(Entrant::Pair(row.pair)))
                        .collect();
                    serde_json::json!({ "pool": pool, "standings": rows, "names": names })
                })
                .collect();
            HttpResponse::Ok().json(standings)
        }
        None => not_found(),
    }
}

/// Record a game's score and propagate.
#[put("/api/tournaments/{id}/games/{game_id}/score")]
async fn api_set_score(state: AppState, path: Path<GamePath>, body: Json<SetScoreBody>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match update_score(t, path.game_id, Some(body.into_inner().score)) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

/// Clear a game's score and propagate.
#[delete("/api/tournaments/{id}/games/{game_id}/score")]
async fn api_clear_score(state: AppState, path: Path<GamePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match update_score(t, path.game_id, None) {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
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
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_validate_config)
            .service(api_import_pairs)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_get_standings)
            .service(api_set_score)
            .service(api_clear_score)
    })
    .bind(bind)?
    .run()
    .await
}
