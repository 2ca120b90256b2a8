//! HTTP handlers for the trivia API.
//!
//! Song and genre routes never surface upstream failures; they answer with
//! the static fallback payload and a `fallback: true` marker instead, so
//! the game always has something to play.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::catalog::genres::{CuratedGenre, GenreSelector, CLASSIC_COUNTRY, INDIE_ROCK, MBP};
use crate::catalog::{self, Fetched, GenreEntry, Song};
use crate::deezer::DeezerClient;
use crate::error::AppError;
use crate::game::Difficulty;
use crate::leaderboard::{self, LeaderboardEntry, LeaderboardStore};

#[derive(Clone)]
pub struct AppState {
    pub deezer: DeezerClient,
    pub leaderboard: LeaderboardStore,
}

/// Query parameters for the taxonomy songs endpoint.
#[derive(Debug, Deserialize)]
pub struct SongsQuery {
    #[serde(rename = "genreId")]
    pub genre_id: Option<String>,
}

/// Song list payload. Live responses carry `count`; fallback responses
/// carry `fallback` and `error` instead; curated routes add `artists`.
#[derive(Debug, Serialize)]
pub struct SongsResponse {
    pub songs: Vec<Song>,
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn songs_response(
    genre: String,
    artists: Option<Vec<&'static str>>,
    result: Fetched<Vec<Song>>,
) -> SongsResponse {
    match result {
        Fetched::Live(songs) => SongsResponse {
            genre,
            artists,
            count: Some(songs.len()),
            songs,
            fallback: None,
            error: None,
        },
        Fetched::Fallback { data, reason } => SongsResponse {
            songs: data,
            genre,
            artists,
            count: None,
            fallback: Some(true),
            error: Some(reason),
        },
    }
}

#[derive(Debug, Serialize)]
pub struct GenresResponse {
    pub genres: Vec<GenreEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /health - Health check.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/genre - The genre directory, normalized from the taxonomy.
pub async fn genre_directory(State(state): State<AppState>) -> impl IntoResponse {
    let response = match catalog::fetch_genres(&state.deezer).await {
        Fetched::Live(genres) => GenresResponse {
            count: Some(genres.len()),
            genres,
            fallback: None,
            error: None,
        },
        Fetched::Fallback { data, reason } => GenresResponse {
            genres: data,
            count: None,
            fallback: Some(true),
            error: Some(reason),
        },
    };
    Json(response)
}

/// GET /api/deezer/songs?genreId=N - Songs for a taxonomy genre.
pub async fn deezer_songs(
    State(state): State<AppState>,
    Query(params): Query<SongsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let genre_id: u32 = params
        .genre_id
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .ok_or_else(|| AppError::BadRequest("Genre ID is required".into()))?;

    let mut rng = StdRng::from_entropy();
    let result =
        catalog::fetch_songs(&state.deezer, &GenreSelector::Taxonomy(genre_id), &mut rng).await;
    Ok(Json(songs_response(genre_id.to_string(), None, result)))
}

/// GET /api/classic-country/songs
pub async fn classic_country_songs(State(state): State<AppState>) -> impl IntoResponse {
    curated_songs(&state, &CLASSIC_COUNTRY).await
}

/// GET /api/indie-rock/songs
pub async fn indie_rock_songs(State(state): State<AppState>) -> impl IntoResponse {
    curated_songs(&state, &INDIE_ROCK).await
}

/// GET /api/mbp/songs
pub async fn mbp_songs(State(state): State<AppState>) -> impl IntoResponse {
    curated_songs(&state, &MBP).await
}

async fn curated_songs(state: &AppState, genre: &'static CuratedGenre) -> Json<SongsResponse> {
    let mut rng = StdRng::from_entropy();
    let result =
        catalog::fetch_songs(&state.deezer, &GenreSelector::Curated(genre), &mut rng).await;
    let artists = genre.artists.iter().map(|a| a.name).collect();
    Json(songs_response(genre.slug.to_string(), Some(artists), result))
}

#[derive(Debug, Deserialize)]
pub struct MockSongsQuery {
    pub genre: Option<String>,
}

/// The fixed-sample payload shape from before the catalog-backed routes.
#[derive(Debug, Serialize)]
pub struct MockSong {
    pub id: u64,
    pub artist: &'static str,
    pub title: &'static str,
    pub preview_url: &'static str,
    pub duration: u32,
}

/// GET /api/songs?genre=slug - Legacy mock endpoint, kept for older clients.
pub async fn mock_songs(Query(params): Query<MockSongsQuery>) -> impl IntoResponse {
    let genre = params.genre.unwrap_or_default();
    let songs = match genre.as_str() {
        "rock" => vec![MockSong {
            id: 1,
            artist: "Queen",
            title: "Bohemian Rhapsody",
            preview_url: "https://example.com/preview1.mp3",
            duration: 30,
        }],
        "pop" => vec![MockSong {
            id: 2,
            artist: "Taylor Swift",
            title: "Shake It Off",
            preview_url: "https://example.com/preview2.mp3",
            duration: 30,
        }],
        _ => Vec::new(),
    };
    Json(serde_json::json!({ "songs": songs, "genre": genre }))
}

#[derive(Debug, Deserialize)]
pub struct SaveScoreRequest {
    pub name: String,
    pub score: u32,
    pub genre: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
    pub count: usize,
}

/// GET /api/leaderboard - The stored top 10, best first.
pub async fn list_leaderboard(State(state): State<AppState>) -> impl IntoResponse {
    let entries = state.leaderboard.list();
    Json(LeaderboardResponse {
        count: entries.len(),
        entries,
    })
}

/// POST /api/leaderboard - Record a finished (or saved-and-exited) game.
pub async fn save_score(
    State(state): State<AppState>,
    Json(req): Json<SaveScoreRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = leaderboard::sanitize_name(&req.name);
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".into()));
    }

    let entry = LeaderboardEntry {
        name,
        score: req.score,
        genre: req.genre,
        difficulty: req.difficulty,
    };
    let entries = state
        .leaderboard
        .record(entry)
        .map_err(|e| AppError::Internal(format!("failed to save score: {}", e)))?;

    Ok((
        StatusCode::OK,
        Json(LeaderboardResponse {
            count: entries.len(),
            entries,
        }),
    ))
}

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/genre", get(genre_directory))
        .route("/api/deezer/songs", get(deezer_songs))
        .route("/api/classic-country/songs", get(classic_country_songs))
        .route("/api/indie-rock/songs", get(indie_rock_songs))
        .route("/api/mbp/songs", get(mbp_songs))
        .route("/api/songs", get(mock_songs))
        .route("/api/leaderboard", get(list_leaderboard).post(save_score))
}
