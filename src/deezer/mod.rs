//! Deezer catalog API client.
//!
//! The public catalog endpoints require no authentication. Deezer can report
//! a failure inside an HTTP 200 response as `{"error": {"message": ...}}`,
//! so every call checks that envelope after the status line.

use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.deezer.com";

const USER_AGENT: &str = "MusicTriviaGame/1.0";

/// Deezer API client over one shared HTTP connection pool.
#[derive(Clone)]
pub struct DeezerClient {
    client: Client,
    base_url: String,
}

impl DeezerClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetch the full genre taxonomy.
    pub async fn genres(&self) -> Result<Vec<DeezerGenre>, String> {
        let url = format!("{}/genre", self.base_url);
        self.get_list(&url, "genres").await
    }

    /// List up to `limit` artists for a taxonomy genre.
    pub async fn genre_artists(&self, genre_id: u32, limit: u32) -> Result<Vec<DeezerArtist>, String> {
        let url = format!("{}/genre/{}/artists?limit={}", self.base_url, genre_id, limit);
        self.get_list(&url, "artists").await
    }

    /// Fetch an artist's top tracks.
    pub async fn artist_top(&self, artist_id: u64, limit: u32) -> Result<Vec<DeezerTrack>, String> {
        let url = format!("{}/artist/{}/top?limit={}", self.base_url, artist_id, limit);
        self.get_list(&url, "top tracks").await
    }

    async fn get_list<T>(&self, url: &str, what: &str) -> Result<Vec<T>, String>
    where
        T: serde::de::DeserializeOwned,
    {
        let res = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| format!("{} request failed: {}", what, e))?;

        if !res.status().is_success() {
            return Err(format!("Failed to fetch {}: {}", what, res.status()));
        }

        let body: ListEnvelope<T> = res
            .json()
            .await
            .map_err(|e| format!("{} parse failed: {}", what, e))?;

        if let Some(err) = body.error {
            return Err(err
                .message
                .unwrap_or_else(|| format!("Failed to fetch {} from Deezer", what)));
        }

        Ok(body.data.unwrap_or_default())
    }
}

/// `{"data": [...]}` on success, `{"error": {...}}` on failure - both with
/// a 200 status, and occasionally with neither field present.
#[derive(Deserialize)]
struct ListEnvelope<T> {
    data: Option<Vec<T>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
}

/// A taxonomy genre as Deezer reports it.
#[derive(Clone, Debug, Deserialize)]
pub struct DeezerGenre {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub picture_small: Option<String>,
    #[serde(default)]
    pub picture_medium: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeezerArtist {
    pub id: u64,
    pub name: String,
}

/// A track from `/artist/{id}/top`. Preview and title show up empty often
/// enough that both default rather than fail the whole page of results.
#[derive(Clone, Debug, Deserialize)]
pub struct DeezerTrack {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub artist: Option<DeezerTrackArtist>,
    #[serde(default)]
    pub album: Option<DeezerAlbum>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeezerTrackArtist {
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DeezerAlbum {
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(default)]
    pub cover_medium: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_envelope_parses_sparse_payloads() {
        let raw = r#"{"data": [
            {"id": 3135556, "title": "Harder, Better, Faster, Stronger",
             "preview": "https://cdn.example/preview.mp3",
             "artist": {"name": "Daft Punk"},
             "album": {"cover": "c.jpg", "cover_medium": "cm.jpg"}},
            {"id": 12, "title": "No Preview"}
        ]}"#;
        let envelope: ListEnvelope<DeezerTrack> = serde_json::from_str(raw).unwrap();
        let tracks = envelope.data.unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].artist.as_ref().unwrap().name, "Daft Punk");
        assert_eq!(tracks[1].preview, "");
        assert!(tracks[1].artist.is_none());
    }

    #[test]
    fn error_envelope_is_detected() {
        let raw = r#"{"error": {"type": "DataException", "message": "no data", "code": 800}}"#;
        let envelope: ListEnvelope<DeezerTrack> = serde_json::from_str(raw).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.error.unwrap().message.as_deref(), Some("no data"));
    }

    #[test]
    fn genre_envelope_parses() {
        let raw = r#"{"data": [{"id": 152, "name": "Rock", "picture": "p.jpg"}]}"#;
        let envelope: ListEnvelope<DeezerGenre> = serde_json::from_str(raw).unwrap();
        let genres = envelope.data.unwrap();
        assert_eq!(genres[0].id, 152);
        assert!(genres[0].picture_medium.is_none());
    }
}
