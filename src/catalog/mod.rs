//! Song gateway: turns Deezer catalog data into game-ready song pools.
//!
//! Every public fetch resolves to a usable payload. Upstream failures,
//! error envelopes, and empty post-filter results all collapse into the
//! static fallback data for the genre, tagged as such in the returned
//! [`Fetched`] so callers and tests can tell which path ran.

pub mod genres;

use futures::future::join_all;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::deezer::{DeezerArtist, DeezerClient, DeezerGenre, DeezerTrack};
use self::genres::{CuratedGenre, GenreSelector};

pub const PLACEHOLDER_COVER: &str = "/placeholder.svg?height=100&width=100";

/// Hard cap on a round's song pool.
const MAX_POOL_SIZE: usize = 100;
/// Artists requested from a taxonomy genre listing.
const TAXONOMY_ARTIST_LIMIT: u32 = 50;
/// Artists actually sampled from that listing.
const TAXONOMY_ARTIST_SAMPLE: usize = 15;
/// Top tracks per taxonomy artist.
const TAXONOMY_TOP_LIMIT: u32 = 8;
/// Top tracks per curated-roster artist.
const ROSTER_TOP_LIMIT: u32 = 15;

/// A track in the shape the game plays: identified, titled, attributed,
/// and (outside fallback data) previewable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub preview: String,
    pub cover: String,
}

/// A normalized genre directory entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenreEntry {
    pub id: u32,
    pub name: String,
    pub picture: Option<String>,
}

/// Outcome of a catalog fetch: live upstream data, or the static substitute
/// along with the reason the live path was abandoned.
#[derive(Clone, Debug, PartialEq)]
pub enum Fetched<T> {
    Live(T),
    Fallback { data: T, reason: String },
}

impl<T> Fetched<T> {
    pub fn data(&self) -> &T {
        match self {
            Fetched::Live(data) => data,
            Fetched::Fallback { data, .. } => data,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback { .. })
    }
}

/// Fetch the song pool for a genre. Never fails; see [`Fetched`].
pub async fn fetch_songs<R: Rng>(
    client: &DeezerClient,
    selector: &GenreSelector,
    rng: &mut R,
) -> Fetched<Vec<Song>> {
    match selector {
        GenreSelector::Taxonomy(id) => taxonomy_songs(client, *id, rng).await,
        GenreSelector::Curated(genre) => curated_songs(client, genre, rng).await,
    }
}

/// Fetch and normalize the genre directory, or the fixed substitute.
pub async fn fetch_genres(client: &DeezerClient) -> Fetched<Vec<GenreEntry>> {
    match client.genres().await {
        Ok(raw) => Fetched::Live(normalize_genres(raw)),
        Err(reason) => {
            tracing::warn!("genre directory unavailable, serving fallback: {}", reason);
            Fetched::Fallback {
                data: genres::fallback_directory(),
                reason,
            }
        }
    }
}

async fn taxonomy_songs<R: Rng>(
    client: &DeezerClient,
    genre_id: u32,
    rng: &mut R,
) -> Fetched<Vec<Song>> {
    let artists = match client.genre_artists(genre_id, TAXONOMY_ARTIST_LIMIT).await {
        Ok(artists) if !artists.is_empty() => artists,
        Ok(_) => return taxonomy_fallback(genre_id, "No artists found for this genre".into()),
        Err(reason) => return taxonomy_fallback(genre_id, reason),
    };

    let picked = pick_taxonomy_artists(artists, genre_id, rng);
    let tracks = collect_top_tracks(
        client,
        picked.into_iter().map(|a| (a.id, a.name)).collect(),
        TAXONOMY_TOP_LIMIT,
    )
    .await;

    match finish_pool(tracks, rng) {
        Some(songs) => Fetched::Live(songs),
        None => taxonomy_fallback(genre_id, "No valid songs found with preview URLs".into()),
    }
}

async fn curated_songs<R: Rng>(
    client: &DeezerClient,
    genre: &CuratedGenre,
    rng: &mut R,
) -> Fetched<Vec<Song>> {
    // Roster order is authored; only the resulting pool gets shuffled.
    let tracks = collect_top_tracks(
        client,
        genre
            .artists
            .iter()
            .map(|a| (a.id, a.name.to_string()))
            .collect(),
        ROSTER_TOP_LIMIT,
    )
    .await;

    match finish_pool(tracks, rng) {
        Some(songs) => Fetched::Live(songs),
        None => {
            tracing::warn!("serving fallback songs for {}: {}", genre.slug, genre.empty_reason);
            Fetched::Fallback {
                data: genres::expand_seeds(genre.fallback),
                reason: genre.empty_reason.to_string(),
            }
        }
    }
}

fn taxonomy_fallback(genre_id: u32, reason: String) -> Fetched<Vec<Song>> {
    tracing::warn!("serving fallback songs for genre {}: {}", genre_id, reason);
    Fetched::Fallback {
        data: genres::expand_seeds(&genres::DEEZER_FALLBACK),
        reason,
    }
}

/// Fetch top tracks for each artist concurrently. An artist whose fetch
/// fails contributes nothing; the batch itself never fails.
async fn collect_top_tracks(
    client: &DeezerClient,
    artists: Vec<(u64, String)>,
    limit: u32,
) -> Vec<DeezerTrack> {
    let fetches = artists.into_iter().map(|(id, name)| {
        let client = client.clone();
        async move {
            match client.artist_top(id, limit).await {
                Ok(tracks) => tracks,
                Err(e) => {
                    tracing::warn!("failed to fetch tracks for {} ({}): {}", name, id, e);
                    Vec::new()
                }
            }
        }
    });

    join_all(fetches).await.into_iter().flatten().collect()
}

/// Drop off-genre acts (rock only), then sample the listing.
fn pick_taxonomy_artists<R: Rng>(
    mut artists: Vec<DeezerArtist>,
    genre_id: u32,
    rng: &mut R,
) -> Vec<DeezerArtist> {
    if genre_id == genres::ROCK_GENRE_ID {
        artists.retain(|a| !genres::ROCK_DENY_LIST.contains(&a.name.as_str()));
    }
    artists.shuffle(rng);
    artists.truncate(TAXONOMY_ARTIST_SAMPLE);
    artists
}

/// Normalize, shuffle, cap. `None` means nothing playable survived.
fn finish_pool<R: Rng>(tracks: Vec<DeezerTrack>, rng: &mut R) -> Option<Vec<Song>> {
    let mut songs = normalize_tracks(tracks);
    if songs.is_empty() {
        return None;
    }
    songs.shuffle(rng);
    songs.truncate(MAX_POOL_SIZE);
    Some(songs)
}

/// Keep only playable, attributable tracks and map them to the game shape.
fn normalize_tracks(tracks: Vec<DeezerTrack>) -> Vec<Song> {
    tracks
        .into_iter()
        .filter_map(|track| {
            let artist = track.artist.map(|a| a.name).unwrap_or_default();
            if track.preview.is_empty() || track.title.is_empty() || artist.is_empty() {
                return None;
            }
            let album = track.album.unwrap_or_default();
            let cover = [album.cover_medium, album.cover]
                .into_iter()
                .flatten()
                .find(|c| !c.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_COVER.to_string());
            Some(Song {
                id: track.id,
                title: track.title,
                artist,
                preview: track.preview,
                cover,
            })
        })
        .collect()
}

fn normalize_genres(raw: Vec<DeezerGenre>) -> Vec<GenreEntry> {
    raw.into_iter()
        .map(|genre| {
            let picture = [genre.picture, genre.picture_medium, genre.picture_small]
                .into_iter()
                .flatten()
                .find(|p| !p.is_empty());
            GenreEntry {
                id: genre.id,
                name: genre.name,
                picture,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deezer::{DeezerAlbum, DeezerTrackArtist};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn track(id: u64, title: &str, artist: &str, preview: &str) -> DeezerTrack {
        DeezerTrack {
            id,
            title: title.to_string(),
            preview: preview.to_string(),
            artist: (!artist.is_empty()).then(|| DeezerTrackArtist {
                name: artist.to_string(),
            }),
            album: None,
        }
    }

    #[test]
    fn normalize_drops_unplayable_tracks() {
        let songs = normalize_tracks(vec![
            track(1, "Kept", "Artist", "https://cdn/p1.mp3"),
            track(2, "No Preview", "Artist", ""),
            track(3, "", "Artist", "https://cdn/p3.mp3"),
            track(4, "No Artist", "", "https://cdn/p4.mp3"),
        ]);
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].id, 1);
        assert_eq!(songs[0].cover, PLACEHOLDER_COVER);
    }

    #[test]
    fn normalize_prefers_medium_cover() {
        let mut t = track(9, "Covered", "Artist", "https://cdn/p.mp3");
        t.album = Some(DeezerAlbum {
            cover: Some("full.jpg".into()),
            cover_medium: Some("medium.jpg".into()),
        });
        let songs = normalize_tracks(vec![t.clone()]);
        assert_eq!(songs[0].cover, "medium.jpg");

        t.album = Some(DeezerAlbum {
            cover: Some("full.jpg".into()),
            cover_medium: None,
        });
        let songs = normalize_tracks(vec![t]);
        assert_eq!(songs[0].cover, "full.jpg");
    }

    #[test]
    fn rock_deny_list_applies_to_rock_only() {
        let listing: Vec<DeezerArtist> = ["Linkin Park", "Queen", "Skillet", "Eagles"]
            .iter()
            .enumerate()
            .map(|(i, name)| DeezerArtist {
                id: i as u64 + 1,
                name: name.to_string(),
            })
            .collect();

        let mut rng = Pcg32::seed_from_u64(7);
        let rock = pick_taxonomy_artists(listing.clone(), genres::ROCK_GENRE_ID, &mut rng);
        assert!(rock.iter().all(|a| a.name != "Linkin Park" && a.name != "Skillet"));
        assert_eq!(rock.len(), 2);

        let mut rng = Pcg32::seed_from_u64(7);
        let jazz = pick_taxonomy_artists(listing, 129, &mut rng);
        assert_eq!(jazz.len(), 4);
    }

    #[test]
    fn taxonomy_sample_caps_at_fifteen() {
        let listing: Vec<DeezerArtist> = (0..50)
            .map(|i| DeezerArtist {
                id: i,
                name: format!("Artist {}", i),
            })
            .collect();
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(pick_taxonomy_artists(listing, 129, &mut rng).len(), 15);
    }

    #[test]
    fn pool_shuffle_is_deterministic_under_a_seed() {
        let tracks: Vec<DeezerTrack> = (0..8)
            .map(|i| track(i, &format!("Song {}", i), "Artist", "https://cdn/p.mp3"))
            .collect();

        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);
        let a = finish_pool(tracks.clone(), &mut rng_a).unwrap();
        let b = finish_pool(tracks, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pool_caps_at_one_hundred() {
        let tracks: Vec<DeezerTrack> = (0..150)
            .map(|i| track(i, &format!("Song {}", i), "Artist", "https://cdn/p.mp3"))
            .collect();
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(finish_pool(tracks, &mut rng).unwrap().len(), MAX_POOL_SIZE);
    }

    #[test]
    fn empty_pool_reports_nothing_playable() {
        let mut rng = Pcg32::seed_from_u64(3);
        assert!(finish_pool(vec![track(1, "t", "a", "")], &mut rng).is_none());
        assert!(finish_pool(Vec::new(), &mut rng).is_none());
    }

    #[test]
    fn fetched_exposes_data_on_both_paths() {
        let live = Fetched::Live(vec![1, 2]);
        assert!(!live.is_fallback());
        assert_eq!(live.data(), &vec![1, 2]);

        let fallback = Fetched::Fallback {
            data: vec![3],
            reason: "upstream down".into(),
        };
        assert!(fallback.is_fallback());
        assert_eq!(fallback.data(), &vec![3]);
    }

    #[test]
    fn genre_normalization_is_idempotent() {
        let raw = |pic: Option<&str>| DeezerGenre {
            id: 116,
            name: "Hip Hop".to_string(),
            picture: pic.map(str::to_string),
            picture_small: Some("small.jpg".to_string()),
            picture_medium: Some("medium.jpg".to_string()),
        };

        let first = normalize_genres(vec![raw(Some("big.jpg")), raw(None), raw(Some(""))]);
        let second = normalize_genres(vec![raw(Some("big.jpg")), raw(None), raw(Some(""))]);
        assert_eq!(first, second);

        // First present, non-empty picture field wins.
        assert_eq!(first[0].picture.as_deref(), Some("big.jpg"));
        assert_eq!(first[1].picture.as_deref(), Some("medium.jpg"));
        assert_eq!(first[2].picture.as_deref(), Some("medium.jpg"));
    }
}
