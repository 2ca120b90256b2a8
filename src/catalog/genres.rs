//! Static genre data: the curated home-screen table, hand-picked artist
//! rosters with their Deezer ids, and the fallback payloads served when the
//! catalog is unreachable.

use super::{GenreEntry, Song, PLACEHOLDER_COVER};

/// A hand-picked artist with its Deezer id.
#[derive(Clone, Copy, Debug)]
pub struct RosterArtist {
    pub id: u64,
    pub name: &'static str,
}

/// A hand-authored fallback song. No preview; expanded to a [`Song`] with
/// the placeholder cover at the call site.
#[derive(Clone, Copy, Debug)]
pub struct SeedSong {
    pub id: u64,
    pub title: &'static str,
    pub artist: &'static str,
}

/// A genre whose roster is authored here instead of discovered from the
/// taxonomy.
pub struct CuratedGenre {
    pub slug: &'static str,
    pub name: &'static str,
    pub artists: &'static [RosterArtist],
    pub fallback: &'static [SeedSong],
    pub empty_reason: &'static str,
}

/// One entry of the curated genre table shown on the home screen.
pub struct GenreInfo {
    pub slug: &'static str,
    pub name: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
    pub deezer_genre_id: Option<u32>,
    pub roster: Option<&'static CuratedGenre>,
}

/// How to source songs for a genre id: a taxonomy lookup against Deezer, or
/// one of the curated rosters.
#[derive(Clone, Copy)]
pub enum GenreSelector {
    Taxonomy(u32),
    Curated(&'static CuratedGenre),
}

/// Parse a genre id from the UI: `deezer-<id>` selects a taxonomy genre
/// directly, anything else must match a curated table slug.
pub fn resolve_selector(genre_id: &str) -> Option<GenreSelector> {
    if let Some(raw) = genre_id.strip_prefix("deezer-") {
        return raw.parse().ok().map(GenreSelector::Taxonomy);
    }
    let info = GENRES.iter().find(|g| g.slug == genre_id)?;
    if let Some(roster) = info.roster {
        Some(GenreSelector::Curated(roster))
    } else {
        info.deezer_genre_id.map(GenreSelector::Taxonomy)
    }
}

pub fn expand_seeds(seeds: &[SeedSong]) -> Vec<Song> {
    seeds
        .iter()
        .map(|s| Song {
            id: s.id,
            title: s.title.to_string(),
            artist: s.artist.to_string(),
            preview: String::new(),
            cover: PLACEHOLDER_COVER.to_string(),
        })
        .collect()
}

/// The directory served when the taxonomy fetch fails.
pub fn fallback_directory() -> Vec<GenreEntry> {
    const FALLBACK: [(u32, &str); 10] = [
        (152, "Rock"),
        (132, "Pop"),
        (129, "Jazz"),
        (106, "Electronic"),
        (116, "Hip Hop"),
        (98, "Classical"),
        (113, "Blues"),
        (85, "Alternative"),
        (153, "Indie"),
        (144, "Reggae"),
    ];
    FALLBACK
        .iter()
        .map(|&(id, name)| GenreEntry {
            id,
            name: name.to_string(),
            picture: None,
        })
        .collect()
}

/// The pool a session falls back to when a fetch produced nothing usable,
/// so a game can always start.
pub fn sample_songs() -> Vec<Song> {
    (1..=5)
        .map(|n| Song {
            id: n,
            title: format!("Sample Song {}", n),
            artist: format!("Sample Artist {}", n),
            preview: String::new(),
            cover: PLACEHOLDER_COVER.to_string(),
        })
        .collect()
}

/// Deezer's rock listing mixes in acts that don't belong in a classic rock
/// round; these get dropped by exact name match.
pub const ROCK_GENRE_ID: u32 = 152;

pub const ROCK_DENY_LIST: [&str; 11] = [
    "Bring Me The Horizon",
    "Scorpions",
    "3 Doors Down",
    "Five Finger Death Punch",
    "Linkin Park",
    "Avenged Sevenfold",
    "Shinedown",
    "Breaking Benjamin",
    "Skillet",
    "Ghostemane",
    "Seether",
];

pub static GENRES: [GenreInfo; 8] = [
    GenreInfo {
        slug: "rock",
        name: "Rock",
        emoji: "\u{1F3B8}",
        color: "from-red-500 to-orange-500",
        deezer_genre_id: Some(152),
        roster: None,
    },
    GenreInfo {
        slug: "pop",
        name: "Pop",
        emoji: "\u{1F3A4}",
        color: "from-pink-500 to-purple-500",
        deezer_genre_id: Some(132),
        roster: None,
    },
    GenreInfo {
        slug: "jazz",
        name: "Jazz",
        emoji: "\u{1F3B7}",
        color: "from-blue-500 to-indigo-500",
        deezer_genre_id: Some(129),
        roster: None,
    },
    GenreInfo {
        slug: "electronic",
        name: "Electronic",
        emoji: "\u{1F3B9}",
        color: "from-green-500 to-teal-500",
        deezer_genre_id: Some(106),
        roster: None,
    },
    GenreInfo {
        slug: "hiphop",
        name: "Hip Hop",
        emoji: "\u{1F3A7}",
        color: "from-yellow-500 to-red-500",
        deezer_genre_id: Some(116),
        roster: None,
    },
    GenreInfo {
        slug: "mbp",
        name: "MPB",
        emoji: "\u{1F1E7}\u{1F1F7}",
        color: "from-green-600 to-yellow-500",
        deezer_genre_id: None,
        roster: Some(&MBP),
    },
    GenreInfo {
        slug: "indie-rock",
        name: "Indie Rock",
        emoji: "\u{1F3A8}",
        color: "from-orange-500 to-red-600",
        deezer_genre_id: None,
        roster: Some(&INDIE_ROCK),
    },
    GenreInfo {
        slug: "classic-country",
        name: "Classic Country",
        emoji: "\u{1F920}",
        color: "from-amber-600 to-orange-600",
        deezer_genre_id: None,
        roster: Some(&CLASSIC_COUNTRY),
    },
];

pub static CLASSIC_COUNTRY: CuratedGenre = CuratedGenre {
    slug: "classic-country",
    name: "Classic Country",
    artists: &[
        RosterArtist { id: 62346, name: "George Jones" },
        RosterArtist { id: 8462, name: "Tammy Wynette" },
        RosterArtist { id: 5098, name: "Loretta Lynn" },
        RosterArtist { id: 80729, name: "Tom T. Hall" },
        RosterArtist { id: 14783, name: "Conway Twitty" },
        RosterArtist { id: 70207, name: "Marty Robbins" },
        RosterArtist { id: 2947, name: "Willie Nelson" },
        RosterArtist { id: 8741, name: "Dolly Parton" },
        RosterArtist { id: 2737, name: "Townes Van Zandt" },
        RosterArtist { id: 147892, name: "Charlie Pride" },
        RosterArtist { id: 8510, name: "Merle Haggard" },
        RosterArtist { id: 8955, name: "Waylon Jennings" },
        RosterArtist { id: 69521, name: "Kris Kristofferson" },
        RosterArtist { id: 405, name: "Johnny Cash" },
        RosterArtist { id: 8493, name: "Hank Williams" },
        RosterArtist { id: 4602, name: "Patsy Cline" },
        RosterArtist { id: 97227, name: "Roy Acuff" },
        RosterArtist { id: 15602, name: "Buck Owens" },
        RosterArtist { id: 90482, name: "Ernest Tubb" },
        RosterArtist { id: 77507, name: "Lefty Frizzell" },
        RosterArtist { id: 71872, name: "Don Williams" },
        RosterArtist { id: 77014, name: "Gary Stewart" },
        RosterArtist { id: 178796, name: "Louvin Brothers" },
    ],
    fallback: &[
        SeedSong { id: 1, title: "He Stopped Loving Her Today", artist: "George Jones" },
        SeedSong { id: 2, title: "Stand by Your Man", artist: "Tammy Wynette" },
        SeedSong { id: 3, title: "Coal Miner's Daughter", artist: "Loretta Lynn" },
        SeedSong { id: 4, title: "Old Dogs, Children and Watermelon Wine", artist: "Tom T. Hall" },
        SeedSong { id: 5, title: "Hello Darlin'", artist: "Conway Twitty" },
        SeedSong { id: 6, title: "El Paso", artist: "Marty Robbins" },
        SeedSong { id: 7, title: "On the Road Again", artist: "Willie Nelson" },
        SeedSong { id: 8, title: "Jolene", artist: "Dolly Parton" },
        SeedSong { id: 9, title: "Pancho and Lefty", artist: "Townes Van Zandt" },
        SeedSong { id: 10, title: "Kiss an Angel Good Mornin'", artist: "Charlie Pride" },
        SeedSong { id: 11, title: "White Lightning", artist: "George Jones" },
        SeedSong { id: 12, title: "D-I-V-O-R-C-E", artist: "Tammy Wynette" },
        SeedSong { id: 13, title: "You Ain't Woman Enough", artist: "Loretta Lynn" },
        SeedSong { id: 14, title: "9 to 5", artist: "Dolly Parton" },
        SeedSong { id: 15, title: "Mammas Don't Let Your Babies Grow Up to Be Cowboys", artist: "Willie Nelson" },
    ],
    empty_reason: "No valid songs found with preview URLs from classic country artists",
};

pub static INDIE_ROCK: CuratedGenre = CuratedGenre {
    slug: "indie-rock",
    name: "Indie Rock",
    artists: &[
        RosterArtist { id: 1023, name: "Elliott Smith" },
        RosterArtist { id: 569, name: "The Strokes" },
        RosterArtist { id: 1676, name: "Pavement" },
        RosterArtist { id: 134790, name: "Tame Impala" },
        RosterArtist { id: 2020, name: "Broken Social Scene" },
        RosterArtist { id: 11003, name: "Built to Spill" },
        RosterArtist { id: 1280, name: "Spoon" },
        RosterArtist { id: 6786, name: "Animal Collective" },
        RosterArtist { id: 642, name: "LCD Soundsystem" },
        RosterArtist { id: 1700, name: "Wilco" },
        RosterArtist { id: 636, name: "The White Stripes" },
        RosterArtist { id: 2344, name: "CAN" },
        RosterArtist { id: 15, name: "Phoenix" },
        RosterArtist { id: 8016, name: "The Lemonheads" },
        RosterArtist { id: 6630050, name: "Mitski" },
        RosterArtist { id: 13681561, name: "Wishy" },
        RosterArtist { id: 137555232, name: "Geese" },
        RosterArtist { id: 134334152, name: "Wet Leg" },
        RosterArtist { id: 5298885, name: "Alvvays" },
        RosterArtist { id: 5488, name: "The Weakerthans" },
    ],
    fallback: &[
        SeedSong { id: 1, title: "Miss Misery", artist: "Elliott Smith" },
        SeedSong { id: 2, title: "Last Nite", artist: "The Strokes" },
        SeedSong { id: 3, title: "Cut Your Hair", artist: "Pavement" },
        SeedSong { id: 4, title: "Elephant", artist: "Tame Impala" },
        SeedSong { id: 5, title: "Dance Yrself Clean", artist: "LCD Soundsystem" },
        SeedSong { id: 6, title: "Seven Nation Army", artist: "The White Stripes" },
        SeedSong { id: 7, title: "1901", artist: "Phoenix" },
        SeedSong { id: 8, title: "First Time", artist: "Mitski" },
        SeedSong { id: 9, title: "Chaise Longue", artist: "Wet Leg" },
        SeedSong { id: 10, title: "Archie, Marry Me", artist: "Alvvays" },
        SeedSong { id: 11, title: "Jesus, Etc.", artist: "Wilco" },
        SeedSong { id: 12, title: "Into Your Arms", artist: "The Lemonheads" },
        SeedSong { id: 13, title: "The Way We Get By", artist: "Spoon" },
        SeedSong { id: 14, title: "My Girls", artist: "Animal Collective" },
        SeedSong { id: 15, title: "Left and Leaving", artist: "The Weakerthans" },
    ],
    empty_reason: "No valid songs found with preview URLs from indie rock artists",
};

pub static MBP: CuratedGenre = CuratedGenre {
    slug: "mbp",
    name: "MPB",
    artists: &[
        RosterArtist { id: 232, name: "Caetano Veloso" },
        RosterArtist { id: 2077, name: "Gilberto Gil" },
        RosterArtist { id: 4917, name: "Jorge Ben Jor" },
        RosterArtist { id: 110459, name: "Os Mutantes" },
        RosterArtist { id: 9248294, name: "Secos & Molhados" },
        RosterArtist { id: 3543, name: "Chico Buarque" },
        RosterArtist { id: 15827, name: "Elis Regina" },
        RosterArtist { id: 12038, name: "Gal Costa" },
        RosterArtist { id: 15588, name: "Maria Beth\u{e2}nia" },
        RosterArtist { id: 4720, name: "Milton Nascimento" },
        RosterArtist { id: 14687, name: "Djavan" },
        RosterArtist { id: 183051, name: "Erasmo Carlos" },
        RosterArtist { id: 12727, name: "Jo\u{e3}o Bosco" },
        RosterArtist { id: 55599, name: "Baden Powell" },
        RosterArtist { id: 215594, name: "Z\u{e9} Ramalho" },
        RosterArtist { id: 241426, name: "Novos Baianos" },
        RosterArtist { id: 13704, name: "Tim Maia" },
        RosterArtist { id: 95768, name: "Belchior" },
        RosterArtist { id: 15552, name: "Ney Matogrosso" },
        RosterArtist { id: 12144, name: "Raul Seixas" },
        RosterArtist { id: 12614, name: "Zeca Baleiro" },
        RosterArtist { id: 13523, name: "Marisa Monte" },
    ],
    fallback: &[
        SeedSong { id: 1, title: "Tropic\u{e1}lia", artist: "Caetano Veloso" },
        SeedSong { id: 2, title: "Aquele Abra\u{e7}o", artist: "Gilberto Gil" },
        SeedSong { id: 3, title: "Mas, Que Nada!", artist: "Jorge Ben Jor" },
        SeedSong { id: 4, title: "Panis et Circencis", artist: "Os Mutantes" },
        SeedSong { id: 5, title: "O Vira", artist: "Secos E Molhados" },
        SeedSong { id: 6, title: "Alegria, Alegria", artist: "Caetano Veloso" },
        SeedSong { id: 7, title: "Expresso 2222", artist: "Gilberto Gil" },
        SeedSong { id: 8, title: "Pa\u{ed}s Tropical", artist: "Jorge Ben Jor" },
        SeedSong { id: 9, title: "A Minha Menina", artist: "Os Mutantes" },
        SeedSong { id: 10, title: "Sangue Latino", artist: "Secos E Molhados" },
    ],
    empty_reason: "No valid songs found with preview URLs from MBP artists",
};

/// Served when a taxonomy-genre fetch comes back empty or broken.
pub static DEEZER_FALLBACK: [SeedSong; 10] = [
    SeedSong { id: 1, title: "Bohemian Rhapsody", artist: "Queen" },
    SeedSong { id: 2, title: "Stairway to Heaven", artist: "Led Zeppelin" },
    SeedSong { id: 3, title: "Hotel California", artist: "Eagles" },
    SeedSong { id: 4, title: "Sweet Child O' Mine", artist: "Guns N' Roses" },
    SeedSong { id: 5, title: "Smells Like Teen Spirit", artist: "Nirvana" },
    SeedSong { id: 6, title: "Billie Jean", artist: "Michael Jackson" },
    SeedSong { id: 7, title: "Like a Rolling Stone", artist: "Bob Dylan" },
    SeedSong { id: 8, title: "Purple Haze", artist: "Jimi Hendrix" },
    SeedSong { id: 9, title: "Imagine", artist: "John Lennon" },
    SeedSong { id: 10, title: "Good Vibrations", artist: "The Beach Boys" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_parses_taxonomy_prefix() {
        assert!(matches!(
            resolve_selector("deezer-152"),
            Some(GenreSelector::Taxonomy(152))
        ));
        assert!(resolve_selector("deezer-abc").is_none());
    }

    #[test]
    fn selector_resolves_curated_slugs() {
        match resolve_selector("classic-country") {
            Some(GenreSelector::Curated(g)) => assert_eq!(g.slug, "classic-country"),
            other => panic!("expected curated selector, got {:?}", other.is_some()),
        }
        assert!(matches!(
            resolve_selector("rock"),
            Some(GenreSelector::Taxonomy(152))
        ));
        assert!(resolve_selector("polka").is_none());
    }

    #[test]
    fn curated_table_is_consistent() {
        for info in GENRES.iter() {
            // Every entry sources songs one way or the other.
            assert!(info.deezer_genre_id.is_some() || info.roster.is_some());
            assert!(!info.emoji.is_empty());
            assert!(!info.color.is_empty());
            if let Some(roster) = info.roster {
                assert_eq!(roster.slug, info.slug);
                assert!(roster.artists.len() >= 15);
                assert!(roster.fallback.len() >= 10);
            }
        }
    }

    #[test]
    fn seed_expansion_matches_song_shape() {
        let songs = expand_seeds(CLASSIC_COUNTRY.fallback);
        assert_eq!(songs.len(), 15);
        for song in &songs {
            assert!(song.preview.is_empty());
            assert_eq!(song.cover, PLACEHOLDER_COVER);
            assert!(!song.title.is_empty());
            assert!(!song.artist.is_empty());
        }
    }

    #[test]
    fn fallback_directory_has_ten_named_genres() {
        let genres = fallback_directory();
        assert_eq!(genres.len(), 10);
        assert!(genres.iter().all(|g| g.picture.is_none()));
        assert_eq!(genres[0].id, 152);
        assert_eq!(genres[0].name, "Rock");
    }
}
