//! Game session state machine.
//!
//! Sessions live entirely on the caller's side of the wire; the server
//! never holds one. A session covers a single level: levels hand off by
//! constructing the next session with the carried score via [`GameSession::resume`].
//!
//! All randomness is drawn from caller-supplied generators so transition
//! logic stays deterministic under test.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::genres;
use crate::catalog::Song;

pub const QUESTIONS_PER_LEVEL: usize = 5;
pub const LEVELS_PER_GAME: u32 = 3;
pub const QUESTION_SECONDS: u32 = 30;
/// How long the caller holds a revealed answer on screen before advancing.
pub const REVEAL_SECONDS: u32 = 2;
pub const ANSWER_OPTIONS: usize = 4;

/// Stand-in artists used to pad the wrong-answer pool when a song batch has
/// too few distinct performers.
pub const GENERIC_ARTISTS: [&str; 6] = [
    "The Beatles",
    "Queen",
    "Michael Jackson",
    "Madonna",
    "Elvis Presley",
    "Bob Dylan",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Hard => 1.5,
            Difficulty::Easy => 1.0,
        }
    }
}

/// Points for a correct answer with `time_left` seconds on the clock.
pub fn points(time_left: u32, difficulty: Difficulty) -> u32 {
    let base = u32::max(10, time_left * 2);
    (base as f64 * difficulty.multiplier()).round() as u32
}

#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    pub song: Song,
    /// Exactly [`ANSWER_OPTIONS`] distinct names, pre-shuffled for display.
    pub options: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    /// A question is on screen and the clock is running.
    Presenting,
    /// The answer is shown; the caller advances after [`REVEAL_SECONDS`].
    Revealed {
        answer: Option<String>,
        correct: bool,
        awarded: u32,
    },
    /// Five questions done with levels remaining; hand the score to the
    /// next level's session.
    LevelComplete,
    GameOver,
}

#[derive(Debug)]
pub struct GameSession {
    songs: Vec<Song>,
    level: u32,
    score: u32,
    question_index: usize,
    time_left: u32,
    difficulty: Difficulty,
    used_song_ids: HashSet<u64>,
    used_artists: HashSet<String>,
    current: Question,
    phase: Phase,
}

impl GameSession {
    /// Start a fresh game at level 1.
    pub fn new<R: Rng>(songs: Vec<Song>, difficulty: Difficulty, rng: &mut R) -> Self {
        Self::resume(songs, 1, 0, difficulty, rng)
    }

    /// Start a level with carried-over progress. An empty pool is replaced
    /// by the sample set so a session can always present questions.
    pub fn resume<R: Rng>(
        songs: Vec<Song>,
        level: u32,
        score: u32,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Self {
        let songs = if songs.is_empty() {
            genres::sample_songs()
        } else {
            songs
        };
        let mut used_song_ids = HashSet::new();
        let mut used_artists = HashSet::new();
        let current = next_question(
            &songs,
            &mut used_song_ids,
            &mut used_artists,
            rng,
        );
        Self {
            songs,
            level: level.clamp(1, LEVELS_PER_GAME),
            score,
            question_index: 0,
            time_left: QUESTION_SECONDS,
            difficulty,
            used_song_ids,
            used_artists,
            current,
            phase: Phase::Presenting,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn current(&self) -> &Question {
        &self.current
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// One second of countdown. Hitting zero scores the question as
    /// unanswered.
    pub fn tick(&mut self) {
        if !matches!(self.phase, Phase::Presenting) {
            return;
        }
        if self.time_left > 0 {
            self.time_left -= 1;
        }
        if self.time_left == 0 {
            self.submit(None);
        }
    }

    /// Lock in an answer (`None` for a timeout). Only the playing song's
    /// artist scores; nothing is ever deducted.
    pub fn submit(&mut self, answer: Option<&str>) {
        if !matches!(self.phase, Phase::Presenting) {
            return;
        }
        let correct = answer == Some(self.current.song.artist.as_str());
        let awarded = if correct {
            points(self.time_left, self.difficulty)
        } else {
            0
        };
        self.score += awarded;
        self.phase = Phase::Revealed {
            answer: answer.map(str::to_owned),
            correct,
            awarded,
        };
    }

    /// Move past a revealed answer: mark the song and artist used, then
    /// either present the next question, finish the level, or end the game.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        if !matches!(self.phase, Phase::Revealed { .. }) {
            return;
        }
        self.used_song_ids.insert(self.current.song.id);
        self.used_artists.insert(self.current.song.artist.clone());

        if self.question_index + 1 < QUESTIONS_PER_LEVEL {
            self.question_index += 1;
            self.current = next_question(
                &self.songs,
                &mut self.used_song_ids,
                &mut self.used_artists,
                rng,
            );
            self.time_left = QUESTION_SECONDS;
            self.phase = Phase::Presenting;
        } else if self.level < LEVELS_PER_GAME {
            self.phase = Phase::LevelComplete;
        } else {
            self.phase = Phase::GameOver;
        }
    }

    /// Show the obscured title. Drops the hard-mode multiplier from the
    /// next scored answer for the rest of the game; there is no way back.
    pub fn reveal_title(&mut self) {
        self.difficulty = Difficulty::Easy;
    }
}

fn next_question<R: Rng>(
    songs: &[Song],
    used_song_ids: &mut HashSet<u64>,
    used_artists: &mut HashSet<String>,
    rng: &mut R,
) -> Question {
    let song = select_next_song(songs, used_song_ids, used_artists);
    let options = answer_options(songs, &song.artist, rng);
    Question { song, options }
}

/// Pick the next song to play. Prefers songs whose id and artist are both
/// unused; falls back to allowing artist repeats, and finally resets both
/// used-sets and restarts from the head of the pool. The pool is already
/// shuffled by the gateway, so "first match" is as random as it needs to be.
fn select_next_song(
    songs: &[Song],
    used_song_ids: &mut HashSet<u64>,
    used_artists: &mut HashSet<String>,
) -> Song {
    if let Some(song) = songs
        .iter()
        .find(|s| !used_song_ids.contains(&s.id) && !used_artists.contains(&s.artist))
    {
        return song.clone();
    }
    if let Some(song) = songs.iter().find(|s| !used_song_ids.contains(&s.id)) {
        return song.clone();
    }
    used_song_ids.clear();
    used_artists.clear();
    songs[0].clone()
}

/// Build the four on-screen choices for `correct`: up to three distractors
/// drawn from the pool's other artists, padded from [`GENERIC_ARTISTS`].
pub fn answer_options<R: Rng>(pool: &[Song], correct: &str, rng: &mut R) -> Vec<String> {
    let mut others: Vec<&str> = Vec::new();
    for song in pool {
        let name = song.artist.as_str();
        if name != correct && !others.contains(&name) {
            others.push(name);
        }
    }
    others.shuffle(rng);

    let mut wrong: Vec<String> = others
        .into_iter()
        .take(ANSWER_OPTIONS - 1)
        .map(str::to_owned)
        .collect();

    if wrong.len() < ANSWER_OPTIONS - 1 {
        let mut generic = GENERIC_ARTISTS.to_vec();
        generic.shuffle(rng);
        for name in generic {
            if wrong.len() == ANSWER_OPTIONS - 1 {
                break;
            }
            if name != correct && !wrong.iter().any(|w| w == name) {
                wrong.push(name.to_owned());
            }
        }
    }

    let mut options = Vec::with_capacity(ANSWER_OPTIONS);
    options.push(correct.to_owned());
    options.extend(wrong);
    options.shuffle(rng);
    options
}
