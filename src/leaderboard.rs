//! Persistent top-10 score table.
//!
//! The whole table lives in one JSON document that every save reads and
//! rewrites. Two concurrent saves race last-write-wins, the same way two
//! browser tabs sharing one storage key would.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::game::Difficulty;

pub const MAX_ENTRIES: usize = 10;
pub const MAX_NAME_LEN: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub genre: String,
    pub difficulty: Difficulty,
}

#[derive(Clone, Debug)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The stored table, best first. Absent or unreadable documents read as
    /// an empty table.
    pub fn list(&self) -> Vec<LeaderboardEntry> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "ignoring unreadable leaderboard at {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Append an entry, keep the 10 highest scores in descending order,
    /// rewrite the document. Returns the table as persisted. Ties keep
    /// their arrival order, so an equal score never displaces an older one.
    pub fn record(&self, entry: LeaderboardEntry) -> io::Result<Vec<LeaderboardEntry>> {
        let mut entries = self.list();
        entries.push(entry);
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
        fs::write(&self.path, serde_json::to_string(&entries)?)?;
        Ok(entries)
    }
}

/// Mirror of the entry form's input filter: letters and spaces only,
/// upper-cased, capped at [`MAX_NAME_LEN`] characters.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .map(|c| c.to_ascii_uppercase())
        .take(MAX_NAME_LEN)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(name: &str, score: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            score,
            genre: "Rock".to_string(),
            difficulty: Difficulty::Hard,
        }
    }

    fn store(dir: &TempDir) -> LeaderboardStore {
        LeaderboardStore::new(dir.path().join("leaderboard.json"))
    }

    #[test]
    fn missing_document_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store(&dir).list().is_empty());
    }

    #[test]
    fn corrupt_document_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        std::fs::write(dir.path().join("leaderboard.json"), "not json").unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn eleven_saves_keep_the_ten_highest() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        for i in 0..11u32 {
            store.record(entry(&format!("P{}", i), i * 10)).unwrap();
        }

        let entries = store.list();
        assert_eq!(entries.len(), MAX_ENTRIES);
        // 0 points fell off; 100 leads.
        assert_eq!(entries[0].score, 100);
        assert_eq!(entries[9].score, 10);
        assert!(entries.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn low_score_save_leaves_a_full_table_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        for i in 1..=10u32 {
            store.record(entry(&format!("P{}", i), i * 100)).unwrap();
        }
        let before = store.list();

        let after = store.record(entry("LOSER", 5)).unwrap();
        assert_eq!(after, before);
        assert_eq!(store.list(), before);
    }

    #[test]
    fn tied_scores_keep_arrival_order() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.record(entry("FIRST", 50)).unwrap();
        store.record(entry("SECOND", 50)).unwrap();
        store.record(entry("TOP", 80)).unwrap();

        let entries = store.list();
        assert_eq!(entries[0].name, "TOP");
        assert_eq!(entries[1].name, "FIRST");
        assert_eq!(entries[2].name, "SECOND");
    }

    #[test]
    fn entries_survive_a_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let saved = entry("ABC", 90);
        store.record(saved.clone()).unwrap();
        assert_eq!(store.list(), vec![saved]);
    }

    #[test]
    fn names_are_filtered_uppercased_and_capped() {
        assert_eq!(sanitize_name("abc"), "ABC");
        assert_eq!(sanitize_name("d.j. cool 99!"), "DJ COOL ");
        assert_eq!(sanitize_name("a very long player name"), "A VERY LON");
        assert_eq!(sanitize_name("1234!?"), "");
    }
}
