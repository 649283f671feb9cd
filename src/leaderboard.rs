//! High-score table.
//!
//! Fixed capacity, memory-resident only, always sorted best first.
//! Equal scores keep insertion order: an older entry stays ahead of a newer
//! one with the same score.

use core::fmt::Write;

use crate::config::{LEADERBOARD_CAPACITY, NAME_CAPACITY};

/// Bounded player name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerName {
    buf: [u8; NAME_CAPACITY],
    len: usize,
}

impl PlayerName {
    pub const EMPTY: Self = Self {
        buf: [0u8; NAME_CAPACITY],
        len: 0,
    };

    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Build from a string, truncating to capacity.
    pub fn from_str_truncated(s: &str) -> Self {
        let mut name = Self::new();
        for b in s.bytes() {
            if !name.push(b) {
                break;
            }
        }
        name
    }

    /// Append a printable ASCII byte.
    ///
    /// Returns `false` if the byte was rejected (full or not printable).
    pub fn push(&mut self, c: u8) -> bool {
        if self.len >= NAME_CAPACITY || !(0x20..=0x7E).contains(&c) {
            return false;
        }
        self.buf[self.len] = c;
        self.len += 1;
        true
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn as_str(&self) -> &str {
        // Only printable ASCII is ever stored.
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == NAME_CAPACITY
    }
}

impl Default for PlayerName {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoreEntry {
    pub name: PlayerName,
    pub score: u8,
}

impl ScoreEntry {
    const EMPTY: Self = Self {
        name: PlayerName::EMPTY,
        score: 0,
    };
}

/// Top-N table sorted by descending score.
pub struct Leaderboard<const N: usize = LEADERBOARD_CAPACITY> {
    entries: [ScoreEntry; N],
    len: usize,
}

impl<const N: usize> Leaderboard<N> {
    pub const fn new() -> Self {
        Self {
            entries: [ScoreEntry::EMPTY; N],
            len: 0,
        }
    }

    /// Would `score` earn a place?
    ///
    /// Always true while the table has room, otherwise only if it strictly
    /// beats the lowest entry.
    pub fn is_top_n(&self, score: u8) -> bool {
        self.len < N || score > self.entries[self.len - 1].score
    }

    /// Insert a result. Returns `false` (and changes nothing) if it does not qualify.
    pub fn insert(&mut self, name: PlayerName, score: u8) -> bool {
        if !self.is_top_n(score) {
            return false;
        }

        let slot = if self.len < N {
            self.len += 1;
            self.len - 1
        } else {
            N - 1
        };
        self.entries[slot] = ScoreEntry { name, score };
        self.sort();
        true
    }

    /// Stable insertion sort, descending by score.
    fn sort(&mut self) {
        for i in 1..self.len {
            let mut j = i;
            while j > 0 && self.entries[j - 1].score < self.entries[j].score {
                self.entries.swap(j - 1, j);
                j -= 1;
            }
        }
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Write the table as `<name> <score>\n` lines, best first.
    pub fn print(&self, out: &mut dyn Write) -> core::fmt::Result {
        for entry in self.entries() {
            writeln!(out, "{} {}", entry.name.as_str(), entry.score)?;
        }
        Ok(())
    }
}

impl<const N: usize> Default for Leaderboard<N> {
    fn default() -> Self {
        Self::new()
    }
}
