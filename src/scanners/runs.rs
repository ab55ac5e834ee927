use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

/// Regex alternation matching a run of `len` identical hex characters.
///
/// The regex crate has no backreferences, so every hex digit gets its own arm.
fn run_pattern(len: usize) -> String {
    "0123456789abcdef"
        .chars()
        .map(|c| format!("{}{{{}}}", c, len))
        .collect::<Vec<_>>()
        .join("|")
}

lazy_static! {
    /// Three identical hex characters in a row
    static ref TRIPLET_PATTERN: Regex = Regex::new(&run_pattern(3)).unwrap();

    /// Five identical hex characters in a row
    static ref QUINTET_PATTERN: Regex = Regex::new(&run_pattern(5)).unwrap();
}

/// Character of the left-most run of three or more identical characters.
///
/// Only the first run counts, even if a longer run appears later.
pub fn first_triplet(digest: &str) -> Option<char> {
    TRIPLET_PATTERN
        .find(digest)
        .and_then(|m| m.as_str().chars().next())
}

/// Every distinct character with a run of five or more anywhere in the digest.
pub fn all_quintets(digest: &str) -> QuintetSet {
    QUINTET_PATTERN
        .find_iter(digest)
        .filter_map(|m| m.as_str().chars().next())
        .collect()
}

/// Set of hex characters, one bit per digit
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct QuintetSet(u16);

impl QuintetSet {
    pub fn new() -> Self {
        Self(0)
    }

    /// Adds `c`; non-hex characters are ignored.
    pub fn insert(&mut self, c: char) {
        if let Some(bit) = c.to_digit(16) {
            self.0 |= 1 << bit;
        }
    }

    pub fn contains(&self, c: char) -> bool {
        c.to_digit(16).is_some_and(|bit| self.0 & (1 << bit) != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Hex digit values in the set, ascending
    pub fn digits(&self) -> impl Iterator<Item = usize> + '_ {
        (0..16).filter(move |bit| self.0 & (1 << *bit) != 0)
    }

    /// Characters in the set, ascending
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.digits()
            .filter_map(|bit| std::char::from_digit(bit as u32, 16))
    }
}

impl FromIterator<char> for QuintetSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = Self::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

impl fmt::Debug for QuintetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.chars()).finish()
    }
}

/// Triplet and quintets of one digest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub triplet: Option<char>,
    pub quintets: QuintetSet,
}

impl RunSummary {
    pub fn scan(digest: &str) -> Self {
        Self {
            triplet: first_triplet(digest),
            quintets: all_quintets(digest),
        }
    }
}
