//! Transposition table of 4-entry buckets.
//!
//! Mate scores are stored relative to the node that produced them and
//! converted back relative to the root on probe, so an entry stays valid
//! wherever the position recurs in the tree.

use talon_core::Move;

use super::MAX_EVAL;

/// What a stored score says about the true value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is the minimax value.
    Exact,
    /// A move reached beta: the value is at least the score.
    Lower,
    /// No move raised alpha: the value is at most the score.
    Upper,
}

/// A matching entry returned by [`TranspositionTable::probe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    pub mv: Move,
    pub score: i32,
    pub depth: i32,
    pub bound: Bound,
}

impl TtEntry {
    /// The stored score, if it was searched deep enough and settles the
    /// window `(alpha, beta)`.
    #[inline]
    pub fn cutoff(&self, depth: i32, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        let usable = match self.bound {
            Bound::Exact => true,
            Bound::Lower => self.score >= beta,
            Bound::Upper => self.score <= alpha,
        };
        usable.then_some(self.score)
    }
}

/// Convert a root-relative score into node-relative form for storage.
pub fn score_to_tt(score: i32, ply: usize) -> i16 {
    let ply = ply as i32;
    let adjusted = if score > MAX_EVAL {
        score + ply
    } else if score < -MAX_EVAL {
        score - ply
    } else {
        score
    };
    adjusted as i16
}

/// Inverse of [`score_to_tt`].
pub fn score_from_tt(score: i16, ply: usize) -> i32 {
    let score = score as i32;
    let ply = ply as i32;
    if score > MAX_EVAL {
        score - ply
    } else if score < -MAX_EVAL {
        score + ply
    } else {
        score
    }
}

const BUCKET_SIZE: usize = 4;

#[derive(Clone, Copy, Default)]
struct Slot {
    key: u64,
    mv: Move,
    score: i16,
    depth: i8,
    // 0 = empty, 1 = exact, 2 = lower, 3 = upper
    bound: u8,
    generation: u8,
}

impl Slot {
    fn bound(self) -> Option<Bound> {
        match self.bound {
            1 => Some(Bound::Exact),
            2 => Some(Bound::Lower),
            3 => Some(Bound::Upper),
            _ => None,
        }
    }

    /// Lower is a better replacement victim: empty, then stale, then shallow.
    fn worth(self, generation: u8) -> i32 {
        if self.bound == 0 {
            return i32::MIN;
        }
        let stale = if self.generation == generation { 0 } else { 256 };
        self.depth as i32 - stale
    }
}

/// Hash table of previously searched positions.
pub struct TranspositionTable {
    slots: Vec<Slot>,
    // bucket count - 1
    mask: usize,
    generation: u8,
}

impl TranspositionTable {
    /// Allocate roughly `mb` megabytes, rounded down to a power-of-two bucket count.
    pub fn new(mb: usize) -> TranspositionTable {
        let bucket_bytes = size_of::<Slot>() * BUCKET_SIZE;
        let wanted = (mb.max(1) * 1024 * 1024 / bucket_bytes).max(1);
        let buckets = 1usize << (usize::BITS - 1 - wanted.leading_zeros());
        TranspositionTable {
            slots: vec![Slot::default(); buckets * BUCKET_SIZE],
            mask: buckets - 1,
            generation: 0,
        }
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        self.slots.fill(Slot::default());
        self.generation = 0;
    }

    /// Start a new search: entries from earlier searches become preferred victims.
    pub fn new_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Per-mille of slots written during the current generation.
    pub fn hashfull(&self) -> usize {
        let sample = self.slots.len().min(1000);
        self.slots[..sample]
            .iter()
            .filter(|s| s.bound != 0 && s.generation == self.generation)
            .count()
            * 1000
            / sample
    }

    #[inline]
    fn bucket(&self, key: u64) -> std::ops::Range<usize> {
        let start = (key as usize & self.mask) * BUCKET_SIZE;
        start..start + BUCKET_SIZE
    }

    /// Look `key` up; `ply` is the probing node's distance from the root.
    pub fn probe(&self, key: u64, ply: usize) -> Option<TtEntry> {
        self.slots[self.bucket(key)]
            .iter()
            .find(|s| s.key == key && s.bound != 0)
            .and_then(|slot| {
                Some(TtEntry {
                    mv: slot.mv,
                    score: score_from_tt(slot.score, ply),
                    depth: slot.depth as i32,
                    bound: slot.bound()?,
                })
            })
    }

    /// Record a search result. A null `mv` keeps the move already stored for `key`.
    pub fn store(&mut self, key: u64, mv: Move, score: i32, bound: Bound, depth: i32, ply: usize) {
        let generation = self.generation;
        let range = self.bucket(key);
        let bucket = &mut self.slots[range];

        let index = match bucket.iter().position(|s| s.key == key && s.bound != 0) {
            Some(i) => i,
            None => bucket
                .iter()
                .enumerate()
                .min_by_key(|(_, s)| s.worth(generation))
                .map_or(0, |(i, _)| i),
        };

        let slot = &mut bucket[index];
        let mv = if mv.is_null() && slot.key == key { slot.mv } else { mv };
        *slot = Slot {
            key,
            mv,
            score: score_to_tt(score, ply),
            depth: depth.clamp(0, i8::MAX as i32) as i8,
            bound: match bound {
                Bound::Exact => 1,
                Bound::Lower => 2,
                Bound::Upper => 3,
            },
            generation,
        };
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("slots", &self.slots.len())
            .field("generation", &self.generation)
            .finish()
    }
}
