//! Working-set manager: derives the bounded list of entries the reel actually
//! scrolls through from a candidate pool of any size.
//!
//! Entries are laid out in ticket order. Small pools are repeated to a minimum
//! reel length, mid-sized pools are used as-is, and large pools are cut down
//! to a window centred on the winner so per-frame cost does not grow with the
//! pool.

use reel_model::{Entry, TicketKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ReelError, Result};

/// Minimum reel length; smaller pools are repeated up to it.
pub const DEFAULT_MIN_LEN: usize = 100;
/// Maximum reel length; larger pools are windowed down to it.
pub const DEFAULT_MAX_LEN: usize = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowLimits {
    pub min_len: usize,
    pub max_len: usize,
}

impl Default for WindowLimits {
    fn default() -> Self {
        Self {
            min_len: DEFAULT_MIN_LEN,
            max_len: DEFAULT_MAX_LEN,
        }
    }
}

/// Which sizing rule produced a working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkingSetRegime {
    /// Pool repeated cyclically up to the minimum length.
    Repeated,
    /// Whole pool, sorted.
    Full,
    /// Window around the winner, wrapping around the sorted pool.
    Windowed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkingSet {
    entries: Vec<Entry>,
    winner_index: usize,
    regime: WorkingSetRegime,
    pool_len: usize,
}

impl WorkingSet {
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn winner_index(&self) -> usize {
        self.winner_index
    }

    pub fn winner(&self) -> &Entry {
        &self.entries[self.winner_index]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn regime(&self) -> WorkingSetRegime {
        self.regime
    }

    /// Size of the candidate pool this set was built from.
    pub fn pool_len(&self) -> usize {
        self.pool_len
    }
}

/// Build a working set with the default limits.
pub fn build_working_set(
    pool: &[Entry],
    winner_ticket: &str,
) -> Result<WorkingSet> {
    build_working_set_with(pool, winner_ticket, &WindowLimits::default())
}

pub fn build_working_set_with(
    pool: &[Entry],
    winner_ticket: &str,
    limits: &WindowLimits,
) -> Result<WorkingSet> {
    if pool.is_empty() {
        return Err(ReelError::EmptyPool);
    }

    let winner_key = TicketKey::parse(winner_ticket);
    let keys: Vec<TicketKey> = pool.iter().map(Entry::ticket_key).collect();

    // Stable, so entries sharing a ticket value keep their pool order.
    let mut order: Vec<usize> = (0..pool.len()).collect();
    order.sort_by(|&a, &b| keys[a].sort_key().cmp(&keys[b].sort_key()));

    let winner_pos = order
        .iter()
        .position(|&i| keys[i] == winner_key)
        .ok_or_else(|| ReelError::WinnerNotFound {
            ticket: winner_ticket.to_owned(),
        })?;

    let n = pool.len();
    let max_len = limits.max_len.max(1);
    let min_len = limits.min_len.min(max_len);

    let (entries, winner_index, regime) = if n < min_len {
        let entries: Vec<Entry> =
            (0..min_len).map(|k| pool[order[k % n]].clone()).collect();
        (entries, winner_pos, WorkingSetRegime::Repeated)
    } else if n <= max_len {
        let entries: Vec<Entry> =
            order.iter().map(|&i| pool[i].clone()).collect();
        (entries, winner_pos, WorkingSetRegime::Full)
    } else {
        let before = max_len / 2;
        // n > max_len > before, so the start never underflows
        let start = winner_pos + n - before;
        let entries: Vec<Entry> = (0..max_len)
            .map(|k| pool[order[(start + k) % n]].clone())
            .collect();
        (entries, before, WorkingSetRegime::Windowed)
    };

    debug!(
        pool_len = n,
        working_len = entries.len(),
        winner_index,
        ?regime,
        "built working set"
    );

    Ok(WorkingSet {
        entries,
        winner_index,
        regime,
        pool_len: n,
    })
}

/// Rotate the set so the winner sits at index 0.
pub fn rotate_to_winner_front(set: &WorkingSet) -> WorkingSet {
    let mut entries = set.entries.clone();
    entries.rotate_left(set.winner_index);
    WorkingSet {
        entries,
        winner_index: 0,
        regime: set.regime,
        pool_len: set.pool_len,
    }
}
