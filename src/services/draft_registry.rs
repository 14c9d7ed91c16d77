use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::services::booking_flow::BookingFlow;

/// Drafts untouched for longer than this are dropped on the next insert.
pub const DRAFT_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Opening another draft past this count evicts the owner's oldest one.
pub const MAX_DRAFTS_PER_OWNER: usize = 5;

pub struct DraftEntry {
    /// Email of the user who opened the draft
    pub owner: String,
    pub flow: BookingFlow,
}

pub type SharedDraft = Arc<tokio::sync::Mutex<DraftEntry>>;

struct Slot {
    owner: String,
    opened_at: Instant,
    /// Insertion order; `Instant`s of back-to-back inserts can compare equal
    seq: u64,
    draft: SharedDraft,
}

/// In-progress booking flows, one per client draft.
///
/// Each draft has its own async lock so a slow store write on one draft
/// never blocks requests for another. Expired drafts are swept on insert.
pub struct DraftRegistry {
    drafts: Mutex<HashMap<Uuid, Slot>>,
    ttl: Duration,
    max_per_owner: usize,
    next_seq: AtomicU64,
}

impl Default for DraftRegistry {
    fn default() -> Self {
        Self::with_limits(DRAFT_TTL, MAX_DRAFTS_PER_OWNER)
    }
}

impl DraftRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(ttl: Duration, max_per_owner: usize) -> Self {
        Self {
            drafts: Mutex::new(HashMap::new()),
            ttl,
            max_per_owner: max_per_owner.max(1),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn insert(&self, owner: &str, flow: BookingFlow) -> Uuid {
        let now = Instant::now();
        let mut drafts = self.drafts.lock().unwrap_or_else(|e| e.into_inner());

        let before = drafts.len();
        drafts.retain(|_, slot| now.duration_since(slot.opened_at) < self.ttl);
        if drafts.len() < before {
            log::debug!("Dropped {} expired booking drafts", before - drafts.len());
        }

        let mut owned: Vec<(Uuid, u64)> = drafts
            .iter()
            .filter(|(_, slot)| slot.owner == owner)
            .map(|(id, slot)| (*id, slot.seq))
            .collect();
        if owned.len() >= self.max_per_owner {
            owned.sort_by_key(|(_, seq)| *seq);
            let excess = owned.len() + 1 - self.max_per_owner;
            for (id, _) in owned.into_iter().take(excess) {
                drafts.remove(&id);
                log::debug!("Evicted booking draft {} of {}", id, owner);
            }
        }

        let id = Uuid::new_v4();
        let entry = DraftEntry {
            owner: owner.to_string(),
            flow,
        };
        drafts.insert(
            id,
            Slot {
                owner: owner.to_string(),
                opened_at: now,
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                draft: Arc::new(tokio::sync::Mutex::new(entry)),
            },
        );
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<SharedDraft> {
        self.drafts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .map(|slot| slot.draft.clone())
    }

    pub fn remove(&self, id: &Uuid) -> bool {
        self.drafts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(id)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.drafts.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
