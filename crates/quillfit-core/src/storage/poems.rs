//! Persistence gateway for drafts and saved poems.
//!
//! Layout in the underlying [`KvStore`]:
//! - `savedPoems`: JSON array of saved poems, in save order
//! - `draft_<kind>`: raw draft text per poem kind
//!
//! A missing or corrupt `savedPoems` record reads as an empty history.

use tracing::{debug, warn};

use super::kv::KvStore;
use crate::error::Result;
use crate::poem::{PoemKind, SavedPoem};

pub const SAVED_POEMS_KEY: &str = "savedPoems";

pub struct PoemStore<S> {
    kv: S,
}

impl<S: KvStore> PoemStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    pub fn get_draft(&self, kind: PoemKind) -> Result<Option<String>> {
        self.kv.get(&kind.draft_key())
    }

    pub fn set_draft(&mut self, kind: PoemKind, text: &str) -> Result<()> {
        self.kv.set(&kind.draft_key(), text)
    }

    pub fn clear_all_drafts(&mut self) -> Result<()> {
        for kind in PoemKind::ALL {
            self.kv.remove(&kind.draft_key())?;
        }
        debug!("cleared all drafts");
        Ok(())
    }

    /// Saved poems in the order they were appended.
    pub fn saved_poems_in_order(&self) -> Result<Vec<SavedPoem>> {
        let Some(raw) = self.kv.get(SAVED_POEMS_KEY)? else {
            return Ok(Vec::new());
        };
        let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "saved poems record is not a JSON array; treating as empty");
                return Ok(Vec::new());
            }
        };
        let total = entries.len();
        let poems: Vec<SavedPoem> = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect();
        if poems.len() != total {
            warn!(
                skipped = total - poems.len(),
                "skipped malformed saved poem entries"
            );
        }
        Ok(poems)
    }

    /// Saved poems, newest first by date. Entries with equal dates list the
    /// later save first.
    pub fn list_saved_poems(&self) -> Result<Vec<SavedPoem>> {
        let mut poems = self.saved_poems_in_order()?;
        poems.reverse();
        poems.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(poems)
    }

    pub fn append_saved_poem(&mut self, poem: SavedPoem) -> Result<()> {
        let mut poems = self.saved_poems_in_order()?;
        poems.push(poem);
        let json = serde_json::to_string(&poems)?;
        self.kv.set(SAVED_POEMS_KEY, &json)
    }
}
