use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Which users have already posted at least once, per guild. Mirrored to a
/// JSON file shaped `{ "guild_id": ["user_id", ...] }` after every change.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenStore {
    seen: HashMap<String, Vec<String>>,
}

impl SeenStore {
    /// Loads the store from `path`. A missing file means a fresh store;
    /// an unreadable or malformed file is an error (fatal at startup).
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn has_seen(&self, guild_id: &str, user_id: &str) -> bool {
        self.seen
            .get(guild_id)
            .is_some_and(|users| users.iter().any(|u| u == user_id))
    }

    /// Marks (guild, user) as seen. Returns whether the store changed.
    pub fn mark_seen(&mut self, guild_id: &str, user_id: &str) -> bool {
        let users = self.seen.entry(guild_id.to_string()).or_default();
        if users.iter().any(|u| u == user_id) {
            return false;
        }
        users.push(user_id.to_string());
        true
    }

    /// Rewrites the whole store to `path`. Writes a sibling temp file first
    /// and renames it over the target so a crash mid-write cannot leave a
    /// half-written file behind.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("tmp");

        fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, path)
            .await
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        Ok(())
    }
}
