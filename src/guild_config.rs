//! Cached per-guild configuration
//!
//! Guild settings are looked up on almost every command, so they live in a
//! time-expiring cache in front of whatever produces them (a database, a
//! file, or plain defaults). Expired entries are dropped lazily on access.

use crate::interaction::Snowflake;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

// ─────────────────────────────────────────────────────────────────────────────
// Expiry cache
// ─────────────────────────────────────────────────────────────────────────────

/// Map whose entries expire a fixed duration after insertion
///
/// Values carry their own key; `key_of` extracts it on insert.
pub struct ExpiryCache<K, V> {
    expiry: Duration,
    key_of: fn(&V) -> K,
    entries: RwLock<HashMap<K, (V, Instant)>>,
}

impl<K, V> ExpiryCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(expiry: Duration, key_of: fn(&V) -> K) -> Self {
        Self {
            expiry,
            key_of,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or refresh `value`
    pub async fn add(&self, value: V) {
        let key = (self.key_of)(&value);
        self.entries
            .write()
            .await
            .insert(key, (value, Instant::now()));
    }

    /// Live value for `key`; an expired entry is evicted and reported missing
    pub async fn get(&self, key: &K) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some((value, inserted)) if inserted.elapsed() < self.expiry => {
                    return Some(value.clone())
                }
                Some(_) => {}
                None => return None,
            }
        }

        self.evict_if_expired(key).await;
        None
    }

    /// Remove `key` only if its entry is still expired under the write lock;
    /// a refresh that won the lock in between is kept
    async fn evict_if_expired(&self, key: &K) -> bool {
        let mut entries = self.entries.write().await;
        let expired = entries
            .get(key)
            .is_some_and(|(_, inserted)| inserted.elapsed() >= self.expiry);
        if expired {
            entries.remove(key);
        }
        expired
    }

    pub async fn remove(&self, key: &K) -> Option<V> {
        self.entries.write().await.remove(key).map(|(value, _)| value)
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, (_, inserted)| inserted.elapsed() < self.expiry);
        before - entries.len()
    }

    /// Number of stored entries, expired ones included until purged
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Guild configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration belonging to one guild
pub trait GuildConfig: Clone + Send + Sync + 'static {
    fn guild_id(&self) -> Snowflake;
}

/// Guild configuration with an on/off switch
pub trait ToggleableGuildConfig: GuildConfig {
    fn enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
}

/// Produces the configuration used when nothing is cached for a guild
#[async_trait]
pub trait GuildConfigSource<C>: Send + Sync {
    async fn default_config(&self, guild_id: Snowflake) -> Result<C>;
}

/// Cached configuration of type `C` for every guild
pub struct GuildConfigHolder<C: GuildConfig> {
    cache: ExpiryCache<Snowflake, C>,
    source: Arc<dyn GuildConfigSource<C>>,
}

impl<C: GuildConfig> GuildConfigHolder<C> {
    pub fn new(expiry: Duration, source: impl GuildConfigSource<C> + 'static) -> Self {
        Self {
            cache: ExpiryCache::new(expiry, C::guild_id),
            source: Arc::new(source),
        }
    }

    /// Cached config for the guild, or the source's default (which is then
    /// cached)
    pub async fn retrieve(&self, guild_id: Snowflake) -> Result<C> {
        if let Some(config) = self.cache.get(&guild_id).await {
            return Ok(config);
        }

        tracing::debug!(guild = guild_id, "Guild config not cached, loading default");
        let config = self.source.default_config(guild_id).await?;
        self.cache.add(config.clone()).await;
        Ok(config)
    }

    /// Replace the cached config for its guild
    pub async fn store(&self, config: C) {
        self.cache.add(config).await;
    }

    pub async fn evict(&self, guild_id: Snowflake) -> Option<C> {
        self.cache.remove(&guild_id).await
    }
}

impl<C: ToggleableGuildConfig> GuildConfigHolder<C> {
    /// Enable or disable the guild's config, starting from the default when
    /// none is cached
    pub async fn set_enabled(&self, guild_id: Snowflake, enabled: bool) -> Result<C> {
        let mut config = self.retrieve(guild_id).await?;
        config.set_enabled(enabled);
        self.store(config.clone()).await;
        Ok(config)
    }
}
