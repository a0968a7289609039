//! Redis read-through cache in front of any `SkillExtractor`.
//!
//! Cache trouble is never fatal: on any Redis error we log and fall through
//! to the inner extractor.

use std::sync::Arc;

use async_trait::async_trait;
use redis::AsyncCommands;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::matching::SkillSet;
use crate::screening::extractor::{ExtractionError, SkillExtractor};

const KEY_PREFIX: &str = "screener:skills";
const TTL_SECS: u64 = 24 * 60 * 60;

pub struct CachedSkillExtractor {
    inner: Arc<dyn SkillExtractor>,
    redis: redis::Client,
}

impl CachedSkillExtractor {
    pub fn new(inner: Arc<dyn SkillExtractor>, redis: redis::Client) -> Self {
        Self { inner, redis }
    }

    async fn lookup(&self, key: &str) -> redis::RedisResult<Option<String>> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        conn.get(key).await
    }

    async fn store(&self, key: &str, value: &str) -> redis::RedisResult<()> {
        let mut conn = self.redis.get_multiplexed_async_connection().await?;
        conn.set_ex(key, value, TTL_SECS).await
    }
}

/// Key covers backend, resume text and hints: the same text with different
/// hints can yield different skills.
pub(crate) fn cache_key(backend: &str, text: &str, hints: &SkillSet) -> String {
    let mut sorted_hints: Vec<&str> = hints.iter().collect();
    sorted_hints.sort_unstable();

    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    for hint in sorted_hints {
        hasher.update([0x1f]);
        hasher.update(hint.as_bytes());
    }
    format!("{KEY_PREFIX}:{backend}:{}", hex::encode(hasher.finalize()))
}

#[async_trait]
impl SkillExtractor for CachedSkillExtractor {
    async fn extract_skills(&self, text: &str, hints: &SkillSet) -> Result<SkillSet, ExtractionError> {
        let key = cache_key(self.inner.backend(), text, hints);

        match self.lookup(&key).await {
            Ok(Some(cached)) => match serde_json::from_str::<SkillSet>(&cached) {
                Ok(skills) => {
                    debug!("Skill cache hit {key}");
                    return Ok(skills);
                }
                Err(e) => warn!("Discarding unreadable skill cache entry {key}: {e}"),
            },
            Ok(None) => debug!("Skill cache miss {key}"),
            Err(e) => warn!("Skill cache lookup failed, bypassing cache: {e}"),
        }

        let skills = self.inner.extract_skills(text, hints).await?;

        match serde_json::to_string(&skills) {
            Ok(payload) => {
                if let Err(e) = self.store(&key, &payload).await {
                    warn!("Skill cache write failed: {e}");
                }
            }
            Err(e) => warn!("Could not serialize skills for cache: {e}"),
        }

        Ok(skills)
    }

    fn backend(&self) -> &'static str {
        self.inner.backend()
    }
}
