//! EmbeddingEngine: cache lookup, then the provider under a timeout.
//!
//! Every failure path returns an error and records a degradation event;
//! callers treat the error as "no embedding signal". A provider timeout
//! opens a breaker: until the cooldown passes, uncached texts fail fast
//! instead of waiting on a provider that is already hanging.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use synapse_core::config::EmbeddingConfig;
use synapse_core::errors::{EmbeddingError, SynapseError, SynapseResult};
use synapse_core::models::DegradationEvent;
use synapse_core::traits::IEmbeddingProvider;

use crate::cache::L1MemoryCache;
use crate::degradation::DegradationLog;

pub struct EmbeddingEngine {
    provider: Option<Arc<dyn IEmbeddingProvider>>,
    cache: L1MemoryCache,
    timeout: Option<Duration>,
    cooldown: Duration,
    open_until: Mutex<Option<Instant>>,
    degradation: DegradationLog,
}

impl EmbeddingEngine {
    /// `timeout_ms == 0` disables the timeout.
    pub fn new(provider: Option<Arc<dyn IEmbeddingProvider>>, config: &EmbeddingConfig) -> Self {
        let timeout = (config.timeout_ms > 0).then(|| Duration::from_millis(config.timeout_ms));
        tracing::info!(
            provider = provider.as_ref().map(|p| p.name()).unwrap_or("none"),
            cache_size = config.l1_cache_size,
            timeout_ms = config.timeout_ms,
            breaker_cooldown_ms = config.breaker_cooldown_ms,
            "EmbeddingEngine initialized"
        );
        Self {
            provider,
            cache: L1MemoryCache::new(config.l1_cache_size),
            timeout,
            cooldown: Duration::from_millis(config.breaker_cooldown_ms),
            open_until: Mutex::new(None),
            degradation: DegradationLog::default(),
        }
    }

    /// Engine with no provider; every call degrades.
    pub fn disabled() -> Self {
        Self::new(None, &EmbeddingConfig::default())
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.name())
    }

    /// A provider is configured, reports itself available, and is not
    /// cooling down after a timeout.
    pub fn is_available(&self) -> bool {
        self.provider.as_ref().is_some_and(|p| p.is_available()) && !self.breaker_open()
    }

    /// True while a recent timeout keeps the provider out of use.
    pub fn breaker_open(&self) -> bool {
        let Ok(mut open_until) = self.open_until.lock() else {
            return false;
        };
        match *open_until {
            Some(until) if Instant::now() < until => true,
            Some(_) => {
                *open_until = None;
                tracing::info!("embedding breaker closed");
                false
            }
            None => false,
        }
    }

    pub fn embed(&self, text: &str) -> SynapseResult<Vec<f32>> {
        let key = L1MemoryCache::key_for(text);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        let Some(provider) = self.provider.as_ref().filter(|p| p.is_available()) else {
            let name = self.provider_name().unwrap_or("none").to_string();
            self.degradation
                .record(format!("provider {name} unavailable"), "keyword scoring");
            return Err(EmbeddingError::ProviderUnavailable { provider: name }.into());
        };

        if self.breaker_open() {
            let name = provider.name().to_string();
            self.degradation.record(
                format!("provider {name} cooling down after timeout"),
                "keyword scoring",
            );
            return Err(EmbeddingError::ProviderUnavailable { provider: name }.into());
        }

        match self.call_provider(provider, text) {
            Ok(embedding) => {
                self.cache.insert(key, embedding.clone());
                Ok(embedding)
            }
            Err(e) => {
                if matches!(e, SynapseError::EmbeddingError(EmbeddingError::Timeout { .. })) {
                    self.open_breaker();
                }
                self.degradation.record(e.to_string(), "keyword scoring");
                Err(e)
            }
        }
    }

    /// Embedding or `None`, for callers that only need the signal.
    pub fn try_embed(&self, text: &str) -> Option<Vec<f32>> {
        self.embed(text).ok()
    }

    pub fn cache_hit_rate(&self) -> f64 {
        self.cache.hit_rate()
    }

    pub fn pending_degradations(&self) -> usize {
        self.degradation.len()
    }

    pub fn drain_degradation_events(&self) -> Vec<DegradationEvent> {
        self.degradation.drain()
    }

    fn open_breaker(&self) {
        if self.cooldown.is_zero() {
            return;
        }
        if let Ok(mut open_until) = self.open_until.lock() {
            *open_until = Some(Instant::now() + self.cooldown);
            tracing::warn!(
                cooldown_ms = self.cooldown.as_millis() as u64,
                "embedding breaker opened"
            );
        }
    }

    fn call_provider(
        &self,
        provider: &Arc<dyn IEmbeddingProvider>,
        text: &str,
    ) -> SynapseResult<Vec<f32>> {
        let Some(timeout) = self.timeout else {
            return provider.embed(text);
        };

        // The worker outlives a timed-out call; its result is dropped.
        let (tx, rx) = mpsc::channel();
        let worker_provider = Arc::clone(provider);
        let owned = text.to_string();
        std::thread::Builder::new()
            .name("synapse-embed".into())
            .spawn(move || {
                let _ = tx.send(worker_provider.embed(&owned));
            })
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("failed to spawn embedding worker: {e}"),
            })?;

        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(EmbeddingError::Timeout {
                provider: provider.name().to_string(),
                timeout_ms: timeout.as_millis() as u64,
            }
            .into()),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EmbeddingError::InferenceFailed {
                reason: "embedding worker exited without a result".into(),
            }
            .into()),
        }
    }
}
