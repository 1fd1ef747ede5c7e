//! Assembles an [`Engine`] from configuration and external collaborators.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use synapse_consolidation::{ConsolidationEngine, ExtractionPipeline};
use synapse_core::config::{StorageConfig, SynapseConfig};
use synapse_core::errors::{SynapseError, SynapseResult};
use synapse_core::traits::{
    IEmbeddingProvider, IEventSink, IFactExtractor, IFactScorer, IFactStorage, IGraphStorage,
};
use synapse_embeddings::EmbeddingEngine;
use synapse_graph::GraphStore;
use synapse_observability::DegradationTracker;
use synapse_retrieval::RelevanceScorer;
use synapse_storage::StorageEngine;
use synapse_tiers::TieredFactStore;

use crate::engine::Engine;
use crate::inbox::Inbox;

/// Builder for [`Engine`].
///
/// Storage is in-memory unless [`db_path`](Self::db_path) is set. A fact
/// scorer is required; without an extractor, conversation submission is
/// rejected. Operational events go to the database unless another sink is
/// given.
#[derive(Default)]
pub struct EngineBuilder {
    config: SynapseConfig,
    db_path: Option<PathBuf>,
    embedder: Option<Arc<dyn IEmbeddingProvider>>,
    scorer: Option<Arc<dyn IFactScorer>>,
    extractor: Option<Arc<dyn IFactExtractor>>,
    event_sink: Option<Arc<dyn IEventSink>>,
    fact_storage: Option<Arc<dyn IFactStorage>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: SynapseConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse a TOML configuration document.
    pub fn config_toml(mut self, source: &str) -> SynapseResult<Self> {
        self.config = SynapseConfig::from_toml(source)?;
        Ok(self)
    }

    pub fn db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    pub fn embedder(mut self, provider: Arc<dyn IEmbeddingProvider>) -> Self {
        self.embedder = Some(provider);
        self
    }

    pub fn scorer(mut self, scorer: Arc<dyn IFactScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    pub fn extractor(mut self, extractor: Arc<dyn IFactExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn event_sink(mut self, sink: Arc<dyn IEventSink>) -> Self {
        self.event_sink = Some(sink);
        self
    }

    /// Keep pending facts, long-term facts and history in `storage`
    /// instead of the engine's database.
    pub fn fact_storage(mut self, storage: Arc<dyn IFactStorage>) -> Self {
        self.fact_storage = Some(storage);
        self
    }

    pub fn build(self) -> SynapseResult<Engine> {
        let config = self.config;
        config.validate()?;

        let scorer = self
            .scorer
            .ok_or_else(|| SynapseError::ConfigError("a fact scorer is required".into()))?;

        let storage = Arc::new(match &self.db_path {
            Some(path) => StorageEngine::open_with_config(&StorageConfig {
                db_path: path.to_string_lossy().into_owned(),
                ..config.storage.clone()
            })?,
            None => StorageEngine::open_in_memory()?,
        });
        let graph_storage: Arc<dyn IGraphStorage> = storage.clone();
        let fact_storage: Arc<dyn IFactStorage> = match self.fact_storage {
            Some(facts) => facts,
            None => storage.clone(),
        };
        let events: Arc<dyn IEventSink> = match self.event_sink {
            Some(sink) => sink,
            None => storage.clone(),
        };

        let graph = Arc::new(GraphStore::new(graph_storage, config.graph.clone()));
        let embeddings = Arc::new(EmbeddingEngine::new(self.embedder, &config.embedding));
        let relevance = RelevanceScorer::new(
            Arc::clone(&graph),
            Arc::clone(&embeddings),
            config.relevance.clone(),
            config.graph.clone(),
        );
        let facts = Arc::new(TieredFactStore::new(fact_storage));
        let consolidation = ConsolidationEngine::new(
            Arc::clone(&facts),
            Arc::clone(&graph),
            scorer,
            config.consolidation.clone(),
            config.graph.clone(),
        )
        .with_event_sink(Arc::clone(&events));
        let extraction = self
            .extractor
            .map(|extractor| ExtractionPipeline::new(extractor, config.extraction.clone()));
        let inbox = Inbox::new(config.extraction.inbox_capacity);

        tracing::info!(
            persistent = self.db_path.is_some(),
            embeddings = embeddings.provider_name().unwrap_or("none"),
            extraction = extraction.is_some(),
            "engine assembled"
        );

        Ok(Engine {
            config,
            storage,
            graph,
            embeddings,
            relevance,
            facts,
            consolidation,
            extraction,
            inbox,
            events,
            degradation: Mutex::new(DegradationTracker::new()),
            last_health: Mutex::new(None),
        })
    }
}
