//! StorageEngine: owns the ConnectionPool, runs migrations, and implements
//! the graph, fact and event-sink persistence traits.

use std::path::Path;

use synapse_core::config::StorageConfig;
use synapse_core::errors::SynapseResult;
use synapse_core::models::{
    ConceptLink, ConceptNode, ConsolidationHistoryRecord, FactStatus, LongTermFact,
    OperationalEvent, PendingFact,
};
use synapse_core::traits::{IEventSink, IFactStorage, IGraphStorage};

use crate::migrations;
use crate::pool::ConnectionPool;
use crate::queries::{
    concept_ops, cooccurrence_ops, event_ops, fact_ops, history_ops, link_ops, pending_ops,
};

pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open a file-backed engine with default pool settings.
    pub fn open(path: &Path) -> SynapseResult<Self> {
        let config = StorageConfig::default();
        Self::open_with(path, config.read_pool_size, config.busy_timeout_ms)
    }

    /// Open the database named by `config.db_path`.
    pub fn open_with_config(config: &StorageConfig) -> SynapseResult<Self> {
        Self::open_with(
            Path::new(&config.db_path),
            config.read_pool_size,
            config.busy_timeout_ms,
        )
    }

    fn open_with(path: &Path, read_pool_size: usize, busy_timeout_ms: u32) -> SynapseResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size, busy_timeout_ms)?;
        let engine = Self { pool };
        let applied = engine.initialize()?;
        tracing::info!(path = %path.display(), applied, "storage opened");
        Ok(engine)
    }

    /// In-memory engine; all reads go through the writer.
    pub fn open_in_memory() -> SynapseResult<Self> {
        let engine = Self {
            pool: ConnectionPool::open_in_memory()?,
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Run pending migrations; returns how many were applied.
    fn initialize(&self) -> SynapseResult<usize> {
        self.pool.writer.with_conn_sync(migrations::run_migrations)
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    pub fn schema_version(&self) -> SynapseResult<u32> {
        self.with_reader(migrations::current_version)
    }

    /// Recent operational events, newest first.
    pub fn recent_events(
        &self,
        kind: Option<&str>,
        limit: usize,
    ) -> SynapseResult<Vec<OperationalEvent>> {
        self.with_reader(|conn| event_ops::recent(conn, kind, limit))
    }

    /// File-backed: read pool. In-memory: the writer.
    fn with_reader<F, T>(&self, f: F) -> SynapseResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> SynapseResult<T>,
    {
        match &self.pool.readers {
            Some(readers) => readers.with_conn(f),
            None => self.pool.writer.with_conn_sync(f),
        }
    }
}

impl IGraphStorage for StorageEngine {
    fn reinforce_link(&self, a: &str, b: &str, rate: f64, cap: f64) -> SynapseResult<f64> {
        self.pool.writer.with_transaction(|conn| {
            concept_ops::upsert(conn, a)?;
            concept_ops::upsert(conn, b)?;
            link_ops::reinforce(conn, a, b, rate, cap)
        })
    }

    fn decay_links(&self, factor: f64, min_strength: f64) -> SynapseResult<usize> {
        self.pool
            .writer
            .with_transaction(|conn| link_ops::decay(conn, factor, min_strength))
    }

    fn get_link(&self, a: &str, b: &str) -> SynapseResult<Option<ConceptLink>> {
        self.with_reader(|conn| link_ops::get_link(conn, a, b))
    }

    fn links_of(
        &self,
        concept: &str,
        min_strength: f64,
        limit: usize,
    ) -> SynapseResult<Vec<(String, f64)>> {
        self.with_reader(|conn| link_ops::links_of(conn, concept, min_strength, limit))
    }

    fn all_links(&self, min_strength: f64) -> SynapseResult<Vec<ConceptLink>> {
        self.with_reader(|conn| link_ops::all_links(conn, min_strength))
    }

    fn link_count(&self) -> SynapseResult<usize> {
        self.with_reader(link_ops::link_count)
    }

    fn upsert_concept(&self, name: &str) -> SynapseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| concept_ops::upsert(conn, name))
    }

    fn get_concept(&self, name: &str) -> SynapseResult<Option<ConceptNode>> {
        self.with_reader(|conn| concept_ops::get(conn, name))
    }

    fn concepts_with_prefix(&self, prefix: &str) -> SynapseResult<Vec<String>> {
        self.with_reader(|conn| concept_ops::with_prefix(conn, prefix))
    }

    fn concept_count(&self) -> SynapseResult<usize> {
        self.with_reader(concept_ops::count)
    }

    fn increment_cooccurrence(&self, a: &str, b: &str) -> SynapseResult<u64> {
        self.pool
            .writer
            .with_conn_sync(|conn| cooccurrence_ops::increment(conn, a, b))
    }

    fn cooccurrence_count(&self, a: &str, b: &str) -> SynapseResult<u64> {
        self.with_reader(|conn| cooccurrence_ops::count(conn, a, b))
    }

    fn cooccurrence_pair_count(&self) -> SynapseResult<usize> {
        self.with_reader(cooccurrence_ops::pair_count)
    }
}

impl IFactStorage for StorageEngine {
    fn insert_pending(&self, fact: &PendingFact) -> SynapseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| pending_ops::insert(conn, fact))
    }

    fn get_pending(&self, id: &str) -> SynapseResult<Option<PendingFact>> {
        self.with_reader(|conn| pending_ops::get(conn, id))
    }

    fn pending_with_status(
        &self,
        statuses: &[FactStatus],
        limit: usize,
    ) -> SynapseResult<Vec<PendingFact>> {
        self.with_reader(|conn| pending_ops::with_status(conn, statuses, limit))
    }

    fn update_pending(&self, fact: &PendingFact) -> SynapseResult<()> {
        let updated = self
            .pool
            .writer
            .with_conn_sync(|conn| pending_ops::update(conn, fact))?;
        if updated == 0 {
            return Err(synapse_core::SynapseError::PendingFactNotFound {
                id: fact.id.clone(),
            });
        }
        Ok(())
    }

    fn settle_pending(
        &self,
        fact: &PendingFact,
        record: &ConsolidationHistoryRecord,
    ) -> SynapseResult<()> {
        self.pool.writer.with_transaction(|conn| {
            if pending_ops::update(conn, fact)? == 0 {
                return Err(synapse_core::SynapseError::PendingFactNotFound {
                    id: fact.id.clone(),
                });
            }
            history_ops::append(conn, record)
        })
    }

    fn delete_settled_pending(&self, session_id: &str) -> SynapseResult<usize> {
        self.pool
            .writer
            .with_conn_sync(|conn| pending_ops::delete_settled(conn, session_id))
    }

    fn pending_count(&self) -> SynapseResult<usize> {
        self.with_reader(pending_ops::count)
    }

    fn get_fact(&self, key: &str) -> SynapseResult<Option<LongTermFact>> {
        self.with_reader(|conn| fact_ops::get(conn, key))
    }

    fn modify_fact(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<LongTermFact>) -> SynapseResult<LongTermFact>,
    ) -> SynapseResult<LongTermFact> {
        self.pool.writer.with_transaction(|conn| {
            let existing = fact_ops::get(conn, key)?;
            let updated = f(existing)?;
            fact_ops::upsert(conn, &updated)?;
            Ok(updated)
        })
    }

    fn all_facts(&self) -> SynapseResult<Vec<LongTermFact>> {
        self.with_reader(fact_ops::all)
    }

    fn record_access(&self, keys: &[String]) -> SynapseResult<()> {
        self.pool
            .writer
            .with_transaction(|conn| fact_ops::record_access(conn, keys))
    }

    fn fact_count(&self) -> SynapseResult<usize> {
        self.with_reader(fact_ops::count)
    }

    fn append_history(&self, record: &ConsolidationHistoryRecord) -> SynapseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| history_ops::append(conn, record))
    }

    fn history(&self, limit: usize) -> SynapseResult<Vec<ConsolidationHistoryRecord>> {
        self.with_reader(|conn| history_ops::recent(conn, limit))
    }
}

impl IEventSink for StorageEngine {
    fn emit(&self, event: &OperationalEvent) -> SynapseResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| event_ops::insert(conn, event))
    }
}
