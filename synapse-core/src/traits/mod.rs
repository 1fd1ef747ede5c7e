mod embedding;
mod event_sink;
mod extractor;
mod scorer;
mod storage;

pub use embedding::IEmbeddingProvider;
pub use event_sink::IEventSink;
pub use extractor::IFactExtractor;
pub use scorer::IFactScorer;
pub use storage::{IFactStorage, IGraphStorage};
