/// Static question corpus.
pub mod corpus;
/// File-backed storage implementation.
pub mod local;
/// Persisted and exchanged data models.
pub mod models;
/// Question selection and asked-question tracking.
pub mod question_pool;
/// Per-player stats and their JSON snapshot.
pub mod stats_store;
/// Storage contract and error taxonomy.
pub mod storage;
