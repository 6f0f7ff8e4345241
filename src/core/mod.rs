pub mod config;
pub mod ingest;
pub mod log;
pub mod matcher;
pub mod normalize;
pub mod ports;
pub mod reconcile;
pub mod remap;
pub mod summary;
