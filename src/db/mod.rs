pub mod attendance;
pub mod calendar;
pub mod columns;
pub mod initialize;
pub mod ledger;
pub mod log;
pub mod migrate;
pub mod people;
pub mod pool;
pub mod stats;
pub mod unmatched;
