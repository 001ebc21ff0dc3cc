//! Merit badge counselor name reconciliation.
//!
//! Progress exports spell counselor names however the person typing them
//! did: "Smith, John", "Mike Johnson", "Dr. Smyth". This crate turns those
//! strings back into roster adults. The matching pipeline (normalize,
//! score, rank) is pure; SQLite holds everything stateful: the roster view,
//! the queue of names awaiting manual review, the append-only reviewer
//! decision ledger, and the record of automatic matches.

pub mod db;
pub mod engine;
pub mod importer;
mod migrations;
pub mod nicknames;
pub mod normalize;
pub mod phonetic;
pub mod scorer;
