//! Append-only JSONL session event log.

pub mod jsonl;
