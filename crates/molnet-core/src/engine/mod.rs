//! # Engine Module
//!
//! The stateful orchestration layer: it wires the core building blocks into
//! the network construction workflow.
//!
//! - **Configuration** ([`config`]) - Build parameters with eager validation
//!   of descriptor and metric names
//! - **Builder** ([`builder`]) - The construction pipeline: fingerprints,
//!   label encoding, nodes, pairwise similarity edges
//! - **Progress Monitoring** ([`progress`]) - Progress events and the
//!   callback-based reporter front ends can subscribe to
//! - **Error Handling** ([`error`]) - Build-time error taxonomy

pub mod builder;
pub mod config;
pub mod error;
pub mod progress;
