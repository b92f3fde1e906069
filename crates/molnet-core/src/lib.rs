//! # molnet Core Library
//!
//! A library for building molecular similarity networks: given a collection
//! of SMILES strings and their class labels, it computes a fingerprint per
//! molecule, scores every pair with a configurable similarity metric, and
//! returns a simple undirected graph whose edges mark pairs above a
//! similarity threshold.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict dependency direction:
//!
//! - **[`core`]: The Foundation.** Stateless, deterministic building blocks:
//!   the fingerprint model and calculator, similarity metrics, categorical
//!   label encoding, the graph model, and graph file I/O.
//!
//! - **[`engine`]: The Logic Core.** The orchestration layer that owns the
//!   build pipeline: configuration resolved into closed enums up front, the
//!   `NetworkBuilder` workflow, progress reporting, and the error taxonomy.
//!
//! Descriptor computation and similarity scoring sit behind the
//! [`core::descriptors::Fingerprinter`] and
//! [`core::similarity::SimilarityScorer`] traits, so alternative chemistry
//! backends can be injected without touching the orchestration.
//!
//! ## Example
//!
//! ```
//! use molnet::engine::builder::NetworkBuilder;
//! use molnet::engine::config::NetworkConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NetworkConfig::builder().similarity_threshold(0.5).build()?;
//! let builder = NetworkBuilder::from_config(&config);
//!
//! let smiles = vec!["CCO".to_string(), "CCN".to_string(), "c1ccccc1".to_string()];
//! let labels = vec!["active", "active", "inactive"];
//! let network = builder.build(&smiles, &labels)?;
//!
//! assert_eq!(network.node_count(), 3);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod engine;
