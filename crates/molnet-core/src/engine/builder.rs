use crate::core::descriptors::{Fingerprint, FingerprintCalculator, Fingerprinter};
use crate::core::graph::{MolecularNetwork, MoleculeNode};
use crate::core::labels;
use crate::core::similarity::{SimilarityCalculator, SimilarityScorer};
use crate::engine::config::NetworkConfig;
use crate::engine::error::NetworkError;
use crate::engine::progress::{Progress, ProgressReporter};
use std::fmt::Display;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds molecular similarity networks from SMILES collections.
///
/// The builder holds the edge threshold together with its two collaborators:
/// a [`Fingerprinter`] computing one descriptor per structure and a
/// [`SimilarityScorer`] scoring descriptor pairs. Each [`build`] call returns
/// a freshly constructed [`MolecularNetwork`]; the builder keeps no graph
/// state between calls.
///
/// [`build`]: NetworkBuilder::build
pub struct NetworkBuilder<F = FingerprintCalculator, S = SimilarityCalculator> {
    threshold: f64,
    fingerprinter: F,
    scorer: S,
}

impl NetworkBuilder {
    /// Creates a builder using the default calculators selected by `config`.
    pub fn from_config(config: &NetworkConfig) -> Self {
        Self::with_parts(
            FingerprintCalculator::new(config.descriptor),
            SimilarityCalculator::new(config.metric),
            config.similarity_threshold,
        )
    }
}

impl<F, S> NetworkBuilder<F, S>
where
    F: Fingerprinter,
    S: SimilarityScorer,
{
    /// Creates a builder from explicit collaborators, e.g. an alternative
    /// descriptor backend.
    pub fn with_parts(fingerprinter: F, scorer: S, threshold: f64) -> Self {
        Self {
            threshold,
            fingerprinter,
            scorer,
        }
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.threshold
    }

    /// Builds a network without progress reporting.
    pub fn build<L>(&self, smiles: &[String], labels: &[L]) -> Result<MolecularNetwork, NetworkError>
    where
        L: Ord + Clone + Display,
    {
        self.build_with_progress(smiles, labels, &ProgressReporter::new())
    }

    /// Builds a network: one node per input structure (in input order), one
    /// edge per pair whose similarity strictly exceeds the threshold.
    ///
    /// The whole batch fails on the first unparseable SMILES string, in
    /// input order, without returning a partial graph. Labels become node
    /// attributes through their sorted vocabulary, so equal labels always
    /// map to the same categorical string.
    #[instrument(skip_all, name = "network_build")]
    pub fn build_with_progress<L>(
        &self,
        smiles: &[String],
        labels: &[L],
        reporter: &ProgressReporter,
    ) -> Result<MolecularNetwork, NetworkError>
    where
        L: Ord + Clone + Display,
    {
        if smiles.len() != labels.len() {
            return Err(NetworkError::ShapeMismatch {
                structures: smiles.len(),
                labels: labels.len(),
            });
        }

        info!(molecules = smiles.len(), "Starting network build.");
        let fingerprints = self.compute_fingerprints(smiles, reporter)?;
        let encoding = labels::encode(labels);
        debug!(classes = encoding.classes.len(), "Label vocabulary encoded.");

        let mut network = MolecularNetwork::with_capacity(smiles.len(), 0);
        for (smi, &class_index) in smiles.iter().zip(encoding.indices.iter()) {
            network.add_node(MoleculeNode {
                smiles: smi.clone(),
                categorical_label: encoding.classes[class_index].to_string(),
            });
        }

        self.add_edges(&mut network, &fingerprints, reporter);
        info!(
            nodes = network.node_count(),
            edges = network.edge_count(),
            "Network build complete."
        );
        Ok(network)
    }

    /// Computes one fingerprint per structure, in input order.
    ///
    /// Under the `parallel` feature the per-item work is distributed, but
    /// the error surfaced is still the one at the lowest input index, so
    /// behavior is indistinguishable from the sequential scan.
    fn compute_fingerprints(
        &self,
        smiles: &[String],
        reporter: &ProgressReporter,
    ) -> Result<Vec<Fingerprint>, NetworkError> {
        reporter.report(Progress::PhaseStart {
            name: "Fingerprints",
        });
        reporter.report(Progress::TaskStart {
            total: smiles.len() as u64,
        });

        #[cfg(feature = "parallel")]
        let iterator = smiles.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iterator = smiles.iter();

        let results: Vec<_> = iterator
            .map(|smi| {
                let result = self.fingerprinter.fingerprint(smi);
                reporter.report(Progress::TaskIncrement);
                result
            })
            .collect();

        let mut fingerprints = Vec::with_capacity(results.len());
        for result in results {
            fingerprints.push(result?);
        }

        reporter.report(Progress::TaskFinish);
        reporter.report(Progress::PhaseFinish);
        Ok(fingerprints)
    }

    /// Scores every unordered pair and inserts the edges above threshold.
    ///
    /// The pair scan is exhaustive (no indexed or approximate search) and
    /// dominates the cost of a build. Workers own disjoint `i` ranges, and
    /// the collected edge list is applied to the graph sequentially.
    fn add_edges(
        &self,
        network: &mut MolecularNetwork,
        fingerprints: &[Fingerprint],
        reporter: &ProgressReporter,
    ) {
        let n = fingerprints.len();
        reporter.report(Progress::PhaseStart {
            name: "Similarity edges",
        });
        reporter.report(Progress::TaskStart {
            total: (n * n.saturating_sub(1) / 2) as u64,
        });

        #[cfg(feature = "parallel")]
        let edges: Vec<(usize, usize)> = (0..n)
            .into_par_iter()
            .flat_map_iter(|i| self.scan_row(i, fingerprints, reporter))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let edges: Vec<(usize, usize)> = (0..n)
            .flat_map(|i| self.scan_row(i, fingerprints, reporter))
            .collect();

        for (i, j) in edges {
            network.add_edge(i, j);
        }

        reporter.report(Progress::TaskFinish);
        reporter.report(Progress::PhaseFinish);
    }

    /// Scores the pairs `(i, i+1..n)` and yields those above threshold.
    fn scan_row<'a>(
        &'a self,
        i: usize,
        fingerprints: &'a [Fingerprint],
        reporter: &'a ProgressReporter<'a>,
    ) -> impl Iterator<Item = (usize, usize)> + 'a {
        (i + 1..fingerprints.len()).filter_map(move |j| {
            let score = self.pair_similarity(&fingerprints[i], &fingerprints[j]);
            reporter.report(Progress::TaskIncrement);
            (score > self.threshold).then_some((i, j))
        })
    }

    /// Order-sensitive metrics can score a pair differently depending on
    /// argument order; both orderings are evaluated and the larger score
    /// decides.
    fn pair_similarity(&self, a: &Fingerprint, b: &Fingerprint) -> f64 {
        self.scorer.score(a, b).max(self.scorer.score(b, a))
    }
}
