//! Similarity scoring between molecular fingerprints.
//!
//! All metrics are classical set-overlap measures over the on-bit counts of
//! two fingerprints. The [`SimilarityScorer`] trait is the seam the network
//! builder depends on; [`SimilarityCalculator`] is the default
//! implementation, dispatching on a [`SimilarityMetric`] resolved once at
//! configuration time.

use super::descriptors::Fingerprint;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported similarity metric '{0}'")]
pub struct ParseMetricError(pub String);

/// The similarity formulas a calculator can be configured with.
///
/// Most are symmetric in their arguments; `Asymmetric` and `Tversky` are
/// order-sensitive. `Tversky` carries its two weighting parameters; every
/// other metric ignores them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimilarityMetric {
    Asymmetric,
    BraunBlanquet,
    Cosine,
    Dice,
    Kulczynski,
    McConnaughey,
    OnBit,
    RogotGoldberg,
    Russel,
    Sokal,
    Tanimoto,
    Tversky { alpha: f64, beta: f64 },
}

impl Default for SimilarityMetric {
    fn default() -> Self {
        SimilarityMetric::Tanimoto
    }
}

impl FromStr for SimilarityMetric {
    type Err = ParseMetricError;

    /// Parses a metric name. `tversky` resolves to unit weights; callers
    /// that need other weights set them through the configuration surface.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asymmetric" => Ok(SimilarityMetric::Asymmetric),
            "braunblanquet" => Ok(SimilarityMetric::BraunBlanquet),
            "cosine" => Ok(SimilarityMetric::Cosine),
            "dice" => Ok(SimilarityMetric::Dice),
            "kulczynski" => Ok(SimilarityMetric::Kulczynski),
            "mcconnaughey" => Ok(SimilarityMetric::McConnaughey),
            "onbit" => Ok(SimilarityMetric::OnBit),
            "rogotgoldberg" => Ok(SimilarityMetric::RogotGoldberg),
            "russel" => Ok(SimilarityMetric::Russel),
            "sokal" => Ok(SimilarityMetric::Sokal),
            "tanimoto" => Ok(SimilarityMetric::Tanimoto),
            "tversky" => Ok(SimilarityMetric::Tversky {
                alpha: 1.0,
                beta: 1.0,
            }),
            _ => Err(ParseMetricError(s.to_string())),
        }
    }
}

impl fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SimilarityMetric::Asymmetric => "asymmetric",
            SimilarityMetric::BraunBlanquet => "braunblanquet",
            SimilarityMetric::Cosine => "cosine",
            SimilarityMetric::Dice => "dice",
            SimilarityMetric::Kulczynski => "kulczynski",
            SimilarityMetric::McConnaughey => "mcconnaughey",
            SimilarityMetric::OnBit => "onbit",
            SimilarityMetric::RogotGoldberg => "rogotgoldberg",
            SimilarityMetric::Russel => "russel",
            SimilarityMetric::Sokal => "sokal",
            SimilarityMetric::Tanimoto => "tanimoto",
            SimilarityMetric::Tversky { .. } => "tversky",
        };
        write!(f, "{}", name)
    }
}

/// Scores a pair of descriptors in one argument order.
///
/// Order-sensitive metrics may return different values for `score(a, b)` and
/// `score(b, a)`; the network builder evaluates both orderings and keeps the
/// larger score.
pub trait SimilarityScorer: Send + Sync {
    fn score(&self, a: &Fingerprint, b: &Fingerprint) -> f64;
}

/// The default similarity scorer, dispatching on a configured metric.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityCalculator {
    metric: SimilarityMetric,
}

impl SimilarityCalculator {
    pub fn new(metric: SimilarityMetric) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> SimilarityMetric {
        self.metric
    }
}

impl SimilarityScorer for SimilarityCalculator {
    fn score(&self, a: &Fingerprint, b: &Fingerprint) -> f64 {
        let common = a.common_ones(b) as f64;
        let on_a = a.count_ones() as f64;
        let on_b = b.count_ones() as f64;
        let total = a.num_bits().max(b.num_bits()) as f64;

        match self.metric {
            SimilarityMetric::Asymmetric => asymmetric(common, on_a, on_b),
            SimilarityMetric::BraunBlanquet => braun_blanquet(common, on_a, on_b),
            SimilarityMetric::Cosine => cosine(common, on_a, on_b),
            SimilarityMetric::Dice => dice(common, on_a, on_b),
            SimilarityMetric::Kulczynski => kulczynski(common, on_a, on_b),
            SimilarityMetric::McConnaughey => mcconnaughey(common, on_a, on_b),
            SimilarityMetric::OnBit => tanimoto(common, on_a, on_b),
            SimilarityMetric::RogotGoldberg => rogot_goldberg(common, on_a, on_b, total),
            SimilarityMetric::Russel => russel(common, total),
            SimilarityMetric::Sokal => sokal(common, on_a, on_b),
            SimilarityMetric::Tanimoto => tanimoto(common, on_a, on_b),
            SimilarityMetric::Tversky { alpha, beta } => tversky(common, on_a, on_b, alpha, beta),
        }
    }
}

fn guarded(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

fn tanimoto(c: f64, a: f64, b: f64) -> f64 {
    guarded(c, a + b - c)
}

fn dice(c: f64, a: f64, b: f64) -> f64 {
    guarded(2.0 * c, a + b)
}

fn cosine(c: f64, a: f64, b: f64) -> f64 {
    guarded(c, (a * b).sqrt())
}

fn sokal(c: f64, a: f64, b: f64) -> f64 {
    guarded(c, 2.0 * a + 2.0 * b - 3.0 * c)
}

fn russel(c: f64, n: f64) -> f64 {
    guarded(c, n)
}

fn rogot_goldberg(c: f64, a: f64, b: f64, n: f64) -> f64 {
    guarded(c, a + b) + guarded(n - a - b + c, 2.0 * n - a - b)
}

fn kulczynski(c: f64, a: f64, b: f64) -> f64 {
    guarded(c * (a + b), 2.0 * a * b)
}

fn mcconnaughey(c: f64, a: f64, b: f64) -> f64 {
    guarded(c * (a + b) - a * b, a * b)
}

fn braun_blanquet(c: f64, a: f64, b: f64) -> f64 {
    guarded(c, a.max(b))
}

fn asymmetric(c: f64, a: f64, b: f64) -> f64 {
    guarded(c, a.min(b))
}

fn tversky(c: f64, a: f64, b: f64, alpha: f64, beta: f64) -> f64 {
    guarded(c, alpha * (a - c) + beta * (b - c) + c)
}
