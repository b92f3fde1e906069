use crate::core::descriptors::{DescriptorKind, ParseDescriptorKindError};
use crate::core::similarity::{ParseMetricError, SimilarityMetric};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Descriptor(#[from] ParseDescriptorKindError),

    #[error(transparent)]
    Metric(#[from] ParseMetricError),

    #[error("similarity threshold {0} is not a finite number")]
    Threshold(f64),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parameters of one network build: which descriptor to compute, which
/// similarity metric to score with, and the exclusive threshold above which
/// a pair becomes an edge.
///
/// Kind and metric names resolve to closed enums here, at configuration
/// time, so an unsupported name can never surface mid-build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkConfig {
    pub descriptor: DescriptorKind,
    pub metric: SimilarityMetric,
    pub similarity_threshold: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            descriptor: DescriptorKind::Morgan2,
            metric: SimilarityMetric::Tanimoto,
            similarity_threshold: 0.7,
        }
    }
}

/// Raw TOML schema: kind and metric arrive as names, Tversky weights as
/// optional scalars.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NetworkConfigFile {
    descriptor: Option<String>,
    metric: Option<String>,
    similarity_threshold: Option<f64>,
    tversky_alpha: Option<f64>,
    tversky_beta: Option<f64>,
}

impl NetworkConfig {
    pub fn builder() -> NetworkConfigBuilder {
        NetworkConfigBuilder::default()
    }

    /// Loads a configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Parses a configuration from TOML text, validating kind and metric
    /// names eagerly.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: NetworkConfigFile = toml::from_str(text)?;
        let mut builder = NetworkConfigBuilder::default();
        if let Some(name) = file.descriptor {
            builder = builder.descriptor(name.parse()?);
        }
        if let Some(name) = file.metric {
            builder = builder.metric(name.parse()?);
        }
        if let Some(threshold) = file.similarity_threshold {
            builder = builder.similarity_threshold(threshold);
        }
        if let Some(alpha) = file.tversky_alpha {
            builder = builder.tversky_alpha(alpha);
        }
        if let Some(beta) = file.tversky_beta {
            builder = builder.tversky_beta(beta);
        }
        builder.build()
    }
}

/// Builds a [`NetworkConfig`], defaulting to `morgan2` fingerprints scored
/// with `tanimoto` at a threshold of `0.7`.
#[derive(Debug, Default, Clone)]
pub struct NetworkConfigBuilder {
    descriptor: Option<DescriptorKind>,
    metric: Option<SimilarityMetric>,
    similarity_threshold: Option<f64>,
    tversky_alpha: Option<f64>,
    tversky_beta: Option<f64>,
}

impl NetworkConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn descriptor(mut self, kind: DescriptorKind) -> Self {
        self.descriptor = Some(kind);
        self
    }
    pub fn metric(mut self, metric: SimilarityMetric) -> Self {
        self.metric = Some(metric);
        self
    }
    pub fn similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = Some(threshold);
        self
    }
    pub fn tversky_alpha(mut self, alpha: f64) -> Self {
        self.tversky_alpha = Some(alpha);
        self
    }
    pub fn tversky_beta(mut self, beta: f64) -> Self {
        self.tversky_beta = Some(beta);
        self
    }

    pub fn build(self) -> Result<NetworkConfig, ConfigError> {
        let defaults = NetworkConfig::default();
        let threshold = self.similarity_threshold.unwrap_or(defaults.similarity_threshold);
        if !threshold.is_finite() {
            return Err(ConfigError::Threshold(threshold));
        }

        let mut metric = self.metric.unwrap_or(defaults.metric);
        // Tversky weights only apply to the one metric that has them.
        if let SimilarityMetric::Tversky { alpha, beta } = metric {
            metric = SimilarityMetric::Tversky {
                alpha: self.tversky_alpha.unwrap_or(alpha),
                beta: self.tversky_beta.unwrap_or(beta),
            };
        }

        Ok(NetworkConfig {
            descriptor: self.descriptor.unwrap_or(defaults.descriptor),
            metric,
            similarity_threshold: threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_the_package_defaults() {
        let config = NetworkConfig::builder().build().unwrap();
        assert_eq!(config.descriptor, DescriptorKind::Morgan2);
        assert_eq!(config.metric, SimilarityMetric::Tanimoto);
        assert_eq!(config.similarity_threshold, 0.7);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = NetworkConfig::builder()
            .descriptor(DescriptorKind::Maccs)
            .metric(SimilarityMetric::Dice)
            .similarity_threshold(0.4)
            .build()
            .unwrap();
        assert_eq!(config.descriptor, DescriptorKind::Maccs);
        assert_eq!(config.metric, SimilarityMetric::Dice);
        assert_eq!(config.similarity_threshold, 0.4);
    }

    #[test]
    fn non_finite_threshold_is_rejected() {
        let err = NetworkConfig::builder()
            .similarity_threshold(f64::NAN)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Threshold(_)));
    }

    #[test]
    fn tversky_weights_reach_the_metric() {
        let config = NetworkConfig::builder()
            .metric("tversky".parse().unwrap())
            .tversky_alpha(0.3)
            .tversky_beta(0.9)
            .build()
            .unwrap();
        assert_eq!(
            config.metric,
            SimilarityMetric::Tversky {
                alpha: 0.3,
                beta: 0.9
            }
        );
    }

    #[test]
    fn tversky_weights_are_ignored_for_other_metrics() {
        let config = NetworkConfig::builder()
            .metric(SimilarityMetric::Cosine)
            .tversky_alpha(0.3)
            .build()
            .unwrap();
        assert_eq!(config.metric, SimilarityMetric::Cosine);
    }

    #[test]
    fn toml_config_parses() {
        let config = NetworkConfig::from_toml_str(
            r#"
            descriptor = "maccs"
            metric = "tversky"
            similarity_threshold = 0.55
            tversky_alpha = 0.2
            tversky_beta = 0.8
            "#,
        )
        .unwrap();
        assert_eq!(config.descriptor, DescriptorKind::Maccs);
        assert_eq!(
            config.metric,
            SimilarityMetric::Tversky {
                alpha: 0.2,
                beta: 0.8
            }
        );
        assert_eq!(config.similarity_threshold, 0.55);
    }

    #[test]
    fn empty_toml_yields_the_defaults() {
        let config = NetworkConfig::from_toml_str("").unwrap();
        assert_eq!(config, NetworkConfig::default());
    }

    #[test]
    fn unknown_descriptor_name_in_toml_fails_eagerly() {
        let err = NetworkConfig::from_toml_str(r#"descriptor = "morgan9""#).unwrap_err();
        assert!(matches!(err, ConfigError::Descriptor(_)));
    }

    #[test]
    fn unknown_metric_name_in_toml_fails_eagerly() {
        let err = NetworkConfig::from_toml_str(r#"metric = "euclidean""#).unwrap_err();
        assert!(matches!(err, ConfigError::Metric(_)));
    }

    #[test]
    fn unknown_toml_keys_are_rejected() {
        assert!(NetworkConfig::from_toml_str("smiles_column = 3").is_err());
    }
}
