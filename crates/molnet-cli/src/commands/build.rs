use crate::cli::BuildArgs;
use crate::error::{CliError, Result};
use crate::progress::CliProgressHandler;
use molnet::engine::builder::NetworkBuilder;
use molnet::engine::config::{ConfigError, NetworkConfig, NetworkConfigBuilder};
use molnet::engine::progress::ProgressReporter;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct MoleculeRecord {
    smiles: String,
    label: String,
}

pub fn run(args: BuildArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    info!(
        descriptor = %config.descriptor,
        metric = %config.metric,
        threshold = config.similarity_threshold,
        "Resolved build configuration."
    );

    info!("Reading molecules from {:?}", &args.input);
    let (smiles, labels) = read_molecules(&args.input)?;
    if smiles.is_empty() {
        return Err(CliError::Argument(format!(
            "input file '{}' contains no molecule records",
            args.input.display()
        )));
    }
    println!("Building network over {} molecules...", smiles.len());

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.callback());

    let builder = NetworkBuilder::from_config(&config);
    let network = builder.build_with_progress(&smiles, &labels, &reporter)?;

    network.save_to_path(&args.output)?;
    println!(
        "Wrote network with {} nodes and {} edges to {}",
        network.node_count(),
        network.edge_count(),
        args.output.display()
    );
    Ok(())
}

/// Merges the optional config file with CLI overrides; flags win.
fn resolve_config(args: &BuildArgs) -> Result<NetworkConfig> {
    let base = match &args.config {
        Some(path) => {
            debug!("Loading configuration from {:?}", path);
            NetworkConfig::load(path)?
        }
        None => NetworkConfig::default(),
    };

    let mut builder = NetworkConfigBuilder::new()
        .descriptor(base.descriptor)
        .metric(base.metric)
        .similarity_threshold(base.similarity_threshold);

    if let Some(name) = &args.descriptor {
        builder = builder.descriptor(name.parse().map_err(ConfigError::from)?);
    }
    if let Some(name) = &args.metric {
        builder = builder.metric(name.parse().map_err(ConfigError::from)?);
    }
    if let Some(threshold) = args.threshold {
        builder = builder.similarity_threshold(threshold);
    }
    if let Some(alpha) = args.tversky_alpha {
        builder = builder.tversky_alpha(alpha);
    }
    if let Some(beta) = args.tversky_beta {
        builder = builder.tversky_beta(beta);
    }
    Ok(builder.build()?)
}

fn read_molecules(path: &Path) -> Result<(Vec<String>, Vec<String>)> {
    let mut reader = csv::Reader::from_path(path).map_err(|source| CliError::InputParsing {
        path: path.to_path_buf(),
        source,
    })?;

    let mut smiles = Vec::new();
    let mut labels = Vec::new();
    for record in reader.deserialize() {
        let record: MoleculeRecord = record.map_err(|source| CliError::InputParsing {
            path: path.to_path_buf(),
            source,
        })?;
        smiles.push(record.smiles);
        labels.push(record.label);
    }
    debug!(molecules = smiles.len(), "Input file parsed.");
    Ok((smiles, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str, suffix: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn base_args(input: &Path) -> BuildArgs {
        BuildArgs {
            input: input.to_path_buf(),
            output: std::path::PathBuf::from("out.mnet"),
            config: None,
            descriptor: None,
            metric: None,
            threshold: None,
            tversky_alpha: None,
            tversky_beta: None,
        }
    }

    #[test]
    fn csv_records_split_into_parallel_vectors() {
        let file = write_temp("smiles,label\nCCO,alcohol\nCCN,amine\n", ".csv");
        let (smiles, labels) = read_molecules(file.path()).unwrap();
        assert_eq!(smiles, vec!["CCO", "CCN"]);
        assert_eq!(labels, vec!["alcohol", "amine"]);
    }

    #[test]
    fn missing_label_column_is_a_parse_error() {
        let file = write_temp("smiles\nCCO\n", ".csv");
        assert!(matches!(
            read_molecules(file.path()),
            Err(CliError::InputParsing { .. })
        ));
    }

    #[test]
    fn cli_flags_override_the_config_file() {
        let config = write_temp("similarity_threshold = 0.9\nmetric = \"dice\"\n", ".toml");
        let input = write_temp("smiles,label\nCCO,a\n", ".csv");
        let mut args = base_args(input.path());
        args.config = Some(config.path().to_path_buf());
        args.threshold = Some(0.2);

        let resolved = resolve_config(&args).unwrap();
        assert_eq!(resolved.similarity_threshold, 0.2);
        assert_eq!(resolved.metric.to_string(), "dice");
    }

    #[test]
    fn unknown_metric_flag_is_rejected() {
        let input = write_temp("smiles,label\nCCO,a\n", ".csv");
        let mut args = base_args(input.path());
        args.metric = Some("euclidean".to_string());
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn build_command_writes_a_loadable_network() {
        let input = write_temp("smiles,label\nCCO,a\nCCO,a\nc1ccccc1,b\n", ".csv");
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("net.mnet");
        let mut args = base_args(input.path());
        args.output = output.clone();
        args.threshold = Some(0.99);

        run(args).unwrap();

        let network = molnet::core::graph::MolecularNetwork::load_from_path(&output).unwrap();
        assert_eq!(network.node_count(), 3);
        assert!(network.has_edge(0, 1));
    }
}
