use crate::cli::InfoArgs;
use crate::error::Result;
use molnet::core::graph::MolecularNetwork;
use std::collections::BTreeMap;
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    info!("Loading network from {:?}", &args.input);
    let network = MolecularNetwork::load_from_path(&args.input)?;

    println!("Network: {}", args.input.display());
    println!("  Nodes: {}", network.node_count());
    println!("  Edges: {}", network.edge_count());

    let histogram = label_histogram(&network);
    if !histogram.is_empty() {
        println!("  Classes:");
        for (label, count) in &histogram {
            println!("    {label}: {count}");
        }
    }
    Ok(())
}

fn label_histogram(network: &MolecularNetwork) -> BTreeMap<String, usize> {
    let mut histogram = BTreeMap::new();
    for node in network.nodes() {
        *histogram.entry(node.categorical_label.clone()).or_insert(0) += 1;
    }
    histogram
}

#[cfg(test)]
mod tests {
    use super::*;
    use molnet::core::graph::MoleculeNode;

    #[test]
    fn histogram_counts_labels_in_sorted_order() {
        let mut network = MolecularNetwork::new();
        for label in ["b", "a", "b", "b"] {
            network.add_node(MoleculeNode {
                smiles: "CCO".to_string(),
                categorical_label: label.to_string(),
            });
        }
        let histogram = label_histogram(&network);
        let entries: Vec<_> = histogram.into_iter().collect();
        assert_eq!(
            entries,
            vec![("a".to_string(), 1), ("b".to_string(), 3)]
        );
    }

    #[test]
    fn info_reports_a_saved_network() {
        let mut network = MolecularNetwork::new();
        network.add_node(MoleculeNode {
            smiles: "CCO".to_string(),
            categorical_label: "a".to_string(),
        });
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.mnet");
        network.save_to_path(&path).unwrap();

        run(InfoArgs { input: path }).unwrap();
    }
}
