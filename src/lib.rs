//! # Financial Flow Graph
//!
//! A library for converting a flat list of categorized financial records
//! (revenues and expenses for one fiscal year) into a directed flow graph
//! for a Sankey-style layout engine.
//!
//! ## Core Concepts
//!
//! - **Leaf node**: one node per input record, sequential integer ids
//! - **Category node**: one grouping node per distinct category label
//! - **Hub node**: the single central node every category routes through
//! - **Overflow category**: a sign-flipped counterpart node that absorbs
//!   expense-like members of a nominally-revenue category, so they cannot
//!   visually cancel against their siblings
//! - **Flow direction**: revenues flow leaf → category → hub; expenses
//!   flow hub → category → leaf
//!
//! Layout, color and SVG composition belong to the external renderer; this
//! crate hands it only node ids, sizes and weighted directed edges.
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_flow_graph::*;
//!
//! let config = FlowGraphConfig {
//!     hub_label: "JMU".to_string(),
//!     expense_keyword: "Expense".to_string(),
//!     bidirectional: vec![BidirectionalCategory {
//!         base_label: "Nonoperating revenues".to_string(),
//!         combined_label: "Nonoperating revenues (expenses)".to_string(),
//!         overflow_label: "Nonoperating expenses (revenues)".to_string(),
//!     }],
//! };
//!
//! let document = ingestion::load_document("data/jmu.json")?;
//! let records = ingestion::extract_records(&document, "jmu-revenues", "2023", &config)?;
//! let graph = build_flow_graph(&config, &records)?;
//! println!("{}", graph.to_json()?);
//! ```

pub mod builder;
pub mod error;
pub mod graph;
pub mod ingestion;
pub mod schema;
pub mod verify;

pub use builder::{assemble, GraphBuilder};
pub use error::{FlowGraphError, Result};
pub use graph::{Edge, FlowGraph, Node, NodeId};
pub use ingestion::*;
pub use schema::*;
pub use verify::{verify_graph, GraphVerifier, VerificationResult};

use log::{debug, info};

pub struct FlowGraphProcessor;

impl FlowGraphProcessor {
    pub fn process(config: &FlowGraphConfig, records: &[FiscalRecord]) -> Result<FlowGraph> {
        validate_config_integrity(config)?;

        info!(
            "Building flow graph for hub '{}' from {} records",
            config.hub_label,
            records.len()
        );
        debug!(
            "Configuration declares {} bidirectional category entries, expense keyword '{}'",
            config.bidirectional.len(),
            config.expense_keyword
        );

        let graph = assemble(config, records);

        debug!(
            "Assembled {} nodes and {} links",
            graph.nodes.len(),
            graph.links.len()
        );

        Ok(graph)
    }

    pub fn process_with_verification(
        config: &FlowGraphConfig,
        records: &[FiscalRecord],
        tolerance: f64,
    ) -> Result<FlowGraph> {
        let graph = Self::process(config, records)?;

        let verification = GraphVerifier::new(config).verify(&graph, tolerance)?;
        for warning in verification.warnings {
            debug!("Verification warning: {}", warning);
        }

        Ok(graph)
    }
}

pub fn build_flow_graph(config: &FlowGraphConfig, records: &[FiscalRecord]) -> Result<FlowGraph> {
    FlowGraphProcessor::process(config, records)
}

pub fn build_with_verification(
    config: &FlowGraphConfig,
    records: &[FiscalRecord],
    tolerance: f64,
) -> Result<FlowGraph> {
    FlowGraphProcessor::process_with_verification(config, records, tolerance)
}

fn validate_config_integrity(config: &FlowGraphConfig) -> Result<()> {
    if config.hub_label.is_empty() {
        return Err(FlowGraphError::InvalidConfig(
            "hub_label must not be empty".to_string(),
        ));
    }

    if config.expense_keyword.is_empty() {
        return Err(FlowGraphError::InvalidConfig(
            "expense_keyword must not be empty".to_string(),
        ));
    }

    let mut seen_labels: Vec<&str> = Vec::new();
    for (idx, entry) in config.bidirectional.iter().enumerate() {
        let labels = [
            entry.base_label.as_str(),
            entry.combined_label.as_str(),
            entry.overflow_label.as_str(),
        ];

        for label in labels {
            if label.is_empty() {
                return Err(FlowGraphError::InvalidConfig(format!(
                    "Bidirectional entry #{} has an empty label",
                    idx
                )));
            }
            if label == config.hub_label {
                return Err(FlowGraphError::InvalidConfig(format!(
                    "Bidirectional entry #{} label '{}' collides with the hub label",
                    idx, label
                )));
            }
            if seen_labels.contains(&label) {
                return Err(FlowGraphError::InvalidConfig(format!(
                    "Bidirectional entry #{} label '{}' is declared more than once",
                    idx, label
                )));
            }
            seen_labels.push(label);
        }

        if entry.combined_label == entry.overflow_label {
            return Err(FlowGraphError::InvalidConfig(format!(
                "Bidirectional entry #{} combined and overflow labels must differ",
                idx
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jmu_config() -> FlowGraphConfig {
        FlowGraphConfig {
            hub_label: "JMU".to_string(),
            expense_keyword: "Expense".to_string(),
            bidirectional: vec![BidirectionalCategory {
                base_label: "Nonoperating revenues".to_string(),
                combined_label: "Nonoperating revenues (expenses)".to_string(),
                overflow_label: "Nonoperating expenses (revenues)".to_string(),
            }],
        }
    }

    #[test]
    fn test_end_to_end_processing() {
        let config = jmu_config();
        let records = vec![
            FiscalRecord::resolve("Tuition and fees", "Operating revenues", 250.0, "Expense"),
            FiscalRecord::resolve("Instruction Expenses", "Operating expenses", 180.0, "Expense"),
            FiscalRecord::resolve("Interest on debt", "Nonoperating revenues", -12.5, "Expense"),
        ];

        let graph = build_with_verification(&config, &records, 0.01).unwrap();

        assert_eq!(graph.nodes.len(), 3 + 3 + 1 + 1);
        assert_eq!(graph.links.len(), graph.nodes.len() - 1);
    }

    #[test]
    fn test_determinism() {
        let config = jmu_config();
        let records = vec![
            FiscalRecord::resolve("Tuition and fees", "Operating revenues", 250.0, "Expense"),
            FiscalRecord::resolve("Interest on debt", "Nonoperating revenues", -12.5, "Expense"),
        ];

        let first = build_flow_graph(&config, &records).unwrap();
        let second = build_flow_graph(&config, &records).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_hub_label_rejected() {
        let mut config = jmu_config();
        config.hub_label = String::new();

        let result = build_flow_graph(&config, &[]);
        assert!(matches!(result, Err(FlowGraphError::InvalidConfig(_))));
    }

    #[test]
    fn test_hub_collision_rejected() {
        let mut config = jmu_config();
        config.bidirectional[0].combined_label = "JMU".to_string();

        let result = build_flow_graph(&config, &[]);
        assert!(matches!(result, Err(FlowGraphError::InvalidConfig(_))));
    }

    #[test]
    fn test_duplicate_bidirectional_labels_rejected() {
        let mut config = jmu_config();
        config.bidirectional.push(config.bidirectional[0].clone());

        let result = build_flow_graph(&config, &[]);
        assert!(matches!(result, Err(FlowGraphError::InvalidConfig(_))));
    }

    #[test]
    fn test_empty_input_produces_structural_nodes_only() {
        let config = jmu_config();
        let graph = build_flow_graph(&config, &[]).unwrap();

        // Hub plus the overflow node; the overflow's routing edge is the
        // only link.
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.links.len(), 1);
        assert_eq!(
            graph.links[0].source,
            NodeId::name("JMU")
        );
    }
}
