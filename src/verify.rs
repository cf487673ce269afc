use crate::error::{FlowGraphError, Result};
use crate::graph::{Edge, FlowGraph, NodeId};
use crate::schema::FlowGraphConfig;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct VerificationResult {
    pub warnings: Vec<String>,
}

/// Post-construction audit of an assembled graph: the same properties the
/// renderer would reject on, checked before the hand-off.
pub struct GraphVerifier<'a> {
    config: &'a FlowGraphConfig,
}

impl<'a> GraphVerifier<'a> {
    pub fn new(config: &'a FlowGraphConfig) -> Self {
        Self { config }
    }

    pub fn verify(&self, graph: &FlowGraph, tolerance: f64) -> Result<VerificationResult> {
        let mut warnings = Vec::new();

        let mut declared: HashSet<&NodeId> = HashSet::new();
        for node in &graph.nodes {
            if !declared.insert(&node.id) {
                return Err(FlowGraphError::DuplicateNodeId(node.id.to_string()));
            }
            if !node.size.is_finite() {
                warnings.push(format!(
                    "Node {} has a non-finite size; upstream data is malformed",
                    node.id
                ));
            }
        }

        for link in &graph.links {
            for endpoint in [&link.source, &link.target] {
                if !declared.contains(endpoint) {
                    return Err(FlowGraphError::DanglingEdge {
                        edge: describe_edge(link),
                        endpoint: endpoint.to_string(),
                    });
                }
            }

            if link.weight < 0.0 {
                return Err(FlowGraphError::NegativeWeight {
                    edge: describe_edge(link),
                    weight: link.weight,
                });
            }

            let leaf_edge = link.source.is_leaf() || link.target.is_leaf();
            if leaf_edge && link.weight == 0.0 {
                warnings.push(format!(
                    "Leaf edge {} has zero weight; the record amount may be missing",
                    describe_edge(link)
                ));
            }
        }

        self.check_hub_conservation(graph, tolerance)?;

        Ok(VerificationResult { warnings })
    }

    fn check_hub_conservation(&self, graph: &FlowGraph, tolerance: f64) -> Result<()> {
        let hub = NodeId::name(&self.config.hub_label);

        let inflow: f64 = graph
            .links
            .iter()
            .filter(|link| link.target == hub)
            .map(|link| link.weight)
            .sum();
        let outflow: f64 = graph
            .links
            .iter()
            .filter(|link| link.source == hub)
            .map(|link| link.weight)
            .sum();

        if (inflow - outflow).abs() > tolerance {
            return Err(FlowGraphError::HubImbalance { inflow, outflow });
        }

        Ok(())
    }
}

fn describe_edge(edge: &Edge) -> String {
    format!("{} -> {}", edge.source, edge.target)
}

pub fn verify_graph(
    config: &FlowGraphConfig,
    graph: &FlowGraph,
    tolerance: f64,
) -> Result<VerificationResult> {
    let verifier = GraphVerifier::new(config);
    verifier.verify(graph, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Node;
    use crate::schema::FlowDirection;

    fn config() -> FlowGraphConfig {
        FlowGraphConfig::new("JMU")
    }

    fn valid_graph() -> FlowGraph {
        FlowGraph {
            nodes: vec![
                Node::leaf(0, "Tuition", "Revenue", 100.0, FlowDirection::Inflow),
                Node::grouping("Revenue", FlowDirection::Inflow),
                Node::grouping("JMU", FlowDirection::Inflow),
            ],
            links: vec![
                Edge {
                    source: NodeId::Leaf(0),
                    target: NodeId::name("Revenue"),
                    weight: 100.0,
                },
                Edge {
                    source: NodeId::name("Revenue"),
                    target: NodeId::name("JMU"),
                    weight: 0.0,
                },
            ],
        }
    }

    #[test]
    fn test_valid_graph_passes() {
        let result = verify_graph(&config(), &valid_graph(), 0.01).unwrap();
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_duplicate_node_id() {
        let mut graph = valid_graph();
        graph
            .nodes
            .push(Node::grouping("Revenue", FlowDirection::Inflow));

        let result = verify_graph(&config(), &graph, 0.01);
        assert!(matches!(result, Err(FlowGraphError::DuplicateNodeId(_))));
    }

    #[test]
    fn test_dangling_edge() {
        let mut graph = valid_graph();
        graph.links.push(Edge {
            source: NodeId::name("Phantom"),
            target: NodeId::name("JMU"),
            weight: 0.0,
        });

        let result = verify_graph(&config(), &graph, 0.01);
        match result {
            Err(FlowGraphError::DanglingEdge { endpoint, .. }) => {
                assert_eq!(endpoint, "Phantom");
            }
            other => panic!("Expected DanglingEdge, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_weight() {
        let mut graph = valid_graph();
        graph.links[0].weight = -100.0;

        let result = verify_graph(&config(), &graph, 0.01);
        assert!(matches!(result, Err(FlowGraphError::NegativeWeight { .. })));
    }

    #[test]
    fn test_hub_imbalance() {
        let mut graph = valid_graph();
        // A stray weighted edge out of the hub with no matching inflow.
        graph.links.push(Edge {
            source: NodeId::name("JMU"),
            target: NodeId::name("Revenue"),
            weight: 40.0,
        });

        let result = verify_graph(&config(), &graph, 0.01);
        match result {
            Err(FlowGraphError::HubImbalance { inflow, outflow }) => {
                assert_eq!(inflow, 0.0);
                assert_eq!(outflow, 40.0);
            }
            other => panic!("Expected HubImbalance, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_weight_leaf_edge_warns() {
        let mut graph = valid_graph();
        graph.links[0].weight = 0.0;

        let result = verify_graph(&config(), &graph, 0.01).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("zero weight"));
    }

    #[test]
    fn test_non_finite_size_warns() {
        let mut graph = valid_graph();
        graph.nodes[0].size = f64::NAN;

        let result = verify_graph(&config(), &graph, 0.01).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|warning| warning.contains("non-finite")));
    }
}
