use crate::graph::{Edge, FlowGraph, Node, NodeId};
use crate::schema::{FiscalRecord, FlowGraphConfig};

/// Builds the node and edge sets for one fiscal year of records.
///
/// The construction is a single synchronous pass: leaf nodes in input
/// order, then category nodes in first-seen order, then the hub and the
/// configured overflow nodes. Links are derived from the finished node
/// list so the renaming rule is already applied everywhere.
pub struct GraphBuilder<'a> {
    config: &'a FlowGraphConfig,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(config: &'a FlowGraphConfig) -> Self {
        Self { config }
    }

    /// Maps records into leaf nodes, deduplicates the (possibly renamed)
    /// categories they reference, and appends the structural nodes: one
    /// grouping node per category, the hub, and one overflow node per
    /// bidirectional entry.
    pub fn build_nodes(&self, records: &[FiscalRecord]) -> Vec<Node> {
        let mut nodes =
            Vec::with_capacity(records.len() + self.config.bidirectional.len() + 2);
        let mut categories: Vec<String> = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let category = self.config.rename_category(&record.category);
            if !categories.iter().any(|seen| seen == category) {
                categories.push(category.to_string());
            }
            nodes.push(Node::leaf(
                index,
                &record.name,
                category,
                record.amount,
                record.direction,
            ));
        }

        for category in &categories {
            nodes.push(Node::grouping(category, self.config.classify_label(category)));
        }

        // The hub and overflow labels can collide with an observed category
        // (a record typed with the hub's own name, say); skipping the append
        // in that case preserves id uniqueness.
        if !categories.iter().any(|seen| *seen == self.config.hub_label) {
            nodes.push(Node::grouping(
                &self.config.hub_label,
                self.config.classify_label(&self.config.hub_label),
            ));
        }

        for entry in &self.config.bidirectional {
            if !categories.iter().any(|seen| *seen == entry.overflow_label) {
                nodes.push(Node::grouping(
                    &entry.overflow_label,
                    self.config.classify_label(&entry.overflow_label),
                ));
            }
        }

        nodes
    }

    /// Derives one directed edge per non-hub node.
    ///
    /// Grouping nodes route to or from the hub with weight 0; leaves route
    /// to or from their category with the magnitude of their amount. An
    /// outflow leaf inside a combined bidirectional category is rerouted to
    /// that category's overflow node so it cannot visually cancel against
    /// its inflow siblings.
    pub fn build_links(&self, nodes: &[Node]) -> Vec<Edge> {
        let mut links = Vec::with_capacity(nodes.len());

        for node in nodes {
            match &node.id {
                NodeId::Name(label) if *label == self.config.hub_label => continue,
                NodeId::Name(_) => {
                    let hub = NodeId::name(&self.config.hub_label);
                    let (source, target) = if node.direction.is_outflow() {
                        (hub, node.id.clone())
                    } else {
                        (node.id.clone(), hub)
                    };
                    links.push(Edge {
                        source,
                        target,
                        weight: 0.0,
                    });
                }
                NodeId::Leaf(_) => {
                    let weight = node.size.abs();
                    if node.direction.is_outflow() {
                        let source = match self.config.overflow_for_combined(&node.category) {
                            Some(overflow) => NodeId::name(overflow),
                            None => NodeId::name(&node.category),
                        };
                        links.push(Edge {
                            source,
                            target: node.id.clone(),
                            weight,
                        });
                    } else {
                        links.push(Edge {
                            source: node.id.clone(),
                            target: NodeId::name(&node.category),
                            weight,
                        });
                    }
                }
            }
        }

        links
    }

    /// Pure composition of the node and link builders. The link builder
    /// receives the assembled node list, not a second independent build,
    /// so category renaming is visible to it.
    pub fn assemble(&self, records: &[FiscalRecord]) -> FlowGraph {
        let nodes = self.build_nodes(records);
        let links = self.build_links(&nodes);
        FlowGraph { nodes, links }
    }
}

pub fn assemble(config: &FlowGraphConfig, records: &[FiscalRecord]) -> FlowGraph {
    GraphBuilder::new(config).assemble(records)
}
