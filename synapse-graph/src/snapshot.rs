//! In-memory petgraph view of the concept graph.

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};

use synapse_core::errors::SynapseResult;
use synapse_core::models::{normalize_concept, ConceptLink};

use crate::NeighborSource;

/// Undirected concept graph with a name index. Edge weights are strengths.
#[derive(Debug, Default, Clone)]
pub struct ConceptGraph {
    pub graph: UnGraph<String, f64>,
    index: HashMap<String, NodeIndex>,
}

impl ConceptGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(nodes: Vec<String>, links: &[ConceptLink]) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.ensure_node(&node);
        }
        for link in links {
            graph.set_link(&link.concept_a, &link.concept_b, link.strength);
        }
        graph
    }

    pub fn ensure_node(&mut self, name: &str) -> NodeIndex {
        let name = normalize_concept(name);
        if let Some(idx) = self.index.get(&name) {
            return *idx;
        }
        let idx = self.graph.add_node(name.clone());
        self.index.insert(name, idx);
        idx
    }

    /// Insert or overwrite the edge between `a` and `b`. Self pairs are ignored.
    pub fn set_link(&mut self, a: &str, b: &str, strength: f64) {
        let a = self.ensure_node(a);
        let b = self.ensure_node(b);
        if a == b {
            return;
        }
        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph[edge] = strength,
            None => {
                self.graph.add_edge(a, b, strength);
            }
        }
    }

    pub fn get_node(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(&normalize_concept(name)).copied()
    }

    pub fn strength(&self, a: &str, b: &str) -> Option<f64> {
        let edge = self.graph.find_edge(self.get_node(a)?, self.get_node(b)?)?;
        self.graph.edge_weight(edge).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl NeighborSource for ConceptGraph {
    fn neighbors(&self, concept: &str, min_strength: f64) -> SynapseResult<Vec<(String, f64)>> {
        let Some(idx) = self.get_node(concept) else {
            return Ok(Vec::new());
        };
        let mut out: Vec<(String, f64)> = self
            .graph
            .neighbors(idx)
            .filter_map(|other| {
                let edge = self.graph.find_edge(idx, other)?;
                let strength = *self.graph.edge_weight(edge)?;
                (strength >= min_strength).then(|| (self.graph[other].clone(), strength))
            })
            .collect();
        out.sort_by(|x, y| y.1.total_cmp(&x.1).then_with(|| x.0.cmp(&y.0)));
        out.dedup_by(|x, y| x.0 == y.0);
        Ok(out)
    }

    fn children_of(&self, prefix: &str) -> SynapseResult<Vec<String>> {
        let prefix = format!("{}.", normalize_concept(prefix));
        let mut children: Vec<String> = self
            .index
            .keys()
            .filter(|name| name.starts_with(&prefix))
            .cloned()
            .collect();
        children.sort();
        Ok(children)
    }
}
