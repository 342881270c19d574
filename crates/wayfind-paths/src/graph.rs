//! A directed weighted graph of named nodes.

use std::collections::HashMap;

use crate::error::GraphError;

/// A directed edge to another node, by insertion index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphLink {
    pub to: usize,
    pub cost: f64,
}

/// A named node and its outgoing edges.
#[derive(Debug, Clone)]
pub struct GraphNode {
    name: String,
    links: Vec<GraphLink>,
}

impl GraphNode {
    /// The node's unique name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Outgoing edges. `GraphLink::to` indexes into
    /// [`WeightedGraph::nodes`].
    #[inline]
    pub fn links(&self) -> &[GraphLink] {
        &self.links
    }
}

/// A graph of named nodes with directed, non-negative weighted edges.
///
/// Nodes are kept both in a name table and in an insertion-ordered list, so
/// a search can enumerate the full node set up front. Edges are directed;
/// declare a symmetric link with two [`set_node_link`](Self::set_node_link)
/// calls. There is no removal operation.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    index: HashMap<String, usize>,
    nodes: Vec<GraphNode>,
    start: Option<usize>,
    end: Option<usize>,
}

impl WeightedGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order.
    #[inline]
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Add a node, returning its index. Re-adding an existing name is a
    /// no-op returning the existing index.
    pub fn add_node(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.nodes.len();
        self.index.insert(name.to_owned(), i);
        self.nodes.push(GraphNode {
            name: name.to_owned(),
            links: Vec::new(),
        });
        i
    }

    /// Add several nodes at once.
    pub fn add_nodes<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) {
        for name in names {
            self.add_node(name);
        }
    }

    /// Declare a directed edge from `start` to `end` with the given cost.
    ///
    /// Both endpoints are created if missing. Re-declaring an existing edge
    /// overwrites its cost. A negative cost fails before any mutation.
    pub fn set_node_link(&mut self, start: &str, end: &str, cost: f64) -> Result<(), GraphError> {
        if cost < 0.0 {
            return Err(GraphError::NegativeCost {
                from: start.to_owned(),
                to: end.to_owned(),
                cost,
            });
        }
        let si = self.add_node(start);
        let ei = self.add_node(end);
        let links = &mut self.nodes[si].links;
        if let Some(link) = links.iter_mut().find(|l| l.to == ei) {
            link.cost = cost;
        } else {
            links.push(GraphLink { to: ei, cost });
        }
        Ok(())
    }

    /// The index of a node by name.
    #[inline]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The node with the given name, if present.
    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        self.index_of(name).map(|i| &self.nodes[i])
    }

    /// Select the search start node. The name must already exist.
    pub fn set_start(&mut self, name: &str) -> Result<(), GraphError> {
        self.start = Some(self.known_index(name)?);
        Ok(())
    }

    /// Select the search end node. The name must already exist.
    pub fn set_end(&mut self, name: &str) -> Result<(), GraphError> {
        self.end = Some(self.known_index(name)?);
        Ok(())
    }

    /// The selected start node's name, if any.
    pub fn start(&self) -> Option<&str> {
        self.start.map(|i| self.nodes[i].name.as_str())
    }

    /// The selected end node's name, if any.
    pub fn end(&self) -> Option<&str> {
        self.end.map(|i| self.nodes[i].name.as_str())
    }

    pub(crate) fn start_index(&self) -> Option<usize> {
        self.start
    }

    pub(crate) fn end_index(&self) -> Option<usize> {
        self.end
    }

    fn known_index(&self, name: &str) -> Result<usize, GraphError> {
        self.index_of(name).ok_or_else(|| GraphError::UnknownNode {
            name: name.to_owned(),
        })
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;

    /// Persisted form: nodes in insertion order, edges by target name.
    #[derive(serde::Serialize, serde::Deserialize)]
    struct WeightedGraphRepr {
        nodes: Vec<String>,
        edges: Vec<(String, String, f64)>,
        start: Option<String>,
        end: Option<String>,
    }

    impl serde::Serialize for WeightedGraph {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let repr = WeightedGraphRepr {
                nodes: self.nodes.iter().map(|n| n.name.clone()).collect(),
                edges: self
                    .nodes
                    .iter()
                    .flat_map(|n| {
                        n.links.iter().map(|l| {
                            (n.name.clone(), self.nodes[l.to].name.clone(), l.cost)
                        })
                    })
                    .collect(),
                start: self.start().map(str::to_owned),
                end: self.end().map(str::to_owned),
            };
            repr.serialize(serializer)
        }
    }

    impl<'de> serde::Deserialize<'de> for WeightedGraph {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            use serde::de::Error;

            let repr = WeightedGraphRepr::deserialize(deserializer)?;
            let mut graph = WeightedGraph::new();
            graph.add_nodes(repr.nodes.iter().map(String::as_str));
            for (from, to, cost) in &repr.edges {
                graph
                    .set_node_link(from, to, *cost)
                    .map_err(D::Error::custom)?;
            }
            if let Some(name) = &repr.start {
                graph.set_start(name).map_err(D::Error::custom)?;
            }
            if let Some(name) = &repr.end {
                graph.set_end(name).map_err(D::Error::custom)?;
            }
            Ok(graph)
        }
    }
}
