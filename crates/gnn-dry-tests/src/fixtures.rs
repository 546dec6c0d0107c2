// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Schema and subgraph builders.

use gnn_record::{Feature, FeatureKind};
use gnn_schema::{Edge, FeatureSpec, GraphSchema, Node, Subgraph};

/// Empty feature list for [`SubgraphBuilder::node`] and [`SubgraphBuilder::edge`].
pub const NO_FEATURES: [(&str, Feature); 0] = [];

/// Builder for [`GraphSchema`].
///
/// # Example
///
/// ```
/// use gnn_dry_tests::SchemaBuilder;
/// use gnn_record::FeatureKind;
///
/// let schema = SchemaBuilder::new()
///     .node_feature("paper", "year", Some(FeatureKind::Int64))
///     .edge_set("cites", "paper", "paper")
///     .build();
/// assert!(schema.node_set("paper").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    schema: GraphSchema,
}

impl SchemaBuilder {
    /// Start from an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a context feature.
    pub fn context_feature(mut self, name: &str, dtype: Option<FeatureKind>) -> Self {
        self.schema
            .context
            .features
            .insert(name.to_owned(), spec(dtype));
        self
    }

    /// Declare a node set with no features.
    pub fn node_set(mut self, set: &str) -> Self {
        self.schema.node_sets.entry(set.to_owned()).or_default();
        self
    }

    /// Declare a node feature (creating the set if needed).
    pub fn node_feature(mut self, set: &str, name: &str, dtype: Option<FeatureKind>) -> Self {
        self.schema
            .node_sets
            .entry(set.to_owned())
            .or_default()
            .features
            .insert(name.to_owned(), spec(dtype));
        self
    }

    /// Declare an edge set between two node sets.
    pub fn edge_set(mut self, set: &str, source: &str, target: &str) -> Self {
        let entry = self.schema.edge_sets.entry(set.to_owned()).or_default();
        entry.source = Some(source.to_owned());
        entry.target = Some(target.to_owned());
        self
    }

    /// Declare an edge feature (creating the set if needed, without endpoints).
    pub fn edge_feature(mut self, set: &str, name: &str, dtype: Option<FeatureKind>) -> Self {
        self.schema
            .edge_sets
            .entry(set.to_owned())
            .or_default()
            .features
            .insert(name.to_owned(), spec(dtype));
        self
    }

    /// Finish.
    pub fn build(self) -> GraphSchema {
        self.schema
    }
}

fn spec(dtype: Option<FeatureKind>) -> FeatureSpec {
    FeatureSpec {
        dtype,
        description: None,
    }
}

/// Builder for [`Subgraph`], adding nodes and edges by string identity.
#[derive(Debug, Clone, Default)]
pub struct SubgraphBuilder {
    subgraph: Subgraph,
}

impl SubgraphBuilder {
    /// Start an empty subgraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sample id.
    pub fn sample_id(mut self, id: &str) -> Self {
        self.subgraph.sample_id = Some(id.to_owned());
        self
    }

    /// Set the seed node identity.
    pub fn seed(mut self, id: &str) -> Self {
        self.subgraph.seed_node_id = Some(id.as_bytes().to_vec());
        self
    }

    /// Attach a context feature.
    pub fn context(mut self, name: &str, value: Feature) -> Self {
        self.subgraph.features.insert(name.to_owned(), value);
        self
    }

    /// Append a node with the given features.
    pub fn node<I>(mut self, id: &str, set: &str, features: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Feature)>,
    {
        let mut node = Node::new(id.as_bytes(), set);
        for (name, value) in features {
            node = node.with_feature(name, value);
        }
        self.subgraph.nodes.push(node);
        self
    }

    /// Append an outgoing edge to the node `from` (which must already exist).
    ///
    /// Edges for an unknown `from` are ignored; dangling *targets* are kept so
    /// tests can exercise rejection.
    pub fn edge<I>(mut self, from: &str, to: &str, set: &str, features: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Feature)>,
    {
        let mut edge = Edge::new(to.as_bytes(), set);
        for (name, value) in features {
            edge = edge.with_feature(name, value);
        }
        if let Some(node) = self
            .subgraph
            .nodes
            .iter_mut()
            .rev()
            .find(|n| n.id == from.as_bytes())
        {
            node.outgoing_edges.push(edge);
        }
        self
    }

    /// Finish.
    pub fn build(self) -> Subgraph {
        self.subgraph
    }
}

/// Schema with node set `paper` (int64 `year`) and featureless edge set `cites`.
pub fn citation_schema() -> GraphSchema {
    SchemaBuilder::new()
        .node_feature("paper", "year", Some(FeatureKind::Int64))
        .edge_set("cites", "paper", "paper")
        .build()
}

/// Two papers `A` (2001) and `B` (2020) with a single citation `A -> B`.
pub fn citation_subgraph() -> Subgraph {
    SubgraphBuilder::new()
        .sample_id("citation")
        .seed("A")
        .node("A", "paper", [("year", Feature::ints([2001]))])
        .node("B", "paper", [("year", Feature::ints([2020]))])
        .edge("A", "B", "cites", NO_FEATURES)
        .build()
}
