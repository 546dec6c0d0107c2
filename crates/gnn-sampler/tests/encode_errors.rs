// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Rejection paths: every one aborts the whole encode.

use gnn_dry_tests::{
    citation_schema, citation_subgraph, SchemaBuilder, SubgraphBuilder, NO_FEATURES,
};
use gnn_record::{Feature, FeatureKind};
use gnn_sampler::{
    encode_subgraph_to_record, EdgeEnd, EncodeError, EncoderConfig, FieldNames, SetKind,
    SubgraphEncoder,
};
use gnn_schema::{Edge, Node, SchemaError, Subgraph};

#[test]
fn dangling_edge_is_rejected_not_dropped() {
    let subgraph = SubgraphBuilder::new()
        .sample_id("s-dangling")
        .node("A", "paper", [("year", Feature::ints([2001]))])
        .edge("A", "ghost", "cites", NO_FEATURES)
        .build();
    let err = encode_subgraph_to_record(&citation_schema(), &subgraph).unwrap_err();
    match &err {
        EncodeError::DanglingEdge {
            sample,
            edge_set,
            from_node,
            neighbor,
        } => {
            assert_eq!(sample, "s-dangling");
            assert_eq!(edge_set, "cites");
            assert_eq!(from_node, "'A'");
            assert_eq!(neighbor, "'ghost'");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("'ghost'"));
}

#[test]
fn binary_identities_render_as_hex() {
    let subgraph = Subgraph {
        nodes: vec![Node::new(vec![0x00, 0x01], "paper")
            .with_feature("year", Feature::ints([1]))
            .with_edge(Edge::new(vec![0xff], "cites"))],
        ..Subgraph::default()
    };
    let err = encode_subgraph_to_record(&citation_schema(), &subgraph).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::DanglingEdge { ref from_node, ref neighbor, .. }
            if from_node == "0x0001" && neighbor == "0xff"
    ));
}

#[test]
fn missing_node_feature_is_rejected() {
    let subgraph = SubgraphBuilder::new()
        .node("A", "paper", [("year", Feature::ints([2001]))])
        .node("B", "paper", NO_FEATURES)
        .build();
    let err = encode_subgraph_to_record(&citation_schema(), &subgraph).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::MissingFeature { kind: SetKind::Node, ref set, ref feature, ref entity, .. }
            if set == "paper" && feature == "year" && entity == "node 'B'"
    ));
}

#[test]
fn missing_edge_feature_is_rejected() {
    let schema = SchemaBuilder::new()
        .node_set("paper")
        .edge_set("cites", "paper", "paper")
        .edge_feature("cites", "weight", Some(FeatureKind::Float))
        .build();
    let subgraph = SubgraphBuilder::new()
        .node("A", "paper", NO_FEATURES)
        .node("B", "paper", NO_FEATURES)
        .edge("A", "B", "cites", [("weight", Feature::floats([0.5]))])
        .edge("B", "A", "cites", NO_FEATURES)
        .build();
    let err = encode_subgraph_to_record(&schema, &subgraph).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::MissingFeature { kind: SetKind::Edge, ref entity, .. }
            if entity == "edge 'B' -> 'A'"
    ));
}

#[test]
fn ragged_values_fail_the_cardinality_check() {
    let subgraph = SubgraphBuilder::new()
        .node("A", "paper", [("year", Feature::ints([2001, 2002]))])
        .node("B", "paper", [("year", Feature::ints([2020]))])
        .build();
    let err = encode_subgraph_to_record(&citation_schema(), &subgraph).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::FeatureCardinality { ref field, length: 3, count: 2, .. }
            if field == "nodes/paper.year"
    ));
    assert!(err.to_string().contains("invalid number (3)"));
}

#[test]
fn kind_mismatch_against_declared_dtype() {
    let subgraph = SubgraphBuilder::new()
        .node("A", "paper", [("year", Feature::floats([2001.0]))])
        .build();
    let err = encode_subgraph_to_record(&citation_schema(), &subgraph).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::FeatureKindMismatch {
            expected: FeatureKind::Int64,
            found: FeatureKind::Float,
            ..
        }
    ));
}

#[test]
fn kind_mismatch_between_entities_of_an_untyped_feature() {
    let schema = SchemaBuilder::new().node_feature("paper", "code", None).build();
    let subgraph = SubgraphBuilder::new()
        .node("A", "paper", [("code", Feature::ints([1]))])
        .node("B", "paper", [("code", Feature::bytes([b"x".to_vec()]))])
        .build();
    let err = encode_subgraph_to_record(&schema, &subgraph).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::FeatureKindMismatch { ref field, .. } if field == "nodes/paper.code"
    ));
}

#[test]
fn undeclared_node_set_is_rejected() {
    let subgraph = SubgraphBuilder::new().node("V", "venue", NO_FEATURES).build();
    let err = encode_subgraph_to_record(&citation_schema(), &subgraph).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::UnknownNodeSet { ref node_set, .. } if node_set == "venue"
    ));
}

#[test]
fn undeclared_edge_set_is_rejected() {
    let subgraph = SubgraphBuilder::new()
        .node("A", "paper", [("year", Feature::ints([1]))])
        .edge("A", "A", "mentions", NO_FEATURES)
        .build();
    let err = encode_subgraph_to_record(&citation_schema(), &subgraph).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::UnknownEdgeSet { ref edge_set, .. } if edge_set == "mentions"
    ));
}

#[test]
fn duplicate_identity_is_rejected_by_default() {
    let subgraph = SubgraphBuilder::new()
        .node("A", "paper", [("year", Feature::ints([1]))])
        .node("A", "paper", [("year", Feature::ints([2]))])
        .build();
    let err = encode_subgraph_to_record(&citation_schema(), &subgraph).unwrap_err();
    assert!(matches!(err, EncodeError::DuplicateNodeId { ref node, .. } if node == "'A'"));
    assert!(err
        .to_string()
        .ends_with("duplicate node identity 'A' repeated within node set 'paper'"));
}

#[test]
fn edge_against_declared_direction_is_rejected() {
    let schema = SchemaBuilder::new()
        .node_set("paper")
        .node_set("author")
        .edge_set("writes", "author", "paper")
        .build();
    let subgraph = SubgraphBuilder::new()
        .node("p", "paper", NO_FEATURES)
        .node("a", "author", NO_FEATURES)
        .edge("p", "a", "writes", NO_FEATURES)
        .build();
    let err = encode_subgraph_to_record(&schema, &subgraph).unwrap_err();
    match &err {
        EncodeError::EdgeEndpointMismatch {
            edge_set,
            end,
            expected,
            found,
            ..
        } => {
            assert_eq!(edge_set, "writes");
            assert_eq!(*end, EdgeEnd::Source);
            assert_eq!(expected, "author");
            assert_eq!(found, "paper");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn edge_to_wrong_target_set_is_rejected() {
    let schema = SchemaBuilder::new()
        .node_set("paper")
        .node_set("author")
        .edge_set("cites", "paper", "paper")
        .build();
    let subgraph = SubgraphBuilder::new()
        .node("p", "paper", NO_FEATURES)
        .node("a", "author", NO_FEATURES)
        .edge("p", "a", "cites", NO_FEATURES)
        .build();
    let err = encode_subgraph_to_record(&schema, &subgraph).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::EdgeEndpointMismatch { end: EdgeEnd::Target, ref found, .. } if found == "author"
    ));
}

#[test]
fn shared_structural_suffixes_are_rejected() {
    let encoder = SubgraphEncoder::new(EncoderConfig {
        field_names: FieldNames {
            size: "#idx".into(),
            source: "#idx".into(),
            target: "#idx".into(),
        },
        ..EncoderConfig::default()
    });
    let err = encoder
        .encode(&citation_schema(), &citation_subgraph())
        .unwrap_err();
    assert!(matches!(err, EncodeError::InvalidFieldNames(_)));
}

#[test]
fn dotted_set_names_are_rejected() {
    let schema = SchemaBuilder::new()
        .node_feature("a", "b.c", None)
        .node_feature("a.b", "c", None)
        .build();
    let err = encode_subgraph_to_record(&schema, &SubgraphBuilder::new().build()).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::InvalidSchema(SchemaError::DottedSetName { .. })
    ));
}

#[test]
fn reserved_feature_names_are_rejected() {
    let schema = SchemaBuilder::new()
        .node_set("paper")
        .edge_feature("cites", "#source", None)
        .build();
    let err = encode_subgraph_to_record(&schema, &SubgraphBuilder::new().build()).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::ReservedFeatureName { kind: SetKind::Edge, .. }
    ));
}

#[test]
fn invalid_schema_is_rejected_before_encoding() {
    let schema = SchemaBuilder::new().edge_set("cites", "paper", "paper").build();
    let err = encode_subgraph_to_record(&schema, &SubgraphBuilder::new().build()).unwrap_err();
    assert!(matches!(err, EncodeError::InvalidSchema(_)));
}
