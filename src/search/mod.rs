//! 搜索子句模块：同一检索意图的 JSON 与二进制两种编码。
//!
//! # Search Clauses
//!
//! A [`SearchClause`] is one predicate of a search. Clauses about what the user
//! uploaded nest under `input`; clauses about what a model predicted nest under
//! `output`. Visual similarity is an output comparison against an example image,
//! so it nests as `output → input → data`.
//!
//! ```rust
//! use clarifai_rust::search::{build_query, SearchClause};
//!
//! let query = build_query(&[
//!     SearchClause::by_concept_id("tree-id")?,
//!     SearchClause::by_image_url("https://samples.clarifai.com/metro-north.jpg")?,
//! ]);
//! assert_eq!(query.json["ands"].as_array().unwrap().len(), 2);
//! assert_eq!(query.wire.ands.len(), 2);
//! # Ok::<(), clarifai_rust::Error>(())
//! ```

mod clause;
mod json;
mod wire;

pub use clause::{ConceptOwner, ConceptRef, SearchClause};

use crate::proto;
use serde_json::{json, Value};

/// Both encodings of a conjunctive query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// `{"ands": [...]}`
    pub json: Value,
    pub wire: proto::Query,
}

/// Encode `clauses` in order as the `ands` of one query.
pub fn build_query(clauses: &[SearchClause]) -> SearchQuery {
    SearchQuery {
        json: json!({ "ands": clauses.iter().map(SearchClause::to_json_form).collect::<Vec<_>>() }),
        wire: proto::Query {
            ands: clauses.iter().map(SearchClause::to_wire_form).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crop::Crop;
    use crate::geo::{GeoPoint, GeoRadius, RadiusUnit};
    use crate::Error;
    use pretty_assertions::assert_eq;
    use serde_json::Map;

    fn all_clauses() -> Vec<SearchClause> {
        let mut metadata = Map::new();
        metadata.insert("camera".into(), json!("nikon"));
        metadata.insert("iso".into(), json!(400));
        vec![
            SearchClause::by_concept_id("tree-id").unwrap(),
            SearchClause::by_concept_name("tree").unwrap(),
            SearchClause::by_user_tagged_concept_id("cat-id").unwrap(),
            SearchClause::by_user_tagged_concept_name("cat").unwrap(),
            SearchClause::by_image_url("https://example.com/a.jpg").unwrap(),
            SearchClause::by_image_visual_similarity_url(
                "https://example.com/b.jpg",
                Some(Crop::new(0.1, 0.2, 0.5, 0.75).unwrap()),
            )
            .unwrap(),
            SearchClause::by_image_visual_similarity_bytes(vec![0xff, 0xd8, 0xff], None).unwrap(),
            SearchClause::by_metadata(metadata).unwrap(),
            SearchClause::by_geo_circle(
                GeoPoint::new(-30.0, 40.0).unwrap(),
                GeoRadius::new(10.0, RadiusUnit::Miles).unwrap(),
            ),
            SearchClause::by_geo_rect(
                GeoPoint::new(-30.0, 40.0).unwrap(),
                GeoPoint::new(-20.0, 42.5).unwrap(),
            ),
        ]
    }

    #[test]
    fn test_both_forms_decode_to_the_same_clause() {
        for clause in all_clauses() {
            assert_eq!(SearchClause::from_json_form(&clause.to_json_form()).unwrap(), clause);
            assert_eq!(SearchClause::from_wire_form(&clause.to_wire_form()).unwrap(), clause);
        }
    }

    #[test]
    fn test_output_concept_wire_form() {
        let and = SearchClause::by_concept_id_with_owner("output", "tree-id")
            .unwrap()
            .to_wire_form();
        assert!(and.input.is_none());
        let concepts = &and.output.unwrap().data.unwrap().concepts;
        assert_eq!(concepts.len(), 1);
        assert_eq!(concepts[0].id, "tree-id");
        assert_eq!(concepts[0].value, 1.0);
    }

    #[test]
    fn test_concept_value_is_always_affirmative() {
        let clauses = [
            SearchClause::by_concept_id("a").unwrap(),
            SearchClause::by_concept_name("b").unwrap(),
            SearchClause::by_user_tagged_concept_id("c").unwrap(),
            SearchClause::by_user_tagged_concept_name("d").unwrap(),
        ];
        for clause in &clauses {
            let json = clause.to_json_form();
            let owner = clause.owner().as_key();
            assert_eq!(json[owner]["data"]["concepts"][0]["value"], json!(1));

            let and = clause.to_wire_form();
            let data = match clause.owner() {
                ConceptOwner::Input => and.input.unwrap().data.unwrap(),
                ConceptOwner::Output => and.output.unwrap().data.unwrap(),
            };
            assert_eq!(data.concepts[0].value, 1.0);
        }
    }

    #[test]
    fn test_user_tagged_concept_nests_under_input() {
        let json = SearchClause::by_user_tagged_concept_name("cat")
            .unwrap()
            .to_json_form();
        assert_eq!(
            json,
            json!({"input": {"data": {"concepts": [{"name": "cat", "value": 1}]}}})
        );
    }

    #[test]
    fn test_visual_similarity_nests_output_input_data() {
        let json = SearchClause::by_image_visual_similarity_url(
            "https://example.com/b.jpg",
            Some(Crop::new(0.0, 0.0, 0.5, 0.5).unwrap()),
        )
        .unwrap()
        .to_json_form();
        assert_eq!(
            json,
            json!({"output": {"input": {"data": {"image": {
                "url": "https://example.com/b.jpg",
                "crop": [0.0, 0.0, 0.5, 0.5]
            }}}}})
        );
    }

    #[test]
    fn test_geo_shapes_share_point_encoding() {
        let point = GeoPoint::new(-30.0, 40.0).unwrap();
        let circle = SearchClause::by_geo_circle(point, GeoRadius::new(1.0, RadiusUnit::Kilometers).unwrap())
            .to_json_form();
        let rect = SearchClause::by_geo_rect(point, GeoPoint::new(-20.0, 42.0).unwrap()).to_json_form();
        assert_eq!(
            circle["input"]["data"]["geo"]["geo_point"],
            rect["input"]["data"]["geo"]["geo_box"][0]["geo_point"]
        );
        assert_eq!(
            circle["input"]["data"]["geo"]["geo_limit"],
            json!({"type": "withinKilometers", "value": 1.0})
        );
    }

    #[test]
    fn test_unknown_owner_is_construction_error() {
        let err = SearchClause::by_concept_id_with_owner("annotation", "x").unwrap_err();
        assert!(matches!(err, Error::Construction { .. }));
        assert!(SearchClause::by_concept_name_with_owner("", "x").is_err());
    }

    #[test]
    fn test_empty_arguments_are_rejected() {
        assert!(SearchClause::by_concept_id("").unwrap_err().is_construction());
        assert!(SearchClause::by_image_url("  ").unwrap_err().is_construction());
        assert!(SearchClause::by_image_visual_similarity_bytes(Vec::new(), None).is_err());
        assert!(SearchClause::by_metadata(Map::new()).is_err());
    }

    #[test]
    fn test_build_query_keeps_clause_order() {
        let clauses = all_clauses();
        let query = build_query(&clauses);
        let ands = query.json["ands"].as_array().unwrap();
        assert_eq!(ands.len(), clauses.len());
        assert_eq!(query.wire.ands.len(), clauses.len());
        for (i, clause) in clauses.iter().enumerate() {
            assert_eq!(ands[i], clause.to_json_form());
            assert_eq!(query.wire.ands[i], clause.to_wire_form());
        }
    }

    #[test]
    fn test_unrecognized_shapes_are_decode_errors() {
        assert!(SearchClause::from_json_form(&json!({"input": {"data": {}}})).is_err());
        assert!(SearchClause::from_json_form(&json!({})).is_err());
        assert!(SearchClause::from_wire_form(&proto::And::default()).is_err());
    }
}
