use super::{decode_list, require_items};
use crate::proto;
use crate::request::{Method, Pagination, Payload, Request};
use crate::search::{build_query, SearchClause};
use crate::types::SearchHit;
use crate::Result;
use serde_json::json;

/// Inputs matching every clause, best first.
///
/// The page cursor goes into the body on HTTP and into the message on RPC.
pub fn search_inputs(clauses: Vec<SearchClause>, pagination: Pagination) -> Result<Request<Vec<SearchHit>>> {
    require_items(&clauses, "query.ands")?;
    let query = build_query(&clauses);
    let body = json!({ "query": query.json });
    let wire_query = query.wire;

    Ok(Request::new("search_inputs", Method::Post, "/v2/searches", |payload| match payload {
        Payload::Json(envelope) => decode_list(envelope, "hits", SearchHit::from_json),
        Payload::Wire(_) => {
            let reply: proto::MultiSearchResponse = payload.decode_wire()?;
            reply.hits.iter().map(SearchHit::from_wire).collect()
        }
    })
    .with_json_body(move |_| Ok(body.clone()))
    .with_rpc("PostSearches", move |page| {
        Ok(proto::PostSearchesRequest {
            query: Some(wire_query.clone()),
            pagination: page.map(Pagination::to_wire),
        })
    })
    .paginated(pagination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_search_body_and_message() {
        let req = search_inputs(
            vec![SearchClause::by_concept_id("tree-id").unwrap()],
            Pagination::new(2, 20).unwrap(),
        )
        .unwrap();
        assert_eq!(req.http_path(), "/v2/searches");
        let body = req.http_body().unwrap().unwrap();
        assert_eq!(body["pagination"], json!({"page": 2, "per_page": 20}));
        assert_eq!(
            body["query"]["ands"][0]["output"]["data"]["concepts"][0],
            json!({"id": "tree-id", "value": 1})
        );

        let msg = proto::PostSearchesRequest::decode(req.rpc_body().unwrap().unwrap()).unwrap();
        assert_eq!(msg.pagination, Some(proto::Pagination { page: 2, per_page: 20 }));
        assert_eq!(msg.query.unwrap().ands.len(), 1);
    }

    #[test]
    fn test_next_page_does_not_touch_first() {
        let first = search_inputs(
            vec![SearchClause::by_user_tagged_concept_name("cat").unwrap()],
            Pagination::first_page(),
        )
        .unwrap();
        let second = first.paginated(first.pagination().unwrap().next_page());
        assert_eq!(first.http_body().unwrap().unwrap()["pagination"]["page"], json!(1));
        assert_eq!(second.http_body().unwrap().unwrap()["pagination"]["page"], json!(2));
    }

    #[test]
    fn test_empty_query_rejected() {
        assert!(search_inputs(Vec::new(), Pagination::first_page())
            .unwrap_err()
            .is_construction());
    }

    #[test]
    fn test_hits_decode() {
        let req = search_inputs(
            vec![SearchClause::by_image_url("https://example.com/x.jpg").unwrap()],
            Pagination::first_page(),
        )
        .unwrap();
        let envelope = json!({
            "status": {"code": 10000},
            "hits": [
                {"score": 0.99, "input": {"id": "a", "data": {"image": {"url": "https://example.com/x.jpg"}}}},
                {"score": 0.5, "input": {"id": "b", "data": {"image": {"url": "https://example.com/y.jpg"}}}}
            ]
        });
        let hits = req.unmarshal(Payload::Json(&envelope)).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].input.id.as_deref(), Some("b"));
    }
}
