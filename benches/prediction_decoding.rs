//! Benchmarks for prediction decoding
//!
//! This benchmark measures:
//! - JSON container decoding for concept and color replies
//! - Wire message decoding for the same replies
//! - Full `predict` reply unmarshalling over both protocols

use clarifai_rust::operations::models;
use clarifai_rust::predictions::{decode_json, decode_wire};
use clarifai_rust::proto;
use clarifai_rust::{Input, ModelType, Payload};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use prost::Message;
use serde_json::{json, Value};

fn concepts_json(n: usize) -> Value {
    let concepts: Vec<Value> = (0..n)
        .map(|i| json!({"id": format!("ai_{}", i), "name": format!("concept-{}", i), "value": 0.5, "app_id": "main"}))
        .collect();
    json!({ "concepts": concepts })
}

fn concepts_wire(n: usize) -> proto::Data {
    proto::Data {
        concepts: (0..n)
            .map(|i| proto::Concept {
                id: format!("ai_{}", i),
                name: format!("concept-{}", i),
                value: 0.5,
                app_id: "main".into(),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

fn bench_containers(c: &mut Criterion) {
    let mut group = c.benchmark_group("prediction_containers");

    for n in [20usize, 200] {
        let json_data = concepts_json(n);
        let wire_data = concepts_wire(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("concept_json", n), &json_data, |b, data| {
            b.iter(|| decode_json("concept", black_box(data)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("concept_wire", n), &wire_data, |b, data| {
            b.iter(|| decode_wire("concept", black_box(data)).unwrap())
        });
    }

    group.finish();
}

fn bench_predict_reply(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict_reply");

    let request = models::predict(
        ModelType::Concept,
        "general",
        None,
        vec![Input::image_url("https://samples.clarifai.com/metro-north.jpg")],
    )
    .unwrap();

    let json_reply = json!({
        "status": {"code": 10000, "description": "Ok"},
        "outputs": [{"id": "out-1", "data": concepts_json(20)}]
    });
    let wire_reply = proto::MultiOutputResponse {
        status: None,
        outputs: vec![proto::Output {
            id: "out-1".into(),
            data: Some(concepts_wire(20)),
            ..Default::default()
        }],
    }
    .encode_to_vec();

    group.bench_function("json", |b| {
        b.iter(|| request.unmarshal(Payload::Json(black_box(&json_reply))).unwrap())
    });
    group.bench_function("wire", |b| {
        b.iter(|| request.unmarshal(Payload::Wire(black_box(&wire_reply))).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_containers, bench_predict_reply);
criterion_main!(benches);
