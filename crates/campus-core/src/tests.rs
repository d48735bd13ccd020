//! Tests for `MemoryStore` and the resource ↔ document mapping.

use serde_json::{Value, json};

use crate::{
  building::Building,
  document::{Fields, Patch},
  floor::Floor,
  memory::MemoryStore,
  model::Model,
  resource::{Resource, Stored},
  store::DocumentStore,
};

fn fields(value: Value) -> Fields {
  match value {
    Value::Object(map) => map,
    other => panic!("not an object: {other}"),
  }
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_assigns_increasing_ids_per_collection() {
  let s = MemoryStore::new();
  assert_eq!(s.add("models", fields(json!({"url": "a"}))).await.unwrap(), "1");
  assert_eq!(s.add("models", fields(json!({"url": "b"}))).await.unwrap(), "2");
  assert_eq!(s.add("floors", fields(json!({}))).await.unwrap(), "1");
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = MemoryStore::new();
  s.add("models", fields(json!({"url": "a"}))).await.unwrap();
  let second = s.add("models", fields(json!({"url": "b"}))).await.unwrap();
  assert!(s.delete("models", &second).await.unwrap());

  let third = s.add("models", fields(json!({"url": "c"}))).await.unwrap();
  assert_eq!(third, "3");
  assert_eq!(s.list("models").await.unwrap().len(), 2);
}

#[tokio::test]
async fn seeded_documents_continue_the_sequence() {
  let s = MemoryStore::new().with_documents(
    "models",
    (1..=4).map(|n| fields(json!({ "url": format!("model{n}.url") }))),
  );
  let listed = s.list("models").await.unwrap();
  let ids: Vec<_> = listed.iter().map(|d| d.id.as_str()).collect();
  assert_eq!(ids, ["1", "2", "3", "4"]);

  assert_eq!(s.add("models", Fields::new()).await.unwrap(), "5");
}

#[tokio::test]
async fn get_missing_or_malformed_id_returns_none() {
  let s = MemoryStore::new();
  s.add("models", Fields::new()).await.unwrap();
  assert!(s.get("models", "99").await.unwrap().is_none());
  assert!(s.get("models", "not-a-number").await.unwrap().is_none());
  assert!(s.get("floors", "1").await.unwrap().is_none());
}

#[tokio::test]
async fn update_missing_document_creates_nothing() {
  let s = MemoryStore::new();
  let patch = Patch::new().set("url", json!("x"));
  assert!(!s.update("models", "1", patch).await.unwrap());
  assert!(s.list("models").await.unwrap().is_empty());
}

#[tokio::test]
async fn update_sets_and_removes_fields() {
  let s = MemoryStore::new();
  let id = s
    .add("models", fields(json!({"url": "a", "label": "A", "extra": 1})))
    .await
    .unwrap();

  let patch = Patch::new().set("url", json!("b")).remove("label");
  assert!(s.update("models", &id, patch).await.unwrap());

  let doc = s.get("models", &id).await.unwrap().unwrap();
  assert_eq!(doc.fields, fields(json!({"url": "b", "extra": 1})));
}

#[tokio::test]
async fn find_by_matches_on_equality() {
  let s = MemoryStore::new();
  s.add("floors", fields(json!({"buildingId": "A"}))).await.unwrap();
  s.add("floors", fields(json!({"buildingId": "B"}))).await.unwrap();
  s.add("floors", fields(json!({"buildingId": "A"}))).await.unwrap();
  s.add("floors", fields(json!({}))).await.unwrap();

  let found = s.find_by("floors", "buildingId", &json!("A")).await.unwrap();
  let ids: Vec<_> = found.iter().map(|d| d.id.as_str()).collect();
  assert_eq!(ids, ["1", "3"]);
}

// ─── Resource mapping ────────────────────────────────────────────────────────

#[test]
fn floor_defaults_fill_only_missing_fields() {
  let floor = Floor {
    active: Some(json!(false)),
    ..Floor::default()
  }
  .with_defaults();
  assert_eq!(floor.active, Some(json!(false)));
  assert_eq!(floor.model_urls, Some(json!([])));
}

#[test]
fn to_fields_uses_wire_keys_and_skips_absent() {
  let floor = Floor {
    name: Some(json!("Ground")),
    building_id: Some(json!("b1")),
    ..Floor::default()
  };
  assert_eq!(
    floor.to_fields().unwrap(),
    fields(json!({"nombre": "Ground", "buildingId": "b1"}))
  );
}

#[test]
fn to_patch_covers_every_recognised_field() {
  let model = Model {
    url: Some(json!("x")),
    ..Model::default()
  };
  let patch = model.to_patch().unwrap();
  let writes: Vec<_> = patch.iter().collect();
  assert_eq!(
    writes,
    [
      ("label", None),
      ("url", Some(&json!("x"))),
      ("visible", None),
    ]
  );
}

#[test]
fn stored_serialises_id_alongside_fields() {
  let stored = Stored {
    id:     "5".to_owned(),
    record: Model {
      url:     Some(json!("x")),
      label:   Some(json!("y")),
      visible: Some(json!(true)),
    },
  };
  assert_eq!(
    serde_json::to_value(&stored).unwrap(),
    json!({"id": "5", "url": "x", "label": "y", "visible": true})
  );
}

#[test]
fn from_fields_ignores_unknown_keys() {
  let model = Model::from_fields(fields(json!({"url": "x", "colour": "red"}))).unwrap();
  assert_eq!(model.url, Some(json!("x")));
  assert_eq!(model.label, None);
}

#[test]
fn from_fields_accepts_any_value_type() {
  let stored = fields(json!({
    "nombre": "Library",
    "latitud": "40.4",
    "scale": {"x": 1, "y": 2},
    "urlModelo": 7
  }));
  let building = Building::from_fields(stored.clone()).unwrap();
  assert_eq!(building.latitude, Some(json!("40.4")));
  assert_eq!(building.to_fields().unwrap(), stored);
}

#[test]
fn null_is_treated_as_absent() {
  let model = Model::from_fields(fields(json!({"url": null, "label": "y"}))).unwrap();
  assert_eq!(model.url, None);
  assert_eq!(model.to_fields().unwrap(), fields(json!({"label": "y"})));
}
