mod common;

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use anyhow::anyhow;
use common::{init_logger, rows};
use serde::Serialize;
use serde_json::{Value, json};
use tabular_encoder::{EncodeError, Records, TabularEncoderBuilder};

#[derive(Debug)]
struct LookupFailed {
    key: String,
}

impl std::fmt::Display for LookupFailed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no entry for {}", self.key)
    }
}

impl std::error::Error for LookupFailed {}

#[tokio::test]
async fn transform_error_surfaces_unchanged() {
    init_logger();

    let encoder = TabularEncoderBuilder::new()
        .columns(["name", "age"])
        .async_transform("name", |name: Value| async move {
            Err::<Value, _>(LookupFailed {
                key: name.as_str().unwrap_or_default().to_string(),
            })
        })
        .build();

    let error = encoder.encode(rows()).await.unwrap_err();

    assert_eq!(error.column(), Some("name"));
    let source = error.into_transform_error().unwrap();
    let lookup = source.downcast_ref::<LookupFailed>().unwrap();
    assert_eq!(lookup.key, "John");
}

#[tokio::test]
async fn anyhow_errors_are_accepted() {
    let encoder = TabularEncoderBuilder::new()
        .columns(["age"])
        .try_transform("age", |_| Err::<Value, _>(anyhow!("age service unavailable")))
        .build();

    let error = encoder.encode(rows()).await.unwrap_err();

    assert_eq!(
        error.to_string(),
        "Transform for column `age` failed: age service unavailable"
    );
}

#[tokio::test]
async fn failure_stops_before_later_columns() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&calls);

    let encoder = TabularEncoderBuilder::new()
        .columns(["name", "age"])
        .try_transform("name", |_| Err::<Value, _>("name lookup failed"))
        .transform("age", move |age| {
            counted.fetch_add(1, Ordering::SeqCst);
            age
        })
        .build();

    let result = encoder.encode(rows()).await;

    assert!(matches!(result, Err(EncodeError::Transform { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn one_failing_value_fails_the_whole_call() {
    let encoder = TabularEncoderBuilder::new()
        .columns(["id"])
        .try_transform("id", |id| match id.as_i64() {
            Some(2) => Err("id 2 is reserved".to_string()),
            _ => Ok(id),
        })
        .build();

    let records = Records::try_from(json!([{"id": 1}, {"id": 2}, {"id": 3}])).unwrap();
    let error = encoder.encode(records).await.unwrap_err();

    assert_eq!(error.column(), Some("id"));
    assert_eq!(
        error.into_transform_error().unwrap().to_string(),
        "id 2 is reserved"
    );
}

#[test]
fn non_record_input_is_rejected() {
    let error = Records::try_from(json!("just text")).unwrap_err();
    assert!(matches!(error, EncodeError::NotARecord(_)));
    assert_eq!(error.to_string(), "Not a record: input is a string");
    assert_eq!(error.column(), None);

    #[derive(Serialize)]
    struct Reading(f64);

    let error = Records::from_serializable(&vec![Reading(1.0)]).unwrap_err();
    assert_eq!(error.to_string(), "Not a record: item 0 is a number");
}

#[test]
fn unserializable_input_is_a_serialization_error() {
    use std::collections::HashMap;

    // JSON object keys must be strings
    let mut by_pair = HashMap::new();
    by_pair.insert((1, 2), "x");

    let error = Records::from_serializable(&by_pair).unwrap_err();
    assert!(matches!(error, EncodeError::Serialization(_)));
}
