//! Todo resource scenarios through the boundary adapter.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use restbox::{
    adapter::{QueryParams, Response},
    api::Api,
    clock::Clock,
    seed,
};
use rstest::rstest;
use serde_json::{Value, json};

/// A clock stuck well before every seed timestamp.
#[derive(Debug)]
struct StaleClock;

impl Clock for StaleClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    }
}

fn timestamp(value: &Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

async fn api() -> Api {
    Api::builder().build().await.unwrap()
}

fn params(pairs: &[(&str, &str)]) -> QueryParams {
    QueryParams::from_pairs(pairs.iter().copied())
}

fn ids(items: &Value) -> Vec<u64> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_u64().unwrap())
        .collect()
}

fn assert_ok(response: &Response) {
    assert!(response.is_success(), "unexpected response: {response:?}");
}

#[tokio::test]
async fn lists_every_todo_in_id_order() {
    let api = api().await;

    let response = api.todos().list(&QueryParams::new()).await;

    assert_eq!(response.status, 200);
    assert_eq!(ids(&response.body), (1..=12).collect::<Vec<_>>());
}

#[rstest]
#[case(&[("userId", "1")], vec![1, 2, 11])]
#[case(&[("userId", "9")], vec![])]
#[case(&[("completed", "true")], vec![2, 4, 6, 9, 11])]
#[case(&[("completed", "false")], vec![1, 3, 5, 7, 8, 10, 12])]
#[case(&[("userId", "2"), ("completed", "false")], vec![3, 12])]
#[case(&[("search", "Hazırla")], vec![1, 3, 7, 9])]
#[case(&[("search", "güncelle"), ("order", "desc")], vec![10, 5])]
#[case(&[("sort", "userId"), ("order", "desc"), ("limit", "4")], vec![9, 10, 7, 8])]
#[case(&[("userId", "1"), ("sort", "title")], vec![11, 1, 2])]
#[tokio::test]
async fn list_filters_searches_and_sorts(#[case] pairs: &[(&str, &str)], #[case] expected: Vec<u64>) {
    let api = api().await;

    let response = api.todos().list(&params(pairs)).await;

    assert_eq!(response.status, 200);
    assert_eq!(ids(&response.body), expected);
}

#[tokio::test]
async fn windowed_listing_reports_page_metadata() {
    let api = api().await;

    let response = api.todos().list(&params(&[("page", "3"), ("limit", "5")])).await;

    assert_eq!(response.status, 200);
    assert_eq!(ids(&response.body["items"]), vec![11, 12]);
    assert_eq!(
        response.body["pagination"],
        json!({ "page": 3, "pageSize": 5, "total": 12, "totalPages": 3 })
    );
}

#[tokio::test]
async fn page_past_the_end_is_empty_with_real_totals() {
    let api = api().await;

    let response = api
        .todos()
        .list(&params(&[("userId", "1"), ("page", "2"), ("pageSize", "10")]))
        .await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["items"], json!([]));
    assert_eq!(response.body["pagination"]["total"], 3);
    assert_eq!(response.body["pagination"]["totalPages"], 1);
}

#[rstest]
#[case(&[("page", "0"), ("limit", "5")])]
#[case(&[("limit", "-1")])]
#[case(&[("page", "1"), ("limit", "5"), ("pageSize", "0")])]
#[case(&[("userId", "one")])]
#[case(&[("completed", "yes")])]
#[case(&[("sort", "priority")])]
#[case(&[("order", "sideways")])]
#[tokio::test]
async fn invalid_list_parameters_are_rejected(#[case] pairs: &[(&str, &str)]) {
    let api = api().await;

    let response = api.todos().list(&params(pairs)).await;

    assert_eq!(response.status, 400);
    assert!(response.body["error"].is_string());
}

#[tokio::test]
async fn created_todos_get_increasing_ids_and_read_back_identically() {
    let api = api().await;

    let first = api.todos().create(r#"{"userId": 3, "title": "Write changelog"}"#).await;
    let second = api
        .todos()
        .create(r#"{"userId": 3, "title": "Tag release", "completed": true}"#)
        .await;

    assert_eq!(first.status, 201);
    assert_eq!(second.status, 201);
    assert_eq!(first.body["id"], 13);
    assert_eq!(second.body["id"], 14);
    assert_eq!(first.body["completed"], false);
    assert_eq!(first.body["createdAt"], first.body["updatedAt"]);

    let fetched = api.todos().get("13").await;
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.body, first.body);
}

#[rstest]
#[case(r#"{"title": "No owner"}"#, 400)]
#[case(r#"{"userId": 0, "title": "Zero owner"}"#, 400)]
#[case(r#"{"userId": 1, "title": ""}"#, 400)]
#[case(r#"{"userId": 1}"#, 400)]
#[case(r#"{"userId": 1, "title": "#, 400)]
#[case(r#"not json"#, 400)]
#[tokio::test]
async fn invalid_creates_change_nothing(#[case] body: &str, #[case] status: u16) {
    let api = api().await;

    let response = api.todos().create(body).await;

    assert_eq!(response.status, status);
    assert_eq!(api.todos().backend().len().await, 12);
}

#[tokio::test]
async fn merge_keeps_unsupplied_fields() {
    let api = api().await;
    let before = api.todos().get("1").await;

    let merged = api.todos().merge("1", r#"{"completed": true}"#).await;

    assert_ok(&merged);
    assert_eq!(merged.body["completed"], true);
    assert_eq!(merged.body["title"], before.body["title"]);
    assert_eq!(merged.body["userId"], before.body["userId"]);
    assert_eq!(merged.body["createdAt"], before.body["createdAt"]);
    assert_ne!(merged.body["updatedAt"], before.body["updatedAt"]);
}

#[tokio::test]
async fn updates_advance_updated_at_even_when_the_clock_lags() {
    let api = Api::builder().with_clock(Arc::new(StaleClock)).build().await.unwrap();
    let before = api.todos().get("1").await;

    let merged = api.todos().merge("1", r#"{"completed": true}"#).await;
    assert_ok(&merged);
    assert!(timestamp(&merged.body["updatedAt"]) > timestamp(&before.body["updatedAt"]));

    let replaced = api.todos().replace("1", r#"{"userId": 1, "title": "Again"}"#).await;
    assert_ok(&replaced);
    assert!(timestamp(&replaced.body["updatedAt"]) > timestamp(&merged.body["updatedAt"]));
    assert_eq!(replaced.body["createdAt"], before.body["createdAt"]);
}

#[tokio::test]
async fn replace_resets_omitted_optional_fields() {
    let api = api().await;
    let before = api.todos().get("2").await;
    assert_eq!(before.body["completed"], true);

    let replaced = api.todos().replace("2", r#"{"userId": 4, "title": "Rewrite tests"}"#).await;

    assert_ok(&replaced);
    assert_eq!(replaced.body["id"], 2);
    assert_eq!(replaced.body["userId"], 4);
    assert_eq!(replaced.body["completed"], false);
    assert_eq!(replaced.body["createdAt"], before.body["createdAt"]);
}

#[rstest]
#[case("99")]
#[case("0")]
#[case("abc")]
#[tokio::test]
async fn unknown_ids_are_not_found(#[case] id: &str) {
    let api = api().await;

    assert_eq!(api.todos().get(id).await.status, 404);
    assert_eq!(api.todos().merge(id, r#"{"completed": true}"#).await.status, 404);
    assert_eq!(api.todos().replace(id, r#"{"userId": 1, "title": "x"}"#).await.status, 404);
    assert_eq!(api.todos().delete(id).await.status, 404);
}

#[tokio::test]
async fn missing_record_wins_over_invalid_payload() {
    let api = api().await;

    let response = api.todos().replace("99", r#"{"title": ""}"#).await;

    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn delete_returns_the_removed_todo() {
    let api = api().await;
    let existing = api.todos().get("5").await;

    let deleted = api.todos().delete("5").await;

    assert_eq!(deleted.status, 200);
    assert_eq!(deleted.body["message"], "Todo deleted successfully");
    assert_eq!(deleted.body["todo"], existing.body);
    assert_eq!(api.todos().get("5").await.status, 404);
    assert_eq!(api.todos().delete("5").await.status, 404);
}

#[tokio::test]
async fn filtered_delete_removes_only_matches() {
    let api = api().await;

    let response = api.todos().delete_many(&params(&[("userId", "1")])).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["deletedCount"], 3);
    assert_eq!(response.body["message"], "Deleted 3 todos");

    let remaining = api.todos().list(&QueryParams::new()).await;
    assert_eq!(ids(&remaining.body), vec![3, 4, 5, 6, 7, 8, 9, 10, 12]);

    let again = api.todos().delete_many(&params(&[("userId", "1")])).await;
    assert_eq!(again.body["deletedCount"], 0);
}

#[tokio::test]
async fn unfiltered_delete_restores_the_seed() {
    let api = api().await;
    api.todos().create(r#"{"userId": 1, "title": "Temporary"}"#).await;
    api.todos().delete("1").await;
    api.todos().merge("2", r#"{"title": "Changed"}"#).await;

    let response = api.todos().delete_many(&QueryParams::new()).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.body["message"], "All todos reset to initial state");

    let listed = api.todos().list(&QueryParams::new()).await;
    assert_eq!(listed.body, serde_json::to_value(seed::todos().unwrap()).unwrap());

    let created = api.todos().create(r#"{"userId": 1, "title": "After reset"}"#).await;
    assert_eq!(created.body["id"], 13);
}

#[tokio::test]
async fn resetting_todos_leaves_users_alone() {
    let api = api().await;
    api.users().delete("1").await;

    api.todos().delete_many(&QueryParams::new()).await;

    assert_eq!(api.users().backend().len().await, 4);
}
