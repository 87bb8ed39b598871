mod helpers;

use chrono::NaiveDate;
use helpers::{mount_notes, sample_payload, source_for, ENDPOINT, KEY};
use notedash::application::{FetchOutcome, NoteSource, NoteTableController};
use notedash::domain::DayBoundary;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn given_endpoint_when_finding_then_table_shows_response_in_order() -> anyhow::Result<()> {
    // Arrange
    let server = MockServer::start().await;
    mount_notes(&server, 200, sample_payload()).await;
    let mut table = NoteTableController::new(source_for(&server), KEY)
        .with_day_boundary(DayBoundary::utc());

    // Act
    let outcome = table.find().await;

    // Assert
    assert!(outcome.is_applied());
    let notes: Vec<&str> = table.visible_records().iter().map(|r| r.note.as_str()).collect();
    assert_eq!(
        notes,
        vec!["checked out to line 3", "returned damaged", "restocked"]
    );
    assert_eq!(table.all_records(), table.visible_records());
    Ok(())
}

#[tokio::test]
async fn given_loaded_table_when_filtering_by_day_then_keeps_that_day_only() {
    let server = MockServer::start().await;
    mount_notes(&server, 200, sample_payload()).await;
    let mut table = NoteTableController::new(source_for(&server), KEY)
        .with_day_boundary(DayBoundary::utc());
    table.find().await;

    table.select_date(NaiveDate::from_ymd_opt(2024, 1, 5));
    let visible = table.apply_filter().to_vec();

    assert_eq!(visible.len(), 2);
    assert_eq!(visible[0].note, "checked out to line 3");
    assert_eq!(visible[1].note, "returned damaged");
}

#[tokio::test]
async fn given_first_fetch_fails_with_500_when_finding_then_table_stays_empty() {
    // Arrange
    let server = MockServer::start().await;
    mount_notes(&server, 500, json!({})).await;
    let mut table = NoteTableController::new(source_for(&server), KEY);

    // Act
    let outcome = table.find().await;

    // Assert
    assert!(matches!(outcome, FetchOutcome::Failed(_)));
    assert!(table.all_records().is_empty());
    assert!(table.visible_records().is_empty());
    assert!(!table.is_loaded());
}

#[tokio::test]
async fn given_empty_key_when_finding_then_endpoint_is_never_called() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .expect(0)
        .mount(&server)
        .await;
    let mut table = NoteTableController::new(source_for(&server), "");

    let outcome = table.find().await;

    assert!(matches!(outcome, FetchOutcome::Skipped));
}

#[tokio::test]
async fn given_overlapping_fetches_when_older_response_arrives_last_then_newer_data_wins() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("qrCodeData", "OLD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_payload()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .and(query_param("qrCodeData", "NEW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let mut table = NoteTableController::new(source_for(&server), "OLD");

    // Act
    let old_ticket = table.begin_fetch().expect("key is set");
    table.set_query_key("NEW");
    let new_ticket = table.begin_fetch().expect("key is set");
    let new_result = table.source().fetch_notes(&new_ticket.query_key).await;
    let old_result = table.source().fetch_notes(&old_ticket.query_key).await;
    let new_outcome = table.complete_fetch(new_ticket, new_result);
    let old_outcome = table.complete_fetch(old_ticket, old_result);

    // Assert
    assert!(new_outcome.is_applied());
    assert!(matches!(old_outcome, FetchOutcome::Stale { seq: 1 }));
    assert!(table.all_records().is_empty());
    assert!(table.is_loaded());
}
