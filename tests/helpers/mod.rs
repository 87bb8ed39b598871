use notedash::domain::NoteRecord;
use notedash::infrastructure::{HttpNoteSource, StaticToken};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-session-token";
pub const KEY: &str = "100.100.6SN6.R";
pub const ENDPOINT: &str = "/api/dashboard/qritemdata";

#[allow(dead_code)]
/// Endpoint payload: two records on 2024-01-05, one on 2024-01-06 (UTC)
pub fn sample_payload() -> Value {
    json!([
        {
            "_id": "1",
            "qrCodeData": KEY,
            "quantity": 2,
            "description": "Hinge bracket",
            "note": "checked out to line 3",
            "date": "2024-01-05T08:12:00.000Z"
        },
        {
            "_id": "2",
            "qrCodeData": KEY,
            "quantity": 1,
            "description": "Hinge bracket",
            "note": "returned damaged",
            "date": "2024-01-05T16:40:00.000Z"
        },
        {
            "_id": "3",
            "qrCodeData": KEY,
            "quantity": 5,
            "description": "Hinge bracket",
            "note": "restocked",
            "date": "2024-01-06T09:00:00.000Z"
        }
    ])
}

#[allow(dead_code)]
pub fn sample_records() -> Vec<NoteRecord> {
    serde_json::from_value(sample_payload()).expect("sample payload is valid")
}

#[allow(dead_code)]
/// Serve `body` with `status` for any GET on the note endpoint
pub async fn mount_notes(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub fn source_for(server: &MockServer) -> HttpNoteSource<StaticToken> {
    HttpNoteSource::new(server.uri(), StaticToken::new(TOKEN)).expect("client builds")
}
