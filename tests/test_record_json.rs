mod helpers;

use anyhow::Result;
use helpers::sample_records;

#[test]
fn given_record_when_serializing_to_json_then_uses_endpoint_field_names() -> Result<()> {
    // Arrange
    let record = &sample_records()[0];

    // Act
    let json = serde_json::to_string_pretty(record)?;

    // Assert
    assert!(json.contains(r#""qrCodeData": "100.100.6SN6.R""#));
    assert!(json.contains(r#""quantity": 2"#));
    assert!(json.contains(r#""description": "Hinge bracket""#));
    assert!(json.contains(r#""note": "checked out to line 3""#));
    assert!(json.contains(r#""date": "2024-01-05T08:12:00Z""#));
    Ok(())
}

#[test]
fn given_record_when_serializing_then_does_not_use_rust_field_names() -> Result<()> {
    let json = serde_json::to_string(&sample_records()[0])?;

    assert!(!json.contains("query_key"));
    Ok(())
}

#[test]
fn given_serialized_records_when_reading_back_then_equal() -> Result<()> {
    let records = sample_records();

    let json = serde_json::to_string(&records)?;
    let parsed: Vec<notedash::domain::NoteRecord> = serde_json::from_str(&json)?;

    assert_eq!(parsed, records);
    Ok(())
}
