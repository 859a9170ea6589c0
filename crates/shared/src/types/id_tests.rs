use super::*;
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_creation() {
    let id = DocumentId::new();
    assert!(!id.to_string().is_empty());
}

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = CounterpartyId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_ids_are_time_ordered() {
    let first = DocumentId::new();
    let second = DocumentId::new();
    assert!(first.into_inner() <= second.into_inner());
}

#[test]
fn test_typed_id_display() {
    let uuid = Uuid::new_v4();
    let id = ProductVariantId::from_uuid(uuid);
    assert_eq!(format!("{id}"), uuid.to_string());
}

#[test]
fn test_typed_id_from_str() {
    let uuid = Uuid::new_v4();
    let id = TaxId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
}

#[test]
fn test_typed_id_from_str_error() {
    assert!(LanguageId::from_str("invalid").is_err());
}

#[test]
fn test_typed_id_hashable() {
    let id = UserId::new();
    let set: HashSet<UserId> = [id, id, UserId::new()].into_iter().collect();
    assert_eq!(set.len(), 2);
}
