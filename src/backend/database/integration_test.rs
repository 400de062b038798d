use super::mongo::UserDocument;
use super::user_insert::UserInsertProcessor;
use super::user_update::UserUpdateProcessor;
use crate::backend::DatabaseType;
use crate::models::{CreateUserRequest, UpdateUserRequest};

/// The shared processors feed every backend, so the prepared data must fit
/// each backend's native id shape and nothing else.

#[test]
fn test_prepared_ids_match_each_backend() {
    let input = CreateUserRequest {
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        ..Default::default()
    };

    for database_type in [
        DatabaseType::PostgreSQL,
        DatabaseType::SQLite,
        DatabaseType::MongoDB,
    ] {
        let own = database_type.id_format();
        let prepared = UserInsertProcessor::prepare_user_for_insert(&input, own);
        assert!(own.is_valid(&prepared.id), "{}", database_type.as_str());

        let other = match database_type {
            DatabaseType::MongoDB => DatabaseType::SQLite.id_format(),
            _ => DatabaseType::MongoDB.id_format(),
        };
        assert!(!other.is_valid(&prepared.id), "{}", database_type.as_str());
    }
}

#[test]
fn test_prepared_object_id_converts_to_document() {
    let input = CreateUserRequest {
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        address: Some("42 Galaxy Way".to_string()),
        ..Default::default()
    };

    let prepared =
        UserInsertProcessor::prepare_user_for_insert(&input, DatabaseType::MongoDB.id_format());
    let document = UserDocument::from_prepared(&prepared).unwrap();

    assert_eq!(document.id.to_hex(), prepared.id);
    assert_eq!(document.created_at, document.updated_at);
    assert_eq!(document.address.as_deref(), Some("42 Galaxy Way"));
}

#[test]
fn test_update_preparation_keeps_patch_untouched() {
    let patch = UpdateUserRequest {
        name: Some("Renamed".to_string()),
        ..Default::default()
    };

    let prepared = UserUpdateProcessor::prepare_user_for_update("some-id", &patch);
    assert_eq!(prepared.patch.name.as_deref(), Some("Renamed"));
    assert!(prepared.patch.email.is_none());
    assert_eq!(prepared.timestamp.timestamp_subsec_nanos() % 1_000, 0);
}
