#![allow(clippy::unwrap_used, clippy::expect_used)]

use signage_core::errors::{ExError, ExErrorKind, SignageError};
use signage_core_types::RequestId;

#[test]
fn test_every_kind_has_distinct_code() {
    let kinds = [
        ExErrorKind::InvalidArgument,
        ExErrorKind::NotFound,
        ExErrorKind::Deleted,
        ExErrorKind::AlreadyExists,
        ExErrorKind::ConstraintViolation,
        ExErrorKind::AccessDenied,
        ExErrorKind::Io,
        ExErrorKind::Serialization,
        ExErrorKind::Persistence,
        ExErrorKind::Config,
        ExErrorKind::ExternalService,
        ExErrorKind::Internal,
    ];

    let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), kinds.len());
    assert!(codes.iter().all(|c| c.starts_with("ERR_")));
}

#[test]
fn test_validation_errors_map_to_invalid_argument() {
    let cases = [
        SignageError::InvalidDimensions {
            width: 0,
            height: 1080,
        },
        SignageError::InvalidName { length: 0 },
        SignageError::DescriptionTooLong { length: 300 },
        SignageError::DuplicateLayoutName {
            owner_id: 5,
            name: "Board A".to_string(),
        },
    ];

    for case in cases {
        let ex: ExError = case.into();
        assert_eq!(ex.kind(), ExErrorKind::InvalidArgument);
        assert_eq!(ex.op(), Some("validate_layout"));
    }
}

#[test]
fn test_lookup_errors_map_to_not_found() {
    let ex: ExError = SignageError::CampaignNotFound { layout_id: Some(7) }.into();
    assert_eq!(ex.kind(), ExErrorKind::NotFound);
    assert_eq!(ex.entity_id(), Some("7"));

    let ex: ExError = SignageError::ApplicationNotFound {
        client_id: "abc".to_string(),
    }
    .into();
    assert_eq!(ex.code(), "ERR_NOT_FOUND");
}

#[test]
fn test_deleted_maps_to_deleted_kind() {
    let ex: ExError = SignageError::LayoutDeleted { layout_id: Some(3) }.into();
    assert_eq!(ex.kind(), ExErrorKind::Deleted);
}

#[test]
fn test_display_carries_request_id() {
    let request_id = RequestId::new();
    let ex = ExError::from(SignageError::LayoutNotFound { layout_id: 12 })
        .with_op("layout_show")
        .with_request_id(request_id.clone());

    let rendered = ex.to_string();
    assert!(rendered.starts_with("[ERR_NOT_FOUND] in operation 'layout_show'"));
    assert!(rendered.contains("(entity_id: 12)"));
    assert!(rendered.contains(&request_id.to_string()));
}

#[test]
fn test_serde_json_error_converts() {
    let parse: Result<serde_json::Value, _> = serde_json::from_str("{");
    let err: SignageError = parse.unwrap_err().into();
    let ex: ExError = err.into();
    assert_eq!(ex.kind(), ExErrorKind::Serialization);
}
