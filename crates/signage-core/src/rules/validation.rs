use crate::errors::{Result, SignageError};
use crate::model::Layout;

/// Longest allowed layout name, in bytes of UTF-8
pub const MAX_NAME_LEN: usize = 50;

/// Longest allowed layout description, in bytes of UTF-8
pub const MAX_DESCRIPTION_LEN: usize = 254;

/// Check the field-level rules of a layout
///
/// Runs in the order dimensions, name, description and returns the first
/// violation. The duplicate-name rule needs storage and lives in
/// `LayoutLifecycle::validate`.
///
/// # Errors
/// * `InvalidDimensions` - width or height is zero
/// * `InvalidName` - name shorter than 1 or longer than 50 bytes
/// * `DescriptionTooLong` - description longer than 254 bytes
pub fn validate_layout_fields(layout: &Layout) -> Result<()> {
    let attrs = layout.attributes();

    if attrs.width == 0 || attrs.height == 0 {
        return Err(SignageError::InvalidDimensions {
            width: attrs.width,
            height: attrs.height,
        });
    }

    let name_len = attrs.name.len();
    if !(1..=MAX_NAME_LEN).contains(&name_len) {
        return Err(SignageError::InvalidName { length: name_len });
    }

    let description_len = attrs.description.len();
    if description_len > MAX_DESCRIPTION_LEN {
        return Err(SignageError::DescriptionTooLong {
            length: description_len,
        });
    }

    Ok(())
}
