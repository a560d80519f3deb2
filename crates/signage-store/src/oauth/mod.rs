//! Storage for OAuth client applications and authorization codes

mod applications;
mod auth_codes;

pub use applications::{get_application, insert_application, list_applications};
pub use auth_codes::{SqliteAuthCodeServer, AUTH_CODE_LEN, AUTH_CODE_TTL_SECS};
