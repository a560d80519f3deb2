//! SQL migrations compiled into the binary, in application order

use sha2::{Digest, Sha256};

pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

impl Migration {
    /// Hex SHA-256 of the SQL, recorded to detect edited migrations
    pub fn checksum(&self) -> String {
        hex::encode(Sha256::digest(self.sql.as_bytes()))
    }
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        id: "001_initial_schema",
        sql: include_str!("../../migrations/001_initial_schema.sql"),
    },
    Migration {
        id: "002_oauth",
        sql: include_str!("../../migrations/002_oauth.sql"),
    },
];
