use std::fmt;

use serde::{Serialize, Serializer};
use sqlx::FromRow;

/// A row from the client `em_blue` table: one downstream emBlue account.
#[derive(Clone, PartialEq, Eq, FromRow)]
pub struct EmblueAccount {
    pub hostname: String,
    pub emblue_user: String,
    pub password: String,
}

/// Serialized positionally as `[hostname, emblue_user, password]`, the
/// shape the download state machine reads from its `account` input.
impl Serialize for EmblueAccount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.hostname, &self.emblue_user, &self.password).serialize(serializer)
    }
}

impl fmt::Debug for EmblueAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmblueAccount")
            .field("hostname", &self.hostname)
            .field("emblue_user", &self.emblue_user)
            .field("password", &"<redacted>")
            .finish()
    }
}
