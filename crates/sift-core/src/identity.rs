use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Already-authenticated user identity supplied by the caller.
///
/// Sift performs no authentication itself; whoever invokes an installation
/// vouches for this value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuthIdentity {
    /// Stable user ID of the acting user.
    pub user_id: String,
}

impl AuthIdentity {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}
