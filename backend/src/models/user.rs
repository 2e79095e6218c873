//! User data model and verification token.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Application user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct User {
    /// Stable user identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    /// Address the verification mail is sent to.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Display name shown to other users.
    #[schema(example = "Ada Lovelace")]
    pub display_name: String,
    /// Whether the account completed email verification.
    pub verified: bool,
}

/// Opaque single-use token mailed out during registration.
///
/// Tokens are minted by the user store and consumed exactly once; a second
/// presentation reads as already-verified rather than as an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct VerificationToken(String);

impl VerificationToken {
    /// Mint a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// The token's wire form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for VerificationToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for VerificationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
