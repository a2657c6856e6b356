use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Author of a remote post, as returned by `GET /users/:id`.
///
/// Only the fields shown in the detail view are kept; the rest of the
/// payload (address, company, ...) is ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}
