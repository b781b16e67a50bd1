use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload: the user id plus the validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // user ID
    pub iat: usize, // issued at (unix timestamp)
    pub exp: usize, // expires at (unix timestamp)
}
