use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

use crate::models::{auth::Claims, user::UserRole};

/// Sign an HS256 access token for `user_id`. Login lives outside this
/// service; the token tool and the tests use this to mint credentials.
pub fn issue_access_token(
    user_id: &str,
    role: UserRole,
    secret: &str,
    ttl_seconds: u64,
) -> anyhow::Result<String> {
    anyhow::ensure!(!user_id.is_empty(), "user id must not be empty");
    let now = Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        role,
        iat: now,
        exp: now + ttl_seconds as usize,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}
