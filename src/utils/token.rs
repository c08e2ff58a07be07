use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use crate::error::{Error, Result};
use crate::middleware::auth::Claims;

/// Issues an HS256 bearer token whose subject is the user id.
pub fn create_access_token(user_id: i32, secret: &[u8], ttl_days: i64) -> Result<String> {
    let exp = Utc::now() + Duration::days(ttl_days);
    let claims = Claims {
        sub: user_id.to_string(),
        exp: exp.timestamp() as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
        .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    #[test]
    fn token_round_trips_with_user_id_subject() {
        let secret = b"test-secret";
        let token = create_access_token(42, secret, 30).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let data = decode::<Claims>(&token, &DecodingKey::from_secret(secret), &validation)
            .expect("token should decode with the same secret");

        assert_eq!(data.claims.sub, "42");
        assert_eq!(data.claims.user_id().unwrap(), 42);
    }

    #[test]
    fn token_rejects_wrong_secret() {
        let token = create_access_token(7, b"secret-a", 30).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let result =
            decode::<Claims>(&token, &DecodingKey::from_secret(b"secret-b"), &validation);
        assert!(result.is_err());
    }
}
