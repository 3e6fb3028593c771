use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload used for authentication. The signature, not secrecy of these
/// fields, is the trust boundary: nothing here is trusted before
/// verification passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,        // user ID
    pub username: String, // denormalized identity claims
    pub email: String,
    pub iat: usize,       // issued at (unix timestamp)
    pub exp: usize,       // expires at (unix timestamp)
    pub iss: String,      // issuer
    pub aud: String,      // audience
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_roundtrip_through_json() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            username: "carol".into(),
            email: "carol@example.com".into(),
            iat: 1_700_000_000,
            exp: 1_700_003_600,
            iss: "photofeed".into(),
            aud: "photofeed-users".into(),
        };
        let json = serde_json::to_string(&claims).unwrap();
        let back: Claims = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sub, claims.sub);
        assert_eq!(back.username, "carol");
        assert_eq!(back.email, "carol@example.com");
        assert_eq!(back.exp, claims.exp);
    }
}
