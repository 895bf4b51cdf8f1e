use sha2::{Digest, Sha256, Sha512};
use uuid::Uuid;

/// Password complexity rules enforced on first-password creation
pub struct PasswordRules {
    pub min_length: usize,
    pub max_length: usize,
    pub require_uppercase: bool,
    pub require_lowercase: bool,
    pub require_number: bool,
    pub require_special_character: bool,
}

pub const PASSWORD_RULES: PasswordRules = PasswordRules {
    min_length: 8,
    max_length: 100,
    require_uppercase: true,
    require_lowercase: true,
    require_number: true,
    require_special_character: true,
};

const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Hash a raw password to its stored Sha512 hex form
pub fn hash_user_password(password: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hash an activation token; only the hash is persisted
pub fn hash_activation_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Mint an opaque session token. Random so tokens are not guessable.
pub fn generate_session_token() -> String {
    format!("session_{}", Uuid::new_v4().simple())
}

/// Mint a short plain activation token for emailing to the account owner
pub fn generate_activation_token() -> String {
    let id = Uuid::new_v4().simple().to_string();
    id[..12].to_string()
}

/// Validate a raw password against the complexity rules
pub fn raw_password_is_valid(password: &str) -> bool {
    let rules = &PASSWORD_RULES;

    if password.is_empty() {
        return false;
    }
    if password.len() < rules.min_length || password.len() > rules.max_length {
        return false;
    }
    if rules.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
        return false;
    }
    if rules.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
        return false;
    }
    if rules.require_number && !password.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    if rules.require_special_character
        && !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c))
    {
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_deterministic_sha512_hex() {
        let a = hash_user_password("correct horse");
        let b = hash_user_password("correct horse");
        assert_eq!(a, b);
        assert_eq!(a.len(), 128);
        assert_ne!(a, hash_user_password("wrong horse"));
    }

    #[test]
    fn activation_token_hash_is_sha256_hex() {
        let h = hash_activation_token("abc123");
        assert_eq!(h.len(), 64);
        assert_eq!(h, hash_activation_token("abc123"));
    }

    #[test]
    fn session_tokens_are_unique() {
        assert_ne!(generate_session_token(), generate_session_token());
        assert!(generate_session_token().starts_with("session_"));
    }

    #[test]
    fn password_rules_enforced() {
        assert!(raw_password_is_valid("Str0ng!pass"));
        assert!(!raw_password_is_valid(""));
        assert!(!raw_password_is_valid("Sh0rt!a"));
        assert!(!raw_password_is_valid("alllowercase1!"));
        assert!(!raw_password_is_valid("ALLUPPERCASE1!"));
        assert!(!raw_password_is_valid("NoNumbers!!"));
        assert!(!raw_password_is_valid("NoSpecial123"));
    }
}
