//! Token issuance and the wallet signature placeholder check.

use crate::error::DirectoryError;

use super::types::AccountId;

/// Shortest signature string the mock check accepts.
pub const MIN_SIGNATURE_LEN: usize = 10;

/// Issue a fresh session token for an account. The token encodes the
/// owning account id and the issuance instant; it is handed to callers
/// and never stored or validated by the directory itself.
pub fn issue_token(account_id: AccountId) -> String {
    format!(
        "mock_jwt_{}_{}",
        account_id,
        chrono::Utc::now().timestamp_millis()
    )
}

/// Placeholder stand-in for signature verification: accepts any string of
/// at least MIN_SIGNATURE_LEN characters. Real deployments must verify
/// the signature against the signed message cryptographically.
pub fn check_signature(signature: &str) -> Result<(), DirectoryError> {
    if signature.chars().count() < MIN_SIGNATURE_LEN {
        return Err(DirectoryError::validation("Invalid signature"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_embeds_account_id() {
        let token = issue_token(42);
        assert!(token.starts_with("mock_jwt_42_"));

        let millis: i64 = token
            .strip_prefix("mock_jwt_42_")
            .unwrap()
            .parse()
            .unwrap();
        assert!(millis > 0);
    }

    #[test]
    fn test_signature_length_boundary() {
        assert!(check_signature("123456789").is_err());
        assert!(check_signature("1234567890").is_ok());
        assert!(check_signature("").is_err());
    }
}
