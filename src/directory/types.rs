//! Entity and request/response definitions for the directory.

use serde::{Deserialize, Serialize};

/// Account identifier - sequential, never reused.
pub type AccountId = u64;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Individual,
    Organization,
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserType::Individual => write!(f, "individual"),
            UserType::Organization => write!(f, "organization"),
        }
    }
}

/// A registered identity, either credential-based or wallet-based.
///
/// Credentialed accounts carry username/email/password; wallet-only
/// accounts carry a wallet address and a username synthesized from it.
/// Records are immutable once created.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: Option<String>,
    // Cleartext, reproducing the mock it replaces. Not production auth.
    pub password: Option<String>,
    pub wallet_address: Option<String>,
    pub user_type: UserType,
    pub organization_name: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub website: Option<String>,
    pub created_at: String,
}

impl Account {
    /// True when the wallet address is the sole identity anchor.
    pub fn is_wallet_only(&self) -> bool {
        self.wallet_address.is_some() && self.password.is_none()
    }

    pub fn is_organization(&self) -> bool {
        matches!(self.user_type, UserType::Organization)
    }
}

/// A tracked product batch.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub manufacturer: String,
    pub batch_number: String,
    pub production_date: String,
    pub expiry_date: Option<String>,
    pub created_at: String,
}

/// Input for `register_organization`.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct OrganizationRegistration {
    pub username: String,
    pub organization_name: String,
    pub email: String,
    pub password: String,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub website: Option<String>,
}

/// Input for `register_wallet`.
#[derive(Deserialize, Clone, Debug)]
pub struct WalletRegistration {
    pub wallet_address: String,
    pub user_type: Option<UserType>,
}

/// Input for `login`.
#[derive(Deserialize, Clone, Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Input for `login_with_wallet`. `message` is whatever the wallet
/// provider asked the user to sign; it is logged but not verified here.
#[derive(Deserialize, Clone, Debug)]
pub struct WalletLogin {
    pub wallet_address: String,
    pub signature: String,
    pub message: Option<String>,
}

/// Input for `add_product`.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub quantity: Option<i64>,
    pub manufacturer: Option<String>,
    pub batch_number: String,
    pub production_date: String,
    pub expiry_date: Option<String>,
}

/// Returned by every successful registration or login.
#[derive(Serialize, Clone, Debug)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_type: UserType,
    pub username: String,
    pub account: Account,
}

/// Registry counters, for admin and test tooling.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct DirectoryStats {
    pub total_accounts: usize,
    pub organization_accounts: usize,
    pub wallet_accounts: usize,
    pub next_account_id: AccountId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_only_detection() {
        let account = Account {
            id: 1,
            username: "wallet_0xabc123".to_string(),
            email: None,
            password: None,
            wallet_address: Some("0xabc1234567".to_string()),
            user_type: UserType::Organization,
            organization_name: None,
            industry: None,
            size: None,
            website: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        assert!(account.is_wallet_only());
        assert!(account.is_organization());
    }

    #[test]
    fn test_user_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserType::Organization).unwrap(),
            "\"organization\""
        );
        assert_eq!(UserType::Individual.to_string(), "individual");
    }
}
