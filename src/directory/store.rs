//! The directory: in-memory registries plus the persistence discipline.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::config::DirectoryConfig;
use crate::error::DirectoryError;
use crate::storage::KeyValueStore;

use super::auth;
use super::types::{
    Account, AccountId, AuthResponse, Credentials, DirectoryStats, NewProduct,
    OrganizationRegistration, Product, UserType, WalletLogin, WalletRegistration,
};

// Snapshot keys in the substrate. The counters are persisted alongside
// the snapshots so ids stay monotonic across restarts instead of being
// re-derived from collection length.
const ACCOUNTS_KEY: &str = "mockUsers";
const PRODUCTS_KEY: &str = "mockProducts";
const ACCOUNT_COUNTER_KEY: &str = "mockNextUserId";
const PRODUCT_COUNTER_KEY: &str = "mockNextProductId";

/// Account & product directory.
///
/// The in-memory registries are authoritative; the substrate holds full
/// JSON snapshots rewritten after every mutation and read back once when
/// the directory is opened. The caller owns the instance and injects the
/// substrate, so tests and embedding applications choose their own
/// backing store.
pub struct Directory {
    accounts: Vec<Account>,
    products: Vec<Product>,
    next_account_id: AccountId,
    next_product_id: u64,
    latency: Duration,
    storage: Arc<dyn KeyValueStore>,
}

impl Directory {
    /// Open the directory over a substrate, restoring any prior snapshot.
    pub fn open(
        storage: Arc<dyn KeyValueStore>,
        config: &DirectoryConfig,
    ) -> Result<Self, DirectoryError> {
        let accounts: Vec<Account> =
            load_json(storage.as_ref(), ACCOUNTS_KEY)?.unwrap_or_default();
        let products: Vec<Product> =
            load_json(storage.as_ref(), PRODUCTS_KEY)?.unwrap_or_default();

        // Counter keys may be absent the first time an existing snapshot
        // is opened; seed from the snapshot length in that case.
        let next_account_id = load_json(storage.as_ref(), ACCOUNT_COUNTER_KEY)?
            .unwrap_or(accounts.len() as AccountId + 1);
        let next_product_id = load_json(storage.as_ref(), PRODUCT_COUNTER_KEY)?
            .unwrap_or(products.len() as u64 + 1);

        info!(
            "Directory opened: {} accounts, {} products",
            accounts.len(),
            products.len()
        );

        Ok(Self {
            accounts,
            products,
            next_account_id,
            next_product_id,
            latency: Duration::from_millis(config.simulated_latency_ms),
            storage,
        })
    }

    // ===== Registration =====

    pub async fn register_organization(
        &mut self,
        reg: OrganizationRegistration,
    ) -> Result<AuthResponse, DirectoryError> {
        self.simulate_latency().await;

        require(&reg.username, "username")?;
        require(&reg.organization_name, "organization name")?;
        require(&reg.email, "email")?;
        require(&reg.password, "password")?;

        if self.accounts.iter().any(|a| a.username == reg.username) {
            warn!("Registration rejected: username '{}' taken", reg.username);
            return Err(DirectoryError::conflict(format!(
                "Username '{}' already registered",
                reg.username
            )));
        }
        if self
            .accounts
            .iter()
            .any(|a| a.email.as_deref() == Some(reg.email.as_str()))
        {
            warn!("Registration rejected: email '{}' taken", reg.email);
            return Err(DirectoryError::conflict(format!(
                "Email '{}' already registered",
                reg.email
            )));
        }

        let account = Account {
            id: self.next_account_id,
            username: reg.username,
            email: Some(reg.email),
            password: Some(reg.password),
            wallet_address: None,
            user_type: UserType::Organization,
            organization_name: Some(reg.organization_name),
            industry: reg.industry,
            size: reg.size,
            website: reg.website,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.commit_account(account)
    }

    pub async fn register_wallet(
        &mut self,
        reg: WalletRegistration,
    ) -> Result<AuthResponse, DirectoryError> {
        self.simulate_latency().await;

        require(&reg.wallet_address, "wallet address")?;

        if self
            .accounts
            .iter()
            .any(|a| a.wallet_address.as_deref() == Some(reg.wallet_address.as_str()))
        {
            warn!("Registration rejected: wallet '{}' taken", reg.wallet_address);
            return Err(DirectoryError::conflict(format!(
                "Wallet '{}' already registered",
                reg.wallet_address
            )));
        }

        let short: String = reg.wallet_address.chars().take(8).collect();
        let account = Account {
            id: self.next_account_id,
            username: format!("wallet_{}", short),
            email: None,
            password: None,
            wallet_address: Some(reg.wallet_address),
            user_type: reg.user_type.unwrap_or(UserType::Organization),
            organization_name: None,
            industry: None,
            size: None,
            website: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        self.commit_account(account)
    }

    // ===== Authentication =====

    /// Exact-match credential login. Wallet-only accounts have no
    /// password and can never authenticate through this path.
    pub async fn login(&self, creds: Credentials) -> Result<AuthResponse, DirectoryError> {
        self.simulate_latency().await;

        let account = self.accounts.iter().find(|a| {
            a.username == creds.username
                && a.password.as_deref() == Some(creds.password.as_str())
        });

        match account {
            Some(account) => {
                info!("Login successful for '{}'", account.username);
                Ok(auth_response(account.clone()))
            }
            None => {
                warn!("Login failed for '{}'", creds.username);
                Err(DirectoryError::auth("Invalid username or password"))
            }
        }
    }

    pub async fn login_with_wallet(
        &self,
        login: WalletLogin,
    ) -> Result<AuthResponse, DirectoryError> {
        self.simulate_latency().await;

        require(&login.wallet_address, "wallet address")?;
        require(&login.signature, "wallet signature")?;

        let account = self
            .accounts
            .iter()
            .find(|a| a.wallet_address.as_deref() == Some(login.wallet_address.as_str()))
            .ok_or_else(|| {
                warn!("Wallet login failed: '{}' not registered", login.wallet_address);
                DirectoryError::auth("Wallet not registered. Please register first.")
            })?;

        auth::check_signature(&login.signature)?;

        if let Some(message) = &login.message {
            info!("Wallet login message: {}", message);
        }
        info!("Wallet login successful for '{}'", account.username);
        Ok(auth_response(account.clone()))
    }

    // ===== Products =====

    pub async fn add_product(&mut self, new: NewProduct) -> Result<Product, DirectoryError> {
        self.simulate_latency().await;

        require(&new.name, "name")?;
        require(&new.category, "category")?;
        require(&new.batch_number, "batch number")?;
        require(&new.production_date, "production date")?;

        if new.quantity.is_some_and(|q| q < 0) {
            return Err(DirectoryError::validation("Quantity cannot be negative"));
        }

        let product = Product {
            id: format!("mock-product-{}", self.next_product_id),
            name: new.name,
            category: new.category,
            quantity: new.quantity.unwrap_or(0),
            manufacturer: new.manufacturer.unwrap_or_else(|| "Unknown".to_string()),
            batch_number: new.batch_number,
            production_date: new.production_date,
            expiry_date: new.expiry_date,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let created = product.clone();
        self.products.push(product);
        self.next_product_id += 1;
        if let Err(e) = self.persist_products() {
            self.products.pop();
            self.next_product_id -= 1;
            return Err(e);
        }

        info!("Product '{}' added ({})", created.name, created.id);
        Ok(created)
    }

    // ===== Lookups =====

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn account_by_id(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn account_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.username == username)
    }

    pub fn account_by_wallet(&self, wallet_address: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.wallet_address.as_deref() == Some(wallet_address))
    }

    pub fn stats(&self) -> DirectoryStats {
        DirectoryStats {
            total_accounts: self.accounts.len(),
            organization_accounts: self
                .accounts
                .iter()
                .filter(|a| a.is_organization())
                .count(),
            wallet_accounts: self
                .accounts
                .iter()
                .filter(|a| a.wallet_address.is_some())
                .count(),
            next_account_id: self.next_account_id,
        }
    }

    // ===== Maintenance =====

    /// Empty the account registry and restart account ids at 1. Products
    /// are deliberately left untouched; this mirrors the asymmetric reset
    /// the front end relies on.
    pub async fn clear_accounts(&mut self) -> Result<(), DirectoryError> {
        self.simulate_latency().await;

        self.storage.remove(ACCOUNTS_KEY)?;
        self.storage.remove(ACCOUNT_COUNTER_KEY)?;
        self.accounts.clear();
        self.next_account_id = 1;

        warn!("Account registry cleared; products left in place");
        Ok(())
    }

    // ===== Internals =====

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Append + counter bump + persist, all or nothing: a failed write to
    /// the substrate rolls the in-memory change back before returning.
    fn commit_account(&mut self, account: Account) -> Result<AuthResponse, DirectoryError> {
        let created = account.clone();
        self.accounts.push(account);
        self.next_account_id += 1;
        if let Err(e) = self.persist_accounts() {
            self.accounts.pop();
            self.next_account_id -= 1;
            return Err(e);
        }

        info!("Account '{}' registered (id {})", created.username, created.id);
        Ok(auth_response(created))
    }

    fn persist_accounts(&self) -> Result<(), DirectoryError> {
        self.storage
            .put(ACCOUNTS_KEY, &serde_json::to_vec(&self.accounts)?)?;
        self.storage
            .put(ACCOUNT_COUNTER_KEY, &serde_json::to_vec(&self.next_account_id)?)
    }

    fn persist_products(&self) -> Result<(), DirectoryError> {
        self.storage
            .put(PRODUCTS_KEY, &serde_json::to_vec(&self.products)?)?;
        self.storage
            .put(PRODUCT_COUNTER_KEY, &serde_json::to_vec(&self.next_product_id)?)
    }
}

fn auth_response(account: Account) -> AuthResponse {
    AuthResponse {
        access_token: auth::issue_token(account.id),
        token_type: "bearer".to_string(),
        user_type: account.user_type,
        username: account.username.clone(),
        account,
    }
}

fn require(value: &str, field: &str) -> Result<(), DirectoryError> {
    if value.is_empty() {
        return Err(DirectoryError::validation(format!(
            "Missing required field: {}",
            field
        )));
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, DirectoryError> {
    match storage.get(key)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}
