//! Account & product directory.
//!
//! Owns the in-memory registry of registered accounts and tracked
//! products, mirrors it to the injected key-value substrate, and exposes
//! registration, authentication, and product-creation operations.

pub mod auth;
pub mod store;
pub mod types;

pub use store::Directory;
pub use types::{
    Account, AccountId, AuthResponse, Credentials, DirectoryStats, NewProduct,
    OrganizationRegistration, Product, UserType, WalletLogin, WalletRegistration,
};
