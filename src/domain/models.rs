//! Account data model.

use serde::{Deserialize, Serialize};

/// Account as stored, with the identifier assigned by persistence.
///
/// `password` always holds the hash.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountModel {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Data required to register an account.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddAccountModel {
    pub name: String,
    pub email: String,
    pub password: String,
}
