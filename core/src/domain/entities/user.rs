//! User aggregate root.
//!
//! The aggregate exclusively owns its role set and status: all mutation
//! goes through methods on `User`, which also refresh `updated_at`.
//! Equality is by identity alone, never by attribute values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::domain::value_objects::{Email, EncodedPassword, UserId};
use crate::errors::UserError;

/// Role a user holds in the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// A customer purchasing goods
    Buyer,
    /// A merchant listing goods
    Seller,
    /// A platform administrator
    Admin,
}

impl UserRole {
    /// Canonical name used in storage and token claims
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Buyer => "BUYER",
            UserRole::Seller => "SELLER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "BUYER" => Ok(UserRole::Buyer),
            "SELLER" => Ok(UserRole::Seller),
            "ADMIN" => Ok(UserRole::Admin),
            other => Err(format!("Unknown user role: {}", other)),
        }
    }
}

/// Account status of a user
///
/// `Suspended` has no transition method here; it only appears through
/// reconstitution from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    /// Canonical name used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
            UserStatus::Suspended => "SUSPENDED",
        }
    }
}

impl FromStr for UserStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ACTIVE" => Ok(UserStatus::Active),
            "INACTIVE" => Ok(UserStatus::Inactive),
            "SUSPENDED" => Ok(UserStatus::Suspended),
            other => Err(format!("Unknown user status: {}", other)),
        }
    }
}

/// User aggregate root
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    password: EncodedPassword,
    roles: BTreeSet<UserRole>,
    status: UserStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user (registration)
    ///
    /// Assigns a fresh identity, `Active` status, and a single initial role;
    /// `created_at` and `updated_at` start equal.
    pub fn register(email: Email, password: EncodedPassword, role: UserRole) -> Self {
        let now = Utc::now();
        let mut roles = BTreeSet::new();
        roles.insert(role);

        Self {
            id: UserId::generate(),
            email,
            password,
            roles,
            status: UserStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rehydrate a user from storage
    ///
    /// Trusts the caller to supply a previously-valid state; no invariants
    /// are re-derived and no side effects occur.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: UserId,
        email: Email,
        password: EncodedPassword,
        roles: BTreeSet<UserRole>,
        status: UserStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password,
            roles,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &EncodedPassword {
        &self.password
    }

    /// Read-only view of the role set
    pub fn roles(&self) -> &BTreeSet<UserRole> {
        &self.roles
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace the stored password hash
    pub fn change_password(&mut self, new_password: EncodedPassword) {
        self.password = new_password;
        self.touch();
    }

    /// Add a role; a duplicate is a no-op and leaves `updated_at` untouched
    pub fn add_role(&mut self, role: UserRole) {
        if self.roles.insert(role) {
            self.touch();
        }
    }

    /// Remove a role
    ///
    /// Fails if the role is not assigned, or if removal would leave the
    /// user without any role.
    pub fn remove_role(&mut self, role: UserRole) -> Result<(), UserError> {
        if !self.roles.contains(&role) {
            return Err(UserError::RoleNotAssigned {
                role: role.to_string(),
            });
        }
        if self.roles.len() <= 1 {
            return Err(UserError::RoleRequired);
        }

        self.roles.remove(&role);
        self.touch();
        Ok(())
    }

    /// Activate the account; repeated calls are allowed
    pub fn activate(&mut self) {
        self.status = UserStatus::Active;
        self.touch();
    }

    /// Deactivate the account; repeated calls are allowed
    pub fn deactivate(&mut self) {
        self.status = UserStatus::Inactive;
        self.touch();
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_buyer(&self) -> bool {
        self.has_role(UserRole::Buyer)
    }

    pub fn is_seller(&self) -> bool {
        self.has_role(UserRole::Seller)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

// Two instances with the same id are the same logical entity, even when
// other fields diverge.
impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for User {}

impl std::hash::Hash for User {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
