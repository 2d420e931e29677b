use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Farmer,
    Customer,
    Driver,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Farmer => "FARMER",
            Role::Customer => "CUSTOMER",
            Role::Driver => "DRIVER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FARMER" => Ok(Role::Farmer),
            "CUSTOMER" => Ok(Role::Customer),
            "DRIVER" => Ok(Role::Driver),
            "ADMIN" => Ok(Role::Admin),
            other => Err(DomainError::InvalidInput(format!("unknown role '{other}'"))),
        }
    }
}

/// The authenticated user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_role(&self, role: Role) -> Result<(), DomainError> {
        if self.role == role {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "{} role required, got {}",
                role, self.role
            )))
        }
    }

    /// Passes for admins and for the user identified by `owner_id`.
    pub fn require_owner_or_admin(&self, owner_id: Uuid) -> Result<(), DomainError> {
        if self.is_admin() || self.id == owner_id {
            Ok(())
        } else {
            Err(DomainError::Forbidden("not the owner".to_string()))
        }
    }
}
