use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Club role attached to every account
///
/// The set is closed. Only coaches and admins may manage the course catalog
/// and other members' accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular club member, assigned on self-registration
    Member,
    /// Coach running courses
    Coach,
    /// Club administrator
    Admin,
}

impl Role {
    /// Role given to accounts created through `/inscription`
    pub const DEFAULT: Role = Role::Member;

    /// Name stored in `role.nom_role`
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Coach => "coach",
            Role::Admin => "admin",
        }
    }

    /// Whether this role may create, update or delete courses
    ///
    /// # Example
    /// ```
    /// use club_canin_api::domain::user::Role;
    ///
    /// assert!(Role::Coach.can_manage_courses());
    /// assert!(!Role::Member.can_manage_courses());
    /// ```
    pub fn can_manage_courses(&self) -> bool {
        matches!(self, Role::Coach | Role::Admin)
    }

    /// Whether this role may create or update user records
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Coach | Role::Admin)
    }

    /// Whether a requester holding this role may delete the target account
    ///
    /// Admins may delete anyone; coaches may only delete their own account.
    pub fn can_delete_user(&self, requester_id: i64, target_id: i64) -> bool {
        match self {
            Role::Admin => true,
            Role::Coach => requester_id == target_id,
            Role::Member => false,
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Role::Member),
            "coach" => Ok(Role::Coach),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
