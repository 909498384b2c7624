//! Users, roles and privileges.

use serde::{Deserialize, Serialize};

use super::expression::Literal;
use super::name::{Ident, UserName};
use super::options::UserResources;
use crate::lexer::Span;

/// How a new user authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserAuth {
    /// `IDENTIFIED BY [PASSWORD] '..'`
    Password {
        /// The password text.
        password: String,
        /// PASSWORD keyword: the text is already hashed.
        hashed: bool,
    },
    /// `IDENTIFIED WITH plugin [BY | AS '..']`
    Plugin {
        /// Plugin name.
        plugin: Ident,
        /// Authentication string.
        auth: Option<String>,
    },
}

/// `user [IDENTIFIED ..]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSpec {
    /// Account.
    pub user: UserName,
    /// Authentication.
    pub auth: Option<UserAuth>,
    /// Source span.
    pub span: Span,
}

/// One `CIPHER | ISSUER | SUBJECT '..'` requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlsOption {
    /// CIPHER, ISSUER or SUBJECT.
    pub name: String,
    /// Required value.
    pub value: Literal,
    /// Source span.
    pub span: Span,
}

/// `REQUIRE ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TlsRequirement {
    None,
    Ssl,
    X509,
    Options(Vec<TlsOption>),
}

/// `CREATE USER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Accounts.
    pub users: Vec<UserSpec>,
    /// TLS requirement.
    pub require: Option<TlsRequirement>,
    /// `WITH` resource limits.
    pub resources: UserResources,
    /// Source span.
    pub span: Span,
}

/// `DROP USER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropUser {
    /// IF EXISTS.
    pub if_exists: bool,
    /// Accounts.
    pub users: Vec<UserName>,
    /// Source span.
    pub span: Span,
}

/// `from TO to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRename {
    pub from: UserName,
    pub to: UserName,
    pub span: Span,
}

/// `RENAME USER`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameUser {
    /// Renames in order.
    pub renames: Vec<UserRename>,
    /// Source span.
    pub span: Span,
}

/// `SET PASSWORD [FOR user] = ..` and `ALTER USER user IDENTIFIED BY ..`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPassword {
    /// Account; the current user when absent.
    pub user: Option<UserName>,
    /// New password text.
    pub password: String,
    /// Written as `PASSWORD('..')`.
    pub function: bool,
    /// Source span.
    pub span: Span,
}

/// `ALTER USER .. ACCOUNT LOCK | UNLOCK`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockUser {
    /// IF EXISTS.
    pub if_exists: bool,
    /// Accounts.
    pub users: Vec<UserName>,
    /// LOCK (true) or UNLOCK (false).
    pub locked: bool,
    /// Source span.
    pub span: Span,
}

/// `CREATE ROLE` and `DROP ROLE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStatement {
    /// IF [NOT] EXISTS.
    pub if_exists: bool,
    /// Roles.
    pub roles: Vec<UserName>,
    /// Source span.
    pub span: Span,
}

/// Which roles SET ROLE activates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleSelection {
    Default,
    None,
    All {
        /// `EXCEPT r, ..`
        except: Vec<UserName>,
    },
    Roles(Vec<UserName>),
}

/// `SET ROLE ..` and `SET DEFAULT ROLE .. TO users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetRole {
    /// SET DEFAULT ROLE.
    pub default: bool,
    /// Selected roles.
    pub roles: RoleSelection,
    /// Target accounts of SET DEFAULT ROLE.
    pub users: Vec<UserName>,
    /// Source span.
    pub span: Span,
}

/// A privilege, optionally restricted to columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Privilege {
    /// Privilege words, upper case and space separated.
    pub name: String,
    /// Column restriction.
    pub columns: Vec<Ident>,
    /// Source span.
    pub span: Span,
}

/// Object class named before the privilege level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantObjectKind {
    Table,
    Function,
    Procedure,
}

/// What a privilege applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrivilegeLevel {
    /// `*.*`
    Global,
    /// `*`
    CurrentDatabase,
    /// `db.*`
    Database(Ident),
    /// `[db.]object`
    Object {
        schema: Option<Ident>,
        name: Ident,
    },
}

/// Privileges on an object, or granted roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantTarget {
    Privileges {
        /// Granted privileges.
        privileges: Vec<Privilege>,
        /// Object class.
        object_kind: Option<GrantObjectKind>,
        /// Privilege level.
        level: PrivilegeLevel,
    },
    Roles(Vec<UserName>),
}

/// `WITH GRANT OPTION` or `WITH ADMIN OPTION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantOption {
    Grant,
    Admin,
}

/// `GRANT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// What is granted.
    pub target: GrantTarget,
    /// Grantees.
    pub grantees: Vec<UserSpec>,
    /// WITH .. OPTION.
    pub option: Option<GrantOption>,
    /// Source span.
    pub span: Span,
}

/// `REVOKE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revoke {
    /// What is revoked.
    pub target: GrantTarget,
    /// Accounts.
    pub users: Vec<UserName>,
    /// Source span.
    pub span: Span,
}
