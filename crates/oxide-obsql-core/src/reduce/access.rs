//! Users, roles, passwords and privileges.

use super::children::Children;
use super::fragment::Fragment;
use super::table::ReductionTable;
use crate::ast::{
    unescape, CreateUser, DropUser, Expr, Grant, GrantObjectKind, GrantOption, GrantTarget, Ident,
    LockUser, Privilege, PrivilegeLevel, RenameUser, Revoke, RoleSelection, RoleStatement,
    SetPassword, SetRole, Statement, TlsOption, TlsRequirement, UserAuth, UserName, UserRename,
    UserSpec,
};
use crate::cst::RuleKind;
use crate::lexer::{Keyword, TokenKind};

pub(super) fn register(table: &mut ReductionTable) {
    table.statement(RuleKind::CreateUserStmt, create_user);
    table.statement(RuleKind::DropUserStmt, drop_user);
    table.statement(RuleKind::RenameUserStmt, rename_user);
    table.statement(RuleKind::SetPasswordStmt, set_password);
    table.statement(RuleKind::LockUserStmt, lock_user);
    table.statement(RuleKind::CreateRoleStmt, |c| {
        Some(Statement::CreateRole(role_statement(c)).into())
    });
    table.statement(RuleKind::DropRoleStmt, |c| {
        Some(Statement::DropRole(role_statement(c)).into())
    });
    table.statement(RuleKind::SetRoleStmt, set_role);
    table.statement(RuleKind::GrantStmt, grant);
    table.statement(RuleKind::RevokeStmt, revoke);
    table.register(RuleKind::UserSpecification, user_specification);
    table.register(RuleKind::TlsOption, tls_option);
    table.register(RuleKind::RenameInfo, rename_info);
    table.register(RuleKind::RoleOrPriv, role_or_privilege);
    table.register(RuleKind::PrivLevel, privilege_level);
}

/// The unescaped text of the first remaining string terminal.
fn password(children: &Children<'_>) -> Option<String> {
    children
        .tokens()
        .find(|(_, t)| t.kind == TokenKind::String)
        .map(|(_, t)| unescape(&t.text))
}

fn user_specification(children: &mut Children<'_>) -> Option<Fragment> {
    let user: UserName = children.require("a user name");
    let auth = if !children.has_word("IDENTIFIED") {
        None
    } else if children.has_keyword(Keyword::With) {
        Some(UserAuth::Plugin {
            plugin: children.require("an authentication plugin"),
            auth: password(children),
        })
    } else if let Some(password) = password(children) {
        Some(UserAuth::Password {
            password,
            hashed: children.has_word("PASSWORD"),
        })
    } else {
        children.mismatch("expected a password");
        None
    };
    Some(
        UserSpec {
            user,
            auth,
            span: children.span(),
        }
        .into(),
    )
}

fn tls_option(children: &mut Children<'_>) -> Option<Fragment> {
    let name = children.first_token()?.text.to_ascii_uppercase();
    let Some(Expr::Literal { value, .. }) = children.take::<Expr>() else {
        children.mismatch(format!("expected a string after {name}"));
        return None;
    };
    Some(
        TlsOption {
            name,
            value,
            span: children.span(),
        }
        .into(),
    )
}

fn require(children: &Children<'_>, options: Vec<TlsOption>) -> Option<TlsRequirement> {
    if !options.is_empty() {
        Some(TlsRequirement::Options(options))
    } else if children.has_word("SSL") {
        Some(TlsRequirement::Ssl)
    } else if children.has_word("X509") {
        Some(TlsRequirement::X509)
    } else if children.has_word("REQUIRE") {
        Some(TlsRequirement::None)
    } else {
        None
    }
}

fn create_user(children: &mut Children<'_>) -> Option<Fragment> {
    let users: Vec<UserSpec> = children.take_all();
    if users.is_empty() {
        children.mismatch("expected a user");
    }
    let options = children.take_all::<TlsOption>();
    let create = CreateUser {
        if_not_exists: children.has_keyword(Keyword::Exists),
        users,
        require: require(children, options),
        resources: children.take().unwrap_or_default(),
        span: children.span(),
    };
    Some(Statement::CreateUser(Box::new(create)).into())
}

fn drop_user(children: &mut Children<'_>) -> Option<Fragment> {
    let drop = DropUser {
        if_exists: children.has_keyword(Keyword::Exists),
        users: children.take_all(),
        span: children.span(),
    };
    Some(Statement::DropUser(drop).into())
}

fn rename_info(children: &mut Children<'_>) -> Option<Fragment> {
    Some(
        UserRename {
            from: children.require("a user name"),
            to: children.require("a new user name"),
            span: children.span(),
        }
        .into(),
    )
}

fn rename_user(children: &mut Children<'_>) -> Option<Fragment> {
    let rename = RenameUser {
        renames: children.take_all(),
        span: children.span(),
    };
    Some(Statement::RenameUser(rename).into())
}

/// Both `SET PASSWORD [FOR user] = ..` and `ALTER USER user IDENTIFIED BY ..`.
fn set_password(children: &mut Children<'_>) -> Option<Fragment> {
    let Some(password) = password(children) else {
        children.mismatch("expected a password");
        return Some(Statement::Error { span: children.span() }.into());
    };
    let set = SetPassword {
        user: children.take(),
        password,
        function: children.has_token(&TokenKind::LeftParen),
        span: children.span(),
    };
    Some(Statement::SetPassword(set).into())
}

fn lock_user(children: &mut Children<'_>) -> Option<Fragment> {
    let lock = LockUser {
        if_exists: children.has_keyword(Keyword::Exists),
        users: children.take_all(),
        locked: children.has_keyword(Keyword::Lock),
        span: children.span(),
    };
    Some(Statement::LockUser(lock).into())
}

fn role_statement(children: &mut Children<'_>) -> RoleStatement {
    RoleStatement {
        if_exists: children.has_keyword(Keyword::Exists),
        roles: children.take_all(),
        span: children.span(),
    }
}

fn set_role(children: &mut Children<'_>) -> Option<Fragment> {
    let default = children
        .token_at(1)
        .is_some_and(|t| t.is_keyword(Keyword::Default));
    let to = children.find_keyword(Keyword::To).unwrap_or(children.len());
    let selector = children
        .find_keyword(Keyword::Role)
        .and_then(|i| children.token_at(i + 1))
        .map(|t| t.text.to_ascii_uppercase());
    let roles = children.take_all_range::<UserName>(0, to);
    let roles = match selector.as_deref() {
        Some("DEFAULT") => RoleSelection::Default,
        Some("NONE") => RoleSelection::None,
        Some("ALL") => RoleSelection::All { except: roles },
        _ => RoleSelection::Roles(roles),
    };
    let set = SetRole {
        default,
        roles,
        users: children.take_all_range(to, children.len()),
        span: children.span(),
    };
    Some(Statement::SetRole(set).into())
}

/// A granted privilege, or a granted role passed through as its name.
fn role_or_privilege(children: &mut Children<'_>) -> Option<Fragment> {
    if let Some(role) = children.take::<UserName>() {
        return Some(role.into());
    }
    let name = children.words().join(" ");
    if name.is_empty() {
        children.mismatch("expected a privilege");
        return None;
    }
    Some(
        Privilege {
            name,
            columns: children.take::<Vec<Ident>>().unwrap_or_default(),
            span: children.span(),
        }
        .into(),
    )
}

fn privilege_level(children: &mut Children<'_>) -> Option<Fragment> {
    let stars = children
        .tokens()
        .filter(|(_, t)| t.kind == TokenKind::Star)
        .count();
    let mut names: Vec<Ident> = children.take_all();
    let level = match (names.len(), stars) {
        (0, 2) => PrivilegeLevel::Global,
        (0, 1) => PrivilegeLevel::CurrentDatabase,
        (1, 1) => PrivilegeLevel::Database(names.remove(0)),
        (1, 0) => PrivilegeLevel::Object {
            schema: None,
            name: names.remove(0),
        },
        (2, 0) => {
            let name = names.remove(1);
            PrivilegeLevel::Object {
                schema: names.pop(),
                name,
            }
        }
        _ => {
            children.mismatch("expected a privilege level");
            return None;
        }
    };
    Some(level.into())
}

fn object_kind(children: &Children<'_>) -> Option<GrantObjectKind> {
    children.tokens().find_map(|(_, t)| match t.keyword() {
        Some(Keyword::Table) => Some(GrantObjectKind::Table),
        Some(Keyword::Function) => Some(GrantObjectKind::Function),
        Some(Keyword::Procedure) => Some(GrantObjectKind::Procedure),
        _ => None,
    })
}

/// Privileges on a level, or the role names that precede `end`.
fn grant_target(children: &mut Children<'_>, end: usize) -> GrantTarget {
    match children.take::<PrivilegeLevel>() {
        Some(level) => GrantTarget::Privileges {
            privileges: children.take_all(),
            object_kind: object_kind(children),
            level,
        },
        None => GrantTarget::Roles(children.take_all_range(0, end)),
    }
}

fn grant(children: &mut Children<'_>) -> Option<Fragment> {
    let to = children.find_keyword(Keyword::To).unwrap_or(children.len());
    let target = grant_target(children, to);
    let option = if !children.has_word("OPTION") {
        None
    } else if children.has_word("ADMIN") {
        Some(GrantOption::Admin)
    } else {
        Some(GrantOption::Grant)
    };
    let grantees: Vec<UserSpec> = children.take_all();
    if grantees.is_empty() {
        children.mismatch("expected a grantee");
    }
    let grant = Grant {
        target,
        grantees,
        option,
        span: children.span(),
    };
    Some(Statement::Grant(Box::new(grant)).into())
}

fn revoke(children: &mut Children<'_>) -> Option<Fragment> {
    let from = children.find_keyword(Keyword::From).unwrap_or(children.len());
    let revoke = Revoke {
        target: grant_target(children, from),
        users: children.take_all_range(from, children.len()),
        span: children.span(),
    };
    Some(Statement::Revoke(Box::new(revoke)).into())
}

#[cfg(test)]
mod tests {
    use super::super::testing::statement;
    use super::*;
    use crate::ast::UserResourceKey;

    #[test]
    fn test_create_user() {
        let Statement::CreateUser(create) = statement(
            "CREATE USER IF NOT EXISTS 'u1'@'%' IDENTIFIED BY 'pw', \
             u2 IDENTIFIED WITH mysql_native_password BY 'x', u3 \
             REQUIRE SSL WITH MAX_QUERIES_PER_HOUR 10",
        ) else {
            panic!("not a create user");
        };
        assert!(create.if_not_exists);
        assert_eq!(create.users.len(), 3);
        assert_eq!(create.users[0].user.user, "u1");
        assert_eq!(create.users[0].user.host.as_deref(), Some("%"));
        assert_eq!(
            create.users[0].auth,
            Some(UserAuth::Password {
                password: "pw".into(),
                hashed: false
            })
        );
        assert!(matches!(
            &create.users[1].auth,
            Some(UserAuth::Plugin { plugin, auth }) if plugin.value == "mysql_native_password"
                && auth.as_deref() == Some("x")
        ));
        assert!(create.users[2].auth.is_none());
        assert_eq!(create.require, Some(TlsRequirement::Ssl));
        assert_eq!(
            create.resources.text(UserResourceKey::MaxQueriesPerHour).as_deref(),
            Some("10")
        );
    }

    #[test]
    fn test_tls_options() {
        let Statement::CreateUser(create) =
            statement(
                "CREATE USER u IDENTIFIED BY PASSWORD '*AB' \
                 REQUIRE CIPHER 'c1' AND ISSUER 'i1'",
            )
        else {
            panic!("not a create user");
        };
        assert!(matches!(
            &create.users[0].auth,
            Some(UserAuth::Password { hashed: true, .. })
        ));
        let Some(TlsRequirement::Options(options)) = &create.require else {
            panic!("expected TLS options");
        };
        let names: Vec<_> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["CIPHER", "ISSUER"]);
        assert_eq!(options[0].value.string_value().as_deref(), Some("c1"));
    }

    #[test]
    fn test_drop_and_rename_users() {
        let Statement::DropUser(drop) = statement("DROP USER IF EXISTS u1, 'u2'@'h'") else {
            panic!("not a drop user");
        };
        assert!(drop.if_exists);
        assert_eq!(drop.users.len(), 2);
        assert_eq!(drop.users[1].host.as_deref(), Some("h"));

        let Statement::RenameUser(rename) = statement("RENAME USER a TO b, c TO d") else {
            panic!("not a rename user");
        };
        assert_eq!(rename.renames.len(), 2);
        assert_eq!(rename.renames[1].from.user, "c");
        assert_eq!(rename.renames[1].to.user, "d");
    }

    #[test]
    fn test_passwords() {
        let Statement::SetPassword(set) = statement("SET PASSWORD FOR u = PASSWORD('x')") else {
            panic!("not a set password");
        };
        assert_eq!(set.user.map(|u| u.user).as_deref(), Some("u"));
        assert_eq!(set.password, "x");
        assert!(set.function);

        let Statement::SetPassword(set) = statement("SET PASSWORD = 'y'") else {
            panic!("not a set password");
        };
        assert!(set.user.is_none());
        assert!(!set.function);

        let Statement::SetPassword(set) = statement("ALTER USER u IDENTIFIED BY 'z'") else {
            panic!("not an alter user password");
        };
        assert_eq!(set.password, "z");
        assert!(set.user.is_some());
    }

    #[test]
    fn test_account_lock() {
        let Statement::LockUser(lock) = statement("ALTER USER IF EXISTS u1, u2 ACCOUNT LOCK") else {
            panic!("not a lock user");
        };
        assert!(lock.if_exists);
        assert!(lock.locked);
        assert_eq!(lock.users.len(), 2);

        let Statement::LockUser(lock) = statement("ALTER USER u1 ACCOUNT UNLOCK") else {
            panic!("not a lock user");
        };
        assert!(!lock.locked);
    }

    #[test]
    fn test_roles() {
        let Statement::CreateRole(create) = statement("CREATE ROLE IF NOT EXISTS r1, r2") else {
            panic!("not a create role");
        };
        assert!(create.if_exists);
        assert_eq!(create.roles.len(), 2);
        assert!(matches!(statement("DROP ROLE r1"), Statement::DropRole(_)));

        let Statement::SetRole(set) = statement("SET ROLE ALL EXCEPT r1") else {
            panic!("not a set role");
        };
        assert!(!set.default);
        assert!(matches!(&set.roles, RoleSelection::All { except } if except.len() == 1));

        let Statement::SetRole(set) = statement("SET DEFAULT ROLE r1, r2 TO u1") else {
            panic!("not a set default role");
        };
        assert!(set.default);
        assert!(matches!(&set.roles, RoleSelection::Roles(roles) if roles.len() == 2));
        assert_eq!(set.users.len(), 1);

        let Statement::SetRole(set) = statement("SET ROLE NONE") else {
            panic!("not a set role");
        };
        assert_eq!(set.roles, RoleSelection::None);
        let Statement::SetRole(set) = statement("SET ROLE DEFAULT") else {
            panic!("not a set role");
        };
        assert_eq!(set.roles, RoleSelection::Default);
    }

    #[test]
    fn test_grant_privileges() {
        let Statement::Grant(grant) =
            statement("GRANT SELECT (a, b), INSERT ON TABLE db.t TO u1 WITH GRANT OPTION")
        else {
            panic!("not a grant");
        };
        let GrantTarget::Privileges {
            privileges,
            object_kind,
            level,
        } = &grant.target
        else {
            panic!("expected privileges");
        };
        assert_eq!(privileges.len(), 2);
        assert_eq!(privileges[0].name, "SELECT");
        assert_eq!(privileges[0].columns.len(), 2);
        assert_eq!(privileges[1].name, "INSERT");
        assert_eq!(*object_kind, Some(GrantObjectKind::Table));
        assert!(matches!(
            level,
            PrivilegeLevel::Object { schema: Some(s), name } if s.value == "db" && name.value == "t"
        ));
        assert_eq!(grant.grantees.len(), 1);
        assert_eq!(grant.option, Some(GrantOption::Grant));
    }

    #[test]
    fn test_privilege_levels() {
        let level = |sql: &str| match statement(sql) {
            Statement::Grant(grant) => match grant.target {
                GrantTarget::Privileges { level, .. } => level,
                GrantTarget::Roles(_) => panic!("expected privileges"),
            },
            other => panic!("not a grant: {other:?}"),
        };
        assert_eq!(level("GRANT ALL PRIVILEGES ON *.* TO u"), PrivilegeLevel::Global);
        assert_eq!(level("GRANT SELECT ON * TO u"), PrivilegeLevel::CurrentDatabase);
        assert!(matches!(
            level("GRANT SELECT ON db.* TO u"),
            PrivilegeLevel::Database(db) if db.value == "db"
        ));
        assert!(matches!(
            level("GRANT SELECT ON t TO u"),
            PrivilegeLevel::Object { schema: None, .. }
        ));
    }

    #[test]
    fn test_grant_roles_and_revoke() {
        let Statement::Grant(grant) = statement("GRANT r1, r2 TO u WITH ADMIN OPTION") else {
            panic!("not a grant");
        };
        assert!(matches!(&grant.target, GrantTarget::Roles(roles) if roles.len() == 2));
        assert_eq!(grant.option, Some(GrantOption::Admin));
        assert_eq!(grant.grantees[0].user.user, "u");

        let Statement::Revoke(revoke) = statement("REVOKE INSERT, UPDATE ON db.* FROM u1, u2")
        else {
            panic!("not a revoke");
        };
        assert!(matches!(
            &revoke.target,
            GrantTarget::Privileges { privileges, .. } if privileges.len() == 2
        ));
        assert_eq!(revoke.users.len(), 2);

        let Statement::Revoke(revoke) = statement("REVOKE r1 FROM u") else {
            panic!("not a revoke");
        };
        assert!(matches!(&revoke.target, GrantTarget::Roles(roles) if roles.len() == 1));
        assert_eq!(revoke.users.len(), 1);
    }
}
