//! Users, roles, passwords and privileges.

use super::error::ParseError;
use super::option::USER_RESOURCE_OPTIONS;
use super::parser::Parser;
use crate::cst::{ParseNode, RuleKind};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    /// Parses `user [@host]`, where the user and host may be quoted.
    pub(super) fn parse_user_with_host_name(&mut self) -> Result<ParseNode, ParseError> {
        let user = if self.check_word("CURRENT_USER") {
            let mut u = vec![self.advance()];
            if self.eat(&TokenKind::LeftParen, &mut u) {
                u.push(self.expect(&TokenKind::RightParen)?);
            }
            self.node(RuleKind::User, u)
        } else {
            self.parse_name_or_string(RuleKind::User)?
        };
        let mut c = vec![user];
        if let Some(host) = self.parse_opt_host_name()? {
            c.push(host);
        }
        Ok(self.node(RuleKind::UserWithHostName, c))
    }

    fn parse_opt_host_name(&mut self) -> Result<Option<ParseNode>, ParseError> {
        let mut c = vec![];
        if self.eat(&TokenKind::At, &mut c) {
            if self.check(&TokenKind::String) {
                c.push(self.advance());
            } else {
                c.push(self.parse_name_terminal()?);
            }
        } else if !self.eat(&TokenKind::UserVariable, &mut c) {
            return Ok(None);
        }
        Ok(Some(self.node(RuleKind::OptHostName, c)))
    }

    fn parse_user_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_user_with_host_name()?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_user_with_host_name()?);
        }
        Ok(self.node(RuleKind::UserList, c))
    }

    fn parse_password(&mut self) -> Result<ParseNode, ParseError> {
        let text = self.expect(&TokenKind::String)?;
        Ok(self.node(RuleKind::Password, vec![text]))
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    pub(super) fn parse_create_user_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Create)?,
            self.expect_keyword(Keyword::User)?,
        ];
        self.eat_if_exists(true, &mut c)?;
        c.push(self.parse_user_specification_list()?);
        if self.check_word("REQUIRE") {
            c.push(self.parse_require_specification()?);
        }
        if self.check_keyword(Keyword::With) {
            c.push(self.advance());
            match self.parse_option_list(&USER_RESOURCE_OPTIONS)? {
                Some(options) => c.push(options),
                None => return Err(self.error_here("resource option")),
            }
        }
        Ok(self.node(RuleKind::CreateUserStmt, c))
    }

    fn parse_user_specification_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_user_specification()?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_user_specification()?);
        }
        Ok(self.node(RuleKind::UserSpecificationList, c))
    }

    fn parse_user_specification(&mut self) -> Result<ParseNode, ParseError> {
        let mut s = vec![self.parse_user_with_host_name()?];
        let kind = if self.check_word("IDENTIFIED") {
            s.push(self.advance());
            if self.eat_keyword(Keyword::With, &mut s) {
                s.push(self.parse_name_or_string(RuleKind::RelationName)?);
                if self.eat_any_keyword(&[Keyword::By, Keyword::As], &mut s) {
                    s.push(self.parse_password()?);
                }
            } else {
                s.push(self.expect_keyword(Keyword::By)?);
                if self.check_word("PASSWORD") {
                    s.push(self.advance());
                }
                s.push(self.parse_password()?);
            }
            RuleKind::UserSpecificationWithPassword
        } else {
            RuleKind::UserSpecificationWithoutPassword
        };
        let spec = self.node(kind, s);
        Ok(self.node(RuleKind::UserSpecification, vec![spec]))
    }

    fn parse_require_specification(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_word("REQUIRE")?];
        if self.check_word("NONE") || self.check_word("SSL") || self.check_word("X509") {
            c.push(self.advance());
        } else {
            let mut options = vec![];
            while ["CIPHER", "ISSUER", "SUBJECT"].iter().any(|w| self.check_word(w)) {
                let mut o = vec![self.advance()];
                o.push(self.parse_complex_string_literal()?);
                options.push(self.node(RuleKind::TlsOption, o));
                self.eat_keyword(Keyword::And, &mut options);
            }
            if options.is_empty() {
                return Err(self.error_here("NONE, SSL, X509 or a TLS option"));
            }
            c.push(self.node(RuleKind::TlsOptionList, options));
        }
        Ok(self.node(RuleKind::RequireSpecification, c))
    }

    pub(super) fn parse_drop_user_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Drop)?, self.expect_keyword(Keyword::User)?];
        self.eat_if_exists(false, &mut c)?;
        c.push(self.parse_user_list()?);
        Ok(self.node(RuleKind::DropUserStmt, c))
    }

    pub(super) fn parse_rename_user_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Rename)?,
            self.expect_keyword(Keyword::User)?,
        ];
        let mut list = vec![];
        loop {
            let mut r = vec![self.parse_user_with_host_name()?];
            r.push(self.expect_keyword(Keyword::To)?);
            r.push(self.parse_user_with_host_name()?);
            list.push(self.node(RuleKind::RenameInfo, r));
            if !self.eat(&TokenKind::Comma, &mut list) {
                break;
            }
        }
        c.push(self.node(RuleKind::RenameList, list));
        Ok(self.node(RuleKind::RenameUserStmt, c))
    }

    /// Parses `ALTER USER`: account locking, or a password change.
    pub(super) fn parse_lock_user_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Alter)?, self.expect_keyword(Keyword::User)?];
        self.eat_if_exists(false, &mut c)?;
        let first = self.parse_user_with_host_name()?;
        if self.check_word("IDENTIFIED") {
            c.push(first);
            c.push(self.advance());
            c.push(self.expect_keyword(Keyword::By)?);
            c.push(self.parse_password()?);
            return Ok(self.node(RuleKind::SetPasswordStmt, c));
        }
        let mut users = vec![first];
        while self.eat(&TokenKind::Comma, &mut users) {
            users.push(self.parse_user_with_host_name()?);
        }
        c.push(self.node(RuleKind::UserList, users));
        c.push(self.parse_lock_spec()?);
        Ok(self.node(RuleKind::LockUserStmt, c))
    }

    /// Parses `SET PASSWORD [FOR user] = PASSWORD('...') | '...'`.
    pub(super) fn parse_set_password_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Set)?, self.expect_word("PASSWORD")?];
        if self.check_keyword(Keyword::For) {
            let f = vec![self.advance(), self.parse_user_with_host_name()?];
            c.push(self.node(RuleKind::OptForUser, f));
        }
        c.push(self.expect(&TokenKind::Eq)?);
        if self.check_word("PASSWORD") && self.peek_kind(1) == &TokenKind::LeftParen {
            c.push(self.advance());
            c.push(self.advance());
            c.push(self.parse_password()?);
            c.push(self.expect(&TokenKind::RightParen)?);
        } else {
            c.push(self.parse_password()?);
        }
        Ok(self.node(RuleKind::SetPasswordStmt, c))
    }

    // ------------------------------------------------------------------
    // Roles
    // ------------------------------------------------------------------

    fn parse_role_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_role_with_host()?];
        while self.eat(&TokenKind::Comma, &mut c) {
            c.push(self.parse_role_with_host()?);
        }
        Ok(self.node(RuleKind::RoleList, c))
    }

    fn parse_role_with_host(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_name_or_string(RuleKind::Role)?];
        if let Some(host) = self.parse_opt_host_name()? {
            c.push(host);
        }
        Ok(self.node(RuleKind::RoleWithHost, c))
    }

    pub(super) fn parse_create_role_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Create)?,
            self.expect_keyword(Keyword::Role)?,
        ];
        self.eat_if_exists(true, &mut c)?;
        c.push(self.parse_role_list()?);
        Ok(self.node(RuleKind::CreateRoleStmt, c))
    }

    pub(super) fn parse_drop_role_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Drop)?, self.expect_keyword(Keyword::Role)?];
        self.eat_if_exists(false, &mut c)?;
        c.push(self.parse_role_list()?);
        Ok(self.node(RuleKind::DropRoleStmt, c))
    }

    /// Parses `SET ROLE ...` and `SET DEFAULT ROLE ... TO users`.
    pub(super) fn parse_set_role_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Set)?];
        let default = self.eat_keyword(Keyword::Default, &mut c);
        c.push(self.expect_keyword(Keyword::Role)?);
        let mut r = vec![];
        if !default && self.check_keyword(Keyword::Default) {
            r.push(self.advance());
        } else if self.check_word("NONE") {
            r.push(self.advance());
        } else if self.check_keyword(Keyword::All) {
            r.push(self.advance());
            if !default && self.check_keyword(Keyword::Except) {
                r.push(self.advance());
                r.push(self.parse_role_list()?);
            }
        } else {
            r.push(self.parse_role_list()?);
        }
        let clause = if default {
            RuleKind::DefaultSetRoleClause
        } else {
            RuleKind::SetRoleClause
        };
        c.push(self.node(clause, r));
        if default {
            c.push(self.expect_keyword(Keyword::To)?);
            c.push(self.parse_user_list()?);
        }
        Ok(self.node(RuleKind::SetRoleStmt, c))
    }

    // ------------------------------------------------------------------
    // GRANT / REVOKE
    // ------------------------------------------------------------------

    /// Looks ahead for `ON` at paren depth zero before `end` or end of
    /// statement, which separates privilege grants from role grants.
    fn privileges_precede_on(&self, end: Keyword) -> bool {
        let mut depth = 0usize;
        let mut n = 0;
        loop {
            match self.peek_kind(n) {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth = depth.saturating_sub(1),
                TokenKind::Keyword(Keyword::On) if depth == 0 => return true,
                TokenKind::Keyword(kw) if depth == 0 && *kw == end => return false,
                TokenKind::Semicolon | TokenKind::Eof => return false,
                _ => {}
            }
            n += 1;
        }
    }

    fn parse_privilege_list(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        loop {
            let mut p = vec![];
            while !self.at_eof()
                && !matches!(
                    self.current().kind,
                    TokenKind::Comma | TokenKind::LeftParen | TokenKind::Keyword(Keyword::On)
                )
            {
                p.push(self.advance());
            }
            if p.is_empty() {
                return Err(self.error_here("privilege"));
            }
            if self.check(&TokenKind::LeftParen) {
                self.parse_paren_column_list(&mut p)?;
            }
            c.push(self.node(RuleKind::RoleOrPriv, p));
            if !self.eat(&TokenKind::Comma, &mut c) {
                break;
            }
        }
        let list = self.node(RuleKind::RoleOrPrivList, c);
        Ok(self.node(RuleKind::GrantPrivileges, vec![list]))
    }

    fn parse_granted_roles(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        loop {
            let role = self.parse_user_with_host_name()?;
            c.push(self.node(RuleKind::RoleOrPriv, vec![role]));
            if !self.eat(&TokenKind::Comma, &mut c) {
                break;
            }
        }
        Ok(self.node(RuleKind::RoleOrPrivList, c))
    }

    /// Parses `ON [object_type] priv_level` into `c`.
    fn parse_grant_target(&mut self, c: &mut Vec<ParseNode>) -> Result<(), ParseError> {
        c.push(self.expect_keyword(Keyword::On)?);
        if self.check_any_keyword(&[Keyword::Table, Keyword::Function, Keyword::Procedure]) {
            let object = self.advance();
            c.push(self.node(RuleKind::ObjectType, vec![object]));
        }
        let mut p = vec![];
        if self.eat(&TokenKind::Star, &mut p) {
            if self.eat(&TokenKind::Dot, &mut p) {
                p.push(self.expect(&TokenKind::Star)?);
            }
        } else {
            p.push(self.parse_name(RuleKind::RelationName)?);
            if self.eat(&TokenKind::Dot, &mut p) {
                if !self.eat(&TokenKind::Star, &mut p) {
                    p.push(self.parse_name(RuleKind::RelationName)?);
                }
            }
        }
        c.push(self.node(RuleKind::PrivLevel, p));
        Ok(())
    }

    pub(super) fn parse_grant_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Grant)?];
        if self.privileges_precede_on(Keyword::To) {
            c.push(self.parse_privilege_list()?);
            self.parse_grant_target(&mut c)?;
        } else {
            c.push(self.parse_granted_roles()?);
        }
        c.push(self.expect_keyword(Keyword::To)?);
        c.push(self.parse_user_specification_list()?);
        if self.check_keyword(Keyword::With) {
            let mut o = vec![self.advance()];
            if self.check_keyword(Keyword::Grant) || self.check_word("ADMIN") {
                o.push(self.advance());
            } else {
                return Err(self.error_here("GRANT OPTION or ADMIN OPTION"));
            }
            o.push(self.expect_word("OPTION")?);
            c.push(self.node(RuleKind::GrantOptions, o));
        }
        Ok(self.node(RuleKind::GrantStmt, c))
    }

    pub(super) fn parse_revoke_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Revoke)?];
        if self.privileges_precede_on(Keyword::From) {
            c.push(self.parse_privilege_list()?);
            self.parse_grant_target(&mut c)?;
        } else {
            c.push(self.parse_granted_roles()?);
        }
        c.push(self.expect_keyword(Keyword::From)?);
        c.push(self.parse_user_list()?);
        Ok(self.node(RuleKind::RevokeStmt, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(sql: &str) -> Vec<&'static str> {
        let node = Parser::new(sql).parse_statement().unwrap();
        let mut out = Vec::new();
        node.visit(&mut |n| {
            if let Some(kind) = n.kind() {
                out.push(kind.name());
            }
        });
        out
    }

    fn count(names: &[&str], rule: &str) -> usize {
        names.iter().filter(|n| **n == rule).count()
    }

    #[test]
    fn test_create_user() {
        let names = rules(
            "CREATE USER IF NOT EXISTS 'alice'@'%' IDENTIFIED BY 'pw', bob
             REQUIRE CIPHER 'c' AND ISSUER 'i' WITH MAX_USER_CONNECTIONS 3",
        );
        assert_eq!(count(&names, "user_specification"), 2);
        assert!(names.contains(&"user_specification_with_password"));
        assert!(names.contains(&"user_specification_without_password"));
        assert_eq!(count(&names, "tls_option"), 2);
        assert!(names.contains(&"resource_option"));
        assert!(names.contains(&"opt_host_name"));
    }

    #[test]
    fn test_user_host_spellings() {
        assert!(rules("DROP USER u@localhost").contains(&"opt_host_name"));
        assert!(rules("DROP USER 'u'@'h', v").contains(&"user_list"));
    }

    #[test]
    fn test_alter_user_forms() {
        assert!(rules("ALTER USER a, b ACCOUNT LOCK").contains(&"lock_user_stmt"));
        assert!(rules("ALTER USER a IDENTIFIED BY 'x'").contains(&"set_password_stmt"));
        assert!(rules("SET PASSWORD FOR a = PASSWORD('x')").contains(&"opt_for_user"));
        assert!(rules("RENAME USER a TO b, c TO d").contains(&"rename_list"));
    }

    #[test]
    fn test_roles() {
        assert_eq!(count(&rules("CREATE ROLE r1, 'r2'@'%'"), "role_with_host"), 2);
        assert!(rules("SET ROLE ALL EXCEPT r1").contains(&"set_role_clause"));
        assert!(rules("SET DEFAULT ROLE r1, r2 TO u1").contains(&"default_set_role_clause"));
    }

    #[test]
    fn test_grant_and_revoke() {
        let names =
            rules("GRANT SELECT (a, b), INSERT, CREATE VIEW ON db.* TO u WITH GRANT OPTION");
        assert_eq!(count(&names, "role_or_priv"), 3);
        assert!(names.contains(&"priv_level"));
        assert!(names.contains(&"grant_options"));

        let names = rules("GRANT r1, r2 TO u");
        assert!(!names.contains(&"grant_privileges"));
        assert_eq!(count(&names, "role_or_priv"), 2);

        assert!(rules("REVOKE ALL PRIVILEGES ON *.* FROM u").contains(&"grant_privileges"));
        assert!(rules("REVOKE r1 FROM u").contains(&"role_or_priv_list"));
    }
}
