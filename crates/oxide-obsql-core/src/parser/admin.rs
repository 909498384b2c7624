//! Cluster administration: databases, tablegroups, tablespaces, sequences,
//! resource units and pools, tenants, ALTER SYSTEM and maintenance
//! statements.

use super::error::ParseError;
use super::option::{
    ALTER_POOL_OPTIONS, CREATE_POOL_OPTIONS, DATABASE_OPTIONS, RESOURCE_UNIT_OPTIONS,
    SEQUENCE_OPTIONS, TABLEGROUP_OPTIONS, TABLESPACE_OPTIONS, TENANT_OPTIONS,
};
use super::parser::Parser;
use crate::cst::{ParseNode, RuleKind};
use crate::lexer::{Keyword, TokenKind};

impl Parser<'_> {
    fn parse_database_key(&mut self) -> Result<ParseNode, ParseError> {
        let key = self.expect_any_keyword(&[Keyword::Database, Keyword::Schema])?;
        Ok(self.node(RuleKind::DatabaseKey, vec![key]))
    }

    fn parse_database_factor(&mut self) -> Result<ParseNode, ParseError> {
        let name = self.parse_name(RuleKind::RelationName)?;
        Ok(self.node(RuleKind::DatabaseFactor, vec![name]))
    }

    /// Pushes `TENANT [=] name` when present.
    fn eat_tenant_target(&mut self, c: &mut Vec<ParseNode>) -> Result<(), ParseError> {
        if self.eat_keyword(Keyword::Tenant, c) {
            self.eat(&TokenKind::Eq, c);
            c.push(self.parse_name_or_string(RuleKind::RelationName)?);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Databases
    // ------------------------------------------------------------------

    pub(super) fn parse_create_database_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Create)?, self.parse_database_key()?];
        self.eat_if_exists(true, &mut c)?;
        c.push(self.parse_database_factor()?);
        if let Some(options) = self.parse_option_list(&DATABASE_OPTIONS)? {
            c.push(options);
        }
        Ok(self.node(RuleKind::CreateDatabaseStmt, c))
    }

    pub(super) fn parse_alter_database_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Alter)?, self.parse_database_key()?];
        if !self.starts_option(&DATABASE_OPTIONS) && !self.check_keyword(Keyword::Set) {
            c.push(self.parse_database_factor()?);
        }
        self.eat_keyword(Keyword::Set, &mut c);
        match self.parse_option_list(&DATABASE_OPTIONS)? {
            Some(options) => c.push(options),
            None => return Err(self.error_here("database option")),
        }
        Ok(self.node(RuleKind::AlterDatabaseStmt, c))
    }

    pub(super) fn parse_drop_database_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Drop)?, self.parse_database_key()?];
        self.eat_if_exists(false, &mut c)?;
        c.push(self.parse_database_factor()?);
        Ok(self.node(RuleKind::DropDatabaseStmt, c))
    }

    pub(super) fn parse_use_database_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let c = vec![self.expect_keyword(Keyword::Use)?, self.parse_database_factor()?];
        Ok(self.node(RuleKind::UseDatabaseStmt, c))
    }

    // ------------------------------------------------------------------
    // Tablegroups and tablespaces
    // ------------------------------------------------------------------

    pub(super) fn parse_create_tablegroup_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Create)?,
            self.expect_keyword(Keyword::Tablegroup)?,
        ];
        self.eat_if_exists(true, &mut c)?;
        c.push(self.parse_name(RuleKind::RelationName)?);
        if let Some(options) = self.parse_option_list(&TABLEGROUP_OPTIONS)? {
            c.push(options);
        }
        Ok(self.node(RuleKind::CreateTablegroupStmt, c))
    }

    pub(super) fn parse_alter_tablegroup_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Alter)?,
            self.expect_keyword(Keyword::Tablegroup)?,
            self.parse_name(RuleKind::RelationName)?,
        ];
        if self.eat_keyword(Keyword::Add, &mut c) {
            self.eat_keyword(Keyword::Table, &mut c);
            c.push(self.parse_table_list()?);
        } else {
            self.eat_keyword(Keyword::Set, &mut c);
            match self.parse_option_list(&TABLEGROUP_OPTIONS)? {
                Some(options) => c.push(options),
                None => return Err(self.error_here("tablegroup option")),
            }
        }
        Ok(self.node(RuleKind::AlterTablegroupStmt, c))
    }

    pub(super) fn parse_drop_tablegroup_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Drop)?,
            self.expect_keyword(Keyword::Tablegroup)?,
        ];
        self.eat_if_exists(false, &mut c)?;
        c.push(self.parse_name(RuleKind::RelationName)?);
        Ok(self.node(RuleKind::DropTablegroupStmt, c))
    }

    pub(super) fn parse_create_tablespace_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Create)?,
            self.expect_keyword(Keyword::Tablespace)?,
        ];
        let mut t = vec![self.parse_name(RuleKind::RelationName)?];
        if let Some(options) = self.parse_option_list(&TABLESPACE_OPTIONS)? {
            t.push(options);
        }
        c.push(self.node(RuleKind::PermanentTablespace, t));
        Ok(self.node(RuleKind::CreateTablespaceStmt, c))
    }

    pub(super) fn parse_alter_tablespace_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Alter)?,
            self.expect_keyword(Keyword::Tablespace)?,
            self.parse_name(RuleKind::RelationName)?,
        ];
        self.eat_keyword(Keyword::Set, &mut c);
        match self.parse_option_list(&TABLESPACE_OPTIONS)? {
            Some(options) => c.push(options),
            None => return Err(self.error_here("tablespace option")),
        }
        Ok(self.node(RuleKind::AlterTablespaceStmt, c))
    }

    pub(super) fn parse_drop_tablespace_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let c = vec![
            self.expect_keyword(Keyword::Drop)?,
            self.expect_keyword(Keyword::Tablespace)?,
            self.parse_name(RuleKind::RelationName)?,
        ];
        Ok(self.node(RuleKind::DropTablespaceStmt, c))
    }

    // ------------------------------------------------------------------
    // Sequences
    // ------------------------------------------------------------------

    pub(super) fn parse_create_sequence_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Create)?,
            self.expect_keyword(Keyword::Sequence)?,
        ];
        self.eat_if_exists(true, &mut c)?;
        c.push(self.parse_relation_factor()?);
        if let Some(options) = self.parse_option_list(&SEQUENCE_OPTIONS)? {
            c.push(options);
        }
        Ok(self.node(RuleKind::CreateSequenceStmt, c))
    }

    pub(super) fn parse_alter_sequence_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Alter)?,
            self.expect_keyword(Keyword::Sequence)?,
            self.parse_relation_factor()?,
        ];
        if let Some(options) = self.parse_option_list(&SEQUENCE_OPTIONS)? {
            c.push(options);
        }
        Ok(self.node(RuleKind::AlterSequenceStmt, c))
    }

    pub(super) fn parse_drop_sequence_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Drop)?,
            self.expect_keyword(Keyword::Sequence)?,
        ];
        self.eat_if_exists(false, &mut c)?;
        c.push(self.parse_relation_factor()?);
        Ok(self.node(RuleKind::DropSequenceStmt, c))
    }

    // ------------------------------------------------------------------
    // Resource units and pools
    // ------------------------------------------------------------------

    /// Pushes `RESOURCE UNIT` or `RESOURCE POOL`, returning true for a pool.
    fn eat_resource_kind(&mut self, c: &mut Vec<ParseNode>) -> Result<bool, ParseError> {
        c.push(self.expect_keyword(Keyword::Resource)?);
        if self.check_word("POOL") {
            c.push(self.advance());
            Ok(true)
        } else {
            c.push(self.expect_word("UNIT")?);
            Ok(false)
        }
    }

    pub(super) fn parse_create_resource_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Create)?];
        let pool = self.eat_resource_kind(&mut c)?;
        self.eat_if_exists(true, &mut c)?;
        c.push(self.parse_name(RuleKind::RelationName)?);
        let grammar = if pool { CREATE_POOL_OPTIONS } else { RESOURCE_UNIT_OPTIONS };
        if let Some(options) = self.parse_option_list(&grammar)? {
            c.push(options);
        }
        Ok(self.node(RuleKind::CreateResourceStmt, c))
    }

    pub(super) fn parse_alter_resource_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Alter)?];
        let pool = self.eat_resource_kind(&mut c)?;
        c.push(self.parse_name(RuleKind::RelationName)?);
        let grammar = if pool { ALTER_POOL_OPTIONS } else { RESOURCE_UNIT_OPTIONS };
        match self.parse_option_list(&grammar)? {
            Some(options) => c.push(options),
            None => return Err(self.error_here("resource option")),
        }
        Ok(self.node(RuleKind::AlterResourceStmt, c))
    }

    pub(super) fn parse_drop_resource_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Drop)?];
        self.eat_resource_kind(&mut c)?;
        self.eat_if_exists(false, &mut c)?;
        c.push(self.parse_name(RuleKind::RelationName)?);
        Ok(self.node(RuleKind::DropResourceStmt, c))
    }

    // ------------------------------------------------------------------
    // Tenants, snapshots and restore points
    // ------------------------------------------------------------------

    pub(super) fn parse_create_tenant_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Create)?,
            self.expect_keyword(Keyword::Tenant)?,
        ];
        self.eat_if_exists(true, &mut c)?;
        c.push(self.parse_name(RuleKind::RelationName)?);
        if let Some(options) = self.parse_option_list(&TENANT_OPTIONS)? {
            c.push(options);
        }
        let set = self.eat_keyword(Keyword::Set, &mut c);
        let variables = if self.check_word("VARIABLES") {
            c.push(self.advance());
            true
        } else {
            false
        };
        if set || variables {
            c.push(self.parse_sys_var_and_val_list()?);
        }
        Ok(self.node(RuleKind::CreateTenantStmt, c))
    }

    pub(super) fn parse_alter_tenant_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Alter)?,
            self.expect_keyword(Keyword::Tenant)?,
        ];
        if self.check_keyword(Keyword::All) {
            c.push(self.advance());
        } else {
            c.push(self.parse_name(RuleKind::RelationName)?);
        }

        if self.check_keyword(Keyword::Rename) {
            c.push(self.advance());
            c.push(self.expect_word("GLOBAL_NAME")?);
            c.push(self.expect_keyword(Keyword::To)?);
            c.push(self.parse_name(RuleKind::RelationName)?);
        } else if self.check_word("ACCOUNT") {
            c.push(self.parse_lock_spec()?);
        } else {
            self.eat_keyword(Keyword::Set, &mut c);
            let options = self.parse_option_list(&TENANT_OPTIONS)?;
            let has_options = options.is_some();
            if let Some(options) = options {
                c.push(options);
            }
            if self.check_word("VARIABLES") {
                c.push(self.advance());
                c.push(self.parse_sys_var_and_val_list()?);
            } else if !has_options {
                return Err(self.error_here("tenant option"));
            }
        }
        Ok(self.node(RuleKind::AlterTenantStmt, c))
    }

    /// Parses `ACCOUNT LOCK` or `ACCOUNT UNLOCK`.
    pub(super) fn parse_lock_spec(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_word("ACCOUNT")?];
        if self.check_keyword(Keyword::Lock) || self.check_keyword(Keyword::Unlock) {
            c.push(self.advance());
        } else {
            return Err(self.error_here("LOCK or UNLOCK"));
        }
        Ok(self.node(RuleKind::LockSpecMysql57, c))
    }

    pub(super) fn parse_drop_tenant_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Drop)?,
            self.expect_keyword(Keyword::Tenant)?,
        ];
        self.eat_if_exists(false, &mut c)?;
        c.push(self.parse_name(RuleKind::RelationName)?);
        if self.check_word("FORCE") || self.check_keyword(Keyword::Purge) {
            c.push(self.advance());
        }
        Ok(self.node(RuleKind::DropTenantStmt, c))
    }

    pub(super) fn parse_create_tenant_snapshot_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Create)?,
            self.expect_keyword(Keyword::Snapshot)?,
        ];
        if self.check_name() {
            let name = self.parse_name(RuleKind::RelationName)?;
            c.push(self.node(RuleKind::SnapshotName, vec![name]));
        }
        if self.eat_keyword(Keyword::For, &mut c) {
            c.push(self.expect_keyword(Keyword::Tenant)?);
            c.push(self.parse_name(RuleKind::RelationName)?);
        }
        Ok(self.node(RuleKind::CreateTenantSnapshotStmt, c))
    }

    pub(super) fn parse_drop_tenant_snapshot_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Drop)?,
            self.expect_keyword(Keyword::Snapshot)?,
        ];
        let name = self.parse_name(RuleKind::RelationName)?;
        c.push(self.node(RuleKind::SnapshotName, vec![name]));
        if self.eat_keyword(Keyword::For, &mut c) {
            c.push(self.expect_keyword(Keyword::Tenant)?);
            c.push(self.parse_name(RuleKind::RelationName)?);
        }
        Ok(self.node(RuleKind::DropTenantSnapshotStmt, c))
    }

    pub(super) fn parse_create_restore_point_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let c = vec![
            self.expect_keyword(Keyword::Create)?,
            self.expect_keyword(Keyword::Restore)?,
            self.expect_word("POINT")?,
            self.parse_name(RuleKind::RelationName)?,
        ];
        Ok(self.node(RuleKind::CreateRestorePointStmt, c))
    }

    pub(super) fn parse_drop_restore_point_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let c = vec![
            self.expect_keyword(Keyword::Drop)?,
            self.expect_keyword(Keyword::Restore)?,
            self.expect_word("POINT")?,
            self.parse_name(RuleKind::RelationName)?,
        ];
        Ok(self.node(RuleKind::DropRestorePointStmt, c))
    }

    // ------------------------------------------------------------------
    // ALTER SYSTEM
    // ------------------------------------------------------------------

    pub(super) fn parse_alter_system(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Alter)?,
            self.expect_keyword(Keyword::System)?,
        ];
        if ["ACTIVATE", "SWITCHOVER", "FAILOVER"].iter().any(|w| self.check_word(w)) {
            c.push(self.parse_switchover_clause()?);
            if self.check_word("VERIFY") {
                c.push(self.advance());
            }
            return Ok(self.node(RuleKind::SwitchoverTenantStmt, c));
        }
        if self.check_word("RECOVER") {
            c.push(self.advance());
            c.push(self.expect_word("STANDBY")?);
            self.eat_tenant_target(&mut c)?;
            if self.check_word("UNTIL") || self.check_word("CANCEL") {
                c.push(self.parse_recover_point_clause()?);
            }
            return Ok(self.node(RuleKind::RecoverTenantStmt, c));
        }

        if self.check_word("MAJOR") || self.check_word("MINOR") {
            c.push(self.advance());
            c.push(self.expect_word("FREEZE")?);
            self.eat_tenant_target(&mut c)?;
        } else if self.check_word("FLUSH") {
            c.push(self.advance());
            let cache = self.parse_name_terminal()?;
            c.push(self.node(RuleKind::CacheType, vec![cache]));
            c.push(self.expect_word("CACHE")?);
            self.eat_tenant_target(&mut c)?;
            if self.check_word("GLOBAL") {
                c.push(self.advance());
            }
        } else {
            self.eat_keyword(Keyword::Set, &mut c);
            let mut actions = vec![self.parse_set_parameter_action()?];
            while self.eat(&TokenKind::Comma, &mut actions) {
                actions.push(self.parse_set_parameter_action()?);
            }
            c.push(self.node(RuleKind::AlterSystemSetParameterActions, actions));
        }
        Ok(self.node(RuleKind::AlterSystemStmt, c))
    }

    fn parse_switchover_clause(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.check_word("ACTIVATE") {
            c.push(self.advance());
            c.push(self.expect_word("STANDBY")?);
        } else {
            let failover = self.check_word("FAILOVER");
            c.push(self.advance());
            c.push(self.expect_keyword(Keyword::To)?);
            if self.check_keyword(Keyword::Primary) || (!failover && self.check_word("STANDBY")) {
                c.push(self.advance());
            } else {
                return Err(self.error_here("PRIMARY or STANDBY"));
            }
        }
        self.eat_tenant_target(&mut c)?;
        Ok(self.node(RuleKind::SwitchoverClause, c))
    }

    fn parse_recover_point_clause(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![];
        if self.check_word("CANCEL") {
            c.push(self.advance());
        } else {
            c.push(self.expect_word("UNTIL")?);
            if self.check_keyword(Keyword::Time) {
                c.push(self.advance());
                self.eat(&TokenKind::Eq, &mut c);
                c.push(self.parse_complex_string_literal()?);
            } else if self.check_word("SCN") {
                c.push(self.advance());
                self.eat(&TokenKind::Eq, &mut c);
                c.push(self.expect(&TokenKind::IntNum)?);
            } else {
                c.push(self.expect_word("UNLIMITED")?);
            }
        }
        Ok(self.node(RuleKind::RecoverPointClause, c))
    }

    /// Parses `name = value [COMMENT '...'] [SCOPE = ...] [TENANT = name]`.
    fn parse_set_parameter_action(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.parse_name(RuleKind::RelationName)?];
        c.push(self.expect(&TokenKind::Eq)?);
        c.push(self.parse_expr()?);
        if self.check_word("COMMENT") {
            c.push(self.advance());
            c.push(self.parse_complex_string_literal()?);
        }
        if self.check_word("SCOPE") {
            c.push(self.advance());
            c.push(self.expect(&TokenKind::Eq)?);
            c.push(self.parse_name_terminal()?);
        }
        self.eat_tenant_target(&mut c)?;
        Ok(self.node(RuleKind::AlterSystemSetParameterAction, c))
    }

    // ------------------------------------------------------------------
    // Maintenance
    // ------------------------------------------------------------------

    pub(super) fn parse_flashback_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Flashback)?];
        let table = self.check_keyword(Keyword::Table);
        if table {
            c.push(self.advance());
            c.push(self.parse_relation_factor()?);
        } else if self.check_any_keyword(&[Keyword::Database, Keyword::Schema]) {
            c.push(self.parse_database_key()?);
            c.push(self.parse_database_factor()?);
        } else {
            c.push(self.expect_keyword(Keyword::Tenant)?);
            c.push(self.parse_name(RuleKind::RelationName)?);
        }
        c.push(self.expect_keyword(Keyword::To)?);
        c.push(self.expect_word("BEFORE")?);
        c.push(self.expect_keyword(Keyword::Drop)?);
        if self.eat_keyword(Keyword::Rename, &mut c) {
            c.push(self.expect_keyword(Keyword::To)?);
            if table {
                c.push(self.parse_relation_factor()?);
            } else {
                c.push(self.parse_name(RuleKind::RelationName)?);
            }
        }
        Ok(self.node(RuleKind::FlashbackStmt, c))
    }

    pub(super) fn parse_purge_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Purge)?];
        if self.check_any_keyword(&[Keyword::Table, Keyword::Index]) {
            c.push(self.advance());
            c.push(self.parse_relation_factor()?);
        } else if self.check_any_keyword(&[Keyword::Database, Keyword::Schema, Keyword::Tenant]) {
            c.push(self.advance());
            c.push(self.parse_name(RuleKind::RelationName)?);
        } else {
            c.push(self.expect_word("RECYCLEBIN")?);
        }
        Ok(self.node(RuleKind::PurgeStmt, c))
    }

    pub(super) fn parse_optimize_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Optimize)?];
        if self.eat_keyword(Keyword::Tenant, &mut c) {
            if self.check_keyword(Keyword::All) {
                c.push(self.advance());
            } else {
                c.push(self.parse_name(RuleKind::RelationName)?);
            }
        } else {
            c.push(self.expect_keyword(Keyword::Table)?);
            c.push(self.parse_table_list()?);
        }
        Ok(self.node(RuleKind::OptimizeStmt, c))
    }

    pub(super) fn parse_analyze_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![
            self.expect_keyword(Keyword::Analyze)?,
            self.expect_keyword(Keyword::Table)?,
            self.parse_relation_factor()?,
        ];
        if self.check_keyword(Keyword::Partition) {
            c.push(self.parse_use_partition()?);
        }
        if self.check_any_keyword(&[Keyword::Update, Keyword::Drop])
            && self.check_word_at(1, "HISTOGRAM")
        {
            let mut s = vec![self.advance(), self.advance()];
            s.push(self.expect_keyword(Keyword::On)?);
            s.push(self.parse_column_list()?);
            if self.eat_keyword(Keyword::With, &mut s) {
                s.push(self.expect(&TokenKind::IntNum)?);
                s.push(self.expect_word("BUCKETS")?);
            }
            c.push(self.node(RuleKind::AnalyzeStatisticsClause, s));
        }
        Ok(self.node(RuleKind::AnalyzeStmt, c))
    }

    pub(super) fn parse_kill_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Kill)?];
        if self.check_word("CONNECTION") || self.check_word("QUERY") {
            c.push(self.advance());
        }
        c.push(self.parse_expr()?);
        Ok(self.node(RuleKind::KillStmt, c))
    }

    pub(super) fn parse_help_stmt(&mut self) -> Result<ParseNode, ParseError> {
        let mut c = vec![self.expect_keyword(Keyword::Help)?];
        c.push(self.parse_name_or_string(RuleKind::RelationName)?);
        Ok(self.node(RuleKind::HelpStmt, c))
    }
}
