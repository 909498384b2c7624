//! Keyword-led option lists.
//!
//! Every option list (table, index, database, sequence, tenant, ...) reduces
//! into an [`OptionSet`] keyed by a per-list key enum. Spellings that set the
//! same option (`CHARSET`, `CHARACTER SET`, `DEFAULT CHARSET`) share one key,
//! and a repeated option replaces the earlier value.

use serde::{Deserialize, Serialize};

use super::expression::{Expr, Literal};
use super::name::Ident;
use crate::lexer::Span;

/// An option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionValue {
    /// A (possibly signed) number, as written.
    Number(String),
    /// A string literal.
    String(Literal),
    /// A bare word (`InnoDB`, `utf8mb4`).
    Word(Ident),
    /// A parenthesised list.
    List(Vec<Expr>),
    /// Oracle `STORAGE (INITIAL 64K NEXT 1M)`, one text per parameter.
    Group(Vec<String>),
    /// A flag spelling (`READ ONLY` is on, `READ WRITE` is off).
    Switch(bool),
}

impl OptionValue {
    /// Returns the value as text: the unescaped string, the word, the
    /// number, or `ON`/`OFF` for switches. Lists have no text form.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            Self::Number(n) => Some(n.clone()),
            Self::String(literal) => literal.string_value(),
            Self::Word(ident) => Some(ident.value.clone()),
            Self::Switch(on) => Some(if *on { "ON" } else { "OFF" }.to_string()),
            Self::List(_) | Self::Group(_) => None,
        }
    }

    /// Compares two values, ignoring ASCII case of words.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Word(a), Self::Word(b)) => a.value.eq_ignore_ascii_case(&b.value),
            (Self::Group(a), Self::Group(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.eq_ignore_ascii_case(y))
            }
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b)
                        .all(|(x, y)| x.as_literal().is_some() && x.as_literal() == y.as_literal())
            }
            _ => self == other,
        }
    }
}

/// The key enum of one option list.
pub trait OptionKey: Copy + Eq + core::fmt::Debug {
    /// Maps the option's keyword spelling (upper case, single spaces) to its
    /// key. Flag spellings also return the switch value they imply.
    fn classify(words: &str) -> Option<(Self, Option<bool>)>;

    /// Returns the canonical spelling of the option.
    fn as_str(self) -> &'static str;
}

/// One option as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionEntry<K> {
    /// Which option.
    pub key: K,
    /// Its value.
    pub value: OptionValue,
    /// Trailing FORCE (`LOCALITY = '..' FORCE`).
    pub force: bool,
    /// Source span.
    pub span: Span,
}

/// An accumulated option list. Each key appears once; the last occurrence
/// wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet<K> {
    entries: Vec<OptionEntry<K>>,
}

impl<K> Default for OptionSet<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: OptionKey> OptionSet<K> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the entry it replaced.
    pub fn insert(&mut self, entry: OptionEntry<K>) -> Option<OptionEntry<K>> {
        match self.entries.iter_mut().find(|e| e.key == entry.key) {
            Some(slot) => Some(core::mem::replace(slot, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    /// Returns the entry for `key`.
    #[must_use]
    pub fn get(&self, key: K) -> Option<&OptionEntry<K>> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Returns the value for `key`.
    #[must_use]
    pub fn value(&self, key: K) -> Option<&OptionValue> {
        self.get(key).map(|e| &e.value)
    }

    /// Returns the text of the value for `key`.
    #[must_use]
    pub fn text(&self, key: K) -> Option<String> {
        self.value(key).and_then(OptionValue::text)
    }

    /// Returns true if `key` is set.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Returns the number of distinct options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no option is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionEntry<K>> {
        self.entries.iter()
    }

    /// Adds every entry of `other`, later entries winning.
    pub fn extend(&mut self, other: Self) {
        for entry in other.entries {
            self.insert(entry);
        }
    }
}

/// Table options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableOptionKey {
    Charset,
    Collate,
    Comment,
    Compression,
    Engine,
    AutoIncrement,
    Tablegroup,
    PrimaryZone,
    Locality,
    RowFormat,
    BlockSize,
    ReplicaNum,
    TabletSize,
    Pctfree,
    UseBloomFilter,
    ProgressiveMergeNum,
    ReadOnly,
    Tablespace,
    KeyBlockSize,
    AutoIncrementMode,
    EnableExtendedRowid,
    Parallel,
    DuplicateScope,
    Ttl,
    KvAttributes,
    LobInrowThreshold,
    DefaultLobInrowThreshold,
    Sortkey,
    StorageFormatVersion,
    TableMode,
    TabletId,
    Organization,
    ExpireInfo,
    Pctused,
    Initrans,
    Maxtrans,
    Storage,
    /// COMPRESS with its level as the value, NOCOMPRESS off.
    Compress,
    /// LOGGING (on) or NOLOGGING (off).
    Logging,
    /// ENABLE (on) or DISABLE (off) ROW MOVEMENT.
    RowMovement,
}

impl OptionKey for TableOptionKey {
    fn classify(words: &str) -> Option<(Self, Option<bool>)> {
        let key = match words {
            "CHARSET" | "CHARACTER SET" | "CHAR SET" | "DEFAULT CHARSET"
            | "DEFAULT CHARACTER SET" => Self::Charset,
            "COLLATE" | "DEFAULT COLLATE" => Self::Collate,
            "COMMENT" => Self::Comment,
            "COMPRESSION" => Self::Compression,
            "ENGINE" => Self::Engine,
            "AUTO_INCREMENT" => Self::AutoIncrement,
            "TABLEGROUP" => Self::Tablegroup,
            "PRIMARY_ZONE" => Self::PrimaryZone,
            "LOCALITY" => Self::Locality,
            "ROW_FORMAT" => Self::RowFormat,
            "BLOCK_SIZE" => Self::BlockSize,
            "REPLICA_NUM" => Self::ReplicaNum,
            "TABLET_SIZE" => Self::TabletSize,
            "PCTFREE" => Self::Pctfree,
            "USE_BLOOM_FILTER" => Self::UseBloomFilter,
            "PROGRESSIVE_MERGE_NUM" => Self::ProgressiveMergeNum,
            "READ ONLY" => return Some((Self::ReadOnly, Some(true))),
            "READ WRITE" => return Some((Self::ReadOnly, Some(false))),
            "TABLESPACE" => Self::Tablespace,
            "KEY_BLOCK_SIZE" => Self::KeyBlockSize,
            "AUTO_INCREMENT_MODE" => Self::AutoIncrementMode,
            "ENABLE_EXTENDED_ROWID" => Self::EnableExtendedRowid,
            "PARALLEL" => Self::Parallel,
            "NOPARALLEL" => return Some((Self::Parallel, Some(false))),
            "DUPLICATE_SCOPE" => Self::DuplicateScope,
            "TTL" => Self::Ttl,
            "KV_ATTRIBUTES" => Self::KvAttributes,
            "LOB_INROW_THRESHOLD" => Self::LobInrowThreshold,
            "DEFAULT_LOB_INROW_THRESHOLD" => Self::DefaultLobInrowThreshold,
            "SORTKEY" => Self::Sortkey,
            "STORAGE_FORMAT_VERSION" => Self::StorageFormatVersion,
            "TABLE_MODE" => Self::TableMode,
            "TABLET_ID" => Self::TabletId,
            "ORGANIZATION" => Self::Organization,
            "EXPIRE_INFO" => Self::ExpireInfo,
            "PCTUSED" => Self::Pctused,
            "INITRANS" => Self::Initrans,
            "MAXTRANS" => Self::Maxtrans,
            "STORAGE" => Self::Storage,
            "COMPRESS" => Self::Compress,
            "NOCOMPRESS" => return Some((Self::Compress, Some(false))),
            "LOGGING" => return Some((Self::Logging, Some(true))),
            "NOLOGGING" => return Some((Self::Logging, Some(false))),
            "ENABLE ROW MOVEMENT" => return Some((Self::RowMovement, Some(true))),
            "DISABLE ROW MOVEMENT" => return Some((Self::RowMovement, Some(false))),
            _ => return None,
        };
        Some((key, None))
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Charset => "CHARACTER SET",
            Self::Collate => "COLLATE",
            Self::Comment => "COMMENT",
            Self::Compression => "COMPRESSION",
            Self::Engine => "ENGINE",
            Self::AutoIncrement => "AUTO_INCREMENT",
            Self::Tablegroup => "TABLEGROUP",
            Self::PrimaryZone => "PRIMARY_ZONE",
            Self::Locality => "LOCALITY",
            Self::RowFormat => "ROW_FORMAT",
            Self::BlockSize => "BLOCK_SIZE",
            Self::ReplicaNum => "REPLICA_NUM",
            Self::TabletSize => "TABLET_SIZE",
            Self::Pctfree => "PCTFREE",
            Self::UseBloomFilter => "USE_BLOOM_FILTER",
            Self::ProgressiveMergeNum => "PROGRESSIVE_MERGE_NUM",
            Self::ReadOnly => "READ ONLY",
            Self::Tablespace => "TABLESPACE",
            Self::KeyBlockSize => "KEY_BLOCK_SIZE",
            Self::AutoIncrementMode => "AUTO_INCREMENT_MODE",
            Self::EnableExtendedRowid => "ENABLE_EXTENDED_ROWID",
            Self::Parallel => "PARALLEL",
            Self::DuplicateScope => "DUPLICATE_SCOPE",
            Self::Ttl => "TTL",
            Self::KvAttributes => "KV_ATTRIBUTES",
            Self::LobInrowThreshold => "LOB_INROW_THRESHOLD",
            Self::DefaultLobInrowThreshold => "DEFAULT_LOB_INROW_THRESHOLD",
            Self::Sortkey => "SORTKEY",
            Self::StorageFormatVersion => "STORAGE_FORMAT_VERSION",
            Self::TableMode => "TABLE_MODE",
            Self::TabletId => "TABLET_ID",
            Self::Organization => "ORGANIZATION",
            Self::ExpireInfo => "EXPIRE_INFO",
            Self::Pctused => "PCTUSED",
            Self::Initrans => "INITRANS",
            Self::Maxtrans => "MAXTRANS",
            Self::Storage => "STORAGE",
            Self::Compress => "COMPRESS",
            Self::Logging => "LOGGING",
            Self::RowMovement => "ROW MOVEMENT",
        }
    }
}

/// Index options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexOptionKey {
    /// GLOBAL (on) or LOCAL (off).
    Global,
    BlockSize,
    Comment,
    Storing,
    WithRowid,
    WithParser,
    /// VISIBLE (on) or INVISIBLE (off).
    Visible,
    KeyBlockSize,
    Parallel,
    Using,
}

impl OptionKey for IndexOptionKey {
    fn classify(words: &str) -> Option<(Self, Option<bool>)> {
        let key = match words {
            "GLOBAL" => return Some((Self::Global, Some(true))),
            "LOCAL" => return Some((Self::Global, Some(false))),
            "BLOCK_SIZE" => Self::BlockSize,
            "COMMENT" => Self::Comment,
            "STORING" => Self::Storing,
            "WITH ROWID" => return Some((Self::WithRowid, Some(true))),
            "WITH PARSER" => Self::WithParser,
            "VISIBLE" => return Some((Self::Visible, Some(true))),
            "INVISIBLE" => return Some((Self::Visible, Some(false))),
            "KEY_BLOCK_SIZE" => Self::KeyBlockSize,
            "PARALLEL" => Self::Parallel,
            "NOPARALLEL" => return Some((Self::Parallel, Some(false))),
            "USING" => Self::Using,
            _ => return None,
        };
        Some((key, None))
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Global => "GLOBAL",
            Self::BlockSize => "BLOCK_SIZE",
            Self::Comment => "COMMENT",
            Self::Storing => "STORING",
            Self::WithRowid => "WITH ROWID",
            Self::WithParser => "WITH PARSER",
            Self::Visible => "VISIBLE",
            Self::KeyBlockSize => "KEY_BLOCK_SIZE",
            Self::Parallel => "PARALLEL",
            Self::Using => "USING",
        }
    }
}

/// Partition element attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PartitionAttrKey {
    Id,
    Engine,
    Comment,
    Tablespace,
}

impl OptionKey for PartitionAttrKey {
    fn classify(words: &str) -> Option<(Self, Option<bool>)> {
        let key = match words {
            "ID" => Self::Id,
            "ENGINE" | "STORAGE ENGINE" => Self::Engine,
            "COMMENT" => Self::Comment,
            "TABLESPACE" => Self::Tablespace,
            _ => return None,
        };
        Some((key, None))
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Engine => "ENGINE",
            Self::Comment => "COMMENT",
            Self::Tablespace => "TABLESPACE",
        }
    }
}

/// Database options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatabaseOptionKey {
    Charset,
    Collate,
    Comment,
    ReplicaNum,
    PrimaryZone,
    ReadOnly,
    DefaultTablegroup,
    DatabaseId,
}

impl OptionKey for DatabaseOptionKey {
    fn classify(words: &str) -> Option<(Self, Option<bool>)> {
        let key = match words {
            "CHARSET" | "CHARACTER SET" | "DEFAULT CHARSET" | "DEFAULT CHARACTER SET" => {
                Self::Charset
            }
            "COLLATE" | "DEFAULT COLLATE" => Self::Collate,
            "COMMENT" => Self::Comment,
            "REPLICA_NUM" => Self::ReplicaNum,
            "PRIMARY_ZONE" => Self::PrimaryZone,
            "READ ONLY" => return Some((Self::ReadOnly, Some(true))),
            "READ WRITE" => return Some((Self::ReadOnly, Some(false))),
            "DEFAULT TABLEGROUP" | "TABLEGROUP" => Self::DefaultTablegroup,
            "DATABASE_ID" => Self::DatabaseId,
            _ => return None,
        };
        Some((key, None))
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Charset => "CHARACTER SET",
            Self::Collate => "COLLATE",
            Self::Comment => "COMMENT",
            Self::ReplicaNum => "REPLICA_NUM",
            Self::PrimaryZone => "PRIMARY_ZONE",
            Self::ReadOnly => "READ ONLY",
            Self::DefaultTablegroup => "DEFAULT TABLEGROUP",
            Self::DatabaseId => "DATABASE_ID",
        }
    }
}

/// Tablegroup options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TablegroupOptionKey {
    Locality,
    PrimaryZone,
    TablegroupId,
    Binding,
    MaxUsedPartId,
    Sharding,
}

impl OptionKey for TablegroupOptionKey {
    fn classify(words: &str) -> Option<(Self, Option<bool>)> {
        let key = match words {
            "LOCALITY" => Self::Locality,
            "PRIMARY_ZONE" => Self::PrimaryZone,
            "TABLEGROUP_ID" => Self::TablegroupId,
            "BINDING" => Self::Binding,
            "MAX_USED_PART_ID" => Self::MaxUsedPartId,
            "SHARDING" => Self::Sharding,
            _ => return None,
        };
        Some((key, None))
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Locality => "LOCALITY",
            Self::PrimaryZone => "PRIMARY_ZONE",
            Self::TablegroupId => "TABLEGROUP_ID",
            Self::Binding => "BINDING",
            Self::MaxUsedPartId => "MAX_USED_PART_ID",
            Self::Sharding => "SHARDING",
        }
    }
}

/// Tablespace options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TablespaceOptionKey {
    Encryption,
    Engine,
}

impl OptionKey for TablespaceOptionKey {
    fn classify(words: &str) -> Option<(Self, Option<bool>)> {
        match words {
            "ENCRYPTION" => Some((Self::Encryption, None)),
            "ENGINE" => Some((Self::Engine, None)),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Encryption => "ENCRYPTION",
            Self::Engine => "ENGINE",
        }
    }
}

/// Sequence options. The `NO*` spellings switch their option off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceOptionKey {
    IncrementBy,
    StartWith,
    MaxValue,
    MinValue,
    Cycle,
    Cache,
    Order,
    Restart,
}

impl OptionKey for SequenceOptionKey {
    fn classify(words: &str) -> Option<(Self, Option<bool>)> {
        let found = match words {
            "INCREMENT BY" => (Self::IncrementBy, None),
            "START WITH" => (Self::StartWith, None),
            "MAXVALUE" => (Self::MaxValue, None),
            "NOMAXVALUE" => (Self::MaxValue, Some(false)),
            "MINVALUE" => (Self::MinValue, None),
            "NOMINVALUE" => (Self::MinValue, Some(false)),
            "CYCLE" => (Self::Cycle, Some(true)),
            "NOCYCLE" => (Self::Cycle, Some(false)),
            "CACHE" => (Self::Cache, None),
            "NOCACHE" => (Self::Cache, Some(false)),
            "ORDER" => (Self::Order, Some(true)),
            "NOORDER" => (Self::Order, Some(false)),
            "RESTART" => (Self::Restart, Some(true)),
            _ => return None,
        };
        Some(found)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::IncrementBy => "INCREMENT BY",
            Self::StartWith => "START WITH",
            Self::MaxValue => "MAXVALUE",
            Self::MinValue => "MINVALUE",
            Self::Cycle => "CYCLE",
            Self::Cache => "CACHE",
            Self::Order => "ORDER",
            Self::Restart => "RESTART",
        }
    }
}

/// Resource unit and resource pool options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceOptionKey {
    MinCpu,
    MaxCpu,
    MemorySize,
    MinIops,
    MaxIops,
    IopsWeight,
    LogDiskSize,
    MaxNetBandwidth,
    NetBandwidthWeight,
    Unit,
    UnitNum,
    ZoneList,
    ReplicaType,
}

impl OptionKey for ResourceOptionKey {
    fn classify(words: &str) -> Option<(Self, Option<bool>)> {
        let key = match words {
            "MIN_CPU" => Self::MinCpu,
            "MAX_CPU" => Self::MaxCpu,
            "MEMORY_SIZE" => Self::MemorySize,
            "MIN_IOPS" => Self::MinIops,
            "MAX_IOPS" => Self::MaxIops,
            "IOPS_WEIGHT" => Self::IopsWeight,
            "LOG_DISK_SIZE" => Self::LogDiskSize,
            "MAX_NET_BANDWIDTH" => Self::MaxNetBandwidth,
            "NET_BANDWIDTH_WEIGHT" => Self::NetBandwidthWeight,
            "UNIT" => Self::Unit,
            "UNIT_NUM" => Self::UnitNum,
            "ZONE_LIST" => Self::ZoneList,
            "REPLICA_TYPE" => Self::ReplicaType,
            _ => return None,
        };
        Some((key, None))
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::MinCpu => "MIN_CPU",
            Self::MaxCpu => "MAX_CPU",
            Self::MemorySize => "MEMORY_SIZE",
            Self::MinIops => "MIN_IOPS",
            Self::MaxIops => "MAX_IOPS",
            Self::IopsWeight => "IOPS_WEIGHT",
            Self::LogDiskSize => "LOG_DISK_SIZE",
            Self::MaxNetBandwidth => "MAX_NET_BANDWIDTH",
            Self::NetBandwidthWeight => "NET_BANDWIDTH_WEIGHT",
            Self::Unit => "UNIT",
            Self::UnitNum => "UNIT_NUM",
            Self::ZoneList => "ZONE_LIST",
            Self::ReplicaType => "REPLICA_TYPE",
        }
    }
}

/// Tenant options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenantOptionKey {
    LogonlyReplicaNum,
    Locality,
    ReplicaNum,
    RewriteMergeVersion,
    StorageFormatVersion,
    StorageFormatWorkVersion,
    PrimaryZone,
    ResourcePoolList,
    ZoneList,
    Charset,
    Collate,
    Comment,
    ReadOnly,
    DefaultTablegroup,
    ProgressiveMergeNum,
    EnableArbitrationService,
}

impl OptionKey for TenantOptionKey {
    fn classify(words: &str) -> Option<(Self, Option<bool>)> {
        let key = match words {
            "LOGONLY_REPLICA_NUM" => Self::LogonlyReplicaNum,
            "LOCALITY" => Self::Locality,
            "REPLICA_NUM" => Self::ReplicaNum,
            "REWRITE_MERGE_VERSION" => Self::RewriteMergeVersion,
            "STORAGE_FORMAT_VERSION" => Self::StorageFormatVersion,
            "STORAGE_FORMAT_WORK_VERSION" => Self::StorageFormatWorkVersion,
            "PRIMARY_ZONE" => Self::PrimaryZone,
            "RESOURCE_POOL_LIST" => Self::ResourcePoolList,
            "ZONE_LIST" => Self::ZoneList,
            "CHARSET" | "CHARACTER SET" | "DEFAULT CHARSET" | "DEFAULT CHARACTER SET" => {
                Self::Charset
            }
            "COLLATE" | "DEFAULT COLLATE" => Self::Collate,
            "COMMENT" => Self::Comment,
            "READ ONLY" => return Some((Self::ReadOnly, Some(true))),
            "READ WRITE" => return Some((Self::ReadOnly, Some(false))),
            "DEFAULT TABLEGROUP" => Self::DefaultTablegroup,
            "PROGRESSIVE_MERGE_NUM" => Self::ProgressiveMergeNum,
            "ENABLE_ARBITRATION_SERVICE" => Self::EnableArbitrationService,
            _ => return None,
        };
        Some((key, None))
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::LogonlyReplicaNum => "LOGONLY_REPLICA_NUM",
            Self::Locality => "LOCALITY",
            Self::ReplicaNum => "REPLICA_NUM",
            Self::RewriteMergeVersion => "REWRITE_MERGE_VERSION",
            Self::StorageFormatVersion => "STORAGE_FORMAT_VERSION",
            Self::StorageFormatWorkVersion => "STORAGE_FORMAT_WORK_VERSION",
            Self::PrimaryZone => "PRIMARY_ZONE",
            Self::ResourcePoolList => "RESOURCE_POOL_LIST",
            Self::ZoneList => "ZONE_LIST",
            Self::Charset => "CHARACTER SET",
            Self::Collate => "COLLATE",
            Self::Comment => "COMMENT",
            Self::ReadOnly => "READ ONLY",
            Self::DefaultTablegroup => "DEFAULT TABLEGROUP",
            Self::ProgressiveMergeNum => "PROGRESSIVE_MERGE_NUM",
            Self::EnableArbitrationService => "ENABLE_ARBITRATION_SERVICE",
        }
    }
}

/// Per-user resource limits (`WITH MAX_USER_CONNECTIONS 3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserResourceKey {
    MaxConnectionsPerHour,
    MaxUserConnections,
    MaxQueriesPerHour,
    MaxUpdatesPerHour,
}

impl OptionKey for UserResourceKey {
    fn classify(words: &str) -> Option<(Self, Option<bool>)> {
        let key = match words {
            "MAX_CONNECTIONS_PER_HOUR" => Self::MaxConnectionsPerHour,
            "MAX_USER_CONNECTIONS" => Self::MaxUserConnections,
            "MAX_QUERIES_PER_HOUR" => Self::MaxQueriesPerHour,
            "MAX_UPDATES_PER_HOUR" => Self::MaxUpdatesPerHour,
            _ => return None,
        };
        Some((key, None))
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::MaxConnectionsPerHour => "MAX_CONNECTIONS_PER_HOUR",
            Self::MaxUserConnections => "MAX_USER_CONNECTIONS",
            Self::MaxQueriesPerHour => "MAX_QUERIES_PER_HOUR",
            Self::MaxUpdatesPerHour => "MAX_UPDATES_PER_HOUR",
        }
    }
}

/// Table options.
pub type TableOptions = OptionSet<TableOptionKey>;
/// Index options.
pub type IndexOptions = OptionSet<IndexOptionKey>;
/// Partition element attributes.
pub type PartitionAttributes = OptionSet<PartitionAttrKey>;
/// Database options.
pub type DatabaseOptions = OptionSet<DatabaseOptionKey>;
/// Tablegroup options.
pub type TablegroupOptions = OptionSet<TablegroupOptionKey>;
/// Tablespace options.
pub type TablespaceOptions = OptionSet<TablespaceOptionKey>;
/// Sequence options.
pub type SequenceOptions = OptionSet<SequenceOptionKey>;
/// Resource unit and pool options.
pub type ResourceOptions = OptionSet<ResourceOptionKey>;
/// Tenant options.
pub type TenantOptions = OptionSet<TenantOptionKey>;
/// Per-user resource limits.
pub type UserResources = OptionSet<UserResourceKey>;

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> OptionValue {
        OptionValue::Word(Ident::new(text, Span::default()))
    }

    fn entry(key: TableOptionKey, value: OptionValue) -> OptionEntry<TableOptionKey> {
        OptionEntry {
            key,
            value,
            force: false,
            span: Span::default(),
        }
    }

    #[test]
    fn test_spellings_share_a_key() {
        assert_eq!(
            TableOptionKey::classify("DEFAULT CHARACTER SET"),
            Some((TableOptionKey::Charset, None))
        );
        assert_eq!(
            TableOptionKey::classify("READ WRITE"),
            Some((TableOptionKey::ReadOnly, Some(false)))
        );
        assert_eq!(
            SequenceOptionKey::classify("NOMAXVALUE"),
            Some((SequenceOptionKey::MaxValue, Some(false)))
        );
        assert_eq!(IndexOptionKey::classify("BOGUS"), None);
    }

    #[test]
    fn test_last_insert_wins() {
        let mut set = TableOptions::new();
        assert!(set.insert(entry(TableOptionKey::Charset, word("a"))).is_none());
        set.insert(entry(TableOptionKey::Engine, word("InnoDB")));
        let previous = set.insert(entry(TableOptionKey::Charset, word("b")));
        assert_eq!(previous.map(|e| e.value), Some(word("a")));
        assert_eq!(set.len(), 2);
        assert_eq!(set.text(TableOptionKey::Charset).as_deref(), Some("b"));
    }

    #[test]
    fn test_same_as_ignores_word_case() {
        assert!(word("utf8").same_as(&word("UTF8")));
        assert!(!word("utf8").same_as(&word("gbk")));
        assert!(OptionValue::Switch(true).same_as(&OptionValue::Switch(true)));
    }
}
