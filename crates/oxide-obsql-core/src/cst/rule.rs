//! Grammar production kinds.
//!
//! One variant per production of the OceanBase MySQL-mode grammar, in grammar
//! order, followed by the productions only Oracle mode reaches. The
//! enumeration is versioned together with the grammar: adding a production
//! means adding a variant here and either a reduction entry or an
//! explicit identity default in the reduction table.

use oxide_obsql_derive::GrammarRules;
use serde::{Deserialize, Serialize};

/// A grammar production kind.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, GrammarRules,
)]
#[repr(u16)]
pub enum RuleKind {
    // Top level
    SqlStmt,
    StmtList,
    Stmt,
    PlExprStmt,
    SwitchoverTenantStmt,
    SwitchoverClause,
    RecoverTenantStmt,
    RecoverPointClause,
    TransferPartitionStmt,
    TransferPartitionClause,
    PartInfo,
    CancelTransferPartitionClause,

    // Expressions
    ExprList,
    ExprAsList,
    ExprWithOptAlias,
    ColumnRef,
    ComplexStringLiteral,
    CharsetIntroducer,
    Literal,
    NumberLiteral,
    ExprConst,
    ConfConst,
    GlobalOrSessionAlias,
    BoolPri,
    Predicate,
    StringValList,
    BitExpr,
    SimpleExpr,
    Expr,
    Not,
    AnyExpr,
    InExpr,
    CaseExpr,
    WindowFunction,
    FirstOrLast,
    RespectOrIgnore,
    WinFunFirstLastParams,
    NewGeneralizedWindowClause,
    NewGeneralizedWindowClauseWithBlanket,
    NamedWindows,
    NamedWindow,
    GeneralizedWindowClause,
    WinRowsOrRange,
    WinPrecedingOrFollowing,
    WinInterval,
    WinBounding,
    WinWindow,
    WhenClauseList,
    WhenClause,
    CaseDefault,
    SimpleFuncExpr,
    ComplexFuncExpr,
    VectorDistanceExpr,
    VectorDistanceMetric,
    MvtParam,
    SysIntervalFunc,
    UtcTimestampFunc,
    UtcTimeFunc,
    UtcDateFunc,
    SysdateFunc,
    CurTimestampFunc,
    NowSynonymsFunc,
    CurTimeFunc,
    CurDateFunc,
    SubstrOrSubstring,
    SubstrParams,
    DateParams,
    TimestampParams,
    WsLevelListOrRange,
    WsLevelList,
    WsLevelListItem,
    WsLevelRange,
    WsLevelNumber,
    WsLevelFlags,
    WsNweights,
    WsLevelFlagDesc,
    WsLevelFlagReverse,

    // Delete and update
    DeleteStmt,
    DeleteBasicStmt,
    DeleteOptionList,
    DeleteOption,
    MultiDeleteTable,
    UpdateStmt,
    UpdateBasicStmt,
    UpdateAsgnList,
    UpdateAsgnFactor,

    // Resources and tenants
    CreateResourceStmt,
    OptResourceUnitOptionList,
    ResourceUnitOption,
    OptCreateResourcePoolOptionList,
    CreateResourcePoolOption,
    AlterResourcePoolOptionList,
    UnitIdList,
    IdList,
    AlterResourcePoolOption,
    AlterResourceStmt,
    DropResourceStmt,
    CreateTenantStmt,
    CreateStandbyTenantStmt,
    LogRestoreSourceOption,
    OptTenantOptionList,
    TenantOption,
    ZoneList,
    ResourcePoolList,
    AlterTenantStmt,
    CreateTenantSnapshotStmt,
    SnapshotName,
    DropTenantSnapshotStmt,
    CloneTenantStmt,
    CloneSnapshotOption,
    CloneTenantOption,
    CloneTenantOptionList,
    DropTenantStmt,
    CreateRestorePointStmt,
    DropRestorePointStmt,

    // Databases
    CreateDatabaseStmt,
    DatabaseKey,
    DatabaseFactor,
    DatabaseOptionList,
    DatabasesExpr,
    CharsetKey,
    DatabaseOption,
    ReadOnlyOrWrite,
    DropDatabaseStmt,
    AlterDatabaseStmt,

    // Load data
    LoadDataStmt,
    LoadDataWithOptHint,
    CompressionName,
    LinesOrRows,
    FieldOrVarsList,
    FieldOrVars,
    LoadSetList,
    LoadSetElement,
    LoadDataExtendedOptionList,
    LoadDataExtendedOption,

    // Tables
    UseDatabaseStmt,
    SpecialTableType,
    CreateTableLikeStmt,
    CreateTableStmt,
    IgnoreOrReplace,
    RetType,
    CreateFunctionStmt,
    DropFunctionStmt,
    DropProcedureStmt,
    DropTriggerStmt,
    TableElementList,
    TableElement,
    OutOfLineConstraint,
    ReferencesClause,
    OutOfLineIndex,
    OutOfLinePrimaryIndex,
    OutOfLineUniqueIndex,
    OptReferenceOptionList,
    ReferenceOption,
    ReferenceAction,
    MatchAction,
    ColumnDefinition,
    OptGeneratedOptionList,
    OptGeneratedColumnAttributeList,
    GeneratedColumnAttribute,
    ColumnDefinitionRef,
    ColumnDefinitionList,
    CastDataType,
    GetFormatUnit,
    PrecisionIntNum,
    PrecisionDecimalNum,
    DataTypePrecision,
    DataType,
    StringList,
    TextString,
    CollectionTypeI,
    JsonTypeI,
    RoaringbitmapTypeI,
    VectorTypeI,
    BitTypeI,
    IntTypeI,
    FloatTypeI,
    NumberTypeI,
    TextTypeI,
    CharacterTypeI,
    BoolTypeI,
    GeoTypeI,
    DatetimeTypeI,
    DateYearTypeI,
    BlobTypeI,
    BinaryTypeI,
    StringLengthI,
    CollationName,
    TransParamName,
    TransParamValue,
    CharsetName,
    CharsetNameOrDefault,
    Collation,
    OptColumnAttributeList,
    ColumnAttribute,
    NowOrSignedLiteral,
    SignedLiteral,
    OptComma,
    TableOptionListSpaceSeperated,
    TableOptionList,
    PrimaryZoneName,
    Tablespace,
    LocalityName,
    TableOption,
    MergeInsertTypes,
    ParallelOption,
    TtlDefinition,
    TtlExpr,
    TtlUnit,
    RelationNameOrString,
    OptEqualMark,
    PartitionOption,
    AutoPartitionOption,
    ColumnGroupElement,
    ColumnGroupList,
    WithColumnGroup,
    PartitionSize,
    AutoPartitionType,
    AutoRangeType,
    HashPartitionOption,
    ListPartitionOption,
    KeyPartitionOption,
    RangePartitionOption,
    PartitionOptions,
    PartitionNum,
    AuxColumnList,
    VerticalColumnName,
    ColumnNameList,
    SubpartitionOption,
    SubpartitionTemplateOption,
    SubpartitionIndividualOption,
    OptHashPartitionList,
    HashPartitionList,
    SubpartitionList,
    HashPartitionElement,
    OptRangePartitionList,
    RangePartitionList,
    RangePartitionElement,
    OptListPartitionList,
    ListPartitionList,
    ListPartitionElement,
    OptHashSubpartitionList,
    HashSubpartitionList,
    PartitionAttributesOption,
    HashSubpartitionElement,
    OptRangeSubpartitionList,
    RangeSubpartitionList,
    RangeSubpartitionElement,
    OptListSubpartitionList,
    ListSubpartitionList,
    ListSubpartitionElement,
    ListPartitionExpr,
    ListExpr,
    RangePartitionExpr,
    RangeExprList,
    RangeExpr,
    IntOrDecimal,
    TgHashPartitionOption,
    TgKeyPartitionOption,
    TgRangePartitionOption,
    TgListPartitionOption,
    TgSubpartitionOption,
    TgSubpartitionTemplateOption,
    TgSubpartitionIndividualOption,
    RowFormatOption,
    ExternalPropertiesList,
    ExternalProperties,
    ExternalPropertiesKey,
    ExternalFileFormatList,
    ExternalFileFormat,

    // Tablegroups
    CreateTablegroupStmt,
    DropTablegroupStmt,
    AlterTablegroupStmt,
    TablegroupOptionListSpaceSeperated,
    TablegroupOptionList,
    TablegroupOption,
    AlterTablegroupActions,
    AlterTablegroupAction,
    DefaultTablegroup,

    // Views and materialized views
    CreateViewStmt,
    CreateMviewStmt,
    CreateMviewOpts,
    MviewEnableDisable,
    MviewRefreshOpt,
    MvRefreshOnClause,
    MvRefreshMethod,
    MvRefreshMode,
    MvRefreshInterval,
    MvStartClause,
    MvNextClause,
    ViewAttribute,
    ViewCheckOption,
    ViewAlgorithm,
    ViewSelectStmt,
    ViewName,
    MvColumnList,
    OptTabletId,
    OptTabletIdNoEmpty,

    // Indexes and constraints
    CreateIndexStmt,
    IndexName,
    CheckState,
    OptConstraintName,
    ConstraintName,
    SortColumnList,
    SortColumnKey,
    OptIndexOptions,
    IndexOption,
    IndexUsingAlgorithm,

    // Materialized view logs
    CreateMlogStmt,
    OptMlogOptions,
    MlogOption,
    MlogWithValues,
    MlogWithSpecialColumns,
    MlogWithSpecialColumnList,
    MlogWithSpecialColumn,
    MlogWithReferenceColumns,
    MlogWithReferenceColumnList,
    MlogWithReferenceColumn,
    MlogIncludingOrExcluding,
    MlogPurgeValues,
    MlogPurgeImmediateSyncOrAsync,
    MlogPurgeStart,
    MlogPurgeNext,
    DropMlogStmt,

    // Drop
    DropTableStmt,
    TableOrTables,
    DropViewStmt,
    TableList,
    DropIndexStmt,

    // Insert
    InsertStmt,
    SingleTableInsert,
    ValuesClause,
    ValueOrValues,
    ReplaceWithOptHint,
    InsertWithOptHint,
    ColumnList,
    InsertValsList,
    InsertVals,
    ExprOrDefault,

    // Queries
    SelectStmt,
    SelectWithParens,
    SelectNoParens,
    NoTableSelect,
    SelectClause,
    SelectClauseSetWithOrderAndLimit,
    SelectClauseSet,
    SelectClauseSetRight,
    SelectClauseSetLeft,
    NoTableSelectWithOrderAndLimit,
    OptApprox,
    SimpleSelectWithOrderAndLimit,
    SelectWithParensWithOrderAndLimit,
    SelectWithOptHint,
    UpdateWithOptHint,
    DeleteWithOptHint,
    SimpleSelect,
    SetTypeUnion,
    SetTypeOther,
    SetType,
    SetExpressionOption,
    OptHintValue,
    LimitClause,
    IntoClause,
    IntoOpt,
    IntoVarList,
    IntoVar,
    FieldOpt,
    FieldTermList,
    FieldTerm,
    FileOpt,
    FileOptionList,
    FileOption,
    FilePartitionOpt,
    FileSizeConst,
    LineOpt,
    LineTermList,
    LineTerm,
    HintListWithEnd,
    OptHintList,
    HintOptions,
    NameList,
    HintOption,
    ConsistencyLevel,
    UsePlanCacheType,
    UseJitType,
    DistributeMethod,
    LimitExpr,
    ForUpdateClause,
    OptLockInShareMode,
    OptForUpdateWait,
    ParameterizedTrim,
    GroupbyClause,
    SortListForGroupBy,
    SortKeyForGroupBy,
    OrderBy,
    SortList,
    SortKey,
    QueryExpressionOptionList,
    QueryExpressionOption,
    Projection,
    SelectExprList,
    FromList,
    TableReferences,
    TableReferencesParen,
    TableReference,
    TableFactor,
    TblName,
    DmlTableName,
    Seed,
    SamplePercent,
    SampleClause,
    TableSubquery,
    TableSubqueryAlias,
    UsePartition,
    ExternalTablePartitions,
    ExternalTablePartition,
    UseFlashback,
    IndexHintType,
    KeyOrIndex,
    IndexHintScope,
    IndexElement,
    IndexList,
    IndexHintDefinition,
    IndexHintList,
    RelationFactor,
    RelationWithStarList,
    RelationFactorWithStar,
    NormalRelationFactor,
    DotRelationFactor,
    RelationFactorInHint,
    QbNameOption,
    RelationFactorInHintList,
    RelationSepOption,
    RelationFactorInPqHint,
    RelationFactorInLeadingHint,
    RelationFactorInLeadingHintList,
    RelationFactorInLeadingHintListEntry,
    RelationFactorInUseJoinHintList,
    TracingNumList,
    JoinCondition,
    JoinedTable,
    NaturalJoinType,
    InnerJoinType,
    OuterJoinType,
    WithClause,
    WithList,
    CommonTableExpr,
    AliasNameList,
    ColumnAliasName,
    TableValuesClause,
    TableValuesClauseWithOrderByAndLimit,
    ValuesRowList,
    RowValue,

    // Analyze, outlines, explain and show
    AnalyzeStmt,
    AnalyzeStatisticsClause,
    OptAnalyzeForClauseList,
    OptAnalyzeForClauseElement,
    SampleOption,
    ForAll,
    SizeClause,
    ForColumns,
    ForColumnsList,
    ForColumnsItem,
    ColumnClause,
    CreateOutlineStmt,
    AlterOutlineStmt,
    DropOutlineStmt,
    ExplainStmt,
    ExplainOrDesc,
    ExplainableStmt,
    FormatName,
    ShowStmt,
    CheckTableOptions,
    CheckTableOption,
    GetDiagnosticsStmt,
    GetConditionDiagnosticsStmt,
    ConditionArg,
    ConditionInformationItemList,
    ConditionInformationItem,
    ConditionInformationItemName,
    GetStatementDiagnosticsStmt,
    StatementInformationItemList,
    StatementInformationItem,
    StatementInformationItemName,
    DatabasesOrSchemas,
    OptForGrantUser,
    OptStorage,
    ColumnsOrFields,
    DatabaseOrSchema,
    IndexOrIndexesOrKeys,
    FromOrIn,
    CalibrationInfoList,
    OptShowEngine,
    HelpStmt,

    // Tablespaces
    CreateTablespaceStmt,
    PermanentTablespace,
    PermanentTablespaceOption,
    OptTablespaceOption,
    OptTablespaceEngine,
    DropTablespaceStmt,
    AlterTablespaceOptions,
    AlterTablespaceAction,
    AlterTablespaceActions,
    OptAlterTablespaceOptions,
    OptAlterTablespaceOption,
    AlterTablespaceStmt,
    RotateMasterKeyStmt,
    PermanentTablespaceOptions,
    OptTablespaceOptions,

    // Users and roles
    CreateUserStmt,
    UserSpecificationList,
    UserSpecification,
    UserSpecificationWithoutPassword,
    UserSpecificationWithPassword,
    RequireSpecification,
    ResourceOptionList,
    ResourceOption,
    TlsOptionList,
    TlsOption,
    User,
    OptHostName,
    UserHostOrCurrentUser,
    UserWithHostName,
    Password,
    DropUserStmt,
    UserList,
    CreateRoleStmt,
    RoleList,
    UserSpecificationWithoutPasswordList,
    DropRoleStmt,
    RoleWithHost,
    Role,
    SetPasswordStmt,
    OptForUser,
    RenameUserStmt,
    RenameInfo,
    RenameList,
    LockUserStmt,
    LockSpecMysql57,

    // Table locks
    LockTablesStmt,
    UnlockTablesStmt,
    LockTableList,
    LockTable,
    LockType,

    // Sequences and database links
    CreateSequenceStmt,
    SequenceOptionList,
    SequenceOption,
    SimpleNum,
    DropSequenceStmt,
    AlterSequenceStmt,
    CreateDblinkStmt,
    DropDblinkStmt,

    // Transactions
    BeginStmt,
    XaBeginStmt,
    XaEndStmt,
    XaPrepareStmt,
    XaCommitStmt,
    XaRollbackStmt,
    CommitStmt,
    RollbackStmt,
    KillStmt,

    // Privileges
    GrantStmt,
    GrantPrivileges,
    RoleOrPrivList,
    RoleOrPriv,
    ObjectType,
    PrivLevel,
    GrantOptions,
    RevokeStmt,

    // Prepared statements and variables
    PrepareStmt,
    StmtName,
    PreparableStmt,
    VariableSetStmt,
    SysVarAndValList,
    VarAndValList,
    SetExprOrDefault,
    VarAndVal,
    SysVarAndVal,
    ScopeOrScopeAlias,
    ToOrEq,
    SetRoleStmt,
    DefaultSetRoleClause,
    SetRoleClause,
    ExecuteStmt,
    ArgumentList,
    Argument,
    DeallocatePrepareStmt,
    DeallocateOrDrop,

    // Truncate
    TruncateTableStmt,

    // Audit
    AuditStmt,
    AuditOrNoaudit,
    AuditClause,
    AuditOperationClause,
    AuditAllShortcutList,
    AuditingOnClause,
    AuditUserList,
    AuditUserWithHostName,
    AuditUser,
    AuditingByUserClause,
    OpAuditTailClause,
    AuditBySessionAccessOption,
    AuditWheneverOption,
    AuditAllShortcut,

    // Rename and alter table
    RenameTableStmt,
    RenameTableActions,
    RenameTableAction,
    AlterTableStmt,
    AlterExternalTableAction,
    AddExternalTablePartitionActions,
    AddExternalTablePartitionAction,
    AlterTableActions,
    AlterTableAction,
    AlterConstraintOption,
    AlterPartitionOption,
    OptPartitionRangeOrList,
    AlterTgPartitionOption,
    DropPartitionNameList,
    ModifyPartitionInfo,
    ModifyTgPartitionInfo,
    AlterIndexOption,
    VisibilityOption,
    AlterColumnGroupAction,
    AlterColumnOption,
    AlterTablegroupOption,
    AlterColumnBehavior,

    // Recycle bin and maintenance
    FlashbackStmt,
    PurgeStmt,
    OptimizeStmt,
    DumpMemoryStmt,

    // Alter system
    AlterSystemStmt,
    OptSqlThrottleUsingCond,
    SqlThrottleOneOrMoreMetrics,
    SqlThrottleMetric,
    ChangeTenantNameOrTenantId,
    CacheType,
    BalanceTaskType,
    TenantListTuple,
    TenantNameList,
    BackupTenantNameList,
    FlushScope,
    ServerInfoList,
    ServerInfo,
    SharedStorageInfo,
    ServerAction,
    ServerList,
    ZoneAction,
    IpPort,
    ZoneDesc,
    PolicyName,
    ServerOrZone,
    AddOrAlterZoneOption,
    AddOrAlterZoneOptions,
    AlterOrChangeOrModify,
    OptPathInfo,
    OptStorageUseFor,
    OptScopeType,
    PartitionIdDesc,
    Ls,
    LsServerOrServerOrZoneOrTenant,
    MigrateAction,
    ChangeActions,
    ChangeAction,
    ReplicaType,
    MemstorePercent,
    SuspendOrResume,
    BaselineIdExpr,
    SqlIdExpr,
    SqlIdOrSchemaIdExpr,
    NamespaceExpr,
    BaselineAsgnFactor,
    TenantName,
    CacheName,
    FileId,
    CancelTaskType,
    AlterSystemSetParameterActions,
    AlterSystemSetParameterAction,
    AlterSystemSettpActions,
    SettpOption,
    ClusterRole,
    PartitionRole,
    LsRole,
    UpgradeAction,

    // Plugins, flush, handlers, servers and logfile groups
    MockStmt,
    PluginName,
    InstallPluginStmt,
    UninstallPluginStmt,
    FlushStmt,
    FlushOptions,
    FlushOptionsList,
    FlushOption,
    HandlerStmt,
    HandlerReadOrScan,
    HandlerScanFunction,
    HandlerRkeyFunction,
    HandlerRkeyMode,
    ShowPluginStmt,
    CreateServerStmt,
    ServerOptionsList,
    ServerOption,
    AlterServerStmt,
    DropServerStmt,
    CreateLogfileGroupStmt,
    LogfileGroupInfo,
    AddLogFile,
    LgUndofile,
    LgRedofile,
    LogfileGroupOptionList,
    LogfileGroupOptions,
    LogfileGroupOption,
    OptTsInitialSize,
    OptTsUndoBufferSize,
    OptTsRedoBufferSize,
    OptTsNodegroup,
    OptTsComment,
    AlterLogfileGroupStmt,
    AlterLogfileGroupInfo,
    AlterLogfileGroupOptionList,
    AlterLogfileGroupOptions,
    AlterLogfileGroupOption,
    DropLogfileGroupStmt,
    DropTsOptionsList,
    DropTsOptions,
    DropTsOption,
    TsWait,
    OptTsEngine,
    MethodOpt,
    MethodList,
    Method,

    // Session settings
    SetNamesStmt,
    SetCharsetStmt,
    SetTransactionStmt,
    TransactionCharacteristics,
    TransactionAccessMode,
    IsolationLevel,
    OptEncryptKey,

    // Savepoints
    CreateSavepointStmt,
    RollbackSavepointStmt,
    ReleaseSavepointStmt,

    // Clusters
    AlterClusterStmt,
    ClusterDefine,
    ClusterOptionList,
    ClusterOption,
    ClusterAction,
    SwitchoverClusterStmt,
    CommitSwitchoverClause,
    ProtectionModeStmt,
    ProtectionModeOption,
    ClusterName,
    DisconnectClusterStmt,

    // Names
    VarName,
    NewOrOld,
    NewOrOldColumnRef,
    ColumnName,
    RelationName,
    FunctionName,
    ColumnLabel,
    DateUnit,
    ServiceNameStmt,
    ServiceOp,

    // JSON functions
    JsonTableExpr,
    MockJtOnErrorOnEmpty,
    JtColumnList,
    JsonTableColumnDef,
    JsonTableOrdinalityColumnDef,
    JsonTableExistsColumnDef,
    JsonTableValueColumnDef,
    JsonTableNestedColumnDef,
    OptValueOnEmptyOrErrorOrMismatch,
    OptOnMismatch,
    VecIndexParams,
    VecIndexParam,
    VecIndexParamValue,
    JsonQueryExpr,
    JsonQueryOpt,
    ScalarsOpt,
    WrapperOpts,
    JsonQueryOnOpt,
    OptResponseQuery,
    OnMismatchQuery,
    OnErrorQuery,
    OnEmptyQuery,
    JsonValueExpr,
    JsonValueOpt,
    JsonValueOnOpt,
    OptOnEmptyOrError,
    OnEmpty,
    OnError,
    JsonOnResponse,

    // Storage attributes
    OptSkipIndexTypeList,
    SkipIndexType,
    LobChunkSize,
    LobStorageParameter,
    LobStorageParameters,
    LobStorageClause,

    // Keyword classes
    UnreservedKeyword,
    UnreservedKeywordForRoleName,
    UnreservedKeywordNormal,
    UnreservedKeywordSpecial,
    UnreservedKeywordExtra,
    UnreservedKeywordAmbiguousRoles,
    MysqlReservedKeyword,
    Empty,
    ForwardExpr,
    ForwardSqlStmt,

    // Oracle mode
    IntervalTypeI,
    RowidTypeI,
    FetchNextClause,
    HierarchicalQueryClause,
    StorageOptions,
    CompressOption,
}
