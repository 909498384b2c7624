//! Partial results passed from a rule to its parent.
//!
//! Every reduction hook returns one [`Fragment`]. Parents pull typed values
//! out of their children with [`FromFragment`]; terminals arrive untouched as
//! [`Fragment::Token`].

use serde::{Deserialize, Serialize};

use crate::ast::{
    AlterPartition, AlterTableItem, Assignment, CheckConstraint, ColumnDef, Cte, DataType,
    DatabaseOptions, ExportTerm, Expr, Fetch, ForeignKeyReference, FrameBound, GroupBy, Hierarchy,
    Ident,
    IndexAlgorithm, IndexHint, IndexOptions, IntoTarget, JoinConstraint, JoinKind,
    JsonQueryResponse, JsonValueResponse, JsonWrapper, Limit, Literal, LockClause, LockTable,
    NamedWindow, ObjectName, OptionValue, OrderItem, PartitionAttributes, PartitionBound,
    PartitionElement, PartitionSpec, Privilege, PrivilegeLevel, Query, RangeValue,
    ResourceOptions, Select, SelectItem, SequenceOptions, SetExpr, SortColumn, Statement,
    SubpartitionSpec, SystemParameter, TableConstraint, TableOptions, TableRef, TableRename,
    TablegroupOptions, TablespaceOptions, TenantOptions, TlsOption, UserName, UserRename,
    UserResources, UserSpec, VariableAssignment, WhenBranch, WindowFrame, WindowSpec, With,
};
use crate::cst::Terminal;
use crate::lexer::Span;

/// One `KEY [=] value [FORCE]` item before it is classified by its list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOption {
    /// Leading words, upper case and space separated.
    pub words: String,
    /// Value, absent for flag options.
    pub value: Option<OptionValue>,
    /// Trailing FORCE.
    pub force: bool,
    /// Source span.
    pub span: Span,
}

/// A column attribute before it is folded into its column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnAttrKind {
    Nullable(bool),
    Default(Expr),
    AutoIncrement,
    PrimaryKey,
    Unique,
    Comment(Literal),
    OnUpdate(Expr),
    Collate(Ident),
    Check(CheckConstraint),
    Srid(String),
    Id(String),
    Visible(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAttr {
    pub kind: ColumnAttrKind,
    pub span: Span,
}

/// A clause of JSON_VALUE or JSON_QUERY before it is folded into the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonClause {
    ValueOn {
        /// ON EMPTY (true) or ON ERROR (false).
        empty: bool,
        response: JsonValueResponse,
        span: Span,
    },
    QueryOn {
        empty: bool,
        response: JsonQueryResponse,
        span: Span,
    },
    /// ALLOW (true) or DISALLOW (false) SCALARS.
    Scalars(bool),
    Wrapper(JsonWrapper),
}

/// Extracts a typed value from a fragment.
pub trait FromFragment: Sized {
    /// Returns true if [`FromFragment::from_fragment`] would succeed.
    fn accepts(fragment: &Fragment) -> bool;

    /// Converts the fragment, handing it back on a shape mismatch.
    ///
    /// # Errors
    ///
    /// Returns the fragment unchanged when it does not hold a `Self`.
    fn from_fragment(fragment: Fragment) -> Result<Self, Fragment>;
}

/// A stand-in value for a child that is missing or malformed.
pub trait Placeholder {
    fn placeholder(span: Span) -> Self;
}

macro_rules! fragments {
    (
        typed { $($variant:ident($ty:ty)),+ $(,)? }
        shaped { $($shaped:ident($shaped_ty:ty)),+ $(,)? }
    ) => {
        /// The result of reducing one concrete node.
        #[allow(clippy::large_enum_variant)]
        #[derive(Debug, Clone, PartialEq)]
        pub enum Fragment {
            $($variant($ty),)+
            $($shaped($shaped_ty),)+
        }

        impl Fragment {
            /// Returns the variant name, for diagnostics and traces.
            #[must_use]
            pub const fn kind_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($variant),)+
                    $(Self::$shaped(_) => stringify!($shaped),)+
                }
            }
        }

        $(
            impl From<$ty> for Fragment {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }

            impl FromFragment for $ty {
                fn accepts(fragment: &Fragment) -> bool {
                    matches!(fragment, Fragment::$variant(_))
                }

                fn from_fragment(fragment: Fragment) -> Result<Self, Fragment> {
                    match fragment {
                        Fragment::$variant(value) => Ok(value),
                        other => Err(other),
                    }
                }
            }
        )+
    };
}

fragments! {
    typed {
        Token(Terminal),
        Ident(Ident),
        ObjectName(ObjectName),
        UserName(UserName),
        Names(Vec<Ident>),
        Expr(Expr),
        Exprs(Vec<Expr>),
        DataType(DataType),
        WhenBranch(WhenBranch),
        SelectItem(SelectItem),
        OrderItem(OrderItem),
        OrderBy(Vec<OrderItem>),
        GroupBy(GroupBy),
        Limit(Limit),
        Fetch(Fetch),
        Hierarchy(Hierarchy),
        LockClause(LockClause),
        IntoTarget(IntoTarget),
        ExportTerm(ExportTerm),
        With(With),
        Cte(Cte),
        NamedWindow(NamedWindow),
        WindowSpec(WindowSpec),
        WindowFrame(WindowFrame),
        FrameBound(FrameBound),
        JsonClause(JsonClause),
        TableRef(TableRef),
        JoinKind(JoinKind),
        JoinConstraint(JoinConstraint),
        IndexHint(IndexHint),
        Assignment(Assignment),
        ColumnDef(ColumnDef),
        ColumnAttr(ColumnAttr),
        TableConstraint(TableConstraint),
        CheckConstraint(CheckConstraint),
        ForeignKeyReference(ForeignKeyReference),
        SortColumn(SortColumn),
        IndexAlgorithm(IndexAlgorithm),
        TableRename(TableRename),
        AlterTableItem(AlterTableItem),
        PartitionSpec(PartitionSpec),
        SubpartitionSpec(SubpartitionSpec),
        PartitionElement(PartitionElement),
        PartitionBound(PartitionBound),
        RangeValue(RangeValue),
        AlterPartition(AlterPartition),
        RawOption(RawOption),
        TableOptions(TableOptions),
        IndexOptions(IndexOptions),
        PartitionAttributes(PartitionAttributes),
        DatabaseOptions(DatabaseOptions),
        TablegroupOptions(TablegroupOptions),
        TablespaceOptions(TablespaceOptions),
        SequenceOptions(SequenceOptions),
        ResourceOptions(ResourceOptions),
        TenantOptions(TenantOptions),
        UserResources(UserResources),
        VariableAssignment(VariableAssignment),
        LockTable(LockTable),
        UserSpec(UserSpec),
        UserRename(UserRename),
        TlsOption(TlsOption),
        Privilege(Privilege),
        PrivilegeLevel(PrivilegeLevel),
        SystemParameter(SystemParameter),
    }
    shaped {
        Select(Box<Select>),
        SetExpr(SetExpr),
        Query(Box<Query>),
        Statement(Box<Statement>),
    }
}

impl Fragment {
    /// Returns the terminal if this fragment is one.
    #[must_use]
    pub const fn as_token(&self) -> Option<&Terminal> {
        match self {
            Self::Token(terminal) => Some(terminal),
            _ => None,
        }
    }
}

impl From<Select> for Fragment {
    fn from(select: Select) -> Self {
        Self::Select(Box::new(select))
    }
}

impl From<SetExpr> for Fragment {
    fn from(body: SetExpr) -> Self {
        Self::SetExpr(body)
    }
}

impl From<Query> for Fragment {
    fn from(query: Query) -> Self {
        Self::Query(Box::new(query))
    }
}

impl From<Statement> for Fragment {
    fn from(statement: Statement) -> Self {
        Self::Statement(Box::new(statement))
    }
}

// Query-shaped fragments convert into each other so that parenthesised and
// plain selects can appear wherever either is expected.

impl FromFragment for Query {
    fn accepts(fragment: &Fragment) -> bool {
        matches!(
            fragment,
            Fragment::Query(_) | Fragment::Select(_) | Fragment::SetExpr(_)
        )
    }

    fn from_fragment(fragment: Fragment) -> Result<Self, Fragment> {
        match fragment {
            Fragment::Query(query) => Ok(*query),
            Fragment::Select(select) => Ok(Self::from_select(*select)),
            Fragment::SetExpr(SetExpr::Query(query)) => Ok(*query),
            Fragment::SetExpr(SetExpr::Select(select)) => Ok(Self::from_select(*select)),
            Fragment::SetExpr(body) => {
                let span = body.span();
                Ok(Self {
                    with: None,
                    body,
                    order_by: Vec::new(),
                    limit: None,
                    fetch: None,
                    lock: None,
                    into: None,
                    span,
                })
            }
            other => Err(other),
        }
    }
}

impl FromFragment for SetExpr {
    fn accepts(fragment: &Fragment) -> bool {
        <Query as FromFragment>::accepts(fragment)
    }

    fn from_fragment(fragment: Fragment) -> Result<Self, Fragment> {
        match fragment {
            Fragment::SetExpr(body) => Ok(body),
            Fragment::Select(select) => Ok(Self::Select(select)),
            Fragment::Query(query) => Ok(Self::Query(query)),
            other => Err(other),
        }
    }
}

impl FromFragment for Statement {
    fn accepts(fragment: &Fragment) -> bool {
        matches!(fragment, Fragment::Statement(_)) || <Query as FromFragment>::accepts(fragment)
    }

    fn from_fragment(fragment: Fragment) -> Result<Self, Fragment> {
        match fragment {
            Fragment::Statement(statement) => Ok(*statement),
            other => Query::from_fragment(other).map(|query| Self::Query(Box::new(query))),
        }
    }
}

impl Placeholder for Expr {
    fn placeholder(span: Span) -> Self {
        Self::Error { span }
    }
}

impl Placeholder for SetExpr {
    fn placeholder(span: Span) -> Self {
        Self::Error { span }
    }
}

impl Placeholder for Query {
    fn placeholder(span: Span) -> Self {
        Self {
            with: None,
            body: SetExpr::Error { span },
            order_by: Vec::new(),
            limit: None,
            fetch: None,
            lock: None,
            into: None,
            span,
        }
    }
}

impl Placeholder for Statement {
    fn placeholder(span: Span) -> Self {
        Self::Error { span }
    }
}

impl Placeholder for Ident {
    fn placeholder(span: Span) -> Self {
        Self::new("", span)
    }
}

impl Placeholder for ObjectName {
    fn placeholder(span: Span) -> Self {
        Self::bare(Ident::new("", span))
    }
}

impl Placeholder for UserName {
    fn placeholder(span: Span) -> Self {
        Self {
            user: String::new(),
            host: None,
            span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Select;

    fn select(span: Span) -> Select {
        Select {
            hint: None,
            options: Vec::new(),
            projection: Vec::new(),
            into: None,
            from: Vec::new(),
            selection: None,
            hierarchy: None,
            group_by: None,
            having: None,
            windows: Vec::new(),
            span,
        }
    }

    #[test]
    fn test_typed_round_trip() {
        let ident = Ident::new("a", Span::new(0, 1));
        let fragment = Fragment::from(ident.clone());
        assert_eq!(fragment.kind_name(), "Ident");
        assert!(<Ident as FromFragment>::accepts(&fragment));
        assert!(!<Expr as FromFragment>::accepts(&fragment));
        assert_eq!(Ident::from_fragment(fragment), Ok(ident));
    }

    #[test]
    fn test_mismatch_hands_fragment_back() {
        let fragment = Fragment::from(Expr::Default { span: Span::new(0, 7) });
        let back = Ident::from_fragment(fragment.clone());
        assert_eq!(back, Err(fragment));
    }

    #[test]
    fn test_select_widens_to_query_and_statement() {
        let span = Span::new(0, 8);
        let query = Query::from_fragment(Fragment::from(select(span))).unwrap();
        assert!(query.as_select().is_some());
        assert_eq!(query.span, span);

        let statement = Statement::from_fragment(Fragment::from(select(span))).unwrap();
        assert!(matches!(statement, Statement::Query(_)));
    }

    #[test]
    fn test_placeholders_are_errors() {
        let span = Span::new(3, 4);
        assert!(Expr::placeholder(span).is_error());
        assert!(Statement::placeholder(span).is_error());
        assert!(matches!(Query::placeholder(span).body, SetExpr::Error { .. }));
    }
}
