//! Concrete tree to AST reduction.
//!
//! A [`Walker`] visits the concrete tree bottom-up and looks every rule up in
//! a [`ReductionTable`]. A rule with a registered hook turns its reduced
//! children into one [`Fragment`]; any other rule is reduced by identity,
//! handing its children to the parent unchanged. The hooks live in one module
//! per statement family.

mod children;
mod context;
mod fragment;
mod table;
mod walker;

mod access;
mod admin;
mod ddl;
mod dml;
mod expr;
mod function;
mod name;
mod option;
mod partition;
mod query;
mod session;
mod types;

#[cfg(test)]
mod testing;

pub use children::Children;
pub use context::ReduceCtx;
pub use fragment::{
    ColumnAttr, ColumnAttrKind, Fragment, FromFragment, JsonClause, Placeholder, RawOption,
};
pub use table::{EnterHook, ExitHook, Hooks, ReductionTable, Resolution, UnknownRule};
pub use walker::Walker;

fn register_all(table: &mut ReductionTable) {
    name::register(table);
    expr::register(table);
    function::register(table);
    types::register(table);
    query::register(table);
    dml::register(table);
    ddl::register(table);
    partition::register(table);
    option::register(table);
    admin::register(table);
    access::register(table);
    session::register(table);
}
