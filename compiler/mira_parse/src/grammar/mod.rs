//! Grammar productions, one module per tier.
//!
//! - `stmt`: program, statements, definitions, parameter lists
//! - `expr`: expr/term/factor/atom, calls, argument lists

mod expr;
mod stmt;
