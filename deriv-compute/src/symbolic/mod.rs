//! Algebraic manipulation of expressions.
//!
//! # Expression representation
//!
//! Algebraic expressions in this module are represented as a tree of [`SymExpr`] nodes. It's
//! similar to the [`deriv_parser::parser::expr::Expr`] nodes produced by [`deriv_parser`], with
//! the main difference being that [`SymExpr`] nodes **flatten** out the tree structure and have
//! every name resolved.
//!
//! For example, the expression `x + (2 + sin(x))` would be represented internally as a single
//! [`SymExpr::Add`] node with _three_ children, `x`, `2`, and `sin(x)`, where as the
//! [`deriv_parser::parser::expr::Expr`] node would have two children, `x` and `(2 + sin(x))`.
//!
//! An AST is converted with [`expr::lower::lower`], which also rejects unknown names:
//!
//! ```
//! use deriv_compute::symbolic::{expr::lower::lower, SymExpr};
//! use deriv_parser::parser::{expr::Expr, Parser};
//!
//! let mut parser = Parser::new("x + (2 + sin(x))");
//! let ast_expr = parser.try_parse_full::<Expr>().unwrap();
//!
//! let expr = lower(&ast_expr, "x").unwrap();
//! assert!(matches!(&expr, SymExpr::Add(terms) if terms.len() == 3));
//! assert!(lower(&ast_expr, "t").is_err());
//! ```
//!
//! # Differentiation
//!
//! [`derivative()`] differentiates with respect to a named variable. The result is correct but
//! verbose; [`simplify()`] applies the rules in [`simplify::rules`] to shrink it for display.
//!
//! ```
//! use deriv_compute::symbolic::{derivative, expr::lower::lower, simplify};
//! use deriv_parser::parser::{expr::Expr, Parser};
//!
//! let ast_expr = Parser::new("x^3 + x + x").try_parse_full::<Expr>().unwrap();
//! let expr = lower(&ast_expr, "x").unwrap();
//!
//! let derived = simplify(&derivative(&expr, "x").unwrap());
//! assert_eq!(derived.to_string(), "3 * x^2 + 2");
//! ```

pub mod derivative;
pub mod expr;
pub mod rule;
pub mod simplify;
pub mod step_collector;

pub use derivative::{derivative, DerivativeError};
pub use expr::SymExpr;
pub use rule::{classify, Rule};
pub use simplify::{simplify, simplify_with_steps};
pub use step_collector::StepCollector;
