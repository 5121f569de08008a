//! Symbolic differentiation of single-variable formulas.
//!
//! A formula such as `sin(x) * x^2` is parsed by [`deriv_parser`], lowered into a
//! [`symbolic::SymExpr`], differentiated, optionally simplified, typeset as LaTeX, and sampled
//! over a grid. [`derive`] runs the whole pipeline:
//!
//! ```
//! use deriv_compute::{derive, Config};
//!
//! let derivation = derive("x^3 - 2x", &Config::default()).unwrap();
//! assert_eq!(derivation.derivative_latex, "3\\,x^{2} - 2");
//! assert_eq!(derivation.samples.len(), 401);
//! ```
//!
//! # Features
//!
//! - `serde`: Derives `Serialize` for [`Derivation`] and the types it contains, and
//!   `Serialize`/`Deserialize` for [`Config`].

pub mod config;
pub mod derivation;
pub mod error;
pub mod fmt;
pub mod funcs;
pub mod numerical;
pub mod primitive;
pub mod symbolic;

pub use config::Config;
pub use derivation::{derive, Derivation, Step};
pub use error::Error;
