//! Constrained solving of Gantry systems.
//!
//! A [`Problem`] pairs an objective with extra constraints. [`solve`] turns a
//! system and a problem into a flat optimizer task: free field magnitudes as
//! variables, field bounds as box bounds, relation residuals as nonlinear
//! constraints. It runs an [`Optimizer`] once and rebuilds a fresh system
//! from the result.
//!
//! # Optimizers
//!
//! [`Method`] selects one of the built-in backends by name:
//!
//! - [`Slsqp`] (`"sequential-quadratic"`, the default): gradient-based, with
//!   finite-difference gradients
//! - [`Cobyla`] (`"linear-approximation"`): derivative-free
//!
//! Both handle equalities and inequalities. Any other [`Optimizer`]
//! implementation can be passed to [`solve`] as well.
//!
//! ```
//! use gantry_core::{Quantity, system};
//! use gantry_solve::{Method, Problem, Solve};
//!
//! system! {
//!     #[derive(Debug, Clone)]
//!     struct Crate {
//!         contents: Quantity,
//!         packing: Quantity,
//!         total: Quantity,
//!     }
//!
//!     equation total_eq(c) {
//!         (c.total.clone(), c.contents.try_add(&c.packing)?)
//!     }
//! }
//!
//! let start = Crate {
//!     contents: Quantity::new(12.0, "kg")?.constant(),
//!     packing: Quantity::new(1.5, "kg")?.constant(),
//!     total: Quantity::new(1.0, "kg")?,
//! };
//!
//! let (solved, report) = start.solve(&Problem::feasibility(), &Method::default())?;
//!
//! assert!(report.success);
//! assert!((solved.total.magnitude() - 13.5).abs() < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod assemble;
mod error;
mod problem;
mod report;
mod solve;

pub mod optimizer;

pub use error::Error;
pub use optimizer::{Cobyla, Constraint, Method, Optimizer, Outcome, Slsqp, Task};
pub use problem::{Problem, StateFn, Term};
pub use report::Report;
pub use solve::{Solve, solve};
