// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Hopper Solver
//!
//! Entry point of the Hopper production planner. `optimize` takes item and
//! resource records, encodes them into a dense model, runs the best-first
//! branch-and-bound search under the configured limits and assembles a
//! report with the production plan, per-resource usage and total revenue.
//!
//! ## Modules
//!
//! - `config`: `SolverConfig` with node, time and logging limits.
//! - `error`: `OptimizeError`, the failure type of `optimize`.
//! - `optimize`: the pipeline encoder -> search -> report.
//! - `report`: report types and their assembly from a solution.
//!
//! ## Usage
//!
//! ```rust
//! use hopper_model::record::{Item, Resource};
//! use hopper_solver::{SolverConfig, optimize};
//! use rust_decimal::Decimal;
//!
//! let resources = vec![Resource::new(1, "Flour", Decimal::from(500), "g")];
//! let items = vec![
//!     Item::new(1, "Bread", "BR-01", Decimal::from(45)).with_requirement(1, Decimal::from(100)),
//! ];
//!
//! let report = optimize(&items, &resources, &SolverConfig::default()).unwrap();
//! assert_eq!(report.total_revenue, Decimal::from(225));
//! assert_eq!(report.production_plan[0].quantity, 5);
//! ```

pub mod config;
pub mod error;
pub mod optimize;
pub mod report;

pub use config::SolverConfig;
pub use error::OptimizeError;
pub use optimize::optimize;
pub use report::OptimizationReport;
