//! Cost-minimizing staffing solver for the Workforce Cost Optimization Engine.
//!
//! Each day is an independent covering program: find the fewest workers,
//! each supplying `(regular_hours + overtime_hours) × productivity` units,
//! that cover the day's incoming orders at the day's wage rates. The
//! real-valued optimum is always rounded up, never down or to nearest.

mod program;
mod solver;
mod summary;

pub use program::{CoverConstraint, CoveringProgram, ProgramSolution, closed_form_headcount};
pub use solver::{
    BatchPolicy, SolveOptions, optimize_day, per_worker_daily_cost, select_window, solve,
    solve_parallel, solve_with_options, solve_with_policy,
};
pub use summary::summarize;
