//! Single-variable covering programs.
//!
//! A [`CoveringProgram`] minimises `cost × w` subject to any number of
//! covering constraints `coefficient × w ≥ demand` and `w ≥ 0`. The daily
//! staffing problem is the one-constraint instance where the coefficient is
//! the capacity of one worker and the demand is the day's incoming orders.
//! Additional constraints (for example a minimum crew) can be added without
//! changing how the program is solved.
//!
//! With a non-negative cost the objective is non-decreasing in `w`, so the
//! optimum is the smallest feasible `w`: the largest `demand / coefficient`
//! over all constraints, or zero.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::CapacityParameters;
use crate::error::{EngineError, EngineResult};

/// One covering constraint `coefficient × w ≥ demand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverConstraint {
    /// A short name for the constraint, used in error messages.
    pub label: String,
    /// Amount covered per unit of the decision variable.
    pub coefficient: Decimal,
    /// Amount that must be covered.
    pub demand: Decimal,
}

/// The optimum of a [`CoveringProgram`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramSolution {
    /// The optimal value of the decision variable.
    pub value: Decimal,
    /// The objective at the optimum, `cost × value`.
    pub objective: Decimal,
    /// Index of the constraint that determines the optimum, if any is binding
    /// above zero.
    pub binding: Option<usize>,
}

/// Minimise `cost × w` subject to covering constraints and `w ≥ 0`.
///
/// # Example
///
/// ```
/// use workforce_engine::optimization::CoveringProgram;
/// use rust_decimal::Decimal;
///
/// let solution = CoveringProgram::new(Decimal::from(280))
///     .with_constraint("demand", Decimal::from(120), Decimal::from(500))
///     .with_constraint("minimum_crew", Decimal::ONE, Decimal::from(2))
///     .solve()
///     .unwrap();
///
/// assert_eq!(solution.value, Decimal::from(500) / Decimal::from(120));
/// assert_eq!(solution.binding, Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveringProgram {
    /// Objective coefficient of the decision variable.
    pub cost: Decimal,
    /// The covering constraints.
    pub constraints: Vec<CoverConstraint>,
}

impl CoveringProgram {
    /// Creates a program with no constraints.
    pub fn new(cost: Decimal) -> Self {
        Self {
            cost,
            constraints: Vec::new(),
        }
    }

    /// Adds a constraint `coefficient × w ≥ demand`.
    pub fn with_constraint(
        mut self,
        label: impl Into<String>,
        coefficient: Decimal,
        demand: Decimal,
    ) -> Self {
        self.constraints.push(CoverConstraint {
            label: label.into(),
            coefficient,
            demand,
        });
        self
    }

    /// The staffing program for one day: cover `incoming_orders` with workers
    /// that each supply `capacity_per_worker` and cost `per_worker_daily_cost`.
    pub fn staffing(
        per_worker_daily_cost: Decimal,
        incoming_orders: Decimal,
        params: &CapacityParameters,
    ) -> Self {
        Self::new(per_worker_daily_cost).with_constraint(
            "incoming_orders",
            params.capacity_per_worker(),
            incoming_orders,
        )
    }

    /// Solves the program.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidProgram`] if the cost is negative (the
    /// objective is unbounded below), or if a constraint with a positive
    /// demand has a non-positive coefficient (no `w ≥ 0` satisfies it).
    /// Returns [`EngineError::CalculationError`] if the optimum or the
    /// objective overflows.
    pub fn solve(&self) -> EngineResult<ProgramSolution> {
        if self.cost < Decimal::ZERO {
            return Err(EngineError::InvalidProgram {
                message: format!(
                    "objective is unbounded with negative cost {}",
                    self.cost.normalize()
                ),
            });
        }

        let mut value = Decimal::ZERO;
        let mut binding = None;

        for (index, constraint) in self.constraints.iter().enumerate() {
            if constraint.coefficient <= Decimal::ZERO {
                if constraint.demand <= Decimal::ZERO && constraint.coefficient.is_zero() {
                    continue;
                }
                return Err(EngineError::InvalidProgram {
                    message: format!(
                        "constraint '{}' has coefficient {} and cannot be covered",
                        constraint.label,
                        constraint.coefficient.normalize()
                    ),
                });
            }

            let required = constraint
                .demand
                .checked_div(constraint.coefficient)
                .ok_or_else(|| EngineError::CalculationError {
                    message: format!("constraint '{}' overflows", constraint.label),
                })?;

            if required > value {
                value = required;
                binding = Some(index);
            }
        }

        let objective = self
            .cost
            .checked_mul(value)
            .ok_or_else(|| EngineError::CalculationError {
                message: "objective overflows".to_string(),
            })?;

        Ok(ProgramSolution {
            value,
            objective,
            binding,
        })
    }
}

/// The closed-form optimum of the daily staffing program.
///
/// `incoming_orders / ((regular_hours + overtime_hours) × productivity)`.
/// [`CoveringProgram::staffing`] always solves to exactly this value for
/// non-negative orders.
pub fn closed_form_headcount(
    incoming_orders: Decimal,
    params: &CapacityParameters,
) -> EngineResult<Decimal> {
    incoming_orders
        .checked_div(params.capacity_per_worker())
        .map(|w| w.max(Decimal::ZERO))
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "headcount for {} orders overflows",
                incoming_orders.normalize()
            ),
        })
}
