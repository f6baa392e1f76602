//! Property tests for the staffing solver.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use workforce_engine::config::CapacityParameters;
use workforce_engine::models::DailyRecord;
use workforce_engine::optimization::{
    CoveringProgram, closed_form_headcount, per_worker_daily_cost, solve, solve_parallel,
};

fn decimal(max_units: i64, max_scale: u32) -> impl Strategy<Value = Decimal> {
    (0..=max_units, 0..=max_scale).prop_map(|(units, scale)| Decimal::new(units, scale))
}

fn positive_decimal(max_units: i64, max_scale: u32) -> impl Strategy<Value = Decimal> {
    (1..=max_units, 0..=max_scale).prop_map(|(units, scale)| Decimal::new(units, scale))
}

fn params() -> impl Strategy<Value = CapacityParameters> {
    (
        positive_decimal(1_200, 2),
        positive_decimal(800, 2),
        positive_decimal(5_000, 2),
    )
        .prop_map(|(regular, overtime, productivity)| {
            CapacityParameters::new(regular, overtime, productivity).unwrap()
        })
}

fn record(day_offset: u64) -> impl Strategy<Value = DailyRecord> {
    (
        decimal(100_000_000, 3),
        0u32..500,
        decimal(100_000, 2),
        decimal(150_000, 2),
        decimal(10_000_000, 2),
        decimal(10_000, 1),
    )
        .prop_map(
            move |(orders, attendance, regular_wage, overtime_wage, total_cost, ot_hours)| {
                DailyRecord {
                    date: NaiveDate::from_ymd_opt(2020, 1, 1)
                        .unwrap()
                        .checked_add_days(chrono::Days::new(day_offset))
                        .unwrap(),
                    incoming_orders: orders,
                    actual_attendance: attendance,
                    regular_wage_per_hour: regular_wage,
                    overtime_wage_per_hour: overtime_wage,
                    regular_cost: Decimal::ZERO,
                    overtime_cost: total_cost,
                    total_labor_cost: total_cost,
                    overtime_hours: ot_hours,
                }
            },
        )
}

fn records(max_len: usize) -> impl Strategy<Value = Vec<DailyRecord>> {
    (0..=max_len).prop_flat_map(|len| {
        (0..len as u64)
            .map(record)
            .collect::<Vec<_>>()
    })
}

proptest! {
    #[test]
    fn optimal_workers_cover_demand(record in record(0), params in params()) {
        let results = solve(std::slice::from_ref(&record), &params).unwrap();
        let workers = Decimal::from(results[0].optimal_workers);

        prop_assert!(workers * params.capacity_per_worker() >= record.incoming_orders);
    }

    #[test]
    fn one_fewer_worker_falls_short(record in record(0), params in params()) {
        let results = solve(std::slice::from_ref(&record), &params).unwrap();
        let workers = results[0].optimal_workers;

        if workers > 0 {
            let fewer = Decimal::from(workers - 1);
            prop_assert!(fewer * params.capacity_per_worker() < record.incoming_orders);
        } else {
            prop_assert!(record.incoming_orders.is_zero());
        }
    }

    #[test]
    fn optimized_cost_is_non_negative(record in record(0), params in params()) {
        let result = &solve(std::slice::from_ref(&record), &params).unwrap()[0];

        prop_assert!(result.total_optimized_cost >= Decimal::ZERO);
        prop_assert_eq!(
            result.total_optimized_cost,
            Decimal::from(result.optimal_workers) * result.per_worker_daily_cost
        );
        prop_assert_eq!(
            result.cost_saving,
            record.total_labor_cost - result.total_optimized_cost
        );
    }

    #[test]
    fn solving_twice_gives_identical_results(batch in records(12), params in params()) {
        let first = solve(&batch, &params).unwrap();
        let second = solve(&batch, &params).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn results_follow_input_order(batch in records(12), params in params()) {
        let results = solve(&batch, &params).unwrap();

        prop_assert_eq!(results.len(), batch.len());
        for (result, record) in results.iter().zip(&batch) {
            prop_assert_eq!(result.date, record.date);
        }
    }

    #[test]
    fn parallel_matches_sequential(batch in records(40), params in params()) {
        prop_assert_eq!(
            solve_parallel(&batch, &params).unwrap(),
            solve(&batch, &params).unwrap()
        );
    }

    #[test]
    fn covering_program_matches_closed_form(record in record(0), params in params()) {
        let cost = per_worker_daily_cost(&record, &params).unwrap();
        let solution = CoveringProgram::staffing(cost, record.incoming_orders, &params)
            .solve()
            .unwrap();

        prop_assert_eq!(
            solution.value,
            closed_form_headcount(record.incoming_orders, &params).unwrap()
        );
    }
}
