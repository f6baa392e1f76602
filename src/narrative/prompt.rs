//! Prompt construction from analysis output.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::AnalysisResult;

/// Maximum daily rows in the workload prompt.
pub const WORKLOAD_ROW_LIMIT: usize = 20;
/// Maximum months in the overtime ratio prompt (the most recent ones).
pub const OVERTIME_RATIO_MONTH_LIMIT: usize = 12;
/// Maximum rows in the critical days prompt.
pub const CRITICAL_DAYS_ROW_LIMIT: usize = 10;
/// Maximum rows in the cost efficiency prompt.
pub const COST_EFFICIENCY_ROW_LIMIT: usize = 10;

/// The subject of one narrative section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeTopic {
    /// Daily incoming orders against regular capacity.
    WorkloadVsCapacity,
    /// Monthly overtime cost share.
    OvertimeRatioTrend,
    /// Days with recorded overtime above the critical threshold.
    CriticalDays,
    /// Actual against optimized cost per day.
    CostEfficiency,
    /// Total actual cost, optimized cost and saving.
    TotalCostSummary,
}

impl NarrativeTopic {
    /// Every topic, in report order.
    pub const ALL: [NarrativeTopic; 5] = [
        NarrativeTopic::WorkloadVsCapacity,
        NarrativeTopic::OvertimeRatioTrend,
        NarrativeTopic::CriticalDays,
        NarrativeTopic::CostEfficiency,
        NarrativeTopic::TotalCostSummary,
    ];

    fn instruction(self) -> &'static str {
        match self {
            NarrativeTopic::WorkloadVsCapacity => {
                "The table lists daily incoming orders and the regular work capacity available. \
                 Describe the visible trend and recommend policies stakeholders could adopt to \
                 improve labor efficiency."
            }
            NarrativeTopic::OvertimeRatioTrend => {
                "The table shows the monthly ratio of overtime cost to total labor cost. Explain \
                 the trend and recommend management policies if overtime keeps rising."
            }
            NarrativeTopic::CriticalDays => {
                "The table lists days on which recorded overtime exceeded the critical threshold. \
                 Analyze the pattern and recommend strategic steps the company could take."
            }
            NarrativeTopic::CostEfficiency => {
                "The table compares actual labor cost with the optimized staffing cost. Explain \
                 the comparison and suggest cost-saving strategies to stakeholders."
            }
            NarrativeTopic::TotalCostSummary => {
                "These are the total labor costs before and after optimization and the total \
                 saving. Assess whether the optimization is efficient and recommend further \
                 policies to improve cost efficiency."
            }
        }
    }
}

impl fmt::Display for NarrativeTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NarrativeTopic::WorkloadVsCapacity => "workload vs capacity",
            NarrativeTopic::OvertimeRatioTrend => "overtime ratio trend",
            NarrativeTopic::CriticalDays => "critical days",
            NarrativeTopic::CostEfficiency => "cost efficiency",
            NarrativeTopic::TotalCostSummary => "total cost summary",
        };
        f.write_str(name)
    }
}

/// A small text table embedded in a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeTable {
    /// Column headers.
    pub columns: Vec<String>,
    /// Rows, each with one cell per column.
    pub rows: Vec<Vec<String>>,
}

impl NarrativeTable {
    fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

impl fmt::Display for NarrativeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(String::len)
                    .chain(std::iter::once(header.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let lines = std::iter::once(&self.columns).chain(self.rows.iter());
        for (line_no, cells) in lines.enumerate() {
            if line_no > 0 {
                writeln!(f)?;
            }
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:>width$}", cell, width = width))
                .collect();
            write!(f, "{}", padded.join("  "))?;
        }
        Ok(())
    }
}

/// One prompt for a text generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativePrompt {
    /// The section this prompt is for.
    pub topic: NarrativeTopic,
    /// What the generator is asked to do.
    pub instruction: String,
    /// The data the instruction refers to.
    pub table: NarrativeTable,
}

impl NarrativePrompt {
    /// Builds the prompt for `topic` from an analysis.
    ///
    /// The cost efficiency prompt uses the windowed results when the analysis
    /// has a window, otherwise the full-dataset results.
    pub fn build(topic: NarrativeTopic, analysis: &AnalysisResult) -> Self {
        let table = match topic {
            NarrativeTopic::WorkloadVsCapacity => workload_table(analysis),
            NarrativeTopic::OvertimeRatioTrend => overtime_ratio_table(analysis),
            NarrativeTopic::CriticalDays => critical_days_table(analysis),
            NarrativeTopic::CostEfficiency => cost_efficiency_table(analysis),
            NarrativeTopic::TotalCostSummary => total_cost_table(analysis),
        };

        Self {
            topic,
            instruction: topic.instruction().to_string(),
            table,
        }
    }

    /// The prompt as a single block of text.
    pub fn render(&self) -> String {
        format!("{}\n\n{}", self.instruction, self.table)
    }
}

fn workload_table(analysis: &AnalysisResult) -> NarrativeTable {
    let mut table = NarrativeTable::new(&["date", "incoming_orders", "regular_capacity"]);
    for metrics in analysis.daily_metrics.iter().take(WORKLOAD_ROW_LIMIT) {
        table.push(vec![
            metrics.date.to_string(),
            metrics.incoming_orders.normalize().to_string(),
            metrics.regular_capacity.normalize().to_string(),
        ]);
    }
    table
}

fn overtime_ratio_table(analysis: &AnalysisResult) -> NarrativeTable {
    let mut table = NarrativeTable::new(&["month", "overtime_ratio"]);
    let skip = analysis
        .monthly
        .len()
        .saturating_sub(OVERTIME_RATIO_MONTH_LIMIT);
    for month in analysis.monthly.iter().skip(skip) {
        let ratio = match month.overtime_ratio.as_option() {
            Some(value) => value.normalize().to_string(),
            None => "undefined".to_string(),
        };
        table.push(vec![month.month.to_string(), ratio]);
    }
    table
}

fn critical_days_table(analysis: &AnalysisResult) -> NarrativeTable {
    let mut table = NarrativeTable::new(&["date", "overtime_hours"]);
    for day in analysis.critical_days.iter().take(CRITICAL_DAYS_ROW_LIMIT) {
        table.push(vec![
            day.date.to_string(),
            day.overtime_hours.normalize().to_string(),
        ]);
    }
    table
}

fn cost_efficiency_table(analysis: &AnalysisResult) -> NarrativeTable {
    let results = match &analysis.window {
        Some(window) => &window.results,
        None => &analysis.optimization,
    };

    let mut table = NarrativeTable::new(&[
        "date",
        "total_labor_cost",
        "total_optimized_cost",
        "cost_saving",
    ]);
    for result in results.iter().take(COST_EFFICIENCY_ROW_LIMIT) {
        table.push(vec![
            result.date.to_string(),
            result.actual_labor_cost.normalize().to_string(),
            result.total_optimized_cost.normalize().to_string(),
            result.cost_saving.normalize().to_string(),
        ]);
    }
    table
}

fn total_cost_table(analysis: &AnalysisResult) -> NarrativeTable {
    let summary = &analysis.summary;
    let mut table = NarrativeTable::new(&["measure", "amount"]);
    table.push(vec![
        "total_actual_cost".to_string(),
        summary.total_actual_cost.normalize().to_string(),
    ]);
    table.push(vec![
        "total_optimized_cost".to_string(),
        summary.total_optimized_cost.normalize().to_string(),
    ]);
    table.push(vec![
        "total_saving".to_string(),
        summary.total_saving.normalize().to_string(),
    ]);
    table
}
