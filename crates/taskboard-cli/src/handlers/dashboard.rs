use chrono::{DateTime, Utc};
use serde::Serialize;
use taskboard_domain::dashboard::{
    average_completion_days, completed_this_week_percentage, completed_today_percentage,
    count_by_status, productivity,
};
use taskboard_domain::{Productivity, StatusCounts, Task};

use crate::context::CliContext;
use crate::output;

#[derive(Debug, Serialize)]
struct DashboardReport {
    counts: StatusCounts,
    completed_today: f64,
    completed_this_week: f64,
    average_completion_days: f64,
    productivity: Productivity,
}

impl DashboardReport {
    fn build(tasks: &[Task], now: DateTime<Utc>) -> Self {
        Self {
            counts: count_by_status(tasks),
            completed_today: completed_today_percentage(tasks, now),
            completed_this_week: completed_this_week_percentage(tasks, now),
            average_completion_days: average_completion_days(tasks),
            productivity: productivity(tasks),
        }
    }
}

pub async fn handle_dashboard(ctx: &CliContext) -> anyhow::Result<()> {
    let tasks = ctx.client().tasks().await?;
    output::output_success(DashboardReport::build(&tasks, Utc::now()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_engine::gateway::seed;

    #[test]
    fn test_report_over_seed_board() {
        let report = DashboardReport::build(&seed::tasks(), Utc::now());
        assert_eq!(report.counts.total, 6);
        assert_eq!(report.counts.done, 2);
        assert_eq!(report.productivity.total, 2);
    }

    #[test]
    fn test_report_over_empty_board() {
        let report = DashboardReport::build(&[], Utc::now());
        assert_eq!(report.counts.total, 0);
        assert_eq!(report.completed_today, 0.0);
        assert_eq!(report.average_completion_days, 0.0);
    }
}
