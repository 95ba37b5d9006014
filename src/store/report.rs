use serde::Serialize;
use tracing::{debug, instrument};

use super::{
    entities::{EntryDate, MetricEntry},
    record_store::RecordStore,
};

/// Width of the longest bar in a [StepChart].
pub const MAX_BAR_LENGTH: i64 = 50;

/// Totals, averages and extremes over every entry of a store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub total_steps: i64,
    pub total_calories: i64,
    pub total_sleep_hours: f64,
    pub average_steps: f64,
    pub average_calories: f64,
    pub average_sleep_hours: f64,
    /// First entry with the highest step count.
    pub best_step_day: MetricEntry,
    /// First entry with the lowest step count.
    pub worst_step_day: MetricEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub date: EntryDate,
    pub steps: i32,
    pub bar_length: u32,
}

/// Step counts scaled so the busiest day is [MAX_BAR_LENGTH] wide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepChart {
    NoData,
    AllZero,
    Bars {
        /// Roughly how many steps a single unit of a bar stands for. Only meant for display.
        scale_unit: i64,
        bars: Vec<ChartBar>,
    },
}

impl RecordStore {
    /// Computes a [Summary] in a single pass. Returns [None] when there is nothing to summarize.
    #[instrument(skip(self), fields(entries = self.len()))]
    pub fn summarize(&self) -> Option<Summary> {
        let mut entries = self.entries();
        let first = entries.next()?;

        let mut count = 1usize;
        let mut total_steps = i64::from(first.steps);
        let mut total_calories = i64::from(first.calories_burned);
        let mut total_sleep_hours = first.sleep_hours;
        let mut best = first;
        let mut worst = first;

        for entry in entries {
            count += 1;
            total_steps += i64::from(entry.steps);
            total_calories += i64::from(entry.calories_burned);
            total_sleep_hours += entry.sleep_hours;

            // Strict comparisons so the earliest day wins ties.
            if entry.steps > best.steps {
                best = entry;
            }
            if entry.steps < worst.steps {
                worst = entry;
            }
        }

        let divisor = count as f64;
        let summary = Summary {
            count,
            total_steps,
            total_calories,
            total_sleep_hours,
            average_steps: total_steps as f64 / divisor,
            average_calories: total_calories as f64 / divisor,
            average_sleep_hours: total_sleep_hours / divisor,
            best_step_day: best.clone(),
            worst_step_day: worst.clone(),
        };
        debug!("Summarized {count} entries");
        Some(summary)
    }

    /// Builds a [StepChart]. Needs the maximum before any bar can be scaled, so entries are
    /// traversed twice.
    #[instrument(skip(self), fields(entries = self.len()))]
    pub fn visualize(&self) -> StepChart {
        let Some(max_steps) = self.entries().map(|v| i64::from(v.steps)).max() else {
            return StepChart::NoData;
        };
        if max_steps == 0 {
            return StepChart::AllZero;
        }

        let bars = self
            .entries()
            .map(|entry| ChartBar {
                date: entry.date.clone(),
                steps: entry.steps,
                bar_length: bar_length(entry.steps, max_steps),
            })
            .collect();

        debug!("Scaled chart against {max_steps} steps");
        StepChart::Bars {
            // A negative maximum would give a negative unit, the chart has no bars to scale then.
            scale_unit: (max_steps / MAX_BAR_LENGTH + 1).max(1),
            bars,
        }
    }
}

/// `floor(steps * 50 / max_steps)`. Days without positive steps are drawn as empty bars, which
/// also covers charts where every day is negative.
fn bar_length(steps: i32, max_steps: i64) -> u32 {
    if steps <= 0 || max_steps <= 0 {
        return 0;
    }
    (i64::from(steps) * MAX_BAR_LENGTH / max_steps).min(MAX_BAR_LENGTH) as u32
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::{
        store::{
            entities::{fixture_entries, MetricEntry},
            record_store::RecordStore,
        },
        utils::logging::TEST_LOGGING,
    };

    use super::{bar_length, ChartBar, StepChart};

    fn entry(date: &str, steps: i32) -> Result<MetricEntry> {
        Ok(MetricEntry::new(date.parse()?, steps, 2000, 7.0))
    }

    fn store_of(steps: &[i32]) -> Result<RecordStore> {
        let mut store = RecordStore::new();
        for (i, steps) in steps.iter().enumerate() {
            store.append(entry(&format!("2025-05-{:02}", i + 1), *steps)?);
        }
        Ok(store)
    }

    fn bars(chart: StepChart) -> Vec<ChartBar> {
        match chart {
            StepChart::Bars { bars, .. } => bars,
            other => panic!("Expected bars, got {other:?}"),
        }
    }

    #[test]
    fn summarize_empty_store() {
        assert_eq!(RecordStore::new().summarize(), None);
    }

    #[test]
    fn summarize_fixture() -> Result<()> {
        *TEST_LOGGING;

        let store = RecordStore::with_entries(fixture_entries());
        let summary = store.summarize().expect("Fixture isn't empty");

        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_steps, 35500);
        assert_eq!(summary.total_calories, 7300);
        assert!((summary.total_sleep_hours - 21.7).abs() < 1e-9);
        assert!((summary.average_steps - 11833.33).abs() < 0.01);
        assert!((summary.average_calories - 2433.33).abs() < 0.01);
        assert!((summary.average_sleep_hours - 7.2333).abs() < 0.001);
        assert_eq!(summary.best_step_day.date.as_str(), "2025-01-03");
        assert_eq!(summary.best_step_day.steps, 15200);
        assert_eq!(summary.worst_step_day.date.as_str(), "2025-01-02");
        assert_eq!(summary.worst_step_day.steps, 7800);
        Ok(())
    }

    #[test]
    fn summarize_ties_keep_first_day() -> Result<()> {
        let store = store_of(&[500, 9000, 100, 9000, 100])?;
        let summary = store.summarize().expect("Store isn't empty");
        assert_eq!(summary.best_step_day.date.as_str(), "2025-05-02");
        assert_eq!(summary.worst_step_day.date.as_str(), "2025-05-03");
        Ok(())
    }

    #[test]
    fn summarize_single_entry_is_both_extremes() -> Result<()> {
        let store = store_of(&[4000])?;
        let summary = store.summarize().expect("Store isn't empty");
        assert_eq!(summary.best_step_day, summary.worst_step_day);
        assert_eq!(summary.average_steps, 4000.);
        Ok(())
    }

    #[test]
    fn summarize_handles_huge_step_counts() -> Result<()> {
        // Both values are above any fixed "minimum" sentinel and would overflow 32 bit sums.
        let store = store_of(&[i32::MAX, 200_000_000, i32::MAX])?;
        let summary = store.summarize().expect("Store isn't empty");
        assert_eq!(summary.total_steps, 2 * i64::from(i32::MAX) + 200_000_000);
        assert_eq!(summary.worst_step_day.steps, 200_000_000);
        assert_eq!(summary.best_step_day.date.as_str(), "2025-05-01");
        Ok(())
    }

    #[test]
    fn visualize_empty_store() {
        assert_eq!(RecordStore::new().visualize(), StepChart::NoData);
    }

    #[test]
    fn visualize_all_zero() -> Result<()> {
        assert_eq!(store_of(&[0, 0, 0])?.visualize(), StepChart::AllZero);
        Ok(())
    }

    #[test]
    fn visualize_fixture() {
        let store = RecordStore::with_entries(fixture_entries());
        let StepChart::Bars { scale_unit, bars } = store.visualize() else {
            panic!("Fixture should produce bars");
        };
        assert_eq!(scale_unit, 15200 / 50 + 1);
        assert_eq!(
            bars.iter().map(|v| v.bar_length).collect::<Vec<_>>(),
            vec![41, 25, 50]
        );
        assert_eq!(bars[1].date.as_str(), "2025-01-02");
        assert_eq!(bars[1].steps, 7800);
    }

    #[test]
    fn visualize_scales_against_maximum() -> Result<()> {
        let steps = [1, 99, 100, 333, 12345, 12346, 7];
        let chart = bars(store_of(&steps)?.visualize());
        let max = 12346i64;
        for (bar, steps) in chart.iter().zip(steps) {
            assert!(bar.bar_length <= 50);
            assert_eq!(i64::from(bar.bar_length), i64::from(steps) * 50 / max);
        }
        assert_eq!(chart[5].bar_length, 50);
        Ok(())
    }

    #[test]
    fn visualize_clamps_negative_steps() -> Result<()> {
        let chart = bars(store_of(&[-400, 1000])?.visualize());
        assert_eq!(chart[0].bar_length, 0);
        assert_eq!(chart[1].bar_length, 50);
        Ok(())
    }

    #[test]
    fn visualize_only_negative_steps() -> Result<()> {
        let store = store_of(&[-10, -20])?;
        let StepChart::Bars { scale_unit, bars } = store.visualize() else {
            panic!("A negative maximum isn't zero, so bars are expected");
        };
        assert_eq!(scale_unit, 1);
        assert!(bars.iter().all(|v| v.bar_length == 0));
        Ok(())
    }

    #[test]
    fn visualize_large_negative_maximum_keeps_positive_scale() -> Result<()> {
        let StepChart::Bars { scale_unit, bars } = store_of(&[-1000])?.visualize() else {
            panic!("A negative maximum isn't zero, so bars are expected");
        };
        assert_eq!(scale_unit, 1);
        assert_eq!(bars[0].bar_length, 0);
        Ok(())
    }

    #[test]
    fn bar_length_doesnt_overflow() {
        assert_eq!(bar_length(i32::MAX, i64::from(i32::MAX)), 50);
        assert_eq!(bar_length(i32::MAX / 2, i64::from(i32::MAX)), 24);
    }

    #[test]
    fn chart_serializes_with_status() -> Result<()> {
        let value = serde_json::to_value(StepChart::AllZero)?;
        assert_eq!(value["status"], "all_zero");
        Ok(())
    }
}
