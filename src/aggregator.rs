// 📈 Aggregator - Daily totals, mean ticket and transaction count

use crate::cleaner::CleanedDataset;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Running totals for one calendar day
#[derive(Debug, Clone, Copy, Default)]
struct DayAccumulator {
    total: f64,
    count: usize,
}

impl DayAccumulator {
    fn add(&mut self, amount: f64) {
        self.total += amount;
        self.count += 1;
    }
}

/// One output row of the report
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRow {
    /// Calendar day at midnight
    pub date: NaiveDateTime,
    pub total: f64,
    pub mean: f64,
    pub count: usize,
}

impl DailyRow {
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

/// Per-day summary, ascending by date, one row per day
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySummary {
    pub rows: Vec<DailyRow>,
}

impl DailySummary {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all daily totals
    pub fn grand_total(&self) -> f64 {
        self.rows.iter().map(|r| r.total).sum()
    }

    pub fn transaction_count(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }
}

/// Group by calendar day (time of day ignored) and compute total/mean/count
pub fn aggregate_daily(cleaned: &CleanedDataset) -> DailySummary {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for (date, amount) in cleaned.records() {
        days.entry(date.date()).or_default().add(amount);
    }

    let rows = days
        .into_iter()
        .filter_map(|(day, acc)| {
            Some(DailyRow {
                date: day.and_hms_opt(0, 0, 0)?,
                total: acc.total,
                mean: acc.total / acc.count as f64,
                count: acc.count,
            })
        })
        .collect();

    DailySummary { rows }
}
