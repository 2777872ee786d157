//! Anomaly Summary - text rendering of scored batches
//!
//! Buckets records by (week of month, month, year) and draws a weekday × hour
//! grid per bucket plus one for all weeks combined. When several records
//! share a cell the most severe tier wins.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

use crate::logic::features::FeatureVector;
use crate::logic::model::{AnomalyResult, AnomalyTier};

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Calendar week bucket, ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WeekBucket {
    pub year: i32,
    pub month: u32,
    pub week_of_month: u32,
}

impl WeekBucket {
    pub fn of(features: &FeatureVector) -> Self {
        let (week_of_month, month, year) = features.week_key();
        Self { year, month, week_of_month }
    }

    pub fn label(&self) -> String {
        format!("Week {} of {:02}/{}", self.week_of_month, self.month, self.year)
    }
}

// ============================================================================
// GRID
// ============================================================================

/// Weekday × hour cells holding the most severe tier seen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierGrid {
    cells: [[Option<AnomalyTier>; 24]; 7],
}

impl TierGrid {
    pub fn mark(&mut self, weekday: u32, hour: u32, tier: AnomalyTier) {
        let (Some(row), true) = (self.cells.get_mut(weekday as usize), hour < 24) else {
            return;
        };
        let cell = &mut row[hour as usize];
        *cell = Some(cell.map_or(tier, |current| current.max(tier)));
    }

    pub fn get(&self, weekday: u32, hour: u32) -> Option<AnomalyTier> {
        self.cells
            .get(weekday as usize)
            .and_then(|row| row.get(hour as usize))
            .copied()
            .flatten()
    }

    fn glyph(cell: Option<AnomalyTier>) -> char {
        match cell {
            None => ' ',
            Some(AnomalyTier::Normal) => '.',
            Some(AnomalyTier::Borderline) => 'o',
            Some(AnomalyTier::Strong) => 'X',
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("    ");
        for hour in 0..24 {
            let _ = write!(out, "{:>3}", hour);
        }
        out.push('\n');
        for (day, row) in self.cells.iter().enumerate() {
            let _ = write!(out, "{:<4}", WEEKDAYS[day]);
            for cell in row {
                let _ = write!(out, "{:>3}", Self::glyph(*cell));
            }
            out.push('\n');
        }
        out
    }
}

// ============================================================================
// SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct AnomalySummary {
    pub tier_counts: BTreeMap<AnomalyTier, usize>,
    pub weeks: BTreeMap<WeekBucket, TierGrid>,
    pub combined: TierGrid,
}

impl AnomalySummary {
    /// `features` and `results` are parallel; extra entries on either side are ignored
    pub fn build(features: &[FeatureVector], results: &[AnomalyResult]) -> Self {
        let mut summary = Self::default();
        for tier in AnomalyTier::ALL {
            summary.tier_counts.insert(tier, 0);
        }

        for (f, r) in features.iter().zip(results) {
            let tier = r.tier();
            *summary.tier_counts.entry(tier).or_insert(0) += 1;
            summary
                .weeks
                .entry(WeekBucket::of(f))
                .or_default()
                .mark(f.weekday, f.hour_of_day, tier);
            summary.combined.mark(f.weekday, f.hour_of_day, tier);
        }
        summary
    }

    pub fn count(&self, tier: AnomalyTier) -> usize {
        self.tier_counts.get(&tier).copied().unwrap_or(0)
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Anomaly summary\n");

        let _ = writeln!(out, "Weeks detected: {}", self.weeks.len());
        for bucket in self.weeks.keys() {
            let _ = writeln!(out, "  {}", bucket.label());
        }

        let counts: Vec<String> = AnomalyTier::ALL
            .iter()
            .map(|t| format!("{} {}", t, self.count(*t)))
            .collect();
        let _ = writeln!(out, "Tiers: {}", counts.join(", "));
        let _ = writeln!(out, "Legend: '.' normal, 'o' borderline anomaly, 'X' strong anomaly");

        let _ = writeln!(out, "\nAll weeks combined");
        out.push_str(&self.combined.render());

        for (bucket, grid) in &self.weeks {
            let _ = writeln!(out, "\n{}", bucket.label());
            out.push_str(&grid.render());
        }
        out
    }
}
