use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::{ArticleDataset, Metric};

// ---------------------------------------------------------------------------
// Daily match percentage
// ---------------------------------------------------------------------------

/// Share of one day's posts that contain the search term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyShare {
    pub date: NaiveDate,
    pub matching: usize,
    pub total: usize,
    /// `100 * matching / total`, in `[0, 100]`.
    pub percentage: f64,
}

/// Percentage of matching posts for every date present in `date_filtered`,
/// sorted by date. Days without posts never appear; days with posts but no
/// matches report 0.
pub fn daily_percentage(
    dataset: &ArticleDataset,
    date_filtered: &[usize],
    matching: &[usize],
) -> Vec<DailyShare> {
    let mut totals: BTreeMap<NaiveDate, (usize, usize)> = BTreeMap::new();
    for a in date_filtered.iter().filter_map(|&i| dataset.get(i)) {
        totals.entry(a.date).or_default().1 += 1;
    }
    for a in matching.iter().filter_map(|&i| dataset.get(i)) {
        if let Some(counts) = totals.get_mut(&a.date) {
            counts.0 += 1;
        }
    }

    totals
        .into_iter()
        .map(|(date, (matching, total))| DailyShare {
            date,
            matching,
            total,
            percentage: 100.0 * matching as f64 / total as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Mean metrics
// ---------------------------------------------------------------------------

/// One value per [`Metric`], indexed in [`Metric::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricMeans {
    values: [f64; Metric::COUNT],
}

impl MetricMeans {
    pub fn get(&self, metric: Metric) -> f64 {
        self.values[metric.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.iter().map(|&m| (m, self.get(m)))
    }

    /// `with - without` per metric. Positive means higher among matches.
    pub fn difference(with: &MetricMeans, without: &MetricMeans) -> MetricMeans {
        let mut values = [0.0; Metric::COUNT];
        for (slot, (a, b)) in values.iter_mut().zip(with.values.iter().zip(&without.values)) {
            *slot = a - b;
        }
        MetricMeans { values }
    }
}

/// Arithmetic mean of every metric over `rows`, rounded to two decimals.
///
/// Returns `None` for an empty partition: there is no mean to show.
pub fn mean_metrics(dataset: &ArticleDataset, rows: &[usize]) -> Option<MetricMeans> {
    let articles: Vec<_> = rows.iter().filter_map(|&i| dataset.get(i)).collect();
    if articles.is_empty() {
        return None;
    }

    let n = articles.len() as f64;
    let mut values = [0.0; Metric::COUNT];
    for (slot, &metric) in values.iter_mut().zip(Metric::ALL.iter()) {
        let sum: u64 = articles.iter().map(|a| a.metric(metric)).sum();
        *slot = round2(sum as f64 / n);
    }
    Some(MetricMeans { values })
}

/// Half-to-even, matching pandas' `round(2)`.
fn round2(v: f64) -> f64 {
    (v * 100.0).round_ties_even() / 100.0
}
