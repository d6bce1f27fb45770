use chrono::NaiveDate;

use crate::data::aggregate::{daily_percentage, mean_metrics, DailyShare, MetricMeans};
use crate::data::filter::{filter_by_date, partition_by_term, MatchOutcome};
use crate::data::model::{ArticleDataset, Reaction};
use crate::data::rank::{top_n, RankedPost, DEFAULT_TOP_N};

// ---------------------------------------------------------------------------
// Query – the current filter parameters
// ---------------------------------------------------------------------------

/// Everything the user can change. Owned by the UI state, passed by
/// reference into [`run`].
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub term: String,
    pub reaction: Reaction,
    pub top_n: usize,
}

impl Query {
    /// Whole-range query with no term.
    pub fn spanning(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            term: String::new(),
            reaction: Reaction::Haha,
            top_n: DEFAULT_TOP_N,
        }
    }
}

// ---------------------------------------------------------------------------
// Analysis – everything the dashboard renders for one query
// ---------------------------------------------------------------------------

/// Pipeline output. Each optional section is `None` when the dashboard has
/// nothing to draw for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub outcome: MatchOutcome,
    /// Rows in the whole dataset.
    pub total: usize,
    /// Rows within the date range.
    pub date_filtered: usize,
    pub matching_count: usize,
    pub non_matching_count: usize,
    /// Present when a term is given and at least one row matches.
    pub daily: Option<Vec<DailyShare>>,
    pub means_with: Option<MetricMeans>,
    pub means_without: Option<MetricMeans>,
    /// Present when a term is given and both partitions are non-empty.
    pub difference: Option<MetricMeans>,
    /// Present when a term is given and at least one row matches.
    pub top_posts: Option<Vec<RankedPost>>,
}

/// Run the full filter-aggregate pipeline for `query` from scratch.
pub fn run(dataset: &ArticleDataset, query: &Query) -> Analysis {
    let rows = filter_by_date(dataset, query.start, query.end);
    let partition = partition_by_term(dataset, &rows, &query.term);
    let outcome = partition.outcome();
    log::debug!(
        "query {:?}..={:?} term={:?}: {} in range, {} matching, {} not",
        query.start,
        query.end,
        query.term,
        rows.len(),
        partition.matching.len(),
        partition.non_matching.len()
    );

    let has_matches = matches!(outcome, MatchOutcome::Matches(_));

    let daily = has_matches.then(|| daily_percentage(dataset, &rows, &partition.matching));
    let means_with = mean_metrics(dataset, &partition.matching);
    let means_without = mean_metrics(dataset, &partition.non_matching);
    let difference = match (&means_with, &means_without) {
        (Some(with), Some(without)) if has_matches => Some(MetricMeans::difference(with, without)),
        _ => None,
    };
    let top_posts = has_matches.then(|| top_n(dataset, &partition.matching, query.reaction, query.top_n));

    Analysis {
        outcome,
        total: dataset.len(),
        date_filtered: rows.len(),
        matching_count: partition.matching.len(),
        non_matching_count: partition.non_matching.len(),
        daily,
        means_with,
        means_without,
        difference,
        top_posts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{article, day};
    use crate::data::model::Metric;

    const LIKE: Metric = Metric::Reaction(Reaction::Like);

    fn two_posts() -> ArticleDataset {
        ArticleDataset::from_articles(vec![
            article(day(2024, 1, 1), Some("green energy"), 5),
            article(day(2024, 1, 1), Some("other"), 2),
        ])
    }

    fn query(term: &str) -> Query {
        Query {
            term: term.to_string(),
            reaction: Reaction::Like,
            ..Query::spanning(day(2024, 1, 1), day(2024, 1, 1))
        }
    }

    #[test]
    fn green_energy_scenario() {
        let a = run(&two_posts(), &query("green"));
        assert_eq!(a.outcome, MatchOutcome::Matches(1));
        assert_eq!(a.total, 2);
        assert_eq!((a.matching_count, a.non_matching_count), (1, 1));

        let daily = a.daily.unwrap();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].date, day(2024, 1, 1));
        assert_eq!(daily[0].percentage, 50.0);

        assert_eq!(a.means_with.unwrap().get(LIKE), 5.0);
        assert_eq!(a.means_without.unwrap().get(LIKE), 2.0);
        assert_eq!(a.difference.unwrap().get(LIKE), 3.0);

        let top = a.top_posts.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].text, "green energy");
        assert_eq!(top[0].value, 5);
    }

    #[test]
    fn empty_term_awaits_input() {
        let a = run(&two_posts(), &query(""));
        assert_eq!(a.outcome, MatchOutcome::AwaitingInput);
        assert_eq!((a.matching_count, a.non_matching_count), (0, 2));
        assert!(a.daily.is_none());
        assert!(a.means_with.is_none());
        assert_eq!(a.means_without.unwrap().get(LIKE), 3.5);
        assert!(a.difference.is_none());
        assert!(a.top_posts.is_none());
    }

    #[test]
    fn unmatched_term_reports_no_results() {
        let a = run(&two_posts(), &query("zz_nomatch"));
        assert_eq!(a.outcome, MatchOutcome::NoResults);
        assert_eq!(a.matching_count, 0);
        assert!(a.daily.is_none());
        assert!(a.means_with.is_none());
        assert!(a.difference.is_none());
        assert!(a.top_posts.is_none());
    }

    #[test]
    fn all_rows_matching_has_no_difference() {
        let a = run(&two_posts(), &query("e"));
        assert_eq!(a.outcome, MatchOutcome::Matches(2));
        assert!(a.means_without.is_none());
        assert!(a.difference.is_none());
        assert_eq!(a.daily.unwrap()[0].percentage, 100.0);
    }

    #[test]
    fn inverted_range_is_empty_not_an_error() {
        let q = Query {
            start: day(2024, 1, 2),
            end: day(2024, 1, 1),
            ..query("green")
        };
        let a = run(&two_posts(), &q);
        assert_eq!(a.total, 2);
        assert_eq!(a.date_filtered, 0);
        assert_eq!(a.outcome, MatchOutcome::NoResults);
        assert!(a.means_without.is_none());
    }

    #[test]
    fn repeated_runs_are_identical() {
        let ds = two_posts();
        let q = query("green");
        assert_eq!(run(&ds, &q), run(&ds, &q));
    }
}
