use chrono::NaiveDate;

use super::model::{Article, ArticleDataset};

// ---------------------------------------------------------------------------
// Date-range filter
// ---------------------------------------------------------------------------

/// Return indices of articles dated within `[start, end]`, in dataset order.
///
/// An inverted range (`start > end`) selects nothing.
pub fn filter_by_date(dataset: &ArticleDataset, start: NaiveDate, end: NaiveDate) -> Vec<usize> {
    if start > end {
        return Vec::new();
    }
    dataset
        .articles()
        .iter()
        .enumerate()
        .filter(|(_, a)| start <= a.date && a.date <= end)
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Term matcher
// ---------------------------------------------------------------------------

/// How a search term resolved against the date-filtered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// No term entered yet; term-based sections stay hidden.
    AwaitingInput,
    /// A term was entered but no row contains it.
    NoResults,
    /// Number of matching rows (always > 0).
    Matches(usize),
}

/// Split of a row set into rows containing the term and the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermPartition {
    /// The search term, `None` when the input was empty.
    pub term: Option<String>,
    pub matching: Vec<usize>,
    pub non_matching: Vec<usize>,
}

impl TermPartition {
    pub fn outcome(&self) -> MatchOutcome {
        match (&self.term, self.matching.len()) {
            (None, _) => MatchOutcome::AwaitingInput,
            (Some(_), 0) => MatchOutcome::NoResults,
            (Some(_), n) => MatchOutcome::Matches(n),
        }
    }
}

/// Partition `rows` by case-insensitive literal containment of `term` in
/// `text` or `fulltext`.
///
/// * Empty term → nothing matches, every row lands in `non_matching`.
/// * Missing text fields are searched as the empty string.
/// * Both output vectors keep the order of `rows`.
pub fn partition_by_term(dataset: &ArticleDataset, rows: &[usize], term: &str) -> TermPartition {
    if term.is_empty() {
        return TermPartition {
            term: None,
            matching: Vec::new(),
            non_matching: rows.to_vec(),
        };
    }

    let needle = term.to_lowercase();
    let (matching, non_matching): (Vec<usize>, Vec<usize>) = rows
        .iter()
        .copied()
        .partition(|&i| dataset.get(i).is_some_and(|a| contains_term(a, &needle)));

    TermPartition {
        term: Some(term.to_string()),
        matching,
        non_matching,
    }
}

/// `needle` must already be lowercased.
fn contains_term(article: &Article, needle: &str) -> bool {
    article.text_or_empty().to_lowercase().contains(needle)
        || article.fulltext_or_empty().to_lowercase().contains(needle)
}
