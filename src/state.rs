use chrono::NaiveDate;

use crate::analysis::{self, Analysis, Query};
use crate::config::Cli;
use crate::data::model::{ArticleDataset, Reaction};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<ArticleDataset>,

    /// Current filter parameters.
    pub query: Query,

    /// Pipeline output for `query` (cached until the next change).
    pub analysis: Option<Analysis>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            dataset: None,
            query: Query::spanning(today, today),
            analysis: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Initial state carrying the startup term, reaction and ranking size.
    pub fn from_cli(cli: &Cli) -> Self {
        let mut state = Self::default();
        state.query.term = cli.term.clone();
        state.query.reaction = cli.reaction;
        state.query.top_n = cli.top_n;
        state
    }

    /// Ingest a newly loaded dataset: reset the range to its bounds and rerun.
    pub fn set_dataset(&mut self, dataset: ArticleDataset) {
        if let Some((min, max)) = dataset.date_bounds() {
            self.query.start = min;
            self.query.end = max;
        }
        self.dataset = Some(dataset);
        self.status_message = None;
        self.refresh();
    }

    /// Recompute `analysis` from scratch for the current query.
    pub fn refresh(&mut self) {
        self.analysis = self
            .dataset
            .as_ref()
            .map(|ds| analysis::run(ds, &self.query));
    }

    /// Clamp `date` into the dataset's observed range.
    fn clamp_to_bounds(&self, date: NaiveDate) -> NaiveDate {
        match self.dataset.as_ref().and_then(|ds| ds.date_bounds()) {
            Some((min, max)) => date.clamp(min, max),
            None => date,
        }
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        let date = self.clamp_to_bounds(date);
        if date != self.query.start {
            self.query.start = date;
            self.refresh();
        }
    }

    pub fn set_end_date(&mut self, date: NaiveDate) {
        let date = self.clamp_to_bounds(date);
        if date != self.query.end {
            self.query.end = date;
            self.refresh();
        }
    }

    pub fn set_search_term(&mut self, term: &str) {
        if term != self.query.term {
            self.query.term = term.to_string();
            self.refresh();
        }
    }

    pub fn set_reaction(&mut self, reaction: Reaction) {
        if reaction != self.query.reaction {
            self.query.reaction = reaction;
            self.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::MatchOutcome;
    use crate::data::model::tests::{article, day};

    fn loaded() -> AppState {
        let mut state = AppState::default();
        state.query.term = "green".to_string();
        state.set_dataset(ArticleDataset::from_articles(vec![
            article(day(2024, 1, 1), Some("green"), 4),
            article(day(2024, 1, 3), Some("red"), 1),
            article(day(2024, 1, 5), Some("green tea"), 9),
        ]));
        state
    }

    #[test]
    fn loading_resets_range_and_runs_pipeline() {
        let state = loaded();
        assert_eq!(state.query.start, day(2024, 1, 1));
        assert_eq!(state.query.end, day(2024, 1, 5));
        let analysis = state.analysis.as_ref().unwrap();
        assert_eq!(analysis.outcome, MatchOutcome::Matches(2));
    }

    #[test]
    fn dates_are_clamped_to_dataset_bounds() {
        let mut state = loaded();
        state.set_start_date(day(2023, 12, 1));
        assert_eq!(state.query.start, day(2024, 1, 1));
        state.set_end_date(day(2024, 1, 2));
        assert_eq!(state.query.end, day(2024, 1, 2));
        assert_eq!(state.analysis.as_ref().unwrap().date_filtered, 1);
    }

    #[test]
    fn parameter_changes_rerun_the_pipeline() {
        let mut state = loaded();
        state.set_search_term("");
        assert_eq!(state.analysis.as_ref().unwrap().outcome, MatchOutcome::AwaitingInput);

        state.set_search_term("tea");
        state.set_reaction(Reaction::Like);
        let top = state.analysis.as_ref().unwrap().top_posts.clone().unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].value, 9);
    }

    #[test]
    fn no_dataset_means_no_analysis() {
        let mut state = AppState::default();
        state.set_search_term("anything");
        assert!(state.analysis.is_none());
    }
}
