use super::model::{ArticleDataset, Reaction};

/// Number of posts shown in the ranking.
pub const DEFAULT_TOP_N: usize = 10;

/// One entry in the top-posts table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedPost {
    /// Row index into the dataset.
    pub index: usize,
    pub text: String,
    pub value: u64,
}

/// The `n` rows of `matching` with the highest `reaction` count, highest first.
///
/// Ties keep their order in `matching`, so repeated calls give identical
/// output. Fewer than `n` rows yields a shorter list.
pub fn top_n(dataset: &ArticleDataset, matching: &[usize], reaction: Reaction, n: usize) -> Vec<RankedPost> {
    let mut ranked: Vec<RankedPost> = matching
        .iter()
        .filter_map(|&index| {
            let a = dataset.get(index)?;
            Some(RankedPost {
                index,
                text: a.text_or_empty().to_string(),
                value: a.reactions.get(reaction),
            })
        })
        .collect();

    // `sort_by` is stable.
    ranked.sort_by(|a, b| b.value.cmp(&a.value));
    ranked.truncate(n);
    ranked
}
