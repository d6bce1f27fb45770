use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Reaction / Metric – the fixed set of numeric columns
// ---------------------------------------------------------------------------

/// One of the seven reaction counters attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reaction {
    Haha,
    Like,
    Wow,
    Angry,
    Sad,
    Love,
    Hug,
}

impl Reaction {
    /// All reactions in source column order.
    pub const ALL: [Reaction; 7] = [
        Reaction::Haha,
        Reaction::Like,
        Reaction::Wow,
        Reaction::Angry,
        Reaction::Sad,
        Reaction::Love,
        Reaction::Hug,
    ];

    /// Column name in the dataset.
    pub fn column(self) -> &'static str {
        match self {
            Reaction::Haha => "haha",
            Reaction::Like => "like",
            Reaction::Wow => "wow",
            Reaction::Angry => "angry",
            Reaction::Sad => "sad",
            Reaction::Love => "love",
            Reaction::Hug => "hug",
        }
    }

    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.column() == name)
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A numeric metric column: the seven reactions plus shares and comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Reaction(Reaction),
    Shares,
    CommentsNum,
}

impl Metric {
    pub const COUNT: usize = 9;

    /// All metrics in source column order (reactions first, then engagement).
    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::Reaction(Reaction::Haha),
        Metric::Reaction(Reaction::Like),
        Metric::Reaction(Reaction::Wow),
        Metric::Reaction(Reaction::Angry),
        Metric::Reaction(Reaction::Sad),
        Metric::Reaction(Reaction::Love),
        Metric::Reaction(Reaction::Hug),
        Metric::Shares,
        Metric::CommentsNum,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Metric::Reaction(r) => r.column(),
            Metric::Shares => "shares",
            Metric::CommentsNum => "comments_num",
        }
    }

    /// Position of this metric in [`Metric::ALL`].
    pub fn index(self) -> usize {
        match self {
            Metric::Reaction(r) => r as usize,
            Metric::Shares => 7,
            Metric::CommentsNum => 8,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

// ---------------------------------------------------------------------------
// Article – one row of the source table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reactions {
    pub haha: u64,
    pub like: u64,
    pub wow: u64,
    pub angry: u64,
    pub sad: u64,
    pub love: u64,
    pub hug: u64,
}

impl Reactions {
    pub fn get(&self, reaction: Reaction) -> u64 {
        match reaction {
            Reaction::Haha => self.haha,
            Reaction::Like => self.like,
            Reaction::Wow => self.wow,
            Reaction::Angry => self.angry,
            Reaction::Sad => self.sad,
            Reaction::Love => self.love,
            Reaction::Hug => self.hug,
        }
    }

    pub fn set(&mut self, reaction: Reaction, value: u64) {
        let slot = match reaction {
            Reaction::Haha => &mut self.haha,
            Reaction::Like => &mut self.like,
            Reaction::Wow => &mut self.wow,
            Reaction::Angry => &mut self.angry,
            Reaction::Sad => &mut self.sad,
            Reaction::Love => &mut self.love,
            Reaction::Hug => &mut self.hug,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Engagement {
    pub shares: u64,
    pub comments_num: u64,
}

/// A single article / post.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    /// Publication day; any time-of-day is dropped at load time.
    pub date: NaiveDate,
    pub text: Option<String>,
    pub fulltext: Option<String>,
    pub reactions: Reactions,
    pub engagement: Engagement,
}

impl Article {
    pub fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Reaction(r) => self.reactions.get(r),
            Metric::Shares => self.engagement.shares,
            Metric::CommentsNum => self.engagement.comments_num,
        }
    }

    /// `text`, with a missing value read as empty.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn fulltext_or_empty(&self) -> &str {
        self.fulltext.as_deref().unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// ArticleDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Read-only once built; every view is an index set
/// into `articles`.
#[derive(Debug, Clone, Default)]
pub struct ArticleDataset {
    articles: Vec<Article>,
    bounds: Option<(NaiveDate, NaiveDate)>,
}

impl ArticleDataset {
    /// Build the dataset and record its observed date range.
    pub fn from_articles(articles: Vec<Article>) -> Self {
        let bounds = articles.iter().fold(None, |acc, a| match acc {
            None => Some((a.date, a.date)),
            Some((lo, hi)) => Some((a.date.min(lo), a.date.max(hi))),
        });
        ArticleDataset { articles, bounds }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Row at `index`. Indices come from this dataset's own filters.
    pub fn get(&self, index: usize) -> Option<&Article> {
        self.articles.get(index)
    }

    /// Observed `(min, max)` dates, `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.bounds
    }

    /// Number of articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}
