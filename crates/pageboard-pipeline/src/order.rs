//! Canonical page ordering.
//!
//! Screenshots are named after the page they show, optionally prefixed
//! with their section (`client-home`, `admin-login`). A [`PageOrder`]
//! ranks names by their position in an injected list; names missing
//! from the list sort after every listed one, alphabetically.

/// Rank assigned to names missing from the order list.
pub const UNRANKED: usize = 10_000;

/// An ordered list of known page names with an optional section prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOrder {
    prefix: Option<String>,
    names: Vec<String>,
}

impl PageOrder {
    /// Create an order from page names, most important first.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefix: None,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Strip `"<prefix>-"` from names before ranking them.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Position of `stem` in the list, or [`UNRANKED`].
    #[must_use]
    pub fn rank(&self, stem: &str) -> usize {
        let name = self
            .prefix
            .as_deref()
            .and_then(|prefix| stem.strip_prefix(prefix))
            .and_then(|rest| rest.strip_prefix('-'))
            .unwrap_or(stem);
        self.names
            .iter()
            .position(|n| n == name)
            .unwrap_or(UNRANKED)
    }

    /// Stable sort of `items` by `(rank, stem)`.
    pub fn sort_by_stem<T>(&self, items: &mut [T], stem: impl Fn(&T) -> &str) {
        items.sort_by(|a, b| {
            let (a, b) = (stem(a), stem(b));
            self.rank(a).cmp(&self.rank(b)).then_with(|| a.cmp(b))
        });
    }
}
