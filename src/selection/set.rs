/// The user's current pick of pairs, capped by the plan bound.
///
/// Stored as an insertion-ordered vector with set semantics: no duplicates,
/// and `len() <= max_pairs` after every mutation the set performs itself.
/// A seed handed in from outside is kept verbatim even above the cap;
/// additions stay blocked until the user removes enough entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierBoundedSelection {
    /// Selected symbols in the order the user picked them
    selected: Vec<String>,
    /// None = no ceiling (top tier)
    max_pairs: Option<usize>,
}

impl TierBoundedSelection {
    pub fn new(max_pairs: Option<usize>) -> Self {
        Self {
            selected: Vec::new(),
            max_pairs,
        }
    }

    pub fn with_seed(seed: Vec<String>, max_pairs: Option<usize>) -> Self {
        let mut selected: Vec<String> = Vec::with_capacity(seed.len());
        for symbol in seed {
            if !selected.contains(&symbol) {
                selected.push(symbol);
            }
        }
        Self { selected, max_pairs }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.selected.iter().any(|s| s == symbol)
    }

    pub fn max_pairs(&self) -> Option<usize> {
        self.max_pairs
    }

    /// Flip membership of `symbol`. Removal always succeeds; an addition at
    /// the cap is silently dropped. The cap is a soft UI bound, not an error.
    /// Returns whether membership actually changed.
    pub fn toggle(&mut self, symbol: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| s == symbol) {
            self.selected.remove(pos);
            return true;
        }

        if !self.can_add_more() {
            return false;
        }
        self.selected.push(symbol.to_string());
        true
    }

    /// Replace the selection with the first `min(catalog, cap)` pairs in
    /// catalog order, or the whole catalog when unbounded. Idempotent.
    pub fn select_all(&mut self, catalog: &[String]) {
        let take = match self.max_pairs {
            Some(max) => max.min(catalog.len()),
            None => catalog.len(),
        };
        self.selected = catalog[..take].to_vec();
    }

    /// Empty the selection. Idempotent.
    pub fn clear_all(&mut self) {
        self.selected.clear();
    }

    pub fn can_add_more(&self) -> bool {
        match self.max_pairs {
            Some(max) => self.selected.len() < max,
            None => true,
        }
    }

    /// True once a select-all could not add anything further; the view uses
    /// this to grey out the action.
    pub fn is_at_select_all_limit(&self, catalog_len: usize) -> bool {
        let reachable = match self.max_pairs {
            Some(max) => max.min(catalog_len),
            None => catalog_len,
        };
        self.selected.len() == reachable
    }

    /// Hand the picks back in insertion order.
    pub fn into_selected(self) -> Vec<String> {
        self.selected
    }
}
