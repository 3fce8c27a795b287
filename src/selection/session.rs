use std::fmt;

use crate::data::CatalogPayload;
use crate::domain::{PairCatalog, Tier};

use super::set::TierBoundedSelection;

#[cfg(debug_assertions)]
use crate::config::debug::PRINT_SELECTOR_EVENTS;

/// Error shown when the session never reached an interactive state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The catalog fetch failed; the caller may retry
    LoadFailed(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionError::LoadFailed(msg) => write!(f, "Failed to load available pairs: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {}

/// Where one selector activation currently stands.
#[derive(Debug, Clone)]
enum SessionState {
    /// Catalog fetch outstanding; the selector is non-interactive
    Loading,
    /// Fetch failed; a retry re-enters Loading
    Failed(SessionError),
    /// Catalog on hand; toggle / select-all / clear-all are live
    Ready {
        catalog: PairCatalog,
        tier: Tier,
        selection: TierBoundedSelection,
    },
}

/// One activation of the pair selector, from catalog load to confirm or
/// dismissal.
///
/// The catalog fetch is the only suspension point. Each (re)load is stamped
/// with a generation; a completion whose stamp no longer matches, or that
/// lands after dismissal, is discarded without touching state. Mutating
/// commands are no-ops outside `Ready`.
pub struct SelectorSession {
    state: SessionState,
    /// Pairs the caller wants pre-selected once the catalog arrives
    seed: Vec<String>,
    filter_term: String,
    generation: u64,
    dismissed: bool,
}

impl SelectorSession {
    pub fn new(seed: Vec<String>) -> Self {
        Self {
            state: SessionState::Loading,
            seed,
            filter_term: String::new(),
            generation: 1,
            dismissed: false,
        }
    }

    /// Stamp for the load currently in flight.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Throw away the failed (or stale) state and arm a fresh load.
    /// Returns the new stamp to hand to the fetch.
    pub fn retry(&mut self) -> u64 {
        self.generation += 1;
        self.state = SessionState::Loading;
        self.generation
    }

    /// The widget went away. In-flight loads arriving after this point are
    /// dropped, and the session stays inert.
    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SessionState::Loading) && !self.dismissed
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, SessionState::Ready { .. }) && !self.dismissed
    }

    pub fn last_error(&self) -> Option<&SessionError> {
        match &self.state {
            SessionState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Deliver the outcome of the load stamped `generation`.
    pub fn apply_load(&mut self, generation: u64, result: anyhow::Result<CatalogPayload>) {
        if self.dismissed {
            log::info!("Dropping catalog load result: selector already dismissed");
            return;
        }
        if generation != self.generation {
            log::info!(
                "Dropping stale catalog load result (gen {} vs current {})",
                generation,
                self.generation
            );
            return;
        }

        match result {
            Ok(payload) => {
                let tier = Tier::from_wire(&payload.user_tier);
                let catalog = PairCatalog::new(payload.available_pairs);
                // The backend's max_pairs wins over the local plan table;
                // null on the wire means no ceiling.
                let selection =
                    TierBoundedSelection::with_seed(std::mem::take(&mut self.seed), payload.max_pairs);

                #[cfg(debug_assertions)]
                if PRINT_SELECTOR_EVENTS {
                    log::info!(
                        "[selector] catalog loaded: {} pairs, {} plan, cap {:?}",
                        catalog.len(),
                        tier,
                        selection.max_pairs()
                    );
                }

                self.state = SessionState::Ready {
                    catalog,
                    tier,
                    selection,
                };
            }
            Err(e) => {
                log::error!("Catalog load failed: {:#}", e);
                self.state = SessionState::Failed(SessionError::LoadFailed(e.to_string()));
            }
        }
    }

    // --- COMMANDS (live only in Ready) ---

    pub fn toggle(&mut self, symbol: &str) {
        if self.dismissed {
            return;
        }
        if let SessionState::Ready { selection, .. } = &mut self.state {
            let _changed = selection.toggle(symbol);
            #[cfg(debug_assertions)]
            if PRINT_SELECTOR_EVENTS {
                if _changed {
                    log::info!("[selector] toggled {symbol} ({} selected)", selection.len());
                } else {
                    log::info!("[selector] {symbol} blocked by plan cap");
                }
            }
        }
    }

    pub fn select_all(&mut self) {
        if self.dismissed {
            return;
        }
        if let SessionState::Ready { catalog, selection, .. } = &mut self.state {
            selection.select_all(catalog.pairs());
            #[cfg(debug_assertions)]
            if PRINT_SELECTOR_EVENTS {
                log::info!("[selector] select-all -> {} selected", selection.len());
            }
        }
    }

    pub fn clear_all(&mut self) {
        if self.dismissed {
            return;
        }
        if let SessionState::Ready { selection, .. } = &mut self.state {
            selection.clear_all();
            #[cfg(debug_assertions)]
            if PRINT_SELECTOR_EVENTS {
                log::info!("[selector] cleared selection");
            }
        }
    }

    /// Update the search term. View-only state: the selection is untouched.
    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.filter_term = term.into();
    }

    pub fn filter_term(&self) -> &str {
        &self.filter_term
    }

    // --- VIEWS ---

    /// Catalog entries matching the current filter term, in listing order.
    /// Empty until the session is ready.
    pub fn visible_pairs(&self) -> Vec<&String> {
        match &self.state {
            SessionState::Ready { catalog, .. } if !self.dismissed => {
                catalog.filter(&self.filter_term).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn catalog(&self) -> Option<&PairCatalog> {
        match &self.state {
            SessionState::Ready { catalog, .. } if !self.dismissed => Some(catalog),
            _ => None,
        }
    }

    pub fn tier(&self) -> Option<Tier> {
        match &self.state {
            SessionState::Ready { tier, .. } if !self.dismissed => Some(*tier),
            _ => None,
        }
    }

    pub fn selection(&self) -> Option<&TierBoundedSelection> {
        match &self.state {
            SessionState::Ready { selection, .. } if !self.dismissed => Some(selection),
            _ => None,
        }
    }

    /// Confirm needs a live session with at least one pick.
    pub fn can_confirm(&self) -> bool {
        self.selection().is_some_and(|s| !s.is_empty())
    }

    /// Hand the picks back in insertion order and end the session.
    /// None when there is nothing to confirm.
    pub fn confirm(self) -> Option<Vec<String>> {
        if !self.can_confirm() {
            return None;
        }
        match self.state {
            SessionState::Ready { selection, .. } => Some(selection.into_selected()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn payload(pairs: &[&str], tier: &str, max_pairs: Option<usize>) -> CatalogPayload {
        CatalogPayload {
            available_pairs: pairs.iter().map(|s| s.to_string()).collect(),
            user_tier: tier.to_string(),
            max_pairs,
        }
    }

    fn ready_session() -> SelectorSession {
        let mut session = SelectorSession::new(Vec::new());
        let generation = session.generation();
        session.apply_load(
            generation,
            Ok(payload(
                &["BTCUSDT", "ETHUSDT", "SOLUSDT"],
                "starter",
                Some(2),
            )),
        );
        session
    }

    #[test]
    fn successful_load_enters_ready() {
        let session = ready_session();
        assert!(session.is_ready());
        assert_eq!(session.tier(), Some(Tier::Starter));
        assert_eq!(session.catalog().unwrap().len(), 3);
        assert_eq!(session.selection().unwrap().max_pairs(), Some(2));
    }

    #[test]
    fn commands_are_inert_while_loading() {
        let mut session = SelectorSession::new(Vec::new());
        session.toggle("BTCUSDT");
        session.select_all();
        session.clear_all();
        assert!(session.is_loading());
        assert!(session.selection().is_none());
        assert!(session.visible_pairs().is_empty());
    }

    #[test]
    fn failed_load_surfaces_a_retryable_error() {
        let mut session = SelectorSession::new(Vec::new());
        let generation = session.generation();
        session.apply_load(generation, Err(anyhow!("HTTP 503")));

        assert!(!session.is_ready());
        let err = session.last_error().expect("error should be recorded");
        assert!(err.to_string().contains("HTTP 503"));

        // Retry arms a new load under a fresh stamp
        let next = session.retry();
        assert!(session.is_loading());
        assert!(next > generation);

        session.apply_load(next, Ok(payload(&["BTCUSDT"], "plus", Some(25))));
        assert!(session.is_ready());
        assert_eq!(session.tier(), Some(Tier::Plus));
    }

    #[test]
    fn stale_generation_results_are_discarded() {
        let mut session = SelectorSession::new(Vec::new());
        let first = session.generation();
        let second = session.retry();
        assert_ne!(first, second);

        // The superseded load finishes late; nothing may change.
        session.apply_load(first, Ok(payload(&["BTCUSDT"], "pro", None)));
        assert!(session.is_loading());

        session.apply_load(second, Ok(payload(&["ETHUSDT"], "starter", Some(10))));
        assert!(session.is_ready());
        assert_eq!(session.catalog().unwrap().pairs(), &["ETHUSDT"]);
    }

    #[test]
    fn loads_arriving_after_dismissal_are_dropped() {
        let mut session = SelectorSession::new(Vec::new());
        let generation = session.generation();
        session.dismiss();

        session.apply_load(generation, Ok(payload(&["BTCUSDT"], "pro", None)));
        assert!(!session.is_ready());
        assert!(session.selection().is_none());
    }

    #[test]
    fn dismissal_makes_the_session_inert() {
        let mut session = ready_session();
        session.toggle("BTCUSDT");
        session.dismiss();

        session.toggle("ETHUSDT");
        session.select_all();
        assert!(!session.is_ready());
        assert!(session.selection().is_none());
        assert!(session.visible_pairs().is_empty());

        // A dismissed selector can never hand picks back
        assert!(!session.can_confirm());
        assert_eq!(session.confirm(), None);
    }

    #[test]
    fn seed_is_applied_when_the_catalog_arrives() {
        let mut session = SelectorSession::new(vec![
            "ETHUSDT".to_string(),
            "SOLUSDT".to_string(),
            "ADAUSDT".to_string(),
        ]);
        let generation = session.generation();
        // Seed saved under a bigger plan: kept whole even above the cap of 2
        session.apply_load(
            generation,
            Ok(payload(&["BTCUSDT", "ETHUSDT", "SOLUSDT"], "starter", Some(2))),
        );

        let selection = session.selection().unwrap();
        assert_eq!(selection.selected(), &["ETHUSDT", "SOLUSDT", "ADAUSDT"]);
        assert!(!selection.can_add_more());
    }

    #[test]
    fn filtering_is_a_view_and_leaves_picks_alone() {
        let mut session = ready_session();
        session.toggle("SOLUSDT");

        session.set_filter("eth");
        assert_eq!(session.visible_pairs(), vec!["ETHUSDT"]);
        assert_eq!(session.selection().unwrap().selected(), &["SOLUSDT"]);

        session.set_filter("");
        assert_eq!(session.visible_pairs().len(), 3);
    }

    #[test]
    fn confirm_returns_picks_in_insertion_order() {
        let mut session = ready_session();
        session.toggle("SOLUSDT");
        session.toggle("BTCUSDT");

        assert!(session.can_confirm());
        assert_eq!(
            session.confirm(),
            Some(vec!["SOLUSDT".to_string(), "BTCUSDT".to_string()])
        );
    }

    #[test]
    fn confirm_needs_at_least_one_pick() {
        let session = ready_session();
        assert!(!session.can_confirm());
        assert_eq!(session.confirm(), None);
    }

    #[test]
    fn wire_cap_wins_over_the_local_plan_table() {
        let mut session = SelectorSession::new(Vec::new());
        let generation = session.generation();
        // Backend says starter but grants 15; the payload is authoritative.
        session.apply_load(generation, Ok(payload(&["BTCUSDT"], "starter", Some(15))));
        assert_eq!(session.selection().unwrap().max_pairs(), Some(15));
    }
}
