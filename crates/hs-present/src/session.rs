//! Session state machine.
//!
//! All UI state (draft, outstanding submissions, stored result, error,
//! active tab) changes only through [`Session::apply`]. Network I/O lives
//! outside; the reducer hands back an [`Effect::Dispatch`] and later
//! receives the matching [`Action::Settled`].

use std::collections::BTreeSet;
use std::sync::Arc;

use hs_core::{ScenarioDraft, ScenarioRequest, SimulationResult};

use crate::view::{ResultView, ViewTab};

/// Monotonically increasing id attached to each dispatched submission.
pub type Generation = u64;

/// How settlements of overlapping submissions compete for the result slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettlePolicy {
    /// Whichever outstanding submission settles last is stored.
    #[default]
    LastSettledWins,
    /// Only the most recently issued submission may be stored; older ones
    /// are discarded when they settle.
    LatestIssuedWins,
}

/// Terminal state of one submission. `Failed` carries the user-facing text.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Succeeded(SimulationResult),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    EditDraft(ScenarioDraft),
    SelectTab(ViewTab),
    Submit,
    Settled {
        generation: Generation,
        outcome: Outcome,
    },
    /// Abandons every outstanding submission.
    CancelPending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// The caller must send `request` and report back with `generation`.
    Dispatch {
        generation: Generation,
        request: ScenarioRequest,
    },
    /// Validation failed; nothing was sent.
    Rejected(Vec<String>),
    Stored(Generation),
    Failed(Generation),
    /// A settlement arrived for an abandoned or superseded submission.
    Discarded(Generation),
    Cancelled(Vec<Generation>),
}

#[derive(Debug, Clone)]
pub struct Session {
    draft: ScenarioDraft,
    result: Option<Arc<SimulationResult>>,
    error: Option<String>,
    validation_errors: Vec<String>,
    active_tab: ViewTab,
    policy: SettlePolicy,
    next_generation: Generation,
    pending: BTreeSet<Generation>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SettlePolicy::default())
    }
}

impl Session {
    pub fn new(policy: SettlePolicy) -> Self {
        Self {
            draft: ScenarioDraft::default(),
            result: None,
            error: None,
            validation_errors: Vec::new(),
            active_tab: ViewTab::default(),
            policy,
            next_generation: 1,
            pending: BTreeSet::new(),
        }
    }

    pub fn draft(&self) -> &ScenarioDraft {
        &self.draft
    }

    pub fn result(&self) -> Option<&Arc<SimulationResult>> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn validation_errors(&self) -> &[String] {
        &self.validation_errors
    }

    pub fn active_tab(&self) -> ViewTab {
        self.active_tab
    }

    pub fn policy(&self) -> SettlePolicy {
        self.policy
    }

    pub fn is_submitting(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending(&self) -> impl Iterator<Item = Generation> + '_ {
        self.pending.iter().copied()
    }

    /// View data for the active tab, if a result is stored.
    pub fn active_view(&self) -> Option<ResultView> {
        self.result
            .as_deref()
            .map(|result| ResultView::for_tab(self.active_tab, result))
    }

    pub fn apply(&mut self, action: Action) -> Effect {
        match action {
            Action::EditDraft(draft) => {
                self.draft = draft;
                Effect::None
            }
            Action::SelectTab(tab) => {
                self.active_tab = tab;
                Effect::None
            }
            Action::Submit => self.submit(),
            Action::Settled {
                generation,
                outcome,
            } => self.settle(generation, outcome),
            Action::CancelPending => {
                let cancelled: Vec<Generation> = std::mem::take(&mut self.pending)
                    .into_iter()
                    .collect();
                if !cancelled.is_empty() {
                    tracing::debug!(?cancelled, "abandoned outstanding submissions");
                }
                Effect::Cancelled(cancelled)
            }
        }
    }

    fn submit(&mut self) -> Effect {
        match self.draft.to_request() {
            Ok(request) => {
                let generation = self.next_generation;
                self.next_generation += 1;
                if self.policy == SettlePolicy::LatestIssuedWins {
                    // Older submissions can no longer win the result slot.
                    self.pending.clear();
                }
                self.pending.insert(generation);
                self.validation_errors.clear();
                self.error = None;
                Effect::Dispatch {
                    generation,
                    request,
                }
            }
            Err(errors) => {
                self.validation_errors = errors.clone();
                Effect::Rejected(errors)
            }
        }
    }

    fn settle(&mut self, generation: Generation, outcome: Outcome) -> Effect {
        if !self.pending.remove(&generation) {
            tracing::debug!(
                generation,
                "ignoring settlement of abandoned or superseded submission"
            );
            return Effect::Discarded(generation);
        }

        match outcome {
            Outcome::Succeeded(result) => {
                self.result = Some(Arc::new(result));
                self.error = None;
                self.active_tab = ViewTab::default();
                Effect::Stored(generation)
            }
            Outcome::Failed(message) => {
                self.result = None;
                self.error = Some(message);
                Effect::Failed(generation)
            }
        }
    }
}
