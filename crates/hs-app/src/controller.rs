//! Request controller: runs solver calls on worker threads and feeds their
//! settlements back into the presentation session.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread;
use std::time::Duration;

use hs_core::{ScenarioDraft, ScenarioRequest, SimulationResult};
use hs_present::{Action, Effect, Generation, Outcome, Session, SettlePolicy, ViewTab};

use crate::error::{AppError, AppResult, SubmitError};
use crate::solver_client::SolverTransport;

/// Result of one worker, tagged with the submission it belongs to.
#[derive(Debug, Clone)]
pub struct Settlement {
    pub generation: Generation,
    pub outcome: Outcome,
}

type Notifier = Arc<dyn Fn() + Send + Sync>;

pub struct RequestController {
    session: Session,
    transport: Arc<dyn SolverTransport>,
    settle_tx: Sender<Settlement>,
    settle_rx: Receiver<Settlement>,
    notifier: Option<Notifier>,
}

impl RequestController {
    pub fn new(transport: Arc<dyn SolverTransport>, policy: SettlePolicy) -> Self {
        let (settle_tx, settle_rx) = channel();
        Self {
            session: Session::new(policy),
            transport,
            settle_tx,
            settle_rx,
            notifier: None,
        }
    }

    /// Called from the worker thread after each settlement is queued, e.g. to
    /// wake a UI event loop.
    pub fn with_notifier(mut self, notifier: impl Fn() + Send + Sync + 'static) -> Self {
        self.notifier = Some(Arc::new(notifier));
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn edit_draft(&mut self, draft: ScenarioDraft) {
        self.session.apply(Action::EditDraft(draft));
    }

    pub fn select_tab(&mut self, tab: ViewTab) {
        self.session.apply(Action::SelectTab(tab));
    }

    /// Validates the current draft and, when it is submittable, issues
    /// exactly one solver call on a new worker thread.
    pub fn submit(&mut self) -> Effect {
        let effect = self.session.apply(Action::Submit);
        match &effect {
            Effect::Dispatch {
                generation,
                request,
            } => self.spawn_worker(*generation, *request),
            Effect::Rejected(errors) => {
                tracing::info!(errors = errors.len(), "scenario rejected by validation");
            }
            _ => {}
        }
        effect
    }

    pub fn cancel(&mut self) -> Effect {
        self.session.apply(Action::CancelPending)
    }

    /// Applies every settlement that has arrived, without blocking.
    pub fn poll(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        while let Ok(settlement) = self.settle_rx.try_recv() {
            effects.push(self.apply_settlement(settlement));
        }
        effects
    }

    /// Blocks until one settlement arrives or `timeout` elapses.
    pub fn wait_next(&mut self, timeout: Duration) -> Option<Effect> {
        match self.settle_rx.recv_timeout(timeout) {
            Ok(settlement) => Some(self.apply_settlement(settlement)),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Submits the current draft and blocks until that submission settles.
    pub fn run_to_completion(&mut self) -> AppResult<Arc<SimulationResult>> {
        let generation = match self.submit() {
            Effect::Dispatch { generation, .. } => generation,
            Effect::Rejected(errors) => return Err(AppError::InvalidScenario(errors)),
            other => {
                return Err(AppError::Simulation(format!(
                    "unexpected submission state: {other:?}"
                )));
            }
        };

        loop {
            let settlement = self
                .settle_rx
                .recv()
                .map_err(|_| AppError::Abandoned)?;
            match self.apply_settlement(settlement) {
                Effect::Stored(g) if g == generation => {
                    return self.session.result().cloned().ok_or(AppError::Abandoned);
                }
                Effect::Failed(g) if g == generation => {
                    let message = self.session.error().unwrap_or_default().to_string();
                    return Err(AppError::Simulation(message));
                }
                Effect::Discarded(g) if g == generation => return Err(AppError::Abandoned),
                _ => {}
            }
        }
    }

    fn apply_settlement(&mut self, settlement: Settlement) -> Effect {
        self.session.apply(Action::Settled {
            generation: settlement.generation,
            outcome: settlement.outcome,
        })
    }

    fn spawn_worker(&self, generation: Generation, request: ScenarioRequest) {
        tracing::info!(
            generation,
            m = request.m,
            num_neighborhoods = request.num_neighborhoods,
            k = request.k,
            random_seed = ?request.random_seed,
            "dispatching simulation"
        );

        let transport = Arc::clone(&self.transport);
        let tx = self.settle_tx.clone();
        let notifier = self.notifier.clone();

        thread::spawn(move || {
            let outcome = settle_outcome(generation, transport.simulate(&request));
            // The controller may be gone; nothing is waiting for the result then.
            let _ = tx.send(Settlement {
                generation,
                outcome,
            });
            if let Some(notify) = notifier {
                notify();
            }
        });
    }
}

fn settle_outcome(
    generation: Generation,
    result: Result<SimulationResult, SubmitError>,
) -> Outcome {
    match result {
        Ok(result) => {
            if let Err(e) = result.check_consistency() {
                tracing::warn!(generation, error = %e, "solver payload is inconsistent");
            }
            tracing::info!(
                generation,
                hospitals = result.hospitals.len(),
                neighborhoods = result.neighborhoods.len(),
                iterations = result.metrics.iterations,
                "simulation settled"
            );
            Outcome::Succeeded(result)
        }
        Err(e) => {
            tracing::warn!(generation, error = %e, "simulation failed");
            Outcome::Failed(e.user_message())
        }
    }
}
