use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hs_app::error::{GENERIC_FAILURE, REJECTED_FALLBACK};
use hs_app::{RequestController, SolverTransport, SubmitError};
use hs_core::*;
use hs_present::{Effect, ResultView, SettlePolicy, ViewTab};

const WAIT: Duration = Duration::from_secs(5);

type Reply = Result<SimulationResult, SubmitError>;

fn payload(grid_size: u32) -> SimulationResult {
    SimulationResult {
        grid_size,
        hospitals: vec![
            Hospital { id: 0, x: 25.0, y: 25.0 },
            Hospital { id: 1, x: 75.0, y: 75.0 },
            Hospital { id: 2, x: 25.0, y: 75.0 },
        ],
        neighborhoods: vec![
            Neighborhood { id: 0, x: 20.0, y: 30.0, cluster: 0 },
            Neighborhood { id: 1, x: 80.0, y: 70.0, cluster: 1 },
            Neighborhood { id: 2, x: 70.0, y: 90.0, cluster: 1 },
        ],
        metrics: Metrics {
            avg_distance: 7.5,
            max_distance: 16.0,
            inertia: 310.0,
            iterations: 3,
            history: Some(vec![900.0, 420.0, 310.0]),
        },
        summaries: vec![
            HospitalSummary {
                hospital_id: 1,
                vecindarios_asignados: 2,
                avg_distance: Some(9.0),
                coordinates: Some(Coordinates::new(75.0, 75.0)),
            },
            HospitalSummary {
                hospital_id: 0,
                vecindarios_asignados: 1,
                avg_distance: Some(7.0),
                coordinates: None,
            },
        ],
        mensaje: Some("ok".to_string()),
    }
}

fn draft(k: u32) -> ScenarioDraft {
    ScenarioDraft {
        m: "100".to_string(),
        num_neighborhoods: "600".to_string(),
        k: k.to_string(),
        random_seed: "42".to_string(),
    }
}

/// Returns a fixed reply and records every request it sees.
struct FixedSolver {
    reply: Reply,
    seen: Mutex<Vec<ScenarioRequest>>,
}

impl FixedSolver {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            seen: Mutex::new(Vec::new()),
        })
    }
}

impl SolverTransport for FixedSolver {
    fn simulate(&self, request: &ScenarioRequest) -> Reply {
        self.seen.lock().unwrap().push(*request);
        self.reply.clone()
    }
}

/// Holds each call until the test releases the reply for its `k`.
struct GatedSolver {
    gates: Mutex<HashMap<u32, Receiver<Reply>>>,
    calls: AtomicUsize,
}

impl GatedSolver {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            gates: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        })
    }

    fn gate(&self, k: u32) -> Sender<Reply> {
        let (tx, rx) = channel();
        self.gates.lock().unwrap().insert(k, rx);
        tx
    }
}

impl SolverTransport for GatedSolver {
    fn simulate(&self, request: &ScenarioRequest) -> Reply {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().remove(&request.k);
        match gate {
            Some(rx) => rx
                .recv()
                .unwrap_or_else(|_| Err(SubmitError::Transport("gate dropped".into()))),
            None => Err(SubmitError::Transport("no gate".into())),
        }
    }
}

#[test]
fn end_to_end_scenario_resets_tab_and_renders_payload() {
    let solver = FixedSolver::new(Ok(payload(100)));
    let mut controller = RequestController::new(solver.clone(), SettlePolicy::default());

    controller.select_tab(ViewTab::Detail);
    controller.edit_draft(draft(5));
    assert!(matches!(controller.submit(), Effect::Dispatch { .. }));
    assert!(controller.session().is_submitting());

    assert!(matches!(controller.wait_next(WAIT), Some(Effect::Stored(_))));
    assert!(!controller.session().is_submitting());
    assert_eq!(controller.session().active_tab(), ViewTab::Plot);

    assert_eq!(
        solver.seen.lock().unwrap().as_slice(),
        &[ScenarioRequest {
            m: 100,
            num_neighborhoods: 600,
            k: 5,
            random_seed: Some(42),
        }]
    );

    let expected = payload(100);
    let stored = controller.session().result().cloned().unwrap();
    assert_eq!(*stored, expected);

    for tab in ViewTab::ALL {
        controller.select_tab(tab);
        let view = controller.session().active_view().unwrap();
        assert_eq!(view.tab(), tab);
        assert_eq!(view, ResultView::for_tab(tab, &expected));
    }

    match ResultView::for_tab(ViewTab::Detail, &stored) {
        ResultView::Detail(rows) => {
            let counts: Vec<u32> = rows.iter().map(|r| r.vecindarios_asignados).collect();
            assert_eq!(counts, vec![1, 2, 0]);
        }
        other => panic!("unexpected view {other:?}"),
    }
    assert_eq!(**controller.session().result().unwrap(), expected);
}

#[test]
fn overlapping_submissions_last_settled_wins() {
    let solver = GatedSolver::new();
    let release_a = solver.gate(5);
    let release_b = solver.gate(3);
    let mut controller = RequestController::new(solver.clone(), SettlePolicy::LastSettledWins);

    controller.edit_draft(draft(5));
    let a = match controller.submit() {
        Effect::Dispatch { generation, .. } => generation,
        other => panic!("unexpected {other:?}"),
    };
    controller.edit_draft(draft(3));
    let b = match controller.submit() {
        Effect::Dispatch { generation, .. } => generation,
        other => panic!("unexpected {other:?}"),
    };

    release_b.send(Ok(payload(20))).unwrap();
    assert_eq!(controller.wait_next(WAIT), Some(Effect::Stored(b)));
    assert!(controller.session().is_submitting());

    release_a.send(Ok(payload(10))).unwrap();
    assert_eq!(controller.wait_next(WAIT), Some(Effect::Stored(a)));

    assert_eq!(controller.session().result().map(|r| r.grid_size), Some(10));
    assert!(!controller.session().is_submitting());
    assert_eq!(solver.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn latest_issued_policy_keeps_newest_submission() {
    let solver = GatedSolver::new();
    let release_a = solver.gate(5);
    let release_b = solver.gate(3);
    let mut controller = RequestController::new(solver, SettlePolicy::LatestIssuedWins);

    controller.edit_draft(draft(5));
    controller.submit();
    controller.edit_draft(draft(3));
    controller.submit();

    release_b.send(Ok(payload(20))).unwrap();
    assert!(matches!(controller.wait_next(WAIT), Some(Effect::Stored(_))));
    release_a.send(Ok(payload(10))).unwrap();
    assert!(matches!(controller.wait_next(WAIT), Some(Effect::Discarded(_))));

    assert_eq!(controller.session().result().map(|r| r.grid_size), Some(20));
}

#[test]
fn invalid_draft_issues_no_request() {
    let solver = GatedSolver::new();
    let mut controller = RequestController::new(solver.clone(), SettlePolicy::default());
    controller.edit_draft(ScenarioDraft {
        m: "-1".to_string(),
        ..draft(5)
    });

    assert!(matches!(controller.submit(), Effect::Rejected(_)));
    assert!(controller.wait_next(Duration::from_millis(50)).is_none());
    assert_eq!(solver.calls.load(Ordering::SeqCst), 0);
    assert!(matches!(
        controller.run_to_completion(),
        Err(hs_app::AppError::InvalidScenario(_))
    ));
}

#[test]
fn failures_surface_user_messages_and_clear_result() {
    let cases = [
        (
            SubmitError::Rejected {
                status: 400,
                body: "K too large".to_string(),
            },
            "K too large",
        ),
        (
            SubmitError::Rejected {
                status: 500,
                body: String::new(),
            },
            REJECTED_FALLBACK,
        ),
        (SubmitError::Transport("refused".to_string()), GENERIC_FAILURE),
        (SubmitError::Decode("eof".to_string()), GENERIC_FAILURE),
    ];

    for (error, expected) in cases {
        let solver = GatedSolver::new();
        let first = solver.gate(5);
        let second = solver.gate(4);
        let mut controller = RequestController::new(solver, SettlePolicy::default());

        controller.edit_draft(draft(5));
        controller.submit();
        first.send(Ok(payload(10))).unwrap();
        controller.wait_next(WAIT);
        controller.select_tab(ViewTab::Analytics);

        controller.edit_draft(draft(4));
        controller.submit();
        second.send(Err(error)).unwrap();
        assert!(matches!(controller.wait_next(WAIT), Some(Effect::Failed(_))));

        assert_eq!(controller.session().error(), Some(expected));
        assert!(controller.session().result().is_none());
        assert_eq!(controller.session().active_tab(), ViewTab::Analytics);
    }
}

#[test]
fn cancel_abandons_outstanding_submission() {
    let solver = GatedSolver::new();
    let release = solver.gate(5);
    let mut controller = RequestController::new(solver, SettlePolicy::default());

    controller.edit_draft(draft(5));
    let generation = match controller.submit() {
        Effect::Dispatch { generation, .. } => generation,
        other => panic!("unexpected {other:?}"),
    };
    assert_eq!(controller.cancel(), Effect::Cancelled(vec![generation]));
    assert!(!controller.session().is_submitting());

    release.send(Ok(payload(10))).unwrap();
    assert_eq!(
        controller.wait_next(WAIT),
        Some(Effect::Discarded(generation))
    );
    assert!(controller.session().result().is_none());
}

#[test]
fn run_to_completion_returns_stored_result() {
    let solver = FixedSolver::new(Ok(payload(50)));
    let mut controller = RequestController::new(solver, SettlePolicy::default());
    controller.edit_draft(draft(2));

    let result = controller.run_to_completion().unwrap();
    assert_eq!(result.grid_size, 50);
}

#[test]
fn run_to_completion_reports_failure_message() {
    let solver = FixedSolver::new(Err(SubmitError::Rejected {
        status: 503,
        body: "busy".to_string(),
    }));
    let mut controller = RequestController::new(solver, SettlePolicy::default());

    let err = controller.run_to_completion().unwrap_err();
    assert_eq!(err.to_string(), "busy");
}

#[test]
fn notifier_runs_after_each_settlement() {
    let solver = FixedSolver::new(Ok(payload(10)));
    let woken = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&woken);
    let mut controller = RequestController::new(solver, SettlePolicy::default())
        .with_notifier(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    controller.run_to_completion().unwrap();
    // The notifier fires after the send, so give the worker a moment.
    for _ in 0..100 {
        if woken.load(Ordering::SeqCst) == 1 {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(woken.load(Ordering::SeqCst), 1);
}
