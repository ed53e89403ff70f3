use crate::answers::{self, AnswerFile};
use crate::client::AnswerSource;
use crate::config::PollParams;
use crate::error::WordleResult;
use crate::layout::Packer;
use crate::pipeline::Pipeline;
use crate::render::Renderer;
use crate::wordle::WordleState;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{error, info, warn};

/// What the user (or the hosting page) can ask of a running wordle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleStrategy,
    Shutdown,
}

/// The poll timer waits for its acknowledgement (the sender being dropped) before it
/// ticks again, so at most one tick is ever outstanding.
#[derive(Debug)]
enum TimerEvent {
    Poll(oneshot::Sender<()>),
    Deadline,
}

/// Receiving end of the poll and deadline timers armed by
/// [`RefreshScheduler::initialize`].
#[derive(Debug)]
pub struct TimerFeed {
    rx: mpsc::UnboundedReceiver<TimerEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollTiming {
    pub interval: Duration,
    pub deadline: Duration,
}

impl Default for PollTiming {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            deadline: Duration::from_secs(10 * 60),
        }
    }
}

impl From<&PollParams> for PollTiming {
    fn from(params: &PollParams) -> Self {
        Self {
            interval: params.poll_interval(),
            deadline: params.poll_deadline(),
        }
    }
}

fn relayout<P: Packer, R: Renderer>(
    pipeline: &mut Pipeline<P>,
    layouts: &mut usize,
    state: &mut WordleState<R>,
) {
    *layouts += 1;
    if let Err(e) = pipeline.render(state) {
        error!("Failed to render wordle: {}", e);
    }
}

/// Keeps one wordle up to date with its answer source.
///
/// The scheduler's event loop is the only owner of the [`WordleState`] while it runs.
/// Fetches are the only suspension point: while one is in flight the loop still answers
/// commands and the deadline, and once the payload is in hand the compare against the
/// previous total and the re-layout run to completion without yielding. Poll ticks never
/// pile up behind a slow fetch; the first tick after it is taken straight away and the
/// regular period resumes from there.
pub struct RefreshScheduler<S, P> {
    source: S,
    pipeline: Pipeline<P>,
    timing: PollTiming,
    fetches: usize,
    layouts: usize,
}

impl<S: AnswerSource, P: Packer> RefreshScheduler<S, P> {
    pub fn new(source: S, pipeline: Pipeline<P>, timing: PollTiming) -> Self {
        Self {
            source,
            pipeline,
            timing,
            fetches: 0,
            layouts: 0,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetches issued so far, successful or not, including abandoned ones.
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    /// Layout runs so far, from fetches and toggles.
    pub fn layouts(&self) -> usize {
        self.layouts
    }

    /// Applies a fetched payload. Re-lays out only when the total number of answers
    /// changed; returns whether it did.
    pub fn on_fetch<R: Renderer>(&mut self, state: &mut WordleState<R>, payload: &AnswerFile) -> bool {
        let counts = answers::aggregate(payload.records());
        let new_total = answers::total(&counts);
        if new_total == answers::total(&state.answer_counts) {
            info!("No change in answer count");
            return false;
        }

        info!("Updated total answer count to {}", new_total);
        state.answer_counts = counts;
        relayout(&mut self.pipeline, &mut self.layouts, state);
        true
    }

    pub fn on_toggle_strategy<R: Renderer>(&mut self, state: &mut WordleState<R>) {
        state.toggle_strategy();
        relayout(&mut self.pipeline, &mut self.layouts, state);
    }

    fn on_fetch_result<R: Renderer>(
        &mut self,
        state: &mut WordleState<R>,
        result: WordleResult<AnswerFile>,
    ) {
        match result {
            Ok(payload) => {
                self.on_fetch(state, &payload);
            }
            Err(e) => warn!("Error fetching {}: {}", self.source.describe(), e),
        }
    }

    fn on_deadline<R: Renderer>(&self, state: &mut WordleState<R>) {
        state.timers.clear_deadline();
        if state.timers.cancel_poll() {
            info!("Stopped polling after {:?}", self.timing.deadline);
        }
    }

    /// One fetch-and-render cycle. Fetch failures are logged and otherwise ignored; the
    /// next tick simply tries again.
    pub async fn cycle<R: Renderer>(&mut self, state: &mut WordleState<R>) {
        self.fetches += 1;
        let result = self.source.fetch().await;
        self.on_fetch_result(state, result);
    }

    /// Like [`cycle`](Self::cycle), but commands and the deadline are served while the
    /// fetch is in flight. A toggle is applied at once; `Shutdown` or the deadline drop
    /// the pending fetch. Returns `false` when the wordle should shut down.
    async fn cycle_interruptible<R: Renderer>(
        &mut self,
        state: &mut WordleState<R>,
        timers: &mut mpsc::UnboundedReceiver<TimerEvent>,
        commands: &mut mpsc::Receiver<Command>,
    ) -> bool {
        self.fetches += 1;
        let result = {
            let fetch = self.source.fetch();
            tokio::pin!(fetch);
            let mut timers_live = true;

            loop {
                tokio::select! {
                    biased;
                    result = &mut fetch => break result,
                    event = timers.recv(), if timers_live => match event {
                        Some(TimerEvent::Deadline) => {
                            warn!("Dropping fetch from {} at the deadline", self.source.describe());
                            self.on_deadline(state);
                            return true;
                        }
                        Some(TimerEvent::Poll(_)) => {}
                        None => timers_live = false,
                    },
                    cmd = commands.recv() => match cmd {
                        Some(Command::ToggleStrategy) => {
                            state.toggle_strategy();
                            relayout(&mut self.pipeline, &mut self.layouts, state);
                        }
                        Some(Command::Shutdown) | None => return false,
                    },
                }
            }
        };

        self.on_fetch_result(state, result);
        true
    }

    fn arm_timers<R: Renderer>(&self, state: &mut WordleState<R>) -> TimerFeed {
        let (tx, rx) = mpsc::unbounded_channel();
        let period = self.timing.interval;
        let deadline = self.timing.deadline;

        let poll_tx = tx.clone();
        let poll = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let (ack_tx, ack_rx) = oneshot::channel();
                if poll_tx.send(TimerEvent::Poll(ack_tx)).is_err() {
                    break;
                }
                // Resolves once the tick has been handled or discarded.
                let _ = ack_rx.await;
            }
        });

        let cancel = tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            let _ = tx.send(TimerEvent::Deadline);
        });

        state.timers.arm(poll.abort_handle(), cancel.abort_handle());
        TimerFeed { rx }
    }

    fn announce(&self) {
        info!(
            "Watching {} every {:?} for up to {:?}",
            self.source.describe(),
            self.timing.interval,
            self.timing.deadline
        );
    }

    /// Does the first fetch-and-render right away, then arms the repeating poll timer and
    /// the deadline that stops it. Both handles are stored on `state`.
    pub async fn initialize<R: Renderer>(&mut self, state: &mut WordleState<R>) -> TimerFeed {
        self.announce();
        self.cycle(state).await;
        self.arm_timers(state)
    }

    /// Fetches right away, then serves timer ticks and commands until `Shutdown` or until
    /// every command sender is gone. Both timers are torn down before returning.
    pub async fn run<R: Renderer>(
        &mut self,
        state: &mut WordleState<R>,
        mut commands: mpsc::Receiver<Command>,
    ) {
        self.announce();
        // Armed before the first fetch so a hanging source cannot hold off the deadline.
        let TimerFeed { rx: mut timers } = self.arm_timers(state);
        let mut running = self
            .cycle_interruptible(state, &mut timers, &mut commands)
            .await;
        let mut timers_live = true;

        while running {
            tokio::select! {
                event = timers.recv(), if timers_live => match event {
                    Some(TimerEvent::Poll(_ack)) if state.timers.is_polling() => {
                        running = self
                            .cycle_interruptible(state, &mut timers, &mut commands)
                            .await;
                    }
                    // Ticks queued before the deadline fired are dropped here.
                    Some(TimerEvent::Poll(_)) => {}
                    Some(TimerEvent::Deadline) => self.on_deadline(state),
                    None => timers_live = false,
                },
                cmd = commands.recv() => match cmd {
                    Some(Command::ToggleStrategy) => self.on_toggle_strategy(state),
                    Some(Command::Shutdown) | None => running = false,
                },
            }
        }

        state.teardown();
        info!(
            "Wordle closed after {} fetches and {} layouts",
            self.fetches, self.layouts
        );
    }
}
