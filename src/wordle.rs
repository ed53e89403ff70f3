use crate::answers::WordCount;
use crate::config::Config;
use crate::layout::Canvas;
use crate::render::Renderer;
use crate::sizing::SizingStrategy;
use tokio::task::AbortHandle;
use tracing::info;

/// The two timers that keep a wordle refreshing: the repeating poll and the one-shot
/// deadline that stops it. Dropping the timers cancels whatever is still armed.
#[derive(Debug, Default)]
pub struct PollTimers {
    poll: Option<AbortHandle>,
    deadline: Option<AbortHandle>,
}

impl PollTimers {
    pub fn arm(&mut self, poll: AbortHandle, deadline: AbortHandle) {
        self.cancel_all();
        self.poll = Some(poll);
        self.deadline = Some(deadline);
    }

    pub fn is_polling(&self) -> bool {
        self.poll.is_some()
    }

    pub fn has_deadline(&self) -> bool {
        self.deadline.is_some()
    }

    /// Stops future poll ticks. Returns `false` if the poll timer was already cleared.
    pub fn cancel_poll(&mut self) -> bool {
        match self.poll.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Forgets the deadline once it has fired, or aborts it on teardown.
    pub fn clear_deadline(&mut self) -> bool {
        match self.deadline.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&mut self) {
        self.cancel_poll();
        self.clear_deadline();
    }
}

impl Drop for PollTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Everything one rendered wordle owns.
///
/// Created once per view with `scale = 1.0`, the inverted strategy and no answers; the
/// refresh scheduler and the layout pipeline mutate it in place.
pub struct WordleState<R> {
    pub surface: R,
    pub canvas: Canvas,
    pub answer_counts: Vec<WordCount>,
    pub conventional: bool,
    pub scale: f64,
    pub timers: PollTimers,
}

impl<R: Renderer> WordleState<R> {
    pub fn new(surface: R, canvas: Canvas) -> Self {
        Self {
            surface,
            canvas,
            answer_counts: Vec::new(),
            conventional: false,
            scale: 1.0,
            timers: PollTimers::default(),
        }
    }

    /// Starts from the configured canvas, strategy and scale instead of the defaults.
    pub fn from_config(surface: R, config: &Config) -> Self {
        Self {
            conventional: config.fit.conventional,
            scale: config.fit.initial_scale,
            ..Self::new(surface, Canvas::from(&config.canvas))
        }
    }

    pub fn strategy(&self) -> SizingStrategy {
        SizingStrategy::from_conventional(self.conventional)
    }

    /// Flips between inverted and conventional sizing and starts again from full size.
    pub fn toggle_strategy(&mut self) {
        self.conventional = !self.conventional;
        self.scale = 1.0;
        info!("Switched to {} sizing", self.strategy());
    }

    /// Tears down both timers, as when the page hosting the wordle goes away.
    pub fn teardown(&mut self) {
        self.timers.cancel_all();
    }
}
