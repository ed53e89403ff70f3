use crate::config::Config;
use crate::error::{WordleError, WordleResult};
use crate::layout::{FitController, FitOutcome, FitPolicy, LayoutEngine, Packer, SpiralPacker};
use crate::render::Renderer;
use crate::wordle::WordleState;
use tracing::{info, warn};

/// Size, place, retry, then draw: one full run from a frequency table to the surface.
pub struct Pipeline<P> {
    engine: LayoutEngine<P>,
    controller: FitController,
}

impl Pipeline<SpiralPacker> {
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            LayoutEngine::from_params(SpiralPacker::new(config.fit.seed), &config.canvas),
            FitController::new(FitPolicy::from(&config.fit)),
        )
    }
}

impl<P: Packer> Pipeline<P> {
    pub fn new(engine: LayoutEngine<P>, controller: FitController) -> Self {
        Self { engine, controller }
    }

    pub fn engine_mut(&mut self) -> &mut LayoutEngine<P> {
        &mut self.engine
    }

    /// Lays out the state's current answers, shrinking `state.scale` as needed.
    pub fn layout_with_retry<R: Renderer>(
        &mut self,
        state: &mut WordleState<R>,
    ) -> WordleResult<FitOutcome> {
        let strategy = state.strategy();
        self.controller.layout(
            &mut self.engine,
            state.canvas,
            &state.answer_counts,
            strategy,
            &mut state.scale,
        )
    }

    /// Lays out and draws. With no answers the previous drawing is left untouched and
    /// `None` is returned.
    pub fn render<R: Renderer>(
        &mut self,
        state: &mut WordleState<R>,
    ) -> WordleResult<Option<FitOutcome>> {
        let outcome = match self.layout_with_retry(state) {
            Ok(outcome) => outcome,
            Err(WordleError::EmptyInput) => {
                info!("No answers yet, keeping the current wordle");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        if !outcome.is_complete() {
            warn!(
                "Gave up after {} attempts: showing {} of {} words at scale {:.4}",
                outcome.attempts,
                outcome.placed.len(),
                outcome.requested,
                outcome.scale_used
            );
        }

        state
            .surface
            .draw(state.canvas, &outcome.placed, self.engine.font())?;
        Ok(Some(outcome))
    }
}
