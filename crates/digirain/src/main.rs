use color_eyre::Result;
use digirain_core::RainSettings;
use digirain_rain::RainAnimator;
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::backend::Backend;

mod events;
mod render;

use events::{EventSource, RainEvent};
use render::RenderContext;

fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = digirain_config::load()?;

    let mut context = RenderContext::init(&settings)?;
    let result = run(settings, &mut context);
    context.restore();
    result
}

fn run<B, E>(mut settings: RainSettings, context: &mut RenderContext<B, E>) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    E: EventSource,
{
    if settings.fit_to_terminal {
        let size = context.size()?;
        settings = settings.fitted_to(size.width, size.height);
        context.set_surface(&settings);
    }
    App::new(&settings, StdRng::from_os_rng()).run(context)?;
    Ok(())
}

/// The screensaver: rain state plus whether it should keep going.
#[derive(Debug)]
pub struct App<R> {
    /// Is the rain still falling?
    running: bool,
    animator: RainAnimator<R>,
}

impl<R: Rng> App<R> {
    /// Construct a new instance of [`App`].
    pub fn new(settings: &RainSettings, rng: R) -> Self {
        Self::with_animator(RainAnimator::new(settings, rng))
    }

    pub fn with_animator(animator: RainAnimator<R>) -> Self {
        Self {
            running: false,
            animator,
        }
    }

    /// Run the main loop until a key press or quit request.
    ///
    /// Returns the number of frames drawn.
    pub fn run<B, E>(&mut self, context: &mut RenderContext<B, E>) -> Result<u64>
    where
        B: Backend,
        B::Error: Send + Sync + 'static,
        E: EventSource,
    {
        let mut frames = 0;
        self.running = true;
        while self.running {
            self.handle_events(context.poll_events()?);
            if !self.running {
                break;
            }
            context.present(|canvas| self.animator.advance_and_render(canvas))?;
            frames += 1;
            context.tick();
        }
        Ok(frames)
    }

    /// Stop on the first event that ends the screensaver.
    fn handle_events(&mut self, events: Vec<RainEvent>) {
        if events.into_iter().any(RainEvent::stops_rain) {
            self.quit();
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }

    #[cfg(test)]
    pub fn animator(&self) -> &RainAnimator<R> {
        &self.animator
    }
}
