use std::process::ExitCode;

use polyrast::prelude::*;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn run(config: &Config) -> Result<(), EngineError> {
    let mut window = Window::new(&config.title, config.width, config.height)?;
    let mut engine = Engine::new(config)?;
    let mut limiter = FrameLimiter::new(config.frame_duration());

    info!(model = %config.model_path.display(), "starting");

    while engine.is_running() {
        for event in window.poll_events() {
            if let Event::Resize { width, height } = event {
                window.resize(width, height)?;
            }
            engine.handle_event(&event);
        }
        window.set_relative_mouse_mode(engine.mouse_look());

        engine.update();
        engine.render();

        if engine.take_screenshot_request() {
            if let Err(e) = engine.save_screenshot(&config.screenshot_dir) {
                warn!(error = %e, "screenshot failed");
            }
        }

        window.present(engine.frame_buffer().as_bytes())?;
        limiter.wait();
    }

    info!("shutting down");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_args(std::env::args().skip(1));
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fatal");
            ExitCode::FAILURE
        }
    }
}
