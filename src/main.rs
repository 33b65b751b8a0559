//! Celebration FX entry point
//!
//! On wasm32 this wires the simulation to the `#fx` canvas and exports
//! `start_celebration`, `set_quality` and `evade_position` to page script.
//! Natively it runs a headless celebration and logs particle counts.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_fx {
    use std::cell::RefCell;
    use std::rc::Rc;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;

    use celebration_fx::fx::{BurstTicket, FrameStatus, FxState, step};
    use celebration_fx::prompt;
    use celebration_fx::renderer::CanvasSurface;
    use celebration_fx::{FxError, Settings, Viewport};

    const CANVAS_ID: &str = "fx";

    /// Effect instance: simulation plus the canvas it draws to
    struct App {
        state: FxState,
        surface: CanvasSurface,
        /// Separate stream so button jumps don't perturb particle draws
        prompt_rng: Pcg32,
    }

    thread_local! {
        static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
    }

    /// Monotonic clock (ms), same origin as animation frame timestamps
    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    /// Current viewport in CSS pixels
    fn viewport() -> Viewport {
        let Some(window) = web_sys::window() else {
            return Viewport::new(0.0, 0.0);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        Viewport::new(w as f32, h as f32)
    }

    pub fn init() -> Result<(), FxError> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)?;

        log::info!("Celebration FX starting...");

        let window = web_sys::window().ok_or(FxError::NoWindow)?;
        let surface = CanvasSurface::from_element_id(CANVAS_ID)?;
        surface.fit(viewport(), window.device_pixel_ratio())?;

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let app = App {
            state: FxState::new(seed, settings),
            surface,
            prompt_rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
        };
        APP.with(|slot| *slot.borrow_mut() = Some(Rc::new(RefCell::new(app))));

        log::info!("Celebration FX ready (seed {})", seed);
        Ok(())
    }

    fn app() -> Option<Rc<RefCell<App>>> {
        let app = APP.with(|slot| slot.borrow().clone());
        if app.is_none() {
            log::warn!("Celebration FX used before it was initialized");
        }
        app
    }

    pub fn start(duration_ms: f64) {
        let Some(app) = app() else {
            return;
        };

        let outcome = {
            let mut a = app.borrow_mut();
            let duration = if duration_ms > 0.0 {
                duration_ms
            } else {
                a.state.settings.duration_ms
            };
            a.state.start(now(), duration, viewport())
        };

        if outcome.request_frame {
            request_animation_frame(app.clone());
        }
        if let Some(ticket) = outcome.burst {
            schedule_burst(app, ticket);
        }
    }

    /// Switch quality preset by name and persist it
    pub fn set_quality(name: &str) -> bool {
        let Some(app) = app() else {
            return false;
        };
        let mut a = app.borrow_mut();
        if a.state.settings.apply_quality(name).is_none() {
            return false;
        }
        a.state.settings.save();
        true
    }

    /// Next top-left corner for the evasive button
    pub fn evade_position(button_width: f64, button_height: f64) -> Vec2 {
        let Some(app) = app() else {
            return Vec2::ZERO;
        };
        let mut a = app.borrow_mut();
        let button = Vec2::new(button_width as f32, button_height as f32);
        prompt::evade_position(&mut a.prompt_rng, viewport(), button)
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        // Dropped by wasm-bindgen once the callback has run
        let callback = Closure::once_into_js(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(callback.unchecked_ref());
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        let status = {
            let mut a = app.borrow_mut();
            let App { state, surface, .. } = &mut *a;
            step(state, time, viewport(), surface)
        };

        if status == FrameStatus::Continue {
            request_animation_frame(app);
        }
    }

    fn schedule_burst(app: Rc<RefCell<App>>, ticket: BurstTicket) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = Closure::once_into_js(move || {
            let next = app.borrow_mut().state.fire_burst(ticket, now(), viewport());
            if let Some(next) = next {
                schedule_burst(app, next);
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            ticket.delay_ms as i32,
        );
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_fx::init() {
        // Logger may be the thing that failed
        web_sys::console::error_1(&format!("Celebration FX disabled: {e}").into());
    }
}

/// Start the celebration; a non-positive duration uses the configured default
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn start_celebration(duration_ms: f64) {
    wasm_fx::start(duration_ms);
}

/// Switch quality ("low", "medium", "high") and save it; false for an unknown name
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_quality(name: &str) -> bool {
    wasm_fx::set_quality(name)
}

/// Random `[left, top]` (CSS px) for the evasive button so it stays on screen
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn evade_position(button_width: f64, button_height: f64) -> Box<[f64]> {
    let p = wasm_fx::evade_position(button_width, button_height);
    Box::new([p.x as f64, p.y as f64])
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), celebration_fx::FxError> {
    env_logger::try_init()?;
    log::info!("Celebration FX (native) starting...");
    log::info!("Native mode is headless - build for wasm32 with `trunk serve` to see it");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);

    let mut settings = celebration_fx::Settings::load();
    if let Some(quality) = args.next() {
        if settings.apply_quality(&quality).is_some() {
            settings.save();
        }
    }

    run_headless(seed, settings);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Run one celebration at 60 fps against a recording surface
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seed: u64, settings: celebration_fx::Settings) {
    use celebration_fx::consts::FRAME_MS;
    use celebration_fx::fx::{FrameStatus, FxState, step};
    use celebration_fx::renderer::RecordingSurface;
    use celebration_fx::Viewport;
    use celebration_fx::prompt::evade_position;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    let viewport = Viewport::new(1280.0, 720.0);
    let duration = settings.duration_ms;
    let mut state = FxState::new(seed, settings);
    let mut surface = RecordingSurface::new();

    let mut ticket = state.start(0.0, duration, viewport).burst;
    let mut next_burst_at = ticket.map(|t| t.delay_ms);
    let mut now = 0.0;
    let mut frames = 0u32;
    let mut peak_sparks = 0;

    loop {
        now += FRAME_MS as f64;
        frames += 1;

        while let (Some(t), Some(at)) = (ticket, next_burst_at) {
            if at > now {
                break;
            }
            ticket = state.fire_burst(t, at, viewport);
            next_burst_at = ticket.map(|t| at + t.delay_ms);
        }

        surface.reset();
        let status = step(&mut state, now, viewport, &mut surface);
        peak_sparks = peak_sparks.max(state.sparks.len());

        if frames % 60 == 0 {
            log::info!(
                "t={:>5.0} ms  confetti={:>3}  sparks={:>4}  draws={}",
                now,
                state.confetti.len(),
                state.sparks.len(),
                surface.rect_count() + surface.circle_count()
            );
        }

        if status == FrameStatus::Idle {
            break;
        }
    }

    log::info!(
        "Celebration finished after {} frames ({:.0} ms), peak sparks {}",
        frames,
        now,
        peak_sparks
    );

    let mut prompt_rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
    let jump = evade_position(&mut prompt_rng, viewport, Vec2::new(120.0, 48.0));
    log::info!("Evasive button would jump to ({}, {})", jump.x, jump.y);
}
