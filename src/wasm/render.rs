use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::window;

use super::dom::{FilterScale, LayerStyle, Turbulence};
use crate::controller::AnimationController;

pub type DomController = AnimationController<FilterScale, LayerStyle, Turbulence, SmallRng>;

type Shared = Rc<RefCell<DomController>>;

/// Start the envelope and noise frame loops and arm the first glitch decision.
pub fn start(controller: Shared, initial_delay: f64) -> Result<(), JsValue> {
    frame_loop(controller.clone(), |c, timestamp| c.envelope_frame(timestamp))?;

    // The noise loop ticks once synchronously before its first frame.
    controller.borrow_mut().noise_frame();
    frame_loop(controller.clone(), |c, _| c.noise_frame())?;

    glitch_decision(controller, initial_delay)
}

/// Runs `step` on every animation frame, forever.
fn frame_loop<F>(controller: Shared, mut step: F) -> Result<(), JsValue>
where
    F: FnMut(&mut DomController, f64) + 'static,
{
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        step(&mut controller.borrow_mut(), timestamp);

        // schedule next
        if let Some(cb) = f.borrow().as_ref() {
            if let Err(err) = request_frame(cb) {
                log::error!("requestAnimationFrame failed: {err:?}");
            }
        }
    }) as Box<dyn FnMut(f64)>));

    match g.borrow().as_ref() {
        Some(cb) => request_frame(cb),
        None => Ok(()),
    }
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) -> Result<(), JsValue> {
    window()
        .ok_or("no window")?
        .request_animation_frame(cb.as_ref().unchecked_ref())?;
    Ok(())
}

fn glitch_decision(controller: Shared, delay: f64) -> Result<(), JsValue> {
    set_timeout(delay, move || {
        let step = controller.borrow_mut().glitch_decide();
        if let Some(restore_in) = step.restore_in {
            let c = controller.clone();
            if let Err(err) = set_timeout(restore_in, move || c.borrow_mut().glitch_restore()) {
                log::error!("failed to arm glitch restore: {err:?}");
            }
        }
        if let Err(err) = glitch_decision(controller, step.next_decision_in) {
            log::error!("failed to re-arm glitch: {err:?}");
        }
    })
}

/// One-shot timer; the closure frees itself after it runs.
fn set_timeout(delay: f64, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let callback = Closure::once_into_js(f);
    window()
        .ok_or("no window")?
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay.round() as i32,
        )?;
    Ok(())
}
