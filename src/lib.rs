#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Layered "AI artifact" warp effect: drives SVG displacement filters and
//! layer opacity from per-layer envelopes, fires random glitch bursts on one
//! layer and lets the noise generators drift.
//!
//! Everything except the `wasm` module is target independent so the
//! animation math and scheduling can be exercised on the host.

pub mod clock;
pub mod config;
pub mod controller;
pub mod envelope;
pub mod error;
pub mod glitch;
pub mod layers;
pub mod noise;
pub mod timeline;

pub use config::{GlitchConfig, LayerConfig, NoiseConfig, WarpConfig};
pub use controller::AnimationController;
pub use error::{WarpError, WarpResult};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use wasm_bindgen::prelude::*;

    use crate::{AnimationController, WarpConfig, WarpError};

    pub mod dom;
    mod logger;
    mod render;

    /// Id of an optional `<script type="application/json">` holding a config override.
    const CONFIG_ELEMENT_ID: &str = "artifact-warp-config";

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        logger::init();
        let window = web_sys::window().ok_or_else(|| WarpError::dom("no window"))?;
        let document = window.document().ok_or_else(|| WarpError::dom("no document"))?;

        let config = match document.get_element_by_id(CONFIG_ELEMENT_ID) {
            Some(el) => WarpConfig::from_json(&el.text_content().unwrap_or_default())?,
            None => WarpConfig::default(),
        };
        launch(&document, config)
    }

    /// Starts an additional, independent instance with a JSON config.
    #[wasm_bindgen(js_name = startWithConfig)]
    pub fn start_with_config(json: &str) -> Result<(), JsValue> {
        logger::init();
        let config = WarpConfig::from_json(json)?;
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| WarpError::dom("no document"))?;
        launch(&document, config)
    }

    fn launch(document: &web_sys::Document, config: WarpConfig) -> Result<(), JsValue> {
        let host = dom::DomHost::new(document.clone());
        let noise_targets = host.noise_targets(&config.noise.id_prefix);
        let rng = SmallRng::seed_from_u64(seed());
        let controller = AnimationController::new(&config, &host, noise_targets, rng);
        render::start(Rc::new(RefCell::new(controller)), config.glitch.initial_delay)
    }

    fn seed() -> u64 {
        let hi = (js_sys::Math::random() * 4_294_967_296.0) as u64;
        let lo = (js_sys::Math::random() * 4_294_967_296.0) as u64;
        (hi << 32) | lo
    }
}

// When compiling for non-wasm targets (e.g., `cargo test` on host),
// provide an empty stub so the crate still builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
