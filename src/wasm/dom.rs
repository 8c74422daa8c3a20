//! DOM side of the sinks.

use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, SvgElement};

use crate::layers::{DisplacementSink, LayerHost, OpacitySink};
use crate::noise::NoiseTarget;

/// `feDisplacementMap` element; drives its `scale` attribute.
pub struct FilterScale(Element);

impl DisplacementSink for FilterScale {
    fn set_scale(&self, scale: f64) {
        let _ = self.0.set_attribute("scale", &scale.to_string());
    }
}

/// Layer element; HTML or SVG, both expose an inline style.
pub struct LayerStyle(CssStyleDeclaration);

impl OpacitySink for LayerStyle {
    fn set_opacity(&self, opacity: f64) {
        let _ = self.0.set_property("opacity", &opacity.to_string());
    }
}

/// `feTurbulence` (or anything else with a `baseFrequency`).
pub struct Turbulence(Element);

impl NoiseTarget for Turbulence {
    fn base_frequency(&self) -> Option<f64> {
        // "0.01 0.02" is valid SVG; only the first number is modulated.
        self.0
            .get_attribute("baseFrequency")?
            .split_whitespace()
            .next()?
            .parse()
            .ok()
    }

    fn set_base_frequency(&self, value: f64) {
        let _ = self.0.set_attribute("baseFrequency", &value.to_string());
    }
}

pub struct DomHost {
    document: Document,
}

impl DomHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Every element whose id starts with `prefix`, in document order.
    pub fn noise_targets(&self, prefix: &str) -> Vec<Turbulence> {
        let Ok(list) = self.document.query_selector_all(&format!("[id^=\"{prefix}\"]")) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(Turbulence)
            .collect()
    }
}

impl LayerHost for DomHost {
    type Displacement = FilterScale;
    type Opacity = LayerStyle;

    fn displacement(&self, filter_id: &str) -> Option<FilterScale> {
        self.document
            .query_selector(&format!("#{filter_id} feDisplacementMap"))
            .ok()
            .flatten()
            .map(FilterScale)
    }

    fn layer(&self, layer_id: &str) -> Option<LayerStyle> {
        let el = self.document.get_element_by_id(layer_id)?;
        let style = match el.dyn_into::<HtmlElement>() {
            Ok(html) => html.style(),
            Err(el) => el.dyn_into::<SvgElement>().ok()?.style(),
        };
        Some(LayerStyle(style))
    }
}
