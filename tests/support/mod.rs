#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use artifact_warp::glitch::RandomSource;
use artifact_warp::layers::{DisplacementSink, LayerHost, OpacitySink};
use artifact_warp::noise::NoiseTarget;
use artifact_warp::LayerConfig;

#[derive(Clone, Debug, PartialEq)]
pub enum Write {
    Scale(String, f64),
    Opacity(String, f64),
}

impl Write {
    pub fn target(&self) -> &str {
        match self {
            Write::Scale(id, _) | Write::Opacity(id, _) => id,
        }
    }
}

type Journal = Rc<RefCell<Vec<Write>>>;

pub struct FakeScale {
    id: String,
    journal: Journal,
}

impl DisplacementSink for FakeScale {
    fn set_scale(&self, scale: f64) {
        self.journal.borrow_mut().push(Write::Scale(self.id.clone(), scale));
    }
}

pub struct FakeStyle {
    id: String,
    journal: Journal,
}

impl OpacitySink for FakeStyle {
    fn set_opacity(&self, opacity: f64) {
        self.journal
            .borrow_mut()
            .push(Write::Opacity(self.id.clone(), opacity));
    }
}

/// In-memory stand-in for the page: every id it knows resolves, and every
/// write lands in one shared journal in call order.
#[derive(Default)]
pub struct FakeDocument {
    ids: HashSet<String>,
    journal: Journal,
}

impl FakeDocument {
    pub fn with_layers(layers: &[LayerConfig]) -> Self {
        let mut doc = Self::default();
        for layer in layers {
            doc.ids.insert(layer.id.clone());
            doc.ids.insert(layer.filter_id.clone());
        }
        doc
    }

    pub fn remove(mut self, id: &str) -> Self {
        self.ids.remove(id);
        self
    }

    pub fn writes(&self) -> Vec<Write> {
        self.journal.borrow().clone()
    }

    pub fn clear(&self) {
        self.journal.borrow_mut().clear();
    }

    pub fn writes_to(&self, id: &str) -> Vec<Write> {
        self.writes().into_iter().filter(|w| w.target() == id).collect()
    }

    pub fn last_scale(&self, filter_id: &str) -> Option<f64> {
        self.writes().into_iter().rev().find_map(|w| match w {
            Write::Scale(id, v) if id == filter_id => Some(v),
            _ => None,
        })
    }

    pub fn last_opacity(&self, layer_id: &str) -> Option<f64> {
        self.writes().into_iter().rev().find_map(|w| match w {
            Write::Opacity(id, v) if id == layer_id => Some(v),
            _ => None,
        })
    }
}

impl LayerHost for FakeDocument {
    type Displacement = FakeScale;
    type Opacity = FakeStyle;

    fn displacement(&self, filter_id: &str) -> Option<FakeScale> {
        self.ids.contains(filter_id).then(|| FakeScale {
            id: filter_id.to_owned(),
            journal: self.journal.clone(),
        })
    }

    fn layer(&self, layer_id: &str) -> Option<FakeStyle> {
        self.ids.contains(layer_id).then(|| FakeStyle {
            id: layer_id.to_owned(),
            journal: self.journal.clone(),
        })
    }
}

/// Noise element with a shared, inspectable base frequency.
#[derive(Clone)]
pub struct FakeNoise {
    value: Rc<Cell<Option<f64>>>,
    writes: Rc<Cell<usize>>,
}

impl FakeNoise {
    pub fn new(value: f64) -> Self {
        Self {
            value: Rc::new(Cell::new(Some(value))),
            writes: Rc::new(Cell::new(0)),
        }
    }

    /// Attribute holding something that does not parse as a number.
    pub fn garbage() -> Self {
        Self {
            value: Rc::new(Cell::new(None)),
            writes: Rc::new(Cell::new(0)),
        }
    }

    pub fn value(&self) -> Option<f64> {
        self.value.get()
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl NoiseTarget for FakeNoise {
    fn base_frequency(&self) -> Option<f64> {
        self.value.get()
    }

    fn set_base_frequency(&self, value: f64) {
        self.value.set(Some(value));
        self.writes.set(self.writes.get() + 1);
    }
}

/// Replays fixed unit samples, then zeros.
pub struct Scripted(Vec<f64>);

impl Scripted {
    pub fn new(samples: &[f64]) -> Self {
        Self(samples.iter().rev().copied().collect())
    }
}

impl RandomSource for Scripted {
    fn next_unit(&mut self) -> f64 {
        self.0.pop().unwrap_or(0.0)
    }
}
