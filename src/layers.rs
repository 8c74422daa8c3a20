//! Layer registry: pairs each `LayerConfig` with the two external targets it
//! drives. Resolution happens once; layers whose targets are missing are
//! dropped for good.

use crate::config::LayerConfig;
use crate::envelope::LayerOutput;

/// Write side of a displacement filter's `scale` attribute.
pub trait DisplacementSink {
    fn set_scale(&self, scale: f64);
}

/// Write side of a layer element's opacity.
pub trait OpacitySink {
    fn set_opacity(&self, opacity: f64);
}

/// Whatever owns the visual elements (the DOM in the browser, fakes in tests).
pub trait LayerHost {
    type Displacement: DisplacementSink;
    type Opacity: OpacitySink;

    /// Displacement element inside the filter with id `filter_id`.
    fn displacement(&self, filter_id: &str) -> Option<Self::Displacement>;

    /// Layer element with id `layer_id`.
    fn layer(&self, layer_id: &str) -> Option<Self::Opacity>;
}

pub struct ResolvedLayer<D, O> {
    pub config: LayerConfig,
    pub displacement: D,
    pub layer: O,
}

impl<D: DisplacementSink, O: OpacitySink> ResolvedLayer<D, O> {
    pub fn apply(&self, output: LayerOutput) {
        self.displacement.set_scale(output.scale);
        self.layer.set_opacity(output.opacity);
    }
}

/// Resolved layers in registration order.
pub struct LayerRegistry<D, O> {
    layers: Vec<ResolvedLayer<D, O>>,
}

impl<D: DisplacementSink, O: OpacitySink> LayerRegistry<D, O> {
    /// Looks up both targets of every config. A layer is kept only when both
    /// resolve; nothing is written during resolution. Entries are keyed by
    /// layer id: a repeated id replaces the earlier entry in its slot.
    pub fn resolve<H>(configs: &[LayerConfig], host: &H) -> Self
    where
        H: LayerHost<Displacement = D, Opacity = O>,
    {
        let resolved = configs
            .iter()
            .filter_map(|config| {
                match (host.displacement(&config.filter_id), host.layer(&config.id)) {
                    (Some(displacement), Some(layer)) => Some(ResolvedLayer {
                        config: config.clone(),
                        displacement,
                        layer,
                    }),
                    _ => {
                        log::debug!(
                            "skipping layer `{}`: targets `#{}` / `#{}` not found",
                            config.id,
                            config.filter_id,
                            config.id
                        );
                        None
                    }
                }
            });

        let mut layers: Vec<ResolvedLayer<D, O>> = Vec::new();
        for layer in resolved {
            match layers.iter_mut().find(|l| l.config.id == layer.config.id) {
                Some(slot) => *slot = layer,
                None => layers.push(layer),
            }
        }
        Self { layers }
    }

    pub fn get(&self, id: &str) -> Option<&ResolvedLayer<D, O>> {
        self.layers.iter().find(|layer| layer.config.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedLayer<D, O>> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// One envelope pass: every layer, in registration order.
    pub fn apply_envelope(&self, elapsed: f64) {
        for layer in &self.layers {
            layer.apply(layer.config.sample(elapsed));
        }
    }
}
