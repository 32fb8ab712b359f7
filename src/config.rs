use crate::core::Dimension;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Per-dimension resonance weights used when cross-checking dimension
/// interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DimensionWeights {
    #[serde(default = "default_lexical_weight")]
    pub lexical: f64,
    #[serde(default = "default_thematic_weight")]
    pub thematic: f64,
    #[serde(default = "default_structural_weight")]
    pub structural: f64,
    #[serde(default = "default_christological_weight")]
    pub christological: f64,
    #[serde(default = "default_cross_reference_weight")]
    pub cross_reference: f64,
    #[serde(default = "default_literary_weight")]
    pub literary: f64,
    #[serde(default = "default_ethical_weight")]
    pub ethical: f64,
    #[serde(default = "default_temporal_weight")]
    pub temporal: f64,
    #[serde(default = "default_eschatological_weight")]
    pub eschatological: f64,
    #[serde(default = "default_historical_weight")]
    pub historical: f64,
}

fn default_lexical_weight() -> f64 {
    1.0
}
fn default_thematic_weight() -> f64 {
    1.2
}
fn default_structural_weight() -> f64 {
    0.8
}
fn default_christological_weight() -> f64 {
    1.5
}
fn default_cross_reference_weight() -> f64 {
    1.3
}
fn default_literary_weight() -> f64 {
    1.1
}
fn default_ethical_weight() -> f64 {
    1.4
}
fn default_temporal_weight() -> f64 {
    1.0
}
fn default_eschatological_weight() -> f64 {
    1.3
}
fn default_historical_weight() -> f64 {
    1.1
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            lexical: default_lexical_weight(),
            thematic: default_thematic_weight(),
            structural: default_structural_weight(),
            christological: default_christological_weight(),
            cross_reference: default_cross_reference_weight(),
            literary: default_literary_weight(),
            ethical: default_ethical_weight(),
            temporal: default_temporal_weight(),
            eschatological: default_eschatological_weight(),
            historical: default_historical_weight(),
        }
    }
}

impl DimensionWeights {
    pub fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Lexical => self.lexical,
            Dimension::Thematic => self.thematic,
            Dimension::Structural => self.structural,
            Dimension::Christological => self.christological,
            Dimension::CrossReference => self.cross_reference,
            Dimension::Literary => self.literary,
            Dimension::Ethical => self.ethical,
            Dimension::Temporal => self.temporal,
            Dimension::Eschatological => self.eschatological,
            Dimension::Historical => self.historical,
        }
    }

    fn all(&self) -> [f64; 10] {
        [
            self.lexical,
            self.thematic,
            self.structural,
            self.christological,
            self.cross_reference,
            self.literary,
            self.ethical,
            self.temporal,
            self.eschatological,
            self.historical,
        ]
    }

    /// Every weight must be positive; zero weights would silently drop a
    /// dimension from the resonance score.
    pub fn validate(&self) -> Result<(), String> {
        for (dimension, weight) in Dimension::ALL.iter().zip(self.all()) {
            if weight <= 0.0 || !weight.is_finite() {
                return Err(format!(
                    "{dimension} weight must be positive and finite, got {weight}"
                ));
            }
        }
        Ok(())
    }
}

/// Density cut-offs used by the intensity-labelling analyzers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntensityThresholds {
    #[serde(default = "default_christological_high")]
    pub christological_high: f64,
    #[serde(default = "default_christological_medium")]
    pub christological_medium: f64,
    #[serde(default = "default_eschatological_high")]
    pub eschatological_high: f64,
    #[serde(default = "default_eschatological_medium")]
    pub eschatological_medium: f64,
    #[serde(default = "default_historical_strong")]
    pub historical_strong: f64,
    #[serde(default = "default_historical_rooted")]
    pub historical_rooted: f64,
    #[serde(default = "default_secondary_genre")]
    pub secondary_genre: f64,
}

fn default_christological_high() -> f64 {
    0.05
}
fn default_christological_medium() -> f64 {
    0.02
}
fn default_eschatological_high() -> f64 {
    0.03
}
fn default_eschatological_medium() -> f64 {
    0.01
}
fn default_historical_strong() -> f64 {
    0.05
}
fn default_historical_rooted() -> f64 {
    0.025
}
fn default_secondary_genre() -> f64 {
    0.3
}

impl Default for IntensityThresholds {
    fn default() -> Self {
        Self {
            christological_high: default_christological_high(),
            christological_medium: default_christological_medium(),
            eschatological_high: default_eschatological_high(),
            eschatological_medium: default_eschatological_medium(),
            historical_strong: default_historical_strong(),
            historical_rooted: default_historical_rooted(),
            secondary_genre: default_secondary_genre(),
        }
    }
}

/// Batch processing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Worker threads; 0 means one per available core.
    #[serde(default)]
    pub jobs: usize,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_parallel() -> bool {
    true
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobs: 0,
            parallel: default_parallel(),
        }
    }
}

impl BatchConfig {
    pub fn worker_count(&self) -> usize {
        if self.jobs == 0 {
            num_cpus::get()
        } else {
            self.jobs
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersemapConfig {
    #[serde(default)]
    pub weights: DimensionWeights,
    #[serde(default)]
    pub thresholds: IntensityThresholds,
    #[serde(default)]
    pub batch: BatchConfig,
}

impl VersemapConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VersemapConfig = toml::from_str(&content)?;
        config
            .weights
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;
        Ok(config)
    }
}

static CONFIG: OnceLock<VersemapConfig> = OnceLock::new();

/// Install a loaded configuration as the process-wide one. Later calls are
/// ignored once a configuration is set.
pub fn init(config: VersemapConfig) {
    let _ = CONFIG.set(config);
}

/// The process-wide configuration, defaulting when none was installed.
pub fn get() -> &'static VersemapConfig {
    CONFIG.get_or_init(VersemapConfig::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_are_valid() {
        assert!(DimensionWeights::default().validate().is_ok());
    }

    #[test]
    fn zero_weight_is_rejected() {
        let mut weights = DimensionWeights::default();
        weights.thematic = 0.0;
        assert!(weights.validate().is_err());
    }

    #[test]
    fn config_parses_partial_toml() {
        let config: VersemapConfig =
            toml::from_str("[thresholds]\nchristological_high = 0.1\n").expect("parse");
        assert_eq!(config.thresholds.christological_high, 0.1);
        // Unspecified sections keep their defaults
        assert_eq!(config.weights.christological, 1.5);
        assert!(config.batch.parallel);
    }
}
