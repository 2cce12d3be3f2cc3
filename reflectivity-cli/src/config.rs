//! TOML configuration deserialisation for reflectivity jobs.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::Deserialize;

use reflectivity::{Resolution, Slab, Tile, slab_for_material};

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub instrument: InstrumentConfig,
    pub sample: SampleConfig,
    pub q: WaveVectorSpec,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Beam and resolution parameters.
#[derive(Debug, Deserialize)]
pub struct InstrumentConfig {
    /// Wavelength in Å.
    pub wavelength: f64,
    #[serde(flatten)]
    pub resolution: Resolution,
}

/// Layer stack, incident medium first.
#[derive(Debug, Deserialize)]
pub struct SampleConfig {
    #[serde(default = "default_roughness_layers")]
    pub roughness_layers: usize,
    pub layer: Vec<LayerConfig>,
}

fn default_roughness_layers() -> usize {
    41
}

/// A single layer: a named material or explicit scattering constants.
#[derive(Debug, Deserialize)]
pub struct LayerConfig {
    #[serde(default)]
    pub material: Option<String>,
    /// Scattering-length density in Å⁻².
    #[serde(default)]
    pub sld: Option<f64>,
    #[serde(default)]
    pub true_abs: f64,
    #[serde(default)]
    pub inc_abs: f64,
    /// Thickness in Å (ignored for the incident medium and substrate).
    #[serde(default)]
    pub thickness: f64,
    /// Interface width σ to the layer below, in Å.
    #[serde(default)]
    pub roughness: f64,
}

impl LayerConfig {
    pub fn to_slab(&self) -> anyhow::Result<Slab> {
        match (&self.material, self.sld) {
            (Some(name), None) => Ok(slab_for_material(name, self.thickness, self.roughness)?),
            (None, Some(sld)) => Ok(Slab::new(
                Tile::new(sld, self.true_abs, self.inc_abs, self.thickness),
                self.roughness,
            )),
            (Some(name), Some(_)) => bail!("layer '{name}' sets both material and sld"),
            (None, None) => bail!("layer needs either material or sld"),
        }
    }
}

/// Q grid: either a linear range or the Q column of a measured data file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum WaveVectorSpec {
    Range { range: [f64; 2], points: usize },
    Data { data: PathBuf },
}

impl WaveVectorSpec {
    /// Linearly spaced Q values for a range, `None` for measured data.
    pub fn grid(&self) -> Option<Vec<f64>> {
        match self {
            WaveVectorSpec::Range { range, points } => {
                let [start, end] = *range;
                Some(
                    (0..*points)
                        .map(|i| start + (end - start) * i as f64 / (*points - 1).max(1) as f64)
                        .collect(),
                )
            }
            WaveVectorSpec::Data { .. } => None,
        }
    }
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to write the R·Q⁴ curve (default: true).
    #[serde(default = "default_true")]
    pub rq4: bool,
    /// Whether to also dump the full profile as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            rq4: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}

fn default_true() -> bool {
    true
}

impl JobConfig {
    /// Build the slab stack described by `[[sample.layer]]`.
    pub fn slabs(&self) -> anyhow::Result<Vec<Slab>> {
        self.sample
            .layer
            .iter()
            .enumerate()
            .map(|(i, layer)| layer.to_slab().with_context(|| format!("layer {}", i + 1)))
            .collect()
    }

    /// Check values that deserialise fine but cannot produce a curve.
    pub fn validate(&self) -> anyhow::Result<()> {
        let wavelength = self.instrument.wavelength;
        if wavelength.is_nan() || wavelength <= 0.0 {
            bail!("wavelength must be positive, got {wavelength}");
        }
        let res = &self.instrument.resolution;
        if res.delta_q0 < 0.0 || res.delta_q1_over_q < 0.0 {
            bail!("resolution terms must be non-negative");
        }
        if self.sample.layer.len() < 2 {
            bail!("sample needs at least an incident medium and a substrate");
        }
        for (i, layer) in self.sample.layer.iter().enumerate() {
            if layer.thickness < 0.0 || layer.roughness < 0.0 {
                bail!("layer {}: thickness and roughness must be non-negative", i + 1);
            }
        }
        self.slabs()?;
        if let WaveVectorSpec::Range { range, points } = &self.q {
            if *points == 0 {
                bail!("q.points must be at least 1");
            }
            if range[1] < range[0] {
                bail!("q.range must be ascending");
            }
        }
        Ok(())
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}
