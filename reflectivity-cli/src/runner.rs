//! Job runner: builds the stack, computes the curve and writes the results.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use reflectivity::{
    ChiSquared, MeasuredData, Profile, ReflectivityProfile, Scaling, chi_squared,
    reflectivity_profile,
};

use crate::config::{JobConfig, WaveVectorSpec};

/// Results from a job run.
pub struct RunOutput {
    pub profile: ReflectivityProfile,
    pub chi_squared: Option<ChiSquared>,
}

/// Run a reflectivity job. Relative data paths are resolved against
/// `base_dir`, normally the directory of the job file.
pub fn run_job(job: &JobConfig, base_dir: &Path) -> Result<RunOutput> {
    job.validate()?;
    let slabs = job.slabs()?;

    let (wave_vector, measured) = match &job.q {
        WaveVectorSpec::Data { data } => {
            let path = base_dir.join(data);
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading measured data {}", path.display()))?;
            let measured = MeasuredData::parse(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            info!(points = measured.len(), path = %path.display(), "loaded measured data");
            (measured.wave_vector.clone(), Some(measured))
        }
        spec => (spec.grid().unwrap_or_default(), None),
    };

    info!(
        layers = slabs.len(),
        points = wave_vector.len(),
        wavelength = job.instrument.wavelength,
        "computing reflectivity"
    );

    let profile = reflectivity_profile(
        &slabs,
        job.sample.roughness_layers,
        &job.instrument.resolution,
        job.instrument.wavelength,
        &wave_vector,
        Scaling::Reflectivity,
    )?;

    let chi_squared = match &measured {
        Some(measured) => {
            let chi = chi_squared(&profile.reflectivity, measured)?;
            info!(
                chi_squared = chi.total,
                reduced = chi.reduced,
                points = chi.points,
                "goodness of fit"
            );
            Some(chi)
        }
        None => None,
    };

    Ok(RunOutput {
        profile,
        chi_squared,
    })
}

/// Write every artifact requested by `[output]` into `out_dir`.
pub fn write_outputs(output: &RunOutput, job: &JobConfig, out_dir: &Path) -> Result<()> {
    let profile = &output.profile;

    write_curve_csv(
        &out_dir.join("reflectivity.csv"),
        &profile.wave_vector,
        &profile.reflectivity,
        "R",
        job,
    )?;

    if job.output.rq4 {
        let rq4: Vec<f64> = profile
            .wave_vector
            .iter()
            .zip(&profile.reflectivity)
            .map(|(&q, &r)| Scaling::Rq4.apply(q, r))
            .collect();
        write_curve_csv(
            &out_dir.join("rq4.csv"),
            &profile.wave_vector,
            &rq4,
            "RQ4_A-4",
            job,
        )?;
    }

    write_profile_csv(&out_dir.join("profile.csv"), &profile.profile)?;

    if job.output.save_json {
        write_profile_json(&out_dir.join("reflectivity.json"), profile)?;
    }

    Ok(())
}

fn create_file(path: &Path) -> Result<std::fs::File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))
}

/// Write a Q-resolved curve to a CSV file with a metadata header.
pub fn write_curve_csv(
    path: &Path,
    wave_vector: &[f64],
    values: &[f64],
    column: &str,
    job: &JobConfig,
) -> Result<()> {
    let mut file = create_file(path)?;

    writeln!(file, "# Specular reflectivity")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# wavelength_A: {}", job.instrument.wavelength)?;
    writeln!(
        file,
        "# delta_q0: {}, delta_q1_over_q: {}",
        job.instrument.resolution.delta_q0, job.instrument.resolution.delta_q1_over_q
    )?;
    writeln!(file, "# roughness_layers: {}", job.sample.roughness_layers)?;
    writeln!(file, "#")?;
    writeln!(file, "Q_A-1,{column}")?;

    for (q, v) in wave_vector.iter().zip(values) {
        writeln!(file, "{q:.6e},{v:.6e}")?;
    }

    info!(path = %path.display(), "curve written");
    Ok(())
}

/// Write the scattering-density profile to a CSV file.
pub fn write_profile_csv(path: &Path, profile: &Profile) -> Result<()> {
    let mut file = create_file(path)?;

    writeln!(file, "# Scattering-length density profile")?;
    writeln!(file, "#")?;
    writeln!(file, "depth_A,sld_A-2")?;
    for (z, rho) in profile.points() {
        writeln!(file, "{z:.4},{rho:.6e}")?;
    }

    info!(path = %path.display(), "profile written");
    Ok(())
}

/// Write the full result as JSON.
pub fn write_profile_json(path: &Path, profile: &ReflectivityProfile) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(profile)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    info!(path = %path.display(), "JSON written");
    Ok(())
}
