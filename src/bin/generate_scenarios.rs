//! Generates synthetic scenario MAT files for local development.
//!
//! The real files are exported from the Simulink model; this produces
//! plausible stand-ins with the same channel schema. The Mode 1 runs record
//! torque on a coarser time base (the split path), Mode 4 is fully aligned.

use std::path::Path;

use anyhow::{Context, Result};
use regen_data::data::mat5;
use regen_data::Scenario;

const DT: f64 = 0.01;
const SAMPLES: usize = 600;
/// Torque logging runs at a fifth of the main rate in the Mode 1 exports.
const TORQUE_STRIDE: usize = 5;

fn time_base(n: usize, dt: f64) -> Vec<f64> {
    (0..n).map(|i| i as f64 * dt).collect()
}

/// First-order spin-up towards a setpoint.
fn spin_up(t: &[f64], setpoint: f64, tau: f64) -> Vec<f64> {
    t.iter()
        .map(|&ti| setpoint * (1.0 - (-ti / tau).exp()))
        .collect()
}

fn mode1_arrays(setpoint: f64, drain_per_s: f64) -> Vec<(String, Vec<f64>)> {
    let t = time_base(SAMPLES, DT);
    let bat_soc: Vec<f64> = t.iter().map(|&ti| 100.0 - drain_per_s * ti).collect();
    let sc_soc: Vec<f64> = t
        .iter()
        .map(|&ti| 95.0 - 0.4 * (1.0 - (-ti / 1.5).exp()))
        .collect();
    let rotor_speed = spin_up(&t, setpoint, 0.8);

    // Motor torque peaks during spin-up and settles to the friction load.
    let t_torque = time_base(SAMPLES / TORQUE_STRIDE, DT * TORQUE_STRIDE as f64);
    let rotor_torque: Vec<f64> = t_torque
        .iter()
        .map(|&ti| 0.3 + 2.2 * (-ti / 0.8).exp())
        .collect();

    vec![
        ("t".to_string(), t),
        ("bat_soc".to_string(), bat_soc),
        ("rotor_speed".to_string(), rotor_speed),
        ("sc_soc".to_string(), sc_soc),
        ("t_torque".to_string(), t_torque),
        ("rotor_torque".to_string(), rotor_torque),
    ]
}

fn mode4_arrays() -> Vec<(String, Vec<f64>)> {
    let t = time_base(SAMPLES, DT);
    // Braking from 300 RPM; the recovered energy charges the supercapacitor.
    let rotor_speed: Vec<f64> = t.iter().map(|&ti| 300.0 * (-ti / 1.2).exp()).collect();
    let rotor_torque: Vec<f64> = t.iter().map(|&ti| -2.8 * (-ti / 1.2).exp()).collect();
    let bat_soc: Vec<f64> = t
        .iter()
        .map(|&ti| 80.0 + 0.6 * (1.0 - (-ti / 1.2).exp()))
        .collect();
    let sc_soc: Vec<f64> = t
        .iter()
        .map(|&ti| 2.0 + 10.0 * (1.0 - (-ti / 1.2).exp()))
        .collect();

    vec![
        ("t".to_string(), t),
        ("bat_soc".to_string(), bat_soc),
        ("rotor_speed".to_string(), rotor_speed),
        ("sc_soc".to_string(), sc_soc),
        ("rotor_torque".to_string(), rotor_torque),
    ]
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = Path::new("MATLAB_files");
    std::fs::create_dir_all(out_dir).context("creating output directory")?;

    let scenarios = [
        (Scenario::Mode1Rpm100, mode1_arrays(100.0, 0.12)),
        (Scenario::Mode1Rpm300, mode1_arrays(300.0, 0.35)),
        (Scenario::Mode4Regen, mode4_arrays()),
    ];

    for (scenario, arrays) in scenarios {
        let path = out_dir.join(scenario.file_name());
        let borrowed: Vec<(&str, &[f64])> = arrays
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
            .collect();
        mat5::write_arrays(&path, &borrowed)
            .with_context(|| format!("writing {}", path.display()))?;
        println!(
            "Wrote {} ({} channels, {SAMPLES} samples) to {}",
            scenario,
            borrowed.len(),
            path.display()
        );
    }

    Ok(())
}
