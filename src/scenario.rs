use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Scenario catalog
// ---------------------------------------------------------------------------

/// One of the fixed simulation runs the dashboard can display.
///
/// The catalog is static: each scenario maps to exactly one MAT file shipped
/// alongside the dashboard, and no scenarios can be registered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// Mode 1 (battery-only pushing) with a 100 RPM setpoint.
    Mode1Rpm100,
    /// Mode 1 (battery-only pushing) with a 300 RPM setpoint.
    Mode1Rpm300,
    /// Mode 4, regenerative braking into the battery system.
    Mode4Regen,
}

/// Error returned when a scenario identifier is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scenario {0:?}")]
pub struct InvalidScenario(pub String);

impl Scenario {
    /// All scenarios, in dashboard dropdown order.
    pub const ALL: [Scenario; 3] = [
        Scenario::Mode1Rpm100,
        Scenario::Mode1Rpm300,
        Scenario::Mode4Regen,
    ];

    /// File name of the simulation output inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Scenario::Mode1Rpm100 => "Mode1_100.mat",
            Scenario::Mode1Rpm300 => "Mode1_300.mat",
            Scenario::Mode4Regen => "Mode4.mat",
        }
    }

    /// Human-readable label, as shown in the scenario dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Scenario::Mode1Rpm100 => "Mode 1 - 100 RPM",
            Scenario::Mode1Rpm300 => "Mode 1 - 300 RPM",
            Scenario::Mode4Regen => "Mode 4 - Regenerative Braking",
        }
    }

    /// One-paragraph description for the "what is this mode about?" panel.
    pub fn description(self) -> &'static str {
        match self {
            Scenario::Mode1Rpm100 | Scenario::Mode1Rpm300 => {
                "Mode 1 is the standard pushing state for the pod - the battery \
                 system solely powers the motor. The RPM represents different \
                 setpoints for the system."
            }
            Scenario::Mode4Regen => {
                "Mode 4 is regenerative braking with the battery system as the \
                 power sink."
            }
        }
    }

    /// Suggested y-axis range for the supercapacitor SoC chart.
    ///
    /// Display hint only; the renderer decides whether to apply it. The two
    /// Mode 1 runs barely discharge the supercapacitor, so a zoomed-in range
    /// reads better there.
    pub fn sc_soc_display_range(self) -> [f64; 2] {
        match self {
            Scenario::Mode1Rpm100 | Scenario::Mode1Rpm300 => [90.0, 100.0],
            Scenario::Mode4Regen => [0.0, 15.0],
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Scenario {
    type Err = InvalidScenario;

    /// Accepts the dropdown label or the file stem of each scenario.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mode 1 - 100 RPM" | "Mode1_100" => Ok(Scenario::Mode1Rpm100),
            "Mode 1 - 300 RPM" | "Mode1_300" => Ok(Scenario::Mode1Rpm300),
            "Mode 4 - Regenerative Braking" | "Mode4" => Ok(Scenario::Mode4Regen),
            other => Err(InvalidScenario(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_and_stems_parse() {
        for scenario in Scenario::ALL {
            assert_eq!(scenario.label().parse::<Scenario>(), Ok(scenario));
            let stem = scenario.file_name().trim_end_matches(".mat");
            assert_eq!(stem.parse::<Scenario>(), Ok(scenario));
        }
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let err = "Mode 9".parse::<Scenario>().unwrap_err();
        assert_eq!(err, InvalidScenario("Mode 9".to_string()));
    }

    #[test]
    fn file_mapping_is_total_and_distinct() {
        let mut names: Vec<&str> = Scenario::ALL.iter().map(|s| s.file_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Scenario::ALL.len());
    }

    #[test]
    fn supercap_display_ranges() {
        assert_eq!(Scenario::Mode1Rpm100.sc_soc_display_range(), [90.0, 100.0]);
        assert_eq!(Scenario::Mode1Rpm300.sc_soc_display_range(), [90.0, 100.0]);
        assert_eq!(Scenario::Mode4Regen.sc_soc_display_range(), [0.0, 15.0]);
    }
}
