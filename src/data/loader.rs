use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, info};
use matfile::MatFile;

use super::model::{self, ScenarioFrames, TimeSeriesFrame};
use crate::scenario::{InvalidScenario, Scenario};

/// Channels every scenario file must record, aligned to the `t` time base.
const REQUIRED_FIELDS: [&str; 4] = ["t", "bat_soc", "rotor_speed", "sc_soc"];
/// Torque may be absent, aligned to `t`, or sampled on its own `t_torque`.
const OPTIONAL_FIELDS: [&str; 2] = ["rotor_torque", "t_torque"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while loading a scenario.
///
/// A torque channel that is off the primary time base is NOT an error; the
/// loader degrades to a split pair of frames instead (see
/// [`ScenarioFrames::Split`]).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The scenario identifier is not in the catalog.
    #[error(transparent)]
    InvalidScenario(#[from] InvalidScenario),
    /// The scenario file is missing or not a parsable MAT container.
    #[error("failed to read scenario file {}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The file parsed but its channels do not match the expected schema.
    #[error("scenario file violates the channel schema: {0}")]
    Schema(String),
}

// ---------------------------------------------------------------------------
// RawRecord – the file's named arrays, verbatim
// ---------------------------------------------------------------------------

/// Channel name → numeric array, as read from one scenario file.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    arrays: BTreeMap<String, Vec<f64>>,
}

impl RawRecord {
    /// Values of a channel, if the file recorded it.
    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.arrays.get(name).map(Vec::as_slice)
    }

    fn require(&self, name: &str) -> Result<&[f64], LoadError> {
        self.get(name)
            .ok_or_else(|| LoadError::Schema(format!("required field `{name}` is absent")))
    }
}

/// Read the known channel arrays out of a MAT file.
pub fn read_record(path: &Path) -> Result<RawRecord, LoadError> {
    let file_read = |source: Box<dyn std::error::Error + Send + Sync>| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::open(path).map_err(|e| file_read(Box::new(e)))?;
    let mat = MatFile::parse(file).map_err(|e| file_read(Box::new(e)))?;

    let mut arrays = BTreeMap::new();
    for &name in REQUIRED_FIELDS.iter().chain(OPTIONAL_FIELDS.iter()) {
        let Some(array) = mat.find_by_name(name) else {
            continue;
        };
        if !is_vector(array.size()) {
            return Err(LoadError::Schema(format!(
                "field `{name}` is not a 1-D array (dims {:?})",
                array.size()
            )));
        }
        arrays.insert(name.to_string(), numeric_to_f64(array.data()));
    }
    Ok(RawRecord { arrays })
}

/// A MATLAB array counts as 1-D when at most one dimension exceeds 1
/// (column and row vectors both qualify).
fn is_vector(dims: &[usize]) -> bool {
    dims.iter().filter(|&&d| d > 1).count() <= 1
}

/// Widen any MAT numeric type to `f64`.
fn numeric_to_f64(data: &matfile::NumericData) -> Vec<f64> {
    use matfile::NumericData::*;
    match data {
        Double { real, .. } => real.clone(),
        Single { real, .. } => real.iter().map(|&v| v as f64).collect(),
        Int8 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        UInt8 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        Int16 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        UInt16 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        Int32 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        UInt32 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        Int64 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        UInt64 { real, .. } => real.iter().map(|&v| v as f64).collect(),
    }
}

// ---------------------------------------------------------------------------
// Frame assembly
// ---------------------------------------------------------------------------

/// Assemble a record into frames.
///
/// A single combined frame is preferred whenever `rotor_torque` shares the
/// primary time base. When the torque channel was recorded at a different
/// sampling resolution it goes into its own frame keyed by `t_torque`, so a
/// shape quirk in one channel never sinks the whole scenario.
pub fn assemble_frames(record: &RawRecord) -> Result<ScenarioFrames, LoadError> {
    let t = record.require("t")?;
    let bat_soc = checked_channel(record, "bat_soc", t.len())?;
    let rotor_speed = checked_channel(record, "rotor_speed", t.len())?;
    let sc_soc = checked_channel(record, "sc_soc", t.len())?;

    let primary_columns = |torque: Option<&[f64]>| {
        let mut columns = vec![
            (model::BATTERY_SOC.to_string(), bat_soc.to_vec()),
            (model::ROTOR_SPEED.to_string(), rotor_speed.to_vec()),
        ];
        if let Some(values) = torque {
            columns.push((model::ROTOR_TORQUE.to_string(), values.to_vec()));
        }
        columns.push((model::SUPERCAP_SOC.to_string(), sc_soc.to_vec()));
        columns
    };

    match record.get("rotor_torque") {
        // Torque shares the primary time base (or was not recorded at all):
        // one frame covers everything.
        Some(torque) if torque.len() == t.len() => Ok(ScenarioFrames::Combined(
            TimeSeriesFrame::from_parts(model::TIME, t.to_vec(), primary_columns(Some(torque))),
        )),
        None => Ok(ScenarioFrames::Combined(TimeSeriesFrame::from_parts(
            model::TIME,
            t.to_vec(),
            primary_columns(None),
        ))),
        // Torque was recorded at its own sampling resolution: split it off.
        Some(torque) => {
            debug!(
                "rotor_torque has {} samples but `t` has {}; splitting torque series",
                torque.len(),
                t.len()
            );
            let t_torque = record.get("t_torque").ok_or_else(|| {
                LoadError::Schema(
                    "`rotor_torque` is off the primary time base and `t_torque` is absent"
                        .to_string(),
                )
            })?;
            if t_torque.len() != torque.len() {
                return Err(LoadError::Schema(format!(
                    "`rotor_torque` has {} samples but `t_torque` has {}",
                    torque.len(),
                    t_torque.len()
                )));
            }
            Ok(ScenarioFrames::Split {
                primary: TimeSeriesFrame::from_parts(
                    model::TIME,
                    t.to_vec(),
                    primary_columns(None),
                ),
                torque: TimeSeriesFrame::from_parts(
                    model::TIME,
                    t_torque.to_vec(),
                    vec![(model::ROTOR_TORQUE.to_string(), torque.to_vec())],
                ),
            })
        }
    }
}

fn checked_channel<'a>(
    record: &'a RawRecord,
    name: &str,
    expected_len: usize,
) -> Result<&'a [f64], LoadError> {
    let values = record.require(name)?;
    if values.len() != expected_len {
        return Err(LoadError::Schema(format!(
            "field `{name}` has {} samples but `t` has {expected_len}",
            values.len()
        )));
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// Loader – scenario → frames
// ---------------------------------------------------------------------------

/// Loads scenario files from a data directory.
///
/// Carries no cache and no mutable state; every load is a pure function of
/// the scenario and the file's contents at call time, so concurrent loads of
/// different scenarios are safe if the caller wants to prefetch.
#[derive(Debug, Clone)]
pub struct Loader {
    data_dir: PathBuf,
}

impl Loader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Loader {
            data_dir: data_dir.into(),
        }
    }

    /// Load the frames for one scenario.
    pub fn load(&self, scenario: Scenario) -> Result<ScenarioFrames, LoadError> {
        let path = self.data_dir.join(scenario.file_name());
        debug!("loading {scenario} from {}", path.display());
        let record = read_record(&path)?;
        let frames = assemble_frames(&record)?;
        match frames.torque() {
            Some(torque) => info!(
                "loaded {scenario}: {} samples + {} torque samples",
                frames.primary().len(),
                torque.len()
            ),
            None => info!("loaded {scenario}: {} samples", frames.primary().len()),
        }
        Ok(frames)
    }

    /// Load by identifier string (dropdown label or file stem).
    ///
    /// Unknown identifiers fail before any file access.
    pub fn load_named(&self, name: &str) -> Result<ScenarioFrames, LoadError> {
        let scenario: Scenario = name.parse()?;
        self.load(scenario)
    }
}
