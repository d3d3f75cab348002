use serde::Serialize;
use serde_json::{Map, Number, Value};

// ---------------------------------------------------------------------------
// Column labels
// ---------------------------------------------------------------------------

/// Time column label, shared by every frame.
pub const TIME: &str = "Time (s)";
pub const BATTERY_SOC: &str = "Battery SoC";
pub const ROTOR_SPEED: &str = "Rotor Speed";
pub const ROTOR_TORQUE: &str = "Rotor Torque";
pub const SUPERCAP_SOC: &str = "Supercapacitor SoC";

// ---------------------------------------------------------------------------
// TimeSeriesFrame – an ordered table keyed by a time column
// ---------------------------------------------------------------------------

/// A read-only table of named numeric columns indexed by a time column.
///
/// Invariant: every data column has exactly as many samples as the time
/// column. Frames are only built by the loader, which verifies lengths before
/// construction, so the accessors never have to deal with ragged data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesFrame {
    time_label: String,
    time: Vec<f64>,
    columns: Vec<(String, Vec<f64>)>,
}

impl TimeSeriesFrame {
    /// Build a frame from pre-validated parts.
    ///
    /// Callers must have checked that every column matches `time` in length.
    pub(crate) fn from_parts(
        time_label: &str,
        time: Vec<f64>,
        columns: Vec<(String, Vec<f64>)>,
    ) -> Self {
        debug_assert!(columns.iter().all(|(_, v)| v.len() == time.len()));
        TimeSeriesFrame {
            time_label: time_label.to_string(),
            time,
            columns,
        }
    }

    /// Label of the time column.
    pub fn time_label(&self) -> &str {
        &self.time_label
    }

    /// The time axis.
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether the frame holds no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Values of a data column by label, if present.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Data column labels, in table order (excludes the time column).
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(col, _)| col.as_str()).collect()
    }

    /// Iterate over `(label, values)` pairs of the data columns.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(|(col, values)| (col.as_str(), values.as_slice()))
    }

    /// Records-oriented JSON export (one object per sample), for the
    /// dashboard's raw-data table.
    pub fn to_records(&self) -> Value {
        let records: Vec<Value> = (0..self.len())
            .map(|row| {
                let mut obj = Map::new();
                obj.insert(self.time_label.clone(), json_number(self.time[row]));
                for (col, values) in &self.columns {
                    obj.insert(col.clone(), json_number(values[row]));
                }
                Value::Object(obj)
            })
            .collect();
        Value::Array(records)
    }
}

fn json_number(v: f64) -> Value {
    // NaN / infinity have no JSON representation
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}

// ---------------------------------------------------------------------------
// ScenarioFrames – the tagged outcome of a scenario load
// ---------------------------------------------------------------------------

/// The frames produced for one scenario.
///
/// The simulation sometimes records rotor torque at a different sampling
/// resolution than the other channels. When all channels share the primary
/// time base the load yields a single [`Combined`](ScenarioFrames::Combined)
/// frame; when torque rides its own time base it is carried as a second,
/// independently indexed frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScenarioFrames {
    /// Every channel aligned to the primary time base.
    Combined(TimeSeriesFrame),
    /// Torque sampled on its own time base, separate from the other channels.
    Split {
        primary: TimeSeriesFrame,
        torque: TimeSeriesFrame,
    },
}

impl ScenarioFrames {
    /// The frame holding the SoC and rotor-speed channels (and torque too, in
    /// the combined case).
    pub fn primary(&self) -> &TimeSeriesFrame {
        match self {
            ScenarioFrames::Combined(frame) => frame,
            ScenarioFrames::Split { primary, .. } => primary,
        }
    }

    /// The standalone torque frame; `None` when torque is embedded in the
    /// primary frame.
    pub fn torque(&self) -> Option<&TimeSeriesFrame> {
        match self {
            ScenarioFrames::Combined(_) => None,
            ScenarioFrames::Split { torque, .. } => Some(torque),
        }
    }

    /// Decompose into the `(primary, torque)` pair.
    pub fn into_frames(self) -> (TimeSeriesFrame, Option<TimeSeriesFrame>) {
        match self {
            ScenarioFrames::Combined(frame) => (frame, None),
            ScenarioFrames::Split { primary, torque } => (primary, Some(torque)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> TimeSeriesFrame {
        TimeSeriesFrame::from_parts(
            TIME,
            vec![0.0, 0.1, 0.2],
            vec![
                (BATTERY_SOC.to_string(), vec![99.0, 98.5, 98.0]),
                (ROTOR_SPEED.to_string(), vec![0.0, 50.0, 100.0]),
            ],
        )
    }

    #[test]
    fn accessors() {
        let frame = sample_frame();
        assert_eq!(frame.len(), 3);
        assert!(!frame.is_empty());
        assert_eq!(frame.time_label(), TIME);
        assert_eq!(frame.column(BATTERY_SOC), Some(&[99.0, 98.5, 98.0][..]));
        assert_eq!(frame.column(ROTOR_TORQUE), None);
        assert_eq!(frame.column_names(), vec![BATTERY_SOC, ROTOR_SPEED]);
    }

    #[test]
    fn records_export_shape() {
        let records = sample_frame().to_records();
        let rows = records.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        let first = rows[0].as_object().unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first[TIME], 0.0);
        assert_eq!(first[BATTERY_SOC], 99.0);
    }

    #[test]
    fn frames_accessors_by_variant() {
        let combined = ScenarioFrames::Combined(sample_frame());
        assert!(combined.torque().is_none());
        assert_eq!(combined.primary().len(), 3);

        let torque = TimeSeriesFrame::from_parts(
            TIME,
            vec![0.0, 0.2],
            vec![(ROTOR_TORQUE.to_string(), vec![1.5, 1.2])],
        );
        let split = ScenarioFrames::Split {
            primary: sample_frame(),
            torque,
        };
        assert_eq!(split.torque().map(TimeSeriesFrame::len), Some(2));
        let (primary, torque) = split.into_frames();
        assert_eq!(primary.len(), 3);
        assert!(torque.is_some());
    }
}
