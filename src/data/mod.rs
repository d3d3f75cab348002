/// Data layer: core types, MAT-file loading, and frame assembly.
///
/// Architecture:
/// ```text
///  Mode1_100.mat / Mode1_300.mat / Mode4.mat
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse MAT container → RawRecord
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  RawRecord    │  channel name → numeric array
///   └──────────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ ScenarioFrames  │  Combined(frame) | Split { primary, torque }
///   └────────────────┘
/// ```
pub mod loader;
pub mod mat5;
pub mod model;
