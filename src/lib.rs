#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod animation;
pub mod assets;
pub mod errors;
pub mod reconcile;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod utils;

pub use animation::{Animation, AnimationCurve, AnimationCurveFrame, AnimationCurveNode, ChannelKind, FrameSample};
pub use assets::{ImportDiagnostics, ImportedModel, RawScene, SceneProvider, import};
pub use errors::{ImportError, Result};
pub use reconcile::{AttributeStream, CornerAttribute, ReconcileStats, reconcile};
pub use resources::{Material, Mesh, Vertex};
pub use scene::{Model, Node, NodeHandle, PivotChain, Transform, WeightCollection, WeightData};
pub use settings::{ImportSettings, UnitLevel};
pub use utils::stats::ModelStats;
