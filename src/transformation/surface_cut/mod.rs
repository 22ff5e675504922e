//! Cutting of triangulated surfaces with closed loops.

pub use self::edge_trace::{CellTrace, LineSplit, TraceLocation, TracePoint, TriangleTrace};
pub use self::loop_classifier::{extract_loops, Loop, LoopClassifier};
pub use self::parameters::SurfaceCutParameters;
pub use self::parent::{Child, Parent};
pub use self::splitter::{PointWeights, SplitOutput, Splitter};
pub use self::surface_cut::{cut_surface, CutStatistics, SurfaceCutter};
pub use self::surface_cut_error::SurfaceCutError;

mod assembler;
mod edge_trace;
mod loop_classifier;
mod parameters;
mod parent;
mod splitter;
mod surface_cut;
mod surface_cut_error;
mod triangulation;
