#![forbid(unsafe_code)]
//! lod_labels: continuous level-of-detail selection and cross-fading for zoomable label layers.
//!
//! Modules:
//! - level: partition items into contiguous level buckets
//! - zoom: zoom bounds, fade rate, and the zoom-to-ratio mapping
//! - blend: visibility gate, cross-fade opacity, zoom-threshold switching
//! - engine: cached partitioning, per-zoom frames, layer factory seam, events
//! - style, label: passthrough label styling and a ready-made label item
//! - synth: synthetic hierarchical label datasets
pub mod blend;
pub mod engine;
pub mod error;
pub mod label;
pub mod level;
pub mod style;
pub mod synth;
pub mod zoom;

/// Convenient re-exports for common types. Import with `use lod_labels::prelude::*;`.
pub mod prelude {
    pub use crate::blend::{
        is_visible, opacity_of, threshold_window, visible_window, VisibilityMode, VisibleWindow,
    };
    pub use crate::engine::{
        BucketState, BucketView, EngineState, EventSink, FnFactory, FnSink, Frame, LayerFactory,
        LodConfig, LodEngine, LodEvent, LodEventKind, VecSink,
    };
    pub use crate::error::{Error, Result};
    pub use crate::label::Label;
    pub use crate::level::{
        partition, BucketId, BucketItems, LevelAccessor, LevelBucket, LevelSet, MAX_LEVEL,
    };
    pub use crate::style::{LabelStyle, LevelStyling, SizeUnits};
    pub use crate::synth::{generate_hierarchy, kmeans, HierarchySpec};
    pub use crate::zoom::{ratio_of, zoom_at_ratio, ZoomConfig};
}
