//! Event types and sinks for observing the engine.
//!
//! This module defines [`LodEvent`] and a set of sinks to emit, collect, or forward events
//! while the engine partitions data ([`crate::engine::LodEngine::on_data_changed_with_events`]),
//! evaluates frames ([`crate::engine::LodEngine::evaluate_with_events`]) or renders
//! ([`crate::engine::LodEngine::render_with_events`]).
use crate::blend::VisibleWindow;
use crate::level::BucketId;

/// Describes events emitted by the engine.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum LodEvent {
    /// A new dataset was partitioned and replaced the previous bucket set.
    Partitioned {
        /// Number of items in the dataset.
        item_count: usize,
        /// Highest level observed.
        num_levels: u32,
        /// Items per bucket, in bucket order.
        bucket_sizes: Vec<usize>,
    },

    /// A data change was refused; the previous bucket set stays active.
    DataRejected {
        /// Human-readable reason.
        reason: String,
    },

    /// A frame was evaluated.
    Evaluated {
        /// Zoom the frame was evaluated at.
        zoom: f64,
        /// Level ratio derived from the zoom.
        ratio: f64,
        /// Buckets that passed the visibility gate.
        window: VisibleWindow,
    },

    /// A bucket was handed to the layer factory.
    BucketDrawn {
        /// Stable bucket identifier.
        id: BucketId,
        /// Number of items in the bucket.
        item_count: usize,
        /// Opacity passed to the factory.
        opacity: f32,
    },

    /// Non-fatal warning; the operation either went ahead or left the engine unchanged.
    Warning {
        /// Context string (e.g. `config`, bucket id).
        context: String,
        /// Human-readable message.
        message: String,
    },
}

/// Lightweight discriminant of [`LodEvent`] used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LodEventKind {
    Partitioned,
    DataRejected,
    Evaluated,
    BucketDrawn,
    Warning,
}

impl LodEvent {
    pub fn kind(&self) -> LodEventKind {
        match self {
            LodEvent::Partitioned { .. } => LodEventKind::Partitioned,
            LodEvent::DataRejected { .. } => LodEventKind::DataRejected,
            LodEvent::Evaluated { .. } => LodEventKind::Evaluated,
            LodEvent::BucketDrawn { .. } => LodEventKind::BucketDrawn,
            LodEvent::Warning { .. } => LodEventKind::Warning,
        }
    }
}

/// A generic event sink that accepts [`LodEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: LodEvent);

    /// Whether the sink cares about events of `kind`. Lets emitters skip building them.
    #[inline]
    fn wants(&self, _kind: LodEventKind) -> bool {
        true
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: LodEvent) {}

    #[inline]
    fn wants(&self, _kind: LodEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(LodEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(LodEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(LodEvent),
{
    #[inline]
    fn send(&mut self, event: LodEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<LodEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn into_inner(self) -> Vec<LodEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[LodEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: LodEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected() -> LodEvent {
        LodEvent::DataRejected {
            reason: "empty".into(),
        }
    }

    #[test]
    fn vec_sink_collects_events() {
        let mut sink = VecSink::new();
        assert!(sink.is_empty());
        sink.send(rejected());
        sink.send(rejected());
        assert_eq!(sink.len(), 2);
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn fn_sink_invokes_callback() {
        let mut count = 0;
        let mut sink = FnSink::new(|_event| {
            count += 1;
        });
        sink.send(rejected());
        assert_eq!(count, 1);
    }

    #[test]
    fn unit_sink_wants_nothing() {
        assert!(!().wants(LodEventKind::Evaluated));
        assert!(VecSink::new().wants(LodEventKind::Evaluated));
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(rejected().kind(), LodEventKind::DataRejected);
        let warning = LodEvent::Warning {
            context: "level-1".into(),
            message: "empty".into(),
        };
        assert_eq!(warning.kind(), LodEventKind::Warning);
    }
}
