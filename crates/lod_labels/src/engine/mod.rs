//! The level-of-detail engine: caches the bucket partitioning and evaluates it per zoom.
//!
//! The engine is a plain composition boundary. The host tells it when data changes, asks it
//! for a [`Frame`] whenever the view changes, and owns whatever drawables it builds through
//! a [`LayerFactory`].
use std::sync::Arc;

use tracing::{debug, warn};

use crate::blend::{opacity_of, threshold_window, visible_window, VisibilityMode};
use crate::error::Result;
use crate::level::{partition, BucketId, LevelAccessor, LevelSet};
use crate::zoom::ratio::ratio_unchecked;

pub mod config;
pub mod events;
pub mod factory;
pub mod frame;

pub use config::LodConfig;
pub use events::{EventSink, FnSink, LodEvent, LodEventKind, VecSink};
pub use factory::{FnFactory, LayerFactory};
pub use frame::{BucketState, BucketView, Frame};

/// Lifecycle state of a [`LodEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No dataset has been partitioned yet; frames are empty.
    Uninitialized,
    /// A bucket set is cached and every evaluation reads from it.
    Partitioned,
}

pub struct LodEngine<T> {
    config: LodConfig,
    level_of: Box<dyn LevelAccessor<T>>,
    levels: Option<Arc<LevelSet<T>>>,
}

impl<T> std::fmt::Debug for LodEngine<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LodEngine")
            .field("config", &self.config)
            .field("state", &self.state())
            .field("num_levels", &self.levels.as_ref().map(|l| l.num_levels()))
            .finish_non_exhaustive()
    }
}

impl<T> LodEngine<T> {
    /// Creates an engine after validating `config`.
    pub fn new(config: LodConfig, level_of: impl LevelAccessor<T> + 'static) -> Result<Self> {
        check_config(&config, &mut ())?;
        Ok(Self {
            config,
            level_of: Box::new(level_of),
            levels: None,
        })
    }

    /// Replaces the level accessor and configuration.
    ///
    /// An already partitioned dataset is re-partitioned with the new accessor. On error the
    /// engine keeps its previous accessor, configuration and buckets.
    pub fn configure(
        &mut self,
        level_of: impl LevelAccessor<T> + 'static,
        config: LodConfig,
    ) -> Result<()> {
        self.configure_with_events(level_of, config, &mut ())
    }

    pub fn configure_with_events(
        &mut self,
        level_of: impl LevelAccessor<T> + 'static,
        config: LodConfig,
        sink: &mut dyn EventSink,
    ) -> Result<()> {
        check_config(&config, sink)?;

        let repartitioned = match &self.levels {
            Some(levels) => Some(partition(levels.shared_items(), &level_of)?),
            None => None,
        };

        self.config = config;
        self.level_of = Box::new(level_of);
        if let Some(set) = repartitioned {
            report_empty_levels(&set, sink);
            self.levels = Some(Arc::new(set));
        }
        Ok(())
    }

    /// Replaces only the configuration; buckets are untouched.
    pub fn set_config(&mut self, config: LodConfig) -> Result<()> {
        self.set_config_with_events(config, &mut ())
    }

    pub fn set_config_with_events(
        &mut self,
        config: LodConfig,
        sink: &mut dyn EventSink,
    ) -> Result<()> {
        check_config(&config, sink)?;
        self.config = config;
        Ok(())
    }

    pub fn config(&self) -> &LodConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        if self.levels.is_some() {
            EngineState::Partitioned
        } else {
            EngineState::Uninitialized
        }
    }

    /// Current bucket set, if any.
    pub fn levels(&self) -> Option<&LevelSet<T>> {
        self.levels.as_deref()
    }

    /// Shared handle to the current bucket set, for readers on other threads.
    pub fn snapshot(&self) -> Option<Arc<LevelSet<T>>> {
        self.levels.clone()
    }

    /// Re-partitions after a data change.
    ///
    /// Fails with [`crate::error::Error::EmptyDataset`] for an empty dataset; the previous
    /// bucket set then stays active.
    pub fn on_data_changed(&mut self, items: impl Into<Arc<[T]>>) -> Result<&LevelSet<T>> {
        self.on_data_changed_with_events(items, &mut ())
    }

    pub fn on_data_changed_with_events(
        &mut self,
        items: impl Into<Arc<[T]>>,
        sink: &mut dyn EventSink,
    ) -> Result<&LevelSet<T>> {
        let set = match partition(items, &*self.level_of) {
            Ok(set) => set,
            Err(e) => {
                warn!("Data change rejected, keeping previous levels: {}.", e);
                if sink.wants(LodEventKind::DataRejected) {
                    sink.send(LodEvent::DataRejected {
                        reason: e.to_string(),
                    });
                }
                return Err(e);
            }
        };

        if sink.wants(LodEventKind::Partitioned) {
            sink.send(LodEvent::Partitioned {
                item_count: set.item_count(),
                num_levels: set.num_levels(),
                bucket_sizes: set.bucket_sizes(),
            });
        }
        report_empty_levels(&set, sink);

        let levels = self.levels.insert(Arc::new(set));
        Ok(&**levels)
    }

    /// Evaluates every bucket at `zoom`.
    pub fn evaluate(&self, zoom: f64) -> Frame<T> {
        self.evaluate_with_events(zoom, &mut ())
    }

    pub fn evaluate_with_events(&self, zoom: f64, sink: &mut dyn EventSink) -> Frame<T> {
        let ratio = ratio_unchecked(zoom, &self.config.zoom);
        let Some(levels) = &self.levels else {
            return Frame::empty(zoom, ratio);
        };

        let num_levels = levels.num_levels();
        let (window, fading) = match self.config.mode {
            VisibilityMode::Ratio => (visible_window(ratio, num_levels), true),
            VisibilityMode::ZoomThreshold { threshold } => {
                (threshold_window(zoom, threshold, num_levels), false)
            }
        };
        debug!(
            "Evaluated zoom {:.3} (ratio {:.3}): levels {}..={} visible.",
            zoom,
            ratio,
            window.first(),
            window.last()
        );

        let fade_rate = self.config.zoom.fade_rate;
        let buckets = (0..=num_levels)
            .map(|index| {
                let visible = window.contains(index);
                let opacity = match (visible, fading) {
                    (false, _) => 0.0,
                    (true, true) => opacity_of(index, ratio, num_levels, fade_rate),
                    (true, false) => 1.0,
                };
                BucketState {
                    index,
                    id: BucketId::for_level(index),
                    opacity,
                    visible,
                }
            })
            .collect();

        if sink.wants(LodEventKind::Evaluated) {
            sink.send(LodEvent::Evaluated {
                zoom,
                ratio,
                window,
            });
        }

        Frame::new(zoom, ratio, window, buckets, Arc::clone(levels))
    }

    /// Evaluates at `zoom` and draws every visible bucket through `factory`, in bucket order.
    pub fn render<F>(&self, zoom: f64, factory: &mut F) -> Vec<F::Drawable>
    where
        F: LayerFactory<T>,
    {
        self.render_with_events(zoom, factory, &mut ())
    }

    pub fn render_with_events<F>(
        &self,
        zoom: f64,
        factory: &mut F,
        sink: &mut dyn EventSink,
    ) -> Vec<F::Drawable>
    where
        F: LayerFactory<T>,
    {
        let frame = self.evaluate_with_events(zoom, sink);
        let drawables = frame
            .visible()
            .map(|view| {
                let style = self.config.style.for_level(view.state.index);
                if sink.wants(LodEventKind::BucketDrawn) {
                    sink.send(LodEvent::BucketDrawn {
                        id: view.state.id.clone(),
                        item_count: view.items.len(),
                        opacity: view.state.opacity,
                    });
                }
                factory.draw(&view.state.id, view.items, view.state.opacity, &style)
            })
            .collect();
        drawables
    }
}

fn check_config(config: &LodConfig, sink: &mut dyn EventSink) -> Result<()> {
    if let Err(e) = config.validate() {
        warn!("Rejected engine configuration: {}.", e);
        if sink.wants(LodEventKind::Warning) {
            sink.send(LodEvent::Warning {
                context: "config".into(),
                message: e.to_string(),
            });
        }
        return Err(e);
    }
    Ok(())
}

/// Levels between 0 and `num_levels` that no item carries still get a bucket; flag them.
fn report_empty_levels<T>(levels: &LevelSet<T>, sink: &mut dyn EventSink) {
    for bucket in levels.buckets().iter().filter(|b| b.is_empty()) {
        debug!("Level {} has no items.", bucket.index());
        if sink.wants(LodEventKind::Warning) {
            sink.send(LodEvent::Warning {
                context: bucket.id().to_string(),
                message: "No items at this level; bucket stays empty".into(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::label::Label;
    use crate::level::BucketItems;
    use crate::style::LabelStyle;
    use crate::zoom::ZoomConfig;

    fn labels(levels: &[u32]) -> Vec<Label> {
        levels
            .iter()
            .enumerate()
            .map(|(i, &l)| Label::new([i as f32, 0.0], l, format!("label-{i}")))
            .collect()
    }

    fn engine() -> LodEngine<Label> {
        let config = LodConfig::new(ZoomConfig::try_new(4.0, 8.0, 0.5).unwrap());
        LodEngine::new(config, Label::level_of).unwrap()
    }

    #[derive(Default)]
    struct RecordingFactory {
        calls: Vec<(String, usize, f32, f32)>,
    }

    impl LayerFactory<Label> for RecordingFactory {
        type Drawable = String;

        fn draw(
            &mut self,
            bucket: &BucketId,
            items: BucketItems<'_, Label>,
            opacity: f32,
            style: &LabelStyle,
        ) -> String {
            self.calls
                .push((bucket.to_string(), items.len(), opacity, style.size));
            bucket.to_string()
        }
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = LodConfig::new(ZoomConfig::new(8.0, 5.0));
        let err = LodEngine::new(config, Label::level_of).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn uninitialized_engine_yields_empty_frames() {
        let engine = engine();
        assert_eq!(engine.state(), EngineState::Uninitialized);
        let frame = engine.evaluate(6.0);
        assert!(frame.is_empty());
        assert!(frame.window().is_none());
        assert_eq!(frame.ratio(), 0.5);
    }

    #[test]
    fn data_change_partitions_and_transitions_state() {
        let mut engine = engine();
        let levels = engine.on_data_changed(labels(&[0, 1, 2, 2])).unwrap();
        assert_eq!(levels.bucket_sizes(), vec![1, 1, 2]);
        assert_eq!(engine.state(), EngineState::Partitioned);
    }

    #[test]
    fn frame_has_one_entry_per_bucket_with_stable_ids() {
        let mut engine = engine();
        engine.on_data_changed(labels(&[0, 1, 2])).unwrap();
        let frame = engine.evaluate(6.0);
        let ids: Vec<_> = frame.buckets().iter().map(|b| b.id.to_string()).collect();
        assert_eq!(ids, vec!["level-0", "level-1", "level-2"]);
        assert_eq!(frame.visible_indices(), vec![1, 2]);
        assert_eq!(frame.bucket(0).unwrap().opacity, 0.0);
    }

    #[test]
    fn render_only_draws_visible_buckets() {
        let mut engine = engine();
        engine.on_data_changed(labels(&[0, 0, 1, 2])).unwrap();
        let mut factory = RecordingFactory::default();
        let drawn = engine.render(8.0, &mut factory);

        // ratio 0: buckets 0 and 1 pass the gate.
        assert_eq!(drawn, vec!["level-0", "level-1"]);
        assert_eq!(factory.calls[0].1, 2);
        assert_eq!(factory.calls[0].3, 32.0);
        assert_eq!(factory.calls[1].3, 128.0);
    }

    #[test]
    fn fn_factory_receives_items_and_opacity() {
        let mut engine = engine();
        engine.on_data_changed(labels(&[0, 1, 1])).unwrap();
        let mut factory = FnFactory::new(
            |id: &BucketId, items: BucketItems<'_, Label>, opacity: f32, _style: &LabelStyle| {
                let texts: Vec<String> = items.map(|l| l.text.clone()).collect();
                (id.clone(), texts, opacity)
            },
        );
        let drawn = engine.render(2.0, &mut factory);
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].0, BucketId::for_level(1));
        assert_eq!(drawn[0].1, vec!["label-1", "label-2"]);
        assert_eq!(drawn[0].2, 1.0);
    }

    #[test]
    fn rejected_data_keeps_previous_levels_and_reports_event() {
        let mut engine = engine();
        engine.on_data_changed(labels(&[0, 1])).unwrap();
        let mut sink = VecSink::new();
        let err = engine
            .on_data_changed_with_events(Vec::<Label>::new(), &mut sink)
            .unwrap_err();
        assert!(matches!(err, Error::EmptyDataset));
        assert_eq!(engine.levels().unwrap().bucket_sizes(), vec![1, 1]);
        assert!(matches!(
            sink.as_slice(),
            [LodEvent::DataRejected { .. }]
        ));
    }

    #[test]
    fn frames_keep_their_snapshot_across_repartitioning() {
        let mut engine = engine();
        engine.on_data_changed(labels(&[0, 1])).unwrap();
        let before = engine.evaluate(6.0);
        engine.on_data_changed(labels(&[0, 1, 2, 3])).unwrap();
        assert_eq!(before.levels().unwrap().num_levels(), 1);
        assert_eq!(engine.evaluate(6.0).len(), 4);
    }

    #[test]
    fn configure_repartitions_with_new_accessor() {
        let mut engine = engine();
        engine.on_data_changed(labels(&[0, 1, 2])).unwrap();
        engine
            .configure(|_: &Label| 0, LodConfig::default())
            .unwrap();
        assert_eq!(engine.levels().unwrap().bucket_sizes(), vec![3]);
        assert_eq!(engine.config().zoom, ZoomConfig::default());
    }

    #[test]
    fn failed_configure_keeps_previous_state() {
        let mut engine = engine();
        engine.on_data_changed(labels(&[0, 1, 2])).unwrap();
        let bad = LodConfig::new(ZoomConfig::new(8.0, 5.0));
        assert!(engine.configure(|_: &Label| 0, bad).is_err());
        assert_eq!(engine.levels().unwrap().bucket_sizes(), vec![1, 1, 1]);
        assert_eq!(engine.config().zoom.min_zoom, 4.0);
    }

    #[test]
    fn threshold_mode_switches_without_fading() {
        let config = LodConfig::new(ZoomConfig::try_new(4.0, 8.0, 0.5).unwrap())
            .with_mode(VisibilityMode::ZoomThreshold { threshold: 9.0 });
        let mut engine = LodEngine::new(config, Label::level_of).unwrap();
        engine.on_data_changed(labels(&[0, 1, 2, 3])).unwrap();

        let frame = engine.evaluate(7.5);
        assert_eq!(frame.visible_indices(), vec![1, 2]);
        for state in frame.buckets() {
            let expected = if state.visible { 1.0 } else { 0.0 };
            assert_eq!(state.opacity, expected);
        }
        assert_eq!(engine.evaluate(9.5).visible_indices(), vec![0]);
    }

    #[test]
    fn rejected_config_emits_warning_and_keeps_config() {
        let mut engine = engine();
        let mut sink = VecSink::new();
        let bad = LodConfig::new(ZoomConfig::new(4.0, 8.0).with_fade_rate(-1.0));
        assert!(engine.set_config_with_events(bad.clone(), &mut sink).is_err());
        assert!(engine
            .configure_with_events(Label::level_of, bad, &mut sink)
            .is_err());
        assert_eq!(engine.config().zoom.fade_rate, 0.5);
        assert_eq!(sink.len(), 2);
        for event in sink.as_slice() {
            assert!(matches!(event, LodEvent::Warning { context, .. } if context == "config"));
        }
    }

    #[test]
    fn level_gaps_are_reported_as_warnings() {
        let mut engine = engine();
        let mut sink = VecSink::new();
        engine
            .on_data_changed_with_events(labels(&[0, 3]), &mut sink)
            .unwrap();
        let contexts: Vec<_> = sink
            .as_slice()
            .iter()
            .filter_map(|event| match event {
                LodEvent::Warning { context, .. } => Some(context.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(contexts, vec!["level-1", "level-2"]);
        assert_eq!(sink.as_slice()[0].kind(), LodEventKind::Partitioned);
    }

    #[test]
    fn render_emits_evaluation_and_draw_events() {
        let mut engine = engine();
        engine.on_data_changed(labels(&[0, 1, 2])).unwrap();
        let mut sink = VecSink::new();
        let mut factory = RecordingFactory::default();
        engine.render_with_events(6.0, &mut factory, &mut sink);
        let kinds: Vec<_> = sink.as_slice().iter().map(LodEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                LodEventKind::Evaluated,
                LodEventKind::BucketDrawn,
                LodEventKind::BucketDrawn
            ]
        );
    }
}
