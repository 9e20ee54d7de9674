use std::fs;

use lod_labels::prelude::*;
use lod_labels_examples::{init_tracing, DotCanvas, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let spec = HierarchySpec::new(400, 30).with_clusters_per_level(vec![64, 16, 4]);
    let mut rng = StdRng::seed_from_u64(9);
    let labels = generate_hierarchy(&spec, &mut rng)?;

    let style = LabelStyle::default()
        .with_color([240, 200, 120, 255])
        .with_level_styling(LevelStyling {
            grow_size: true,
            shade_step: None,
        });
    let zoom = ZoomConfig::try_new(6.0, 9.0, 0.5)?;
    let modes = [
        ("ratio", VisibilityMode::Ratio),
        ("threshold", VisibilityMode::ZoomThreshold { threshold: 9.0 }),
    ];

    let out_dir = "lod-threshold-vs-ratio";
    fs::create_dir_all(out_dir)?;

    for (name, mode) in modes {
        let config = LodConfig::new(zoom).with_mode(mode).with_style(style.clone());
        let mut engine = LodEngine::new(config, Label::level_of)?;
        engine.on_data_changed(labels.clone())?;

        let mut canvas = DotCanvas::new(RenderConfig::new((600, 600), spec.extent * 1.2));
        for step in 0..=12 {
            let z = 5.5 + step as f64 * 0.333;
            canvas.clear();
            let mut sink = VecSink::new();
            let drawn = engine.render_with_events(z, &mut canvas, &mut sink);
            let ids: Vec<String> = drawn.iter().map(|d| d.id.to_string()).collect();
            info!(
                "{name} zoom {z:5.2}: {} ({} events)",
                ids.join(", "),
                sink.len()
            );
            canvas.save(format!("{out_dir}/{name}-{step:02}.png"))?;
        }
    }

    Ok(())
}
