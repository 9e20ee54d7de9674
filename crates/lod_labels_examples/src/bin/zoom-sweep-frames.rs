use std::fs;

use lod_labels::prelude::*;
use lod_labels_examples::{init_tracing, DotCanvas, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Base blobs plus six coarser k-means levels.
    let spec = HierarchySpec::default();
    let mut rng = StdRng::seed_from_u64(42);
    let labels = generate_hierarchy(&spec, &mut rng)?;

    let style = LabelStyle::default()
        .with_color([235, 235, 235, 255])
        .with_level_styling(LevelStyling {
            grow_size: true,
            shade_step: None,
        });
    let config = LodConfig::new(ZoomConfig::try_new(3.0, 9.0, 0.5)?).with_style(style);
    let mut engine = LodEngine::new(config, Label::level_of)?;
    let levels = engine.on_data_changed(labels)?;
    info!("Bucket sizes: {:?}.", levels.bucket_sizes());

    let out_dir = "lod-zoom-sweep";
    fs::create_dir_all(out_dir)?;

    let render_config =
        RenderConfig::new((800, 800), spec.extent * 1.2).with_base_radius(1.5);
    let mut canvas = DotCanvas::new(render_config);

    // Sweep from zoomed out past min_zoom to zoomed in past max_zoom.
    for step in 0..=32 {
        let zoom = 2.0 + step as f64 * 0.25;
        canvas.clear();
        let drawn = engine.render(zoom, &mut canvas);
        for bucket in &drawn {
            info!(
                "zoom {:5.2}: {} x{} at opacity {:.2}",
                zoom, bucket.id, bucket.labels, bucket.opacity
            );
        }
        canvas.save(format!("{out_dir}/frame-{step:02}.png"))?;
    }

    info!("Wrote frames to '{}'.", out_dir);
    Ok(())
}
