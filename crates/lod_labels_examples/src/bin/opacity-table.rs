use lod_labels::prelude::*;
use lod_labels_examples::init_tracing;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let labels: Vec<Label> = (0..=4u32)
        .map(|level| Label::new([0.0, 0.0], level, format!("level-{level}")))
        .collect();

    for fade_rate in [0.25f32, 0.5, 1.0] {
        let config = LodConfig::new(ZoomConfig::try_new(4.0, 8.0, fade_rate)?);
        let mut engine = LodEngine::new(config, Label::level_of)?;
        engine.on_data_changed(labels.clone())?;

        info!("fade_rate = {fade_rate}");
        for step in 0..=24 {
            let zoom = 3.0 + step as f64 * 0.25;
            let frame = engine.evaluate(zoom);
            let row: Vec<String> = frame
                .buckets()
                .iter()
                .map(|b| {
                    if b.visible {
                        format!("{:4.2}", b.opacity)
                    } else {
                        "  - ".to_owned()
                    }
                })
                .collect();
            info!(
                "zoom {:5.2} ratio {:6.3} | {}",
                zoom,
                frame.ratio(),
                row.join(" ")
            );
        }
    }

    Ok(())
}
