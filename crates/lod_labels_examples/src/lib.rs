#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, DotCanvas, DrawnBucket, RenderConfig};
