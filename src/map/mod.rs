mod geometry;
mod projection;
mod renderer;
mod spatial;

pub use geometry::{Polygon, Ring};
pub use projection::{cell_to_pixel, Viewport};
pub use renderer::{DisplaySettings, MapLayers, MapRenderer, Region};
