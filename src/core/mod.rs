pub mod domain;
pub mod scale;
pub mod ticks;
pub mod types;

pub use domain::{Domain, ForcedDomain};
pub use scale::{AxisScale, BandScale, LinearScale, LogScale};
pub use types::{BoundingBox, Color, Margin, Viewport};
