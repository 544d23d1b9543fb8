pub mod collision;
pub mod geometry;
pub mod layout;
pub mod legend;
pub mod ordering;
pub mod random;
pub mod render;
pub mod segment;
pub mod types;

pub use collision::{Outcome, Simulation, SimulationParams};
pub use geometry::{Point, Polar};
pub use layout::{LayoutPass, RadarLayout, layout_radar};
pub use legend::{Legend, LegendBlock, LegendLine, WrapOptions, layout_legend, wrap_text};
pub use ordering::{Buckets, LabelOrder, case_insensitive};
pub use random::SineRandom;
pub use render::render_svg;
pub use segment::{RadarGeometry, Segment};
pub use types::{BlipShape, Entry, Moved, PlacedEntry};
