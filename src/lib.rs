//! Technology radar layout: places labeled entries on a four-quadrant, three-ring diagram,
//! numbers them, relaxes collisions between blips, and wraps legend text.

pub mod config;
pub mod error;
pub mod fonts;
pub mod radar;
pub mod xml;

pub use config::RadarConfig;
pub use error::{Error, Result};
