#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("entry {index} ({label:?}) has quadrant {quadrant}, expected 0..=3")]
    QuadrantOutOfRange {
        index: usize,
        label: String,
        quadrant: usize,
    },
    #[error("entry {index} ({label:?}) has ring {ring}, expected 0..=2")]
    RingOutOfRange {
        index: usize,
        label: String,
        ring: usize,
    },
    #[error("radar needs exactly 4 quadrants, config defines {found}")]
    QuadrantCount { found: usize },
    #[error("radar needs exactly 3 rings, config defines {found}")]
    RingCount { found: usize },
    #[error("zoomed quadrant {0} is out of range, expected 0..=3")]
    ZoomedQuadrant(usize),
    #[error("failed to parse radar config as {format}: {message}")]
    Config {
        format: &'static str,
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
