use serde::Serialize;

use crate::config::RadarConfig;
use crate::error::{Error, Result};

use super::collision::{Outcome, Simulation, SimulationParams};
use super::geometry::Point;
use super::ordering::{Buckets, LabelOrder, assign_ids, case_insensitive};
use super::random::SineRandom;
use super::segment::{RadarGeometry, Segment, SegmentTable};
use super::types::{BlipShape, Entry, PlacedEntry};

/// Result of a finished layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarLayout {
    /// One record per input entry, in input order.
    pub entries: Vec<PlacedEntry>,
    pub buckets: Buckets,
    pub outcome: Outcome,
}

impl RadarLayout {
    pub fn entry_by_id(&self, id: usize) -> Option<&PlacedEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

/// Resolve the segment of every entry, failing on the first out-of-range index.
pub fn entry_segments(entries: &[Entry], table: &SegmentTable) -> Result<Vec<Segment>> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            if entry.quadrant >= 4 {
                return Err(Error::QuadrantOutOfRange {
                    index,
                    label: entry.label.clone(),
                    quadrant: entry.quadrant,
                });
            }
            table
                .get(entry.quadrant, entry.ring)
                .copied()
                .ok_or_else(|| Error::RingOutOfRange {
                    index,
                    label: entry.label.clone(),
                    ring: entry.ring,
                })
        })
        .collect()
}

/// Initial random position of every entry inside its segment, drawn in input order.
pub fn initial_positions(segments: &[Segment], rng: &mut SineRandom) -> Vec<Point> {
    segments.iter().map(|segment| segment.sample(rng)).collect()
}

/// One layout pass over a radar: placement, numbering, then collision relaxation.
///
/// The pass can be driven tick by tick (for animated settling) or run to completion.
pub struct LayoutPass {
    placed: Vec<PlacedEntry>,
    buckets: Buckets,
    simulation: Simulation,
}

impl LayoutPass {
    pub fn new(config: &RadarConfig) -> Result<Self> {
        Self::with_options(
            config,
            &RadarGeometry::default(),
            case_insensitive,
            config.simulation_params(),
        )
    }

    pub fn with_options(
        config: &RadarConfig,
        geometry: &RadarGeometry,
        order: LabelOrder,
        params: SimulationParams,
    ) -> Result<Self> {
        config.validate()?;
        let entries = &config.entries;

        let table = geometry.segments();
        let segments = entry_segments(entries, &table)?;

        let mut rng = SineRandom::new(config.seed);
        let positions = initial_positions(&segments, &mut rng);
        tracing::debug!(entries = entries.len(), seed = config.seed, "placed entries");

        let buckets = Buckets::partition(entries, order);
        let ids = assign_ids(&buckets, entries.len());

        let placed = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| PlacedEntry {
                index,
                id: ids[index],
                quadrant: entry.quadrant,
                ring: entry.ring,
                position: positions[index],
                color: config.entry_color(entry).to_string(),
                shape: BlipShape::from(entry.moved),
            })
            .collect();

        let simulation = Simulation::new(positions.into_iter().zip(segments), params);

        Ok(Self {
            placed,
            buckets,
            simulation,
        })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn buckets(&self) -> &Buckets {
        &self.buckets
    }

    pub fn is_finished(&self) -> bool {
        self.simulation.is_finished()
    }

    /// One relaxation step; returns the clipped positions in input order.
    pub fn tick(&mut self) -> Vec<Point> {
        let positions = self.simulation.tick();
        for (entry, position) in self.placed.iter_mut().zip(&positions) {
            entry.position = *position;
        }
        positions
    }

    /// Current state of the pass, whether or not relaxation has finished.
    pub fn snapshot(&self) -> RadarLayout {
        RadarLayout {
            entries: self.placed.clone(),
            buckets: self.buckets.clone(),
            outcome: Outcome {
                ticks: self.simulation.ticks(),
                settled: self.simulation.is_settled(),
            },
        }
    }

    /// Relax to completion and hand back the final layout.
    pub fn run(mut self) -> RadarLayout {
        let outcome = self.simulation.run();
        for (entry, particle) in self.placed.iter_mut().zip(self.simulation.particles()) {
            entry.position = particle.position;
        }
        tracing::debug!(
            ticks = outcome.ticks,
            settled = outcome.settled,
            "layout pass finished"
        );

        RadarLayout {
            entries: self.placed,
            buckets: self.buckets,
            outcome,
        }
    }
}

/// Lay out every entry of `config` with the default geometry and collation.
pub fn layout_radar(config: &RadarConfig) -> Result<RadarLayout> {
    Ok(LayoutPass::new(config)?.run())
}
