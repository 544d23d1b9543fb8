use std::collections::HashSet;
use std::f64::consts::PI;

use proptest::prelude::*;
use techradar::RadarConfig;
use techradar::fonts::TextMeasure;
use techradar::radar::geometry::{cartesian, polar};
use techradar::radar::legend::LEGEND_FONT_SIZE;
use techradar::radar::{
    Entry, LayoutPass, Point, Polar, RadarGeometry, SineRandom, WrapOptions, layout_radar,
    wrap_text,
};

/// Width grows with character count; wide letters count double.
struct CharWidths;

impl TextMeasure for CharWidths {
    fn measure_text(&mut self, text: &str, font_size: f32, _is_bold: bool) -> (f32, f32) {
        let width = text
            .chars()
            .map(|c| if c.is_ascii_uppercase() || c == 'm' || c == 'w' { 9.0 } else { 5.0 })
            .sum();
        (width, font_size * 1.2)
    }
}

fn entry_strategy() -> impl Strategy<Value = Entry> {
    ("[A-Za-z][A-Za-z0-9 ]{0,12}", 0usize..4, 0usize..3)
        .prop_map(|(label, q, r)| Entry::new(label, q, r))
}

proptest! {
    #[test]
    fn cartesian_polar_round_trip(x in -1000.0f64..1000.0, y in -1000.0f64..1000.0) {
        let back = cartesian(polar(Point::new(x, y)));
        prop_assert!((back.x - x).abs() < 1e-9);
        prop_assert!((back.y - y).abs() < 1e-9);
    }

    #[test]
    fn polar_cartesian_round_trip(theta in -3.1f64..3.1, r in 0.001f64..1000.0) {
        let back = polar(cartesian(Polar::new(theta, r)));
        prop_assert!((back.theta - theta).abs() < 1e-9);
        prop_assert!((back.r - r).abs() < 1e-9);
    }

    #[test]
    fn clip_lands_inside_every_segment(
        quadrant in 0usize..4,
        ring in 0usize..3,
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
    ) {
        let segment = RadarGeometry::default().segment(quadrant, ring).expect("segment");
        let q = polar(segment.clip(Point::new(x, y)));
        let (lo, hi) = segment.clip_radius_range();
        prop_assert!(q.r >= lo - 1e-6 && q.r <= hi + 1e-6, "r = {}", q.r);
        prop_assert!(q.theta >= segment.polar_min.theta - 1e-9);
        prop_assert!(q.theta <= segment.polar_max.theta + 1e-9);
    }

    #[test]
    fn samples_stay_in_unclipped_band(
        quadrant in 0usize..4,
        ring in 0usize..3,
        seed in 0u64..10_000,
    ) {
        let segment = RadarGeometry::default().segment(quadrant, ring).expect("segment");
        let mut rng = SineRandom::new(seed);
        let q = polar(segment.sample(&mut rng));
        let (min, max) = (segment.polar_min, segment.polar_max);
        prop_assert!(q.r >= min.r - 1e-9 && q.r <= max.r + 1e-9);
        // atan2 folds -π onto π on the negative x axis.
        let theta = if q.theta > max.theta + 1e-9 {
            q.theta - 2.0 * PI
        } else {
            q.theta
        };
        prop_assert!(theta >= min.theta - 1e-9 && theta <= max.theta + 1e-9);
    }

    #[test]
    fn ids_are_a_permutation(entries in prop::collection::vec(entry_strategy(), 0..40)) {
        let n = entries.len();
        let config = RadarConfig { entries, max_ticks: 1, ..RadarConfig::default() };
        let layout = layout_radar(&config).expect("layout");
        let ids: HashSet<usize> = layout.entries.iter().map(|e| e.id).collect();
        prop_assert_eq!(ids.len(), n);
        prop_assert_eq!(ids, (1..=n).collect::<HashSet<_>>());
    }

    #[test]
    fn reseeded_passes_start_identically(
        entries in prop::collection::vec(entry_strategy(), 1..20),
        seed in 0u64..1_000,
    ) {
        let config = RadarConfig { entries, seed, ..RadarConfig::default() };
        let a = LayoutPass::new(&config).expect("pass").snapshot();
        let b = LayoutPass::new(&config).expect("pass").snapshot();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn wrapped_lines_fit_except_unbreakable_ones(
        words in prop::collection::vec("[a-zA-Z]{1,14}", 1..16),
        id in 1usize..200,
        column_width in 40.0f64..260.0,
    ) {
        let label = words.join(" ");
        let options = WrapOptions { column_width, line_height: 10.0, font_size: LEGEND_FONT_SIZE };
        let mut measure = CharWidths;
        let block = wrap_text(&mut measure, id, &label, &options);

        for (n, line) in block.lines.iter().enumerate() {
            let width = f64::from(measure.measure_text(&line.text, LEGEND_FONT_SIZE, false).0);
            let word_count = line.text.split_whitespace().count();
            let unbreakable = word_count == 1 || (n == 0 && word_count == 2);
            prop_assert!(width <= column_width || unbreakable, "{:?} is {} wide", line.text, width);
        }

        let rejoined: Vec<&str> = block
            .lines
            .iter()
            .flat_map(|l| l.text.split_whitespace())
            .collect();
        let expected: Vec<String> = std::iter::once(format!("{id}."))
            .chain(words.iter().cloned())
            .collect();
        prop_assert_eq!(rejoined, expected.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
