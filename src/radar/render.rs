use std::f64::consts::PI;

use crate::config::RadarConfig;
use crate::xml::escape_xml;

use super::layout::RadarLayout;
use super::legend::{LEGEND_FONT_SIZE, Legend};
use super::segment::{QUADRANTS, RADAR_RADIUS, RINGS};
use super::types::{BlipShape, Entry, PlacedEntry};

const BLIP_RADIUS: f64 = 11.0;
const STAR_SIZE: f64 = 400.0;
const RING_FILL_OPACITY: f64 = 0.08;

/// Drawing area and transform of the radar, honoring `zoomed_quadrant`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub view_box: Option<[f64; 4]>,
    pub transform: Option<String>,
}

impl Frame {
    pub fn from_config(config: &RadarConfig) -> Self {
        let width = config.width * config.scale;
        let height = config.height * config.scale;
        let view_box = config.zoomed_quadrant.and_then(zoomed_view_box);
        let transform = view_box.is_none().then(|| {
            format!(
                "translate({},{}) scale({})",
                fmt_num(width / 2.0),
                fmt_num(height / 2.0),
                fmt_num(config.scale)
            )
        });

        Self {
            width,
            height,
            view_box,
            transform,
        }
    }
}

/// View box framing one quadrant with a 20 unit border.
pub fn zoomed_view_box(quadrant: usize) -> Option<[f64; 4]> {
    let q = QUADRANTS.get(quadrant)?;
    let c = RADAR_RADIUS;
    Some([
        (q.factor_x * c).max(0.0) - c - 20.0,
        (q.factor_y * c).max(0.0) - c - 20.0,
        c + 40.0,
        c + 40.0,
    ])
}

/// Text printed inside a blip: its id on print layouts, otherwise the label's first letter.
pub fn blip_text(entry: &Entry, placed: &PlacedEntry, print_layout: bool) -> Option<String> {
    if !(entry.active || print_layout) {
        return None;
    }
    if print_layout {
        Some(placed.id.to_string())
    } else {
        entry
            .label
            .chars()
            .find(char::is_ascii_alphabetic)
            .map(String::from)
    }
}

/// Path of a five-pointed star covering `size` square units.
pub fn star_path(size: f64) -> String {
    let ka = 0.890_813_091_529_285_2;
    let kr = (PI / 10.0).sin() / (7.0 * PI / 10.0).sin();
    let kx = (2.0 * PI / 10.0).sin() * kr;
    let ky = -(2.0 * PI / 10.0).cos() * kr;

    let r = (size * ka).sqrt();
    let x = kx * r;
    let y = ky * r;

    let mut d = format!("M{},{}L{},{}", fmt_num(0.0), fmt_num(-r), fmt_num(x), fmt_num(y));
    for i in 1..5 {
        let a = 2.0 * PI * i as f64 / 5.0;
        let (s, c) = a.sin_cos();
        d.push_str(&format!(
            "L{},{}L{},{}",
            fmt_num(s * r),
            fmt_num(-c * r),
            fmt_num(c * x - s * y),
            fmt_num(s * x + c * y)
        ));
    }
    d.push('Z');
    d
}

/// Render a finished layout and its legend to a standalone SVG document.
pub fn render_svg(config: &RadarConfig, layout: &RadarLayout, legend: &Legend) -> String {
    let frame = Frame::from_config(config);
    let mut svg = String::new();

    let view_box = frame
        .view_box
        .map(|v| {
            format!(
                r#" viewBox="{} {} {} {}""#,
                fmt_num(v[0]),
                fmt_num(v[1]),
                fmt_num(v[2]),
                fmt_num(v[3])
            )
        })
        .unwrap_or_default();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}"{} style="background-color: {}">"#,
        fmt_num(frame.width),
        fmt_num(frame.height),
        view_box,
        escape_xml(&config.colors.background)
    ));

    match &frame.transform {
        Some(transform) => {
            svg.push_str(&format!(r#"<g transform="{transform}">"#));
        }
        None => svg.push_str("<g>"),
    }

    render_grid(&mut svg, config);
    if config.print_layout {
        render_titles(&mut svg, config);
        render_legend(&mut svg, config, legend);
    }
    render_blips(&mut svg, config, layout);

    svg.push_str("</g></svg>");
    svg
}

fn render_grid(svg: &mut String, config: &RadarConfig) {
    let c = fmt_num(RADAR_RADIUS);
    let grid = escape_xml(&config.colors.grid);
    svg.push_str("<g>");
    svg.push_str(&format!(
        r#"<line x1="0" y1="-{c}" x2="0" y2="{c}" stroke="{grid}" stroke-width="1"/><line x1="-{c}" y1="0" x2="{c}" y2="0" stroke="{grid}" stroke-width="1"/>"#
    ));

    for (i, (ring, ring_config)) in RINGS.iter().zip(&config.rings).enumerate() {
        let color = escape_xml(&ring_config.color);
        svg.push_str(&format!(
            r#"<circle cx="0" cy="0" r="{}" fill="{color}" fill-opacity="{RING_FILL_OPACITY}" stroke="{grid}" stroke-width="1"/>"#,
            fmt_num(ring.radius)
        ));

        if config.print_layout {
            svg.push_str(&format!(
                r##"<path id="ringPath{i}" d="{}" fill="none" stroke="none"/><text font-family="{}" font-size="30px" font-weight="bold" fill="{color}" opacity="0.5" text-anchor="middle"><textPath xlink:href="#ringPath{i}" startOffset="50%">{}</textPath></text>"##,
                ring_label_arc(ring.radius - 40.0),
                escape_xml(&config.font_family),
                escape_xml(&ring_config.name)
            ));
        }
    }

    for ring in &RINGS {
        svg.push_str(&format!(
            r#"<circle cx="0" cy="0" r="{}" fill="none" stroke="{grid}" stroke-width="1"/>"#,
            fmt_num(ring.radius)
        ));
    }
    svg.push_str("</g>");
}

/// Arc across the top of a ring, from -60° to +60° measured clockwise from 12 o'clock.
fn ring_label_arc(radius: f64) -> String {
    let start = -PI / 3.0;
    let end = PI / 3.0;
    format!(
        "M{},{}A{},{} 0 0 1 {},{}",
        fmt_num(radius * start.sin()),
        fmt_num(-radius * start.cos()),
        fmt_num(radius),
        fmt_num(radius),
        fmt_num(radius * end.sin()),
        fmt_num(-radius * end.cos())
    )
}

fn render_titles(svg: &mut String, config: &RadarConfig) {
    let font = escape_xml(&config.font_family);
    let title = config.title_offset;
    let footer = config.footer_offset;

    svg.push_str(&format!(
        r#"<a href="{}" transform="translate({},{})"><text font-family="{font}" font-size="30" font-weight="bold">{}</text></a>"#,
        escape_xml(&config.repo_url),
        fmt_num(title.x),
        fmt_num(title.y),
        escape_xml(&config.title)
    ));
    svg.push_str(&format!(
        r##"<text transform="translate({},{})" font-family="{font}" font-size="14" fill="#999">{}</text>"##,
        fmt_num(title.x),
        fmt_num(title.y + 20.0),
        escape_xml(config.date.as_deref().unwrap_or(""))
    ));
    svg.push_str(&format!(
        r#"<text transform="translate({},{})" xml:space="preserve" font-family="{font}" font-size="12px">{}</text>"#,
        fmt_num(footer.x),
        fmt_num(footer.y),
        escape_xml(&config.footer)
    ));
}

fn render_legend(svg: &mut String, config: &RadarConfig, legend: &Legend) {
    let font = escape_xml(&config.font_family);
    svg.push_str("<g>");

    for quadrant in &legend.quadrants {
        svg.push_str(&format!(
            r#"<text transform="translate({},{})" font-family="{font}" font-size="18px" font-weight="bold">{}</text>"#,
            fmt_num(quadrant.title.x),
            fmt_num(quadrant.title.y),
            escape_xml(&quadrant.name)
        ));

        for ring in &quadrant.rings {
            svg.push_str(&format!(
                r#"<text transform="translate({},{})" font-family="{font}" font-size="12px" font-weight="bold" fill="{}">{}</text>"#,
                fmt_num(ring.header.x),
                fmt_num(ring.header.y),
                escape_xml(&ring.color),
                escape_xml(&ring.name)
            ));

            for item in &ring.items {
                let href = item.link.as_deref().unwrap_or("#");
                let target = if item.link.is_some() && config.links_in_new_tabs {
                    r#" target="_blank""#
                } else {
                    ""
                };
                svg.push_str(&format!(
                    r#"<a href="{}"{target}><text id="legendItem{}" class="legend{}{}" transform="translate({},{})" font-family="{font}" font-size="{}px">"#,
                    escape_xml(href),
                    item.id,
                    quadrant.quadrant,
                    ring.ring,
                    fmt_num(item.origin.x),
                    fmt_num(item.origin.y),
                    LEGEND_FONT_SIZE
                ));
                for line in &item.block.lines {
                    svg.push_str(&format!(
                        r#"<tspan x="{}" y="{}">{}</tspan>"#,
                        fmt_num(line.x),
                        fmt_num(line.y),
                        escape_xml(&line.text)
                    ));
                }
                svg.push_str("</text></a>");
            }
        }
    }

    svg.push_str("</g>");
}

fn render_blips(svg: &mut String, config: &RadarConfig, layout: &RadarLayout) {
    let font = escape_xml(&config.font_family);
    svg.push_str(r#"<g id="rink">"#);

    for placed in &layout.entries {
        let entry = &config.entries[placed.index];
        let color = escape_xml(&placed.color);
        svg.push_str(&format!(
            r#"<g class="blip" transform="translate({},{})">"#,
            fmt_num(placed.position.x),
            fmt_num(placed.position.y)
        ));

        let link = entry.link.as_deref().filter(|l| entry.active && !l.is_empty());
        if let Some(link) = link {
            let target = if config.links_in_new_tabs {
                r#" target="_blank""#
            } else {
                ""
            };
            svg.push_str(&format!(r#"<a xlink:href="{}"{target}>"#, escape_xml(link)));
        }

        svg.push_str(&format!("<title>{}</title>", escape_xml(&entry.label)));
        match placed.shape {
            BlipShape::TriangleUp => {
                svg.push_str(&format!(r#"<path d="M -11,5 11,5 0,-13 z" fill="{color}"/>"#));
            }
            BlipShape::TriangleDown => {
                svg.push_str(&format!(r#"<path d="M -11,-5 11,-5 0,13 z" fill="{color}"/>"#));
            }
            BlipShape::Star => {
                svg.push_str(&format!(r#"<path d="{}" fill="{color}"/>"#, star_path(STAR_SIZE)));
            }
            BlipShape::Circle => {
                svg.push_str(&format!(r#"<circle r="{BLIP_RADIUS}" fill="{color}"/>"#));
            }
        }

        if let Some(text) = blip_text(entry, placed, config.print_layout) {
            let font_size = if text.chars().count() > 2 { 8 } else { 9 };
            svg.push_str(&format!(
                r##"<text y="3" text-anchor="middle" fill="#fff" font-family="{font}" font-size="{font_size}px" pointer-events="none" style="user-select: none">{}</text>"##,
                escape_xml(&text)
            ));
        }

        if link.is_some() {
            svg.push_str("</a>");
        }
        svg.push_str("</g>");
    }

    svg.push_str("</g>");
}

/// Two decimals, trailing zeros trimmed.
fn fmt_num(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::TextMeasure;
    use crate::radar::geometry::Point;
    use crate::radar::layout::layout_radar;
    use crate::radar::legend::layout_legend;
    use crate::radar::types::Moved;
    use quick_xml::events::Event;
    use quick_xml::reader::Reader;

    struct FixedAdvance;

    impl TextMeasure for FixedAdvance {
        fn measure_text(&mut self, text: &str, font_size: f32, _is_bold: bool) -> (f32, f32) {
            (text.chars().count() as f32 * 6.0, font_size * 1.2)
        }
    }

    fn sample_config() -> RadarConfig {
        let mut star = Entry::new("Rust <2024>", 0, 0);
        star.moved = Moved::New;
        let mut down = Entry::new("Perl", 1, 2);
        down.moved = Moved::Regressed;
        down.link = Some("https://example.com/perl?a=1&b=2".to_string());
        RadarConfig {
            title: "Tech & Tools".to_string(),
            entries: vec![star, down, Entry::new("Kafka", 2, 1)],
            ..RadarConfig::default()
        }
    }

    fn count_elements(svg: &str, name: &[u8]) -> usize {
        let mut reader = Reader::from_str(svg);
        let mut count = 0;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == name => {
                    count += 1
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => panic!("invalid svg: {err}"),
            }
        }
        count
    }

    #[test]
    fn renders_well_formed_svg() {
        let config = sample_config();
        let layout = layout_radar(&config).expect("layout");
        let legend = layout_legend(&config, &layout, &mut FixedAdvance);
        let svg = render_svg(&config, &layout, &legend);

        assert!(svg.starts_with("<svg"));
        // Two ring passes plus the one unchanged blip.
        assert_eq!(count_elements(&svg, b"circle"), 3 + 3 + 1);
        assert_eq!(count_elements(&svg, b"title"), 3);
        assert!(svg.contains("Rust &lt;2024&gt;"));
        assert!(svg.contains("a=1&amp;b=2"));
        assert!(svg.contains(r#"translate(665,437.5) scale(1)"#));
    }

    #[test]
    fn zoomed_quadrant_uses_view_box() {
        assert_eq!(zoomed_view_box(0), Some([-20.0, -20.0, 390.0, 390.0]));
        assert_eq!(zoomed_view_box(2), Some([-370.0, -370.0, 390.0, 390.0]));
        assert_eq!(zoomed_view_box(4), None);

        let config = RadarConfig {
            zoomed_quadrant: Some(1),
            ..RadarConfig::default()
        };
        let frame = Frame::from_config(&config);
        assert_eq!(frame.view_box, Some([-370.0, -20.0, 390.0, 390.0]));
        assert!(frame.transform.is_none());
    }

    #[test]
    fn blip_text_depends_on_layout_mode() {
        let entry = Entry::new("42 things", 0, 0);
        let placed = PlacedEntry {
            index: 0,
            id: 117,
            quadrant: 0,
            ring: 0,
            position: Point::default(),
            color: "#000".to_string(),
            shape: BlipShape::Circle,
        };
        assert_eq!(blip_text(&entry, &placed, true).as_deref(), Some("117"));
        assert_eq!(blip_text(&entry, &placed, false).as_deref(), Some("t"));

        let inactive = Entry {
            active: false,
            ..entry
        };
        assert_eq!(blip_text(&inactive, &placed, false), None);
    }

    #[test]
    fn star_path_is_closed_with_ten_points() {
        let d = star_path(STAR_SIZE);
        assert!(d.starts_with("M0,"));
        assert!(d.ends_with('Z'));
        assert_eq!(d.matches('L').count(), 9);
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(437.5), "437.5");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(12.0), "12");
        assert_eq!(fmt_num(-3.456), "-3.46");
    }
}
