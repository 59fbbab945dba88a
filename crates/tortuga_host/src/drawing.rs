use std::collections::BTreeMap;

use kurbo::{Affine, BezPath, PathEl, Point, Rect, Shape, Vec2};
use svg::node::element::{path::Data, Path};
use svg::Document;
use tortuga::Sink;

const COLORS: &[&str] = &[
    "black",
    "crimson",
    "royalblue",
    "forestgreen",
    "darkorange",
    "purple",
];

#[derive(Default)]
struct Track {
    pos: Point,
    heading: f64,
    path: BezPath,
    // Where the current subpath ends, if the pen hasn't been lifted since.
    pen_at: Option<Point>,
}

/// Draws every agent's trail as an SVG path.
///
/// Agents are assumed to start at the origin facing along +x, which is where new agents are
/// created.
#[derive(Default)]
pub struct SvgSink {
    tracks: BTreeMap<String, Track>,
}

fn data(path: &BezPath) -> Data {
    let mut d = Data::new();
    for el in path.elements() {
        d = match *el {
            PathEl::MoveTo(p) => d.move_to((p.x, p.y)),
            PathEl::LineTo(p) => d.line_to((p.x, p.y)),
            PathEl::QuadTo(c, p) => d.quadratic_curve_to((c.x, c.y, p.x, p.y)),
            PathEl::CurveTo(c1, c2, p) => d.cubic_curve_to((c1.x, c1.y, c2.x, c2.y, p.x, p.y)),
            PathEl::ClosePath => d.close(),
        };
    }
    d
}

// A little triangle showing where the agent is and which way it faces.
fn marker(pos: Point, heading: f64, size: f64) -> BezPath {
    let dir = Vec2::from_angle(heading) * size;
    let side = Vec2::new(-dir.y, dir.x) * 0.5;
    let mut path = BezPath::new();
    path.move_to(pos + dir);
    path.line_to(pos - dir * 0.5 + side);
    path.line_to(pos - dir * 0.5 - side);
    path.close_path();
    path
}

impl SvgSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The trail left so far by `agent`, in script coordinates (y up).
    pub fn path(&self, agent: &str) -> Option<&BezPath> {
        self.tracks.get(agent).map(|t| &t.path)
    }

    /// The smallest rectangle containing every trail and every agent's current position.
    pub fn bounding_box(&self) -> Option<Rect> {
        self.tracks
            .values()
            .flat_map(|t| {
                let here = Rect::from_points(t.pos, t.pos);
                let trail = (!t.path.elements().is_empty()).then(|| t.path.bounding_box());
                std::iter::once(here).chain(trail)
            })
            .reduce(|a, b| a.union(b))
    }

    pub fn document(&self) -> Document {
        // Scripts are y-up, svg is y-down.
        let flip = Affine::scale_non_uniform(1.0, -1.0);
        let bbox = self
            .bounding_box()
            .map(|r| flip.transform_rect_bbox(r))
            .unwrap_or(Rect::new(-1.0, -1.0, 1.0, 1.0));
        let size = bbox.width().max(bbox.height()).max(1.0);
        let view = bbox.inflate(size * 0.05, size * 0.05);
        let stroke = size / 400.0;

        let mut doc = Document::new().set(
            "viewBox",
            (view.x0, view.y0, view.width(), view.height()),
        );
        for (i, (name, track)) in self.tracks.iter().enumerate() {
            let color = COLORS[i % COLORS.len()];
            if !track.path.elements().is_empty() {
                let mut trail = track.path.clone();
                trail.apply_affine(flip);
                doc = doc.add(
                    Path::new()
                        .set("id", name.as_str())
                        .set("fill", "none")
                        .set("stroke", color)
                        .set("stroke-width", stroke)
                        .set("d", data(&trail)),
                );
            }
            let mut m = marker(track.pos, track.heading, stroke * 8.0);
            m.apply_affine(flip);
            doc = doc.add(Path::new().set("fill", color).set("d", data(&m)));
        }
        doc
    }

    pub fn save(&self, path: impl AsRef<std::path::Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        svg::save(path, &self.document())?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

impl Sink for SvgSink {
    fn move_by(&mut self, agent: &str, delta: Vec2, pen_down: bool) -> anyhow::Result<()> {
        let track = self.tracks.entry(agent.to_owned()).or_default();
        let to = track.pos + delta;
        if pen_down {
            if track.pen_at != Some(track.pos) {
                track.path.move_to(track.pos);
            }
            track.path.line_to(to);
            track.pen_at = Some(to);
        } else {
            track.pen_at = None;
        }
        track.pos = to;
        Ok(())
    }

    fn rotate_by(&mut self, agent: &str, delta: f64) -> anyhow::Result<()> {
        let track = self.tracks.entry(agent.to_owned()).or_default();
        track.heading += delta;
        Ok(())
    }
}
