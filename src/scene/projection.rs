//! Camera projection and the per-frame draw list.
//!
//! The scene graph is flattened into screen-space primitives in normalized
//! device coordinates (x right, y up, both in [-1, 1] across the surface).
//! The GUI only has to turn these into plot items.

use nalgebra::{Isometry3, Perspective3, Point3, Vector3};

use super::camera::Camera;
use super::color::Color;
use super::graph::{NodeKind, SceneGraph, SpriteContent};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub ndc: [f64; 2],
    pub depth: f64,               // distance along the view axis
}

pub struct Projector {
    view: Isometry3<f64>,
    perspective: Perspective3<f64>,
    near: f64,
    far: f64,
    half_height: f64,             // tan(fov / 2)
}

impl Projector {
    pub fn new(camera: &Camera, target: &Vector3<f64>) -> Self {
        let eye = Point3::from(camera.position);
        let mut at = Point3::from(*target);
        if (at - eye).norm() < 1e-9 {
            at = eye - Vector3::z();
        }
        let forward = (at - eye).normalize();
        let up = if forward.cross(&Vector3::y()).norm() < 1e-9 {
            Vector3::z()
        } else {
            Vector3::y()
        };
        Self {
            view: Isometry3::look_at_rh(&eye, &at, &up),
            perspective: Perspective3::new(camera.aspect, camera.fov_y, camera.near, camera.far),
            near: camera.near,
            far: camera.far,
            half_height: (camera.fov_y * 0.5).tan(),
        }
    }

    /// `None` when the point is behind the camera or outside the clip range.
    pub fn project(&self, p: &Vector3<f64>) -> Option<Projected> {
        let in_view = self.view.transform_point(&Point3::from(*p));
        let depth = -in_view.z;
        if depth < self.near || depth > self.far {
            return None;
        }
        let ndc = self.perspective.project_point(&in_view);
        Some(Projected { ndc: [ndc.x, ndc.y], depth })
    }

    /// Vertical NDC extent of a world-space length at the given depth.
    pub fn ndc_size(&self, length: f64, depth: f64) -> f64 {
        if depth <= 0.0 {
            return 0.0;
        }
        length / (depth * self.half_height)
    }
}

// ---------------------------------------------------------------------------
// Draw list
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum DrawItem {
    Stars { points: Vec<[f64; 2]>, color: Color, size: f32 },
    Line { points: Vec<[f64; 2]>, color: Color, opacity: f32 },
    Disc { center: [f64; 2], radius: f64, color: Color, depth: f64 },
    Glow { center: [f64; 2], radius: f64, color: Color, depth: f64 },
    Label { at: [f64; 2], text: String, height: f64 },
}

/// Flatten every rendered node. Order: stars, lines, discs and glows far to
/// near, then labels on top.
pub fn draw_list(graph: &SceneGraph, camera: &Camera, target: &Vector3<f64>) -> Vec<DrawItem> {
    let projector = Projector::new(camera, target);
    let mut background = Vec::new();
    let mut lines = Vec::new();
    let mut solids: Vec<DrawItem> = Vec::new();
    let mut labels = Vec::new();

    for (id, node) in graph.iter() {
        if !graph.is_rendered(id) {
            continue;
        }
        let Some(origin) = graph.world_position(id) else {
            continue;
        };
        match &node.kind {
            NodeKind::Points(cloud) => {
                let points = cloud
                    .points
                    .iter()
                    .filter_map(|p| projector.project(&(origin + p)))
                    .map(|p| p.ndc)
                    .collect();
                background.push(DrawItem::Stars { points, color: cloud.color, size: cloud.size });
            }
            NodeKind::Line(line) => {
                // Split wherever a vertex leaves the clip range.
                let mut run: Vec<[f64; 2]> = Vec::new();
                for p in &line.points {
                    match projector.project(&(origin + p)) {
                        Some(pr) => run.push(pr.ndc),
                        None if run.len() > 1 => lines.push(DrawItem::Line {
                            points: std::mem::take(&mut run),
                            color: line.color,
                            opacity: line.opacity,
                        }),
                        None => run.clear(),
                    }
                }
                if run.len() > 1 {
                    lines.push(DrawItem::Line { points: run, color: line.color, opacity: line.opacity });
                }
            }
            NodeKind::Sphere(sphere) => {
                if let Some(pr) = projector.project(&origin) {
                    solids.push(DrawItem::Disc {
                        center: pr.ndc,
                        radius: projector.ndc_size(sphere.radius, pr.depth),
                        color: sphere.color,
                        depth: pr.depth,
                    });
                }
            }
            NodeKind::Sprite(sprite) => {
                let Some(pr) = projector.project(&origin) else {
                    continue;
                };
                match &sprite.content {
                    SpriteContent::Glow => solids.push(DrawItem::Glow {
                        center: pr.ndc,
                        radius: projector.ndc_size(sprite.scale.x * 0.5, pr.depth),
                        color: sprite.color,
                        depth: pr.depth,
                    }),
                    SpriteContent::Label(text) => labels.push(DrawItem::Label {
                        at: pr.ndc,
                        text: text.clone(),
                        height: projector.ndc_size(sprite.scale.y, pr.depth),
                    }),
                }
            }
            NodeKind::Group | NodeKind::Light(_) => {}
        }
    }

    solids.sort_by(|a, b| depth_of(b).total_cmp(&depth_of(a)));

    background.extend(lines);
    background.extend(solids);
    background.extend(labels);
    background
}

fn depth_of(item: &DrawItem) -> f64 {
    match item {
        DrawItem::Disc { depth, .. } | DrawItem::Glow { depth, .. } => *depth,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraSettings;
    use crate::scene::graph::{Polyline, Sphere};

    fn camera_at(pos: Vector3<f64>) -> Camera {
        let mut cam = Camera::new(&CameraSettings::default(), 1.0);
        cam.position = pos;
        cam
    }

    #[test]
    fn target_projects_to_centre() {
        let cam = camera_at(Vector3::new(0.0, 100.0, 200.0));
        let proj = Projector::new(&cam, &Vector3::zeros());
        let p = proj.project(&Vector3::zeros()).unwrap();
        assert!(p.ndc[0].abs() < 1e-9 && p.ndc[1].abs() < 1e-9);
        assert!((p.depth - (100.0_f64.powi(2) + 200.0_f64.powi(2)).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn points_behind_camera_are_dropped() {
        let cam = camera_at(Vector3::new(0.0, 0.0, 10.0));
        let proj = Projector::new(&cam, &Vector3::zeros());
        assert!(proj.project(&Vector3::new(0.0, 0.0, 20.0)).is_none());
        assert!(proj.project(&Vector3::new(0.0, 0.0, -5.0)).is_some());
    }

    #[test]
    fn right_of_target_is_positive_x() {
        let cam = camera_at(Vector3::new(0.0, 0.0, 10.0));
        let proj = Projector::new(&cam, &Vector3::zeros());
        let p = proj.project(&Vector3::new(1.0, 1.0, 0.0)).unwrap();
        assert!(p.ndc[0] > 0.0 && p.ndc[1] > 0.0);
    }

    #[test]
    fn hidden_nodes_are_not_drawn_and_discs_sort_far_to_near() {
        let mut g = SceneGraph::new();
        let sphere = |r: f64| {
            NodeKind::Sphere(Sphere {
                radius: r,
                color: Color::WHITE,
            })
        };
        g.add(g.root(), "near", sphere(1.0), Vector3::new(0.0, 0.0, 5.0));
        g.add(g.root(), "far", sphere(1.0), Vector3::new(0.0, 0.0, -5.0));
        let ring = g.add(
            g.root(),
            "ring",
            NodeKind::Line(Polyline {
                points: vec![Vector3::zeros(), Vector3::x()],
                color: Color::WHITE,
                opacity: 0.5,
            }),
            Vector3::zeros(),
        );
        g.set_visible(ring, false);

        let cam = camera_at(Vector3::new(0.0, 0.0, 20.0));
        let items = draw_list(&g, &cam, &Vector3::zeros());
        assert!(items.iter().all(|i| !matches!(i, DrawItem::Line { .. })));
        let depths: Vec<f64> = items.iter().map(depth_of).collect();
        assert_eq!(depths.len(), 2);
        assert!(depths[0] > depths[1], "far disc first: {:?}", depths);
    }
}
