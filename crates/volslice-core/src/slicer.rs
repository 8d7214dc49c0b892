//! View-aligned slicing of the bounding cube.
//!
//! For every depth in `[min_depth, max_depth)` a plane perpendicular to the
//! view axis is intersected with the twelve cube edges. The intersection
//! polygon is ordered by angle and triangulated as a fan around its centroid,
//! so the whole stack can be drawn as one triangle list with alpha blending.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::cube::CubeGeometry;
use crate::mesh::{OutputMesh, SliceVertex};
use crate::view::ViewSpaceCube;

/// Default distance between slicing planes (200 planes across a unit depth).
pub const DEFAULT_SLICE_STEP: f32 = 0.005;

/// Most distinct corners a plane section of a cube can have.
pub const MAX_POLYGON_VERTICES: usize = 6;

/// Upper bound on the planes of one slicing pass.
pub const MAX_SLICE_PLANES: usize = 1 << 16;

/// Smallest step accepted by configuration.
///
/// A unit cube spans at most `sqrt(3)` in depth, so this stays below
/// [`MAX_SLICE_PLANES`] for any rigid view.
pub const MIN_SLICE_STEP: f32 = 1e-4;

/// Below this length the direction to a vertex is undefined.
const ANGLE_EPSILON: f32 = 1e-7;

/// Order in which polygon corners wind around the slice, seen from the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Winding {
    /// Ascending angle; front-facing for a counter-clockwise rasterizer.
    #[default]
    CounterClockwise,
    /// Descending angle.
    Clockwise,
}

/// Order the slices are appended to the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SliceOrder {
    /// Farthest slice first (most negative view-space z), for over-compositing.
    #[default]
    BackToFront,
    /// Nearest slice first, for under-compositing.
    FrontToBack,
}

/// Point the polygon corners are sorted around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnglePivot {
    /// The centroid of the slice polygon.
    #[default]
    Centroid,
    /// The view axis, i.e. the angle of the view-space position itself.
    /// Only orders the polygon correctly while the view axis pierces it.
    ViewAxis,
}

/// Per-frame slicing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceSettings {
    /// Distance between consecutive slicing planes in view space.
    pub step: f32,
    pub winding: Winding,
    pub order: SliceOrder,
    pub pivot: AnglePivot,
}

impl Default for SliceSettings {
    fn default() -> Self {
        Self {
            step: DEFAULT_SLICE_STEP,
            winding: Winding::default(),
            order: SliceOrder::default(),
            pivot: AnglePivot::default(),
        }
    }
}

impl SliceSettings {
    /// Settings with the given step and defaults otherwise.
    #[must_use]
    pub fn with_step(step: f32) -> Self {
        Self {
            step,
            ..Self::default()
        }
    }
}

/// Counters from one slicing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceStats {
    /// Planes visited.
    pub planes: usize,
    /// Planes that produced a polygon.
    pub slices: usize,
    /// Planes that crossed fewer than three edges.
    pub degenerate: usize,
    /// Triangles appended to the mesh.
    pub triangles: usize,
}

/// Depths of the slicing planes over `[min, max)`.
///
/// Each depth is `min + i * step`, so rounding does not accumulate along the
/// stack.
#[derive(Debug, Clone)]
pub struct SliceDepths {
    min: f32,
    max: f32,
    step: f32,
    front: usize,
    back: usize,
}

impl Iterator for SliceDepths {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.front == self.back {
            return None;
        }
        let depth = self.depth_at(self.front);
        self.front += 1;
        Some(depth)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for SliceDepths {
    fn next_back(&mut self) -> Option<f32> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.depth_at(self.back))
    }
}

impl ExactSizeIterator for SliceDepths {}

impl SliceDepths {
    /// Distance between consecutive planes.
    ///
    /// Larger than the requested step when that one would exceed
    /// [`MAX_SLICE_PLANES`] or fall below the float spacing of the depths.
    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    #[allow(clippy::cast_precision_loss)]
    fn depth_at(&self, index: usize) -> f32 {
        (self.min + index as f32 * self.step).min(self.max)
    }
}

/// Returns the plane depths for a half-open depth range.
///
/// There are `ceil((max - min) / step)` of them, at most
/// [`MAX_SLICE_PLANES`]. The step is widened when needed to stay within
/// that bound and to keep consecutive depths distinct in `f32`. A step that
/// is not a positive finite number, or an empty range, yields no planes.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn slice_depths(min: f32, max: f32, step: f32) -> SliceDepths {
    let extent = max - min;
    let valid = step > 0.0 && step.is_finite() && extent > 0.0 && extent.is_finite();
    if !valid {
        return SliceDepths {
            min,
            max,
            step,
            front: 0,
            back: 0,
        };
    }

    let spacing = min.abs().max(max.abs()) * f32::EPSILON * 4.0;
    let step = step
        .max(extent / MAX_SLICE_PLANES as f32)
        .max(spacing);
    let count = ((extent / step).ceil() as usize).min(MAX_SLICE_PLANES);
    SliceDepths {
        min,
        max,
        step,
        front: 0,
        back: count,
    }
}

/// Interpolation parameter of the plane `z = depth` along the edge `z1 -> z2`.
///
/// Returns `None` for an edge parallel to the plane or a plane outside the
/// edge's depth range; otherwise a value in `[0, 1]`. The range test is done
/// on the depths themselves, so a plane just past an endpoint is never
/// admitted by rounding in the division.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn edge_parameter(z1: f32, z2: f32, depth: f32) -> Option<f32> {
    if z1 == z2 {
        return None;
    }
    let (lo, hi) = if z1 < z2 { (z1, z2) } else { (z2, z1) };
    if !(lo <= depth && depth <= hi) {
        return None;
    }
    Some(((depth - z1) / (z2 - z1)).clamp(0.0, 1.0))
}

/// Intersects the plane `z = depth` with the edge `p1 -> p2`.
///
/// The position is interpolated in x and y and pinned to `depth` in z; the
/// texture coordinate is interpolated with the same parameter.
#[must_use]
pub fn intersect_edge(p1: Vec3, p2: Vec3, t1: Vec3, t2: Vec3, depth: f32) -> Option<SliceVertex> {
    let u = edge_parameter(p1.z, p2.z, depth)?;
    let position = Vec3::new(
        p1.x + (p2.x - p1.x) * u,
        p1.y + (p2.y - p1.y) * u,
        depth,
    );
    let tex_coord = t1 + (t2 - t1) * u;
    Some(SliceVertex::new(position, tex_coord))
}

/// Angle of `position` around `pivot` in the slicing plane.
///
/// A position on top of the pivot has no direction and sorts as angle 0.
#[must_use]
pub fn angle_key(position: Vec3, pivot: Vec3) -> f32 {
    let d: Vec2 = (position - pivot).truncate();
    if d.length_squared() < ANGLE_EPSILON * ANGLE_EPSILON {
        return 0.0;
    }
    d.y.atan2(d.x)
}

/// Arithmetic mean of positions and texture coordinates.
///
/// # Panics
///
/// Panics in debug builds if `polygon` is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(polygon: &[SliceVertex]) -> SliceVertex {
    debug_assert!(!polygon.is_empty());
    let (position, tex_coord) = polygon
        .iter()
        .fold((Vec3::ZERO, Vec3::ZERO), |(p, t), v| {
            (p + v.position(), t + v.tex_coord())
        });
    let n = polygon.len() as f32;
    SliceVertex::new(position / n, tex_coord / n)
}

/// Sorts polygon corners by angle around `pivot`.
///
/// Equal angles keep their incoming order.
pub fn order_polygon(polygon: &mut [SliceVertex], pivot: Vec3, winding: Winding) {
    polygon.sort_by(|a, b| {
        let angle_a = angle_key(a.position(), pivot);
        let angle_b = angle_key(b.position(), pivot);
        match winding {
            Winding::CounterClockwise => angle_a.total_cmp(&angle_b),
            Winding::Clockwise => angle_b.total_cmp(&angle_a),
        }
    });
}

/// Builds the slice mesh for one frame.
///
/// Holds the per-plane polygon buffer so a warm builder does not allocate.
#[derive(Debug, Clone)]
pub struct SliceBuilder {
    polygon: Vec<SliceVertex>,
}

impl Default for SliceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SliceBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            polygon: Vec::with_capacity(MAX_POLYGON_VERTICES),
        }
    }

    /// Slices `cube` and writes the triangle fans into `mesh`.
    ///
    /// `mesh` is cleared first. Planes crossing fewer than three edges are
    /// skipped. A plane through a cube corner keeps one point per edge, so
    /// coincident points collapse part of the fan to zero area.
    pub fn build(
        &mut self,
        geometry: &CubeGeometry,
        cube: &ViewSpaceCube,
        settings: &SliceSettings,
        mesh: &mut OutputMesh,
    ) -> SliceStats {
        mesh.clear();
        let mut stats = SliceStats::default();

        let depths = slice_depths(cube.min_depth(), cube.max_depth(), settings.step);
        if !(settings.step > 0.0 && settings.step.is_finite()) {
            log::warn!("slice step {} is not positive, no slices built", settings.step);
        } else if depths.step() > settings.step {
            log::warn!(
                "slice step {} raised to {} to bound the plane count",
                settings.step,
                depths.step()
            );
        }
        match settings.order {
            SliceOrder::BackToFront => {
                for depth in depths {
                    self.slice_plane(geometry, cube, settings, depth, mesh, &mut stats);
                }
            }
            SliceOrder::FrontToBack => {
                for depth in depths.rev() {
                    self.slice_plane(geometry, cube, settings, depth, mesh, &mut stats);
                }
            }
        }

        log::trace!(
            "sliced depth [{}, {}) into {} planes: {} slices, {} degenerate, {} triangles",
            cube.min_depth(),
            cube.max_depth(),
            stats.planes,
            stats.slices,
            stats.degenerate,
            stats.triangles
        );
        stats
    }

    fn slice_plane(
        &mut self,
        geometry: &CubeGeometry,
        cube: &ViewSpaceCube,
        settings: &SliceSettings,
        depth: f32,
        mesh: &mut OutputMesh,
        stats: &mut SliceStats,
    ) {
        stats.planes += 1;
        self.collect_intersections(geometry, cube, depth);

        if self.polygon.len() < 3 {
            stats.degenerate += 1;
            return;
        }

        let center = centroid(&self.polygon);
        let pivot = match settings.pivot {
            AnglePivot::Centroid => center.position(),
            AnglePivot::ViewAxis => Vec3::ZERO,
        };
        order_polygon(&mut self.polygon, pivot, settings.winding);

        mesh.push_fan(depth, &self.polygon, center);
        stats.slices += 1;
        stats.triangles += self.polygon.len();
    }

    /// Fills the polygon buffer with the edge crossings at `depth`.
    fn collect_intersections(&mut self, geometry: &CubeGeometry, cube: &ViewSpaceCube, depth: f32) {
        self.polygon.clear();
        let positions = cube.positions();
        let corners = geometry.corners();

        self.polygon.extend(geometry.edges().iter().filter_map(|edge| {
            intersect_edge(
                positions[edge.a],
                positions[edge.b],
                corners[edge.a].tex_coord,
                corners[edge.b].tex_coord,
                depth,
            )
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    fn build(view: Mat4, settings: &SliceSettings) -> (OutputMesh, SliceStats) {
        let geometry = CubeGeometry::unit();
        let cube = ViewSpaceCube::transform(&geometry, view);
        let mut mesh = OutputMesh::new();
        let stats = SliceBuilder::new().build(&geometry, &cube, settings, &mut mesh);
        (mesh, stats)
    }

    fn signed_area(tri: &[SliceVertex; 3]) -> f32 {
        let a = tri[0].position();
        let b = tri[1].position();
        let c = tri[2].position();
        (b - a).truncate().perp_dot((c - a).truncate()) * 0.5
    }

    #[test]
    fn test_slice_depths_count() {
        assert_eq!(slice_depths(-0.5, 0.5, 0.25).len(), 4);
        assert_eq!(slice_depths(0.0, 1.0, 0.3).len(), 4);
        assert_eq!(slice_depths(0.0, 1.0, 0.5).len(), 2);
    }

    #[test]
    fn test_slice_depths_values() {
        let depths: Vec<f32> = slice_depths(-0.5, 0.5, 0.25).collect();
        assert_eq!(depths, vec![-0.5, -0.25, 0.0, 0.25]);
        let reversed: Vec<f32> = slice_depths(-0.5, 0.5, 0.25).rev().collect();
        assert_eq!(reversed, vec![0.25, 0.0, -0.25, -0.5]);
    }

    #[test]
    fn test_slice_depths_rejects_bad_input() {
        assert_eq!(slice_depths(0.0, 1.0, 0.0).len(), 0);
        assert_eq!(slice_depths(0.0, 1.0, -0.1).len(), 0);
        assert_eq!(slice_depths(0.0, 1.0, f32::NAN).len(), 0);
        assert_eq!(slice_depths(0.0, 1.0, f32::INFINITY).len(), 0);
        assert_eq!(slice_depths(1.0, 1.0, 0.1).len(), 0);
        assert_eq!(slice_depths(2.0, 1.0, 0.1).len(), 0);
    }

    #[test]
    fn test_edge_parameter() {
        assert_eq!(edge_parameter(0.0, 0.0, 0.0), None);
        assert_eq!(edge_parameter(0.0, 2.0, 1.0), Some(0.5));
        assert_eq!(edge_parameter(2.0, 0.0, 0.5), Some(0.75));
        assert_eq!(edge_parameter(0.0, 2.0, 0.0), Some(0.0));
        assert_eq!(edge_parameter(0.0, 2.0, 2.0), Some(1.0));
        assert_eq!(edge_parameter(0.0, 2.0, 2.0001), None);
        assert_eq!(edge_parameter(0.0, 2.0, -0.0001), None);
        assert_eq!(edge_parameter(0.0, 2.0, f32::NAN), None);
    }

    #[test]
    fn test_intersect_edge_interpolates() {
        let v = intersect_edge(
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(2.0, 4.0, 1.0),
            Vec3::ZERO,
            Vec3::ONE,
            0.5,
        )
        .unwrap();
        assert_eq!(v.position, [1.5, 3.0, 0.5]);
        assert_eq!(v.tex_coord, [0.75, 0.75, 0.75]);
    }

    #[test]
    fn test_angle_key_zero_vector() {
        assert_eq!(angle_key(Vec3::new(1.0, 1.0, 3.0), Vec3::new(1.0, 1.0, 0.0)), 0.0);
        assert!((angle_key(Vec3::Y, Vec3::ZERO) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_order_polygon_winding() {
        let mut polygon: Vec<SliceVertex> = [
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
        .into_iter()
        .map(|p| SliceVertex::new(p, Vec3::ZERO))
        .collect();

        order_polygon(&mut polygon, Vec3::ZERO, Winding::CounterClockwise);
        let ys: Vec<f32> = polygon.iter().map(|v| v.position[1]).collect();
        assert_eq!(ys, vec![-1.0, 0.0, 1.0, 0.0]);
        assert_eq!(polygon[1].position[0], 1.0);

        order_polygon(&mut polygon, Vec3::ZERO, Winding::Clockwise);
        assert_eq!(polygon[0].position, [-1.0, 0.0, 0.0]);
        assert_eq!(polygon[1].position, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_identity_view_quarter_step() {
        let (mesh, stats) = build(Mat4::IDENTITY, &SliceSettings::with_step(0.25));

        assert_eq!(stats.planes, 4);
        assert_eq!(stats.slices, 4);
        assert_eq!(stats.degenerate, 0);
        assert_eq!(mesh.triangle_count(), 16);

        let depths: Vec<f32> = mesh.spans().iter().map(|s| s.depth).collect();
        assert_eq!(depths, vec![-0.5, -0.25, 0.0, 0.25]);

        for span in mesh.spans() {
            assert_eq!(span.polygon_len, 4);
            assert_eq!(span.triangle_count(), 4);
            // Normalized texture z runs 0..1 across the cube depth.
            let expected_w = span.depth + 0.5;
            for v in mesh.slice_vertices(span) {
                assert_eq!(v.position[2], span.depth);
                assert!((v.tex_coord[2] - expected_w).abs() < 1e-6);
                // Slice corners sit on the cube's depth edges.
                let corner = [v.position[0], v.position[1]];
                if corner != [0.0, 0.0] {
                    assert_eq!(corner[0].abs(), 0.5);
                    assert_eq!(corner[1].abs(), 0.5);
                    assert_eq!(v.tex_coord[0], corner[0] + 0.5);
                    assert_eq!(v.tex_coord[1], corner[1] + 0.5);
                }
            }
        }
    }

    #[test]
    fn test_flattened_view_is_empty() {
        let view = Mat4::from_scale(Vec3::new(1.0, 1.0, 0.0));
        let (mesh, stats) = build(view, &SliceSettings::with_step(0.01));
        assert!(mesh.is_empty());
        assert_eq!(stats.planes, 0);
    }

    #[test]
    fn test_plane_through_corner_keeps_slice() {
        // Rotated so a single corner is farthest; the first plane touches only it.
        let view = Mat4::from_rotation_x(0.6) * Mat4::from_rotation_y(0.8);
        let cube = ViewSpaceCube::transform(&CubeGeometry::unit(), view);
        let expected = ((cube.max_depth() - cube.min_depth()) / 0.1).ceil() as usize;
        assert_eq!(expected, 18);

        let (mesh, stats) = build(view, &SliceSettings::with_step(0.1));
        assert_eq!(stats.planes, expected);
        assert_eq!(stats.slices, expected);
        assert_eq!(stats.degenerate, 0);
        assert_eq!(mesh.slice_count(), expected);

        // Three edges meet at the corner; the fan collapses to a point.
        let first = mesh.spans()[0];
        assert_eq!(first.polygon_len, 3);
        let corner = cube.positions()[cube.min_index()];
        for v in mesh.slice_vertices(&first) {
            assert!((v.position() - corner).length() < 1e-5);
        }
    }

    #[test]
    fn test_plane_count_is_bounded() {
        let depths = slice_depths(0.0, 1.0, 1e-30);
        assert_eq!(depths.len(), MAX_SLICE_PLANES);
        assert!(depths.step() >= 1.0 / MAX_SLICE_PLANES as f32);

        let empty = slice_depths(0.0, f32::INFINITY, 0.1);
        assert_eq!(empty.len(), 0);
    }

    #[test]
    fn test_tiny_step_keeps_depths_distinct() {
        let depths: Vec<f32> = slice_depths(-2.5, -1.5, 1e-9).collect();
        assert!(depths.len() <= MAX_SLICE_PLANES);
        assert!(depths.windows(2).all(|w| w[0] < w[1]));
        assert!(depths.iter().all(|&d| (-2.5..=-1.5).contains(&d)));
    }

    #[test]
    fn test_tiny_step_frame_finishes() {
        let (mesh, stats) = build(Mat4::from_rotation_y(0.3), &SliceSettings::with_step(1e-30));
        assert!(stats.planes <= MAX_SLICE_PLANES);
        assert_eq!(stats.slices, stats.planes);
        assert_eq!(mesh.slice_count(), stats.slices);
    }

    #[test]
    fn test_rotated_view_consistent_winding() {
        let view = Mat4::from_translation(Vec3::new(0.3, -0.2, -2.0))
            * Mat4::from_rotation_x(0.5)
            * Mat4::from_rotation_y(0.9);
        let (mesh, _) = build(view, &SliceSettings::with_step(0.05));
        assert!(!mesh.is_empty());
        for tri in mesh.triangles() {
            assert!(signed_area(&tri) >= -1e-7, "clockwise triangle {tri:?}");
        }

        let settings = SliceSettings {
            winding: Winding::Clockwise,
            ..SliceSettings::with_step(0.05)
        };
        let (mesh, _) = build(view, &settings);
        for tri in mesh.triangles() {
            assert!(signed_area(&tri) <= 1e-7, "counter-clockwise triangle {tri:?}");
        }
    }

    #[test]
    fn test_slice_order() {
        let view = Mat4::from_rotation_y(0.3);
        let (back_to_front, _) = build(view, &SliceSettings::with_step(0.1));
        let settings = SliceSettings {
            order: SliceOrder::FrontToBack,
            ..SliceSettings::with_step(0.1)
        };
        let (front_to_back, _) = build(view, &settings);

        let a: Vec<f32> = back_to_front.spans().iter().map(|s| s.depth).collect();
        let mut b: Vec<f32> = front_to_back.spans().iter().map(|s| s.depth).collect();
        assert!(a.windows(2).all(|w| w[0] < w[1]));
        b.reverse();
        assert_eq!(a, b);
    }

    #[test]
    fn test_view_axis_pivot_orders_slices_it_pierces() {
        let view = Mat4::from_rotation_y(0.4);
        let (centroid_mesh, _) = build(view, &SliceSettings::with_step(0.1));
        let settings = SliceSettings {
            pivot: AnglePivot::ViewAxis,
            ..SliceSettings::with_step(0.1)
        };
        let (axis_mesh, _) = build(view, &settings);
        assert_eq!(centroid_mesh.vertex_count(), axis_mesh.vertex_count());

        // Near the centre the view axis passes through the slice polygon.
        for span in axis_mesh.spans().iter().filter(|s| s.depth.abs() < 0.2) {
            for tri in axis_mesh.slice_vertices(span).chunks_exact(3) {
                assert!(signed_area(&[tri[0], tri[1], tri[2]]) >= -1e-7);
            }
        }
    }

    #[test]
    fn test_builder_reuses_mesh() {
        let geometry = CubeGeometry::unit();
        let mut builder = SliceBuilder::new();
        let mut mesh = OutputMesh::new();
        let settings = SliceSettings::with_step(0.05);

        let cube = ViewSpaceCube::transform(&geometry, Mat4::from_rotation_y(0.2));
        builder.build(&geometry, &cube, &settings, &mut mesh);
        let first = mesh.vertex_count();
        let capacity = mesh.vertex_capacity();

        builder.build(&geometry, &cube, &settings, &mut mesh);
        assert_eq!(mesh.vertex_count(), first);
        assert_eq!(mesh.vertex_capacity(), capacity);
    }
}
