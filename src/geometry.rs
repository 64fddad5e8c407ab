//! Listener-relative geometry for the panel.
//!
//! Screen coordinates are pixels with the y axis pointing down. Angles
//! handed to and returned from this module use the panel convention where
//! 0° is "up" (in front of the listener's head) and values grow clockwise.

/// A position in panel pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}

impl Pos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn distance_sq(self, other: Pos) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl From<Pos> for egui::Pos2 {
    fn from(p: Pos) -> Self {
        egui::pos2(p.x, p.y)
    }
}

impl From<egui::Pos2> for Pos {
    fn from(p: egui::Pos2) -> Self {
        Pos::new(p.x, p.y)
    }
}

/// A source location given as distance (meters) and angle (degrees).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Polar {
    pub distance: f32,
    pub angle: f32,
}

/// Wrap an angle into `[0, 360)`.
pub fn normalize_degrees(deg: f32) -> f32 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Plain polar to cartesian conversion in the screen frame.
pub fn polar_to_cartesian(distance: f32, angle_degrees: f32) -> (f32, f32) {
    let rad = angle_degrees * std::f32::consts::PI / 180.0;
    (distance * rad.cos(), distance * rad.sin())
}

/// Shift a panel angle (0° = up) into the screen frame used by
/// [`polar_to_cartesian`] (0° = right).
pub fn input_angle_to_frame(angle: f32) -> f32 {
    normalize_degrees(angle - 90.0)
}

/// Convert a frame-relative polar position in meters into absolute pixels.
///
/// `polar.angle` must already be in the screen frame, see
/// [`input_angle_to_frame`].
pub fn to_panel_coordinates(polar: Polar, center: Pos, pixels_per_meter: f32) -> Pos {
    let (x, y) = polar_to_cartesian(polar.distance * pixels_per_meter, polar.angle);
    Pos::new(x + center.x, y + center.y)
}

/// Pull `point` back onto the circle around `center` if it lies outside.
///
/// The direction from the center is preserved; only the magnitude shrinks.
pub fn clamp_to_boundary(point: Pos, center: Pos, radius: f32) -> Pos {
    let dist_sq = point.distance_sq(center);
    if dist_sq <= radius * radius {
        return point;
    }
    let dist = dist_sq.sqrt();
    let dx = (point.x - center.x) / dist;
    let dy = (point.y - center.y) / dist;
    Pos::new(center.x + dx * radius, center.y + dy * radius)
}

/// Distance between two pixel positions, in meters.
pub fn distance(a: Pos, b: Pos, pixels_per_meter: f32) -> f32 {
    a.distance_sq(b).sqrt() / pixels_per_meter
}

/// Panel angle of `point` as seen from `center`, in `[0, 360)`.
///
/// With `relative_to_head` the listener's `head_orientation` is subtracted,
/// so 0° means "straight ahead of the nose" rather than "up".
pub fn angle(point: Pos, center: Pos, head_orientation: f32, relative_to_head: bool) -> f32 {
    let dy = point.y - center.y;
    let dx = point.x - center.x;
    let mut deg = dy.atan2(dx).to_degrees();
    if deg < 0.0 {
        deg += 360.0;
    }
    deg = normalize_degrees(deg + 90.0);
    if relative_to_head {
        deg = normalize_degrees(deg - head_orientation);
    }
    deg
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    fn angle_close(a: f32, b: f32) -> bool {
        let d = (a - b).abs();
        d < EPS || (360.0 - d) < EPS
    }

    #[test]
    fn normalize_wraps_both_directions() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert!((normalize_degrees(-90.0) - 270.0).abs() < EPS);
        assert!((normalize_degrees(450.0) - 90.0).abs() < EPS);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!(normalize_degrees(-1e-9) < 360.0);
    }

    #[test]
    fn polar_to_cartesian_uses_screen_axes() {
        let (x, y) = polar_to_cartesian(10.0, 90.0);
        assert!(x.abs() < EPS);
        assert!((y - 10.0).abs() < EPS);
    }

    #[test]
    fn zero_degrees_points_up() {
        let center = Pos::new(100.0, 100.0);
        let p = to_panel_coordinates(
            Polar { distance: 1.0, angle: input_angle_to_frame(0.0) },
            center,
            40.0,
        );
        assert!((p.x - 100.0).abs() < EPS);
        assert!((p.y - 60.0).abs() < EPS);
        assert!(angle_close(angle(p, center, 0.0, false), 0.0));
    }

    #[test]
    fn right_of_listener_is_ninety_degrees() {
        let center = Pos::new(0.0, 0.0);
        assert!(angle_close(angle(Pos::new(5.0, 0.0), center, 0.0, false), 90.0));
        assert!(angle_close(angle(Pos::new(0.0, 5.0), center, 0.0, false), 180.0));
        assert!(angle_close(angle(Pos::new(-5.0, 0.0), center, 0.0, false), 270.0));
    }

    #[test]
    fn head_orientation_rotates_relative_angle() {
        let center = Pos::new(0.0, 0.0);
        let p = Pos::new(5.0, 0.0);
        assert!(angle_close(angle(p, center, 90.0, true), 0.0));
        assert!(angle_close(angle(p, center, 120.0, true), 330.0));
        // ignored unless requested
        assert!(angle_close(angle(p, center, 120.0, false), 90.0));
    }

    #[test]
    fn polar_round_trip() {
        let center = Pos::new(150.0, 150.0);
        let scale = 40.0;
        for &d in &[0.5_f32, 1.0, 2.5, 3.0] {
            for step in 0..24 {
                let a = step as f32 * 15.0;
                let p = to_panel_coordinates(
                    Polar { distance: d, angle: input_angle_to_frame(a) },
                    center,
                    scale,
                );
                assert!((distance(p, center, scale) - d).abs() < EPS);
                let back = angle(p, center, 0.0, false);
                assert!(angle_close(back, a), "angle {a} came back as {back}");
            }
        }
    }

    #[test]
    fn clamp_keeps_inside_points() {
        let c = Pos::new(0.0, 0.0);
        let p = Pos::new(3.0, 4.0);
        assert_eq!(clamp_to_boundary(p, c, 5.0), p);
    }

    #[test]
    fn clamp_projects_onto_circle_preserving_angle() {
        let c = Pos::new(100.0, 100.0);
        let p = Pos::new(400.0, -300.0);
        let before = angle(p, c, 0.0, false);
        let q = clamp_to_boundary(p, c, 50.0);
        assert!((q.distance_sq(c).sqrt() - 50.0).abs() < EPS);
        assert!(angle_close(angle(q, c, 0.0, false), before));
    }

    #[test]
    fn distance_converts_pixels_to_meters() {
        let d = distance(Pos::new(0.0, 0.0), Pos::new(30.0, 40.0), 25.0);
        assert!((d - 2.0).abs() < EPS);
    }
}
