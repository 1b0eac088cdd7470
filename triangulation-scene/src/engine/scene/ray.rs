use bevy::prelude::*;

/// Straight segment from a camera through a point and on past it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySpan {
    pub start: Vec3,
    pub end: Vec3,
}

impl RaySpan {
    /// Span from `from` through `through`, continued `extension` units beyond.
    pub fn through(from: Vec3, through: Vec3, extension: f32) -> Self {
        let direction = (through - from).normalize_or_zero();
        Self {
            start: from,
            end: through + direction * extension,
        }
    }

    pub fn direction(&self) -> Vec3 {
        (self.end - self.start).normalize_or_zero()
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Vec3 {
        (self.start + self.end) * 0.5
    }

    /// Transform placing a unit-height, +Y aligned cylinder along the span.
    pub fn cylinder_transform(&self) -> Transform {
        let direction = self.direction();
        let rotation = if direction == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(Vec3::Y, direction)
        };
        Transform::from_translation(self.midpoint()).with_rotation(rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec3, Vec3, RaySpan) {
        let from = Vec3::new(1.5, 0.2, 1.2);
        let through = Vec3::new(0.03, 1.21, -0.05);
        (from, through, RaySpan::through(from, through, 4.0))
    }

    #[test]
    fn endpoints_stay_on_the_source_line() {
        let (from, through, span) = sample();
        let line = (through - from).normalize();
        let along_end = (span.end - from).normalize();
        assert!(line.abs_diff_eq(along_end, 1e-5));
        assert_eq!(span.start, from);
    }

    #[test]
    fn through_point_lies_strictly_inside() {
        let (from, through, span) = sample();
        let to_through = from.distance(through);
        assert!(to_through > 0.0);
        assert!(to_through < span.length());
        assert!((span.length() - (to_through + 4.0)).abs() < 1e-4);
    }

    #[test]
    fn cylinder_axis_follows_the_ray() {
        let (_, _, span) = sample();
        let transform = span.cylinder_transform();
        let axis = transform.rotation * Vec3::Y;
        assert!(axis.abs_diff_eq(span.direction(), 1e-5));
        assert!(transform.translation.abs_diff_eq(span.midpoint(), 1e-6));

        // Both cylinder caps land on the span endpoints.
        let half = axis * span.length() * 0.5;
        assert!((transform.translation - half).abs_diff_eq(span.start, 1e-4));
        assert!((transform.translation + half).abs_diff_eq(span.end, 1e-4));
    }

    #[test]
    fn coincident_points_do_not_produce_nan() {
        let point = Vec3::splat(1.0);
        let span = RaySpan::through(point, point, 4.0);
        assert_eq!(span.end, point);
        assert_eq!(span.cylinder_transform().rotation, Quat::IDENTITY);
    }
}
