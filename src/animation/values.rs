use glam::{Quat, Vec3, Vec4};

/// Upper bound on morph targets a weights track can carry per keyframe.
pub const MAX_MORPH_TARGETS: usize = 8;

/// Value types a keyframe track can interpolate.
pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;

    /// Cubic Hermite spline, glTF flavour: tangents are scaled by the
    /// keyframe interval `dt`.
    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self;
}

/// Hermite basis functions `(s0, s1, s2, s3)` for `t`.
#[inline]
fn hermite(t: f32) -> (f32, f32, f32, f32) {
    let t2 = t * t;
    let t3 = t2 * t;
    let s2 = -2.0 * t3 + 3.0 * t2;
    let s3 = t3 - t2;
    let s0 = 1.0 - s2;
    let s1 = s3 - t2 + t;
    (s0, s1, s2, s3)
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MorphWeightData {
    pub weights: [f32; MAX_MORPH_TARGETS],
}

impl MorphWeightData {
    /// Packs up to [`MAX_MORPH_TARGETS`] leading weights.
    #[must_use]
    pub fn from_slice(weights: &[f32]) -> Self {
        let mut data = Self::default();
        let count = weights.len().min(MAX_MORPH_TARGETS);
        data.weights[..count].copy_from_slice(&weights[..count]);
        data
    }
}

impl Interpolatable for MorphWeightData {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        let mut result = MorphWeightData::default();
        for i in 0..MAX_MORPH_TARGETS {
            result.weights[i] = start.weights[i] + (end.weights[i] - start.weights[i]) * t;
        }
        result
    }

    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self {
        let (s0, s1, s2, s3) = hermite(t);
        let mut result = MorphWeightData::default();
        for i in 0..MAX_MORPH_TARGETS {
            let m0 = out_tangent0.weights[i] * dt;
            let m1 = in_tangent1.weights[i] * dt;
            result.weights[i] = s0 * v0.weights[i] + s1 * m0 + s2 * v1.weights[i] + s3 * m1;
        }
        result
    }
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self {
        let (s0, s1, s2, s3) = hermite(t);
        s0 * v0 + s1 * out_tangent0 * dt + s2 * v1 + s3 * in_tangent1 * dt
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }

    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self {
        let (s0, s1, s2, s3) = hermite(t);
        v0 * s0 + out_tangent0 * dt * s1 + v1 * s2 + in_tangent1 * dt * s3
    }
}

impl Interpolatable for Quat {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }

    fn interpolate_cubic(
        v0: Self,
        out_tangent0: Self,
        in_tangent1: Self,
        v1: Self,
        t: f32,
        dt: f32,
    ) -> Self {
        let (s0, s1, s2, s3) = hermite(t);
        let result = Vec4::from(v0) * s0
            + Vec4::from(out_tangent0) * dt * s1
            + Vec4::from(v1) * s2
            + Vec4::from(in_tangent1) * dt * s3;

        Quat::from_vec4(result).normalize()
    }
}
