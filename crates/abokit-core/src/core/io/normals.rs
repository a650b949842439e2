use nalgebra::Vector3;

const OCT_SCALE: f32 = 32767.0;

/// How vertex normals are stored in a model record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalEncoding {
    /// Three `f32` components (12 bytes per normal).
    Float32,
    /// Two `i16` octahedral coordinates (4 bytes per normal).
    Oct16,
}

#[inline]
fn sign_not_zero(v: f32) -> f32 {
    if v >= 0.0 { 1.0 } else { -1.0 }
}

/// Decodes a 16-bit octahedral normal into a unit vector.
///
/// Points in the lower hemisphere are stored folded over the diagonals of the
/// octahedron; they are unfolded here before normalization. A zero-length
/// result is returned as-is.
pub fn decode_octahedral(nx: i16, ny: i16) -> Vector3<f32> {
    let x = nx as f32 / OCT_SCALE;
    let y = ny as f32 / OCT_SCALE;
    let z = 1.0 - x.abs() - y.abs();

    let (x, y) = if z < 0.0 {
        (
            (1.0 - y.abs()) * sign_not_zero(x),
            (1.0 - x.abs()) * sign_not_zero(y),
        )
    } else {
        (x, y)
    };

    let n = Vector3::new(x, y, z);
    let length = n.norm();
    if length > 0.0 { n / length } else { n }
}

/// Encodes a normal into 16-bit octahedral coordinates.
///
/// The input does not need to be normalized. A zero vector encodes as
/// `(0, 0)`, which decodes to `+Z`.
pub fn encode_octahedral(normal: &Vector3<f32>) -> (i16, i16) {
    let l1 = normal.x.abs() + normal.y.abs() + normal.z.abs();
    if !(l1 > 0.0) {
        return (0, 0);
    }
    let x = normal.x / l1;
    let y = normal.y / l1;

    let (x, y) = if normal.z < 0.0 {
        (
            (1.0 - y.abs()) * sign_not_zero(x),
            (1.0 - x.abs()) * sign_not_zero(y),
        )
    } else {
        (x, y)
    };

    (quantize(x), quantize(y))
}

#[inline]
fn quantize(v: f32) -> i16 {
    (v.clamp(-1.0, 1.0) * OCT_SCALE).round() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUANTIZATION_TOLERANCE: f32 = 1e-3;

    fn assert_unit(n: &Vector3<f32>) {
        assert!((n.norm() - 1.0).abs() < 1e-5, "not unit length: {:?}", n);
    }

    #[test]
    fn origin_decodes_to_positive_z() {
        let n = decode_octahedral(0, 0);
        assert_eq!(n, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn corners_decode_to_negative_z() {
        for (nx, ny) in [(32767, 32767), (-32767, 32767), (32767, -32767), (-32767, -32767)] {
            let n = decode_octahedral(nx, ny);
            assert!(n.x.abs() < 1e-6 && n.y.abs() < 1e-6);
            assert!((n.z + 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn axis_points_decode_to_axes() {
        let n = decode_octahedral(32767, 0);
        assert!((n - Vector3::x()).norm() < 1e-6);
        let n = decode_octahedral(0, -32767);
        assert!((n + Vector3::y()).norm() < 1e-6);
    }

    #[test]
    fn every_decoded_normal_has_unit_length() {
        let samples = [-32768i16, -32767, -20000, -1, 0, 1, 12345, 32767];
        for &nx in &samples {
            for &ny in &samples {
                assert_unit(&decode_octahedral(nx, ny));
            }
        }
    }

    #[test]
    fn encode_then_decode_is_within_quantization_tolerance() {
        let directions = [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
            Vector3::new(0.3, -0.4, 0.866),
            Vector3::new(-0.5, 0.5, -0.7071),
            Vector3::new(0.01, 0.99, -0.1),
            Vector3::new(-1.0, -1.0, -1.0),
        ];
        for d in directions {
            let unit = d.normalize();
            let (nx, ny) = encode_octahedral(&unit);
            let decoded = decode_octahedral(nx, ny);
            assert_unit(&decoded);
            assert!(
                (decoded - unit).norm() < QUANTIZATION_TOLERANCE,
                "{:?} -> {:?}",
                unit,
                decoded
            );
        }
    }

    #[test]
    fn decode_then_encode_reproduces_coordinates() {
        for (nx, ny) in [(100, -200), (16000, 16000), (-30000, 1000), (20000, 20000)] {
            let decoded = decode_octahedral(nx, ny);
            let (ex, ey) = encode_octahedral(&decoded);
            assert!((ex as i32 - nx as i32).abs() <= 2, "{} vs {}", ex, nx);
            assert!((ey as i32 - ny as i32).abs() <= 2, "{} vs {}", ey, ny);
        }
    }

    #[test]
    fn zero_vector_encodes_to_origin() {
        assert_eq!(encode_octahedral(&Vector3::zeros()), (0, 0));
    }
}
