use serde::{Deserialize, Serialize};

/// A single key of an ease curve.
///
/// Tangents are slopes (d value / d time) on either side of the key.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f64,
    pub value: f64,
    #[serde(default)]
    pub in_tangent: f64,
    #[serde(default)]
    pub out_tangent: f64,
}

impl Keyframe {
    pub fn new(time: f64, value: f64) -> Keyframe {
        Keyframe {
            time,
            value,
            in_tangent: 0.0,
            out_tangent: 0.0,
        }
    }
}

/// Maps normalized dash progress in [0, 1] to a displacement fraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub enum Ease {
    Linear,
    /// Zero-tangent ease in/out, `3u² - 2u³`.
    #[default]
    SmoothStep,
    /// Cubic ease in/out.
    Cubic,
    /// Cubic Hermite spline through the keys, sorted by time.
    Curve(Vec<Keyframe>),
}

impl Ease {
    pub fn ease_in_out() -> Ease {
        Ease::Curve(vec![Keyframe::new(0.0, 0.0), Keyframe::new(1.0, 1.0)])
    }

    pub fn evaluate(&self, u: f64) -> f64 {
        let u = u.clamp(0.0, 1.0);
        match self {
            Ease::Linear => u,
            Ease::SmoothStep => u * u * (3.0 - 2.0 * u),
            Ease::Cubic => {
                if u < 0.5 {
                    4.0 * u * u * u
                } else {
                    let f = -2.0 * u + 2.0;
                    1.0 - f * f * f / 2.0
                }
            }
            Ease::Curve(keys) => evaluate_keys(keys, u),
        }
    }
}

fn evaluate_keys(keys: &[Keyframe], t: f64) -> f64 {
    let (first, last) = match (keys.first(), keys.last()) {
        (Some(first), Some(last)) => (first, last),
        // An empty curve behaves like a straight line.
        _ => return t,
    };
    if t <= first.time {
        return first.value;
    }
    if t >= last.time {
        return last.value;
    }

    let i = keys
        .windows(2)
        .position(|w| t >= w[0].time && t <= w[1].time)
        .unwrap_or(0);
    let (k0, k1) = (&keys[i], &keys[i + 1]);
    let span = k1.time - k0.time;
    if span <= 0.0 {
        return k1.value;
    }

    let s = (t - k0.time) / span;
    let s2 = s * s;
    let s3 = s2 * s;
    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;
    h00 * k0.value + h10 * span * k0.out_tangent + h01 * k1.value + h11 * span * k1.in_tangent
}
