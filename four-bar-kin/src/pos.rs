use crate::{
    error::{check_finite, check_len},
    Error, Result,
};
use nalgebra as na;

/// Relative tolerance of a negative half-chord before it counts as an
/// instability, scaled by the squared coupler length.
pub const CHORD_TOL: f64 = 1e-9;

/// Sign of the circle intersection (elbow up / elbow down).
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "lowercase")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Sign {
    /// The candidate on the left of the line from the crank tip to the
    /// follower pivot
    #[default]
    Plus,
    /// The candidate on the right
    Minus,
}

/// Branch selection policy of the circle intersection.
///
/// The solver always returns both candidates, the policy picks one. It never
/// switches to the other candidate when the chosen one is missing.
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(rename_all = "snake_case")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Branch {
    /// Always take the first candidate
    PreferFirst,
    /// Take the candidate closer to the previous joint position, falls back
    /// to the first candidate if there is no previous position
    #[default]
    PreferClosestToPrevious,
    /// Always take the candidate with the sign
    PreferSign(Sign),
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::PreferFirst => write!(f, "first"),
            Self::PreferClosestToPrevious => write!(f, "closest"),
            Self::PreferSign(Sign::Plus) => write!(f, "plus"),
            Self::PreferSign(Sign::Minus) => write!(f, "minus"),
        }
    }
}

impl Branch {
    /// Pick a candidate from the result of [`pllp()`].
    pub fn select(&self, candidates: [[f64; 2]; 2], prev: Option<[f64; 2]>) -> [f64; 2] {
        let [b1, b2] = candidates;
        match self {
            Self::PreferFirst | Self::PreferSign(Sign::Plus) => b1,
            Self::PreferSign(Sign::Minus) => b2,
            Self::PreferClosestToPrevious => match prev {
                Some(p) if dist2(b2, p) < dist2(b1, p) => b2,
                _ => b1,
            },
        }
    }
}

fn dist2(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}

/// Point-length-length-point: the joint `B` that is `l2` from the crank tip
/// `a` and `l3` from the follower pivot `ob`.
///
/// Returns `[B+, B-]`, the [`Sign::Plus`] and [`Sign::Minus`] candidates.
///
/// ```
/// let [b1, b2] = four_bar_kin::pllp([4., 0.], 6., 7., [10., 0.]).unwrap();
/// assert!((b1[1] - 5.6856).abs() < 1e-4);
/// assert!((b2[1] + 5.6856).abs() < 1e-4);
/// ```
pub fn pllp(a: [f64; 2], l2: f64, l3: f64, ob: [f64; 2]) -> Result<[[f64; 2]; 2]> {
    check_finite(&[a[0], a[1], ob[0], ob[1]], "joint position")?;
    check_len(&[l2, l3], "link length")?;
    let a = na::Point2::from(a);
    let ob = na::Point2::from(ob);
    let v = ob - a;
    let r = v.norm();
    if r > l2 + l3 || r < (l2 - l3).abs() || r < f64::EPSILON {
        return Err(Error::Infeasible);
    }
    let c = (l2 * l2 - l3 * l3 + r * r) / (2. * r);
    let s = half_chord(l2, c)?;
    let u = v / r;
    let foot = a + c * u;
    let n = na::Vector2::new(-u.y, u.x);
    let b1 = foot + s * n;
    let b2 = foot - s * n;
    Ok([[b1.x, b1.y], [b2.x, b2.y]])
}

/// Half-chord `sqrt(l2² - c²)` of the circle intersection.
///
/// The separation test in [`pllp()`] keeps `|c| <= l2` up to rounding, so a
/// negative radicand within [`CHORD_TOL`] is clamped to zero.
pub(crate) fn half_chord(l2: f64, c: f64) -> Result<f64> {
    let l2_2 = l2 * l2;
    let s_2 = l2_2 - c * c;
    if s_2 >= 0. {
        Ok(s_2.sqrt())
    } else if -s_2 <= CHORD_TOL * l2_2.max(1.) {
        Ok(0.)
    } else {
        Err(Error::NumericalInstability)
    }
}
