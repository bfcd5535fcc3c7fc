//! Three precision point synthesis of planar four-bar linkages.
//!
//! Each side of the linkage is a dyad `(W, Z)`: `W` is the link from the
//! ground pivot to the moving joint, `Z` goes from the joint to the coupler
//! point. Pose `k` rotates `W` by `beta_k` (or `gamma_k`) and `Z` by
//! `alpha_k = theta_k - theta_1`, which gives the loop equation
//!
//! ```text
//! W (e^{i beta_k} - 1) + Z (e^{i alpha_k} - 1) = p_k - p_1,  k = 2, 3
//! ```
//!
//! solved with Cramer's rule for both sides.
//!
//! ```
//! use four_bar_kin::syn::Task;
//!
//! let task = Task {
//!     pps: [[0., 0.], [15., 36.], [18., 10.]],
//!     theta: [0., 200., 281.],
//!     beta: [250., 190.],
//!     gamma: [240., 220.],
//! };
//! let ans = task.solve().unwrap();
//! assert!(task.residual(&ans) < 1e-9);
//! ```
use crate::{error::check_finite, Error, FourBarTy, LinkLengths, Result};
use nalgebra::{Complex, Matrix2, Vector2};

/// Determinant tolerance of the coefficient matrix.
pub const DET_TOL: f64 = 1e-10;

/// A precision point, the coupler point and its orientation (in degrees).
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PrecisionPoint {
    /// Coupler point
    pub p: [f64; 2],
    /// Orientation of the coupler
    pub theta: f64,
}

/// Synthesis task, all angles are in degrees.
///
/// The first pose is the reference, `beta` and `gamma` are the rotations of
/// the crank and the rocker at the second and the third pose.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Task {
    /// Precision points
    pub pps: [[f64; 2]; 3],
    /// Orientations of the coupler at each precision point
    pub theta: [f64; 3],
    /// Rotations of the crank at pose 2 and 3
    pub beta: [f64; 2],
    /// Rotations of the rocker at pose 2 and 3
    pub gamma: [f64; 2],
}

impl Task {
    /// Create from the precision points.
    pub fn new(pps: [PrecisionPoint; 3], beta: [f64; 2], gamma: [f64; 2]) -> Self {
        Self {
            pps: pps.map(|pp| pp.p),
            theta: pps.map(|pp| pp.theta),
            beta,
            gamma,
        }
    }

    /// Create from slices, the arity is checked.
    pub fn from_slices(pps: &[[f64; 2]], theta: &[f64], beta: &[f64], gamma: &[f64]) -> Result<Self> {
        macro_rules! arity {
            ($v:ident, $msg:literal) => {
                $v.try_into().map_err(|_| Error::InvalidInput($msg))?
            };
        }
        Ok(Self {
            pps: arity!(pps, "expect 3 precision points"),
            theta: arity!(theta, "expect 3 coupler angles"),
            beta: arity!(beta, "expect 2 crank angles"),
            gamma: arity!(gamma, "expect 2 rocker angles"),
        })
    }

    /// List the precision points.
    pub fn precision_points(&self) -> [PrecisionPoint; 3] {
        std::array::from_fn(|i| PrecisionPoint { p: self.pps[i], theta: self.theta[i] })
    }

    /// Check all values are finite.
    pub fn check(&self) -> Result<()> {
        check_finite(self.pps.as_flattened(), "precision point")?;
        check_finite(&self.theta, "coupler angle")?;
        check_finite(&self.beta, "crank angle")?;
        check_finite(&self.gamma, "rocker angle")
    }

    /// Coupler rotations `[alpha_2, alpha_3]` in radians.
    pub fn alpha(&self) -> [f64; 2] {
        let [t1, t2, t3] = self.theta.map(f64::to_radians);
        [t2 - t1, t3 - t1]
    }

    /// Solve the linkage.
    pub fn solve(&self) -> Result<SynResult> {
        self.check()?;
        let [p1, p2, p3] = self.pps.map(to_complex);
        let delta = [p2 - p1, p3 - p1];
        let alpha = self.alpha();
        let (wa, za) = solve_dyad(delta, alpha, self.beta.map(f64::to_radians))?;
        let (wb, zb) = solve_dyad(delta, alpha, self.gamma.map(f64::to_radians))?;
        let oa = p1 - wa - za;
        let ob = p1 - wb - zb;
        let lengths = LinkLengths::new(wa.norm(), (wa + za).norm(), wb.norm(), (oa - ob).norm());
        Ok(SynResult {
            oa: from_complex(oa),
            ob: from_complex(ob),
            wa: from_complex(wa),
            za: from_complex(za),
            wb: from_complex(wb),
            zb: from_complex(zb),
            grashof: lengths.is_grashof(),
            lengths,
        })
    }

    /// Maximum distance between the precision points and the coupler points
    /// realized by both dyads of the result.
    pub fn residual(&self, ans: &SynResult) -> f64 {
        let [a2, a3] = self.alpha().map(f64::to_degrees);
        let [b2, b3] = self.beta;
        let [g2, g3] = self.gamma;
        [(0., 0., 0.), (a2, b2, g2), (a3, b3, g3)]
            .into_iter()
            .zip(self.pps)
            .flat_map(|((a, b, g), p)| ans.reach(a, b, g).map(|q| (q[0] - p[0]).hypot(q[1] - p[1])))
            .fold(0., f64::max)
    }
}

/// Solve a dyad `(W, Z)` from the displacements `delta` of pose 2 and 3,
/// the coupler rotations `alpha`, and the link rotations `angle`.
///
/// All angles are in radians.
pub fn solve_dyad(
    delta: [Complex<f64>; 2],
    alpha: [f64; 2],
    angle: [f64; 2],
) -> Result<(Complex<f64>, Complex<f64>)> {
    let rot = |a: f64| Complex::from_polar(1., a) - 1.;
    let d = Vector2::from(delta);
    let s = Vector2::from(alpha.map(rot));
    let r = Vector2::from(angle.map(rot));
    let det = Matrix2::from_columns(&[r, s]).determinant();
    if !det.is_finite() || det.norm() < DET_TOL {
        return Err(Error::DegenerateSynthesis);
    }
    let w = Matrix2::from_columns(&[d, s]).determinant() / det;
    let z = Matrix2::from_columns(&[r, d]).determinant() / det;
    if w.is_finite() && z.is_finite() {
        Ok((w, z))
    } else {
        Err(Error::DegenerateSynthesis)
    }
}

fn to_complex([x, y]: [f64; 2]) -> Complex<f64> {
    Complex::new(x, y)
}

fn from_complex(c: Complex<f64>) -> [f64; 2] {
    [c.re, c.im]
}

/// Synthesized linkage.
///
/// The crank side is `oa -> wa -> za -> p1`, the rocker side is
/// `ob -> wb -> zb -> p1`, at the first pose.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SynResult {
    /// Crank pivot
    pub oa: [f64; 2],
    /// Rocker pivot
    pub ob: [f64; 2],
    /// Crank link vector
    pub wa: [f64; 2],
    /// Coupler vector of the crank side
    pub za: [f64; 2],
    /// Rocker link vector
    pub wb: [f64; 2],
    /// Coupler vector of the rocker side
    pub zb: [f64; 2],
    /// Link lengths
    pub lengths: LinkLengths,
    /// Grashof condition of the lengths
    pub grashof: bool,
}

impl SynResult {
    /// The moving joints `[A, B]` at the first pose.
    ///
    /// Same as `p1 - za` and `p1 - zb`.
    pub fn joints(&self) -> [[f64; 2]; 2] {
        let [oa, ob, wa, wb] = [self.oa, self.ob, self.wa, self.wb].map(to_complex);
        [oa + wa, ob + wb].map(from_complex)
    }

    /// Return the type of this linkage.
    pub fn ty(&self) -> FourBarTy {
        self.lengths.ty()
    }

    /// Coupler points realized by the crank side and the rocker side, with
    /// the coupler rotation `alpha`, the crank rotation `beta` and the rocker
    /// rotation `gamma` (in degrees).
    pub fn reach(&self, alpha: f64, beta: f64, gamma: f64) -> [[f64; 2]; 2] {
        let [oa, ob, wa, za, wb, zb] =
            [self.oa, self.ob, self.wa, self.za, self.wb, self.zb].map(to_complex);
        let rot = |a: f64| Complex::from_polar(1., a.to_radians());
        let pa = oa + wa * rot(beta) + za * rot(alpha);
        let pb = ob + wb * rot(gamma) + zb * rot(alpha);
        [pa, pb].map(from_complex)
    }
}
