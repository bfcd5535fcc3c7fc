use crate::{
    error::{check_finite, check_len},
    pllp, Branch, Error, FourBarTy, LinkLengths, Result,
};
use std::f64::consts::TAU;

/// Planar four-bar linkage defined by its ground pivots.
///
/// + Crank pivot `oa`
/// + Rocker pivot `ob`
/// + Crank link `l1` (`oa` to `A`)
/// + Coupler link `l2` (`A` to `B`)
/// + Rocker link `l3` (`B` to `ob`)
///
/// The ground link is the distance between the pivots.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FourBar {
    /// Crank pivot
    pub oa: [f64; 2],
    /// Rocker pivot
    pub ob: [f64; 2],
    /// Length of the crank link
    pub l1: f64,
    /// Length of the coupler link
    pub l2: f64,
    /// Length of the rocker link
    pub l3: f64,
}

/// Joint positions at an input angle.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Crank tip
    pub a: [f64; 2],
    /// Coupler-rocker joint
    pub b: [f64; 2],
}

impl FourBar {
    /// Create a new instance.
    pub const fn new(oa: [f64; 2], ob: [f64; 2], l1: f64, l2: f64, l3: f64) -> Self {
        Self { oa, ob, l1, l2, l3 }
    }

    /// An example linkage.
    pub const fn example() -> Self {
        Self::new([0., 0.], [10., 0.], 4., 6., 7.)
    }

    /// Check the pivots and the link lengths.
    pub fn check(&self) -> Result<()> {
        check_finite(&[self.oa[0], self.oa[1], self.ob[0], self.ob[1]], "pivot")?;
        check_len(&[self.l1, self.l2, self.l3], "link length")
    }

    /// Length of the ground link.
    pub fn ground(&self) -> f64 {
        (self.ob[0] - self.oa[0]).hypot(self.ob[1] - self.oa[1])
    }

    /// Link lengths, the ground link is the last one.
    pub fn link_lengths(&self) -> LinkLengths {
        LinkLengths::new(self.l1, self.l2, self.l3, self.ground())
    }

    /// Return the type of this linkage.
    pub fn ty(&self) -> FourBarTy {
        self.link_lengths().ty()
    }

    /// Rotate the crank to the input angle `t` (in radians).
    pub fn crank_tip(&self, t: f64) -> [f64; 2] {
        let [x, y] = self.oa;
        [x + self.l1 * t.cos(), y + self.l1 * t.sin()]
    }

    /// Both candidates of the coupler-rocker joint at the input angle.
    pub fn solve(&self, t: f64) -> Result<[[f64; 2]; 2]> {
        check_finite(&[t], "input angle")?;
        self.check()?;
        pllp(self.crank_tip(t), self.l2, self.l3, self.ob)
    }

    /// Joint positions at the input angle.
    ///
    /// The `prev` position is only used by
    /// [`Branch::PreferClosestToPrevious`].
    pub fn pos(&self, t: f64, branch: Branch, prev: Option<[f64; 2]>) -> Result<Pose> {
        let candidates = self.solve(t)?;
        let b = branch.select(candidates, prev);
        Ok(Pose { a: self.crank_tip(t), b })
    }

    /// Sweep the input angle from `start` to `end` with `res` frames.
    ///
    /// If `end` is not greater than `start`, it is wrapped by a full turn.
    pub fn sweep(&self, start: f64, end: f64, res: usize, branch: Branch) -> Result<Sweep<'_>> {
        check_finite(&[start, end], "input angle")?;
        if res == 0 {
            return Err(Error::InvalidInput("resolution must be positive"));
        }
        self.check()?;
        let end = if end > start { end } else { end + TAU };
        let step = (end - start) / res as f64;
        Ok(Sweep { fb: self, start, step, n: 0, res, branch, prev: None })
    }

    /// Sweep a full turn from `start`.
    pub fn sweep_turn(&self, start: f64, res: usize, branch: Branch) -> Result<Sweep<'_>> {
        self.sweep(start, start + TAU, res, branch)
    }

    /// Trace of the coupler-rocker joint in a full turn, infeasible frames
    /// are skipped.
    pub fn curve(&self, res: usize, branch: Branch) -> Result<Vec<[f64; 2]>> {
        Ok(self
            .sweep_turn(0., res, branch)?
            .filter_map(|(_, pose)| pose.ok())
            .map(|pose| pose.b)
            .collect())
    }
}

/// Motion sweep of a linkage.
///
/// Yields the input angle and its pose. Infeasible frames are yielded as
/// errors; the previous joint stays at the last feasible frame.
#[derive(Clone, Debug)]
pub struct Sweep<'a> {
    fb: &'a FourBar,
    start: f64,
    step: f64,
    n: usize,
    res: usize,
    branch: Branch,
    prev: Option<[f64; 2]>,
}

impl Sweep<'_> {
    /// The previous chosen joint position.
    pub fn prev(&self) -> Option<[f64; 2]> {
        self.prev
    }
}

impl Iterator for Sweep<'_> {
    type Item = (f64, Result<Pose>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.n >= self.res {
            return None;
        }
        let t = self.start + self.n as f64 * self.step;
        self.n += 1;
        let pose = self.fb.pos(t, self.branch, self.prev);
        if let Ok(pose) = &pose {
            self.prev = Some(pose.b);
        }
        Some((t, pose))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.res - self.n;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Sweep<'_> {}
