use crate::{error::check_len, Result};

/// Link lengths of a four-bar linkage.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct LinkLengths {
    /// Length of the crank (driver) link
    pub l1: f64,
    /// Length of the coupler link
    pub l2: f64,
    /// Length of the rocker (follower) link
    pub l3: f64,
    /// Length of the ground link
    pub l4: f64,
}

impl LinkLengths {
    /// Create a new instance.
    pub const fn new(l1: f64, l2: f64, l3: f64, l4: f64) -> Self {
        Self { l1, l2, l3, l4 }
    }

    /// Lengths must be non-negative and finite.
    pub fn check(&self) -> Result<()> {
        check_len(&self.to_array(), "link length")
    }

    /// Planar loop `[l1, l2, l3, l4]`.
    pub const fn to_array(&self) -> [f64; 4] {
        [self.l1, self.l2, self.l3, self.l4]
    }

    /// Lengths in ascending order `[s, p, q, l]`.
    pub fn sorted(&self) -> [f64; 4] {
        let mut v = self.to_array();
        v.sort_unstable_by(f64::total_cmp);
        v
    }

    /// Grashof condition `s + l <= p + q`.
    ///
    /// At least one link can fully rotate. The equal case is a Grashof
    /// change-point linkage.
    pub fn is_grashof(&self) -> bool {
        let [s, p, q, l] = self.sorted();
        s + l <= p + q
    }

    /// Return the type of the linkage.
    pub fn ty(&self) -> FourBarTy {
        FourBarTy::from_lengths(self)
    }
}

impl From<[f64; 4]> for LinkLengths {
    fn from([l1, l2, l3, l4]: [f64; 4]) -> Self {
        Self::new(l1, l2, l3, l4)
    }
}

/// Type of the four-bar linkage.
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
#[allow(clippy::upper_case_acronyms)]
pub enum FourBarTy {
    /// Grashof double crank (Drag-link, ground link is the shortest)
    GCCC,
    /// Grashof crank rocker (crank link is the shortest)
    GCRR,
    /// Grashof double rocker (coupler link is the shortest)
    GRCR,
    /// Grashof rocker crank (rocker link is the shortest)
    GRRC,
    /// Non-Grashof triple rocker (ground link is the longest)
    RRR1,
    /// Non-Grashof triple rocker (crank link is the longest)
    RRR2,
    /// Non-Grashof triple rocker (coupler link is the longest)
    RRR3,
    /// Non-Grashof triple rocker (rocker link is the longest)
    RRR4,
    /// Cannot be assembled
    Invalid,
}

impl FourBarTy {
    /// Detect from the link lengths.
    pub fn from_lengths(lengths: &LinkLengths) -> Self {
        if lengths.check().is_err() {
            return Self::Invalid;
        }
        let LinkLengths { l1, l2, l3, l4 } = *lengths;
        let [s, p, q, l] = lengths.sorted();
        if l > s + p + q {
            return Self::Invalid;
        }
        macro_rules! arms {
            ($d:expr, $crank:expr, $coupler:expr, $rocker:expr, $ground:expr) => {
                match $d {
                    d if d == l4 => $ground,
                    d if d == l1 => $crank,
                    d if d == l2 => $coupler,
                    d if d == l3 => $rocker,
                    _ => Self::Invalid,
                }
            };
        }
        if s + l <= p + q {
            arms!(s, Self::GCRR, Self::GRCR, Self::GRRC, Self::GCCC)
        } else {
            arms!(l, Self::RRR2, Self::RRR3, Self::RRR4, Self::RRR1)
        }
    }

    /// Name of the type.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GCCC => "Grashof double crank (Drag-link, GCCC)",
            Self::GCRR => "Grashof crank rocker (GCRR)",
            Self::GRCR => "Grashof double rocker (GRCR)",
            Self::GRRC => "Grashof rocker crank (GRRC)",
            Self::RRR1 => "Non-Grashof triple rocker (RRR1)",
            Self::RRR2 => "Non-Grashof triple rocker (RRR2)",
            Self::RRR3 => "Non-Grashof triple rocker (RRR3)",
            Self::RRR4 => "Non-Grashof triple rocker (RRR4)",
            Self::Invalid => "Invalid",
        }
    }

    /// Check if the type is valid.
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Return true if the type is Grashof linkage.
    pub const fn is_grashof(&self) -> bool {
        matches!(self, Self::GCCC | Self::GCRR | Self::GRCR | Self::GRRC)
    }

    /// Return true if the crank can fully rotate.
    pub const fn is_crank_rotatable(&self) -> bool {
        matches!(self, Self::GCCC | Self::GCRR)
    }
}

impl std::fmt::Display for FourBarTy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
