//! Four-bar kinematics: position analysis and three precision point
//! synthesis of planar four-bar linkages.
//!
//! Position analysis solves the coupler/follower joint of a linkage at a
//! given input angle:
//!
//! ```
//! use four_bar_kin::{Branch, FourBar};
//!
//! let fb = FourBar::new([0., 0.], [10., 0.], 4., 6., 7.);
//! let pose = fb.pos(0., Branch::PreferFirst, None).unwrap();
//! assert!((pose.b[0] - 5.9167).abs() < 1e-4);
//! ```
//!
//! Dimensional synthesis finds the linkage that passes through three
//! precision points:
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
//! println!("{}", ans.ty().name());
//! ```
#![warn(missing_docs)]
pub use crate::{error::*, fb::*, pos::*, ty::*};
#[doc(no_inline)]
pub use nalgebra as na;

#[cfg(feature = "csv")]
pub mod csv;
mod error;
mod fb;
#[cfg(feature = "plot")]
pub mod plot;
mod pos;
pub mod syn;
#[cfg(test)]
mod tests;
mod ty;
