//! Functions for reading/writing the motion sweep in CSV format.
use crate::Pose;
pub use csv::Error;
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// A row of the motion sweep, the input angle is in degrees.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Input angle
    pub angle: f64,
    /// X of the crank tip
    pub ax: f64,
    /// Y of the crank tip
    pub ay: f64,
    /// X of the coupler-rocker joint
    pub bx: f64,
    /// Y of the coupler-rocker joint
    pub by: f64,
}

impl Frame {
    /// Create a row from the input angle (in radians) and its pose.
    pub fn new(t: f64, pose: &Pose) -> Self {
        let Pose { a: [ax, ay], b: [bx, by] } = *pose;
        Self { angle: t.to_degrees(), ax, ay, bx, by }
    }

    /// Back to the pose.
    pub fn pose(&self) -> Pose {
        Pose { a: [self.ax, self.ay], b: [self.bx, self.by] }
    }
}

/// Parse the frames from string, the header line and `#` comments are
/// skipped.
pub fn parse_csv(s: &str) -> Result<Vec<Frame>, Error> {
    ReaderBuilder::new()
        .has_headers(true)
        .comment(Some(b'#'))
        .from_reader(Cursor::new(s))
        .deserialize()
        .collect()
}

/// Dump the frames to string with a header line.
pub fn dump_csv<I>(frames: I) -> Result<String, Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = Frame>,
{
    let mut w = WriterBuilder::new().has_headers(true).from_writer(Vec::new());
    frames.into_iter().try_for_each(|f| w.serialize(f))?;
    Ok(String::from_utf8(w.into_inner()?)?)
}
