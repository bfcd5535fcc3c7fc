//! The functions used to plot the motion sweep and the synthesis result.
//!
//! ```
//! use four_bar_kin::{plot::*, Branch, FourBar};
//!
//! let fb = FourBar::example();
//! let mut buf = String::new();
//! let svg = SVGBackend::with_string(&mut buf, (800, 800));
//! plot_sweep(svg, "Linkage", &fb, 0., 180, Branch::default()).unwrap();
//! ```
use crate::{
    syn::{SynResult, Task},
    Branch, FourBar, Pose,
};
#[doc(no_inline)]
pub use plotters::{prelude::*, *};

/// Get font setting.
pub fn font() -> TextStyle<'static> {
    ("Times New Roman", 24).into_font().color(&BLACK)
}

/// Plot the linkage with the trace of its coupler-rocker joint, swept a full
/// turn from the input angle `start` (in radians) with `res` frames.
///
/// The links are drawn at the feasible frame closest to `start`, and are
/// left out if the linkage cannot be assembled at all.
pub fn plot_sweep<B>(
    backend: B,
    title: &str,
    fb: &FourBar,
    start: f64,
    res: usize,
    branch: Branch,
) -> anyhow::Result<()>
where
    B: DrawingBackend,
    B::ErrorType: 'static,
{
    let mut curve = Vec::with_capacity(res);
    let mut nearest = None::<(usize, Pose)>;
    for (n, (_, pose)) in fb.sweep_turn(start, res, branch)?.enumerate() {
        match pose {
            Ok(pose) => {
                curve.push(pose.b);
                // Frames at the end of the turn are just behind `start`
                let d = n.min(res - n);
                if !matches!(nearest, Some((d0, _)) if d0 <= d) {
                    nearest = Some((d, pose));
                }
            }
            Err(e) if e.is_recoverable() => (),
            Err(e) => return Err(e.into()),
        }
    }
    let linkage = nearest.map(|(_, pose)| [fb.oa, pose.a, pose.b, fb.ob]);
    let pivots = [fb.oa, fb.ob];
    let joints = linkage.as_ref().map_or(&pivots[..], |l| &l[..]);
    let [x_min, x_max, y_min, y_max] = bounding_box(&[&curve[..], joints]);
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, font())
        .set_label_area_size(LabelAreaPosition::Left, (8).percent())
        .set_label_area_size(LabelAreaPosition::Bottom, (4).percent())
        .margin((8).percent())
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_label_style(font())
        .y_label_style(font())
        .draw()?;
    if let Some(linkage) = linkage {
        let links = [("Input", BLUE, 0), ("Coupler", RED, 1), ("Output", MAGENTA, 2)];
        for (label, color, i) in links {
            let [p, q] = [linkage[i], linkage[i + 1]];
            chart
                .draw_series(LineSeries::new([(p[0], p[1]), (q[0], q[1])], color.stroke_width(3)))?
                .label(label)
                .legend(move |(x, y)| PathElement::new([(x, y), (x + 20, y)], color.stroke_width(3)));
        }
    }
    let pivots = joints.iter().map(|&[x, y]| Circle::new((x, y), 5, BLACK.filled()));
    chart.draw_series(pivots)?;
    let color = GREEN.mix(0.6);
    chart
        .draw_series(LineSeries::new(curve.iter().map(|&[x, y]| (x, y)), color))?
        .label("Tip Path")
        .legend(move |(x, y)| PathElement::new([(x, y), (x + 20, y)], color));
    chart
        .configure_series_labels()
        .background_style(WHITE)
        .border_style(BLACK)
        .label_font(font())
        .draw()?;
    Ok(())
}

/// Plot the dyad vectors of the synthesized linkage with its precision
/// points.
pub fn plot_syn<B>(backend: B, title: &str, task: &Task, ans: &SynResult) -> anyhow::Result<()>
where
    B: DrawingBackend,
    B::ErrorType: 'static,
{
    let [a, b] = ans.joints();
    let p1 = task.pps[0];
    let pts = [ans.oa, ans.ob, a, b, p1, task.pps[1], task.pps[2]];
    let [x_min, x_max, y_min, y_max] = bounding_box(&[&pts[..]]);
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, font())
        .set_label_area_size(LabelAreaPosition::Left, (8).percent())
        .set_label_area_size(LabelAreaPosition::Bottom, (4).percent())
        .margin((8).percent())
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .x_label_style(font())
        .y_label_style(font())
        .draw()?;
    let vectors = [
        ("W_A", RED, ans.oa, a),
        ("Z_A", BLUE, a, p1),
        ("W_B", MAGENTA, ans.ob, b),
        ("Z_B", GREEN, b, p1),
    ];
    for (label, color, p, q) in vectors {
        let style = color.stroke_width(3);
        chart
            .draw_series(LineSeries::new([(p[0], p[1]), (q[0], q[1])], style))?
            .label(label)
            .legend(move |(x, y)| PathElement::new([(x, y), (x + 20, y)], style));
        chart.draw_series([TriangleMarker::new((q[0], q[1]), 7, color.filled())])?;
    }
    let coupler = LineSeries::new([(a[0], a[1]), (b[0], b[1])], BLACK.stroke_width(1));
    chart
        .draw_series(coupler)?
        .label("Coupler")
        .legend(|(x, y)| PathElement::new([(x, y), (x + 20, y)], BLACK));
    chart.draw_series([ans.oa, ans.ob].map(|[x, y]| Circle::new((x, y), 6, BLACK.filled())))?;
    for (i, [x, y]) in task.pps.into_iter().enumerate() {
        chart.draw_series([Cross::new((x, y), 6, BLACK.stroke_width(2))])?;
        chart.draw_series([Text::new(format!("PP{}", i + 1), (x, y), font())])?;
    }
    chart
        .configure_series_labels()
        .background_style(WHITE)
        .border_style(BLACK)
        .label_font(font())
        .draw()?;
    Ok(())
}

/// Get the square bounding box `[x_min, x_max, y_min, y_max]` of the points.
pub fn bounding_box(pts: &[&[[f64; 2]]]) -> [f64; 4] {
    let [mut x_min, mut x_max] = [f64::INFINITY, -f64::INFINITY];
    let [mut y_min, mut y_max] = [f64::INFINITY, -f64::INFINITY];
    for &[x, y] in pts.iter().flat_map(|pts| pts.iter()) {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !x_min.is_finite() {
        return [-1., 1., -1., 1.];
    }
    let dx = x_max - x_min;
    let dy = y_max - y_min;
    // Margin for the markers
    let r = dx.max(dy).max(f64::EPSILON) * 0.55;
    let [cx, cy] = [(x_min + x_max) * 0.5, (y_min + y_max) * 0.5];
    [cx - r, cx + r, cy - r, cy + r]
}
