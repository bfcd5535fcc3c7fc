use super::{logger::Logger, parse_point, AnyResult};
use four_bar_kin::{csv, plot, Branch, FourBar, Sign};
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct Sim {
    /// Crank pivot `x,y`
    #[clap(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
    oa: [f64; 2],
    /// Rocker pivot `x,y`
    #[clap(long, value_parser = parse_point, allow_hyphen_values = true)]
    ob: [f64; 2],
    /// Length of the crank link
    #[clap(long)]
    l1: f64,
    /// Length of the coupler link
    #[clap(long)]
    l2: f64,
    /// Length of the rocker link
    #[clap(long)]
    l3: f64,
    /// Number of frames in a full turn
    #[clap(long, default_value_t = 180)]
    res: usize,
    /// Start angle of the crank in degrees
    #[clap(long, default_value_t = 0., allow_hyphen_values = true)]
    start: f64,
    /// Branch selection of the coupler-rocker joint
    #[clap(long, value_enum, default_value_t = BranchArg::Closest)]
    branch: BranchArg,
    /// Save the feasible frames to a CSV file
    #[clap(long)]
    csv: Option<PathBuf>,
    /// Plot the linkage and its trace to a SVG file
    #[clap(long)]
    svg: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum BranchArg {
    /// Always the first candidate
    First,
    /// Always the plus candidate
    Plus,
    /// Always the minus candidate
    Minus,
    /// The candidate closest to the previous frame
    Closest,
}

impl From<BranchArg> for Branch {
    fn from(arg: BranchArg) -> Self {
        match arg {
            BranchArg::First => Self::PreferFirst,
            BranchArg::Plus => Self::PreferSign(Sign::Plus),
            BranchArg::Minus => Self::PreferSign(Sign::Minus),
            BranchArg::Closest => Self::PreferClosestToPrevious,
        }
    }
}

pub(super) fn sim(sim: Sim) -> AnyResult {
    let Sim { oa, ob, l1, l2, l3, res, start, branch, csv: csv_path, svg: svg_path } = sim;
    let fb = FourBar::new(oa, ob, l1, l2, l3);
    let branch = Branch::from(branch);
    let start = start.to_radians();
    let mut frames = Vec::with_capacity(res);
    let mut skipped = 0;
    for (t, pose) in fb.sweep_turn(start, res, branch)? {
        match pose {
            Ok(pose) => frames.push(csv::Frame::new(t, &pose)),
            Err(e) if e.is_recoverable() => skipped += 1,
            Err(e) => return Err(e.into()),
        }
    }
    let mut log = Logger::new(std::io::stdout());
    log.title("linkage")?;
    log.log(&fb)?;
    log.title("type")?;
    log.item("lengths", &fb.link_lengths())?;
    log.item("grashof", &fb.link_lengths().is_grashof())?;
    log.item("type", fb.ty().name())?;
    log.title("sweep")?;
    log.item("res", &res)?;
    log.item("branch", &branch.to_string())?;
    log.item("feasible", &frames.len())?;
    log.item("skipped", &skipped)?;
    log.flush()?;
    if let Some(path) = csv_path {
        std::fs::write(&path, csv::dump_csv(frames)?)?;
        println!("Saved to: {}", path.display());
    }
    if let Some(path) = svg_path {
        let svg = plot::SVGBackend::new(&path, (800, 800));
        plot::plot_sweep(svg, "Four-bar Linkage", &fb, start, res, branch)?;
        println!("Saved to: {}", path.display());
    }
    Ok(())
}
