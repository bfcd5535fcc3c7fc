use super::{logger::Logger, AnyResult};
use four_bar_kin::{plot, syn::Task};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

#[derive(clap::Args)]
pub(super) struct Syn {
    /// Task files in RON format
    #[clap(required = true)]
    files: Vec<PathBuf>,
    /// Plot the result beside the task file (in SVG format)
    #[clap(long)]
    svg: bool,
}

#[derive(Debug)]
enum SynErr {
    // Unsupported format
    Format,
    // Reading file error
    Io(std::io::Error),
    // Deserialization error
    Ron(ron::error::SpannedError),
    // Solver error
    Solver(four_bar_kin::Error),
    // Plotting error
    Plot(Box<dyn std::error::Error>),
}

impl std::fmt::Display for SynErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Format => write!(f, "unsupported format"),
            Self::Io(e) => write!(f, "reading file error: {e}"),
            Self::Ron(e) => write!(f, "ron deserialization error: {e}"),
            Self::Solver(e) => write!(f, "{e}"),
            Self::Plot(e) => write!(f, "plotting error: {e}"),
        }
    }
}

/// Task file, the arity is checked after loading.
#[derive(serde::Deserialize)]
struct TaskFile {
    pps: Vec<[f64; 2]>,
    theta: Vec<f64>,
    beta: Vec<f64>,
    gamma: Vec<f64>,
}

pub(super) fn syn(syn: Syn) -> AnyResult {
    let Syn { files, svg } = syn;
    let mut failed = 0;
    for file in files {
        if let Err(e) = run(&file, svg) {
            println!("[{}] {e}", file.display());
            failed += 1;
        }
    }
    if failed > 0 {
        Err(format!("{failed} task(s) failed").into())
    } else {
        Ok(())
    }
}

fn load(path: &Path) -> Result<Task, SynErr> {
    match path.extension().and_then(OsStr::to_str) {
        Some("ron") => (),
        _ => return Err(SynErr::Format),
    }
    let s = std::fs::read_to_string(path).map_err(SynErr::Io)?;
    parse(&s)
}

fn parse(s: &str) -> Result<Task, SynErr> {
    let TaskFile { pps, theta, beta, gamma } = ron::from_str(s).map_err(SynErr::Ron)?;
    Task::from_slices(&pps, &theta, &beta, &gamma).map_err(SynErr::Solver)
}

fn run(path: &Path, svg: bool) -> Result<(), SynErr> {
    let task = load(path)?;
    let ans = task.solve().map_err(SynErr::Solver)?;
    let title = path.file_stem().and_then(OsStr::to_str).unwrap_or("task");
    let report = || -> std::io::Result<()> {
        let mut log = Logger::new(std::io::stdout());
        log.title(title)?;
        log.item("file", &path.display().to_string())?;
        log.title("task")?;
        log.log(&task)?;
        log.title("result")?;
        log.log(&ans)?;
        log.title("type")?;
        log.item("joints", &ans.joints())?;
        log.item("type", ans.ty().name())?;
        log.item("residual", &task.residual(&ans))?;
        log.flush()
    };
    report().map_err(SynErr::Io)?;
    if svg {
        let path = path.with_extension("svg");
        let backend = plot::SVGBackend::new(&path, (800, 800));
        plot::plot_syn(backend, "Three Precision Point Synthesis", &task, &ans)
            .map_err(|e| SynErr::Plot(e.into()))?;
        println!("Saved to: {}", path.display());
    }
    Ok(())
}
