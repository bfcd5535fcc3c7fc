mod logger;
mod sim;
mod syn;

const APP_NAME: &str = env!("CARGO_BIN_NAME");

pub(crate) type AnyResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(clap::Parser)]
#[clap(name = APP_NAME, version, author, about, arg_required_else_help = true)]
pub(crate) struct Entry {
    #[clap(subcommand)]
    cmd: Cmd,
}

#[derive(clap::Subcommand)]
enum Cmd {
    /// Sweep the crank of a linkage through a full turn
    Sim(sim::Sim),
    /// Synthesize linkages from three precision point tasks (in RON format)
    Syn(syn::Syn),
}

impl Entry {
    pub(crate) fn main() {
        let entry = <Self as clap::Parser>::parse_from(wild::args());
        register_panic_hook();
        let res = match entry.cmd {
            Cmd::Sim(sim) => sim::sim(sim),
            Cmd::Syn(syn) => syn::syn(syn),
        };
        if let Err(e) = res {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

fn register_panic_hook() {
    // Print panic messages without stack trace
    std::panic::set_hook(Box::new(|info| {
        match info.payload().downcast_ref::<&str>() {
            Some(s) => eprintln!("{s}"),
            None => eprintln!("{info}"),
        }
        std::process::exit(1);
    }));
}

/// Parse a point from `x,y`.
pub(crate) fn parse_point(s: &str) -> Result<[f64; 2], String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expect `x,y`, found `{s}`"))?;
    let parse = |v: &str| v.trim().parse::<f64>().map_err(|e| format!("{e}: `{v}`"));
    Ok([parse(x)?, parse(y)?])
}
