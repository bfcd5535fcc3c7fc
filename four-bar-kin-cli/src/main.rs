//! Command line tool of four-bar kinematics.
mod cli;

fn main() {
    cli::Entry::main();
}
