//! CLI entry point for the wave function collapse maze generator

use clap::Parser;
use mazewave::io::cli::{Cli, MazeRunner};

fn main() -> mazewave::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let summary = MazeRunner::from_cli(&cli).run()?;

    log::info!(
        "Finished {}x{} maze (seed {}): {} solver steps, {} repair steps, {} forced openings, {} contradictions",
        summary.columns,
        summary.rows,
        summary.seed,
        summary.solver_steps,
        summary.repair_steps,
        summary.forced_connections,
        summary.contradictions.len()
    );
    Ok(())
}
