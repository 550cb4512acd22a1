/*
 * SPDX-FileCopyrightText: 2026 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Command-line interface.
//!
//! The binary takes a format tag and an input and output path, computes the
//! rank vector, and writes it to the output file. A graph that fails to
//! converge within the iteration budget is reported with a warning, but its
//! best-effort rank vector is still written; any fault before the iteration
//! starts aborts without producing an output file.

use anyhow::{ensure, Context, Result};
use clap::Parser;
use dsi_progress_logger::prelude::*;
use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::graphs::{read_graph_file, write_ranks, GraphFormat};
use crate::rank::{power, Outcome, PowerIteration};

#[derive(Parser, Debug)]
#[command(name = "sparse-rank", version)]
#[command(about = "Computes the PageRank vector of a directed graph stored in a sparse-matrix text format.", long_about = None)]
pub struct CliArgs {
    /// The sparse-matrix encoding of the input file.
    #[arg(value_enum)]
    pub format: GraphFormat,

    /// The graph-description file.
    pub input: PathBuf,

    /// The file the rank vector will be written to, one "<vertex> <rank>"
    /// line per vertex.
    pub output: PathBuf,

    #[arg(long, default_value_t = power::DEFAULT_DAMPING)]
    /// The damping factor, in [0 . . 1).
    pub damping: f64,

    #[arg(long, default_value_t = power::DEFAULT_TOLERANCE)]
    /// The convergence tolerance on the ℓ₁ distance between successive rank
    /// vectors.
    pub tolerance: f64,

    #[arg(long, default_value_t = power::DEFAULT_MAX_ITER)]
    /// The iteration budget.
    pub max_iter: usize,
}

/// The entry point of the command-line interface.
pub fn main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = CliArgs::parse_from(args);

    ensure!(
        (0.0..1.0).contains(&args.damping),
        "The damping factor must be in [0 . . 1), got {}",
        args.damping
    );
    ensure!(
        args.tolerance > 0.0,
        "The tolerance must be positive, got {}",
        args.tolerance
    );
    ensure!(args.max_iter > 0, "The iteration budget must be positive");

    log::info!("Format: {}", args.format);
    log::info!("Input file: {}", args.input.display());
    log::info!("Output file: {}", args.output.display());

    let mut pl = ProgressLogger::default();
    pl.display_memory(true);

    pl.start("Reading input...");
    let matrix = read_graph_file(args.format, &args.input)
        .with_context(|| format!("Cannot read graph from {}", args.input.display()))?;
    pl.done_with_count(matrix.num_edges());
    log::info!(
        "{} vertices, {} edges",
        matrix.num_vertices(),
        matrix.num_edges()
    );

    let mut pr = PowerIteration::new(&matrix);
    pr.damping(args.damping)
        .tolerance(args.tolerance)
        .max_iter(args.max_iter);
    let outcome = pr.run_with_logging(&mut pl);

    if let Outcome::Exhausted { iterations } = outcome {
        log::warn!(
            "Solution has not converged: delta = {} after {} iterations",
            pr.delta(),
            iterations
        );
    }

    pl.start("Writing ranks...");
    let file = File::create(&args.output)
        .with_context(|| format!("Cannot create {}", args.output.display()))?;
    write_ranks(BufWriter::new(file), pr.rank())
        .with_context(|| format!("Cannot write ranks to {}", args.output.display()))?;
    pl.done_with_count(pr.rank().len());

    Ok(())
}
