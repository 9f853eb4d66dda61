//! Export helpers for trajectory CSV and run-summary JSON artifacts.

pub mod trajectory {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Column names for a run with `dimensions` spatial axes and `bodies` bodies.
    ///
    /// Positions and velocities are body-major: `pos{body}_{dim}`, `vel{body}_{dim}`.
    pub fn header(dimensions: usize, bodies: usize) -> String {
        let mut columns = vec!["time".to_string()];
        for prefix in ["pos", "vel"] {
            for body in 0..bodies {
                for dim in 0..dimensions {
                    columns.push(format!("{prefix}{body}_{dim}"));
                }
            }
        }
        columns.extend(["kinetic", "potential", "energy"].map(String::from));
        for dim in 0..dimensions {
            columns.push(format!("p_{dim}"));
        }
        columns.join(",")
    }

    /// Write the trajectory CSV header.
    pub fn write_header(writer: &mut dyn Write, dimensions: usize, bodies: usize) -> io::Result<()> {
        writeln!(writer, "{}", header(dimensions, bodies))
    }

    /// CSV row emitted for each trajectory point, matching [`header`] ordering.
    #[derive(Debug, Clone)]
    pub struct Row<'a> {
        pub time: f64,
        pub positions: &'a [f64],
        pub velocities: &'a [f64],
        pub kinetic: f64,
        pub potential: f64,
        pub energy: f64,
        pub momentum: &'a [f64],
    }

    impl Row<'_> {
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            write!(writer, "{:e}", self.time)?;
            for value in self.positions.iter().chain(self.velocities) {
                write!(writer, ",{value:e}")?;
            }
            write!(
                writer,
                ",{:e},{:e},{:e}",
                self.kinetic, self.potential, self.energy
            )?;
            for value in self.momentum {
                write!(writer, ",{value:e}")?;
            }
            writeln!(writer)
        }
    }
}

pub mod summary {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::Path;

    /// Pair of bodies that stopped a run.
    #[derive(Debug, Clone, Serialize)]
    pub struct CollisionSummary {
        pub time: f64,
        pub first_body: String,
        pub second_body: String,
        pub separation: f64,
        pub safe_distance: f64,
    }

    /// Envelope describing one finished run.
    #[derive(Debug, Clone, Serialize)]
    pub struct RunSummary {
        pub scenario: String,
        pub method: String,
        pub step: f64,
        pub start: f64,
        pub end: f64,
        pub completed: bool,
        pub collision: Option<CollisionSummary>,
        pub points: usize,
        pub initial_energy: f64,
        pub final_energy: f64,
        pub relative_energy_drift: f64,
        pub max_relative_energy_deviation: f64,
        pub final_momentum: Vec<f64>,
        pub generated_at: String,
    }

    /// Write all run summaries as one pretty-printed JSON array.
    pub fn write_summaries(output: &Path, runs: &[RunSummary]) -> io::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        to_writer_pretty(File::create(output)?, runs)?;
        Ok(())
    }
}
