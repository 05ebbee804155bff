//! Plain-text writers for run output: trajectory snapshots, the energy
//! series, and the random field grid. The renderer/plotter downstream
//! decides what to do with them; nothing here imposes a cadence.

use std::fs::File;
use std::io::{BufWriter, Write};

use nalgebra::DMatrix;

use crate::errors::{Result, SimError};
use crate::simulation::engine::RunResult;

fn wrap_io(path: &str, source: std::io::Error) -> SimError {
    SimError::OutputFileError {
        path: path.to_string(),
        source,
    }
}

/// Streams trajectory snapshots to a whitespace-separated text file, one
/// record per body per step: `step t body x y z`.
pub struct TrajWriter {
    path: String,
    out: BufWriter<File>,
}

impl TrajWriter {
    pub fn create(path: &str) -> Result<Self> {
        let file = File::create(path).map_err(|e| wrap_io(path, e))?;
        Ok(Self {
            path: path.to_string(),
            out: BufWriter::new(file),
        })
    }

    pub fn write_snapshot(
        &mut self,
        step: usize,
        t: f64,
        positions: &[crate::simulation::states::Vec3],
    ) -> Result<()> {
        for (body, x) in positions.iter().enumerate() {
            writeln!(self.out, "{} {} {} {} {} {}", step, t, body, x.x, x.y, x.z)
                .map_err(|e| wrap_io(&self.path, e))?;
        }
        Ok(())
    }

    pub fn write_run(&mut self, result: &RunResult) -> Result<()> {
        for (step, (t, positions)) in result.times.iter().zip(&result.trajectory).enumerate() {
            self.write_snapshot(step, *t, positions)?;
        }
        Ok(())
    }
}

/// Write the energy series as `step t kinetic potential total` rows.
pub fn write_energy_series(path: &str, result: &RunResult) -> Result<()> {
    let file = File::create(path).map_err(|e| wrap_io(path, e))?;
    let mut out = BufWriter::new(file);
    for (step, (t, e)) in result.times.iter().zip(&result.energies).enumerate() {
        writeln!(
            out,
            "{} {} {} {} {}",
            step,
            t,
            e.kinetic,
            e.potential,
            e.total()
        )
        .map_err(|e| wrap_io(path, e))?;
    }
    Ok(())
}

/// Write a field grid as CSV, one matrix row per line.
pub fn write_field_csv(path: &str, field: &DMatrix<f64>) -> Result<()> {
    let file = File::create(path).map_err(|e| wrap_io(path, e))?;
    let mut out = BufWriter::new(file);
    for row in 0..field.nrows() {
        let line = (0..field.ncols())
            .map(|col| field[(row, col)].to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(out, "{}", line).map_err(|e| wrap_io(path, e))?;
    }
    Ok(())
}
