use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{BoxConfig, Simulation, DIM};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn to_array2(rows: &[[f64; DIM]]) -> Array2<f64> {
    let mut arr = Array2::<f64>::zeros((rows.len(), DIM));
    for (i, row) in rows.iter().enumerate() {
        for k in 0..DIM {
            arr[[i, k]] = row[k];
        }
    }
    arr
}

/// Python-facing wrapper around the Rust Simulation kernel.
///
/// API:
/// - __new__(initial, bounds=(0, 10, 0, 10), dt=0.01, diameter=0.3)
/// - step(), advance(steps)
/// - get_positions() / get_velocities() -> np.ndarray, shape (N, 2)
/// - time(), num_particles(), kinetic_energy()
#[pyclass]
pub struct BallBox {
    sim: Simulation,
}

#[pymethods]
impl BallBox {
    /// Create a simulation from an (N, 4) array of [x, y, vx, vy] rows.
    ///
    /// Parameters
    /// - initial: float64 array of shape (N, 4)
    /// - bounds: (left, right, bottom, top)
    /// - dt: integration step (> 0)
    /// - diameter: shared collision diameter (> 0)
    ///
    /// Errors: raises ValueError on invalid parameters or out-of-box positions.
    #[new]
    #[pyo3(signature = (initial, bounds=(0.0, 10.0, 0.0, 10.0), dt=0.01, diameter=0.3))]
    fn new(
        initial: PyReadonlyArray2<'_, f64>,
        bounds: (f64, f64, f64, f64),
        dt: f64,
        diameter: f64,
    ) -> PyResult<Self> {
        let arr = initial.as_array();
        if arr.shape()[1] != 4 {
            return Err(py_err(format!(
                "initial must have shape (N, 4), got {:?}",
                arr.shape()
            )));
        }
        let rows: Vec<[f64; 4]> = arr
            .rows()
            .into_iter()
            .map(|r| [r[0], r[1], r[2], r[3]])
            .collect();
        let (box_l, box_r, box_d, box_u) = bounds;
        let cfg = BoxConfig::new(box_l, box_r, box_d, box_u, dt, diameter).map_err(py_err)?;
        let sim = Simulation::new(cfg, &rows).map_err(py_err)?;
        Ok(Self { sim })
    }

    /// Advance one step (releases the GIL during computation).
    fn step(&mut self, py: Python<'_>) -> PyResult<()> {
        py.detach(|| self.sim.step()).map_err(py_err)
    }

    /// Advance `steps` consecutive steps (releases the GIL during computation).
    fn advance(&mut self, py: Python<'_>, steps: usize) -> PyResult<()> {
        py.detach(|| self.sim.advance(steps)).map_err(py_err)
    }

    /// Return positions as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        to_array2(&self.sim.positions()).into_pyarray(py).unbind()
    }

    /// Return velocities as a NumPy array of shape (N, 2), dtype=float64.
    fn get_velocities(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        to_array2(&self.sim.velocities()).into_pyarray(py).unbind()
    }

    /// Return the elapsed simulation time in seconds (shared by all particles).
    fn time(&self) -> f64 {
        self.sim.time()
    }

    /// Return the number of particles N (fixed for the lifetime of the simulation).
    fn num_particles(&self) -> usize {
        self.sim.num_particles()
    }

    /// Return the total kinetic energy 1/2 * sum |v|^2 for unit masses (diagnostic).
    fn kinetic_energy(&self) -> f64 {
        self.sim.kinetic_energy()
    }
}

/// The ballbox Python module entry point.
#[pymodule]
fn ballbox(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<BallBox>()?;
    Ok(())
}
