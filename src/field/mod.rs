//! Quasi-static extracellular field coupling between point current sources
//! and the fiber
//!
//! The potential a point source produces in an infinite homogeneous medium is
//! `phi = I / (4 * pi * sigma * r)`. Contributions of multiple sources
//! superpose linearly, so the geometry dependent part is precomputed once as
//! a transfer matrix and the per step work reduces to a matrix vector product
//! over the live source currents.
//!
//! The driver owns the simulation loop: at every step the full potential
//! sweep is written to the solver before the solver is advanced, with source
//! currents read at the start of the step (explicit field, implicit membrane
//! staggering).

use std::f64::consts::PI;
use ndarray::{Array1, Array2};
use rayon::prelude::*;
use crate::error::{FieldError, MyelinatedAxonError};
use crate::fiber::{CompartmentId, Fiber};


/// Membrane voltage above which a compartment counts as activated (mV)
pub const ACTIVATION_THRESHOLD: f64 = 0.;

/// An extracellular point current source
///
/// The position is relative to the fiber coordinate frame: the fiber runs
/// along the x axis with its midpoint at the origin. The live current is
/// owned by the solver's stimulus waveform and read back each step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointCurrentSource {
    /// Position along the fiber axis (mm)
    pub x: f64,
    /// Perpendicular offset from the fiber (mm)
    pub y: f64,
    /// Out of plane offset (mm)
    pub z: f64,
}

impl PointCurrentSource {
    /// Returns a source at the given position in millimeters
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        PointCurrentSource { x, y, z }
    }
}

/// How source to compartment distance is measured, selects between the
/// electrode geometries that would otherwise each need their own driver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DistanceMetric {
    /// Axial distance only, source collinear with the fiber
    Axial,
    /// In plane distance, source in the plane of the fiber (x and y)
    InPlane,
    /// Full euclidean distance
    Full,
}

impl DistanceMetric {
    fn distance(&self, source: &PointCurrentSource, position_mm: f64) -> f64 {
        let dx = position_mm - source.x;

        match self {
            DistanceMetric::Axial => dx.abs(),
            DistanceMetric::InPlane => (dx.powi(2) + source.y.powi(2)).sqrt(),
            DistanceMetric::Full => {
                (dx.powi(2) + source.y.powi(2) + source.z.powi(2)).sqrt()
            },
        }
    }
}

/// Solver boundary the field driver writes into and advances
///
/// The solver owns the membrane voltages and the stimulus waveforms, the
/// driver owns the extracellular potentials, and neither writes the other's
/// state. Compartments are addressed by the opaque [`CompartmentId`] handles
/// of the fiber the solver was attached to.
pub trait CableSolver {
    /// Integrates one fixed timestep
    fn step_once(&mut self);

    /// Sets a compartment's extracellular boundary potential (mV) for the
    /// upcoming step
    fn set_extracellular_potential(&mut self, compartment: CompartmentId, potential: f64);

    /// Instantaneous membrane voltage of a compartment (mV)
    fn membrane_voltage(&self, compartment: CompartmentId) -> f64;

    /// Current of the stimulus waveform attached to source `source` (mA)
    /// at the solver's present clock
    fn source_current(&self, source: usize) -> f64;
}

/// Membrane voltages of designated compartments recorded once per step
#[derive(Clone, Debug)]
pub struct VoltageHistory {
    /// Recorded voltages, one row per step and one column per compartment
    pub voltages: Array2<f64>,
    /// The recorded compartments, in column order
    pub compartments: Vec<CompartmentId>,
}

impl VoltageHistory {
    fn new(compartments: &[CompartmentId], steps: usize) -> Self {
        VoltageHistory {
            voltages: Array2::zeros((steps, compartments.len())),
            compartments: compartments.to_vec(),
        }
    }

    fn column(&self, compartment: CompartmentId) -> Option<usize> {
        self.compartments.iter().position(|i| *i == compartment)
    }

    /// Peak membrane voltage of a recorded compartment over the run
    pub fn peak(&self, compartment: CompartmentId) -> Option<f64> {
        let column = self.column(compartment)?;

        self.voltages.column(column)
            .iter()
            .copied()
            .reduce(f64::max)
    }

    /// Whether a recorded compartment's peak voltage crossed
    /// [`ACTIVATION_THRESHOLD`] anywhere in the run
    pub fn activated(&self, compartment: CompartmentId) -> Option<bool> {
        self.peak(compartment).map(|peak| peak > ACTIVATION_THRESHOLD)
    }
}

/// Recomputes the extracellular potential at every compartment each step and
/// injects it into the solver strictly before that step's advance
#[derive(Clone, Debug)]
pub struct FieldDriver {
    sources: Vec<PointCurrentSource>,
    conductivity: f64,
    metric: DistanceMetric,
    /// `transfer[(i, s)] = 1 / (4 * pi * sigma * r_is)`, fixed geometry
    transfer: Array2<f64>,
}

impl FieldDriver {
    /// Builds a driver for the given fiber, sources, and extracellular
    /// medium conductivity in S/mm
    ///
    /// Fails fast with a configuration error if the conductivity is not
    /// positive or any source coincides with a compartment center, before
    /// any solver state is touched
    pub fn new(
        fiber: &Fiber,
        sources: Vec<PointCurrentSource>,
        conductivity: f64,
        metric: DistanceMetric,
    ) -> Result<FieldDriver, MyelinatedAxonError> {
        if conductivity <= 0. {
            return Err(FieldError::NonPositiveConductivity(conductivity).into());
        }

        let positions: Vec<f64> = fiber.compartments()
            .iter()
            .map(|compartment| compartment.position_mm())
            .collect();

        let rows: Vec<Vec<f64>> = positions.par_iter()
            .enumerate()
            .map(|(compartment, position)| {
                sources.iter()
                    .enumerate()
                    .map(|(source, point)| {
                        let r = metric.distance(point, *position);
                        if r == 0. {
                            return Err(FieldError::DegenerateSourcePlacement {
                                source,
                                compartment,
                            });
                        }

                        Ok(1. / (4. * PI * conductivity * r))
                    })
                    .collect()
            })
            .collect::<Result<Vec<Vec<f64>>, FieldError>>()?;

        let mut transfer = Array2::zeros((positions.len(), sources.len()));
        for (i, row) in rows.iter().enumerate() {
            for (s, coefficient) in row.iter().enumerate() {
                transfer[(i, s)] = *coefficient;
            }
        }

        Ok(FieldDriver {
            sources,
            conductivity,
            metric,
            transfer,
        })
    }

    /// The configured point sources
    pub fn sources(&self) -> &[PointCurrentSource] {
        &self.sources
    }

    /// Extracellular medium conductivity (S/mm)
    pub fn conductivity(&self) -> f64 {
        self.conductivity
    }

    /// The configured distance metric
    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Potential snapshot for the given source currents (mA), superposed
    /// over all sources, one value per compartment (mV)
    pub fn potentials_for_currents(&self, currents: &[f64]) -> Array1<f64> {
        let currents = Array1::from_iter(currents.iter().copied());

        self.transfer.dot(&currents)
    }

    /// Potential snapshot for the solver's present source currents
    pub fn potentials<S: CableSolver>(&self, solver: &S) -> Array1<f64> {
        let currents: Vec<f64> = (0..self.sources.len())
            .map(|source| solver.source_current(source))
            .collect();

        self.potentials_for_currents(&currents)
    }

    /// Computes the full potential sweep and writes it into the solver
    pub fn inject<S: CableSolver>(&self, solver: &mut S) {
        let potentials = self.potentials(solver);

        for (index, potential) in potentials.iter().enumerate() {
            solver.set_extracellular_potential(CompartmentId(index), *potential);
        }
    }

    /// Runs the explicit control loop for a fixed number of steps: inject
    /// the field, then advance the solver, every step
    pub fn run<S: CableSolver>(&self, solver: &mut S, steps: usize) {
        for _ in 0..steps {
            self.inject(solver);
            solver.step_once();
        }
    }

    /// Same as [`FieldDriver::run`] while recording the membrane voltage of
    /// the given compartments after every step
    pub fn run_recording<S: CableSolver>(
        &self,
        solver: &mut S,
        steps: usize,
        recorded: &[CompartmentId],
    ) -> VoltageHistory {
        let mut history = VoltageHistory::new(recorded, steps);

        for step in 0..steps {
            self.inject(solver);
            solver.step_once();

            for (column, compartment) in recorded.iter().enumerate() {
                history.voltages[(step, column)] = solver.membrane_voltage(*compartment);
            }
        }

        history
    }
}
