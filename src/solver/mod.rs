//! A reference implementation of the [`CableSolver`] boundary
//!
//! Integrates the membrane voltages of a [`Fiber`] with a backward Euler
//! step: the chain of compartments is a single unbranched path, so each step
//! reduces to one tridiagonal solve (Thomas algorithm) with the gating
//! variables and the injected extracellular potentials held at their start
//! of step values. Gates advance explicitly from their alpha and beta rates
//! after the voltage solve.
//!
//! Nodes of Ranvier carry the nonlinear channel set of the MRG model
//! (fast Na+, persistent Na+, slow K+, and leak), myelinated compartments
//! are passive. Stimulus waveforms live here as well, evaluated on the
//! solver's own clock and read back by the field driver each step.

use crate::fiber::{CompartmentId, Fiber, Membrane};
use crate::field::CableSolver;

mod axnode;
pub use axnode::{AxnodeChannels, AxnodeParameters};


/// A rectangular stimulus pulse configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StimulusWaveform {
    /// Single rectangular phase
    Monophasic {
        /// Pulse onset (ms)
        delay: f64,
        /// Pulse width (ms)
        duration: f64,
        /// Pulse current, negative for cathodic stimulation (mA)
        amplitude: f64,
    },
    /// Two rectangular phases of opposite polarity and equal width
    Biphasic {
        /// First phase onset (ms)
        delay: f64,
        /// Width of each phase (ms)
        phase_duration: f64,
        /// First phase current (mA), the second phase is its negation
        amplitude: f64,
    },
}

impl StimulusWaveform {
    /// Instantaneous current of the waveform at time `t` in milliseconds
    pub fn current(&self, t: f64) -> f64 {
        match self {
            StimulusWaveform::Monophasic { delay, duration, amplitude } => {
                if t >= *delay && t < delay + duration {
                    *amplitude
                } else {
                    0.
                }
            },
            StimulusWaveform::Biphasic { delay, phase_duration, amplitude } => {
                if t >= *delay && t < delay + phase_duration {
                    *amplitude
                } else if t >= delay + phase_duration && t < delay + 2. * phase_duration {
                    -*amplitude
                } else {
                    0.
                }
            },
        }
    }
}

/// Series combination of two layer densities (capacitance or conductance
/// per unit area)
fn series(a: f64, b: f64) -> f64 {
    a * b / (a + b)
}

/// Membrane mechanism of one chain position as the solver sees it
#[derive(Clone, Debug)]
enum SolverMembrane {
    /// Passive leak, lumped conductance in mS and reversal in mV
    Passive {
        g: f64,
        e: f64,
    },
    /// Active nodal membrane with its surface area in cm2
    Active {
        channels: AxnodeChannels,
        area: f64,
    },
}

impl SolverMembrane {
    /// Lumped membrane conductance (mS) with gating frozen at its present
    /// state
    fn conductance(&self) -> f64 {
        match self {
            SolverMembrane::Passive { g, .. } => *g,
            SolverMembrane::Active { channels, area } => {
                channels.conductance_density() * area * 1000.
            },
        }
    }

    /// Reversal weighted current term (uA) matching [`Self::conductance`]
    fn reversal_current(&self) -> f64 {
        match self {
            SolverMembrane::Passive { g, e } => g * e,
            SolverMembrane::Active { channels, area } => {
                channels.reversal_current_density() * area * 1000.
            },
        }
    }
}

/// Backward Euler cable solver over a fiber chain
///
/// Owns the membrane voltages and the stimulus waveforms, one waveform per
/// extracellular point source in source order. The field driver owns the
/// extracellular potentials it injects through
/// [`CableSolver::set_extracellular_potential`].
#[derive(Clone, Debug)]
pub struct ReferenceCableSolver {
    dt: f64,
    t: f64,
    /// Maps a compartment handle onto its chain position
    chain_position: Vec<usize>,
    /// Membrane capacitance over dt (uF/ms) per chain position
    c_over_dt: Vec<f64>,
    /// Axial conductance (mS) between chain positions k and k + 1
    axial_g: Vec<f64>,
    membranes: Vec<SolverMembrane>,
    /// Membrane voltage (mV) per chain position
    v: Vec<f64>,
    /// Injected extracellular potential (mV) per chain position
    e_ext: Vec<f64>,
    waveforms: Vec<StimulusWaveform>,
    // scratch buffers for the tridiagonal solve
    diag: Vec<f64>,
    upper: Vec<f64>,
    rhs: Vec<f64>,
}

impl ReferenceCableSolver {
    /// Attaches a solver to a fiber with the given stimulus waveforms and
    /// fixed timestep in milliseconds
    ///
    /// Membrane voltages start at the fiber's resting potential and nodal
    /// gates at their steady state for that potential, satisfying the
    /// uniform initialization the fiber requires before the first step
    pub fn new(fiber: &Fiber, waveforms: Vec<StimulusWaveform>, dt: f64) -> Self {
        let chain = fiber.chain();
        let n = chain.len();

        let mut chain_position = vec![0; n];
        for (position, id) in chain.iter().enumerate() {
            chain_position[id.index()] = position;
        }

        let temperature = fiber.temperature();

        let mut c_over_dt = Vec::with_capacity(n);
        let mut membranes = Vec::with_capacity(n);
        let mut v = Vec::with_capacity(n);

        for id in chain {
            let compartment = fiber.compartment(*id);
            v.push(compartment.v_init);

            match compartment.membrane {
                Membrane::Passive { g_pas, e_pas } => {
                    // the myelin lamella layer sits in series with the
                    // axolemma, collapsing the double cable onto a single
                    // cable with strongly attenuated internodal capacitance
                    // and conductance
                    let cm = series(compartment.cm, compartment.xc);
                    let g = series(g_pas, compartment.xg);

                    c_over_dt.push(cm * compartment.membrane_area() / dt);
                    membranes.push(SolverMembrane::Passive {
                        g: g * compartment.membrane_area() * 1000.,
                        e: e_pas,
                    });
                },
                Membrane::Axnode => {
                    // nodes are exposed to the medium directly, no sheath
                    let mut channels =
                        AxnodeChannels::new(AxnodeParameters::default(), temperature);
                    channels.initialize(compartment.v_init);

                    c_over_dt.push(compartment.membrane_capacitance() / dt);
                    membranes.push(SolverMembrane::Active {
                        channels,
                        area: compartment.membrane_area(),
                    });
                },
            }
        }

        // coupling conductance between adjacent compartments from the two
        // half axial resistances
        let mut axial_g = Vec::with_capacity(n - 1);
        for pair in chain.windows(2) {
            let left = fiber.compartment(pair[0]).axial_resistance();
            let right = fiber.compartment(pair[1]).axial_resistance();

            axial_g.push(1000. / ((left + right) / 2.));
        }

        ReferenceCableSolver {
            dt,
            t: 0.,
            chain_position,
            c_over_dt,
            axial_g,
            membranes,
            v,
            e_ext: vec![0.; n],
            waveforms,
            diag: vec![0.; n],
            upper: vec![0.; n],
            rhs: vec![0.; n],
        }
    }

    /// Present simulation time (ms)
    pub fn time(&self) -> f64 {
        self.t
    }

    /// Fixed timestep (ms)
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Membrane voltages in anatomical chain order (mV)
    pub fn voltages(&self) -> &[f64] {
        &self.v
    }

    /// Assembles and solves the backward Euler system for the next voltages
    ///
    /// For chain position k with axial conductances `g` and membrane
    /// conductance `G` frozen over the step:
    /// `(C/dt + g_left + g_right + G) v' - g_left v'_left - g_right v'_right
    ///  = (C/dt) v + g_left (e_left - e) + g_right (e_right - e) + I_rev`
    fn advance_voltages(&mut self) {
        let n = self.v.len();

        for k in 0..n {
            let g_left = if k > 0 { self.axial_g[k - 1] } else { 0. };
            let g_right = if k < n - 1 { self.axial_g[k] } else { 0. };
            let membrane = &self.membranes[k];

            self.diag[k] = self.c_over_dt[k] + g_left + g_right + membrane.conductance();
            self.upper[k] = -g_right;

            let mut d = self.c_over_dt[k] * self.v[k] + membrane.reversal_current();
            if k > 0 {
                d += g_left * (self.e_ext[k - 1] - self.e_ext[k]);
            }
            if k < n - 1 {
                d += g_right * (self.e_ext[k + 1] - self.e_ext[k]);
            }
            self.rhs[k] = d;
        }

        // forward sweep of the Thomas algorithm, the subdiagonal entry for
        // row k is -axial_g[k - 1]
        for k in 1..n {
            let lower = -self.axial_g[k - 1];
            let factor = lower / self.diag[k - 1];

            self.diag[k] -= factor * self.upper[k - 1];
            self.rhs[k] -= factor * self.rhs[k - 1];
        }

        self.v[n - 1] = self.rhs[n - 1] / self.diag[n - 1];
        for k in (0..n - 1).rev() {
            self.v[k] = (self.rhs[k] - self.upper[k] * self.v[k + 1]) / self.diag[k];
        }
    }

    fn advance_gates(&mut self) {
        for (k, membrane) in self.membranes.iter_mut().enumerate() {
            if let SolverMembrane::Active { channels, .. } = membrane {
                channels.update(self.v[k], self.dt);
            }
        }
    }
}

impl CableSolver for ReferenceCableSolver {
    fn step_once(&mut self) {
        self.advance_voltages();
        self.advance_gates();
        self.t += self.dt;
    }

    fn set_extracellular_potential(&mut self, compartment: CompartmentId, potential: f64) {
        let position = self.chain_position[compartment.index()];
        self.e_ext[position] = potential;
    }

    fn membrane_voltage(&self, compartment: CompartmentId) -> f64 {
        self.v[self.chain_position[compartment.index()]]
    }

    /// Evaluates the waveform attached to `source` at the solver clock,
    /// sources without a configured waveform are silent
    fn source_current(&self, source: usize) -> f64 {
        self.waveforms.get(source)
            .map(|waveform| waveform.current(self.t))
            .unwrap_or(0.)
    }
}
