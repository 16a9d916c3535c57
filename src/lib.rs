//! # Myelinated Axon
//!
//! `myelinated_axon` simulates the electrical excitability of peripheral
//! myelinated nerve fibers under externally applied electric fields using
//! the McIntyre-Richardson-Grill (MRG) double cable model, and determines
//! whether a given stimulation waveform triggers an action potential.
//!
//! The crate is built from three composable pieces:
//!
//! - [`parameters`] derives the empirically fit anatomical and electrical
//!   constants of a fiber from its nominal diameter, which must be one of
//!   the closed set of calibrated diameters the model was fit against.
//! - [`fiber`] wires those constants into an unbranched chain of
//!   electrically coupled compartments in the repeating pattern
//!   node - MYSA - FLUT - STIN x6 - FLUT - MYSA - node, with the true
//!   longitudinal position of every compartment exposed for field coupling.
//! - [`field`] superposes the quasi-static potentials of one or more
//!   extracellular point current sources at each compartment's position and
//!   injects them into a cable solver as boundary terms, strictly before
//!   every integration step.
//!
//! The cable solver itself sits behind the [`field::CableSolver`] trait so
//! external integrators can be attached; [`solver`] provides a reference
//! backward Euler implementation with the nonlinear nodal channel set of
//! the MRG model.
//!
//! ### Monopolar extracellular stimulation
//!
//! ```rust
//! use myelinated_axon::{
//!     error::MyelinatedAxonError,
//!     parameters::FiberDiameter,
//!     fiber::Fiber,
//!     field::{DistanceMetric, FieldDriver, PointCurrentSource},
//!     solver::{ReferenceCableSolver, StimulusWaveform},
//! };
//!
//! fn main() -> Result<(), MyelinatedAxonError> {
//!     // a 5.7 um fiber with 21 nodes of Ranvier, resting at -80 mV
//!     let fiber = Fiber::build(FiberDiameter::Um5_7, 21)?;
//!
//!     // cathodic point source 3 mm above the fiber midpoint in a medium
//!     // of conductivity 2e-4 S/mm
//!     let driver = FieldDriver::new(
//!         &fiber,
//!         vec![PointCurrentSource::new(0., 3., 0.)],
//!         2e-4,
//!         DistanceMetric::InPlane,
//!     )?;
//!
//!     // 0.25 ms rectangular pulse after a 1 ms delay
//!     let mut solver = ReferenceCableSolver::new(
//!         &fiber,
//!         vec![StimulusWaveform::Monophasic {
//!             delay: 1.,
//!             duration: 0.25,
//!             amplitude: -26.3,
//!         }],
//!         0.005,
//!     );
//!
//!     // inject the field then advance, every step, recording the last node
//!     let terminal = fiber.node(fiber.node_count() - 1);
//!     let history = driver.run_recording(&mut solver, 800, &[terminal]);
//!
//!     if history.activated(terminal) == Some(true) {
//!         println!("action potential reached the fiber terminal");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Attaching a custom solver
//!
//! Any integrator that accepts a compartment chain can drive the simulation
//! by implementing [`field::CableSolver`]: the driver writes each
//! compartment's extracellular boundary potential through
//! `set_extracellular_potential` and then calls `step_once`, while stimulus
//! waveform evaluation stays on the solver's own clock behind
//! `source_current`. The driver and the solver never write the same state:
//! the driver owns the injected potentials, the solver owns the membrane
//! voltages.

pub mod error;
pub mod parameters;
pub mod fiber;
pub mod field;
pub mod solver;
