//! Construction of the MRG double cable fiber as a linear chain of
//! electrically coupled compartments
//!
//! A fiber with `n` nodes of Ranvier contains `2 * (n - 1)` MYSA paranodes,
//! `2 * (n - 1)` FLUT paranodes, and `6 * (n - 1)` STIN internodal segments,
//! wired in the repeating pattern
//! node - MYSA - FLUT - STIN x6 - FLUT - MYSA - node.
//! Topology, geometry, and passive properties are fixed at construction,
//! only the injected extracellular potential and the solver owned membrane
//! voltage change during a simulation.

use std::f64::consts::PI;
use crate::error::{FiberError, MyelinatedAxonError};
use crate::parameters::{FiberDiameter, GeometricParameters};


/// Specific capacitance of a single myelin lamella membrane (uF/cm2)
pub const MYCM: f64 = 0.1;
/// Conductance of a single myelin lamella membrane (S/cm2)
pub const MYGM: f64 = 0.001;

/// Default resting membrane potential (mV)
pub const DEFAULT_RESTING_POTENTIAL: f64 = -80.;
/// Default model temperature (degrees C)
pub const DEFAULT_TEMPERATURE: f64 = 37.;

/// The structural class of a compartment within an internodal period
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompartmentKind {
    /// Node of Ranvier, short and channel dense
    Node,
    /// Myelin attachment paranode
    Mysa,
    /// Main myelin paranode
    Flut,
    /// Internodal segment under compact myelin
    Stin,
}

/// Opaque handle addressing one compartment of a fiber, also used by
/// solver implementations to map compartments onto their own state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompartmentId(pub(crate) usize);

impl CompartmentId {
    /// Returns the flat index of the compartment within the fiber
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Membrane mechanism of a compartment
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Membrane {
    /// Active nodal membrane, the nonlinear channel model itself
    /// (fast Na+, persistent Na+, slow K+, leak) is supplied by the solver
    Axnode,
    /// Passive leak membrane under the myelin sheath
    Passive {
        /// Leak conductance (S/cm2)
        g_pas: f64,
        /// Leak reversal potential (mV)
        e_pas: f64,
    },
}

/// One compartment of the fiber chain, owned exclusively by its [`Fiber`]
#[derive(Clone, Debug, PartialEq)]
pub struct Compartment {
    /// Structural class
    pub kind: CompartmentKind,
    /// Sequential index within the compartment's class
    pub class_index: usize,
    /// Section length (um)
    pub length: f64,
    /// Section diameter (um)
    pub diameter: f64,
    /// Effective axial resistivity (ohm cm)
    pub ra: f64,
    /// Specific membrane capacitance (uF/cm2)
    pub cm: f64,
    /// Membrane mechanism
    pub membrane: Membrane,
    /// Periaxonal axial resistance (Mohm/cm)
    pub xraxial: f64,
    /// Myelin sheath shunt conductance (S/cm2)
    pub xg: f64,
    /// Myelin sheath shunt capacitance (uF/cm2)
    pub xc: f64,
    /// Longitudinal center position along the fiber axis (um),
    /// the fiber midpoint sits at zero
    pub position: f64,
    /// Initial membrane voltage (mV), uniform across the fiber
    pub v_init: f64,
}

impl Compartment {
    /// Total axial resistance of the compartment (ohm)
    pub fn axial_resistance(&self) -> f64 {
        let length_cm = self.length * 1e-4;
        let diameter_cm = self.diameter * 1e-4;

        4. * self.ra * length_cm / (PI * diameter_cm.powi(2))
    }

    /// Membrane surface area (cm2)
    pub fn membrane_area(&self) -> f64 {
        PI * (self.diameter * 1e-4) * (self.length * 1e-4)
    }

    /// Total membrane capacitance (uF)
    pub fn membrane_capacitance(&self) -> f64 {
        self.cm * self.membrane_area()
    }

    /// Center position along the fiber axis in millimeters
    pub fn position_mm(&self) -> f64 {
        self.position * 1e-3
    }
}

/// Explicit model constants that the original implementation kept as
/// ambient globals, threaded into construction instead
#[derive(Clone, Debug, PartialEq)]
pub struct FiberConfig {
    /// Uniform resting membrane potential (mV)
    pub resting_potential: f64,
    /// Model temperature (degrees C)
    pub temperature: f64,
}

impl Default for FiberConfig {
    fn default() -> Self {
        FiberConfig {
            resting_potential: DEFAULT_RESTING_POTENTIAL,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// A myelinated fiber as an unbranched chain of compartments
///
/// Compartments are allocated class by class (nodes first, then MYSA, FLUT,
/// and STIN) with sequential per class indices, and wired by internodal
/// segment index `i` as
/// `node[i] - MYSA[2i] - FLUT[2i] - STIN[6i] ... STIN[6i + 5] - FLUT[2i + 1] - MYSA[2i + 1] - node[i + 1]`.
/// The same index arithmetic drives the per compartment position offsets the
/// field driver relies on.
#[derive(Clone, Debug)]
pub struct Fiber {
    diameter: FiberDiameter,
    parameters: GeometricParameters,
    config: FiberConfig,
    compartments: Vec<Compartment>,
    adjacency: Vec<Vec<CompartmentId>>,
    chain: Vec<CompartmentId>,
    node_count: usize,
}

impl Fiber {
    /// Builds a fiber with the default resting potential and temperature
    pub fn build(
        diameter: FiberDiameter,
        node_count: usize,
    ) -> Result<Fiber, MyelinatedAxonError> {
        Fiber::build_with_config(diameter, node_count, FiberConfig::default())
    }

    /// Builds a fiber of `node_count` nodes of Ranvier, `node_count` must be
    /// at least 2 so the chain has at least one internodal period
    pub fn build_with_config(
        diameter: FiberDiameter,
        node_count: usize,
        config: FiberConfig,
    ) -> Result<Fiber, MyelinatedAxonError> {
        if node_count < 2 {
            return Err(FiberError::InvalidNodeCount(node_count).into());
        }

        let parameters = GeometricParameters::derive(diameter)?;

        let mut fiber = Fiber {
            diameter,
            parameters,
            config,
            compartments: Vec::new(),
            adjacency: Vec::new(),
            chain: Vec::new(),
            node_count,
        };

        fiber.create_compartments();
        fiber.build_topology();
        fiber.assign_positions();

        Ok(fiber)
    }

    /// Number of MYSA (equivalently FLUT) paranodes
    fn paranode_count(&self) -> usize {
        2 * (self.node_count - 1)
    }

    /// Number of STIN internodal segments
    fn internode_count(&self) -> usize {
        6 * (self.node_count - 1)
    }

    fn create_compartments(&mut self) {
        let gp = self.parameters.clone();
        let v_init = self.config.resting_potential;
        let fiber_d = gp.fiber_d;

        let total = self.node_count + 2 * self.paranode_count() + self.internode_count();
        self.compartments.reserve(total);

        for i in 0..self.node_count {
            self.compartments.push(Compartment {
                kind: CompartmentKind::Node,
                class_index: i,
                length: gp.node_length,
                diameter: gp.node_d,
                ra: gp.rhoa / 10000.,
                cm: 2.,
                membrane: Membrane::Axnode,
                xraxial: gp.rpn0,
                // a node is perfectly exposed, no myelin shunt
                xg: 1e10,
                xc: 0.,
                position: 0.,
                v_init,
            });
        }

        for i in 0..self.paranode_count() {
            let mysa = self.myelinated_compartment(
                CompartmentKind::Mysa, i, gp.para_length1, 0.001, gp.para_d1, gp.rpn1, fiber_d,
            );
            self.compartments.push(mysa);
        }

        for i in 0..self.paranode_count() {
            let flut = self.myelinated_compartment(
                CompartmentKind::Flut, i, gp.para_length2, 0.0001, gp.para_d2, gp.rpn2, fiber_d,
            );
            self.compartments.push(flut);
        }

        for i in 0..self.internode_count() {
            let stin = self.myelinated_compartment(
                CompartmentKind::Stin, i, gp.inter_length, 0.0001, gp.axon_d, gp.rpx, fiber_d,
            );
            self.compartments.push(stin);
        }
    }

    /// Shared passive biophysics of MYSA, FLUT, and STIN, axial resistance
    /// and capacitance are scaled by the structural to nominal diameter
    /// ratio while the section itself keeps the nominal diameter
    #[allow(clippy::too_many_arguments)]
    fn myelinated_compartment(
        &self,
        kind: CompartmentKind,
        class_index: usize,
        length: f64,
        scale: f64,
        structural_d: f64,
        rp: f64,
        fiber_d: f64,
    ) -> Compartment {
        let gp = &self.parameters;

        Compartment {
            kind,
            class_index,
            length,
            diameter: fiber_d,
            ra: gp.rhoa * (1. / (structural_d / fiber_d).powi(2)) / 10000.,
            cm: 2. * structural_d / fiber_d,
            membrane: Membrane::Passive {
                g_pas: scale * structural_d / fiber_d,
                e_pas: self.config.resting_potential,
            },
            xraxial: rp,
            xg: MYGM / (gp.nl * 2.),
            xc: MYCM / (gp.nl * 2.),
            position: 0.,
            v_init: self.config.resting_potential,
        }
    }

    fn build_topology(&mut self) {
        self.adjacency = vec![Vec::new(); self.compartments.len()];
        self.chain = Vec::with_capacity(self.compartments.len());

        let first = self.node(0);
        self.chain.push(first);
        for i in 0..self.node_count - 1 {
            let segment = [
                self.mysa(2 * i),
                self.flut(2 * i),
                self.stin(6 * i),
                self.stin(6 * i + 1),
                self.stin(6 * i + 2),
                self.stin(6 * i + 3),
                self.stin(6 * i + 4),
                self.stin(6 * i + 5),
                self.flut(2 * i + 1),
                self.mysa(2 * i + 1),
                self.node(i + 1),
            ];

            let mut previous = self.node(i);
            for id in segment {
                self.connect(previous, id);
                self.chain.push(id);
                previous = id;
            }
        }
    }

    fn connect(&mut self, a: CompartmentId, b: CompartmentId) {
        self.adjacency[a.0].push(b);
        self.adjacency[b.0].push(a);
    }

    /// Center positions along the fiber axis from the class offset
    /// arithmetic, with the fiber midpoint at zero
    fn assign_positions(&mut self) {
        let gp = self.parameters.clone();
        let half_span = (self.node_count - 1) as f64 * gp.deltax / 2.;

        for i in 0..self.node_count {
            let id = self.node(i);
            self.compartments[id.0].position = i as f64 * gp.deltax - half_span;
        }

        // offsets within internodal segment i, measured from the far edge
        // of node i
        for i in 0..self.node_count - 1 {
            let start = i as f64 * gp.deltax - half_span + gp.node_length / 2.;
            let myelin_span = gp.para_length1 + gp.para_length2 + 6. * gp.inter_length;

            let mysa_even = self.mysa(2 * i);
            self.compartments[mysa_even.0].position = start + gp.para_length1 / 2.;
            let mysa_odd = self.mysa(2 * i + 1);
            self.compartments[mysa_odd.0].position =
                start + myelin_span + gp.para_length2 + gp.para_length1 / 2.;

            let flut_even = self.flut(2 * i);
            self.compartments[flut_even.0].position =
                start + gp.para_length1 + gp.para_length2 / 2.;
            let flut_odd = self.flut(2 * i + 1);
            self.compartments[flut_odd.0].position =
                start + myelin_span + gp.para_length2 / 2.;

            for k in 0..6 {
                let id = self.stin(6 * i + k);
                self.compartments[id.0].position = start
                    + gp.para_length1
                    + gp.para_length2
                    + (k as f64 + 0.5) * gp.inter_length;
            }
        }
    }

    /// Handle of the `i`th node of Ranvier
    ///
    /// Panics if `i` is not below the fiber's node count, like indexing
    /// out of bounds
    pub fn node(&self, i: usize) -> CompartmentId {
        assert!(i < self.node_count, "node index {} out of range", i);

        CompartmentId(i)
    }

    /// Handle of the `i`th MYSA paranode
    ///
    /// Panics if `i` is not below `2 * (node_count - 1)`
    pub fn mysa(&self, i: usize) -> CompartmentId {
        assert!(i < self.paranode_count(), "MYSA index {} out of range", i);

        CompartmentId(self.node_count + i)
    }

    /// Handle of the `i`th FLUT paranode
    ///
    /// Panics if `i` is not below `2 * (node_count - 1)`
    pub fn flut(&self, i: usize) -> CompartmentId {
        assert!(i < self.paranode_count(), "FLUT index {} out of range", i);

        CompartmentId(self.node_count + self.paranode_count() + i)
    }

    /// Handle of the `i`th STIN internodal segment
    ///
    /// Panics if `i` is not below `6 * (node_count - 1)`
    pub fn stin(&self, i: usize) -> CompartmentId {
        assert!(i < self.internode_count(), "STIN index {} out of range", i);

        CompartmentId(self.node_count + 2 * self.paranode_count() + i)
    }

    /// The compartment behind a handle
    pub fn compartment(&self, id: CompartmentId) -> &Compartment {
        &self.compartments[id.0]
    }

    /// All compartments in allocation order (nodes, MYSA, FLUT, STIN)
    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }

    /// Handles of all compartments in allocation order
    pub fn compartment_ids(&self) -> impl Iterator<Item = CompartmentId> {
        (0..self.compartments.len()).map(CompartmentId)
    }

    /// Handles in anatomical order from the first to the last node
    pub fn chain(&self) -> &[CompartmentId] {
        &self.chain
    }

    /// Neighbors of a compartment in the chain
    pub fn neighbors(&self, id: CompartmentId) -> &[CompartmentId] {
        &self.adjacency[id.0]
    }

    /// Number of nodes of Ranvier
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Total number of compartments
    pub fn len(&self) -> usize {
        self.compartments.len()
    }

    /// Whether the fiber has no compartments, never true for a built fiber
    pub fn is_empty(&self) -> bool {
        self.compartments.is_empty()
    }

    /// Nominal fiber diameter class
    pub fn diameter(&self) -> FiberDiameter {
        self.diameter
    }

    /// Derived geometric parameters of the fiber
    pub fn parameters(&self) -> &GeometricParameters {
        &self.parameters
    }

    /// Uniform resting membrane potential (mV)
    pub fn resting_potential(&self) -> f64 {
        self.config.resting_potential
    }

    /// Model temperature (degrees C)
    pub fn temperature(&self) -> f64 {
        self.config.temperature
    }
}
