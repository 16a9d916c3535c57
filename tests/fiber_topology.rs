#[cfg(test)]
mod tests {
    use myelinated_axon::error::{FiberError, MyelinatedAxonError};
    use myelinated_axon::fiber::{
        CompartmentKind, Fiber, FiberConfig, Membrane,
    };
    use myelinated_axon::parameters::FiberDiameter;

    fn kind_count(fiber: &Fiber, kind: CompartmentKind) -> usize {
        fiber.compartments()
            .iter()
            .filter(|compartment| compartment.kind == kind)
            .count()
    }

    #[test]
    pub fn test_node_count_below_two_is_rejected() {
        for count in [0, 1] {
            match Fiber::build(FiberDiameter::Um5_7, count) {
                Err(MyelinatedAxonError::FiberRelatedError(
                    FiberError::InvalidNodeCount(rejected),
                )) => assert_eq!(rejected, count),
                Err(_) => panic!("{} nodes should fail as an invalid node count", count),
                Ok(_) => panic!("{} nodes should not build", count),
            }
        }

        assert!(Fiber::build(FiberDiameter::Um5_7, 2).is_ok());
    }

    #[test]
    pub fn test_compartment_counts() {
        for (diameter, nodes) in [
            (FiberDiameter::Um5_7, 51),
            (FiberDiameter::Um10, 21),
            (FiberDiameter::Um16, 2),
        ] {
            let fiber = Fiber::build(diameter, nodes).expect("fiber should build");

            assert_eq!(kind_count(&fiber, CompartmentKind::Node), nodes);
            assert_eq!(kind_count(&fiber, CompartmentKind::Mysa), 2 * (nodes - 1));
            assert_eq!(kind_count(&fiber, CompartmentKind::Flut), 2 * (nodes - 1));
            assert_eq!(kind_count(&fiber, CompartmentKind::Stin), 6 * (nodes - 1));
            assert_eq!(fiber.len(), 11 * nodes - 10);
        }
    }

    #[test]
    pub fn test_chain_is_a_single_unbranched_path() {
        let fiber = Fiber::build(FiberDiameter::Um5_7, 31).expect("fiber should build");

        let degrees: Vec<usize> = fiber.compartment_ids()
            .map(|id| fiber.neighbors(id).len())
            .collect();

        assert!(degrees.iter().all(|degree| *degree <= 2));
        assert_eq!(degrees.iter().filter(|degree| **degree == 1).count(), 2);

        let edge_count: usize = degrees.iter().sum::<usize>() / 2;
        assert_eq!(edge_count, fiber.len() - 1);

        // the two endpoints are the terminal nodes
        assert_eq!(fiber.neighbors(fiber.node(0)).len(), 1);
        assert_eq!(fiber.neighbors(fiber.node(30)).len(), 1);
    }

    #[test]
    pub fn test_chain_repeats_the_internodal_pattern() {
        let fiber = Fiber::build(FiberDiameter::Um5_7, 3).expect("fiber should build");

        let expected_period = [
            CompartmentKind::Node,
            CompartmentKind::Mysa,
            CompartmentKind::Flut,
            CompartmentKind::Stin,
            CompartmentKind::Stin,
            CompartmentKind::Stin,
            CompartmentKind::Stin,
            CompartmentKind::Stin,
            CompartmentKind::Stin,
            CompartmentKind::Flut,
            CompartmentKind::Mysa,
        ];

        let kinds: Vec<CompartmentKind> = fiber.chain()
            .iter()
            .map(|id| fiber.compartment(*id).kind)
            .collect();

        assert_eq!(kinds.len(), 23);
        for period in 0..2 {
            for (offset, expected) in expected_period.iter().enumerate() {
                assert_eq!(kinds[11 * period + offset], *expected);
            }
        }
        assert_eq!(kinds[22], CompartmentKind::Node);
    }

    #[test]
    pub fn test_topology_index_arithmetic() {
        let fiber = Fiber::build(FiberDiameter::Um10, 5).expect("fiber should build");

        for i in 0..4 {
            assert!(fiber.neighbors(fiber.node(i)).contains(&fiber.mysa(2 * i)));
            assert!(fiber.neighbors(fiber.mysa(2 * i)).contains(&fiber.flut(2 * i)));
            assert!(fiber.neighbors(fiber.flut(2 * i)).contains(&fiber.stin(6 * i)));
            for k in 0..5 {
                assert!(
                    fiber.neighbors(fiber.stin(6 * i + k)).contains(&fiber.stin(6 * i + k + 1))
                );
            }
            assert!(fiber.neighbors(fiber.stin(6 * i + 5)).contains(&fiber.flut(2 * i + 1)));
            assert!(fiber.neighbors(fiber.flut(2 * i + 1)).contains(&fiber.mysa(2 * i + 1)));
            assert!(fiber.neighbors(fiber.mysa(2 * i + 1)).contains(&fiber.node(i + 1)));
        }
    }

    #[test]
    pub fn test_class_handles_cover_their_ranges() {
        let fiber = Fiber::build(FiberDiameter::Um10, 5).expect("fiber should build");

        // the last valid index of each class resolves to a compartment of
        // that class
        assert_eq!(fiber.compartment(fiber.node(4)).kind, CompartmentKind::Node);
        assert_eq!(fiber.compartment(fiber.mysa(7)).kind, CompartmentKind::Mysa);
        assert_eq!(fiber.compartment(fiber.flut(7)).kind, CompartmentKind::Flut);
        assert_eq!(fiber.compartment(fiber.stin(23)).kind, CompartmentKind::Stin);
    }

    #[test]
    #[should_panic(expected = "node index 5 out of range")]
    pub fn test_node_handle_past_the_last_node_panics() {
        let fiber = Fiber::build(FiberDiameter::Um10, 5).expect("fiber should build");
        fiber.node(5);
    }

    #[test]
    #[should_panic(expected = "STIN index 24 out of range")]
    pub fn test_stin_handle_past_the_last_segment_panics() {
        let fiber = Fiber::build(FiberDiameter::Um10, 5).expect("fiber should build");
        fiber.stin(24);
    }

    #[test]
    pub fn test_nodal_biophysics() {
        let fiber = Fiber::build(FiberDiameter::Um5_7, 11).expect("fiber should build");
        let gp = fiber.parameters().clone();

        for i in 0..11 {
            let node = fiber.compartment(fiber.node(i));

            assert_eq!(node.class_index, i);
            assert_eq!(node.length, gp.node_length);
            assert_eq!(node.diameter, gp.node_d);
            assert_eq!(node.ra, gp.rhoa / 10000.);
            assert_eq!(node.cm, 2.);
            assert_eq!(node.membrane, Membrane::Axnode);
            assert_eq!(node.xraxial, gp.rpn0);
            assert_eq!(node.xg, 1e10);
            assert_eq!(node.xc, 0.);
            assert_eq!(node.v_init, -80.);
        }
    }

    #[test]
    pub fn test_myelinated_biophysics_scaling() {
        let fiber = Fiber::build(FiberDiameter::Um5_7, 11).expect("fiber should build");
        let gp = fiber.parameters().clone();
        let d = gp.fiber_d;

        let cases = [
            (fiber.mysa(0), gp.para_d1, gp.para_length1, 0.001, gp.rpn1),
            (fiber.flut(0), gp.para_d2, gp.para_length2, 0.0001, gp.rpn2),
            (fiber.stin(0), gp.axon_d, gp.inter_length, 0.0001, gp.rpx),
        ];

        for (id, structural_d, length, scale, rp) in cases {
            let compartment = fiber.compartment(id);

            // sections keep the nominal diameter, electrical properties are
            // scaled by the structural to nominal diameter ratio
            assert_eq!(compartment.diameter, d);
            assert_eq!(compartment.length, length);
            assert_eq!(compartment.ra, gp.rhoa * (1. / (structural_d / d).powi(2)) / 10000.);
            assert_eq!(compartment.cm, 2. * structural_d / d);
            assert_eq!(
                compartment.membrane,
                Membrane::Passive {
                    g_pas: scale * structural_d / d,
                    e_pas: -80.,
                },
            );
            assert_eq!(compartment.xraxial, rp);
            assert_eq!(compartment.xg, 0.001 / (gp.nl * 2.));
            assert_eq!(compartment.xc, 0.1 / (gp.nl * 2.));
        }
    }

    #[test]
    pub fn test_positions_tile_the_internodal_period() {
        let fiber = Fiber::build(FiberDiameter::Um5_7, 51).expect("fiber should build");
        let gp = fiber.parameters().clone();

        // nodes are spaced at the internodal period and centered about the
        // fiber midpoint
        for i in 0..50 {
            let left = fiber.compartment(fiber.node(i)).position;
            let right = fiber.compartment(fiber.node(i + 1)).position;

            assert!((right - left - gp.deltax).abs() < 1e-9);
        }

        let first = fiber.compartment(fiber.node(0)).position;
        let last = fiber.compartment(fiber.node(50)).position;
        assert!((first + last).abs() < 1e-9);
        assert!((fiber.compartment(fiber.node(25)).position).abs() < 1e-9);

        // positions are strictly increasing along the anatomical chain
        let positions: Vec<f64> = fiber.chain()
            .iter()
            .map(|id| fiber.compartment(*id).position)
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));

        // summing compartment lengths along one period recovers deltax
        let period_length: f64 = fiber.chain()[..11]
            .iter()
            .map(|id| fiber.compartment(*id).length)
            .sum::<f64>()
            - fiber.compartment(fiber.node(0)).length / 2.
            + fiber.compartment(fiber.node(1)).length / 2.;
        assert!((period_length - gp.deltax).abs() < 1e-9);
    }

    #[test]
    pub fn test_explicit_resting_potential_and_temperature() {
        let config = FiberConfig {
            resting_potential: -70.,
            temperature: 36.,
        };
        let fiber = Fiber::build_with_config(FiberDiameter::Um10, 5, config)
            .expect("fiber should build");

        assert_eq!(fiber.resting_potential(), -70.);
        assert_eq!(fiber.temperature(), 36.);

        for compartment in fiber.compartments() {
            assert_eq!(compartment.v_init, -70.);
            if let Membrane::Passive { e_pas, .. } = compartment.membrane {
                assert_eq!(e_pas, -70.);
            }
        }
    }
}
