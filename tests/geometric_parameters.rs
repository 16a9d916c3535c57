#[cfg(test)]
mod tests {
    use myelinated_axon::error::ParameterError;
    use myelinated_axon::parameters::{FiberDiameter, GeometricParameters};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {} to be within 1e-9 of {}",
            actual,
            expected,
        );
    }

    #[test]
    pub fn test_every_calibrated_diameter_derives() {
        for diameter in FiberDiameter::ALL {
            let gp = GeometricParameters::derive(diameter)
                .unwrap_or_else(|_| panic!("{:?} should derive", diameter));

            assert!(gp.inter_length > 0.);
            assert!(gp.nl > 0.);
            assert!(gp.node_d < gp.fiber_d);
            assert!(gp.axon_d < gp.fiber_d);

            // the six internodal segments and the paranodes tile one
            // internodal period exactly
            assert_close(
                gp.node_length + 2. * gp.para_length1 + 2. * gp.para_length2
                    + 6. * gp.inter_length,
                gp.deltax,
            );
        }
    }

    #[test]
    pub fn test_reference_table_5_7_um() {
        let gp = FiberDiameter::Um5_7.parameters().expect("5.7 um should derive");

        assert_close(gp.fiber_d, 5.7);
        assert_close(gp.axon_d, 3.4);
        assert_close(gp.node_d, 1.9);
        assert_close(gp.para_d1, 1.9);
        assert_close(gp.para_d2, 3.4);
        assert_close(gp.deltax, 500.);
        assert_close(gp.para_length2, 35.);
        assert_close(gp.nl, 80.);
        assert_close(gp.rhoa, 0.7e6);
        assert_close(gp.node_length, 1.);
        assert_close(gp.para_length1, 3.);
        assert_close(gp.space_p1, 0.002);
        assert_close(gp.space_p2, 0.004);
        assert_close(gp.space_i, 0.004);
        assert_close(gp.inter_length, 70.5);

        assert_close(gp.rpn0, 585743.744291951181);
        assert_close(gp.rpn1, 585743.744291951181);
        assert_close(gp.rpn2, 163643.449125035724);
        assert_close(gp.rpx, 163643.449125035724);
    }

    #[test]
    pub fn test_reference_table_10_um() {
        let gp = FiberDiameter::Um10.parameters().expect("10 um should derive");

        assert_close(gp.axon_d, 6.9);
        assert_close(gp.node_d, 3.3);
        assert_close(gp.deltax, 1150.);
        assert_close(gp.para_length2, 46.);
        assert_close(gp.nl, 120.);
        assert_close(gp.inter_length, 175.16666666666666);
        assert_close(gp.rpn0, 337396.911460719479);
        assert_close(gp.rpn2, 80683.994904639621);
    }

    #[test]
    pub fn test_reference_table_16_um() {
        let gp = FiberDiameter::Um16.parameters().expect("16 um should derive");

        assert_close(gp.axon_d, 12.7);
        assert_close(gp.node_d, 5.5);
        assert_close(gp.deltax, 1500.);
        assert_close(gp.nl, 150.);
        assert_close(gp.inter_length, 228.83333333333334);
        assert_close(gp.rpn0, 202487.204951540945);
        assert_close(gp.rpx, 43847.788162920238);
    }

    #[test]
    pub fn test_1_um_uses_the_tabulated_row() {
        // the polynomial fit would put the node diameter at about 1.21 um,
        // wider than the fiber itself
        let gp = FiberDiameter::Um1.parameters().expect("1 um should derive");

        assert_close(gp.fiber_d, 1.);
        assert_close(gp.axon_d, 0.8);
        assert_close(gp.node_d, 0.7);
        assert_close(gp.para_d1, 0.7);
        assert_close(gp.para_d2, 0.8);
        assert_close(gp.deltax, 100.);
        assert_close(gp.para_length2, 5.);
        assert_close(gp.nl, 15.);
        assert_close(gp.inter_length, 13.833333333333334);
        assert_close(gp.rpn0, 1587015.1020559336);
        assert_close(gp.rpn1, 1587015.1020559336);
        assert_close(gp.rpn2, 692838.682613973);
        assert_close(gp.rpx, 692838.682613973);

        assert!(gp.node_d < gp.fiber_d);
        assert!(gp.axon_d < gp.fiber_d);
    }

    #[test]
    pub fn test_small_diameter_polynomial_fit() {
        let gp = FiberDiameter::Um2.parameters().expect("2 um should derive");

        assert_close(gp.nl, 31.0356);
        assert_close(gp.node_d, 1.34432);
        assert_close(gp.para_d1, 1.34432);
        assert_close(gp.para_d2, 1.54124);
        assert_close(gp.axon_d, 1.54124);
        assert_close(gp.para_length2, 11.761);
        assert_close(gp.deltax, 200.);
        assert_close(gp.inter_length, 28.246333333333333);
    }

    #[test]
    pub fn test_unsupported_diameters_are_rejected() {
        for value in [0., -1., 5.6999, 6., 9., 12., 16.5, 100.] {
            match FiberDiameter::try_from(value) {
                Err(ParameterError::UnsupportedDiameter(rejected)) => {
                    assert_eq!(rejected, value);
                },
                Err(_) => panic!("{} should be rejected as unsupported", value),
                Ok(_) => panic!("{} should not map to a calibrated diameter", value),
            }
        }
    }

    #[test]
    pub fn test_calibrated_diameters_round_trip() {
        for diameter in FiberDiameter::ALL {
            assert_eq!(FiberDiameter::try_from(diameter.um()).ok(), Some(diameter));
        }
    }
}
