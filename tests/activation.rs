#[cfg(test)]
mod tests {
    use myelinated_axon::fiber::Fiber;
    use myelinated_axon::field::{DistanceMetric, FieldDriver, PointCurrentSource};
    use myelinated_axon::parameters::FiberDiameter;
    use myelinated_axon::solver::{ReferenceCableSolver, StimulusWaveform};

    /// Runs the monopolar scenario for 4 ms and returns the peak membrane
    /// voltage at the terminal node
    fn terminal_peak(amplitude: f64) -> f64 {
        let fiber = Fiber::build(FiberDiameter::Um5_7, 51).expect("fiber should build");

        let driver = FieldDriver::new(
            &fiber,
            vec![PointCurrentSource::new(0., 3., 0.)],
            2e-4,
            DistanceMetric::InPlane,
        ).expect("driver should build");

        let dt = 0.002;
        let steps = (4. / dt) as usize;
        let mut solver = ReferenceCableSolver::new(
            &fiber,
            vec![StimulusWaveform::Monophasic {
                delay: 1.,
                duration: 0.25,
                amplitude,
            }],
            dt,
        );

        let terminal = fiber.node(50);
        let history = driver.run_recording(&mut solver, steps, &[terminal]);

        history.peak(terminal).expect("terminal node is recorded")
    }

    #[test]
    pub fn test_suprathreshold_cathodic_pulse_activates_terminal_node() {
        let peak = terminal_peak(-26.3);

        assert!(
            peak > 0.,
            "terminal node should cross 0 mV for a suprathreshold pulse, peaked at {} mV",
            peak,
        );
    }

    #[test]
    pub fn test_near_zero_amplitude_does_not_activate() {
        let peak = terminal_peak(-1e-4);

        assert!(
            peak < 0.,
            "terminal node should stay below 0 mV without a stimulus, peaked at {} mV",
            peak,
        );
    }

    #[test]
    pub fn test_fiber_rests_quietly_without_stimulation() {
        let fiber = Fiber::build(FiberDiameter::Um5_7, 21).expect("fiber should build");

        let driver = FieldDriver::new(
            &fiber,
            vec![PointCurrentSource::new(0., 3., 0.)],
            2e-4,
            DistanceMetric::InPlane,
        ).expect("driver should build");

        let dt = 0.002;
        let mut solver = ReferenceCableSolver::new(&fiber, vec![], dt);

        let recorded = [fiber.node(0), fiber.node(10), fiber.node(20)];
        let history = driver.run_recording(&mut solver, (2. / dt) as usize, &recorded);

        // an unstimulated fiber holds close to its resting potential
        for compartment in recorded {
            let peak = history.peak(compartment).expect("compartment is recorded");
            assert!(peak < -70., "resting node drifted up to {} mV", peak);

            let floor = history.voltages
                .column(history.compartments.iter().position(|i| *i == compartment).unwrap())
                .iter()
                .copied()
                .reduce(f64::min)
                .unwrap();
            assert!(floor > -90., "resting node drifted down to {} mV", floor);
        }
    }

    #[test]
    pub fn test_biphasic_waveform_phases() {
        let waveform = StimulusWaveform::Biphasic {
            delay: 1.,
            phase_duration: 0.25,
            amplitude: -2.,
        };

        assert_eq!(waveform.current(0.5), 0.);
        assert_eq!(waveform.current(1.1), -2.);
        assert_eq!(waveform.current(1.3), 2.);
        assert_eq!(waveform.current(1.6), 0.);
    }

    #[test]
    pub fn test_monophasic_waveform_window() {
        let waveform = StimulusWaveform::Monophasic {
            delay: 1.,
            duration: 0.25,
            amplitude: -26.3,
        };

        assert_eq!(waveform.current(0.), 0.);
        assert_eq!(waveform.current(1.), -26.3);
        assert_eq!(waveform.current(1.2), -26.3);
        assert_eq!(waveform.current(1.25), 0.);
        assert_eq!(waveform.current(4.), 0.);
    }
}
