extern crate myelinated_axon;
use myelinated_axon::{
    error::MyelinatedAxonError,
    fiber::Fiber,
    field::{DistanceMetric, FieldDriver, PointCurrentSource},
    parameters::FiberDiameter,
    solver::{ReferenceCableSolver, StimulusWaveform},
};


/// Runs the monopolar scenario once and returns the peak terminal voltage
fn terminal_peak(fiber: &Fiber, driver: &FieldDriver, amplitude: f64) -> f64 {
    let dt = 0.002;
    let steps = (4. / dt) as usize;

    let mut solver = ReferenceCableSolver::new(
        fiber,
        vec![StimulusWaveform::Monophasic {
            delay: 1.,
            duration: 0.25,
            amplitude,
        }],
        dt,
    );

    let terminal = fiber.node(fiber.node_count() - 1);
    let history = driver.run_recording(&mut solver, steps, &[terminal]);

    history.peak(terminal).unwrap_or(f64::NEG_INFINITY)
}

/// Bisects the cathodic activation threshold of a 5.7 um fiber for a point
/// source 3 mm above the fiber midpoint
fn main() -> Result<(), MyelinatedAxonError> {
    let fiber = Fiber::build(FiberDiameter::Um5_7, 51)?;
    let driver = FieldDriver::new(
        &fiber,
        vec![PointCurrentSource::new(0., 3., 0.)],
        2e-4,
        DistanceMetric::InPlane,
    )?;

    let mut subthreshold: f64 = 0.;
    let mut suprathreshold: f64 = -26.3;

    assert!(terminal_peak(&fiber, &driver, suprathreshold) > 0.);

    for _ in 0..10 {
        let amplitude = (subthreshold + suprathreshold) / 2.;
        let peak = terminal_peak(&fiber, &driver, amplitude);

        println!("amplitude: {:.4} mA, terminal peak: {:.2} mV", amplitude, peak);

        if peak > 0. {
            suprathreshold = amplitude;
        } else {
            subthreshold = amplitude;
        }
    }

    println!(
        "activation threshold between {:.4} and {:.4} mA",
        subthreshold, suprathreshold,
    );

    Ok(())
}
