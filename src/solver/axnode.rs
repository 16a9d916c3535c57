//! The nonlinear nodal membrane mechanism of the MRG model: fast Na+,
//! persistent Na+, and slow K+ conductances plus leak, with Q10 corrected
//! rate kinetics (McIntyre, Richardson, and Grill 2002)


/// Conductance densities and reversal potentials of the nodal membrane
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxnodeParameters {
    /// Maximal fast Na+ conductance (S/cm2)
    pub g_naf_bar: f64,
    /// Maximal persistent Na+ conductance (S/cm2)
    pub g_nap_bar: f64,
    /// Maximal slow K+ conductance (S/cm2)
    pub g_k_bar: f64,
    /// Leak conductance (S/cm2)
    pub g_l: f64,
    /// Na+ reversal potential (mV)
    pub e_na: f64,
    /// K+ reversal potential (mV)
    pub e_k: f64,
    /// Leak reversal potential (mV)
    pub e_l: f64,
}

impl Default for AxnodeParameters {
    fn default() -> Self {
        AxnodeParameters {
            g_naf_bar: 3.,
            g_nap_bar: 0.01,
            g_k_bar: 0.08,
            g_l: 0.007,
            e_na: 50.,
            e_k: -90.,
            e_l: -90.,
        }
    }
}

/// Gating variable with alpha and beta rates
#[derive(Clone, Copy, Debug, PartialEq)]
struct Gate {
    /// Current state (0 to 1)
    state: f64,
    /// Opening rate (1/ms)
    alpha: f64,
    /// Closing rate (1/ms)
    beta: f64,
}

impl Gate {
    fn new() -> Self {
        Gate {
            state: 0.,
            alpha: 0.,
            beta: 0.,
        }
    }

    /// Sets the state to its steady state value for the present rates
    fn init_steady_state(&mut self) {
        if self.alpha + self.beta > 0. {
            self.state = self.alpha / (self.alpha + self.beta);
        }
    }

    /// Advances the gate state one timestep
    fn update(&mut self, dt: f64) {
        let d_state = (self.alpha * (1. - self.state) - self.beta * self.state) * dt;
        self.state = (self.state + d_state).clamp(0., 1.);
    }
}

/// `a * (v + shift) / (1 - exp(-(v + shift) / k))`, with the removable
/// singularity at `v + shift = 0` patched by its limit
fn alpha_form(a: f64, shift: f64, k: f64, v: f64) -> f64 {
    let x = v + shift;

    if x.abs() < 1e-6 {
        a * k
    } else {
        a * x / (1. - (-x / k).exp())
    }
}

/// `a * (-(v + shift)) / (1 - exp((v + shift) / k))`, singularity patched
/// as above
fn beta_form(a: f64, shift: f64, k: f64, v: f64) -> f64 {
    let x = v + shift;

    if x.abs() < 1e-6 {
        a * k
    } else {
        a * (-x) / (1. - (x / k).exp())
    }
}

/// The full nodal channel set with its gating state
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxnodeChannels {
    parameters: AxnodeParameters,
    /// Rate scaling for m and p gates at the model temperature
    q10_1: f64,
    /// Rate scaling for the h gate
    q10_2: f64,
    /// Rate scaling for the s gate
    q10_3: f64,
    /// Fast Na+ activation
    m: Gate,
    /// Fast Na+ inactivation
    h: Gate,
    /// Persistent Na+ activation
    p: Gate,
    /// Slow K+ activation
    s: Gate,
}

impl AxnodeChannels {
    /// Builds the channel set for a model temperature in degrees C
    pub fn new(parameters: AxnodeParameters, temperature: f64) -> Self {
        AxnodeChannels {
            parameters,
            q10_1: 2.2_f64.powf((temperature - 20.) / 10.),
            q10_2: 2.9_f64.powf((temperature - 20.) / 10.),
            q10_3: 3.0_f64.powf((temperature - 36.) / 10.),
            m: Gate::new(),
            h: Gate::new(),
            p: Gate::new(),
            s: Gate::new(),
        }
    }

    fn update_rates(&mut self, v: f64) {
        self.m.alpha = self.q10_1 * alpha_form(6.57, 20.4, 10.3, v);
        self.m.beta = self.q10_1 * beta_form(0.304, 25.7, 9.16, v);

        self.h.alpha = self.q10_2 * beta_form(0.34, 114., 11., v);
        self.h.beta = self.q10_2 * 12.6 / (1. + (-(v + 31.8) / 13.4).exp());

        self.p.alpha = self.q10_1 * alpha_form(0.0353, 27., 10.2, v);
        self.p.beta = self.q10_1 * beta_form(0.000883, 34., 10., v);

        self.s.alpha = self.q10_3 * 0.3 / (1. + ((v + 53.) / -5.).exp());
        self.s.beta = self.q10_3 * 0.03 / (1. + ((v + 90.) / -1.).exp());
    }

    /// Initializes every gate to its steady state at the given voltage
    pub fn initialize(&mut self, v: f64) {
        self.update_rates(v);
        self.m.init_steady_state();
        self.h.init_steady_state();
        self.p.init_steady_state();
        self.s.init_steady_state();
    }

    /// Advances the gating state one timestep at the given voltage
    pub fn update(&mut self, v: f64, dt: f64) {
        self.update_rates(v);
        self.m.update(dt);
        self.h.update(dt);
        self.p.update(dt);
        self.s.update(dt);
    }

    /// Total membrane conductance density (S/cm2) with gating frozen at its
    /// present state
    pub fn conductance_density(&self) -> f64 {
        let p = &self.parameters;

        p.g_naf_bar * self.m.state.powi(3) * self.h.state
            + p.g_nap_bar * self.p.state.powi(3)
            + p.g_k_bar * self.s.state
            + p.g_l
    }

    /// Conductance weighted reversal term (mA/cm2) matching
    /// [`Self::conductance_density`]
    pub fn reversal_current_density(&self) -> f64 {
        let p = &self.parameters;

        (p.g_naf_bar * self.m.state.powi(3) * self.h.state + p.g_nap_bar * self.p.state.powi(3))
            * p.e_na
            + p.g_k_bar * self.s.state * p.e_k
            + p.g_l * p.e_l
    }

    /// Total ionic current density (mA/cm2) at the given voltage with the
    /// present gating state
    pub fn current_density(&self, v: f64) -> f64 {
        self.conductance_density() * v - self.reversal_current_density()
    }
}
