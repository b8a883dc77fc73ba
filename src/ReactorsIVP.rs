/// Reactor operating conditions shared by the batch and CSTR drivers:
/// initial temperature, pressure, heating profile, residence time and the
/// number of reported sample points.
pub mod reactor_config;

/// Assembly of the symbolic right-hand side dy/dt = S(y) from a pyrolysis
/// scheme and a temperature expression.
pub mod createIVP;

/// Batch (well-mixed, closed) reactor model integrating the rate equations
/// over the residence time.
pub mod BatchReactorIVP;

/// Continuous stirred-tank reactor model: a chain of ideally mixed stages,
/// each advanced to steady state, the outlet of one feeding the next.
pub mod CstrReactorIVP;

/// Simulation result container: resampled trajectory with plotting and CSV
/// export helpers.
pub mod simulation_result;
