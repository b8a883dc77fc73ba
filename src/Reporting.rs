/// Aggregation of simulated trajectories into phase yields and tabular
/// comparison against the experimental lumped yields.
pub mod yield_comparison;
/// Elemental C/H/O breakdown of the gas-phase products.
pub mod gas_elemental;
