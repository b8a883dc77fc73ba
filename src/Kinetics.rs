/// The module takes as input a vector of reaction equations specified as a vector of String
/// and produces the following data:
/// 1) a stoichiometric matrix specified as a vector of vectors (mass-based, products positive,
///    reactants negative)
/// 2) a vector of substances in order of first appearance
/// 3) a matrix of concentration orders of the reactants for the kinetic function
///
/// Lumped pyrolysis schemes use mass-based coefficients, so every reaction must conserve mass:
/// the sum of product coefficients must equal the sum of reactant coefficients.
pub mod stoichiometry_analyzer;

/// Mechanism file loading and Arrhenius rate constants.
///
/// A mechanism is a sectioned text file (DESCRIPTION / PHASES / REACTIONS) understood by this
/// module; the parsed mechanism is immutable for the run and passed by reference to each
/// reactor driver invocation.
///
///  # Examples
/// ```rust, ignore
/// use PyroKin::Kinetics::mechanism::Mechanism;
/// let mech = Mechanism::from_file("data/debiagi_sw.txt")?;
/// mech.pretty_print();
/// ```
pub mod mechanism;
