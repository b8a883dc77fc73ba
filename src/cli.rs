pub mod cli_main;
pub mod cli_pyrolysis;
pub mod cli_examples;
