#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Feedstocks;
#[allow(non_snake_case)]
pub mod Kinetics;
#[allow(non_snake_case)]
pub mod ReactorsIVP;
#[allow(non_snake_case)]
pub mod Reporting;
pub mod cli;
pub mod error;
