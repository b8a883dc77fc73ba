pub mod pyrolysis_examples;
