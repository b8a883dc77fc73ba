use crate::Feedstocks::biocomp::{BiocompSplits, BiomassComposition, biocomp};
use crate::Feedstocks::feedstock::Feedstock;
use crate::Feedstocks::feedstock_lib_api::FeedstockLibrary;
use crate::Kinetics::mechanism::Mechanism;
use crate::ReactorsIVP::BatchReactorIVP::BatchReactor;
use crate::ReactorsIVP::CstrReactorIVP::CstrReactor;
use crate::ReactorsIVP::reactor_config::{HeatingProfile, ReactorConfig};
use crate::ReactorsIVP::simulation_result::SimulationResult;
use crate::Reporting::gas_elemental::GasElementalYields;
use crate::Reporting::yield_comparison::{PhaseYields, YieldComparison, print_comparison_table};
use crate::error::PyroError;
use prettytable::{Cell, Row, Table, row};

pub const MECHANISM_FILE: &str = "data/debiagi_sw.txt";
pub const FEEDSTOCK_FILE: &str = "data/feedstocks.json";

/// default reactor temperature of the fluidized-bed experiments, K
pub const DEFAULT_TEMPERATURE: f64 = 773.15;
pub const DEFAULT_PRESSURE: f64 = 101_325.0;
pub const DEFAULT_RESIDENCE_TIME: f64 = 20.0;
pub const DEFAULT_N_REPORT: usize = 200;
pub const DEFAULT_N_STAGES: usize = 10;

/// splitting parameters of a feedstock: its own override or the defaults
pub fn splits_of(feedstock: &Feedstock) -> BiocompSplits {
    match feedstock.splits {
        Some(arr) => BiocompSplits::from_array(arr),
        None => BiocompSplits::default(),
    }
}

/// biomass composition of a feedstock from its CHO analysis
pub fn characterize(feedstock: &Feedstock) -> Result<BiomassComposition, PyroError> {
    let cho = feedstock.ult_cho();
    biocomp(cho[0] / 100.0, cho[1] / 100.0, &splits_of(feedstock))
}

fn default_config(residence_time: Option<f64>) -> Result<ReactorConfig, PyroError> {
    ReactorConfig::new(
        DEFAULT_TEMPERATURE,
        DEFAULT_PRESSURE,
        HeatingProfile::Isothermal,
        residence_time.unwrap_or(DEFAULT_RESIDENCE_TIME),
        DEFAULT_N_REPORT,
    )
}

/// Batch simulation of one feedstock at the given temperature.
pub fn run_batch_single(
    mech: &Mechanism,
    feedstock: &Feedstock,
    temperature: f64,
) -> Result<(SimulationResult, YieldComparison), PyroError> {
    let mut config = default_config(feedstock.residence_time)?;
    config.initial_temperature = temperature;
    config.validate()?;
    let reactor = BatchReactor::new(config);
    let bc = characterize(feedstock)?;
    let inlet = feedstock.inlet_composition(&bc)?;
    let result = reactor.simulate(mech, &feedstock.name, &inlet)?;
    let yields = PhaseYields::from_result(&result, mech)?;
    Ok((result, YieldComparison::new(feedstock, yields)))
}

/// Batch simulations of every feedstock in the library, in table order.
/// The first failing feedstock aborts the run.
pub fn run_batch_all(
    mech: &Mechanism,
    lib: &FeedstockLibrary,
    temperature: f64,
) -> Result<Vec<YieldComparison>, PyroError> {
    let mut comparisons = Vec::with_capacity(lib.feedstocks.len());
    for feedstock in &lib.feedstocks {
        let (_, comparison) = run_batch_single(mech, feedstock, temperature)?;
        comparisons.push(comparison);
    }
    Ok(comparisons)
}

/// CSTR chain simulation of one feedstock.
pub fn run_cstr_single(
    mech: &Mechanism,
    feedstock: &Feedstock,
    temperature: f64,
    n_stages: usize,
) -> Result<(SimulationResult, YieldComparison), PyroError> {
    let mut config = default_config(feedstock.residence_time)?;
    config.initial_temperature = temperature;
    config.validate()?;
    let reactor = CstrReactor::new(config, n_stages)?;
    let bc = characterize(feedstock)?;
    let inlet = feedstock.inlet_composition(&bc)?;
    let result = reactor.simulate(mech, &feedstock.name, &inlet)?;
    let yields = PhaseYields::from_result(&result, mech)?;
    Ok((result, YieldComparison::new(feedstock, yields)))
}

/// CSTR chain simulations of every feedstock in the library, in table order.
/// The first failing feedstock aborts the run.
pub fn run_cstr_all(
    mech: &Mechanism,
    lib: &FeedstockLibrary,
    temperature: f64,
    n_stages: usize,
) -> Result<Vec<YieldComparison>, PyroError> {
    let mut comparisons = Vec::with_capacity(lib.feedstocks.len());
    for feedstock in &lib.feedstocks {
        let (_, comparison) = run_cstr_single(mech, feedstock, temperature, n_stages)?;
        comparisons.push(comparison);
    }
    Ok(comparisons)
}

/// print the characterization of every feedstock in the library
pub fn print_compositions(lib: &FeedstockLibrary) -> Result<(), PyroError> {
    let mut table = Table::new();
    table.add_row(row![
        "feedstock",
        "CELL",
        "GMSW",
        "LIGC",
        "LIGH",
        "LIGO",
        "TANN",
        "TGL"
    ]);
    for fs in &lib.feedstocks {
        let bc = characterize(fs)?;
        table.add_row(Row::new(vec![
            Cell::new(&fs.name),
            Cell::new(&format!("{:.4}", bc.cell)),
            Cell::new(&format!("{:.4}", bc.hemi)),
            Cell::new(&format!("{:.4}", bc.ligc)),
            Cell::new(&format!("{:.4}", bc.ligh)),
            Cell::new(&format!("{:.4}", bc.ligo)),
            Cell::new(&format!("{:.4}", bc.tann)),
            Cell::new(&format!("{:.4}", bc.tgl)),
        ]));
    }
    table.printstd();
    Ok(())
}

pub fn pyrolysis_examples(task: usize) {
    match task {
        0 => {
            // FEEDSTOCK LIBRARY AND BIOMASS CHARACTERIZATION
            let lib = FeedstockLibrary::from_json_file(FEEDSTOCK_FILE).unwrap();
            lib.pretty_print();
            print_compositions(&lib).unwrap();
        }
        1 => {
            // BATCH SIMULATION OF A SINGLE FEEDSTOCK
            let mech = Mechanism::from_file(MECHANISM_FILE).unwrap();
            let lib = FeedstockLibrary::from_json_file(FEEDSTOCK_FILE).unwrap();
            let feedstock = lib.get("Stem wood").unwrap();
            let (result, comparison) =
                run_batch_single(&mech, feedstock, DEFAULT_TEMPERATURE).unwrap();
            comparison.pretty_print();
            let elemental = GasElementalYields::from_result(&result, &mech).unwrap();
            elemental.pretty_print();
            result.save_to_csv(None);
            result.plot_in_terminal();
        }
        2 => {
            // BATCH SIMULATIONS OF ALL FEEDSTOCKS WITH YIELD COMPARISON
            let mech = Mechanism::from_file(MECHANISM_FILE).unwrap();
            let lib = FeedstockLibrary::from_json_file(FEEDSTOCK_FILE).unwrap();
            let comparisons = run_batch_all(&mech, &lib, DEFAULT_TEMPERATURE).unwrap();
            print_comparison_table(&comparisons);
        }
        3 => {
            // CSTR CHAIN SIMULATION OF A SINGLE FEEDSTOCK
            let mech = Mechanism::from_file(MECHANISM_FILE).unwrap();
            let lib = FeedstockLibrary::from_json_file(FEEDSTOCK_FILE).unwrap();
            let feedstock = lib.get("Stem wood").unwrap();
            let (result, comparison) =
                run_cstr_single(&mech, feedstock, DEFAULT_TEMPERATURE, DEFAULT_N_STAGES).unwrap();
            comparison.pretty_print();
            result.save_to_csv(None);
        }
        4 => {
            // LIQUID YIELD VERSUS REACTOR TEMPERATURE
            let mech = Mechanism::from_file(MECHANISM_FILE).unwrap();
            let lib = FeedstockLibrary::from_json_file(FEEDSTOCK_FILE).unwrap();
            let feedstock = lib.get("Stem wood").unwrap();
            let mut table = Table::new();
            table.add_row(row!["T, K", "gases", "liquids", "solids"]);
            for temperature in [723.15, 748.15, 773.15, 798.15, 823.15] {
                let (_, comparison) = run_batch_single(&mech, feedstock, temperature).unwrap();
                let lumped = comparison.model.lumped();
                table.add_row(Row::new(vec![
                    Cell::new(&format!("{:.2}", temperature)),
                    Cell::new(&format!("{:.2}", lumped[0])),
                    Cell::new(&format!("{:.2}", lumped[1])),
                    Cell::new(&format!("{:.2}", lumped[2])),
                ]));
            }
            table.printstd();
        }
        5 => {
            // CSTR CHAIN SIMULATIONS OF ALL FEEDSTOCKS WITH YIELD COMPARISON
            let mech = Mechanism::from_file(MECHANISM_FILE).unwrap();
            let lib = FeedstockLibrary::from_json_file(FEEDSTOCK_FILE).unwrap();
            let comparisons =
                run_cstr_all(&mech, &lib, DEFAULT_TEMPERATURE, DEFAULT_N_STAGES).unwrap();
            print_comparison_table(&comparisons);
        }
        6 => {
            // PRINT THE REACTION SCHEME
            let mech = Mechanism::from_file(MECHANISM_FILE).unwrap();
            println!("{}", mech.description);
            mech.pretty_print();
        }
        _ => println!("no such task"),
    }
}
