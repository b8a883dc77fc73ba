use crate::Examples::pyrolysis_examples::{
    DEFAULT_N_STAGES, DEFAULT_TEMPERATURE, FEEDSTOCK_FILE, MECHANISM_FILE, run_batch_all,
    run_batch_single, run_cstr_all, run_cstr_single,
};
use crate::Feedstocks::feedstock_lib_api::FeedstockLibrary;
use crate::Kinetics::mechanism::Mechanism;
use crate::Reporting::yield_comparison::print_comparison_table;
use crate::error::PyroError;
use std::io::{self, Write};

pub fn pyrolysis_menu() {
    loop {
        println!("\n=== Pyrolysis Reactor Simulations ===");
        println!("1. Batch run for one feedstock");
        println!("2. Batch runs for all feedstocks");
        println!("3. CSTR run for one feedstock");
        println!("4. CSTR runs for all feedstocks");
        println!("5. Show feedstock table");
        println!("0. Back to main menu");
        print!("Choose option: ");
        io::stdout().flush().unwrap();

        let choice = get_user_input();
        let outcome = match choice.trim() {
            "1" => batch_single(),
            "2" => batch_all(),
            "3" => cstr_single(),
            "4" => cstr_all(),
            "5" => show_feedstocks(),
            "0" => break,
            _ => {
                println!("Invalid option");
                Ok(())
            }
        };
        if let Err(e) = outcome {
            println!("Error: {}", e);
        }
    }
}

fn batch_single() -> Result<(), PyroError> {
    let mech = Mechanism::from_file(MECHANISM_FILE)?;
    let lib = FeedstockLibrary::from_json_file(FEEDSTOCK_FILE)?;
    let name = prompt_feedstock(&lib);
    let feedstock = lib.get(name.trim())?;
    let temperature = prompt_temperature();
    let (result, comparison) = run_batch_single(&mech, feedstock, temperature)?;
    comparison.pretty_print();
    if prompt_yes("Save trajectory to CSV?") {
        result.save_to_csv(None);
        println!("saved");
    }
    if prompt_yes("Plot in terminal?") {
        result.plot_in_terminal();
    }
    Ok(())
}

fn batch_all() -> Result<(), PyroError> {
    let mech = Mechanism::from_file(MECHANISM_FILE)?;
    let lib = FeedstockLibrary::from_json_file(FEEDSTOCK_FILE)?;
    let temperature = prompt_temperature();
    let comparisons = run_batch_all(&mech, &lib, temperature)?;
    print_comparison_table(&comparisons);
    Ok(())
}

fn cstr_single() -> Result<(), PyroError> {
    let mech = Mechanism::from_file(MECHANISM_FILE)?;
    let lib = FeedstockLibrary::from_json_file(FEEDSTOCK_FILE)?;
    let name = prompt_feedstock(&lib);
    let feedstock = lib.get(name.trim())?;
    let temperature = prompt_temperature();
    print!("Number of stages [{}]: ", DEFAULT_N_STAGES);
    io::stdout().flush().unwrap();
    let n_stages = get_user_input()
        .trim()
        .parse::<usize>()
        .unwrap_or(DEFAULT_N_STAGES);
    let (result, comparison) = run_cstr_single(&mech, feedstock, temperature, n_stages)?;
    comparison.pretty_print();
    if prompt_yes("Save stage outlets to CSV?") {
        result.save_to_csv(None);
        println!("saved");
    }
    Ok(())
}

fn cstr_all() -> Result<(), PyroError> {
    let mech = Mechanism::from_file(MECHANISM_FILE)?;
    let lib = FeedstockLibrary::from_json_file(FEEDSTOCK_FILE)?;
    let temperature = prompt_temperature();
    print!("Number of stages [{}]: ", DEFAULT_N_STAGES);
    io::stdout().flush().unwrap();
    let n_stages = get_user_input()
        .trim()
        .parse::<usize>()
        .unwrap_or(DEFAULT_N_STAGES);
    let comparisons = run_cstr_all(&mech, &lib, temperature, n_stages)?;
    print_comparison_table(&comparisons);
    Ok(())
}

fn show_feedstocks() -> Result<(), PyroError> {
    let lib = FeedstockLibrary::from_json_file(FEEDSTOCK_FILE)?;
    lib.pretty_print();
    Ok(())
}

fn prompt_feedstock(lib: &FeedstockLibrary) -> String {
    println!("Available feedstocks: {:?}", lib.names());
    print!("Feedstock name: ");
    io::stdout().flush().unwrap();
    get_user_input()
}

fn prompt_temperature() -> f64 {
    print!("Reactor temperature, K [{}]: ", DEFAULT_TEMPERATURE);
    io::stdout().flush().unwrap();
    get_user_input()
        .trim()
        .parse::<f64>()
        .unwrap_or(DEFAULT_TEMPERATURE)
}

fn prompt_yes(question: &str) -> bool {
    print!("{} (y/n): ", question);
    io::stdout().flush().unwrap();
    matches!(get_user_input().trim(), "y" | "Y" | "yes")
}

fn get_user_input() -> String {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input
}
