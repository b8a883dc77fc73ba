use super::cli_examples::examples_menu;
use super::cli_pyrolysis::pyrolysis_menu;
use std::io::{self, Write};

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => pyrolysis_menu(),
            "2" => examples_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to PyroKin: reduced-order chemical kinetics simulations\n
    of biomass fast pyrolysis in batch and CSTR reactor models \n \x1b[0m"
    );
    println!("\x1b[33m1. Pyrolysis Simulations\x1b[0m");
    println!("\x1b[33m2. Examples\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    io::stdout().flush().unwrap();
}

fn get_user_input() -> String {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input
}
