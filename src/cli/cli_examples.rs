use crate::Examples::pyrolysis_examples::pyrolysis_examples;
use std::io::{self, Write};

pub fn examples_menu() {
    loop {
        println!("\n=== Examples ===");
        println!("1. Feedstock library and characterization");
        println!("2. Batch simulation, single feedstock");
        println!("3. Batch simulations, all feedstocks");
        println!("4. CSTR chain simulation");
        println!("5. Liquid yield versus temperature");
        println!("6. CSTR chain simulations, all feedstocks");
        println!("7. Print the reaction scheme");
        println!("0. Back to main menu");
        print!("Enter your choice: ");
        io::stdout().flush().unwrap();

        let choice = get_user_input();
        match choice.trim() {
            "1" => pyrolysis_examples(0),
            "2" => pyrolysis_examples(1),
            "3" => pyrolysis_examples(2),
            "4" => pyrolysis_examples(3),
            "5" => pyrolysis_examples(4),
            "6" => pyrolysis_examples(5),
            "7" => pyrolysis_examples(6),
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn get_user_input() -> String {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input
}
