use PyroKin::cli::cli_main::run_interactive_menu;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

pub fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("logger init");
    run_interactive_menu();
}
