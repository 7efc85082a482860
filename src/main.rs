// Mon Jan 19 2026 - Alex

use colored::Colorize;

fn main() {
    if let Err(err) = wrapxml::ui::cli::run() {
        eprintln!("{} {:#}", "[!]".red(), err);
        std::process::exit(1);
    }
}
