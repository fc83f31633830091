//! Command line program for driving replication-simulator assay sweeps.

#[macro_use]
extern crate log;

pub mod cli;

use colored::*;

fn main() {
    match cli::start(cli::init()) {
        Ok(_) => (),
        Err(e) => {
            println!("{}{}", "error: ".red(), e);
            if e.root_cause().to_string() != e.to_string() {
                println!("Caused by:\n{}", e.root_cause())
            }
            std::process::exit(1);
        }
    }
}
