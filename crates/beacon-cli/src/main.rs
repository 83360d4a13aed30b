//! beacon - inspect and exercise the beacon SDK bootstrap
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a configuration template
//! beacon init
//!
//! # Show which integrations a configuration selects
//! beacon resolve
//!
//! # Run the bootstrap twice and watch hooks run only once
//! beacon bootstrap --repeat 2
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
