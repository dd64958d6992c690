#[macro_use]
extern crate lazy_static;

mod cli_config;
mod common;
mod logger;
mod osci_config;
mod program_actions;
mod target_resolver;
mod test_manifest;

use clap::Parser;

use cli_config::{clap_cli_config::Opts, RunConfig};
use common::join_targets;
use logger::exit_error_log;
use program_actions::identify_func_test_targets;

fn main() {
  let run_config: RunConfig = RunConfig::from(Opts::parse());
  logger::set_verbose(run_config.verbose);

  match identify_func_test_targets(&run_config) {
    Ok(targets) => println!("{}", join_targets(&targets)),
    Err(error_message) => exit_error_log(error_message)
  }
}
