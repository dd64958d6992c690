use std::{process::exit, sync::atomic::{AtomicBool, Ordering}};
use colored::Colorize;

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(is_verbose: bool) {
  VERBOSE.store(is_verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
  return VERBOSE.load(Ordering::Relaxed);
}

// stdout only ever holds the final target list, so everything here goes to stderr.
pub fn warn(message: impl AsRef<str>) {
  eprintln!(
    "{}: {}",
    "Warning".yellow(),
    message.as_ref()
  );
}

pub fn info(message: impl AsRef<str>) {
  if is_verbose() {
    eprintln!(
      "{}: {}",
      "Info".cyan(),
      message.as_ref()
    );
  }
}

pub fn exit_error_log(error_message: impl AsRef<str>) -> ! {
  eprintln!("{}: {}", "Error".red(), error_message.as_ref());
  exit(1);
}
