//! Colored status lines for the interactive phase

use crate::prelude::println;
use colored::Colorize;

pub fn error_line(message: &str) -> String {
    format!("ERROR: {}", message.red())
}

pub fn success_line(message: &str) -> String {
    format!("SUCCESS: {}", message.green())
}

pub fn warning_line(message: &str) -> String {
    format!("WARNING: {}", message.yellow())
}

pub fn info_line(message: &str) -> String {
    message.blue().to_string()
}

pub fn error(message: &str) {
    println!("{}", error_line(message));
}

pub fn info(message: &str) {
    println!("{}", info_line(message));
}
