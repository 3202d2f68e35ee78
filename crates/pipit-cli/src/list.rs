//! `list` subcommand handler

use pipit_stdlib::registry;

/// Print every registered builtin, one per line
pub fn handle_list(long: bool) {
    for line in list_lines(long) {
        println!("{line}");
    }
}

pub fn list_lines(long: bool) -> Vec<String> {
    registry()
        .iter()
        .map(|builtin| {
            if long {
                format!("{}\t{}", builtin.name(), builtin.signature())
            } else {
                builtin.name().to_string()
            }
        })
        .collect()
}
