//! CLI subcommand modules.
//!
//! This module contains the implementations for all bandwatch CLI subcommands.

pub(crate) mod inflation;
pub(crate) mod markers;
pub(crate) mod models;
pub(crate) mod scan;
pub(crate) mod technical;

/// Prints a boxed title.
pub(crate) fn header(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{title:^62}║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}

/// Prints a section rule with a title.
pub(crate) fn section(title: &str) {
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{title}");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
}
