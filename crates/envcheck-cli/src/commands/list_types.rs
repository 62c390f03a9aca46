//! List types command implementation.

use envcheck_core::known_types;

/// Runs the list-types command.
pub fn run() {
    println!("Available types:\n");
    println!("{:<20} Description", "Type");
    println!("{}", "-".repeat(60));

    for (names, description) in known_types() {
        println!("{:<20} {}", names.join(", "), description);
    }

    println!("\nDeclare a type with a comment above the variable in your example file:");
    println!("  # @type: port");
    println!("  PORT=3000");
    println!("\nOr on the command line / in envcheck.toml:");
    println!("  envcheck check --type PORT=port");
}
