//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - time-domain multiplexed photonic programs",
        style("tdm").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  tdm-ir       Commands, circuits and band specs");
    println!("  tdm-program  Program construction, unrolling and sample reshaping");
    println!("  tdm-hal      Device specifications");
    println!("  tdm-compile  Device compatibility compilation");
    println!("  tdm-cli      Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
