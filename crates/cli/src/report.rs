//! Terminal report for scan results.

use console::style;

use hintscan_scanner::ScanResult;

/// Print the scan summary and the at-risk function table
pub fn print_scan_report(result: &ScanResult) {
    let at_risk = result.at_risk();

    println!(
        "{}",
        style(format!(
            "Scanned {} file(s) — {} function(s) at risk — health {}%",
            result.files_scanned,
            at_risk.len(),
            result.health_score()
        ))
        .bold()
    );

    for skipped in &result.skipped {
        println!(
            "  {} {}: {}",
            style("skipped").yellow(),
            skipped.path.display(),
            skipped.reason
        );
    }

    if at_risk.is_empty() {
        println!("{}", style("No missing type hints found!").green());
        return;
    }

    println!();
    println!(
        "{:<40} {:>5}  {:<24} {:<32} {}",
        style("File").cyan(),
        style("Line").cyan(),
        style("Function").cyan(),
        style("Missing Params").cyan(),
        style("Return?").cyan()
    );

    for func in at_risk {
        let missing = if func.missing_params.is_empty() {
            "-".to_string()
        } else {
            func.missing_params.join(", ")
        };
        let ret = if func.has_return_annotation {
            style("yes").green()
        } else {
            style("no").red()
        };
        println!(
            "{:<40} {:>5}  {:<24} {:<32} {}",
            func.path.display(),
            func.line,
            func.name,
            missing,
            ret
        );
    }
}

/// Coloured one-line summary after a batch operation, plus accumulated
/// errors
pub fn print_summary(verb: &str, succeeded: usize, failed: usize, errors: &[(String, String)]) {
    let mut parts: Vec<String> = Vec::new();
    if succeeded > 0 {
        parts.push(format!(
            "{}",
            style(format!("{verb} {succeeded} file(s)")).green()
        ));
    }
    if failed > 0 {
        parts.push(format!("{}", style(format!("Failed {failed} file(s)")).red()));
    }
    if parts.is_empty() {
        println!("{}", style("Nothing to do.").dim());
    } else {
        println!("{}", parts.join(" | "));
    }

    if !errors.is_empty() {
        println!("{}", style("Errors:").red().bold());
        for (target, message) in errors {
            println!("  {}: {}", style(target).red(), message);
        }
    }
}
