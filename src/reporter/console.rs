//! Console output for a finished run

use crate::RunSummary;
use colored::Colorize;

/// Reporter for terminal output
pub struct ConsoleReporter {
    verbose: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Also list cases whose source could not be found
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    pub fn report(&self, summary: &RunSummary) {
        if self.verbose {
            for name in &summary.missing_snippets {
                eprintln!(
                    "{}: No source found for case '{}'",
                    "Warning".yellow(),
                    name
                );
            }
        }
        println!(
            "{} Report generated: {}",
            "✓".green().bold(),
            summary.output_path.display()
        );
        println!("{}", Self::summary_line(summary));
    }

    /// One-line summary, e.g. `12 tests in 3 suites, 11 passed, 1 failed (91.7%)`
    pub fn summary_line(summary: &RunSummary) -> String {
        let t = &summary.totals;
        let failed = if t.failed > 0 {
            format!("{} failed", t.failed).red().bold().to_string()
        } else {
            format!("{} failed", t.failed)
        };
        format!(
            "{} tests in {} suite{}, {} passed, {} ({}%)",
            t.total,
            summary.suites,
            if summary.suites == 1 { "" } else { "s" },
            t.passed.to_string().green(),
            failed,
            t.success_rate_label()
        )
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
