//! Pass/fail reporting. The report is the program's stdout contract;
//! tracing diagnostics go to stderr separately.

use vidcheck_proto::outcome::ScenarioOutcome;

#[derive(Default)]
pub struct Report {
    outcomes: Vec<ScenarioOutcome>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print the outcome line immediately, then keep it for the summary.
    pub fn record(&mut self, outcome: ScenarioOutcome) {
        print_outcome(&outcome);
        self.outcomes.push(outcome);
    }

    pub fn print_summary(&self) {
        let passed = self.outcomes.iter().filter(|o| o.passed).count();
        println!("--- summary ---");
        for outcome in &self.outcomes {
            println!("{} {}", status_label(outcome.passed), outcome.name);
        }
        println!("{}/{} checks passed", passed, self.outcomes.len());
    }

    pub fn all_passed(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| o.passed)
    }

    pub fn outcomes(&self) -> &[ScenarioOutcome] {
        &self.outcomes
    }
}

fn print_outcome(outcome: &ScenarioOutcome) {
    println!(
        "[{}] {} {}",
        outcome.timestamp.format("%Y-%m-%d %H:%M:%S"),
        status_label(outcome.passed),
        outcome.name
    );
    println!("    {}", outcome.message);
    // Bodies are echoed on failure only, to aid debugging without flooding
    // output on success.
    if !outcome.passed {
        if let Some(detail) = &outcome.detail {
            println!("    response: {}", detail);
        }
    }
    println!();
}

fn status_label(passed: bool) -> &'static str {
    if passed {
        "PASS"
    } else {
        "FAIL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidcheck_proto::outcome::CheckFailure;

    #[test]
    fn test_all_passed_requires_outcomes() {
        let report = Report::new();
        assert!(!report.all_passed());
    }

    #[test]
    fn test_tally() {
        let mut report = Report::new();
        report.record(ScenarioOutcome::passed("a", "ok".into()));
        report.record(ScenarioOutcome::passed("b", "ok".into()));
        assert!(report.all_passed());

        report.record(ScenarioOutcome::failed(
            "c",
            &CheckFailure::EmptyListing,
            None,
        ));
        assert!(!report.all_passed());
        assert_eq!(report.outcomes().len(), 3);
    }
}
