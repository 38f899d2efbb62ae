//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::analysis::{AnalysisViewModel, SuggestionKind};
use crate::domain::audience::AudienceFit;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Get a cloneable handle to the active spinner, for callbacks that
    /// outlive the borrow of the presenter
    pub fn spinner_handle(&self) -> Option<ProgressBar> {
        self.spinner.clone()
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Format a 0-100 risk value as a fixed-width bar
    pub fn format_risk_bar(&self, risk: u8) -> String {
        let bar_width = 20usize;
        let filled = (risk as usize * bar_width) / 100;
        let empty = bar_width - filled;
        let bar = "█".repeat(filled);
        let colored_bar = if risk >= 70 {
            bar.red()
        } else if risk >= 40 {
            bar.yellow()
        } else {
            bar.green()
        };
        format!("[{}{}] {:>3}%", colored_bar, "░".repeat(empty), risk)
    }

    /// Render the full analysis to stdout
    pub fn render_analysis(&self, model: &AnalysisViewModel) {
        self.section("Summary");
        self.key_value("drop risk", &model.stats.drop_risk);
        self.key_value("jargon density", &model.stats.jargon_density);
        self.key_value("filler words", &model.stats.filler_words);

        if !model.timeline.is_empty() {
            self.section("Timeline");
            for point in &model.timeline {
                let label = point.label.as_deref().unwrap_or("");
                println!(
                    "  {:>6}  {}  {}",
                    point.time,
                    self.format_risk_bar(point.risk),
                    label.dimmed()
                );
            }
        }

        self.section("Critical section");
        println!(
            "  {} - {} (risk {})",
            model.critical_section.start, model.critical_section.end, model.critical_section.risk
        );

        self.section(&model.problematic_section.title);
        println!(
            "  {}  {}",
            model.problematic_section.range.dimmed(),
            model.problematic_section.description
        );

        if !model.suggestions.is_empty() {
            self.section("Suggestions");
            for suggestion in &model.suggestions {
                println!(
                    "  {} {}",
                    Self::kind_tag(suggestion.kind),
                    suggestion.title.bold()
                );
                if !suggestion.description.is_empty() {
                    println!("      {}", suggestion.description);
                }
            }
        }

        self.section("Insights");
        for insight in [
            &model.insights.jargon,
            &model.insights.explanation,
            &model.insights.monotone,
            &model.insights.fillers,
        ] {
            println!("  {}: {}", insight.title.bold(), insight.desc);
        }
    }

    /// Render an audience-fit panel to stdout
    pub fn render_fit(&self, fit: &AudienceFit) {
        self.section(&format!("Audience fit: {}", fit.audience));
        println!("  score {}", self.format_risk_bar(fit.fit_score));

        if !fit.mismatches.is_empty() {
            println!("  {}", "Mismatches".bold());
            for mismatch in &fit.mismatches {
                println!("    - {}", mismatch);
            }
        }
        if !fit.suggestions.is_empty() {
            println!("  {}", "Suggestions".bold());
            for suggestion in &fit.suggestions {
                println!("    - {}", suggestion);
            }
        }
        if !fit.structural_insights.is_empty() {
            println!("  {}", "Structure".bold());
            for (key, value) in &fit.structural_insights {
                println!("    {}: {}", key.cyan(), value);
            }
        }
    }

    fn section(&self, title: &str) {
        println!();
        println!("{}", title.bold().underline());
    }

    fn kind_tag(kind: SuggestionKind) -> ColoredString {
        match kind {
            SuggestionKind::Simplify => "[simplify]".cyan(),
            SuggestionKind::Example => "[example]".green(),
            SuggestionKind::Delivery => "[delivery]".yellow(),
            SuggestionKind::Pacing => "[pacing]".magenta(),
            SuggestionKind::Other => "[general]".normal(),
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_bar_is_empty_at_zero() {
        let presenter = Presenter::new();
        let bar = presenter.format_risk_bar(0);
        assert!(bar.contains("0%"));
        assert!(!bar.contains('█'));
    }

    #[test]
    fn risk_bar_is_full_at_hundred() {
        let presenter = Presenter::new();
        let bar = presenter.format_risk_bar(100);
        assert!(bar.contains("100%"));
        assert!(!bar.contains('░'));
    }

    #[test]
    fn risk_bar_is_partial_in_between() {
        let presenter = Presenter::new();
        let bar = presenter.format_risk_bar(50);
        assert!(bar.contains("50%"));
        assert!(bar.contains('█'));
        assert!(bar.contains('░'));
    }
}
