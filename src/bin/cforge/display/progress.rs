use std::io::{self, Write};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

pub struct StepSpinner {
    bar: Option<ProgressBar>,
    start: Instant,
    step: u8,
    total_steps: u8,
    step_start: Instant,
}

impl StepSpinner {
    fn new(total_steps: u8) -> Self {
        let now = Instant::now();
        Self {
            bar: None,
            start: now,
            step: 0,
            total_steps,
            step_start: now,
        }
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn step(&mut self, description: &str) {
        self.clear();
        self.step += 1;
        self.step_start = Instant::now();

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .expect("invalid template")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        bar.set_message(format!("[{}/{}] {}...", self.step, self.total_steps, description));
        self.bar = Some(bar);
    }

    /// Swaps the current spinner for a bounded bar over `total` rows.
    fn rows(&mut self, total: usize) -> ProgressBar {
        self.clear();

        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "  [{}/{}] {{bar:36.cyan/blue}} {{pos:>7}}/{{len:7}} rows {{per_sec}}",
                    self.step, self.total_steps
                ))
                .expect("invalid template")
                .progress_chars("█▓░"),
        );
        self.bar = Some(bar.clone());
        bar
    }

    fn complete_step(&mut self, description: &str, substeps: &[String]) {
        self.clear();

        let elapsed = self.step_start.elapsed();
        let mut stderr = io::stderr().lock();

        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m {:<44} {:>5.1}s",
            description,
            elapsed.as_secs_f64()
        );
        for substep in substeps {
            let _ = writeln!(stderr, "      \x1b[2m·\x1b[0m {}", substep);
        }
    }

    fn finish(mut self) {
        self.clear();

        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr);
        let _ = writeln!(
            stderr,
            "  \x1b[32m✓\x1b[0m Featurization complete {:>27}",
            format!("Total: {:.2}s", self.start.elapsed().as_secs_f64())
        );
        let _ = writeln!(stderr);
    }
}

/// Step reporting for a multi-stage command; a no-op when not interactive.
pub enum Progress {
    Interactive(StepSpinner),
    Silent,
}

impl Progress {
    pub fn new(interactive: bool, total_steps: u8) -> Self {
        if interactive {
            Self::Interactive(StepSpinner::new(total_steps))
        } else {
            Self::Silent
        }
    }

    pub fn step(&mut self, description: &str) {
        if let Self::Interactive(s) = self {
            s.step(description);
        }
    }

    pub fn rows(&mut self, total: usize) -> RowTicker {
        match self {
            Self::Interactive(s) => RowTicker(Some(s.rows(total))),
            Self::Silent => RowTicker(None),
        }
    }

    pub fn complete_step(&mut self, description: &str, substeps: &[String]) {
        if let Self::Interactive(s) = self {
            s.complete_step(description, substeps);
        }
    }

    pub fn finish(self) {
        if let Self::Interactive(s) = self {
            s.finish();
        }
    }
}

/// Per-row counter handed to the batch workers.
pub struct RowTicker(Option<ProgressBar>);

impl RowTicker {
    pub fn tick(&self) {
        if let Some(bar) = &self.0 {
            bar.inc(1);
        }
    }
}
