mod banner;
mod error;
mod progress;
mod tables;

pub use banner::{banner_for_help, print_banner};
pub use error::print_error;
pub use progress::Progress;
pub use tables::{print_batch_summary, print_catalog_summary, print_dataset_info, print_failures};

#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Progress, banner and summary tables go to stderr.
    pub interactive: bool,
    /// `--quiet` was given; suppresses the plain-text failure digest too.
    pub quiet: bool,
}

impl Context {
    pub fn detect() -> Self {
        Self {
            interactive: crate::io::stderr_is_tty(),
            quiet: false,
        }
    }

    pub fn with_quiet(self, quiet: bool) -> Self {
        Self {
            interactive: self.interactive && !quiet,
            quiet,
        }
    }
}
