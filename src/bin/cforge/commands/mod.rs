mod batch;
mod featurize;
mod info;
mod labels;

use batch::run_batch;
use featurize::run_featurize;
use info::run_info;
use labels::run_labels;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Featurize(args) => run_featurize(args),
        Command::Batch(args) => run_batch(args, ctx),
        Command::Labels(args) => run_labels(args),
        Command::Info(args) => run_info(args),
    }
}
