use comp_forge::batch::BatchOptions;

use crate::cli::RowOptions;

pub fn build_batch_options(opts: &RowOptions) -> BatchOptions {
    BatchOptions {
        column: opts.column.clone(),
        ignore_errors: opts.ignore_errors,
        jobs: opts.jobs,
        keep_source_column: !opts.drop_source,
    }
}
