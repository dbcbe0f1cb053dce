use std::process::ExitCode;
use skipgram_prep::{logging, Pipeline};
use tracing::{error, info};

fn main() -> ExitCode {

    logging::init();
    info!("entering program...");

    match Pipeline::run_from_args() {
        Ok(summary) => {
            info!(train_words = summary.train_words, num_pairs = summary.num_pairs, "done");
            ExitCode::SUCCESS
        },
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
