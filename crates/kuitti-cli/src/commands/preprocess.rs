//! Preprocess command - extract a raw receipt into structured data.

use clap::Args;
use console::style;

use kuitti_core::Pipeline;

use super::config::load_config;
use super::ReceiptArgs;

/// Arguments for the preprocess command.
#[derive(Args)]
pub struct PreprocessArgs {
    #[command(flatten)]
    receipt: ReceiptArgs,
}

pub fn run(args: PreprocessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    args.receipt.apply(&mut config);

    let date = args.receipt.date();
    let pipeline = Pipeline::from_config(&config);
    let items = pipeline.preprocess(date)?;

    println!(
        "{} Extracted {} items to {}",
        style("✓").green(),
        items.len(),
        pipeline.store().cache_path(date).display()
    );

    Ok(())
}
