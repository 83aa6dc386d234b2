use crate::cli::BlockArgs;
use crate::config;
use crate::error::{CliError, Result};
use anyhow::Context;
use settree::render::render_block_input;
use tracing::info;

pub fn run(args: BlockArgs) -> Result<()> {
    let text = render(&args)?;
    print!("{}", text);
    Ok(())
}

pub fn render(args: &BlockArgs) -> Result<String> {
    let settings = config::build_settings(&args.files, &args.layering)?;
    let branch = settings
        .get_path(&args.branch)?
        .as_node()
        .ok_or_else(|| {
            CliError::Config(format!(
                "Branch '{}' must be a table of sections, not a single value.",
                args.branch
            ))
        })?;

    info!("Rendering branch '{}' as block input.", args.branch);
    let text = render_block_input(branch)
        .with_context(|| format!("Failed to render branch '{}'", args.branch))?;
    Ok(text)
}
