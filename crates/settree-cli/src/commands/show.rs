use crate::cli::{OutputFormat, ShowArgs};
use crate::config;
use crate::error::Result;
use settree::io::Format;
use settree::Settings;
use tracing::info;

pub fn run(args: ShowArgs) -> Result<()> {
    let output = render(&args)?;
    print!("{}", output);
    Ok(())
}

pub fn render(args: &ShowArgs) -> Result<String> {
    let settings = config::build_settings(&args.files, &args.layering)?;
    info!(
        "Layered {} file(s) into {} top-level key(s).",
        args.files.len(),
        settings.len()
    );
    format_settings(&settings, args.format)
}

fn format_settings(settings: &Settings, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Tree => settings.render(0),
        OutputFormat::Toml => Format::Toml.render(settings)?,
        OutputFormat::Json => Format::Json.render(settings)? + "\n",
    })
}
