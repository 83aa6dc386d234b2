use crate::cli::GetArgs;
use crate::error::{CliError, Result};
use settree::core::settings::path_keys;
use settree::{Value, ig, io};
use tracing::debug;

pub fn run(args: GetArgs) -> Result<()> {
    let value = lookup(&args)?;
    match value {
        Value::Node(node) => print!("{}", node.render(0)),
        other => println!("{}", other),
    }
    Ok(())
}

/// Reads the value at the requested path without modifying the loaded tree.
pub fn lookup(args: &GetArgs) -> Result<Value> {
    let settings = io::load(&args.file)?;
    debug!("Looking up '{}' (ignore case: {})", args.key, args.ignore_case);

    let found = if args.ignore_case {
        let keys = path_keys(&args.key)?;
        settings
            .find_nested(keys.iter().map(|k| ig(k.to_string())))
            .cloned()
    } else {
        Some(settings.get_path(&args.key)?.clone())
    };

    found.ok_or_else(|| CliError::Config(format!("No value found at '{}'.", args.key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use settree::SettingsError;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::{TempDir, tempdir};

    fn settings_file(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("job.toml");
        fs::write(&path, "[Input.Global]\nRun_Type = \"energy\"\n").unwrap();
        path
    }

    #[test]
    fn exact_lookup_returns_value() {
        let dir = tempdir().unwrap();
        let args = GetArgs {
            file: settings_file(&dir),
            key: "Input.Global.Run_Type".to_string(),
            ignore_case: false,
        };
        assert_eq!(lookup(&args).unwrap(), Value::from("energy"));
    }

    #[test]
    fn exact_lookup_reports_missing_key() {
        let dir = tempdir().unwrap();
        let args = GetArgs {
            file: settings_file(&dir),
            key: "input.global.run_type".to_string(),
            ignore_case: false,
        };
        assert!(matches!(
            lookup(&args),
            Err(CliError::Settings(SettingsError::KeyResolution { .. }))
        ));
    }

    #[test]
    fn ignore_case_lookup_resolves_every_segment() {
        let dir = tempdir().unwrap();
        let args = GetArgs {
            file: settings_file(&dir),
            key: "input.GLOBAL.run_type".to_string(),
            ignore_case: true,
        };
        assert_eq!(lookup(&args).unwrap(), Value::from("energy"));
    }

    #[test]
    fn ignore_case_lookup_of_missing_key_is_an_error() {
        let dir = tempdir().unwrap();
        let args = GetArgs {
            file: settings_file(&dir),
            key: "input.motion".to_string(),
            ignore_case: true,
        };
        assert!(matches!(lookup(&args), Err(CliError::Config(_))));
    }
}
