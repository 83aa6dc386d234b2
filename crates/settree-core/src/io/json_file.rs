use super::error::LoadError;
use super::traits::SettingsFile;
use crate::core::settings::Settings;

/// JSON settings files. Objects become nodes; object keys are always string keys.
pub struct JsonFile;

impl SettingsFile for JsonFile {
    fn parse(text: &str, origin: &str) -> Result<Settings, LoadError> {
        serde_json::from_str(text).map_err(|source| LoadError::Json {
            path: origin.to_string(),
            source,
        })
    }

    fn render(settings: &Settings) -> Result<String, LoadError> {
        serde_json::to_string_pretty(settings).map_err(|source| LoadError::Json {
            path: "<output>".to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Value;

    #[test]
    fn parse_handles_nulls_and_object_lists() {
        let settings =
            JsonFile::parse(r#"{"a": null, "b": [{"c": 1}, 2], "d": {"e": false}}"#, "inline")
                .unwrap();
        assert_eq!(settings["a"], Value::Null);
        let list = settings["b"].as_list().unwrap();
        assert_eq!(list.get(0).unwrap()["c"], Value::Int(1));
        assert_eq!(list.get(1), Some(Value::Int(2)));
        assert_eq!(settings.get_path("d.e").unwrap(), &Value::Bool(false));
    }

    #[test]
    fn integer_keys_are_written_as_strings() {
        let mut settings = Settings::new();
        settings.set(12, "q");
        let text = JsonFile::render(&settings).unwrap();
        assert!(text.contains(r#""12": "q""#));
    }

    #[test]
    fn rendered_json_parses_back() {
        let mut settings = Settings::new();
        settings.set_path("x.y", "z").unwrap();
        settings.set("n", Value::Null);
        let text = JsonFile::render(&settings).unwrap();
        assert_eq!(JsonFile::parse(&text, "roundtrip").unwrap(), settings);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            JsonFile::parse("{", "broken.json"),
            Err(LoadError::Json { .. })
        ));
    }
}
