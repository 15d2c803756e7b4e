use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use sift_core::responses::FieldError;

    use super::*;

    #[test]
    fn json_is_pretty_and_raw_is_single_line() {
        let value = json!({"label": "demo_slr", "fields": 1});

        let pretty = render(&value, OutputFormat::Json).unwrap();
        assert!(pretty.contains('\n'));

        let raw = render(&value, OutputFormat::Raw).unwrap();
        assert_eq!(raw, r#"{"fields":1,"label":"demo_slr"}"#);
    }

    #[test]
    fn field_errors_render_as_path_message_pairs() {
        let errors = vec![FieldError::new("/category/0/values", "too short")];
        let raw = render(&errors, OutputFormat::Raw).unwrap();
        assert_eq!(raw, r#"[{"path":"/category/0/values","message":"too short"}]"#);
    }
}
