use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Print a result: `text` for humans, `data` merged under `success: true` for scripts
pub fn output_success(output_format: OutputFormat, text: &str, data: Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({ "success": true });
            if let (Some(target), Value::Object(fields)) = (response.as_object_mut(), data) {
                target.extend(fields);
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => println!("{}", text),
    }
    Ok(())
}
