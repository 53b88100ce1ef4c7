use serde_json::json;

use crate::cli::output::output_success;
use crate::cli::OutputFormat;
use crate::database::schema;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    output_success(output_format, &schema::ddl(), json!({ "statements": schema::STATEMENTS }))
}
