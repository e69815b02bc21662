use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use client_core::{load_settings, DashboardClient};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, ContentArrangement, Table};
use shared::{
    display::{table_view, TableView},
    domain::Category,
    error::FetchFailure,
    protocol::Records,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(about = "Fetch one e-commerce collection and print it")]
struct Args {
    /// Gateway base URL; overrides dashboard.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
    /// products, orders or users
    category: Category,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "dashboard run failed");
            eprintln!("{}", failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

/// Text printed on stderr when the run fails.
///
/// Fetch failures already read "Failed to fetch <endpoint>: <reason>" and
/// carry their cause as `source`, so the chain is not appended again.
fn failure_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<FetchFailure>() {
        Some(failure) => failure.to_string(),
        None => format!("{err:#}"),
    }
}

async fn run(args: Args) -> Result<()> {
    let settings =
        load_settings(args.api_url.as_deref()).context("failed to load dashboard settings")?;
    let client = DashboardClient::from_settings(&settings);
    tracing::info!(category = %args.category, api_url = client.api_url(), "fetching");

    let records = client.fetch_records(args.category).await?;
    println!("{}", render(&records, args.format)?);
    Ok(())
}

fn render(records: &Records, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let view = table_view(records);
            Ok(format!("{}\n{}", view.title, build_table(&view)))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&records.to_json_value()?)?),
    }
}

fn build_table(view: &TableView) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            view.headers
                .iter()
                .map(|header| Cell::new(header).add_attribute(Attribute::Bold)),
        );
    for row in &view.rows {
        table.add_row(row);
    }
    table
}

#[cfg(test)]
mod tests {
    use client_core::ConfigError;
    use shared::{
        error::FetchError,
        protocol::{decode_records, endpoint_path},
    };

    use super::*;

    #[test]
    fn parses_category_and_format_flags() {
        let args = Args::try_parse_from(["cli", "--format", "json", "orders"]).expect("args");
        assert_eq!(args.category, Category::Orders);
        assert_eq!(args.format, OutputFormat::Json);
        assert!(Args::try_parse_from(["cli", "carts"]).is_err());
    }

    #[test]
    fn table_output_has_title_headers_and_cells() {
        let records = decode_records(
            Category::Products,
            br#"[{"id":1,"name":"Widget","category":"tools","price":9.99,"stock":5}]"#,
        )
        .expect("products");

        let output = render(&records, OutputFormat::Table).expect("render");
        assert!(output.starts_with("Products (from be-ecom-products)\n"));
        for expected in ["ID", "Stock", "Widget", "$9.99"] {
            assert!(output.contains(expected), "missing {expected} in:\n{output}");
        }
    }

    #[test]
    fn json_output_is_the_bare_record_array() {
        let records = decode_records(Category::Users, br#"[{"id":"u-1","joinedAt":"2024-02-01"}]"#)
            .expect("users");

        let output = render(&records, OutputFormat::Json).expect("render");
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value[0]["id"], "u-1");
        assert_eq!(value[0]["joinedAt"], "2024-02-01");
    }

    #[test]
    fn fetch_failures_print_the_dashboard_message_alone() {
        let err = anyhow::Error::from(FetchFailure::new(
            endpoint_path(Category::Users),
            FetchError::Status(500),
        ));
        assert_eq!(
            failure_message(&err),
            "Failed to fetch be-ecom-users/api/users: HTTP 500"
        );
    }

    #[test]
    fn startup_failures_keep_their_context_chain() {
        let err = anyhow::Error::from(ConfigError::InvalidApiUrl {
            url: "ftp://gw".to_string(),
            reason: "scheme must be http or https".to_string(),
        })
        .context("failed to load dashboard settings");
        let message = failure_message(&err);
        assert!(
            message.starts_with("failed to load dashboard settings: "),
            "unexpected message: {message}"
        );
        assert!(message.contains("ftp://gw"), "unexpected message: {message}");
    }
}
