mod cli;
mod config;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use common::logger::init_logger;
use graph::adapter::GraphAdapter;
use graph::runner::{RunSummary, run_feed};
use graph::widget::JsonLinesWidget;
use market::feed::ReplayFeed;

use cli::Cli;
use config::AppConfig;

fn open_output(cli: &Cli) -> anyhow::Result<Box<dyn Write + Send>> {
    match &cli.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Replay `cli.input` through the adapter, writing the table unless headless.
async fn run(cli: &Cli, cfg: &AppConfig) -> anyhow::Result<RunSummary> {
    let feed = Arc::new(
        ReplayFeed::new(&cli.input).with_interval(Duration::from_millis(cfg.feed_interval_ms)),
    );

    let widget = if cli.headless {
        None
    } else {
        Some(JsonLinesWidget::new(open_output(cli)?))
    };

    let mut adapter = GraphAdapter::new(cfg.band());
    adapter.start(widget);

    run_feed(feed, &mut adapter, cfg.channel_capacity).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = AppConfig::from_env()?;
    cfg.apply_cli(&cli)?;

    init_logger("ratio-graph", cfg.json_logs);
    info!(
        input = %cli.input.display(),
        tolerance = cfg.tolerance,
        headless = cli.headless,
        "Starting ratio graph"
    );

    let summary = run(&cli, &cfg).await?;

    info!(
        delivered = summary.delivered,
        appended = summary.appended,
        alerts = summary.alerts,
        "Done"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::{NamedTempFile, TempDir};

    const BALANCED: &str = r#"[{"stock":"ABC","top_ask":{"price":101},"top_bid":{"price":99},"timestamp":"2019-02-01T09:30:00Z"},{"stock":"DEF","top_ask":{"price":100},"top_bid":{"price":100},"timestamp":"2019-02-01T09:30:00.250Z"}]"#;
    const ABOVE_BAND: &str = r#"[{"stock":"ABC","top_ask":{"price":125},"top_bid":{"price":123},"timestamp":"2019-02-01T09:30:01Z"},{"stock":"DEF","top_ask":{"price":100},"top_bid":{"price":100},"timestamp":"2019-02-01T09:30:01.250Z"}]"#;

    fn quotes_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{BALANCED}").unwrap();
        writeln!(file, "{ABOVE_BAND}").unwrap();
        file
    }

    fn parse(input: &Path, output: &Path, extra: &[&str]) -> Cli {
        let mut args = vec![
            "ratio-graph".to_string(),
            "--input".into(),
            input.display().to_string(),
            "--output".into(),
            output.display().to_string(),
        ];
        args.extend(extra.iter().map(|a| a.to_string()));
        Cli::parse_from(args)
    }

    fn config_for(cli: &Cli) -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.apply_cli(cli).unwrap();
        cfg
    }

    #[tokio::test]
    async fn output_gets_header_and_one_row_per_pair() {
        let input = quotes_file();
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("table.jsonl");
        let cli = parse(input.path(), &output, &[]);

        let summary = run(&cli, &config_for(&cli)).await.unwrap();

        assert_eq!(summary.delivered, 2);
        assert_eq!(summary.appended, 2);
        assert_eq!(summary.alerts, 1);

        let written = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<serde_json::Value> = written
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["schema"]["timestamp"], "date");
        assert_eq!(lines[0]["config"]["view"], "y_line");
        assert!(lines[1]["trigger_alert"].is_null());
        assert_eq!(lines[2]["trigger_alert"], 1.24);
        assert_eq!(lines[2]["timestamp"], "2019-02-01T09:30:01.250Z");
    }

    #[tokio::test]
    async fn headless_consumes_pairs_without_output() {
        let input = quotes_file();
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("table.jsonl");
        let cli = parse(input.path(), &output, &["--headless"]);

        let summary = run(&cli, &config_for(&cli)).await.unwrap();

        assert_eq!(summary.delivered, 2);
        assert_eq!(summary.appended, 0);
        assert_eq!(summary.alerts, 0);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn tolerance_flag_reaches_the_rows() {
        let input = quotes_file();
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("table.jsonl");
        let cli = parse(input.path(), &output, &["--tolerance", "0.5"]);

        let summary = run(&cli, &config_for(&cli)).await.unwrap();

        assert_eq!(summary.appended, 2);
        assert_eq!(summary.alerts, 0);
    }

    #[tokio::test]
    async fn missing_input_is_an_error() {
        let dir = TempDir::new().unwrap();
        let cli = parse(&dir.path().join("absent.jsonl"), &dir.path().join("out"), &[]);

        assert!(run(&cli, &config_for(&cli)).await.is_err());
    }
}
