use anyhow::Context;
use cdf_extpipes::config::cli::{Cli, Command, RunsCommand};
use cdf_extpipes::utils::logger;
use cdf_extpipes::{
    ClientConfig, CogniteExtPipes, ExtractionPipeline, ExtractionPipelineFilter,
    ExtractionPipelineRun, Item, PipelinesFile, RunFilter, RunStatus,
};
use chrono::{DateTime, Utc};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => ClientConfig::from_env().context("Failed to load config from environment")?,
    };
    let client = CogniteExtPipes::new(config)?;
    let pipelines = client.extraction_pipelines();

    match cli.command {
        Command::List {
            name,
            external_id_prefix,
            data_set_ids,
            created_by,
        } => {
            let filter = ExtractionPipelineFilter {
                name,
                external_id_prefix,
                data_set_ids: if data_set_ids.is_empty() {
                    None
                } else {
                    Some(data_set_ids)
                },
                created_by,
            };
            let mut pager = pipelines.list(filter)?;
            let mut total = 0;
            while let Some(page) = pager.next_page().await? {
                for pipeline in &page {
                    print_pipeline(pipeline);
                }
                total += page.len();
            }
            println!("{} pipeline(s)", total);
        }
        Command::Retrieve {
            ids,
            external_ids,
            ignore_unknown,
        } => {
            let items = to_items(ids, external_ids)?;
            let found = pipelines.retrieve(&items, ignore_unknown).await?;
            for pipeline in &found {
                print_pipeline(pipeline);
            }
            println!("{} pipeline(s)", found.len());
        }
        Command::Upsert { file } => {
            let declared = PipelinesFile::from_toml_file(&file)
                .with_context(|| format!("Failed to load pipelines from {}", file))?;
            let input: Vec<ExtractionPipeline> =
                declared.pipelines.into_iter().map(Into::into).collect();
            let upserted = pipelines.upsert(&input).await?;
            for pipeline in &upserted {
                print_pipeline(pipeline);
            }
            println!("Upserted {} pipeline(s)", upserted.len());
        }
        Command::Delete {
            ids,
            external_ids,
            ignore_unknown,
        } => {
            let items = to_items(ids, external_ids)?;
            let deleted = pipelines.delete(&items, ignore_unknown).await?;
            for item in &deleted {
                println!("Deleted {}", item);
            }
        }
        Command::Runs { command } => match command {
            RunsCommand::List {
                external_id,
                statuses,
            } => {
                let mut filter = RunFilter::for_pipeline(external_id);
                if !statuses.is_empty() {
                    filter.statuses = Some(
                        statuses
                            .iter()
                            .map(|s| s.parse::<RunStatus>())
                            .collect::<Result<_, _>>()?,
                    );
                }
                let runs = pipelines.runs().list_all(filter).await?;
                for run in &runs {
                    print_run(run);
                }
                println!("{} run(s)", runs.len());
            }
            RunsCommand::Create {
                external_id,
                status,
                message,
            } => {
                let run = ExtractionPipelineRun {
                    id: None,
                    external_id: Some(external_id),
                    status: status.parse()?,
                    message,
                    created_time: None,
                };
                let created = pipelines.runs().create(&[run]).await?;
                for run in &created {
                    print_run(run);
                }
            }
        },
    }

    Ok(())
}

fn to_items(ids: Vec<i64>, external_ids: Vec<String>) -> anyhow::Result<Vec<Item>> {
    let items: Vec<Item> = ids
        .into_iter()
        .map(Item::id)
        .chain(external_ids.into_iter().map(Item::external_id))
        .collect();
    anyhow::ensure!(!items.is_empty(), "Provide at least one --ids or --external-ids");
    Ok(items)
}

fn print_pipeline(pipeline: &ExtractionPipeline) {
    println!(
        "{:<30} {:<30} schedule={:<12} last_seen={}",
        pipeline.external_id.as_deref().unwrap_or("-"),
        pipeline.name.as_deref().unwrap_or("-"),
        pipeline.schedule.as_deref().unwrap_or("-"),
        format_millis(pipeline.last_seen),
    );
}

fn print_run(run: &ExtractionPipelineRun) {
    println!(
        "{} {:?} {} {}",
        format_millis(run.created_time),
        run.status,
        run.external_id.as_deref().unwrap_or("-"),
        run.message.as_deref().unwrap_or(""),
    );
}

fn format_millis(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}
