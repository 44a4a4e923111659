use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use lik::config::ConfigLoader;
use lik::parser;
use lik::runner::{RequestManager, RunOptions, RunSummary, Selector};

pub type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Parser)]
#[command(author, version, about = "Lik is a http client tool", long_about = None)]
pub struct Cli {
    /// 请求文件或目录
    #[arg(short, long)]
    pub path: PathBuf,

    /// 只执行该 namespace 下的请求
    #[arg(long)]
    pub namespace: Option<String>,

    /// 只执行该名称的请求
    #[arg(short, long)]
    pub name: Option<String>,

    /// 响应输出文件（追加写入），默认 stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 配置文件，默认查找 ./config/lik.yaml 等
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    fn output_writer(&self) -> Result<Box<dyn Write>> {
        match &self.output {
            None => Ok(Box::new(io::stdout())),
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("failed to open output {}", path.display()))?;
                Ok(Box::new(file))
            }
        }
    }
}

pub async fn run(cli: Cli) -> Result<RunSummary> {
    let mut out = cli.output_writer()?;

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConfigLoader::find_and_load()?,
    };

    let requests = parser::load_path(&cli.path)
        .with_context(|| format!("failed to read requests from {}", cli.path.display()))?;

    let options = RunOptions::new(Selector::new(cli.namespace, cli.name));
    let manager = RequestManager::new(options, config, requests);
    let summary = manager.run(&mut *out).await?;
    out.flush()?;

    print_summary(&summary);
    Ok(summary)
}

fn print_summary(summary: &RunSummary) {
    let failed = if summary.failed > 0 {
        summary.failed.to_string().red()
    } else {
        summary.failed.to_string().normal()
    };
    eprintln!(
        "{} {}, succeed {}, failed {}",
        "total".bold(),
        summary.total,
        summary.succeed.to_string().green(),
        failed
    );
}
