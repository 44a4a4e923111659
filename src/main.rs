mod cli;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    lik::logger::init_logger();

    let start = Instant::now();
    let cli = Cli::parse();
    let result = cli::run(cli).await;
    tracing::info!("total cost {:?}", start.elapsed());

    result.map(|_| ())
}
