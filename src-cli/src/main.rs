//! designator
//!
//! 把 OpenStack 实例（Neutron 端口的 `dns_name`）同步为 Designate DNS 记录。
//! 默认执行一个周期后退出，由 cron 等外部调度器周期调用；
//! `--interval` 模式下在进程内按固定间隔执行。

mod config;
mod error;
mod runner;
mod telemetry;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use config::AppConfig;
use runner::Runner;

/// 把 OpenStack 实例同步为 Designate DNS 记录
#[derive(Parser, Debug)]
#[command(name = "designator")]
#[command(version, about, long_about = None)]
struct Args {
    /// 配置文件路径（TOML）
    #[arg(short, long, env = "DESIGNATOR_CONFIG", default_value = "designator.toml")]
    config: PathBuf,

    /// 只计算并打印计划，不创建或删除任何记录
    #[arg(long)]
    dry_run: bool,

    /// 按固定间隔（秒）持续运行，直到收到 Ctrl-C
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// 输出 JSON 格式日志
    #[arg(long)]
    log_json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // 日志可能尚未初始化，直接写 stderr
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    // 加载配置
    let config = AppConfig::load(&args.config)?;

    // 初始化日志
    telemetry::init(&config.log, args.log_json)?;
    tracing::info!(
        config_file = %args.config.display(),
        auth_url = %config.cloud.auth_url,
        project = %config.cloud.project_name,
        dry_run = args.dry_run,
        "Starting designator"
    );

    let runner = Runner::new(config, args.dry_run);
    match args.interval {
        Some(secs) => runner.run_interval(Duration::from_secs(secs)).await?,
        None => {
            runner.run_once().await?;
        }
    }
    Ok(())
}
