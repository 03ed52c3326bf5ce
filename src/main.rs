use anyhow::Result;
use portprobe::cli::Cli;
use portprobe::scan;

#[tokio::main]
async fn main() -> Result<()> {
    portprobe::init_tracing();
    let cli = Cli::parse();
    scan::run(cli).await
}
