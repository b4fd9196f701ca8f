use rbplay::PlaygroundConfig;
use rbplay::{bench_step, run};

use clap::Parser;
use anyhow::Result;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short, default_value = "default.yaml")]
    file_name: String,

    /// Run the step-throughput benchmark instead of the viewer
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_config_from_yaml(file_name: &str) -> Result<PlaygroundConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configs").join(file_name);
    let file = File::open(&config_path)?;
    let reader = BufReader::new(file);
    let config: PlaygroundConfig = serde_yaml::from_reader(reader)?;

    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.bench {
        bench_step();
        return Ok(());
    }

    let config = load_config_from_yaml(&args.file_name)?;
    run(config);

    Ok(())
}
