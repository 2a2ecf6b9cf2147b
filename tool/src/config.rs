use clap::Parser;

use meshq_batch::BatchConfig;
use meshq_quantize::{Bins, Method, DEFAULT_BINS};

#[derive(Parser, Debug)]
#[command(author, version, about = "Quantize mesh vertex positions and measure the reconstruction error")]
pub struct Args {
    /// Quantization levels per axis (at least 2)
    #[arg(short, long, default_value_t = DEFAULT_BINS)]
    pub bins: u32,

    /// Normalization method, repeatable: minmax, unit_sphere (default both)
    #[arg(short, long = "method")]
    pub methods: Vec<Method>,

    /// Built-in sample mesh to process, repeatable (default all)
    #[arg(long = "mesh")]
    pub meshes: Vec<String>,

    /// Run meshes one after another instead of on the thread pool
    #[arg(long)]
    pub sequential: bool,

    /// Print the comparison table as JSON instead of CSV
    #[arg(long)]
    pub json: bool,

    /// Print the per-run summary block of every successful run
    #[arg(long)]
    pub summaries: bool,
}

impl Args {
    pub fn batch_config(&self) -> anyhow::Result<BatchConfig> {
        let methods = if self.methods.is_empty() {
            Method::ALL.to_vec()
        } else {
            self.methods.clone()
        };
        Ok(BatchConfig {
            bins: Bins::new(self.bins)?,
            methods,
            parallel: !self.sequential,
        })
    }
}
