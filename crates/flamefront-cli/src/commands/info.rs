use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use flamefront_core::io::open_source;

#[derive(Args)]
pub struct InfoArgs {
    /// Image directory or SER file
    pub source: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let source = open_source(&args.source)?;
    let info = source.info();

    println!("Source:      {}", info.path.display());
    println!("Kind:        {:?}", info.kind);
    println!("Frames:      {}", info.total_frames);
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Output dir:  {}", source.default_output_dir().display());

    Ok(())
}
