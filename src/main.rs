use anyhow::Result;
use clap::Parser;

use mif6502::{
    assembler::{assemble, AssemblyArgs},
    instrumentation,
};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[clap(short, long, action = clap::ArgAction::Count)]
    #[clap(help = "Increase logging verbosity, repeat for more detail")]
    verbose: u8,
    #[clap(long)]
    #[clap(help = "Enable chrome tracing")]
    #[clap(long_help = "Enable chrome tracing which on program exit will generate
a json file to be opened with a chrome tracing compatible
viewer.")]
    trace: bool,
    #[command(flatten)]
    args: AssemblyArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _trace_guard = instrumentation::init(cli.verbose, cli.trace);

    assemble(&cli.args)
}
