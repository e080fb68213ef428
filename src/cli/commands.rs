use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "simchain")]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        name = "demo",
        about = "Run a scripted session against one simulated network"
    )]
    Demo {
        #[arg(long, default_value = "dev", help = "Network id to run against")]
        network: String,
    },
    #[command(name = "estimatefee", about = "Ask the fee advisor for a suggested fee")]
    EstimateFee {
        #[arg(help = "Free-form description of the planned transaction")]
        details: String,
        #[arg(
            long,
            default_value = "dev",
            help = "Network id whose mempool informs the advice"
        )]
        network: String,
    },
}
