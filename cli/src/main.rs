mod commands;
mod dashboard;
mod terminal;

use commands::{CommandLine, Commands, ServeArgs, info, scan, serve};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    match commands.command.unwrap_or_else(|| Commands::Serve(ServeArgs::default())) {
        Commands::Serve(args) => {
            print::header("starting dashboard");
            serve::serve(args.into()).await
        }
        Commands::Scan => {
            print::header("scanning local services");
            scan::scan().await
        }
        Commands::Info => {
            print::header("about this host");
            info::info()
        }
    }
}
