use std::process::ExitCode;

use clap::Parser;

use aiw::{Cli, classify, logging};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug, cli.quiet);

    let mut stdout = std::io::stdout().lock();
    match aiw::run(cli, &mut stdout).await {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("error: {err:#}");
            classify(&err).into()
        }
    }
}
