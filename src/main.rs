use clap::Parser;
use payoff::api::{Cli, Command, run_cli, run_http_server};

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Command::Serve { port } = cli.command {
        if let Err(e) = run_http_server(port).await {
            eprintln!("Server error: {e}");
            std::process::exit(1);
        }
        return;
    }

    if let Err(e) = run_cli(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
