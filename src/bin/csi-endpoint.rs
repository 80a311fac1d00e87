use clap::{Parser, Subcommand};

use csi_hostpath::endpoint::{read_endpoint_from, resolve, ResolvedEndpoint, CSI_ENDPOINT};
use csi_hostpath::lifecycle::SockFileGuard;
use csi_hostpath::net::EndpointListener;

#[derive(Parser)]
#[command(name = "csi-endpoint")]
#[command(about = "Inspect how a CSI endpoint string resolves", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an endpoint string given on the command line
    Resolve {
        /// Endpoint, e.g. tcp://127.0.0.1:10000 or /run/csi/csi.sock
        address: String,
    },
    /// Resolve the endpoint from the environment
    Env {
        #[arg(long, default_value = CSI_ENDPOINT)]
        var: String,
    },
    /// Bind the endpoint from the environment, report it, then release it
    Bind {
        #[arg(long, default_value = CSI_ENDPOINT)]
        var: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { address } => print_endpoint(&resolve(&address)?),
        Commands::Env { var } => print_endpoint(&read_endpoint_from(&var)?),
        Commands::Bind { var } => {
            let listener = EndpointListener::bind(read_endpoint_from(&var)?).await?;
            let mut sock_file = SockFileGuard::new(&listener, true);
            println!("bound: {}", listener.local_endpoint()?);
            drop(listener);
            sock_file.remove()?;
        }
    }

    Ok(())
}

fn print_endpoint(endpoint: &ResolvedEndpoint) {
    println!("transport: {}", endpoint.transport());
    println!("scheme:    {}", endpoint.scheme());
    println!("address:   {}", endpoint.address());
}
