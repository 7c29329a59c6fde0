//! this binary starts the interactive varstore terminal client
//! to see the list of options, type: `varstore-client --help`

use std::net::SocketAddr;
use std::process::exit;

use clap::{crate_version, App, Arg};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use varstore::{Result, VarClient, VarError};

const DEFAULT_ADDRESS: &str = "127.0.0.1:8080";

fn main() {
    // log only warnings and errors; stdout belongs to the session transcript
    subscriber_config();

    let matches = App::new("varstore-client")
        .version(crate_version!())
        .about("interactive terminal client for a varstore server")
        .arg(
            Arg::with_name("addr")
                .long("addr")
                .value_name("IP_ADDR:PORT")
                .help("sets the IP_ADDR:PORT of the server to connect to")
                .default_value(DEFAULT_ADDRESS),
        )
        .get_matches();

    let addr = matches.value_of("addr").unwrap_or(DEFAULT_ADDRESS);
    if let Err(e) = run(addr) {
        eprintln!("{}", e);
        exit(1);
    }
}

fn run(addr: &str) -> Result<()> {
    let addr: SocketAddr = addr.parse().map_err(|_| {
        VarError::Parsing(format!("{} into an IP address and port", addr))
    })?;
    let client = VarClient::connect(addr)?;
    client.run()
}

/// configures a tracing subscriber that will log to STDERR
fn subscriber_config() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting tracing default subscriber failed");
}
