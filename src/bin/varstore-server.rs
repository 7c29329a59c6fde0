//! this binary starts the varstore server
//! to see the list of options, type: `varstore-server --help`

use std::net::SocketAddr;
use std::process::exit;

use clap::{arg_enum, crate_version, value_t, App, Arg};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use varstore::{
    NaiveThreadPool, RayonThreadPool, Result, SharedQueueThreadPool, ThreadPool, VarError,
    VarServer, VarStore,
};

arg_enum! {
    #[allow(non_camel_case_types)]
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    enum Pool {
        naive,
        queue,
        rayon
    }
}

// the port of the original service, on all interfaces
const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_POOL: Pool = Pool::naive;
const DEFAULT_THREADS: u32 = 8;

/// [`Opt`] holds parsed and validated options from the command line
#[derive(Debug)]
struct Opt {
    addr: SocketAddr,
    pool: Pool,
    threads: u32,
}

impl Opt {
    /// validates the `addr` parameter and returns `Ok<Opt>` if everything is valid
    ///
    /// # Errors
    /// returns [`VarError::Parsing`] if the address is not a valid `IP_ADDR:PORT`
    fn build(addr: &str, pool: Pool, threads: u32) -> Result<Opt> {
        let addr: SocketAddr = addr.parse().map_err(|_| {
            VarError::Parsing(format!("{} into an IP address and port", addr))
        })?;
        Ok(Opt { addr, pool, threads })
    }
}

fn main() {
    // set up a tracing subscriber to log to STDERR
    subscriber_config();

    // parse command line args
    let matches = App::new("varstore-server")
        .version(crate_version!())
        .about("a multi-threaded, in-memory variable store server")
        .arg(
            Arg::with_name("addr")
                .long("addr")
                .value_name("IP_ADDR:PORT")
                .help("sets the IP_ADDR:PORT that the server listens on")
                .default_value(DEFAULT_ADDRESS),
        )
        .arg(
            Arg::with_name("pool")
                .long("pool")
                .value_name("POOL_NAME")
                .help("sets the thread pool that connection handlers run on: 'naive' (one thread per connection), 'queue' or 'rayon'")
                .default_value("naive"),
        )
        .arg(
            Arg::with_name("threads")
                .long("threads")
                .value_name("N")
                .help("number of threads for the 'queue' and 'rayon' pools")
                .default_value("8"),
        )
        .get_matches();

    // validate command line options, store them in Opt
    let addr = matches.value_of("addr").unwrap_or(DEFAULT_ADDRESS);
    let pool: Pool = value_t!(matches, "pool", Pool).ok().unwrap_or(DEFAULT_POOL);
    let threads: u32 = value_t!(matches, "threads", u32)
        .ok()
        .unwrap_or(DEFAULT_THREADS);
    let opt = match Opt::build(addr, pool, threads) {
        Ok(opt) => opt,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };

    // start the server
    if let Err(e) = run(opt) {
        eprintln!("{}", e);
        exit(1);
    }
}

fn run(opt: Opt) -> Result<()> {
    info!("varstore-server {}", env!("CARGO_PKG_VERSION"));
    info!("thread pool: {} ({} threads)", opt.pool, opt.threads);
    info!("listening on {}", opt.addr);

    match opt.pool {
        Pool::naive => run_with_pool(NaiveThreadPool::new(opt.threads)?, opt.addr),
        Pool::queue => run_with_pool(SharedQueueThreadPool::new(opt.threads)?, opt.addr),
        Pool::rayon => run_with_pool(RayonThreadPool::new(opt.threads)?, opt.addr),
    }
}

fn run_with_pool<P: ThreadPool>(pool: P, addr: SocketAddr) -> Result<()> {
    let server = VarServer::new(VarStore::new(), pool);
    server.run(addr)
}

/// configures a tracing subscriber that will log to STDERR
fn subscriber_config() {
    let subscriber = FmtSubscriber::builder()
        // all spans/events with a level higher than TRACE (e.g, debug, info, warn, etc.)
        // will be logged
        .with_max_level(Level::TRACE)
        // log to stderr instead of stdout, the protocol owns stdout
        .with_writer(std::io::stderr)
        // completes the builder.
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting tracing default subscriber failed");
}
