use std::io::{BufRead, BufReader, BufWriter, Write};
use std::net::{TcpListener, TcpStream, ToSocketAddrs};

use tracing::{debug, error, info};

use crate::command::Command;
use crate::store::VarEngine;
use crate::thread_pool::ThreadPool;
use crate::Result;

/// the literal prompt text sent on connect and after every handled command
pub const PROMPT: &str = "directory-service> ";

/// A TCP socket server over a variable store engine.
///
/// It accepts connections on a [`SocketAddr`](https://doc.rust-lang.org/std/net/enum.SocketAddr.html)
/// and hands each one to the thread pool, where a per-connection handler reads
/// newline-delimited commands, executes them against the engine, and writes back the
/// response followed by the prompt. Each handler receives its own clone of the
/// [`VarEngine`]; the engine is the only state sessions share.
///
/// # Example
/// Create and run a server listening on "127.0.0.1:4000", handling each connection on
/// its own detached thread, backed by the in-memory [`VarStore`](crate::VarStore) engine
/// ```no_run
/// use varstore::{NaiveThreadPool, Result, ThreadPool, VarServer, VarStore};
/// # fn main() -> Result<()> {
/// let engine = VarStore::new();
/// let pool = NaiveThreadPool::new(0)?;
/// let server = VarServer::new(engine, pool);
/// server.run("127.0.0.1:4000")?;
/// # Ok(())
/// # }
/// ```
pub struct VarServer<E: VarEngine, P: ThreadPool> {
    /// the store engine shared by every session
    engine: E,
    /// a pool of threads that will each run one connection handler
    pool: P,
}

impl<E: VarEngine, P: ThreadPool> VarServer<E, P> {
    /// Create a new `VarServer` using the given [`VarEngine`] and [`ThreadPool`]
    /// implementation.
    pub fn new(engine: E, pool: P) -> Self {
        VarServer { engine, pool }
    }

    /// Binds the given address and serves connections forever.
    ///
    /// # Errors
    /// returns [`VarError::Io`](crate::VarError) if the address cannot be bound, which
    /// should abort startup
    pub fn run<A: ToSocketAddrs>(self, addr: A) -> Result<()> {
        let listener = TcpListener::bind(addr)?;
        info!("listening on {}", listener.local_addr()?);
        self.serve_on(listener)
    }

    /// Serves connections from an already-bound listener forever.
    ///
    /// Each accepted connection is handled fire-and-forget on the thread pool; the
    /// accept loop never waits on a session. A failed accept is logged and the loop
    /// continues.
    pub fn serve_on(self, listener: TcpListener) -> Result<()> {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let engine = self.engine.clone();
                    self.pool.spawn(move || {
                        if let Err(e) = serve(engine, stream) {
                            error!("error on serving client: {}", e);
                        }
                    });
                }
                Err(e) => error!("connection failed: {}", e),
            }
        }
        Ok(())
    }
}

/// Runs one client session: prompt, then read line / dispatch / respond / prompt until
/// the client disconnects or sends `exit`.
///
/// Store responses are fully formatted under the table lock inside the engine; this
/// function only moves bytes, so the lock is never held across socket I/O. A rejected
/// `set` is reported to the client as an `Error: <reason>` line and the session keeps
/// going; I/O failures end the session and are logged by the caller.
fn serve<E: VarEngine>(engine: E, tcp: TcpStream) -> Result<()> {
    let peer_addr = tcp.peer_addr()?;
    debug!("client connected from {}", peer_addr);
    let mut reader = BufReader::new(tcp.try_clone()?);
    let mut writer = BufWriter::new(tcp);

    writer.write_all(PROMPT.as_bytes())?;
    writer.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            debug!("client {} disconnected", peer_addr);
            break;
        }
        let input = line.trim_end_matches(|c| c == '\r' || c == '\n');
        debug!("request from {}: {:?}", peer_addr, input);

        match Command::parse(input) {
            Command::ListVars => {
                let names = engine.list()?;
                writer.write_all(names.as_bytes())?;
            }
            Command::ReadVar { name } => {
                let response = engine.read(&name)?;
                writer.write_all(response.as_bytes())?;
            }
            Command::SetVar { assignment } => match engine.set(&assignment) {
                Ok(()) => {} // a successful set is confirmed only by the next prompt
                Err(e) if e.is_rejection() => {
                    debug!("rejected assignment from {}: {}", peer_addr, e);
                    writer.write_all(format!("Error: {}\n", e).as_bytes())?;
                }
                Err(e) => return Err(e),
            },
            Command::Exit => {
                debug!("client {} sent exit", peer_addr);
                break;
            }
            Command::Unknown => {
                writer.write_all(b"Invalid command\n")?;
            }
        }

        writer.write_all(PROMPT.as_bytes())?;
        writer.flush()?;
    }
    Ok(())
}
