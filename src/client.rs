use std::io::{self, BufRead, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::thread;

use tracing::debug;

use crate::Result;

/// `VarClient` is the interactive terminal front-end for a [`VarServer`](crate::VarServer).
///
/// It holds no state of its own: it forwards each line typed on stdin to the server and
/// prints whatever the server sends back (prompts included) as soon as it arrives. Server
/// output is drained by a dedicated reader thread so that the prompt appears without
/// waiting on the next keystroke.
pub struct VarClient {
    stream: TcpStream,
}

impl VarClient {
    /// creates a client and establishes a socket connection to the server at the given `addr`
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        debug!("connected to {}", stream.peer_addr()?);
        Ok(VarClient { stream })
    }

    /// Runs the interactive session until the user types `exit`, stdin closes, or the
    /// server disconnects.
    ///
    /// Typing `exit` is both sent to the server (which closes its end) and treated as the
    /// client's own cue to stop reading stdin.
    pub fn run(mut self) -> Result<()> {
        let reader_stream = self.stream.try_clone()?;
        let printer = thread::spawn(move || relay_server_output(reader_stream));

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            self.stream.write_all(line.as_bytes())?;
            self.stream.write_all(b"\n")?;
            if line.starts_with("exit") {
                break;
            }
        }

        // unblocks the printer thread if the server has not already hung up
        let _ = self.stream.shutdown(Shutdown::Both);
        let _ = printer.join();
        Ok(())
    }
}

/// copies raw server bytes to stdout until the connection closes
fn relay_server_output(mut stream: TcpStream) {
    let mut stdout = io::stdout();
    let mut buf = [0u8; 1024];
    loop {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                if stdout.write_all(&buf[..n]).and_then(|_| stdout.flush()).is_err() {
                    break;
                }
            }
        }
    }
    debug!("server closed the connection");
}
