//! Wire-level tests: a real server on an ephemeral port, real TcpStream clients,
//! asserting on the exact bytes of the line protocol.

use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use varstore::{NaiveThreadPool, SharedQueueThreadPool, ThreadPool, VarServer, VarStore};

const PROMPT: &str = "directory-service> ";
const READ_TIMEOUT: Duration = Duration::from_secs(5);

/// starts a server with one detached thread per connection and returns its address
fn start_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().unwrap();
    let server = VarServer::new(VarStore::new(), NaiveThreadPool::new(0).unwrap());
    thread::spawn(move || server.serve_on(listener));
    addr
}

/// one scripted client connection
struct Session {
    stream: TcpStream,
}

impl Session {
    /// connects and consumes the greeting prompt
    fn connect(addr: SocketAddr) -> Session {
        let stream = TcpStream::connect(addr).expect("connect to test server");
        stream.set_read_timeout(Some(READ_TIMEOUT)).unwrap();
        let mut session = Session { stream };
        let greeting = session.read_until_prompt();
        assert_eq!(greeting, "", "nothing should precede the first prompt");
        session
    }

    /// sends one command line and returns everything the server replies before the
    /// next prompt
    fn command(&mut self, line: &str) -> String {
        self.stream.write_all(line.as_bytes()).unwrap();
        self.stream.write_all(b"\n").unwrap();
        self.read_until_prompt()
    }

    fn read_until_prompt(&mut self) -> String {
        let mut received = Vec::new();
        let mut buf = [0u8; 256];
        while !received.ends_with(PROMPT.as_bytes()) {
            let n = self.stream.read(&mut buf).expect("read from test server");
            assert!(n > 0, "server hung up before sending a prompt");
            received.extend_from_slice(&buf[..n]);
        }
        received.truncate(received.len() - PROMPT.len());
        String::from_utf8(received).expect("protocol output is not valid utf-8")
    }

    /// reads to end-of-stream and returns whatever trailing bytes arrive
    fn read_to_eof(&mut self) -> String {
        let mut rest = String::new();
        self.stream.read_to_string(&mut rest).expect("read to eof");
        rest
    }
}

#[test]
fn every_value_kind_round_trips_through_set_and_read() {
    let mut session = Session::connect(start_server());

    assert_eq!(session.command("set count=42"), "");
    assert_eq!(session.command("read count"), "42\n");

    assert_eq!(session.command("set ratio=0.5"), "");
    assert_eq!(session.command("read ratio"), "0.50\n");

    assert_eq!(session.command("set label=\"vector a\""), "");
    assert_eq!(session.command("read label"), "vector a\n");

    assert_eq!(session.command("set arr={1,2.5,3}"), "");
    assert_eq!(session.command("read arr"), "1.00 2.50 3.00 \n");
}

#[test]
fn reading_an_unset_variable_reports_not_found() {
    let mut session = Session::connect(start_server());
    assert_eq!(session.command("read nosuch"), "Variable not found.\n");
}

#[test]
fn unknown_commands_are_reported_and_have_no_effect() {
    let mut session = Session::connect(start_server());
    assert_eq!(session.command("frobnicate x"), "Invalid command\n");
    assert_eq!(session.command("list-vars"), "");
}

#[test]
fn list_vars_preserves_insertion_order_across_overwrites() {
    let mut session = Session::connect(start_server());
    assert_eq!(session.command("list-vars"), "");
    session.command("set a=1");
    session.command("set b=2");
    session.command("set a=3");
    assert_eq!(session.command("list-vars"), "a\nb\n");
    assert_eq!(session.command("read a"), "3\n");
}

#[test]
fn overwriting_a_variable_may_change_its_type() {
    let mut session = Session::connect(start_server());
    session.command("set v=1");
    session.command("set v=1.5");
    assert_eq!(session.command("read v"), "1.50\n");
}

#[test]
fn a_rejected_set_reports_an_error_and_leaves_the_table_unchanged() {
    let mut session = Session::connect(start_server());
    assert_eq!(
        session.command("set arr={1,2"),
        "Error: array literal is missing a matching brace\n"
    );
    assert_eq!(session.command("read arr"), "Variable not found.\n");

    assert_eq!(
        session.command("set nothing"),
        "Error: assignment is missing '='\n"
    );
    assert_eq!(session.command("list-vars"), "");
}

#[test]
fn exit_closes_the_connection_without_another_prompt() {
    let mut session = Session::connect(start_server());
    session.stream.write_all(b"exit\n").unwrap();
    assert_eq!(session.read_to_eof(), "");
}

#[test]
fn disconnecting_one_client_does_not_disturb_another() {
    let addr = start_server();
    let mut first = Session::connect(addr);
    first.command("set shared=7");
    drop(first); // disconnect without exit

    let mut second = Session::connect(addr);
    assert_eq!(second.command("read shared"), "7\n");
}

#[test]
fn sessions_share_one_table() {
    let addr = start_server();
    let mut writer = Session::connect(addr);
    let mut reader = Session::connect(addr);
    writer.command("set seen=\"by everyone\"");
    assert_eq!(reader.command("read seen"), "by everyone\n");
}

#[test]
fn concurrent_clients_on_disjoint_names_never_see_torn_values() {
    let addr = start_server();
    let mut handles = Vec::new();
    for t in 0..4 {
        handles.push(thread::spawn(move || {
            let mut session = Session::connect(addr);
            let name = format!("client{}", t);
            for i in 0..50 {
                assert_eq!(session.command(&format!("set {}={}", name, i)), "");
                assert_eq!(session.command(&format!("read {}", name)), format!("{}\n", i));
            }
        }));
    }
    for handle in handles {
        handle.join().expect("client thread panicked");
    }
}

#[test]
fn the_shared_queue_pool_serves_clients_too() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = VarServer::new(VarStore::new(), SharedQueueThreadPool::new(2).unwrap());
    thread::spawn(move || server.serve_on(listener));

    let mut session = Session::connect(addr);
    session.command("set pooled=1");
    assert_eq!(session.command("read pooled"), "1\n");
}
