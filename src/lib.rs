#![deny(missing_docs)]
//! A multithreaded, network-accessible, in-memory variable store that maps named variables
//! to typed values (integers, floats, strings, and float arrays).
//!
//! This crate provides the [`VarStore`] implementation itself, as well as a `varstore-client`
//! and `varstore-server` executable that can be used to interact with the store.
//! Data is exchanged between the client and server using synchronous networking over a
//! line-based text protocol.
//!
//! ## Supported Store Operations
//! The store supports three types of operations (a.k.a "commands"):
//!
//! - `list-vars` lists the names of all stored variables, in insertion order
//! - `read <name>` reads the formatted value of a variable
//! - `set <name>=<value>` creates or overwrites a variable
//!
//! See the [`VarEngine`] trait and the [`Command`] type for more information on the
//! structure of these operations.
//!
//! ## VarStore
//! [`VarStore`] is the implementor of the [`VarEngine`] trait and the brains of this entire
//! operation. It is responsible for the following tasks:
//! - maintaining the variables in an insertion-ordered, mutex-guarded table
//! - inferring the type of a `set` value literal (quoted string, float, integer,
//!   or `{f1,f2,...}` float array)
//! - enforcing the table capacity and variable name length limits
//! - formatting values into their canonical wire representation
//!
//! The table is created empty at process start, lives for the lifetime of the process,
//! and is never persisted. There is no delete operation.
//!
//! ## Client / Server
//! Client and server logic is contained in the [`VarClient`] and [`VarServer`] structs.
//! They are responsible for the networking portion of this application: the server owns
//! the accept loop and the per-connection command dispatch, the client is a thin terminal
//! front-end that forwards keyboard input and prints whatever the server sends back.
//!
//! ## Wire Protocol
//! The protocol is newline-delimited ASCII text over TCP. On connect, and again after
//! every handled command, the server sends the literal prompt `directory-service> `
//! (no trailing newline). Commands are one per line: `list-vars`, `read <name>`,
//! `set <name>=<value>`, `exit`, and anything else draws an `Invalid command` reply.
//! A `set` that is rejected (malformed assignment, over-long name, full table) draws an
//! `Error: <reason>` line; a successful `set` is confirmed only by the next prompt.

pub use client::VarClient;
pub use command::Command;
pub use error::{Result, VarError};
pub use server::VarServer;
pub use store::{VarEngine, VarStore, Value, ARRAY_CAPACITY, MAX_NAME_LEN, TABLE_CAPACITY};
pub use thread_pool::{NaiveThreadPool, RayonThreadPool, SharedQueueThreadPool, ThreadPool};

mod client;
mod command;
mod error;
mod server;
mod store;
pub mod thread_pool;
