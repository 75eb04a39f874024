//! A scripted single-connection RCON server for integration tests.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};
use std::time::Duration;

pub const PASSWORD: &str = "secret";

/// What the server does after receiving the command.
pub enum Reply {
    /// Write the bytes, then close the connection.
    Close(Vec<u8>),
    /// Write the bytes, then wait for the client to hang up.
    Linger(Vec<u8>),
    /// Write each chunk with a short pause in between, then close.
    Chunks(Vec<Vec<u8>>),
}

pub struct Script {
    /// `None` never answers the login.
    pub login_reply: Option<&'static [u8]>,
    pub reply: Reply,
}

/// Bytes the server received over the connection.
#[derive(Debug, Default)]
pub struct Exchange {
    pub login: Vec<u8>,
    pub command: Vec<u8>,
}

impl Script {
    pub fn accepted(reply: Reply) -> Self {
        Script {
            login_reply: Some(b"Password Accepted"),
            reply,
        }
    }
}

/// Starts a server that handles one connection, returning its port.
pub fn serve_once(script: Script) -> (u16, JoinHandle<Exchange>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("should bind");
    let port = listener.local_addr().expect("should have address").port();

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("should accept");
        let mut exchange = Exchange {
            login: read_frame(&mut stream),
            ..Exchange::default()
        };

        let login_reply = match script.login_reply {
            Some(login_reply) => login_reply,
            None => {
                wait_for_hangup(&mut stream);
                return exchange;
            }
        };
        stream.write_all(login_reply).expect("should write login reply");
        if !String::from_utf8_lossy(login_reply).contains("Accepted") {
            return exchange;
        }

        exchange.command = read_frame(&mut stream);
        match script.reply {
            Reply::Close(bytes) => stream.write_all(&bytes).expect("should write reply"),
            Reply::Linger(bytes) => {
                stream.write_all(&bytes).expect("should write reply");
                wait_for_hangup(&mut stream);
            }
            Reply::Chunks(chunks) => {
                for chunk in chunks {
                    stream.write_all(&chunk).expect("should write chunk");
                    stream.flush().expect("should flush");
                    thread::sleep(Duration::from_millis(50));
                }
            }
        }
        exchange
    });

    (port, handle)
}

/// Returns a port nothing is listening on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("should bind");
    listener.local_addr().expect("should have address").port()
}

/// Reads up to and including the NUL terminator.
fn read_frame(stream: &mut impl Read) -> Vec<u8> {
    let mut frame = Vec::new();
    let mut chunk = [0u8; 512];
    loop {
        let len = stream.read(&mut chunk).expect("should read frame");
        frame.extend_from_slice(&chunk[..len]);
        if len == 0 || frame.last() == Some(&0) {
            return frame;
        }
    }
}

fn wait_for_hangup(stream: &mut impl Read) {
    let mut sink = [0u8; 64];
    while let Ok(len) = stream.read(&mut sink) {
        if len == 0 {
            break;
        }
    }
}
