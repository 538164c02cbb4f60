//! Client execution logic.

use std::net::SocketAddr;

use rustyline::{DefaultEditor, error::ReadlineError};
use skydesk_shared::time::{Clock, SystemClock};

use crate::{
    domain::{ends_session, is_sendable},
    error::ClientError,
    exchange::Connection,
    formatter::ReplyFormatter,
};

const PROMPT: &str = "skydesk> ";

/// Result of one line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Text to print
    pub output: String,
    /// Whether the server stopped serving this session
    pub finished: bool,
}

/// Send one line over `connection` and format what came back
pub fn exchange_line(
    connection: Connection,
    line: &str,
    clock: &dyn Clock,
) -> Result<Step, ClientError> {
    let frames = connection.request(line)?;
    Ok(Step {
        output: ReplyFormatter::format_reply(&frames, clock.now_millis()),
        finished: ends_session(line),
    })
}

/// Run the interactive client until `EXIT`, `LOGOFF`, Ctrl-C or Ctrl-D
pub fn run_client(addr: SocketAddr) -> Result<(), ClientError> {
    let mut editor = DefaultEditor::new()?;
    let clock = SystemClock;

    let mut connection = Connection::open(addr)?;
    println!("{}", ReplyFormatter::format_welcome(&addr.to_string()));

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if !is_sendable(line) {
                    continue;
                }
                editor.add_history_entry(line).ok();

                let step = exchange_line(connection, line, &clock)?;
                print!("{}", step.output);
                if step.finished {
                    tracing::info!("Session ended by {}", line);
                    break;
                }
                connection = Connection::open(addr)?;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                tracing::info!("Interrupted");
                break;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                tracing::info!("EOF");
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use skydesk_shared::time::FixedClock;
    use std::{
        io::{BufRead, BufReader, Write},
        net::TcpListener,
        thread,
    };

    fn spawn_fake_server(reply: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut line = String::new();
            BufReader::new(&stream).read_line(&mut line).unwrap();
            stream.write_all(reply.as_bytes()).unwrap();
            stream.write_all(&[0]).unwrap();
        });
        addr
    }

    #[test]
    fn test_exchange_line_formats_reply() {
        // テスト項目: 応答が受信時刻付きで整形される
        // given (前提条件):
        let addr = spawn_fake_server("2");
        let connection = Connection::open(addr).unwrap();
        let clock = FixedClock(0);

        // when (操作):
        let step = exchange_line(connection, "QUERY AA100", &clock).unwrap();

        // then (期待する結果):
        assert!(step.output.contains("\n2\n"));
        assert!(step.output.contains("received at 1970-01-01T00:00:00"));
        assert!(!step.finished);
    }

    #[test]
    fn test_exchange_line_logoff_finishes() {
        // テスト項目: LOGOFF の応答を受け取るとセッション終了と判定される
        // given (前提条件):
        let addr = spawn_fake_server("Goodbye alice");
        let connection = Connection::open(addr).unwrap();

        // when (操作):
        let step = exchange_line(connection, "LOGOFF", &FixedClock(0)).unwrap();

        // then (期待する結果):
        assert!(step.output.contains("Goodbye alice"));
        assert!(step.finished);
    }
}
