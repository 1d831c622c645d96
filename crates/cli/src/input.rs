//! Terminal input: reads stdin lines on a background task.
//!
//! Lines arrive through an mpsc receiver so the REPL can await them
//! alongside provider calls. The stream ends on EOF (Ctrl+D) or an exit word.

use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Start reading stdin. Blank lines are skipped.
pub fn spawn_stdin_reader() -> mpsc::Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel(32);

    tokio::spawn(async move {
        let reader = BufReader::new(io::stdin());
        let mut lines = reader.lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    if is_exit_word(&line) {
                        break;
                    }
                    if tx.send(Ok(line)).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    let _ = tx.send(Err(e)).await;
                    break;
                }
            }
        }
    });

    rx
}

fn is_exit_word(line: &str) -> bool {
    matches!(line, "exit" | "quit" | ":q")
}
