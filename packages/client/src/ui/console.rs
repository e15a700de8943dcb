//! Line editor on a dedicated thread, forwarding lines to the async side.

use std::{sync::Arc, thread};

use parlor_shared::DisplaySink;
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::error::ClientError;

/// Start reading user input.
///
/// The channel closes on end of input or Ctrl+C.
pub fn spawn_console(
    display: Arc<dyn DisplaySink>,
) -> Result<mpsc::UnboundedReceiver<String>, ClientError> {
    let mut editor = DefaultEditor::new()?;
    let (tx, rx) = mpsc::unbounded_channel();

    thread::Builder::new()
        .name("console".to_string())
        .spawn(move || {
            loop {
                match editor.readline("") {
                    Ok(line) => {
                        if !line.trim().is_empty() {
                            let _ = editor.add_history_entry(line.as_str());
                        }
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                    Err(e) => {
                        tracing::error!("Failed to read from console: {}", e);
                        display.display("Unexpected error while reading from console!");
                        break;
                    }
                }
            }
        })
        .map_err(ReadlineError::Io)?;

    Ok(rx)
}
