use anyhow::{Result, bail};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::warn;

use super::{InputHandler, InputSource};
use crate::game::Intent;

/// Keyboard input from the terminal.
///
/// A background task reads crossterm's event stream and forwards events over
/// a channel; [`InputSource::poll`] drains whatever arrived since the last
/// tick without blocking.
pub struct TerminalInput {
    events: UnboundedReceiver<Event>,
    handler: InputHandler,
    reader: JoinHandle<()>,
}

impl TerminalInput {
    /// Start reading terminal events. Must be called inside a tokio runtime.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let reader = tokio::spawn(async move {
            let mut event_stream = EventStream::new();
            while let Some(event) = event_stream.next().await {
                match event {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, "terminal event stream failed");
                        break;
                    }
                }
            }
        });

        Self {
            events: rx,
            handler: InputHandler::new(),
            reader,
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Result<Intent> {
        let mut intent = Intent::none();
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    if let Some(next) = self.handler.handle_event(&event) {
                        intent.merge(next);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => bail!("terminal input closed"),
            }
        }
        Ok(intent)
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
