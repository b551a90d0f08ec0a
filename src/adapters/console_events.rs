use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::warn;

use ti_core::ports::PipelineEventPort;
use ti_core::PipelineNotification;

/// Prints every notification as one `Title: message` line.
pub struct ConsoleEventPort {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventPort {
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

#[async_trait]
impl PipelineEventPort for ConsoleEventPort {
    async fn emit(&self, notification: PipelineNotification) {
        let text = notification.describe();
        let Ok(mut out) = self.out.lock() else {
            warn!("console writer poisoned, dropping notification");
            return;
        };
        if let Err(err) = writeln!(out, "{}: {}", text.title, text.message).and_then(|_| out.flush())
        {
            warn!(error = %err, "failed to print notification");
        }
    }
}
