use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::warn;

use crate::photos::dto::{PhotoAngle, PhotoRef};
use crate::photos::source::{load_image, CaptureMode, ImageSource, Permissions};
use crate::prompt::{Decision, Prompt};

struct Io<R, W> {
    reader: R,
    writer: W,
}

/// Line-oriented terminal front-end. Serves as the dialog [`Prompt`] and as
/// the [`ImageSource`], where "camera" and "library" both read a file path.
pub struct Console<R, W> {
    io: Mutex<Io<R, W>>,
    inline_photos: bool,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W, inline_photos: bool) -> Self {
        Self {
            io: Mutex::new(Io { reader, writer }),
            inline_photos,
        }
    }

    pub fn into_inner(self) -> (R, W) {
        let io = self.io.into_inner();
        (io.reader, io.writer)
    }

    pub async fn say(&self, text: &str) -> anyhow::Result<()> {
        let mut io = self.io.lock().await;
        io.writer.write_all(text.as_bytes()).await?;
        io.writer.write_all(b"\n").await?;
        io.writer.flush().await?;
        Ok(())
    }

    /// Prints `question` and reads one line. `None` on end of input.
    pub async fn ask(&self, question: &str) -> anyhow::Result<Option<String>> {
        let mut io = self.io.lock().await;
        io.writer.write_all(question.as_bytes()).await?;
        io.writer.write_all(b" ").await?;
        io.writer.flush().await?;

        let mut line = String::new();
        if io.reader.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[async_trait]
impl<R, W> Prompt for Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn alert(&self, title: &str, message: &str) {
        if let Err(e) = self.say(&format!("\n[{}] {}", title, message)).await {
            warn!(error = %e, "console write failed");
        }
    }

    async fn confirm(
        &self,
        title: &str,
        message: &str,
        proceed_label: &str,
        back_label: &str,
    ) -> Decision {
        let question = format!(
            "\n[{}] {}\n  1) {}\n  2) {}\n>",
            title, message, proceed_label, back_label
        );
        loop {
            match self.ask(&question).await {
                Ok(Some(answer)) => match answer.as_str() {
                    "1" => return Decision::Proceed,
                    "2" => return Decision::GoBack,
                    _ => continue,
                },
                Ok(None) => return Decision::GoBack,
                Err(e) => {
                    warn!(error = %e, "console read failed");
                    return Decision::GoBack;
                }
            }
        }
    }

    async fn notify(&self, message: &str) {
        if let Err(e) = self.say(message).await {
            warn!(error = %e, "console write failed");
        }
    }
}

#[async_trait]
impl<R, W> ImageSource for Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn request_permissions(&self) -> Permissions {
        Permissions::GRANTED
    }

    async fn launch(&self, mode: CaptureMode, angle: PhotoAngle) -> anyhow::Result<Option<PhotoRef>> {
        let verb = match mode {
            CaptureMode::Camera => "Take photo",
            CaptureMode::Library => "Choose from library",
        };
        let answer = self
            .ask(&format!("{}: image file for {} (blank to cancel):", verb, angle))
            .await?;
        match answer {
            Some(path) if !path.is_empty() => {
                let photo = load_image(&PathBuf::from(path), self.inline_photos).await?;
                Ok(Some(photo))
            }
            _ => Ok(None),
        }
    }
}
