use async_trait::async_trait;

use crate::errors::AppResult;

/// Delivery seam for one-time verification codes. Transport (SMTP,
/// queue, whatever) is wired in from outside the core.
#[async_trait]
pub trait OtpSender: Send + Sync {
    async fn send(&self, email: &str, code: &str) -> AppResult<()>;
}

/// Development sender: writes the code to the log instead of emailing
/// it.
pub struct LogOtpSender;

#[async_trait]
impl OtpSender for LogOtpSender {
    async fn send(&self, email: &str, code: &str) -> AppResult<()> {
        log::info!("Verification code for {}: {}", email, code);
        Ok(())
    }
}
