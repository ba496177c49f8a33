//! Invoice dispatch to the customer.
//!
//! No real SMS/WhatsApp gateway is wired in. [`MockMessenger`] waits for a
//! fixed delay and then succeeds with a configured probability; a failure is
//! final and is recorded on the invoice as `messagingStatus: "failed"`.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::{info, warn};

use crown_core::{Invoice, MessagingStatus};

#[async_trait]
pub trait InvoiceMessenger: Send + Sync + std::fmt::Debug {
    /// Delivers `invoice` and reports the outcome. Never `Pending`.
    async fn send(&self, invoice: &Invoice) -> MessagingStatus;
}

#[derive(Debug, Clone)]
pub struct MockMessenger {
    delay: Duration,
    success_rate: f64,
}

impl MockMessenger {
    pub fn new(delay: Duration, success_rate: f64) -> Self {
        MockMessenger {
            delay,
            success_rate: success_rate.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl InvoiceMessenger for MockMessenger {
    async fn send(&self, invoice: &Invoice) -> MessagingStatus {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let delivered = rand::thread_rng().gen_bool(self.success_rate);
        if delivered {
            info!(
                invoice = %invoice.invoice_number,
                phone = %invoice.customer.phone,
                "Invoice sent"
            );
            MessagingStatus::Sent
        } else {
            warn!(invoice = %invoice.invoice_number, "Invoice dispatch failed");
            MessagingStatus::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_certain_outcomes() {
        let invoice = Invoice::default();

        let always = MockMessenger::new(Duration::ZERO, 1.0);
        assert_eq!(always.send(&invoice).await, MessagingStatus::Sent);

        let never = MockMessenger::new(Duration::ZERO, 0.0);
        assert_eq!(never.send(&invoice).await, MessagingStatus::Failed);
    }

    #[test]
    fn test_rate_is_clamped() {
        let messenger = MockMessenger::new(Duration::ZERO, 3.0);
        assert_eq!(messenger.success_rate, 1.0);
    }
}
