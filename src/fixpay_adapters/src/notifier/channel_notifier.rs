use std::sync::{Arc, Mutex};

use askama::Template;
use fixpay_core::{EmailClient, Notification, Notifier, OtpPurpose};
use secrecy::ExposeSecret;
use tokio::sync::mpsc;

const NOTIFICATION_QUEUE_CAPACITY: usize = 256;

#[derive(Template)]
#[template(path = "otp_email.html")]
struct OtpEmail<'a> {
    intro: &'a str,
    code: &'a str,
    ttl_minutes: i64,
}

fn subject(notification: &Notification) -> &'static str {
    match notification {
        Notification::ConfirmationOtp { .. } => "FixPay - تأكيد البريد الإلكتروني",
        Notification::ResetPasswordOtp { .. } => "FixPay - إعادة تعيين كلمة المرور",
    }
}

fn intro(notification: &Notification) -> &'static str {
    match notification {
        Notification::ConfirmationOtp { .. } => {
            "أهلاً بك في FixPay! استخدم الرمز التالي لتأكيد بريدك الإلكتروني:"
        }
        Notification::ResetPasswordOtp { .. } => {
            "استخدم الرمز التالي لإعادة تعيين كلمة المرور الخاصة بك:"
        }
    }
}

fn ttl_minutes(notification: &Notification) -> i64 {
    match notification {
        Notification::ConfirmationOtp { .. } => OtpPurpose::ConfirmEmail.ttl_minutes(),
        Notification::ResetPasswordOtp { .. } => OtpPurpose::ResetPassword.ttl_minutes(),
    }
}

/// Notifier end of a bounded queue feeding the delivery worker. Dispatch
/// never waits; if the queue is full the notification is dropped and the
/// user falls back on the resend endpoint.
#[derive(Clone)]
pub struct ChannelNotifier {
    sender: mpsc::Sender<Notification>,
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.sender.try_send(notification) {
            tracing::warn!(error = %e, "dropping notification, delivery queue unavailable");
        }
    }
}

/// Drains the notification queue and turns each entry into an OTP email.
/// Delivery failures are logged and swallowed.
pub struct NotificationWorker<E> {
    receiver: mpsc::Receiver<Notification>,
    email_client: E,
}

impl<E: EmailClient> NotificationWorker<E> {
    pub async fn run(mut self) {
        while let Some(notification) = self.receiver.recv().await {
            if let Err(e) = self.deliver(&notification).await {
                tracing::warn!(error = %e, "failed to deliver notification email");
            }
        }
    }

    #[tracing::instrument(name = "Delivering notification email", skip_all)]
    async fn deliver(&self, notification: &Notification) -> Result<(), String> {
        let content = OtpEmail {
            intro: intro(notification),
            code: notification.code().as_ref().expose_secret(),
            ttl_minutes: ttl_minutes(notification),
        }
        .render()
        .map_err(|e| e.to_string())?;

        self.email_client
            .send_email(notification.email(), subject(notification), &content)
            .await
    }
}

/// Builds the notifier/worker pair. The worker future must be spawned for
/// notifications to go anywhere.
pub fn notification_channel<E: EmailClient>(
    email_client: E,
) -> (ChannelNotifier, NotificationWorker<E>) {
    let (sender, receiver) = mpsc::channel(NOTIFICATION_QUEUE_CAPACITY);
    (
        ChannelNotifier { sender },
        NotificationWorker {
            receiver,
            email_client,
        },
    )
}

/// Notifier that records every notification instead of delivering it.
/// The API test suite reads OTP codes back out of it.
#[derive(Clone, Default)]
pub struct CapturingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl CapturingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Plaintext code of the most recent notification, if any.
    pub fn last_code(&self) -> Option<String> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .map(|notification| notification.code().as_ref().expose_secret().clone())
    }
}

impl Notifier for CapturingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification);
    }
}
