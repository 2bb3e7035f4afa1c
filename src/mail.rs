// src/mail.rs
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;

use crate::config::{MailConfig, SmtpSecurity};

#[derive(Debug, Error)]
pub enum MailError {
    #[error("invalid mail address {0:?}")]
    Address(String),
    #[error("could not build message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("smtp error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    /// The server refused the message with a permanent (5xx) reply.
    #[error("message rejected: {0}")]
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Anything that can deliver a rendered email. Delivery happens inside the
/// request; implementations must not queue.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Builds the transport. No connection is opened until the first send.
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|_| MailError::Address(config.from.clone()))?;

        let builder = match config.security {
            SmtpSecurity::Ssl => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.server)?,
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)?
            }
            SmtpSecurity::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.server),
        };

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { from, transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let to = email
            .to
            .parse::<Mailbox>()
            .map_err(|_| MailError::Address(email.to.clone()))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject)
            .header(ContentType::TEXT_HTML)
            .body(email.html_body)?;

        self.transport.send(message).await.map_err(|e| {
            if e.is_permanent() {
                MailError::Rejected(e.to_string())
            } else {
                MailError::Smtp(e)
            }
        })?;
        Ok(())
    }
}

/// Renders the supplier notification body. The message is HTML-escaped.
pub fn render_notification(business_name: &str, message: &str) -> String {
    let business_name = escape_html(business_name);
    format!(
        "<h5>{business_name}</h5>\n<br>\n<p>{}</p>\n<br>\n<p>Best Regards</p>\n<h6>{business_name}</h6>\n",
        escape_html(message)
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;

    use super::*;

    /// Minimal SMTP peer that accepts everything except RCPT, which gets `rcpt_reply`.
    async fn smtp_server(rcpt_reply: &'static str) -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let (read, mut write) = stream.into_split();
            let mut lines = BufReader::new(read).lines();
            write.write_all(b"220 localhost ESMTP\r\n").await.unwrap();

            while let Ok(Some(line)) = lines.next_line().await {
                let command = line.to_ascii_uppercase();
                let reply = if command.starts_with("EHLO") || command.starts_with("HELO") {
                    "250-localhost\r\n250 AUTH PLAIN LOGIN\r\n"
                } else if command.starts_with("AUTH") {
                    "235 2.7.0 Authentication successful\r\n"
                } else if command.starts_with("RCPT") {
                    rcpt_reply
                } else if command.starts_with("QUIT") {
                    "221 bye\r\n"
                } else {
                    "250 ok\r\n"
                };
                if write.write_all(reply.as_bytes()).await.is_err() || command.starts_with("QUIT") {
                    break;
                }
            }
        });

        port
    }

    fn local_config(port: u16) -> MailConfig {
        MailConfig {
            username: "user".into(),
            password: "pass".into(),
            from: "shop@localhost.test".into(),
            server: "127.0.0.1".into(),
            port,
            security: SmtpSecurity::None,
            business_name: "Acme".into(),
        }
    }

    async fn send_to_local(port: u16) -> Result<(), MailError> {
        let mailer = SmtpMailer::new(&local_config(port)).unwrap();
        let email = OutgoingEmail {
            to: "ada@acme.test".into(),
            subject: "Restock".into(),
            html_body: render_notification("Acme", "hello"),
        };
        tokio::time::timeout(Duration::from_secs(10), mailer.send(email))
            .await
            .expect("smtp exchange timed out")
    }

    #[tokio::test]
    async fn permanent_smtp_reply_is_a_rejection() {
        let port = smtp_server("550 5.1.1 mailbox unavailable\r\n").await;
        match send_to_local(port).await {
            Err(MailError::Rejected(detail)) => assert!(detail.contains("mailbox unavailable")),
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transient_smtp_reply_stays_a_transport_error() {
        let port = smtp_server("451 4.3.0 try again later\r\n").await;
        assert!(matches!(send_to_local(port).await, Err(MailError::Smtp(_))));
    }

    #[tokio::test]
    async fn unparsable_recipient_is_an_address_error() {
        let mailer = SmtpMailer::new(&local_config(1)).unwrap();
        let email = OutgoingEmail {
            to: "ada@acme..test".into(),
            subject: "Restock".into(),
            html_body: String::new(),
        };
        assert!(matches!(mailer.send(email).await, Err(MailError::Address(_))));
    }

    #[test]
    fn template_embeds_message_and_signature() {
        let html = render_notification("Acme LTD", "Please restock widgets");
        assert!(html.starts_with("<h5>Acme LTD</h5>"));
        assert!(html.contains("<p>Please restock widgets</p>"));
        assert!(html.contains("<p>Best Regards</p>"));
        assert!(html.trim_end().ends_with("<h6>Acme LTD</h6>"));
    }

    #[test]
    fn template_escapes_markup_in_message() {
        let html = render_notification("Acme", "<script>alert('x')</script> & more");
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn smtp_mailer_rejects_bad_sender() {
        let config = MailConfig {
            username: "user".into(),
            password: "pass".into(),
            from: "not an address".into(),
            server: "localhost".into(),
            port: 2525,
            security: SmtpSecurity::None,
            business_name: "Acme".into(),
        };
        assert!(matches!(SmtpMailer::new(&config), Err(MailError::Address(_))));
    }
}
