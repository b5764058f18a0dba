#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Sends a single email through Mailgun

use anyhow::Result;
use clap::Parser;
use mailgun_mailer::{
    domain::communication::{
        email_addresses::EmailAddress,
        mailer::{ComposedMessage, Mailer},
    },
    infrastructure::email::mailgun::{MailgunConfig, MailgunMailer},
};
use tracing::info;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The Mailgun configuration
    #[clap(flatten)]
    pub mailgun: MailgunConfig,

    /// The recipient; only the first one is delivered to
    #[arg(long, required = true)]
    pub to: Vec<EmailAddress>,

    /// The sender address
    #[arg(long, env = "MAILGUN_SENDER")]
    pub from: EmailAddress,

    /// The sender's display name
    #[arg(long)]
    pub from_name: Option<String>,

    /// The subject line
    #[arg(long)]
    pub subject: String,

    /// The HTML body
    #[arg(long)]
    pub html: String,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    args.mailgun.validate()?;

    let message = args
        .to
        .into_iter()
        .fold(ComposedMessage::new(), ComposedMessage::with_to)
        .with_from(args.from, args.from_name.as_deref())
        .with_subject(&args.subject)
        .with_html_body(&args.html);

    let mailer = MailgunMailer::new(args.mailgun);

    mailer.send(&message).await?;

    info!(domain = ?mailer.config().sending_domain(), "email sent");

    Ok(())
}
