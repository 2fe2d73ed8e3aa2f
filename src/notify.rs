use crate::config::NotifyParams;
use crate::core_types::{Group, Identifier};
use crate::error::{SynResult, SynapseError};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use strum_macros::{Display, EnumIter, EnumString};
use tracing::{error, info};

pub const DEFAULT_SUBJECT: &str = "Your next one-on-one";

pub const DEFAULT_BODY: &str = "Hi {names},\n\n\
You have been paired up for a one-on-one this round. \
Reply to everyone on this message to find a time that works.\n\n\
Participants: {emails}\n";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    /// Append each message as a JSON line to the outbox file.
    Outbox,
    /// Only log the messages.
    Log,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub sender: String,
    pub subject: String,
    pub body: String,
}

impl MessageTemplate {
    /// Fails when no sender is configured or the body template is unreadable.
    pub fn from_params(params: &NotifyParams) -> SynResult<Self> {
        let sender = params.sender.trim();
        if sender.is_empty() {
            return Err(SynapseError::Config(
                "No sender address. Pass --sender or set SYNAPSE_SENDER.".to_string(),
            ));
        }

        let body = match &params.template {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                SynapseError::Config(format!("Could not read template '{}': {}", path, e))
            })?,
            None => DEFAULT_BODY.to_string(),
        };

        Ok(Self {
            sender: sender.to_string(),
            subject: params.subject.clone(),
            body,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub recipients: Vec<Identifier>,
    pub subject: String,
    pub body: String,
}

/// Local part of an address, used as a greeting name.
pub fn display_name(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => only.to_string(),
        [rest @ .., last] => format!("{} and {}", rest.join(", "), last),
    }
}

/// Fills `{names}` and `{emails}` for one group.
pub fn compose_message(group: &Group, template: &MessageTemplate) -> Message {
    let names: Vec<&str> = group.iter().map(|e| display_name(e)).collect();
    let names = join_names(&names);
    let emails = group.join(", ");

    let fill = |text: &str| text.replace("{names}", &names).replace("{emails}", &emails);

    Message {
        sender: template.sender.clone(),
        recipients: group.clone(),
        subject: fill(&template.subject),
        body: fill(&template.body),
    }
}

pub trait Notifier {
    fn deliver(&mut self, message: &Message) -> SynResult<()>;

    /// False for transports that never reach anyone; their runs are not
    /// recorded in history.
    fn records_history(&self) -> bool {
        true
    }
}

/// Appends messages as JSON lines for a mail relay to pick up.
pub struct OutboxNotifier {
    path: PathBuf,
}

impl OutboxNotifier {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl Notifier for OutboxNotifier {
    fn deliver(&mut self, message: &Message) -> SynResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                SynapseError::Delivery(format!("Outbox '{}': {}", self.path.display(), e))
            })?;

        let line = serde_json::to_string(message)?;
        writeln!(file, "{}", line)?;
        Ok(())
    }
}

/// Dry-run transport.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn deliver(&mut self, message: &Message) -> SynResult<()> {
        info!(
            "✉️  {} -> {} | {}",
            message.sender,
            message.recipients.join(", "),
            message.subject
        );
        Ok(())
    }

    fn records_history(&self) -> bool {
        false
    }
}

pub fn build_notifier(params: &NotifyParams) -> Box<dyn Notifier> {
    match params.transport {
        Transport::Outbox => Box::new(OutboxNotifier::new(&params.outbox)),
        Transport::Log => Box::new(LogNotifier),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub sent: usize,
    pub failed: usize,
}

/// Sends one message per group, in order, pausing `delay` between messages.
/// A failed message is logged and counted; the rest are still sent.
pub fn send_all(
    notifier: &mut dyn Notifier,
    groups: &[Group],
    template: &MessageTemplate,
    delay: Duration,
) -> DeliveryReport {
    let mut report = DeliveryReport::default();

    for (i, group) in groups.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }

        let message = compose_message(group, template);
        match notifier.deliver(&message) {
            Ok(()) => {
                report.sent += 1;
                info!("Sent to {}", message.recipients.join(", "));
            }
            Err(e) => {
                report.failed += 1;
                error!("Failed to notify {}: {}", message.recipients.join(", "), e);
            }
        }
    }

    report
}
