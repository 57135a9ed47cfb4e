//! Line-oriented terminal front end for the pizzaria order flow.
//!
//! Reads one command per line, forwards it to an [`OrderSession`], and
//! renders the reply as text or as a JSON snapshot. All order logic lives in
//! the `domain` crate.

pub mod command;
pub mod config;
pub mod error;

use std::sync::Arc;

use common::SessionId;
use domain::{
    BuilderStep, Catalog, OrderSession, OrderSummary, PaymentInstructions, PizzaSummary, Prompt,
    SessionState,
};
use serde::Serialize;

use command::{HELP, KioskCommand};
use config::{Config, OutputFormat};
use error::KioskError;

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Rendered reply to one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub flow: Flow,
}

/// JSON view of the session after a command.
#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    session_id: SessionId,
    state: SessionState,
    prompt: Prompt,
    prompt_text: String,
    messages: &'a [String],
    error: Option<String>,
    pizza: Option<PizzaSummary>,
    order: OrderSummary,
    payment: Option<&'a PaymentInstructions>,
}

/// Drives one order session from terminal input.
pub struct Kiosk {
    config: Config,
    session: OrderSession,
}

impl Kiosk {
    pub fn new(config: Config, catalog: Arc<Catalog>) -> Self {
        Self {
            config,
            session: OrderSession::new(catalog),
        }
    }

    pub fn session(&self) -> &OrderSession {
        &self.session
    }

    /// Opening text, shown before the first command.
    pub fn greeting(&self) -> String {
        let welcome = format!("Welcome to {}!", self.config.shop_name);
        self.render(vec![welcome, "Type 'help' to see the commands.".to_string()], None)
    }

    /// Handles one line of input. Errors are rendered, never propagated.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let result = line
            .parse::<KioskCommand>()
            .map_err(KioskError::from)
            .and_then(|command| self.dispatch(command));

        match result {
            Ok((messages, flow)) => Reply {
                text: self.render(messages, None),
                flow,
            },
            Err(err) if err.is_notice() => Reply {
                text: self.render(vec![err.to_string()], None),
                flow: Flow::Continue,
            },
            Err(err) => {
                tracing::debug!(%err, line, "command rejected");
                Reply {
                    text: self.render(Vec::new(), Some(err.to_string())),
                    flow: Flow::Continue,
                }
            }
        }
    }

    fn dispatch(&mut self, command: KioskCommand) -> Result<(Vec<String>, Flow), KioskError> {
        let session = &mut self.session;
        let transition = match command {
            KioskCommand::Help => return Ok((vec![HELP.to_string()], Flow::Continue)),
            KioskCommand::Menu => {
                return Ok((vec![session.catalog().menu()], Flow::Continue));
            }
            KioskCommand::Flavors => {
                let flavors = session
                    .catalog()
                    .flavors()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n");
                return Ok((vec![flavors], Flow::Continue));
            }
            KioskCommand::Summary => {
                let mut messages: Vec<String> = session
                    .pizza_summary()
                    .map(|p| p.to_string())
                    .into_iter()
                    .collect();
                messages.push(format!("Order summary:\n{}", session.order_summary()));
                return Ok((messages, Flow::Continue));
            }
            KioskCommand::Quit => return Ok((vec!["Goodbye!".to_string()], Flow::Quit)),
            KioskCommand::New => session.start_new_pizza()?,
            KioskCommand::Size(id) => session.choose_size(id)?,
            KioskCommand::Flavor(id) => session.choose_flavor(id)?,
            KioskCommand::Soda => session.add_soda()?,
            KioskCommand::Crust => session.add_stuffed_crust()?,
            KioskCommand::Done => session.complete_pizza()?,
            KioskCommand::More(wants_more) => session.continue_or_deliver(wants_more)?,
            KioskCommand::Delivery(wants_delivery) => session.set_delivery(wants_delivery)?,
            KioskCommand::Pay(method) => session.select_payment(method)?,
            KioskCommand::Confirm(confirmed) => session.confirm_payment(confirmed)?,
            KioskCommand::Reset => session.reset()?,
        };

        Ok((transition.message.into_iter().collect(), Flow::Continue))
    }

    fn render(&self, messages: Vec<String>, error: Option<String>) -> String {
        match self.config.output {
            OutputFormat::Text => self.render_text(messages, error),
            OutputFormat::Json => self.render_json(&messages, error),
        }
    }

    fn render_text(&self, mut blocks: Vec<String>, error: Option<String>) -> String {
        if let Some(error) = error {
            blocks.push(format!("error: {error}"));
        }
        if let Some(context) = self.context() {
            blocks.push(context);
        }
        blocks.push(format!("> {}", self.session.prompt()));
        blocks.join("\n\n")
    }

    fn render_json(&self, messages: &[String], error: Option<String>) -> String {
        let prompt = self.session.prompt();
        let snapshot = Snapshot {
            session_id: self.session.id(),
            state: self.session.state(),
            prompt_text: prompt.to_string(),
            prompt,
            messages,
            error,
            pizza: self.session.pizza_summary(),
            order: self.session.order_summary(),
            payment: self.session.payment(),
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|err| {
            tracing::error!(%err, "failed to serialize snapshot");
            error_json(&err.to_string())
        })
    }

    /// Summary the current step shows alongside its prompt.
    fn context(&self) -> Option<String> {
        match self.session.state() {
            SessionState::BuildingPizza => {
                let builder = self.session.builder()?;
                match builder.step() {
                    BuilderStep::ChoosingSize => Some(self.session.catalog().menu()),
                    BuilderStep::ChoosingAddOns => builder.summary().map(|s| s.to_string()),
                    _ => None,
                }
            }
            SessionState::ChoosingDelivery | SessionState::ChoosingPayment => Some(format!(
                "Order summary:\n{}",
                self.session.order_summary()
            )),
            _ => None,
        }
    }
}

/// Minimal JSON reply carrying only an error message.
fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
