//! Parsing of the kiosk's line commands.

use std::str::FromStr;

use domain::{FlavorId, PaymentMethod, SizeId};
use thiserror::Error;

/// One line of customer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KioskCommand {
    Help,
    Menu,
    Flavors,
    Summary,
    New,
    Size(SizeId),
    Flavor(FlavorId),
    Soda,
    Crust,
    Done,
    More(bool),
    Delivery(bool),
    Pay(PaymentMethod),
    Confirm(bool),
    Reset,
    Quit,
}

/// Input that is not a valid command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCommandError {
    #[error("Empty command. Type 'help' to see the commands.")]
    Empty,

    #[error("Unknown command '{0}'. Type 'help' to see the commands.")]
    Unknown(String),

    #[error("'{command}' expects {expected}")]
    BadArgument {
        command: &'static str,
        expected: &'static str,
    },
}

pub const HELP: &str = "\
Commands:
  menu              list sizes
  flavors           list flavors
  new               start an order
  size <id>         choose the pizza size
  flavor <id>       choose the next flavor
  soda              add a 2L soda (up to 2)
  crust             add stuffed crust (once)
  done              finish this pizza
  more yes|no       add another pizza?
  delivery yes|no   deliver the order?
  pay pix|card      choose the payment method
  confirm yes|no    confirm the payment went through
  reset             start over after a finished order
  summary           show the current pizza and order
  quit              leave";

impl FromStr for KioskCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        let mut words = lowered.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseCommandError::Empty);
        };
        let arg = words.next();

        let command = match verb {
            "help" | "?" => KioskCommand::Help,
            "menu" => KioskCommand::Menu,
            "flavors" => KioskCommand::Flavors,
            "summary" => KioskCommand::Summary,
            "new" => KioskCommand::New,
            "size" => KioskCommand::Size(SizeId::new(id_arg("size", arg)?)),
            "flavor" => KioskCommand::Flavor(FlavorId::new(id_arg("flavor", arg)?)),
            "soda" => KioskCommand::Soda,
            "crust" => KioskCommand::Crust,
            "done" => KioskCommand::Done,
            "more" => KioskCommand::More(yes_no_arg("more", arg)?),
            "delivery" => KioskCommand::Delivery(yes_no_arg("delivery", arg)?),
            "pay" => KioskCommand::Pay(match arg {
                Some("pix") => PaymentMethod::Pix,
                Some("card") => PaymentMethod::Card,
                _ => {
                    return Err(ParseCommandError::BadArgument {
                        command: "pay",
                        expected: "pix or card",
                    });
                }
            }),
            "confirm" => KioskCommand::Confirm(yes_no_arg("confirm", arg)?),
            "reset" => KioskCommand::Reset,
            "quit" | "exit" => KioskCommand::Quit,
            other => return Err(ParseCommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn id_arg(command: &'static str, arg: Option<&str>) -> Result<u32, ParseCommandError> {
    arg.and_then(|a| a.parse().ok())
        .ok_or(ParseCommandError::BadArgument {
            command,
            expected: "a numeric id",
        })
}

fn yes_no_arg(command: &'static str, arg: Option<&str>) -> Result<bool, ParseCommandError> {
    match arg {
        Some("yes" | "y") => Ok(true),
        Some("no" | "n") => Ok(false),
        _ => Err(ParseCommandError::BadArgument {
            command,
            expected: "yes or no",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!("new".parse::<KioskCommand>(), Ok(KioskCommand::New));
        assert_eq!("  Soda ".parse::<KioskCommand>(), Ok(KioskCommand::Soda));
        assert_eq!("exit".parse::<KioskCommand>(), Ok(KioskCommand::Quit));
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!("size 3".parse::<KioskCommand>(), Ok(KioskCommand::Size(SizeId::new(3))));
        assert_eq!(
            "flavor 15".parse::<KioskCommand>(),
            Ok(KioskCommand::Flavor(FlavorId::new(15)))
        );
        assert_eq!(
            "size big".parse::<KioskCommand>(),
            Err(ParseCommandError::BadArgument {
                command: "size",
                expected: "a numeric id"
            })
        );
    }

    #[test]
    fn test_parse_yes_no() {
        assert_eq!("more yes".parse::<KioskCommand>(), Ok(KioskCommand::More(true)));
        assert_eq!("delivery N".parse::<KioskCommand>(), Ok(KioskCommand::Delivery(false)));
        assert!("confirm maybe".parse::<KioskCommand>().is_err());
    }

    #[test]
    fn test_parse_payment() {
        assert_eq!("pay PIX".parse::<KioskCommand>(), Ok(KioskCommand::Pay(PaymentMethod::Pix)));
        assert_eq!("pay card".parse::<KioskCommand>(), Ok(KioskCommand::Pay(PaymentMethod::Card)));
        assert!("pay cash".parse::<KioskCommand>().is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<KioskCommand>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "pizza".parse::<KioskCommand>(),
            Err(ParseCommandError::Unknown("pizza".to_string()))
        );
    }
}
