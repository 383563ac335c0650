use std::fmt;

/// One line typed at the console, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    Shoppers,
    /// `shopper` is `None` when the id is not a number.
    Pay {
        shopper: Option<u32>,
        currency: String,
        amount: String,
    },
    Check { payment_id: String },
    List,
    WhoAmI,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Blank,
    Unknown(String),
    Usage(&'static str),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Blank => Ok(()),
            ParseError::Unknown(word) => {
                write!(f, "unknown command `{word}`; type `help` for commands")
            }
            ParseError::Usage(usage) => write!(f, "usage: {usage}"),
        }
    }
}

pub const HELP: &str = "\
commands:
  login <username> <password>        start a session
  logout                             end the session
  shoppers                           list shoppers
  pay <shopper-id> <currency> <amt>  request a payment (USD, EUR, GBP)
  check <payment-id>                 refresh a payment's status
  list                               show previous requests
  whoami                             show the logged-in operator
  quit                               leave";

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseError::Blank);
        };
        let args: Vec<&str> = words.collect();

        match (verb.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("login", [username, password]) => Ok(Command::Login {
                username: username.to_string(),
                password: password.to_string(),
            }),
            ("login", _) => Err(ParseError::Usage("login <username> <password>")),
            ("logout", []) => Ok(Command::Logout),
            ("shoppers", []) => Ok(Command::Shoppers),
            ("pay", [shopper, currency, amount @ ..]) => Ok(Command::Pay {
                shopper: shopper.parse().ok(),
                currency: currency.to_string(),
                amount: amount.join(" "),
            }),
            ("pay", _) => Err(ParseError::Usage("pay <shopper-id> <currency> <amount>")),
            ("check", [payment_id]) => Ok(Command::Check {
                payment_id: payment_id.to_string(),
            }),
            ("check", _) => Err(ParseError::Usage("check <payment-id>")),
            ("list", []) => Ok(Command::List),
            ("whoami", []) => Ok(Command::WhoAmI),
            ("help", _) => Ok(Command::Help),
            ("quit" | "exit", []) => Ok(Command::Quit),
            ("logout" | "shoppers" | "list" | "whoami" | "quit" | "exit", _) => {
                Err(ParseError::Usage("command takes no arguments"))
            }
            _ => Err(ParseError::Unknown(verb.to_string())),
        }
    }
}
