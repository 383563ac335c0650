//! Line-oriented operator console over any async reader and writer.

pub mod command;
pub mod render;

use crate::application::engine::SubmissionEngine;
use crate::application::reconciler::StatusReconciler;
use crate::application::session::SessionStore;
use crate::domain::money::Currency;
use crate::domain::ports::{PaymentGatewayRef, SubmissionLedgerRef};
use crate::domain::shopper::ShopperDirectory;
use self::command::{Command, HELP, ParseError};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub struct Console {
    directory: ShopperDirectory,
    session: SessionStore,
    engine: SubmissionEngine,
    reconciler: StatusReconciler,
    ledger: SubmissionLedgerRef,
}

impl Console {
    pub fn new(
        session: SessionStore,
        gateway: PaymentGatewayRef,
        ledger: SubmissionLedgerRef,
    ) -> Self {
        let directory = ShopperDirectory::new();
        let engine =
            SubmissionEngine::new(directory, session.clone(), gateway.clone(), ledger.clone());
        let reconciler = StatusReconciler::new(session.clone(), gateway, ledger.clone());
        Self {
            directory,
            session,
            engine,
            reconciler,
            ledger,
        }
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(&self, input: R, output: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(output, "merchant console; type `help` for commands")?;
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match Command::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command, output).await?,
                Err(ParseError::Blank) => {}
                Err(e) => writeln!(output, "{e}")?,
            }
            output.flush()?;
        }
        Ok(())
    }

    pub async fn execute<W: Write>(&self, command: Command, output: &mut W) -> io::Result<()> {
        match command {
            Command::Login { username, password } => {
                match self.session.login(&username, &password).await {
                    Ok(session) => writeln!(output, "logged in as {}", session.operator()),
                    Err(_) => writeln!(output, "login failed; check your credentials"),
                }
            }
            Command::Logout => {
                self.session.logout().await;
                writeln!(output, "logged out")
            }
            Command::Shoppers => write!(output, "{}", render::shoppers(self.directory.all())),
            Command::Pay {
                shopper,
                currency,
                amount,
            } => {
                let currency: Currency = match currency.parse() {
                    Ok(currency) => currency,
                    Err(e) => return writeln!(output, "{e}"),
                };
                match self.engine.submit(shopper, currency, &amount).await {
                    Ok(s) => writeln!(output, "payment {} {}", s.id(), s.status()),
                    Err(e) => writeln!(output, "{}", render::describe(&e)),
                }
            }
            Command::Check { payment_id } => match self.reconciler.refresh(&payment_id).await {
                Ok(update) => match update.bank_message {
                    Some(message) => {
                        writeln!(output, "payment {payment_id} {} ({message})", update.status)
                    }
                    None => writeln!(output, "payment {payment_id} {}", update.status),
                },
                Err(e) => writeln!(output, "{}", render::describe(&e)),
            },
            Command::List => match self.ledger.entries().await {
                Ok(entries) => write!(output, "{}", render::ledger(&entries)),
                Err(e) => writeln!(output, "{}", render::describe(&e)),
            },
            Command::WhoAmI => match self.session.current().await {
                Some(session) => writeln!(output, "logged in as {}", session.operator()),
                None => writeln!(output, "not logged in"),
            },
            Command::Help => writeln!(output, "{HELP}"),
            Command::Quit => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryLedger;
    use crate::infrastructure::mock::MockGateway;
    use std::sync::Arc;

    async fn run_script(gateway: Arc<MockGateway>, script: &str) -> String {
        let session = SessionStore::new(gateway.clone());
        let console = Console::new(session, gateway, Arc::new(InMemoryLedger::new()));
        let mut output = Vec::new();
        console.run(script.as_bytes(), &mut output).await.unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_pay_and_check_flow() {
        let gateway = Arc::new(MockGateway::new());
        gateway
            .accept_login("jwt-1")
            .respond_created("pay_1", "PENDING", None)
            .respond_status("pay_1", "SUCCESS", Some("approved by bank"));

        let out = run_script(
            gateway,
            "login merchant1 secret\npay 0 usd 100\ncheck pay_1\nlist\n",
        )
        .await;

        assert!(out.contains("logged in as merchant1"));
        assert!(out.contains("payment pay_1 PENDING"));
        assert!(out.contains("payment pay_1 SUCCESS (approved by bank)"));
        assert!(out.contains("shopper 0 - ****-****-****-4444"));
    }

    #[tokio::test]
    async fn test_validation_messages() {
        let gateway = Arc::new(MockGateway::new());
        gateway.accept_login("jwt-1");

        let out = run_script(
            gateway.clone(),
            "login merchant1 secret\npay x USD 1\npay 0 USD abc\npay 0 JPY 1\n",
        )
        .await;

        assert!(out.contains("no shopper selected"));
        assert!(out.contains("invalid amount"));
        assert!(out.contains("unsupported currency: JPY"));
        assert_eq!(gateway.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_logged_out_actions() {
        let gateway = Arc::new(MockGateway::new());

        let out = run_script(gateway.clone(), "whoami\npay 0 USD 5\nlogin bob bad\n").await;

        assert!(out.contains("not logged in"));
        assert!(out.contains("not authenticated; please log in again"));
        assert!(out.contains("login failed; check your credentials"));
        assert_eq!(gateway.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let gateway = Arc::new(MockGateway::new());
        let out = run_script(gateway, "quit\nshoppers\n").await;
        assert!(!out.contains("shopper 0"));
    }

    #[tokio::test]
    async fn test_unknown_check_id() {
        let gateway = Arc::new(MockGateway::new());
        let out = run_script(gateway.clone(), "check nope\nfrobnicate\n").await;
        assert!(out.contains("payment nope not found"));
        assert!(out.contains("unknown command `frobnicate`"));
        assert_eq!(gateway.status_calls(), 0);
    }
}
