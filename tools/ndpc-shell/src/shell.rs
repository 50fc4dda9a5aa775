//! Menu loop.
//!
//! The shell is generic over its input and output so the whole dialogue can
//! be driven from a byte buffer in tests. Failures of a single command are
//! shown as `kind: message` and the loop continues; only I/O errors on the
//! terminal itself end the session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crossterm::style::{Color, Stylize};
use ndpc_client::transactions::parse_u64;
use ndpc_client::{
    AccountIdentity, BuyRequest, DeployDescription, DisapproveRequest, IdentityRegistry,
    MarketplaceError, MarketplaceReader, MintRequest, PublishRequest, TokenMetadata,
    TransactionBuilder,
};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::render;

const MENU: &str = r"
\------------ NFT Client Menu ------------/

    1) Deploy Contract
    2) Mint token
    3) Publish Request
    4) View Request Object
    5) View My incoming requests
    6) View My outgoing requests
    7) View My tokens
    8) Approve Request
    9) Buy Token
    10) Get Metadata by token_id
    11) Get Holder by holder_id
    12) Cancel Request
    13) Get Approved holding by approved_id
    14) Disapprove
    15) Query my named key
    0) exit

/------------ NFT Client Menu ------------\
";

/// Failure of one shell command.
#[derive(Debug, Error)]
pub enum ShellError {
    /// Client error (read, decode, or argument validation).
    #[error(transparent)]
    Marketplace(#[from] MarketplaceError),

    /// Metadata file could not be read.
    #[error("cannot read {}: {error}", path.display())]
    MetadataFile {
        /// Path typed by the user.
        path: PathBuf,
        /// Underlying error.
        error: String,
    },

    /// Record could not be rendered.
    #[error(transparent)]
    Render(#[from] serde_json::Error),

    /// Terminal I/O failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Short kind shown before the message.
    pub fn kind(&self) -> &'static str {
        match self {
            ShellError::Marketplace(e) => e.kind(),
            ShellError::MetadataFile { .. } => "MetadataFile",
            ShellError::Render(_) => "Render",
            ShellError::Io(_) => "Io",
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Interactive marketplace shell.
pub struct Shell<R, I, O> {
    reader: R,
    builder: TransactionBuilder,
    identities: IdentityRegistry,
    input: I,
    output: O,
    colored: bool,
}

impl<R, I, O> Shell<R, I, O>
where
    R: MarketplaceReader,
    I: BufRead,
    O: Write,
{
    /// Shell reading with `reader`, building with `builder`, logging in
    /// from `identities`.
    pub fn new(
        reader: R,
        builder: TransactionBuilder,
        identities: IdentityRegistry,
        input: I,
        output: O,
    ) -> Self {
        Self {
            reader,
            builder,
            identities,
            input,
            output,
            colored: false,
        }
    }

    /// Enable ANSI colours.
    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Consume the shell, returning its output sink.
    pub fn into_output(self) -> O {
        self.output
    }

    /// Log in (prompting unless `slot` is given) and run the menu until
    /// `0` or end of input.
    pub async fn run(&mut self, slot: Option<&str>) -> io::Result<()> {
        let slot = match slot {
            Some(slot) => slot.to_string(),
            None => {
                let label = format!("Login using user [1-{}] : ", self.identities.len());
                self.ask(&label)?.unwrap_or_default()
            }
        };
        let user = match self.identities.select(&slot) {
            Ok(identity) => identity.clone(),
            Err(e) => {
                let line = self.paint(&format!("{}: {}", e.kind(), e), Color::Red);
                writeln!(self.output, "{line}")?;
                return Ok(());
            }
        };
        debug!("[ndpc] Logged in as {}", user.name);
        let welcome = self.paint(&format!("Logged in as {}", user.name), Color::Cyan);
        writeln!(self.output, "{welcome}")?;

        loop {
            let menu = self.paint(MENU, Color::Green);
            writeln!(self.output, "{menu}")?;
            let Some(choice) = self.ask("Enter your choice : ")? else {
                return Ok(());
            };

            match self.dispatch(&user, choice.trim()).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(ShellError::Io(e)) => return Err(e),
                Err(e) => {
                    let line = self.paint(&format!("{}: {}", e.kind(), e), Color::Red);
                    writeln!(self.output, "{line}")?;
                }
            }
        }
    }

    async fn dispatch(&mut self, user: &AccountIdentity, choice: &str) -> Result<Flow, ShellError> {
        let signer = &user.secret_key;
        let account = &user.account_hash;

        match choice {
            "0" => return Ok(Flow::Exit),
            "1" => {
                let deploy = self.builder.deploy_contract(signer);
                self.print_deploy(&deploy)?;
            }
            "2" => {
                let path = PathBuf::from(self.ask_text("Metadata path : ")?);
                let text = std::fs::read_to_string(&path).map_err(|e| ShellError::MetadataFile {
                    path: path.clone(),
                    error: e.to_string(),
                })?;
                let metadata = TokenMetadata::from_json_str(&text)?;
                let amount = self.ask_text("Amount : ")?;
                let label = format!("Recipient [1-{}] : ", self.identities.len());
                let recipient_slot = self.ask_text(&label)?;
                let recipient = self.identities.select(&recipient_slot)?.account_hash;
                let price = self.ask_text("Price : ")?;
                let request = MintRequest {
                    metadata,
                    price,
                    amount,
                    recipient,
                };
                let deploy = self.builder.mint(signer, &request)?;
                self.print_deploy(&deploy)?;
            }
            "3" => {
                let commission = self.ask_text("Enter your expected comission [0-100]: ")?;
                let holder_id = self.ask_text("Enter holder_id : ")?;
                let amount = self.ask_text("Enter amount to request: ")?;
                let producer = self.ask_text("Enter producer's account-hash : ")?;
                let request = PublishRequest {
                    producer,
                    amount,
                    holder_id,
                    commission,
                };
                let deploy = self.builder.publish_request(signer, &request)?;
                self.print_deploy(&deploy)?;
            }
            "4" => {
                let request_id = self.ask_id("request_id", "Enter the request_id : ")?;
                let request = self.reader.get_request(request_id).await?;
                let view = render::request(&self.identities, request_id, &request);
                self.print_record(&view)?;
            }
            "5" => {
                let requests = self.reader.incoming_requests(account).await?;
                self.print_heading("Your incoming requests : ")?;
                for (id, request) in &requests {
                    let view = render::request(&self.identities, *id, request);
                    self.print_record(&view)?;
                }
            }
            "6" => {
                let requests = self.reader.outgoing_requests(account).await?;
                self.print_heading("Your outgoing requests : ")?;
                for (id, request) in &requests {
                    let view = render::request(&self.identities, *id, request);
                    self.print_record(&view)?;
                }
            }
            "7" => {
                let holdings = self.reader.holdings_of(account).await?;
                self.print_heading("Your tokens : ")?;
                for (_, holder) in &holdings {
                    self.print_record(&render::holder(holder)?)?;
                }
            }
            "8" => {
                let requests = self.reader.incoming_requests(account).await?;
                self.print_heading("Your incoming requests : ")?;
                for (id, request) in &requests {
                    let view = render::request(&self.identities, *id, request);
                    self.print_record(&view)?;
                }
                let request_id = self.ask_text("Enter the request_id : ")?;
                let deploy = self.builder.approve_request(signer, &request_id)?;
                self.print_deploy(&deploy)?;
            }
            "9" => {
                let amount = self.ask_text("Enter the amount : ")?;
                let approved_id = self.ask_text("Enter the approved_id : ")?;
                let price = self.ask_text("Enter the price : ")?;
                let request = BuyRequest {
                    amount,
                    approved_id,
                    price,
                };
                let deploy = self.builder.buy(signer, &request)?;
                self.print_deploy(&deploy)?;
            }
            "10" => {
                let token_id = self.ask_id("token_id", "Enter the token_id : ")?;
                let token = self.reader.get_token(token_id).await?;
                self.print_record(&render::token(&token)?)?;
            }
            "11" => {
                let holder_id = self.ask_id("holder_id", "Enter the holder_id : ")?;
                let holder = self.reader.get_holder(holder_id).await?;
                self.print_record(&render::holder(&holder)?)?;
            }
            "12" => {
                let requests = self.reader.outgoing_requests(account).await?;
                self.print_heading("Your outgoing requests : ")?;
                for (id, request) in &requests {
                    let view = render::request(&self.identities, *id, request);
                    self.print_record(&view)?;
                }
                let request_id = self.ask_text("Enter the request_id : ")?;
                let deploy = self.builder.cancel_request(signer, &request_id)?;
                self.print_deploy(&deploy)?;
            }
            "13" => {
                let approved_id = self.ask_id("approved_id", "Enter the approved_id : ")?;
                let holding = self.reader.get_approved(approved_id).await?;
                let view = render::approved(&self.identities, approved_id, &holding);
                self.print_record(&view)?;
            }
            "14" => {
                let approved_id = self.ask_text("Enter the approved_id : ")?;
                let amount = self.ask_text("Enter the amount : ")?;
                let publisher = self.ask_text("Enter publisher's account-hash : ")?;
                let request = DisapproveRequest {
                    amount,
                    approved_id,
                    publisher,
                };
                let deploy = self.builder.disapprove(signer, &request)?;
                self.print_deploy(&deploy)?;
            }
            "15" => {
                let name = self.ask_text("Enter the named key : ")?;
                let value = self.reader.named_key_value(account, name.trim()).await?;
                self.print_record(&value)?;
            }
            other => {
                let line = self.paint(&format!("Invalid choice: {other}"), Color::Red);
                writeln!(self.output, "{line}")?;
            }
        }
        Ok(Flow::Continue)
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Prompt and read one line; `None` at end of input.
    fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        let prompt = self.paint(label, Color::Yellow);
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask_text(&mut self, label: &str) -> Result<String, ShellError> {
        Ok(self.ask(label)?.unwrap_or_default())
    }

    fn ask_id(&mut self, argument: &'static str, label: &str) -> Result<u64, ShellError> {
        let text = self.ask_text(label)?;
        Ok(parse_u64(argument, &text)?)
    }

    // =========================================================================
    // Output
    // =========================================================================

    fn paint(&self, text: &str, color: Color) -> String {
        if self.colored {
            text.with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn print_heading(&mut self, text: &str) -> Result<(), ShellError> {
        let line = self.paint(text, Color::Green);
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn print_record(&mut self, view: &Value) -> Result<(), ShellError> {
        let text = serde_json::to_string_pretty(view)?;
        let line = self.paint(&text, Color::Cyan);
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn print_deploy(&mut self, deploy: &DeployDescription) -> Result<(), ShellError> {
        let heading = self.paint("Copy the cmd :", Color::Yellow);
        let command = self.paint(&deploy.render_command(), Color::Magenta);
        writeln!(self.output, "{heading}")?;
        writeln!(self.output, "\t{command}")?;
        Ok(())
    }
}
