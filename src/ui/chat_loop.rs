//! Interactive chat session: prompt, dispatch, render, repeat.
//!
//! One request is in flight at most. Ctrl+C at the prompt arrives as
//! [`PromptInput::Interrupted`]; Ctrl+C while a request is outstanding cancels
//! the session's interrupt token, which drops the request future.

use std::error::Error;
use std::io::{self, Write};

use ratatui::crossterm::style::Stylize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{GatewayMessageResponse, JourneyCreateResponse, CLI_SURFACE};
use crate::core::client::{Gateway, GatewayClient, RequestError, BACKEND_TARGET, GATEWAY_TARGET};
use crate::core::config::ResolvedConfig;
use crate::core::journey::format_journey_params_for_api;
use crate::core::session::SessionId;
use crate::ui::prompt::{PromptError, PromptInput, Prompter, TerminalPrompter};
use crate::ui::splash::{print_splash, prompt_placeholder, random_suggestion};
use crate::ui::status::{StatusPresenter, CHAT_STATUS_PHRASES, JOURNEY_STATUS_PHRASES};
use crate::ui::wizard::{confirm_journey_creation, WizardOutcome};
use crate::utils::input::sanitize_text_input;

const PROMPT: &str = ") ";
const FAREWELL: &str = "Goodbye!";

const HELP_TEXT: &str = "\
Commands:
  /journey      Build a journey step by step
  ?, /help      Show this help
  exit, quit    End the session

Anything else is sent to TerryAnn.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    AwaitingInput,
    Dispatching,
    Rendering,
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Empty,
    Exit,
    Help,
    Journey,
    Message(String),
}

/// Classify one line of chat input.
pub fn parse_chat_input(input: &str) -> ChatCommand {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ChatCommand::Empty;
    }
    if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
        return ChatCommand::Exit;
    }
    match trimmed {
        "?" | "/help" => ChatCommand::Help,
        "/journey" => ChatCommand::Journey,
        _ => ChatCommand::Message(trimmed.to_string()),
    }
}

pub struct ChatSession<'a, G: Gateway, P: Prompter, W: Write> {
    gateway: &'a G,
    prompter: &'a mut P,
    out: &'a mut W,
    session_id: SessionId,
    user_id: Option<String>,
    presenter: StatusPresenter,
    interrupt: CancellationToken,
    state: ChatState,
}

impl<'a, G: Gateway, P: Prompter, W: Write> ChatSession<'a, G, P, W> {
    pub fn new(gateway: &'a G, prompter: &'a mut P, out: &'a mut W, session_id: SessionId) -> Self {
        Self {
            gateway,
            prompter,
            out,
            session_id,
            user_id: None,
            presenter: StatusPresenter::disabled(),
            interrupt: CancellationToken::new(),
            state: ChatState::AwaitingInput,
        }
    }

    pub fn with_user_id(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_presenter(mut self, presenter: StatusPresenter) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn with_interrupt(mut self, interrupt: CancellationToken) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub async fn run(&mut self) -> Result<(), PromptError> {
        while self.state != ChatState::Terminal {
            self.step().await?;
        }
        Ok(())
    }

    /// Handle one prompt.
    pub async fn step(&mut self) -> Result<(), PromptError> {
        if self.interrupt.is_cancelled() {
            return self.finish();
        }

        let placeholder = prompt_placeholder(random_suggestion());
        let line = match self.prompter.read_line(PROMPT, Some(&placeholder))? {
            PromptInput::Line(line) => line,
            PromptInput::EndOfInput | PromptInput::Interrupted => {
                writeln!(self.out)?;
                return self.finish();
            }
        };
        // Ctrl+C during a blocking line read lands here with a line in hand.
        if self.interrupt.is_cancelled() {
            writeln!(self.out)?;
            return self.finish();
        }

        match parse_chat_input(&sanitize_text_input(&line)) {
            ChatCommand::Empty => Ok(()),
            ChatCommand::Exit => self.finish(),
            ChatCommand::Help => {
                writeln!(self.out, "{HELP_TEXT}")?;
                Ok(())
            }
            ChatCommand::Journey => self.create_journey().await,
            ChatCommand::Message(text) => self.send(text).await,
        }
    }

    async fn send(&mut self, text: String) -> Result<(), PromptError> {
        self.state = ChatState::Dispatching;
        debug!(session = %self.session_id, chars = text.len(), "dispatching message");

        let gateway = self.gateway;
        let session_id = self.session_id.to_string();
        let request = gateway.send_message(&session_id, &text, CLI_SURFACE);
        let Some(result) = self.dispatch(CHAT_STATUS_PHRASES, request).await else {
            writeln!(self.out)?;
            return self.finish();
        };

        self.state = ChatState::Rendering;
        match result {
            Ok(value) => {
                let response = GatewayMessageResponse::from_value(&value);
                render_response(&mut *self.out, response.text())?;
            }
            Err(err) => self.render_failure(&err, GATEWAY_TARGET)?,
        }
        self.state = ChatState::AwaitingInput;
        Ok(())
    }

    async fn create_journey(&mut self) -> Result<(), PromptError> {
        let selection = match confirm_journey_creation(&mut *self.prompter, &mut *self.out)? {
            WizardOutcome::Confirmed(selection) => selection,
            WizardOutcome::Cancelled => return Ok(()),
            WizardOutcome::Interrupted => {
                writeln!(self.out)?;
                return self.finish();
            }
        };

        if self.interrupt.is_cancelled() {
            writeln!(self.out)?;
            return self.finish();
        }

        let params = format_journey_params_for_api(&selection);
        let target = params.location_description.clone();
        let request = params.into_request(self.user_id.clone());
        self.state = ChatState::Dispatching;
        debug!(
            campaign = %request.campaign_type,
            name = %request.name,
            location = %target,
            "creating journey"
        );

        let gateway = self.gateway;
        let Some(result) = self
            .dispatch(JOURNEY_STATUS_PHRASES, gateway.create_journey_direct(&request))
            .await
        else {
            writeln!(self.out)?;
            return self.finish();
        };

        self.state = ChatState::Rendering;
        match result {
            Ok(value) => render_journey_summary(&mut *self.out, &request.name, &target, value)?,
            Err(err) => self.render_failure(&err, BACKEND_TARGET)?,
        }
        self.state = ChatState::AwaitingInput;
        Ok(())
    }

    /// Await `request` under the status presenter; `None` when interrupted first.
    async fn dispatch<F>(
        &self,
        phrases: &'static [&'static str],
        request: F,
    ) -> Option<Result<Value, RequestError>>
    where
        F: std::future::Future<Output = Result<Value, RequestError>>,
    {
        let presenter = self.presenter.clone();
        let interrupt = self.interrupt.clone();
        tokio::select! {
            biased;
            _ = interrupt.cancelled() => {
                debug!("request abandoned on interrupt");
                None
            }
            result = presenter.run(phrases, request) => Some(result),
        }
    }

    fn render_failure(&mut self, err: &RequestError, target: &str) -> io::Result<()> {
        debug!(target_name = target, "request failed: {err}");
        writeln!(self.out, "{}", err.user_message_for(target).red())
    }

    fn finish(&mut self) -> Result<(), PromptError> {
        self.state = ChatState::Terminal;
        writeln!(self.out, "{}", FAREWELL.dim())?;
        Ok(())
    }
}

fn render_response<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "TerryAnn".magenta().bold())?;
    for line in text.lines() {
        writeln!(out, "  {line}")?;
    }
    writeln!(out)
}

fn render_journey_summary<W: Write>(
    out: &mut W,
    requested_name: &str,
    target: &str,
    value: Value,
) -> io::Result<()> {
    let response: JourneyCreateResponse = serde_json::from_value(value).unwrap_or_else(|err| {
        debug!("journey response did not match the expected shape: {err}");
        JourneyCreateResponse::default()
    });
    let name = response.name.as_deref().unwrap_or(requested_name);

    writeln!(out)?;
    writeln!(out, "{} {}", "Journey created:".green().bold(), name)?;
    writeln!(out, "  Target: {target}")?;
    if let Some(id) = response.display_id() {
        writeln!(out, "  ID: {id}")?;
    }
    if !response.nodes.is_empty() || !response.edges.is_empty() {
        writeln!(
            out,
            "  Nodes: {}  Edges: {}",
            response.nodes.len(),
            response.edges.len()
        )?;
    }
    writeln!(out)
}

fn spawn_interrupt_watcher(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
            // A second Ctrl+C while stuck in a blocking read leaves immediately.
            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(130);
            }
        }
    })
}

/// Start an interactive session against the configured gateway.
pub async fn run_chat(config: &ResolvedConfig) -> Result<(), Box<dyn Error>> {
    let client = GatewayClient::from_config(config);
    let session_id = SessionId::new();
    debug!(session = %session_id, gateway = %client.gateway_url(), "starting chat session");

    let mut stdout = io::stdout();
    print_splash(&mut stdout, &session_id, random_suggestion())?;

    let interrupt = CancellationToken::new();
    let watcher = spawn_interrupt_watcher(interrupt.clone());

    let mut prompter = TerminalPrompter::new();
    let result = ChatSession::new(&client, &mut prompter, &mut stdout, session_id)
        .with_user_id(config.user_id.clone())
        .with_presenter(StatusPresenter::stderr())
        .with_interrupt(interrupt)
        .run()
        .await;

    watcher.abort();
    result.map_err(Into::into)
}
