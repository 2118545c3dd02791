//! Interactive chat loop.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use storechat_core::backend::{Backend, HttpBackend};
use storechat_core::config::{DelayRange, WidgetConfig};
use storechat_core::models::{ChatTurn, VisitMetadata};
use storechat_core::responder::Responder;
use storechat_core::session::{ChatSession, PageVisit};
use storechat_core::widget::QuickAction;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};

use crate::cli::ChatArgs;
use crate::render;
use crate::{Error, Result};

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Quit,
    Cancel,
    Quick(QuickAction),
    Unknown(String),
    Text(String),
}

impl Input {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "/quit" | "/exit" => Input::Quit,
            "/cancel" => Input::Cancel,
            "/discounts" => Input::Quick(QuickAction::Discounts),
            "/gifts" => Input::Quick(QuickAction::FreeGifts),
            cmd if cmd.starts_with('/') => Input::Unknown(cmd.to_string()),
            _ => Input::Text(line.to_string()),
        }
    }
}

/// Merge command-line overrides into the environment configuration.
fn resolve_config(args: &ChatArgs) -> Result<WidgetConfig> {
    let mut config = WidgetConfig::from_env()?;
    if let Some(url) = &args.backend_url {
        config.backend_url = Some(url.clone());
    }
    if let Some(secs) = args.timeout_secs {
        config.reply_timeout = Duration::from_secs(secs);
    }
    if let Some(delay) = &args.delay_ms {
        config.delay = DelayRange::parse(delay)
            .ok_or_else(|| Error::Custom(format!("invalid --delay-ms: {delay}")))?;
    }
    Ok(config)
}

async fn open_session(config: &WidgetConfig, args: &ChatArgs) -> Result<ChatSession> {
    let Some(base_url) = &config.backend_url else {
        info!("starting canned session");
        return Ok(ChatSession::canned(Responder::canned(config.delay)));
    };

    info!("starting remote session against {base_url}");
    let backend: Arc<dyn Backend> = Arc::new(HttpBackend::new(base_url)?);
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    let mut visit = PageVisit::new(VisitMetadata::new(
        &args.page_url,
        user_agent,
        args.referrer.clone(),
    ));
    if let Some(url) = &args.notifier_url {
        visit = visit.with_notifier(url.clone());
    }

    let responder = Responder::remote(backend.clone()).with_timeout(config.reply_timeout);
    Ok(ChatSession::open_remote(backend, &visit, responder).await)
}

async fn print(out: &mut Stdout, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

async fn print_turn(out: &mut Stdout, turn: &ChatTurn) -> Result<()> {
    print(out, &render::turn(turn)).await
}

async fn print_reply(out: &mut Stdout, session: &ChatSession, turn: &ChatTurn) -> Result<()> {
    print_turn(out, turn).await?;
    if let Some(url) = session.widget().redirect_url() {
        print(out, &format!("   (suggested link: {url})")).await?;
    }
    Ok(())
}

enum Event {
    Line(Option<String>),
    Reply(Option<ChatTurn>),
}

pub async fn run(args: ChatArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let mut session = open_session(&config, &args).await?;
    session.widget_mut().toggle();

    let mut out = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print(&mut out, &render::header()).await?;
    for turn in session.turns() {
        print_turn(&mut out, turn).await?;
    }
    print(&mut out, &format!("   ({})", render::PLACEHOLDER)).await?;

    loop {
        // While a reply is pending the shopper may keep typing, but only
        // `/cancel` and `/quit` take effect until the reply lands.
        let event = if session.is_typing() {
            tokio::select! {
                line = lines.next_line() => Event::Line(line?),
                reply = session.next_reply() => Event::Reply(reply.cloned()),
            }
        } else {
            Event::Line(lines.next_line().await?)
        };

        let line = match event {
            Event::Reply(Some(turn)) => {
                print_reply(&mut out, &session, &turn).await?;
                continue;
            }
            Event::Reply(None) => continue,
            Event::Line(None) => {
                // Input closed: let the pending reply land before leaving.
                if let Some(turn) = session.next_reply().await.cloned() {
                    print_reply(&mut out, &session, &turn).await?;
                }
                break;
            }
            Event::Line(Some(line)) => line,
        };

        match Input::parse(&line) {
            Input::Quit => break,
            Input::Cancel => {
                if session.cancel().is_some() {
                    print(&mut out, "   (reply cancelled)").await?;
                }
                continue;
            }
            Input::Unknown(cmd) => {
                print(&mut out, &format!("   (unknown command: {cmd})")).await?;
                continue;
            }
            Input::Quick(action) => session.quick_action(action),
            // A bare Enter sends whatever was typed while waiting.
            Input::Text(text) if text.trim().is_empty() => {}
            Input::Text(text) => session.widget_mut().set_input(text),
        }

        if session.is_typing() {
            print(
                &mut out,
                "   (still waiting for a reply; press Enter to send once it arrives)",
            )
            .await?;
            continue;
        }

        match session.submit_input() {
            Some(token) => {
                debug!("submitted reply token {}", token.get());
                if let Some(turn) = session.turns().last() {
                    print_turn(&mut out, turn).await?;
                }
                print(&mut out, &render::typing()).await?;
            }
            None => debug!("ignored blank input"),
        }
    }

    session.cancel();
    session.widget_mut().toggle();
    Ok(())
}
