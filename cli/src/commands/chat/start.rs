//! # Chat Start Command
//!
//! File: cli/src/commands/chat/start.rs
//!
//! ## Overview
//!
//! `tradingpro chat start` runs the chat widget in the terminal:
//! - the session opens with the configured greeting
//! - blank lines are ignored and never reach the log
//! - every answer is computed immediately but printed only after the reply delay
//! - `/history` prints the transcript, `bye` / `exit` / EOF end the session
//! - Ctrl+C ends the session and cancels a reply that is still pending
//!
//! The loop is generic over its input and output so tests can drive it with byte
//! buffers and a paused clock.
//!
use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::core::faq::FaqResponder;
use crate::core::reply::DelayedReply;
use crate::core::session::{is_submittable, ChatSession, Sender};
use clap::Parser;
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

const BOT_LABEL: &str = "Консультант";
const USER_LABEL: &str = "Вы";
const FAREWELL: &str = "До свидания! Будем рады видеть вас на курсах.";

#[derive(Parser, Debug)]
pub struct StartArgs {
    /// Override the configured reply delay, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,
}

fn is_exit_command(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "bye" | "exit" | "/exit")
}

fn render_history(session: &ChatSession) -> String {
    let mut out = String::new();
    for message in session.messages() {
        let label = match message.sender {
            Sender::User => USER_LABEL,
            Sender::Bot => BOT_LABEL,
        };
        out.push_str(&format!(
            "[{}] {} {}: {}\n",
            message.id,
            message.sent_at.format("%H:%M:%S"),
            label,
            message.text
        ));
    }
    out
}

/// Runs one chat session until exit, EOF or `shutdown`, and returns its log.
pub async fn run_session<R, W, S>(
    input: R,
    out: &mut W,
    responder: &FaqResponder,
    greeting: &str,
    delay: Duration,
    shutdown: S,
) -> Result<ChatSession>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Future<Output = ()>,
{
    let mut session = ChatSession::new(greeting);
    writeln!(out, "{}: {}", BOT_LABEL, greeting)?;

    let mut lines = input.lines();
    tokio::pin!(shutdown);

    loop {
        write!(out, "{}: ", USER_LABEL)?;
        out.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line.map_err(AppError::ChatIo)?,
            _ = &mut shutdown => None,
        };
        let Some(line) = line else {
            writeln!(out)?;
            break;
        };

        if !is_submittable(&line) {
            continue;
        }
        let command = line.trim();
        if is_exit_command(command) {
            writeln!(out, "{}: {}", BOT_LABEL, FAREWELL)?;
            break;
        }
        if command == "/history" {
            write!(out, "{}", render_history(&session))?;
            continue;
        }

        session.push_user(&line);
        let answer = match responder.find_match(&line) {
            Some(found) => {
                debug!("FAQ #{} matched on keyword {:?}", found.index + 1, found.keyword);
                found.entry.answer.clone()
            }
            None => {
                debug!("No FAQ keyword matched, sending fallback");
                responder.fallback().to_string()
            }
        };

        let mut reply = DelayedReply::schedule(answer, delay);
        let delivered = tokio::select! {
            text = reply.delivered() => text,
            _ = &mut shutdown => None,
        };
        match delivered {
            Some(text) => {
                session.push_bot(&text);
                writeln!(out, "{}: {}", BOT_LABEL, text)?;
            }
            None => {
                if reply.is_pending() {
                    info!("Session ended while a reply was pending; reply discarded.");
                }
                reply.cancel();
                writeln!(out)?;
                break;
            }
        }
    }

    Ok(session)
}

pub async fn handle_start(args: StartArgs, responder: &FaqResponder, config: &Config) -> Result<()> {
    let delay = args
        .delay_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.chat.reply_delay());
    info!("Starting chat session (reply delay {:?})", delay);
    println!("Type your question, `/history` for the transcript, `bye` to leave.");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let session = run_session(
        stdin,
        &mut stdout,
        responder,
        &config.chat.greeting,
        delay,
        shutdown,
    )
    .await?;

    info!("Chat session ended after {} messages.", session.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::faq::default_entries;
    use std::future::pending;

    async fn run(input: &str, delay: Duration) -> (ChatSession, String) {
        let responder = FaqResponder::default();
        let mut out = Vec::new();
        let session = run_session(
            input.as_bytes(),
            &mut out,
            &responder,
            "Здравствуйте!",
            delay,
            pending(),
        )
        .await
        .expect("session should run");
        (session, String::from_utf8(out).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_question_gets_answer_after_delay() {
        let start = tokio::time::Instant::now();
        let (session, out) = run("Сколько стоят курсы?\nbye\n", Duration::from_millis(500)).await;

        assert!(start.elapsed() >= Duration::from_millis(500));
        assert_eq!(session.len(), 3);
        let bot = &session.messages()[2];
        assert_eq!(bot.sender, Sender::Bot);
        assert_eq!(bot.text, default_entries()[0].answer);
        assert!(out.contains(&default_entries()[0].answer));
        assert!(out.contains(FAREWELL));
    }

    #[tokio::test]
    async fn test_blank_lines_are_not_logged() {
        let (session, _) = run("\n   \n\t\nexit\n", Duration::ZERO).await;
        assert_eq!(session.len(), 1);
    }

    #[tokio::test]
    async fn test_eof_ends_session() {
        let (session, out) = run("Привет, как дела?\n", Duration::ZERO).await;
        assert_eq!(session.len(), 3);
        assert_eq!(
            session.last().map(|m| m.text.as_str()),
            Some(crate::core::faq::DEFAULT_FALLBACK)
        );
        assert!(!out.contains(FAREWELL));
    }

    #[tokio::test]
    async fn test_history_is_printed_not_logged() {
        let (session, out) = run("Есть ли чат?\n/history\nbye\n", Duration::ZERO).await;
        assert_eq!(session.len(), 3);
        assert!(out.contains("[1] "));
        assert!(out.contains("[3] "));
        assert!(out.contains("Вы: Есть ли чат?"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_pending_reply() {
        let responder = FaqResponder::default();
        let mut out = Vec::new();
        let session = run_session(
            "Нужен ли опыт?\n".as_bytes(),
            &mut out,
            &responder,
            "hi",
            Duration::from_millis(500),
            tokio::time::sleep(Duration::from_millis(100)),
        )
        .await
        .unwrap();

        // Greeting and the user message only; the reply never arrived.
        assert_eq!(session.len(), 2);
        assert_eq!(session.last().map(|m| m.sender), Some(Sender::User));
    }

    #[test]
    fn test_exit_commands() {
        assert!(is_exit_command("bye"));
        assert!(is_exit_command("BYE"));
        assert!(is_exit_command("exit"));
        assert!(!is_exit_command("goodbye everyone"));
    }
}
