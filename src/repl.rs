use crate::config::lang::{ texts, Language };
use crate::dashboard;
use crate::models::chat::Role;
use crate::session::{ FailureMode, Session };
use crate::AppContext;
use log::{ error, info };
use std::error::Error;
use tokio::io::{ AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt };

#[derive(Debug, PartialEq)]
pub enum Command {
    Ask(String),
    Quick(Option<usize>),
    Clear,
    History,
    Dashboard,
    Language(Option<Language>),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Command::Ask(line.to_string());
    };

    let mut parts = rest.splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match name.as_str() {
        "quick" | "q" =>
            match arg {
                None => Command::Quick(None),
                // Shown to the user numbered from 1.
                Some(n) =>
                    match n.parse::<usize>() {
                        Ok(i) if i >= 1 => Command::Quick(Some(i - 1)),
                        _ => Command::Unknown(line.to_string()),
                    }
            }
        "clear" => Command::Clear,
        "history" => Command::History,
        "dashboard" => Command::Dashboard,
        "lang" =>
            match arg {
                None => Command::Language(None),
                Some(l) =>
                    match l.parse() {
                        Ok(lang) => Command::Language(Some(lang)),
                        Err(_) => Command::Unknown(line.to_string()),
                    }
            }
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

const HELP: &str =
    "Commands:
  <question>      ask the assistant
  /quick          list quick questions
  /quick <n>      ask quick question n
  /dashboard      show current metrics
  /history        show the conversation
  /clear          clear the conversation
  /lang <name>    switch language (English, Arabic)
  /quit           leave";

fn quick_list(lang: Language) -> String {
    let t = texts(lang);
    let mut out = format!("{}:\n", t.quick_questions_title);
    for (i, q) in t.quick_questions.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, q));
    }
    out
}

fn history(session: &Session) -> String {
    if session.conversation().is_empty() {
        return "(empty)\n".to_string();
    }
    let mut out = String::new();
    for msg in session.conversation().all() {
        let who = match msg.role() {
            Role::User => "You",
            Role::Assistant => "Assistant",
            Role::System => "System",
        };
        out.push_str(&format!("{}: {}\n", who, msg.content()));
    }
    out
}

/// Reads commands line by line until EOF or `/quit`.
pub async fn run_repl<R, W>(
    ctx: &AppContext,
    reader: R,
    mut writer: W
) -> Result<(), Box<dyn Error + Send + Sync>>
    where R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin
{
    let mut session = Session::new(ctx.default_lang);
    info!("Started terminal session {}", session.id());

    let t = texts(session.language());
    writer.write_all(
        format!("{}\n{}\n{}\n\n{}\n", t.ai_title, t.ai_caption, HELP, t.chat_input).as_bytes()
    ).await?;

    let mut lines = reader.lines();
    loop {
        writer.write_all(b"> ").await?;
        writer.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let output = match parse_command(&line) {
            Command::Empty => continue,
            Command::Quit => break,
            Command::Help => format!("{}\n", HELP),
            Command::Dashboard =>
                match ctx.data.snapshot() {
                    Ok(snapshot) => format!("{}\n", dashboard::render(&snapshot, session.language())),
                    Err(e) => {
                        error!("Dashboard data unavailable: {}", e);
                        format!("Error: {}\n", e)
                    }
                }
            Command::History => history(&session),
            Command::Clear => {
                session.clear();
                format!("{}\n", texts(session.language()).clear_chat)
            }
            Command::Language(None) => format!("{}\n", session.language()),
            Command::Language(Some(lang)) => {
                session.set_language(lang);
                format!("{}\n", lang)
            }
            Command::Quick(None) => quick_list(session.language()),
            Command::Quick(Some(index)) => {
                writer.write_all(format!("{}\n", texts(session.language()).analyzing).as_bytes()).await?;
                match session.quick(&ctx.assistant, ctx.data.as_ref(), index).await {
                    Ok(reply) => format!("{}\n", reply),
                    Err(e) => format!("AI Error: {}\n", e),
                }
            }
            Command::Ask(question) => {
                writer.write_all(format!("{}\n", texts(session.language()).analyzing).as_bytes()).await?;
                match
                    session.submit(
                        &ctx.assistant,
                        ctx.data.as_ref(),
                        &question,
                        FailureMode::Surface
                    ).await
                {
                    Ok(reply) => format!("{}\n", reply),
                    Err(e) => format!("AI Error: {}\n", e),
                }
            }
            Command::Unknown(cmd) => format!("Unknown command: {} (try /help)\n", cmd),
        };
        writer.write_all(output.as_bytes()).await?;
    }

    writer.flush().await?;
    info!("Terminal session {} ended", session.id());
    Ok(())
}
