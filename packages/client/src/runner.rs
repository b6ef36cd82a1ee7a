//! Connection loop: socket frames and terminal lines in, reactions out.

use futures_util::{SinkExt, StreamExt};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::{
    args::ClientArgs,
    chat::{ChatClient, Reaction},
    command::Command,
    error::ClientError,
};

pub async fn run_client(args: ClientArgs) -> Result<(), ClientError> {
    let (ws, _) = connect_async(args.url.as_str())
        .await
        .map_err(|source| ClientError::Connect {
            url: args.url.clone(),
            source,
        })?;
    tracing::info!("Connected to {}", args.url);
    println!("Connected to {} as '{}'. Type /quit to leave.", args.url, args.name);

    let (mut write, mut read) = ws.split();
    let mut client = ChatClient::new(args.name);

    for frame in client.seed() {
        write
            .send(Message::Text(serde_json::to_string(&frame)?.into()))
            .await?;
    }

    let mut lines = spawn_line_reader(format!("{}> ", client.name()))?;

    loop {
        let reactions = tokio::select! {
            frame = read.next() => match frame {
                Some(Ok(Message::Text(text))) => match client.handle_frame(text.as_str()) {
                    Ok(reactions) => reactions,
                    Err(e) => {
                        tracing::warn!("Ignoring malformed frame: {}", e);
                        continue;
                    }
                },
                Some(Ok(Message::Close(_))) | None => {
                    println!("* connection closed by server");
                    return Ok(());
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
            },
            line = lines.recv() => match line {
                Some(line) => client.handle_command(Command::parse(&line)),
                // EOF or Ctrl-C on the terminal
                None => client.handle_command(Command::Quit),
            },
        };

        for reaction in reactions {
            match reaction {
                Reaction::Print(line) => println!("{}", line),
                Reaction::Send(frame) => {
                    write
                        .send(Message::Text(serde_json::to_string(&frame)?.into()))
                        .await?;
                }
                Reaction::Quit => {
                    write.send(Message::Close(None)).await?;
                    return Ok(());
                }
            }
        }
    }
}

/// Read terminal lines on a dedicated thread; rustyline blocks.
fn spawn_line_reader(prompt: String) -> Result<mpsc::Receiver<String>, ClientError> {
    let mut editor = DefaultEditor::new()?;
    let (tx, rx) = mpsc::channel(32);

    std::thread::spawn(move || {
        loop {
            match editor.readline(&prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    if tx.blocking_send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });

    Ok(rx)
}
