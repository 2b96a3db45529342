use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::widget::{
    ChatMessage, ChatSession, HttpTransport, Page, QuickReply, Sender, SubmitOutcome, Transport,
    Viewport,
};

const HELP: &str = "Commands: /open /close /1 /2 /3 (quick replies) /quit";

fn print_message(msg: &ChatMessage) {
    let who = match msg.sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    if msg.is_structured {
        // Product lists arrive as HTML
        let text = htmd::convert(&msg.text).unwrap_or_else(|_| msg.text.clone());
        println!("{}:\n{}", who, text);
    } else {
        println!("{}: {}", who, msg.text);
    }
}

/// Print what the panel hasn't shown yet. The shopper's own lines are
/// already on screen from typing them.
fn show_unshown<T: Transport, V: Viewport>(session: &mut ChatSession<T, V>) {
    for msg in session.take_unshown() {
        if msg.sender == Sender::Bot {
            print_message(msg);
        }
    }
}

pub async fn run(api_url: &str) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    // A terminal never scrolls past the widget so give it a page it
    // can't reach the bottom of
    let page = Page::new(1.0, 100.0);
    let mut session = ChatSession::new(HttpTransport::new(api_url), page);
    session.open();

    println!("{}", HELP);
    for (i, preset) in QuickReply::ALL.iter().enumerate() {
        println!("  /{} {}", i + 1, preset.text());
    }

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => {
                let outcome = match line.trim() {
                    "/quit" => break,
                    "/open" => {
                        session.open();
                        // Catch up on whatever arrived while closed
                        show_unshown(&mut session);
                        continue;
                    }
                    "/close" => {
                        session.close();
                        println!("(widget closed, replies are still recorded)");
                        continue;
                    }
                    "/1" => session.quick_reply(QuickReply::Hello),
                    "/2" => session.quick_reply(QuickReply::StoreHours),
                    "/3" => session.quick_reply(QuickReply::Recommend),
                    _ => {
                        let _ = rl.add_history_entry(line.as_str());
                        session.set_draft(&line);
                        session.submit_draft()
                    }
                };

                if outcome != SubmitOutcome::Sent {
                    continue;
                }

                while session.next_completion().await {
                    if session.is_open() {
                        show_unshown(&mut session);
                    }
                }
            }
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
