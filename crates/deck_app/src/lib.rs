//! Deckgen app: CLI shell wiring the request coordinator to the engine.
mod cli;
mod logging;
mod runner;

pub use cli::{Cli, LogArg};
pub use logging::LogDestination;
pub use runner::EffectRunner;

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use clap::Parser;
use deck_core::{update, AppState, AppViewModel, DeliveryMode, Msg, Phase, ScreenView};
use deck_engine::GeneratorSettings;

/// Parse the command line and drive one generation through the
/// coordinator loop.
pub fn run() -> anyhow::Result<()> {
    let args = Cli::parse();
    logging::initialize(args.log_destination());

    let settings = GeneratorSettings {
        endpoint: args.endpoint.clone(),
        ..GeneratorSettings::default()
    };
    let mut runner = EffectRunner::new(settings, args.out.clone());
    let mode = if args.deferred {
        DeliveryMode::Deferred
    } else {
        DeliveryMode::Immediate
    };
    let mut state = AppState::with_delivery_mode(mode);

    // Seed the form the way the UI would.
    let mut queue = VecDeque::from([
        Msg::TopicChanged(args.topic.clone()),
        Msg::SlidesChanged(args.slides.to_string()),
        Msg::GenerateClicked,
    ]);

    loop {
        while let Some(msg) = queue.pop_front() {
            let (next, effects) = update(std::mem::take(&mut state), msg);
            state = next;
            if state.consume_dirty() {
                render(&state.view());
            }
            queue.extend(runner.run(effects));
        }

        let view = state.view();
        if view.phase == Phase::Generating {
            let msgs = runner.poll();
            if msgs.is_empty() {
                thread::sleep(Duration::from_millis(20));
            }
            queue.extend(msgs);
            continue;
        }
        if let ScreenView::Delivery {
            filename,
            topic,
            slide_count,
        } = &view.screen
        {
            queue.push_back(prompt_delivery(filename, topic, *slide_count)?);
            continue;
        }
        break;
    }

    Ok(())
}

fn render(view: &AppViewModel) {
    if let ScreenView::Generator {
        generating: true, ..
    } = view.screen
    {
        println!("Creating your presentation...");
    }
}

fn prompt_delivery(filename: &str, topic: &str, slide_count: u8) -> anyhow::Result<Msg> {
    println!();
    println!("Your presentation is ready for download.");
    println!("  {filename}");
    println!("  Topic: {topic} ({slide_count} slides)");
    print!("[s]ave / [b]ack to create another: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        // EOF counts as leaving the screen.
        return Ok(Msg::BackToGeneratorClicked);
    }
    Ok(match line.trim() {
        "s" | "S" => Msg::SaveClicked,
        _ => Msg::BackToGeneratorClicked,
    })
}
