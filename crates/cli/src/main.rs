use region_select_core::{
    host::{event_channel, HostEvent},
    Config, RegionSelect, SelectorOutcome,
};
use anyhow::{Context, Result};
use arboard::Clipboard;
use clap::Parser;
use tokio::sync::mpsc::UnboundedReceiver;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Handle of the display to cover (defaults to the last used, then the primary)
    #[arg(short, long)]
    display: Option<i64>,

    /// Override the device scale instead of sampling it from the overlay
    #[arg(long)]
    scale: Option<f64>,

    /// Selections must be larger than this in both physical dimensions
    #[arg(long)]
    min_size: Option<u32>,

    /// Copy the selected region to clipboard as x,y,width,height
    #[arg(short, long, default_value_t = false)]
    copy: bool,

    /// List available displays and exit
    #[arg(long)]
    list_displays: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    // Load config and apply command-line overrides
    let mut overrides = Config::load().context("Failed to load configuration")?.to_builder();
    if let Some(scale) = args.scale {
        overrides = overrides.with_scale(scale);
    }
    if let Some(min_size) = args.min_size {
        overrides = overrides.with_min_selection_size(min_size);
    }
    let config = overrides.build().context("Invalid --scale or --min-size")?;

    let mut app = RegionSelect::with_config(config).context("Failed to enumerate displays")?;

    // Handle --list-displays
    if args.list_displays {
        println!("Available displays:");
        for info in app.list_displays() {
            println!("{}", info);
        }
        return Ok(());
    }

    // Recording-side consumer: prints each host event as a JSON line
    let (events, rx) = event_channel();
    let consumer = tokio::spawn(print_events(rx));

    // The overlay needs the main thread's event loop
    let outcome = tokio::task::block_in_place(|| app.run_interactive(args.display, events))
        .context("Failed to run region selector. Try --list-displays to check handles")?;

    consumer.await.context("Event consumer panicked")?;

    match outcome {
        SelectorOutcome::Committed(region) => {
            if args.copy {
                match Clipboard::new() {
                    Ok(mut clipboard) => {
                        if let Err(e) = clipboard.set_text(region.to_string()) {
                            eprintln!("Warning: Failed to copy to clipboard: {}", e);
                        } else {
                            eprintln!("(Copied to clipboard)");
                        }
                    }
                    Err(e) => eprintln!("Warning: Could not access clipboard: {}", e),
                }
            }
        }
        SelectorOutcome::Cancelled => {
            eprintln!("Selection cancelled");
        }
    }

    Ok(())
}

/// Drains host events until the overlay drops its sender.
async fn print_events(mut rx: UnboundedReceiver<HostEvent>) {
    while let Some(event) = rx.recv().await {
        match serde_json::to_string(&event) {
            Ok(line) => println!("{}", line),
            Err(e) => log::error!("Failed to serialize {:?}: {}", event, e),
        }
    }
}
