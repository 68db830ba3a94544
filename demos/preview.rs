//! Preview - drive the portfolio page state from a script or the terminal
//!
//! Demonstrates:
//! - Mounting the page with full capabilities
//! - Binding effects to the active section and menu signals
//! - Throttled scrolling, smooth navigation, form submission
//! - Teardown clearing every pending timer
//!
//! Run with: cargo run --example preview
//! Interactive: cargo run --example preview -- --interactive
//! Logs: RUST_LOG=spark_folio=debug cargo run --example preview

use std::time::{Duration, Instant};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use spark_signals::effect;
use spark_folio::pipeline::run;
use spark_folio::{
    Capabilities, ContactSubmission, FolioConfig, Page, PageContent, PageEvent, Viewport,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("spark_folio=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let interactive = std::env::args().any(|arg| arg == "--interactive");
    let start = Instant::now();
    let mut page = Page::mount(
        FolioConfig::default(),
        PageContent::portfolio(),
        Capabilities::full(),
        Viewport::default(),
        start,
    )?;

    let active = page.navigation().tracker().active_signal();
    let _stop_active = effect(move || {
        println!("active section: {:?}", active.get());
    });
    let menu = page.navigation().menu_signal();
    let _stop_menu = effect(move || {
        println!("menu open: {}", menu.get());
    });

    if interactive {
        enable_raw_mode()?;
        let result = run(&mut page);
        disable_raw_mode()?;
        result?;
    } else {
        scripted(&mut page, start);
    }

    page.teardown();
    Ok(())
}

/// A short session: scroll down, open the menu, jump to contact, submit.
fn scripted(page: &mut Page, start: Instant) {
    let mut now = start;
    let mut advance = |page: &mut Page, ms: u64| {
        let end = now + Duration::from_millis(ms);
        while now < end {
            now += Duration::from_millis(16);
            page.tick(now);
        }
        now
    };

    for _ in 0..20 {
        let t = advance(page, 16);
        page.handle(PageEvent::ScrollBy(60.0), t);
    }
    let t = advance(page, 200);
    println!(
        "scrolled to {} (navbar compact: {})",
        page.viewport().scroll_y,
        page.navigation().is_scrolled()
    );

    page.handle(PageEvent::ToggleMenu, t);
    page.handle(PageEvent::Navigate("contact".to_string()), t);
    let t = advance(page, 1500);
    println!("landed at {}", page.viewport().scroll_y);

    page.handle(
        PageEvent::Submit(ContactSubmission::new("Al", "bad-email", "Hi", "short")),
        t,
    );
    if let Some(message) = page.form().message() {
        println!("form: {}", message.text);
    }

    advance(page, 6000);
    println!(
        "typing: {:?}, revealed: {}, images loaded: {}, pending timers: {}",
        page.typing().map(|typing| typing.text()),
        page.navigation().reveal().map_or(0, |r| r.revealed_count()),
        page.images().map_or(0, |images| images.len() - images.pending()),
        page.pending_timers()
    );
}
