// Shell module - the tabbed terminal container
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks)
// - Rendering the tab bar and the selected feature
// - Translating selection changes into analytics events (in app::Shell)

pub mod app;
pub mod theme;
pub mod ui;

use anyhow::{Context, Result};
use app::Shell;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Run the shell UI
///
/// Sets up the terminal, runs the event loop, and restores the terminal on
/// the way out. Blocks until the user quits (presses 'q').
pub async fn run_shell(mut shell: Shell) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Run the event loop
    let result = run_event_loop(&mut terminal, &mut shell).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on keyboard input and a periodic redraw tick via tokio::select!.
/// The AppLaunched latch fires after the first completed draw; every later
/// frame is a no-op for analytics.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    shell: &mut Shell,
) -> Result<()> {
    // Fallback redraw tick; the input-poll branch completes every ~10ms, so
    // in practice the loop redraws at poll cadence and the tick only matters
    // when polling is starved
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        // Draw the UI
        terminal
            .draw(|f| ui::draw(f, shell))
            .context("Failed to draw terminal")?;

        // First successful render of the root content
        shell.mark_rendered();

        tokio::select! {
            // Keyboard input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(shell, key_event);
                    }
                }
            } => {}

            // Periodic tick for redrawing (uptime, incoming log lines)
            _ = tick_interval.tick() => {}
        }

        if shell.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: global keys first, then the displayed feature
fn handle_key_event(shell: &mut Shell, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match key_event.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            shell.should_quit = true;
        }
        // Tab switching - the only interaction that mutates selection
        KeyCode::Tab | KeyCode::Right => shell.next_tab(),
        KeyCode::BackTab | KeyCode::Left => shell.prev_tab(),
        // Number keys jump straight to a tab
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            shell.select_index(index);
        }
        // Theme cycle
        KeyCode::Char('t') | KeyCode::Char('T') => shell.next_theme(),
        // System logs overlay
        KeyCode::Char('l') | KeyCode::Char('L') => shell.toggle_logs(),
        // Everything else goes to the displayed feature
        key => {
            shell.dispatch_to_feature(key);
        }
    }
}
