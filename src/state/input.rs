//! Input Module - terminal events to page events
//!
//! Bridges crossterm's event system with the page so the state layer can be
//! driven from a terminal preview. Terminal cells are converted to CSS
//! pixels with the configured cell size.
//!
//! # Bindings
//!
//! | Input | Page event |
//! |-------|------------|
//! | wheel, `j`/`k`, arrows | scroll by `wheel_step` |
//! | PageUp / PageDown / Space | scroll by 90% of the viewport |
//! | Home / End | scroll to top / bottom |
//! | `1`..`9` | navigate to the nth link |
//! | `m` | toggle the menu |
//! | `t` | toggle the theme |
//! | `q`, Esc, Ctrl+C | quit |
//! | left click / mouse move | click / pointer move |
//! | terminal resize | resize |
//!
//! # Example
//!
//! ```ignore
//! use spark_folio::state::input::{poll_event, InputMapper};
//! use std::time::Duration;
//!
//! let mapper = InputMapper::new(&config);
//! loop {
//!     if let Some(event) = poll_event(Duration::from_millis(16))? {
//!         if let Some(event) = mapper.convert(event, page.viewport()) {
//!             page.handle(event, Instant::now());
//!         }
//!     }
//! }
//! ```

use std::io::stdout;
use std::time::Duration;

use crossterm::event::{
    poll, read, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, KeyCode,
    KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent as CrosstermMouseEvent, MouseEventKind,
};
use crossterm::execute;

use crate::config::FolioConfig;
use crate::pipeline::events::PageEvent;
use crate::types::{Point, Viewport};

/// Share of the viewport a page key scrolls.
pub const PAGE_SCROLL_FACTOR: f64 = 0.9;

// =============================================================================
// MAPPER
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMapper {
    wheel_step: f64,
    cell_width: f64,
    cell_height: f64,
}

impl InputMapper {
    pub fn new(config: &FolioConfig) -> Self {
        Self {
            wheel_step: config.wheel_step,
            cell_width: config.cell_width,
            cell_height: config.cell_height,
        }
    }

    /// Convert a terminal event. Unbound input maps to `None`.
    pub fn convert(&self, event: CrosstermEvent, viewport: &Viewport) -> Option<PageEvent> {
        match event {
            CrosstermEvent::Mouse(mouse) => self.convert_mouse(mouse),
            CrosstermEvent::Key(key) => self.convert_key(key, viewport),
            CrosstermEvent::Resize(columns, rows) => Some(PageEvent::Resize {
                width: f64::from(columns) * self.cell_width,
                height: f64::from(rows) * self.cell_height,
            }),
            _ => None,
        }
    }

    /// Centre of a terminal cell in CSS pixels.
    pub fn cell_to_point(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f64::from(column) + 0.5) * self.cell_width,
            (f64::from(row) + 0.5) * self.cell_height,
        )
    }

    fn convert_mouse(&self, event: CrosstermMouseEvent) -> Option<PageEvent> {
        match event.kind {
            MouseEventKind::ScrollDown => Some(PageEvent::ScrollBy(self.wheel_step)),
            MouseEventKind::ScrollUp => Some(PageEvent::ScrollBy(-self.wheel_step)),
            MouseEventKind::Down(MouseButton::Left) => {
                Some(PageEvent::Click(self.cell_to_point(event.column, event.row)))
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(PageEvent::PointerMove(
                self.cell_to_point(event.column, event.row),
            )),
            _ => None,
        }
    }

    fn convert_key(&self, event: CrosstermKeyEvent, viewport: &Viewport) -> Option<PageEvent> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let page = viewport.height * PAGE_SCROLL_FACTOR;

        match event.code {
            KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(PageEvent::Quit)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(PageEvent::Quit),
            KeyCode::Char('m') => Some(PageEvent::ToggleMenu),
            KeyCode::Char('t') => Some(PageEvent::ToggleTheme),
            KeyCode::Char('j') | KeyCode::Down => Some(PageEvent::ScrollBy(self.wheel_step)),
            KeyCode::Char('k') | KeyCode::Up => Some(PageEvent::ScrollBy(-self.wheel_step)),
            KeyCode::PageDown | KeyCode::Char(' ') => Some(PageEvent::ScrollBy(page)),
            KeyCode::PageUp => Some(PageEvent::ScrollBy(-page)),
            KeyCode::Home => Some(PageEvent::ScrollTo(0.0)),
            // The page clamps to the last scrollable position
            KeyCode::End => Some(PageEvent::ScrollTo(f64::MAX)),
            KeyCode::Char(c @ '1'..='9') => c
                .to_digit(10)
                .map(|n| PageEvent::NavigateNth(n as usize - 1)),
            _ => None,
        }
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<CrosstermEvent>> {
    if poll(timeout)? {
        Ok(Some(read()?))
    } else {
        Ok(None)
    }
}

// =============================================================================
// MOUSE CAPTURE
// =============================================================================

/// Enable mouse capture (wheel, clicks and movement reach the page).
pub fn enable_mouse() -> std::io::Result<()> {
    execute!(stdout(), EnableMouseCapture)
}

pub fn disable_mouse() -> std::io::Result<()> {
    execute!(stdout(), DisableMouseCapture)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> InputMapper {
        InputMapper::new(&FolioConfig::default())
    }

    fn key(code: KeyCode) -> CrosstermEvent {
        CrosstermEvent::Key(CrosstermKeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CrosstermEvent {
        CrosstermEvent::Mouse(CrosstermMouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_wheel_scrolls_by_step() {
        let viewport = Viewport::default();

        assert_eq!(
            mapper().convert(mouse(MouseEventKind::ScrollDown, 0, 0), &viewport),
            Some(PageEvent::ScrollBy(48.0))
        );
        assert_eq!(
            mapper().convert(mouse(MouseEventKind::ScrollUp, 0, 0), &viewport),
            Some(PageEvent::ScrollBy(-48.0))
        );
    }

    #[test]
    fn test_page_keys_scroll_most_of_viewport() {
        let viewport = Viewport::new(0.0, 1280.0, 800.0);

        assert_eq!(
            mapper().convert(key(KeyCode::PageDown), &viewport),
            Some(PageEvent::ScrollBy(720.0))
        );
        assert_eq!(
            mapper().convert(key(KeyCode::PageUp), &viewport),
            Some(PageEvent::ScrollBy(-720.0))
        );
        assert_eq!(
            mapper().convert(key(KeyCode::Home), &viewport),
            Some(PageEvent::ScrollTo(0.0))
        );
    }

    #[test]
    fn test_digits_navigate() {
        let viewport = Viewport::default();

        assert_eq!(
            mapper().convert(key(KeyCode::Char('1')), &viewport),
            Some(PageEvent::NavigateNth(0))
        );
        assert_eq!(
            mapper().convert(key(KeyCode::Char('9')), &viewport),
            Some(PageEvent::NavigateNth(8))
        );
        assert_eq!(mapper().convert(key(KeyCode::Char('0')), &viewport), None);
    }

    #[test]
    fn test_menu_theme_quit() {
        let viewport = Viewport::default();

        assert_eq!(
            mapper().convert(key(KeyCode::Char('m')), &viewport),
            Some(PageEvent::ToggleMenu)
        );
        assert_eq!(
            mapper().convert(key(KeyCode::Char('t')), &viewport),
            Some(PageEvent::ToggleTheme)
        );
        assert_eq!(mapper().convert(key(KeyCode::Esc), &viewport), Some(PageEvent::Quit));

        let ctrl_c = CrosstermEvent::Key(CrosstermKeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ));
        assert_eq!(mapper().convert(ctrl_c, &viewport), Some(PageEvent::Quit));
    }

    #[test]
    fn test_key_release_ignored() {
        let release = CrosstermEvent::Key(CrosstermKeyEvent::new_with_kind(
            KeyCode::Char('m'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(mapper().convert(release, &Viewport::default()), None);
    }

    #[test]
    fn test_click_in_pixels() {
        let event = mouse(MouseEventKind::Down(MouseButton::Left), 10, 2);

        // 8x16 cells, centre of the cell
        assert_eq!(
            mapper().convert(event, &Viewport::default()),
            Some(PageEvent::Click(Point::new(84.0, 40.0)))
        );
        assert_eq!(
            mapper().convert(mouse(MouseEventKind::Down(MouseButton::Right), 1, 1), &Viewport::default()),
            None
        );
    }

    #[test]
    fn test_resize_in_pixels() {
        assert_eq!(
            mapper().convert(CrosstermEvent::Resize(120, 40), &Viewport::default()),
            Some(PageEvent::Resize {
                width: 960.0,
                height: 640.0
            })
        );
    }
}
