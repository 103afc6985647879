//! UI rendering components

pub mod command_line;
pub mod form;
pub mod help;
pub mod layout;
pub mod main_screen;
pub mod prompt;
pub mod shelf_list;

use ratatui::Frame;

use crate::app::Session;
use crate::app::state::{AppState, Screen};
use crate::config::Config;
use crate::shelf::Storage;
use crate::theme::Theme;

/// Main draw function
///
/// Hit regions are rebuilt on every frame, so clicks only ever land on
/// buttons that are currently visible.
pub fn draw<S: Storage>(
    frame: &mut Frame,
    state: &mut AppState,
    session: &Session<S>,
    config: &Config,
    theme: &Theme,
) {
    state.hit_regions.clear();
    main_screen::draw(frame, state, session.view(), session.query(), theme);

    let area = frame.area();
    if state.screen == Screen::Help {
        state.hit_regions.clear();
        help::draw(frame, area, theme, config.vim_mode);
    }

    if let Some(prompt) = &state.prompt {
        prompt::draw(frame, area, prompt, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shelf::MemoryStorage;
    use crate::shelf::storage::DEFAULT_KEY;
    use ratatui::{Terminal, backend::TestBackend};

    fn render(state: &mut AppState, session: &Session<MemoryStorage>) -> String {
        let config = Config::default();
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, state, session, &config, &theme)).unwrap();
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn main_screen_shows_both_shelves() {
        let mut session = Session::open(MemoryStorage::default(), DEFAULT_KEY).unwrap();
        session.add("Dune", "Herbert", "1965", false).unwrap();
        session.add("Emma", "Austen", "1815", true).unwrap();
        let mut state = AppState::default();

        let text = render(&mut state, &session);
        assert!(text.contains("Not finished reading (1)"));
        assert!(text.contains("Finished reading (1)"));
        assert!(text.contains("Dune"));
        assert!(text.contains("Emma"));
        assert_eq!(state.hit_regions.len(), 6);
    }

    #[test]
    fn help_overlay_disables_buttons() {
        let mut session = Session::open(MemoryStorage::default(), DEFAULT_KEY).unwrap();
        session.add("Dune", "Herbert", "1965", false).unwrap();
        let mut state = AppState { screen: Screen::Help, ..Default::default() };

        let text = render(&mut state, &session);
        assert!(text.contains("Press any key to close"));
        assert!(state.hit_regions.is_empty());
    }
}
