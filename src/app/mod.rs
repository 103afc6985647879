//! Application state and event handling

pub mod command;
pub mod input;
pub mod session;
pub mod state;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::Config;
use crate::shelf::{BookId, FileStorage, ShelfError, Storage};
use crate::theme::Theme;
use crate::ui;
use command::{Command, ParseResult, parse_command};
use input::{Action, ActionKind, ShelfAction, shelf_key_to_action};
pub use session::Session;
use state::{AppState, EditAnswers, EditProgress, EditPrompt, Focus, FormField, Prompt, Screen};

/// The main application
pub struct App<S: Storage = FileStorage> {
    /// Application configuration
    config: Config,

    /// Resolved theme
    theme: Theme,

    /// Current application state
    state: AppState,

    /// Bookshelf and its storage
    session: Session<S>,
}

impl App<FileStorage> {
    /// Open the bookshelf in the configured data directory
    pub fn open(config: Config) -> Result<Self> {
        let storage = FileStorage::new(config.data_dir()?);
        let session = Session::open(storage, config.storage_key.clone())?;
        Ok(Self::new(config, session))
    }
}

impl<S: Storage> App<S> {
    /// Create a new application instance
    pub fn new(config: Config, session: Session<S>) -> Self {
        let theme = config.active_theme();
        Self { config, theme, state: AppState::default(), session }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        let result = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|frame| {
                ui::draw(frame, &mut self.state, &self.session, &self.config, &self.theme);
            })?;

            if !event::poll(std::time::Duration::from_millis(16))? {
                continue;
            }

            if self.handle_event(event::read()?) {
                break; // Exit requested
            }
        }
        Ok(())
    }

    /// Handle one terminal event, returns true if should exit.
    ///
    /// A failed event is logged and shown on the command line; the session
    /// keeps running.
    pub fn handle_event(&mut self, event: Event) -> bool {
        let outcome = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse).map(|()| false),
            _ => Ok(false),
        };

        match outcome {
            Ok(exit) => exit,
            Err(e) => {
                tracing::warn!("Event failed: {:#}", e);
                self.state.command_line.set_error(e.to_string());
                false
            }
        }
    }

    /// Handle a key press, returns true if should exit
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(true);
        }

        if let Some(prompt) = self.state.prompt.take() {
            self.handle_prompt_key(prompt, key.code)?;
            return Ok(false);
        }

        if self.state.screen == Screen::Help {
            self.state.screen = Screen::Main;
            return Ok(false);
        }

        if self.state.command_line.is_input_mode() {
            return self.handle_command_line_key(key.code);
        }

        self.state.command_line.clear_message();

        match self.state.focus {
            Focus::Shelves => self.handle_shelves_key(key),
            Focus::AddForm => self.handle_form_key(key.code).map(|()| false),
            Focus::Search => self.handle_search_key(key.code).map(|()| false),
        }
    }

    /// Left clicks on an action button dispatch that button's action
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left)
            || self.state.prompt.is_some()
            || self.state.command_line.is_input_mode()
        {
            return Ok(());
        }

        match self.state.action_at(mouse.column, mouse.row) {
            Some(action) => {
                self.state.focus = Focus::Shelves;
                self.state.select_book(action.id, self.session.view());
                self.dispatch(action)
            }
            None => Ok(()),
        }
    }

    /// Run a per-book action
    pub fn dispatch(&mut self, action: ShelfAction) -> Result<()> {
        let book = self.session.shelf().get(action.id).cloned();

        match (action.kind, book) {
            (ActionKind::Toggle, _) => {
                if let Some(complete) = self.session.toggle(action.id)? {
                    let shelf = if complete { "finished" } else { "not finished" };
                    self.state.command_line.set_message(format!("Moved to {shelf}"));
                    self.state.select_book(action.id, self.session.view());
                }
            }
            (ActionKind::Delete, Some(book)) if self.config.confirm_delete => {
                self.state.prompt = Some(Prompt::ConfirmDelete { id: book.id(), title: book.title });
            }
            (ActionKind::Delete, _) => self.delete(action.id)?,
            (ActionKind::Edit, Some(book)) => {
                self.state.prompt = Some(Prompt::Edit(EditPrompt::new(&book)));
            }
            (ActionKind::Edit, None) => self.session.refresh()?,
        }

        self.state.clamp_selection(self.session.view());
        Ok(())
    }

    fn delete(&mut self, id: BookId) -> Result<()> {
        if let Some(book) = self.session.delete(id)? {
            self.state.command_line.set_message(format!("Deleted \"{}\"", book.title));
        }
        self.state.clamp_selection(self.session.view());
        Ok(())
    }

    fn handle_prompt_key(&mut self, prompt: Prompt, key: KeyCode) -> Result<()> {
        match prompt {
            Prompt::ConfirmDelete { id, title } => match key {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.delete(id)?,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.session.refresh()?;
                    self.state.clamp_selection(self.session.view());
                }
                _ => self.state.prompt = Some(Prompt::ConfirmDelete { id, title }),
            },
            Prompt::Edit(mut edit) => match key {
                KeyCode::Enter => match edit.advance() {
                    EditProgress::Next => self.state.prompt = Some(Prompt::Edit(edit)),
                    EditProgress::Done(answers) => self.submit_edit(answers)?,
                },
                KeyCode::Esc => self.submit_edit(edit.cancel())?,
                other => {
                    edit.input.handle_key(other);
                    self.state.prompt = Some(Prompt::Edit(edit));
                }
            },
        }
        Ok(())
    }

    fn submit_edit(&mut self, answers: EditAnswers) -> Result<()> {
        let result = self.session.edit(
            answers.id,
            answers.title.as_deref().unwrap_or_default(),
            answers.author.as_deref().unwrap_or_default(),
            answers.year.as_deref().unwrap_or_default(),
        );
        self.state.clamp_selection(self.session.view());

        if result? {
            self.state.command_line.set_message("Book updated");
            self.state.select_book(answers.id, self.session.view());
        }
        Ok(())
    }

    fn handle_shelves_key(&mut self, key: KeyEvent) -> Result<bool> {
        let Some(action) = shelf_key_to_action(key.code, key.modifiers, self.config.vim_mode)
        else {
            return Ok(false);
        };

        let view = self.session.view();
        match action {
            Action::Up => self.state.move_selection(-1, view),
            Action::Down => self.state.move_selection(1, view),
            Action::Top => self.state.move_selection(isize::MIN, view),
            Action::Bottom => self.state.move_selection(isize::MAX, view),
            Action::Left | Action::Right => {
                self.state.selected_shelf = self.state.selected_shelf.other();
                self.state.clamp_selection(view);
            }
            Action::Book(kind) => {
                if let Some(book) = self.state.selected_book(view) {
                    let action = ShelfAction::new(kind, book.id());
                    self.dispatch(action)?;
                }
            }
            Action::FocusAddForm => self.state.focus = Focus::AddForm,
            Action::FocusSearch => self.state.focus = Focus::Search,
            Action::NextFocus => self.state.focus = self.state.focus.next(),
            Action::PrevFocus => self.state.focus = self.state.focus.prev(),
            Action::ClearFilter => {
                if self.session.query().is_some() {
                    self.session.refresh()?;
                    self.state.clamp_selection(self.session.view());
                }
            }
            Action::CommandMode => self.state.command_line.enter_command_mode(),
            Action::Help => self.state.screen = Screen::Help,
            Action::Quit => return Ok(true),
        }
        Ok(false)
    }

    fn handle_form_key(&mut self, key: KeyCode) -> Result<()> {
        let form = &mut self.state.add_form;
        match key {
            KeyCode::Esc => self.state.focus = Focus::Shelves,
            KeyCode::Tab | KeyCode::Down => form.field = form.field.next(),
            KeyCode::BackTab | KeyCode::Up => form.field = form.field.prev(),
            KeyCode::Char(' ') if form.field == FormField::Complete => form.toggle_complete(),
            KeyCode::Enter => self.submit_add()?,
            other => {
                if let Some(input) = form.active_input_mut() {
                    input.handle_key(other);
                }
            }
        }
        Ok(())
    }

    fn submit_add(&mut self) -> Result<()> {
        let form = &self.state.add_form;
        let added = self.session.add(
            form.title.value(),
            form.author.value(),
            form.year.value(),
            form.is_complete,
        );

        // Put the cursor on the field that needs fixing
        if let Some(err) = added.as_ref().err().and_then(|e| e.downcast_ref::<ShelfError>()) {
            self.state.add_form.field = FormField::from(err.field());
        }
        let id = added?;

        self.state.add_form.reset();
        self.state.command_line.set_message("Book added");
        self.state.select_book(id, self.session.view());
        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Esc => self.state.focus = Focus::Shelves,
            KeyCode::Tab => self.state.focus = Focus::Search.next(),
            KeyCode::BackTab => self.state.focus = Focus::Search.prev(),
            KeyCode::Enter => {
                let query = self.state.search.value().to_string();
                self.search(&query)?;
                self.state.focus = Focus::Shelves;
            }
            other => {
                self.state.search.handle_key(other);
            }
        }
        Ok(())
    }

    fn search(&mut self, query: &str) -> Result<()> {
        let count = self.session.search(query)?;
        let noun = if count == 1 { "book" } else { "books" };
        self.state.command_line.set_message(format!("{count} {noun} matching \"{query}\""));
        self.state.clamp_selection(self.session.view());
        Ok(())
    }

    fn handle_command_line_key(&mut self, key: KeyCode) -> Result<bool> {
        match key {
            KeyCode::Esc => self.state.command_line.exit_input_mode(),
            KeyCode::Up => self.state.command_line.history_up(),
            KeyCode::Down => self.state.command_line.history_down(),
            KeyCode::Enter => {
                let input = self.state.command_line.input.take();
                self.state.command_line.add_to_history(input.clone());
                self.state.command_line.exit_input_mode();
                return self.execute(&input);
            }
            other => {
                self.state.command_line.input.handle_key(other);
            }
        }
        Ok(false)
    }

    /// Execute a command line entry, returns true if should exit
    fn execute(&mut self, input: &str) -> Result<bool> {
        let command = match parse_command(input) {
            ParseResult::Ok(command) => command,
            ParseResult::UnknownCommand(cmd) => {
                self.state.command_line.set_error(format!("Unknown command: {cmd}"));
                return Ok(false);
            }
            ParseResult::MissingArgument(cmd) => {
                self.state.command_line.set_error(format!(":{cmd} needs an argument"));
                return Ok(false);
            }
            ParseResult::InvalidArgument { command, value } => {
                self.state.command_line.set_error(format!("Invalid argument for :{command}: {value}"));
                return Ok(false);
            }
        };

        match command {
            Command::Add(args) => {
                let id =
                    self.session.add(&args.title, &args.author, &args.year, args.is_complete)?;
                self.state.command_line.set_message("Book added");
                self.state.select_book(id, self.session.view());
            }
            Command::Search(query) => self.search(&query)?,
            Command::Clear => {
                self.session.refresh()?;
                self.state.clamp_selection(self.session.view());
            }
            Command::Book(action) => self.dispatch(action)?,
            Command::Help => self.state.screen = Screen::Help,
            Command::Quit => return Ok(true),
            Command::Nop => self.state.command_line.clear_message(),
        }
        Ok(false)
    }
}

/// Set up the terminal for TUI rendering
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
