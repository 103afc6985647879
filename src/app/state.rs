//! Application state definitions

use crossterm::event::KeyCode;
use ratatui::layout::{Position, Rect};

use crate::app::input::ShelfAction;
use crate::shelf::{Book, BookId, Field, Shelf, ShelfView};

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Main,
    Help,
}

/// Which area receives key presses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Shelves,
    AddForm,
    Search,
}

impl Focus {
    /// Next area in tab order
    pub fn next(self) -> Self {
        match self {
            Focus::AddForm => Focus::Search,
            Focus::Search => Focus::Shelves,
            Focus::Shelves => Focus::AddForm,
        }
    }

    /// Previous area in tab order
    pub fn prev(self) -> Self {
        match self {
            Focus::AddForm => Focus::Shelves,
            Focus::Search => Focus::AddForm,
            Focus::Shelves => Focus::Search,
        }
    }
}

/// A single-line text field with a character cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl TextInput {
    /// A field prefilled with `value`, cursor at the end
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.chars().count();
        Self { value, cursor }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Replace the contents, cursor at the end
    pub fn set(&mut self, value: impl Into<String>) {
        *self = Self::with_value(value);
    }

    /// Take the contents, leaving the field empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }

    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.value.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.value.len())
    }

    /// Get the number of characters in input
    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.value.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.value.remove(byte_idx);
        }
    }

    /// Delete character at cursor
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.value.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Apply an editing key. Returns false if the key is not an editing key.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Delete => self.delete_char_forward(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_start(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }
}

/// Fields of the add-book form, in tab order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Title,
    Author,
    Year,
    Complete,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Author,
            FormField::Author => FormField::Year,
            FormField::Year => FormField::Complete,
            FormField::Complete => FormField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Complete,
            FormField::Author => FormField::Title,
            FormField::Year => FormField::Author,
            FormField::Complete => FormField::Year,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Author => "Author",
            FormField::Year => "Year",
            FormField::Complete => "Finished reading",
        }
    }
}

impl From<Field> for FormField {
    fn from(field: Field) -> Self {
        match field {
            Field::Title => FormField::Title,
            Field::Author => FormField::Author,
            Field::Year => FormField::Year,
        }
    }
}

/// State of the add-book form
#[derive(Debug, Clone, Default)]
pub struct AddFormState {
    pub title: TextInput,
    pub author: TextInput,
    pub year: TextInput,
    pub is_complete: bool,
    pub field: FormField,
}

impl AddFormState {
    /// Submit button label, reflecting the checkbox
    pub fn submit_label(&self) -> &'static str {
        if self.is_complete {
            "Add to shelf: finished"
        } else {
            "Add to shelf: not finished yet"
        }
    }

    /// The text field under the cursor, if the cursor is on one
    pub fn active_input_mut(&mut self) -> Option<&mut TextInput> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Author => Some(&mut self.author),
            FormField::Year => Some(&mut self.year),
            FormField::Complete => None,
        }
    }

    pub fn input(&self, field: FormField) -> Option<&TextInput> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Author => Some(&self.author),
            FormField::Year => Some(&self.year),
            FormField::Complete => None,
        }
    }

    pub fn toggle_complete(&mut self) {
        self.is_complete = !self.is_complete;
    }

    /// Clear every field after a successful submit
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Command line hidden or showing status
    #[default]
    Normal,
    /// Accepting : commands
    Command,
}

/// State for the command line input
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    /// Current mode
    pub mode: CommandMode,
    /// Input buffer
    pub input: TextInput,
    /// Status/error message to display (when not in input mode)
    pub message: Option<String>,
    /// Whether message is an error
    pub is_error: bool,
    /// Command history
    pub history: Vec<String>,
    /// Current history index when navigating
    pub history_index: Option<usize>,
}

impl CommandLineState {
    /// Maximum number of history entries to keep
    const MAX_HISTORY: usize = 200;

    /// Start command mode
    pub fn enter_command_mode(&mut self) {
        self.mode = CommandMode::Command;
        self.input.clear();
        self.message = None;
        self.history_index = None;
    }

    /// Exit input mode
    pub fn exit_input_mode(&mut self) {
        self.mode = CommandMode::Normal;
        self.input.clear();
    }

    /// Set a status message
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn is_input_mode(&self) -> bool {
        self.mode == CommandMode::Command
    }

    /// Add to history
    pub fn add_to_history(&mut self, cmd: String) {
        if !cmd.is_empty() && self.history.last() != Some(&cmd) {
            if self.history.len() >= Self::MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(cmd);
        }
    }

    /// Navigate history up
    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        match self.history_index {
            None => self.history_index = Some(self.history.len() - 1),
            Some(i) if i > 0 => self.history_index = Some(i - 1),
            _ => {}
        }
        if let Some(i) = self.history_index {
            self.input.set(self.history[i].clone());
        }
    }

    /// Navigate history down
    pub fn history_down(&mut self) {
        if let Some(i) = self.history_index {
            if i + 1 < self.history.len() {
                self.history_index = Some(i + 1);
                self.input.set(self.history[i + 1].clone());
            } else {
                self.history_index = None;
                self.input.clear();
            }
        }
    }
}

/// Selection and scrolling within one shelf
#[derive(Debug, Clone, Default)]
pub struct ShelfListState {
    /// Selected book index within the shelf
    pub selected: usize,
    /// First visible book
    pub scroll_offset: usize,
    /// How many books fit on screen (updated on render)
    pub visible_books: usize,
}

impl ShelfListState {
    /// Ensure the selected book is visible by adjusting scroll offset
    pub fn ensure_selection_visible(&mut self) {
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        }
        if self.visible_books > 0 && self.selected >= self.scroll_offset + self.visible_books {
            self.scroll_offset = self.selected + 1 - self.visible_books;
        }
    }

    /// Keep the selection inside a shelf of `len` books
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
        self.scroll_offset = self.scroll_offset.min(self.selected);
    }
}

/// One of the three edit prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStep {
    Title,
    Author,
    Year,
}

impl EditStep {
    pub fn label(self) -> &'static str {
        match self {
            EditStep::Title => "Edit title:",
            EditStep::Author => "Edit author:",
            EditStep::Year => "Edit year:",
        }
    }
}

/// Answers collected by the edit prompts; `None` means the prompt was cancelled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditAnswers {
    pub id: BookId,
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<String>,
}

/// Outcome of answering one edit prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditProgress {
    /// Another prompt follows
    Next,
    /// All prompts answered
    Done(EditAnswers),
}

/// Three sequential prompts, each prefilled with the book's current value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPrompt {
    pub step: EditStep,
    pub input: TextInput,
    answers: EditAnswers,
    current_author: String,
    current_year: String,
}

impl EditPrompt {
    pub fn new(book: &Book) -> Self {
        Self {
            step: EditStep::Title,
            input: TextInput::with_value(book.title.clone()),
            answers: EditAnswers { id: book.id(), title: None, author: None, year: None },
            current_author: book.author.clone(),
            current_year: book.year.to_string(),
        }
    }

    /// Accept the current input and move to the next prompt
    pub fn advance(&mut self) -> EditProgress {
        let value = Some(self.input.take());
        match self.step {
            EditStep::Title => {
                self.answers.title = value;
                self.step = EditStep::Author;
                self.input.set(self.current_author.clone());
                EditProgress::Next
            }
            EditStep::Author => {
                self.answers.author = value;
                self.step = EditStep::Year;
                self.input.set(self.current_year.clone());
                EditProgress::Next
            }
            EditStep::Year => {
                self.answers.year = value;
                EditProgress::Done(self.answers.clone())
            }
        }
    }

    /// Abandon the remaining prompts; the unanswered values stay empty
    pub fn cancel(self) -> EditAnswers {
        self.answers
    }
}

/// A modal question blocking other input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    /// Yes/no before deleting a book
    ConfirmDelete { id: BookId, title: String },
    /// Edit title, author and year
    Edit(EditPrompt),
}

/// A clickable screen area registered while drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRegion {
    pub area: Rect,
    pub action: ShelfAction,
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Area receiving key presses
    pub focus: Focus,

    /// Shelf holding the selection
    pub selected_shelf: Shelf,

    /// Per-shelf selection
    pub in_progress: ShelfListState,
    pub completed: ShelfListState,

    /// Add-book form
    pub add_form: AddFormState,

    /// Search-by-title field
    pub search: TextInput,

    /// Open modal prompt
    pub prompt: Option<Prompt>,

    /// Command line state
    pub command_line: CommandLineState,

    /// Action buttons drawn in the last frame
    pub hit_regions: Vec<HitRegion>,
}

impl AppState {
    pub fn list(&self, shelf: Shelf) -> &ShelfListState {
        match shelf {
            Shelf::InProgress => &self.in_progress,
            Shelf::Completed => &self.completed,
        }
    }

    pub fn list_mut(&mut self, shelf: Shelf) -> &mut ShelfListState {
        match shelf {
            Shelf::InProgress => &mut self.in_progress,
            Shelf::Completed => &mut self.completed,
        }
    }

    /// The book under the selection, if its shelf has any books
    pub fn selected_book<'a>(&self, view: &'a ShelfView) -> Option<&'a Book> {
        view.shelf(self.selected_shelf).get(self.list(self.selected_shelf).selected)
    }

    /// Move the selection onto `id`, if it is shown
    pub fn select_book(&mut self, id: BookId, view: &ShelfView) {
        if let Some((shelf, index)) = view.locate(id) {
            self.selected_shelf = shelf;
            let list = self.list_mut(shelf);
            list.selected = index;
            list.ensure_selection_visible();
        }
    }

    /// Keep both selections inside their shelves after the view changed
    pub fn clamp_selection(&mut self, view: &ShelfView) {
        self.in_progress.clamp(view.in_progress.len());
        self.completed.clamp(view.completed.len());
    }

    /// Move the selection by `delta` books within the selected shelf
    pub fn move_selection(&mut self, delta: isize, view: &ShelfView) {
        let len = view.shelf(self.selected_shelf).len();
        let list = self.list_mut(self.selected_shelf);
        list.selected = list.selected.saturating_add_signed(delta).min(len.saturating_sub(1));
        list.ensure_selection_visible();
    }

    /// Action button at a screen position
    pub fn action_at(&self, column: u16, row: u16) -> Option<ShelfAction> {
        let position = Position::new(column, row);
        self.hit_regions.iter().find(|r| r.area.contains(position)).map(|r| r.action)
    }
}
