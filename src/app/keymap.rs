use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pane {
    List,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyCommand {
    Save,
    Quit,
    Cancel,
    NewForm,
    ResetStatus,
    FocusList,
    FocusEditor,
    FieldStep(i32),
    RowSelect(i32),
    ListMove(i32),
    ListOpen,
    ListDelete,
    ListReload,
    Activate,
    Edit(KeyEvent),
    None,
}

pub(crate) const EDITOR_HELP: &str = "Tab/Shift+Tab field • Enter add/toggle/choose • Backspace on empty removes last • Ctrl+↑/↓ pick choice, Del remove • Ctrl+S save • Ctrl+R cancel • Ctrl+N new • Ctrl+L list • Ctrl+Q quit";
pub(crate) const LIST_HELP: &str = "↑/↓ move • Enter open • Ctrl+D delete • F5 reload • Ctrl+N new • Tab/Ctrl+E editor • Ctrl+Q quit";

pub(crate) fn help_text(pane: Pane) -> &'static str {
    match pane {
        Pane::List => LIST_HELP,
        Pane::Editor => EDITOR_HELP,
    }
}

pub(crate) fn classify(key: &KeyEvent, pane: Pane) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') => KeyCommand::Save,
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyCommand::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyCommand::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyCommand::Cancel,
            KeyCode::Char('n') | KeyCode::Char('N') => KeyCommand::NewForm,
            KeyCode::Char('l') | KeyCode::Char('L') => KeyCommand::FocusList,
            KeyCode::Char('e') | KeyCode::Char('E') => KeyCommand::FocusEditor,
            KeyCode::Char('d') | KeyCode::Char('D') if pane == Pane::List => {
                KeyCommand::ListDelete
            }
            KeyCode::Up if pane == Pane::Editor => KeyCommand::RowSelect(-1),
            KeyCode::Down if pane == Pane::Editor => KeyCommand::RowSelect(1),
            _ => KeyCommand::None,
        };
    }

    if key.code == KeyCode::Esc {
        return KeyCommand::ResetStatus;
    }

    match pane {
        Pane::List => match key.code {
            KeyCode::Up => KeyCommand::ListMove(-1),
            KeyCode::Down => KeyCommand::ListMove(1),
            KeyCode::Enter => KeyCommand::ListOpen,
            KeyCode::F(5) => KeyCommand::ListReload,
            KeyCode::Tab => KeyCommand::FocusEditor,
            _ => KeyCommand::None,
        },
        Pane::Editor => match key.code {
            KeyCode::Tab | KeyCode::Down => KeyCommand::FieldStep(1),
            KeyCode::BackTab | KeyCode::Up => KeyCommand::FieldStep(-1),
            KeyCode::Enter => KeyCommand::Activate,
            _ => KeyCommand::Edit(*key),
        },
    }
}
