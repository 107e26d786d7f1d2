use console_core::{AppViewModel, Focus, Msg};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const PAGE_ROWS: isize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Dispatch(Msg),
    Redraw,
    Quit,
    Ignore,
}

/// Translates a terminal event into a console action, given what is on screen.
pub fn map_event(event: Event, view: &AppViewModel) -> Action {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(key, view),
        Event::Paste(text) if view.alert.is_none() => {
            Action::Dispatch(Msg::InputChanged(format!("{}{}", view.input, text)))
        }
        Event::Resize(..) => Action::Redraw,
        _ => Action::Ignore,
    }
}

fn map_key(key: KeyEvent, view: &AppViewModel) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return Action::Quit;
    }

    // An open alert blocks everything until acknowledged.
    if view.alert.is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => Action::Dispatch(Msg::AlertDismissed),
            _ => Action::Ignore,
        };
    }

    match key.code {
        KeyCode::Char('r') if ctrl => return Action::Dispatch(Msg::VerifyClicked),
        KeyCode::F(5) => return Action::Dispatch(Msg::VerifyClicked),
        KeyCode::Char('l') if ctrl => return Action::Dispatch(Msg::ClearClicked),
        KeyCode::Char('e') if ctrl => return Action::Dispatch(Msg::ExportClicked),
        KeyCode::Tab | KeyCode::BackTab => return Action::Dispatch(Msg::FocusToggled),
        _ => {}
    }

    match view.focus {
        Focus::Results => map_results_key(key),
        Focus::Input => map_input_key(key, view),
    }
}

fn map_results_key(key: KeyEvent) -> Action {
    let delta = match key.code {
        KeyCode::Up | KeyCode::Char('k') => -1,
        KeyCode::Down | KeyCode::Char('j') => 1,
        KeyCode::PageUp => -PAGE_ROWS,
        KeyCode::PageDown => PAGE_ROWS,
        KeyCode::Home => isize::MIN,
        KeyCode::End => isize::MAX,
        _ => return Action::Ignore,
    };
    Action::Dispatch(Msg::ResultsScrolled(delta))
}

fn map_input_key(key: KeyEvent, view: &AppViewModel) -> Action {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return Action::Ignore;
    }
    let mut text = view.input.clone();
    match key.code {
        KeyCode::Char(c) => text.push(c),
        KeyCode::Enter => text.push('\n'),
        KeyCode::Backspace => {
            if text.pop().is_none() {
                return Action::Ignore;
            }
        }
        _ => return Action::Ignore,
    }
    Action::Dispatch(Msg::InputChanged(text))
}
