// src/app/navigation_helpers.rs
use ratatui::widgets::ListState;

/// Next position in a wrapping list of `len` items.
pub fn wrap_next(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(i) if i + 1 >= len => 0,
        Some(i) => i + 1,
        None => 0,
    })
}

pub fn wrap_previous(current: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match current {
        Some(0) | None => len - 1,
        Some(i) => i - 1,
    })
}

pub fn list_next(state: &mut ListState, list_len: usize) {
    if let Some(i) = wrap_next(state.selected(), list_len) {
        state.select(Some(i));
    }
}

pub fn list_previous(state: &mut ListState, list_len: usize) {
    if let Some(i) = wrap_previous(state.selected(), list_len) {
        state.select(Some(i));
    }
}
