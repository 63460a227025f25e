use crate::constants::{
    ID_EDIT_COPY, ID_EDIT_CUT, ID_EDIT_DELETE, ID_EDIT_PASTE, ID_EDIT_SELECTALL, ID_EDIT_UNDO,
};

/// Right-click menu entries; `None` is a separator.
pub const CONTEXT_ITEMS: &[Option<(u16, &str)>] = &[
    Some((ID_EDIT_UNDO, "CONTEXT_UNDO")),
    None,
    Some((ID_EDIT_CUT, "CONTEXT_CUT")),
    Some((ID_EDIT_COPY, "CONTEXT_COPY")),
    Some((ID_EDIT_PASTE, "CONTEXT_PASTE")),
    Some((ID_EDIT_DELETE, "CONTEXT_DELETE")),
    None,
    Some((ID_EDIT_SELECTALL, "CONTEXT_SELECTALL")),
];

/// Whether a context menu item is usable for the current editor state.
pub fn item_enabled(id: u16, can_undo: bool, has_selection: bool) -> bool {
    match id {
        ID_EDIT_UNDO => can_undo,
        ID_EDIT_CUT | ID_EDIT_COPY | ID_EDIT_DELETE => has_selection,
        _ => true,
    }
}

#[cfg(windows)]
pub use win::show_context_menu;

#[cfg(windows)]
mod win {
    use super::{CONTEXT_ITEMS, item_enabled};
    use crate::i18n::get_string;
    use crate::text_ops::to_wide;
    use windows_sys::Win32::Foundation::HWND;
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        AppendMenuW, CreatePopupMenu, DestroyMenu, MF_GRAYED, MF_SEPARATOR, MF_STRING,
        TPM_RIGHTBUTTON, TrackPopupMenu,
    };

    /// Shows the editor context menu at screen position `(x, y)`.
    /// The chosen command arrives at `hwnd` as a regular `WM_COMMAND`.
    pub fn show_context_menu(hwnd: HWND, x: i32, y: i32, can_undo: bool, has_selection: bool) {
        unsafe {
            let hmenu = CreatePopupMenu();
            if hmenu.is_null() {
                return;
            }

            for item in CONTEXT_ITEMS {
                match item {
                    Some((id, key)) => {
                        let label = to_wide(&get_string(key));
                        let mut flags = MF_STRING;
                        if !item_enabled(*id, can_undo, has_selection) {
                            flags |= MF_GRAYED;
                        }
                        AppendMenuW(hmenu, flags, usize::from(*id), label.as_ptr());
                    }
                    None => {
                        AppendMenuW(hmenu, MF_SEPARATOR, 0, std::ptr::null());
                    }
                }
            }

            TrackPopupMenu(hmenu, TPM_RIGHTBUTTON, x, y, 0, hwnd, std::ptr::null());
            DestroyMenu(hmenu);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, lookup};

    #[test]
    fn test_selection_gates_clipboard_items() {
        assert!(!item_enabled(ID_EDIT_CUT, true, false));
        assert!(!item_enabled(ID_EDIT_COPY, true, false));
        assert!(!item_enabled(ID_EDIT_DELETE, true, false));
        assert!(item_enabled(ID_EDIT_COPY, false, true));
        assert!(item_enabled(ID_EDIT_PASTE, false, false));
    }

    #[test]
    fn test_undo_follows_undo_state() {
        assert!(!item_enabled(ID_EDIT_UNDO, false, true));
        assert!(item_enabled(ID_EDIT_UNDO, true, false));
    }

    #[test]
    fn test_items_are_translated() {
        for (_, key) in CONTEXT_ITEMS.iter().flatten() {
            assert!(!lookup(Language::English, key).is_empty());
            assert!(!lookup(Language::Japanese, key).is_empty());
        }
    }
}
