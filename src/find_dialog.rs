use crate::constants::{
    FR_DIALOGTERM, FR_DOWN, FR_FINDNEXT, FR_MATCHCASE, FR_REPLACE, FR_REPLACEALL,
};
use crate::search::Direction;

/// What the user last searched for; F3 / Shift+F3 repeat it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FindQuery {
    pub needle: String,
    pub replacement: String,
    pub match_case: bool,
    pub direction: Direction,
}

impl FindQuery {
    /// F3 / Shift+F3 do nothing until something has been searched for.
    pub fn has_needle(&self) -> bool {
        !self.needle.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindEvent {
    Closed,
    FindNext(FindQuery),
    Replace(FindQuery),
    ReplaceAll(FindQuery),
}

/// Decodes `FINDREPLACEW::Flags` into an event.
pub fn event_from_flags(flags: u32, needle: String, replacement: String) -> Option<FindEvent> {
    if flags & FR_DIALOGTERM != 0 {
        return Some(FindEvent::Closed);
    }
    let query = FindQuery {
        needle,
        replacement,
        match_case: flags & FR_MATCHCASE != 0,
        direction: if flags & FR_DOWN != 0 {
            Direction::Forward
        } else {
            Direction::Backward
        },
    };
    if flags & FR_REPLACEALL != 0 {
        Some(FindEvent::ReplaceAll(query))
    } else if flags & FR_REPLACE != 0 {
        Some(FindEvent::Replace(query))
    } else if flags & FR_FINDNEXT != 0 {
        Some(FindEvent::FindNext(query))
    } else {
        None
    }
}

#[cfg(windows)]
pub use win::*;

#[cfg(windows)]
mod win {
    use super::{FindEvent, event_from_flags};
    use crate::constants::{FR_DOWN, FR_HIDEWHOLEWORD, FR_MATCHCASE};
    use crate::text_ops::to_wide;
    use std::cell::RefCell;
    use std::sync::OnceLock;
    use std::sync::atomic::{AtomicBool, AtomicIsize, Ordering};
    use windows_sys::Win32::Foundation::{HWND, LPARAM};
    use windows_sys::Win32::UI::Controls::Dialogs::{FINDREPLACEW, FindTextW, ReplaceTextW};
    use windows_sys::Win32::UI::Input::KeyboardAndMouse::SetFocus;
    use windows_sys::Win32::UI::WindowsAndMessaging::{DestroyWindow, RegisterWindowMessageW};

    const BUFFER_LEN: usize = 256;

    static DIALOG: AtomicIsize = AtomicIsize::new(0);
    static IS_REPLACE: AtomicBool = AtomicBool::new(false);
    static FIND_MESSAGE: OnceLock<u32> = OnceLock::new();

    // FINDREPLACEW points into these buffers for as long as the dialog lives
    struct DialogData {
        fr: FINDREPLACEW,
        find_what: [u16; BUFFER_LEN],
        replace_with: [u16; BUFFER_LEN],
    }

    thread_local! {
        static DATA: RefCell<Option<Box<DialogData>>> = const { RefCell::new(None) };
    }

    fn fill(buffer: &mut [u16; BUFFER_LEN], text: &str) {
        buffer.fill(0);
        for (slot, unit) in buffer.iter_mut().zip(text.encode_utf16().take(BUFFER_LEN - 1)) {
            *slot = unit;
        }
    }

    fn read(buffer: *const u16) -> String {
        if buffer.is_null() {
            return String::new();
        }
        let units = unsafe { std::slice::from_raw_parts(buffer, BUFFER_LEN) };
        let len = units.iter().position(|&c| c == 0).unwrap_or(BUFFER_LEN);
        String::from_utf16_lossy(&units[..len])
    }

    pub fn find_message() -> u32 {
        *FIND_MESSAGE.get_or_init(|| {
            let name = to_wide("commdlg_FindReplace");
            unsafe { RegisterWindowMessageW(name.as_ptr()) }
        })
    }

    /// The open dialog, or null. The message loop routes input to it.
    pub fn dialog_hwnd() -> HWND {
        DIALOG.load(Ordering::Relaxed) as HWND
    }

    /// Opens the Find (or Replace) dialog, or focuses it if already open.
    pub fn show(owner: HWND, replace: bool, initial: &str, match_case: bool) {
        let current = dialog_hwnd();
        if !current.is_null() {
            if IS_REPLACE.load(Ordering::Relaxed) == replace {
                unsafe {
                    SetFocus(current);
                }
                return;
            }
            unsafe {
                DestroyWindow(current);
            }
            DIALOG.store(0, Ordering::Relaxed);
        }

        DATA.with(|cell| {
            let mut slot = cell.borrow_mut();
            let data = slot.get_or_insert_with(|| {
                Box::new(DialogData {
                    fr: unsafe { std::mem::zeroed() },
                    find_what: [0; BUFFER_LEN],
                    replace_with: [0; BUFFER_LEN],
                })
            });
            if !initial.is_empty() {
                fill(&mut data.find_what, initial);
            }

            let mut flags = FR_DOWN | FR_HIDEWHOLEWORD;
            if match_case {
                flags |= FR_MATCHCASE;
            }
            data.fr = unsafe { std::mem::zeroed() };
            data.fr.lStructSize = std::mem::size_of::<FINDREPLACEW>() as u32;
            data.fr.hwndOwner = owner;
            data.fr.Flags = flags;
            data.fr.lpstrFindWhat = data.find_what.as_mut_ptr();
            data.fr.lpstrReplaceWith = data.replace_with.as_mut_ptr();
            data.fr.wFindWhatLen = BUFFER_LEN as u16;
            data.fr.wReplaceWithLen = BUFFER_LEN as u16;

            let hwnd = unsafe {
                if replace {
                    ReplaceTextW(&mut data.fr)
                } else {
                    FindTextW(&mut data.fr)
                }
            };
            if hwnd.is_null() {
                tracing::warn!(replace, "find dialog could not be created");
                return;
            }
            DIALOG.store(hwnd as isize, Ordering::Relaxed);
            IS_REPLACE.store(replace, Ordering::Relaxed);
        });
    }

    /// Decodes the registered find message.
    pub fn read_event(lparam: LPARAM) -> Option<FindEvent> {
        let fr = lparam as *const FINDREPLACEW;
        if fr.is_null() {
            return None;
        }
        let (flags, needle, replacement) = unsafe {
            (
                (*fr).Flags,
                read((*fr).lpstrFindWhat),
                read((*fr).lpstrReplaceWith),
            )
        };
        let event = event_from_flags(flags, needle, replacement);
        if event == Some(FindEvent::Closed) {
            DIALOG.store(0, Ordering::Relaxed);
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(event: Option<FindEvent>) -> FindQuery {
        match event {
            Some(FindEvent::FindNext(q) | FindEvent::Replace(q) | FindEvent::ReplaceAll(q)) => q,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_dialog_term_wins() {
        let event = event_from_flags(
            FR_DIALOGTERM | FR_FINDNEXT,
            "x".into(),
            String::new(),
        );
        assert_eq!(event, Some(FindEvent::Closed));
    }

    #[test]
    fn test_find_next_reads_direction_and_case() {
        let q = query(event_from_flags(
            FR_FINDNEXT | FR_DOWN | FR_MATCHCASE,
            "Foo".into(),
            String::new(),
        ));
        assert_eq!(q.needle, "Foo");
        assert!(q.match_case);
        assert_eq!(q.direction, Direction::Forward);

        let q = query(event_from_flags(FR_FINDNEXT, "Foo".into(), String::new()));
        assert!(!q.match_case);
        assert_eq!(q.direction, Direction::Backward);
    }

    #[test]
    fn test_replace_variants() {
        assert!(matches!(
            event_from_flags(FR_REPLACE | FR_DOWN, "a".into(), "b".into()),
            Some(FindEvent::Replace(FindQuery { ref replacement, .. })) if replacement == "b"
        ));
        assert!(matches!(
            event_from_flags(FR_REPLACEALL | FR_DOWN, "a".into(), "b".into()),
            Some(FindEvent::ReplaceAll(_))
        ));
    }

    #[test]
    fn test_repeat_needs_a_previous_needle() {
        assert!(!FindQuery::default().has_needle());
        let q = query(event_from_flags(FR_FINDNEXT | FR_DOWN, "x".into(), String::new()));
        assert!(q.has_needle());
    }

    #[test]
    fn test_no_action_flags() {
        assert_eq!(event_from_flags(FR_DOWN, "a".into(), String::new()), None);
    }
}
