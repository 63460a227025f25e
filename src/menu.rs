use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item(u16, &'static str),
    Separator,
    /// The "Recent Files" submenu, filled from the MRU list.
    Recent,
}

#[derive(Debug)]
pub struct Popup {
    pub title_key: &'static str,
    pub entries: &'static [MenuEntry],
}

use MenuEntry::{Item, Recent, Separator};

pub const MENU_LAYOUT: &[Popup] = &[
    Popup {
        title_key: "MENU_FILE",
        entries: &[
            Item(ID_FILE_NEW, "MENU_NEW"),
            Item(ID_FILE_OPEN, "MENU_OPEN"),
            Item(ID_FILE_SAVE, "MENU_SAVE"),
            Item(ID_FILE_SAVEAS, "MENU_SAVEAS"),
            Separator,
            Recent,
            Separator,
            Item(ID_FILE_EXIT, "MENU_EXIT"),
        ],
    },
    Popup {
        title_key: "MENU_EDIT",
        entries: &[
            Item(ID_EDIT_UNDO, "MENU_UNDO"),
            Item(ID_EDIT_REDO, "MENU_REDO"),
            Separator,
            Item(ID_EDIT_CUT, "MENU_CUT"),
            Item(ID_EDIT_COPY, "MENU_COPY"),
            Item(ID_EDIT_PASTE, "MENU_PASTE"),
            Item(ID_EDIT_DELETE, "MENU_DELETE"),
            Separator,
            Item(ID_EDIT_FIND, "MENU_FIND"),
            Item(ID_EDIT_FINDNEXT, "MENU_FINDNEXT"),
            Item(ID_EDIT_FINDPREV, "MENU_FINDPREV"),
            Item(ID_EDIT_REPLACE, "MENU_REPLACE"),
            Item(ID_EDIT_GOTO, "MENU_GOTO"),
            Separator,
            Item(ID_EDIT_SELECTALL, "MENU_SELECTALL"),
            Item(ID_EDIT_TIMEDATE, "MENU_TIMEDATE"),
        ],
    },
    Popup {
        title_key: "MENU_FORMAT",
        entries: &[
            Item(ID_FORMAT_WORDWRAP, "MENU_WORDWRAP"),
            Item(ID_FORMAT_FONT, "MENU_FONT"),
        ],
    },
    Popup {
        title_key: "MENU_VIEW",
        entries: &[
            Item(ID_VIEW_ZOOMIN, "MENU_ZOOMIN"),
            Item(ID_VIEW_ZOOMOUT, "MENU_ZOOMOUT"),
            Item(ID_VIEW_ZOOMDEFAULT, "MENU_ZOOMDEFAULT"),
            Separator,
            Item(ID_VIEW_STATUSBAR, "MENU_STATUSBAR"),
            Item(ID_VIEW_ALWAYSONTOP, "MENU_ALWAYSONTOP"),
            Item(ID_VIEW_TRANSPARENCY, "MENU_TRANSPARENCY"),
            Separator,
            Item(ID_VIEW_CHANGEICON, "MENU_CHANGEICON"),
            Item(ID_VIEW_RESETICON, "MENU_RESETICON"),
        ],
    },
    Popup {
        title_key: "MENU_LANGUAGE",
        entries: &[
            Item(ID_LANG_ENGLISH, "MENU_LANG_EN"),
            Item(ID_LANG_JAPANESE, "MENU_LANG_JA"),
        ],
    },
    Popup {
        title_key: "MENU_HELP",
        entries: &[Item(ID_HELP_ABOUT, "MENU_ABOUT")],
    },
];

#[cfg(windows)]
pub use win::*;

#[cfg(windows)]
mod win {
    use super::{MENU_LAYOUT, MenuEntry};
    use crate::constants::*;
    use crate::i18n::{Language, get_string};
    use crate::settings::Settings;
    use crate::text_ops::to_wide;
    use windows_sys::Win32::Foundation::HWND;
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        ACCEL, AppendMenuW, CheckMenuItem, CreateAcceleratorTableW, CreateMenu,
        CreatePopupMenu, DestroyMenu, DrawMenuBar, EnableMenuItem, GetMenu, HACCEL, HMENU,
        MF_BYCOMMAND, MF_CHECKED, MF_ENABLED, MF_GRAYED, MF_POPUP, MF_SEPARATOR, MF_STRING,
        MF_UNCHECKED, SetMenu,
    };

    unsafe fn append(hmenu: HMENU, flags: u32, id: usize, label: &str) {
        let label = to_wide(label);
        unsafe {
            AppendMenuW(hmenu, flags, id, label.as_ptr());
        }
    }

    unsafe fn build_recent_menu(recent_labels: &[String]) -> HMENU {
        unsafe {
            let popup = CreatePopupMenu();
            for (index, label) in recent_labels.iter().enumerate() {
                // "&1 notes.txt" style mnemonics for the first nine entries
                let caption = if index < 9 {
                    format!("&{} {}", index + 1, label)
                } else {
                    format!("1&0 {}", label)
                };
                append(
                    popup,
                    MF_STRING,
                    usize::from(ID_FILE_RECENT_BASE) + index,
                    &caption,
                );
            }
            popup
        }
    }

    /// Builds the menu bar in the current language.
    pub fn build_menu_bar(settings: &Settings, language: Language) -> HMENU {
        unsafe {
            let bar = CreateMenu();
            if bar.is_null() {
                return bar;
            }
            let recent_labels = settings.recent_files.menu_labels();

            for popup in MENU_LAYOUT {
                let submenu = CreatePopupMenu();
                for entry in popup.entries {
                    match *entry {
                        MenuEntry::Item(id, key) => {
                            append(submenu, MF_STRING, usize::from(id), &get_string(key))
                        }
                        MenuEntry::Separator => {
                            AppendMenuW(submenu, MF_SEPARATOR, 0, std::ptr::null());
                        }
                        MenuEntry::Recent => {
                            let recent = build_recent_menu(&recent_labels);
                            let flags = if recent_labels.is_empty() {
                                MF_POPUP | MF_STRING | MF_GRAYED
                            } else {
                                MF_POPUP | MF_STRING
                            };
                            append(submenu, flags, recent as usize, &get_string("MENU_RECENT"));
                        }
                    }
                }
                append(bar, MF_POPUP | MF_STRING, submenu as usize, &get_string(popup.title_key));
            }

            update_checks(bar, settings, language);
            bar
        }
    }

    /// Replaces the window's menu, e.g. after a language switch or MRU change.
    pub fn rebuild_menu(hwnd: HWND, settings: &Settings, language: Language) {
        unsafe {
            let old = GetMenu(hwnd);
            let bar = build_menu_bar(settings, language);
            SetMenu(hwnd, bar);
            if !old.is_null() {
                DestroyMenu(old);
            }
            DrawMenuBar(hwnd);
        }
    }

    fn check(hmenu: HMENU, id: u16, checked: bool) {
        let state = if checked { MF_CHECKED } else { MF_UNCHECKED };
        unsafe {
            CheckMenuItem(hmenu, u32::from(id), MF_BYCOMMAND | state);
        }
    }

    pub fn update_checks(hmenu: HMENU, settings: &Settings, language: Language) {
        check(hmenu, ID_FORMAT_WORDWRAP, settings.word_wrap);
        check(hmenu, ID_VIEW_STATUSBAR, settings.show_status_bar);
        check(hmenu, ID_VIEW_ALWAYSONTOP, settings.always_on_top);
        check(hmenu, ID_LANG_ENGLISH, language == Language::English);
        check(hmenu, ID_LANG_JAPANESE, language == Language::Japanese);
    }

    pub fn set_enabled(hmenu: HMENU, id: u16, enabled: bool) {
        let state = if enabled { MF_ENABLED } else { MF_GRAYED };
        unsafe {
            EnableMenuItem(hmenu, u32::from(id), MF_BYCOMMAND | state);
        }
    }

    pub fn create_accelerators() -> HACCEL {
        let table: Vec<ACCEL> = crate::commands::ACCELERATORS
            .iter()
            .map(|&(virt, key, cmd)| ACCEL {
                fVirt: virt,
                key,
                cmd,
            })
            .collect();
        unsafe { CreateAcceleratorTableW(table.as_ptr(), table.len() as i32) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;
    use crate::i18n::{Language, lookup};

    fn items() -> impl Iterator<Item = (u16, &'static str)> {
        MENU_LAYOUT.iter().flat_map(|p| p.entries.iter()).filter_map(|e| match *e {
            MenuEntry::Item(id, key) => Some((id, key)),
            _ => None,
        })
    }

    #[test]
    fn test_every_menu_item_is_a_command() {
        for (id, _) in items() {
            assert!(Command::from_id(id).is_some(), "menu id {id}");
        }
    }

    #[test]
    fn test_every_label_is_translated() {
        let keys = items()
            .map(|(_, key)| key)
            .chain(MENU_LAYOUT.iter().map(|p| p.title_key))
            .chain(["MENU_RECENT"]);
        for key in keys {
            assert!(!lookup(Language::English, key).is_empty(), "en {key}");
            assert!(!lookup(Language::Japanese, key).is_empty(), "ja {key}");
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<u16> = items().map(|(id, _)| id).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_file_menu_has_recent_submenu() {
        assert!(MENU_LAYOUT[0].entries.contains(&MenuEntry::Recent));
    }
}
