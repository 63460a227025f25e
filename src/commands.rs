use crate::constants::*;
use crate::recent_files::MAX_RECENT_FILES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    FileNew,
    FileOpen,
    FileSave,
    FileSaveAs,
    FileRecent(usize),
    FileExit,
    EditUndo,
    EditRedo,
    EditCut,
    EditCopy,
    EditPaste,
    EditDelete,
    EditFind,
    EditFindNext,
    EditFindPrevious,
    EditReplace,
    EditGoTo,
    EditSelectAll,
    EditTimeDate,
    FormatWordWrap,
    FormatFont,
    ViewZoomIn,
    ViewZoomOut,
    ViewZoomDefault,
    ViewStatusBar,
    ViewAlwaysOnTop,
    ViewTransparency,
    ViewChangeIcon,
    ViewResetIcon,
    LanguageEnglish,
    LanguageJapanese,
    HelpAbout,
}

impl Command {
    pub fn from_id(id: u16) -> Option<Command> {
        let command = match id {
            ID_FILE_NEW => Command::FileNew,
            ID_FILE_OPEN => Command::FileOpen,
            ID_FILE_SAVE => Command::FileSave,
            ID_FILE_SAVEAS => Command::FileSaveAs,
            ID_FILE_EXIT => Command::FileExit,
            ID_EDIT_UNDO => Command::EditUndo,
            ID_EDIT_REDO => Command::EditRedo,
            ID_EDIT_CUT => Command::EditCut,
            ID_EDIT_COPY => Command::EditCopy,
            ID_EDIT_PASTE => Command::EditPaste,
            ID_EDIT_DELETE => Command::EditDelete,
            ID_EDIT_FIND => Command::EditFind,
            ID_EDIT_FINDNEXT => Command::EditFindNext,
            ID_EDIT_FINDPREV => Command::EditFindPrevious,
            ID_EDIT_REPLACE => Command::EditReplace,
            ID_EDIT_GOTO => Command::EditGoTo,
            ID_EDIT_SELECTALL => Command::EditSelectAll,
            ID_EDIT_TIMEDATE => Command::EditTimeDate,
            ID_FORMAT_WORDWRAP => Command::FormatWordWrap,
            ID_FORMAT_FONT => Command::FormatFont,
            ID_VIEW_ZOOMIN => Command::ViewZoomIn,
            ID_VIEW_ZOOMOUT => Command::ViewZoomOut,
            ID_VIEW_ZOOMDEFAULT => Command::ViewZoomDefault,
            ID_VIEW_STATUSBAR => Command::ViewStatusBar,
            ID_VIEW_ALWAYSONTOP => Command::ViewAlwaysOnTop,
            ID_VIEW_TRANSPARENCY => Command::ViewTransparency,
            ID_VIEW_CHANGEICON => Command::ViewChangeIcon,
            ID_VIEW_RESETICON => Command::ViewResetIcon,
            ID_LANG_ENGLISH => Command::LanguageEnglish,
            ID_LANG_JAPANESE => Command::LanguageJapanese,
            ID_HELP_ABOUT => Command::HelpAbout,
            id if (ID_FILE_RECENT_BASE..ID_FILE_RECENT_BASE + MAX_RECENT_FILES as u16)
                .contains(&id) =>
            {
                Command::FileRecent(usize::from(id - ID_FILE_RECENT_BASE))
            }
            _ => return None,
        };
        Some(command)
    }

    pub fn id(self) -> u16 {
        match self {
            Command::FileNew => ID_FILE_NEW,
            Command::FileOpen => ID_FILE_OPEN,
            Command::FileSave => ID_FILE_SAVE,
            Command::FileSaveAs => ID_FILE_SAVEAS,
            Command::FileRecent(index) => ID_FILE_RECENT_BASE + index as u16,
            Command::FileExit => ID_FILE_EXIT,
            Command::EditUndo => ID_EDIT_UNDO,
            Command::EditRedo => ID_EDIT_REDO,
            Command::EditCut => ID_EDIT_CUT,
            Command::EditCopy => ID_EDIT_COPY,
            Command::EditPaste => ID_EDIT_PASTE,
            Command::EditDelete => ID_EDIT_DELETE,
            Command::EditFind => ID_EDIT_FIND,
            Command::EditFindNext => ID_EDIT_FINDNEXT,
            Command::EditFindPrevious => ID_EDIT_FINDPREV,
            Command::EditReplace => ID_EDIT_REPLACE,
            Command::EditGoTo => ID_EDIT_GOTO,
            Command::EditSelectAll => ID_EDIT_SELECTALL,
            Command::EditTimeDate => ID_EDIT_TIMEDATE,
            Command::FormatWordWrap => ID_FORMAT_WORDWRAP,
            Command::FormatFont => ID_FORMAT_FONT,
            Command::ViewZoomIn => ID_VIEW_ZOOMIN,
            Command::ViewZoomOut => ID_VIEW_ZOOMOUT,
            Command::ViewZoomDefault => ID_VIEW_ZOOMDEFAULT,
            Command::ViewStatusBar => ID_VIEW_STATUSBAR,
            Command::ViewAlwaysOnTop => ID_VIEW_ALWAYSONTOP,
            Command::ViewTransparency => ID_VIEW_TRANSPARENCY,
            Command::ViewChangeIcon => ID_VIEW_CHANGEICON,
            Command::ViewResetIcon => ID_VIEW_RESETICON,
            Command::LanguageEnglish => ID_LANG_ENGLISH,
            Command::LanguageJapanese => ID_LANG_JAPANESE,
            Command::HelpAbout => ID_HELP_ABOUT,
        }
    }
}

/// Keyboard shortcuts as `(fVirt, key, command id)` for `CreateAcceleratorTableW`.
pub const ACCELERATORS: &[(u8, u16, u16)] = &[
    (FVIRTKEY | FCONTROL, b'N' as u16, ID_FILE_NEW),
    (FVIRTKEY | FCONTROL, b'O' as u16, ID_FILE_OPEN),
    (FVIRTKEY | FCONTROL, b'S' as u16, ID_FILE_SAVE),
    (FVIRTKEY | FCONTROL | FSHIFT, b'S' as u16, ID_FILE_SAVEAS),
    (FVIRTKEY | FCONTROL, b'F' as u16, ID_EDIT_FIND),
    (FVIRTKEY, VK_F3, ID_EDIT_FINDNEXT),
    (FVIRTKEY | FSHIFT, VK_F3, ID_EDIT_FINDPREV),
    (FVIRTKEY | FCONTROL, b'H' as u16, ID_EDIT_REPLACE),
    (FVIRTKEY | FCONTROL, b'G' as u16, ID_EDIT_GOTO),
    (FVIRTKEY, VK_F5, ID_EDIT_TIMEDATE),
    (FVIRTKEY | FCONTROL, b'Y' as u16, ID_EDIT_REDO),
    (FVIRTKEY | FCONTROL, VK_OEM_PLUS, ID_VIEW_ZOOMIN),
    (FVIRTKEY | FCONTROL, VK_ADD, ID_VIEW_ZOOMIN),
    (FVIRTKEY | FCONTROL, VK_OEM_MINUS, ID_VIEW_ZOOMOUT),
    (FVIRTKEY | FCONTROL, VK_SUBTRACT, ID_VIEW_ZOOMOUT),
    (FVIRTKEY | FCONTROL, b'0' as u16, ID_VIEW_ZOOMDEFAULT),
    (FVIRTKEY | FCONTROL, VK_NUMPAD0, ID_VIEW_ZOOMDEFAULT),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_command_roundtrips_through_its_id() {
        let all = [
            Command::FileNew,
            Command::FileOpen,
            Command::FileSave,
            Command::FileSaveAs,
            Command::FileExit,
            Command::EditUndo,
            Command::EditRedo,
            Command::EditCut,
            Command::EditCopy,
            Command::EditPaste,
            Command::EditDelete,
            Command::EditFind,
            Command::EditFindNext,
            Command::EditFindPrevious,
            Command::EditReplace,
            Command::EditGoTo,
            Command::EditSelectAll,
            Command::EditTimeDate,
            Command::FormatWordWrap,
            Command::FormatFont,
            Command::ViewZoomIn,
            Command::ViewZoomOut,
            Command::ViewZoomDefault,
            Command::ViewStatusBar,
            Command::ViewAlwaysOnTop,
            Command::ViewTransparency,
            Command::ViewChangeIcon,
            Command::ViewResetIcon,
            Command::LanguageEnglish,
            Command::LanguageJapanese,
            Command::HelpAbout,
        ];
        for command in all {
            assert_eq!(Command::from_id(command.id()), Some(command));
        }
    }

    #[test]
    fn test_recent_file_ids() {
        assert_eq!(
            Command::from_id(ID_FILE_RECENT_BASE),
            Some(Command::FileRecent(0))
        );
        assert_eq!(
            Command::from_id(ID_FILE_RECENT_BASE + 9),
            Some(Command::FileRecent(9))
        );
        assert_eq!(Command::from_id(ID_FILE_RECENT_BASE + 10), None);
        assert_eq!(Command::FileRecent(3).id(), ID_FILE_RECENT_BASE + 3);
    }

    #[test]
    fn test_unknown_id() {
        assert_eq!(Command::from_id(0), None);
        assert_eq!(Command::from_id(9999), None);
    }

    #[test]
    fn test_accelerators_map_to_commands() {
        for &(_, _, id) in ACCELERATORS {
            assert!(Command::from_id(id).is_some(), "accelerator id {id}");
        }
        assert!(ACCELERATORS.contains(&(FVIRTKEY | FSHIFT, VK_F3, ID_EDIT_FINDPREV)));
    }
}
