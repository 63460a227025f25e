use crate::encoding::{LineEnding, TextEncoding};

/// Answer to "Do you want to save changes?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDecision {
    Save,
    Discard,
    Cancel,
}

// The open dialog's combo lists "Auto-Detect" first, then every encoding.
pub fn open_encoding_from_index(index: u32) -> Option<TextEncoding> {
    let index = usize::try_from(index.checked_sub(1)?).ok()?;
    TextEncoding::ALL.get(index).copied()
}

pub fn encoding_index(encoding: TextEncoding) -> u32 {
    TextEncoding::ALL
        .iter()
        .position(|e| *e == encoding)
        .unwrap_or(0) as u32
}

pub fn encoding_from_index(index: u32) -> TextEncoding {
    TextEncoding::ALL
        .get(index as usize)
        .copied()
        .unwrap_or_default()
}

pub fn line_ending_index(line_ending: LineEnding) -> u32 {
    LineEnding::ALL
        .iter()
        .position(|l| *l == line_ending)
        .unwrap_or(0) as u32
}

pub fn line_ending_from_index(index: u32) -> LineEnding {
    LineEnding::ALL
        .get(index as usize)
        .copied()
        .unwrap_or_default()
}

#[cfg(windows)]
pub use win::*;

#[cfg(windows)]
mod win {
    use super::*;
    use crate::constants::*;
    use crate::error::Result;
    use crate::i18n::{format_string, get_string};
    use crate::settings::Settings;
    use crate::text_ops::to_wide;
    use std::path::{Path, PathBuf};
    use windows::Win32::System::Com::*;
    use windows::Win32::UI::Shell::Common::*;
    use windows::Win32::UI::Shell::*;
    use windows::core::*;
    use windows_sys::Win32::Foundation::HWND;
    use windows_sys::Win32::Graphics::Gdi::LOGFONTW;
    use windows_sys::Win32::UI::Controls::Dialogs::{CHOOSEFONTW, ChooseFontW};
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        IDNO, IDYES, MB_ICONERROR, MB_ICONINFORMATION, MB_ICONWARNING, MB_OK, MB_YESNOCANCEL,
        MessageBoxW,
    };

    const ENCODING_GROUP_ID: u32 = 2000;
    const ENCODING_COMBO_ID: u32 = 2001;
    const LINE_ENDING_GROUP_ID: u32 = 2002;
    const LINE_ENDING_COMBO_ID: u32 = 2003;

    // HRESULT_FROM_WIN32(ERROR_CANCELLED)
    const HRESULT_CANCELLED: i32 = 0x8007_04C7_u32 as i32;

    /// Keeps COM initialized for the lifetime of one dialog.
    struct ComGuard {
        initialized: bool,
    }

    impl ComGuard {
        fn new() -> ComGuard {
            let hr =
                unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED | COINIT_DISABLE_OLE1DDE) };
            ComGuard {
                initialized: hr.is_ok(),
            }
        }
    }

    impl Drop for ComGuard {
        fn drop(&mut self) {
            if self.initialized {
                unsafe { CoUninitialize() };
            }
        }
    }

    fn owner(hwnd: HWND) -> Option<windows::Win32::Foundation::HWND> {
        Some(windows::Win32::Foundation::HWND(hwnd))
    }

    /// `Ok(false)` when the user dismissed the dialog.
    fn shown(result: windows::core::Result<()>) -> Result<bool> {
        match result {
            Ok(()) => Ok(true),
            Err(e) if e.code().0 == HRESULT_CANCELLED => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    unsafe fn set_filters(dialog: &IFileDialog, filters: &[(&str, &str)]) -> Result<()> {
        let names: Vec<HSTRING> = filters.iter().map(|(name, _)| HSTRING::from(*name)).collect();
        let specs: Vec<HSTRING> = filters.iter().map(|(_, spec)| HSTRING::from(*spec)).collect();
        let file_types: Vec<COMDLG_FILTERSPEC> = names
            .iter()
            .zip(specs.iter())
            .map(|(name, spec)| COMDLG_FILTERSPEC {
                pszName: PCWSTR(name.as_ptr()),
                pszSpec: PCWSTR(spec.as_ptr()),
            })
            .collect();
        unsafe {
            dialog.SetFileTypes(&file_types)?;
            dialog.SetFileTypeIndex(1)?;
        }
        Ok(())
    }

    fn text_filters() -> [(String, &'static str); 2] {
        [
            (get_string("FILE_FILTER_TEXT"), "*.txt"),
            (get_string("FILE_FILTER_ALL"), "*.*"),
        ]
    }

    unsafe fn add_combo(
        customize: &IFileDialogCustomize,
        group_id: u32,
        combo_id: u32,
        label_key: &str,
        items: &[String],
        selected: u32,
    ) -> Result<()> {
        let label = HSTRING::from(get_string(label_key));
        unsafe {
            customize.StartVisualGroup(group_id, &label)?;
            customize.AddComboBox(combo_id)?;
            for (index, item) in items.iter().enumerate() {
                let item = HSTRING::from(item.as_str());
                customize.AddControlItem(combo_id, index as u32, &item)?;
            }
            customize.SetSelectedControlItem(combo_id, selected)?;
            customize.EndVisualGroup()?;
            customize.MakeProminent(group_id)?;
        }
        Ok(())
    }

    unsafe fn result_path(dialog: &IFileDialog) -> Result<PathBuf> {
        unsafe {
            let item = dialog.GetResult()?;
            let raw = item.GetDisplayName(SIGDN_FILESYSPATH)?;
            let path = raw.to_string();
            CoTaskMemFree(Some(raw.0 as _));
            path.map(PathBuf::from)
                .map_err(|e| crate::error::AppError::Dialog(e.to_string()))
        }
    }

    fn encoding_labels() -> Vec<String> {
        TextEncoding::ALL
            .iter()
            .map(|e| get_string(e.label_key()))
            .collect()
    }

    /// Shows the Open dialog. The encoding is `None` for Auto-Detect.
    pub fn open_file_dialog(hwnd: HWND) -> Result<Option<(PathBuf, Option<TextEncoding>)>> {
        let _com = ComGuard::new();
        unsafe {
            let dialog: IFileOpenDialog = CoCreateInstance(&FileOpenDialog, None, CLSCTX_ALL)?;
            dialog.SetTitle(&HSTRING::from(get_string("FILE_DIALOG_OPEN")))?;
            dialog.SetDefaultExtension(w!("txt"))?;
            let filters = text_filters();
            set_filters(&dialog, &[(&filters[0].0, filters[0].1), (&filters[1].0, filters[1].1)])?;

            let customize: IFileDialogCustomize = dialog.cast()?;
            let mut items = vec![get_string("ENCODING_AUTO")];
            items.extend(encoding_labels());
            add_combo(
                &customize,
                ENCODING_GROUP_ID,
                ENCODING_COMBO_ID,
                "FILE_ENCODING",
                &items,
                0,
            )?;

            if !shown(dialog.Show(owner(hwnd)))? {
                return Ok(None);
            }
            let encoding = customize
                .GetSelectedControlItem(ENCODING_COMBO_ID)
                .ok()
                .and_then(open_encoding_from_index);
            let path = result_path(&dialog)?;
            Ok(Some((path, encoding)))
        }
    }

    #[derive(Debug, Clone)]
    pub struct SaveChoice {
        pub path: PathBuf,
        pub encoding: TextEncoding,
        pub line_ending: LineEnding,
    }

    /// Shows Save As, preselecting the document's file name, encoding and line ending.
    pub fn save_file_dialog(
        hwnd: HWND,
        current: Option<&Path>,
        encoding: TextEncoding,
        line_ending: LineEnding,
    ) -> Result<Option<SaveChoice>> {
        let _com = ComGuard::new();
        unsafe {
            let dialog: IFileSaveDialog = CoCreateInstance(&FileSaveDialog, None, CLSCTX_ALL)?;
            dialog.SetTitle(&HSTRING::from(get_string("FILE_DIALOG_SAVE")))?;
            dialog.SetDefaultExtension(w!("txt"))?;
            let filters = text_filters();
            set_filters(&dialog, &[(&filters[0].0, filters[0].1), (&filters[1].0, filters[1].1)])?;

            let file_name = current
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("{}.txt", get_string("FILE_UNTITLED")));
            dialog.SetFileName(&HSTRING::from(file_name))?;

            let customize: IFileDialogCustomize = dialog.cast()?;
            add_combo(
                &customize,
                ENCODING_GROUP_ID,
                ENCODING_COMBO_ID,
                "FILE_ENCODING",
                &encoding_labels(),
                encoding_index(encoding),
            )?;
            let endings: Vec<String> = LineEnding::ALL
                .iter()
                .map(|l| get_string(l.label_key()))
                .collect();
            add_combo(
                &customize,
                LINE_ENDING_GROUP_ID,
                LINE_ENDING_COMBO_ID,
                "FILE_LINE_ENDING",
                &endings,
                line_ending_index(line_ending),
            )?;

            if !shown(dialog.Show(owner(hwnd)))? {
                return Ok(None);
            }
            let encoding = customize
                .GetSelectedControlItem(ENCODING_COMBO_ID)
                .map(encoding_from_index)
                .unwrap_or(encoding);
            let line_ending = customize
                .GetSelectedControlItem(LINE_ENDING_COMBO_ID)
                .map(line_ending_from_index)
                .unwrap_or(line_ending);
            let path = result_path(&dialog)?;
            Ok(Some(SaveChoice {
                path,
                encoding,
                line_ending,
            }))
        }
    }

    /// Picks an `.ico` file for the window icon.
    pub fn pick_icon_file(hwnd: HWND) -> Result<Option<PathBuf>> {
        let _com = ComGuard::new();
        unsafe {
            let dialog: IFileOpenDialog = CoCreateInstance(&FileOpenDialog, None, CLSCTX_ALL)?;
            dialog.SetTitle(&HSTRING::from(get_string("FILE_DIALOG_ICON")))?;
            let icon_filter = get_string("FILE_FILTER_ICON");
            let all_filter = get_string("FILE_FILTER_ALL");
            set_filters(&dialog, &[(&icon_filter, "*.ico"), (&all_filter, "*.*")])?;

            if !shown(dialog.Show(owner(hwnd)))? {
                return Ok(None);
            }
            Ok(Some(result_path(&dialog)?))
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct FontChoice {
        pub name: String,
        pub size: u32,
        pub weight: i32,
        pub italic: bool,
        pub underline: bool,
    }

    /// Shows ChooseFont seeded from `settings`; `dpi` converts points to pixels.
    pub fn choose_font(hwnd: HWND, settings: &Settings, dpi: u32) -> Option<FontChoice> {
        let mut logfont: LOGFONTW = unsafe { std::mem::zeroed() };
        logfont.lfHeight = -(((settings.font_size * dpi + 36) / 72) as i32);
        logfont.lfWeight = settings.font_weight;
        logfont.lfItalic = u8::from(settings.font_italic);
        logfont.lfUnderline = u8::from(settings.font_underline);
        logfont.lfCharSet = 1; // DEFAULT_CHARSET
        for (slot, unit) in logfont
            .lfFaceName
            .iter_mut()
            .zip(settings.font_name.encode_utf16().take(31))
        {
            *slot = unit;
        }

        let mut choose: CHOOSEFONTW = unsafe { std::mem::zeroed() };
        choose.lStructSize = std::mem::size_of::<CHOOSEFONTW>() as u32;
        choose.hwndOwner = hwnd;
        choose.lpLogFont = &mut logfont;
        choose.Flags = CF_SCREENFONTS | CF_INITTOLOGFONTSTRUCT | CF_EFFECTS | CF_LIMITSIZE;
        choose.nSizeMin = crate::settings::MIN_FONT_SIZE as i32;
        choose.nSizeMax = crate::settings::MAX_FONT_SIZE as i32;

        if unsafe { ChooseFontW(&mut choose) } == 0 {
            return None;
        }

        let face_len = logfont
            .lfFaceName
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(logfont.lfFaceName.len());
        Some(FontChoice {
            name: String::from_utf16_lossy(&logfont.lfFaceName[..face_len]),
            size: (choose.iPointSize.max(0) as u32 + 5) / 10,
            weight: logfont.lfWeight,
            italic: logfont.lfItalic != 0,
            underline: logfont.lfUnderline != 0,
        })
    }

    fn message_box(hwnd: HWND, text: &str, caption: &str, flags: u32) -> i32 {
        let text = to_wide(text);
        let caption = to_wide(caption);
        unsafe { MessageBoxW(hwnd, text.as_ptr(), caption.as_ptr(), flags) }
    }

    pub fn confirm_save(hwnd: HWND, name: &str) -> SaveDecision {
        let text = format_string("MSG_SAVE_CHANGES", &[("name", name)]);
        match message_box(
            hwnd,
            &text,
            &get_string("APP_NAME"),
            MB_YESNOCANCEL | MB_ICONWARNING,
        ) {
            IDYES => SaveDecision::Save,
            IDNO => SaveDecision::Discard,
            _ => SaveDecision::Cancel,
        }
    }

    pub fn show_error(hwnd: HWND, text: &str) {
        message_box(hwnd, text, &get_string("MSG_ERROR"), MB_OK | MB_ICONERROR);
    }

    pub fn show_info(hwnd: HWND, text: &str) {
        message_box(
            hwnd,
            text,
            &get_string("APP_NAME"),
            MB_OK | MB_ICONINFORMATION,
        );
    }

    pub fn show_about(hwnd: HWND) {
        let text = format_string("MSG_ABOUT", &[("version", env!("CARGO_PKG_VERSION"))]);
        message_box(
            hwnd,
            &text,
            &get_string("MSG_ABOUT_TITLE"),
            MB_OK | MB_ICONINFORMATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_combo_starts_with_auto() {
        assert_eq!(open_encoding_from_index(0), None);
        assert_eq!(open_encoding_from_index(1), Some(TextEncoding::ALL[0]));
        assert_eq!(
            open_encoding_from_index(TextEncoding::ALL.len() as u32),
            TextEncoding::ALL.last().copied()
        );
        assert_eq!(open_encoding_from_index(99), None);
    }

    #[test]
    fn test_save_combo_indices_match_lists() {
        for encoding in TextEncoding::ALL {
            assert_eq!(encoding_from_index(encoding_index(encoding)), encoding);
        }
        for ending in LineEnding::ALL {
            assert_eq!(line_ending_from_index(line_ending_index(ending)), ending);
        }
    }

    #[test]
    fn test_out_of_range_index_falls_back_to_default() {
        assert_eq!(encoding_from_index(42), TextEncoding::Utf8);
        assert_eq!(line_ending_from_index(42), LineEnding::Crlf);
    }
}
