use crate::constants::*;
use crate::error::{AppError, Result};
use crate::settings::Settings;
use crate::text_ops::{to_wide, word_end_after, word_start_before};
use crate::zoom;
use std::sync::atomic::{AtomicBool, AtomicIsize, Ordering};
use windows_sys::Win32::Foundation::{GetLastError, HWND, LPARAM, LRESULT, WPARAM};
use windows_sys::Win32::Graphics::Gdi::{CreateFontIndirectW, DeleteObject, LOGFONTW};
use windows_sys::Win32::System::LibraryLoader::{GetModuleHandleW, LoadLibraryW};
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{GetKeyState, SetFocus};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CallWindowProcW, CreateWindowExW, GWLP_WNDPROC, GetParent, MoveWindow, SendMessageW,
    SetWindowLongPtrW, WM_CHAR, WM_CLEAR, WM_COPY, WM_CUT, WM_KEYDOWN, WM_MOUSEWHEEL, WM_PASTE,
    WM_SETFONT, WM_SETTEXT, WNDPROC, WS_CHILD, WS_HSCROLL, WS_VISIBLE, WS_VSCROLL,
};

static ORIGINAL_PROC: AtomicIsize = AtomicIsize::new(0);
static CURRENT_FONT: AtomicIsize = AtomicIsize::new(0);
static SUPPRESS_CHANGE: AtomicBool = AtomicBool::new(false);

#[repr(C)]
#[allow(non_snake_case)]
struct CHARRANGE {
    cpMin: i32,
    cpMax: i32,
}

#[repr(C)]
#[allow(non_snake_case)]
struct GETTEXTLENGTHEX {
    flags: u32,
    codepage: u32,
}

#[repr(C)]
#[allow(non_snake_case)]
struct GETTEXTEX {
    cb: u32,
    flags: u32,
    codepage: u32,
    lpDefaultChar: *const u8,
    lpUsedDefChar: *mut i32,
}

#[repr(C)]
#[allow(non_snake_case)]
struct CHARFORMAT2W {
    cbSize: u32,
    dwMask: u32,
    dwEffects: u32,
    yHeight: i32,
    yOffset: i32,
    crTextColor: u32,
    bCharSet: u8,
    bPitchAndFamily: u8,
    szFaceName: [u16; 32],
    wWeight: u16,
    sSpacing: i16,
    crBackColor: u32,
    lcid: u32,
    dwCookie: u32,
    sStyle: i16,
    wKerning: u16,
    bUnderlineType: u8,
    bAnimation: u8,
    bRevAuthor: u8,
    bUnderlineColor: u8,
}

fn face_name(name: &str) -> [u16; 32] {
    let mut face = [0u16; 32];
    for (slot, unit) in face.iter_mut().zip(name.encode_utf16().take(31)) {
        *slot = unit;
    }
    face
}

fn ctrl_down() -> bool {
    unsafe { GetKeyState(VK_CONTROL) < 0 }
}

/// True while the editor is being filled programmatically; change
/// notifications raised meanwhile are not user edits.
pub fn change_suppressed() -> bool {
    SUPPRESS_CHANGE.load(Ordering::Relaxed)
}

/// Loads `Msftedit.dll`, which registers the `RICHEDIT50W` class.
pub fn load_richedit() -> Result<()> {
    let lib = to_wide("Msftedit.dll");
    let module = unsafe { LoadLibraryW(lib.as_ptr()) };
    if module.is_null() {
        return Err(AppError::Win32 {
            function: "LoadLibraryW",
            code: unsafe { GetLastError() },
        });
    }
    Ok(())
}

/// The RichEdit 5.0 control. Offsets are UTF-16 code units and paragraph
/// breaks read back as a single `\r`.
#[derive(Debug, Clone, Copy)]
pub struct Editor {
    hwnd: isize,
}

impl Editor {
    pub fn create(parent: HWND) -> Result<Editor> {
        let class = to_wide("RICHEDIT50W");
        let hwnd = unsafe {
            CreateWindowExW(
                0,
                class.as_ptr(),
                std::ptr::null(),
                WS_CHILD
                    | WS_VISIBLE
                    | WS_VSCROLL
                    | WS_HSCROLL
                    | ES_MULTILINE
                    | ES_AUTOVSCROLL
                    | ES_AUTOHSCROLL
                    | ES_NOHIDESEL
                    | ES_WANTRETURN,
                0,
                0,
                0,
                0,
                parent,
                usize::from(IDC_EDITOR) as _,
                GetModuleHandleW(std::ptr::null()),
                std::ptr::null(),
            )
        };
        if hwnd.is_null() {
            return Err(AppError::Win32 {
                function: "CreateWindowExW",
                code: unsafe { GetLastError() },
            });
        }

        let editor = Editor {
            hwnd: hwnd as isize,
        };
        editor.send(
            EM_SETTEXTMODE,
            TM_PLAINTEXT | TM_MULTILEVELUNDO | TM_MULTICODEPAGE,
            0,
        );
        editor.send(EM_EXLIMITTEXT, 0, -1);
        editor.send(EM_SETMARGINS, EC_LEFTMARGIN, 4);

        let options = editor.send(EM_GETLANGOPTIONS, 0, 0);
        editor.send(
            EM_SETLANGOPTIONS,
            0,
            options & !((IMF_AUTOFONT | IMF_DUALFONT) as isize),
        );
        editor.send(EM_SETEVENTMASK, 0, ENM_CHANGE as isize);
        editor.subclass();
        Ok(editor)
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd as HWND
    }

    fn send(&self, msg: u32, wparam: usize, lparam: isize) -> isize {
        unsafe { SendMessageW(self.hwnd(), msg, wparam, lparam) }
    }

    fn subclass(&self) {
        let previous = unsafe {
            SetWindowLongPtrW(
                self.hwnd(),
                GWLP_WNDPROC,
                editor_proc as usize as isize,
            )
        };
        ORIGINAL_PROC.store(previous, Ordering::Relaxed);
    }

    pub fn move_to(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe {
            MoveWindow(self.hwnd(), x, y, width, height, 1);
        }
    }

    pub fn focus(&self) {
        unsafe {
            SetFocus(self.hwnd());
        }
    }

    /// The whole document as UTF-16, paragraphs separated by `\r`.
    pub fn text(&self) -> Vec<u16> {
        text_of(self.hwnd())
    }

    pub fn text_string(&self) -> String {
        String::from_utf16_lossy(&self.text())
    }

    /// Replaces the content, clearing undo history and the modify flag.
    pub fn set_text(&self, text: &str) {
        let text = to_wide(text);
        SUPPRESS_CHANGE.store(true, Ordering::Relaxed);
        self.send(WM_SETTEXT, 0, text.as_ptr() as isize);
        self.send(EM_EMPTYUNDOBUFFER, 0, 0);
        self.send(EM_SETMODIFY, 0, 0);
        SUPPRESS_CHANGE.store(false, Ordering::Relaxed);
        self.set_selection(0, 0);
    }

    pub fn selection(&self) -> (usize, usize) {
        selection_of(self.hwnd())
    }

    pub fn set_selection(&self, start: usize, end: usize) {
        set_selection_of(self.hwnd(), start, end);
    }

    pub fn has_selection(&self) -> bool {
        let (start, end) = self.selection();
        start != end
    }

    /// Replaces the selection with `text` as one undoable step.
    pub fn replace_selection(&self, text: &str) {
        replace_selection_of(self.hwnd(), text);
    }

    pub fn scroll_caret(&self) {
        self.send(EM_SCROLLCARET, 0, 0);
    }

    pub fn undo(&self) {
        self.send(EM_UNDO, 0, 0);
    }

    pub fn redo(&self) {
        self.send(EM_REDO, 0, 0);
    }

    pub fn can_undo(&self) -> bool {
        self.send(EM_CANUNDO, 0, 0) != 0
    }

    pub fn can_redo(&self) -> bool {
        self.send(EM_CANREDO, 0, 0) != 0
    }

    pub fn cut(&self) {
        self.send(WM_CUT, 0, 0);
    }

    pub fn copy(&self) {
        self.send(WM_COPY, 0, 0);
    }

    pub fn paste(&self) {
        self.send(WM_PASTE, 0, 0);
    }

    pub fn clear(&self) {
        self.send(WM_CLEAR, 0, 0);
    }

    pub fn select_all(&self) {
        self.send(EM_SETSEL, 0, -1);
    }

    /// `EM_SETTARGETDEVICE` with a zero line width wraps at the window edge.
    pub fn set_word_wrap(&self, wrap: bool) {
        self.send(EM_SETTARGETDEVICE, 0, if wrap { 0 } else { 1 });
    }

    /// Applies the configured font scaled by `zoom` percent for a display of
    /// `dpi` dots per inch.
    pub fn apply_font(&self, settings: &Settings, zoom_percent: u32, dpi: u32) -> Result<()> {
        let points = zoom::effective_font_size(settings.font_size, zoom_percent);

        let mut logfont: LOGFONTW = unsafe { std::mem::zeroed() };
        logfont.lfHeight = -(((points * dpi + 36) / 72) as i32);
        logfont.lfWeight = settings.font_weight;
        logfont.lfItalic = u8::from(settings.font_italic);
        logfont.lfUnderline = u8::from(settings.font_underline);
        logfont.lfCharSet = 1; // DEFAULT_CHARSET
        logfont.lfFaceName = face_name(&settings.font_name);

        let font = unsafe { CreateFontIndirectW(&logfont) };
        if font.is_null() {
            return Err(AppError::Win32 {
                function: "CreateFontIndirectW",
                code: unsafe { GetLastError() },
            });
        }
        self.send(WM_SETFONT, font as usize, 1);
        let previous = CURRENT_FONT.swap(font as isize, Ordering::Relaxed);
        if previous != 0 {
            unsafe {
                DeleteObject(previous as _);
            }
        }

        let mut effects = 0;
        if settings.font_weight >= 700 {
            effects |= CFE_BOLD;
        }
        if settings.font_italic {
            effects |= CFE_ITALIC;
        }
        if settings.font_underline {
            effects |= CFE_UNDERLINE;
        }
        let mut format: CHARFORMAT2W = unsafe { std::mem::zeroed() };
        format.cbSize = std::mem::size_of::<CHARFORMAT2W>() as u32;
        format.dwMask =
            CFM_FACE | CFM_SIZE | CFM_WEIGHT | CFM_BOLD | CFM_ITALIC | CFM_UNDERLINE;
        format.dwEffects = effects;
        format.yHeight = (points * 20) as i32;
        format.wWeight = settings.font_weight.clamp(1, 1000) as u16;
        format.szFaceName = face_name(&settings.font_name);

        // Formatting must not count as an edit
        SUPPRESS_CHANGE.store(true, Ordering::Relaxed);
        let modified = self.send(EM_GETMODIFY, 0, 0);
        self.send(EM_SETCHARFORMAT, SCF_ALL, &format as *const CHARFORMAT2W as isize);
        self.send(EM_SETCHARFORMAT, SCF_DEFAULT, &format as *const CHARFORMAT2W as isize);
        self.send(EM_SETMODIFY, modified as usize, 0);
        SUPPRESS_CHANGE.store(false, Ordering::Relaxed);

        tracing::debug!(font = %settings.font_name, points, "applied editor font");
        Ok(())
    }
}

fn send_to(hwnd: HWND, msg: u32, wparam: usize, lparam: isize) -> isize {
    unsafe { SendMessageW(hwnd, msg, wparam, lparam) }
}

fn text_of(hwnd: HWND) -> Vec<u16> {
    let length_query = GETTEXTLENGTHEX {
        flags: GTL_PRECISE | GTL_NUMCHARS,
        codepage: CP_UNICODE,
    };
    let len = send_to(
        hwnd,
        EM_GETTEXTLENGTHEX,
        &length_query as *const GETTEXTLENGTHEX as usize,
        0,
    )
    .max(0) as usize;
    if len == 0 {
        return Vec::new();
    }

    let mut buffer = vec![0u16; len + 1];
    let request = GETTEXTEX {
        cb: (buffer.len() * 2) as u32,
        flags: GT_DEFAULT,
        codepage: CP_UNICODE,
        lpDefaultChar: std::ptr::null(),
        lpUsedDefChar: std::ptr::null_mut(),
    };
    let copied = send_to(
        hwnd,
        EM_GETTEXTEX,
        &request as *const GETTEXTEX as usize,
        buffer.as_mut_ptr() as isize,
    )
    .max(0) as usize;
    buffer.truncate(copied.min(len));
    buffer
}

fn selection_of(hwnd: HWND) -> (usize, usize) {
    let mut range = CHARRANGE { cpMin: 0, cpMax: 0 };
    send_to(hwnd, EM_EXGETSEL, 0, &mut range as *mut CHARRANGE as isize);
    (range.cpMin.max(0) as usize, range.cpMax.max(0) as usize)
}

fn set_selection_of(hwnd: HWND, start: usize, end: usize) {
    let range = CHARRANGE {
        cpMin: start as i32,
        cpMax: end as i32,
    };
    send_to(hwnd, EM_EXSETSEL, 0, &range as *const CHARRANGE as isize);
}

fn replace_selection_of(hwnd: HWND, text: &str) {
    let text = to_wide(text);
    send_to(hwnd, EM_REPLACESEL, 1, text.as_ptr() as isize);
}

/// Deletes the word before (or after) the caret; a selection is just deleted.
fn delete_word(hwnd: HWND, backward: bool) {
    let (start, end) = selection_of(hwnd);
    if start == end {
        let text = text_of(hwnd);
        let (from, to) = if backward {
            (word_start_before(&text, start), start)
        } else {
            (start, word_end_after(&text, start))
        };
        if from == to {
            return;
        }
        set_selection_of(hwnd, from, to);
    }
    replace_selection_of(hwnd, "");
}

fn call_original(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        let original: WNDPROC = std::mem::transmute(ORIGINAL_PROC.load(Ordering::Relaxed));
        CallWindowProcW(original, hwnd, msg, wparam, lparam)
    }
}

extern "system" fn editor_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    match msg {
        // Ctrl+Backspace is handled on the DEL (127) character it produces
        WM_KEYDOWN if wparam == usize::from(VK_BACK) && ctrl_down() => 0,
        WM_KEYDOWN if wparam == usize::from(VK_DELETE) && ctrl_down() => {
            delete_word(hwnd, false);
            0
        }
        WM_CHAR if wparam == CHAR_CTRL_BACKSPACE => {
            delete_word(hwnd, true);
            0
        }
        // Ctrl+wheel zooms through the main window
        WM_MOUSEWHEEL if ctrl_down() => unsafe {
            SendMessageW(GetParent(hwnd), msg, wparam, lparam)
        },
        _ => call_original(hwnd, msg, wparam, lparam),
    }
}
