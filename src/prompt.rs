/// Parses the prompt's input; empty, zero or non-numeric text is rejected.
pub fn parse_positive(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<u32>().ok().filter(|&n| n > 0)
}

#[cfg(windows)]
pub use win::prompt_number;

#[cfg(windows)]
mod win {
    use super::parse_positive;
    use crate::constants::*;
    use crate::i18n::get_string;
    use crate::text_ops::to_wide;
    use std::cell::Cell;
    use std::sync::Once;
    use windows_sys::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
    use windows_sys::Win32::Graphics::Gdi::{DEFAULT_GUI_FONT, GetStockObject};
    use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows_sys::Win32::UI::Input::KeyboardAndMouse::{EnableWindow, SetFocus};
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GW_OWNER, GetDlgItem,
        GetMessageW, GetWindow, GetWindowRect, GetWindowTextW, IDC_ARROW, IsDialogMessageW,
        LoadCursorW, MSG, PostQuitMessage, RegisterClassW, SendMessageW, SetForegroundWindow,
        TranslateMessage, WM_CLOSE, WM_COMMAND, WM_QUIT, WM_SETFONT, WNDCLASSW, WS_BORDER,
        WS_CAPTION, WS_CHILD, WS_EX_DLGMODALFRAME, WS_POPUP, WS_SYSMENU, WS_TABSTOP, WS_VISIBLE,
    };

    const PROMPT_CLASS: &str = "LegacyNotepadPrompt";
    const WIDTH: i32 = 320;
    const HEIGHT: i32 = 150;
    const COLOR_BTNFACE: i32 = 15;

    static REGISTER: Once = Once::new();

    thread_local! {
        static DONE: Cell<bool> = const { Cell::new(false) };
        static ACCEPTED: Cell<Option<u32>> = const { Cell::new(None) };
    }

    fn finish(hwnd: HWND, value: Option<u32>) {
        ACCEPTED.with(|a| a.set(value));
        DONE.with(|d| d.set(true));
        unsafe {
            // re-enable first so activation returns to the owner
            EnableWindow(GetWindow(hwnd, GW_OWNER), 1);
            DestroyWindow(hwnd);
        }
    }

    extern "system" fn prompt_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        unsafe {
            match msg {
                WM_COMMAND => {
                    match (wparam & 0xFFFF) as u16 {
                        IDOK => {
                            let edit = GetDlgItem(hwnd, i32::from(IDC_PROMPT_EDIT));
                            let mut buffer = [0u16; 16];
                            let len =
                                GetWindowTextW(edit, buffer.as_mut_ptr(), buffer.len() as i32);
                            let text = String::from_utf16_lossy(&buffer[..len.max(0) as usize]);
                            match parse_positive(&text) {
                                Some(value) => finish(hwnd, Some(value)),
                                // keep the prompt open on invalid input
                                None => {
                                    SetFocus(edit);
                                }
                            }
                        }
                        IDCANCEL => finish(hwnd, None),
                        _ => {}
                    }
                    0
                }
                WM_CLOSE => {
                    finish(hwnd, None);
                    0
                }
                _ => DefWindowProcW(hwnd, msg, wparam, lparam),
            }
        }
    }

    fn register_class() {
        REGISTER.call_once(|| {
            let class_name = to_wide(PROMPT_CLASS);
            unsafe {
                let class = WNDCLASSW {
                    style: 0,
                    lpfnWndProc: Some(prompt_proc),
                    cbClsExtra: 0,
                    cbWndExtra: 0,
                    hInstance: GetModuleHandleW(std::ptr::null()),
                    hIcon: std::ptr::null_mut(),
                    hCursor: LoadCursorW(std::ptr::null_mut(), IDC_ARROW),
                    hbrBackground: (COLOR_BTNFACE + 1) as usize as _,
                    lpszMenuName: std::ptr::null(),
                    lpszClassName: class_name.as_ptr(),
                };
                RegisterClassW(&class);
            }
        });
    }

    unsafe fn child(
        parent: HWND,
        class: &str,
        text: &str,
        style: u32,
        rect: (i32, i32, i32, i32),
        id: u16,
    ) -> HWND {
        let class = to_wide(class);
        let text = to_wide(text);
        let (x, y, w, h) = rect;
        unsafe {
            let hwnd = CreateWindowExW(
                0,
                class.as_ptr(),
                text.as_ptr(),
                WS_CHILD | WS_VISIBLE | style,
                x,
                y,
                w,
                h,
                parent,
                usize::from(id) as _,
                GetModuleHandleW(std::ptr::null()),
                std::ptr::null(),
            );
            SendMessageW(hwnd, WM_SETFONT, GetStockObject(DEFAULT_GUI_FONT) as usize, 1);
            hwnd
        }
    }

    /// Runs a modal prompt over `owner`. Returns `None` when cancelled.
    pub fn prompt_number(owner: HWND, title: &str, label: &str, initial: u32) -> Option<u32> {
        register_class();
        DONE.with(|d| d.set(false));
        ACCEPTED.with(|a| a.set(None));

        unsafe {
            let mut owner_rect: RECT = std::mem::zeroed();
            GetWindowRect(owner, &mut owner_rect);
            let x = owner_rect.left + ((owner_rect.right - owner_rect.left) - WIDTH) / 2;
            let y = owner_rect.top + ((owner_rect.bottom - owner_rect.top) - HEIGHT) / 2;

            let class_name = to_wide(PROMPT_CLASS);
            let caption = to_wide(title);
            let hwnd = CreateWindowExW(
                WS_EX_DLGMODALFRAME,
                class_name.as_ptr(),
                caption.as_ptr(),
                WS_POPUP | WS_CAPTION | WS_SYSMENU | WS_VISIBLE,
                x,
                y,
                WIDTH,
                HEIGHT,
                owner,
                std::ptr::null_mut(),
                GetModuleHandleW(std::ptr::null()),
                std::ptr::null(),
            );
            if hwnd.is_null() {
                tracing::warn!("prompt window could not be created");
                return None;
            }

            child(hwnd, "STATIC", label, SS_LEFT, (12, 12, 280, 20), 0);
            let edit = child(
                hwnd,
                "EDIT",
                &initial.to_string(),
                WS_BORDER | WS_TABSTOP | ES_NUMBER | ES_AUTOHSCROLL,
                (12, 36, 280, 24),
                IDC_PROMPT_EDIT,
            );
            child(
                hwnd,
                "BUTTON",
                &get_string("DIALOG_OK"),
                WS_TABSTOP | BS_DEFPUSHBUTTON,
                (112, 74, 84, 26),
                IDOK,
            );
            child(
                hwnd,
                "BUTTON",
                &get_string("DIALOG_CANCEL"),
                WS_TABSTOP,
                (208, 74, 84, 26),
                IDCANCEL,
            );
            SendMessageW(edit, EM_SETSEL, 0, -1);
            SetFocus(edit);

            EnableWindow(owner, 0);
            let mut msg: MSG = std::mem::zeroed();
            while !DONE.with(Cell::get) {
                if GetMessageW(&mut msg, std::ptr::null_mut(), 0, 0) <= 0 {
                    // hand WM_QUIT back to the main loop
                    if msg.message == WM_QUIT {
                        PostQuitMessage(msg.wParam as i32);
                    }
                    break;
                }
                if IsDialogMessageW(hwnd, &msg) == 0 {
                    TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            }
            EnableWindow(owner, 1);
            SetForegroundWindow(owner);
            if !DONE.with(Cell::get) {
                DestroyWindow(hwnd);
            }
        }

        ACCEPTED.with(Cell::get)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("42"), Some(42));
        assert_eq!(parse_positive(" 7 "), Some(7));
    }

    #[test]
    fn test_parse_rejects_zero_and_garbage() {
        assert_eq!(parse_positive("0"), None);
        assert_eq!(parse_positive(""), None);
        assert_eq!(parse_positive("-3"), None);
        assert_eq!(parse_positive("12a"), None);
        assert_eq!(parse_positive("99999999999"), None);
    }
}
