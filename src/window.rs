use crate::app;
use crate::commands::Command;
use crate::constants::*;
use crate::error::{AppError, Result};
use crate::find_dialog;
use crate::i18n::get_string;
use crate::menu;
use crate::settings::Settings;
use crate::text_ops::to_wide;
use std::path::PathBuf;
use std::sync::Mutex;
use windows_sys::Win32::Foundation::{GetLastError, HWND, LPARAM, LRESULT, POINT, WPARAM};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::Shell::{DragAcceptFiles, DragFinish, DragQueryFileW, HDROP};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, CreateWindowExW, DefWindowProcW,
    DestroyAcceleratorTable, DispatchMessageW, GetCursorPos, GetMessageW, HMENU, IDC_IBEAM,
    IsDialogMessageW, LoadCursorW, MINMAXINFO, MSG, RegisterClassW, SW_SHOW, ShowWindow,
    TranslateAcceleratorW, TranslateMessage, WM_CLOSE, WM_COMMAND, WM_CONTEXTMENU, WM_CREATE,
    WM_DESTROY, WM_DROPFILES, WM_GETMINMAXINFO, WM_INITMENUPOPUP, WM_MOUSEWHEEL, WM_SETFOCUS,
    WM_SIZE, WNDCLASSW, WS_OVERLAPPEDWINDOW,
};

const WINDOW_CLASS: &str = "LegacyNotepadWindow";
const MK_CONTROL: usize = 0x0008;
const COLOR_WINDOW: i32 = 5;

// Handed from `run` to WM_CREATE
static PENDING_SETTINGS: Mutex<Option<Settings>> = Mutex::new(None);

fn loword(value: usize) -> u16 {
    (value & 0xFFFF) as u16
}

fn hiword(value: usize) -> u16 {
    ((value >> 16) & 0xFFFF) as u16
}

fn point_from_lparam(lparam: LPARAM) -> (i32, i32) {
    let x = (lparam & 0xFFFF) as i16 as i32;
    let y = ((lparam >> 16) & 0xFFFF) as i16 as i32;
    (x, y)
}

fn dropped_file(hdrop: HDROP) -> Option<PathBuf> {
    unsafe {
        let len = DragQueryFileW(hdrop, 0, std::ptr::null_mut(), 0);
        let path = if len == 0 {
            None
        } else {
            let mut buffer = vec![0u16; len as usize + 1];
            let copied = DragQueryFileW(hdrop, 0, buffer.as_mut_ptr(), buffer.len() as u32);
            Some(PathBuf::from(String::from_utf16_lossy(
                &buffer[..copied as usize],
            )))
        };
        DragFinish(hdrop);
        path
    }
}

extern "system" fn window_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if msg == find_dialog::find_message() {
        if let Some(event) = find_dialog::read_event(lparam) {
            app::on_find_event(hwnd, event);
        }
        return 0;
    }

    match msg {
        WM_CREATE => {
            let settings = PENDING_SETTINGS
                .lock()
                .ok()
                .and_then(|mut pending| pending.take())
                .unwrap_or_default();
            match app::init(hwnd, settings) {
                Ok(()) => 0,
                Err(e) => {
                    tracing::error!(error = %e, "failed to create editor");
                    -1
                }
            }
        }
        WM_SIZE => {
            app::layout(hwnd);
            0
        }
        WM_SETFOCUS => {
            if let Some(editor) = app::editor() {
                editor.focus();
            }
            0
        }
        WM_COMMAND => {
            let id = loword(wparam);
            if lparam != 0 {
                // notification from a child control
                if id == IDC_EDITOR && u32::from(hiword(wparam)) == EN_CHANGE {
                    app::on_text_changed(hwnd);
                }
                return 0;
            }
            match Command::from_id(id) {
                Some(command) => app::on_command(hwnd, command),
                None => tracing::debug!(id, "unknown command id"),
            }
            0
        }
        WM_CONTEXTMENU => {
            let (mut x, mut y) = point_from_lparam(lparam);
            if x == -1 && y == -1 {
                // keyboard invocation
                let mut point = POINT { x: 0, y: 0 };
                unsafe {
                    GetCursorPos(&mut point);
                }
                (x, y) = (point.x, point.y);
            }
            app::show_context_menu(hwnd, x, y);
            0
        }
        WM_DROPFILES => {
            if let Some(path) = dropped_file(wparam as HDROP) {
                tracing::info!(path = %path.display(), "file dropped");
                app::open_external(hwnd, &path);
            }
            0
        }
        WM_MOUSEWHEEL if loword(wparam) as usize & MK_CONTROL != 0 => {
            app::zoom_by_wheel(hwnd, hiword(wparam) as i16);
            0
        }
        WM_INITMENUPOPUP => {
            app::update_menu_state(wparam as HMENU);
            0
        }
        WM_GETMINMAXINFO => {
            let info = lparam as *mut MINMAXINFO;
            if !info.is_null() {
                unsafe {
                    (*info).ptMinTrackSize.x = MIN_TRACK_WIDTH;
                }
            }
            0
        }
        WM_CLOSE => {
            app::on_close(hwnd);
            0
        }
        WM_DESTROY => {
            app::on_destroy();
            0
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

fn register_class() -> Result<()> {
    let class_name = to_wide(WINDOW_CLASS);
    let atom = unsafe {
        let class = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(window_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: GetModuleHandleW(std::ptr::null()),
            hIcon: std::ptr::null_mut(),
            hCursor: LoadCursorW(std::ptr::null_mut(), IDC_IBEAM),
            hbrBackground: (COLOR_WINDOW + 1) as usize as _,
            lpszMenuName: std::ptr::null(),
            lpszClassName: class_name.as_ptr(),
        };
        RegisterClassW(&class)
    };
    if atom == 0 {
        return Err(AppError::Win32 {
            function: "RegisterClassW",
            code: unsafe { GetLastError() },
        });
    }
    Ok(())
}

/// Creates the main window, optionally opens `initial`, and pumps messages
/// until the window is closed. Returns the exit code.
pub fn run(settings: Settings, initial: Option<PathBuf>) -> Result<i32> {
    register_class()?;
    if let Ok(mut pending) = PENDING_SETTINGS.lock() {
        *pending = Some(settings);
    }

    let class_name = to_wide(WINDOW_CLASS);
    let title = to_wide(&get_string("APP_NAME"));
    let hwnd = unsafe {
        CreateWindowExW(
            0,
            class_name.as_ptr(),
            title.as_ptr(),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            MAIN_WINDOW_WIDTH,
            MAIN_WINDOW_HEIGHT,
            std::ptr::null_mut(),
            std::ptr::null_mut(),
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

    unsafe {
        DragAcceptFiles(hwnd, 1);
        ShowWindow(hwnd, SW_SHOW);
    }

    if let Some(path) = initial {
        app::open_path(hwnd, &path, None);
    }

    let accelerators = menu::create_accelerators();
    let mut msg: MSG = unsafe { std::mem::zeroed() };
    unsafe {
        while GetMessageW(&mut msg, std::ptr::null_mut(), 0, 0) > 0 {
            let dialog = find_dialog::dialog_hwnd();
            if !dialog.is_null() && IsDialogMessageW(dialog, &msg) != 0 {
                continue;
            }
            if TranslateAcceleratorW(hwnd, accelerators, &msg) == 0 {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
            app::refresh_status(false);
        }
        if !accelerators.is_null() {
            DestroyAcceleratorTable(accelerators);
        }
    }

    tracing::info!(code = msg.wParam, "message loop finished");
    Ok(msg.wParam as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_words() {
        let wparam = (EN_CHANGE as usize) << 16 | usize::from(IDC_EDITOR);
        assert_eq!(loword(wparam), IDC_EDITOR);
        assert_eq!(u32::from(hiword(wparam)), EN_CHANGE);
    }

    #[test]
    fn test_point_from_lparam_is_signed() {
        let lparam = ((-5i16 as u16 as isize) << 16) | (-1i16 as u16 as isize);
        assert_eq!(point_from_lparam(lparam), (-1, -5));
        assert_eq!(point_from_lparam(0x0020_0010), (16, 32));
    }
}
