use crate::encoding::{LineEnding, TextEncoding};
use crate::i18n::{Language, lookup};

pub const STATUS_HEIGHT: i32 = 24;
pub const SEPARATOR_HEIGHT: i32 = 1;

const SECTION_WIDTHS: [i32; 4] = [130, 110, 110, 50];
const SEPARATOR_WIDTH: i32 = 2;
const SEPARATOR_MARGIN: i32 = 8;
const RIGHT_MARGIN: i32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: i32,
    pub width: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub sections: [Span; 4],
    pub separators: [Span; 3],
}

/// Right-aligns the four sections inside a client area `client_width` wide.
pub fn section_layout(client_width: i32) -> Layout {
    let gap = SEPARATOR_MARGIN * 2 + SEPARATOR_WIDTH;
    let total: i32 = SECTION_WIDTHS.iter().sum::<i32>() + gap * 3;
    let mut x = (client_width - RIGHT_MARGIN - total).max(0);

    let mut sections = [Span { x: 0, width: 0 }; 4];
    let mut separators = [Span { x: 0, width: 0 }; 3];
    for (i, width) in SECTION_WIDTHS.iter().copied().enumerate() {
        sections[i] = Span { x, width };
        x += width;
        if let Some(sep) = separators.get_mut(i) {
            *sep = Span {
                x: x + SEPARATOR_MARGIN,
                width: SEPARATOR_WIDTH,
            };
            x += gap;
        }
    }
    Layout {
        sections,
        separators,
    }
}

/// Texts of the four sections, left to right.
pub fn format_fields(
    language: Language,
    line: usize,
    col: usize,
    encoding: TextEncoding,
    line_ending: LineEnding,
    zoom: u32,
) -> [String; 4] {
    [
        lookup(language, "STATUS_LINE_COL")
            .replace("{line}", &line.to_string())
            .replace("{col}", &col.to_string()),
        lookup(language, encoding.label_key()).to_string(),
        lookup(language, line_ending.label_key()).to_string(),
        format!("{zoom}%"),
    ]
}

#[cfg(windows)]
pub use win::{StatusBar, register_classes};

#[cfg(windows)]
mod win {
    use super::{Layout, SEPARATOR_HEIGHT, STATUS_HEIGHT, section_layout};
    use crate::constants::{SS_CENTERIMAGE, SS_LEFT, SS_RIGHT};
    use crate::text_ops::to_wide;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicIsize, Ordering};
    use windows_sys::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
    use windows_sys::Win32::Graphics::Gdi::{
        BeginPaint, CreateFontW, CreatePen, DT_LEFT, DT_RIGHT, DT_SINGLELINE, DT_VCENTER,
        DeleteObject, DrawTextW, EndPaint, FW_NORMAL, FillRect, GetSysColor, GetSysColorBrush,
        InvalidateRect, LineTo, MoveToEx, PAINTSTRUCT, PS_SOLID, SelectObject, SetBkMode,
        SetTextColor, TRANSPARENT,
    };
    use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        CS_HREDRAW, CS_VREDRAW, CreateWindowExW, DefWindowProcW, GWL_STYLE, GetClientRect,
        GetWindowLongPtrW, GetWindowTextLengthW, GetWindowTextW, IDC_ARROW, LoadCursorW,
        RegisterClassW, SW_HIDE, SW_SHOW, SWP_NOZORDER, SetCursor, SetWindowPos, SetWindowTextW,
        ShowWindow, WM_PAINT, WM_SETCURSOR, WNDCLASSW, WNDPROC, WS_CHILD, WS_VISIBLE,
    };

    const COLOR_BTNFACE: i32 = 15;
    const COLOR_BTNTEXT: i32 = 18;

    const SEPARATOR_CLASS: &str = "LegacyNotepadSeparator";
    const STATUS_TEXT_CLASS: &str = "LegacyNotepadStatusText";

    static STATUS_FONT: AtomicIsize = AtomicIsize::new(0);
    static LAST_FIELDS: Mutex<Option<[String; 4]>> = Mutex::new(None);

    // Thin light gray line, vertical or horizontal depending on the window shape
    extern "system" fn separator_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        unsafe {
            match msg {
                WM_SETCURSOR => {
                    SetCursor(LoadCursorW(std::ptr::null_mut(), IDC_ARROW));
                    1
                }
                WM_PAINT => {
                    let mut ps: PAINTSTRUCT = std::mem::zeroed();
                    let hdc = BeginPaint(hwnd, &mut ps);
                    let mut rect: RECT = std::mem::zeroed();
                    GetClientRect(hwnd, &mut rect);

                    // RGB(210, 209, 208)
                    let pen = CreatePen(PS_SOLID, 1, 0x00D0_D1D2);
                    let old_pen = SelectObject(hdc, pen);
                    let width = rect.right - rect.left;
                    let height = rect.bottom - rect.top;
                    if height > width {
                        MoveToEx(hdc, width / 2, rect.top, std::ptr::null_mut());
                        LineTo(hdc, width / 2, rect.bottom);
                    } else {
                        MoveToEx(hdc, rect.left, height / 2, std::ptr::null_mut());
                        LineTo(hdc, rect.right, height / 2);
                    }
                    SelectObject(hdc, old_pen);
                    DeleteObject(pen);

                    EndPaint(hwnd, &ps);
                    0
                }
                _ => DefWindowProcW(hwnd, msg, wparam, lparam),
            }
        }
    }

    fn status_font() -> isize {
        let existing = STATUS_FONT.load(Ordering::Relaxed);
        if existing != 0 {
            return existing;
        }
        let face = to_wide("Segoe UI");
        let font = unsafe {
            CreateFontW(
                -12,
                0,
                0,
                0,
                FW_NORMAL as i32,
                0,
                0,
                0,
                1, // DEFAULT_CHARSET
                0,
                0,
                0,
                0,
                face.as_ptr(),
            )
        };
        STATUS_FONT.store(font as isize, Ordering::Relaxed);
        font as isize
    }

    extern "system" fn status_text_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        unsafe {
            match msg {
                WM_SETCURSOR => {
                    SetCursor(LoadCursorW(std::ptr::null_mut(), IDC_ARROW));
                    1
                }
                WM_PAINT => {
                    let mut ps: PAINTSTRUCT = std::mem::zeroed();
                    let hdc = BeginPaint(hwnd, &mut ps);
                    let mut rect: RECT = std::mem::zeroed();
                    GetClientRect(hwnd, &mut rect);
                    FillRect(hdc, &rect, GetSysColorBrush(COLOR_BTNFACE));

                    let len = GetWindowTextLengthW(hwnd);
                    if len > 0 {
                        let mut buffer = vec![0u16; len as usize + 1];
                        let copied = GetWindowTextW(hwnd, buffer.as_mut_ptr(), buffer.len() as i32);

                        SetBkMode(hdc, TRANSPARENT as i32);
                        SetTextColor(hdc, GetSysColor(COLOR_BTNTEXT));
                        let old_font = SelectObject(hdc, status_font() as _);

                        let style = GetWindowLongPtrW(hwnd, GWL_STYLE) as u32;
                        let align = if style & SS_RIGHT != 0 { DT_RIGHT } else { DT_LEFT };
                        DrawTextW(
                            hdc,
                            buffer.as_ptr(),
                            copied,
                            &mut rect,
                            align | DT_SINGLELINE | DT_VCENTER,
                        );
                        SelectObject(hdc, old_font);
                    }

                    EndPaint(hwnd, &ps);
                    0
                }
                _ => DefWindowProcW(hwnd, msg, wparam, lparam),
            }
        }
    }

    pub fn register_classes() {
        unsafe {
            let hinstance = GetModuleHandleW(std::ptr::null());
            let classes: [(&str, WNDPROC); 2] = [
                (SEPARATOR_CLASS, Some(separator_proc)),
                (STATUS_TEXT_CLASS, Some(status_text_proc)),
            ];
            for (name, proc_) in classes {
                let class_name = to_wide(name);
                let class = WNDCLASSW {
                    style: CS_VREDRAW | CS_HREDRAW,
                    lpfnWndProc: proc_,
                    cbClsExtra: 0,
                    cbWndExtra: 0,
                    hInstance: hinstance,
                    hIcon: std::ptr::null_mut(),
                    hCursor: std::ptr::null_mut(),
                    hbrBackground: GetSysColorBrush(COLOR_BTNFACE),
                    lpszMenuName: std::ptr::null(),
                    lpszClassName: class_name.as_ptr(),
                };
                RegisterClassW(&class);
            }
        }
    }

    /// Child windows making up the bar, stored as raw handle values.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StatusBar {
        top_line: isize,
        cells: [isize; 4],
        separators: [isize; 3],
    }

    unsafe fn create_child(parent: HWND, class: &str, style: u32) -> isize {
        let class_name = to_wide(class);
        unsafe {
            CreateWindowExW(
                0,
                class_name.as_ptr(),
                std::ptr::null(),
                WS_CHILD | WS_VISIBLE | style,
                0,
                0,
                0,
                0,
                parent,
                std::ptr::null_mut(),
                GetModuleHandleW(std::ptr::null()),
                std::ptr::null(),
            ) as isize
        }
    }

    impl StatusBar {
        pub fn create(parent: HWND) -> StatusBar {
            let mut bar = StatusBar::default();
            unsafe {
                bar.top_line = create_child(parent, SEPARATOR_CLASS, 0);
                for (i, cell) in bar.cells.iter_mut().enumerate() {
                    let align = if i == 3 { SS_RIGHT } else { SS_LEFT };
                    *cell = create_child(parent, STATUS_TEXT_CLASS, align | SS_CENTERIMAGE);
                }
                for sep in bar.separators.iter_mut() {
                    *sep = create_child(parent, SEPARATOR_CLASS, 0);
                }
            }
            bar
        }

        fn windows(&self) -> impl Iterator<Item = HWND> + '_ {
            std::iter::once(self.top_line)
                .chain(self.cells.iter().copied())
                .chain(self.separators.iter().copied())
                .map(|h| h as HWND)
        }

        /// Height taken from the bottom of the client area.
        pub fn height(visible: bool) -> i32 {
            if visible {
                STATUS_HEIGHT + SEPARATOR_HEIGHT
            } else {
                0
            }
        }

        pub fn set_visible(&self, visible: bool) {
            let cmd = if visible { SW_SHOW } else { SW_HIDE };
            for hwnd in self.windows() {
                unsafe {
                    ShowWindow(hwnd, cmd);
                }
            }
        }

        /// Positions the bar along the bottom edge; `top` is the editor's bottom.
        pub fn layout(&self, client_width: i32, top: i32) {
            let Layout {
                sections,
                separators,
            } = section_layout(client_width);
            let y = top + SEPARATOR_HEIGHT;
            unsafe {
                SetWindowPos(
                    self.top_line as HWND,
                    std::ptr::null_mut(),
                    0,
                    top,
                    client_width,
                    SEPARATOR_HEIGHT,
                    SWP_NOZORDER,
                );
                for (hwnd, span) in self.cells.iter().zip(sections) {
                    SetWindowPos(
                        *hwnd as HWND,
                        std::ptr::null_mut(),
                        span.x,
                        y,
                        span.width,
                        STATUS_HEIGHT,
                        SWP_NOZORDER,
                    );
                }
                for (hwnd, span) in self.separators.iter().zip(separators) {
                    SetWindowPos(
                        *hwnd as HWND,
                        std::ptr::null_mut(),
                        span.x,
                        y + 4,
                        span.width,
                        STATUS_HEIGHT - 8,
                        SWP_NOZORDER,
                    );
                }
            }
        }

        /// Updates the cell texts, skipping the repaint when nothing changed.
        pub fn set_fields(&self, fields: [String; 4]) {
            let Ok(mut last) = LAST_FIELDS.lock() else {
                return;
            };
            if last.as_ref() == Some(&fields) {
                return;
            }
            for (hwnd, text) in self.cells.iter().zip(fields.iter()) {
                let text = to_wide(text);
                unsafe {
                    SetWindowTextW(*hwnd as HWND, text.as_ptr());
                    InvalidateRect(*hwnd as HWND, std::ptr::null(), 1);
                }
            }
            *last = Some(fields);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_right_aligned_and_ordered() {
        let layout = section_layout(800);
        let last = layout.sections[3];
        assert_eq!(last.x + last.width, 800 - RIGHT_MARGIN);
        for pair in layout.sections.windows(2) {
            assert!(pair[0].x + pair[0].width < pair[1].x);
        }
        for (i, sep) in layout.separators.iter().enumerate() {
            let left = layout.sections[i];
            let right = layout.sections[i + 1];
            assert!(sep.x > left.x + left.width && sep.x + sep.width < right.x);
        }
    }

    #[test]
    fn test_layout_never_starts_left_of_window() {
        let layout = section_layout(100);
        assert_eq!(layout.sections[0].x, 0);
    }

    #[test]
    fn test_format_fields_english() {
        let fields = format_fields(
            Language::English,
            12,
            5,
            TextEncoding::Utf16Le,
            LineEnding::Lf,
            150,
        );
        assert_eq!(fields[0], "Ln 12, Col 5");
        assert_eq!(fields[1], "UTF-16 LE");
        assert_eq!(fields[2], "Unix (LF)");
        assert_eq!(fields[3], "150%");
    }

    #[test]
    fn test_format_fields_japanese() {
        let fields = format_fields(
            Language::Japanese,
            1,
            1,
            TextEncoding::Utf8Bom,
            LineEnding::Crlf,
            100,
        );
        assert_eq!(fields[0], "行 1、列 1");
        assert_eq!(fields[1], "UTF-8 (BOM 付き)");
        assert_eq!(fields[2], "Windows (CRLF)");
    }
}
