use crate::commands::Command;
use crate::constants::*;
use crate::dialogs::{self, SaveDecision};
use crate::document::Document;
use crate::editor::Editor;
use crate::encoding::{self, LineEnding, TextEncoding};
use crate::error::{AppError, Result};
use crate::file_io;
use crate::find_dialog::{self, FindEvent, FindQuery};
use crate::i18n::{self, Language, format_string, get_string};
use crate::line_column::calculate_line_column;
use crate::menu;
use crate::prompt;
use crate::search::{self, Direction};
use crate::settings::Settings;
use crate::status_bar::{self, StatusBar};
use crate::text_ops::{self, to_wide};
use crate::zoom;
use encoding_rs::Encoding;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicIsize, Ordering};
use std::sync::{LazyLock, Mutex, MutexGuard, OnceLock, PoisonError};
use windows_sys::Win32::Foundation::{GetLastError, HWND, RECT, SYSTEMTIME};
use windows_sys::Win32::Graphics::Gdi::{GetDC, GetDeviceCaps, LOGPIXELSY, ReleaseDC};
use windows_sys::Win32::System::SystemInformation::GetLocalTime;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    DestroyIcon, DestroyWindow, GWL_EXSTYLE, GetClientRect, GetMenu, GetSystemMetrics,
    GetWindowLongPtrW, HMENU, HWND_NOTOPMOST, HWND_TOPMOST, IDI_APPLICATION, IMAGE_ICON,
    LR_LOADFROMFILE, LWA_ALPHA, LoadIconW, LoadImageW, PostQuitMessage, SM_CXICON, SM_CXSMICON,
    SM_CYICON, SM_CYSMICON, SWP_NOMOVE, SWP_NOSIZE, SendMessageW, SetLayeredWindowAttributes,
    SetWindowLongPtrW, SetWindowPos, SetWindowTextW, WM_CLOSE, WM_SETICON, WS_EX_LAYERED,
};

pub struct AppState {
    pub document: Document,
    pub settings: Settings,
    pub last_query: FindQuery,
    pub ansi: &'static Encoding,
}

// Lock scopes stay short and never span a SendMessageW or a modal dialog;
// both re-enter the window procedure.
static STATE: LazyLock<Mutex<AppState>> = LazyLock::new(|| {
    Mutex::new(AppState {
        document: Document::new(),
        settings: Settings::default(),
        last_query: FindQuery::default(),
        ansi: encoding::system_ansi(),
    })
});

static EDITOR: OnceLock<Editor> = OnceLock::new();
static STATUS_BAR: OnceLock<StatusBar> = OnceLock::new();
static CLOSING: AtomicBool = AtomicBool::new(false);
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static TEXT_CHANGED: AtomicBool = AtomicBool::new(true);
static LAST_SELECTION: Mutex<Option<(usize, usize)>> = Mutex::new(None);
static CUSTOM_ICONS: [AtomicIsize; 2] = [AtomicIsize::new(0), AtomicIsize::new(0)];

fn state() -> MutexGuard<'static, AppState> {
    STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

fn settings_snapshot() -> Settings {
    state().settings.clone()
}

pub fn editor() -> Option<Editor> {
    EDITOR.get().copied()
}

fn persist_settings() {
    let settings = settings_snapshot();
    if let Err(e) = settings.save() {
        tracing::warn!(error = %e, "failed to save settings");
    }
}

fn window_dpi(hwnd: HWND) -> u32 {
    unsafe {
        let hdc = GetDC(hwnd);
        if hdc.is_null() {
            return 96;
        }
        let dpi = GetDeviceCaps(hdc, LOGPIXELSY);
        ReleaseDC(hwnd, hdc);
        if dpi > 0 { dpi as u32 } else { 96 }
    }
}

/// Creates the child windows and applies the loaded settings.
pub fn init(hwnd: HWND, settings: Settings) -> Result<()> {
    state().settings = settings.clone();
    crate::editor::load_richedit()?;
    let editor = Editor::create(hwnd)?;
    let _ = EDITOR.set(editor);

    status_bar::register_classes();
    let bar = StatusBar::create(hwnd);
    let _ = STATUS_BAR.set(bar);

    let language = i18n::init_language(settings.language);

    menu::rebuild_menu(hwnd, &settings, language);
    apply_font(hwnd);
    editor.set_word_wrap(settings.word_wrap);
    bar.set_visible(settings.show_status_bar);
    apply_topmost(hwnd, settings.always_on_top);
    apply_opacity(hwnd, settings.window_opacity);
    if let Some(icon) = &settings.custom_icon {
        if let Err(e) = apply_custom_icon(hwnd, icon) {
            tracing::warn!(path = %icon.display(), error = %e, "saved icon could not be loaded");
            apply_default_icon(hwnd);
        }
    } else {
        apply_default_icon(hwnd);
    }

    layout(hwnd);
    refresh_title(hwnd);
    refresh_status(true);
    editor.focus();
    INITIALIZED.store(true, Ordering::SeqCst);
    Ok(())
}

/// Editor fills the client area above the status bar.
pub fn layout(hwnd: HWND) {
    let Some(editor) = editor() else {
        return;
    };
    let mut rect: RECT = unsafe { std::mem::zeroed() };
    unsafe {
        GetClientRect(hwnd, &mut rect);
    }
    let width = rect.right - rect.left;
    let height = rect.bottom - rect.top;
    let visible = state().settings.show_status_bar;
    let bar_height = StatusBar::height(visible);
    let editor_height = (height - bar_height).max(0);

    editor.move_to(0, 0, width, editor_height);
    if let Some(bar) = STATUS_BAR.get() {
        if visible {
            bar.layout(width, editor_height);
        }
    }
}

fn refresh_title(hwnd: HWND) {
    let title = state()
        .document
        .window_title(&get_string("FILE_UNTITLED"), &get_string("APP_NAME"));
    let title = to_wide(&title);
    unsafe {
        SetWindowTextW(hwnd, title.as_ptr());
    }
}

/// Recomputes the status bar when the caret moved or the text changed.
pub fn refresh_status(force: bool) {
    let (Some(editor), Some(bar)) = (editor(), STATUS_BAR.get()) else {
        return;
    };
    let selection = editor.selection();
    {
        let mut last = LAST_SELECTION.lock().unwrap_or_else(PoisonError::into_inner);
        let changed = TEXT_CHANGED.swap(false, Ordering::Relaxed);
        if !force && !changed && *last == Some(selection) {
            return;
        }
        *last = Some(selection);
    }

    let (visible, encoding, line_ending, zoom) = {
        let state = state();
        (
            state.settings.show_status_bar,
            state.document.encoding,
            state.document.line_ending,
            state.settings.zoom,
        )
    };
    if !visible {
        return;
    }
    let text = editor.text();
    let (line, col) = calculate_line_column(&text, selection.1);
    bar.set_fields(status_bar::format_fields(
        i18n::get_language(),
        line,
        col,
        encoding,
        line_ending,
        zoom,
    ));
}

/// `EN_CHANGE` from the editor: a user edit.
pub fn on_text_changed(hwnd: HWND) {
    if crate::editor::change_suppressed() {
        return;
    }
    TEXT_CHANGED.store(true, Ordering::Relaxed);
    let newly_modified = {
        let mut state = state();
        let was = state.document.modified;
        state.document.mark_modified();
        !was
    };
    if newly_modified {
        refresh_title(hwnd);
    }
}

pub fn on_command(hwnd: HWND, command: Command) {
    tracing::debug!(?command, "command");
    let Some(editor) = editor() else {
        return;
    };
    match command {
        Command::FileNew => new_document(hwnd),
        Command::FileOpen => open_document(hwnd),
        Command::FileSave => {
            save_document(hwnd);
        }
        Command::FileSaveAs => {
            save_document_as(hwnd);
        }
        Command::FileRecent(index) => open_recent(hwnd, index),
        Command::FileExit => unsafe {
            SendMessageW(hwnd, WM_CLOSE, 0, 0);
        },
        Command::EditUndo => editor.undo(),
        Command::EditRedo => editor.redo(),
        Command::EditCut => editor.cut(),
        Command::EditCopy => editor.copy(),
        Command::EditPaste => editor.paste(),
        Command::EditDelete => editor.clear(),
        Command::EditFind => show_find(hwnd, false),
        Command::EditFindNext => find_again(hwnd, Direction::Forward),
        Command::EditFindPrevious => find_again(hwnd, Direction::Backward),
        Command::EditReplace => show_find(hwnd, true),
        Command::EditGoTo => go_to_line(hwnd),
        Command::EditSelectAll => editor.select_all(),
        Command::EditTimeDate => insert_time_date(),
        Command::FormatWordWrap => toggle_word_wrap(hwnd),
        Command::FormatFont => choose_font(hwnd),
        Command::ViewZoomIn => set_zoom(hwnd, zoom::zoom_in),
        Command::ViewZoomOut => set_zoom(hwnd, zoom::zoom_out),
        Command::ViewZoomDefault => set_zoom(hwnd, |_| zoom::ZOOM_DEFAULT),
        Command::ViewStatusBar => toggle_status_bar(hwnd),
        Command::ViewAlwaysOnTop => toggle_always_on_top(hwnd),
        Command::ViewTransparency => choose_transparency(hwnd),
        Command::ViewChangeIcon => change_icon(hwnd),
        Command::ViewResetIcon => reset_icon(hwnd),
        Command::LanguageEnglish => switch_language(hwnd, Language::English),
        Command::LanguageJapanese => switch_language(hwnd, Language::Japanese),
        Command::HelpAbout => dialogs::show_about(hwnd),
    }
    refresh_status(false);
}

// ---- File ----

/// Asks to save a modified document. `false` means the user cancelled.
fn confirm_discard(hwnd: HWND) -> bool {
    let (modified, name) = {
        let state = state();
        (
            state.document.modified,
            state.document.display_name(&get_string("FILE_UNTITLED")),
        )
    };
    if !modified {
        return true;
    }
    match dialogs::confirm_save(hwnd, &name) {
        SaveDecision::Save => save_document(hwnd),
        SaveDecision::Discard => true,
        SaveDecision::Cancel => false,
    }
}

fn new_document(hwnd: HWND) {
    if !confirm_discard(hwnd) {
        return;
    }
    if let Some(editor) = editor() {
        editor.set_text("");
    }
    state().document.reset();
    tracing::info!("new document");
    refresh_title(hwnd);
    refresh_status(true);
}

fn open_document(hwnd: HWND) {
    if !confirm_discard(hwnd) {
        return;
    }
    match dialogs::open_file_dialog(hwnd) {
        Ok(Some((path, forced))) => {
            open_path(hwnd, &path, forced);
        }
        Ok(None) => {}
        Err(e) => report(hwnd, "MSG_CANNOT_OPEN", &e),
    }
}

fn report(hwnd: HWND, key: &str, error: &AppError) {
    tracing::warn!(error = %error, "{key}");
    dialogs::show_error(hwnd, &format!("{}\n\n{}", get_string(key), error));
}

/// Loads `path` into the editor. Errors are reported; returns success.
pub fn open_path(hwnd: HWND, path: &Path, forced: Option<TextEncoding>) -> bool {
    let ansi = state().ansi;
    let loaded = match file_io::load_file(path, forced, ansi) {
        Ok(loaded) => loaded,
        Err(e) => {
            report(hwnd, "MSG_CANNOT_OPEN", &e);
            return false;
        }
    };
    if let Some(editor) = editor() {
        editor.set_text(&loaded.text);
    }
    let settings = {
        let mut state = state();
        state
            .document
            .loaded(path.to_path_buf(), loaded.encoding, loaded.line_ending);
        state.settings.recent_files.add(path);
        state.settings.clone()
    };
    menu::rebuild_menu(hwnd, &settings, i18n::get_language());
    persist_settings();
    refresh_title(hwnd);
    refresh_status(true);
    true
}

fn open_recent(hwnd: HWND, index: usize) {
    let Some(path) = state()
        .settings
        .recent_files
        .get(index)
        .map(Path::to_path_buf)
    else {
        return;
    };
    if !confirm_discard(hwnd) {
        return;
    }
    if !open_path(hwnd, &path, None) {
        let settings = {
            let mut state = state();
            state.settings.recent_files.remove(&path);
            state.settings.clone()
        };
        tracing::info!(path = %path.display(), "removed unreadable recent file");
        menu::rebuild_menu(hwnd, &settings, i18n::get_language());
        persist_settings();
    }
}

/// Saves to the current path, or asks for one. Returns success.
fn save_document(hwnd: HWND) -> bool {
    let (path, encoding, line_ending) = {
        let state = state();
        (
            state.document.path().map(Path::to_path_buf),
            state.document.encoding,
            state.document.line_ending,
        )
    };
    match path {
        Some(path) => write_document(hwnd, path, encoding, line_ending),
        None => save_document_as(hwnd),
    }
}

fn save_document_as(hwnd: HWND) -> bool {
    let (path, encoding, line_ending) = {
        let state = state();
        (
            state.document.path().map(Path::to_path_buf),
            state.document.encoding,
            state.document.line_ending,
        )
    };
    match dialogs::save_file_dialog(hwnd, path.as_deref(), encoding, line_ending) {
        Ok(Some(choice)) => write_document(hwnd, choice.path, choice.encoding, choice.line_ending),
        Ok(None) => false,
        Err(e) => {
            report(hwnd, "MSG_CANNOT_SAVE", &e);
            false
        }
    }
}

fn write_document(
    hwnd: HWND,
    path: PathBuf,
    encoding: TextEncoding,
    line_ending: LineEnding,
) -> bool {
    let Some(editor) = editor() else {
        return false;
    };
    let text = editor.text_string();
    let ansi = state().ansi;
    if let Err(e) = file_io::save_file(&path, &text, encoding, line_ending, ansi) {
        report(hwnd, "MSG_CANNOT_SAVE", &e);
        return false;
    }
    let settings = {
        let mut state = state();
        state.document.encoding = encoding;
        state.document.line_ending = line_ending;
        state.settings.recent_files.add(&path);
        state.document.mark_saved(path);
        state.settings.clone()
    };
    menu::rebuild_menu(hwnd, &settings, i18n::get_language());
    persist_settings();
    refresh_title(hwnd);
    refresh_status(true);
    true
}

// ---- Find / replace ----

fn selected_text(editor: &Editor) -> String {
    let (start, end) = editor.selection();
    let text = editor.text();
    text.get(start..end)
        .filter(|s| !s.contains(&u16::from(b'\r')))
        .map(String::from_utf16_lossy)
        .unwrap_or_default()
}

fn show_find(hwnd: HWND, replace: bool) {
    let Some(editor) = editor() else {
        return;
    };
    let selected = selected_text(&editor);
    let query = state().last_query.clone();
    let initial = if selected.is_empty() {
        query.needle
    } else {
        selected
    };
    find_dialog::show(hwnd, replace, &initial, query.match_case);
}

fn find_again(hwnd: HWND, direction: Direction) {
    let query = state().last_query.clone();
    if !query.has_needle() {
        return;
    }
    find_and_select(hwnd, &query.needle, direction, query.match_case);
}

/// Selects the next match, or says it cannot be found.
fn find_and_select(hwnd: HWND, needle: &str, direction: Direction, match_case: bool) -> bool {
    let Some(editor) = editor() else {
        return false;
    };
    if needle.is_empty() {
        return false;
    }
    let text = editor.text();
    let pattern: Vec<u16> = needle.encode_utf16().collect();
    match search::find(&text, &pattern, editor.selection(), direction, match_case) {
        Some((start, end)) => {
            editor.set_selection(start, end);
            editor.scroll_caret();
            true
        }
        None => {
            let owner = match find_dialog::dialog_hwnd() {
                h if h.is_null() => hwnd,
                h => h,
            };
            dialogs::show_info(owner, &format_string("MSG_CANNOT_FIND", &[("text", needle)]));
            false
        }
    }
}

pub fn on_find_event(hwnd: HWND, event: FindEvent) {
    let Some(editor) = editor() else {
        return;
    };
    match event {
        FindEvent::Closed => editor.focus(),
        FindEvent::FindNext(query) => {
            state().last_query = query.clone();
            find_and_select(hwnd, &query.needle, query.direction, query.match_case);
        }
        FindEvent::Replace(query) => {
            state().last_query = query.clone();
            if query.needle.is_empty() {
                return;
            }
            let needle: Vec<u16> = query.needle.encode_utf16().collect();
            let text = editor.text();
            if search::selection_matches(&text, editor.selection(), &needle, query.match_case) {
                editor.replace_selection(&query.replacement);
            }
            find_and_select(hwnd, &query.needle, Direction::Forward, query.match_case);
        }
        FindEvent::ReplaceAll(query) => {
            state().last_query = query.clone();
            replace_all(hwnd, &query);
        }
    }
    refresh_status(false);
}

fn replace_all(hwnd: HWND, query: &FindQuery) {
    let Some(editor) = editor() else {
        return;
    };
    let needle: Vec<u16> = query.needle.encode_utf16().collect();
    let replacement: Vec<u16> = query.replacement.encode_utf16().collect();
    let (new_text, count) =
        search::replace_all(&editor.text(), &needle, &replacement, query.match_case);
    if count == 0 {
        let owner = match find_dialog::dialog_hwnd() {
            h if h.is_null() => hwnd,
            h => h,
        };
        dialogs::show_info(
            owner,
            &format_string("MSG_CANNOT_FIND", &[("text", &query.needle)]),
        );
        return;
    }
    // one undo step; EN_CHANGE marks the document modified
    editor.select_all();
    editor.replace_selection(&String::from_utf16_lossy(&new_text));
    editor.set_selection(0, 0);
    editor.scroll_caret();
    tracing::info!(count, "replaced all");
}

// ---- Edit ----

fn go_to_line(hwnd: HWND) {
    let Some(editor) = editor() else {
        return;
    };
    let text = editor.text();
    let (current, _) = calculate_line_column(&text, editor.selection().1);
    let Some(line) = prompt::prompt_number(
        hwnd,
        &get_string("DIALOG_GOTO_TITLE"),
        &get_string("DIALOG_GOTO_LABEL"),
        current as u32,
    ) else {
        return;
    };
    let offset = text_ops::line_start_offset(&text, line as usize);
    editor.set_selection(offset, offset);
    editor.scroll_caret();
    editor.focus();
}

fn insert_time_date() {
    let Some(editor) = editor() else {
        return;
    };
    let mut now: SYSTEMTIME = unsafe { std::mem::zeroed() };
    unsafe {
        GetLocalTime(&mut now);
    }
    let stamp = text_ops::format_time_date(
        u32::from(now.wHour),
        u32::from(now.wMinute),
        u32::from(now.wMonth),
        u32::from(now.wDay),
        u32::from(now.wYear),
    );
    editor.replace_selection(&stamp);
}

// ---- Format / View ----

fn apply_font(hwnd: HWND) {
    let Some(editor) = editor() else {
        return;
    };
    let settings = settings_snapshot();
    if let Err(e) = editor.apply_font(&settings, settings.zoom, window_dpi(hwnd)) {
        tracing::warn!(error = %e, "failed to apply font");
    }
}

fn update_menu_checks(hwnd: HWND) {
    let settings = settings_snapshot();
    let hmenu = unsafe { GetMenu(hwnd) };
    menu::update_checks(hmenu, &settings, i18n::get_language());
}

fn toggle_word_wrap(hwnd: HWND) {
    let wrap = {
        let mut state = state();
        state.settings.word_wrap = !state.settings.word_wrap;
        state.settings.word_wrap
    };
    if let Some(editor) = editor() {
        editor.set_word_wrap(wrap);
    }
    update_menu_checks(hwnd);
    persist_settings();
}

fn choose_font(hwnd: HWND) {
    let settings = settings_snapshot();
    let Some(choice) = dialogs::choose_font(hwnd, &settings, window_dpi(hwnd)) else {
        return;
    };
    {
        let mut state = state();
        state.settings.font_name = choice.name;
        state.settings.font_size = choice.size;
        state.settings.font_weight = choice.weight;
        state.settings.font_italic = choice.italic;
        state.settings.font_underline = choice.underline;
        state.settings = state.settings.clone().sanitized();
    }
    apply_font(hwnd);
    persist_settings();
}

fn set_zoom(hwnd: HWND, step: impl FnOnce(u32) -> u32) {
    {
        let mut state = state();
        state.settings.zoom = step(state.settings.zoom);
    }
    apply_font(hwnd);
    refresh_status(true);
}

/// Ctrl+mouse wheel; `delta` is the raw wheel delta.
pub fn zoom_by_wheel(hwnd: HWND, delta: i16) {
    if delta > 0 {
        set_zoom(hwnd, zoom::zoom_in);
    } else if delta < 0 {
        set_zoom(hwnd, zoom::zoom_out);
    }
}

fn toggle_status_bar(hwnd: HWND) {
    let visible = {
        let mut state = state();
        state.settings.show_status_bar = !state.settings.show_status_bar;
        state.settings.show_status_bar
    };
    if let Some(bar) = STATUS_BAR.get() {
        bar.set_visible(visible);
    }
    layout(hwnd);
    update_menu_checks(hwnd);
    refresh_status(true);
    persist_settings();
}

fn apply_topmost(hwnd: HWND, on_top: bool) {
    let insert_after = if on_top { HWND_TOPMOST } else { HWND_NOTOPMOST };
    unsafe {
        SetWindowPos(hwnd, insert_after, 0, 0, 0, 0, SWP_NOMOVE | SWP_NOSIZE);
    }
}

fn toggle_always_on_top(hwnd: HWND) {
    let on_top = {
        let mut state = state();
        state.settings.always_on_top = !state.settings.always_on_top;
        state.settings.always_on_top
    };
    apply_topmost(hwnd, on_top);
    update_menu_checks(hwnd);
    persist_settings();
}

fn apply_opacity(hwnd: HWND, alpha: u8) {
    unsafe {
        let style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE);
        if alpha == u8::MAX {
            SetWindowLongPtrW(hwnd, GWL_EXSTYLE, style & !(WS_EX_LAYERED as isize));
        } else {
            SetWindowLongPtrW(hwnd, GWL_EXSTYLE, style | WS_EX_LAYERED as isize);
            SetLayeredWindowAttributes(hwnd, 0, alpha, LWA_ALPHA);
        }
    }
}

fn choose_transparency(hwnd: HWND) {
    let current = state().settings.opacity_percent();
    let Some(percent) = prompt::prompt_number(
        hwnd,
        &get_string("DIALOG_TRANSPARENCY_TITLE"),
        &get_string("DIALOG_TRANSPARENCY_LABEL"),
        current,
    ) else {
        return;
    };
    let alpha = {
        let mut state = state();
        state.settings.set_opacity_percent(percent);
        state.settings.window_opacity
    };
    tracing::debug!(percent, alpha, "window opacity");
    apply_opacity(hwnd, alpha);
    persist_settings();
}

fn set_icons(hwnd: HWND, big: isize, small: isize) {
    unsafe {
        SendMessageW(hwnd, WM_SETICON, ICON_BIG, big);
        SendMessageW(hwnd, WM_SETICON, ICON_SMALL, small);
    }
    for (slot, icon) in CUSTOM_ICONS.iter().zip([big, small]) {
        let previous = slot.swap(icon, Ordering::Relaxed);
        if previous != 0 && previous != icon {
            unsafe {
                DestroyIcon(previous as _);
            }
        }
    }
}

fn apply_default_icon(hwnd: HWND) {
    let icon = unsafe { LoadIconW(std::ptr::null_mut(), IDI_APPLICATION) } as isize;
    unsafe {
        SendMessageW(hwnd, WM_SETICON, ICON_BIG, icon);
        SendMessageW(hwnd, WM_SETICON, ICON_SMALL, icon);
    }
    // shared system icon; only owned icons are destroyed
    for slot in &CUSTOM_ICONS {
        let previous = slot.swap(0, Ordering::Relaxed);
        if previous != 0 {
            unsafe {
                DestroyIcon(previous as _);
            }
        }
    }
}

fn load_icon(path: &Path, cx: i32, cy: i32) -> Result<isize> {
    let wide_path = to_wide(&path.to_string_lossy());
    let icon = unsafe {
        LoadImageW(
            std::ptr::null_mut(),
            wide_path.as_ptr(),
            IMAGE_ICON,
            cx,
            cy,
            LR_LOADFROMFILE,
        )
    };
    if icon.is_null() {
        return Err(AppError::Win32 {
            function: "LoadImageW",
            code: unsafe { GetLastError() },
        });
    }
    Ok(icon as isize)
}

fn apply_custom_icon(hwnd: HWND, path: &Path) -> Result<()> {
    let (big_cx, big_cy, small_cx, small_cy) = unsafe {
        (
            GetSystemMetrics(SM_CXICON),
            GetSystemMetrics(SM_CYICON),
            GetSystemMetrics(SM_CXSMICON),
            GetSystemMetrics(SM_CYSMICON),
        )
    };
    let big = load_icon(path, big_cx, big_cy)?;
    let small = match load_icon(path, small_cx, small_cy) {
        Ok(small) => small,
        Err(e) => {
            unsafe {
                DestroyIcon(big as _);
            }
            return Err(e);
        }
    };
    set_icons(hwnd, big, small);
    Ok(())
}

fn change_icon(hwnd: HWND) {
    let path = match dialogs::pick_icon_file(hwnd) {
        Ok(Some(path)) => path,
        Ok(None) => return,
        Err(e) => {
            report(hwnd, "MSG_CANNOT_LOAD_ICON", &e);
            return;
        }
    };
    if let Err(e) = apply_custom_icon(hwnd, &path) {
        report(hwnd, "MSG_CANNOT_LOAD_ICON", &e);
        return;
    }
    tracing::info!(path = %path.display(), "custom icon");
    state().settings.custom_icon = Some(path);
    persist_settings();
}

fn reset_icon(hwnd: HWND) {
    apply_default_icon(hwnd);
    state().settings.custom_icon = None;
    persist_settings();
}

fn switch_language(hwnd: HWND, language: Language) {
    i18n::set_language(language);
    let settings = {
        let mut state = state();
        state.settings.language = Some(language);
        state.settings.clone()
    };
    tracing::info!(?language, "language changed");
    menu::rebuild_menu(hwnd, &settings, language);
    refresh_title(hwnd);
    refresh_status(true);
    persist_settings();
}

// ---- Window lifecycle ----

/// `WM_INITMENUPOPUP`: gray out items that cannot run right now.
pub fn update_menu_state(hmenu: HMENU) {
    let Some(editor) = editor() else {
        return;
    };
    let has_selection = editor.has_selection();
    menu::set_enabled(hmenu, ID_EDIT_UNDO, editor.can_undo());
    menu::set_enabled(hmenu, ID_EDIT_REDO, editor.can_redo());
    menu::set_enabled(hmenu, ID_EDIT_CUT, has_selection);
    menu::set_enabled(hmenu, ID_EDIT_COPY, has_selection);
    menu::set_enabled(hmenu, ID_EDIT_DELETE, has_selection);
    let has_icon = state().settings.custom_icon.is_some();
    menu::set_enabled(hmenu, ID_VIEW_RESETICON, has_icon);
}

pub fn show_context_menu(hwnd: HWND, x: i32, y: i32) {
    let Some(editor) = editor() else {
        return;
    };
    crate::context_menu::show_context_menu(
        hwnd,
        x,
        y,
        editor.can_undo(),
        editor.has_selection(),
    );
}

/// A file dropped on the window or named on the command line.
pub fn open_external(hwnd: HWND, path: &Path) {
    if confirm_discard(hwnd) {
        open_path(hwnd, path, None);
    }
}

/// `WM_CLOSE`. Re-entrant requests while the save prompt is up are ignored.
pub fn on_close(hwnd: HWND) {
    if CLOSING.swap(true, Ordering::SeqCst) {
        return;
    }
    if confirm_discard(hwnd) {
        unsafe {
            DestroyWindow(hwnd);
        }
    } else {
        CLOSING.store(false, Ordering::SeqCst);
    }
}

/// Writes the settings on exit. A window that failed during `init` never
/// held the user's settings, so nothing is written.
fn save_on_exit(path: &Path) -> bool {
    if !INITIALIZED.load(Ordering::SeqCst) {
        tracing::warn!("startup did not complete, leaving settings file untouched");
        return false;
    }
    match settings_snapshot().save_to(path) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "failed to save settings");
            false
        }
    }
}

pub fn on_destroy() {
    save_on_exit(&Settings::config_path());
    tracing::info!("main window destroyed");
    unsafe {
        PostQuitMessage(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_written_on_exit_only_after_init() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        INITIALIZED.store(false, Ordering::SeqCst);
        assert!(!save_on_exit(&path));
        assert!(!path.exists());

        state().settings.font_name = "Cascadia Mono".to_string();
        INITIALIZED.store(true, Ordering::SeqCst);
        assert!(save_on_exit(&path));
        assert_eq!(Settings::load_from(&path).font_name, "Cascadia Mono");
    }
}
