use serde::{Deserialize, Serialize};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    Japanese,
    English,
}

#[cfg(windows)]
fn detect_system_language() -> Language {
    use windows::Win32::Globalization::GetUserDefaultUILanguage;
    unsafe {
        let lang = GetUserDefaultUILanguage();
        // Japanese language ID is 0x11 (LANG_JAPANESE = 17)
        if lang & 0xFF == 0x11 {
            Language::Japanese
        } else {
            Language::English
        }
    }
}

#[cfg(not(windows))]
fn detect_system_language() -> Language {
    Language::English
}

static CURRENT_LANGUAGE: Mutex<Language> = Mutex::new(Language::English);

/// Applies the saved preference, or the system UI language when unset.
pub fn init_language(saved: Option<Language>) -> Language {
    let lang = saved.unwrap_or_else(detect_system_language);
    set_language(lang);
    lang
}

pub fn get_language() -> Language {
    CURRENT_LANGUAGE
        .lock()
        .ok()
        .map(|l| *l)
        .unwrap_or(Language::English)
}

pub fn set_language(lang: Language) {
    if let Ok(mut current) = CURRENT_LANGUAGE.lock() {
        *current = lang;
    }
}

pub fn get_string(key: &str) -> String {
    lookup(get_language(), key).to_string()
}

/// Like [`get_string`], substituting `{name}` placeholders.
pub fn format_string(key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(get_string(key), |text, (name, value)| {
        text.replace(&format!("{{{name}}}"), value)
    })
}

pub fn lookup(lang: Language, key: &str) -> &'static str {
    match lang {
        Language::Japanese => get_japanese(key),
        Language::English => get_english(key),
    }
}

fn get_japanese(key: &str) -> &'static str {
    match key {
        "APP_NAME" => "メモ帳",
        "FILE_UNTITLED" => "無題",
        // Menu - File
        "MENU_FILE" => "ファイル(&F)",
        "MENU_NEW" => "新規(&N)\tCtrl+N",
        "MENU_OPEN" => "開く(&O)...\tCtrl+O",
        "MENU_SAVE" => "上書き保存(&S)\tCtrl+S",
        "MENU_SAVEAS" => "名前を付けて保存(&A)...\tCtrl+Shift+S",
        "MENU_RECENT" => "最近使ったファイル(&R)",
        "MENU_EXIT" => "終了(&X)",
        // Menu - Edit
        "MENU_EDIT" => "編集(&E)",
        "MENU_UNDO" => "元に戻す(&U)\tCtrl+Z",
        "MENU_REDO" => "やり直し(&R)\tCtrl+Y",
        "MENU_CUT" => "切り取り(&T)\tCtrl+X",
        "MENU_COPY" => "コピー(&C)\tCtrl+C",
        "MENU_PASTE" => "貼り付け(&P)\tCtrl+V",
        "MENU_DELETE" => "削除(&L)\tDel",
        "MENU_FIND" => "検索(&F)...\tCtrl+F",
        "MENU_FINDNEXT" => "次を検索(&N)\tF3",
        "MENU_FINDPREV" => "前を検索(&V)\tShift+F3",
        "MENU_REPLACE" => "置換(&H)...\tCtrl+H",
        "MENU_GOTO" => "行へ移動(&G)...\tCtrl+G",
        "MENU_SELECTALL" => "すべて選択(&A)\tCtrl+A",
        "MENU_TIMEDATE" => "日付と時刻(&D)\tF5",
        // Menu - Format
        "MENU_FORMAT" => "書式(&O)",
        "MENU_WORDWRAP" => "右端で折り返す(&W)",
        "MENU_FONT" => "フォント(&F)...",
        // Menu - View
        "MENU_VIEW" => "表示(&V)",
        "MENU_ZOOMIN" => "拡大(&I)\tCtrl+Plus",
        "MENU_ZOOMOUT" => "縮小(&O)\tCtrl+Minus",
        "MENU_ZOOMDEFAULT" => "既定のズームに戻す(&R)\tCtrl+0",
        "MENU_STATUSBAR" => "ステータスバー(&S)",
        "MENU_ALWAYSONTOP" => "常に手前に表示(&T)",
        "MENU_TRANSPARENCY" => "ウィンドウの透明度(&Y)...",
        "MENU_CHANGEICON" => "アイコンを変更(&C)...",
        "MENU_RESETICON" => "アイコンを元に戻す(&E)",
        // Menu - Language
        "MENU_LANGUAGE" => "言語(&L)",
        "MENU_LANG_EN" => "English(&E)",
        "MENU_LANG_JA" => "日本語(&J)",
        // Menu - Help
        "MENU_HELP" => "ヘルプ(&H)",
        "MENU_ABOUT" => "バージョン情報(&A)",
        // Context menu
        "CONTEXT_UNDO" => "元に戻す (Ctrl+Z)",
        "CONTEXT_CUT" => "切り取り (Ctrl+X)",
        "CONTEXT_COPY" => "コピー (Ctrl+C)",
        "CONTEXT_PASTE" => "貼り付け (Ctrl+V)",
        "CONTEXT_DELETE" => "削除 (Del)",
        "CONTEXT_SELECTALL" => "すべて選択 (Ctrl+A)",
        // File dialogs
        "FILE_DIALOG_OPEN" => "ファイルを開く",
        "FILE_DIALOG_SAVE" => "名前を付けて保存",
        "FILE_DIALOG_ICON" => "アイコンを選択",
        "FILE_FILTER_TEXT" => "テキスト ファイル (*.txt)",
        "FILE_FILTER_ALL" => "すべてのファイル (*.*)",
        "FILE_FILTER_ICON" => "アイコン (*.ico)",
        "FILE_ENCODING" => "文字コード:",
        "FILE_LINE_ENDING" => "改行コード:",
        "ENCODING_AUTO" => "自動検出",
        // Encodings and line endings
        "ENCODING_UTF8" => "UTF-8",
        "ENCODING_UTF8_BOM" => "UTF-8 (BOM 付き)",
        "ENCODING_UTF16LE" => "UTF-16 LE",
        "ENCODING_UTF16BE" => "UTF-16 BE",
        "ENCODING_ANSI" => "ANSI",
        "LINE_ENDING_CRLF" => "Windows (CRLF)",
        "LINE_ENDING_LF" => "Unix (LF)",
        "LINE_ENDING_CR" => "Macintosh (CR)",
        // Prompts
        "DIALOG_GOTO_TITLE" => "行へ移動",
        "DIALOG_GOTO_LABEL" => "行番号:",
        "DIALOG_TRANSPARENCY_TITLE" => "ウィンドウの透明度",
        "DIALOG_TRANSPARENCY_LABEL" => "不透明度 (10-100%):",
        "DIALOG_OK" => "OK",
        "DIALOG_CANCEL" => "キャンセル",
        // Messages
        "MSG_CANNOT_FIND" => "「{text}」が見つかりません。",
        "MSG_SAVE_CHANGES" => "{name} への変更内容を保存しますか?",
        "MSG_CANNOT_OPEN" => "ファイルを開けません。",
        "MSG_CANNOT_SAVE" => "ファイルを保存できません。",
        "MSG_CANNOT_LOAD_ICON" => "アイコンを読み込めません。",
        "MSG_ERROR" => "エラー",
        "MSG_ABOUT_TITLE" => "バージョン情報",
        "MSG_ABOUT" => "Legacy Notepad v{version}\n\n高速で軽量なテキストエディタ。\n\nRust と Win32 API で構築。",
        // Status bar
        "STATUS_LINE_COL" => "行 {line}、列 {col}",
        _ => "",
    }
}

fn get_english(key: &str) -> &'static str {
    match key {
        "APP_NAME" => "Notepad",
        "FILE_UNTITLED" => "Untitled",
        // Menu - File
        "MENU_FILE" => "&File",
        "MENU_NEW" => "&New\tCtrl+N",
        "MENU_OPEN" => "&Open...\tCtrl+O",
        "MENU_SAVE" => "&Save\tCtrl+S",
        "MENU_SAVEAS" => "Save &As...\tCtrl+Shift+S",
        "MENU_RECENT" => "&Recent Files",
        "MENU_EXIT" => "E&xit",
        // Menu - Edit
        "MENU_EDIT" => "&Edit",
        "MENU_UNDO" => "&Undo\tCtrl+Z",
        "MENU_REDO" => "&Redo\tCtrl+Y",
        "MENU_CUT" => "Cu&t\tCtrl+X",
        "MENU_COPY" => "&Copy\tCtrl+C",
        "MENU_PASTE" => "&Paste\tCtrl+V",
        "MENU_DELETE" => "De&lete\tDel",
        "MENU_FIND" => "&Find...\tCtrl+F",
        "MENU_FINDNEXT" => "Find &Next\tF3",
        "MENU_FINDPREV" => "Find Pre&vious\tShift+F3",
        "MENU_REPLACE" => "&Replace...\tCtrl+H",
        "MENU_GOTO" => "&Go To...\tCtrl+G",
        "MENU_SELECTALL" => "Select &All\tCtrl+A",
        "MENU_TIMEDATE" => "Time/&Date\tF5",
        // Menu - Format
        "MENU_FORMAT" => "F&ormat",
        "MENU_WORDWRAP" => "&Word Wrap",
        "MENU_FONT" => "&Font...",
        // Menu - View
        "MENU_VIEW" => "&View",
        "MENU_ZOOMIN" => "Zoom &In\tCtrl+Plus",
        "MENU_ZOOMOUT" => "Zoom &Out\tCtrl+Minus",
        "MENU_ZOOMDEFAULT" => "&Restore Default Zoom\tCtrl+0",
        "MENU_STATUSBAR" => "&Status Bar",
        "MENU_ALWAYSONTOP" => "Always on &Top",
        "MENU_TRANSPARENCY" => "Window Transparenc&y...",
        "MENU_CHANGEICON" => "&Change Icon...",
        "MENU_RESETICON" => "R&eset Icon",
        // Menu - Language
        "MENU_LANGUAGE" => "&Language",
        "MENU_LANG_EN" => "&English",
        "MENU_LANG_JA" => "&Japanese (日本語)",
        // Menu - Help
        "MENU_HELP" => "&Help",
        "MENU_ABOUT" => "&About Notepad",
        // Context menu
        "CONTEXT_UNDO" => "Undo (Ctrl+Z)",
        "CONTEXT_CUT" => "Cut (Ctrl+X)",
        "CONTEXT_COPY" => "Copy (Ctrl+C)",
        "CONTEXT_PASTE" => "Paste (Ctrl+V)",
        "CONTEXT_DELETE" => "Delete (Del)",
        "CONTEXT_SELECTALL" => "Select All (Ctrl+A)",
        // File dialogs
        "FILE_DIALOG_OPEN" => "Open",
        "FILE_DIALOG_SAVE" => "Save As",
        "FILE_DIALOG_ICON" => "Choose Icon",
        "FILE_FILTER_TEXT" => "Text Files (*.txt)",
        "FILE_FILTER_ALL" => "All Files (*.*)",
        "FILE_FILTER_ICON" => "Icons (*.ico)",
        "FILE_ENCODING" => "Encoding:",
        "FILE_LINE_ENDING" => "Line ending:",
        "ENCODING_AUTO" => "Auto-Detect",
        // Encodings and line endings
        "ENCODING_UTF8" => "UTF-8",
        "ENCODING_UTF8_BOM" => "UTF-8 with BOM",
        "ENCODING_UTF16LE" => "UTF-16 LE",
        "ENCODING_UTF16BE" => "UTF-16 BE",
        "ENCODING_ANSI" => "ANSI",
        "LINE_ENDING_CRLF" => "Windows (CRLF)",
        "LINE_ENDING_LF" => "Unix (LF)",
        "LINE_ENDING_CR" => "Macintosh (CR)",
        // Prompts
        "DIALOG_GOTO_TITLE" => "Go To Line",
        "DIALOG_GOTO_LABEL" => "Line number:",
        "DIALOG_TRANSPARENCY_TITLE" => "Window Transparency",
        "DIALOG_TRANSPARENCY_LABEL" => "Opacity (10-100%):",
        "DIALOG_OK" => "OK",
        "DIALOG_CANCEL" => "Cancel",
        // Messages
        "MSG_CANNOT_FIND" => "Cannot find \"{text}\"",
        "MSG_SAVE_CHANGES" => "Do you want to save changes to {name}?",
        "MSG_CANNOT_OPEN" => "Cannot open file.",
        "MSG_CANNOT_SAVE" => "Cannot save file.",
        "MSG_CANNOT_LOAD_ICON" => "Cannot load icon.",
        "MSG_ERROR" => "Error",
        "MSG_ABOUT_TITLE" => "About Notepad",
        "MSG_ABOUT" => "Legacy Notepad v{version}\n\nA fast, lightweight text editor.\n\nBuilt with Rust and the Win32 API.",
        // Status bar
        "STATUS_LINE_COL" => "Ln {line}, Col {col}",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEYS: &[&str] = &[
        "APP_NAME",
        "FILE_UNTITLED",
        "MENU_RECENT",
        "MENU_FINDPREV",
        "MENU_TIMEDATE",
        "MENU_CHANGEICON",
        "CONTEXT_DELETE",
        "FILE_LINE_ENDING",
        "ENCODING_UTF8_BOM",
        "LINE_ENDING_CR",
        "DIALOG_TRANSPARENCY_LABEL",
        "MSG_CANNOT_FIND",
        "MSG_ABOUT",
        "STATUS_LINE_COL",
    ];

    #[test]
    fn test_both_languages_cover_keys() {
        for key in KEYS {
            assert!(!lookup(Language::English, key).is_empty(), "en {key}");
            assert!(!lookup(Language::Japanese, key).is_empty(), "ja {key}");
        }
    }

    #[test]
    fn test_unknown_key_is_empty() {
        assert_eq!(lookup(Language::English, "NO_SUCH_KEY"), "");
    }

    #[test]
    fn test_placeholders_survive_in_both_languages() {
        for lang in [Language::English, Language::Japanese] {
            let text = lookup(lang, "STATUS_LINE_COL");
            assert!(text.contains("{line}") && text.contains("{col}"));
            assert!(lookup(lang, "MSG_CANNOT_FIND").contains("{text}"));
            assert!(lookup(lang, "MSG_SAVE_CHANGES").contains("{name}"));
        }
    }

    #[test]
    fn test_language_switch_and_formatting() {
        set_language(Language::English);
        assert_eq!(
            format_string("MSG_CANNOT_FIND", &[("text", "needle")]),
            "Cannot find \"needle\""
        );
        assert_eq!(
            format_string("STATUS_LINE_COL", &[("line", "3"), ("col", "14")]),
            "Ln 3, Col 14"
        );

        assert_eq!(init_language(Some(Language::Japanese)), Language::Japanese);
        assert_eq!(get_language(), Language::Japanese);
        assert_eq!(get_string("FILE_UNTITLED"), "無題");
        set_language(Language::English);
    }
}
