// Application-specific constants only
// Windows API constants that windows-sys does not expose (or exposes under a
// feature we do not enable) are declared here as plain numbers.

// Icon constants
pub const ICON_BIG: usize = 1;
pub const ICON_SMALL: usize = 0;

// Window geometry
pub const MAIN_WINDOW_WIDTH: i32 = 800;
pub const MAIN_WINDOW_HEIGHT: i32 = 600;
pub const MIN_TRACK_WIDTH: i32 = 230;

// Window styles
pub const ES_MULTILINE: u32 = 0x0004;
pub const ES_AUTOVSCROLL: u32 = 0x0040;
pub const ES_AUTOHSCROLL: u32 = 0x0080;
pub const ES_NOHIDESEL: u32 = 0x0100;
pub const ES_NUMBER: u32 = 0x2000;
pub const ES_WANTRETURN: u32 = 0x1000;
pub const SS_LEFT: u32 = 0x0000;
pub const SS_RIGHT: u32 = 0x0002;
pub const SS_CENTERIMAGE: u32 = 0x0200;
pub const BS_DEFPUSHBUTTON: u32 = 0x0001;

// Edit / RichEdit messages
pub const EM_SETSEL: u32 = 0x00B1;
pub const EM_SCROLLCARET: u32 = 0x00B7;
pub const EM_GETMODIFY: u32 = 0x00B8;
pub const EM_SETMODIFY: u32 = 0x00B9;
pub const EM_CANUNDO: u32 = 0x00C6;
pub const EM_UNDO: u32 = 0x00C7;
pub const EM_REPLACESEL: u32 = 0x00C2;
pub const EM_EMPTYUNDOBUFFER: u32 = 0x00CD;
pub const EM_SETMARGINS: u32 = 0x00D3;
pub const EM_EXGETSEL: u32 = 0x0434;
pub const EM_EXLIMITTEXT: u32 = 0x0435;
pub const EM_EXSETSEL: u32 = 0x0437;
pub const EM_SETCHARFORMAT: u32 = 0x0444;
pub const EM_SETEVENTMASK: u32 = 0x0445;
pub const EM_SETTARGETDEVICE: u32 = 0x0448;
pub const EM_REDO: u32 = 0x0454;
pub const EM_CANREDO: u32 = 0x0455;
pub const EM_SETTEXTMODE: u32 = 0x0459;
pub const EM_GETTEXTEX: u32 = 0x045E;
pub const EM_GETTEXTLENGTHEX: u32 = 0x045F;
pub const EM_SETLANGOPTIONS: u32 = 0x0478;
pub const EM_GETLANGOPTIONS: u32 = 0x0479;
pub const EN_CHANGE: u32 = 0x0300;
pub const ENM_CHANGE: u32 = 0x0001;
pub const EC_LEFTMARGIN: usize = 0x0001;
pub const IMF_AUTOFONT: u32 = 0x0002;
pub const IMF_DUALFONT: u32 = 0x0080;
pub const TM_PLAINTEXT: usize = 0x0001;
pub const TM_MULTILEVELUNDO: usize = 0x0008;
pub const TM_MULTICODEPAGE: usize = 0x0020;
pub const GT_DEFAULT: u32 = 0;
pub const GTL_PRECISE: u32 = 2;
pub const GTL_NUMCHARS: u32 = 8;
pub const CP_UNICODE: u32 = 1200;

// CHARFORMAT2 constants
pub const SCF_DEFAULT: usize = 0x0000;
pub const SCF_ALL: usize = 0x0004;
pub const CFM_BOLD: u32 = 0x0000_0001;
pub const CFM_ITALIC: u32 = 0x0000_0002;
pub const CFM_UNDERLINE: u32 = 0x0000_0004;
pub const CFM_WEIGHT: u32 = 0x0040_0000;
pub const CFM_FACE: u32 = 0x2000_0000;
pub const CFM_SIZE: u32 = 0x8000_0000;
pub const CFE_BOLD: u32 = 0x0001;
pub const CFE_ITALIC: u32 = 0x0002;
pub const CFE_UNDERLINE: u32 = 0x0004;

// Common dialog flags
pub const CF_SCREENFONTS: u32 = 0x0000_0001;
pub const CF_INITTOLOGFONTSTRUCT: u32 = 0x0000_0040;
pub const CF_EFFECTS: u32 = 0x0000_0100;
pub const CF_LIMITSIZE: u32 = 0x0000_2000;
pub const FR_DOWN: u32 = 0x0000_0001;
pub const FR_MATCHCASE: u32 = 0x0000_0004;
pub const FR_FINDNEXT: u32 = 0x0000_0008;
pub const FR_REPLACE: u32 = 0x0000_0010;
pub const FR_REPLACEALL: u32 = 0x0000_0020;
pub const FR_DIALOGTERM: u32 = 0x0000_0040;
pub const FR_HIDEWHOLEWORD: u32 = 0x0001_0000;

// Accelerator flags (ACCEL::fVirt)
pub const FVIRTKEY: u8 = 0x01;
pub const FSHIFT: u8 = 0x04;
pub const FCONTROL: u8 = 0x08;

// Virtual keys used by accelerators and the editor subclass
pub const VK_BACK: u16 = 0x08;
pub const VK_DELETE: u16 = 0x2E;
pub const VK_CONTROL: i32 = 0x11;
pub const VK_F3: u16 = 0x72;
pub const VK_F5: u16 = 0x74;
pub const VK_OEM_PLUS: u16 = 0xBB;
pub const VK_OEM_MINUS: u16 = 0xBD;
pub const VK_ADD: u16 = 0x6B;
pub const VK_SUBTRACT: u16 = 0x6D;
pub const VK_NUMPAD0: u16 = 0x60;

// WM_CHAR sent for Ctrl+Backspace by some keyboard layouts
pub const CHAR_CTRL_BACKSPACE: usize = 127;

// Menu command IDs
pub const ID_FILE_NEW: u16 = 100;
pub const ID_FILE_OPEN: u16 = 101;
pub const ID_FILE_SAVE: u16 = 102;
pub const ID_FILE_SAVEAS: u16 = 103;
pub const ID_FILE_EXIT: u16 = 104;

pub const ID_EDIT_UNDO: u16 = 200;
pub const ID_EDIT_REDO: u16 = 201;
pub const ID_EDIT_CUT: u16 = 202;
pub const ID_EDIT_COPY: u16 = 203;
pub const ID_EDIT_PASTE: u16 = 204;
pub const ID_EDIT_DELETE: u16 = 205;
pub const ID_EDIT_FIND: u16 = 206;
pub const ID_EDIT_FINDNEXT: u16 = 207;
pub const ID_EDIT_FINDPREV: u16 = 208;
pub const ID_EDIT_REPLACE: u16 = 209;
pub const ID_EDIT_GOTO: u16 = 210;
pub const ID_EDIT_SELECTALL: u16 = 211;
pub const ID_EDIT_TIMEDATE: u16 = 212;

pub const ID_FORMAT_WORDWRAP: u16 = 300;
pub const ID_FORMAT_FONT: u16 = 301;

pub const ID_VIEW_ZOOMIN: u16 = 400;
pub const ID_VIEW_ZOOMOUT: u16 = 401;
pub const ID_VIEW_ZOOMDEFAULT: u16 = 402;
pub const ID_VIEW_STATUSBAR: u16 = 403;
pub const ID_VIEW_ALWAYSONTOP: u16 = 404;
pub const ID_VIEW_TRANSPARENCY: u16 = 405;
pub const ID_VIEW_CHANGEICON: u16 = 406;
pub const ID_VIEW_RESETICON: u16 = 407;

pub const ID_LANG_ENGLISH: u16 = 500;
pub const ID_LANG_JAPANESE: u16 = 501;

pub const ID_HELP_ABOUT: u16 = 600;

/// Recent file `n` (0-based) uses `ID_FILE_RECENT_BASE + n`.
pub const ID_FILE_RECENT_BASE: u16 = 1000;

// Child control IDs
pub const IDC_EDITOR: u16 = 1;
pub const IDC_PROMPT_EDIT: u16 = 1001;
pub const IDOK: u16 = 1;
pub const IDCANCEL: u16 = 2;
