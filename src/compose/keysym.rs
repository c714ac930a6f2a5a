//! Keysym naming, UTF-8 conversion, and modifier classification.
//!
//! No published crate ships a full X11 keysym name table, so this module hand-maintains one.
//! The numeric namespace matches `xkbcommon/xkbcommon-keysyms.h`; only a practical subset of
//! names is tabulated rather than the full ~2000-entry header.

pub use xkeysym::Keysym;

/// Raw keysym value constants, named `KEY_<Name>` the way generated XKB keysym headers do.
#[allow(non_upper_case_globals)]
pub mod keysyms {
    pub const KEY_NoSymbol: u32 = 0x0000_0000;
    pub const KEY_Return: u32 = 0xFF0D;
    pub const KEY_Tab: u32 = 0xFF09;
    pub const KEY_BackSpace: u32 = 0xFF08;
    pub const KEY_Escape: u32 = 0xFF1B;
    pub const KEY_Multi_key: u32 = 0xFF20;
    pub const KEY_Num_Lock: u32 = 0xFF7F;

    pub const KEY_Shift_L: u32 = 0xFFE1;
    pub const KEY_Shift_R: u32 = 0xFFE2;
    pub const KEY_Control_L: u32 = 0xFFE3;
    pub const KEY_Control_R: u32 = 0xFFE4;
    pub const KEY_Caps_Lock: u32 = 0xFFE5;
    pub const KEY_Shift_Lock: u32 = 0xFFE6;
    pub const KEY_Meta_L: u32 = 0xFFE7;
    pub const KEY_Meta_R: u32 = 0xFFE8;
    pub const KEY_Alt_L: u32 = 0xFFE9;
    pub const KEY_Alt_R: u32 = 0xFFEA;
    pub const KEY_Super_L: u32 = 0xFFEB;
    pub const KEY_Super_R: u32 = 0xFFEC;
    pub const KEY_Hyper_L: u32 = 0xFFED;
    pub const KEY_Hyper_R: u32 = 0xFFEE;
    pub const KEY_ISO_Level3_Shift: u32 = 0xFE03;

    pub const KEY_dead_grave: u32 = 0xFE50;
    pub const KEY_dead_acute: u32 = 0xFE51;
    pub const KEY_dead_circumflex: u32 = 0xFE52;
    pub const KEY_dead_tilde: u32 = 0xFE53;
    pub const KEY_dead_macron: u32 = 0xFE54;
    pub const KEY_dead_breve: u32 = 0xFE55;
    pub const KEY_dead_abovedot: u32 = 0xFE56;
    pub const KEY_dead_diaeresis: u32 = 0xFE57;
    pub const KEY_dead_abovering: u32 = 0xFE58;
    pub const KEY_dead_doubleacute: u32 = 0xFE59;
    pub const KEY_dead_caron: u32 = 0xFE5A;
    pub const KEY_dead_cedilla: u32 = 0xFE5B;
    pub const KEY_dead_ogonek: u32 = 0xFE5C;

    pub const KEY_space: u32 = 0x0020;
    pub const KEY_apostrophe: u32 = 0x0027;
    pub const KEY_comma: u32 = 0x002C;
    pub const KEY_minus: u32 = 0x002D;
    pub const KEY_period: u32 = 0x002E;
    pub const KEY_slash: u32 = 0x002F;
    pub const KEY_at: u32 = 0x0040;
    pub const KEY_asciitilde: u32 = 0x007E;
    pub const KEY_acute: u32 = 0x00B4;
    pub const KEY_diaeresis: u32 = 0x00A8;
    pub const KEY_grave: u32 = 0x0060;

    macro_rules! digit_keysyms {
        ($($name:ident = $ch:literal;)*) => {
            $(pub const $name: u32 = $ch as u32;)*
        };
    }
    digit_keysyms! {
        KEY_0 = '0'; KEY_1 = '1'; KEY_2 = '2'; KEY_3 = '3'; KEY_4 = '4';
        KEY_5 = '5'; KEY_6 = '6'; KEY_7 = '7'; KEY_8 = '8'; KEY_9 = '9';
    }

    macro_rules! letter_keysyms {
        ($($name:ident = $ch:literal;)*) => {
            $(pub const $name: u32 = $ch as u32;)*
        };
    }
    letter_keysyms! {
        KEY_a = 'a'; KEY_b = 'b'; KEY_c = 'c'; KEY_d = 'd'; KEY_e = 'e';
        KEY_f = 'f'; KEY_g = 'g'; KEY_h = 'h'; KEY_i = 'i'; KEY_j = 'j';
        KEY_k = 'k'; KEY_l = 'l'; KEY_m = 'm'; KEY_n = 'n'; KEY_o = 'o';
        KEY_p = 'p'; KEY_q = 'q'; KEY_r = 'r'; KEY_s = 's'; KEY_t = 't';
        KEY_u = 'u'; KEY_v = 'v'; KEY_w = 'w'; KEY_x = 'x'; KEY_y = 'y';
        KEY_z = 'z';
        KEY_A = 'A'; KEY_B = 'B'; KEY_C = 'C'; KEY_D = 'D'; KEY_E = 'E';
        KEY_F = 'F'; KEY_G = 'G'; KEY_H = 'H'; KEY_I = 'I'; KEY_J = 'J';
        KEY_K = 'K'; KEY_L = 'L'; KEY_M = 'M'; KEY_N = 'N'; KEY_O = 'O';
        KEY_P = 'P'; KEY_Q = 'Q'; KEY_R = 'R'; KEY_S = 'S'; KEY_T = 'T';
        KEY_U = 'U'; KEY_V = 'V'; KEY_W = 'W'; KEY_X = 'X'; KEY_Y = 'Y';
        KEY_Z = 'Z';
    }
}

/// Lowest and highest modifier keysyms in the `xkbcommon-keysyms.h` modifier block
/// (`Shift_L` .. `Hyper_R`), plus the handful of locking/level-shift keys outside that block.
fn is_modifier_raw(raw: u32) -> bool {
    use keysyms::*;
    matches!(raw, KEY_Shift_L..=KEY_Hyper_R)
        || raw == KEY_Num_Lock
        || raw == KEY_ISO_Level3_Shift
}

/// Returns whether `keysym` is a modifier, per `xkb_keysym_is_modifier`.
#[must_use]
pub fn is_modifier(keysym: Keysym) -> bool {
    is_modifier_raw(keysym.raw())
}

/// Resolves a Compose-file keysym name (the text inside `<...>`, or a bareword on the
/// right-hand side) to a [`Keysym`]. Returns `None` for unknown names.
#[must_use]
pub fn from_name(name: &str) -> Option<Keysym> {
    use keysyms::*;
    let raw = match name {
        "NoSymbol" => KEY_NoSymbol,
        "Return" => KEY_Return,
        "Tab" => KEY_Tab,
        "BackSpace" => KEY_BackSpace,
        "Escape" => KEY_Escape,
        "Multi_key" => KEY_Multi_key,
        "Num_Lock" => KEY_Num_Lock,
        "Shift_L" => KEY_Shift_L,
        "Shift_R" => KEY_Shift_R,
        "Control_L" => KEY_Control_L,
        "Control_R" => KEY_Control_R,
        "Caps_Lock" => KEY_Caps_Lock,
        "Shift_Lock" => KEY_Shift_Lock,
        "Meta_L" => KEY_Meta_L,
        "Meta_R" => KEY_Meta_R,
        "Alt_L" => KEY_Alt_L,
        "Alt_R" => KEY_Alt_R,
        "Super_L" => KEY_Super_L,
        "Super_R" => KEY_Super_R,
        "Hyper_L" => KEY_Hyper_L,
        "Hyper_R" => KEY_Hyper_R,
        "ISO_Level3_Shift" => KEY_ISO_Level3_Shift,
        "dead_grave" => KEY_dead_grave,
        "dead_acute" => KEY_dead_acute,
        "dead_circumflex" => KEY_dead_circumflex,
        "dead_tilde" => KEY_dead_tilde,
        "dead_macron" => KEY_dead_macron,
        "dead_breve" => KEY_dead_breve,
        "dead_abovedot" => KEY_dead_abovedot,
        "dead_diaeresis" => KEY_dead_diaeresis,
        "dead_abovering" => KEY_dead_abovering,
        "dead_doubleacute" => KEY_dead_doubleacute,
        "dead_caron" => KEY_dead_caron,
        "dead_cedilla" => KEY_dead_cedilla,
        "dead_ogonek" => KEY_dead_ogonek,
        "space" => KEY_space,
        "apostrophe" | "quoteright" => KEY_apostrophe,
        "comma" => KEY_comma,
        "minus" => KEY_minus,
        "period" => KEY_period,
        "slash" => KEY_slash,
        "at" => KEY_at,
        "asciitilde" => KEY_asciitilde,
        "acute" => KEY_acute,
        "diaeresis" => KEY_diaeresis,
        "grave" | "quoteleft" => KEY_grave,
        "0" => KEY_0,
        "1" => KEY_1,
        "2" => KEY_2,
        "3" => KEY_3,
        "4" => KEY_4,
        "5" => KEY_5,
        "6" => KEY_6,
        "7" => KEY_7,
        "8" => KEY_8,
        "9" => KEY_9,
        "a" => KEY_a,
        "b" => KEY_b,
        "c" => KEY_c,
        "d" => KEY_d,
        "e" => KEY_e,
        "f" => KEY_f,
        "g" => KEY_g,
        "h" => KEY_h,
        "i" => KEY_i,
        "j" => KEY_j,
        "k" => KEY_k,
        "l" => KEY_l,
        "m" => KEY_m,
        "n" => KEY_n,
        "o" => KEY_o,
        "p" => KEY_p,
        "q" => KEY_q,
        "r" => KEY_r,
        "s" => KEY_s,
        "t" => KEY_t,
        "u" => KEY_u,
        "v" => KEY_v,
        "w" => KEY_w,
        "x" => KEY_x,
        "y" => KEY_y,
        "z" => KEY_z,
        "A" => KEY_A,
        "B" => KEY_B,
        "C" => KEY_C,
        "D" => KEY_D,
        "E" => KEY_E,
        "F" => KEY_F,
        "G" => KEY_G,
        "H" => KEY_H,
        "I" => KEY_I,
        "J" => KEY_J,
        "K" => KEY_K,
        "L" => KEY_L,
        "M" => KEY_M,
        "N" => KEY_N,
        "O" => KEY_O,
        "P" => KEY_P,
        "Q" => KEY_Q,
        "R" => KEY_R,
        "S" => KEY_S,
        "T" => KEY_T,
        "U" => KEY_U,
        "V" => KEY_V,
        "W" => KEY_W,
        "X" => KEY_X,
        "Y" => KEY_Y,
        "Z" => KEY_Z,
        _ if name.len() > 1 && name.starts_with('U') && name[1..].chars().all(|c| c.is_ascii_hexdigit()) => {
            let codepoint = u32::from_str_radix(&name[1..], 16).ok()?;
            0x0100_0000 + codepoint
        }
        _ if name.len() > 2 && name.starts_with("0x") => u32::from_str_radix(&name[2..], 16).ok()?,
        _ => return None,
    };
    Some(Keysym::new(raw))
}

/// Converts a keysym to its UTF-8 representation, the way `xkb_keysym_to_utf8` does: ASCII and
/// Latin-1 keysyms map directly onto their codepoint, keysyms in the Unicode-mapped range
/// (`0x01000100..=0x0110FFFF`) map onto `raw - 0x01000000`, and anything else (dead keys,
/// modifiers, function keys) has no textual representation.
#[must_use]
pub fn to_utf8(keysym: Keysym) -> Option<String> {
    let raw = keysym.raw();
    let codepoint = match raw {
        0x0020..=0x00FF => raw,
        0x0100_0100..=0x0110_FFFF => raw - 0x0100_0000,
        _ => return None,
    };
    char::from_u32(codepoint).map(|c| c.to_string())
}
