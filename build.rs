// This file is part of the stargate package.
//
// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

// (terminfo name, capname, xterm-compatible control sequence)
const CAPABILITIES: &[(&str, &str, &str)] = &[
    ("bell", "bel", "\x07"),
    ("carriage_return", "cr", "\r"),
    ("clear_screen", "clear", "\x1b[H\x1b[2J"),
    ("clr_bol", "el1", "\x1b[1K"),
    ("clr_eol", "el", "\x1b[K"),
    ("clr_eos", "ed", "\x1b[J"),
    ("cursor_down", "cud1", "\n"),
    ("cursor_home", "home", "\x1b[H"),
    ("cursor_invisible", "civis", "\x1b[?25l"),
    ("cursor_left", "cub1", "\x08"),
    ("cursor_normal", "cnorm", "\x1b[?12l\x1b[?25h"),
    ("cursor_right", "cuf1", "\x1b[C"),
    ("cursor_up", "cuu1", "\x1b[A"),
    ("cursor_visible", "cvvis", "\x1b[?12;25h"),
    ("delete_character", "dch1", "\x1b[P"),
    ("delete_line", "dl1", "\x1b[M"),
    ("enter_am_mode", "smam", "\x1b[?7h"),
    ("enter_blink_mode", "blink", "\x1b[5m"),
    ("enter_bold_mode", "bold", "\x1b[1m"),
    ("enter_ca_mode", "smcup", "\x1b[?1049h\x1b[22;0;0t"),
    ("enter_dim_mode", "dim", "\x1b[2m"),
    ("enter_insert_mode", "smir", "\x1b[4h"),
    ("enter_italics_mode", "sitm", "\x1b[3m"),
    ("enter_reverse_mode", "rev", "\x1b[7m"),
    ("enter_secure_mode", "invis", "\x1b[8m"),
    ("enter_standout_mode", "smso", "\x1b[7m"),
    ("enter_underline_mode", "smul", "\x1b[4m"),
    ("exit_am_mode", "rmam", "\x1b[?7l"),
    ("exit_attribute_mode", "sgr0", "\x1b(B\x1b[m"),
    ("exit_ca_mode", "rmcup", "\x1b[?1049l\x1b[23;0;0t"),
    ("exit_insert_mode", "rmir", "\x1b[4l"),
    ("exit_italics_mode", "ritm", "\x1b[23m"),
    ("exit_standout_mode", "rmso", "\x1b[27m"),
    ("exit_underline_mode", "rmul", "\x1b[24m"),
    ("flash_screen", "flash", "\x1b[?5h\x1b[?5l"),
    ("insert_line", "il1", "\x1b[L"),
    ("keypad_local", "rmkx", "\x1b[?1l\x1b>"),
    ("keypad_xmit", "smkx", "\x1b[?1h\x1b="),
    ("orig_pair", "op", "\x1b[39;49m"),
    ("restore_cursor", "rc", "\x1b8"),
    ("save_cursor", "sc", "\x1b7"),
    ("scroll_forward", "ind", "\n"),
    ("scroll_reverse", "ri", "\x1bM"),
    ("tab", "ht", "\t"),
];

pub fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR").unwrap();

    let mut mf = File::create(Path::new(&out_dir).join("capability_map.rs")).unwrap();

    mf.write_all(
        "type CapabilityMap = phf::OrderedMap<&'static str, Capability>;\n\
         \n\
         static CAPABILITY_MAP: CapabilityMap = "
            .as_bytes(),
    )
    .unwrap();

    let mut phf_map = phf_codegen::OrderedMap::<&str>::new();
    for &(name, capname, sequence) in CAPABILITIES {
        let map_value = format!("Capability {{ name: {name:?}, sequence: {sequence:?} }}");
        phf_map.entry(name, map_value.clone());
        phf_map.entry(capname, map_value);
    }
    write!(mf, "{}", phf_map.build()).unwrap();
    mf.write_all(b";\n").unwrap();

    mf.flush().unwrap();
}
