//! Nord palette, nord0 through nord14

use super::rgb;
use crate::theme::Theme;

pub fn default() -> Theme {
    let frost_teal = rgb(0x8fbcbb);
    let frost_blue = rgb(0x88c0d0);
    let aurora_red = rgb(0xbf616a);
    let aurora_green = rgb(0xa3be8c);

    Theme {
        bg0: rgb(0x2e3440),
        bg1: rgb(0x3b4252),
        bg2: rgb(0x434c5e),
        fg0: rgb(0xeceff4),
        fg1: rgb(0xe5e9f0),
        grey0: rgb(0x4c566a),
        grey1: rgb(0x5e687a),
        grey2: rgb(0xd8dee9),
        red: aurora_red,
        orange: rgb(0xd08770),
        yellow: rgb(0xebcb8b),
        green: aurora_green,
        aqua: frost_teal,
        blue: frost_blue,
        selection: rgb(0x434c5e),
        positive: aurora_green,
        negative: aurora_red,
        error: aurora_red,
        info: frost_blue,
        accent: frost_teal,
    }
}
