//! Gruvbox dark palette (morhetz/gruvbox, medium contrast)

use super::rgb;
use crate::theme::Theme;

pub fn dark() -> Theme {
    let red = rgb(0xea6962);
    let green = rgb(0xa9b665);
    let blue = rgb(0x7daea3);
    let aqua = rgb(0x89b482);

    Theme {
        bg0: rgb(0x282828),
        bg1: rgb(0x32302f),
        bg2: rgb(0x45403d),
        fg0: rgb(0xd4be98),
        fg1: rgb(0xddc7a1),
        grey0: rgb(0x7c6f64),
        grey1: rgb(0x928374),
        grey2: rgb(0xa89984),
        red,
        orange: rgb(0xe78a4e),
        yellow: rgb(0xd8a657),
        green,
        aqua,
        blue,
        selection: rgb(0x45403d),
        positive: green,
        negative: red,
        error: red,
        info: blue,
        accent: aqua,
    }
}
