//! Console color markup understood by the game server console.
//!
//! The facade never applies these. Callers may embed them in their own
//! messages, e.g. `format!("{COLOR_RED}offline{COLOR_RESET}")`.

pub const COLOR_RED: &str = "[c=FF0000]";
pub const COLOR_GREEN: &str = "[c=00FF00]";
pub const COLOR_YELLOW: &str = "[c=FFFF00]";
pub const COLOR_BLUE: &str = "[c=0000FF]";
pub const COLOR_RESET: &str = "[/c]";
