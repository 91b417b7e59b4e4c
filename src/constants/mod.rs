use std::{sync::LazyLock, time::Duration};

pub mod mods;
pub mod version;

pub static POISE_VERSION: &str = "0.6.1";
pub static STARTUP_TIME: LazyLock<std::time::SystemTime> =
    LazyLock::new(std::time::SystemTime::now);

pub static DEFAULT_PREFIX: &str = "t>";

/// how long a user has to pick an entry from a topic prompt.
pub const SELECTION_TIMEOUT: Duration = Duration::from_secs(60);

/// quiet period after the last file event before a menu file is reloaded.
pub const WATCH_SETTLE: Duration = Duration::from_millis(500);

/// discord rejects string select menus with more options than this.
pub const MAX_MENU_OPTIONS: usize = 25;
