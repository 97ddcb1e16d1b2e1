//! Terminal output with CI fallback
//!
//! Uses `cliclack` for spinners and step logs in an interactive terminal,
//! and plain `[OK]`/`[WARN]` lines everywhere else.
//!
//! ```rust,ignore
//! use refswitch::ui::{self, ReadProgress, UiContext};
//!
//! let ctx = UiContext::detect();
//! ui::intro(&ctx, "refswitch");
//!
//! let progress = ReadProgress::new(&ctx, "local projects");
//! progress.on_read("Lib");
//! progress.finish();
//!
//! ui::step_ok(&ctx, "App.csproj: Lib -> ../libs/Lib/Lib.csproj");
//! ui::outro_success(&ctx, "Attached 1 project(s) under 'external'");
//! ```

mod context;
mod output;
mod progress;
mod theme;

pub use context::UiContext;
pub use output::{
    intro, key_value, outro_success, remark, section, step_error_detail, step_ok,
    step_ok_detail, step_warn, step_warn_hint,
};
pub use progress::{ReadProgress, TaskSpinner};
pub use theme::{init_theme, RefswitchTheme};
