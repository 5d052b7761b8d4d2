// Pension Calculator - Core Library
// Exposes the calculator and the interactive shell for the binary and tests

pub mod error;
pub mod period;
pub mod clock;
pub mod rules;
pub mod calculator;
pub mod prompt;
pub mod shell;

// Arrow-key menu only exists when the TUI feature is enabled
#[cfg(feature = "tui")]
pub mod ui;

// Re-export commonly used types
pub use error::{PensionError, Result};
pub use period::{add_years, Period};
pub use clock::{Clock, FixedClock, SystemClock};
pub use rules::PensionRules;
pub use calculator::{
    BirthInfo, EligibilityResult, Gender,
    current_age, labor_start_date, contributed_weeks,
    required_pension_age, required_minimum_weeks,
    evaluate, evaluate_with,
};
pub use prompt::{EditorReader, LineReader, LineSelector, MenuState, OptionSelector};
pub use shell::{Shell, ShellConfig};

#[cfg(feature = "tui")]
pub use ui::ArrowSelector;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
