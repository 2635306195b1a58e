//! Lineout: a line-oriented console output and interaction toolkit.
//!
//! Styled, symbol-decorated status lines that degrade to plain ASCII on
//! limited streams, validated interactive prompts, and a recorder that lets
//! tests capture everything the program would print.
//!
//! # Quick start
//!
//! ```no_run
//! use lineout::config::UiConfig;
//! use lineout::tui::{symbols, Fragment};
//! use lineout::ui::Ui;
//!
//! # fn example() -> Result<(), lineout::error::UiError> {
//! let ui = Ui::setup(UiConfig::default())?;
//! ui.info_1(vec!["Building".into(), Fragment::symbol(&symbols::CHECK)])?;
//! ui.warning(vec!["disk almost full".into()])?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod suggest;
#[cfg(test)]
pub mod testsupport;
pub mod textutil;
pub mod timer;
pub mod tui;
pub mod ui;
