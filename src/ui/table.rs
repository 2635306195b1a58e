//! Tabular output.
//!
//! Cells are rendered through the style engine first, so colors and symbols
//! follow the stdout profile; `comfy-table` handles column widths and ignores
//! escape sequences when measuring. A second, color-free layout of the same
//! cells is what the recorder sees.

use super::Ui;
use crate::error::UiError;
use crate::tui::capability::CapabilityProfile;
use crate::tui::channel::{OutputRequest, Target};
use crate::tui::style::{render, Fragment, Layout};
use comfy_table::{presets, Table};

/// Lay out `rows` of fragment cells under `headers`.
pub fn format_table(rows: &[Vec<Vec<Fragment>>], headers: &[&str], profile: &CapabilityProfile) -> String {
    let mut table = Table::new();
    table.load_preset(if profile.unicode_enabled {
        presets::UTF8_HORIZONTAL_ONLY
    } else {
        presets::ASCII_HORIZONTAL_ONLY
    });
    if !headers.is_empty() {
        table.set_header(headers.to_vec());
    }
    for row in rows {
        table.add_row(row.iter().map(|cell| render(cell, profile)).collect::<Vec<_>>());
    }
    table.to_string()
}

impl Ui {
    /// Print a table on stdout as one atomic block. Hidden when quiet.
    pub fn info_table(&self, rows: &[Vec<Vec<Fragment>>], headers: &[&str]) -> Result<(), UiError> {
        if self.config().quiet {
            return Ok(());
        }
        let profile = self.capabilities().stdout;
        let text = format_table(rows, headers, &profile);
        let plain = format_table(
            rows,
            headers,
            &CapabilityProfile {
                color_enabled: false,
                ..profile
            },
        );
        self.channel().emit(
            &OutputRequest::new(vec![Fragment::plain(text)])
                .with_layout(Layout::default())
                .to(Target::Stdout)
                .with_plain_text(plain),
        )
    }
}
