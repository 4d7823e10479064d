use serde::Serialize;

const DEFAULT_VIEWPORT_WIDTH: f64 = 1440.0;
const DEFAULT_VIEWPORT_HEIGHT: f64 = 900.0;
/// Card width over card height.
const CARD_ASPECT: f64 = 3.0 / 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct LayoutPreset {
    gap: f64,
    min_card_width: f64,
    max_card_width: f64,
    sidebar_offset: f64,
}

fn preset_for(width: f64) -> LayoutPreset {
    let (gap, min_card_width, max_card_width, sidebar_offset) = match width {
        w if w > 0.0 && w <= 640.0 => (12.0, 120.0, 180.0, 0.0),
        w if w > 0.0 && w <= 900.0 => (16.0, 140.0, 220.0, 0.0),
        w if w > 0.0 && w <= 1280.0 => (18.0, 150.0, 260.0, 0.0),
        _ => (22.0, 170.0, 320.0, 360.0),
    };
    LayoutPreset {
        gap,
        min_card_width,
        max_card_width,
        sidebar_offset,
    }
}

/// Column count for `total_cards` on a viewport `width` pixels wide.
pub fn columns_for(total_cards: usize, width: f64) -> usize {
    let desired = match total_cards {
        0..=4 => 2,
        5..=6 => 3,
        7..=12 => 4,
        _ => 5,
    };
    let clamped = match width {
        w if w > 0.0 && w <= 640.0 => desired.min(2),
        w if w > 0.0 && w <= 900.0 => desired.min(3),
        w if w > 0.0 && w <= 1280.0 => desired.min(4),
        _ => desired,
    };
    clamped.max(2)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardMetrics {
    pub columns: usize,
    pub rows: usize,
    /// Spacing between cards in both directions.
    pub gap: f64,
    pub card_width: f64,
    pub card_height: f64,
    pub board_width: f64,
    pub board_height: f64,
    pub padding_horizontal: f64,
    pub padding_vertical: f64,
}

/// Fits `total_cards` into the viewport at a fixed 3:4 aspect.
///
/// Zero (or negative) dimensions fall back to a 1440×900 desktop viewport.
pub fn board_metrics(viewport_width: f64, viewport_height: f64, total_cards: usize) -> BoardMetrics {
    let preset = preset_for(viewport_width);
    let columns = columns_for(total_cards, viewport_width);
    let rows = total_cards.div_ceil(columns).max(1);

    let width = if viewport_width > 0.0 {
        viewport_width
    } else {
        DEFAULT_VIEWPORT_WIDTH
    };
    let height = if viewport_height > 0.0 {
        viewport_height
    } else {
        DEFAULT_VIEWPORT_HEIGHT
    };

    let board_height_target = (height * 0.58).min(height - 180.0).max(320.0);
    let padding_vertical = (height * 0.02).max(16.0);
    let reserved_space = (height * 0.35).max(240.0);
    let max_board_height = (height - reserved_space).max(260.0);
    let board_height = board_height_target.min(max_board_height);
    let usable_height = (board_height - padding_vertical * 2.0).max(220.0);

    // Short viewports squeeze the preset gap down to 8% of the usable height.
    let max_gap = (usable_height * 0.08).max(12.0);
    let gap = preset.gap.max(12.0).min(max_gap);

    let shell_padding = (width * 0.06).max(72.0);
    let available_width = (width - preset.sidebar_offset - shell_padding).max(320.0);
    let padding_horizontal = (width * 0.02)
        .max(16.0)
        .min((available_width - 240.0) / 2.0)
        .max(16.0);
    let usable_width = (available_width - padding_horizontal * 2.0).max(220.0);

    let cols = columns as f64;
    let rows_f = rows as f64;

    let mut card_width = ((usable_width - gap * (cols - 1.0)) / cols)
        .max(preset.min_card_width)
        .min(preset.max_card_width);
    let mut card_height = card_width / CARD_ASPECT;

    let allowed_height = (usable_height - gap * (rows_f - 1.0)) / rows_f;
    if allowed_height.is_finite() {
        card_height = card_height.min(allowed_height.max(120.0));
        card_width = card_height * CARD_ASPECT;
    }

    let content_width = card_width * cols + gap * (cols - 1.0);
    if content_width > usable_width {
        card_width *= usable_width / content_width;
        card_height = card_width / CARD_ASPECT;
    }

    BoardMetrics {
        columns,
        rows,
        gap,
        card_width,
        card_height,
        board_width: available_width,
        board_height,
        padding_horizontal,
        padding_vertical,
    }
}
