pub mod formatter;

pub use formatter::{
    format_json, format_question_list, format_report, format_thousands, score_band, score_bar,
    should_use_colors, wrap_text, ScoreBand,
};
