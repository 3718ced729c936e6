mod formatter;

pub use formatter::{
    format_catalog, format_detail, format_ranking, format_total, should_use_colors,
};
