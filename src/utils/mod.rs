mod format_utils;
mod maths_utils;
mod time_utils;

pub use format_utils::{CurrencyStyle, format_currency, group_thousands};
pub use maths_utils::{discount_pct, equal_share, round_to};
pub use time_utils::{TimeUtils, epoch_ms_to_local_string, now_timestamp_ms};
