pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{citation, dim, error, header, info, muted, section, success, warn};
pub use table::{TableBuilder, favorites_table, settings_table};
pub use theme::{Theme, theme};
