pub struct Icons;

impl Icons {
    pub const BOLT: &str = "⚡";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STAR: &str = "⭐";
    pub const SEARCH: &str = "🔍";
    pub const GLOBE: &str = "🌍";
    pub const BOOK: &str = "📖";
    pub const GEAR: &str = "⚙️";
    pub const DATABASE: &str = "🗄️";
    pub const PERSON: &str = "👤";
    pub const SUN: &str = "☀️";
    pub const MOON: &str = "🌙";
}
