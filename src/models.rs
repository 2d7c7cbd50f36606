//! Café records as written to and read from the store.

/// A row as read back from the store, fields in file order.
///
/// Rows are not re-validated on read: the file is plain text and may have
/// been edited by hand.
pub type CafeRow = Vec<String>;

/// Column headings for displaying rows, in store field order.
pub const COLUMNS: [&str; 7] = [
    "Cafe Name",
    "Location",
    "Open",
    "Close",
    "Coffee",
    "Wifi",
    "Power",
];

/// A validated café ready to be appended to the store.
///
/// Times are already whitespace-free and ratings are already encoded as
/// their glyph strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeRecord {
    pub name: String,
    pub location_url: String,
    pub opening_time: String,
    pub closing_time: String,
    pub coffee_display: String,
    pub wifi_display: String,
    pub power_display: String,
}

impl CafeRecord {
    /// Fields in the fixed on-disk order.
    pub fn fields(&self) -> [&str; 7] {
        [
            self.name.as_str(),
            self.location_url.as_str(),
            self.opening_time.as_str(),
            self.closing_time.as_str(),
            self.coffee_display.as_str(),
            self.wifi_display.as_str(),
            self.power_display.as_str(),
        ]
    }

    pub fn to_row(&self) -> CafeRow {
        self.fields().iter().map(|f| f.to_string()).collect()
    }
}
