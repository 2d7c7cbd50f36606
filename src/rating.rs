//! Rating-to-glyph encoding.
//!
//! Ratings are collected as small integers but persisted as strings of
//! repeated glyphs, one glyph per point:
//!
//! | Category | Domain | Glyph | Zero |
//! |----------|--------|-------|------|
//! | coffee   | 1..=5  | `☕️`  | not offered |
//! | wifi     | 0..=5  | `💪`  | `✘` |
//! | power    | 0..=5  | `🔌`  | `✘` |
//!
//! [`encode`] is the pure mapping. [`RatingChoices`] precomputes the
//! `(value, label)` pairs for every category once at startup; the same table
//! drives the `<select>` options on the form and resolves submitted values
//! back to their display strings.

/// Glyph used for a zero (absent) wifi or power rating.
pub const ABSENT_GLYPH: &str = "✘";

/// Highest rating in every category.
pub const MAX_RATING: u8 = 5;

/// A rated aspect of a café.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Coffee,
    Wifi,
    Power,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Coffee, Category::Wifi, Category::Power];

    /// The glyph repeated once per rating point.
    pub fn glyph(self) -> &'static str {
        match self {
            Category::Coffee => "☕️",
            Category::Wifi => "💪",
            Category::Power => "🔌",
        }
    }

    /// Lowest accepted rating. Coffee has no zero option.
    pub fn min_rating(self) -> u8 {
        match self {
            Category::Coffee => 1,
            Category::Wifi | Category::Power => 0,
        }
    }

    pub fn accepts(self, rating: u8) -> bool {
        (self.min_rating()..=MAX_RATING).contains(&rating)
    }
}

/// A rating known to be within its category's domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating {
    category: Category,
    value: u8,
}

impl Rating {
    pub fn new(category: Category, value: u8) -> Option<Self> {
        category
            .accepts(value)
            .then_some(Self { category, value })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// The stored form: the glyph repeated `value` times, or the absent
    /// glyph for zero.
    pub fn display(&self) -> String {
        if self.value == 0 {
            return ABSENT_GLYPH.to_string();
        }
        self.category.glyph().repeat(self.value as usize)
    }
}

/// Encode `rating` as its display string.
///
/// Returns `None` when `rating` is outside the category's domain; callers
/// are expected to have validated the value first.
pub fn encode(category: Category, rating: u8) -> Option<String> {
    Rating::new(category, rating).map(|r| r.display())
}

/// One selectable rating: the submitted value and the label shown for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingChoice {
    pub value: u8,
    pub label: String,
}

/// Precomputed rating choices for all categories.
///
/// Built once when the application starts and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct RatingChoices {
    coffee: Vec<RatingChoice>,
    wifi: Vec<RatingChoice>,
    power: Vec<RatingChoice>,
}

impl RatingChoices {
    pub fn new() -> Self {
        Self {
            coffee: build_choices(Category::Coffee),
            wifi: build_choices(Category::Wifi),
            power: build_choices(Category::Power),
        }
    }

    /// Choices for `category`, in ascending order of value.
    pub fn choices(&self, category: Category) -> &[RatingChoice] {
        match category {
            Category::Coffee => &self.coffee,
            Category::Wifi => &self.wifi,
            Category::Power => &self.power,
        }
    }

    /// Display string for an in-domain rating, looked up in the table.
    pub fn label(&self, rating: Rating) -> &str {
        let offset = rating.value() - rating.category().min_rating();
        &self.choices(rating.category())[usize::from(offset)].label
    }
}

impl Default for RatingChoices {
    fn default() -> Self {
        Self::new()
    }
}

fn build_choices(category: Category) -> Vec<RatingChoice> {
    (category.min_rating()..=MAX_RATING)
        .filter_map(|value| encode(category, value).map(|label| RatingChoice { value, label }))
        .collect()
}
