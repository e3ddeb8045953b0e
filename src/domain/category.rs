// Loudness categories and their chart colours

/// Coarse loudness bucket attached to a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Quiet,
    Light,
    Loud,
    Epic,
}

/// Bar fill used for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    Green,
    Yellow,
    Orange,
    Red,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Quiet,
        Category::Light,
        Category::Loud,
        Category::Epic,
    ];

    /// Parse a category label, ignoring case and surrounding whitespace
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "quiet" => Some(Category::Quiet),
            "light" => Some(Category::Light),
            "loud" => Some(Category::Loud),
            "epic" => Some(Category::Epic),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Quiet => "Quiet",
            Category::Light => "Light",
            Category::Loud => "Loud",
            Category::Epic => "Epic",
        }
    }

    /// Position of the category band on the y axis
    pub fn axis_value(&self) -> f64 {
        match self {
            Category::Quiet => 10.0,
            Category::Light => 30.0,
            Category::Loud => 50.0,
            Category::Epic => 70.0,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl BarColor {
    /// Anything that is not Quiet, Light or Loud is drawn red.
    pub fn for_category(category: Option<Category>) -> Self {
        match category {
            Some(Category::Quiet) => BarColor::Green,
            Some(Category::Light) => BarColor::Yellow,
            Some(Category::Loud) => BarColor::Orange,
            _ => BarColor::Red,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BarColor::Green => "green",
            BarColor::Yellow => "yellow",
            BarColor::Orange => "orange",
            BarColor::Red => "red",
        }
    }
}

/// Y-axis marks as (value, label) pairs, bottom to top
pub fn y_axis_marks() -> Vec<(f64, &'static str)> {
    Category::ALL
        .iter()
        .map(|c| (c.axis_value(), c.label()))
        .collect()
}
