//! Built-in UK device tables and ECUK reference totals.

use crate::device::{Category, DeviceProfile};
use crate::model::error::ModelResult;

/// (name, rated power W, active min/day, standby power W, units in millions)
type Row = (&'static str, f64, f64, f64, f64);

const KITCHEN: &[Row] = &[
    ("Fridge/Freezer", 150.0, 480.0, 15.0, 21.03),
    ("Kettle", 3000.0, 12.0, 0.00, 27.00),
    ("Dishwasher", 800.0, 51.0, 0.50, 14.2),
    ("Air Fryer", 1500.0, 25.0, 0.5, 16.50),
    ("Electric Hob", 1800.0, 20.0, 1.0, 14.8),
    ("Microwave", 1000.0, 11.0, 2.0, 25.60),
    ("Coffee Machine", 1400.0, 3.0, 0.77, 16.20),
    ("Rice Cooker", 700.0, 30.0, 0.00, 4.50),
    ("Toaster", 900.0, 9.0, 0.00, 21.90),
    ("Washing Machine", 700.0, 34.0, 1.00, 27.50),
    ("Electric Oven", 550.0, 35.0, 2.0, 20.9),
];

const OFFICE: &[Row] = &[
    ("Wifi Router", 10.88, 1440.0, 0.0, 26.98),
    ("Desktop Computer", 100.0, 138.0, 0.5, 3.84),
    ("Laptop", 42.0, 219.0, 0.5, 31.862),
    ("Monitor", 21.4, 138.0, 0.3, 19.2),
    ("Projector", 225.0, 30.0, 0.3, 0.6),
    ("Printer", 26.64, 0.15, 1.4, 8.11),
];

const PERSONAL: &[Row] = &[
    ("Smartphones", 5.0, 165.5, 0.04, 64.93),
    ("Feature Phone", 1.75, 112.8, 0.075, 0.4101),
    ("Tablets", 12.0, 171.8, 0.05, 34.96),
    ("Smart Speaker", 2.4, 36.0, 1.3, 9.37),
];

const ENTERTAINMENT: &[Row] = &[
    ("Gaming Console (Handheld)", 9.8, 101.8, 0.08, 2.44),
    ("Gaming Console (Home)", 214.3, 150.0, 0.31, 9.77),
    ("TV (LCD)", 50.4, 270.0, 0.5, 52.3),
    ("TV (OLED)", 81.0, 270.0, 0.5, 1.05),
    ("Set-Top Box", 20.1, 196.0, 0.4, 26.049),
];

/// ECUK national consumption in GWh/yr.
const KITCHEN_ECUK_GWH: &[(&str, f64)] = &[
    ("Fridge/Freezer", 6019.0),
    ("Kettle", 4843.0),
    ("Dishwasher", 3502.0),
    ("Washing Machine", 6773.0),
    ("Microwave", 2507.0),
    ("Electric Oven", 2008.0),
    ("Electric Hob", 2657.0),
];

const ENTERTAINMENT_ECUK_GWH: &[(&str, f64)] = &[
    ("Gaming Console (Home)", 1677.0),
    ("TV (LCD)", 1252.0),
    ("TV (OLED)", 56.0),
    ("Set-Top Box", 1134.0),
];

fn rows(category: Category) -> &'static [Row] {
    match category {
        Category::Kitchen => KITCHEN,
        Category::Office => OFFICE,
        Category::Personal => PERSONAL,
        Category::Entertainment => ENTERTAINMENT,
    }
}

/// Device profiles of one category, in table order.
pub fn profiles(category: Category) -> ModelResult<Vec<DeviceProfile>> {
    rows(category)
        .iter()
        .map(|&(name, p, t, p_stby, units)| DeviceProfile::new(name, p, t, p_stby, units))
        .collect()
}

/// ECUK reference totals for a category, if the dataset covers it.
///
/// ECUK publishes no figures for personal or office devices.
pub fn reference_gwh(category: Category) -> Option<&'static [(&'static str, f64)]> {
    match category {
        Category::Kitchen => Some(KITCHEN_ECUK_GWH),
        Category::Entertainment => Some(ENTERTAINMENT_ECUK_GWH),
        Category::Personal | Category::Office => None,
    }
}

/// All categories with their profiles, in reporting order.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub categories: Vec<(Category, Vec<DeviceProfile>)>,
}

impl Catalog {
    pub fn builtin() -> ModelResult<Self> {
        let categories = Category::ALL
            .iter()
            .map(|&c| Ok((c, profiles(c)?)))
            .collect::<ModelResult<Vec<_>>>()?;
        Ok(Self { categories })
    }

    pub fn num_devices(&self) -> usize {
        self.categories.iter().map(|(_, p)| p.len()).sum()
    }

    /// Iterates over every device tagged with its category.
    pub fn devices(&self) -> impl Iterator<Item = (Category, &DeviceProfile)> {
        self.categories
            .iter()
            .flat_map(|(c, profiles)| profiles.iter().map(move |p| (*c, p)))
    }
}
